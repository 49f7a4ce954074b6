/*!
Reports from a solve, and the results a solver returns.
*/

use std::time::Duration;

use crate::structures::station::Assignment;

/// High-level reports regarding a solve.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Report {
    /// The instance is satisfiable.
    Satisfiable,

    /// The instance is unsatisfiable.
    Unsatisfiable,

    /// The solve was cut off before a conclusion.
    Timeout,

    /// Satisfiability of the instance is unknown, for some other reason.
    Unknown,
}

impl Report {
    /// Whether the report settles satisfiability, and so may be cached.
    pub fn is_conclusive(&self) -> bool {
        matches!(self, Self::Satisfiable | Self::Unsatisfiable)
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::Timeout => write!(f, "Timeout"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// The result of a solver on some instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverResult {
    /// The status of the solve.
    pub report: Report,

    /// A witness, if the report is [Satisfiable](Report::Satisfiable).
    pub assignment: Option<Assignment>,

    /// The nickname of whatever settled the instance.
    pub solved_by: String,

    /// Time spent.
    pub runtime: Duration,
}

impl SolverResult {
    /// A satisfiable result with the given witness.
    pub fn satisfiable(assignment: Assignment, solved_by: impl Into<String>, runtime: Duration) -> Self {
        SolverResult {
            report: Report::Satisfiable,
            assignment: Some(assignment),
            solved_by: solved_by.into(),
            runtime,
        }
    }

    /// A result without a witness.
    pub fn without_assignment(report: Report, solved_by: impl Into<String>, runtime: Duration) -> Self {
        SolverResult {
            report,
            assignment: None,
            solved_by: solved_by.into(),
            runtime,
        }
    }
}
