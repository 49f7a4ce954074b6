use std::str::FromStr;

/// How to choose between several cached entries which each prove a query.
///
/// Candidates are always visited in ascending (most-significant-bit-first) order of their bit-vectors, and entries sharing a bit-vector in the order they were added.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TieBreak {
    /// Take the first candidate, and stop searching.
    FirstInOrder = 0,

    /// Take the candidate with the fewest stations, the first such candidate if there are several.
    SmallestCardinality,
}

impl std::fmt::Display for TieBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstInOrder => write!(f, "FirstInOrder"),
            Self::SmallestCardinality => write!(f, "SmallestCardinality"),
        }
    }
}

impl TieBreak {
    /// The minimum TieBreak type.
    pub const MIN: TieBreak = TieBreak::FirstInOrder;

    /// The maximum TieBreak type.
    pub const MAX: TieBreak = TieBreak::SmallestCardinality;

    /// Picks a candidate from `candidates`, using `cardinality` to measure each.
    pub fn select<'a, C, I, F>(&self, mut candidates: I, cardinality: F) -> Option<&'a C>
    where
        I: Iterator<Item = &'a C>,
        F: Fn(&C) -> usize,
    {
        match self {
            Self::FirstInOrder => candidates.next(),
            // min_by_key keeps the first of equal minima.
            Self::SmallestCardinality => candidates.min_by_key(|candidate| cardinality(*candidate)),
        }
    }
}

impl FromStr for TieBreak {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FirstInOrder" => Ok(Self::FirstInOrder),

            "SmallestCardinality" => Ok(Self::SmallestCardinality),

            _unkown_string => Err(()),
        }
    }
}
