//! Error types used in the library.
//!
//! - Permutation errors are configuration errors, and are raised when an index is built.
//! - Index errors are domain errors, raised when an entry or query mentions an element outside of the permutation of an index.
//!   An index is never modified by a call which returns an index error.
//! - Consistency errors should never occur, and indicate the parallel structures of an index have diverged.
//! - Cache errors are raised when a result which proves nothing is offered to a cache.
//!
//! A cache miss is not an error, see [SatResult](crate::cache::SatResult) and [UnsatResult](crate::cache::UnsatResult).
//!
//! Names of the error enums --- for the most part --- overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::{reports::Report, structures::station::Station};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Cache(CacheError),
    Config(ConfigError),
    Consistency(ConsistencyError),
    Index(IndexError),
    Permutation(PermutationError),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cache(e) => write!(f, "cache error: {e}"),
            Self::Config(e) => write!(f, "config error: {e}"),
            Self::Consistency(e) => write!(f, "consistency error: {e}"),
            Self::Index(e) => write!(f, "index error: {e}"),
            Self::Permutation(e) => write!(f, "permutation error: {e}"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// Errors when offering a result to a cache.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CacheError {
    /// The result was neither satisfiable nor unsatisfiable, and so proves nothing.
    Inconclusive(Report),

    /// A satisfiable result was given without a witness.
    MissingAssignment,

    /// The witness of a satisfiable result does not assign a channel to the given station of the instance.
    IncompleteAssignment(Station),
}

impl From<CacheError> for ErrorKind {
    fn from(e: CacheError) -> Self {
        ErrorKind::Cache(e)
    }
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inconclusive(report) => write!(f, "an {report} result cannot be cached"),
            Self::MissingAssignment => write!(f, "satisfiable result without an assignment"),
            Self::IncompleteAssignment(station) => {
                write!(f, "assignment has no channel for station {station}")
            }
        }
    }
}

/// Errors when revising a configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// The named option was given a value outside of its bounds.
    OutOfBounds(&'static str),
}

impl From<ConfigError> for ErrorKind {
    fn from(e: ConfigError) -> Self {
        ErrorKind::Config(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds(name) => write!(f, "value for '{name}' is out of bounds"),
        }
    }
}

/// Divergence between the bucket map and the ordered tree of an index.
///
/// These are unexpected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConsistencyError {
    /// A bit-vector is in the tree without a bucket.
    MissingBucket,

    /// A bucket is held for a bit-vector which is not in the tree.
    MissingFromTree,

    /// A bucket is held without any entries.
    EmptyBucket,

    /// A bit-vector has a width other than the size of the permutation.
    WidthMismatch,
}

impl From<ConsistencyError> for ErrorKind {
    fn from(e: ConsistencyError) -> Self {
        ErrorKind::Consistency(e)
    }
}

impl std::fmt::Display for ConsistencyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingBucket => write!(f, "bit-vector indexed without a bucket"),
            Self::MissingFromTree => write!(f, "bucket held for an unindexed bit-vector"),
            Self::EmptyBucket => write!(f, "empty bucket"),
            Self::WidthMismatch => write!(f, "bit-vector width differs from the permutation"),
        }
    }
}

/// Errors when converting a set to a bit-vector.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IndexError {
    /// Some element is not mapped by the permutation of the index.
    UnknownElement,
}

impl From<IndexError> for ErrorKind {
    fn from(e: IndexError) -> Self {
        ErrorKind::Index(e)
    }
}

impl std::fmt::Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownElement => write!(f, "element not in the permutation"),
        }
    }
}

/// Errors when building a permutation.
///
/// A permutation must map elements one-to-one onto the positions 0..N.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PermutationError {
    /// No elements were given.
    Empty,

    /// No element is mapped to the position.
    MissingPosition(usize),
}

impl From<PermutationError> for ErrorKind {
    fn from(e: PermutationError) -> Self {
        ErrorKind::Permutation(e)
    }
}

impl std::fmt::Display for PermutationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty permutation"),
            Self::MissingPosition(p) => write!(f, "no element is mapped to position {p}"),
        }
    }
}
