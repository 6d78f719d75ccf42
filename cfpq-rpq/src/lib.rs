//! Regular path querying. A query is a finite automaton over edge labels, and an
//! answer is a pair of graph vertices connected by a path whose labels it accepts.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

use std::collections::BTreeSet;
use std::fmt;

use cfpq_matrix::{LimitExceeded, Resource};

pub mod frontier;
pub mod kronecker;

pub use crate::frontier::{advance_frontier, frontier_rpq};
pub use crate::kronecker::kronecker_rpq;

/// Whether multi-source answers keep track of the source vertex.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Separation {
    /// One frontier block per start vertex. Answers are `(source, target)` pairs.
    PerSource,
    /// A single frontier block for all start vertices. Answers are target vertices.
    Merged,
}

/// The answer to a multi-source query.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MsRpqAnswer {
    /// Pairs of a start vertex and a reachable final vertex.
    PerSource(BTreeSet<(usize, usize)>),
    /// Final vertices reachable from any start vertex.
    Merged(BTreeSet<usize>),
}

impl MsRpqAnswer {
    /// Returns the reachable final vertices, whatever the separation.
    pub fn targets(&self) -> BTreeSet<usize> {
        match self {
            MsRpqAnswer::PerSource(pairs) => pairs.iter().map(|&(_, target)| target).collect(),
            MsRpqAnswer::Merged(targets) => targets.clone(),
        }
    }

    /// Checks whether no vertex is reachable.
    pub fn is_empty(&self) -> bool {
        match self {
            MsRpqAnswer::PerSource(pairs) => pairs.is_empty(),
            MsRpqAnswer::Merged(targets) => targets.is_empty(),
        }
    }
}

/// Represents a failure of a path query.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RpqError {
    /// A limit was exceeded.
    ResourceExhausted {
        /// The exhausted resource.
        what: Resource,
        /// The configured limit.
        limit: usize,
    },
}

impl From<LimitExceeded> for RpqError {
    fn from(error: LimitExceeded) -> Self {
        RpqError::ResourceExhausted {
            what: error.what,
            limit: error.limit,
        }
    }
}

impl fmt::Display for RpqError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RpqError::ResourceExhausted { what, limit } => {
                write!(f, "resource exhausted: more than {} {}", limit, what)
            }
        }
    }
}

impl std::error::Error for RpqError {}
