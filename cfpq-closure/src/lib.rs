//! Context-free path querying. Both engines compute the same set of triples
//! `(N, u, v)`, such that `N` derives the labels of some path from `u` to `v`.

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

use cfpq_grammar::Symbol;
use cfpq_matrix::{LimitExceeded, Resource};

pub mod hellings;
pub mod matrix;
mod wcnf;

pub use crate::hellings::{hellings, hellings_with_limits};
pub use crate::matrix::{matrix_closure, matrix_closure_with_limits};

/// Reachability triples `(N, u, v)`.
pub type Triples = BTreeSet<(Symbol, usize, usize)>;

/// Represents a failure of a closure engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClosureError {
    /// The grammar has no start symbol.
    NoRoot,
    /// A limit was exceeded.
    ResourceExhausted {
        /// The exhausted resource.
        what: Resource,
        /// The configured limit.
        limit: usize,
    },
}

impl From<LimitExceeded> for ClosureError {
    fn from(error: LimitExceeded) -> Self {
        ClosureError::ResourceExhausted {
            what: error.what,
            limit: error.limit,
        }
    }
}

impl fmt::Display for ClosureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClosureError::NoRoot => write!(f, "the grammar has no start symbol"),
            ClosureError::ResourceExhausted { what, limit } => {
                write!(f, "resource exhausted: more than {} {}", limit, what)
            }
        }
    }
}

impl std::error::Error for ClosureError {}
