//! Bounds for fixpoint loops.

use std::fmt;

/// Upper bounds on the work a single query may do. The default is unbounded.
///
/// ```
/// use cfpq_matrix::Limits;
///
/// let limits = Limits::new().max_iterations(100).max_triples(1 << 20);
/// assert!(limits.check_iterations(100).is_ok());
/// assert!(limits.check_iterations(101).is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Limits {
    max_iterations: usize,
    max_triples: usize,
    max_nonzeros: usize,
}

/// A resource that a fixpoint loop consumes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Resource {
    /// Passes or rounds of a fixpoint loop.
    Iterations,
    /// Reachability triples discovered by a worklist.
    Triples,
    /// Non-zero entries of a single matrix.
    Nonzeros,
}

/// A limit was exceeded.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct LimitExceeded {
    /// The exhausted resource.
    pub what: Resource,
    /// The configured limit.
    pub limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_iterations: usize::MAX,
            max_triples: usize::MAX,
            max_nonzeros: usize::MAX,
        }
    }
}

impl Limits {
    /// Creates unbounded limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds the number of passes of a fixpoint loop.
    pub fn max_iterations(mut self, limit: usize) -> Self {
        self.max_iterations = limit;
        self
    }

    /// Bounds the number of triples a worklist may discover.
    pub fn max_triples(mut self, limit: usize) -> Self {
        self.max_triples = limit;
        self
    }

    /// Bounds the number of non-zero entries in a single matrix.
    pub fn max_nonzeros(mut self, limit: usize) -> Self {
        self.max_nonzeros = limit;
        self
    }

    /// Checks the number of passes done so far.
    pub fn check_iterations(&self, iterations: usize) -> Result<(), LimitExceeded> {
        check(Resource::Iterations, iterations, self.max_iterations)
    }

    /// Checks the number of triples discovered so far.
    pub fn check_triples(&self, triples: usize) -> Result<(), LimitExceeded> {
        check(Resource::Triples, triples, self.max_triples)
    }

    /// Checks the size of a matrix.
    pub fn check_nonzeros(&self, nonzeros: usize) -> Result<(), LimitExceeded> {
        check(Resource::Nonzeros, nonzeros, self.max_nonzeros)
    }
}

fn check(what: Resource, used: usize, limit: usize) -> Result<(), LimitExceeded> {
    if used > limit {
        Err(LimitExceeded { what, limit })
    } else {
        Ok(())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Resource::Iterations => "iterations",
            Resource::Triples => "triples",
            Resource::Nonzeros => "non-zero entries",
        };
        f.write_str(name)
    }
}

impl fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "resource exhausted: more than {} {}", self.limit, self.what)
    }
}

impl std::error::Error for LimitExceeded {}
