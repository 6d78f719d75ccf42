use std::fmt;

use cfpq_automaton::{GraphLoadError, RegexError};
use cfpq_closure::ClosureError;
use cfpq_grammar::LoadError;
use cfpq_matrix::Resource;
use cfpq_rpq::RpqError;

/// Any failure of a query, or of reading its inputs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The grammar could not be read.
    Load(LoadError),
    /// The graph could not be read.
    GraphLoad(GraphLoadError),
    /// The regular expression could not be compiled.
    Regex(RegexError),
    /// A context-free query failed.
    Closure(ClosureError),
    /// A regular query failed.
    Rpq(RpqError),
}

impl Error {
    /// Returns the exhausted resource and its limit, if a limit was exceeded.
    pub fn resource_exhausted(&self) -> Option<(Resource, usize)> {
        match *self {
            Error::Closure(ClosureError::ResourceExhausted { what, limit })
            | Error::Rpq(RpqError::ResourceExhausted { what, limit }) => Some((what, limit)),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Load(error) => error.fmt(f),
            Error::GraphLoad(error) => error.fmt(f),
            Error::Regex(error) => error.fmt(f),
            Error::Closure(error) => error.fmt(f),
            Error::Rpq(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Load(error) => Some(error),
            Error::GraphLoad(error) => Some(error),
            Error::Regex(error) => Some(error),
            Error::Closure(error) => Some(error),
            Error::Rpq(error) => Some(error),
        }
    }
}

impl From<LoadError> for Error {
    fn from(error: LoadError) -> Self {
        Error::Load(error)
    }
}

impl From<GraphLoadError> for Error {
    fn from(error: GraphLoadError) -> Self {
        Error::GraphLoad(error)
    }
}

impl From<RegexError> for Error {
    fn from(error: RegexError) -> Self {
        Error::Regex(error)
    }
}

impl From<ClosureError> for Error {
    fn from(error: ClosureError) -> Self {
        Error::Closure(error)
    }
}

impl From<RpqError> for Error {
    fn from(error: RpqError) -> Self {
        Error::Rpq(error)
    }
}
