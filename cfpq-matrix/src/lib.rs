//! Sparse boolean matrices, families of them keyed by edge label, and the
//! limits that bound fixpoint computations over them.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

pub mod bool_matrix;
pub mod family;
pub mod limits;

pub use crate::bool_matrix::BoolMatrix;
pub use crate::family::MatrixFamily;
pub use crate::limits::{LimitExceeded, Limits, Resource};
