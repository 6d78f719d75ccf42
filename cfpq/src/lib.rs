//! Context-free and regular path querying over labeled graphs.
//!
//! Grammars come from [`Cfg::load`], graphs from [`LabeledGraph`], and regular
//! queries are compiled from patterns. The functions at the top level run whole
//! queries. The engines are available in [`closure`] and [`rpq`].

#![deny(unsafe_code)]

mod error;
mod query;

pub use cfpq_automaton as automaton;
pub use cfpq_closure as closure;
pub use cfpq_grammar::*;
pub use cfpq_matrix as matrix;
pub use cfpq_rpq as rpq;

pub use cfpq_automaton::{labeled_two_cycles_graph, Automaton, GraphInfo, LabeledGraph};
pub use cfpq_closure::Triples;
pub use cfpq_matrix::{BoolMatrix, Limits, MatrixFamily, Resource};
pub use cfpq_rpq::{MsRpqAnswer, Separation};

pub use crate::error::Error;
pub use crate::query::{
    cfpq_reachability, cfpq_reachability_with_limits, hellings, hellings_with_limits,
    matrix_closure, matrix_closure_with_limits, multi_source_rpq, multi_source_rpq_with_limits,
    single_source_rpq, single_source_rpq_with_limits, Algorithm,
};
