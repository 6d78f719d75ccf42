//! Finite automata over string labels, and the ways to build them: from regular
//! expressions, from labeled graphs and from grammar rules.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

pub mod automaton;
pub mod graph;
pub mod regex;
pub mod rsm;

pub use crate::automaton::{Automaton, StateId};
pub use crate::graph::{labeled_two_cycles_graph, GraphInfo, GraphLoadError, LabeledGraph};
pub use crate::regex::RegexError;
pub use crate::rsm::{Ecfg, Rsm};
