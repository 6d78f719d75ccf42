#![allow(dead_code)]

use std::collections::BTreeSet;

use cfpq_automaton::{Automaton, LabeledGraph};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn vertices(vertices: &[usize]) -> BTreeSet<usize> {
    vertices.iter().copied().collect()
}

/// The graph as an automaton, with optional start and final vertices.
pub fn graph_automaton(
    graph: &LabeledGraph,
    start: Option<&[usize]>,
    end: Option<&[usize]>,
) -> Automaton {
    let start = start.map(vertices);
    let end = end.map(vertices);
    Automaton::from_graph(graph, start.as_ref(), end.as_ref())
}
