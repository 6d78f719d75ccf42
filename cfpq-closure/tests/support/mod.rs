#![allow(dead_code)]

use std::collections::BTreeSet;

use cfpq_automaton::LabeledGraph;
use cfpq_closure::Triples;
use cfpq_grammar::Cfg;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Keeps the pairs of triples whose nonterminal is the grammar's root.
pub fn root_pairs(cfg: &Cfg, triples: &Triples) -> BTreeSet<(usize, usize)> {
    let root = cfg.root().expect("grammar without a root");
    triples
        .iter()
        .filter(|&&(nonterminal, _, _)| nonterminal == root)
        .map(|&(_, from, to)| (from, to))
        .collect()
}

/// A path `0 → 1 → … → n` whose edges spell `word`, one character per edge.
pub fn path_graph(word: &str) -> LabeledGraph {
    let mut graph = LabeledGraph::new(1);
    for (i, ch) in word.chars().enumerate() {
        graph.add_edge(i, &ch.to_string(), i + 1);
    }
    graph
}
