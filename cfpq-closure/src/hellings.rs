//! Worklist closure over reachability triples.
//!
//! Each triple `(N, u, v)` is popped once. It is joined with known triples that end
//! at `u` and known triples that start at `v`, through the binary rules of the
//! normalized grammar.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use cfpq_automaton::LabeledGraph;
use cfpq_grammar::{Cfg, Symbol};
use cfpq_matrix::{LimitExceeded, Limits};
use log::{debug, trace};

use crate::wcnf::WeakCnf;
use crate::{ClosureError, Triples};

struct Worklist<'a> {
    triples: Triples,
    /// Triples keyed by their start vertex, as `(N, end)`.
    by_start: BTreeMap<usize, BTreeSet<(Symbol, usize)>>,
    /// Triples keyed by their end vertex, as `(N, start)`.
    by_end: BTreeMap<usize, BTreeSet<(Symbol, usize)>>,
    queue: VecDeque<(Symbol, usize, usize)>,
    limits: &'a Limits,
}

impl<'a> Worklist<'a> {
    fn new(limits: &'a Limits) -> Self {
        Worklist {
            triples: Triples::new(),
            by_start: BTreeMap::new(),
            by_end: BTreeMap::new(),
            queue: VecDeque::new(),
            limits,
        }
    }

    fn insert(&mut self, nonterminal: Symbol, from: usize, to: usize) -> Result<(), LimitExceeded> {
        if self.triples.insert((nonterminal, from, to)) {
            self.limits.check_triples(self.triples.len())?;
            self.by_start
                .entry(from)
                .or_default()
                .insert((nonterminal, to));
            self.by_end.entry(to).or_default().insert((nonterminal, from));
            self.queue.push_back((nonterminal, from, to));
        }
        Ok(())
    }

    fn ending_at(&self, vertex: usize) -> impl Iterator<Item = (Symbol, usize)> + '_ {
        self.by_end.get(&vertex).into_iter().flatten().copied()
    }

    fn starting_at(&self, vertex: usize) -> impl Iterator<Item = (Symbol, usize)> + '_ {
        self.by_start.get(&vertex).into_iter().flatten().copied()
    }
}

/// Computes all triples `(N, u, v)` such that the nonterminal `N` derives the labels
/// of some path from `u` to `v`. Every vertex is reachable from itself through nullable
/// nonterminals.
///
/// The grammar is rewritten into weak Chomsky normal form first, so the triples
/// may mention nonterminals created by the rewrite. An empty language gives an
/// empty result.
pub fn hellings(graph: &LabeledGraph, grammar: &Cfg) -> Result<Triples, ClosureError> {
    hellings_with_limits(graph, grammar, &Limits::default())
}

/// Computes the triples like [`hellings`], failing once more than
/// `limits.max_triples` triples are known.
pub fn hellings_with_limits(
    graph: &LabeledGraph,
    grammar: &Cfg,
    limits: &Limits,
) -> Result<Triples, ClosureError> {
    let wcnf = match WeakCnf::new(grammar)? {
        Some(wcnf) => wcnf,
        None => return Ok(Triples::new()),
    };
    let mut worklist = Worklist::new(limits);
    for vertex in graph.nodes() {
        for &nonterminal in &wcnf.nulling {
            worklist.insert(nonterminal, vertex, vertex)?;
        }
    }
    for (from, label, to) in graph.edges() {
        for &nonterminal in wcnf.heads_of_label(label) {
            worklist.insert(nonterminal, from, to)?;
        }
    }
    debug!(
        "hellings: {} initial triples on {} nodes",
        worklist.triples.len(),
        graph.num_nodes()
    );
    let mut pops = 0usize;
    let mut found = vec![];
    while let Some((middle_sym, from, to)) = worklist.queue.pop_front() {
        pops += 1;
        // `(left_sym, start, from)` followed by `(middle_sym, from, to)`.
        for (left_sym, start) in worklist.ending_at(from) {
            for &head in wcnf.heads_of_body(left_sym, middle_sym) {
                found.push((head, start, to));
            }
        }
        // `(middle_sym, from, to)` followed by `(right_sym, to, end)`.
        for (right_sym, end) in worklist.starting_at(to) {
            for &head in wcnf.heads_of_body(middle_sym, right_sym) {
                found.push((head, from, end));
            }
        }
        for (head, start, end) in found.drain(..) {
            worklist.insert(head, start, end)?;
        }
        trace!(
            "hellings: popped {} triples, {} known",
            pops,
            worklist.triples.len()
        );
    }
    debug!("hellings: done with {} triples", worklist.triples.len());
    Ok(worklist.triples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_loop_join() {
        // `(S, 0, 0)` joins with itself, through both indexes.
        let mut cfg = Cfg::new();
        let [start] = cfg.sym();
        let a = cfg.terminal("a");
        cfg.set_root(start);
        cfg.rule(start).rhs([a]).rhs([start, start]);
        let mut graph = LabeledGraph::new(1);
        graph.add_edge(0, "a", 0);
        let triples = hellings(&graph, &cfg).unwrap();
        assert_eq!(triples, [(start, 0, 0)].into_iter().collect());
    }
}
