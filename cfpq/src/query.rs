use std::collections::BTreeSet;

use cfpq_automaton::{Automaton, LabeledGraph};
use cfpq_closure::Triples;
use cfpq_grammar::Cfg;
use cfpq_matrix::Limits;
use cfpq_rpq::{MsRpqAnswer, Separation};
use log::debug;

use crate::error::Error;

/// The engine behind a context-free query.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Algorithm {
    /// The worklist closure over triples.
    #[default]
    Hellings,
    /// The fixpoint over one boolean matrix per nonterminal.
    Matrix,
}

/// Computes every triple `(N, u, v)` such that `N` derives a path from `u` to `v`.
pub fn hellings(graph: &LabeledGraph, grammar: &Cfg) -> Result<Triples, Error> {
    hellings_with_limits(graph, grammar, &Limits::default())
}

/// Like [`hellings`], bounded by `limits`.
pub fn hellings_with_limits(
    graph: &LabeledGraph,
    grammar: &Cfg,
    limits: &Limits,
) -> Result<Triples, Error> {
    Ok(cfpq_closure::hellings_with_limits(graph, grammar, limits)?)
}

/// Computes the same triples as [`hellings`] with boolean matrices.
pub fn matrix_closure(graph: &LabeledGraph, grammar: &Cfg) -> Result<Triples, Error> {
    matrix_closure_with_limits(graph, grammar, &Limits::default())
}

/// Like [`matrix_closure`], bounded by `limits`.
pub fn matrix_closure_with_limits(
    graph: &LabeledGraph,
    grammar: &Cfg,
    limits: &Limits,
) -> Result<Triples, Error> {
    Ok(cfpq_closure::matrix_closure_with_limits(graph, grammar, limits)?)
}

/// Finds pairs `(u, v)` such that the start symbol derives the labels of some path
/// from `u` to `v`. The start symbol is the nonterminal named `start_symbol`, or the
/// grammar's root. Pairs are restricted to `start` and `end` vertices when given.
///
/// A start symbol that names no nonterminal of the grammar gives no pairs.
pub fn cfpq_reachability(
    graph: &LabeledGraph,
    grammar: &Cfg,
    start: Option<&BTreeSet<usize>>,
    end: Option<&BTreeSet<usize>>,
    start_symbol: Option<&str>,
    algorithm: Algorithm,
) -> Result<BTreeSet<(usize, usize)>, Error> {
    cfpq_reachability_with_limits(
        graph,
        grammar,
        start,
        end,
        start_symbol,
        algorithm,
        &Limits::default(),
    )
}

/// Like [`cfpq_reachability`], bounded by `limits`.
pub fn cfpq_reachability_with_limits(
    graph: &LabeledGraph,
    grammar: &Cfg,
    start: Option<&BTreeSet<usize>>,
    end: Option<&BTreeSet<usize>>,
    start_symbol: Option<&str>,
    algorithm: Algorithm,
    limits: &Limits,
) -> Result<BTreeSet<(usize, usize)>, Error> {
    // Normalization keeps only what the root reaches, so the queried
    // nonterminal becomes the root.
    let mut grammar = grammar.clone();
    if let Some(name) = start_symbol {
        match grammar.nonterminal_by_name(name) {
            Some(sym) => grammar.set_root(sym),
            None => {
                debug!("no nonterminal named {:?}", name);
                return Ok(BTreeSet::new());
            }
        }
    }
    let triples = match algorithm {
        Algorithm::Hellings => hellings_with_limits(graph, &grammar, limits)?,
        Algorithm::Matrix => matrix_closure_with_limits(graph, &grammar, limits)?,
    };
    let root = match grammar.root() {
        Some(root) => root,
        None => return Ok(BTreeSet::new()),
    };
    let result: BTreeSet<(usize, usize)> = triples
        .into_iter()
        .filter(|&(nonterminal, from, to)| {
            nonterminal == root
                && start.map_or(true, |start| start.contains(&from))
                && end.map_or(true, |end| end.contains(&to))
        })
        .map(|(_, from, to)| (from, to))
        .collect();
    debug!(
        "cfpq: {} pairs for {:?} with {:?}",
        result.len(),
        grammar.name_of(root),
        algorithm
    );
    Ok(result)
}

/// Finds pairs `(u, v)` of start and end vertices connected by a nonempty path that
/// `regex` matches. Runs of literal characters are labels. Answers are sorted.
pub fn single_source_rpq(
    graph: &LabeledGraph,
    regex: &str,
    start: Option<&BTreeSet<usize>>,
    end: Option<&BTreeSet<usize>>,
) -> Result<Vec<(usize, usize)>, Error> {
    single_source_rpq_with_limits(graph, regex, start, end, &Limits::default())
}

/// Like [`single_source_rpq`], bounded by `limits`.
pub fn single_source_rpq_with_limits(
    graph: &LabeledGraph,
    regex: &str,
    start: Option<&BTreeSet<usize>>,
    end: Option<&BTreeSet<usize>>,
    limits: &Limits,
) -> Result<Vec<(usize, usize)>, Error> {
    let query = Automaton::from_regex(regex)?;
    let graph = Automaton::from_graph(graph, start, end);
    Ok(cfpq_rpq::kronecker_rpq(&graph, &query, limits)?)
}

/// Finds end vertices reachable from start vertices by a nonempty path that `regex`
/// matches. With [`Separation::PerSource`], each answer keeps its source.
pub fn multi_source_rpq(
    graph: &LabeledGraph,
    regex: &str,
    start: Option<&BTreeSet<usize>>,
    end: Option<&BTreeSet<usize>>,
    separation: Separation,
) -> Result<MsRpqAnswer, Error> {
    multi_source_rpq_with_limits(graph, regex, start, end, separation, &Limits::default())
}

/// Like [`multi_source_rpq`], bounded by `limits`.
pub fn multi_source_rpq_with_limits(
    graph: &LabeledGraph,
    regex: &str,
    start: Option<&BTreeSet<usize>>,
    end: Option<&BTreeSet<usize>>,
    separation: Separation,
    limits: &Limits,
) -> Result<MsRpqAnswer, Error> {
    let query = Automaton::from_regex(regex)?;
    let graph = Automaton::from_graph(graph, start, end);
    Ok(cfpq_rpq::frontier_rpq(&graph, &query, separation, limits)?)
}
