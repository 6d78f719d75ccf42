//! Closure over one boolean matrix per nonterminal.

use std::collections::BTreeMap;

use cfpq_automaton::LabeledGraph;
use cfpq_grammar::{Cfg, Symbol};
use cfpq_matrix::{BoolMatrix, Limits};
use log::{debug, trace};

use crate::wcnf::WeakCnf;
use crate::{ClosureError, Triples};

/// Reachability matrices, where `T[N][u, v]` is set iff `N` derives a path from `u` to `v`.
struct Reachability {
    dim: usize,
    matrices: BTreeMap<Symbol, BoolMatrix>,
}

impl Reachability {
    fn new(graph: &LabeledGraph, wcnf: &WeakCnf) -> Self {
        let mut reachability = Reachability {
            dim: graph.num_nodes(),
            matrices: BTreeMap::new(),
        };
        for &nonterminal in &wcnf.nulling {
            for vertex in graph.nodes() {
                reachability.matrix_mut(nonterminal).set(vertex, vertex);
            }
        }
        for (from, label, to) in graph.edges() {
            for &nonterminal in wcnf.heads_of_label(label) {
                reachability.matrix_mut(nonterminal).set(from, to);
            }
        }
        reachability
    }

    fn matrix_mut(&mut self, nonterminal: Symbol) -> &mut BoolMatrix {
        let dim = self.dim;
        self.matrices
            .entry(nonterminal)
            .or_insert_with(|| BoolMatrix::square(dim))
    }

    fn nnz(&self) -> usize {
        self.matrices.values().map(BoolMatrix::nnz).sum()
    }

    /// Applies `T[A] |= T[B]·T[C]` for every binary rule, in order. Returns whether
    /// any matrix grew during the whole pass.
    fn pass(&mut self, wcnf: &WeakCnf) -> bool {
        let before = self.nnz();
        for &(head, left, right) in &wcnf.binary {
            let product = match (self.matrices.get(&left), self.matrices.get(&right)) {
                (Some(left), Some(right)) => left.mul(right),
                _ => continue,
            };
            if !product.is_empty() {
                self.matrix_mut(head).or_assign(&product);
            }
        }
        self.nnz() != before
    }

    fn into_triples(self) -> Triples {
        let mut triples = Triples::new();
        for (nonterminal, matrix) in self.matrices {
            triples.extend(matrix.iter().map(|(from, to)| (nonterminal, from, to)));
        }
        triples
    }
}

/// Computes the same triples as [`hellings`](crate::hellings), with a fixpoint over
/// boolean matrices. A pass applies every binary rule once. Passes repeat until a
/// whole pass leaves every matrix unchanged.
pub fn matrix_closure(graph: &LabeledGraph, grammar: &Cfg) -> Result<Triples, ClosureError> {
    matrix_closure_with_limits(graph, grammar, &Limits::default())
}

/// Computes the triples like [`matrix_closure`], failing after `limits.max_iterations`
/// passes, or once any matrix has more than `limits.max_nonzeros` entries.
pub fn matrix_closure_with_limits(
    graph: &LabeledGraph,
    grammar: &Cfg,
    limits: &Limits,
) -> Result<Triples, ClosureError> {
    let wcnf = match WeakCnf::new(grammar)? {
        Some(wcnf) => wcnf,
        None => return Ok(Triples::new()),
    };
    let mut reachability = Reachability::new(graph, &wcnf);
    debug!(
        "matrix closure: {} matrices of {}x{}, {} initial entries",
        reachability.matrices.len(),
        reachability.dim,
        reachability.dim,
        reachability.nnz()
    );
    let mut passes = 0;
    loop {
        passes += 1;
        limits.check_iterations(passes)?;
        let changed = reachability.pass(&wcnf);
        for matrix in reachability.matrices.values() {
            limits.check_nonzeros(matrix.nnz())?;
        }
        trace!(
            "matrix closure: pass {}, {} entries",
            passes,
            reachability.nnz()
        );
        if !changed {
            break;
        }
    }
    debug!(
        "matrix closure: done after {} passes with {} entries",
        passes,
        reachability.nnz()
    );
    Ok(reachability.into_triples())
}
