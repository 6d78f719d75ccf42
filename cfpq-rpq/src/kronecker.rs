//! Single-source querying through the Kronecker product of two automata.
//!
//! The product has a state `i·|Q| + j` for every graph state `i` and query state `j`.
//! Its transitive closure connects two product states iff some nonempty word
//! leads between them in both automata at once.

use cfpq_automaton::{Automaton, StateId};
use cfpq_matrix::{BoolMatrix, Limits};
use log::debug;

use crate::RpqError;

/// Finds pairs `(u, w)` of graph vertices such that a path of at least one edge
/// from `u` to `w` spells a word accepted by `query`. The graph's start and final
/// states bound `u` and `w`. Answers are sorted and distinct. Vertices are the
/// external names of graph states, or their indices for unnamed states.
pub fn kronecker_rpq(
    graph: &Automaton,
    query: &Automaton,
    limits: &Limits,
) -> Result<Vec<(usize, usize)>, RpqError> {
    let graph_matrices = graph.boolean_matrices();
    let query_matrices = query.boolean_matrices();
    let q2 = query.num_states();
    let mut product = BoolMatrix::square(graph.num_states() * q2);
    for label in graph_matrices.shared_labels(&query_matrices) {
        if let (Some(lhs), Some(rhs)) = (graph_matrices.get(label), query_matrices.get(label)) {
            product.or_assign(&lhs.kron(rhs));
        }
    }
    if product.is_empty() {
        debug!("kronecker: the automata share no transitions");
        return Ok(vec![]);
    }
    let passes = product.transitive_closure(limits)?;
    debug!(
        "kronecker: closure of {} product states in {} passes, {} entries",
        product.num_rows(),
        passes,
        product.nnz()
    );
    let vertex = |state: StateId| graph.state_name(state).unwrap_or(state);
    let mut result = vec![];
    for &graph_start in graph.start_states() {
        for &query_start in query.start_states() {
            for col in product.iter_row(graph_start * q2 + query_start) {
                let (graph_end, query_end) = (col / q2, col % q2);
                if graph.is_final(graph_end) && query.is_final(query_end) {
                    result.push((vertex(graph_start), vertex(graph_end)));
                }
            }
        }
    }
    result.sort_unstable();
    result.dedup();
    Ok(result)
}
