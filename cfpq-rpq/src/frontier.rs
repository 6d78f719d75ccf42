//! Multi-source breadth-first search through boolean matrices.
//!
//! Every label shared by the query and the graph gets a direct sum of their
//! matrices, with the query in the top-left block. The frontier has one block
//! of `|Q|` rows per search. Row `r` of a block stands for query state `r mod |Q|`,
//! and its columns past `|Q|` mark the graph vertices reached in that state.

use cfpq_automaton::{Automaton, StateId};
use cfpq_matrix::{BoolMatrix, Limits};
use log::{debug, trace};

use crate::{MsRpqAnswer, RpqError, Separation};

/// Computes one round of the search. Each row of `frontier · direct_sum` that reaches
/// query state `c` and some graph vertices becomes row `c` of its block, with
/// those vertices as markers.
///
/// Rows of the product without markers are dropped.
pub fn advance_frontier(
    frontier: &BoolMatrix,
    direct_sums: &[BoolMatrix],
    q2: usize,
) -> BoolMatrix {
    let mut delta = BoolMatrix::new(frontier.num_rows(), frontier.num_cols());
    for direct_sum in direct_sums {
        let product = frontier.mul(direct_sum);
        for (row, cols) in product.iter_rows() {
            if cols.range(q2..).next().is_none() {
                continue;
            }
            let shift = row - row % q2;
            for &col in cols.range(..q2) {
                delta.set(shift + col, col);
                delta.union_row(shift + col, cols.range(q2..).copied());
            }
        }
    }
    delta
}

/// The seeded frontier: block rows for query start states, marked with the
/// block's start vertices.
fn seed(graph: &Automaton, query: &Automaton, separation: Separation) -> BoolMatrix {
    let q2 = query.num_states();
    let starts: Vec<StateId> = graph.start_states().iter().copied().collect();
    let num_blocks = match separation {
        Separation::PerSource => starts.len(),
        Separation::Merged => 1,
    };
    let mut frontier = BoolMatrix::new(num_blocks * q2, q2 + graph.num_states());
    for &query_start in query.start_states() {
        match separation {
            Separation::PerSource => {
                for (block, &graph_start) in starts.iter().enumerate() {
                    let row = block * q2 + query_start;
                    frontier.set(row, query_start);
                    frontier.set(row, q2 + graph_start);
                }
            }
            Separation::Merged => {
                frontier.set(query_start, query_start);
                frontier.union_row(query_start, starts.iter().map(|&start| q2 + start));
            }
        }
    }
    frontier
}

/// Runs rounds until no round adds an entry. Returns every visited entry.
fn search(
    graph: &Automaton,
    query: &Automaton,
    separation: Separation,
    limits: &Limits,
) -> Result<BoolMatrix, RpqError> {
    let q2 = query.num_states();
    let graph_matrices = graph.boolean_matrices();
    let query_matrices = query.boolean_matrices();
    let direct_sums: Vec<BoolMatrix> = query_matrices
        .shared_labels(&graph_matrices)
        .filter_map(|label| {
            let top_left = query_matrices.get(label)?;
            let bottom_right = graph_matrices.get(label)?;
            Some(top_left.direct_sum(bottom_right))
        })
        .collect();
    let frontier = seed(graph, query, separation);
    let mut visited = BoolMatrix::new(frontier.num_rows(), frontier.num_cols());
    if direct_sums.is_empty() {
        debug!("frontier: the automata share no labels");
        return Ok(visited);
    }
    let mut rounds = 0;
    loop {
        rounds += 1;
        limits.check_iterations(rounds)?;
        let before = visited.nnz();
        let input = if rounds == 1 { &frontier } else { &visited };
        let delta = advance_frontier(input, &direct_sums, q2);
        visited.or_assign(&delta);
        let after = visited.nnz();
        limits.check_nonzeros(after)?;
        trace!("frontier: round {}, {} -> {} entries", rounds, before, after);
        if after == before {
            break;
        }
    }
    debug!(
        "frontier: {} labels, {} rounds, {} visited entries",
        direct_sums.len(),
        rounds,
        visited.nnz()
    );
    Ok(visited)
}

/// Finds graph vertices reachable from the graph's start states along paths of
/// at least one edge whose labels `query` accepts. Only final vertices are reported.
///
/// With [`Separation::PerSource`], answers are `(source, target)` pairs.
/// With [`Separation::Merged`], they are targets reachable from any source.
/// Vertices are the external names of graph states, or their indices for
/// unnamed states.
pub fn frontier_rpq(
    graph: &Automaton,
    query: &Automaton,
    separation: Separation,
    limits: &Limits,
) -> Result<MsRpqAnswer, RpqError> {
    let q2 = query.num_states();
    let visited = search(graph, query, separation, limits)?;
    let starts: Vec<StateId> = graph.start_states().iter().copied().collect();
    let vertex = |state: StateId| graph.state_name(state).unwrap_or(state);
    let reached = visited
        .iter()
        .filter(|&(row, col)| {
            col >= q2 && graph.is_final(col - q2) && query.is_final(row % q2)
        })
        .map(|(row, col)| (row / q2, vertex(col - q2)));
    Ok(match separation {
        Separation::PerSource => MsRpqAnswer::PerSource(
            reached
                .map(|(block, target)| (vertex(starts[block]), target))
                .collect(),
        ),
        Separation::Merged => MsRpqAnswer::Merged(reached.map(|(_, target)| target).collect()),
    })
}
