use std::collections::BTreeSet;

use cfpq_automaton::{labeled_two_cycles_graph, Automaton};
use cfpq_matrix::{BoolMatrix, Limits, MatrixFamily};

mod support;

fn intersection_nnz(left: &MatrixFamily, right: &MatrixFamily) -> usize {
    let mut result = BoolMatrix::square(left.dim() * right.dim());
    for label in left.shared_labels(right) {
        if let (Some(l), Some(r)) = (left.get(label), right.get(label)) {
            result.or_assign(&l.kron(r));
        }
    }
    result.nnz()
}

#[test]
fn test_graph_matrices() {
    let graph = labeled_two_cycles_graph(2, 3, ("a", "b"));
    let family = Automaton::from_graph(&graph, None, None).boolean_matrices();
    assert_eq!(family.dim(), 6);
    assert_eq!(family.labels().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(family.get("a").map(BoolMatrix::nnz), Some(3));
    assert_eq!(family.get("b").map(BoolMatrix::nnz), Some(4));
}

#[test]
fn test_closure_of_graph_matrices() {
    let graph = labeled_two_cycles_graph(2, 3, ("a", "b"));
    let family = Automaton::from_graph(&graph, None, None).boolean_matrices();
    let mut a = family.get("a").cloned().unwrap();
    let mut b = family.get("b").cloned().unwrap();
    a.transitive_closure(&Limits::default()).unwrap();
    b.transitive_closure(&Limits::default()).unwrap();
    assert_eq!(a.nnz(), 9);
    assert_eq!(b.nnz(), 16);
}

#[test]
fn test_closure_of_regex_matrix() {
    let family = Automaton::from_regex("a*").unwrap().boolean_matrices();
    let mut a = family.get("a").cloned().unwrap();
    a.transitive_closure(&Limits::default()).unwrap();
    assert_eq!(a.nnz(), 1);
}

#[test]
fn test_intersection() {
    let query = Automaton::from_regex("a|b|c").unwrap().boolean_matrices();
    let graph = labeled_two_cycles_graph(2, 3, ("a", "b"));
    let graph = Automaton::from_graph(&graph, None, None).boolean_matrices();
    assert_eq!(intersection_nnz(&query, &graph), 7);

    let star = Automaton::from_regex("a*").unwrap().boolean_matrices();
    assert_eq!(intersection_nnz(&query, &star), 1);
}

#[test]
fn test_graph_automaton_keeps_vertices() {
    let graph = labeled_two_cycles_graph(2, 3, ("a", "b"));
    let start: BTreeSet<usize> = [0, 4, 99].into_iter().collect();
    let end: BTreeSet<usize> = [5].into_iter().collect();
    let nfa = Automaton::from_graph(&graph, Some(&start), Some(&end));
    assert_eq!(nfa.num_states(), 6);
    assert_eq!(nfa.start_states().iter().copied().collect::<Vec<_>>(), vec![0, 4]);
    assert_eq!(nfa.final_states().iter().copied().collect::<Vec<_>>(), vec![5]);
    assert_eq!(nfa.state_name(3), Some(3));
    assert_eq!(nfa.index_of(3), Some(3));
    assert_eq!(nfa.index_of(6), None);
    assert!(support::accepts_words(&nfa, "b"));
    assert!(support::accepts_words(&nfa, "b b b b b"));
    assert!(!support::accepts_words(&nfa, "a"));
}

#[test]
fn test_regex_dfa_is_deterministic() {
    let dfa = Automaton::from_regex("(a|ab)*b").unwrap();
    assert!(dfa.is_deterministic());
    assert!(support::accepts_words(&dfa, "b"));
    assert!(support::accepts_words(&dfa, "ab a ab b"));
    assert!(support::accepts_words(&dfa, "a a b"));
    assert!(!support::accepts_words(&dfa, "a a"));
    assert!(!support::accepts_words(&dfa, "a b b"));
}
