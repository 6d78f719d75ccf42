use cfpq_matrix::{BoolMatrix, Limits, MatrixFamily, Resource};
use test_case::test_case;

#[test]
fn test_family_collapses_duplicates() {
    let mut family = MatrixFamily::new(3);
    assert!(family.set("a", 0, 1));
    assert!(!family.set("a", 0, 1));
    assert!(family.set("b", 1, 2));
    assert_eq!(family.len(), 2);
    assert_eq!(family.get("a").map(BoolMatrix::nnz), Some(1));
    assert!(family.get("c").is_none());
    assert_eq!(family.labels().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn test_shared_labels() {
    let mut left = MatrixFamily::new(2);
    left.set("a", 0, 1);
    left.set("b", 0, 1);
    let mut right = MatrixFamily::new(4);
    right.set("b", 0, 1);
    right.set("c", 0, 1);
    assert_eq!(left.shared_labels(&right).collect::<Vec<_>>(), vec!["b"]);
}

#[test]
fn test_union() {
    let mut family = MatrixFamily::new(3);
    family.set("a", 0, 1);
    family.set("b", 0, 1);
    family.set("b", 1, 2);
    let union = family.union();
    assert_eq!(union.iter().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
}

// The closure of a cycle of length `n` is full.
#[test_case(1)]
#[test_case(5)]
#[test_case(33)]
fn test_closure_of_cycle(n: usize) {
    let mut m = BoolMatrix::from_entries(n, n, (0..n).map(|i| (i, (i + 1) % n)));
    m.transitive_closure(&Limits::default()).unwrap();
    assert_eq!(m.nnz(), n * n);
}

#[test]
fn test_kron_of_identities() {
    let k = BoolMatrix::identity(3).kron(&BoolMatrix::identity(4));
    assert_eq!(k, BoolMatrix::identity(12));
}

#[test]
fn test_limit_exceeded() {
    let limits = Limits::new().max_triples(10);
    let error = limits.check_triples(11).unwrap_err();
    assert_eq!(error.what, Resource::Triples);
    assert_eq!(error.to_string(), "resource exhausted: more than 10 triples");
    assert!(limits.check_triples(10).is_ok());
    assert!(limits.check_iterations(usize::MAX).is_ok());
}
