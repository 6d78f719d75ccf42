mod support;

use cfpq::automaton::RegexError;
use cfpq::{labeled_two_cycles_graph, multi_source_rpq, multi_source_rpq_with_limits};
use cfpq::{single_source_rpq, single_source_rpq_with_limits};
use cfpq::{Error, LabeledGraph, Limits, MsRpqAnswer, Resource, Separation};

use support::{init_logging, set};

#[test]
fn test_single_source_alternation() {
    init_logging();
    let graph = labeled_two_cycles_graph(2, 3, ("a", "b"));
    let (start, end) = (set(&[0]), set(&[1, 2, 3]));
    let answer = single_source_rpq(&graph, "a|bb", Some(&start), Some(&end)).unwrap();
    assert_eq!(answer, vec![(0, 1)]);
}

#[test]
fn test_multi_source_merged_stars() {
    let graph = labeled_two_cycles_graph(4, 4, ("0", "1"));
    let answer = multi_source_rpq(&graph, "0*1*", None, None, Separation::Merged).unwrap();
    assert_eq!(answer, MsRpqAnswer::Merged((0..9).collect()));
}

#[test]
fn test_multi_source_per_source() {
    let graph = labeled_two_cycles_graph(2, 3, ("a", "b"));
    let (start, end) = (set(&[0]), set(&[1, 2, 3]));
    let answer =
        multi_source_rpq(&graph, "a|bb", Some(&start), Some(&end), Separation::PerSource).unwrap();
    assert_eq!(answer, MsRpqAnswer::PerSource(set(&[(0, 1)])));
}

#[test]
fn test_multi_character_labels() {
    let mut graph = LabeledGraph::new(3);
    graph.add_edge(0, "td", 1);
    graph.add_edge(1, "subClassOf", 2);
    let answer = single_source_rpq(&graph, "td", None, None).unwrap();
    assert_eq!(answer, vec![(0, 1)]);
    let answer = multi_source_rpq(&graph, "subClassOf", None, None, Separation::Merged).unwrap();
    assert_eq!(answer, MsRpqAnswer::Merged(set(&[2])));
    let answer = single_source_rpq(&graph, "td subClassOf*", None, None).unwrap();
    assert_eq!(answer, vec![(0, 1), (0, 2)]);
    assert!(single_source_rpq(&graph, "t d", None, None)
        .unwrap()
        .is_empty());
}

#[test]
fn test_evaluators_agree_on_targets() {
    let graph = labeled_two_cycles_graph(3, 2, ("a", "b"));
    let start = set(&[0, 1]);
    for pattern in ["a*b", "(a b)*", "b{2}a?", "a|b"] {
        let pairs = single_source_rpq(&graph, pattern, Some(&start), None).unwrap();
        let answer =
            multi_source_rpq(&graph, pattern, Some(&start), None, Separation::PerSource).unwrap();
        assert_eq!(answer, MsRpqAnswer::PerSource(pairs.iter().copied().collect()));
    }
}

#[test]
fn test_regex_errors() {
    let graph = labeled_two_cycles_graph(1, 1, ("a", "b"));
    assert!(matches!(
        single_source_rpq(&graph, "(a", None, None),
        Err(Error::Regex(RegexError::Syntax(_)))
    ));
    assert!(matches!(
        multi_source_rpq(&graph, "a$", None, None, Separation::Merged),
        Err(Error::Regex(RegexError::Unsupported(_)))
    ));
}

#[test]
fn test_limits() {
    let graph = labeled_two_cycles_graph(2, 3, ("a", "b"));
    let limits = Limits::new().max_iterations(1);
    let error = single_source_rpq_with_limits(&graph, "a|b b", None, None, &limits).unwrap_err();
    assert_eq!(error.resource_exhausted(), Some((Resource::Iterations, 1)));
    let limits = Limits::new().max_nonzeros(1);
    let error =
        multi_source_rpq_with_limits(&graph, "a*", None, None, Separation::PerSource, &limits)
            .unwrap_err();
    assert_eq!(error.resource_exhausted(), Some((Resource::Nonzeros, 1)));
}
