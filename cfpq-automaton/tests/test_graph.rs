use std::io::Cursor;

use cfpq_automaton::{labeled_two_cycles_graph, GraphInfo, GraphLoadError, LabeledGraph};
use test_case::test_case;

#[test]
fn test_load_edge_list() {
    let text = "# a comment\n0 1 a\n\n1  2   knows well\n2 0 a\n0 1 a\n";
    let graph = LabeledGraph::load_edge_list(Cursor::new(text)).unwrap();
    assert_eq!(
        graph.info(),
        GraphInfo {
            nodes: 3,
            edges: 3,
            labels: vec!["a".to_string(), "knows well".to_string()],
        }
    );
    assert!(graph.edges().any(|edge| edge == (1, "knows well", 2)));
}

#[test_case("x 1 a", 1 ; "bad source")]
#[test_case("0 1 a\n0 y a", 2 ; "bad target")]
#[test_case("# header\n0 1", 2 ; "missing label")]
fn test_load_edge_list_errors(text: &str, line: u32) {
    match LabeledGraph::load_edge_list(Cursor::new(text)) {
        Err(GraphLoadError::Parse { line: err_line, .. }) => assert_eq!(err_line, line),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_to_dot() {
    let mut graph = LabeledGraph::new(1);
    graph.add_edge(0, "say \"hi\"", 1);
    assert_eq!(
        graph.to_dot(),
        "digraph {\n    0;\n    1;\n    0 -> 1 [label=\"say \\\"hi\\\"\"];\n}\n"
    );
}

#[test_case(2, 1, 4, 3 + 2)]
#[test_case(2, 3, 6, 3 + 4)]
#[test_case(4, 4, 9, 5 + 5)]
fn test_two_cycles_shape(n: usize, m: usize, nodes: usize, edges: usize) {
    let info = labeled_two_cycles_graph(n, m, ("a", "b")).info();
    assert_eq!(info.nodes, nodes);
    assert_eq!(info.edges, edges);
    assert_eq!(info.labels, vec!["a", "b"]);
}

#[test]
fn test_add_edge_grows_graph() {
    let mut graph = LabeledGraph::default();
    assert_eq!(graph.add_node(), 0);
    graph.add_edge(3, "a", 1);
    assert_eq!(graph.num_nodes(), 4);
    assert_eq!(graph.nodes().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
}
