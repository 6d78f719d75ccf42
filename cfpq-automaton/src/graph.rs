//! Directed graphs with labeled edges.

use std::collections::BTreeSet;
use std::fmt::{self, Write};
use std::io::{self, BufRead};
use std::iter;

use log::debug;

use crate::automaton::Automaton;

/// A directed graph on vertices `0..n`. Parallel edges are allowed when their labels differ.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabeledGraph {
    num_nodes: usize,
    edges: BTreeSet<(usize, String, usize)>,
}

/// Summary of a graph.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GraphInfo {
    /// Number of vertices.
    pub nodes: usize,
    /// Number of edges.
    pub edges: usize,
    /// Distinct labels, sorted.
    pub labels: Vec<String>,
}

/// Represents an error when reading an edge list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GraphLoadError {
    /// The reader failed.
    Io {
        /// The kind of the I/O error.
        kind: io::ErrorKind,
        /// Human-readable reason for the error.
        reason: String,
    },
    /// A line is not of the form `u v label`.
    Parse {
        /// Human-readable reason for the error.
        reason: String,
        /// One-indexed line of the error.
        line: u32,
    },
}

impl fmt::Display for GraphLoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GraphLoadError::Io { reason, .. } => write!(f, "Failed to read edge list: {}", reason),
            GraphLoadError::Parse { reason, line } => {
                write!(f, "Parse error at line {}: reason: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for GraphLoadError {}

impl LabeledGraph {
    /// Creates a graph with `num_nodes` vertices and no edges.
    pub fn new(num_nodes: usize) -> Self {
        LabeledGraph {
            num_nodes,
            edges: BTreeSet::new(),
        }
    }

    /// Adds a vertex and returns it.
    pub fn add_node(&mut self) -> usize {
        self.num_nodes += 1;
        self.num_nodes - 1
    }

    /// Adds an edge. Missing endpoints are added as vertices.
    pub fn add_edge(&mut self, from: usize, label: &str, to: usize) {
        self.num_nodes = self.num_nodes.max(from + 1).max(to + 1);
        self.edges.insert((from, label.to_string(), to));
    }

    /// Returns the number of vertices.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over vertices.
    pub fn nodes(&self) -> std::ops::Range<usize> {
        0..self.num_nodes
    }

    /// Iterates over edges, ordered by source, label and target.
    pub fn edges(&self) -> impl Iterator<Item = (usize, &str, usize)> + '_ {
        self.edges
            .iter()
            .map(|(from, label, to)| (*from, label.as_str(), *to))
    }

    /// Returns distinct labels, sorted.
    pub fn labels(&self) -> BTreeSet<&str> {
        self.edges().map(|(_, label, _)| label).collect()
    }

    /// Summarizes the graph.
    pub fn info(&self) -> GraphInfo {
        GraphInfo {
            nodes: self.num_nodes,
            edges: self.num_edges(),
            labels: self.labels().into_iter().map(String::from).collect(),
        }
    }

    /// Reads a graph from an edge list with one `u v label` line per edge. Blank lines
    /// and lines starting with `#` are skipped. The label is the rest of the line.
    pub fn load_edge_list(reader: impl BufRead) -> Result<LabeledGraph, GraphLoadError> {
        let mut graph = LabeledGraph::new(0);
        for (line_idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|error| GraphLoadError::Io {
                kind: error.kind(),
                reason: error.to_string(),
            })?;
            let line_no = line_idx as u32 + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parse_error = |reason: &str| GraphLoadError::Parse {
                reason: reason.to_string(),
                line: line_no,
            };
            let (from, rest) = split_field(line);
            let (to, rest) = split_field(rest);
            let from = from
                .parse::<usize>()
                .map_err(|_| parse_error("expected a source vertex"))?;
            let to = to
                .parse::<usize>()
                .map_err(|_| parse_error("expected a target vertex"))?;
            let label = rest.trim();
            if label.is_empty() {
                return Err(parse_error("expected a label"));
            }
            graph.add_edge(from, label, to);
        }
        debug!(
            "loaded a graph with {} nodes and {} edges",
            graph.num_nodes(),
            graph.num_edges()
        );
        Ok(graph)
    }

    /// Prints the graph in the DOT language.
    pub fn to_dot(&self) -> String {
        let mut result = String::from("digraph {\n");
        for node in self.nodes() {
            writeln!(result, "    {};", node).expect("writing to String failed");
        }
        for (from, label, to) in self.edges() {
            let label = label.replace('\\', "\\\\").replace('"', "\\\"");
            writeln!(result, "    {} -> {} [label=\"{}\"];", from, to, label)
                .expect("writing to String failed");
        }
        result.push_str("}\n");
        result
    }
}

/// Splits off the first whitespace-separated field.
fn split_field(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    text.split_at(end)
}

/// Builds two cycles that share vertex `0`. The first cycle `0 → 1 → … → n → 0`
/// is labeled `labels.0`, the second cycle `0 → n+1 → … → n+m → 0` is labeled
/// `labels.1`.
pub fn labeled_two_cycles_graph(n: usize, m: usize, labels: (&str, &str)) -> LabeledGraph {
    let mut graph = LabeledGraph::new(n + m + 1);
    let mut add_cycle = |nodes: Vec<usize>, label: &str| {
        for (i, &from) in nodes.iter().enumerate() {
            let to = nodes[(i + 1) % nodes.len()];
            graph.add_edge(from, label, to);
        }
    };
    add_cycle(iter::once(0).chain(1..=n).collect(), labels.0);
    add_cycle(iter::once(0).chain(n + 1..=n + m).collect(), labels.1);
    graph
}

impl Automaton {
    /// Builds a nondeterministic automaton whose states are the graph's vertices, in order,
    /// and whose transitions are its edges. Start and final states default to all
    /// vertices. Vertices that are not in the graph are ignored.
    pub fn from_graph(
        graph: &LabeledGraph,
        start: Option<&BTreeSet<usize>>,
        end: Option<&BTreeSet<usize>>,
    ) -> Automaton {
        let mut nfa = Automaton::new();
        for node in graph.nodes() {
            nfa.add_named_state(node);
        }
        for (from, label, to) in graph.edges() {
            nfa.add_transition(from, label, to);
        }
        for node in graph.nodes() {
            if start.map_or(true, |start| start.contains(&node)) {
                nfa.add_start(node);
            }
            if end.map_or(true, |end| end.contains(&node)) {
                nfa.add_final(node);
            }
        }
        nfa
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_cycles() {
        let graph = labeled_two_cycles_graph(2, 3, ("a", "b"));
        assert_eq!(graph.num_nodes(), 6);
        let a_edges: Vec<_> = graph
            .edges()
            .filter(|&(_, label, _)| label == "a")
            .map(|(from, _, to)| (from, to))
            .collect();
        assert_eq!(a_edges, vec![(0, 1), (1, 2), (2, 0)]);
        let b_edges: Vec<_> = graph
            .edges()
            .filter(|&(_, label, _)| label == "b")
            .map(|(from, _, to)| (from, to))
            .collect();
        assert_eq!(b_edges, vec![(0, 3), (3, 4), (4, 5), (5, 0)]);
    }

    #[test]
    fn test_two_cycles_with_empty_cycle() {
        let graph = labeled_two_cycles_graph(0, 1, ("a", "b"));
        assert_eq!(graph.num_nodes(), 2);
        // A cycle of length one is a self-loop on vertex 0.
        assert!(graph.edges().any(|edge| edge == (0, "a", 0)));
    }
}
