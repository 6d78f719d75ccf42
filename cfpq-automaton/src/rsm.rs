//! Recursive state machines: one automaton, called a box, per nonterminal.

use std::collections::{BTreeMap, BTreeSet};

use cfpq_grammar::{Cfg, LoadError};
use cfpq_matrix::MatrixFamily;

use crate::automaton::{Automaton, StateId};

/// A grammar with a single regular body per nonterminal. Here, the body of a
/// nonterminal is the finite union of its rules' right-hand sides, with symbols
/// given by name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Ecfg {
    start: String,
    nonterminals: BTreeSet<String>,
    terminals: BTreeSet<String>,
    productions: BTreeMap<String, BTreeSet<Vec<String>>>,
}

/// A recursive state machine, with one deterministic box per nonterminal.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Rsm {
    start: String,
    boxes: BTreeMap<String, Automaton>,
    matrices: BTreeMap<String, MatrixFamily>,
}

impl Ecfg {
    /// Groups the grammar's rules by their LHS. The start symbol is the grammar's
    /// root, or `S` if there is none.
    pub fn from_cfg(cfg: &Cfg) -> Self {
        let start = cfg
            .root()
            .map_or_else(|| "S".to_string(), |root| cfg.name_of(root).into_owned());
        let mut ecfg = Ecfg {
            start: start.clone(),
            ..Ecfg::default()
        };
        ecfg.nonterminals.insert(start);
        for rule in cfg.rules() {
            let head = cfg.name_of(rule.lhs).into_owned();
            ecfg.nonterminals.insert(head.clone());
            let mut body = Vec::with_capacity(rule.rhs.len());
            for &sym in &rule.rhs[..] {
                let name = cfg.name_of(sym).into_owned();
                if cfg.is_terminal(sym) {
                    ecfg.terminals.insert(name.clone());
                } else {
                    ecfg.nonterminals.insert(name.clone());
                }
                body.push(name);
            }
            ecfg.productions.entry(head).or_default().insert(body);
        }
        ecfg
    }

    /// Loads the grammar from text and groups its rules.
    pub fn load(text: &str, start: &str) -> Result<Self, LoadError> {
        Cfg::load(text, start).map(|cfg| Ecfg::from_cfg(&cfg))
    }

    /// Returns the name of the start symbol.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Returns the names of nonterminals, including the start symbol.
    pub fn nonterminals(&self) -> &BTreeSet<String> {
        &self.nonterminals
    }

    /// Returns the names of terminals.
    pub fn terminals(&self) -> &BTreeSet<String> {
        &self.terminals
    }

    /// Returns the bodies of every nonterminal that has rules.
    pub fn productions(&self) -> &BTreeMap<String, BTreeSet<Vec<String>>> {
        &self.productions
    }
}

/// Builds a prefix tree of the bodies. It is deterministic with the root as state `0`.
fn prefix_tree(bodies: &BTreeSet<Vec<String>>) -> Automaton {
    let mut dfa = Automaton::new();
    let root = dfa.add_state();
    dfa.add_start(root);
    let mut children: BTreeMap<(StateId, &str), StateId> = BTreeMap::new();
    for body in bodies {
        let mut current = root;
        for label in body {
            current = match children.get(&(current, label.as_str())) {
                Some(&next) => next,
                None => {
                    let next = dfa.add_state();
                    dfa.add_transition(current, label, next);
                    children.insert((current, label.as_str()), next);
                    next
                }
            };
        }
        dfa.add_final(current);
    }
    dfa
}

impl Rsm {
    /// Builds a box for every nonterminal with rules.
    pub fn from_ecfg(ecfg: &Ecfg) -> Self {
        let mut rsm = Rsm {
            start: ecfg.start.clone(),
            ..Rsm::default()
        };
        for (head, bodies) in &ecfg.productions {
            let dfa = prefix_tree(bodies);
            rsm.matrices.insert(head.clone(), dfa.boolean_matrices());
            rsm.boxes.insert(head.clone(), dfa);
        }
        rsm
    }

    /// Returns an equivalent machine whose boxes are minimal.
    pub fn minimize(&self) -> Self {
        let mut rsm = Rsm {
            start: self.start.clone(),
            ..Rsm::default()
        };
        for (head, dfa) in &self.boxes {
            let dfa = dfa.minimize();
            rsm.matrices.insert(head.clone(), dfa.boolean_matrices());
            rsm.boxes.insert(head.clone(), dfa);
        }
        rsm
    }

    /// Returns the name of the start symbol.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Returns the box of a nonterminal.
    pub fn get(&self, head: &str) -> Option<&Automaton> {
        self.boxes.get(head)
    }

    /// Returns the boolean matrices of a nonterminal's box.
    pub fn matrices(&self, head: &str) -> Option<&MatrixFamily> {
        self.matrices.get(head)
    }

    /// Iterates over nonterminals and their boxes.
    pub fn boxes(&self) -> impl Iterator<Item = (&str, &Automaton)> + '_ {
        self.boxes.iter().map(|(head, dfa)| (head.as_str(), dfa))
    }

    /// Checks whether a nonterminal has a rule with the given body.
    pub fn accepts<'a>(&self, head: &str, body: impl IntoIterator<Item = &'a str>) -> bool {
        self.boxes.get(head).map_or(false, |dfa| dfa.accepts(body))
    }
}
