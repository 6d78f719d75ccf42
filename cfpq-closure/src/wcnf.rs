//! Rule indexes over a grammar in weak Chomsky normal form.

use std::collections::BTreeMap;

use cfpq_grammar::{Cfg, NormalizeError, Symbol};
use log::debug;

use crate::ClosureError;

/// The rules of a normalized grammar, grouped by shape.
pub(crate) struct WeakCnf {
    /// Heads of `A ::= ()`.
    pub(crate) nulling: Vec<Symbol>,
    /// Heads of `A ::= t`, keyed by the name of `t`.
    pub(crate) by_label: BTreeMap<String, Vec<Symbol>>,
    /// Rules `A ::= B C` as `(A, B, C)`, in rule order.
    pub(crate) binary: Vec<(Symbol, Symbol, Symbol)>,
    /// Heads of `A ::= B C`, keyed by `(B, C)`.
    by_body: BTreeMap<(Symbol, Symbol), Vec<Symbol>>,
}

impl WeakCnf {
    /// Normalizes the grammar and indexes its rules. Returns `None` if the language
    /// is empty.
    pub(crate) fn new(grammar: &Cfg) -> Result<Option<Self>, ClosureError> {
        let normalized = match grammar.clone().into_weak_cnf() {
            Ok(normalized) => normalized,
            Err(NormalizeError::EmptyLanguage) => return Ok(None),
            Err(NormalizeError::NoRoot) => return Err(ClosureError::NoRoot),
        };
        let mut wcnf = WeakCnf {
            nulling: vec![],
            by_label: BTreeMap::new(),
            binary: vec![],
            by_body: BTreeMap::new(),
        };
        for rule in normalized.rules() {
            match rule.rhs[..] {
                [] => wcnf.nulling.push(rule.lhs),
                [terminal] => wcnf
                    .by_label
                    .entry(normalized.name_of(terminal).into_owned())
                    .or_default()
                    .push(rule.lhs),
                [left, right] => {
                    wcnf.binary.push((rule.lhs, left, right));
                    wcnf.by_body
                        .entry((left, right))
                        .or_default()
                        .push(rule.lhs);
                }
                _ => unreachable!("rule longer than two symbols in weak CNF"),
            }
        }
        debug!(
            "indexed {} nulling, {} terminal and {} binary rules",
            wcnf.nulling.len(),
            wcnf.by_label.values().map(Vec::len).sum::<usize>(),
            wcnf.binary.len()
        );
        Ok(Some(wcnf))
    }

    /// Returns the heads of terminal rules whose terminal is named `label`.
    pub(crate) fn heads_of_label(&self, label: &str) -> &[Symbol] {
        self.by_label.get(label).map_or(&[], Vec::as_slice)
    }

    /// Returns every `A` with `A ::= left right`.
    pub(crate) fn heads_of_body(&self, left: Symbol, right: Symbol) -> &[Symbol] {
        self.by_body
            .get(&(left, right))
            .map_or(&[], Vec::as_slice)
    }
}
