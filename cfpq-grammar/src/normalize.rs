//! Rewrites grammars into weak Chomsky normal form, where every rule is one of
//! `A ::= ()`, `A ::= t` or `A ::= B C`.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;

use crate::local_prelude::*;
use crate::occurence_map::OccurenceMap;

/// Represents a failure to normalize a grammar.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NormalizeError {
    /// The grammar has no start symbol.
    NoRoot,
    /// The start symbol derives no string. Callers treat this as an empty
    /// language, not as a failure.
    EmptyLanguage,
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NormalizeError::NoRoot => write!(f, "the grammar has no start symbol"),
            NormalizeError::EmptyLanguage => {
                write!(f, "the start symbol derives no string of terminals")
            }
        }
    }
}

impl std::error::Error for NormalizeError {}

impl Cfg {
    /// Replaces unit rules `A ::= B`, where `B` is a nonterminal, with copies of
    /// the non-unit rules of every `B` that `A` derives through unit rules alone.
    /// The language represented by the grammar doesn't change.
    pub fn eliminate_unit_rules(&mut self) {
        let unit_derivation = self.unit_derivation_matrix();
        let non_unit: Vec<CfgRule> = self
            .rules()
            .filter(|rule| !(rule.rhs.len() == 1 && !self.is_terminal(rule.rhs[0])))
            .cloned()
            .collect();
        let occurence_map = OccurenceMap::from_rules(non_unit.iter());
        let mut result = non_unit.clone();
        for lhs in self.lhs_symbols() {
            for derived in unit_derivation.iter_row_syms(lhs) {
                for &rule_id in occurence_map.get(derived).lhs() {
                    result.push(CfgRule {
                        lhs,
                        rhs: non_unit[rule_id].rhs.clone(),
                    });
                }
            }
        }
        self.clear_rules();
        for rule in result {
            self.add_rule(rule);
        }
        self.sort();
        self.dedup();
    }

    /// Gives every terminal that appears in a RHS of two or more symbols its own rule
    /// `T ::= t`, and replaces the terminal with `T` in such RHS'.
    pub fn isolate_terminals(&mut self) {
        let mut lifted: BTreeMap<Symbol, Symbol> = BTreeMap::new();
        let rules: Vec<CfgRule> = self.rules().cloned().collect();
        self.clear_rules();
        for rule in rules {
            if rule.rhs.len() < 2 || !rule.rhs.iter().any(|&sym| self.is_terminal(sym)) {
                self.add_rule(rule);
                continue;
            }
            let mut rhs = Vec::with_capacity(rule.rhs.len());
            for &sym in &rule.rhs[..] {
                if self.is_terminal(sym) {
                    let lifted_sym = match lifted.get(&sym) {
                        Some(&lifted_sym) => lifted_sym,
                        None => {
                            let lifted_sym = self.next_sym(None);
                            lifted.insert(sym, lifted_sym);
                            lifted_sym
                        }
                    };
                    rhs.push(lifted_sym);
                } else {
                    rhs.push(sym);
                }
            }
            self.add_rule(CfgRule::new(rule.lhs, rhs));
        }
        for (terminal, lifted_sym) in lifted {
            self.add_rule(CfgRule::new(lifted_sym, [terminal]));
        }
    }

    /// Splits every rule with more than two symbols on the RHS into a chain
    /// of binary rules with fresh nonterminals.
    pub fn binarize(&mut self) {
        let rules: Vec<CfgRule> = self.rules().cloned().collect();
        self.clear_rules();
        for rule in rules {
            if rule.rhs.len() <= 2 {
                self.add_rule(rule);
                continue;
            }
            // Rewrite to a set of binarized rules.
            // From `LHS ⸬= A B C … X Y Z` to:
            // ____________________
            // | LHS ⸬= S0  Z
            // | S0  ⸬= S1  Y
            // | S1  ⸬= S2  X
            // | …
            // | Sn  ⸬= A   B
            let mut rhs = rule.rhs.to_vec();
            let mut lhs = rule.lhs;
            while rhs.len() > 2 {
                let last = rhs.pop().expect("RHS has more than two symbols");
                let prefix = self.next_sym(None);
                self.add_rule(CfgRule::new(lhs, [prefix, last]));
                lhs = prefix;
            }
            self.add_rule(CfgRule::new(lhs, rhs));
        }
    }

    /// Checks whether every rule is `A ::= ()`, `A ::= t` or `A ::= B C`.
    pub fn is_weak_cnf(&self) -> bool {
        self.rules().all(|rule| match &rule.rhs[..] {
            [] => true,
            &[sym] => self.is_terminal(sym),
            &[left, right] => !self.is_terminal(left) && !self.is_terminal(right),
            _ => false,
        })
    }

    /// Rewrites the grammar into weak Chomsky normal form. The root and the language
    /// stay the same.
    ///
    /// The order of steps matters: unit rules are eliminated first, then useless
    /// rules are removed, then terminals are isolated and long rules are binarized.
    ///
    /// # Errors
    ///
    /// Fails with [`NormalizeError::EmptyLanguage`] if the root derives no string.
    pub fn into_weak_cnf(mut self) -> Result<Cfg, NormalizeError> {
        let root = self.root().ok_or(NormalizeError::NoRoot)?;
        let num_rules = self.rules().count();
        self.eliminate_unit_rules();
        {
            let mut usefulness = self.usefulness();
            if !usefulness.root_is_productive() {
                debug!("root {:?} is unproductive, the language is empty", root);
                return Err(NormalizeError::EmptyLanguage);
            }
            usefulness.remove_useless_rules();
        }
        self.isolate_terminals();
        self.binarize();
        self.sort();
        self.dedup();
        debug!(
            "normalized {} rules into {} rules in weak CNF",
            num_rules,
            self.rules().count()
        );
        Ok(self)
    }
}
