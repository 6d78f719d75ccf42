//! Maps symbols to the rules they occur in.

use std::collections::BTreeMap;

use crate::local_prelude::*;

type RuleIndex = usize;

/// For each symbol, the indices of rules that have it on the LHS and on the RHS.
pub struct OccurenceMap {
    occurences: BTreeMap<Symbol, Occurences>,
    empty_occurences: Occurences,
}

/// Two `Vec`s of rule indices.
#[derive(Clone, Debug, Default)]
pub struct Occurences {
    lhs: Vec<RuleIndex>,
    rhs: Vec<RuleIndex>,
}

impl OccurenceMap {
    /// Indexes the given rules by their position in the iterator.
    pub fn from_rules<'a>(rules: impl Iterator<Item = &'a CfgRule>) -> Self {
        let mut occurences = BTreeMap::new();
        for (i, rule) in rules.enumerate() {
            occurences
                .entry(rule.lhs)
                .or_insert_with(Occurences::default)
                .lhs
                .push(i);
            let mut rhs_syms = rule.rhs.to_vec();
            rhs_syms.sort();
            rhs_syms.dedup();
            for rhs_sym in rhs_syms {
                occurences
                    .entry(rhs_sym)
                    .or_insert_with(Occurences::default)
                    .rhs
                    .push(i);
            }
        }
        OccurenceMap {
            occurences,
            empty_occurences: Occurences::default(),
        }
    }

    /// Returns the occurences of a symbol, which may be empty.
    pub fn get(&self, sym: Symbol) -> &Occurences {
        self.occurences.get(&sym).unwrap_or(&self.empty_occurences)
    }
}

impl Occurences {
    /// Rules with the symbol on the LHS.
    pub fn lhs(&self) -> &[RuleIndex] {
        &self.lhs[..]
    }

    /// Rules with the symbol on the RHS, each listed once.
    pub fn rhs(&self) -> &[RuleIndex] {
        &self.rhs[..]
    }
}
