//! Analysis of rule usefulness.

use crate::local_prelude::*;

/// Contains the information about usefulness of the grammar's rules.
/// Useful rules are both reachable from the root and productive.
pub struct Usefulness<'a> {
    grammar: &'a mut Cfg,
    reachable_syms: SymbolBitSet,
    productivity: SymbolBitSet,
}

/// A reference to a rule, together with the reason for its uselessness.
#[derive(Copy, Clone, Debug)]
pub struct UsefulnessForRule<'r> {
    rule: &'r CfgRule,
    usefulness: RuleUsefulness,
}

/// Whether a rule is reachable and productive.
#[derive(Copy, Clone, Debug)]
pub struct RuleUsefulness {
    /// Indicates whether the rule is reachable.
    pub reachable: bool,
    /// Indicates whether the rule is productive.
    pub productive: bool,
}

impl<'r> UsefulnessForRule<'r> {
    /// The analyzed rule.
    pub fn rule(&self) -> &'r CfgRule {
        self.rule
    }

    /// The reason for the rule's usefulness or uselessness.
    pub fn usefulness(&self) -> RuleUsefulness {
        self.usefulness
    }
}

impl RuleUsefulness {
    /// Checks whether the rule is unreachable or unproductive.
    pub fn is_useless(&self) -> bool {
        !self.reachable || !self.productive
    }
}

/// Returns the set of productive symbols.
fn productive_syms(grammar: &Cfg) -> SymbolBitSet {
    let mut productive_syms = SymbolBitSet::new();
    productive_syms.reset(grammar.sym_source());
    productive_syms.terminal(grammar);
    productive_syms.nulling(grammar);
    grammar.rhs_closure_for_all(&mut productive_syms);
    productive_syms
}

/// Returns the set of symbols reachable from the root through productive rules.
fn reachable_syms(grammar: &Cfg, productivity: &SymbolBitSet) -> SymbolBitSet {
    let mut reachable = SymbolBitSet::new();
    reachable.reset(grammar.sym_source());
    let root = match grammar.root() {
        Some(root) if productivity[root] => root,
        _ => return reachable,
    };
    let mut productive_part = Cfg::with_sym_source(grammar.sym_source().clone());
    for rule in grammar.rules() {
        if productivity[rule.lhs] && rule.rhs.iter().all(|&sym| productivity[sym]) {
            productive_part.add_rule(rule.clone());
        }
    }
    let reachability = productive_part.reachability_matrix();
    for sym in reachability.iter_row_syms(root) {
        reachable.set(sym, true);
    }
    reachable
}

impl Cfg {
    /// Analyzes usefulness of the grammar's rules.
    pub fn usefulness(&mut self) -> Usefulness<'_> {
        Usefulness::new(self)
    }
}

impl<'a> Usefulness<'a> {
    /// Analyzes usefulness of the grammar's rules. In particular, it checks for reachable
    /// and productive symbols. A rule is reachable if its LHS can be reached from the root
    /// while only going through productive rules.
    pub fn new(grammar: &'a mut Cfg) -> Self {
        let productivity = productive_syms(grammar);
        let reachable_syms = reachable_syms(grammar, &productivity);

        Usefulness {
            grammar,
            productivity,
            reachable_syms,
        }
    }

    /// Checks whether the root derives at least one string of terminals.
    pub fn root_is_productive(&self) -> bool {
        self.grammar
            .root()
            .map_or(false, |root| self.productivity[root])
    }

    /// Checks whether all rules in the grammar are useful.
    pub fn all_useful(&self) -> bool {
        self.useless_rules().next().is_none()
    }

    /// Analyzes a single rule.
    pub fn rule_usefulness<'r>(&self, rule: &'r CfgRule) -> UsefulnessForRule<'r> {
        let productive =
            self.productivity[rule.lhs] && rule.rhs.iter().all(|&sym| self.productivity[sym]);
        let reachable = self.reachable_syms[rule.lhs];
        UsefulnessForRule {
            rule,
            usefulness: RuleUsefulness {
                productive,
                reachable,
            },
        }
    }

    /// Returns an iterator over the grammar's useless rules.
    pub fn useless_rules(&self) -> impl Iterator<Item = UsefulnessForRule<'_>> + '_ {
        self.grammar
            .rules()
            .map(move |rule| self.rule_usefulness(rule))
            .filter(|rule_usefulness| rule_usefulness.usefulness().is_useless())
    }

    /// Removes useless rules. The language represented by the grammar doesn't change.
    pub fn remove_useless_rules(&mut self) {
        let productivity = &self.productivity;
        let reachable_syms = &self.reachable_syms;
        let num_rules = self.grammar.rules().count();
        self.grammar.retain(|rule| {
            let productive =
                productivity[rule.lhs] && rule.rhs.iter().all(|&sym| productivity[sym]);
            productive && reachable_syms[rule.lhs]
        });
        log::trace!(
            "removed {} useless rules",
            num_rules - self.grammar.rules().count()
        );
    }
}
