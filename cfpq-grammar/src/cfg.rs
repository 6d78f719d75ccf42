//! Definitions of the context-free grammar type and its rules.

use std::borrow::Cow;
use std::fmt::Write;
use std::sync::Arc;

use crate::local_prelude::*;
use crate::occurence_map::OccurenceMap;
use crate::rule_builder::RuleBuilder;

/// Context-free grammar type.
///
/// A context-free grammar can be though of as a regular expression
/// equipped with recursion. Here, its terminals are edge labels
/// of a graph, named by the symbol source.
#[derive(Clone, Debug, Default)]
pub struct Cfg {
    /// The symbol source.
    sym_source: SymbolSource,
    /// The set of terminals.
    terminals: SymbolBitSet,
    /// The array of rules.
    rules: Vec<CfgRule>,
    /// The start symbol.
    root: Option<Symbol>,
}

/// Standard grammar rule representation.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CfgRule {
    /// The rule's left-hand side symbol.
    pub lhs: Symbol,
    /// The rule's right-hand side symbols.
    pub rhs: Arc<[Symbol]>,
}

impl Cfg {
    /// Creates an empty context-free grammar.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty context-free grammar with the given symbol source.
    ///
    /// Symbols will be generated with this symbol source.
    pub fn with_sym_source(sym_source: SymbolSource) -> Self {
        Cfg {
            sym_source,
            ..Cfg::default()
        }
    }

    /// Returns generated nonterminal symbols.
    pub fn sym<const N: usize>(&mut self) -> [Symbol; N] {
        self.sym_source_mut().sym()
    }

    /// Generates a new unique nonterminal symbol.
    ///
    /// If a name is given, it will be recorded within the symbol
    /// source.
    pub fn next_sym(&mut self, name: Option<Cow<str>>) -> Symbol {
        self.sym_source_mut().next_sym(name)
    }

    /// Generates a new unique terminal symbol. Its name is the edge label
    /// it matches.
    pub fn terminal(&mut self, label: &str) -> Symbol {
        let result = self.sym_source_mut().next_sym(Some(label.into()));
        self.terminals.set(result, true);
        result
    }

    /// Returns generated terminal symbols with the given labels.
    pub fn terminals<const N: usize>(&mut self, labels: [&str; N]) -> [Symbol; N] {
        labels.map(|label| self.terminal(label))
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.sym_source().num_syms()
    }

    /// Assigns the start symbol.
    pub fn set_root(&mut self, root: Symbol) {
        self.root = Some(root);
    }

    /// Returns the start symbol, if one was assigned.
    pub fn root(&self) -> Option<Symbol> {
        self.root
    }

    /// Checks whether the symbol is a terminal.
    pub fn is_terminal(&self, sym: Symbol) -> bool {
        self.terminals[sym]
    }

    /// Returns the set of terminals.
    pub fn terminal_set(&self) -> &SymbolBitSet {
        &self.terminals
    }

    /// Returns the edge label of a terminal, or the name of a nonterminal.
    pub fn name_of(&self, sym: Symbol) -> Cow<'_, str> {
        self.sym_source.name_of(sym)
    }

    /// Looks up a nonterminal by name.
    pub fn nonterminal_by_name(&self, name: &str) -> Option<Symbol> {
        (0..self.num_syms()).map(Symbol::from).find(|&sym| {
            !self.is_terminal(sym) && self.sym_source.get_name(sym).map(|n| &n[..]) == Some(name)
        })
    }

    /// Sorts the rule array.
    pub fn sort(&mut self) {
        self.rules.sort();
    }

    /// Removes consecutive duplicate rules.
    pub fn dedup(&mut self) {
        self.rules.dedup();
    }

    /// Returns an iterator over the list of grammar rules.
    pub fn rules(&self) -> impl Iterator<Item = &CfgRule> + '_ {
        self.rules.iter()
    }

    /// Returns the nonterminals that are the LHS of at least one rule, in order.
    pub fn lhs_symbols(&self) -> Vec<Symbol> {
        let mut result: Vec<Symbol> = self.rules().map(|rule| rule.lhs).collect();
        result.sort();
        result.dedup();
        result
    }

    /// Allows access to the symbol source through a reference.
    pub fn sym_source(&self) -> &SymbolSource {
        &self.sym_source
    }

    /// Allows mutable access to the symbol source through a reference.
    pub fn sym_source_mut(&mut self) -> &mut SymbolSource {
        &mut self.sym_source
    }

    /// Retains only the rules specified by the predicate.
    ///
    /// In other words, removes all the rules for which `f(&rule)`
    /// returns false.
    pub fn retain(&mut self, f: impl FnMut(&CfgRule) -> bool) {
        self.rules.retain(f);
    }

    /// Adds a rule to this grammar.
    pub fn add_rule(&mut self, rule: CfgRule) {
        self.rules.push(rule);
    }

    /// Empties the grammar.
    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    /// Checks whether the grammar has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Starts building a new rule.
    pub fn rule(&mut self, lhs: Symbol) -> RuleBuilder<'_> {
        RuleBuilder::new(self).rule(lhs)
    }

    /// If **all** symbols on the RHS have the property, the LHS has it too.
    /// Updates the given symbol set according to the above, and does it
    /// transitively.
    pub fn rhs_closure_for_all(&self, property: &mut SymbolBitSet) {
        let mut work_stack: Vec<Symbol> = property.iter().collect();

        let occurence_map = OccurenceMap::from_rules(self.rules());

        while let Some(work_sym) = work_stack.pop() {
            for &rule_id in occurence_map.get(work_sym).rhs() {
                let rule = &self.rules[rule_id];
                if !property[rule.lhs] && rule.rhs.iter().all(|&sym| property[sym]) {
                    property.set(rule.lhs, true);
                    work_stack.push(rule.lhs);
                }
            }
        }
    }

    /// Formats the grammar to a `String`. The output looks like this:
    ///
    /// ```ignore
    /// S(0) ::= A(1) B(2) C(3);
    /// A(1) ::= g4(4) B(2);
    /// ```
    pub fn stringify_to_bnf(&self) -> String {
        let mut result = String::new();
        for rule in self.rules() {
            let stringify_sym = |sym: Symbol| format!("{}({})", self.name_of(sym), sym.usize());
            let lhs = stringify_sym(rule.lhs);
            let rhs = if rule.rhs.is_empty() {
                "()".into()
            } else {
                rule.rhs
                    .iter()
                    .copied()
                    .map(stringify_sym)
                    .collect::<Vec<_>>()
                    .join(" ")
            };
            writeln!(&mut result, "{} ::= {};", lhs, rhs).expect("writing to String failed");
        }
        result
    }
}

impl CfgRule {
    /// Creates a new rule.
    pub fn new(lhs: Symbol, rhs: impl AsRef<[Symbol]>) -> Self {
        CfgRule {
            lhs,
            rhs: rhs.as_ref().into(),
        }
    }

    /// Checks whether the rule has the form `A ::= ()`.
    pub fn is_nulling(&self) -> bool {
        self.rhs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rhs_closure_for_all() {
        let mut cfg = Cfg::new();
        let [start, a, b] = cfg.sym();
        let [x] = cfg.terminals(["x"]);
        cfg.rule(start).rhs([a, b]).rule(a).rhs([x]).rule(b).rhs([b, x]);

        let mut productive = SymbolBitSet::new();
        productive.terminal(&cfg);
        productive.nulling(&cfg);
        cfg.rhs_closure_for_all(&mut productive);

        assert!(productive[a]);
        assert!(!productive[b]);
        assert!(!productive[start]);
    }

    #[test]
    fn test_nonterminal_by_name() {
        let mut cfg = Cfg::new();
        let start = cfg.next_sym(Some("S".into()));
        let terminal = cfg.terminal("S");
        assert_eq!(cfg.nonterminal_by_name("S"), Some(start));
        assert!(cfg.is_terminal(terminal));
        assert_eq!(cfg.lhs_symbols(), vec![]);
    }
}
