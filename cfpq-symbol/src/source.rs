//! Source

use std::borrow::Cow;
use std::sync::Arc;

use crate::Symbol;

/// The name of a symbol. Cheap to clone.
pub type SymbolName = Arc<str>;

/// A source of numeric symbols, which optionally records their names.
#[allow(missing_copy_implementations)]
#[derive(Clone, Debug, Default)]
pub struct SymbolSource {
    names: Vec<Option<SymbolName>>,
}

impl SymbolSource {
    /// Creates a source of numeric symbols with an empty symbol space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns generated symbols.
    pub fn sym<const N: usize>(&mut self) -> [Symbol; N] {
        let mut result = [Symbol::default(); N];
        for dest in &mut result {
            *dest = self.next_sym(None);
        }
        result
    }

    /// Returns generated symbols with the given names.
    pub fn with_names<const N: usize>(&mut self, names: [Option<&str>; N]) -> [Symbol; N] {
        let mut result = [Symbol::default(); N];
        for (dest, name) in result.iter_mut().zip(names) {
            *dest = self.next_sym(name.map(Cow::Borrowed));
        }
        result
    }

    /// Generates a new unique symbol.
    ///
    /// If a name is given, it will be recorded.
    pub fn next_sym(&mut self, name: Option<Cow<str>>) -> Symbol {
        let ret = Symbol::from(self.names.len());
        self.names.push(name.map(|name| name.as_ref().into()));
        ret
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.names.len()
    }

    /// Returns the name of the symbol. Unnamed symbols are printed as
    /// `g` followed by their ID.
    pub fn name_of(&self, sym: Symbol) -> Cow<'_, str> {
        match self.names.get(sym.usize()) {
            Some(Some(name)) => Cow::Borrowed(&name[..]),
            _ => Cow::Owned(format!("g{}", sym.usize())),
        }
    }

    /// Returns the name of the symbol, if it has one.
    pub fn get_name(&self, sym: Symbol) -> Option<&SymbolName> {
        self.names.get(sym.usize()).and_then(|name| name.as_ref())
    }

    /// Looks up the first symbol that has the given name.
    pub fn find_name(&self, name: &str) -> Option<Symbol> {
        self.names
            .iter()
            .position(|maybe_name| maybe_name.as_deref() == Some(name))
            .map(Symbol::from)
    }

    /// Returns a copy of the list of names, indexed by symbol ID.
    pub fn names(&self) -> Vec<Option<SymbolName>> {
        self.names.clone()
    }

    /// Returns an iterator over fresh symbols, starting at the first ID,
    /// without recording them.
    pub fn generate_fresh() -> impl Iterator<Item = Symbol> {
        (0..).map(|id: u32| Symbol::from(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let mut source = SymbolSource::new();
        let [start, gensym] = source.with_names([Some("S"), None]);
        assert_eq!(source.num_syms(), 2);
        assert_eq!(source.name_of(start), "S");
        assert_eq!(source.name_of(gensym), "g1");
        assert_eq!(source.find_name("S"), Some(start));
        assert_eq!(source.find_name("T"), None);
        assert!(source.get_name(gensym).is_none());
    }
}
