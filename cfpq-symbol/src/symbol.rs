use std::num::NonZeroU32;

type SymbolRepr = u32;

/// The first usable symbol ID.
const FIRST_ID: SymbolRepr = 0;
/// Reserved. Never converted into a `Symbol`.
const NULL_ID: SymbolRepr = !0;

/// A common grammar symbol type.
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol(NonZeroU32);

impl Default for Symbol {
    fn default() -> Self {
        Symbol::first()
    }
}

impl Symbol {
    /// The symbol with the lowest ID.
    pub fn first() -> Self {
        FIRST_ID.into()
    }

    /// Cast the symbol's ID to `usize`.
    #[inline]
    pub fn usize(self) -> usize {
        let id: SymbolRepr = self.into();
        id as usize
    }
}

impl From<SymbolRepr> for Symbol {
    #[inline]
    fn from(id: SymbolRepr) -> Self {
        debug_assert_ne!(
            id, NULL_ID,
            "invalid coversion from a null id to non-null Symbol"
        );
        match NonZeroU32::new(id.wrapping_add(1)) {
            Some(n) => Symbol(n),
            None => Symbol(NonZeroU32::MAX),
        }
    }
}

impl From<Symbol> for SymbolRepr {
    #[inline]
    fn from(sym: Symbol) -> Self {
        sym.0.get().wrapping_sub(1)
    }
}

impl From<usize> for Symbol {
    #[inline]
    fn from(id: usize) -> Self {
        Symbol::from(id as SymbolRepr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usize_roundtrip() {
        assert_eq!(Symbol::first().usize(), 0);
        assert_eq!(Symbol::from(41usize).usize(), 41);
        assert!(Symbol::from(3usize) < Symbol::from(4usize));
    }
}
