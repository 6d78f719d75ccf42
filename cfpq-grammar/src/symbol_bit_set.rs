//! Sets of symbols, such as the terminal, productive or reachable ones.

use std::{iter, ops};

use bit_vec::BitVec;

use crate::local_prelude::*;

/// A set of symbols in the form of a bit vector.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SymbolBitSet {
    bit_vec: BitVec,
}

/// An iterator over a symbol set.
pub struct Iter<'a> {
    iter: iter::Enumerate<bit_vec::Iter<'a>>,
}

impl SymbolBitSet {
    /// Constructs an empty `SymbolBitSet`.
    pub fn new() -> Self {
        SymbolBitSet {
            bit_vec: BitVec::new(),
        }
    }

    /// Constructs a `SymbolBitSet` covering every symbol of the grammar.
    pub fn from_elem(grammar: &Cfg, elem: bool) -> Self {
        SymbolBitSet {
            bit_vec: BitVec::from_elem(grammar.num_syms(), elem),
        }
    }

    /// Clears the set and resizes it to fit the symbol source.
    pub fn reset(&mut self, symbol_source: &SymbolSource) {
        self.bit_vec = BitVec::from_elem(symbol_source.num_syms(), false);
    }

    /// Grows the set with absent symbols, so that it holds at least `len` symbols.
    pub fn reserve(&mut self, len: usize) {
        if self.bit_vec.len() < len {
            let additional = len - self.bit_vec.len();
            self.bit_vec.grow(additional, false);
        }
    }

    /// Adds the grammar's terminal symbols to the set.
    pub fn terminal(&mut self, grammar: &Cfg) {
        self.reserve(grammar.num_syms());
        for sym in grammar.terminal_set().iter() {
            self.set(sym, true);
        }
    }

    /// Adds the LHS of every rule of the form `A ::= ()` to the set.
    pub fn nulling(&mut self, grammar: &Cfg) {
        self.reserve(grammar.num_syms());
        for rule in grammar.rules() {
            if rule.rhs.is_empty() {
                self.set(rule.lhs, true);
            }
        }
    }

    /// Includes or excludes a symbol. The set grows as needed.
    pub fn set(&mut self, index: Symbol, elem: bool) {
        self.reserve(index.usize() + 1);
        self.bit_vec.set(index.usize(), elem);
    }

    /// Iterates over symbols in the set.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            iter: self.bit_vec.iter().enumerate(),
        }
    }

    /// Returns the number of symbols the set can hold.
    pub fn len(&self) -> usize {
        self.bit_vec.len()
    }

    /// Checks whether the set can hold no symbols.
    pub fn is_empty(&self) -> bool {
        self.bit_vec.is_empty()
    }

    /// Returns the number of symbols in the set.
    pub fn count(&self) -> usize {
        self.bit_vec.iter().filter(|&present| present).count()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Symbol;
    fn next(&mut self) -> Option<Self::Item> {
        for (id, is_present) in &mut self.iter {
            if is_present {
                return Some(Symbol::from(id));
            }
        }
        None
    }
}

static TRUE: bool = true;
static FALSE: bool = false;

impl ops::Index<Symbol> for SymbolBitSet {
    type Output = bool;

    fn index(&self, index: Symbol) -> &Self::Output {
        if self.bit_vec.get(index.usize()).unwrap_or(false) {
            &TRUE
        } else {
            &FALSE
        }
    }
}

