//! Relations between symbols, `R(A, B)`, stored in a bit matrix.

use std::ops::{self, Deref, DerefMut};

use bit_matrix::BitMatrix;

use crate::local_prelude::*;

/// A matrix that represents a relation `R(A, B)` between two symbols.
#[derive(Debug)]
pub struct SymbolBitMatrix {
    bit_matrix: BitMatrix,
}

impl SymbolBitMatrix {
    fn new(num_syms: usize) -> Self {
        SymbolBitMatrix {
            bit_matrix: BitMatrix::new(num_syms, num_syms),
        }
    }

    fn set(&mut self, row: Symbol, col: Symbol, included: bool) {
        self.bit_matrix.set(row.usize(), col.usize(), included);
    }

    /// Creates an iterator over symbols which appear in the given row.
    pub fn iter_row_syms(&self, row: Symbol) -> impl Iterator<Item = Symbol> + '_ {
        self.bit_matrix
            .iter_row(row.usize())
            .zip(SymbolSource::generate_fresh())
            .filter_map(|(present, sym)| if present { Some(sym) } else { None })
    }
}

impl Deref for SymbolBitMatrix {
    type Target = BitMatrix;
    fn deref(&self) -> &Self::Target {
        &self.bit_matrix
    }
}

impl DerefMut for SymbolBitMatrix {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.bit_matrix
    }
}

static TRUE: bool = true;
static FALSE: bool = false;

impl ops::Index<(Symbol, Symbol)> for SymbolBitMatrix {
    type Output = bool;
    fn index(&self, index: (Symbol, Symbol)) -> &Self::Output {
        if self.bit_matrix[(index.0.usize(), index.1.usize())] {
            &TRUE
        } else {
            &FALSE
        }
    }
}

impl Cfg {
    /// Creates the empty matrix of size `|S|x|S|` where `S`: set of symbols.
    pub fn empty_matrix(&self) -> SymbolBitMatrix {
        SymbolBitMatrix::new(self.num_syms())
    }

    /// Computes the direct derivation matrix: `A` derives `B` if `B` appears
    /// on the RHS of a rule of `A`.
    pub fn direct_derivation_matrix(&self) -> SymbolBitMatrix {
        let mut derivation = self.empty_matrix();

        for rule in self.rules() {
            for &sym in rule.rhs.iter() {
                derivation.set(rule.lhs, sym, true);
            }
        }

        derivation
    }

    /// Computes the reflexive and transitive reachability matrix.
    pub fn reachability_matrix(&self) -> SymbolBitMatrix {
        let mut result = self.direct_derivation_matrix();
        result.transitive_closure();
        result.reflexive_closure();
        result
    }

    /// Computes the transitive unit derivation matrix.
    ///
    /// A unit derivation is defined with a grammar rule such as:
    /// ```ignore
    /// A ::= B;
    /// ```
    /// where `B` is a nonterminal.
    pub fn unit_derivation_matrix(&self) -> SymbolBitMatrix {
        let mut unit_derivation = self.empty_matrix();

        for rule in self.rules() {
            // A rule of form `A ::= A` is a self-loop. It derives nothing new.
            if rule.rhs.len() == 1 && !self.is_terminal(rule.rhs[0]) && rule.lhs != rule.rhs[0] {
                unit_derivation.set(rule.lhs, rule.rhs[0], true);
            }
        }

        unit_derivation.transitive_closure();
        unit_derivation
    }
}
