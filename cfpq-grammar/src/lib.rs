//! Context-free grammars for path querying: construction, loading from text,
//! usefulness analysis and the rewrite into weak Chomsky normal form.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![cfg_attr(test, allow(missing_docs))]

pub mod cfg;
pub mod load;
pub mod normalize;
pub mod occurence_map;
pub mod rule_builder;
pub mod symbol_bit_matrix;
pub mod symbol_bit_set;
pub mod useful;

pub use crate::cfg::{Cfg, CfgRule};
pub use crate::load::LoadError;
pub use crate::normalize::NormalizeError;
pub use crate::symbol_bit_set::SymbolBitSet;
pub use crate::useful::Usefulness;
pub use cfpq_symbol::{Symbol, SymbolName, SymbolSource};

pub(crate) mod local_prelude {
    pub use crate::cfg::{Cfg, CfgRule};
    pub use crate::symbol_bit_set::SymbolBitSet;
    pub use cfpq_symbol::{Symbol, SymbolSource};
}
