//! Boolean decomposition of an automaton: one adjacency matrix per edge label.

use std::collections::btree_map::{self, BTreeMap};

use crate::bool_matrix::BoolMatrix;

/// Square boolean matrices of a common dimension, keyed by label.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixFamily {
    dim: usize,
    matrices: BTreeMap<String, BoolMatrix>,
}

impl MatrixFamily {
    /// Creates a family with no labels. Every matrix will be `dim`x`dim`.
    pub fn new(dim: usize) -> Self {
        MatrixFamily {
            dim,
            matrices: BTreeMap::new(),
        }
    }

    /// Returns the dimension of every matrix.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Sets entry `(from, to)` in the matrix of `label`, creating the matrix if needed.
    /// Returns `true` if the entry was previously unset.
    pub fn set(&mut self, label: &str, from: usize, to: usize) -> bool {
        let dim = self.dim;
        if let Some(matrix) = self.matrices.get_mut(label) {
            return matrix.set(from, to);
        }
        let mut matrix = BoolMatrix::square(dim);
        matrix.set(from, to);
        self.matrices.insert(label.to_string(), matrix);
        true
    }

    /// Returns the matrix of a label.
    pub fn get(&self, label: &str) -> Option<&BoolMatrix> {
        self.matrices.get(label)
    }

    /// Iterates over labels in ascending order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.matrices.keys().map(String::as_str)
    }

    /// Iterates over labels shared with another family, in ascending order.
    pub fn shared_labels<'a>(&'a self, other: &'a MatrixFamily) -> impl Iterator<Item = &'a str> {
        self.labels()
            .filter(move |label| other.matrices.contains_key(*label))
    }

    /// Iterates over pairs of labels and matrices.
    pub fn iter(&self) -> btree_map::Iter<'_, String, BoolMatrix> {
        self.matrices.iter()
    }

    /// Returns the number of labels.
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    /// Checks whether the family has no labels.
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    /// Computes the union of all matrices.
    pub fn union(&self) -> BoolMatrix {
        let mut result = BoolMatrix::square(self.dim);
        for matrix in self.matrices.values() {
            result.or_assign(matrix);
        }
        result
    }
}

impl<'a> IntoIterator for &'a MatrixFamily {
    type Item = (&'a String, &'a BoolMatrix);
    type IntoIter = btree_map::Iter<'a, String, BoolMatrix>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
