//! Sparse boolean matrices.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::{BitOrAssign, Mul};

use log::trace;

use crate::limits::{LimitExceeded, Limits};

/// A sparse boolean matrix. Only non-empty rows are stored, each as a sorted
/// set of columns, so the cost of operations follows the number of non-zero entries.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoolMatrix {
    num_rows: usize,
    num_cols: usize,
    rows: BTreeMap<usize, BTreeSet<usize>>,
}

impl BoolMatrix {
    /// Creates an empty matrix of the given shape.
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        BoolMatrix {
            num_rows,
            num_cols,
            rows: BTreeMap::new(),
        }
    }

    /// Creates an empty `n`x`n` matrix.
    pub fn square(n: usize) -> Self {
        Self::new(n, n)
    }

    /// Creates the `n`x`n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_entries(n, n, (0..n).map(|i| (i, i)))
    }

    /// Creates a matrix with the given entries set.
    ///
    /// # Panics
    ///
    /// Panics if an entry is out of bounds.
    pub fn from_entries(
        num_rows: usize,
        num_cols: usize,
        entries: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let mut result = Self::new(num_rows, num_cols);
        for (row, col) in entries {
            result.set(row, col);
        }
        result
    }

    /// Returns the number of rows.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Checks the value of an entry. Out-of-bounds entries are unset.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.rows.get(&row).map_or(false, |cols| cols.contains(&col))
    }

    /// Sets an entry. Returns `true` if it was previously unset.
    ///
    /// # Panics
    ///
    /// Panics if the entry is out of bounds.
    pub fn set(&mut self, row: usize, col: usize) -> bool {
        assert!(
            row < self.num_rows && col < self.num_cols,
            "entry ({}, {}) out of bounds for a {}x{} matrix",
            row,
            col,
            self.num_rows,
            self.num_cols
        );
        self.rows.entry(row).or_default().insert(col)
    }

    /// Sets the given columns in a row. Returns `true` if any was previously unset.
    pub fn union_row(&mut self, row: usize, cols: impl IntoIterator<Item = usize>) -> bool {
        let mut changed = false;
        for col in cols {
            changed |= self.set(row, col);
        }
        changed
    }

    /// Iterates over the set columns of a row, in ascending order.
    pub fn iter_row(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.rows.get(&row).into_iter().flatten().copied()
    }

    /// Iterates over non-empty rows, in ascending order.
    pub fn iter_rows(&self) -> impl Iterator<Item = (usize, &BTreeSet<usize>)> + '_ {
        self.rows.iter().map(|(&row, cols)| (row, cols))
    }

    /// Iterates over set entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |&col| (row, col)))
    }

    /// Returns the number of set entries.
    pub fn nnz(&self) -> usize {
        self.rows.values().map(BTreeSet::len).sum()
    }

    /// Checks whether no entry is set.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Computes the boolean product `self · rhs`.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions differ.
    pub fn mul(&self, rhs: &BoolMatrix) -> BoolMatrix {
        assert_eq!(
            self.num_cols, rhs.num_rows,
            "inner dimensions of a matrix product differ"
        );
        let mut result = BoolMatrix::new(self.num_rows, rhs.num_cols);
        for (&row, middle) in &self.rows {
            let mut cols = BTreeSet::new();
            for k in middle {
                if let Some(rhs_cols) = rhs.rows.get(k) {
                    cols.extend(rhs_cols.iter().copied());
                }
            }
            if !cols.is_empty() {
                result.rows.insert(row, cols);
            }
        }
        result
    }

    /// Sets every entry that is set in `other`. Returns `true` if anything changed.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    pub fn or_assign(&mut self, other: &BoolMatrix) -> bool {
        assert_eq!(
            (self.num_rows, self.num_cols),
            (other.num_rows, other.num_cols),
            "shapes of matrices differ"
        );
        let mut changed = false;
        for (&row, cols) in &other.rows {
            let dest = self.rows.entry(row).or_default();
            for &col in cols {
                changed |= dest.insert(col);
            }
        }
        changed
    }

    /// Computes the Kronecker product. Entry `(i, j)` of `self` and `(k, l)` of `rhs`
    /// give entry `(i·r + k, j·c + l)`, where `r`x`c` is the shape of `rhs`.
    pub fn kron(&self, rhs: &BoolMatrix) -> BoolMatrix {
        let mut result = BoolMatrix::new(
            self.num_rows * rhs.num_rows,
            self.num_cols * rhs.num_cols,
        );
        for (i, j) in self.iter() {
            for (&k, rhs_cols) in &rhs.rows {
                let row = i * rhs.num_rows + k;
                let dest = result.rows.entry(row).or_default();
                dest.extend(rhs_cols.iter().map(|&l| j * rhs.num_cols + l));
            }
        }
        result
    }

    /// Computes the direct sum, with `self` in the top-left block and `rhs` in the
    /// bottom-right block.
    pub fn direct_sum(&self, rhs: &BoolMatrix) -> BoolMatrix {
        let mut result = BoolMatrix::new(
            self.num_rows + rhs.num_rows,
            self.num_cols + rhs.num_cols,
        );
        result.rows = self.rows.clone();
        for (&row, cols) in &rhs.rows {
            result.rows.insert(
                self.num_rows + row,
                cols.iter().map(|&col| self.num_cols + col).collect(),
            );
        }
        result
    }

    /// Computes the transitive closure in place, by squaring until the number of
    /// set entries stops changing. Returns the number of passes.
    ///
    /// # Errors
    ///
    /// Fails if a limit on passes or non-zero entries is exceeded.
    pub fn transitive_closure(&mut self, limits: &Limits) -> Result<usize, LimitExceeded> {
        let mut passes = 0;
        loop {
            passes += 1;
            limits.check_iterations(passes)?;
            let before = self.nnz();
            let current: &BoolMatrix = self;
            let squared = current.mul(current);
            self.or_assign(&squared);
            let after = self.nnz();
            trace!("closure pass {}: {} -> {} entries", passes, before, after);
            limits.check_nonzeros(after)?;
            if after == before {
                return Ok(passes);
            }
        }
    }
}

impl<'a> BitOrAssign<&'a BoolMatrix> for BoolMatrix {
    fn bitor_assign(&mut self, rhs: &'a BoolMatrix) {
        self.or_assign(rhs);
    }
}

impl<'a, 'b> Mul<&'b BoolMatrix> for &'a BoolMatrix {
    type Output = BoolMatrix;

    fn mul(self, rhs: &'b BoolMatrix) -> BoolMatrix {
        BoolMatrix::mul(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(n: usize) -> BoolMatrix {
        BoolMatrix::from_entries(n, n, (0..n).map(|i| (i, (i + 1) % n)))
    }

    #[test]
    fn test_mul() {
        let m = cycle(3);
        let squared = &m * &m;
        assert_eq!(squared.iter().collect::<Vec<_>>(), vec![(0, 2), (1, 0), (2, 1)]);
        assert_eq!(m.mul(&BoolMatrix::identity(3)), m);
    }

    #[test]
    fn test_or_assign_reports_change() {
        let mut m = cycle(3);
        assert!(!m.or_assign(&cycle(3)));
        assert!(m.or_assign(&BoolMatrix::identity(3)));
        assert_eq!(m.nnz(), 6);
    }

    #[test]
    fn test_kron() {
        let a = BoolMatrix::from_entries(2, 2, [(0, 1)]);
        let b = BoolMatrix::from_entries(3, 3, [(1, 2), (2, 0)]);
        let k = a.kron(&b);
        assert_eq!((k.num_rows(), k.num_cols()), (6, 6));
        assert_eq!(k.iter().collect::<Vec<_>>(), vec![(1, 5), (2, 3)]);
    }

    #[test]
    fn test_direct_sum() {
        let a = BoolMatrix::from_entries(2, 2, [(0, 1)]);
        let b = BoolMatrix::from_entries(3, 3, [(2, 0)]);
        let sum = a.direct_sum(&b);
        assert_eq!((sum.num_rows(), sum.num_cols()), (5, 5));
        assert_eq!(sum.iter().collect::<Vec<_>>(), vec![(0, 1), (4, 2)]);
    }

    #[test]
    fn test_transitive_closure() {
        let mut m = cycle(4);
        m.transitive_closure(&Limits::default()).unwrap();
        assert_eq!(m.nnz(), 16);

        let mut chain = BoolMatrix::from_entries(3, 3, [(0, 1), (1, 2)]);
        chain.transitive_closure(&Limits::default()).unwrap();
        assert_eq!(chain.iter().collect::<Vec<_>>(), vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_transitive_closure_limits() {
        let mut m = cycle(16);
        let error = m
            .transitive_closure(&Limits::new().max_iterations(1))
            .unwrap_err();
        assert_eq!(error.limit, 1);

        let mut m = cycle(16);
        assert!(m
            .transitive_closure(&Limits::new().max_nonzeros(100))
            .is_err());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let m = cycle(2);
        assert!(m.get(0, 1));
        assert!(!m.get(5, 1));
        assert!(m.iter_row(7).next().is_none());
    }
}
