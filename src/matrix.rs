//! Bit-packed boolean matrix shared by the encoder and both miners.
//!
//! A horizontal matrix has one row per transaction and one column per item; a
//! vertical matrix is its transpose, so each row is an item's tid-set.

use bitvec::prelude::*;

use crate::types::{ItemId, TransactionId};

pub type BitRow = BitVec<usize, Lsb0>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    rows: Vec<BitRow>,
    n_cols: usize,
}

impl BitMatrix {
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            rows: vec![BitRow::repeat(false, n_cols); n_rows],
            n_cols,
        }
    }

    /// Build from the set column indices of every row. Out-of-range columns panic.
    pub fn from_itemsets(n_cols: usize, rows: &[Vec<ItemId>]) -> Self {
        let mut matrix = Self::zeros(rows.len(), n_cols);
        for (row, columns) in rows.iter().enumerate() {
            for &col in columns {
                matrix.set(row, col, true);
            }
        }
        matrix
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.rows[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.rows[row].set(col, value);
    }

    pub fn row(&self, row: usize) -> &BitSlice<usize, Lsb0> {
        self.rows[row].as_bitslice()
    }

    pub fn transpose(&self) -> Self {
        let mut transposed = Self::zeros(self.n_cols, self.n_rows());
        for (row, bits) in self.rows.iter().enumerate() {
            for col in bits.iter_ones() {
                transposed.set(col, row, true);
            }
        }
        transposed
    }

    pub fn column_support(&self, col: usize) -> usize {
        self.rows.iter().filter(|bits| bits[col]).count()
    }

    pub fn all_rows(&self) -> Vec<TransactionId> {
        (0..self.n_rows()).collect()
    }

    /// Rows among `within` whose bits are set for every one of `columns`.
    /// Equivalent to selecting rows whose sum over `columns` equals `columns.len()`.
    pub fn rows_containing(&self, columns: &[ItemId], within: &[TransactionId]) -> Vec<TransactionId> {
        within
            .iter()
            .copied()
            .filter(|&row| columns.iter().all(|&col| self.rows[row][col]))
            .collect()
    }

    /// Column-wise OR over the selected rows: the columns with at least one set bit.
    pub fn occupied_columns(&self, rows: &[TransactionId]) -> BitRow {
        let mut occupied = BitRow::repeat(false, self.n_cols);
        for &row in rows {
            occupied |= self.rows[row].as_bitslice();
        }
        occupied
    }

    /// AND of the given rows. On a vertical matrix this is the tid-set of the itemset.
    pub fn tidset(&self, rows: &[usize]) -> BitRow {
        let mut tids = BitRow::repeat(true, self.n_cols);
        for &row in rows {
            tids &= self.rows[row].as_bitslice();
        }
        tids
    }
}

/// `a` is subsumed by `b` when every bit of `a` is also set in `b`, i.e. `(a | b) == b`.
pub fn is_subsumed(a: &BitSlice<usize, Lsb0>, b: &BitSlice<usize, Lsb0>) -> bool {
    let mut union = a.to_bitvec();
    union |= b;
    union.as_bitslice() == b
}
