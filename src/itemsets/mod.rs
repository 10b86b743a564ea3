pub mod charm;
pub mod mafia;

pub use charm::{mine_closed, ClosedSearch};
pub use mafia::{mine_maximal, MaximalSearch, SearchOutcome};

use crate::{
    error::{Error, Result},
    matrix::BitMatrix,
    types::ItemId,
};

/// `support / total`. Zero transactions is an unsupported input.
pub fn support_ratio(support: usize, total_transaction_count: usize) -> Result<f64> {
    if total_transaction_count == 0 {
        return Err(Error::EmptyDataset);
    }
    Ok(support as f64 / total_transaction_count as f64)
}

/// Number of rows of a horizontal matrix containing every item of `itemset`.
pub fn support_count(matrix: &BitMatrix, itemset: &[ItemId]) -> usize {
    matrix.rows_containing(itemset, &matrix.all_rows()).len()
}
