//! Transactional encoding: item supports, threshold filtering and the dense
//! boolean matrix the miners search over.

use std::{
    collections::{HashMap, HashSet},
    fmt::Debug,
    hash::Hash,
};

use tracing::{debug, info};

use crate::{
    config::{FilterMode, SupportThresholds},
    error::{Error, Result},
    itemsets::support_ratio,
    matrix::BitMatrix,
    types::{ItemId, ItemSupports, SupportCount},
};

/// Output of a horizontal encoding pass.
///
/// For frequent and inverse filtering `output_items` and `combination_items`
/// hold the same items; they only differ in rare mode. Both are empty when no
/// threshold was given.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoding<I> {
    pub matrix: BitMatrix,
    pub output_items: ItemSupports<I>,
    pub combination_items: ItemSupports<I>,
}

/// Maps item values to dense column indices and keeps per-item supports.
///
/// The mapping is pruned by the first filtering pass and re-indexed
/// contiguously; after that the encoder is meant to be read-only.
#[derive(Debug, Clone)]
pub struct TransactionalEncoder<I> {
    supports: ItemSupports<I>,
    mapping: HashMap<I, ItemId>,
    columns: Vec<I>,
    number_of_transactions: usize,
}

impl<I> TransactionalEncoder<I>
where
    I: Eq + Hash + Clone + Debug,
{
    /// Count supports over `transactions`, in first-encounter order.
    /// An item repeated inside one transaction counts once.
    pub fn from_transactions<T: AsRef<[I]>>(transactions: &[T]) -> Self {
        let mut positions: HashMap<&I, usize> = HashMap::new();
        let mut supports: ItemSupports<I> = Vec::new();
        let mut seen: HashSet<&I> = HashSet::new();

        for transaction in transactions {
            seen.clear();
            for item in transaction.as_ref() {
                if !seen.insert(item) {
                    continue;
                }
                match positions.get(item) {
                    Some(&position) => supports[position].1 += 1,
                    None => {
                        positions.insert(item, supports.len());
                        supports.push((item.clone(), 1));
                    }
                }
            }
        }

        Self::from_supports(supports, transactions.len())
    }

    /// Build from precomputed supports; column order follows `supports`.
    pub fn from_supports(supports: ItemSupports<I>, number_of_transactions: usize) -> Self {
        let columns: Vec<I> = supports.iter().map(|(item, _)| item.clone()).collect();
        let mapping = columns
            .iter()
            .enumerate()
            .map(|(index, item)| (item.clone(), index))
            .collect();

        Self {
            supports,
            mapping,
            columns,
            number_of_transactions,
        }
    }

    pub fn number_of_transactions(&self) -> usize {
        self.number_of_transactions
    }

    pub fn mapping(&self) -> &HashMap<I, ItemId> {
        &self.mapping
    }

    /// Retained items in column order.
    pub fn items(&self) -> &[I] {
        &self.columns
    }

    pub fn item(&self, id: ItemId) -> Option<&I> {
        self.columns.get(id)
    }

    pub fn index_of(&self, item: &I) -> Option<ItemId> {
        self.mapping.get(item).copied()
    }

    /// Supports of every item seen at construction, filtered or not.
    pub fn supports(&self) -> &ItemSupports<I> {
        &self.supports
    }

    pub fn support_of(&self, item: &I) -> Option<SupportCount> {
        self.supports
            .iter()
            .find(|(candidate, _)| candidate == item)
            .map(|&(_, support)| support)
    }

    pub fn decode(&self, itemset: &[ItemId]) -> Vec<&I> {
        itemset.iter().filter_map(|&id| self.item(id)).collect()
    }

    pub fn encode_horizontal_frequent<T: AsRef<[I]>>(
        &mut self,
        transactions: &[T],
        min_support_ratio: f64,
    ) -> Result<Encoding<I>> {
        self.encode_horizontal(transactions, SupportThresholds::frequent(min_support_ratio))
    }

    pub fn encode_horizontal_inverse<T: AsRef<[I]>>(
        &mut self,
        transactions: &[T],
        max_support_ratio: f64,
    ) -> Result<Encoding<I>> {
        self.encode_horizontal(transactions, SupportThresholds::inverse(max_support_ratio))
    }

    pub fn encode_horizontal_rare<T: AsRef<[I]>>(
        &mut self,
        transactions: &[T],
        max_support_ratio: f64,
        min_support_ratio: f64,
    ) -> Result<Encoding<I>> {
        self.encode_horizontal(
            transactions,
            SupportThresholds::rare(max_support_ratio, min_support_ratio),
        )
    }

    /// Filter by `thresholds`, re-index, then build the transactions × items matrix.
    ///
    /// The mapping is only replaced once filtering succeeds; on error the
    /// encoder keeps its previous columns.
    pub fn encode_horizontal<T: AsRef<[I]>>(
        &mut self,
        transactions: &[T],
        thresholds: SupportThresholds,
    ) -> Result<Encoding<I>> {
        self.check_row_count(transactions.len())?;
        let (output_items, combination_items) = self.filter(thresholds)?;

        let mut matrix = BitMatrix::zeros(self.number_of_transactions, self.columns.len());
        for (row, transaction) in transactions.iter().enumerate() {
            for item in transaction.as_ref() {
                if let Some(&col) = self.mapping.get(item) {
                    matrix.set(row, col, true);
                }
            }
        }

        Ok(Encoding {
            matrix,
            output_items,
            combination_items,
        })
    }

    /// Items × transactions matrix over the current mapping. Unmapped items are dropped.
    pub fn encode_vertical<T: AsRef<[I]>>(&self, transactions: &[T]) -> Result<BitMatrix> {
        self.check_row_count(transactions.len())?;

        let mut matrix = BitMatrix::zeros(self.columns.len(), self.number_of_transactions);
        for (col, transaction) in transactions.iter().enumerate() {
            for item in transaction.as_ref() {
                if let Some(&row) = self.mapping.get(item) {
                    matrix.set(row, col, true);
                }
            }
        }

        Ok(matrix)
    }

    fn check_row_count(&self, found: usize) -> Result<()> {
        if found > self.number_of_transactions {
            return Err(Error::TransactionCountMismatch {
                expected: self.number_of_transactions,
                found,
            });
        }
        Ok(())
    }

    fn filter(&mut self, thresholds: SupportThresholds) -> Result<(ItemSupports<I>, ItemSupports<I>)> {
        thresholds.validate()?;

        let mut output_items = Vec::new();
        let mut combination_items = Vec::new();
        let mode = thresholds.mode();
        let SupportThresholds {
            min_support_ratio: min,
            max_support_ratio: max,
        } = thresholds;

        // pruned on a copy so a failed pass leaves the encoder as it was
        let mut mapping = self.mapping.clone();
        if mode != FilterMode::Unfiltered {
            for (item, support) in self.supports.iter() {
                let ratio = support_ratio(*support as usize, self.number_of_transactions)?;
                debug!("{:?} {}", item, ratio);

                match mode {
                    FilterMode::Rare => {
                        if ratio < max {
                            output_items.push((item.clone(), *support));
                            remove_item(&mut mapping, item)?;
                        }
                        if ratio >= min {
                            combination_items.push((item.clone(), *support));
                        }
                    }
                    FilterMode::Inverse => {
                        if ratio <= max {
                            combination_items.push((item.clone(), *support));
                            output_items.push((item.clone(), *support));
                        } else {
                            remove_item(&mut mapping, item)?;
                        }
                    }
                    FilterMode::Frequent => {
                        if ratio >= min {
                            combination_items.push((item.clone(), *support));
                            output_items.push((item.clone(), *support));
                        } else {
                            remove_item(&mut mapping, item)?;
                        }
                    }
                    FilterMode::Unfiltered => {}
                }
            }
        }

        info!(
            "Reduced items of interest from {} to {}",
            self.supports.len(),
            mapping.len()
        );
        self.mapping = mapping;
        self.reindex();

        Ok((output_items, combination_items))
    }

    fn reindex(&mut self) {
        let mapping = &self.mapping;
        self.columns.retain(|item| mapping.contains_key(item));
        for (index, item) in self.columns.iter().enumerate() {
            if let Some(slot) = self.mapping.get_mut(item) {
                *slot = index;
            }
        }
    }
}

fn remove_item<I: Eq + Hash + Debug>(mapping: &mut HashMap<I, ItemId>, item: &I) -> Result<ItemId> {
    mapping
        .remove(item)
        .ok_or_else(|| Error::UnknownItem(format!("{:?}", item)))
}
