//! Closed itemsets by tid-set subsumption over a support-ascending item order.

use std::{fmt::Debug, hash::Hash};

use itertools::Itertools;
use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::{
    combi::canonical,
    config::validate_ratio,
    encoder::TransactionalEncoder,
    error::{Error, Result},
    itemsets::support_ratio,
    matrix::{is_subsumed, BitMatrix},
    types::{ClosedItemsets, ItemId, Itemset},
};

pub struct ClosedSearch<'m> {
    horizontal: &'m BitMatrix,
    /// One tid-set per item.
    vertical: BitMatrix,
    all_rows: Vec<usize>,
    order: Vec<ItemId>,
    min_support_ratio: f64,
}

impl<'m> ClosedSearch<'m> {
    /// Items are ordered by ascending support, ties broken by item value.
    pub fn new<I>(
        matrix: &'m BitMatrix,
        encoder: &TransactionalEncoder<I>,
        min_support_ratio: f64,
    ) -> Result<Self>
    where
        I: Eq + Hash + Clone + Debug + Ord,
    {
        validate_ratio(min_support_ratio)?;
        if matrix.n_rows() == 0 {
            return Err(Error::EmptyDataset);
        }

        let vertical = matrix.transpose();
        let order = (0..matrix.n_cols())
            .map(|item| (matrix.column_support(item), encoder.item(item), item))
            .sorted()
            .map(|(_, _, item)| item)
            .collect();

        Ok(Self {
            horizontal: matrix,
            vertical,
            all_rows: matrix.all_rows(),
            order,
            min_support_ratio,
        })
    }

    pub fn order(&self) -> &[ItemId] {
        &self.order
    }

    /// Roots in support order, one after another. Duplicates across roots are kept.
    pub fn run(&self) -> Result<ClosedItemsets> {
        let mut closed = Vec::new();
        for &root in &self.order {
            closed.extend(self.grow_root(root)?);
        }

        info!("Found {} closed itemsets", closed.len());
        Ok(closed)
    }

    /// Same result as [`ClosedSearch::run`], with root subtrees spread over
    /// the `rayon` pool.
    pub fn run_parallel(&self) -> Result<ClosedItemsets> {
        let per_root = self
            .order
            .par_iter()
            .map(|&root| self.grow_root(root))
            .collect::<Result<Vec<ClosedItemsets>>>()?;

        let closed: ClosedItemsets = per_root.into_iter().flatten().collect();
        info!("Found {} closed itemsets", closed.len());
        Ok(closed)
    }

    fn grow_root(&self, root: ItemId) -> Result<ClosedItemsets> {
        let mut closed = Vec::new();
        let mut build_up = vec![root];

        for &secondary in self.order.iter().filter(|&&item| item != root) {
            let build_up_tids = self.vertical.tidset(&build_up);
            if is_subsumed(&build_up_tids, self.vertical.row(secondary)) {
                trace!("{} subsumed by {}, merging", root, secondary);
                build_up.push(secondary);
            } else {
                self.assess(&[root, secondary], &mut closed)?;
            }
        }

        closed.push(canonical(build_up));
        Ok(closed)
    }

    fn assess(&self, head: &[ItemId], closed: &mut ClosedItemsets) -> Result<()> {
        let head_rows = self.horizontal.rows_containing(head, &self.all_rows);
        if head_rows.is_empty() {
            trace!("Head items {:?} never occur together", head);
            return Ok(());
        }
        let ratio = support_ratio(head_rows.len(), self.horizontal.n_rows())?;

        if ratio < self.min_support_ratio {
            trace!("Head items {:?} infrequent ({})", head, ratio);
            return Ok(());
        }

        let occupied = self.horizontal.occupied_columns(&head_rows);
        let head_tids = self.vertical.tidset(head);
        let mut build_up: Itemset = head.to_vec();

        for &candidate in self
            .order
            .iter()
            .filter(|&&item| occupied[item] && !head.contains(&item))
        {
            if is_subsumed(&head_tids, self.vertical.row(candidate)) {
                build_up.push(candidate);
            }
        }

        debug!("Closed itemset {:?} grown from {:?}", build_up, head);
        closed.push(canonical(build_up));
        Ok(())
    }
}

/// Closed itemsets of a horizontal matrix, each sorted ascending.
///
/// Support must reach `min_support_ratio`. The list may repeat an itemset
/// found from different roots; see [`crate::combi::dedup_itemsets`].
pub fn mine_closed<I>(
    matrix: &BitMatrix,
    encoder: &TransactionalEncoder<I>,
    min_support_ratio: f64,
) -> Result<ClosedItemsets>
where
    I: Eq + Hash + Clone + Debug + Ord,
{
    ClosedSearch::new(matrix, encoder, min_support_ratio)?.run()
}
