use std::{fmt::Debug, hash::Hash};

use itertools::Itertools;

use crate::{encoder::TransactionalEncoder, types::Itemset};

/// Sorted, duplicate-free form used for every membership test on itemsets.
pub fn canonical(mut itemset: Itemset) -> Itemset {
    itemset.sort_unstable();
    itemset.dedup();
    itemset
}

/// Canonicalize and drop repeats, keeping the first occurrence of each itemset.
pub fn dedup_itemsets(itemsets: Vec<Itemset>) -> Vec<Itemset> {
    itemsets.into_iter().map(canonical).unique().collect()
}

pub fn decode_itemsets<'a, I, S>(encoder: &TransactionalEncoder<I>, itemsets: S) -> Vec<Vec<I>>
where
    I: Eq + Hash + Clone + Debug,
    S: IntoIterator<Item = &'a Itemset>,
{
    itemsets
        .into_iter()
        .map(|itemset| encoder.decode(itemset).into_iter().cloned().collect())
        .collect()
}

/// Like [`decode_itemsets`], with each itemset's values sorted.
pub fn decode_sorted_itemsets<'a, I, S>(encoder: &TransactionalEncoder<I>, itemsets: S) -> Vec<Vec<I>>
where
    I: Eq + Hash + Clone + Debug + Ord,
    S: IntoIterator<Item = &'a Itemset>,
{
    decode_itemsets(encoder, itemsets)
        .into_iter()
        .map(|itemset| itemset.into_iter().sorted().collect())
        .collect()
}
