use std::collections::HashSet;

/// Dense column index assigned to an item by the encoder.
pub type ItemId = usize;
/// Row position of a transaction in a horizontal matrix.
pub type TransactionId = usize;

/// Column indices, kept sorted ascending once an itemset leaves a miner.
pub type Itemset = Vec<ItemId>;

pub type SupportCount = u32;
pub type ItemSupports<I> = Vec<(I, SupportCount)>;

pub type MaximalItemsets = HashSet<Itemset>;
pub type FrequentItemsets = HashSet<Itemset>;
pub type InfrequentItemsets = HashSet<Itemset>;
pub type ClosedItemsets = Vec<Itemset>;
