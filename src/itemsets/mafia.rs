//! Maximal frequent itemsets by depth-first head/tail search with
//! head-union-tail (HUT) pruning.

use itertools::Itertools;
use tracing::{debug, info, trace};

use crate::{
    combi::canonical,
    config::validate_ratio,
    error::{Error, Result},
    itemsets::support_ratio,
    matrix::BitMatrix,
    types::{FrequentItemsets, InfrequentItemsets, ItemId, Itemset, MaximalItemsets, TransactionId},
};

/// Every itemset the search classified. `maximal` is the mining result.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SearchOutcome {
    pub maximal: MaximalItemsets,
    pub frequent: FrequentItemsets,
    pub infrequent: InfrequentItemsets,
}

/// Search context for one mining call over a horizontal matrix.
///
/// The three result sets live here and are threaded through every recursive
/// assessment by `&mut self`; nothing survives past [`MaximalSearch::run`].
pub struct MaximalSearch<'m> {
    matrix: &'m BitMatrix,
    min_support_ratio: f64,
    outcome: SearchOutcome,
}

impl<'m> MaximalSearch<'m> {
    pub fn new(matrix: &'m BitMatrix, min_support_ratio: f64) -> Result<Self> {
        validate_ratio(min_support_ratio)?;
        if matrix.n_rows() == 0 {
            return Err(Error::EmptyDataset);
        }

        Ok(Self {
            matrix,
            min_support_ratio,
            outcome: SearchOutcome::default(),
        })
    }

    pub fn run(mut self) -> Result<SearchOutcome> {
        let all_rows = self.matrix.all_rows();

        for root in 0..self.matrix.n_cols() {
            // singletons were support-filtered by the encoder
            self.outcome.frequent.insert(vec![root]);

            let root_rows = self.matrix.rows_containing(&[root], &all_rows);
            let occupied = self.matrix.occupied_columns(&root_rows);

            for tail_item in occupied.iter_ones().filter(|&item| item != root) {
                let head = canonical(vec![root, tail_item]);
                let head_rows = self.matrix.rows_containing(&head, &root_rows);
                self.assess(&head, &head_rows)?;
            }
        }

        info!(
            "Found {} maximal itemsets ({} frequent, {} infrequent visited)",
            self.outcome.maximal.len(),
            self.outcome.frequent.len(),
            self.outcome.infrequent.len()
        );

        Ok(self.outcome)
    }

    /// Returns whether `head` turned out frequent.
    fn assess(&mut self, head: &[ItemId], head_rows: &[TransactionId]) -> Result<bool> {
        let ratio = support_ratio(head_rows.len(), self.matrix.n_rows())?;
        trace!("Head item set {:?} support {}", head, ratio);

        if ratio <= self.min_support_ratio {
            debug!("Head items {:?} infrequent", head);
            self.outcome.infrequent.insert(head.to_vec());
            return Ok(false);
        }

        let mut occupied = self.matrix.occupied_columns(head_rows);
        for &item in head {
            occupied.set(item, true);
        }
        let head_union_tail: Itemset = occupied.iter_ones().collect();

        // checked before HUT so a revisited maximal head stays out of `frequent`
        if head_union_tail.len() == head.len() {
            debug!("No superset items found, {:?} is maximal", head);
            self.outcome.maximal.insert(head.to_vec());
            return Ok(true);
        }

        if self.outcome.maximal.contains(&head_union_tail) {
            debug!("HUT pruning engaged for {:?}", head);
            self.outcome.frequent.insert(head.to_vec());
            return Ok(true);
        }

        let mut frequent_extension = false;

        for tail_item in head_union_tail.iter().copied().filter(|item| !head.contains(item)) {
            let extended = head.iter().copied().chain(Some(tail_item)).sorted().collect_vec();
            let extended_rows = self.matrix.rows_containing(&extended, head_rows);
            frequent_extension |= self.assess(&extended, &extended_rows)?;
        }

        if frequent_extension {
            debug!("Frequent tail items found under {:?}", head);
            self.outcome.frequent.insert(head.to_vec());
        } else {
            debug!("No frequent tail items found, {:?} is maximal", head);
            self.outcome.maximal.insert(head.to_vec());
        }

        Ok(true)
    }
}

/// Maximal itemsets of a horizontal matrix, each sorted ascending.
///
/// Support must strictly exceed `min_support_ratio`.
pub fn mine_maximal(matrix: &BitMatrix, min_support_ratio: f64) -> Result<MaximalItemsets> {
    Ok(MaximalSearch::new(matrix, min_support_ratio)?.run()?.maximal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{combi::decode_itemsets, encoder::TransactionalEncoder, itemsets::support_count};
    use maplit::hashset;
    use std::collections::HashSet;

    fn mafia_paper() -> Vec<Vec<u32>> {
        vec![
            vec![1, 2, 3, 4],
            vec![1, 2],
            vec![1, 2],
            vec![1, 2],
            vec![2, 3],
            vec![2, 3],
            vec![2, 3],
            vec![3, 4],
            vec![3, 4],
            vec![3, 4],
        ]
    }

    fn encode(data: &[Vec<u32>], min_support: f64) -> (TransactionalEncoder<u32>, BitMatrix) {
        let mut encoder = TransactionalEncoder::from_transactions(data);
        let encoding = encoder.encode_horizontal_frequent(data, min_support).unwrap();
        (encoder, encoding.matrix)
    }

    fn decoded(encoder: &TransactionalEncoder<u32>, itemsets: &MaximalItemsets) -> HashSet<Vec<u32>> {
        decode_itemsets(encoder, itemsets.iter()).into_iter().collect()
    }

    fn assert_maximal(matrix: &BitMatrix, maximal: &MaximalItemsets, min_support: f64) {
        let total = matrix.n_rows();
        for itemset in maximal {
            let ratio = support_ratio(support_count(matrix, itemset), total).unwrap();
            assert!(ratio > min_support, "{:?} is not frequent", itemset);

            for item in (0..matrix.n_cols()).filter(|item| !itemset.contains(item)) {
                let extended = canonical(itemset.iter().copied().chain(Some(item)).collect());
                let ratio = support_ratio(support_count(matrix, &extended), total).unwrap();
                assert!(ratio <= min_support, "{:?} has frequent superset {:?}", itemset, extended);
            }
        }
    }

    #[test]
    fn mid_support_finds_the_three_pairs() {
        let (encoder, matrix) = encode(&mafia_paper(), 0.2);
        let maximal = mine_maximal(&matrix, 0.2).unwrap();

        assert_eq!(maximal, hashset! { vec![0, 1], vec![1, 2], vec![2, 3] });
        assert_eq!(
            decoded(&encoder, &maximal),
            hashset! { vec![1, 2], vec![2, 3], vec![3, 4] }
        );
        assert_maximal(&matrix, &maximal, 0.2);
    }

    #[test]
    fn low_support_collapses_to_a_single_itemset() {
        let (encoder, matrix) = encode(&mafia_paper(), 0.05);
        let maximal = mine_maximal(&matrix, 0.05).unwrap();

        assert_eq!(decoded(&encoder, &maximal), hashset! { vec![1, 2, 3, 4] });
        assert_maximal(&matrix, &maximal, 0.05);
    }

    #[test]
    fn hut_pruned_heads_are_never_maximal() {
        let (_, matrix) = encode(&mafia_paper(), 0.05);
        let outcome = MaximalSearch::new(&matrix, 0.05).unwrap().run().unwrap();

        for pair in &[vec![0, 1], vec![1, 2], vec![2, 3]] {
            assert!(outcome.frequent.contains(pair));
            assert!(!outcome.maximal.contains(pair));
        }
        assert!(outcome.infrequent.is_empty());
    }

    #[test]
    fn infrequent_extensions_are_recorded() {
        let (_, matrix) = encode(&mafia_paper(), 0.2);
        let outcome = MaximalSearch::new(&matrix, 0.2).unwrap().run().unwrap();

        assert!(outcome.infrequent.contains(&vec![0, 1, 2]));
        assert!(outcome.infrequent.contains(&vec![0, 3]));
        assert!(outcome.frequent.contains(&vec![0]));
        assert!(outcome.maximal.is_disjoint(&outcome.infrequent));
    }

    #[test]
    fn spmf_example_has_one_maximal_itemset() {
        let data = vec![
            vec![1, 3, 4],
            vec![2, 3, 5],
            vec![1, 2, 3, 5],
            vec![2, 5],
            vec![1, 2, 3, 5],
        ];
        let (encoder, matrix) = encode(&data, 0.3);
        let maximal = mine_maximal(&matrix, 0.3).unwrap();

        let itemsets: Vec<Vec<u32>> = decode_itemsets(&encoder, maximal.iter())
            .into_iter()
            .map(|itemset| itemset.into_iter().sorted().collect())
            .collect();
        assert_eq!(itemsets, vec![vec![1, 2, 3, 5]]);
    }

    #[test]
    fn each_call_starts_from_empty_state() {
        let (_, matrix) = encode(&mafia_paper(), 0.2);
        let first = mine_maximal(&matrix, 0.2).unwrap();
        let second = mine_maximal(&matrix, 0.2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_matrix_is_rejected() {
        let matrix = BitMatrix::zeros(0, 3);
        assert!(matches!(mine_maximal(&matrix, 0.1), Err(Error::EmptyDataset)));
        let matrix = BitMatrix::zeros(2, 2);
        assert!(matches!(
            mine_maximal(&matrix, 2.0),
            Err(Error::ThresholdOutOfRange(_))
        ));
    }

    #[test]
    fn head_with_only_pruned_extensions_is_not_maximal() {
        let mut data = vec![vec![30, 10, 20]; 4];
        data.push(vec![10, 20, 40]);
        let (encoder, matrix) = encode(&data, 0.2);
        let outcome = MaximalSearch::new(&matrix, 0.2).unwrap().run().unwrap();

        // {10, 20} + 30 is pruned by the already known {30, 10, 20}, {10, 20, 40} is infrequent
        assert_eq!(outcome.maximal, hashset! { vec![0, 1, 2] });
        assert!(outcome.frequent.contains(&vec![1, 2]));
        assert!(outcome.infrequent.contains(&vec![1, 2, 3]));
        assert_eq!(decoded(&encoder, &outcome.maximal), hashset! { vec![30, 10, 20] });
        assert_maximal(&matrix, &outcome.maximal, 0.2);
    }

    #[test]
    fn revisited_maximal_head_is_not_also_frequent() {
        let (_, matrix) = encode(&vec![vec![1, 2]; 3], 0.2);
        let outcome = MaximalSearch::new(&matrix, 0.2).unwrap().run().unwrap();

        assert_eq!(outcome.maximal, hashset! { vec![0, 1] });
        assert!(outcome.maximal.is_disjoint(&outcome.frequent));
        assert!(outcome.maximal.is_disjoint(&outcome.infrequent));

        for min_support in &[0.05, 0.2] {
            let (_, matrix) = encode(&mafia_paper(), *min_support);
            let outcome = MaximalSearch::new(&matrix, *min_support).unwrap().run().unwrap();
            assert!(outcome.maximal.is_disjoint(&outcome.frequent));
        }
    }
}
