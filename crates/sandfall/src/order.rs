//! Column visiting order for order-sensitive passes.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, SimError};

/// A permutation of `0..size`, shuffled once and then reused every frame.
/// Walking columns in numeric order would let the leftmost columns collapse
/// first every frame and skew piles to one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOrder {
    columns: Vec<usize>,
}

impl ColumnOrder {
    pub fn shuffled<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut columns: Vec<usize> = (0..size).collect();
        columns.shuffle(rng);
        Self { columns }
    }

    /// Use a caller-provided order.
    ///
    /// # Errors
    /// Returns [`SimError::InvalidColumnOrder`] unless every index in
    /// `0..columns.len()` appears exactly once.
    pub fn from_columns(columns: Vec<usize>) -> Result<Self> {
        let size = columns.len();
        let mut seen = vec![false; size];
        for &col in &columns {
            if col >= size || seen[col] {
                return Err(SimError::InvalidColumnOrder { size });
            }
            seen[col] = true;
        }
        Ok(Self { columns })
    }

    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.columns.shuffle(rng);
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.columns
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn is_permutation(order: &ColumnOrder, size: usize) -> bool {
        let mut sorted = order.as_slice().to_vec();
        sorted.sort_unstable();
        sorted == (0..size).collect::<Vec<_>>()
    }

    #[test]
    fn rejects_duplicates_and_out_of_range() {
        assert_eq!(
            ColumnOrder::from_columns(vec![0, 0, 2]),
            Err(SimError::InvalidColumnOrder { size: 3 })
        );
        assert!(ColumnOrder::from_columns(vec![0, 3, 1]).is_err());
        assert!(ColumnOrder::from_columns(vec![2, 0, 1]).is_ok());
    }

    #[test]
    fn shuffle_is_not_numeric_order() {
        let mut rng = Pcg32::seed_from_u64(7);
        let order = ColumnOrder::shuffled(256, &mut rng);
        assert_ne!(order.as_slice(), (0..256).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn reshuffle_keeps_permutation() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut order = ColumnOrder::shuffled(64, &mut rng);
        order.reshuffle(&mut rng);
        assert!(is_permutation(&order, 64));
    }

    proptest! {
        #[test]
        fn prop_order_is_stable_permutation(size in 1usize..512, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let order = ColumnOrder::shuffled(size, &mut rng);
            prop_assert_eq!(order.len(), size);
            prop_assert!(is_permutation(&order, size));

            let first: Vec<usize> = order.iter().collect();
            let second: Vec<usize> = order.iter().collect();
            prop_assert_eq!(first, second);
        }
    }
}
