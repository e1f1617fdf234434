//! Splitting an ordered dataset into fixed-capacity layers

use crate::error::{Result, StackError};

/// Split `records` into consecutive groups of at most `capacity`, in input
/// order. Only the last group may be short.
pub fn partition<T>(records: &[T], capacity: usize) -> Result<Vec<&[T]>> {
    if capacity == 0 {
        return Err(StackError::InvalidCapacity(capacity));
    }
    Ok(records.chunks(capacity).collect())
}

/// Number of layers `count` records fill
pub fn layer_count(count: usize, capacity: usize) -> Result<usize> {
    if capacity == 0 {
        return Err(StackError::InvalidCapacity(capacity));
    }
    Ok(count.div_ceil(capacity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seven_records_make_three_layers() {
        let records: Vec<u32> = (1..=7).collect();
        let layers = partition(&records, 3).unwrap();
        let sizes: Vec<usize> = layers.iter().map(|l| l.len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        assert_eq!(layers[2], &[7][..]);
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<u32> = Vec::new();
        assert!(partition(&records, 3).unwrap().is_empty());
        assert_eq!(layer_count(0, 3).unwrap(), 0);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let records = [1, 2, 3];
        assert!(matches!(
            partition(&records, 0),
            Err(StackError::InvalidCapacity(0))
        ));
        assert!(layer_count(3, 0).is_err());
    }

    proptest! {
        #[test]
        fn prop_layers_cover_input_in_order(n in 0usize..200, capacity in 1usize..8) {
            let records: Vec<usize> = (0..n).collect();
            let layers = partition(&records, capacity).unwrap();

            prop_assert_eq!(layers.len(), n.div_ceil(capacity));
            prop_assert_eq!(layers.len(), layer_count(n, capacity).unwrap());
            prop_assert_eq!(layers.iter().map(|l| l.len()).sum::<usize>(), n);
            prop_assert!(layers.iter().all(|l| !l.is_empty() && l.len() <= capacity));

            let flattened: Vec<usize> = layers.concat();
            prop_assert_eq!(flattened, records);
        }
    }
}
