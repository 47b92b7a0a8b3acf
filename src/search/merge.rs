//! Round-robin interleaving of per-provider result lists

use std::vec::IntoIter;

/// Interleave `lists` by position.
///
/// Position 0 of every list is emitted, in list order, before position 1 of
/// any list, and so on. Exhausted lists drop out; nothing is deduplicated.
pub fn round_robin<T>(lists: Vec<Vec<T>>) -> Vec<T> {
    let total = lists.iter().map(Vec::len).sum();
    let mut merged = Vec::with_capacity(total);

    // One cursor per source list
    let mut cursors: Vec<IntoIter<T>> = lists
        .into_iter()
        .filter(|list| !list.is_empty())
        .map(Vec::into_iter)
        .collect();

    while !cursors.is_empty() {
        merged.extend(cursors.iter_mut().filter_map(|cursor| cursor.next()));
        cursors.retain(|cursor| !cursor.as_slice().is_empty());
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fair_interleave() {
        let a = vec!["a0", "a1", "a2"];
        let b = vec!["b0"];
        let c: Vec<&str> = vec![];
        assert_eq!(round_robin(vec![a, b, c]), vec!["a0", "b0", "a1", "a2"]);
    }

    #[test]
    fn test_configured_order_wins() {
        let merged = round_robin(vec![vec![1, 3, 5], vec![2, 4, 6, 8, 10]]);
        assert_eq!(merged, vec![1, 2, 3, 4, 5, 6, 8, 10]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(round_robin::<u8>(vec![]).is_empty());
        assert!(round_robin::<u8>(vec![vec![], vec![]]).is_empty());
    }

    #[test]
    fn test_single_list_passes_through() {
        assert_eq!(round_robin(vec![vec!['x', 'y', 'z']]), vec!['x', 'y', 'z']);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let merged = round_robin(vec![vec!["same"], vec!["same"]]);
        assert_eq!(merged, vec!["same", "same"]);
    }
}
