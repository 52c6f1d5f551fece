/// Splits `items` into exactly `ntasks` contiguous chunks whose sizes differ by at most one.
///
/// The first `items.len() % ntasks` chunks get the extra element. When there are more
/// tasks than items the trailing chunks are empty.
pub fn chunks<T>(items: &[T], ntasks: usize) -> Vec<&[T]> {
    let ntasks = ntasks.max(1);
    let base = items.len() / ntasks;
    let extra = items.len() % ntasks;

    let mut result = Vec::with_capacity(ntasks);
    let mut start = 0;
    for k in 0..ntasks {
        let size = base + usize::from(k < extra);
        result.push(&items[start..start + size]);
        start += size;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(n: usize, ntasks: usize) -> Vec<usize> {
        let items: Vec<usize> = (0..n).collect();
        chunks(&items, ntasks).iter().map(|c| c.len()).collect()
    }

    #[test]
    fn even_split_gives_equal_chunks() {
        assert_eq!(sizes(12, 4), vec![3, 3, 3, 3]);
    }

    #[test]
    fn remainder_goes_to_leading_chunks() {
        assert_eq!(sizes(10, 4), vec![3, 3, 2, 2]);
    }

    #[test]
    fn more_tasks_than_items_yields_empty_trailing_chunks() {
        assert_eq!(sizes(2, 5), vec![1, 1, 0, 0, 0]);
    }

    #[test]
    fn empty_input_yields_empty_chunks() {
        assert_eq!(sizes(0, 3), vec![0, 0, 0]);
    }

    #[test]
    fn chunks_cover_items_in_order_without_overlap() {
        let items: Vec<usize> = (0..17).collect();
        for ntasks in 1..=20 {
            let parts = chunks(&items, ntasks);
            assert_eq!(parts.len(), ntasks);
            let joined: Vec<usize> = parts.concat();
            assert_eq!(joined, items);
            let max = parts.iter().map(|c| c.len()).max().unwrap();
            let min = parts.iter().map(|c| c.len()).min().unwrap();
            assert!(max - min <= 1);
        }
    }
}
