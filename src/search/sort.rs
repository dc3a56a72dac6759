//! Sort stage: stable ordering of the filtered indices.

use crate::normalize::sort_key;
use crate::types::{ImageRecord, SortField};

/// Order filtered indices by the given field and direction.
///
/// With no sort field the filtered order is returned unchanged. Absent keys
/// (a missing field, or a record with no `firstyear` under date sort) order
/// lowest. The sort is stable in both directions: the descending comparator
/// reverses non-equal keys only, so ties keep their filtered order.
#[must_use]
pub fn sort_indices(
    corpus: &[ImageRecord],
    indices: Vec<usize>,
    field: Option<SortField>,
    ascending: bool,
) -> Vec<usize> {
    match field {
        None => indices,
        Some(SortField::Date) => order_by(indices, ascending, |index| corpus[index].firstyear),
        Some(SortField::Title) => order_by(indices, ascending, |index| {
            corpus[index].title.as_deref().map(sort_key)
        }),
        Some(SortField::Creator) => order_by(indices, ascending, |index| {
            corpus[index].creator.as_deref().map(sort_key)
        }),
    }
}

fn order_by<K, F>(indices: Vec<usize>, ascending: bool, key_for: F) -> Vec<usize>
where
    K: Ord,
    F: Fn(usize) -> K,
{
    let mut decorated: Vec<(K, usize)> = indices
        .into_iter()
        .map(|index| (key_for(index), index))
        .collect();
    if ascending {
        decorated.sort_by(|a, b| a.0.cmp(&b.0));
    } else {
        decorated.sort_by(|a, b| b.0.cmp(&a.0));
    }
    decorated.into_iter().map(|(_, index)| index).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageRecord;

    fn corpus() -> Vec<ImageRecord> {
        vec![
            ImageRecord::new("0").with_title("Rua Direita").with_years(1890, 1890),
            ImageRecord::new("1").with_title("Aqueduto da Carioca").with_years(1790, 1790),
            ImageRecord::new("2").with_title("Rua Direita").with_years(1860, 1860),
            ImageRecord::new("3"),
        ]
    }

    #[test]
    fn no_field_preserves_filtered_order() {
        let corpus = corpus();
        assert_eq!(
            sort_indices(&corpus, vec![2, 0, 1], None, true),
            vec![2, 0, 1]
        );
    }

    #[test]
    fn date_sort_orders_by_firstyear_with_absent_first() {
        let corpus = corpus();
        let sorted = sort_indices(&corpus, vec![0, 1, 2, 3], Some(SortField::Date), true);
        assert_eq!(sorted, vec![3, 1, 2, 0]);
    }

    #[test]
    fn descending_reverses_only_the_keys() {
        let corpus = corpus();
        let sorted = sort_indices(&corpus, vec![0, 1, 2, 3], Some(SortField::Date), false);
        assert_eq!(sorted, vec![0, 2, 1, 3]);
    }

    #[test]
    fn equal_keys_keep_their_filtered_order() {
        let corpus = corpus();
        // Records 0 and 2 share the title "Rua Direita".
        let ascending = sort_indices(&corpus, vec![0, 1, 2], Some(SortField::Title), true);
        assert_eq!(ascending, vec![1, 0, 2]);

        let descending = sort_indices(&corpus, vec![0, 1, 2], Some(SortField::Title), false);
        assert_eq!(descending, vec![0, 2, 1], "ties stay stable when descending");
    }

    #[test]
    fn title_keys_ignore_punctuation_and_accents() {
        let a = ImageRecord::new("0").with_title("Praça; XV");
        let b = ImageRecord::new("1").with_title("Praca XV");
        let c = ImageRecord::new("2").with_title("Arcos");
        let corpus = vec![a, b, c];

        let sorted = sort_indices(&corpus, vec![0, 1, 2], Some(SortField::Title), true);
        // The two Praça spellings fold to the same key and stay in order.
        assert_eq!(sorted, vec![2, 0, 1]);
    }
}
