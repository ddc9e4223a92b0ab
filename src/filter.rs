//! Predicate-based filtering over sequences.
//!
//! An empty result is a normal outcome here, unlike the statistics in
//! [`crate::stats`] which refuse to aggregate nothing.

/// Keep the elements for which `predicate` holds, in their original order.
pub fn filter<T, P>(predicate: P, values: &[T]) -> Vec<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    values.iter().filter(|v| predicate(v)).cloned().collect()
}

/// True for odd integers, including negative ones.
pub fn is_odd(n: &i64) -> bool {
    n % 2 != 0
}

/// True for even integers.
pub fn is_even(n: &i64) -> bool {
    n % 2 == 0
}

/// Predicate for an inclusive range; a missing bound is unbounded.
pub fn in_range(min: Option<i64>, max: Option<i64>) -> impl Fn(&i64) -> bool {
    move |n| min.map_or(true, |lo| *n >= lo) && max.map_or(true, |hi| *n <= hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_odd_preserves_order() {
        let values: Vec<i64> = (1..=8).collect();
        assert_eq!(filter(is_odd, &values), vec![1, 3, 5, 7]);
        // Source is untouched
        assert_eq!(values.len(), 8);
    }

    #[test]
    fn test_filter_empty_results() {
        let none: Vec<i64> = filter(|_| false, &[1i64, 2, 3]);
        assert!(none.is_empty());

        let empty: [i64; 0] = [];
        assert!(filter(is_even, &empty).is_empty());
    }

    #[test]
    fn test_filter_keeps_duplicates() {
        assert_eq!(filter(is_even, &[4, 1, 4, 2, 4]), vec![4, 4, 2, 4]);
    }

    #[test]
    fn test_filter_generic_elements() {
        let words = vec!["apple".to_string(), "fig".to_string(), "banana".to_string()];
        let long = filter(|w: &String| w.len() > 3, &words);
        assert_eq!(long, vec!["apple", "banana"]);
    }

    #[test]
    fn test_parity_with_negatives() {
        assert!(is_odd(&-3));
        assert!(!is_odd(&-4));
        assert!(is_even(&-4));
        assert!(is_even(&0));
    }

    #[test]
    fn test_in_range() {
        let values: Vec<i64> = (-2..=6).collect();

        assert_eq!(filter(in_range(Some(0), Some(3)), &values), vec![0, 1, 2, 3]);
        assert_eq!(filter(in_range(Some(5), None), &values), vec![5, 6]);
        assert_eq!(filter(in_range(None, Some(-1)), &values), vec![-2, -1]);
        assert_eq!(filter(in_range(None, None), &values), values);
    }
}
