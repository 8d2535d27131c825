//! List helpers.

/// Return a new vector with the elements of `list` in reverse order.
///
/// Product listings arrive oldest first; the storefront shows them newest
/// first by reversing the backend order.
///
/// ```
/// use buy01_core::reverse_list;
///
/// assert_eq!(reverse_list(&[1, 2, 3, 4, 5]), vec![5, 4, 3, 2, 1]);
/// assert!(reverse_list::<u8>(&[]).is_empty());
/// ```
#[must_use]
pub fn reverse_list<T: Clone>(list: &[T]) -> Vec<T> {
    list.iter().rev().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_numbers() {
        assert_eq!(reverse_list(&[1, 2, 3, 4, 5]), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_reverse_empty() {
        let empty: [i32; 0] = [];
        assert_eq!(reverse_list(&empty), Vec::<i32>::new());
    }

    #[test]
    fn test_reverse_single_and_duplicates() {
        assert_eq!(reverse_list(&["a"]), vec!["a"]);
        assert_eq!(reverse_list(&[1, 2, 1, 3]), vec![3, 1, 2, 1]);
    }

    #[test]
    fn test_reverse_leaves_input_untouched() {
        let input = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let reversed = reverse_list(&input);
        assert_eq!(reversed, vec!["c", "b", "a"]);
        assert_eq!(input, vec!["a", "b", "c"]);
    }
}
