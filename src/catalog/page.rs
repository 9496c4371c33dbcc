//! Offset/limit paging over an ordered sequence

use serde::{Deserialize, Serialize};

/// One window over an ordered result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Size of the whole result set, independent of the window
    pub count: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub results: Vec<T>,
}

/// Slice `items[offset..offset + limit]`, clamped to the sequence bounds.
pub fn paginate<T: Clone>(items: &[T], limit: usize, offset: usize) -> Page<T> {
    let count = items.len();
    let end = offset.saturating_add(limit).min(count);
    let results = if offset < count {
        items[offset..end].to_vec()
    } else {
        Vec::new()
    };

    Page {
        count,
        has_next: offset.saturating_add(limit) < count,
        has_previous: offset > 0,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_window() {
        let items = vec!["a", "b", "c", "d", "e"];
        let page = paginate(&items, 2, 1);

        assert_eq!(page.results, vec!["b", "c"]);
        assert_eq!(page.count, 5);
        assert!(page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn test_offset_past_end() {
        let items = vec![1, 2, 3];
        let page = paginate(&items, 10, 7);

        assert!(page.results.is_empty());
        assert_eq!(page.count, 3);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn test_zero_limit() {
        let items = vec![1, 2, 3];
        let page = paginate(&items, 0, 0);

        assert!(page.results.is_empty());
        assert!(page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn test_huge_limit_does_not_overflow() {
        let items = vec![1, 2, 3];
        let page = paginate(&items, usize::MAX, 1);

        assert_eq!(page.results, vec![2, 3]);
        assert!(!page.has_next);
    }

    #[test]
    fn test_window_invariants() {
        let items: Vec<usize> = (0..13).collect();
        for offset in 0..16 {
            for limit in 0..16 {
                let page = paginate(&items, limit, offset);
                let expected_len = limit.min(items.len().saturating_sub(offset));
                assert_eq!(page.results.len(), expected_len, "offset={offset} limit={limit}");
                assert_eq!(page.has_next, offset + limit < items.len());
                assert_eq!(page.has_previous, offset > 0);
                assert_eq!(page.count, items.len());
                if let Some(first) = page.results.first() {
                    assert_eq!(*first, offset);
                }
            }
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let page = paginate(&["x"], 1, 0);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["hasNext"], false);
        assert_eq!(json["hasPrevious"], false);
        assert_eq!(json["results"][0], "x");
    }
}
