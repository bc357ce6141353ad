use serde::Serialize;

use super::criteria::Pagination;

/// One page of results plus the total across all pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    #[serde(flatten)]
    pub pagination: Pagination,
    pub total_pages: u64,
}

impl<T> PagedResult<T> {
    /// Combine a page of rows with the total from the count query
    pub fn assemble(items: Vec<T>, total: u64, pagination: Pagination) -> Self {
        Self {
            items,
            total,
            pagination,
            total_pages: total.div_ceil(pagination.size()),
        }
    }

    pub fn has_next(&self) -> bool {
        self.pagination.page() < self.total_pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            pagination: self.pagination,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn total_pages_rounds_up() {
        let page = PagedResult::assemble(vec![1, 2, 3], 21, Pagination::new(1, 10).unwrap());
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());

        let last = PagedResult::assemble(vec![21], 21, Pagination::new(3, 10).unwrap());
        assert!(!last.has_next());
    }

    #[test]
    fn empty_result_has_no_pages() {
        let page: PagedResult<u8> = PagedResult::assemble(vec![], 0, Pagination::new(1, 5).unwrap());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
    }

    #[test]
    fn serializes_pagination_inline() {
        let page = PagedResult::assemble(vec!["a"], 3, Pagination::new(2, 1).unwrap());
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            serde_json::json!({
                "items": ["a"],
                "total": 3,
                "page": 2,
                "size": 1,
                "totalPages": 3
            })
        );
    }

    #[test]
    fn map_keeps_metadata() {
        let page = PagedResult::assemble(vec![1, 2], 4, Pagination::new(1, 2).unwrap());
        let doubled = page.map(|n| n * 2);
        assert_eq!(doubled.items, vec![2, 4]);
        assert_eq!(doubled.total, 4);
        assert_eq!(doubled.total_pages, 2);
    }
}
