use std::ops::RangeInclusive;

use shared::inquiry::SearchInquiry;

pub fn page_count(total: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(u64::from(limit))
}

/// Pager state for a non-empty result set. An empty result renders the
/// placeholder instead, so there is no view for `total == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerView {
    pub current: u32,
    pub page_count: u64,
    pub total: u64,
}

impl PagerView {
    pub fn derive(inquiry: &SearchInquiry, total: u64) -> Option<Self> {
        if total == 0 {
            return None;
        }
        Some(Self {
            current: inquiry.page,
            page_count: page_count(total, inquiry.limit),
            total,
        })
    }

    pub fn pages(&self) -> RangeInclusive<u64> {
        1..=self.page_count
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.current) < self.page_count
    }

    pub fn caption(&self) -> String {
        match self.total {
            1 => "1 result".to_string(),
            total => format!("{total} results"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::Direction;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(17, 8), 3);
        assert_eq!(page_count(16, 8), 2);
        assert_eq!(page_count(1, 9), 1);
        assert_eq!(page_count(0, 8), 0);
        assert_eq!(page_count(5, 0), 0);
    }

    #[test]
    fn empty_result_hides_pager() {
        let inquiry = SearchInquiry::new(8);
        assert_eq!(PagerView::derive(&inquiry, 0), None);
    }

    #[test]
    fn pager_reports_neighbours_and_caption() {
        let mut inquiry = SearchInquiry::new(8).sorted_by("createdAt", Direction::Desc);
        inquiry.page = 3;
        let pager = PagerView::derive(&inquiry, 17).expect("pager");
        assert_eq!(pager.pages(), 1..=3);
        assert!(pager.has_previous());
        assert!(!pager.has_next());
        assert_eq!(pager.caption(), "17 results");

        inquiry.page = 1;
        let pager = PagerView::derive(&inquiry, 1).expect("pager");
        assert!(!pager.has_previous());
        assert!(!pager.has_next());
        assert_eq!(pager.caption(), "1 result");
    }
}
