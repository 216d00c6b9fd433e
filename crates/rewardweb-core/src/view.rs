//! Per-table view state

use serde::Serialize;

use crate::models::Named;
use crate::pipeline::{filter_by_name, page_count, paginate, sort_rows, SortState, Sortable};
use crate::types::{MonthlyField, SortField, TotalField, TransactionField};

/// Filter, sort and page of one table. Tables never share state.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState<F> {
    name_filter: String,
    sort: SortState<F>,
    page: usize,
    page_size: usize,
}

impl<F: SortField> TableState<F> {
    pub fn new(sort: SortState<F>, page_size: usize) -> Self {
        Self {
            name_filter: String::new(),
            sort,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn name_filter(&self) -> &str {
        &self.name_filter
    }

    pub fn sort(&self) -> SortState<F> {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Changing the filter text always returns to page 1
    pub fn set_name_filter(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.name_filter {
            self.name_filter = query;
            self.page = 1;
        }
    }

    /// Header click on `field`
    pub fn sort_by(&mut self, field: F) {
        self.sort = self.sort.toggle(field);
    }

    pub fn set_sort(&mut self, sort: SortState<F>) {
        self.sort = sort;
    }

    /// Move to `target`; returns false and stays put when out of range
    pub fn go_to_page(&mut self, target: usize, total_pages: usize) -> bool {
        if target >= 1 && target <= total_pages {
            self.page = target;
            true
        } else {
            false
        }
    }

    /// Run name filter, sort and page slice over `rows`
    pub fn apply<T>(&self, rows: &[T]) -> TableView<T>
    where
        T: Named + Sortable<Field = F> + Clone,
    {
        let mut filtered = filter_by_name(rows, &self.name_filter);
        sort_rows(&mut filtered, self.sort);

        let total_pages = page_count(filtered.len(), self.page_size);
        let current_page = self.page.min(total_pages).max(1);

        TableView {
            rows: paginate(&filtered, current_page, self.page_size),
            total_items: filtered.len(),
            current_page,
            total_pages,
            page_size: self.page_size,
        }
    }
}

impl TableState<TransactionField> {
    /// Newest purchases first
    pub fn transactions(page_size: usize) -> Self {
        Self::new(SortState::desc(TransactionField::Date), page_size)
    }
}

impl TableState<MonthlyField> {
    pub fn monthly(page_size: usize) -> Self {
        Self::new(SortState::asc(MonthlyField::CustomerName), page_size)
    }
}

impl TableState<TotalField> {
    pub fn totals(page_size: usize) -> Self {
        Self::new(SortState::asc(TotalField::CustomerName), page_size)
    }
}

/// One rendered page of a table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView<T> {
    pub rows: Vec<T>,
    pub total_items: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
}

impl<T> TableView<T> {
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    /// Pager is hidden with a single page or less
    pub fn has_pager(&self) -> bool {
        self.total_pages > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthlyReward;
    use crate::types::SortDirection;
    use rewardweb_source::CustomerId;

    fn six_monthly_rows() -> Vec<MonthlyReward> {
        (1..=6)
            .map(|i| MonthlyReward {
                customer_id: CustomerId::Number(i),
                customer_name: format!("Customer {}", i),
                month: 1,
                year: 2024,
                reward_points: i as u64 * 10,
            })
            .collect()
    }

    #[test]
    fn test_six_rows_two_pages() {
        let rows = six_monthly_rows();
        let mut state = TableState::monthly(5);

        let first = state.apply(&rows);
        assert_eq!(first.rows.len(), 5);
        assert_eq!((first.current_page, first.total_pages), (1, 2));
        assert!(first.has_pager());

        assert!(state.go_to_page(2, first.total_pages));
        let second = state.apply(&rows);
        assert_eq!(second.rows.len(), 1);
        assert_eq!(second.rows[0].customer_name, "Customer 6");
    }

    #[test]
    fn test_out_of_range_page_is_rejected() {
        let rows = six_monthly_rows();
        let mut state = TableState::monthly(5);
        let total = state.apply(&rows).total_pages;

        assert!(!state.go_to_page(0, total));
        assert!(!state.go_to_page(3, total));
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let rows = six_monthly_rows();
        let mut state = TableState::monthly(5);
        state.go_to_page(2, 2);

        state.set_name_filter("customer");
        assert_eq!(state.page(), 1);

        state.go_to_page(2, 2);
        state.set_name_filter("customer");
        assert_eq!(state.page(), 2, "same filter text keeps the page");

        state.set_name_filter("customer 3");
        let view = state.apply(&rows);
        assert_eq!(view.total_items, 1);
        assert!(!view.has_pager());
    }

    #[test]
    fn test_sort_header_clicks() {
        let rows = six_monthly_rows();
        let mut state = TableState::monthly(5);

        state.sort_by(MonthlyField::RewardPoints);
        assert_eq!(state.sort().direction, SortDirection::Asc);
        state.sort_by(MonthlyField::RewardPoints);
        assert_eq!(state.sort().direction, SortDirection::Desc);

        let view = state.apply(&rows);
        assert_eq!(view.rows[0].reward_points, 60);
    }

    #[test]
    fn test_empty_dataset() {
        let state = TableState::totals(5);
        let view = state.apply::<crate::models::TotalReward>(&[]);
        assert!(view.is_empty());
        assert_eq!(view.current_page, 1);
        assert_eq!(view.total_pages, 0);
        assert!(!view.has_pager());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            TableState::transactions(5).sort(),
            SortState::desc(TransactionField::Date)
        );
        assert_eq!(
            TableState::totals(5).sort(),
            SortState::asc(TotalField::CustomerName)
        );
        assert_eq!(TableState::totals(0).page_size(), 1);
    }
}
