//! Filter, sort and paginate
//!
//! Every table runs the same fixed sequence over its dataset:
//! name filter, date-range filter, sort, then page slice.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{MonthlyReward, Named, PricedTransaction, TotalReward};
use crate::time::{DateRange, Periodic};
use crate::types::{MonthlyField, SortDirection, SortField, TotalField, TransactionField};

// ==================== Filtering ====================

/// Records whose customer name contains `query`, ignoring case.
///
/// The query is matched as given; callers trim user input first.
pub fn filter_by_name<T: Named + Clone>(rows: &[T], query: &str) -> Vec<T> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| row.customer_name().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Records whose month lies inside `range`
pub fn filter_by_period<T: Periodic + Clone>(rows: &[T], range: &DateRange) -> Vec<T> {
    if !range.is_active() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| range.contains(row.period()))
        .cloned()
        .collect()
}

// ==================== Sorting ====================

/// Records with a field-typed ordering per column
pub trait Sortable {
    type Field: SortField;
    fn compare_by(&self, other: &Self, field: Self::Field) -> Ordering;
}

impl Sortable for PricedTransaction {
    type Field = TransactionField;

    fn compare_by(&self, other: &Self, field: TransactionField) -> Ordering {
        match field {
            TransactionField::Id => self.id().cmp(other.id()),
            TransactionField::CustomerName => self.customer_name().cmp(other.customer_name()),
            TransactionField::Date => self.timestamp.cmp(&other.timestamp),
            TransactionField::Product => self.transaction.product.cmp(&other.transaction.product),
            TransactionField::Amount => self.amount().total_cmp(&other.amount()),
            TransactionField::Points => self.points.cmp(&other.points),
        }
    }
}

impl Sortable for MonthlyReward {
    type Field = MonthlyField;

    fn compare_by(&self, other: &Self, field: MonthlyField) -> Ordering {
        match field {
            MonthlyField::CustomerId => self.customer_id.cmp(&other.customer_id),
            MonthlyField::CustomerName => self.customer_name.cmp(&other.customer_name),
            MonthlyField::Period => self.period().cmp(&other.period()),
            MonthlyField::RewardPoints => self.reward_points.cmp(&other.reward_points),
        }
    }
}

impl Sortable for TotalReward {
    type Field = TotalField;

    fn compare_by(&self, other: &Self, field: TotalField) -> Ordering {
        match field {
            TotalField::CustomerId => self.customer_id.cmp(&other.customer_id),
            TotalField::CustomerName => self.customer_name.cmp(&other.customer_name),
            TotalField::RewardPoints => self.reward_points.cmp(&other.reward_points),
        }
    }
}

/// Active sort column and direction of one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: SortField> SortState<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: F) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: F) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Header click: same column flips, a new column starts ascending
    pub fn toggle(self, field: F) -> Self {
        if self.field == field {
            Self::new(field, self.direction.flip())
        } else {
            Self::asc(field)
        }
    }
}

/// Stable sort; equal keys keep their relative order in both directions
pub fn sort_rows<T: Sortable>(rows: &mut [T], sort: SortState<T::Field>) {
    rows.sort_by(|a, b| {
        let ordering = a.compare_by(b, sort.field);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Named orderings offered by the transactions sort bar
pub fn transaction_preset(name: &str) -> Option<SortState<TransactionField>> {
    let (field, direction) = name.split_once('-')?;
    let field = match field {
        "date" => TransactionField::Date,
        "amount" => TransactionField::Amount,
        "points" => TransactionField::Points,
        _ => return None,
    };
    Some(SortState::new(field, direction.parse().ok()?))
}

/// Preset names accepted by [`transaction_preset`]
pub const TRANSACTION_PRESETS: [&str; 6] = [
    "date-desc",
    "date-asc",
    "amount-desc",
    "amount-asc",
    "points-desc",
    "points-asc",
];

// ==================== Pagination ====================

/// Number of pages needed for `total` rows
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Rows `[(page-1)*size, page*size)`; empty when out of range
pub fn paginate<T: Clone>(rows: &[T], page: usize, page_size: usize) -> Vec<T> {
    if page == 0 || page_size == 0 {
        return Vec::new();
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= rows.len() {
        return Vec::new();
    }
    let end = start.saturating_add(page_size).min(rows.len());
    rows[start..end].to_vec()
}

/// Page numbers shown by the pager, centred on `current` and clamped
pub fn page_window(current: usize, total_pages: usize, max_visible: usize) -> Vec<usize> {
    if total_pages == 0 || max_visible == 0 {
        return Vec::new();
    }
    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let mut end = start + max_visible - 1;

    if end > total_pages {
        end = total_pages;
        start = end.saturating_sub(max_visible - 1).max(1);
    }

    (start..=end).collect()
}
