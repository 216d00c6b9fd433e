//! Reward records derived from raw transactions

use chrono::{NaiveDate, NaiveDateTime};
use rewardweb_source::{CustomerId, Transaction};
use serde::Serialize;

use crate::time::{Periodic, YearMonth};

/// A transaction with the points it earned
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub points: u64,
    /// Calendar day as written by the source
    #[serde(skip)]
    pub day: NaiveDate,
    /// Instant used when ordering by date
    #[serde(skip)]
    pub timestamp: NaiveDateTime,
}

impl PricedTransaction {
    pub fn id(&self) -> &str {
        &self.transaction.id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.transaction.customer_id
    }

    pub fn amount(&self) -> f64 {
        self.transaction.amount
    }
}

/// Points earned by one customer in one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReward {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub month: u32,
    pub year: i32,
    pub reward_points: u64,
}

/// Points earned by one customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalReward {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub reward_points: u64,
}

/// Output of one aggregation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RewardsData {
    pub transactions: Vec<PricedTransaction>,
    pub monthly: Vec<MonthlyReward>,
    pub totals: Vec<TotalReward>,
}

impl RewardsData {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Records that carry a customer name
pub trait Named {
    fn customer_name(&self) -> &str;
}

impl Named for PricedTransaction {
    fn customer_name(&self) -> &str {
        &self.transaction.customer_name
    }
}

impl Named for MonthlyReward {
    fn customer_name(&self) -> &str {
        &self.customer_name
    }
}

impl Named for TotalReward {
    fn customer_name(&self) -> &str {
        &self.customer_name
    }
}

impl Periodic for PricedTransaction {
    fn period(&self) -> YearMonth {
        YearMonth::of(self.day)
    }
}

impl Periodic for MonthlyReward {
    fn period(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }
}
