//! Aggregation engine: priced transactions, monthly rewards, total rewards

use std::collections::HashMap;
use std::hash::Hash;

use rewardweb_config::TotalsMode;
use rewardweb_source::{CustomerId, Transaction};

use crate::error::CoreError;
use crate::models::{MonthlyReward, PricedTransaction, RewardsData, TotalReward};
use crate::points::calculate_points;
use crate::time::{parse_purchase_date, Periodic, YearMonth};

/// Result of pricing a batch of raw transactions
#[derive(Debug, Default)]
pub struct Ingested {
    pub priced: Vec<PricedTransaction>,
    /// Records with a date that could not be read, in input order
    pub rejected: Vec<CoreError>,
}

/// Price every transaction, setting aside those without a readable date
pub fn ingest(transactions: &[Transaction]) -> Ingested {
    let mut ingested = Ingested::default();

    for txn in transactions {
        match parse_purchase_date(&txn.date) {
            Some((day, timestamp)) => ingested.priced.push(PricedTransaction {
                points: calculate_points(txn.amount),
                transaction: txn.clone(),
                day,
                timestamp,
            }),
            None => ingested.rejected.push(CoreError::MalformedRecord {
                id: txn.id.clone(),
                reason: format!("unreadable date '{}'", txn.date),
            }),
        }
    }

    ingested
}

/// Price and group `transactions`, skipping records with unreadable dates
pub fn aggregate(transactions: &[Transaction]) -> RewardsData {
    let ingested = ingest(transactions);
    for rejected in &ingested.rejected {
        log::warn!("Skipping transaction: {}", rejected);
    }
    RewardsData::from_priced(ingested.priced)
}

impl RewardsData {
    pub fn from_priced(transactions: Vec<PricedTransaction>) -> Self {
        let monthly = monthly_rewards(&transactions);
        let totals = all_time_totals(&transactions);
        Self {
            transactions,
            monthly,
            totals,
        }
    }

    /// Totals under `mode`, given the monthly rows that survived filtering
    pub fn totals_for(&self, mode: TotalsMode, filtered_monthly: &[MonthlyReward]) -> Vec<TotalReward> {
        match mode {
            TotalsMode::AllTime => self.totals.clone(),
            TotalsMode::FilteredWindow => filtered_window_totals(filtered_monthly),
        }
    }
}

/// Groups rows by key, keeping the first-seen order of keys
struct Grouper<K, V> {
    index: HashMap<K, usize>,
    rows: Vec<V>,
}

impl<K: Eq + Hash, V> Grouper<K, V> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            rows: Vec::new(),
        }
    }

    fn entry(&mut self, key: K, init: impl FnOnce() -> V) -> &mut V {
        let next = self.rows.len();
        let slot = *self.index.entry(key).or_insert(next);
        if slot == next {
            self.rows.push(init());
        }
        &mut self.rows[slot]
    }

    fn into_rows(self) -> Vec<V> {
        self.rows
    }
}

/// One row per (customer, month, year) in first-occurrence order
pub fn monthly_rewards(transactions: &[PricedTransaction]) -> Vec<MonthlyReward> {
    let mut groups: Grouper<(CustomerId, YearMonth), MonthlyReward> = Grouper::new();

    for txn in transactions {
        let period = txn.period();
        let row = groups.entry((txn.customer_id().clone(), period), || MonthlyReward {
            customer_id: txn.customer_id().clone(),
            customer_name: txn.transaction.customer_name.clone(),
            month: period.month,
            year: period.year,
            reward_points: 0,
        });
        row.reward_points = row.reward_points.saturating_add(txn.points);
    }

    groups.into_rows()
}

/// One row per customer over every priced transaction
pub fn all_time_totals(transactions: &[PricedTransaction]) -> Vec<TotalReward> {
    let mut groups: Grouper<CustomerId, TotalReward> = Grouper::new();

    for txn in transactions {
        let row = groups.entry(txn.customer_id().clone(), || TotalReward {
            customer_id: txn.customer_id().clone(),
            customer_name: txn.transaction.customer_name.clone(),
            reward_points: 0,
        });
        row.reward_points = row.reward_points.saturating_add(txn.points);
    }

    groups.into_rows()
}

/// One row per customer, re-summed from already filtered monthly rows
pub fn filtered_window_totals(monthly: &[MonthlyReward]) -> Vec<TotalReward> {
    let mut groups: Grouper<CustomerId, TotalReward> = Grouper::new();

    for reward in monthly {
        let row = groups.entry(reward.customer_id.clone(), || TotalReward {
            customer_id: reward.customer_id.clone(),
            customer_name: reward.customer_name.clone(),
            reward_points: 0,
        });
        row.reward_points = row.reward_points.saturating_add(reward.reward_points);
    }

    groups.into_rows()
}
