//! Core rewards processing and business logic

pub mod aggregate;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod points;
pub mod time;
pub mod types;
pub mod view;

use rewardweb_config::{Config, TotalsMode};
use rewardweb_source::{fetch_transactions, FetchResponse, SourceRef};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

pub use aggregate::{aggregate, all_time_totals, filtered_window_totals, ingest, monthly_rewards};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorSeverity};
pub use models::{MonthlyReward, Named, PricedTransaction, RewardsData, TotalReward};
pub use pipeline::{
    filter_by_name, filter_by_period, page_count, page_window, paginate, sort_rows,
    transaction_preset, SortState, Sortable, TRANSACTION_PRESETS,
};
pub use points::calculate_points;
pub use time::{DateRange, Periodic, YearMonth};
pub use types::{MonthlyField, SortDirection, SortField, TotalField, TransactionField};
pub use view::{TableState, TableView};

use error::{DefaultErrorLogger, ErrorContext, ErrorLogger};

/// Message shown whenever the source reports a failure
pub const FETCH_FAILED: &str = "Failed to fetch data";

/// Store shared between request handlers
pub type SharedStore = Arc<RwLock<RewardsStore>>;

// ==================== Load State ====================

/// Where the store is in its load cycle
#[derive(Debug, Clone)]
pub enum LoadState {
    /// Nothing requested yet
    Idle,
    /// A fetch is outstanding; no data is shown
    Loading,
    Ready(Arc<RewardsData>),
    /// Last fetch failed, with the user-facing message
    Failed(String),
}

impl LoadState {
    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Ready(_) => "ready",
            LoadState::Failed(_) => "error",
        }
    }
}

/// Proof of which load a completion belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Load state as reported over the API
#[derive(Debug, Clone, Serialize)]
pub struct StateSummary {
    pub status: &'static str,
    pub generation: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub transactions: usize,
    pub monthly_rows: usize,
    pub customers: usize,
}

// ==================== Global Filter ====================

/// Filter bar applied before the per-table pipelines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalFilter {
    pub name: String,
    pub range: DateRange,
}

impl GlobalFilter {
    pub fn new(name: impl Into<String>, range: DateRange) -> Self {
        Self {
            name: name.into(),
            range,
        }
    }

    /// Parse raw query input; empty strings are unset
    pub fn parse(name: Option<&str>, from: Option<&str>, to: Option<&str>) -> CoreResult<Self> {
        Ok(Self {
            name: name.unwrap_or_default().trim().to_string(),
            range: DateRange::parse(from, to)?,
        })
    }
}

/// The three datasets after the global filter
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilteredRewards {
    pub transactions: Vec<PricedTransaction>,
    pub monthly: Vec<MonthlyReward>,
    pub totals: Vec<TotalReward>,
}

// ==================== Store ====================

/// Owns the single rewards dataset and its load cycle
pub struct RewardsStore {
    config: Config,
    source: SourceRef,
    state: LoadState,
    generation: u64,
    logger: Box<dyn ErrorLogger>,
}

impl RewardsStore {
    pub fn new(config: Config, source: SourceRef) -> Self {
        Self {
            config,
            source,
            state: LoadState::Idle,
            generation: 0,
            logger: Box::new(DefaultErrorLogger),
        }
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn source(&self) -> SourceRef {
        Arc::clone(&self.source)
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn totals_mode(&self) -> TotalsMode {
        self.config.rewards.totals_mode
    }

    /// Enter the loading state; any earlier ticket becomes stale
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        log::info!("Loading rewards data (generation {})", self.generation);
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Apply a finished fetch.
    ///
    /// Returns `Ok(false)` when the ticket is stale and the response was
    /// dropped. A failed fetch or (in strict mode) a malformed record moves
    /// the store to [`LoadState::Failed`] and is returned as the error.
    pub fn complete(&mut self, ticket: LoadTicket, response: FetchResponse) -> CoreResult<bool> {
        if ticket.generation != self.generation {
            log::debug!(
                "Dropping stale response for generation {} (current {})",
                ticket.generation,
                self.generation
            );
            return Ok(false);
        }

        let context = ErrorContext::new("load").with_generation(ticket.generation);

        if !response.success {
            let error = CoreError::FetchFailure {
                message: FETCH_FAILED.to_string(),
            };
            let context = context.with_data(
                "source_error",
                serde_json::json!(response.error.unwrap_or_default()),
            );
            self.logger.log_error(&error, &context);
            self.state = LoadState::Failed(FETCH_FAILED.to_string());
            return Err(error);
        }

        let ingested = ingest(&response.data);
        if let Some(first) = ingested.rejected.first() {
            if self.config.data.strict {
                self.logger.log_error(first, &context);
                self.state = LoadState::Failed(first.to_string());
                return Err(first.clone());
            }
            for rejected in &ingested.rejected {
                self.logger.log_warning(&format!("Skipping {}", rejected), &context);
            }
        }

        let data = RewardsData::from_priced(ingested.priced);
        log::info!(
            "Rewards data ready: {} transactions, {} monthly rows, {} customers",
            data.transactions.len(),
            data.monthly.len(),
            data.totals.len()
        );
        self.state = LoadState::Ready(Arc::new(data));
        Ok(true)
    }

    /// Fetch from the source and apply the result.
    ///
    /// The lock is released while the fetch is outstanding, so readers see
    /// the loading state and a newer refresh supersedes this one.
    pub async fn refresh(store: &SharedStore) -> CoreResult<bool> {
        let (ticket, source) = Self::begin_refresh(store).await;
        Self::finish_refresh(store, ticket, source).await
    }

    /// First half of [`RewardsStore::refresh`]: the store is in the loading
    /// state once this returns.
    pub async fn begin_refresh(store: &SharedStore) -> (LoadTicket, SourceRef) {
        let mut guard = store.write().await;
        (guard.begin_load(), guard.source())
    }

    /// Second half of [`RewardsStore::refresh`]
    pub async fn finish_refresh(store: &SharedStore, ticket: LoadTicket, source: SourceRef) -> CoreResult<bool> {
        let response = fetch_transactions(source.as_ref()).await;
        store.write().await.complete(ticket, response)
    }

    /// Current dataset, or why there is none
    pub fn data(&self) -> CoreResult<Arc<RewardsData>> {
        match &self.state {
            LoadState::Ready(data) => Ok(Arc::clone(data)),
            LoadState::Idle => Err(CoreError::NotLoaded),
            LoadState::Loading => Err(CoreError::Loading),
            LoadState::Failed(message) => Err(CoreError::FetchFailure {
                message: message.clone(),
            }),
        }
    }

    /// Apply the global filter to transactions and monthly rewards, and
    /// derive totals according to the configured mode
    pub fn filtered(&self, filter: &GlobalFilter) -> CoreResult<FilteredRewards> {
        let data = self.data()?;

        let transactions = filter_by_period(&filter_by_name(&data.transactions, &filter.name), &filter.range);
        let monthly = filter_by_period(&filter_by_name(&data.monthly, &filter.name), &filter.range);
        let totals = data.totals_for(self.totals_mode(), &monthly);

        Ok(FilteredRewards {
            transactions,
            monthly,
            totals,
        })
    }

    pub fn summary(&self) -> StateSummary {
        let (error, transactions, monthly_rows, customers) = match &self.state {
            LoadState::Ready(data) => (None, data.transactions.len(), data.monthly.len(), data.totals.len()),
            LoadState::Failed(message) => (Some(message.clone()), 0, 0, 0),
            _ => (None, 0, 0, 0),
        };
        StateSummary {
            status: self.state.label(),
            generation: self.generation,
            error,
            transactions,
            monthly_rows,
            customers,
        }
    }
}

// ==================== Tests ====================
