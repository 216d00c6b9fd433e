//! Sort keys and directions for the three tables

use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Asc
    }
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort direction: {}", s)),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Column of a table that can be sorted on
pub trait SortField: Copy + PartialEq + std::fmt::Display + std::str::FromStr + 'static {
    /// Every sortable column, in display order
    fn all() -> &'static [Self];
    /// Header text
    fn label(&self) -> &'static str;
}

/// Transactions table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionField {
    Id,
    CustomerName,
    Date,
    Product,
    Amount,
    Points,
}

impl SortField for TransactionField {
    fn all() -> &'static [Self] {
        &[
            TransactionField::Id,
            TransactionField::CustomerName,
            TransactionField::Date,
            TransactionField::Product,
            TransactionField::Amount,
            TransactionField::Points,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            TransactionField::Id => "Transaction ID",
            TransactionField::CustomerName => "Customer Name",
            TransactionField::Date => "Purchase Date",
            TransactionField::Product => "Product Purchased",
            TransactionField::Amount => "Price",
            TransactionField::Points => "Reward Points",
        }
    }
}

impl std::str::FromStr for TransactionField {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(TransactionField::Id),
            "customerName" => Ok(TransactionField::CustomerName),
            "date" => Ok(TransactionField::Date),
            "product" => Ok(TransactionField::Product),
            "amount" => Ok(TransactionField::Amount),
            "points" => Ok(TransactionField::Points),
            _ => Err(format!("Invalid transaction field: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionField::Id => write!(f, "id"),
            TransactionField::CustomerName => write!(f, "customerName"),
            TransactionField::Date => write!(f, "date"),
            TransactionField::Product => write!(f, "product"),
            TransactionField::Amount => write!(f, "amount"),
            TransactionField::Points => write!(f, "points"),
        }
    }
}

/// Monthly rewards table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MonthlyField {
    CustomerId,
    CustomerName,
    /// (year, month)
    Period,
    RewardPoints,
}

impl SortField for MonthlyField {
    fn all() -> &'static [Self] {
        &[
            MonthlyField::CustomerId,
            MonthlyField::CustomerName,
            MonthlyField::Period,
            MonthlyField::RewardPoints,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            MonthlyField::CustomerId => "Customer ID",
            MonthlyField::CustomerName => "Customer Name",
            MonthlyField::Period => "Period",
            MonthlyField::RewardPoints => "Reward Points",
        }
    }
}

impl std::str::FromStr for MonthlyField {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customerId" => Ok(MonthlyField::CustomerId),
            "customerName" => Ok(MonthlyField::CustomerName),
            "period" => Ok(MonthlyField::Period),
            "rewardPoints" => Ok(MonthlyField::RewardPoints),
            _ => Err(format!("Invalid monthly field: {}", s)),
        }
    }
}

impl std::fmt::Display for MonthlyField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonthlyField::CustomerId => write!(f, "customerId"),
            MonthlyField::CustomerName => write!(f, "customerName"),
            MonthlyField::Period => write!(f, "period"),
            MonthlyField::RewardPoints => write!(f, "rewardPoints"),
        }
    }
}

/// Total rewards table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TotalField {
    CustomerId,
    CustomerName,
    RewardPoints,
}

impl SortField for TotalField {
    fn all() -> &'static [Self] {
        &[
            TotalField::CustomerId,
            TotalField::CustomerName,
            TotalField::RewardPoints,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            TotalField::CustomerId => "Customer ID",
            TotalField::CustomerName => "Customer Name",
            TotalField::RewardPoints => "Total Reward Points",
        }
    }
}

impl std::str::FromStr for TotalField {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customerId" => Ok(TotalField::CustomerId),
            "customerName" => Ok(TotalField::CustomerName),
            "rewardPoints" => Ok(TotalField::RewardPoints),
            _ => Err(format!("Invalid total field: {}", s)),
        }
    }
}

impl std::fmt::Display for TotalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TotalField::CustomerId => write!(f, "customerId"),
            TotalField::CustomerName => write!(f, "customerName"),
            TotalField::RewardPoints => write!(f, "rewardPoints"),
        }
    }
}
