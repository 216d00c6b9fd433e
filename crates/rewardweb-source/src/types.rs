//! Raw transaction records as delivered by a source

use serde::{Deserialize, Deserializer, Serialize};

/// Customer identifier, sources use either numbers or strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CustomerId::Number(n) => write!(f, "{}", n),
            CustomerId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for CustomerId {
    fn from(n: i64) -> Self {
        CustomerId::Number(n)
    }
}

impl From<&str> for CustomerId {
    fn from(s: &str) -> Self {
        CustomerId::Text(s.to_string())
    }
}

/// A single purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub customer_id: CustomerId,
    pub customer_name: String,
    /// ISO-8601 date or datetime, as written by the source
    pub date: String,
    #[serde(default)]
    pub product: String,
    /// Purchase amount; `NaN` when the source sent something non-numeric
    #[serde(deserialize_with = "lenient_amount")]
    pub amount: f64,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        customer_id: impl Into<CustomerId>,
        customer_name: impl Into<String>,
        date: impl Into<String>,
        product: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            customer_id: customer_id.into(),
            customer_name: customer_name.into(),
            date: date.into(),
            product: product.into(),
            amount,
        }
    }
}

/// Customer directory entry, carried by some documents but not used for rewards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
}

/// Top-level layout of a transactions document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionDocument {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub customers: Vec<Customer>,
}

/// Only JSON numbers are amounts; strings (numeric or not), booleans, null
/// and containers all become `NaN`, which earns zero points.
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        _ => f64::NAN,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_record() {
        let json = r#"{"id":"t1","customerId":101,"customerName":"Ann","date":"2024-01-15","product":"Phone","amount":120.5}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.customer_id, CustomerId::Number(101));
        assert_eq!(txn.amount, 120.5);
        assert_eq!(txn.product, "Phone");
    }

    #[test]
    fn test_string_customer_id() {
        let json = r#"{"id":"t1","customerId":"C-7","customerName":"Ann","date":"2024-01-15","amount":1}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.customer_id, CustomerId::Text("C-7".to_string()));
        assert_eq!(txn.customer_id.to_string(), "C-7");
        assert_eq!(txn.product, "");
    }

    #[test]
    fn test_amount_as_numeric_string_is_nan() {
        for raw in [r#""150""#, r#"" 75.25 ""#, r#""0""#] {
            let json = format!(
                r#"{{"id":"t1","customerId":1,"customerName":"Ann","date":"2024-01-15","amount":{}}}"#,
                raw
            );
            let txn: Transaction = serde_json::from_str(&json).unwrap();
            assert!(txn.amount.is_nan(), "amount {} should be NaN", raw);
        }
    }

    #[test]
    fn test_non_numeric_amount_is_nan() {
        for raw in [r#""abc""#, "null", "true", "[1]"] {
            let json = format!(
                r#"{{"id":"t1","customerId":1,"customerName":"Ann","date":"2024-01-15","amount":{}}}"#,
                raw
            );
            let txn: Transaction = serde_json::from_str(&json).unwrap();
            assert!(txn.amount.is_nan(), "amount {} should be NaN", raw);
        }
    }

    #[test]
    fn test_document_without_customers() {
        let doc: TransactionDocument = serde_json::from_str(r#"{"transactions":[]}"#).unwrap();
        assert!(doc.transactions.is_empty());
        assert!(doc.customers.is_empty());
    }

    #[test]
    fn test_customer_id_ordering() {
        let mut ids = vec![CustomerId::from("b"), CustomerId::from(2), CustomerId::from(1)];
        ids.sort();
        assert_eq!(ids, vec![CustomerId::from(1), CustomerId::from(2), CustomerId::from("b")]);
    }
}
