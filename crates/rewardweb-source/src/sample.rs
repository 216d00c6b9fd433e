//! Seeded sample data, for demos and for running without a data file

use async_trait::async_trait;
use chrono::{Datelike, Months, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::SourceError;
use crate::types::{CustomerId, Transaction};
use crate::TransactionSource;

const CUSTOMERS: [(i64, &str); 3] = [(1, "John Doe"), (2, "Jane Smith"), (3, "Bob Johnson")];

const PRODUCTS: [&str; 7] = [
    "Laptop",
    "Phone",
    "Tablet",
    "Headphones",
    "Charger",
    "Monitor",
    "Keyboard",
];

/// Generates purchases spread over the three months ending at `anchor`.
///
/// Amounts fall in $10.00 to $210.00. The same seed and anchor always yield
/// the same transactions.
#[derive(Debug, Clone)]
pub struct SampleSource {
    seed: u64,
    count: usize,
    anchor: NaiveDate,
}

impl SampleSource {
    pub fn new(seed: u64, count: usize, anchor: NaiveDate) -> Self {
        Self {
            seed,
            count,
            anchor,
        }
    }

    pub fn generate(&self) -> Vec<Transaction> {
        let mut rng = Pcg64Mcg::seed_from_u64(self.seed);

        (0..self.count)
            .map(|i| {
                let (customer_id, customer_name) = CUSTOMERS[rng.gen_range(0..CUSTOMERS.len())];
                let month_offset: u32 = rng.gen_range(0..3);
                let day: u32 = rng.gen_range(1..=28);
                let hour: u32 = rng.gen_range(8..21);
                let minute: u32 = rng.gen_range(0..60);
                let cents: i64 = rng.gen_range(1_000..=21_000);
                let product = PRODUCTS[rng.gen_range(0..PRODUCTS.len())];

                let date = self.purchase_date(month_offset, day);
                Transaction {
                    id: format!("trans-{}", 1000 + i),
                    customer_id: CustomerId::Number(customer_id),
                    customer_name: customer_name.to_string(),
                    date: format!("{}T{:02}:{:02}:00.000Z", date.format("%Y-%m-%d"), hour, minute),
                    product: product.to_string(),
                    amount: Decimal::new(cents, 2).to_f64().unwrap_or(f64::NAN),
                }
            })
            .collect()
    }

    fn purchase_date(&self, month_offset: u32, day: u32) -> NaiveDate {
        self.anchor
            .with_day(1)
            .and_then(|first| first.checked_sub_months(Months::new(month_offset)))
            .and_then(|month| month.with_day(day))
            .unwrap_or(self.anchor)
    }
}

#[async_trait]
impl TransactionSource for SampleSource {
    async fn fetch(&self) -> Result<Vec<Transaction>, SourceError> {
        Ok(self.generate())
    }

    fn describe(&self) -> String {
        format!("sample(seed={}, count={})", self.seed, self.count)
    }
}
