use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One record as it appears in a source export, all fields still text.
/// Lives only for the duration of a file's transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRow {
    pub date: String,
    pub description: String,
    pub amount: String,
}

/// One standardized output record. Immutable once assembled; the store
/// only ever appends these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTransaction {
    pub txn_date: NaiveDate,
    pub merchant: Option<String>,
    pub description: String,
    /// Fixed-point amount, scale 2.
    pub amount: Decimal,
    pub category: Option<String>,
    /// Basename of the file this record came from.
    pub source_file: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn normalized_transaction_roundtrips_through_serde() {
        let tx = NormalizedTransaction {
            txn_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            merchant: Some("Uber".to_string()),
            description: "UBER EATS 123".to_string(),
            amount: Decimal::from_str("23.50").unwrap(),
            category: Some("Transport".to_string()),
            source_file: "jan.csv".to_string(),
        };
        let json = serde_json::to_string(&tx).unwrap();
        let back: NormalizedTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}
