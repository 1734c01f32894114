use std::io::Read;

use tally_core::RawRow;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

const REQUIRED_COLUMNS: [&str; 3] = ["date", "description", "amount"];

/// Positions of the required columns within a validated header row.
struct ColumnIndex {
    date: usize,
    description: usize,
    amount: usize,
}

/// Checks the header names (trimmed, lowercased) against the required set.
/// A header may carry extra columns; those are ignored.
fn validate_header(headers: &csv::StringRecord) -> Result<ColumnIndex, ImportError> {
    let names: Vec<String> = headers
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !names.iter().any(|n| n == *c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(ImportError::MissingColumns(missing));
    }

    let position = |name: &str| names.iter().position(|n| n == name).unwrap_or_default();
    Ok(ColumnIndex {
        date: position("date"),
        description: position("description"),
        amount: position("amount"),
    })
}

/// Reads a delimited export into raw text rows, validating the header
/// first. Header trouble is fatal for the whole file; individual rows are
/// passed through untouched for the coercion stage to judge.
pub fn read_raw_rows<R: Read>(data: R) -> Result<Vec<RawRow>, ImportError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);

    let index = validate_header(reader.headers()?)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.is_empty() {
            continue;
        }
        rows.push(RawRow {
            date: record.get(index.date).unwrap_or_default().to_string(),
            description: record.get(index.description).unwrap_or_default().to_string(),
            amount: record.get(index.amount).unwrap_or_default().to_string(),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rows_in_source_order() {
        let data = b"date,description,amount\n01/15/2024,UBER EATS 123,23.50\n01/16/2024,STARBUCKS,5.00\n";
        let rows = read_raw_rows(data.as_ref()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].description, "UBER EATS 123");
        assert_eq!(rows[1].amount, "5.00");
    }

    #[test]
    fn header_names_are_trimmed_and_lowercased() {
        let data = b" Date , DESCRIPTION ,Amount\n01/15/2024,X,1.00\n";
        let rows = read_raw_rows(data.as_ref()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "01/15/2024");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let data = b"id,date,description,amount,balance\n7,01/15/2024,RENT,900.00,100.00\n";
        let rows = read_raw_rows(data.as_ref()).unwrap();
        assert_eq!(rows[0].amount, "900.00");
        assert_eq!(rows[0].description, "RENT");
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let data = b"date,description\n01/15/2024,X\n";
        let err = read_raw_rows(data.as_ref()).unwrap_err();
        match err {
            ImportError::MissingColumns(missing) => {
                assert_eq!(missing, vec!["amount".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn all_columns_missing_are_reported_sorted() {
        let data = b"foo,bar\n1,2\n";
        let err = read_raw_rows(data.as_ref()).unwrap_err();
        match err {
            ImportError::MissingColumns(missing) => {
                assert_eq!(
                    missing,
                    vec![
                        "amount".to_string(),
                        "date".to_string(),
                        "description".to_string()
                    ]
                );
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn header_only_file_yields_no_rows() {
        let data = b"date,description,amount\n";
        let rows = read_raw_rows(data.as_ref()).unwrap();
        assert!(rows.is_empty());
    }
}
