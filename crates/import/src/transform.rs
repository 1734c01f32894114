use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_core::{KeywordTable, NormalizedTransaction, RawRow};

use crate::csv::{read_raw_rows, ImportError};

/// Source exports carry US-style dates.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    BadDate,
    BadAmount,
}

/// One excluded row: its 1-based line number in the source file (header is
/// line 1) and which parse failed. Exclusion is not an error; callers get
/// these as a data-quality signal.
#[derive(Debug, Clone)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: SkipReason,
}

/// The outcome of transforming one file: surviving records in source order
/// plus the rows that were filtered out.
#[derive(Debug, Default)]
pub struct FileTransform {
    pub records: Vec<NormalizedTransaction>,
    pub skipped: Vec<SkippedRow>,
}

impl FileTransform {
    pub fn dropped_count(&self) -> usize {
        self.skipped.len()
    }
}

fn coerce(row: &RawRow) -> Result<(NaiveDate, Decimal), SkipReason> {
    let txn_date = NaiveDate::parse_from_str(row.date.trim(), DATE_FORMAT)
        .map_err(|_| SkipReason::BadDate)?;
    let amount =
        Decimal::from_str(row.amount.trim()).map_err(|_| SkipReason::BadAmount)?;
    Ok((txn_date, amount.round_dp(2)))
}

/// Coerces, filters, normalizes, classifies, and assembles raw rows into
/// `NormalizedTransaction`s. Rows whose date or amount fails to parse are
/// excluded, never errored; everything that survives satisfies the typed
/// invariants.
pub fn transform_rows(
    rows: Vec<RawRow>,
    table: &KeywordTable,
    source_file: &str,
) -> FileTransform {
    let mut out = FileTransform::default();

    for (idx, row) in rows.into_iter().enumerate() {
        match coerce(&row) {
            Ok((txn_date, amount)) => {
                let merchant = table.normalize_merchant(&row.description);
                let category = table.categorize(merchant.as_deref());
                out.records.push(NormalizedTransaction {
                    txn_date,
                    merchant,
                    description: row.description,
                    amount,
                    category,
                    source_file: source_file.to_string(),
                });
            }
            Err(reason) => out.skipped.push(SkippedRow {
                // +2: line 1 is the header, data rows start at line 2.
                line: idx + 2,
                reason,
            }),
        }
    }

    out
}

/// Full per-file pipeline over any reader: validate columns, then
/// transform. The `source_file` tag is whatever name the caller supplies.
pub fn transform_reader<R: Read>(
    data: R,
    table: &KeywordTable,
    source_file: &str,
) -> Result<FileTransform, ImportError> {
    let rows = read_raw_rows(data)?;
    Ok(transform_rows(rows, table, source_file))
}

/// Like [`transform_reader`], tagging records with the file's basename.
pub fn transform_file(path: &Path, table: &KeywordTable) -> Result<FileTransform, ImportError> {
    let source_file = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let file = File::open(path)?;
    transform_reader(file, table, &source_file)
}
