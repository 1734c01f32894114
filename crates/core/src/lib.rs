pub mod rules;
pub mod transaction;

pub use rules::{KeywordRule, KeywordTable, RulesError};
pub use transaction::{NormalizedTransaction, RawRow};
