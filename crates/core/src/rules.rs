use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One keyword → category pair. Keywords match as case-insensitive
/// substrings; a rule's position in the table is its priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub category: String,
}

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("failed to parse keyword table: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Ordered merchant/category keyword table.
///
/// First match wins, in the order rules were supplied — never in map
/// iteration order. The table is immutable after construction, so the
/// same description always normalizes the same way.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    rules: Vec<KeywordRule>,
}

#[derive(Deserialize)]
struct KeywordTableFile {
    rules: Vec<KeywordRule>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        let pairs = [
            ("NETFLIX", "Entertainment"),
            ("SPOTIFY", "Entertainment"),
            ("STARBUCKS", "Food"),
            ("UBER", "Transport"),
            ("AMAZON", "Shopping"),
            ("RENT", "Housing"),
            ("SALARY", "Income"),
        ];
        Self::new(
            pairs
                .into_iter()
                .map(|(keyword, category)| KeywordRule {
                    keyword: keyword.to_string(),
                    category: category.to_string(),
                })
                .collect(),
        )
    }
}

impl KeywordTable {
    /// Keywords are uppercased on the way in so matching is a plain
    /// substring test against uppercased input.
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|r| KeywordRule {
                keyword: r.keyword.trim().to_uppercase(),
                category: r.category,
            })
            .collect();
        Self { rules }
    }

    pub fn from_toml(content: &str) -> Result<Self, RulesError> {
        let file: KeywordTableFile = toml::from_str(content)?;
        Ok(Self::new(file.rules))
    }

    /// Maps a free-text description to a canonical merchant label.
    ///
    /// Empty (after trimming) descriptions have no merchant. Otherwise the
    /// first rule whose keyword occurs in the uppercased text wins and the
    /// keyword itself, title-cased, is the label. With no match the label
    /// is the title-cased first whitespace token.
    pub fn normalize_merchant(&self, description: &str) -> Option<String> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            return None;
        }
        let upper = trimmed.to_uppercase();
        for rule in &self.rules {
            if upper.contains(&rule.keyword) {
                return Some(title_case(&rule.keyword));
            }
        }
        upper.split_whitespace().next().map(title_case)
    }

    /// Maps a merchant label to a spending category, `"Other"` when no
    /// keyword matches. No merchant means no category.
    pub fn categorize(&self, merchant: Option<&str>) -> Option<String> {
        let upper = merchant?.to_uppercase();
        for rule in &self.rules {
            if upper.contains(&rule.keyword) {
                return Some(rule.category.clone());
            }
        }
        Some("Other".to_string())
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
