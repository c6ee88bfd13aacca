//! Validation and categorization of reconstructed transactions.

use serde::Deserialize;

use bankscan_core::{Category, RawTransaction, Transaction};

/// Default category keyword table. Scanned in order against the lowercased
/// description; the first category with a substring hit wins. Order matters:
/// "gas" belongs to utilities here, so it must come before "gas station".
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Income, &["salary", "payroll", "deposit", "transfer in", "interest"]),
    (Category::Housing, &["rent", "mortgage", "housing"]),
    (Category::Food, &["grocery", "restaurant", "food", "dining"]),
    (Category::Utilities, &["electric", "gas", "water", "internet", "phone"]),
    (Category::Transport, &["fuel", "gas station", "uber", "taxi", "parking"]),
    (Category::Entertainment, &["netflix", "streaming", "movie", "entertainment"]),
    (Category::Shopping, &["amazon", "store", "purchase", "retail"]),
    (Category::Banking, &["fee", "charge", "atm", "overdraft"]),
];

#[derive(Debug, Deserialize)]
struct KeywordRule {
    category: Category,
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct KeywordFile {
    rules: Vec<KeywordRule>,
}

/// Assigns each transaction exactly one category by ordered keyword scan.
#[derive(Debug, Clone)]
pub struct Categorizer {
    keywords: Vec<(Category, Vec<String>)>,
}

impl Default for Categorizer {
    fn default() -> Self {
        Self {
            keywords: CATEGORY_KEYWORDS
                .iter()
                .map(|(c, kws)| (*c, kws.iter().map(|k| k.to_string()).collect()))
                .collect(),
        }
    }
}

impl Categorizer {
    /// Load an ordered keyword table from TOML:
    ///
    /// ```toml
    /// [[rules]]
    /// category = "food"
    /// keywords = ["grocery", "bakery"]
    /// ```
    pub fn from_toml(toml_content: &str) -> Result<Self, String> {
        let file: KeywordFile =
            toml::from_str(toml_content).map_err(|e| format!("Failed to parse TOML: {e}"))?;
        Ok(Self {
            keywords: file
                .rules
                .into_iter()
                .map(|r| (r.category, r.keywords))
                .collect(),
        })
    }

    pub fn categorize(&self, description: &str) -> Category {
        if description.is_empty() {
            return Category::Other;
        }
        let lower = description.to_lowercase();
        self.keywords
            .iter()
            .find(|(_, kws)| kws.iter().any(|kw| lower.contains(kw.as_str())))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Other)
    }
}

/// Drop incomplete transactions, stable-sort the rest ascending by date, and
/// assign categories. Duplicates are deliberately preserved — repeated
/// identical transactions on a statement are real.
pub fn clean_transactions(
    raw: Vec<RawTransaction>,
    categorizer: &Categorizer,
) -> Vec<Transaction> {
    let before = raw.len();
    let mut kept: Vec<(chrono::NaiveDate, RawTransaction)> = raw
        .into_iter()
        .filter_map(|tx| match tx.date {
            Some(date) if !tx.description.trim().is_empty() => Some((date, tx)),
            _ => None,
        })
        .collect();
    if kept.len() < before {
        tracing::debug!(dropped = before - kept.len(), "incomplete transactions dropped");
    }

    kept.sort_by_key(|(date, _)| *date);

    kept.into_iter()
        .map(|(date, tx)| Transaction {
            date,
            category: categorizer.categorize(&tx.description),
            description: tx.description,
            amount: tx.amount,
            provenance: tx.provenance,
        })
        .collect()
}
