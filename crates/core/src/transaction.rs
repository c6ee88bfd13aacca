use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fixed category label set for statement transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Income,
    Housing,
    Food,
    Utilities,
    Transport,
    Entertainment,
    Shopping,
    Banking,
    Other,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::Income => "income",
            Category::Housing => "housing",
            Category::Food => "food",
            Category::Utilities => "utilities",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Banking => "banking",
            Category::Other => "other",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Category::Income),
            "housing" => Ok(Category::Housing),
            "food" => Ok(Category::Food),
            "utilities" => Ok(Category::Utilities),
            "transport" => Ok(Category::Transport),
            "entertainment" => Ok(Category::Entertainment),
            "shopping" => Ok(Category::Shopping),
            "banking" => Ok(Category::Banking),
            "other" => Ok(Category::Other),
            other => Err(format!("Unknown category: '{other}'")),
        }
    }
}

/// Where a transaction came from — kept for auditability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// The original table row, cells as extracted (absent cells preserved).
    TableRow(Vec<Option<String>>),
    /// The original free-text line the regex fallback matched.
    TextLine(String),
}

/// A transaction as reconstructed from a table or text line, before
/// validation and categorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTransaction {
    pub date: Option<NaiveDate>,
    pub description: String,
    /// Signed: positive = inflow/credit, negative = outflow/debit.
    pub amount: Decimal,
    pub provenance: Provenance,
}

/// A validated, categorized transaction. Immutable once built; transactions
/// are value objects and duplicates are preserved by design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
    pub provenance: Provenance,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}
