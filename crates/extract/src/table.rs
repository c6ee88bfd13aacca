//! Table classification and column resolution.
//!
//! Statements mix real transaction tables with account-metadata tables on
//! the same page. Classification is a header-vocabulary heuristic: enough
//! transaction-flavored header cells and the table qualifies. It trades
//! false negatives against misclassified metadata tables; it is not a
//! guarantee.

use crate::policy::ExtractPolicy;
use crate::source::RawTable;

/// Header terms that indicate a per-transaction table.
pub const TRANSACTION_HEADER_TERMS: &[&str] = &[
    "date",
    "transaction",
    "description",
    "amount",
    "balance",
    "debit",
    "credit",
    "withdrawal",
    "deposit",
    "memo",
    "reference",
    "trans date",
    "posting date",
    "effective date",
];

/// Synonyms for the date column.
pub const DATE_SYNONYMS: &[&str] = &["date", "transaction date", "posted", "trans date"];

/// Synonyms for the description column.
pub const DESCRIPTION_SYNONYMS: &[&str] = &["description", "transaction", "details", "memo"];

/// Synonyms for the amount column. Debit/credit/withdrawal/deposit are
/// included because statements often split the amount into labeled columns.
pub const AMOUNT_SYNONYMS: &[&str] = &["amount", "debit", "credit", "withdrawal", "deposit"];

/// Count header cells that match the vocabulary, case-insensitively. Each
/// cell counts at most once no matter how many terms it contains.
pub fn header_match_count(cells: &[Option<String>], vocabulary: &[&str]) -> usize {
    cells
        .iter()
        .filter_map(|cell| cell.as_deref())
        .filter(|cell| {
            let lower = cell.to_lowercase();
            let lower = lower.trim();
            vocabulary.iter().any(|term| lower.contains(term))
        })
        .count()
}

/// Whether a table holds transaction rows rather than header/metadata.
/// Tables below the row minimum are rejected outright (a transaction table
/// needs a header plus at least two data rows).
pub fn is_transaction_table(table: &RawTable, policy: &ExtractPolicy) -> bool {
    if table.row_count() < policy.min_table_rows {
        return false;
    }
    let matches = header_match_count(table.header(), TRANSACTION_HEADER_TERMS);
    tracing::debug!(matches, "header analysis");
    matches >= policy.min_header_matches
}

/// Semantic column roles resolved from a table's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRoles {
    pub date: usize,
    pub description: usize,
    pub amount: usize,
}

impl ColumnRoles {
    /// Resolve all three roles from a header row. Each role resolves
    /// independently to the first cell containing one of its synonyms; if
    /// any role is missing, the table cannot be reconstructed.
    pub fn resolve(header: &[Option<String>]) -> Option<ColumnRoles> {
        Some(ColumnRoles {
            date: find_column(header, DATE_SYNONYMS)?,
            description: find_column(header, DESCRIPTION_SYNONYMS)?,
            amount: find_column(header, AMOUNT_SYNONYMS)?,
        })
    }

    /// Highest resolved index — rows shorter than this cannot be read.
    pub fn max_index(&self) -> usize {
        self.date.max(self.description).max(self.amount)
    }
}

/// First header cell containing any of the synonyms, case-insensitively.
pub fn find_column(header: &[Option<String>], synonyms: &[&str]) -> Option<usize> {
    header.iter().position(|cell| {
        cell.as_deref().is_some_and(|c| {
            let lower = c.to_lowercase();
            let lower = lower.trim();
            synonyms.iter().any(|name| lower.contains(name))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cells: Vec<&str>) -> Vec<Option<String>> {
        cells
            .into_iter()
            .map(|c| if c.is_empty() { None } else { Some(c.to_string()) })
            .collect()
    }

    // ── classification ───────────────────────────────────────────────────────

    #[test]
    fn transaction_headers_classify() {
        let table = RawTable::from_strings(vec![
            vec!["Date", "Description", "Amount", "Balance"],
            vec!["01/01/2025", "Coffee", "-4.50", "995.50"],
            vec!["01/02/2025", "Lunch", "-12.00", "983.50"],
        ]);
        assert!(is_transaction_table(&table, &ExtractPolicy::default()));
    }

    #[test]
    fn metadata_headers_do_not_classify() {
        let table = RawTable::from_strings(vec![
            vec!["Branch Number", "Account Number"],
            vec!["250655", "123456789"],
            vec!["", ""],
        ]);
        assert!(!is_transaction_table(&table, &ExtractPolicy::default()));
    }

    #[test]
    fn two_row_table_never_classifies() {
        let table = RawTable::from_strings(vec![
            vec!["Date", "Description", "Amount"],
            vec!["01/01/2025", "Coffee", "-4.50"],
        ]);
        assert!(!is_transaction_table(&table, &ExtractPolicy::default()));
    }

    #[test]
    fn exactly_two_matches_is_the_boundary() {
        let two = RawTable::from_strings(vec![
            vec!["Date", "Amount", "Notes"],
            vec!["a", "b", "c"],
            vec!["d", "e", "f"],
        ]);
        assert!(is_transaction_table(&two, &ExtractPolicy::default()));

        let one = RawTable::from_strings(vec![
            vec!["Date", "Holder", "Notes"],
            vec!["a", "b", "c"],
            vec!["d", "e", "f"],
        ]);
        assert!(!is_transaction_table(&one, &ExtractPolicy::default()));
    }

    #[test]
    fn header_cell_counts_once_despite_multiple_terms() {
        // "Transaction Date" contains both "transaction" and "date".
        let cells = header(vec!["Transaction Date"]);
        assert_eq!(header_match_count(&cells, TRANSACTION_HEADER_TERMS), 1);
    }

    #[test]
    fn match_count_is_case_insensitive() {
        let cells = header(vec!["DATE", "dEsCrIpTiOn"]);
        assert_eq!(header_match_count(&cells, TRANSACTION_HEADER_TERMS), 2);
    }

    #[test]
    fn absent_cells_are_ignored() {
        let cells = header(vec!["", "Date", ""]);
        assert_eq!(header_match_count(&cells, TRANSACTION_HEADER_TERMS), 1);
    }

    // ── column resolution ────────────────────────────────────────────────────

    #[test]
    fn resolves_all_three_roles() {
        let roles =
            ColumnRoles::resolve(&header(vec!["Date", "Description", "Amount"])).unwrap();
        assert_eq!(roles, ColumnRoles { date: 0, description: 1, amount: 2 });
        assert_eq!(roles.max_index(), 2);
    }

    #[test]
    fn resolves_split_amount_columns_to_first() {
        let roles =
            ColumnRoles::resolve(&header(vec!["Trans Date", "Details", "Debit", "Credit"]))
                .unwrap();
        assert_eq!(roles.amount, 2);
    }

    #[test]
    fn missing_any_role_fails_resolution() {
        assert!(ColumnRoles::resolve(&header(vec!["Date", "Description"])).is_none());
        assert!(ColumnRoles::resolve(&header(vec!["Description", "Amount"])).is_none());
        assert!(ColumnRoles::resolve(&header(vec![])).is_none());
    }

    #[test]
    fn date_synonym_also_matches_description_role() {
        // "Transaction" appears in both lists; resolution is independent per
        // role, so both can land on the same cell.
        let roles = ColumnRoles::resolve(&header(vec!["Transaction Date", "Amount"])).unwrap();
        assert_eq!(roles.date, 0);
        assert_eq!(roles.description, 0);
        assert_eq!(roles.amount, 1);
    }
}
