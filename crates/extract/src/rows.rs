//! Row reconstruction for classified transaction tables.
//!
//! FNB-style statements sometimes pack the amounts for several logical rows
//! into one newline-separated cell, aligned with blank date/description
//! rows that follow. The reconstructor carries those amounts forward in an
//! explicit pending queue and matches them back to rows by position. The
//! amount column itself is unsigned; a trailing `CR`/`C` marker flags a
//! credit, everything else is a debit.

use bankscan_core::{Provenance, RawTransaction};

use crate::normalize::{parse_amount, parse_date};
use crate::policy::ExtractPolicy;
use crate::source::RawTable;
use crate::table::ColumnRoles;

/// Description used for continuation rows that carry none of their own.
pub const UNKNOWN_DESCRIPTION: &str = "Unknown/Fee";

/// Reconstruct transactions from a table's data rows, in order.
pub fn reconstruct_rows(
    table: &RawTable,
    roles: ColumnRoles,
    policy: &ExtractPolicy,
) -> Vec<RawTransaction> {
    let mut transactions = Vec::new();
    // Amounts split out of a multi-line amount cell, consumed positionally
    // by the rows that follow. Scoped to this table's pass.
    let mut pending: Vec<String> = Vec::new();

    for (row_num, row) in table.data_rows().iter().enumerate() {
        let row_num = row_num + 1; // 1-based, matching the queue offset below
        if row.len() <= roles.max_index() {
            tracing::debug!(row_num, "row shorter than resolved columns, skipped");
            continue;
        }

        let cell = |idx: usize| row[idx].as_deref().map(str::trim).unwrap_or("");

        let date_str = cell(roles.date);
        let desc_cell = cell(roles.description);
        let amount_cell = cell(roles.amount);

        // A block header: several rows' amounts in one cell, no date or
        // description of its own. Repopulate the queue, emit nothing.
        if amount_cell.contains('\n') && date_str.is_empty() && desc_cell.is_empty() {
            pending = amount_cell
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect();
            tracing::debug!(row_num, amounts = pending.len(), "multi-line amount block");
            continue;
        }

        // Continuation rows often lack their own description.
        let description = if desc_cell.is_empty() && row_num != 1 {
            UNKNOWN_DESCRIPTION
        } else {
            desc_cell
        };

        // With a populated queue the amount cell is ignored: the row's value
        // sits at its positional offset (the block header occupies the first
        // data row, hence the fixed -2). Past the end means no amount.
        let amount_str = if pending.is_empty() {
            amount_cell.to_string()
        } else {
            match row_num.checked_sub(2).and_then(|i| pending.get(i)) {
                Some(raw) => signed_pending_amount(raw),
                None => String::new(),
            }
        };

        if date_str.is_empty() || description.is_empty() || amount_str.is_empty() {
            tracing::debug!(row_num, "missing date, description, or amount, skipped");
            continue;
        }

        let Some(date) = parse_date(date_str, policy.reference_year) else {
            tracing::warn!(row_num, date_str, "unparseable date, row skipped");
            continue;
        };

        // Unparseable amounts degrade to zero rather than dropping the row.
        let amount = parse_amount(&amount_str);

        transactions.push(RawTransaction {
            date: Some(date),
            description: description.to_string(),
            amount,
            provenance: Provenance::TableRow(row.clone()),
        });
    }

    tracing::debug!(count = transactions.len(), "transactions reconstructed from table");
    transactions
}

/// Apply the credit/debit convention to a queued amount: a trailing `CR` or
/// `C` marks a credit and stays non-negative, anything else is a debit.
fn signed_pending_amount(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    if let Some(stripped) = upper.strip_suffix("CR").or_else(|| upper.strip_suffix('C')) {
        stripped.trim().to_string()
    } else {
        format!("-{}", raw.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn roles() -> ColumnRoles {
        ColumnRoles { date: 0, description: 1, amount: 2 }
    }

    fn reconstruct(rows: Vec<Vec<&str>>) -> Vec<RawTransaction> {
        let table = RawTable::from_strings(rows);
        reconstruct_rows(&table, roles(), &ExtractPolicy::default())
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn plain_rows_reconstruct() {
        let txs = reconstruct(vec![
            vec!["Date", "Description", "Amount"],
            vec!["01/01/2025", "Coffee", "-4.50"],
            vec!["01/02/2025", "Salary", "3000.00"],
        ]);
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].date, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(txs[0].amount, dec("-4.50"));
        assert_eq!(txs[1].amount, dec("3000.00"));
    }

    #[test]
    fn multi_line_amount_block_recovers_rows() {
        let txs = reconstruct(vec![
            vec!["Date", "Description", "Amount"],
            vec!["", "", "100.00\n50.00CR\n25.00"],
            vec!["01/01/2025", "Fee", ""],
            vec!["01/02/2025", "Refund", ""],
            vec!["01/03/2025", "Purchase", ""],
        ]);
        assert_eq!(txs.len(), 3);
        assert_eq!(txs[0].amount, dec("-100.00"));
        assert_eq!(txs[1].amount, dec("50.00"));
        assert_eq!(txs[2].amount, dec("-25.00"));
    }

    #[test]
    fn block_header_emits_no_transaction() {
        let txs = reconstruct(vec![
            vec!["Date", "Description", "Amount"],
            vec!["", "", "10.00\n20.00"],
            vec!["01/01/2025", "A", ""],
        ]);
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].description, "A");
    }

    #[test]
    fn credit_marker_variants() {
        assert_eq!(signed_pending_amount("50.00CR"), "50.00");
        assert_eq!(signed_pending_amount("50.00cr"), "50.00");
        assert_eq!(signed_pending_amount("50.00 C"), "50.00");
        assert_eq!(signed_pending_amount("50.00"), "-50.00");
    }

    #[test]
    fn rows_past_the_queue_get_no_amount() {
        let txs = reconstruct(vec![
            vec!["Date", "Description", "Amount"],
            vec!["", "", "100.00\n50.00"],
            vec!["01/01/2025", "A", ""],
            vec!["01/02/2025", "B", ""],
            vec!["01/03/2025", "C", ""],
        ]);
        // Two queued amounts cover rows 2 and 3; row 4 reads past the end
        // and is dropped for having no amount.
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].amount, dec("-100.00"));
        assert_eq!(txs[1].amount, dec("-50.00"));
    }

    #[test]
    fn later_block_keeps_the_fixed_offset_anchor() {
        // The positional offset is anchored to the first data row. When the
        // block lands later, earlier queue entries are never consumed and
        // trailing rows fall past the end — preserved statement quirk.
        let txs = reconstruct(vec![
            vec!["Date", "Description", "Amount"],
            vec!["", "", "10.00\n20.00"],
            vec!["01/01/2025", "A", ""],
            vec!["", "", "30.00\n40.00"],
            vec!["01/02/2025", "B", ""],
        ]);
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].description, "A");
        assert_eq!(txs[0].amount, dec("-10.00"));
    }

    #[test]
    fn short_rows_are_skipped() {
        let txs = reconstruct(vec![
            vec!["Date", "Description", "Amount"],
            vec!["01/01/2025", "OnlyTwoCells"],
            vec!["01/02/2025", "Full", "5.00"],
        ]);
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].description, "Full");
    }

    #[test]
    fn unparseable_date_skips_row() {
        let txs = reconstruct(vec![
            vec!["Date", "Description", "Amount"],
            vec!["garbage", "Coffee", "-4.50"],
            vec!["01/02/2025", "Lunch", "-12.00"],
        ]);
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].description, "Lunch");
    }

    #[test]
    fn unparseable_amount_degrades_to_zero() {
        let txs = reconstruct(vec![
            vec!["Date", "Description", "Amount"],
            vec!["01/01/2025", "Mystery", "??"],
        ]);
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].amount, Decimal::ZERO);
    }

    #[test]
    fn empty_description_on_later_rows_gets_placeholder() {
        let txs = reconstruct(vec![
            vec!["Date", "Description", "Amount"],
            vec!["01/01/2025", "First", "1.00"],
            vec!["01/02/2025", "", "2.00"],
        ]);
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[1].description, UNKNOWN_DESCRIPTION);
    }

    #[test]
    fn empty_description_on_first_row_drops_it() {
        let txs = reconstruct(vec![
            vec!["Date", "Description", "Amount"],
            vec!["01/01/2025", "", "1.00"],
            vec!["01/02/2025", "Second", "2.00"],
        ]);
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].description, "Second");
    }

    #[test]
    fn provenance_keeps_original_row() {
        let txs = reconstruct(vec![
            vec!["Date", "Description", "Amount"],
            vec!["01/01/2025", "Coffee", "-4.50"],
        ]);
        let Provenance::TableRow(row) = &txs[0].provenance else {
            panic!("expected table-row provenance");
        };
        assert_eq!(row[1].as_deref(), Some("Coffee"));
    }
}
