//! Free-text fallback parser.
//!
//! Used only when table extraction across the whole document produced
//! nothing. Scans the concatenated page text line by line against a fixed
//! priority order of transaction patterns; the first pattern that yields a
//! usable transaction wins the line.

use std::sync::OnceLock;

use regex::Regex;

use bankscan_core::{Provenance, RawTransaction};

use crate::normalize::{parse_amount, parse_date};
use crate::policy::ExtractPolicy;

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// Date + description + amount, anchored at line end.
re!(re_slash_date_line, r"(\d{1,2}/\d{1,2}/\d{4})\s+(.+?)\s+([-+]?\$?[\d,]+\.?\d*)\s*$");
// Same with an ISO date.
re!(re_iso_date_line, r"(\d{4}-\d{2}-\d{2})\s+(.+?)\s+([-+]?\$?[\d,]+\.?\d*)\s*$");
// Date + description + amount + trailing balance; the balance is discarded.
re!(
    re_balance_line,
    r"(\d{1,2}/\d{1,2}/\d{4})\s+(.+?)\s+([-+]?\$?[\d,]+\.?\d*)\s+([-+]?\$?[\d,]+\.?\d*)"
);

fn patterns() -> [&'static Regex; 3] {
    [re_slash_date_line(), re_iso_date_line(), re_balance_line()]
}

/// Parse concatenated statement text into transactions. Lines below the
/// noise threshold are skipped; zero-amount matches are treated as false
/// positives (page totals and the like) and dropped.
pub fn parse_statement_text(text: &str, policy: &ExtractPolicy) -> Vec<RawTransaction> {
    let mut transactions = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.len() < policy.min_line_len {
            continue;
        }

        for pattern in patterns() {
            let Some(caps) = pattern.captures(line) else {
                continue;
            };

            let date_str = &caps[1];
            let description = caps[2].trim();
            let amount_str = &caps[3];

            let Some(date) = parse_date(date_str, policy.reference_year) else {
                tracing::debug!(date_str, "matched line with unparseable date");
                continue;
            };

            let amount = parse_amount(amount_str);
            if description.is_empty() || amount.is_zero() {
                tracing::debug!(line, "zero-amount or blank match dropped");
                continue;
            }

            transactions.push(RawTransaction {
                date: Some(date),
                description: description.to_string(),
                amount,
                provenance: Provenance::TextLine(line.to_string()),
            });
            break;
        }
    }

    tracing::debug!(count = transactions.len(), "transactions parsed from text");
    transactions
}
