use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::{Category, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Affordability metrics derived from a cleaned transaction set.
///
/// Read-only aggregate with no lifecycle of its own — recompute whenever the
/// underlying set changes. Monthly averages divide by the caller-supplied
/// reporting window rather than the observed span.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_income: Decimal,
    /// Magnitude of all outflows (non-negative).
    pub total_expenses: Decimal,
    pub net_income: Decimal,
    pub avg_monthly_income: Decimal,
    pub avg_monthly_expenses: Decimal,
    pub avg_monthly_net: Decimal,
    pub transaction_count: usize,
    pub income_count: usize,
    pub expense_count: usize,
    pub categories: BTreeMap<Category, usize>,
    pub date_range: Option<DateRange>,
}

impl SummaryMetrics {
    /// Compute metrics over a cleaned, categorized transaction set.
    /// An empty set yields the zero aggregate.
    pub fn compute(transactions: &[Transaction], reporting_months: u32) -> Self {
        if transactions.is_empty() {
            return SummaryMetrics::default();
        }

        let total_income: Decimal = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        let total_expenses: Decimal = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum::<Decimal>()
            .abs();
        let net_income = total_income - total_expenses;

        let months = Decimal::from(reporting_months.max(1));

        let mut categories: BTreeMap<Category, usize> = BTreeMap::new();
        for tx in transactions {
            *categories.entry(tx.category).or_insert(0) += 1;
        }

        let start = transactions.iter().map(|t| t.date).min();
        let end = transactions.iter().map(|t| t.date).max();
        let date_range = match (start, end) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        };

        SummaryMetrics {
            total_income,
            total_expenses,
            net_income,
            avg_monthly_income: total_income / months,
            avg_monthly_expenses: total_expenses / months,
            avg_monthly_net: net_income / months,
            transaction_count: transactions.len(),
            income_count: transactions.iter().filter(|t| t.is_income()).count(),
            expense_count: transactions.iter().filter(|t| t.is_expense()).count(),
            categories,
            date_range,
        }
    }
}
