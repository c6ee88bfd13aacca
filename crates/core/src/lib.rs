pub mod summary;
pub mod transaction;

pub use summary::{DateRange, SummaryMetrics};
pub use transaction::{Category, Provenance, RawTransaction, Transaction};
