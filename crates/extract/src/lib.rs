pub mod clean;
pub mod dump;
pub mod normalize;
pub mod pipeline;
pub mod policy;
pub mod rows;
pub mod source;
pub mod table;
pub mod text;

pub use clean::{clean_transactions, Categorizer};
pub use dump::DumpSource;
pub use normalize::{parse_amount, parse_date};
pub use pipeline::{
    DocumentKind, ExtractError, ExtractionMethod, Statement, StatementExtractor,
};
pub use policy::ExtractPolicy;
pub use source::{MemoryPage, MemorySource, PageSource, RawTable, SourceError, Word};
pub use table::ColumnRoles;

/// Run the default pipeline against a collaborator source.
pub fn extract_statement(
    source: &dyn PageSource,
) -> Result<Statement, ExtractError> {
    StatementExtractor::default().extract(source)
}
