//! Pipeline orchestration: document classification → table/text extraction
//! → validation/categorization → aggregation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bankscan_core::{RawTransaction, SummaryMetrics, Transaction};

use crate::clean::{clean_transactions, Categorizer};
use crate::policy::ExtractPolicy;
use crate::rows::reconstruct_rows;
use crate::source::{PageSource, SourceError};
use crate::table::{is_transaction_table, ColumnRoles};
use crate::text::parse_statement_text;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The collaborator failed to open or read the document.
    #[error("Could not analyze PDF")]
    Analyze(#[source] SourceError),
    /// The document is image-based; OCR is explicitly unsupported.
    #[error("OCR not implemented yet")]
    OcrUnsupported,
    /// Table reconstruction and text fallback both came up empty.
    #[error("No transactions found")]
    NoTransactions,
}

/// Whether a document carries extractable text or needs OCR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    TextBased,
    ImageBased,
}

/// How the transactions were obtained — kept for downstream auditing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    TableReconstruction,
    TextFallback,
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionMethod::TableReconstruction => write!(f, "table_reconstruction"),
            ExtractionMethod::TextFallback => write!(f, "text_fallback"),
        }
    }
}

/// The pipeline's terminal artifact on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    pub transactions: Vec<Transaction>,
    pub summary: SummaryMetrics,
    pub extraction_method: ExtractionMethod,
    pub transaction_count: usize,
}

/// Sequences the whole extraction run. Strictly sequential: pages in order,
/// tables within a page in order, rows within a table in order.
#[derive(Debug, Default)]
pub struct StatementExtractor {
    policy: ExtractPolicy,
    categorizer: Categorizer,
}

impl StatementExtractor {
    pub fn new(policy: ExtractPolicy, categorizer: Categorizer) -> Self {
        Self { policy, categorizer }
    }

    pub fn policy(&self) -> &ExtractPolicy {
        &self.policy
    }

    /// Classify a document from a text sample of its first two pages. Too
    /// little text, or no alphanumeric content, means a scanned image.
    pub fn classify_document(
        &self,
        source: &dyn PageSource,
    ) -> Result<DocumentKind, SourceError> {
        let pages = source.page_count()?;
        let mut sample = String::new();
        for page in 0..pages.min(2) {
            if let Some(text) = source.page_text(page)? {
                sample.push_str(&text);
            }
        }

        let trimmed = sample.trim();
        let kind = if trimmed.len() > self.policy.text_sample_chars
            && trimmed.chars().any(|c| c.is_alphanumeric())
        {
            DocumentKind::TextBased
        } else {
            DocumentKind::ImageBased
        };
        tracing::debug!(sample_chars = trimmed.len(), ?kind, "document classified");
        Ok(kind)
    }

    /// Run the full pipeline against a collaborator source.
    pub fn extract(&self, source: &dyn PageSource) -> Result<Statement, ExtractError> {
        let kind = self
            .classify_document(source)
            .map_err(ExtractError::Analyze)?;
        if kind == DocumentKind::ImageBased {
            tracing::warn!("image-based document, OCR required");
            return Err(ExtractError::OcrUnsupported);
        }

        let (raw, extraction_method) = self
            .collect_transactions(source)
            .map_err(ExtractError::Analyze)?;

        let transactions = clean_transactions(raw, &self.categorizer);
        if transactions.is_empty() {
            return Err(ExtractError::NoTransactions);
        }

        let summary = SummaryMetrics::compute(&transactions, self.policy.reporting_months);
        tracing::info!(
            count = transactions.len(),
            ?extraction_method,
            "statement extracted"
        );

        Ok(Statement {
            transaction_count: transactions.len(),
            transactions,
            summary,
            extraction_method,
        })
    }

    /// Walk every page: classified tables feed the row reconstructor while
    /// page text accumulates for the fallback. The fallback runs only when
    /// no table anywhere in the document yielded transactions — the result
    /// is table-derived or text-derived, never both.
    fn collect_transactions(
        &self,
        source: &dyn PageSource,
    ) -> Result<(Vec<RawTransaction>, ExtractionMethod), SourceError> {
        let pages = source.page_count()?;
        let mut all_text = String::new();
        let mut from_tables: Vec<RawTransaction> = Vec::new();

        for page in 0..pages {
            let images = source.page_image_count(page)?;
            if images > 0 {
                tracing::debug!(page, images, "page carries images");
            }

            for (table_num, table) in source.page_tables(page)?.iter().enumerate() {
                if !is_transaction_table(table, &self.policy) {
                    tracing::debug!(page, table_num, "header/info table skipped");
                    continue;
                }
                let Some(roles) = ColumnRoles::resolve(table.header()) else {
                    tracing::warn!(
                        page,
                        table_num,
                        "transaction table without resolvable columns, skipped"
                    );
                    continue;
                };
                from_tables.extend(reconstruct_rows(table, roles, &self.policy));
            }

            if let Some(text) = source.page_text(page)? {
                all_text.push_str(&text);
                all_text.push('\n');
            }

            let words = source.page_words(page)?;
            if !words.is_empty() {
                tracing::trace!(page, words = words.len(), "word geometry available");
            }
        }

        if !from_tables.is_empty() {
            return Ok((from_tables, ExtractionMethod::TableReconstruction));
        }

        tracing::info!("no table transactions found, trying text parsing");
        let from_text = parse_statement_text(&all_text, &self.policy);
        Ok((from_text, ExtractionMethod::TextFallback))
    }
}
