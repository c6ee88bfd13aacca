use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed page dump: {0}")]
    Malformed(String),
    #[error("Page {0} out of range")]
    PageOutOfRange(usize),
}

/// A word with its page coordinates, as reported by the extraction
/// collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// An extracted table: rows of cell values, cells possibly absent. The first
/// row is conventionally the header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        RawTable { rows }
    }

    /// Build from plain strings; empty cells become absent.
    pub fn from_strings(rows: Vec<Vec<&str>>) -> Self {
        RawTable {
            rows: rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|c| if c.is_empty() { None } else { Some(c.to_string()) })
                        .collect()
                })
                .collect(),
        }
    }

    pub fn header(&self) -> &[Option<String>] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// All rows after the header.
    pub fn data_rows(&self) -> &[Vec<Option<String>>] {
        if self.rows.is_empty() {
            &[]
        } else {
            &self.rows[1..]
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Capability set of the external PDF-extraction collaborator. The pipeline
/// never interprets binary page layout itself — it only consumes these
/// outputs. Pages are zero-indexed.
pub trait PageSource {
    fn page_count(&self) -> Result<usize, SourceError>;
    fn page_text(&self, page: usize) -> Result<Option<String>, SourceError>;
    fn page_tables(&self, page: usize) -> Result<Vec<RawTable>, SourceError>;
    fn page_image_count(&self, page: usize) -> Result<usize, SourceError>;
    fn page_words(&self, page: usize) -> Result<Vec<Word>, SourceError>;
}

// ── In-memory source (used for tests) ─────────────────────────────────────────

/// Serves pre-set pages — lets the pipeline run without any collaborator.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    pub pages: Vec<MemoryPage>,
}

#[derive(Debug, Default, Clone)]
pub struct MemoryPage {
    pub text: Option<String>,
    pub tables: Vec<RawTable>,
    pub images: usize,
    pub words: Vec<Word>,
}

impl MemorySource {
    pub fn new(pages: Vec<MemoryPage>) -> Self {
        Self { pages }
    }

    /// Single text-only page.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            pages: vec![MemoryPage { text: Some(text.into()), ..Default::default() }],
        }
    }

    /// Single page carrying one table and enough filler text to classify as
    /// text-based.
    pub fn from_table(table: RawTable) -> Self {
        let filler = "Statement of account. ".repeat(10);
        Self {
            pages: vec![MemoryPage {
                text: Some(filler),
                tables: vec![table],
                ..Default::default()
            }],
        }
    }

    fn page(&self, page: usize) -> Result<&MemoryPage, SourceError> {
        self.pages.get(page).ok_or(SourceError::PageOutOfRange(page))
    }
}

impl PageSource for MemorySource {
    fn page_count(&self) -> Result<usize, SourceError> {
        Ok(self.pages.len())
    }

    fn page_text(&self, page: usize) -> Result<Option<String>, SourceError> {
        Ok(self.page(page)?.text.clone())
    }

    fn page_tables(&self, page: usize) -> Result<Vec<RawTable>, SourceError> {
        Ok(self.page(page)?.tables.clone())
    }

    fn page_image_count(&self, page: usize) -> Result<usize, SourceError> {
        Ok(self.page(page)?.images)
    }

    fn page_words(&self, page: usize) -> Result<Vec<Word>, SourceError> {
        Ok(self.page(page)?.words.clone())
    }
}
