//! JSON page-dump source.
//!
//! The collaborator that actually opens PDFs (pdfplumber or equivalent)
//! hands its per-page output over as JSON: text, tables as rows of nullable
//! cell strings, image counts, and words with coordinates. `DumpSource`
//! deserializes that dump and serves it through [`PageSource`].

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::source::{PageSource, RawTable, SourceError, Word};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageDump {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub tables: Vec<Vec<Vec<Option<String>>>>,
    #[serde(default)]
    pub images: usize,
    #[serde(default)]
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpSource {
    pub pages: Vec<PageDump>,
}

impl DumpSource {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
        serde_json::from_reader(reader).map_err(|e| SourceError::Malformed(e.to_string()))
    }

    pub fn from_str(json: &str) -> Result<Self, SourceError> {
        serde_json::from_str(json).map_err(|e| SourceError::Malformed(e.to_string()))
    }

    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    fn page(&self, page: usize) -> Result<&PageDump, SourceError> {
        self.pages.get(page).ok_or(SourceError::PageOutOfRange(page))
    }
}

impl PageSource for DumpSource {
    fn page_count(&self) -> Result<usize, SourceError> {
        Ok(self.pages.len())
    }

    fn page_text(&self, page: usize) -> Result<Option<String>, SourceError> {
        Ok(self.page(page)?.text.clone())
    }

    fn page_tables(&self, page: usize) -> Result<Vec<RawTable>, SourceError> {
        Ok(self
            .page(page)?
            .tables
            .iter()
            .cloned()
            .map(RawTable::new)
            .collect())
    }

    fn page_image_count(&self, page: usize) -> Result<usize, SourceError> {
        Ok(self.page(page)?.images)
    }

    fn page_words(&self, page: usize) -> Result<Vec<Word>, SourceError> {
        Ok(self.page(page)?.words.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_dump() {
        let json = r#"{"pages": [{"text": "hello"}]}"#;
        let src = DumpSource::from_str(json).unwrap();
        assert_eq!(src.page_count().unwrap(), 1);
        assert_eq!(src.page_text(0).unwrap().as_deref(), Some("hello"));
        assert!(src.page_tables(0).unwrap().is_empty());
        assert_eq!(src.page_image_count(0).unwrap(), 0);
        assert!(src.page_words(0).unwrap().is_empty());
    }

    #[test]
    fn parses_tables_with_null_cells() {
        let json = r#"{
            "pages": [{
                "text": "statement",
                "tables": [[["Date", "Description", "Amount"],
                            [null, null, "100.00"]]]
            }]
        }"#;
        let src = DumpSource::from_str(json).unwrap();
        let tables = src.page_tables(0).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].header()[0].as_deref(), Some("Date"));
        assert_eq!(tables[0].data_rows()[0][0], None);
        assert_eq!(tables[0].data_rows()[0][2].as_deref(), Some("100.00"));
    }

    #[test]
    fn parses_words_and_images() {
        let json = r#"{
            "pages": [{"images": 2, "words": [{"text": "FNB", "x": 10.5, "y": 20.0}]}]
        }"#;
        let src = DumpSource::from_str(json).unwrap();
        assert_eq!(src.page_image_count(0).unwrap(), 2);
        assert_eq!(src.page_words(0).unwrap()[0].text, "FNB");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            DumpSource::from_str("{not json"),
            Err(SourceError::Malformed(_))
        ));
    }
}
