/// Heuristic thresholds for the extraction pipeline.
///
/// These are policy constants, not derived values — kept in one place so
/// boundary behavior (e.g. exactly 2 header matches vs. 1) can be probed in
/// tests and tuned per statement format.
#[derive(Debug, Clone)]
pub struct ExtractPolicy {
    /// Minimum rows for a table to be considered at all (header + 2 data rows).
    pub min_table_rows: usize,
    /// Header cells that must match the transaction vocabulary before a
    /// table is treated as a transaction table.
    pub min_header_matches: usize,
    /// Characters of text across the first two pages below which a document
    /// is classified image-based.
    pub text_sample_chars: usize,
    /// Text-fallback lines shorter than this are skipped as noise.
    pub min_line_len: usize,
    /// Divisor for monthly averages. The source statements cover a fixed
    /// 3-month window; this does not derive from the observed date range.
    pub reporting_months: u32,
    /// Year assigned to dates parsed from formats that carry none ("05 Mar").
    pub reference_year: i32,
}

impl Default for ExtractPolicy {
    fn default() -> Self {
        Self {
            min_table_rows: 3,
            min_header_matches: 2,
            text_sample_chars: 100,
            min_line_len: 10,
            reporting_months: 3,
            reference_year: 2025,
        }
    }
}
