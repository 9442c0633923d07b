// ============================================================
// HEADER LOCATOR
// ============================================================
// Skip preamble lines that some export tools put above the header

use csv::ReaderBuilder;

use crate::domain::import::Delimiter;

/// Where the header line sits in the decoded text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HeaderLocation {
    /// Zero-based line index
    pub line_index: usize,

    /// Byte offset of the first character of the header line
    pub byte_offset: usize,
}

/// Find the header: the first line that is neither blank nor commented out
/// and that splits into at least two fields under one of `delimiters`.
///
/// The location does not depend on which delimiter is being tried, so every
/// candidate sees the same header line. A quoted title such as
/// `"Report, Jan"` stays a single field under every delimiter and is skipped.
pub(crate) fn locate_header(
    text: &str,
    delimiters: &[Delimiter],
    comment_marker: &str,
) -> Option<HeaderLocation> {
    let mut byte_offset = 0;

    for (line_index, raw_line) in text.split_inclusive('\n').enumerate() {
        let line = raw_line.trim_end_matches(['\r', '\n']);
        let content = line.trim_start();

        if !content.is_empty()
            && !content.starts_with(comment_marker)
            && delimiters.iter().any(|d| field_count(line, *d) >= 2)
        {
            return Some(HeaderLocation {
                line_index,
                byte_offset,
            });
        }

        byte_offset += raw_line.len();
    }

    None
}

/// Number of fields `line` splits into, honouring quotes
pub(crate) fn field_count(line: &str, delimiter: Delimiter) -> usize {
    if !line.contains(delimiter.as_char()) {
        return 1;
    }

    ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(|record| record.ok())
        .map_or(1, |record| record.len())
}
