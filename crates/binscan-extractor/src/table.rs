//! Structured (CSV) parse of a source

use crate::candidates::extract_candidates;
use crate::error::ExtractorError;
use csv::ReaderBuilder;

/// Candidates from every data cell of a CSV document
///
/// The first row is read as the header and is not scanned. Rows must all have
/// the header's field count.
///
/// # Errors
///
/// Returns an error if the document has no header row, a row has the wrong
/// number of fields, or a cell is not valid UTF-8.
pub fn extract_from_table(text: &str) -> Result<Vec<String>, ExtractorError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    if reader.headers()?.is_empty() {
        return Err(ExtractorError::MissingHeader);
    }

    let mut candidates = Vec::new();
    for result in reader.records() {
        let record = result?;
        for cell in record.iter() {
            candidates.extend(extract_candidates(cell));
        }
    }

    Ok(candidates)
}
