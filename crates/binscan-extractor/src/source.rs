//! Per-source extraction with raw-text fallback

use crate::candidates::extract_from_raw_text;
use crate::table::extract_from_table;
use tracing::debug;

/// Candidates found in one source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceExtraction {
    /// Raw candidate strings, duplicates included
    pub candidates: Vec<String>,

    /// True when the table parse failed or found nothing and raw text was scanned
    pub used_fallback: bool,
}

/// Extract candidates from one source's content
///
/// Tries a CSV parse first. If that fails, or succeeds without finding
/// anything, the whole text is scanned as raw text instead. Never fails.
pub fn extract_from_source(text: &str) -> SourceExtraction {
    match extract_from_table(text) {
        Ok(candidates) if !candidates.is_empty() => SourceExtraction {
            candidates,
            used_fallback: false,
        },
        Ok(_) => {
            debug!("No BIN-like values in table cells, scanning raw text");
            raw_fallback(text)
        }
        Err(e) => {
            debug!("Table parse failed ({}), scanning raw text", e);
            raw_fallback(text)
        }
    }
}

fn raw_fallback(text: &str) -> SourceExtraction {
    SourceExtraction {
        candidates: extract_from_raw_text(text),
        used_fallback: true,
    }
}
