//! Record module - the canonical unit of output

use crate::{Bin, BinDetails, Enrichment};
use serde::{Deserialize, Serialize};
use std::fmt;

const ENRICHED_OK: &str = "enriched_ok";
const NO_DATA: &str = "no_data";
const ENRICH_ERROR_PREFIX: &str = "enrich_error: ";

/// Status note attached to every record
///
/// Renders as `enriched_ok`, `no_data`, `enrich_error: <cause>`, or the empty
/// string when enrichment was not attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LookupNote {
    /// Payload attached
    EnrichedOk,
    /// The service had nothing for this identifier
    NoData,
    /// Enrichment failed with the given cause
    EnrichError(String),
    /// Enrichment disabled for this run
    NotAttempted,
}

impl LookupNote {
    /// True for [`LookupNote::EnrichError`]
    pub fn is_error(&self) -> bool {
        matches!(self, LookupNote::EnrichError(_))
    }
}

impl fmt::Display for LookupNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupNote::EnrichedOk => f.write_str(ENRICHED_OK),
            LookupNote::NoData => f.write_str(NO_DATA),
            LookupNote::EnrichError(cause) => write!(f, "{}{}", ENRICH_ERROR_PREFIX, cause),
            LookupNote::NotAttempted => Ok(()),
        }
    }
}

impl From<String> for LookupNote {
    fn from(value: String) -> Self {
        match value.as_str() {
            ENRICHED_OK => LookupNote::EnrichedOk,
            NO_DATA => LookupNote::NoData,
            "" => LookupNote::NotAttempted,
            other => match other.strip_prefix(ENRICH_ERROR_PREFIX) {
                Some(cause) => LookupNote::EnrichError(cause.to_string()),
                None => LookupNote::EnrichError(other.to_string()),
            },
        }
    }
}

impl From<LookupNote> for String {
    fn from(note: LookupNote) -> Self {
        note.to_string()
    }
}

/// One bin and the outcome of enriching it
///
/// Built once, after the enrichment attempt for its bin has settled, and not
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    bin: Bin,
    note: LookupNote,
    enriched: Option<BinDetails>,
}

impl Record {
    /// Build a record from an enrichment outcome
    pub fn from_enrichment(bin: Bin, enrichment: Enrichment) -> Self {
        let (note, enriched) = match enrichment {
            Enrichment::Enriched(details) => (LookupNote::EnrichedOk, Some(details)),
            Enrichment::NoData => (LookupNote::NoData, None),
            Enrichment::Failed(cause) => (LookupNote::EnrichError(cause), None),
            Enrichment::Skipped => (LookupNote::NotAttempted, None),
        };
        Self { bin, note, enriched }
    }

    /// The identifier
    pub fn bin(&self) -> &Bin {
        &self.bin
    }

    /// The status note
    pub fn note(&self) -> &LookupNote {
        &self.note
    }

    /// The enrichment payload, if any
    pub fn enriched(&self) -> Option<&BinDetails> {
        self.enriched.as_ref()
    }
}

/// All records of one run, ascending by bin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunResult {
    records: Vec<Record>,
}

impl RunResult {
    /// Wrap records, sorting them by bin
    pub fn new(mut records: Vec<Record>) -> Self {
        records.sort_by(|a, b| a.bin.cmp(&b.bin));
        Self { records }
    }

    /// Records in ascending bin order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the run produced no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume into the record list
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
