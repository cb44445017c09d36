//! Post-enrichment record filters

use binscan_domain::Record;
use serde::{Deserialize, Serialize};

/// Optional narrowing of a run's records
///
/// Applied after enrichment, never before. Both filters drop records that
/// carry no enrichment payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    /// Keep only records issued in this ISO 3166 alpha-2 country
    pub only_country: Option<String>,

    /// Keep only prepaid instruments
    pub prepaid_only: bool,
}

impl Filters {
    /// No filtering
    pub fn none() -> Self {
        Self::default()
    }

    /// Filter by country code (case-insensitive)
    pub fn country(mut self, code: impl Into<String>) -> Self {
        self.only_country = Some(code.into());
        self
    }

    /// Keep only prepaid instruments
    pub fn prepaid(mut self) -> Self {
        self.prepaid_only = true;
        self
    }

    /// True when no filter is set
    pub fn is_empty(&self) -> bool {
        self.only_country.is_none() && !self.prepaid_only
    }

    /// Validate the country code shape
    pub fn validate(&self) -> Result<(), String> {
        match &self.only_country {
            Some(code) if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) => {
                Err(format!("only_country must be a 2-letter code, got '{}'", code))
            }
            _ => Ok(()),
        }
    }

    /// Apply the country filter, then the prepaid filter
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        let country = self.only_country.as_ref().map(|c| c.to_ascii_uppercase());

        records
            .into_iter()
            .filter(|record| match &country {
                Some(code) => record
                    .enriched()
                    .and_then(|details| details.country_code())
                    .is_some_and(|alpha2| alpha2.eq_ignore_ascii_case(code)),
                None => true,
            })
            .filter(|record| {
                !self.prepaid_only || record.enriched().is_some_and(|details| details.is_prepaid())
            })
            .collect()
    }
}
