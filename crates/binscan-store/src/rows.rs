//! Flat CSV projection of records

use binscan_domain::Record;
use serde::Serialize;

/// CSV column names, in order
pub const CSV_HEADER: [&str; 11] = [
    "bin",
    "scheme",
    "type",
    "brand",
    "prepaid",
    "country_name",
    "country_code",
    "bank_name",
    "bank_url",
    "bank_phone",
    "lookup_note",
];

/// One CSV row; missing enrichment fields serialize as empty strings
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CsvRow<'a> {
    bin: &'a str,
    scheme: Option<&'a str>,
    card_type: Option<&'a str>,
    brand: Option<&'a str>,
    prepaid: Option<bool>,
    country_name: Option<&'a str>,
    country_code: Option<&'a str>,
    bank_name: Option<&'a str>,
    bank_url: Option<&'a str>,
    bank_phone: Option<&'a str>,
    lookup_note: String,
}

impl<'a> From<&'a Record> for CsvRow<'a> {
    fn from(record: &'a Record) -> Self {
        let details = record.enriched();

        Self {
            bin: record.bin().as_str(),
            scheme: details.and_then(|d| d.scheme()),
            card_type: details.and_then(|d| d.card_type()),
            brand: details.and_then(|d| d.brand()),
            prepaid: details.and_then(|d| d.prepaid()),
            country_name: details.and_then(|d| d.country_name()),
            country_code: details.and_then(|d| d.country_code()),
            bank_name: details.and_then(|d| d.bank_name()),
            bank_url: details.and_then(|d| d.bank_url()),
            bank_phone: details.and_then(|d| d.bank_phone()),
            lookup_note: record.note().to_string(),
        }
    }
}
