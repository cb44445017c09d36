//! Enrichment payload returned by the BIN lookup service
//!
//! The payload is stored exactly as the service sent it. Typed views read from it
//! leniently: a field with an unexpected shape is reported as absent instead of
//! rejecting the whole response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Everything the lookup service knows about one BIN
///
/// Serializes back to the object it was parsed from, so the structured output
/// carries the payload unchanged (explicit nulls and integer coordinates included).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BinDetails {
    raw: Map<String, Value>,
}

impl BinDetails {
    /// Wrap an already-decoded JSON object
    pub fn from_map(raw: Map<String, Value>) -> Self {
        Self { raw }
    }

    /// The payload as received
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// True when the service returned an empty object
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Card scheme, e.g. "visa"
    pub fn scheme(&self) -> Option<&str> {
        self.str_field("scheme")
    }

    /// Card type, e.g. "debit"
    pub fn card_type(&self) -> Option<&str> {
        self.str_field("type")
    }

    /// Product brand, e.g. "Visa/Dankort"
    pub fn brand(&self) -> Option<&str> {
        self.str_field("brand")
    }

    /// Prepaid flag, if reported as a boolean
    pub fn prepaid(&self) -> Option<bool> {
        self.raw.get("prepaid").and_then(Value::as_bool)
    }

    /// True only when the service reported `prepaid: true`
    pub fn is_prepaid(&self) -> bool {
        self.prepaid() == Some(true)
    }

    /// Issuing country name
    pub fn country_name(&self) -> Option<&str> {
        nested_str(&self.raw, "country", "name")
    }

    /// Issuing country alpha-2 code, if reported
    pub fn country_code(&self) -> Option<&str> {
        nested_str(&self.raw, "country", "alpha2")
    }

    /// Issuing bank name
    pub fn bank_name(&self) -> Option<&str> {
        nested_str(&self.raw, "bank", "name")
    }

    /// Issuing bank website
    pub fn bank_url(&self) -> Option<&str> {
        nested_str(&self.raw, "bank", "url")
    }

    /// Issuing bank phone number
    pub fn bank_phone(&self) -> Option<&str> {
        nested_str(&self.raw, "bank", "phone")
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str)
    }
}

fn nested_str<'a>(raw: &'a Map<String, Value>, outer: &str, key: &str) -> Option<&'a str> {
    raw.get(outer)
        .and_then(Value::as_object)
        .and_then(|inner| inner.get(key))
        .and_then(Value::as_str)
}

impl From<Map<String, Value>> for BinDetails {
    fn from(raw: Map<String, Value>) -> Self {
        Self::from_map(raw)
    }
}

impl TryFrom<Value> for BinDetails {
    type Error = Value;

    /// Only JSON objects are payloads; anything else is handed back
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(raw) => Ok(Self { raw }),
            other => Err(other),
        }
    }
}
