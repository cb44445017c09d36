//! HTTP transport for the Binlist lookup service
//!
//! Issues one `GET {base_url}/{bin}` per attempt with an `Accept-Version`
//! header and classifies the response:
//!
//! | Response | Attempt |
//! |----------|---------|
//! | 200 with a JSON object | `Success(Found)` |
//! | 200 with an empty body, `null` or `{}` | `Success(NoData)` |
//! | 200 with anything else | `Terminal(InvalidPayload)` |
//! | 429 | `Retryable(RateLimited)` |
//! | any other status | `Terminal(Status)` |
//! | timeout / network error | `Retryable` |

use crate::{LookupConfig, LookupError};
use binscan_domain::traits::BinLookup;
use binscan_domain::{Attempt, Bin, BinDetails, LookupResponse};
use reqwest::StatusCode;
use tracing::debug;

/// Name of the version-selecting request header
pub const ACCEPT_VERSION_HEADER: &str = "Accept-Version";

/// Binlist API client
pub struct BinlistClient {
    base_url: String,
    accept_version: String,
    client: reqwest::Client,
}

impl BinlistClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Client`] if the HTTP client cannot be built
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("binscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LookupError::Client(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            accept_version: config.accept_version.clone(),
            client,
        })
    }

    /// URL queried for `bin`
    pub fn url_for(&self, bin: &Bin) -> String {
        format!("{}/{}", self.base_url, bin)
    }

    async fn call(&self, bin: &Bin) -> Attempt<LookupError> {
        let response = match self
            .client
            .get(self.url_for(bin))
            .header(ACCEPT_VERSION_HEADER, &self.accept_version)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Attempt::Retryable(classify_transport_error(&e)),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return classify_response(status, "");
        }

        match response.text().await {
            Ok(body) => classify_response(status, &body),
            Err(e) => Attempt::Retryable(classify_transport_error(&e)),
        }
    }
}

impl BinLookup for BinlistClient {
    type Error = LookupError;

    async fn attempt(&self, bin: &Bin) -> Attempt<LookupError> {
        let attempt = self.call(bin).await;
        debug!("Lookup {} -> {:?}", bin, attempt_label(&attempt));
        attempt
    }
}

/// Classify a received response
pub fn classify_response(status: StatusCode, body: &str) -> Attempt<LookupError> {
    match status {
        StatusCode::OK => parse_payload(body),
        StatusCode::TOO_MANY_REQUESTS => Attempt::Retryable(LookupError::RateLimited),
        other => Attempt::Terminal(LookupError::status(other.as_u16())),
    }
}

fn parse_payload(body: &str) -> Attempt<LookupError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Attempt::Success(LookupResponse::NoData);
    }

    let value = match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => value,
        Err(e) => return Attempt::Terminal(LookupError::InvalidPayload(e.to_string())),
    };

    match BinDetails::try_from(value) {
        Ok(details) if details.is_empty() => Attempt::Success(LookupResponse::NoData),
        Ok(details) => Attempt::Success(LookupResponse::Found(details)),
        Err(_) => Attempt::Terminal(LookupError::InvalidPayload(
            "expected a JSON object".to_string(),
        )),
    }
}

fn classify_transport_error(error: &reqwest::Error) -> LookupError {
    if error.is_timeout() {
        LookupError::Timeout
    } else {
        LookupError::Transport(error.to_string())
    }
}

fn attempt_label(attempt: &Attempt<LookupError>) -> String {
    match attempt {
        Attempt::Success(LookupResponse::Found(_)) => "found".to_string(),
        Attempt::Success(LookupResponse::NoData) => "no data".to_string(),
        Attempt::Retryable(e) => format!("retryable: {}", e),
        Attempt::Terminal(e) => format!("terminal: {}", e),
    }
}
