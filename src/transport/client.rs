//! HTTP client for posting bookings to the site's REST API
//!
//! Submissions go to the booking-form REST route as a JSON body with
//! `title` and `content`, optionally authenticated with a REST nonce.

use super::error::SubmissionError;
use super::traits::SubmissionTransport;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default REST API root
const DEFAULT_ENDPOINT: &str = "http://localhost:8080/wp-json";

/// Route that accepts booking submissions
pub const BOOKING_ROUTE: &str = "/booking-form/v1/booking";

/// Environment variable overriding the configured endpoint
const ENDPOINT_ENV: &str = "BOOKING_FORM_ENDPOINT";

#[derive(Debug, Serialize)]
struct BookingRequest<'a> {
    title: &'a str,
    content: &'a str,
}

/// REST error payload, e.g. `{"code": "...", "message": "...", "data": {...}}`
#[derive(Debug, Deserialize)]
struct RestErrorBody {
    message: Option<String>,
}

/// Transport posting submissions over HTTP
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    nonce: Option<String>,
}

impl HttpTransport {
    /// Create a transport for the configured endpoint.
    /// `BOOKING_FORM_ENDPOINT` takes precedence when set.
    pub fn new(endpoint: Option<&str>, nonce: Option<String>) -> Result<Self> {
        let endpoint = resolve_endpoint(std::env::var(ENDPOINT_ENV).ok(), endpoint);
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: booking_url(&endpoint),
            nonce,
        })
    }

    /// Full URL submissions are posted to
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    async fn post(&self, title: &str, content: &str) -> Result<(), SubmissionError> {
        let mut request = self
            .client
            .post(&self.url)
            .json(&BookingRequest { title, content });
        if let Some(nonce) = &self.nonce {
            request = request.header("X-WP-Nonce", nonce);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("Booking request to {} failed: {e}", self.url);
            SubmissionError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("Booking accepted with status {status}");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let err = error_from_response(status.as_u16(), &body);
        tracing::warn!("Booking rejected with status {status}: {err}");
        Err(err)
    }
}

fn resolve_endpoint(from_env: Option<String>, configured: Option<&str>) -> String {
    from_env
        .filter(|e| !e.is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
}

fn booking_url(endpoint: &str) -> String {
    format!("{}{}", endpoint.trim_end_matches('/'), BOOKING_ROUTE)
}

/// Prefer the REST error message, fall back to the status code
fn error_from_response(status: u16, body: &str) -> SubmissionError {
    let message = serde_json::from_str::<RestErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Request failed with status {status}"));
    SubmissionError::new(message)
}
