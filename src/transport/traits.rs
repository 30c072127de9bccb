//! Trait abstraction for the submission transport to enable mocking in tests

use super::error::SubmissionError;
use async_trait::async_trait;

/// Delivers an assembled form submission, single attempt, no retry
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Post a submission title and its HTML content fragment
    async fn post(&self, title: &str, content: &str) -> Result<(), SubmissionError>;
}
