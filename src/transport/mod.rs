//! Submission transport for delivering completed forms

mod client;
mod error;
mod traits;

pub use client::HttpTransport;
pub use error::SubmissionError;
pub use traits::SubmissionTransport;

#[cfg(test)]
pub use traits::MockSubmissionTransport;
