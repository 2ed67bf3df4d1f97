//! `replicate-client` — typed driver for the Replicate predictions API.
//!
//! Predictions on Replicate are long-running: a submission returns
//! immediately with a job id, and the caller is expected to poll the job
//! until it reaches a terminal state. This crate wraps that protocol as a
//! single synchronous-looking operation.
//!
//! # Architecture
//!
//! ```text
//! GenerationRequest
//!     │
//!     ▼
//! generate()        ← validates input, submits via a JobClient
//!     │
//!     ▼
//! poll()            ← bounded sleep-then-fetch loop, one job at a time
//!     │
//!     ▼
//! GenerationOutput  ← prediction id + first output URL
//! ```
//!
//! The remote boundary is the [`JobClient`] trait; [`ReplicateClient`] is the
//! reqwest implementation. Tests script the trait directly and never touch
//! the network.

pub mod client;
pub mod error;
pub mod generate;
pub mod poll;
pub mod types;

pub use client::{JobClient, ReplicateClient};
pub use error::ClientError;
pub use generate::{generate, GenerateError, GenerationOutput, GenerationRequest};
pub use poll::{poll, FailureKind, PollConfig, PollOutcome};
pub use types::{JobSubmission, Prediction, PredictionInput, PredictionRequest, PredictionStatus};

/// Convenience `Result` alias for client calls.
pub type Result<T> = std::result::Result<T, ClientError>;
