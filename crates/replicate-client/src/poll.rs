use std::time::Duration;

use tracing::debug;

use crate::client::JobClient;
use crate::types::PredictionStatus;

// ---------------------------------------------------------------------------
// PollConfig
// ---------------------------------------------------------------------------

/// Pacing for the status poll loop.
///
/// `max_attempts * interval` is the hard wall-clock budget for one job; both
/// must be positive. The defaults give 60 attempts at one-second spacing,
/// a 60-second budget.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1000),
            max_attempts: 60,
        }
    }
}

// ---------------------------------------------------------------------------
// PollOutcome
// ---------------------------------------------------------------------------

/// Why a poll loop ended without a usable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The remote reported failure, returned a success with no usable
    /// output, or the status fetch itself failed.
    Remote,
    /// The attempt budget ran out before any terminal status appeared. The
    /// job may still be running remotely.
    Timeout,
    /// The remote job was canceled.
    Canceled,
}

/// Terminal result of polling one submitted job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Completed(String),
    Failed { kind: FailureKind, detail: String },
}

// ---------------------------------------------------------------------------
// poll
// ---------------------------------------------------------------------------

/// Poll `job_id` until a terminal status appears or the attempt budget runs
/// out.
///
/// Each attempt suspends for `config.interval` (a cooperative tokio sleep —
/// concurrent invocations are unaffected), then fetches the status once.
/// Polls for one job are strictly sequential; a fetch failure ends the loop
/// immediately rather than being retried.
pub async fn poll<C>(client: &C, job_id: &str, config: &PollConfig) -> PollOutcome
where
    C: JobClient + ?Sized,
{
    for attempt in 1..=config.max_attempts {
        tokio::time::sleep(config.interval).await;

        let prediction = match client.fetch_status(job_id).await {
            Ok(p) => p,
            Err(e) => {
                return PollOutcome::Failed {
                    kind: FailureKind::Remote,
                    detail: e.to_string(),
                };
            }
        };

        debug!(job_id, attempt, status = ?prediction.status, "poll attempt");

        match prediction.status {
            PredictionStatus::Succeeded => {
                return match prediction.first_output() {
                    Some(output) => PollOutcome::Completed(output),
                    None => PollOutcome::Failed {
                        kind: FailureKind::Remote,
                        detail: "empty output".to_string(),
                    },
                };
            }
            PredictionStatus::Failed => {
                return PollOutcome::Failed {
                    kind: FailureKind::Remote,
                    detail: prediction.error.unwrap_or_else(|| "failed".to_string()),
                };
            }
            PredictionStatus::Canceled => {
                return PollOutcome::Failed {
                    kind: FailureKind::Canceled,
                    detail: prediction.error.unwrap_or_else(|| "canceled".to_string()),
                };
            }
            PredictionStatus::Starting | PredictionStatus::Processing => {}
        }
    }

    PollOutcome::Failed {
        kind: FailureKind::Timeout,
        detail: "generation timed out".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::error::ClientError;
    use crate::types::{JobSubmission, Prediction, PredictionRequest};

    /// Replays a scripted sequence of `fetch_status` results and counts
    /// calls. Once the script is exhausted it reports `Processing` forever.
    struct ScriptedClient {
        script: Mutex<VecDeque<Result<Prediction, ClientError>>>,
        fetches: AtomicU32,
    }

    impl ScriptedClient {
        fn new(script: Vec<Result<Prediction, ClientError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                fetches: AtomicU32::new(0),
            }
        }

        fn fetch_count(&self) -> u32 {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JobClient for ScriptedClient {
        async fn submit(&self, _request: &PredictionRequest) -> Result<JobSubmission, ClientError> {
            unreachable!("poll tests never submit");
        }

        async fn fetch_status(&self, id: &str) -> Result<Prediction, ClientError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(snapshot(id, PredictionStatus::Processing)))
        }
    }

    fn snapshot(id: &str, status: PredictionStatus) -> Prediction {
        Prediction {
            id: id.to_string(),
            status,
            output: None,
            error: None,
        }
    }

    fn succeeded(output: serde_json::Value) -> Prediction {
        Prediction {
            id: "p-1".into(),
            status: PredictionStatus::Succeeded,
            output: Some(output),
            error: None,
        }
    }

    fn fast(max_attempts: u32) -> PollConfig {
        PollConfig {
            interval: Duration::from_millis(1),
            max_attempts,
        }
    }

    #[tokio::test]
    async fn stops_on_first_terminal_status() {
        let client = ScriptedClient::new(vec![
            Ok(snapshot("p-1", PredictionStatus::Starting)),
            Ok(snapshot("p-1", PredictionStatus::Processing)),
            Ok(succeeded(json!(["https://cdn/a.png"]))),
        ]);

        let outcome = poll(&client, "p-1", &fast(60)).await;

        assert_eq!(outcome, PollOutcome::Completed("https://cdn/a.png".into()));
        assert_eq!(client.fetch_count(), 3);
    }

    #[tokio::test]
    async fn remote_failure_stops_immediately() {
        let client = ScriptedClient::new(vec![Ok(Prediction {
            id: "p-1".into(),
            status: PredictionStatus::Failed,
            output: None,
            error: Some("NSFW content detected".into()),
        })]);

        let outcome = poll(&client, "p-1", &fast(60)).await;

        assert_eq!(
            outcome,
            PollOutcome::Failed {
                kind: FailureKind::Remote,
                detail: "NSFW content detected".into(),
            }
        );
        assert_eq!(client.fetch_count(), 1);
    }

    #[tokio::test]
    async fn remote_failure_without_reason_uses_status_name() {
        let client = ScriptedClient::new(vec![Ok(snapshot("p-1", PredictionStatus::Failed))]);

        let outcome = poll(&client, "p-1", &fast(60)).await;

        assert_eq!(
            outcome,
            PollOutcome::Failed {
                kind: FailureKind::Remote,
                detail: "failed".into(),
            }
        );
    }

    #[tokio::test]
    async fn canceled_keeps_its_own_kind() {
        let client = ScriptedClient::new(vec![Ok(snapshot("p-1", PredictionStatus::Canceled))]);

        let outcome = poll(&client, "p-1", &fast(60)).await;

        assert_eq!(
            outcome,
            PollOutcome::Failed {
                kind: FailureKind::Canceled,
                detail: "canceled".into(),
            }
        );
    }

    #[tokio::test]
    async fn transport_error_aborts_loop() {
        let client = ScriptedClient::new(vec![Err(ClientError::Api {
            status: 500,
            message: "bad gateway".into(),
        })]);

        let outcome = poll(&client, "p-1", &fast(60)).await;

        match outcome {
            PollOutcome::Failed { kind, detail } => {
                assert_eq!(kind, FailureKind::Remote);
                assert!(detail.contains("500"), "detail should carry the status: {detail}");
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(client.fetch_count(), 1);
    }

    #[tokio::test]
    async fn empty_output_is_a_remote_failure() {
        let client = ScriptedClient::new(vec![Ok(succeeded(json!([])))]);

        let outcome = poll(&client, "p-1", &fast(60)).await;

        assert_eq!(
            outcome,
            PollOutcome::Failed {
                kind: FailureKind::Remote,
                detail: "empty output".into(),
            }
        );
    }

    #[tokio::test]
    async fn scalar_output_completes() {
        let client = ScriptedClient::new(vec![Ok(succeeded(json!("https://cdn/only.png")))]);

        let outcome = poll(&client, "p-1", &fast(60)).await;

        assert_eq!(outcome, PollOutcome::Completed("https://cdn/only.png".into()));
    }

    #[tokio::test]
    async fn budget_exhaustion_times_out() {
        // Script is empty — every attempt reports Processing.
        let client = ScriptedClient::new(vec![]);

        let outcome = poll(&client, "p-1", &fast(4)).await;

        assert_eq!(
            outcome,
            PollOutcome::Failed {
                kind: FailureKind::Timeout,
                detail: "generation timed out".into(),
            }
        );
        assert_eq!(client.fetch_count(), 4);
    }
}
