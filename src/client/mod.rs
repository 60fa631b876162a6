pub mod outcome;

pub use outcome::Outcome;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::commands::{Command, CommandReply, CommandRequest};
use crate::config::Config;

/// Default deadline for a dispatch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Executes one command at a time against the controller endpoint.
///
/// The client owns the idle/pending state machine: at most one
/// dispatch is in flight, and every dispatch settles with exactly one
/// [`Outcome`]. Errors never escape `dispatch`.
pub struct DispatchClient {
    http: Client,
    endpoint: String,
    default_timeout: Duration,
    pending: AtomicBool,
    last_outcome: RwLock<Option<Outcome>>,
}

impl DispatchClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = Client::builder().build().context("building http client")?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            default_timeout: DEFAULT_TIMEOUT,
            pending: AtomicBool::new(false),
            last_outcome: RwLock::new(None),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut client = Self::new(config.endpoint.clone())?;
        client.default_timeout = Duration::from_millis(config.default_timeout_ms);
        Ok(client)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// True while a dispatch is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Outcome of the most recently settled dispatch, if any.
    pub async fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome.read().await.clone()
    }

    /// Dispatch with the configured default deadline.
    pub async fn dispatch(&self, command: &Command) -> Outcome {
        self.dispatch_with_timeout(command, self.default_timeout).await
    }

    /// Execute one command under `deadline` and classify the result.
    pub async fn dispatch_with_timeout(&self, command: &Command, deadline: Duration) -> Outcome {
        // Single-flight gate. A dispatch that loses here reports only
        // to its caller; the in-flight one keeps the shared state.
        if self
            .pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Outcome::ApplicationFailure {
                detail: "request already in progress".to_string(),
            };
        }

        *self.last_outcome.write().await = None;

        let outcome = match command.validate() {
            Err(detail) => {
                // Short-circuit: the transport is never touched.
                Outcome::ValidationFailure { detail }
            }
            Ok(()) => self.execute(command, deadline).await,
        };

        debug!(command = %command.name(), outcome = ?outcome, "dispatch settled");
        *self.last_outcome.write().await = Some(outcome.clone());
        self.pending.store(false, Ordering::Release);
        outcome
    }

    async fn execute(&self, command: &Command, deadline: Duration) -> Outcome {
        let body = CommandRequest::encode(command);
        debug!(
            endpoint = %self.endpoint,
            command = %body.command,
            timeout_ms = %deadline.as_millis(),
            "dispatching command"
        );

        match tokio::time::timeout(deadline, self.round_trip(&body)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                // Dropping the exchange future aborts the underlying
                // request, so the transport's own abort error is never
                // observed and the timeout is reported exactly once.
                warn!(
                    command = %body.command,
                    timeout_ms = %deadline.as_millis(),
                    "deadline elapsed before settlement"
                );
                Outcome::Timeout
            }
        }
    }

    /// One full exchange: send, check status, read and parse the body.
    async fn round_trip(&self, body: &CommandRequest) -> Outcome {
        let response = match self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return classify_transport_error(&err),
        };

        let status = response.status();
        if !status.is_success() {
            debug!(status = %status, "controller returned a non-success status");
            let status_text = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string());
            return Outcome::ServerFailure { status_text };
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return classify_transport_error(&err),
        };

        match serde_json::from_str::<CommandReply>(&text) {
            Ok(reply) => match reply.into_message() {
                Some(message) => Outcome::Success { message },
                None => Outcome::ApplicationFailure {
                    detail: "response contained neither message nor pose".to_string(),
                },
            },
            Err(err) => Outcome::ApplicationFailure {
                detail: format!("malformed response body: {}", err),
            },
        }
    }
}

/// Classification goes by the error's kind, never by matching message
/// text. Abort-style timeouts fold into `Timeout`; everything else at
/// the transport level is a `NetworkFailure`.
fn classify_transport_error(err: &reqwest::Error) -> Outcome {
    if err.is_timeout() {
        return Outcome::Timeout;
    }
    if err.is_decode() {
        return Outcome::ApplicationFailure {
            detail: err.to_string(),
        };
    }
    Outcome::NetworkFailure {
        detail: err.to_string(),
    }
}
