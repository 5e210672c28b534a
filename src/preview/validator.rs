use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::trace;

use crate::config::model::{PORT_MAX, PORT_MIN};
use crate::preview::ports::Prober;

/// Quiet period after the last candidate before a probe is issued.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("port {0} is outside the allowed range 1025-32768")]
    OutOfRange(i64),
    #[error("port {0} is already in use")]
    InUse(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// A probe for the latest candidate is in flight.
    Pending,
    /// The candidate parsed and its port is currently bindable.
    Valid(u16),
    /// The candidate was rejected, before or after probing.
    Invalid(PortError),
}

/// Parse a raw candidate into a port.
///
/// Rejects non-numeric and out-of-range input synchronously, so the prober
/// is never consulted for values that cannot possibly be used.
pub fn parse_port(raw: &str) -> Result<u16, PortError> {
    let trimmed = raw.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| PortError::NotANumber(trimmed.to_string()))?;
    if value < i64::from(PORT_MIN) || value > i64::from(PORT_MAX) {
        return Err(PortError::OutOfRange(value));
    }
    Ok(value as u16)
}

/// One-shot validation of a single candidate: parse, then probe.
pub async fn check_candidate(raw: &str, prober: &dyn Prober) -> ValidationOutcome {
    match parse_port(raw) {
        Err(err) => ValidationOutcome::Invalid(err),
        Ok(port) => {
            if prober.probe(port).await {
                ValidationOutcome::Valid(port)
            } else {
                ValidationOutcome::Invalid(PortError::InUse(port))
            }
        }
    }
}

type ProbeFuture = Pin<Box<dyn Future<Output = (u16, bool)> + Send>>;

/// Debounced, switch-latest validation of a stream of raw port candidates.
///
/// Candidates arriving inside the debounce window coalesce; only the latest
/// survives. A candidate arriving while a probe is in flight drops that
/// probe's future, so the outcome stream never reports a stale candidate.
pub struct PortValidator {
    prober: Arc<dyn Prober>,
    debounce: Duration,
}

impl PortValidator {
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        Self {
            prober,
            debounce: DEBOUNCE,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Consume candidates from `input`, emit outcomes on `output`.
    ///
    /// Each candidate that survives debouncing produces exactly one terminal
    /// outcome (`Valid` or `Invalid`), preceded by `Pending` when a probe is
    /// issued. Returns when `input` closes or the receiver of `output` goes
    /// away.
    pub async fn run(
        self,
        mut input: mpsc::Receiver<String>,
        output: mpsc::Sender<ValidationOutcome>,
    ) {
        let mut latest: Option<String> = None;
        let mut inflight: Option<ProbeFuture> = None;

        let debounce = tokio::time::sleep(Duration::ZERO);
        tokio::pin!(debounce);

        loop {
            tokio::select! {
                maybe = input.recv() => {
                    let Some(raw) = maybe else { break };
                    trace!(candidate = %raw, "new port candidate");
                    // Switch-latest: anything in flight is now stale.
                    inflight = None;
                    latest = Some(raw);
                    debounce.as_mut().reset(Instant::now() + self.debounce);
                }
                () = &mut debounce, if latest.is_some() => {
                    let raw = latest.take().unwrap();
                    match parse_port(&raw) {
                        Err(err) => {
                            if output.send(ValidationOutcome::Invalid(err)).await.is_err() {
                                break;
                            }
                        }
                        Ok(port) => {
                            if output.send(ValidationOutcome::Pending).await.is_err() {
                                break;
                            }
                            let prober = self.prober.clone();
                            inflight = Some(Box::pin(async move {
                                (port, prober.probe(port).await)
                            }));
                        }
                    }
                }
                (port, free) = async { inflight.as_mut().unwrap().await }, if inflight.is_some() => {
                    inflight = None;
                    let outcome = if free {
                        ValidationOutcome::Valid(port)
                    } else {
                        ValidationOutcome::Invalid(PortError::InUse(port))
                    };
                    if output.send(outcome).await.is_err() {
                        break;
                    }
                }
            }
        }
    }
}
