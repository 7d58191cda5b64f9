//! # Call Simulator
//!
//! Stands in for the network request a menu item would make. Every call is
//! scheduled as a tokio task that sleeps for the configured delay, draws one
//! sample from an [`OutcomeSampler`] and sends exactly one [`CallResult`]
//! back over an unbounded channel. The event loop owns the receiving end and
//! applies results on its own thread, so no UI state is ever touched from the
//! timer task.
//!
//! Calls are never cancelled implicitly. [`CallHandle::cancel`] exists for
//! callers that want to drop a call that is no longer relevant.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::CallError;
use crate::menu::tabs::parse_endpoint;

/// Reason attached to every simulated failure.
pub const SIMULATED_FAILURE_REASON: &str = "simulated error";

/// Source of uniform samples in `[0, 1)`.
pub trait OutcomeSampler: Send + Sync {
    fn sample(&self) -> f64;
}

/// Production sampler backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSampler;

impl OutcomeSampler for ThreadRngSampler {
    fn sample(&self) -> f64 {
        rand::random::<f64>()
    }
}

/// Deterministic sampler for reproducible runs.
#[derive(Debug)]
pub struct SeededSampler {
    rng: Mutex<StdRng>,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl OutcomeSampler for SeededSampler {
    fn sample(&self) -> f64 {
        // A poisoned lock still holds a usable RNG
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen::<f64>()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Success,
    Failure { reason: String },
}

impl CallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success)
    }
}

/// The resolved result of one simulated call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallResult {
    /// Sequence number assigned when the call was issued.
    pub call_id: u64,
    pub item_label: String,
    pub endpoint: String,
    pub outcome: CallOutcome,
}

/// Handle to an outstanding simulated call.
#[derive(Debug)]
pub struct CallHandle {
    call_id: u64,
    task: JoinHandle<()>,
}

impl CallHandle {
    pub fn call_id(&self) -> u64 {
        self.call_id
    }

    /// Abort the call. Its result will never be delivered.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Map a sample to an outcome: samples below `failure_probability` fail.
pub fn outcome_for(sample: f64, failure_probability: f64) -> CallOutcome {
    if sample < failure_probability {
        CallOutcome::Failure {
            reason: SIMULATED_FAILURE_REASON.to_string(),
        }
    } else {
        CallOutcome::Success
    }
}

pub struct CallSimulator {
    delay: Duration,
    failure_probability: f64,
    sampler: Arc<dyn OutcomeSampler>,
    results: UnboundedSender<CallResult>,
    next_call_id: u64,
}

impl CallSimulator {
    pub fn new(
        delay: Duration,
        failure_probability: f64,
        sampler: Arc<dyn OutcomeSampler>,
        results: UnboundedSender<CallResult>,
    ) -> Self {
        Self {
            delay,
            failure_probability,
            sampler,
            results,
            next_call_id: 1,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Draw one outcome right now, without any delay.
    pub fn draw_outcome(&self) -> CallOutcome {
        outcome_for(self.sampler.sample(), self.failure_probability)
    }

    /// Schedule a simulated call for a menu item.
    ///
    /// The caller is expected to show the call as pending as soon as this
    /// returns. The result arrives on the results channel once the delay has
    /// elapsed. Must be called from within a tokio runtime.
    pub fn simulate(&mut self, label: &str, endpoint: &str) -> Result<CallHandle, CallError> {
        if label.is_empty() {
            return Err(CallError::EmptyLabel);
        }
        parse_endpoint(endpoint)?;

        let call_id = self.next_call_id;
        self.next_call_id += 1;

        let delay = self.delay;
        let failure_probability = self.failure_probability;
        let sampler = Arc::clone(&self.sampler);
        let results = self.results.clone();
        let item_label = label.to_string();
        let endpoint = endpoint.to_string();

        debug!(
            call_id,
            %endpoint,
            delay_ms = delay.as_millis() as u64,
            "scheduling simulated call"
        );

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = outcome_for(sampler.sample(), failure_probability);
            debug!(call_id, %endpoint, success = outcome.is_success(), "simulated call resolved");

            let result = CallResult {
                call_id,
                item_label,
                endpoint,
                outcome,
            };
            if results.send(result).is_err() {
                debug!(call_id, "result receiver dropped, discarding simulated call result");
            }
        });

        Ok(CallHandle { call_id, task })
    }
}
