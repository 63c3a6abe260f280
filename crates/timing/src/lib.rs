//! Stage timing for resolution pipeline runs.
//!
//! A [`TimingContext`] belongs to exactly one pipeline invocation. Stages are
//! sequential, never nested, and each run's context is dropped once the
//! response has been produced, so no synchronization is needed. Durations are
//! stored in milliseconds rounded to two decimals, which is the precision the
//! observability surface exposes.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Accumulates named stage durations for a single pipeline run.
#[derive(Debug, Clone)]
pub struct TimingContext {
    started: Instant,
    stages: BTreeMap<String, f64>,
}

/// Serializable copy of a context's recorded stages plus the total elapsed
/// time. Safe to hand to callers; mutating it cannot touch the live context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    /// Stage name -> duration in milliseconds (2-decimal precision).
    pub stages: BTreeMap<String, f64>,
    /// Elapsed time since the context was created, same precision.
    pub total_ms: f64,
}

fn round2(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}

impl TimingContext {
    /// Fresh context with an empty stage map and start time = now.
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            stages: BTreeMap::new(),
        }
    }

    /// Record an elapsed duration under `stage`. A repeated stage name
    /// overwrites the previous value (stage names are unique per run).
    pub fn record(&mut self, stage: impl Into<String>, elapsed: Duration) {
        self.record_ms(stage, elapsed.as_secs_f64() * 1_000.0);
    }

    /// Record a raw millisecond value under `stage`, rounded to two decimals.
    pub fn record_ms(&mut self, stage: impl Into<String>, ms: f64) {
        self.stages.insert(stage.into(), round2(ms));
    }

    /// Run `op`, measure its wall-clock time, and record it under `stage`
    /// whether the operation succeeds or fails. The outcome is returned
    /// unchanged; an `Err` output propagates untouched.
    pub async fn time<F>(&mut self, stage: &str, op: F) -> F::Output
    where
        F: Future,
    {
        let start = Instant::now();
        let out = op.await;
        self.record(stage, start.elapsed());
        out
    }

    /// Synchronous variant of [`TimingContext::time`].
    pub fn time_sync<T>(&mut self, stage: &str, op: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = op();
        self.record(stage, start.elapsed());
        out
    }

    /// Duration recorded for `stage`, if any.
    pub fn stage_ms(&self, stage: &str) -> Option<f64> {
        self.stages.get(stage).copied()
    }

    /// Elapsed milliseconds since the context was created.
    pub fn total_elapsed_ms(&self) -> f64 {
        round2(self.started.elapsed().as_secs_f64() * 1_000.0)
    }

    /// Owned copy of the recorded stages and current total.
    pub fn snapshot(&self) -> TimingSummary {
        TimingSummary {
            stages: self.stages.clone(),
            total_ms: self.total_elapsed_ms(),
        }
    }
}

impl Default for TimingContext {
    fn default() -> Self {
        Self::new()
    }
}
