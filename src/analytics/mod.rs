// src/analytics/mod.rs
//! Aggregate statistics over a finished batch.

use crate::orchestrator::TopicOutcome;
use crate::types::Topic;
use serde::Serialize;
use std::time::Duration;

/// The slowest topic of a batch and how long it took end to end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlowestTopic {
    pub topic: Topic,
    #[serde(rename = "total_secs", serialize_with = "as_secs")]
    pub total: Duration,
}

/// Counts and timings for a batch.
///
/// Generation and posting times are summed over topics, so with concurrent
/// batches they exceed the wall-clock duration of the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    #[serde(rename = "generation_secs", serialize_with = "as_secs")]
    pub generation_time: Duration,
    #[serde(rename = "posting_secs", serialize_with = "as_secs")]
    pub posting_time: Duration,
    #[serde(rename = "mean_total_secs", serialize_with = "as_secs")]
    pub mean_total_time: Duration,
    pub slowest: Option<SlowestTopic>,
}

fn as_secs<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[TopicOutcome]) -> Self {
        let total = outcomes.len();
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        let generation_time = outcomes.iter().map(|o| o.timings.generation).sum();
        let posting_time = outcomes.iter().map(|o| o.timings.posting).sum();
        let total_time: Duration = outcomes.iter().map(|o| o.timings.total).sum();

        // First of equals wins
        let slowest = outcomes
            .iter()
            .rev()
            .max_by_key(|o| o.timings.total)
            .map(|o| SlowestTopic {
                topic: o.topic.clone(),
                total: o.timings.total,
            });

        Self {
            total,
            succeeded,
            failed: total - succeeded,
            generation_time,
            posting_time,
            mean_total_time: mean(total_time, total),
            slowest,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// One-line description for the completion message.
    pub fn headline(&self) -> String {
        let mut line = format!(
            "{} of {} topic(s) posted, {} failed",
            self.succeeded, self.total, self.failed
        );
        if self.total > 0 {
            line.push_str(&format!(
                " (mean {:.1}s per topic)",
                self.mean_total_time.as_secs_f64()
            ));
        }
        line
    }
}

fn mean(total: Duration, count: usize) -> Duration {
    match u32::try_from(count) {
        Ok(0) => Duration::ZERO,
        Ok(count) => total / count,
        Err(_) => Duration::from_secs_f64(total.as_secs_f64() / count as f64),
    }
}
