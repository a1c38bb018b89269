// src/output/report.rs
//! The JSON report written at the end of a run.

use crate::analytics::BatchSummary;
use crate::error::AppError;
use crate::orchestrator::TopicOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport<'a> {
    pub system: &'a str,
    pub version: &'a str,
    pub completed_at: DateTime<Utc>,
    pub summary: BatchSummary,
    pub outcomes: &'a [TopicOutcome],
}

impl<'a> BatchReport<'a> {
    pub fn new(system: &'a str, version: &'a str, outcomes: &'a [TopicOutcome]) -> Self {
        Self {
            system,
            version,
            completed_at: Utc::now(),
            summary: BatchSummary::from_outcomes(outcomes),
            outcomes,
        }
    }
}

/// Pretty-printed JSON for a report.
pub fn render_report(report: &BatchReport<'_>) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::StageTimings;
    use crate::types::{PostId, Topic};

    #[test]
    fn test_report_lists_outcomes_in_order_with_summary() {
        let outcomes = vec![
            TopicOutcome::posted(
                Topic::new("Sacred geometry").unwrap(),
                PostId::new(7),
                "https://elidoras.example/?p=7".to_string(),
                StageTimings::default(),
            ),
            TopicOutcome::failed(
                Topic::new("Ley lines").unwrap(),
                "generation failed: HTTP 500",
                StageTimings::default(),
            ),
        ];
        let report = BatchReport::new("AIRTH", "0.1.0", &outcomes);

        let json: serde_json::Value =
            serde_json::from_str(&render_report(&report).unwrap()).unwrap();

        assert_eq!(json["system"], "AIRTH");
        assert_eq!(json["summary"]["succeeded"], 1);
        assert_eq!(json["summary"]["failed"], 1);
        assert_eq!(json["outcomes"][0]["topic"], "Sacred geometry");
        assert_eq!(json["outcomes"][0]["status"], "success");
        assert_eq!(json["outcomes"][1]["status"], "error");
        assert_eq!(json["outcomes"][1]["error"], "generation failed: HTTP 500");
    }
}
