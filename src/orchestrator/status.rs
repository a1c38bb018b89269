// src/orchestrator/status.rs
//! Read-only status report.

use crate::config::PipelineConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Configuration echo plus the time it was taken.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemStatus {
    pub system_name: String,
    pub version: String,
    pub batch_size: usize,
    pub cooldown_secs: u64,
    pub max_daily_posts: u32,
    pub timestamp: DateTime<Utc>,
}

impl SystemStatus {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            system_name: config.system_name.clone(),
            version: config.system_version.clone(),
            batch_size: config.batch.batch_size,
            cooldown_secs: config.batch.cooldown.as_secs(),
            max_daily_posts: config.batch.max_daily_posts,
            timestamp: Utc::now(),
        }
    }
}
