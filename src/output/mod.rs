// src/output/mod.rs
//! Batch reports and where they go.
//!
//! Planning is pure: [`plan_delivery`] only decides targets. [`deliver`]
//! performs the I/O and records what happened.

mod report;
mod types;
mod writer;

pub use report::{render_report, BatchReport};
pub use types::{
    CompletedOperation, DeliveryTarget, ExecutionStats, FailedOperation, OutputPlan, OutputReport,
};
pub use writer::deliver;

use std::path::Path;

/// Writes to `output_file` when given, otherwise to stdout.
pub fn plan_delivery(content: String, output_file: Option<&Path>) -> OutputPlan {
    let target = match output_file {
        Some(path) => DeliveryTarget::WriteFile {
            path: path.to_path_buf(),
            content,
        },
        None => DeliveryTarget::PrintToStdout { content },
    };
    OutputPlan::new().with_operation(target)
}
