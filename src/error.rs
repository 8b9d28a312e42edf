//! Terminal error kinds for the cut pipeline.
//!
//! Only the failures that invalidate a whole run live here. Per-detector and
//! per-interval failures are absorbed where they happen: a failed detector
//! degrades to empty/partial results, a failed extraction is skipped.

use std::path::PathBuf;

/// Errors that abort a detection or cut run.
#[derive(Debug, thiserror::Error)]
pub enum CutError {
    /// The source video does not exist.
    #[error("video file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The detection report could not be read or parsed.
    #[error("cannot read detection report: {0}")]
    ReportUnreadable(String),

    /// Metadata probing failed; duration drives all downstream math.
    #[error("failed to probe video: {0}")]
    ProbeFailed(String),

    /// Every extraction failed, so there is nothing to assemble.
    #[error("no segments could be extracted")]
    NothingExtracted,

    /// Final concatenation failed. Temporary segment files are retained.
    #[error("segment assembly failed: {message}")]
    AssemblyFailed {
        message: String,
        /// The underlying tool's diagnostic output.
        detail: String,
    },
}

impl CutError {
    /// The structured error value the CLI emits as its final output.
    ///
    /// Assembly failures carry the tool's diagnostic output in a `details`
    /// field so the user sees what ffmpeg actually said.
    pub fn to_json(&self) -> serde_json::Value {
        let mut value = serde_json::json!({
            "status": "error",
            "message": self.to_string(),
        });
        if let CutError::AssemblyFailed { detail, .. } = self {
            value["details"] = serde_json::Value::String(detail.clone());
        }
        value
    }
}
