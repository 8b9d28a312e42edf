//! Cut-plan execution: turning a detection report into an output file.
//!
//! The executor is generic over [`SegmentTool`] so the skip/abort behavior
//! around partial failures can be tested without ffmpeg. Per-interval
//! extraction failures are skipped with a warning; assembly failure is
//! terminal and keeps the scratch workspace on disk for inspection.

use crate::config::Tunables;
use crate::error::CutError;
use crate::plan::{build_plan, CutPlan};
use crate::report::{round2, DetectionReport};
use clipmate_av::{FfmpegTool, SegmentTool, Workspace};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What executing (or declining to execute) a plan achieved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutStatistics {
    pub deleted_count: usize,
    pub spedup_count: usize,
    pub original_duration: f64,
    pub new_duration: f64,
    pub time_saved: f64,
    /// Segments actually extracted; absent when no cutting ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments_processed: Option<usize>,
}

impl CutStatistics {
    fn from_plan(plan: &CutPlan, segments_processed: Option<usize>) -> Self {
        Self {
            deleted_count: plan.deleted_count,
            spedup_count: plan.spedup_count,
            original_duration: round2(plan.original_duration),
            new_duration: round2(plan.new_duration),
            time_saved: round2(plan.time_saved),
            segments_processed,
        }
    }
}

/// Terminal outcome of a cut run, serialized as the CLI's final JSON value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutResult {
    pub status: String,
    pub message: String,
    /// The produced file. For a no-op run this is the input itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    pub statistics: CutStatistics,
    /// Caveat attached to degraded or declined runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Default output path: `<stem>-edited.<ext>` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let ext = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mp4".to_string());
    input.with_file_name(format!("{}-edited.{}", stem, ext))
}

/// Load the report, reconcile it into a plan, and act on it.
pub fn run_cut(
    input: &Path,
    report_path: &Path,
    output: Option<&Path>,
    tunables: &Tunables,
) -> Result<CutResult, CutError> {
    if !input.exists() {
        return Err(CutError::InputNotFound(input.to_path_buf()));
    }

    let report = DetectionReport::load(report_path)?;
    let plan = build_plan(&report, tunables);
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));

    execute_plan(&FfmpegTool, input, &plan, &output, tunables)
}

/// Act on an already-built plan with the given tool.
pub fn execute_plan<T: SegmentTool>(
    tool: &T,
    input: &Path,
    plan: &CutPlan,
    output: &Path,
    tunables: &Tunables,
) -> Result<CutResult, CutError> {
    if plan.is_noop() {
        info!("Nothing detected, leaving the video untouched");
        return Ok(CutResult {
            status: "success".to_string(),
            message: "nothing to cut".to_string(),
            output_path: Some(input.to_path_buf()),
            statistics: CutStatistics::from_plan(plan, None),
            note: None,
        });
    }

    if !plan.removes_footage() {
        // Repeats only: the projected saving assumes a speed-up pass this
        // tool does not perform, so the input passes through unchanged.
        info!("No silence to remove, leaving the video untouched");
        return Ok(CutResult {
            status: "success".to_string(),
            message: "no silence to remove".to_string(),
            output_path: Some(input.to_path_buf()),
            statistics: CutStatistics::from_plan(plan, None),
            note: Some(
                "repeat segments were detected but speed-up is not applied; \
                 time saved is an estimate"
                    .to_string(),
            ),
        });
    }

    if plan.is_too_complex(tunables.max_keep_intervals) {
        info!(
            "Plan has {} keep intervals (max {}), not cutting",
            plan.keeps.len(),
            tunables.max_keep_intervals
        );
        return Ok(CutResult {
            status: "success".to_string(),
            message: "cut plan too complex".to_string(),
            output_path: None,
            statistics: CutStatistics::from_plan(plan, None),
            note: Some(format!(
                "{} keep intervals exceed the maximum of {}; \
                 edit manually or raise max_keep_intervals",
                plan.keeps.len(),
                tunables.max_keep_intervals
            )),
        });
    }

    let workspace = Workspace::new().map_err(|e| CutError::AssemblyFailed {
        message: "cannot create workspace".to_string(),
        detail: e.to_string(),
    })?;

    let mut parts = Vec::new();
    for (i, keep) in plan.keeps.iter().enumerate() {
        let segment_file = workspace.segment_file(i);
        info!(
            "Extracting segment {}/{}: [{:.2}, {:.2})",
            i + 1,
            plan.keeps.len(),
            keep.start,
            keep.end
        );
        match tool.extract(input, keep.start, keep.length(), &segment_file) {
            Ok(()) => parts.push(segment_file),
            Err(e) => {
                warn!("Skipping segment {}: {}", i, e);
            }
        }
    }

    if parts.is_empty() {
        return Err(CutError::NothingExtracted);
    }

    let extracted = parts.len();
    info!("Assembling {} segments into {:?}", extracted, output);
    if let Err(e) = tool.concat(&parts, &workspace.list_file(), output) {
        let retained = workspace.retain();
        warn!("Workspace retained at {:?}", retained);
        return Err(CutError::AssemblyFailed {
            message: format!("could not assemble {} segments", extracted),
            detail: e
                .tool_detail()
                .map(str::to_string)
                .unwrap_or_else(|| e.to_string()),
        });
    }

    let note = if extracted < plan.keeps.len() {
        Some(format!(
            "{} of {} segments could not be extracted and were skipped",
            plan.keeps.len() - extracted,
            plan.keeps.len()
        ))
    } else {
        None
    };

    Ok(CutResult {
        status: "success".to_string(),
        message: format!("wrote {}", output.display()),
        output_path: Some(output.to_path_buf()),
        statistics: CutStatistics::from_plan(plan, Some(extracted)),
        note,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/videos/lecture.mp4")),
            PathBuf::from("/videos/lecture-edited.mp4")
        );
        assert_eq!(
            default_output_path(Path::new("talk.mkv")),
            PathBuf::from("talk-edited.mkv")
        );
        assert_eq!(
            default_output_path(Path::new("noext")),
            PathBuf::from("noext-edited.mp4")
        );
    }

    #[test]
    fn test_statistics_rounded() {
        let plan = CutPlan {
            keeps: vec![],
            deleted_count: 1,
            spedup_count: 0,
            original_duration: 100.123456,
            new_duration: 93.333333,
            time_saved: 6.790123,
        };
        let stats = CutStatistics::from_plan(&plan, Some(3));
        assert_eq!(stats.original_duration, 100.12);
        assert_eq!(stats.new_duration, 93.33);
        assert_eq!(stats.time_saved, 6.79);
        assert_eq!(stats.segments_processed, Some(3));
    }

    #[test]
    fn test_segments_processed_omitted_from_json_when_absent() {
        let plan = CutPlan {
            keeps: vec![],
            deleted_count: 0,
            spedup_count: 0,
            original_duration: 10.0,
            new_duration: 10.0,
            time_saved: 0.0,
        };
        let stats = CutStatistics::from_plan(&plan, None);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(!json.contains("segments_processed"));
    }
}
