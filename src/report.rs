//! The detection report: the sole artifact handed from detection to planning.
//!
//! Detection and cutting may run as entirely separate invocations, so the
//! report carries everything planning needs: video metadata, the three
//! detector outputs, derived statistics, and the preset/config used. All
//! numbers are rounded to two decimal places when the report is built;
//! computation before that point keeps full precision.

use crate::config::{DetectionConfig, Preset, Tunables};
use crate::error::CutError;
use clipmate_av::VideoInfo;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Round to two decimal places for presentation.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A detected time interval, with its derived duration.
///
/// Invariant: `0 <= start < end`, `duration == end - start` within rounding
/// tolerance. Repeat segments additionally carry a similarity score in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Interval start in seconds.
    pub start: f64,
    /// Interval end in seconds.
    pub end: f64,
    /// `end - start`, stored for the report.
    pub duration: f64,
    /// Similarity score for repeat segments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl Segment {
    /// A silence segment.
    pub fn new(start: f64, end: f64) -> Self {
        debug_assert!(start >= 0.0 && start < end);
        Self {
            start,
            end,
            duration: end - start,
            similarity: None,
        }
    }

    /// A repeat segment with its similarity score.
    pub fn with_similarity(start: f64, end: f64, similarity: f64) -> Self {
        Self {
            similarity: Some(similarity),
            ..Self::new(start, end)
        }
    }

    /// Copy with all fields rounded for presentation.
    fn rounded(&self) -> Self {
        Self {
            start: round2(self.start),
            end: round2(self.end),
            duration: round2(self.duration),
            similarity: self.similarity.map(round2),
        }
    }
}

/// Raw counts and durations of what the detectors found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_silence_duration: f64,
    pub total_repeat_duration: f64,
    pub silence_count: usize,
    pub repeat_count: usize,
    pub scene_count: usize,
}

/// What acting on the report would achieve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Seconds saved by deleting silence and speeding up repeats.
    pub estimated_time_saved: f64,
    /// Expected output duration, floored at zero.
    pub new_duration: f64,
    /// Time saved as a percentage of the original duration.
    pub compression_rate: f64,
}

/// Complete, self-describing detection snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionReport {
    pub status: String,
    pub video_info: VideoInfo,
    pub silence_segments: Vec<Segment>,
    pub repeat_segments: Vec<Segment>,
    pub scene_changes: Vec<f64>,
    pub statistics: Statistics,
    pub recommendations: Recommendations,
    pub preset: Preset,
    pub config: DetectionConfig,
}

impl DetectionReport {
    /// Assemble a report from detector outputs, rounding for presentation.
    pub fn build(
        video_info: VideoInfo,
        silence_segments: Vec<Segment>,
        repeat_segments: Vec<Segment>,
        scene_changes: Vec<f64>,
        preset: Preset,
        config: DetectionConfig,
        tunables: &Tunables,
    ) -> Self {
        let total_silence: f64 = silence_segments.iter().map(|s| s.duration).sum();
        let total_repeat: f64 = repeat_segments.iter().map(|s| s.duration).sum();

        let time_saved = total_silence + tunables.repeat_speedup_saving * total_repeat;
        let new_duration = (video_info.duration - time_saved).max(0.0);
        let compression_rate = if video_info.duration > 0.0 {
            time_saved / video_info.duration * 100.0
        } else {
            0.0
        };

        let statistics = Statistics {
            total_silence_duration: round2(total_silence),
            total_repeat_duration: round2(total_repeat),
            silence_count: silence_segments.len(),
            repeat_count: repeat_segments.len(),
            scene_count: scene_changes.len(),
        };

        let recommendations = Recommendations {
            estimated_time_saved: round2(time_saved),
            new_duration: round2(new_duration),
            compression_rate: round2(compression_rate),
        };

        Self {
            status: "success".to_string(),
            video_info: VideoInfo {
                fps: round2(video_info.fps),
                duration: round2(video_info.duration),
                size_mb: round2(video_info.size_mb),
                ..video_info
            },
            silence_segments: silence_segments.iter().map(Segment::rounded).collect(),
            repeat_segments: repeat_segments.iter().map(Segment::rounded).collect(),
            scene_changes: scene_changes.into_iter().map(round2).collect(),
            statistics,
            recommendations,
            preset,
            config,
        }
    }

    /// Load a report written by `clipmate detect`.
    pub fn load(path: &Path) -> Result<Self, CutError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CutError::ReportUnreadable(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| CutError::ReportUnreadable(format!("{}: {}", path.display(), e)))
    }

    /// Write the report as pretty JSON.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
