//! Segment reconciliation: turning deletion intervals into the retained
//! timeline and the statistics of acting on it.
//!
//! Silence segments are removed outright. Repeat segments are speed-up
//! candidates: they stay on the timeline but contribute a configurable
//! fraction of their duration to the projected time saved.

use crate::config::Tunables;
use crate::report::{DetectionReport, Segment};
use serde::{Deserialize, Serialize};

/// A portion of the original timeline retained in the output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeepInterval {
    /// Start in seconds.
    pub start: f64,
    /// End in seconds (exclusive).
    pub end: f64,
}

impl KeepInterval {
    /// Interval length in seconds.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// The ordered keep timeline plus summary statistics, ready for execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutPlan {
    /// Retained intervals in timeline order.
    pub keeps: Vec<KeepInterval>,
    /// Silence segments to be removed.
    pub deleted_count: usize,
    /// Repeat segments flagged for speed-up.
    pub spedup_count: usize,
    /// Source duration in seconds.
    pub original_duration: f64,
    /// Projected output duration, floored at zero.
    pub new_duration: f64,
    /// Projected seconds saved.
    pub time_saved: f64,
}

impl CutPlan {
    /// Nothing was detected; executing the plan is a no-op.
    pub fn is_noop(&self) -> bool {
        self.deleted_count == 0 && self.spedup_count == 0
    }

    /// Whether any footage is actually removed by this plan.
    pub fn removes_footage(&self) -> bool {
        self.deleted_count > 0
    }

    /// More pieces than the executor should reasonably extract.
    pub fn is_too_complex(&self, max_keep_intervals: usize) -> bool {
        self.keeps.len() > max_keep_intervals
    }
}

/// Compute the complement of the deletion intervals over `[0, duration)`.
///
/// Segments are sorted by start; overlapping segments have their start
/// clamped to the walk cursor so no negative-length interval is ever
/// emitted. Zero segments yield the single interval `[0, duration)`.
pub fn keep_intervals(silence: &[Segment], duration: f64) -> Vec<KeepInterval> {
    let mut sorted: Vec<(f64, f64)> = silence.iter().map(|s| (s.start, s.end)).collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut keeps = Vec::new();
    let mut cursor = 0.0;

    for (start, end) in sorted {
        let start = start.max(cursor);
        if cursor < start {
            keeps.push(KeepInterval { start: cursor, end: start });
        }
        cursor = cursor.max(end);
    }

    if cursor < duration {
        keeps.push(KeepInterval {
            start: cursor,
            end: duration,
        });
    }

    keeps
}

/// Derive a fresh cut plan from a detection report.
pub fn build_plan(report: &DetectionReport, tunables: &Tunables) -> CutPlan {
    let duration = report.video_info.duration;
    let keeps = keep_intervals(&report.silence_segments, duration);

    let total_silence: f64 = report.silence_segments.iter().map(|s| s.duration).sum();
    let total_repeat: f64 = report.repeat_segments.iter().map(|s| s.duration).sum();
    let time_saved = total_silence + tunables.repeat_speedup_saving * total_repeat;

    CutPlan {
        keeps,
        deleted_count: report.silence_segments.len(),
        spedup_count: report.repeat_segments.len(),
        original_duration: duration,
        new_duration: (duration - time_saved).max(0.0),
        time_saved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DetectionConfig, Preset};
    use clipmate_av::VideoInfo;

    fn report(duration: f64, silence: Vec<Segment>, repeat: Vec<Segment>) -> DetectionReport {
        DetectionReport::build(
            VideoInfo {
                width: 1280,
                height: 720,
                fps: 30.0,
                duration,
                size_mb: 50.0,
                resolution: "1280x720".to_string(),
            },
            silence,
            repeat,
            vec![],
            Preset::Teaching,
            DetectionConfig::for_preset(Preset::Teaching),
            &Tunables::default(),
        )
    }

    #[test]
    fn test_silence_removal_scenario() {
        // duration=100, silence [(10,15), (40,42)] => keeps [(0,10), (15,40), (42,100)]
        let r = report(
            100.0,
            vec![Segment::new(10.0, 15.0), Segment::new(40.0, 42.0)],
            vec![],
        );
        let plan = build_plan(&r, &Tunables::default());

        assert_eq!(
            plan.keeps,
            vec![
                KeepInterval { start: 0.0, end: 10.0 },
                KeepInterval { start: 15.0, end: 40.0 },
                KeepInterval { start: 42.0, end: 100.0 },
            ]
        );
        assert_eq!(plan.time_saved, 7.0);
        assert_eq!(plan.new_duration, 93.0);
        assert!(plan.removes_footage());
        assert!(!plan.is_noop());
    }

    #[test]
    fn test_repeat_only_scenario() {
        // duration=60, repeat [(5,10)] => single keep, half duration saved
        let r = report(60.0, vec![], vec![Segment::with_similarity(5.0, 10.0, 0.95)]);
        let plan = build_plan(&r, &Tunables::default());

        assert_eq!(plan.keeps, vec![KeepInterval { start: 0.0, end: 60.0 }]);
        assert_eq!(plan.time_saved, 2.5);
        assert_eq!(plan.new_duration, 57.5);
        assert!(!plan.removes_footage());
        assert!(!plan.is_noop());
    }

    #[test]
    fn test_empty_input_law() {
        let keeps = keep_intervals(&[], 120.0);
        assert_eq!(keeps, vec![KeepInterval { start: 0.0, end: 120.0 }]);

        let plan = build_plan(&report(120.0, vec![], vec![]), &Tunables::default());
        assert!(plan.is_noop());
        assert_eq!(plan.time_saved, 0.0);
        assert_eq!(plan.new_duration, 120.0);
    }

    #[test]
    fn test_unsorted_segments_sorted_first() {
        let keeps = keep_intervals(
            &[Segment::new(40.0, 42.0), Segment::new(10.0, 15.0)],
            100.0,
        );
        assert_eq!(keeps.len(), 3);
        assert_eq!((keeps[0].start, keeps[0].end), (0.0, 10.0));
        assert_eq!((keeps[1].start, keeps[1].end), (15.0, 40.0));
    }

    #[test]
    fn test_overlap_clamped_to_cursor() {
        let keeps = keep_intervals(
            &[Segment::new(10.0, 20.0), Segment::new(15.0, 25.0)],
            100.0,
        );
        assert_eq!(
            keeps,
            vec![
                KeepInterval { start: 0.0, end: 10.0 },
                KeepInterval { start: 25.0, end: 100.0 },
            ]
        );
    }

    #[test]
    fn test_contained_segment_does_not_rewind_cursor() {
        let keeps = keep_intervals(
            &[Segment::new(10.0, 30.0), Segment::new(12.0, 20.0)],
            100.0,
        );
        assert_eq!(
            keeps,
            vec![
                KeepInterval { start: 0.0, end: 10.0 },
                KeepInterval { start: 30.0, end: 100.0 },
            ]
        );
    }

    #[test]
    fn test_silence_at_boundaries() {
        // Leading silence: no keep before it
        let keeps = keep_intervals(&[Segment::new(0.0, 5.0)], 60.0);
        assert_eq!(keeps, vec![KeepInterval { start: 5.0, end: 60.0 }]);

        // Trailing silence: no keep after it
        let keeps = keep_intervals(&[Segment::new(55.0, 60.0)], 60.0);
        assert_eq!(keeps, vec![KeepInterval { start: 0.0, end: 55.0 }]);

        // Whole video silent
        let keeps = keep_intervals(&[Segment::new(0.0, 60.0)], 60.0);
        assert!(keeps.is_empty());
    }

    #[test]
    fn test_partition_law() {
        // Keep lengths + silence durations == duration for disjoint segments
        let silence = vec![
            Segment::new(3.0, 8.0),
            Segment::new(20.0, 21.5),
            Segment::new(47.25, 59.0),
        ];
        let duration = 90.0;
        let keeps = keep_intervals(&silence, duration);

        let kept: f64 = keeps.iter().map(|k| k.length()).sum();
        let removed: f64 = silence.iter().map(|s| s.duration).sum();
        assert!((kept + removed - duration).abs() < 1e-9);

        // No gaps or overlaps: keeps and silence interleave exactly
        for w in keeps.windows(2) {
            assert!(w[0].end < w[1].start);
        }
        for k in &keeps {
            assert!(k.start < k.end);
        }
    }

    #[test]
    fn test_idempotence() {
        let silence = vec![Segment::new(10.0, 15.0), Segment::new(40.0, 42.0)];
        let a = keep_intervals(&silence, 100.0);
        let b = keep_intervals(&silence, 100.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_too_complex() {
        let silence: Vec<Segment> = (0..12)
            .map(|i| Segment::new(i as f64 * 10.0 + 2.0, i as f64 * 10.0 + 4.0))
            .collect();
        let plan = build_plan(&report(200.0, silence, vec![]), &Tunables::default());
        assert!(plan.keeps.len() > 10);
        assert!(plan.is_too_complex(10));
        assert!(!plan.is_too_complex(20));
    }

    #[test]
    fn test_new_duration_floor() {
        let plan = build_plan(
            &report(4.0, vec![Segment::new(0.0, 4.0)], vec![Segment::with_similarity(0.0, 4.0, 0.9)]),
            &Tunables::default(),
        );
        assert_eq!(plan.new_duration, 0.0);
    }
}
