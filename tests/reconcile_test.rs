//! Reconciler properties over the public API.

use clipmate::config::{DetectionConfig, Preset, Tunables};
use clipmate::plan::{build_plan, keep_intervals, KeepInterval};
use clipmate::report::{DetectionReport, Segment};
use clipmate_av::VideoInfo;

fn report(duration: f64, silence: Vec<Segment>, repeat: Vec<Segment>) -> DetectionReport {
    DetectionReport::build(
        VideoInfo {
            width: 1920,
            height: 1080,
            fps: 30.0,
            duration,
            size_mb: 120.0,
            resolution: "1920x1080".to_string(),
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
fn keeps_partition_the_timeline() {
    // Disjoint silence: keep lengths and silence durations sum to the whole
    let silence = vec![
        Segment::new(10.0, 15.0),
        Segment::new(40.0, 42.0),
        Segment::new(70.0, 80.5),
    ];
    let duration = 100.0;
    let keeps = keep_intervals(&silence, duration);

    let kept: f64 = keeps.iter().map(|k| k.length()).sum();
    let removed: f64 = silence.iter().map(|s| s.duration).sum();
    assert!((kept + removed - duration).abs() < 1e-9);

    // Strictly ordered, positive-length, no overlap with each other
    for k in &keeps {
        assert!(k.start < k.end);
    }
    for w in keeps.windows(2) {
        assert!(w[0].end <= w[1].start);
    }
}

#[test]
fn keeps_never_intersect_silence() {
    let silence = vec![Segment::new(5.0, 12.0), Segment::new(30.0, 31.0)];
    let keeps = keep_intervals(&silence, 60.0);

    for k in &keeps {
        for s in &silence {
            // No overlap: one ends before the other starts
            assert!(k.end <= s.start || k.start >= s.end);
        }
    }
}

#[test]
fn empty_detection_keeps_everything() {
    let keeps = keep_intervals(&[], 75.0);
    assert_eq!(keeps, vec![KeepInterval { start: 0.0, end: 75.0 }]);

    let plan = build_plan(&report(75.0, vec![], vec![]), &Tunables::default());
    assert!(plan.is_noop());
    assert_eq!(plan.new_duration, 75.0);
}

#[test]
fn reconciliation_is_deterministic() {
    let silence = vec![Segment::new(40.0, 42.0), Segment::new(10.0, 15.0)];
    let a = keep_intervals(&silence, 100.0);
    let b = keep_intervals(&silence, 100.0);
    assert_eq!(a, b);
}

#[test]
fn silence_scenario() {
    // duration 100, silence at (10,15) and (40,42)
    let plan = build_plan(
        &report(
            100.0,
            vec![Segment::new(10.0, 15.0), Segment::new(40.0, 42.0)],
            vec![],
        ),
        &Tunables::default(),
    );

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
    assert_eq!(plan.deleted_count, 2);
}

#[test]
fn repeat_only_scenario() {
    // duration 60, one 5s repeat: nothing cut, half the repeat counted saved
    let plan = build_plan(
        &report(60.0, vec![], vec![Segment::with_similarity(5.0, 10.0, 0.95)]),
        &Tunables::default(),
    );

    assert_eq!(plan.keeps, vec![KeepInterval { start: 0.0, end: 60.0 }]);
    assert_eq!(plan.time_saved, 2.5);
    assert_eq!(plan.new_duration, 57.5);
    assert!(!plan.removes_footage());
}

#[test]
fn fragmented_plan_flagged_too_complex() {
    let silence: Vec<Segment> = (0..15)
        .map(|i| Segment::new(i as f64 * 20.0 + 5.0, i as f64 * 20.0 + 8.0))
        .collect();
    let plan = build_plan(&report(400.0, silence, vec![]), &Tunables::default());

    assert!(plan.keeps.len() > 10);
    assert!(plan.is_too_complex(Tunables::default().max_keep_intervals));
}

#[test]
fn speedup_saving_factor_is_tunable() {
    let tunables = Tunables {
        repeat_speedup_saving: 0.25,
        ..Tunables::default()
    };
    let plan = build_plan(
        &report(60.0, vec![], vec![Segment::with_similarity(0.0, 8.0, 0.9)]),
        &tunables,
    );
    assert_eq!(plan.time_saved, 2.0);
    assert_eq!(plan.new_duration, 58.0);
}
