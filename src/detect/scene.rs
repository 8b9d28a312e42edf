//! Scene-change detection.

use clipmate_av::SampledFrame;

/// Mean absolute pixel difference between two grayscale buffers.
pub fn mean_abs_diff(a: &[u8], b: &[u8]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    if a.is_empty() {
        return 0.0;
    }

    let sad: u64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| u64::from(x.abs_diff(y)))
        .sum();

    sad as f64 / a.len() as f64
}

/// Report timestamps where consecutive sampled frames differ sharply.
///
/// Each threshold crossing is reported independently; no minimum duration
/// applies. Output is non-decreasing because input samples are.
pub fn detect_scene_changes<I>(frames: I, diff_threshold: f64) -> Vec<f64>
where
    I: IntoIterator<Item = SampledFrame>,
{
    let mut changes = Vec::new();
    let mut prev: Option<SampledFrame> = None;

    for frame in frames {
        if let Some(ref p) = prev {
            if mean_abs_diff(&p.pixels, &frame.pixels) > diff_threshold {
                changes.push(frame.timestamp);
            }
        }
        prev = Some(frame);
    }

    changes
}
