//! Visually repeated footage detection.

use crate::report::Segment;
use clipmate_av::{SampledFrame, MAX_PIXEL_VALUE};

/// Similarity of two grayscale buffers in [0, 1].
///
/// `1 - sad / (pixel_count * max_pixel_value)`: 1.0 for identical frames,
/// 0.0 when every pixel differs by the maximum value.
pub fn frame_similarity(a: &[u8], b: &[u8]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    if a.is_empty() {
        return 1.0;
    }

    let sad: u64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| u64::from(x.abs_diff(y)))
        .sum();

    1.0 - sad as f64 / (a.len() as f64 * MAX_PIXEL_VALUE)
}

/// Scan sampled frames for runs of near-identical footage.
///
/// While consecutive-frame similarity stays at or above `threshold` the
/// current candidate extends; the first sample below the threshold closes it,
/// and it is accepted only if it lasted at least `min_duration` seconds. The
/// recorded similarity on an accepted segment is the threshold itself, not a
/// running average. A candidate still open when the stream ends is discarded.
///
/// The frame cap lives in the sampler; whatever was accumulated when input
/// ends is the result.
pub fn detect_repeats<I>(frames: I, threshold: f64, min_duration: f64) -> Vec<Segment>
where
    I: IntoIterator<Item = SampledFrame>,
{
    let mut segments = Vec::new();
    let mut prev: Option<SampledFrame> = None;
    let mut streak_start: Option<f64> = None;

    for frame in frames {
        if let Some(ref p) = prev {
            let similarity = frame_similarity(&p.pixels, &frame.pixels);

            if similarity >= threshold {
                streak_start.get_or_insert(frame.timestamp);
            } else if let Some(start) = streak_start.take() {
                let end = frame.timestamp;
                if end - start >= min_duration {
                    segments.push(Segment::with_similarity(start, end, threshold));
                }
            }
        }
        prev = Some(frame);
    }

    segments
}
