//! Pairing silence events into segments.

use crate::report::Segment;
use clipmate_av::SilenceEvent;

/// Pair start/end events into silence segments.
///
/// An interval opens at a `Start` event and closes at the next `End` event.
/// Repeated `Start`s keep the first; an `End` with nothing open is skipped.
/// A trailing `Start` with no matching `End` is closed at `trace_end` when
/// the trace end is known, and discarded otherwise. Every emitted segment is
/// at least `min_duration` long and never has `end <= start`.
pub fn pair_events(
    events: &[SilenceEvent],
    trace_end: Option<f64>,
    min_duration: f64,
) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut open: Option<f64> = None;

    for event in events {
        match *event {
            SilenceEvent::Start(t) => {
                if open.is_none() {
                    // silencedetect can report a hair before zero
                    open = Some(t.max(0.0));
                }
            }
            SilenceEvent::End(t) => {
                if let Some(start) = open.take() {
                    if t > start && t - start >= min_duration {
                        segments.push(Segment::new(start, t));
                    }
                }
            }
        }
    }

    // Recording trailed off into silence: close at end-of-trace.
    if let (Some(start), Some(end)) = (open, trace_end) {
        if end > start && end - start >= min_duration {
            segments.push(Segment::new(start, end));
        }
    }

    segments
}
