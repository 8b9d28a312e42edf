//! Silence event extraction via ffmpeg's silencedetect filter.
//!
//! ffmpeg reports silence as diagnostic lines on stderr:
//!
//! ```text
//! [silencedetect @ 0x5614] silence_start: 10.52
//! [silencedetect @ 0x5614] silence_end: 15.3 | silence_duration: 4.78
//! ```
//!
//! That text format is scraped here, and only here, into a typed event
//! sequence. Everything downstream works with [`SilenceEvent`] values.

use crate::{Error, Result};
use std::path::Path;
use std::process::Command;

/// A single silencedetect boundary event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SilenceEvent {
    /// Loudness dropped below the noise floor at this timestamp (seconds).
    Start(f64),
    /// Loudness rose back above the noise floor at this timestamp (seconds).
    End(f64),
}

/// Run ffmpeg's silencedetect filter over a file and return the typed events.
///
/// `noise_db` is the noise floor in dB (≤ 0), `min_duration` the minimum
/// silence length in seconds the filter should report.
pub fn detect_events(path: &Path, noise_db: f64, min_duration: f64) -> Result<Vec<SilenceEvent>> {
    let filter = format!("silencedetect=noise={}dB:d={}", noise_db, min_duration);

    let output = Command::new("ffmpeg")
        .arg("-i")
        .arg(path)
        .args(["-af", &filter, "-f", "null", "-"])
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found("ffmpeg")
            } else {
                Error::Io(e)
            }
        })?;

    // silencedetect output lands on stderr even on success; a non-zero exit
    // usually means the file has no audio stream or is unreadable.
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::tool_failed("ffmpeg", stderr.to_string()));
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    Ok(parse_events(&stderr))
}

/// Parse silencedetect diagnostic output into an event sequence.
///
/// Malformed lines are skipped rather than treated as fatal.
pub fn parse_events(log: &str) -> Vec<SilenceEvent> {
    let mut events = Vec::new();

    for line in log.lines() {
        if let Some(t) = parse_marker(line, "silence_start: ") {
            events.push(SilenceEvent::Start(t));
        } else if let Some(t) = parse_marker(line, "silence_end: ") {
            events.push(SilenceEvent::End(t));
        }
    }

    events
}

fn parse_marker(line: &str, marker: &str) -> Option<f64> {
    let rest = line.split(marker).nth(1)?;
    rest.split_whitespace().next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events_pairs() {
        let log = "\
[silencedetect @ 0x5614] silence_start: 10.52\n\
frame= 1000 fps=250 q=-0.0 size=N/A\n\
[silencedetect @ 0x5614] silence_end: 15.3 | silence_duration: 4.78\n\
[silencedetect @ 0x5614] silence_start: 40.1\n\
[silencedetect @ 0x5614] silence_end: 42 | silence_duration: 1.9\n";

        let events = parse_events(log);
        assert_eq!(
            events,
            vec![
                SilenceEvent::Start(10.52),
                SilenceEvent::End(15.3),
                SilenceEvent::Start(40.1),
                SilenceEvent::End(42.0),
            ]
        );
    }

    #[test]
    fn test_parse_events_skips_malformed() {
        let log = "\
[silencedetect] silence_start: not_a_number\n\
[silencedetect] silence_start: 3.5\n\
[silencedetect] silence_end:\n\
[silencedetect] silence_end: 7.25 | silence_duration: 3.75\n";

        let events = parse_events(log);
        assert_eq!(
            events,
            vec![SilenceEvent::Start(3.5), SilenceEvent::End(7.25)]
        );
    }

    #[test]
    fn test_parse_events_trailing_start() {
        let log = "[silencedetect] silence_start: 99.0\n";
        let events = parse_events(log);
        assert_eq!(events, vec![SilenceEvent::Start(99.0)]);
    }

    #[test]
    fn test_parse_events_empty() {
        assert!(parse_events("").is_empty());
        assert!(parse_events("frame= 100 fps=25\n").is_empty());
    }
}
