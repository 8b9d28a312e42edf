//! FFprobe-based video probing.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;

/// Basic facts about a video file that drive detection and planning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Frame rate in FPS.
    pub fps: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// File size in megabytes.
    pub size_mb: f64,
    /// Human-readable resolution string, e.g. "1920x1080".
    pub resolution: String,
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    size: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
}

/// Probe a video file using ffprobe.
///
/// Duration is taken from the container format, falling back to the video
/// stream. A file with no video stream is rejected.
pub fn probe_video(path: &Path) -> Result<VideoInfo> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found("ffprobe")
            } else {
                Error::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::tool_failed("ffprobe", stderr.to_string()));
    }

    let json_str = String::from_utf8(output.stdout)
        .map_err(|e| Error::parse_error("ffprobe", format!("Invalid UTF-8: {}", e)))?;

    let ff_output: FfprobeOutput = serde_json::from_str(&json_str)?;

    parse_ffprobe_output(ff_output)
}

fn parse_ffprobe_output(output: FfprobeOutput) -> Result<VideoInfo> {
    let video = output
        .streams
        .iter()
        .find(|s| s.codec_type == "video")
        .ok_or_else(|| Error::parse_error("ffprobe", "no video stream found"))?;

    let width = video.width.unwrap_or(0);
    let height = video.height.unwrap_or(0);

    let fps = video
        .r_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .unwrap_or(0.0);

    let duration = output
        .format
        .duration
        .as_deref()
        .or(video.duration.as_deref())
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| Error::parse_error("ffprobe", "no duration reported"))?;

    let size_bytes: u64 = output
        .format
        .size
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    Ok(VideoInfo {
        width,
        height,
        fps,
        duration,
        size_mb: size_bytes as f64 / (1024.0 * 1024.0),
        resolution: format!("{}x{}", width, height),
    })
}

fn parse_frame_rate(rate_str: &str) -> Option<f64> {
    let parts: Vec<&str> = rate_str.split('/').collect();
    if parts.len() == 2 {
        let num: f64 = parts[0].parse().ok()?;
        let den: f64 = parts[1].parse().ok()?;
        if den != 0.0 {
            return Some(num / den);
        }
    }
    rate_str.parse().ok()
}
