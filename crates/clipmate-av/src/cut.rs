//! Stream-copy extraction and concatenation.

use crate::{Error, Result};
use std::path::Path;
use std::process::Command;

/// The two media operations a cut plan needs from the outside world.
///
/// Extraction and assembly are behind a trait so the plan executor can be
/// exercised without ffmpeg installed.
pub trait SegmentTool {
    /// Stream-copy `[start, start + duration)` of `input` into `output`.
    fn extract(&self, input: &Path, start: f64, duration: f64, output: &Path) -> Result<()>;

    /// Concatenate `parts` in order into `output` without re-encoding.
    ///
    /// `list_file` is a scratch path the implementation may use for a
    /// demuxer file list.
    fn concat(&self, parts: &[std::path::PathBuf], list_file: &Path, output: &Path) -> Result<()>;
}

/// ffmpeg CLI implementation of [`SegmentTool`].
#[derive(Debug, Default)]
pub struct FfmpegTool;

impl SegmentTool for FfmpegTool {
    fn extract(&self, input: &Path, start: f64, duration: f64, output: &Path) -> Result<()> {
        #[cfg(feature = "tracing")]
        tracing::debug!("Extracting [{:.2}, +{:.2}) into {:?}", start, duration, output);

        let result = Command::new("ffmpeg")
            .args(["-y", "-i"])
            .arg(input)
            .args(["-ss", &start.to_string(), "-t", &duration.to_string()])
            .args(["-c", "copy"])
            .arg(output)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found("ffmpeg")
                } else {
                    Error::Io(e)
                }
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::tool_failed("ffmpeg", stderr.to_string()));
        }

        Ok(())
    }

    fn concat(&self, parts: &[std::path::PathBuf], list_file: &Path, output: &Path) -> Result<()> {
        if parts.is_empty() {
            return Err(Error::InvalidInput("nothing to concatenate".to_string()));
        }

        std::fs::write(list_file, concat_file_list(parts))?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Concatenating {} parts into {:?}", parts.len(), output);

        let result = Command::new("ffmpeg")
            .args(["-y", "-f", "concat", "-safe", "0", "-i"])
            .arg(list_file)
            .args(["-c", "copy"])
            .arg(output)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found("ffmpeg")
                } else {
                    Error::Io(e)
                }
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::tool_failed("ffmpeg", stderr.to_string()));
        }

        Ok(())
    }
}

/// Render a concat-demuxer file list.
///
/// Paths go in single quotes; embedded single quotes use the demuxer's
/// `'\''` escape.
pub fn concat_file_list(parts: &[std::path::PathBuf]) -> String {
    let mut list = String::new();
    for part in parts {
        let path = part.to_string_lossy().replace('\'', "'\\''");
        list.push_str(&format!("file '{}'\n", path));
    }
    list
}
