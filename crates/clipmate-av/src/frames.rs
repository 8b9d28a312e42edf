//! Bounded grayscale frame sampling.
//!
//! Decoding is delegated to ffmpeg: a child process scales the video to a
//! small grayscale raster at a fixed sample rate and streams raw frames over
//! stdout. [`FrameSampler`] wraps that pipe as a lazy, finite iterator; the
//! sample cap is a first-class parameter, not an inline guard, and each
//! `open` spawns a fresh process so a scan is restartable per invocation.

use crate::{Error, Result};
use std::io::Read;
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

/// Width of a sampled frame in pixels.
pub const SAMPLE_WIDTH: usize = 64;
/// Height of a sampled frame in pixels.
pub const SAMPLE_HEIGHT: usize = 64;
/// Pixel count of a sampled frame.
pub const SAMPLE_PIXELS: usize = SAMPLE_WIDTH * SAMPLE_HEIGHT;
/// Maximum value of a grayscale pixel.
pub const MAX_PIXEL_VALUE: f64 = 255.0;

/// One downscaled grayscale frame taken from the sample stream.
#[derive(Debug, Clone)]
pub struct SampledFrame {
    /// Zero-based position in the sample stream.
    pub index: usize,
    /// Presentation time of the sample in seconds (`index / rate`).
    pub timestamp: f64,
    /// `SAMPLE_PIXELS` grayscale values, row-major.
    pub pixels: Vec<u8>,
}

/// Parameters for a sampling pass.
#[derive(Debug, Clone, Copy)]
pub struct SamplerSpec {
    /// Samples per second of source time.
    pub rate: f64,
    /// Hard cap on the number of frames produced.
    pub max_samples: usize,
}

/// Lazy, finite iterator of sampled frames backed by an ffmpeg child process.
pub struct FrameSampler {
    child: Child,
    stdout: ChildStdout,
    spec: SamplerSpec,
    next_index: usize,
    done: bool,
}

impl FrameSampler {
    /// Start sampling `path`.
    ///
    /// # Errors
    ///
    /// Fails if the spec is invalid or ffmpeg cannot be spawned. Decode
    /// problems surface later as iterator items.
    pub fn open(path: &Path, spec: SamplerSpec) -> Result<Self> {
        if spec.rate <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "sample rate must be positive, got {}",
                spec.rate
            )));
        }
        if spec.max_samples == 0 {
            return Err(Error::InvalidInput(
                "sample cap must be at least 1".to_string(),
            ));
        }

        let filter = format!(
            "fps={},scale={}:{},format=gray",
            spec.rate, SAMPLE_WIDTH, SAMPLE_HEIGHT
        );

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Sampling {:?} at {}/s, cap {} frames",
            path,
            spec.rate,
            spec.max_samples
        );

        let mut child = Command::new("ffmpeg")
            .args(["-v", "error", "-i"])
            .arg(path)
            .args(["-vf", &filter, "-f", "rawvideo", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found("ffmpeg")
                } else {
                    Error::Io(e)
                }
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::tool_failed("ffmpeg", "no stdout pipe"))?;

        Ok(Self {
            child,
            stdout,
            spec,
            next_index: 0,
            done: false,
        })
    }

    /// Stop the stream early and reap the child.
    fn finish(&mut self) {
        if !self.done {
            self.done = true;
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

impl Iterator for FrameSampler {
    type Item = Result<SampledFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.next_index >= self.spec.max_samples {
            self.finish();
            return None;
        }

        let mut pixels = vec![0u8; SAMPLE_PIXELS];
        match self.stdout.read_exact(&mut pixels) {
            Ok(()) => {
                let index = self.next_index;
                self.next_index += 1;
                Some(Ok(SampledFrame {
                    index,
                    timestamp: index as f64 / self.spec.rate,
                    pixels,
                }))
            }
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                // Normal end of stream (possibly mid-frame on a broken file).
                self.finish();
                None
            }
            Err(e) => {
                self.finish();
                Some(Err(Error::Io(e)))
            }
        }
    }
}

impl Drop for FrameSampler {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_spec_rejected() {
        let bad_rate = FrameSampler::open(
            Path::new("x.mp4"),
            SamplerSpec {
                rate: 0.0,
                max_samples: 10,
            },
        );
        assert!(matches!(bad_rate, Err(Error::InvalidInput(_))));

        let bad_cap = FrameSampler::open(
            Path::new("x.mp4"),
            SamplerSpec {
                rate: 1.0,
                max_samples: 0,
            },
        );
        assert!(matches!(bad_cap, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_sample_geometry() {
        assert_eq!(SAMPLE_PIXELS, 4096);
    }
}
