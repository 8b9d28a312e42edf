//! # clipmate-av
//!
//! External-tool integration layer for clipmate.
//!
//! Everything that touches ffmpeg/ffprobe lives here, behind typed
//! interfaces:
//!
//! - Probing video metadata (ffprobe JSON)
//! - Turning silencedetect's diagnostic text into typed events
//! - Sampling small grayscale frames as a bounded iterator
//! - Stream-copy extraction and concat assembly
//! - Scratch workspace and tool presence checks
//!
//! ## Example
//!
//! ```no_run
//! use clipmate_av::probe_video;
//!
//! let info = probe_video(std::path::Path::new("/path/to/video.mp4"))?;
//! println!("{} ({:.1}s)", info.resolution, info.duration);
//! # Ok::<(), clipmate_av::Error>(())
//! ```

mod error;

pub mod cut;
pub mod frames;
pub mod probe;
pub mod silence;
pub mod tools;
pub mod workspace;

// Re-exports
pub use cut::{concat_file_list, FfmpegTool, SegmentTool};
pub use error::{Error, Result};
pub use frames::{FrameSampler, SampledFrame, SamplerSpec, MAX_PIXEL_VALUE, SAMPLE_PIXELS};
pub use probe::{probe_video, VideoInfo};
pub use silence::SilenceEvent;
pub use tools::{check_tool, check_tools, require_tool, ToolInfo};
pub use workspace::Workspace;
