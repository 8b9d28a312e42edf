//! Detection pipeline: probe the video, run the three detectors, assemble
//! the report.
//!
//! Probing is fatal when it fails, since the duration drives all downstream
//! math.
//! The detectors themselves are best-effort: a failed detector degrades to an
//! empty (or partial) result list and the run continues.

pub mod repeat;
pub mod scene;
pub mod silence;

use crate::config::{DetectionConfig, Preset, Tunables};
use crate::error::CutError;
use crate::report::DetectionReport;
use clipmate_av::{FrameSampler, SampledFrame, SamplerSpec};
use std::path::Path;
use tracing::{info, warn};

/// Run the full detection pass over a video file.
pub fn run_detection(
    video: &Path,
    preset: Preset,
    tunables: &Tunables,
) -> Result<DetectionReport, CutError> {
    if !video.exists() {
        return Err(CutError::InputNotFound(video.to_path_buf()));
    }

    info!("Probing video info...");
    let video_info =
        clipmate_av::probe_video(video).map_err(|e| CutError::ProbeFailed(e.to_string()))?;
    info!(
        "{} {:.2}s {:.2} fps, {:.2} MB",
        video_info.resolution, video_info.duration, video_info.fps, video_info.size_mb
    );

    let config = DetectionConfig::for_preset(preset);

    info!("Detecting silence...");
    let silence_segments = match clipmate_av::silence::detect_events(
        video,
        config.silence_threshold_db,
        config.silence_min_duration,
    ) {
        Ok(events) => silence::pair_events(
            &events,
            Some(video_info.duration),
            config.silence_min_duration,
        ),
        Err(e) => {
            warn!("Silence detection failed, continuing without it: {}", e);
            Vec::new()
        }
    };
    info!("Found {} silence segments", silence_segments.len());

    let (repeat_segments, scene_changes) = if video_info.duration < tunables.full_scan_max_secs {
        info!("Detecting repeated footage...");
        let repeats = match sampled_frames(video, tunables.repeat_sample_rate, tunables) {
            Ok(frames) => {
                repeat::detect_repeats(frames, config.repeat_similarity, config.repeat_min_duration)
            }
            Err(e) => {
                warn!("Repeat detection failed, continuing without it: {}", e);
                Vec::new()
            }
        };
        info!("Found {} repeat segments", repeats.len());

        info!("Detecting scene changes...");
        let scenes = match sampled_frames(video, tunables.scene_sample_rate, tunables) {
            Ok(frames) => scene::detect_scene_changes(frames, tunables.scene_diff_threshold),
            Err(e) => {
                warn!("Scene detection failed, continuing without it: {}", e);
                Vec::new()
            }
        };
        info!("Found {} scene changes", scenes.len());

        (repeats, scenes)
    } else {
        info!(
            "Video is {:.0}s (>= {:.0}s), skipping frame-based detection",
            video_info.duration, tunables.full_scan_max_secs
        );
        (Vec::new(), Vec::new())
    };

    Ok(DetectionReport::build(
        video_info,
        silence_segments,
        repeat_segments,
        scene_changes,
        preset,
        config,
        tunables,
    ))
}

/// Open a fresh bounded sample stream, absorbing mid-stream decode errors
/// into early termination (partial results).
fn sampled_frames(
    video: &Path,
    rate: f64,
    tunables: &Tunables,
) -> clipmate_av::Result<impl Iterator<Item = SampledFrame>> {
    let sampler = FrameSampler::open(
        video,
        SamplerSpec {
            rate,
            max_samples: tunables.sample_cap(rate),
        },
    )?;

    Ok(sampler.map_while(|item| match item {
        Ok(frame) => Some(frame),
        Err(e) => {
            warn!("Frame sampling stopped early: {}", e);
            None
        }
    }))
}
