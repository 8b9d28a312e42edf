//! Smart video trimming engine.
//!
//! `clipmate` analyzes screen recordings and lecture footage for silence,
//! visually repeated stretches and scene changes, and writes the findings as
//! a JSON [`report::DetectionReport`]. A separate step reconciles that report
//! into a keep timeline and executes it as a stream-copy extract-and-concat
//! with ffmpeg.
//!
//! Media tool plumbing (probing, silencedetect, frame sampling, cutting)
//! lives in the `clipmate-av` crate; this crate holds the detection logic,
//! the report and plan models, and the executor.

pub mod config;
pub mod cut;
pub mod detect;
pub mod error;
pub mod plan;
pub mod report;
