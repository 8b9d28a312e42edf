//! Presets and tunable detection policy.
//!
//! A [`Preset`] is a closed set of named profiles, each mapping to an
//! immutable [`DetectionConfig`] validated at selection time. Policy
//! constants that are judgment calls rather than derived values (speed-up
//! saving factor, plan complexity limit, scan caps) live in [`Tunables`] and
//! can be overridden from a TOML config file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Named detection profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Lecture/teaching recordings: tolerant of pauses, strict on repeats.
    Teaching,
    /// Meeting recordings: longer pauses are normal.
    Meeting,
    /// Vlog footage: tight pacing, aggressive silence removal.
    Vlog,
    /// Short-form clips.
    Short,
}

impl Preset {
    /// Resolve a preset by name. Unknown names fall back to `Teaching`.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "meeting" => Preset::Meeting,
            "vlog" => Preset::Vlog,
            "short" => Preset::Short,
            "teaching" => Preset::Teaching,
            other => {
                tracing::warn!("Unknown preset '{}', falling back to teaching", other);
                Preset::Teaching
            }
        }
    }

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Teaching => "teaching",
            Preset::Meeting => "meeting",
            Preset::Vlog => "vlog",
            Preset::Short => "short",
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Detection thresholds selected by preset. Immutable once selected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Noise floor in dB below which audio counts as silence (≤ 0).
    pub silence_threshold_db: f64,
    /// Minimum silence length in seconds worth reporting (> 0).
    pub silence_min_duration: f64,
    /// Frame similarity at or above which footage counts as repeated, in (0, 1].
    pub repeat_similarity: f64,
    /// Minimum repeat length in seconds worth reporting (> 0).
    pub repeat_min_duration: f64,
}

impl DetectionConfig {
    /// The immutable config a preset maps to.
    pub fn for_preset(preset: Preset) -> Self {
        match preset {
            Preset::Teaching => Self {
                silence_threshold_db: -40.0,
                silence_min_duration: 2.0,
                repeat_similarity: 0.95,
                repeat_min_duration: 3.0,
            },
            Preset::Meeting => Self {
                silence_threshold_db: -35.0,
                silence_min_duration: 3.0,
                repeat_similarity: 0.93,
                repeat_min_duration: 5.0,
            },
            Preset::Vlog => Self {
                silence_threshold_db: -45.0,
                silence_min_duration: 1.0,
                repeat_similarity: 0.90,
                repeat_min_duration: 2.0,
            },
            Preset::Short => Self {
                silence_threshold_db: -40.0,
                silence_min_duration: 1.0,
                repeat_similarity: 0.92,
                repeat_min_duration: 2.0,
            },
        }
    }
}

/// Policy constants kept out of the code paths that use them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Fraction of a repeat segment's duration saved by speeding it up
    /// (0.5 means a 2× speed-up).
    pub repeat_speedup_saving: f64,
    /// Maximum keep intervals a plan may have before it is reported as too
    /// complex to execute.
    pub max_keep_intervals: usize,
    /// Videos at or beyond this duration (seconds) skip frame-based
    /// detection entirely.
    pub full_scan_max_secs: f64,
    /// How many seconds of source time the frame detectors scan before the
    /// sample cap kicks in.
    pub analysis_window_secs: f64,
    /// Repeat detector sample rate (frames per second of source time).
    pub repeat_sample_rate: f64,
    /// Scene-change detector sample rate.
    pub scene_sample_rate: f64,
    /// Mean absolute pixel difference above which a sample is a scene change.
    pub scene_diff_threshold: f64,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            repeat_speedup_saving: 0.5,
            max_keep_intervals: 10,
            full_scan_max_secs: 600.0,
            analysis_window_secs: 300.0,
            repeat_sample_rate: 1.0,
            scene_sample_rate: 2.0,
            scene_diff_threshold: 30.0,
        }
    }
}

impl Tunables {
    /// Sample cap for a detector running at `rate` samples/second.
    pub fn sample_cap(&self, rate: f64) -> usize {
        (self.analysis_window_secs * rate).ceil() as usize
    }
}

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Detection policy overrides.
    #[serde(default)]
    pub detection: Tunables,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = ["./clipmate.toml", "~/.config/clipmate/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    let t = &config.detection;

    if !(0.0..=1.0).contains(&t.repeat_speedup_saving) {
        anyhow::bail!(
            "repeat_speedup_saving must be in [0, 1], got {}",
            t.repeat_speedup_saving
        );
    }
    if t.max_keep_intervals == 0 {
        anyhow::bail!("max_keep_intervals must be at least 1");
    }
    if t.repeat_sample_rate <= 0.0 || t.scene_sample_rate <= 0.0 {
        anyhow::bail!("sample rates must be positive");
    }
    if t.analysis_window_secs <= 0.0 {
        anyhow::bail!("analysis_window_secs must be positive");
    }
    if t.scene_diff_threshold <= 0.0 {
        anyhow::bail!("scene_diff_threshold must be positive");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_fallback_to_teaching() {
        assert_eq!(Preset::from_name("teaching"), Preset::Teaching);
        assert_eq!(Preset::from_name("MEETING"), Preset::Meeting);
        assert_eq!(Preset::from_name("does-not-exist"), Preset::Teaching);
        assert_eq!(Preset::from_name(""), Preset::Teaching);
    }

    #[test]
    fn test_preset_configs() {
        let teaching = DetectionConfig::for_preset(Preset::Teaching);
        assert_eq!(teaching.silence_threshold_db, -40.0);
        assert_eq!(teaching.silence_min_duration, 2.0);
        assert_eq!(teaching.repeat_similarity, 0.95);
        assert_eq!(teaching.repeat_min_duration, 3.0);

        let vlog = DetectionConfig::for_preset(Preset::Vlog);
        assert_eq!(vlog.silence_threshold_db, -45.0);
        assert_eq!(vlog.repeat_min_duration, 2.0);
    }

    #[test]
    fn test_tunables_defaults() {
        let t = Tunables::default();
        assert_eq!(t.repeat_speedup_saving, 0.5);
        assert_eq!(t.max_keep_intervals, 10);
        assert_eq!(t.full_scan_max_secs, 600.0);
        assert_eq!(t.sample_cap(1.0), 300);
        assert_eq!(t.sample_cap(2.0), 600);
    }

    #[test]
    fn test_config_from_toml_partial_override() {
        let config: Config = toml::from_str(
            "[detection]\nmax_keep_intervals = 20\nrepeat_speedup_saving = 0.25\n",
        )
        .unwrap();
        assert_eq!(config.detection.max_keep_intervals, 20);
        assert_eq!(config.detection.repeat_speedup_saving, 0.25);
        // Untouched fields keep their defaults
        assert_eq!(config.detection.scene_diff_threshold, 30.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.detection.repeat_speedup_saving = 1.5;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.detection.max_keep_intervals = 0;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.detection.scene_sample_rate = 0.0;
        assert!(validate_config(&config).is_err());
    }
}
