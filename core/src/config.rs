//! Configuration management (bit.toml)
//!
//! Every tunable of the widget with its default. Settings are stored in TOML
//! in the platform-specific config directory; any missing key falls back to its
//! default, so an empty file is a valid config.

use std::f32::consts::PI;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::procedural::IdleShape;
use crate::state::VisualState;

/// Config file name inside the config directory
pub const CONFIG_FILE: &str = "bit.toml";

/// Widget configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BitConfig {
    /// Hover, pulse, shimmer and transition timing
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Per-state rotation speed
    #[serde(default)]
    pub rotation: RotationConfig,
    /// Shape sizes and spiky-mesh parameters
    #[serde(default)]
    pub geometry: GeometryConfig,
    /// Material flags handed to the renderer
    #[serde(default)]
    pub material: MaterialConfig,
    /// Random answer timing
    #[serde(default)]
    pub ask: AskConfig,
}

/// Animation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Vertical hover amplitude in world units (default: 0.18)
    pub hover_amplitude: f32,
    /// Hover frequency in rad/s (default: 1.7)
    pub hover_frequency: f32,
    /// Idle pulse amplitude (default: 0.06)
    pub idle_pulse_amp: f32,
    /// Yes pulse amplitude (default: 0.05)
    pub yes_pulse_amp: f32,
    /// No pulse amplitude (default: 0.05)
    pub no_pulse_amp: f32,
    /// Outer mesh pulse frequency (default: 2.1)
    pub outer_pulse_freq: f32,
    /// Inner mesh pulse frequency (default: 2.6)
    pub inner_pulse_freq: f32,
    /// Inner mesh scale relative to outer (default: 0.75)
    pub inner_scale_ratio: f32,
    /// Extra pulse phase for the inner mesh (default: 0.35π)
    pub inner_phase_offset: f32,
    /// Inner pulse amplitude multiplier (default: 1.2)
    pub inner_amp_multiplier: f32,
    /// Opacity shimmer amplitude (default: 0.1)
    pub shimmer_amplitude: f32,
    /// Opacity shimmer multiplier (default: 0.5)
    pub shimmer_multiplier: f32,
    /// Crossfade duration in milliseconds (default: 300)
    pub transition_time_ms: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            hover_amplitude: 0.18,
            hover_frequency: 1.7,
            idle_pulse_amp: 0.06,
            yes_pulse_amp: 0.05,
            no_pulse_amp: 0.05,
            outer_pulse_freq: 2.1,
            inner_pulse_freq: 2.6,
            inner_scale_ratio: 0.75,
            inner_phase_offset: PI * 0.35,
            inner_amp_multiplier: 1.2,
            shimmer_amplitude: 0.1,
            shimmer_multiplier: 0.5,
            transition_time_ms: 300.0,
        }
    }
}

impl AnimationConfig {
    /// Pulse amplitude for a state
    pub fn pulse_amp(&self, state: VisualState) -> f32 {
        match state {
            VisualState::Idle => self.idle_pulse_amp,
            VisualState::Yes => self.yes_pulse_amp,
            VisualState::No => self.no_pulse_amp,
        }
    }
}

/// Rotation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Idle rotation speed multiplier (default: 1.0)
    pub idle_speed_multiplier: f32,
    /// Yes rotation speed multiplier (default: 1.0)
    pub yes_speed_multiplier: f32,
    /// No rotation speed multiplier (default: 1.0)
    pub no_speed_multiplier: f32,
    /// Inner self-rotation speed relative to the baseline (default: 1.4)
    pub outer_inner_speed_ratio: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            idle_speed_multiplier: 1.0,
            yes_speed_multiplier: 1.0,
            no_speed_multiplier: 1.0,
            outer_inner_speed_ratio: 1.4,
        }
    }
}

impl RotationConfig {
    /// Speed multiplier for a state
    pub fn speed_multiplier(&self, state: VisualState) -> f32 {
        match state {
            VisualState::Idle => self.idle_speed_multiplier,
            VisualState::Yes => self.yes_speed_multiplier,
            VisualState::No => self.no_speed_multiplier,
        }
    }
}

/// Geometry parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Idle shape radius (default: 0.9)
    pub idle_size: f32,
    /// Idle polyhedron (default: icosahedron)
    pub idle_shape: IdleShape,
    /// Yes cube edge length (default: 1.05)
    pub yes_size: f32,
    /// No base icosahedron radius (default: 0.7)
    pub no_size: f32,
    /// No base icosahedron subdivision (default: 2)
    pub no_detail: u32,
    /// Minimum spike length (default: 0.22)
    pub no_min_amp: f32,
    /// Maximum spike length (default: 0.5)
    pub no_max_amp: f32,
    /// Spike seed (default: 7331)
    pub no_seed: u32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            idle_size: 0.9,
            idle_shape: IdleShape::default(),
            yes_size: 1.05,
            no_size: 0.7,
            no_detail: 2,
            no_min_amp: 0.22,
            no_max_amp: 0.5,
            no_seed: 7331,
        }
    }
}

/// Material parameters.
///
/// Only `transparent` and the opacities affect the animation; the rest is
/// passed through to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    /// Draw as wireframe (default: true)
    pub wireframe: bool,
    /// Material supports opacity (default: true)
    pub transparent: bool,
    /// Resting outer opacity (default: 0.9)
    pub outer_opacity: f32,
    /// Inner opacity is outer minus this (default: 0.25)
    pub inner_opacity_offset: f32,
    /// PBR metalness (default: 0.8)
    pub metalness: f32,
    /// PBR roughness (default: 0.3)
    pub roughness: f32,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            wireframe: true,
            transparent: true,
            outer_opacity: 0.9,
            inner_opacity_offset: 0.25,
            metalness: 0.8,
            roughness: 0.3,
        }
    }
}

/// Timing of the random answer flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AskConfig {
    /// Shortest "thinking" delay in milliseconds (default: 600)
    pub min_delay_ms: f32,
    /// Longest "thinking" delay in milliseconds (default: 1600)
    pub max_delay_ms: f32,
    /// How long an answer stays up before returning to idle (default: 2000)
    pub answer_hold_ms: f32,
    /// Fixed seed for reproducible answers (default: none, seeded from the OS)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for AskConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 600.0,
            max_delay_ms: 1600.0,
            answer_hold_ms: 2000.0,
            seed: None,
        }
    }
}

impl AskConfig {
    /// Thinking delay range in milliseconds, repaired so that `min <= max`
    ///
    /// Non-finite bounds fall back to their defaults and negative bounds
    /// become 0.
    pub fn delay_range_ms(&self) -> (f32, f32) {
        let defaults = AskConfig::default();
        let repair = |name: &str, value: f32, default: f32| {
            if value.is_finite() {
                value.max(0.0)
            } else {
                tracing::warn!("ask.{name} = {value} is not finite, using {default}");
                default
            }
        };
        let mut min = repair("min_delay_ms", self.min_delay_ms, defaults.min_delay_ms);
        let mut max = repair("max_delay_ms", self.max_delay_ms, defaults.max_delay_ms);
        if min > max {
            tracing::warn!(min, max, "Ask delay range reversed, swapping");
            std::mem::swap(&mut min, &mut max);
        }
        (min, max)
    }
}

/// Returns the platform-specific configuration directory.
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "bit", "Bit").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path of `bit.toml` in the platform config directory
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Loads the configuration from the platform config directory.
///
/// Returns default values if the file doesn't exist or cannot be parsed.
pub fn load() -> BitConfig {
    match config_path() {
        Some(path) if path.exists() => load_from(&path).unwrap_or_else(|err| {
            tracing::warn!("{err}; using default config");
            BitConfig::default()
        }),
        _ => BitConfig::default(),
    }
}

/// Loads the configuration from an explicit file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid config TOML.
pub fn load_from(path: &Path) -> Result<BitConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Saves the configuration to the platform config directory.
///
/// Creates the directory if it doesn't exist and returns the written path.
pub fn save(config: &BitConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Saves the configuration to an explicit file, creating parent directories.
pub fn save_to(config: &BitConfig, path: &Path) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(io_err)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================================
    // Default value tests
    // =============================================================

    #[test]
    fn test_config_default() {
        let config = BitConfig::default();
        assert!((config.animation.hover_amplitude - 0.18).abs() < f32::EPSILON);
        assert!((config.animation.transition_time_ms - 300.0).abs() < f32::EPSILON);
        assert!((config.rotation.outer_inner_speed_ratio - 1.4).abs() < f32::EPSILON);
        assert_eq!(config.geometry.no_seed, 7331);
        assert_eq!(config.geometry.idle_shape, IdleShape::Icosahedron);
        assert!(config.material.wireframe);
        assert!(config.ask.seed.is_none());
    }

    #[test]
    fn test_per_state_lookups() {
        let config = BitConfig::default();
        assert!((config.animation.pulse_amp(VisualState::Idle) - 0.06).abs() < f32::EPSILON);
        assert!((config.animation.pulse_amp(VisualState::No) - 0.05).abs() < f32::EPSILON);
        assert!((config.rotation.speed_multiplier(VisualState::Yes) - 1.0).abs() < f32::EPSILON);
    }

    // =============================================================
    // TOML serialization tests
    // =============================================================

    #[test]
    fn test_config_deserialize_empty() {
        let config: BitConfig = toml::from_str("").unwrap();
        assert_eq!(config, BitConfig::default());
    }

    #[test]
    fn test_config_deserialize_partial_section() {
        let toml_str = r#"
[animation]
transition_time_ms = 500.0

[geometry]
idle_shape = "compound"
"#;
        let config: BitConfig = toml::from_str(toml_str).unwrap();
        assert!((config.animation.transition_time_ms - 500.0).abs() < f32::EPSILON);
        assert!((config.animation.hover_frequency - 1.7).abs() < f32::EPSILON); // default
        assert_eq!(config.geometry.idle_shape, IdleShape::Compound);
        assert!((config.geometry.no_max_amp - 0.5).abs() < f32::EPSILON); // default
    }

    #[test]
    fn test_config_serialize_roundtrip() {
        let mut config = BitConfig::default();
        config.rotation.no_speed_multiplier = 2.5;
        config.ask.seed = Some(99);

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: BitConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let mut config = BitConfig::default();
        config.material.wireframe = false;
        save_to(&config, &path).unwrap();

        let loaded = load_from(&path).unwrap();
        assert!(!loaded.material.wireframe);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    // =============================================================
    // Ask delay repair tests
    // =============================================================

    #[test]
    fn test_delay_range_non_finite_uses_defaults() {
        let config: BitConfig =
            toml::from_str("[ask]\nmin_delay_ms = nan\nmax_delay_ms = inf\nseed = 1\n").unwrap();
        assert_eq!(config.ask.delay_range_ms(), (600.0, 1600.0));
    }

    #[test]
    fn test_delay_range_negative_and_reversed() {
        let ask = AskConfig {
            min_delay_ms: -50.0,
            max_delay_ms: -10.0,
            ..AskConfig::default()
        };
        assert_eq!(ask.delay_range_ms(), (0.0, 0.0));

        let ask = AskConfig {
            min_delay_ms: 900.0,
            max_delay_ms: 100.0,
            ..AskConfig::default()
        };
        assert_eq!(ask.delay_range_ms(), (100.0, 900.0));
    }

    #[test]
    fn test_load_invalid_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[animation]\nhover_amplitude = \"high\"\n").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
