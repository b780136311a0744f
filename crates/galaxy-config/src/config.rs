//! Viewer settings with defaults matching the classic galaxy, persisted as RON.

use std::path::{Path, PathBuf};

use galaxy_gen::{GalaxyConfig, GalaxyPreset};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub camera: CameraConfig,
    pub galaxy: GalaxySection,
    pub animation: AnimationConfig,
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    pub title: String,
    /// Present with `PresentMode::Fifo`.
    pub vsync: bool,
}

/// How overlapping points combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Colors add up; dense regions glow.
    #[default]
    Additive,
    /// Ordinary transparency.
    Alpha,
}

/// Point rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Point diameter in world units.
    pub point_size: f32,
    /// Point opacity in [0, 1].
    pub opacity: f32,
    pub blend: BlendMode,
    /// Background color, linear RGB.
    pub clear_color: [f32; 3],
}

/// Camera and orbit-control configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Starting eye position; the camera looks at the origin.
    pub position: [f32; 3],
    /// Allow dragging and scrolling to orbit the galaxy.
    pub orbit_enabled: bool,
    /// Fraction of pending orbit motion applied per frame.
    pub damping_factor: f32,
    /// Radians of orbit per pixel dragged.
    pub rotate_speed: f32,
    /// Zoom strength per scroll line.
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

/// Which galaxy to generate: a preset plus optional per-field overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GalaxySection {
    pub preset: GalaxyPreset,
    /// Seed for the point generator. `None` picks a fresh one each run.
    pub seed: Option<u64>,
    pub star_count: Option<u32>,
    pub galaxy_radius: Option<f32>,
    pub arm_count: Option<u32>,
    pub arm_spread: Option<f32>,
    pub arm_twist: Option<f32>,
}

/// Animation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Radians of rotation per frame. `None` uses the preset's rate.
    pub spin_per_frame: Option<f32>,
    /// Close the viewer after this many frames.
    pub frame_limit: Option<u64>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter, e.g. "info" or "debug,wgpu=warn".
    pub log_level: String,
    /// Log frame timing once per this many frames. 0 disables it.
    pub frame_stats_interval: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Galaxy".to_string(),
            vsync: true,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            point_size: 0.05,
            opacity: 1.0,
            blend: BlendMode::Additive,
            clear_color: [0.0, 0.0, 0.0],
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 2.0, 10.0],
            orbit_enabled: true,
            damping_factor: 0.05,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            min_distance: 1.0,
            max_distance: 100.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            frame_stats_interval: 0,
        }
    }
}

impl GalaxySection {
    /// The preset's generation parameters with this section's overrides applied.
    pub fn resolve(&self) -> GalaxyConfig {
        let mut config = self.preset.config();
        if let Some(count) = self.star_count {
            config.star_count = count;
        }
        if let Some(radius) = self.galaxy_radius {
            config.galaxy_radius = radius;
        }
        if let Some(arms) = self.arm_count {
            config.arm_count = arms;
        }
        if let Some(spread) = self.arm_spread {
            config.arm_spread = spread;
        }
        if let Some(twist) = self.arm_twist {
            config.arm_twist = twist;
        }
        config
    }
}

impl Config {
    /// Rotation per frame: the explicit setting, else the preset's rate.
    pub fn spin_per_frame(&self) -> f32 {
        self.animation
            .spin_per_frame
            .unwrap_or_else(|| self.galaxy.preset.spin_per_frame())
    }

    /// Reject settings the viewer cannot run with.
    ///
    /// Galaxy shape fields are checked by the generator itself.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |section: &'static str,
                       field: &'static str,
                       reason: &'static str|
         -> Result<(), ConfigError> {
            Err(ConfigError::InvalidValue {
                section,
                field,
                reason,
            })
        };
        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window", "width/height", "must be greater than zero");
        }
        if !(self.render.point_size > 0.0) {
            return invalid("render", "point_size", "must be greater than zero");
        }
        if !(0.0..=1.0).contains(&self.render.opacity) {
            return invalid("render", "opacity", "must be within 0..=1");
        }
        if !(self.camera.fov_y_degrees > 0.0 && self.camera.fov_y_degrees < 180.0) {
            return invalid("camera", "fov_y_degrees", "must be within (0, 180)");
        }
        if !(self.camera.near > 0.0 && self.camera.near < self.camera.far) {
            return invalid("camera", "near", "must be positive and less than `far`");
        }
        if !(self.camera.damping_factor > 0.0 && self.camera.damping_factor <= 1.0) {
            return invalid("camera", "damping_factor", "must be within (0, 1]");
        }
        if !(self.camera.min_distance > 0.0 && self.camera.min_distance <= self.camera.max_distance)
        {
            return invalid(
                "camera",
                "min_distance",
                "must be positive and at most `max_distance`",
            );
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Path of the config file inside `config_dir`.
    pub fn file_path(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = Self::file_path(config_dir);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(Self::file_path(config_dir), serialized).map_err(ConfigError::WriteError)
    }

    /// Re-read the file; `Some` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&Self::file_path(config_dir))?;
        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_describe_classic_view() {
        let config = Config::default();
        assert_eq!(config.galaxy.preset, GalaxyPreset::Classic);
        assert_eq!(config.camera.fov_y_degrees, 75.0);
        assert_eq!(config.camera.position, [0.0, 2.0, 10.0]);
        assert_eq!(config.render.point_size, 0.05);
        assert_eq!(config.spin_per_frame(), 0.001);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 1280"));
        assert!(ron_str.contains("preset: classic"));
        assert!(ron_str.contains("blend: additive"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.galaxy.seed = Some(7);
        config.galaxy.arm_twist = Some(0.5);
        config.animation.frame_limit = Some(600);
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = ron::from_str("(galaxy: (preset: diffuse))").unwrap();
        assert_eq!(config.galaxy.preset, GalaxyPreset::Diffuse);
        assert_eq!(config.camera, CameraConfig::default());
        assert_eq!(config.spin_per_frame(), 0.0005);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_applies_overrides() {
        let section = GalaxySection {
            preset: GalaxyPreset::Diffuse,
            star_count: Some(123),
            arm_count: Some(2),
            ..GalaxySection::default()
        };
        let resolved = section.resolve();
        let diffuse = GalaxyPreset::Diffuse.config();
        assert_eq!(resolved.star_count, 123);
        assert_eq!(resolved.arm_count, 2);
        assert_eq!(resolved.galaxy_radius, diffuse.galaxy_radius);
        assert_eq!(resolved.spread_profile, diffuse.spread_profile);
    }

    #[test]
    fn test_resolve_without_overrides_is_preset() {
        for preset in GalaxyPreset::ALL {
            let section = GalaxySection {
                preset,
                ..GalaxySection::default()
            };
            assert_eq!(section.resolve(), preset.config());
        }
    }

    #[test]
    fn test_explicit_spin_wins_over_preset() {
        let mut config = Config::default();
        config.animation.spin_per_frame = Some(0.01);
        assert_eq!(config.spin_per_frame(), 0.01);
    }

    #[test]
    fn test_validate_rejects_unusable_values() {
        let mut zero_width = Config::default();
        zero_width.window.width = 0;

        let mut bad_clip = Config::default();
        bad_clip.camera.near = 10.0;
        bad_clip.camera.far = 1.0;

        let mut bad_opacity = Config::default();
        bad_opacity.render.opacity = 1.5;

        let mut nan_size = Config::default();
        nan_size.render.point_size = f32::NAN;

        for config in [zero_width, bad_clip, bad_opacity, nan_size] {
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidValue { .. })
            ));
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.window.width = 1920;
        config.galaxy.preset = GalaxyPreset::Diffuse;
        config.render.blend = BlendMode::Alpha;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("galaxy");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(Config::file_path(&nested).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.render.point_size = 0.1;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap();
        assert_eq!(reloaded.map(|c| c.render.point_size), Some(0.1));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(Config::file_path(dir.path()), "(window: (width: \"wide\"))").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
