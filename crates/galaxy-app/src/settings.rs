//! Translation from the persisted [`Config`] to the types the view, render
//! and generator crates work with.

use std::path::Path;

use galaxy_config::{BlendMode, CliArgs, Config, ConfigError, GalaxySection, RenderConfig};
use galaxy_gen::{GalaxyError, GalaxyGenerator, GalaxyPointCloud};
use galaxy_render::{PointBlend, PointStyle};
use galaxy_view::{OrbitSettings, SceneSettings};
use glam::Vec3;
use winit::window::WindowAttributes;

/// Load or create `config.ron` in `config_dir` and apply CLI overrides.
///
/// Runs before logging exists, so a load failure is handed back for the
/// caller to report once it can; the config falls back to defaults.
pub fn load_config(config_dir: &Path, args: &CliArgs) -> (Config, Option<ConfigError>) {
    let (mut config, failure) = match Config::load_or_create(config_dir) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    config.apply_cli_overrides(args);
    (config, failure)
}

pub fn window_attributes(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
        ))
}

pub fn scene_settings(config: &Config) -> SceneSettings {
    let camera = &config.camera;
    SceneSettings {
        fov_y_degrees: camera.fov_y_degrees,
        near: camera.near,
        far: camera.far,
        eye: Vec3::from_array(camera.position),
        target: Vec3::ZERO,
        orbit: OrbitSettings {
            enabled: camera.orbit_enabled,
            damping_factor: camera.damping_factor,
            rotate_speed: camera.rotate_speed,
            zoom_speed: camera.zoom_speed,
            min_distance: camera.min_distance,
            max_distance: camera.max_distance,
        },
        spin_per_frame: config.spin_per_frame(),
    }
}

pub fn point_style(render: &RenderConfig) -> PointStyle {
    PointStyle {
        size: render.point_size,
        opacity: render.opacity,
    }
}

pub fn point_blend(mode: BlendMode) -> PointBlend {
    match mode {
        BlendMode::Additive => PointBlend::Additive,
        BlendMode::Alpha => PointBlend::Alpha,
    }
}

/// The configured seed, or a fresh random one.
pub fn resolve_seed(section: &GalaxySection) -> u64 {
    section.seed.unwrap_or_else(rand::random)
}

/// Generate the galaxy described by `section`, returning the seed used.
pub fn generate_galaxy(section: &GalaxySection) -> Result<(GalaxyPointCloud, u64), GalaxyError> {
    let seed = resolve_seed(section);
    let cloud = GalaxyGenerator::new(section.resolve(), seed).generate()?;
    Ok((cloud, seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_gen::GalaxyPreset;

    #[test]
    fn test_load_config_creates_file_and_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            width: Some(800),
            seed: Some(9),
            ..CliArgs::default()
        };

        let (config, failure) = load_config(dir.path(), &args);
        assert!(failure.is_none());
        assert!(Config::file_path(dir.path()).exists());
        assert_eq!(config.window.width, 800);
        assert_eq!(config.galaxy.seed, Some(9));
    }

    #[test]
    fn test_load_config_reports_parse_failure_and_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(Config::file_path(dir.path()), "not ron {{{").unwrap();
        let args = CliArgs {
            no_orbit: true,
            ..CliArgs::default()
        };

        let (config, failure) = load_config(dir.path(), &args);
        assert!(matches!(failure, Some(ConfigError::ParseError(_))));
        assert_eq!(config.window, Config::default().window);
        assert!(!config.camera.orbit_enabled);
    }

    #[test]
    fn test_scene_settings_follow_config() {
        let mut config = Config::default();
        config.camera.position = [1.0, 5.0, 20.0];
        config.camera.orbit_enabled = false;
        config.galaxy.preset = GalaxyPreset::Diffuse;

        let settings = scene_settings(&config);
        assert_eq!(settings.eye, Vec3::new(1.0, 5.0, 20.0));
        assert_eq!(settings.target, Vec3::ZERO);
        assert!(!settings.orbit.enabled);
        assert_eq!(settings.spin_per_frame, 0.0005);
        assert_eq!(settings.fov_y_degrees, 75.0);
    }

    #[test]
    fn test_default_render_config_maps_to_default_style() {
        let render = RenderConfig::default();
        assert_eq!(point_style(&render), PointStyle::default());
        assert_eq!(point_blend(render.blend), PointBlend::Additive);
        assert_eq!(point_blend(BlendMode::Alpha), PointBlend::Alpha);
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let section = GalaxySection {
            seed: Some(11),
            star_count: Some(200),
            ..GalaxySection::default()
        };
        let (a, seed_a) = generate_galaxy(&section).unwrap();
        let (b, seed_b) = generate_galaxy(&section).unwrap();
        assert_eq!(seed_a, 11);
        assert_eq!(seed_b, 11);
        assert_eq!(a, b);
        assert_eq!(a.len(), 200);
    }

    #[test]
    fn test_invalid_override_fails_generation() {
        let section = GalaxySection {
            arm_count: Some(0),
            ..GalaxySection::default()
        };
        assert!(matches!(
            generate_galaxy(&section),
            Err(GalaxyError::InvalidConfig {
                field: "arm_count",
                ..
            })
        ));
    }

    #[test]
    fn test_window_attributes_use_config_title() {
        let config = Config::default();
        let attrs = window_attributes(&config);
        assert_eq!(attrs.title, "Galaxy");
    }
}
