//! Command-line argument parsing for the galaxy viewer.

use std::path::PathBuf;

use clap::Parser;
use galaxy_gen::GalaxyPreset;

use crate::Config;

/// Galaxy viewer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "galaxy", about = "Procedural spiral galaxy viewer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Galaxy preset (classic, diffuse).
    #[arg(long)]
    pub preset: Option<GalaxyPreset>,

    /// Number of stars, overriding the preset.
    #[arg(long)]
    pub stars: Option<u32>,

    /// Generator seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Exit after rendering this many frames.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Disable mouse orbit controls.
    #[arg(long)]
    pub no_orbit: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(preset) = args.preset {
            self.galaxy.preset = preset;
        }
        if let Some(stars) = args.stars {
            self.galaxy.star_count = Some(stars);
        }
        if let Some(seed) = args.seed {
            self.galaxy.seed = Some(seed);
        }
        if let Some(frames) = args.frames {
            self.animation.frame_limit = Some(frames);
        }
        if args.no_orbit {
            self.camera.orbit_enabled = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            preset: Some(GalaxyPreset::Diffuse),
            stars: Some(500),
            no_orbit: true,
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.galaxy.preset, GalaxyPreset::Diffuse);
        assert_eq!(config.galaxy.resolve().star_count, 500);
        assert!(!config.camera.orbit_enabled);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert_eq!(config.galaxy.seed, None);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "galaxy",
            "--preset",
            "diffuse",
            "--seed",
            "99",
            "--frames",
            "10",
            "--no-orbit",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.preset, Some(GalaxyPreset::Diffuse));
        assert_eq!(args.seed, Some(99));
        assert_eq!(args.frames, Some(10));
        assert!(args.no_orbit);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_unknown_preset_rejected() {
        assert!(CliArgs::try_parse_from(["galaxy", "--preset", "barred"]).is_err());
    }
}
