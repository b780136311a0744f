//! Named galaxy variants.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::ColorRamp;
use crate::config::{GalaxyConfig, JitterProfile};

/// A complete galaxy shape plus the rotation rate it is shown with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GalaxyPreset {
    /// Five tight arms with uniform radial density and a full hue sweep.
    #[default]
    Classic,
    /// Four loose arms, rim-heavy density, a thick rim and a narrow blue palette.
    Diffuse,
}

impl GalaxyPreset {
    pub const ALL: [GalaxyPreset; 2] = [GalaxyPreset::Classic, GalaxyPreset::Diffuse];

    /// The preset's generation parameters.
    pub fn config(self) -> GalaxyConfig {
        match self {
            GalaxyPreset::Classic => GalaxyConfig::default(),
            GalaxyPreset::Diffuse => GalaxyConfig {
                star_count: 50_000,
                galaxy_radius: 10.0,
                arm_count: 4,
                arm_spread: 1.2,
                arm_twist: PI / 5.0,
                radius_exponent: 0.5,
                spread_profile: JitterProfile::Quadratic,
                vertical_spread: 0.6,
                vertical_profile: JitterProfile::Linear,
                color: ColorRamp {
                    hue_base: 0.6,
                    hue_scale: 0.1,
                    saturation: 1.0,
                    lightness: 0.8,
                },
            },
        }
    }

    /// Rotation about the vertical axis per rendered frame, in radians.
    pub fn spin_per_frame(self) -> f32 {
        match self {
            GalaxyPreset::Classic => 0.001,
            GalaxyPreset::Diffuse => 0.0005,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GalaxyPreset::Classic => "classic",
            GalaxyPreset::Diffuse => "diffuse",
        }
    }
}

impl fmt::Display for GalaxyPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GalaxyPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GalaxyPreset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown galaxy preset `{s}` (expected classic or diffuse)"))
    }
}
