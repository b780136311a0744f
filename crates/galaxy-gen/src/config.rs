//! Galaxy shape parameters and their validation.

use serde::{Deserialize, Serialize};

use crate::color::ColorRamp;
use crate::error::GalaxyError;

/// How a jitter magnitude scales with normalized radius `t = radius / galaxy_radius`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JitterProfile {
    /// Same magnitude everywhere.
    #[default]
    Constant,
    /// Grows linearly from zero at the center to full magnitude at the rim.
    Linear,
    /// Grows with `t²`: a tight core and a loose rim.
    Quadratic,
}

impl JitterProfile {
    /// Scale factor for normalized radius `t`.
    pub fn factor(self, t: f32) -> f32 {
        match self {
            JitterProfile::Constant => 1.0,
            JitterProfile::Linear => t,
            JitterProfile::Quadratic => t * t,
        }
    }
}

/// Immutable description of a spiral galaxy point cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyConfig {
    /// Number of points to generate.
    pub star_count: u32,
    /// Maximum radial extent of the arms, before jitter.
    pub galaxy_radius: f32,
    /// Number of spiral arms. Points are dealt to arms round-robin by index.
    pub arm_count: u32,
    /// Lateral (x/z) jitter magnitude.
    pub arm_spread: f32,
    /// Radians of angular twist per unit radius.
    pub arm_twist: f32,
    /// Exponent applied to the uniform radial sample. Below 1 pushes points
    /// toward the rim, above 1 concentrates them at the center.
    pub radius_exponent: f32,
    /// Radial scaling of the lateral jitter.
    pub spread_profile: JitterProfile,
    /// Vertical (y) jitter magnitude.
    pub vertical_spread: f32,
    /// Radial scaling of the vertical jitter.
    pub vertical_profile: JitterProfile,
    /// Radius-to-color mapping.
    pub color: ColorRamp,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            star_count: 20_000,
            galaxy_radius: 7.0,
            arm_count: 5,
            arm_spread: 0.8,
            arm_twist: std::f32::consts::FRAC_PI_4,
            radius_exponent: 1.0,
            spread_profile: JitterProfile::Constant,
            vertical_spread: 0.2,
            vertical_profile: JitterProfile::Constant,
            color: ColorRamp::default(),
        }
    }
}

impl GalaxyConfig {
    /// Check the fields generation cannot work without.
    ///
    /// Jitter, twist and exponent values are accepted as given; a negative
    /// twist simply bends the arms the other way.
    pub fn validate(&self) -> Result<(), GalaxyError> {
        if self.star_count == 0 {
            return Err(GalaxyError::InvalidConfig {
                field: "star_count",
                reason: "must be greater than zero",
            });
        }
        if self.arm_count == 0 {
            return Err(GalaxyError::InvalidConfig {
                field: "arm_count",
                reason: "must be greater than zero",
            });
        }
        if !self.galaxy_radius.is_finite() || self.galaxy_radius <= 0.0 {
            return Err(GalaxyError::InvalidConfig {
                field: "galaxy_radius",
                reason: "must be a finite value greater than zero",
            });
        }
        Ok(())
    }

    /// Upper bound on the x/z distance a point can be pushed off its arm.
    ///
    /// Each axis is offset by at most half the (profile-scaled) spread and every
    /// profile factor is at most 1, so the planar offset stays within
    /// `|arm_spread| * 0.5 * √2`.
    pub fn max_lateral_jitter(&self) -> f32 {
        self.arm_spread.abs() * 0.5 * std::f32::consts::SQRT_2
    }
}
