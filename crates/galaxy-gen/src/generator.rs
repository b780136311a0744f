//! Spiral-arm point placement.

use std::f32::consts::TAU;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::GalaxyConfig;
use crate::error::GalaxyError;
use crate::random::{RngSource, UniformSource};

/// A copy of one generated star from a [`GalaxyPointCloud`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub position: glam::Vec3,
    /// RGB in [0, 1].
    pub color: [f32; 3],
}

/// Parallel position and color sequences, one entry per star.
///
/// Both sequences always have the same length and share indices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GalaxyPointCloud {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
}

impl GalaxyPointCloud {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the cloud holds no points.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Positions as a flat `x, y, z, x, y, z, ...` buffer.
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colors as a flat `r, g, b, r, g, b, ...` buffer.
    pub fn flat_colors(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// The point at `index`, if any.
    pub fn get(&self, index: usize) -> Option<Point> {
        let position = self.positions.get(index)?;
        let color = self.colors.get(index)?;
        Some(Point {
            position: glam::Vec3::from_array(*position),
            color: *color,
        })
    }

    /// Iterate points in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.positions
            .iter()
            .zip(self.colors.iter())
            .map(|(position, color)| Point {
                position: glam::Vec3::from_array(*position),
                color: *color,
            })
    }

    /// Largest distance of any point from the vertical axis.
    pub fn planar_extent(&self) -> f32 {
        self.positions
            .iter()
            .map(|p| (p[0] * p[0] + p[2] * p[2]).sqrt())
            .fold(0.0, f32::max)
    }
}

/// Generate a spiral galaxy point cloud.
///
/// Every point consumes exactly four draws from `source`, in order: radius,
/// x jitter, y jitter, z jitter. The same config and the same draws always
/// produce the same cloud. Fails without drawing anything if the config is
/// invalid.
pub fn generate<S>(config: &GalaxyConfig, source: &mut S) -> Result<GalaxyPointCloud, GalaxyError>
where
    S: UniformSource + ?Sized,
{
    config.validate()?;

    let count = config.star_count as usize;
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);

    for i in 0..config.star_count {
        let arm = i % config.arm_count;

        let radius = source.next_unit().powf(config.radius_exponent) * config.galaxy_radius;
        let t = radius / config.galaxy_radius;
        let angle = (arm as f32 / config.arm_count as f32) * TAU + radius * config.arm_twist;

        let spread = config.arm_spread * config.spread_profile.factor(t);
        let lift = config.vertical_spread * config.vertical_profile.factor(t);
        let jitter_x = (source.next_unit() - 0.5) * spread;
        let jitter_y = (source.next_unit() - 0.5) * lift;
        let jitter_z = (source.next_unit() - 0.5) * spread;

        positions.push([
            angle.cos() * radius + jitter_x,
            jitter_y,
            angle.sin() * radius + jitter_z,
        ]);
        colors.push(config.color.color_at(t));
    }

    log::debug!(
        "Generated {} stars over {} arms (radius {}, twist {:.3} rad/unit)",
        count,
        config.arm_count,
        config.galaxy_radius,
        config.arm_twist
    );

    Ok(GalaxyPointCloud { positions, colors })
}

/// Seeded generator: the same seed and config always produce the same galaxy.
#[derive(Debug, Clone)]
pub struct GalaxyGenerator {
    config: GalaxyConfig,
    seed: u64,
}

impl GalaxyGenerator {
    pub fn new(config: GalaxyConfig, seed: u64) -> Self {
        Self { config, seed }
    }

    pub fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate the cloud from a fresh `ChaCha8Rng` seeded with `seed`.
    pub fn generate(&self) -> Result<GalaxyPointCloud, GalaxyError> {
        let mut source = RngSource(ChaCha8Rng::seed_from_u64(self.seed));
        generate(&self.config, &mut source)
    }
}
