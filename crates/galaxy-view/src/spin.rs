//! Rigid rotation of the whole point cloud about the vertical axis.

use std::f32::consts::TAU;

use glam::Mat4;

/// Fixed per-frame rotation about +Y.
///
/// The point data never changes; only the model transform does. The angle is
/// kept in `[0, 2π)` so long sessions do not lose f32 precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    angle: f32,
    per_frame: f32,
}

impl Spin {
    pub fn new(per_frame: f32) -> Self {
        Self {
            angle: 0.0,
            per_frame,
        }
    }

    /// Advance by one frame's increment.
    pub fn advance(&mut self) {
        self.angle = (self.angle + self.per_frame).rem_euclid(TAU);
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn per_frame(&self) -> f32 {
        self.per_frame
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.angle)
    }
}
