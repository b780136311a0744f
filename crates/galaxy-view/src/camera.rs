//! Perspective camera producing view and projection matrices.

use glam::{Mat3, Mat4, Quat, Vec3};

/// A perspective camera.
///
/// Depth maps to `[0, 1]` with the near plane at 0, as wgpu expects.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Unit quaternion; the camera looks down its local -Z.
    pub rotation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y: 75.0_f32.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn new(fov_y_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y: fov_y_degrees.to_radians(),
            near,
            far,
            ..Self::default()
        }
    }

    /// Turn the camera to face `target`, keeping +Y as up.
    ///
    /// Does nothing when `target` coincides with the camera position. Looking
    /// straight up or down falls back to +X as the camera's right axis.
    pub fn look_at(&mut self, target: Vec3) {
        let Some(forward) = (target - self.position).try_normalize() else {
            return;
        };
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize();
    }

    /// World-to-view transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Update the aspect ratio from a surface size. Zero-sized surfaces are
    /// ignored so the projection never degenerates.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec3_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_default_camera_looks_down_neg_z() {
        let camera = Camera::default();
        assert_vec3_near(camera.forward(), Vec3::NEG_Z);
        assert_vec3_near(camera.up(), Vec3::Y);
        assert_vec3_near(camera.right(), Vec3::X);
    }

    #[test]
    fn test_look_at_origin_from_start_position() {
        let mut camera = Camera::new(75.0, 0.1, 1000.0);
        camera.position = Vec3::new(0.0, 2.0, 10.0);
        camera.look_at(Vec3::ZERO);

        let expected = (Vec3::ZERO - camera.position).normalize();
        assert_vec3_near(camera.forward(), expected);
        assert!(camera.up().y > 0.9);
        assert_vec3_near(camera.right(), Vec3::X);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let mut camera = Camera::new(75.0, 0.1, 1000.0);
        camera.position = Vec3::new(3.0, 4.0, -6.0);
        camera.look_at(Vec3::new(1.0, 0.0, 1.0));

        let clip = camera.view_projection_matrix() * glam::Vec4::new(1.0, 0.0, 1.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn test_near_and_far_planes_map_to_depth_range() {
        let camera = Camera::default();
        let proj = camera.projection_matrix();
        let near = proj * glam::Vec4::new(0.0, 0.0, -camera.near, 1.0);
        let far = proj * glam::Vec4::new(0.0, 0.0, -camera.far, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_look_at_straight_down_stays_finite() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(0.0, 10.0, 0.0);
        camera.look_at(Vec3::ZERO);
        assert_vec3_near(camera.forward(), Vec3::NEG_Y);
        assert!(camera.view_matrix().is_finite());
    }

    #[test]
    fn test_look_at_own_position_is_ignored() {
        let mut camera = Camera::default();
        camera.position = Vec3::ONE;
        let before = camera.rotation;
        camera.look_at(Vec3::ONE);
        assert_eq!(camera.rotation, before);
    }

    #[test]
    fn test_aspect_ratio_updates_and_ignores_zero() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(800.0, 400.0);
        assert_eq!(camera.aspect_ratio, 2.0);
        camera.set_aspect_ratio(800.0, 0.0);
        assert_eq!(camera.aspect_ratio, 2.0);
    }

    #[test]
    fn test_view_matrix_moves_camera_to_origin() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(0.0, 2.0, 10.0);
        camera.look_at(Vec3::ZERO);
        let eye_in_view = camera.view_matrix().transform_point3(camera.position);
        assert_vec3_near(eye_in_view, Vec3::ZERO);
    }
}
