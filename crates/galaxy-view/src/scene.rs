//! The galaxy scene: camera, orbit controls and spin, advanced once per frame.

use glam::{Mat4, Vec3};

use crate::camera::Camera;
use crate::orbit::{OrbitControls, OrbitSettings};
use crate::pointer::PointerState;
use crate::spin::Spin;

/// Everything needed to build a [`GalaxyScene`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSettings {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub eye: Vec3,
    pub target: Vec3,
    pub orbit: OrbitSettings,
    /// Radians of spin per frame.
    pub spin_per_frame: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            eye: Vec3::new(0.0, 2.0, 10.0),
            target: Vec3::ZERO,
            orbit: OrbitSettings::default(),
            spin_per_frame: 0.001,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GalaxyScene {
    camera: Camera,
    controls: OrbitControls,
    spin: Spin,
}

impl GalaxyScene {
    pub fn new(settings: &SceneSettings) -> Self {
        let mut camera = Camera::new(settings.fov_y_degrees, settings.near, settings.far);
        camera.position = settings.eye;
        camera.look_at(settings.target);

        Self {
            camera,
            controls: OrbitControls::new(settings.eye, settings.target, settings.orbit.clone()),
            spin: Spin::new(settings.spin_per_frame),
        }
    }

    /// Advance one frame: spin the galaxy, then move the camera from the
    /// pointer input gathered since the last frame.
    pub fn update(&mut self, pointer: &PointerState) {
        self.spin.advance();
        self.controls.handle_pointer(pointer);
        if self.controls.is_enabled() {
            self.camera.position = self.controls.update();
            self.camera.look_at(self.controls.target());
        }
    }

    /// Match the camera to a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect_ratio(width as f32, height as f32);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn spin(&self) -> &Spin {
        &self.spin
    }

    /// Model transform of the point cloud.
    pub fn model_matrix(&self) -> Mat4 {
        self.spin.model_matrix()
    }
}
