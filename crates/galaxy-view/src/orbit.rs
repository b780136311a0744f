//! Orbit controls: drag to circle the target, scroll to zoom, with inertia.

use std::f32::consts::PI;

use glam::Vec3;

use crate::pointer::PointerState;

/// Keeps the polar angle off the poles, where the view's up vector flips.
const POLE_MARGIN: f32 = 1e-3;

/// Pending motion below this is treated as finished.
const SETTLE_EPSILON: f32 = 1e-5;

/// Tuning for [`OrbitControls`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitSettings {
    pub enabled: bool,
    /// Fraction of pending motion applied per update, in (0, 1].
    /// 1 disables inertia.
    pub damping_factor: f32,
    /// Radians per pixel dragged.
    pub rotate_speed: f32,
    /// Log-distance change per scroll line.
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            damping_factor: 0.05,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            min_distance: 1.0,
            max_distance: 100.0,
        }
    }
}

/// Camera orbit around a fixed target in spherical coordinates.
///
/// `azimuth` is measured around +Y from +Z, `polar` down from +Y. Input is
/// queued as pending motion; every [`update`](Self::update) applies
/// `damping_factor` of it and keeps the rest, so the camera glides to a stop
/// after the pointer is released.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    target: Vec3,
    azimuth: f32,
    polar: f32,
    distance: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_zoom: f32,
    settings: OrbitSettings,
}

impl OrbitControls {
    /// Controls that start with the camera at `eye`, looking at `target`.
    pub fn new(eye: Vec3, target: Vec3, settings: OrbitSettings) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        let (azimuth, polar) = if distance > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / distance).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };
        let mut controls = Self {
            target,
            azimuth,
            polar,
            distance,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_zoom: 0.0,
            settings,
        };
        controls.clamp();
        controls
    }

    pub fn settings(&self) -> &OrbitSettings {
        &self.settings
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// Enable or disable input. Disabling drops any motion still pending.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.settings.enabled = enabled;
        if !enabled {
            self.pending_azimuth = 0.0;
            self.pending_polar = 0.0;
            self.pending_zoom = 0.0;
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    /// Queue motion from one frame of pointer input. Ignored while disabled.
    pub fn handle_pointer(&mut self, pointer: &PointerState) {
        if !self.settings.enabled {
            return;
        }
        if pointer.is_dragging() {
            let delta = pointer.delta();
            self.pending_azimuth -= delta.x * self.settings.rotate_speed;
            self.pending_polar -= delta.y * self.settings.rotate_speed;
        }
        // Scrolling away from the user moves the camera closer.
        self.pending_zoom -= pointer.scroll() * self.settings.zoom_speed;
    }

    /// Apply one damped step of pending motion and return the new eye position.
    pub fn update(&mut self) -> Vec3 {
        let k = self.settings.damping_factor.clamp(f32::EPSILON, 1.0);

        self.azimuth += self.pending_azimuth * k;
        self.polar += self.pending_polar * k;
        self.distance *= (self.pending_zoom * k).exp();

        self.pending_azimuth *= 1.0 - k;
        self.pending_polar *= 1.0 - k;
        self.pending_zoom *= 1.0 - k;

        self.clamp();
        self.eye()
    }

    /// Camera position for the current angles and distance.
    pub fn eye(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.target + self.distance * Vec3::new(sin_polar * sin_az, cos_polar, sin_polar * cos_az)
    }

    /// Whether all queued motion has decayed away.
    pub fn is_settled(&self) -> bool {
        self.pending_azimuth.abs() < SETTLE_EPSILON
            && self.pending_polar.abs() < SETTLE_EPSILON
            && self.pending_zoom.abs() < SETTLE_EPSILON
    }

    fn clamp(&mut self) {
        self.polar = self.polar.clamp(POLE_MARGIN, PI - POLE_MARGIN);
        self.distance = self
            .distance
            .clamp(self.settings.min_distance, self.settings.max_distance);
        self.azimuth = self.azimuth.rem_euclid(std::f32::consts::TAU);
    }
}
