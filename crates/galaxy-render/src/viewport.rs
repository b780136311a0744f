//! Window size tracking that turns resize and DPI notifications into surface
//! sizes the GPU accepts.

/// Physical pixel dimensions, never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    /// Clamp each dimension to at least 1.
    pub fn clamped(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Emitted when the surface must be reconfigured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeEvent {
    pub size: PhysicalSize,
    pub scale_factor: f64,
}

/// Current surface size and scale factor.
///
/// Wayland compositors may report a zero size before the first configure;
/// such sizes are kept at 1×1 and the viewport counts as not yet sized.
#[derive(Clone, Debug)]
pub struct Viewport {
    size: PhysicalSize,
    scale_factor: f64,
    sized: bool,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale_factor: f64) -> Self {
        Self {
            size: PhysicalSize::clamped(width, height),
            scale_factor,
            sized: width > 0 && height > 0,
        }
    }

    /// Handle a `Resized` notification. Returns an event only when the
    /// clamped size actually changed.
    pub fn handle_resize(&mut self, width: u32, height: u32) -> Option<ResizeEvent> {
        let size = PhysicalSize::clamped(width, height);
        if width > 0 && height > 0 {
            self.sized = true;
        }
        if size == self.size {
            return None;
        }
        self.size = size;
        Some(ResizeEvent {
            size,
            scale_factor: self.scale_factor,
        })
    }

    /// Handle a `ScaleFactorChanged` notification together with the new
    /// physical size.
    pub fn handle_scale_factor_changed(
        &mut self,
        scale_factor: f64,
        width: u32,
        height: u32,
    ) -> Option<ResizeEvent> {
        self.scale_factor = scale_factor;
        self.handle_resize(width, height)
    }

    pub fn size(&self) -> PhysicalSize {
        self.size
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Size in logical pixels.
    pub fn logical_size(&self) -> (f64, f64) {
        (
            self.size.width as f64 / self.scale_factor,
            self.size.height as f64 / self.scale_factor,
        )
    }

    /// Whether a real, non-zero size has been reported at least once.
    pub fn is_sized(&self) -> bool {
        self.sized
    }
}
