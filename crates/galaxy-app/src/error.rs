//! Top-level application errors.

use galaxy_config::ConfigError;
use galaxy_gen::GalaxyError;
use galaxy_render::{PointBufferError, RenderContextError, SurfaceError};

use crate::platform::PlatformError;

/// Anything that ends the viewer early.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("galaxy generation failed: {0}")]
    Galaxy(#[from] GalaxyError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU initialization failed: {0}")]
    Render(#[from] RenderContextError),

    #[error("cannot upload point cloud: {0}")]
    Points(#[from] PointBufferError),

    #[error("rendering stopped: {0}")]
    Surface(#[from] SurfaceError),
}
