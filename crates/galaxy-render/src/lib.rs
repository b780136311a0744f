//! wgpu rendering for the galaxy viewer: device and surface setup, viewport
//! tracking and the instanced point-cloud pipeline.

pub mod frame;
pub mod gpu;
pub mod point_pipeline;
pub mod viewport;

pub use frame::{FrameEncoder, clear_color, draw_frame};
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use point_pipeline::{
    PointBlend, PointBufferError, PointCloudRenderer, PointStyle, PointUniform,
};
pub use viewport::{PhysicalSize, ResizeEvent, Viewport};
