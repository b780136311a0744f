//! Per-frame command encoding: clear, draw, submit, present.

use crate::gpu::{RenderContext, SurfaceError};
use crate::point_pipeline::{PointCloudRenderer, PointUniform};

/// Convert a linear RGB background color into an opaque clear color.
pub fn clear_color(rgb: [f32; 3]) -> wgpu::Color {
    wgpu::Color {
        r: f64::from(rgb[0]),
        g: f64::from(rgb[1]),
        b: f64::from(rgb[2]),
        a: 1.0,
    }
}

/// One frame's command encoder and target.
///
/// Consumed by [`finish`](Self::finish), which submits the commands and
/// presents the surface texture.
pub struct FrameEncoder {
    encoder: wgpu::CommandEncoder,
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
}

impl FrameEncoder {
    pub fn new(device: &wgpu::Device, surface_texture: wgpu::SurfaceTexture) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            encoder,
            surface_texture,
            view,
        }
    }

    /// Begin a pass that clears the surface to `clear`.
    pub fn begin_clear_pass(&mut self, clear: wgpu::Color) -> wgpu::RenderPass<'_> {
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("galaxy-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }

    /// Submit the recorded commands and present.
    pub fn finish(self, queue: &wgpu::Queue) {
        queue.submit(std::iter::once(self.encoder.finish()));
        self.surface_texture.present();
    }
}

/// Render one frame of the point cloud.
///
/// A [`SurfaceError::Timeout`] means the frame was skipped and the caller may
/// simply try again next frame.
pub fn draw_frame(
    ctx: &RenderContext,
    points: &PointCloudRenderer,
    uniform: &PointUniform,
    clear: wgpu::Color,
) -> Result<(), SurfaceError> {
    let surface_texture = ctx.get_current_texture()?;
    points.update(&ctx.queue, uniform);

    let mut frame = FrameEncoder::new(&ctx.device, surface_texture);
    {
        let mut pass = frame.begin_clear_pass(clear);
        points.render(&mut pass);
    }
    frame.finish(&ctx.queue);
    Ok(())
}
