//! Instanced billboard pipeline for the star point cloud.
//!
//! Each star is one instance of a unit quad. Positions and colors live in two
//! separate instance buffers uploaded once, three floats per point each; only
//! the uniform changes per frame.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use galaxy_gen::GalaxyPointCloud;
use glam::Mat4;
use wgpu::util::DeviceExt;

/// WGSL source for the point-cloud pipeline.
pub const POINT_SHADER_SOURCE: &str = r#"
struct PointUniform {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    model: mat4x4<f32>,
    // x: point size in world units, y: opacity
    style: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> u: PointUniform;

struct VertexInput {
    @location(0) corner: vec2<f32>,
    @location(1) center: vec3<f32>,
    @location(2) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec3<f32>,
};

fn srgb_to_linear(c: vec3<f32>) -> vec3<f32> {
    let low = c / 12.92;
    let high = pow((c + vec3<f32>(0.055)) / 1.055, vec3<f32>(2.4));
    return select(high, low, c <= vec3<f32>(0.04045));
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let view_center = u.view * u.model * vec4<f32>(in.center, 1.0);
    // Offset in view space so the quad always faces the camera and shrinks
    // with distance.
    let half_size = u.style.x * 0.5;
    let view_pos = view_center + vec4<f32>(in.corner * half_size, 0.0, 0.0);
    out.clip_position = u.proj * view_pos;
    out.uv = in.corner;
    out.color = srgb_to_linear(clamp(in.color, vec3<f32>(0.0), vec3<f32>(1.0)));
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv);
    if dist > 1.0 {
        discard;
    }
    let alpha = u.style.y * (1.0 - smoothstep(0.5, 1.0, dist));
    // Premultiplied: valid for both additive and over blending.
    return vec4<f32>(in.color * alpha, alpha);
}
"#;

/// Uniform block: view, projection and model matrices plus point style.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PointUniform {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// `[point_size, opacity, 0, 0]`
    pub style: [f32; 4],
}

impl PointUniform {
    pub fn new(view: Mat4, proj: Mat4, model: Mat4, style: PointStyle) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            style: [style.size, style.opacity, 0.0, 0.0],
        }
    }
}

/// Appearance of every point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointStyle {
    /// Diameter in world units.
    pub size: f32,
    /// Opacity in [0, 1].
    pub opacity: f32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            size: 0.05,
            opacity: 1.0,
        }
    }
}

/// How overlapping points combine with what is already drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointBlend {
    /// Colors add; dense regions saturate toward white.
    #[default]
    Additive,
    /// Premultiplied-alpha transparency.
    Alpha,
}

impl PointBlend {
    pub fn blend_state(self) -> wgpu::BlendState {
        match self {
            PointBlend::Additive => wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent::OVER,
            },
            PointBlend::Alpha => wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
        }
    }
}

/// Flat position and color buffers that cannot be drawn as points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PointBufferError {
    #[error("flat buffer length {0} is not a multiple of 3")]
    Ragged(usize),

    #[error("{positions} position floats but {colors} color floats")]
    LengthMismatch { positions: usize, colors: usize },

    #[error("{0} points exceed the drawable instance range")]
    TooManyPoints(usize),
}

/// Number of points described by matching flat position and color buffers.
pub fn instance_count(positions: &[f32], colors: &[f32]) -> Result<u32, PointBufferError> {
    for len in [positions.len(), colors.len()] {
        if len % 3 != 0 {
            return Err(PointBufferError::Ragged(len));
        }
    }
    if positions.len() != colors.len() {
        return Err(PointBufferError::LengthMismatch {
            positions: positions.len(),
            colors: colors.len(),
        });
    }
    let points = positions.len() / 3;
    u32::try_from(points).map_err(|_| PointBufferError::TooManyPoints(points))
}

/// Unit quad corner.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct QuadVertex {
    corner: [f32; 2],
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex {
        corner: [-1.0, -1.0],
    },
    QuadVertex {
        corner: [1.0, -1.0],
    },
    QuadVertex { corner: [1.0, 1.0] },
    QuadVertex {
        corner: [-1.0, 1.0],
    },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

const QUAD_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 0,
        shader_location: 0,
    }],
};

const POSITION_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: 12,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &[wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 1,
    }],
};

const COLOR_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: 12,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &[wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 2,
    }],
};

/// Draws a static point cloud as camera-facing soft discs.
pub struct PointCloudRenderer {
    pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    position_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    point_count: u32,
}

impl PointCloudRenderer {
    /// Upload a generated cloud and build the pipeline for `target_format`.
    pub fn from_cloud(
        device: &wgpu::Device,
        target_format: wgpu::TextureFormat,
        blend: PointBlend,
        cloud: &GalaxyPointCloud,
    ) -> Result<Self, PointBufferError> {
        Self::new(
            device,
            target_format,
            blend,
            cloud.flat_positions(),
            cloud.flat_colors(),
        )
    }

    /// Upload flat `x, y, z` positions and `r, g, b` colors, one triple per
    /// point, and build the pipeline for `target_format`.
    pub fn new(
        device: &wgpu::Device,
        target_format: wgpu::TextureFormat,
        blend: PointBlend,
        positions: &[f32],
        colors: &[f32],
    ) -> Result<Self, PointBufferError> {
        let point_count = instance_count(positions, colors)?;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("point-cloud-shader"),
            source: wgpu::ShaderSource::Wgsl(POINT_SHADER_SOURCE.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("point-cloud-bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<PointUniform>() as u64),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("point-cloud-layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("point-cloud-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[QUAD_LAYOUT, POSITION_LAYOUT, COLOR_LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(blend.blend_state()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("point-cloud-quad"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("point-cloud-indices"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("point-cloud-positions"),
            contents: bytemuck::cast_slice(positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let color_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("point-cloud-colors"),
            contents: bytemuck::cast_slice(colors),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform = PointUniform::new(
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            PointStyle::default(),
        );
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("point-cloud-uniform"),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("point-cloud-bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        log::info!("Point cloud renderer initialized ({point_count} points, {blend:?} blending)");

        Ok(Self {
            pipeline,
            quad_buffer,
            index_buffer,
            position_buffer,
            color_buffer,
            uniform_buffer,
            bind_group,
            point_count,
        })
    }

    /// Write this frame's matrices and style.
    pub fn update(&self, queue: &wgpu::Queue, uniform: &PointUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniform));
    }

    pub fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        if self.point_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
        pass.set_vertex_buffer(1, self.position_buffer.slice(..));
        pass.set_vertex_buffer(2, self.color_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..self.point_count);
    }

    pub fn point_count(&self) -> u32 {
        self.point_count
    }
}
