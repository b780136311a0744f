//! GPU device initialization and surface management.

use std::sync::Arc;

use winit::window::Window;

/// Failures while bringing up the GPU.
#[derive(Debug, thiserror::Error)]
pub enum RenderContextError {
    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("failed to request GPU device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("failed to create surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    /// The adapter reports no usable format for the window surface.
    #[error("surface is not supported by the selected adapter")]
    UnsupportedSurface,
}

/// Failures acquiring the next frame's surface texture.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// Surface was lost and could not be recovered.
    #[error("surface lost")]
    Lost,

    #[error("out of memory")]
    OutOfMemory,

    /// Recoverable; skip the frame.
    #[error("timeout")]
    Timeout,
}

/// Owns all GPU state: instance, adapter, device, queue and surface.
pub struct RenderContext {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub surface_format: wgpu::TextureFormat,
}

impl RenderContext {
    /// Initialize the GPU for `window`.
    ///
    /// With `vsync` the surface presents with `Fifo`; otherwise the lowest
    /// latency mode the surface offers is used.
    pub async fn new(window: Arc<Window>, vsync: bool) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let size = window.inner_size();
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderContextError::NoAdapter)?;

        let info = adapter.get_info();
        log::info!(
            "Selected GPU: {} ({:?}, {:?})",
            info.name,
            info.backend,
            info.device_type
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("galaxy-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = select_preferred_srgb_format(&surface_caps.formats)
            .ok_or(RenderContextError::UnsupportedSurface)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: select_present_mode(&surface_caps.present_modes, vsync),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);
        log::debug!(
            "Surface configured: {}x{} {:?} {:?}",
            surface_config.width,
            surface_config.height,
            surface_format,
            surface_config.present_mode
        );

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
            surface,
            surface_config,
            surface_format,
        })
    }

    /// Reconfigure the surface after a window resize. Zero sizes are clamped to 1.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface_config.width = width.max(1);
        self.surface_config.height = height.max(1);
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Current surface size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    /// Acquire the next surface texture, reconfiguring once if the surface was
    /// lost or outdated.
    pub fn get_current_texture(&self) -> Result<wgpu::SurfaceTexture, SurfaceError> {
        match self.surface.get_current_texture() {
            Ok(texture) => Ok(texture),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                self.surface
                    .get_current_texture()
                    .map_err(|_| SurfaceError::Lost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(SurfaceError::OutOfMemory),
            Err(wgpu::SurfaceError::Timeout) => Err(SurfaceError::Timeout),
            Err(wgpu::SurfaceError::Other) => {
                log::error!("Unknown surface error occurred");
                Err(SurfaceError::Lost)
            }
        }
    }
}

/// Initialize the GPU synchronously using `pollster`.
pub fn init_render_context_blocking(
    window: Arc<Window>,
    vsync: bool,
) -> Result<RenderContext, RenderContextError> {
    pollster::block_on(RenderContext::new(window, vsync))
}

/// Prefer `Bgra8UnormSrgb`, then `Rgba8UnormSrgb`, then any sRGB format, then
/// whatever comes first.
fn select_preferred_srgb_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    [
        wgpu::TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    ]
    .into_iter()
    .find(|preferred| formats.contains(preferred))
    .or_else(|| formats.iter().copied().find(|f| f.is_srgb()))
    .or_else(|| formats.first().copied())
}

/// `Fifo` for vsync (always supported); otherwise `Mailbox`, then
/// `Immediate`, falling back to `Fifo`.
fn select_present_mode(available: &[wgpu::PresentMode], vsync: bool) -> wgpu::PresentMode {
    if vsync {
        return wgpu::PresentMode::Fifo;
    }
    [wgpu::PresentMode::Mailbox, wgpu::PresentMode::Immediate]
        .into_iter()
        .find(|mode| available.contains(mode))
        .unwrap_or(wgpu::PresentMode::Fifo)
}
