//! The winit application: window, GPU setup, input routing and the per-frame
//! update/render cycle.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use galaxy_config::Config;
use galaxy_gen::GalaxyPointCloud;
use galaxy_render::{
    PointCloudRenderer, PointUniform, RenderContext, SurfaceError, Viewport, clear_color,
    draw_frame, init_render_context_blocking,
};
use galaxy_view::{AnimationLoop, GalaxyScene, LoopState, PointerState};
use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::error::AppError;
use crate::settings;

/// Viewer state. GPU resources exist between `resumed` and exit.
pub struct GalaxyViewer {
    config: Config,
    /// Last config read from disk; reloads compare against this.
    disk_config: Config,
    config_dir: Option<PathBuf>,
    cloud: GalaxyPointCloud,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    points: Option<PointCloudRenderer>,
    viewport: Viewport,
    scene: GalaxyScene,
    pointer: PointerState,
    animation: AnimationLoop,
    failure: Option<AppError>,
}

impl GalaxyViewer {
    /// Set up the scene for an already generated cloud.
    ///
    /// With a `config_dir`, regaining window focus re-reads `config.ron` and
    /// applies point size, opacity and background changes live.
    pub fn new(config: Config, cloud: GalaxyPointCloud, config_dir: Option<PathBuf>) -> Self {
        let mut scene = GalaxyScene::new(&settings::scene_settings(&config));
        scene.resize(config.window.width, config.window.height);
        let animation = AnimationLoop::new(config.animation.frame_limit)
            .with_stats_interval(config.debug.frame_stats_interval);

        Self {
            viewport: Viewport::new(config.window.width, config.window.height, 1.0),
            disk_config: config.clone(),
            config,
            config_dir,
            cloud,
            window: None,
            gpu: None,
            points: None,
            scene,
            pointer: PointerState::new(),
            animation,
            failure: None,
        }
    }

    pub fn scene(&self) -> &GalaxyScene {
        &self.scene
    }

    pub fn frames_rendered(&self) -> u64 {
        self.animation.frame_count()
    }

    /// Fatal error recorded while the event loop ran, if any.
    pub fn into_result(self) -> Result<(), AppError> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        self.animation.stop();
        self.failure = Some(err);
        event_loop.exit();
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window = Arc::new(event_loop.create_window(settings::window_attributes(&self.config))?);

        let inner = window.inner_size();
        self.viewport = Viewport::new(inner.width, inner.height, window.scale_factor());
        let size = self.viewport.size();
        self.scene.resize(size.width, size.height);
        info!(
            "Window created: {}x{} (scale: {:.2})",
            size.width,
            size.height,
            self.viewport.scale_factor()
        );

        let gpu = init_render_context_blocking(window.clone(), self.config.window.vsync)?;
        let points = PointCloudRenderer::from_cloud(
            &gpu.device,
            gpu.surface_format,
            settings::point_blend(self.config.render.blend),
            &self.cloud,
        )?;

        window.request_redraw();
        self.points = Some(points);
        self.gpu = Some(gpu);
        self.window = Some(window);
        Ok(())
    }

    fn apply_resize(&mut self, width: u32, height: u32) {
        self.scene.resize(width, height);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(width, height);
        }
        debug!("Surface resized to {width}x{height}");
    }

    /// Pick up edits to `config.ron` that do not require rebuilding GPU state.
    fn reload_render_settings(&mut self) {
        let Some(dir) = &self.config_dir else {
            return;
        };
        match self.disk_config.reload(dir) {
            Ok(Some(updated)) => {
                let mut candidate = self.config.clone();
                candidate.render.point_size = updated.render.point_size;
                candidate.render.opacity = updated.render.opacity;
                candidate.render.clear_color = updated.render.clear_color;
                self.disk_config = updated;
                if let Err(err) = candidate.validate() {
                    warn!("Ignoring reloaded render settings: {err}");
                    return;
                }
                if candidate.render == self.config.render {
                    return;
                }
                self.config = candidate;
                info!(
                    point_size = self.config.render.point_size,
                    opacity = self.config.render.opacity,
                    "Applied reloaded render settings"
                );
            }
            Ok(None) => {}
            Err(err) => warn!("Config reload failed: {err}"),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frames_before = self.animation.frame_count();
        let scene = &mut self.scene;
        let pointer = &self.pointer;
        let state = self
            .animation
            .frame(Instant::now(), |_| scene.update(pointer));
        self.pointer.clear_transients();

        if self.animation.frame_count() > frames_before
            && let Err(err) = self.render()
        {
            match err {
                SurfaceError::Timeout => warn!("Surface timeout, skipping frame"),
                fatal => {
                    self.fail(event_loop, fatal.into());
                    return;
                }
            }
        }

        match state {
            LoopState::Continue => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            LoopState::Stop => {
                info!(frames = self.animation.frame_count(), "Animation finished");
                event_loop.exit();
            }
        }
    }

    fn render(&self) -> Result<(), SurfaceError> {
        let (Some(gpu), Some(points)) = (&self.gpu, &self.points) else {
            return Ok(());
        };
        let camera = self.scene.camera();
        let uniform = PointUniform::new(
            camera.view_matrix(),
            camera.projection_matrix(),
            self.scene.model_matrix(),
            settings::point_style(&self.config.render),
        );
        draw_frame(
            gpu,
            points,
            &uniform,
            clear_color(self.config.render.clear_color),
        )
    }
}

impl ApplicationHandler for GalaxyViewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.initialize(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                self.animation.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(resize) = self.viewport.handle_resize(new_size.width, new_size.height)
                {
                    self.apply_resize(resize.size.width, resize.size.height);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(window) = &self.window {
                    let inner = window.inner_size();
                    if let Some(resize) = self.viewport.handle_scale_factor_changed(
                        scale_factor,
                        inner.width,
                        inner.height,
                    ) {
                        self.apply_resize(resize.size.width, resize.size.height);
                    }
                }
            }
            WindowEvent::Focused(true) => self.reload_render_settings(),
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::CursorLeft { .. } => self.pointer.on_cursor_left(),
            WindowEvent::MouseInput { state, button, .. } => {
                self.pointer.on_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => self.pointer.on_scroll(delta),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
