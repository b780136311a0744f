//! Galaxy viewer application: generates the point cloud once and shows it in
//! a window until closed or the frame limit is reached.

pub mod error;
pub mod platform;
pub mod settings;
pub mod viewer;

use std::path::PathBuf;

use galaxy_config::Config;
use tracing::{info, instrument};
use winit::event_loop::EventLoop;

pub use error::AppError;
pub use viewer::GalaxyViewer;

/// Generate the configured galaxy and run the viewer until it exits.
///
/// Blocks until the window closes. Generation happens before any window is
/// created, so an invalid galaxy configuration fails without opening one.
#[instrument(skip_all)]
pub fn run(config: Config, config_dir: Option<PathBuf>) -> Result<(), AppError> {
    config.validate()?;

    let galaxy = config.galaxy.resolve();
    let (cloud, seed) = settings::generate_galaxy(&config.galaxy)?;
    info!(
        preset = %config.galaxy.preset,
        seed,
        stars = cloud.len(),
        arms = galaxy.arm_count,
        extent = cloud.planar_extent(),
        "Galaxy generated"
    );

    let event_loop = EventLoop::new()?;
    let mut viewer = GalaxyViewer::new(config, cloud, config_dir);
    event_loop.run_app(&mut viewer)?;

    info!(frames = viewer.frames_rendered(), "Viewer closed");
    viewer.into_result()
}
