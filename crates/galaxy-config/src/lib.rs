//! Configuration for the galaxy viewer.
//!
//! Settings persist to disk as `config.ron`, can be overridden from the
//! command line, and are re-read on demand to detect edits.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AnimationConfig, BlendMode, CameraConfig, Config, DebugConfig, GalaxySection, RenderConfig,
    WindowConfig,
};
pub use error::ConfigError;
