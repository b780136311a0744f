//! Procedural spiral-galaxy point clouds: deterministic placement of stars along
//! twisted arms, with color derived from radial distance.

pub mod color;
pub mod config;
pub mod error;
pub mod generator;
pub mod preset;
pub mod random;

pub use color::{ColorRamp, hsl_to_rgb};
pub use config::{GalaxyConfig, JitterProfile};
pub use error::GalaxyError;
pub use generator::{GalaxyGenerator, GalaxyPointCloud, Point, generate};
pub use preset::GalaxyPreset;
pub use random::{ConstantSource, RngSource, SequenceSource, UniformSource};
