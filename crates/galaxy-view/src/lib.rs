//! Renderer-independent view state for the galaxy viewer: camera, orbit
//! controls, pointer input, rigid spin and the frame scheduler.

pub mod camera;
pub mod frame_loop;
pub mod orbit;
pub mod pointer;
pub mod scene;
pub mod spin;

pub use camera::Camera;
pub use frame_loop::{AnimationLoop, FrameInfo, LoopState};
pub use orbit::{OrbitControls, OrbitSettings};
pub use pointer::PointerState;
pub use scene::{GalaxyScene, SceneSettings};
pub use spin::Spin;
