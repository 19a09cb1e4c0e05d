//! Interactive diagram viewport engine.
//!
//! Layers pan, zoom and multi-touch gesture control over already-rendered
//! diagram elements. Each diagram gets its own controller via the
//! [`viewport::ViewportRegistry`]; toolbar code drives a controller through
//! its [`viewport::ControllerHandle`].

pub mod components;
pub mod state;
pub mod util;
pub mod viewport;

pub use state::{GestureDelta, GestureSession, Transform};
pub use viewport::{ControllerHandle, ViewportRegistry};
