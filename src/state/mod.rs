pub mod gesture;
pub mod transform;

pub use gesture::{GestureDelta, GestureSession};
pub use transform::{MAX_SCALE, MIN_SCALE, Transform};
