//! Input subsystem.
//!
//! The runtime translates winit events into [`InputEvent`]s; nothing here
//! exposes winit types. Pointer motion is funnelled into a [`LatestPointer`]
//! so the scene sees at most one position per frame.

mod latest;
mod types;

pub use latest::LatestPointer;
pub use types::{InputEvent, Key, KeyState, PointerMoveEvent};
