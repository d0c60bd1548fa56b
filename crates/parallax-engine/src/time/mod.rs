//! Frame timing.
//!
//! The render loop ticks one [`FrameClock`] per presented frame. Each tick
//! yields a [`FrameTime`] whose `elapsed` is the monotonic timestamp handed to
//! the frame callback. [`FrameRate`] folds those into periodic reports.

mod frame_clock;
mod frame_rate;

pub use frame_clock::{FrameClock, FrameTime};
pub use frame_rate::{FrameRate, FrameRateReport};
