//! GPU device + surface management.
//!
//! Creates the wgpu instance/adapter/device/queue for a window, keeps the
//! swapchain configured across resizes and hands out per-frame encoders.

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
