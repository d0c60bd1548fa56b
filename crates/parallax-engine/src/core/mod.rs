//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the runtime (platform loop)
//! and the viewer built on top of it. Runtime internals stay behind
//! [`StartCtx`], [`FrameCtx`] and the [`SurfaceHost`] seam.

mod app;
mod ctx;
mod host;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, StartCtx, WindowCtx};
pub use host::SurfaceHost;
