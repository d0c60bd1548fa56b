//! Parallax engine crate.
//!
//! Renders a photograph on a fitted plane and composites a pointer-tracking,
//! depth-displaced grid over it. The platform + GPU runtime pieces live next to
//! the domain modules so the studio binary only wires them together.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;

pub mod assets;
pub mod parallax;
pub mod scene;
