//! Composite shader programs.
//!
//! Two WGSL programs share one vertex stage and binding layout (bindings
//! 0–3); the depth program adds the depth map at binding 4. The variant is
//! chosen once, when the scene is built, from whether a depth map was loaded.

use std::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderVariant {
    /// Grid offset from the pointer only.
    Flat,
    /// Grid offset scaled per pixel by the depth map.
    Depth,
}

impl ShaderVariant {
    pub fn for_assets(has_depth: bool) -> Self {
        if has_depth { Self::Depth } else { Self::Flat }
    }

    pub fn uses_depth(self) -> bool {
        self == Self::Depth
    }

    pub fn program(self) -> &'static ShaderProgram {
        match self {
            Self::Flat => &FLAT,
            Self::Depth => &DEPTH,
        }
    }
}

impl fmt::Display for ShaderVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program().name)
    }
}

/// A named, versioned WGSL program with `vs_main` / `fs_main` entry points.
#[derive(Debug)]
pub struct ShaderProgram {
    pub variant: ShaderVariant,
    pub name: &'static str,
    pub version: u32,
    pub source: &'static str,
}

impl ShaderProgram {
    pub const VERTEX_ENTRY: &'static str = "vs_main";
    pub const FRAGMENT_ENTRY: &'static str = "fs_main";

    /// Label used for wgpu objects built from this program.
    pub fn label(&self) -> String {
        format!("parallax {} v{}", self.name, self.version)
    }
}

static FLAT: ShaderProgram = ShaderProgram {
    variant: ShaderVariant::Flat,
    name: "composite_flat",
    version: 1,
    source: include_str!("shaders/composite_flat.wgsl"),
};

static DEPTH: ShaderProgram = ShaderProgram {
    variant: ShaderVariant::Depth,
    name: "composite_depth",
    version: 1,
    source: include_str!("shaders/composite_depth.wgsl"),
};
