use std::fmt;
use std::path::PathBuf;

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetSource {
    /// Encoded image file on disk (PNG or JPEG).
    File(PathBuf),

    /// Named entry registered with a [`MemoryImageLoader`](super::MemoryImageLoader).
    Memory(String),
}

impl AssetSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn memory(name: impl Into<String>) -> Self {
        Self::Memory(name.into())
    }
}

impl From<&str> for AssetSource {
    /// `mem:` prefixed strings name in-memory entries; anything else is a path.
    fn from(s: &str) -> Self {
        match s.strip_prefix("mem:") {
            Some(name) => Self::Memory(name.to_string()),
            None => Self::File(PathBuf::from(s)),
        }
    }
}

impl From<PathBuf> for AssetSource {
    fn from(p: PathBuf) -> Self {
        Self::File(p)
    }
}

impl fmt::Display for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(p) => write!(f, "{}", p.display()),
            Self::Memory(name) => write!(f, "mem:{name}"),
        }
    }
}

/// The part an image plays in the scene.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AssetRole {
    Base,
    Depth,
    Grid,
}

impl fmt::Display for AssetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Base => "base",
            Self::Depth => "depth",
            Self::Grid => "grid",
        })
    }
}
