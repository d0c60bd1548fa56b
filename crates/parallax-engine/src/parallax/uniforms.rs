use std::fmt;

use thiserror::Error;

use crate::assets::{SceneAssets, Texture};
use crate::coords::Vec2;

/// Names of the values the composite program reads.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UniformName {
    BaseTexture,
    GridTexture,
    DepthTexture,
    TextureAspect,
    GridScale,
    Mouse,
}

impl UniformName {
    pub const ALL: [UniformName; 6] = [
        Self::BaseTexture,
        Self::GridTexture,
        Self::DepthTexture,
        Self::TextureAspect,
        Self::GridScale,
        Self::Mouse,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BaseTexture => "baseTexture",
            Self::GridTexture => "gridTexture",
            Self::DepthTexture => "depthTexture",
            Self::TextureAspect => "textureAspect",
            Self::GridScale => "gridScale",
            Self::Mouse => "mouse",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.as_str() == name)
    }
}

impl fmt::Display for UniformName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2(Vec2),
    Texture(Texture),
}

impl UniformValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Vec2(_) => "vec2",
            Self::Texture(_) => "texture",
        }
    }
}

/// Rejected uniform update.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UniformBindingError {
    #[error("no uniform named `{0}`")]
    Unknown(String),

    #[error("uniform `{name}` expects a {expected}, got a {got}")]
    TypeMismatch {
        name: UniformName,
        expected: &'static str,
        got: &'static str,
    },

    #[error("uniform `{0}` is fixed once the scene is built")]
    Fixed(UniformName),

    #[error("uniform `{0}` is not bound in this scene")]
    Unbound(UniformName),

    #[error("uniform `{name}` must be finite and positive, got {value}")]
    InvalidValue { name: UniformName, value: f32 },
}

/// Grid scales the composite program can divide by.
pub(crate) fn valid_grid_scale(scale: f32) -> bool {
    scale.is_finite() && scale > 0.0
}

/// Values consumed by the composite program each frame.
///
/// Built from resolved assets, so the textures are always present.
/// `texture_aspect` and the textures are fixed at construction; `mouse` and
/// `grid_scale` are updated in place.
#[derive(Debug, Clone)]
pub struct Uniforms {
    base: Texture,
    grid: Texture,
    depth: Option<Texture>,
    texture_aspect: f32,
    grid_scale: f32,
    mouse: Vec2,
}

impl Uniforms {
    /// `texture_aspect` must already be validated (see `fit::aspect_ratio`).
    pub(crate) fn new(assets: SceneAssets, texture_aspect: f32, grid_scale: f32) -> Self {
        Self {
            base: assets.base,
            grid: assets.grid,
            depth: assets.depth,
            texture_aspect,
            grid_scale,
            mouse: Vec2::zero(),
        }
    }

    pub fn base_texture(&self) -> &Texture {
        &self.base
    }

    pub fn grid_texture(&self) -> &Texture {
        &self.grid
    }

    pub fn depth_texture(&self) -> Option<&Texture> {
        self.depth.as_ref()
    }

    pub fn texture_aspect(&self) -> f32 {
        self.texture_aspect
    }

    pub fn grid_scale(&self) -> f32 {
        self.grid_scale
    }

    pub fn mouse(&self) -> Vec2 {
        self.mouse
    }

    /// Replaces the pointer UV. Never accumulates.
    pub fn set_mouse(&mut self, uv: Vec2) {
        self.mouse = uv;
    }

    /// Rejects zero, negative and non-finite scales, keeping the old value.
    pub fn set_grid_scale(&mut self, scale: f32) -> Result<(), UniformBindingError> {
        if !valid_grid_scale(scale) {
            return Err(UniformBindingError::InvalidValue {
                name: UniformName::GridScale,
                value: scale,
            });
        }
        self.grid_scale = scale;
        Ok(())
    }

    pub fn get(&self, name: UniformName) -> Option<UniformValue> {
        Some(match name {
            UniformName::BaseTexture => UniformValue::Texture(self.base.clone()),
            UniformName::GridTexture => UniformValue::Texture(self.grid.clone()),
            UniformName::DepthTexture => UniformValue::Texture(self.depth.clone()?),
            UniformName::TextureAspect => UniformValue::Float(self.texture_aspect),
            UniformName::GridScale => UniformValue::Float(self.grid_scale),
            UniformName::Mouse => UniformValue::Vec2(self.mouse),
        })
    }

    /// Name-keyed update, for hosts that drive the program by uniform name.
    pub fn set(&mut self, name: &str, value: UniformValue) -> Result<(), UniformBindingError> {
        let name = UniformName::parse(name)
            .ok_or_else(|| UniformBindingError::Unknown(name.to_string()))?;

        match (name, value) {
            (UniformName::Mouse, UniformValue::Vec2(v)) => self.set_mouse(v),
            (UniformName::GridScale, UniformValue::Float(s)) => self.set_grid_scale(s)?,
            (UniformName::DepthTexture, _) if self.depth.is_none() => {
                return Err(UniformBindingError::Unbound(name));
            }
            (
                UniformName::BaseTexture
                | UniformName::GridTexture
                | UniformName::DepthTexture
                | UniformName::TextureAspect,
                _,
            ) => return Err(UniformBindingError::Fixed(name)),
            (name, value) => {
                return Err(UniformBindingError::TypeMismatch {
                    name,
                    expected: if name == UniformName::Mouse { "vec2" } else { "float" },
                    got: value.kind(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniforms(depth: bool) -> Uniforms {
        let assets = SceneAssets {
            base: Texture::filled(6, 1, [255, 0, 0, 255]),
            depth: depth.then(|| Texture::filled(6, 1, [0, 0, 0, 255])),
            grid: Texture::filled(2, 2, [0, 255, 0, 255]),
        };
        Uniforms::new(assets, 6.0, 10.0)
    }

    #[test]
    fn mouse_is_replaced_not_accumulated() {
        let mut u = uniforms(false);
        u.set_mouse(Vec2::new(0.25, 0.5));
        u.set_mouse(Vec2::new(0.1, 0.1));
        assert_eq!(u.mouse(), Vec2::new(0.1, 0.1));
    }

    #[test]
    fn set_by_name() {
        let mut u = uniforms(false);
        u.set("mouse", UniformValue::Vec2(Vec2::new(0.3, 0.7))).unwrap();
        u.set("gridScale", UniformValue::Float(4.0)).unwrap();
        assert_eq!(u.get(UniformName::Mouse), Some(UniformValue::Vec2(Vec2::new(0.3, 0.7))));
        assert_eq!(u.grid_scale(), 4.0);
    }

    #[test]
    fn grid_scale_must_stay_positive() {
        let mut u = uniforms(false);
        for s in [0.0, -2.5, f32::NAN, f32::INFINITY] {
            let err = u.set_grid_scale(s).unwrap_err();
            assert!(matches!(
                err,
                UniformBindingError::InvalidValue { name: UniformName::GridScale, .. }
            ));
        }
        assert_eq!(u.grid_scale(), 10.0);

        u.set_grid_scale(0.5).unwrap();
        assert_eq!(u.grid_scale(), 0.5);
    }

    #[test]
    fn texture_aspect_is_fixed() {
        let mut u = uniforms(false);
        let err = u.set("textureAspect", UniformValue::Float(1.0)).unwrap_err();
        assert_eq!(err, UniformBindingError::Fixed(UniformName::TextureAspect));
        assert_eq!(u.texture_aspect(), 6.0);
    }

    #[test]
    fn depth_texture_unbound_without_depth_map() {
        let mut u = uniforms(false);
        assert!(u.get(UniformName::DepthTexture).is_none());
        let err = u
            .set("depthTexture", UniformValue::Texture(Texture::filled(1, 1, [0; 4])))
            .unwrap_err();
        assert_eq!(err, UniformBindingError::Unbound(UniformName::DepthTexture));

        let u = uniforms(true);
        assert!(u.get(UniformName::DepthTexture).is_some());
    }

    #[test]
    fn rejects_unknown_and_mistyped() {
        let mut u = uniforms(false);
        assert!(matches!(
            u.set("u_mouse", UniformValue::Float(0.0)),
            Err(UniformBindingError::Unknown(n)) if n == "u_mouse"
        ));
        assert!(matches!(
            u.set("mouse", UniformValue::Float(0.0)),
            Err(UniformBindingError::TypeMismatch { expected: "vec2", got: "float", .. })
        ));
        assert!(matches!(
            u.set("gridScale", UniformValue::Vec2(Vec2::zero())),
            Err(UniformBindingError::TypeMismatch { expected: "float", got: "vec2", .. })
        ));
    }
}
