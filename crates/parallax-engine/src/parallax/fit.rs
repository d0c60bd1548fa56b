use thiserror::Error;

/// Full extent of normalized device space along one axis.
pub const FULL_EXTENT: f32 = 2.0;

/// Plane size in normalized device units.
///
/// One side is always [`FULL_EXTENT`]; the other is at most that, so the plane
/// fits the view without stretching the image.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaneDimensions {
    pub width: f32,
    pub height: f32,
}

impl PlaneDimensions {
    /// Plane covering the whole view.
    pub const FULL: Self = Self {
        width: FULL_EXTENT,
        height: FULL_EXTENT,
    };
}

/// Aspect input that would produce NaN or infinite plane sizes.
#[derive(Debug, Copy, Clone, PartialEq, Error)]
#[error("degenerate {what}: {value}")]
pub struct DegenerateAspectError {
    pub what: &'static str,
    pub value: f32,
}

fn check(what: &'static str, value: f32) -> Result<f32, DegenerateAspectError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DegenerateAspectError { what, value })
    }
}

/// Width over height, rejecting zero, negative and non-finite sizes.
pub fn aspect_ratio(width: f32, height: f32) -> Result<f32, DegenerateAspectError> {
    let w = check("width", width)?;
    let h = check("height", height)?;
    check("aspect ratio", w / h)
}

/// Sizes the plane for an image of `image_aspect` on a screen of
/// `screen_aspect`.
///
/// A screen wider than the image keeps full height and narrows the width;
/// otherwise full width is kept and the height shrinks.
pub fn fit_plane(
    screen_aspect: f32,
    image_aspect: f32,
) -> Result<PlaneDimensions, DegenerateAspectError> {
    let screen = check("screen aspect", screen_aspect)?;
    let image = check("image aspect", image_aspect)?;

    let dims = if screen > image {
        PlaneDimensions {
            width: FULL_EXTENT * image / screen,
            height: FULL_EXTENT,
        }
    } else {
        PlaneDimensions {
            width: FULL_EXTENT,
            height: FULL_EXTENT * screen / image,
        }
    };

    log::debug!(
        "plane fitted: {:.4}x{:.4} (screen {screen:.4}, image {image:.4})",
        dims.width,
        dims.height
    );
    Ok(dims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    // Both sides are full only when the aspects match.
    fn one_side_full(d: PlaneDimensions) -> bool {
        d.width == FULL_EXTENT || d.height == FULL_EXTENT
    }

    // ── scenarios ─────────────────────────────────────────────────────────

    #[test]
    fn wide_screen_narrow_image_keeps_height() {
        let d = fit_plane(1.777, 1.5).unwrap();
        assert_eq!(d.height, 2.0);
        assert!((d.width - 2.0 * 1.5 / 1.777).abs() < EPS);
        assert!((d.width - 1.688).abs() < 1e-3);
    }

    #[test]
    fn panorama_keeps_width() {
        // 3000x500 photo on a 16:9 screen
        let d = fit_plane(16.0 / 9.0, 6.0).unwrap();
        assert_eq!(d.width, 2.0);
        assert!((d.height - 2.0 * (16.0 / 9.0) / 6.0).abs() < EPS);
    }

    #[test]
    fn equal_aspects_fill_the_view() {
        assert_eq!(fit_plane(1.5, 1.5).unwrap(), PlaneDimensions::FULL);
    }

    // ── invariants ────────────────────────────────────────────────────────

    #[test]
    fn one_side_is_full_and_aspect_is_preserved() {
        let aspects = [0.2, 0.5, 0.75, 1.0, 1.333, 1.777, 2.4, 6.0];
        for &screen in &aspects {
            for &image in &aspects {
                let d = fit_plane(screen, image).unwrap();
                assert!(one_side_full(d), "{screen} / {image}: {d:?}");
                assert!(d.width <= FULL_EXTENT && d.height <= FULL_EXTENT);

                // In screen space (NDC scaled by the screen aspect) the plane
                // has the image's aspect.
                let on_screen = (d.width * screen) / d.height;
                assert!((on_screen - image).abs() < 1e-3 * image, "{screen} / {image}");
            }
        }
    }

    // ── degenerate input ──────────────────────────────────────────────────

    #[test]
    fn rejects_degenerate_aspects() {
        assert!(fit_plane(0.0, 1.0).is_err());
        assert!(fit_plane(1.0, -2.0).is_err());
        assert!(fit_plane(f32::NAN, 1.0).is_err());
        assert!(fit_plane(1.0, f32::INFINITY).is_err());
    }

    #[test]
    fn aspect_ratio_rejects_zero_sizes() {
        let err = aspect_ratio(1920.0, 0.0).unwrap_err();
        assert_eq!(err.what, "height");
        assert!(aspect_ratio(0.0, 1080.0).is_err());
        assert!((aspect_ratio(3000.0, 500.0).unwrap() - 6.0).abs() < EPS);
    }
}
