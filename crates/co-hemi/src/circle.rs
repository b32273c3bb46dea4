use co_core::Point2d;

use crate::error::GeometryError;

/// Edge margin subtracted from the default radius.
pub const DEFAULT_MARGIN_PX: f64 = 0.0;

/// Circular field of view of a fisheye lens, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FisheyeCircle {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl FisheyeCircle {
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self {
            center_x,
            center_y,
            radius,
        }
    }

    pub fn center(&self) -> Point2d {
        Point2d {
            x: self.center_x,
            y: self.center_y,
        }
    }

    /// Checks the circle against a `width x height` image.
    ///
    /// The center is in bounds when its nearest pixel exists, which is what
    /// ring 0 samples.
    pub fn validate(&self, width: usize, height: usize) -> Result<(), GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::EmptyImage { width, height });
        }

        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius {
                radius: self.radius,
            });
        }

        let (xi, yi) = self.center().round_to_pixel();
        let inside = self.center_x.is_finite()
            && self.center_y.is_finite()
            && xi >= 0
            && yi >= 0
            && (xi as usize) < width
            && (yi as usize) < height;

        if !inside {
            return Err(GeometryError::CenterOutOfBounds {
                center_x: self.center_x,
                center_y: self.center_y,
                width,
                height,
            });
        }

        Ok(())
    }
}

/// How the fisheye circle is derived from the image size.
///
/// Overrides replace the computed value only when they are `Some` and
/// non-zero; each one is applied independently of the others.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleConfig {
    /// Pixels trimmed from the default radius to stay clear of lens vignetting.
    pub margin_px: f64,
    pub center_x: Option<f64>,
    pub center_y: Option<f64>,
    pub radius: Option<f64>,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            margin_px: DEFAULT_MARGIN_PX,
            center_x: None,
            center_y: None,
            radius: None,
        }
    }
}

impl CircleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_margin(mut self, margin_px: f64) -> Self {
        self.margin_px = margin_px;
        self
    }

    pub fn with_center(mut self, center_x: f64, center_y: f64) -> Self {
        self.center_x = Some(center_x);
        self.center_y = Some(center_y);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }
}

/// Derives the fisheye circle for a `width x height` image.
///
/// Defaults: center `(width / 2, height / 2)`, radius `height / 2 - margin`.
pub fn locate_circle(
    width: usize,
    height: usize,
    cfg: &CircleConfig,
) -> Result<FisheyeCircle, GeometryError> {
    let circle = FisheyeCircle {
        center_x: pick_override(cfg.center_x, width as f64 / 2.0),
        center_y: pick_override(cfg.center_y, height as f64 / 2.0),
        radius: pick_override(cfg.radius, height as f64 / 2.0 - cfg.margin_px),
    };
    circle.validate(width, height)?;
    Ok(circle)
}

fn pick_override(value: Option<f64>, computed: f64) -> f64 {
    match value {
        Some(v) if v != 0.0 => v,
        _ => computed,
    }
}
