use co_core::{BorderMode, ImageView};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::circle::{CircleConfig, FisheyeCircle, locate_circle};
use crate::error::Error;
use crate::openness::{Normalization, RingWeights};
use crate::profile::GapFractionProfile;
use crate::rings::{RingGrid, TrigTable};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OpennessConfig {
    pub circle: CircleConfig,
    pub border: BorderMode,
    pub normalization: Normalization,
}

/// Everything computed for one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpennessResult {
    pub circle: FisheyeCircle,
    pub profile: GapFractionProfile,
    pub openness: f64,
}

/// Runs locate, sample and aggregate on a binary image (non-zero = sky).
pub fn estimate_openness(
    img: &ImageView<'_, u8>,
    cfg: &OpennessConfig,
) -> Result<OpennessResult, Error> {
    let weights = RingWeights::new(cfg.normalization);
    estimate_openness_with(img, cfg, &TrigTable::new(), &weights)
}

/// Same as [`estimate_openness`], reusing caller-owned read-only tables.
///
/// `weights` takes precedence over `cfg.normalization`.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip(img, cfg, trig, weights),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn estimate_openness_with(
    img: &ImageView<'_, u8>,
    cfg: &OpennessConfig,
    trig: &TrigTable,
    weights: &RingWeights,
) -> Result<OpennessResult, Error> {
    let circle = locate_circle(img.width(), img.height(), &cfg.circle)?;
    let profile = RingGrid::new(trig, &circle).sample(img, cfg.border)?;
    let openness = weights.aggregate_profile(&profile);

    Ok(OpennessResult {
        circle,
        profile,
        openness,
    })
}

/// Reusable estimator that keeps the last ring grid.
///
/// Consecutive images whose located circle is unchanged skip rebuilding the
/// `89 x 360` sample coordinates. Results match [`estimate_openness`]
/// bit for bit.
#[derive(Debug, Clone, Default)]
pub struct OpennessEstimator {
    trig: TrigTable,
    weights: RingWeights,
    grid: Option<RingGrid>,
}

impl OpennessEstimator {
    pub fn new(normalization: Normalization) -> Self {
        Self {
            trig: TrigTable::new(),
            weights: RingWeights::new(normalization),
            grid: None,
        }
    }

    pub fn set_normalization(&mut self, normalization: Normalization) {
        if self.weights.normalization() != normalization {
            self.weights = RingWeights::new(normalization);
        }
    }

    pub fn weights(&self) -> &RingWeights {
        &self.weights
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip(self, img, cfg),
            fields(width = img.width(), height = img.height())
        )
    )]
    pub fn estimate(
        &mut self,
        img: &ImageView<'_, u8>,
        cfg: &OpennessConfig,
    ) -> Result<OpennessResult, Error> {
        self.set_normalization(cfg.normalization);
        let circle = locate_circle(img.width(), img.height(), &cfg.circle)?;
        self.estimate_with_circle(img, &circle, cfg.border)
    }

    /// Skips circle location and uses `circle` as given.
    pub fn estimate_with_circle(
        &mut self,
        img: &ImageView<'_, u8>,
        circle: &FisheyeCircle,
        border: BorderMode,
    ) -> Result<OpennessResult, Error> {
        let grid = match self.grid.take() {
            Some(grid) if grid.circle() == circle => grid,
            _ => RingGrid::new(&self.trig, circle),
        };

        let sampled = grid.sample(img, border);
        self.grid = Some(grid);
        let profile = sampled?;
        let openness = self.weights.aggregate_profile(&profile);

        Ok(OpennessResult {
            circle: *circle,
            profile,
            openness,
        })
    }
}

#[cfg(test)]
mod tests {
    use co_core::{BorderMode, Image};

    use super::{OpennessConfig, OpennessEstimator, estimate_openness};
    use crate::circle::{CircleConfig, FisheyeCircle};
    use crate::error::{Error, GeometryError};
    use crate::openness::Normalization;

    fn half_open(size: usize) -> Image<u8> {
        Image::from_fn(size, size, |x, _| u8::from(x >= size / 2))
    }

    #[test]
    fn estimator_matches_one_shot_pipeline() {
        let img = half_open(200);
        let cfg = OpennessConfig::default();
        let one_shot = estimate_openness(&img.as_view(), &cfg).expect("valid");

        let mut est = OpennessEstimator::default();
        let first = est.estimate(&img.as_view(), &cfg).expect("valid");
        let second = est.estimate(&img.as_view(), &cfg).expect("valid");

        assert_eq!(first, one_shot);
        assert_eq!(second, one_shot);
        assert_eq!(first.openness.to_bits(), one_shot.openness.to_bits());
    }

    #[test]
    fn estimator_rebuilds_grid_when_circle_changes() {
        let img = half_open(100);
        let mut est = OpennessEstimator::default();

        let wide = est
            .estimate_with_circle(
                &img.as_view(),
                &FisheyeCircle::new(50.0, 50.0, 50.0),
                BorderMode::Clamp,
            )
            .expect("valid");
        // A circle centered deep inside the open half sees only sky.
        let shifted = est
            .estimate_with_circle(
                &img.as_view(),
                &FisheyeCircle::new(80.0, 50.0, 10.0),
                BorderMode::Clamp,
            )
            .expect("valid");

        assert!(wide.openness < 0.6);
        assert!((shifted.openness - 1.0).abs() < 1e-12);
    }

    #[test]
    fn estimator_follows_config_normalization() {
        let img = Image::new_fill(64, 64, 1u8);
        let mut est = OpennessEstimator::default();
        let cfg = OpennessConfig {
            normalization: Normalization::ExcludeZenith,
            ..OpennessConfig::default()
        };

        let r = est.estimate(&img.as_view(), &cfg).expect("valid");
        assert!(r.openness > 1.0);
        assert_eq!(est.weights().normalization(), Normalization::ExcludeZenith);
    }

    #[test]
    fn geometry_failures_surface_as_errors() {
        let img = Image::new_fill(10, 10, 1u8);
        let cfg = OpennessConfig {
            circle: CircleConfig::new().with_margin(20.0),
            ..OpennessConfig::default()
        };
        assert!(matches!(
            estimate_openness(&img.as_view(), &cfg),
            Err(Error::Geometry(GeometryError::NonPositiveRadius { .. }))
        ));

        let mut est = OpennessEstimator::default();
        let err = est
            .estimate_with_circle(
                &img.as_view(),
                &FisheyeCircle::new(5.0, 5.0, 0.0),
                BorderMode::Clamp,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Geometry(GeometryError::NonPositiveRadius { .. })
        ));
    }
}
