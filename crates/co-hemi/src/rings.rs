//! Concentric ring sampling of a binary fisheye image.

use co_core::{BorderMode, ImageView, Vec2d, sample_nearest_at};

use crate::circle::FisheyeCircle;
use crate::error::GeometryError;
use crate::profile::GapFractionProfile;

/// Number of zenith-angle rings, from the center (0) to the edge (88).
pub const RING_COUNT: usize = 89;
/// One sample per degree of azimuth.
pub const SAMPLES_PER_RING: usize = 360;
/// Ring `i` sits at `i / RING_DIVISOR` of the circle radius.
pub const RING_DIVISOR: f64 = 90.0;

/// Angle tables shared by every circle and image.
///
/// `directions[k]` is the unit vector at `k` degrees and `step_fractions[i]`
/// is the radius fraction `i / 90` of ring `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrigTable {
    directions: Vec<Vec2d>,
    step_fractions: [f64; RING_COUNT],
}

impl Default for TrigTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TrigTable {
    pub fn new() -> Self {
        let degree = core::f64::consts::PI / 180.0;
        let directions = (0..SAMPLES_PER_RING)
            .map(|k| Vec2d::from_angle(k as f64 * degree))
            .collect();

        let mut step_fractions = [0.0; RING_COUNT];
        for (i, frac) in step_fractions.iter_mut().enumerate() {
            *frac = i as f64 / RING_DIVISOR;
        }

        Self {
            directions,
            step_fractions,
        }
    }

    pub fn directions(&self) -> &[Vec2d] {
        &self.directions
    }

    pub fn step_fractions(&self) -> &[f64; RING_COUNT] {
        &self.step_fractions
    }
}

/// Rounded pixel coordinates of all `89 x 360` ring samples for one circle.
///
/// Building the grid is the only place trigonometry meets the circle, so a
/// batch of images taken with the same lens setup can reuse one grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RingGrid {
    circle: FisheyeCircle,
    coords: Vec<(isize, isize)>,
}

impl RingGrid {
    pub fn new(trig: &TrigTable, circle: &FisheyeCircle) -> Self {
        let center = circle.center();
        let mut coords = Vec::with_capacity(RING_COUNT * SAMPLES_PER_RING);
        for &frac in trig.step_fractions() {
            let ring_radius = frac * circle.radius;
            for &dir in trig.directions() {
                coords.push((center + dir * ring_radius).round_to_pixel());
            }
        }

        Self {
            circle: *circle,
            coords,
        }
    }

    pub fn circle(&self) -> &FisheyeCircle {
        &self.circle
    }

    /// Sample coordinates of `ring` in azimuth order.
    ///
    /// # Panics
    /// Panics if `ring >= RING_COUNT`.
    pub fn ring_coords(&self, ring: usize) -> &[(isize, isize)] {
        assert!(ring < RING_COUNT, "ring index out of range");
        let start = ring * SAMPLES_PER_RING;
        &self.coords[start..start + SAMPLES_PER_RING]
    }

    /// Reduces every ring of `img` to the fraction of its samples that are gap.
    ///
    /// Non-zero pixels are gap (sky). With [`BorderMode::Clamp`] each ring is
    /// divided by 360; with [`BorderMode::Skip`] it is divided by the number of
    /// samples that landed inside the image.
    pub fn sample(
        &self,
        img: &ImageView<'_, u8>,
        border: BorderMode,
    ) -> Result<GapFractionProfile, GeometryError> {
        self.circle.validate(img.width(), img.height())?;

        let mut fractions = [0.0; RING_COUNT];
        for (ring, coords) in self.coords.chunks_exact(SAMPLES_PER_RING).enumerate() {
            let mut gap = 0usize;
            let mut counted = 0usize;
            for &(x, y) in coords {
                if let Some(v) = sample_nearest_at(img, x, y, border) {
                    counted += 1;
                    if v != 0 {
                        gap += 1;
                    }
                }
            }

            if counted == 0 {
                return Err(GeometryError::RingOutsideImage { ring });
            }
            fractions[ring] = gap as f64 / counted as f64;
        }

        Ok(GapFractionProfile::from_array_unchecked(fractions))
    }
}

/// One-shot ring sampling; builds fresh tables for `circle`.
pub fn sample_rings(
    img: &ImageView<'_, u8>,
    circle: &FisheyeCircle,
    border: BorderMode,
) -> Result<GapFractionProfile, GeometryError> {
    RingGrid::new(&TrigTable::new(), circle).sample(img, border)
}

#[cfg(test)]
mod tests {
    use co_core::{BorderMode, Image};

    use super::{RING_COUNT, RingGrid, SAMPLES_PER_RING, TrigTable, sample_rings};
    use crate::circle::FisheyeCircle;
    use crate::error::GeometryError;

    #[test]
    fn trig_table_has_one_direction_per_degree() {
        let trig = TrigTable::new();
        assert_eq!(trig.directions().len(), SAMPLES_PER_RING);
        assert_eq!(trig.step_fractions()[0], 0.0);
        assert!((trig.step_fractions()[45] - 0.5).abs() < 1e-15);

        let quarter = trig.directions()[90];
        assert!(quarter.x.abs() < 1e-12);
        assert!((quarter.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ring_zero_collapses_onto_center_pixel() {
        let trig = TrigTable::new();
        let off_grid = RingGrid::new(&trig, &FisheyeCircle::new(10.4, 7.6, 9.0));
        assert!(off_grid.ring_coords(0).iter().all(|&c| c == (10, 8)));

        // With one pixel per ring step no other ring can round back onto the center.
        let grid = RingGrid::new(&trig, &FisheyeCircle::new(10.0, 8.0, 90.0));
        let mut img = Image::new_fill(20, 16, 0u8);
        *img.get_mut(10, 8).expect("in bounds") = 1;
        let profile = grid.sample(&img.as_view(), BorderMode::Clamp).expect("sampled");
        assert_eq!(profile.get(0), Some(1.0));
        assert!(profile.iter().skip(1).all(|v| v == 0.0));
    }

    #[test]
    fn ring_coordinates_follow_radius_fraction() {
        let circle = FisheyeCircle::new(200.0, 200.0, 180.0);
        let grid = RingGrid::new(&TrigTable::new(), &circle);

        // ring 45 sits at half the radius
        let ring = grid.ring_coords(45);
        assert_eq!(ring[0], (290, 200));
        assert_eq!(ring[90], (200, 290));
        assert_eq!(ring[180], (110, 200));
        assert_eq!(ring[270], (200, 110));
    }

    #[test]
    fn uniform_images_give_uniform_profiles() {
        let circle = FisheyeCircle::new(32.0, 32.0, 32.0);
        for (value, expected) in [(1u8, 1.0), (255u8, 1.0), (0u8, 0.0)] {
            let img = Image::new_fill(64, 64, value);
            let profile = sample_rings(&img.as_view(), &circle, BorderMode::Clamp).expect("ok");
            assert!(profile.iter().all(|v| v == expected));
        }
    }

    #[test]
    fn clamp_counts_edge_pixels_for_oversized_circle() {
        // Only the outermost columns are gap; an oversized circle clamps onto them.
        let img = Image::from_fn(21, 21, |x, _| u8::from(x == 0 || x == 20));
        let circle = FisheyeCircle::new(10.0, 10.0, 90.0);
        let profile = sample_rings(&img.as_view(), &circle, BorderMode::Clamp).expect("ok");

        assert_eq!(profile.get(0), Some(0.0));
        // ring 88 sits 88 px out, so every sample clamps onto the image border.
        let outer = profile.get(88).expect("ring 88");
        assert!(outer > 0.0 && outer < 1.0);
    }

    #[test]
    fn skip_renormalizes_over_in_image_samples() {
        let img = Image::new_fill(21, 21, 1u8);
        let circle = FisheyeCircle::new(10.0, 10.0, 14.0);
        let profile = sample_rings(&img.as_view(), &circle, BorderMode::Skip).expect("ok");
        assert_eq!(profile.as_slice(), &[1.0; RING_COUNT]);
    }

    #[test]
    fn skip_reports_rings_without_any_in_image_sample() {
        let img = Image::new_fill(5, 5, 1u8);
        let circle = FisheyeCircle::new(2.0, 2.0, 900.0);
        let err = sample_rings(&img.as_view(), &circle, BorderMode::Skip).unwrap_err();
        assert_eq!(err, GeometryError::RingOutsideImage { ring: 1 });
    }

    #[test]
    fn sampling_rejects_circle_outside_the_view() {
        let img = Image::new_fill(10, 10, 1u8);
        let circle = FisheyeCircle::new(30.0, 5.0, 4.0);
        assert!(matches!(
            sample_rings(&img.as_view(), &circle, BorderMode::Clamp),
            Err(GeometryError::CenterOutOfBounds { .. })
        ));
    }
}
