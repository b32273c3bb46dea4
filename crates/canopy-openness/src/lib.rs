//! Umbrella crate for the `canopy-openness` workspace.
//!
//! Re-exports the image primitives, the single-image openness pipeline and
//! the batch driver.

pub use co_batch::*;
pub use co_core::{BorderMode, Image, ImageView, Point2d, Vec2d, sample_nearest};
pub use co_hemi::*;

#[cfg(test)]
mod tests {
    use crate::{BorderMode, Image, OpennessConfig, estimate_openness};

    #[test]
    fn reexports_compose_into_a_pipeline() {
        let img = Image::new_fill(400, 400, 1u8);
        let cfg = OpennessConfig {
            border: BorderMode::Skip,
            ..OpennessConfig::default()
        };
        let r = estimate_openness(&img.as_view(), &cfg).expect("valid");
        assert!((r.openness - 1.0).abs() < 1e-12);
    }
}
