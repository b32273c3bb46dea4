//! Foundational image primitives for hemispherical canopy analysis.
//!
//! ## Image Views and Stride
//! Images use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! This allows borrowed views over padded buffers and subviews.
//!
//! ## Border Modes
//! Sampling outside the image either clamps to the nearest edge pixel or
//! skips the sample entirely. Callers that aggregate samples must account for
//! skipped samples in their denominators.
//!
//! ## Sampling Coordinates
//! Sampling uses pixel-center coordinates where integer coordinates refer to
//! pixel centers. Nearest-neighbor uses round-to-nearest integer indices
//! (halfway cases round away from zero).

mod border;
mod error;
mod geom;
mod image;
mod sample;

pub use border::{BorderMode, map_index};
pub use error::Error;
pub use geom::{Point2d, Vec2d};
pub use image::{Image, ImageView};
pub use sample::{sample_nearest, sample_nearest_at};
