//! Canopy openness from binary hemispherical photographs.
//!
//! The pipeline has three pure stages:
//! - [`locate_circle`] derives the fisheye field of view from the image size,
//!   honoring manual overrides.
//! - [`RingGrid`] samples 89 concentric rings at one-degree azimuth steps and
//!   reduces each ring to a gap fraction.
//! - [`RingWeights`] integrates the 89 gap fractions with per-ring solid-angle
//!   weights into one openness value.
//!
//! Polarity: pixels are `u8`; any non-zero value is gap (sky) and zero is
//! obstruction (canopy). Profiles and openness therefore measure open sky.
//!
//! Out-of-image ring samples follow [`co_core::BorderMode`]: `Clamp` reads the
//! nearest edge pixel, `Skip` drops the sample and renormalizes the ring.
//!
//! Tables ([`TrigTable`], [`RingWeights`]) are immutable after construction
//! and can be shared across threads.

mod circle;
mod error;
mod openness;
mod pipeline;
mod profile;
mod rings;

pub use circle::{CircleConfig, DEFAULT_MARGIN_PX, FisheyeCircle, locate_circle};
pub use error::{Error, GeometryError, ProfileError};
pub use openness::{Normalization, RingWeights, aggregate};
pub use pipeline::{
    OpennessConfig, OpennessEstimator, OpennessResult, estimate_openness, estimate_openness_with,
};
pub use profile::{GapFractionProfile, validate_profile};
pub use rings::{RING_COUNT, RING_DIVISOR, RingGrid, SAMPLES_PER_RING, TrigTable, sample_rings};
