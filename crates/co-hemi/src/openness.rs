//! Solid-angle integration of a gap-fraction profile.
//!
//! Ring `i` spans zenith angles `[θᵢ - Δ, θᵢ + Δ]` with `θᵢ = i°` and
//! `Δ = 0.5°`. Under a Lambertian projection its share of the hemisphere is
//! proportional to `sin(θᵢ + Δ) - sin(θᵢ - Δ)`.

use crate::error::ProfileError;
use crate::profile::{GapFractionProfile, validate_profile};
use crate::rings::RING_COUNT;

const DEGREE: f64 = core::f64::consts::PI / 180.0;
const HALF_STEP: f64 = 0.5 * DEGREE;

/// Which rings make up the normalizing area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// `sin(θ₈₈ + Δ) - sin(θ₀ - Δ)`: the sum of all 89 ring weights, so a
    /// fully open profile scores exactly 1.
    #[default]
    FullHemisphere,
    /// `sin(θ₈₈ + Δ) - sin(θ₁ - Δ)`: ring 0 is left out of the denominator
    /// but still counted in the numerator. Scores reach about 1.018 for a
    /// fully open profile. This is the normalization used by the CanOpen
    /// tool, so it reproduces published CanOpen values exactly.
    ExcludeZenith,
}

impl Normalization {
    fn first_ring(self) -> usize {
        match self {
            Self::FullHemisphere => 0,
            Self::ExcludeZenith => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingWeights {
    weights: [f64; RING_COUNT],
    total_area: f64,
    normalization: Normalization,
}

impl Default for RingWeights {
    fn default() -> Self {
        Self::new(Normalization::default())
    }
}

impl RingWeights {
    pub fn new(normalization: Normalization) -> Self {
        let mut weights = [0.0; RING_COUNT];
        for (i, w) in weights.iter_mut().enumerate() {
            let theta = i as f64 * DEGREE;
            *w = (theta + HALF_STEP).sin() - (theta - HALF_STEP).sin();
        }

        let last = (RING_COUNT - 1) as f64 * DEGREE;
        let first = normalization.first_ring() as f64 * DEGREE;
        let total_area = (last + HALF_STEP).sin() - (first - HALF_STEP).sin();

        Self {
            weights,
            total_area,
            normalization,
        }
    }

    pub fn weights(&self) -> &[f64; RING_COUNT] {
        &self.weights
    }

    pub fn total_area(&self) -> f64 {
        self.total_area
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Validates `profile` and integrates it into a single openness value.
    pub fn aggregate(&self, profile: &[f64]) -> Result<f64, ProfileError> {
        validate_profile(profile)?;
        Ok(self.integrate(profile))
    }

    /// Integrates an already validated profile.
    pub fn aggregate_profile(&self, profile: &GapFractionProfile) -> f64 {
        self.integrate(profile.as_slice())
    }

    fn integrate(&self, profile: &[f64]) -> f64 {
        let sum: f64 = profile
            .iter()
            .zip(self.weights.iter())
            .map(|(gap, w)| gap * w / self.total_area)
            .sum();

        match self.normalization {
            // The closed-form total differs from the summed weights only by rounding.
            Normalization::FullHemisphere => sum.clamp(0.0, 1.0),
            Normalization::ExcludeZenith => sum,
        }
    }
}

/// Canopy openness of `profile` with the default hemispherical weights.
pub fn aggregate(profile: &[f64]) -> Result<f64, ProfileError> {
    RingWeights::default().aggregate(profile)
}
