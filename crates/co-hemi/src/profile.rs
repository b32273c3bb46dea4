use crate::error::ProfileError;
use crate::rings::RING_COUNT;

/// Per-ring gap fractions, indexed by ring from the zenith (0) to the
/// field-of-view edge (88). Every value lies in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapFractionProfile {
    fractions: [f64; RING_COUNT],
}

impl GapFractionProfile {
    /// Validates and copies an externally produced profile.
    pub fn from_slice(values: &[f64]) -> Result<Self, ProfileError> {
        validate_profile(values)?;
        let mut fractions = [0.0; RING_COUNT];
        fractions.copy_from_slice(values);
        Ok(Self { fractions })
    }

    /// Caller guarantees every value is in `[0, 1]`.
    pub(crate) fn from_array_unchecked(fractions: [f64; RING_COUNT]) -> Self {
        debug_assert!(validate_profile(&fractions).is_ok());
        Self { fractions }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.fractions
    }

    pub fn get(&self, ring: usize) -> Option<f64> {
        self.fractions.get(ring).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.fractions.iter().copied()
    }
}

/// Rejects profiles with the wrong ring count or values outside `[0, 1]`.
/// NaN is reported as out of range.
pub fn validate_profile(values: &[f64]) -> Result<(), ProfileError> {
    if values.len() != RING_COUNT {
        return Err(ProfileError::WrongLength {
            expected: RING_COUNT,
            actual: values.len(),
        });
    }

    for (ring, &value) in values.iter().enumerate() {
        if !(0.0..=1.0).contains(&value) {
            return Err(ProfileError::OutOfRange { ring, value });
        }
    }

    Ok(())
}
