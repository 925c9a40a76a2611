//! Sample weights and average bag weight.
//!
//! Each category is weighed by sampling up to five bags. Unset slots are
//! zero and do not count toward the average.

use serde::{Deserialize, Serialize};

use coldstore_core::{DomainError, DomainResult};

/// Number of sample slots per category.
pub const SAMPLE_SLOTS: usize = 5;

/// Mean of the strictly-positive values, or zero if there are none.
pub fn average_positive(weights: &[f64]) -> f64 {
    let (sum, count) = weights
        .iter()
        .filter(|w| **w > 0.0)
        .fold((0.0, 0u32), |(sum, count), w| (sum + w, count + 1));
    if count == 0 { 0.0 } else { sum / f64::from(count) }
}

/// Up to [`SAMPLE_SLOTS`] sampled bag weights, padded with zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleWeights([f64; SAMPLE_SLOTS]);

impl SampleWeights {
    /// Validate raw samples: at most five, each finite and non-negative.
    pub fn new(samples: &[f64]) -> DomainResult<Self> {
        if samples.len() > SAMPLE_SLOTS {
            return Err(DomainError::validation(format!(
                "at most {SAMPLE_SLOTS} sample weights allowed (got {})",
                samples.len()
            )));
        }
        let mut slots = [0.0; SAMPLE_SLOTS];
        for (slot, &w) in slots.iter_mut().zip(samples) {
            if !w.is_finite() || w < 0.0 {
                return Err(DomainError::validation(format!(
                    "sample weight must be a non-negative number (got {w})"
                )));
            }
            *slot = w;
        }
        Ok(Self(slots))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Samples actually taken (positive slots).
    pub fn taken(&self) -> usize {
        self.0.iter().filter(|w| **w > 0.0).count()
    }

    pub fn average(&self) -> f64 {
        average_positive(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn average_ignores_unset_slots() {
        let w = SampleWeights::new(&[40.0, 42.0, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(w.average(), 41.0);
        assert_eq!(w.taken(), 2);
    }

    #[test]
    fn all_zero_average_is_zero() {
        assert_eq!(average_positive(&[0.0; 5]), 0.0);
        assert_eq!(SampleWeights::empty().average(), 0.0);
        assert_eq!(average_positive(&[]), 0.0);
    }

    #[test]
    fn short_input_is_padded() {
        let w = SampleWeights::new(&[50.0]).unwrap();
        assert_eq!(w.as_slice(), &[50.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn rejects_more_than_five_samples() {
        let err = SampleWeights::new(&[1.0; 6]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn rejects_negative_and_non_finite_samples() {
        assert!(SampleWeights::new(&[40.0, -1.0]).is_err());
        assert!(SampleWeights::new(&[f64::NAN]).is_err());
        assert!(SampleWeights::new(&[f64::INFINITY]).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 500,
            ..ProptestConfig::default()
        })]

        /// Property: non-positive values never influence the average.
        #[test]
        fn average_excludes_non_positive(
            positives in prop::collection::vec(0.5f64..100.0, 0..5),
            noise in prop::collection::vec(-100.0f64..=0.0, 0..5),
        ) {
            let mut mixed = positives.clone();
            mixed.extend(noise);
            let got = average_positive(&mixed);
            let expected = average_positive(&positives);
            prop_assert!((got - expected).abs() < 1e-9);
        }

        /// Property: the average of positive samples lies within their range.
        #[test]
        fn average_is_bounded_by_samples(samples in prop::collection::vec(0.5f64..100.0, 1..=5)) {
            let w = SampleWeights::new(&samples).unwrap();
            let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(w.average() >= min - 1e-9);
            prop_assert!(w.average() <= max + 1e-9);
        }
    }
}
