//! Intensity histogram and probability distribution over 256 levels.

use serde::{Deserialize, Serialize};

use crate::error::AgcwdError;
use crate::image::ValueChannel;
use crate::parallel;

/// Number of 8-bit intensity levels.
pub const LEVELS: usize = 256;

/// Raw occurrence counts per intensity level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    /// Count per level `0..=255`.
    pub bins: [u64; LEVELS],
    /// Number of samples counted.
    pub total: u64,
}

impl Histogram {
    /// Count intensities, splitting into partial histograms above `threshold` samples.
    ///
    /// Each rayon task fills its own bucket array; the arrays are summed
    /// elementwise at the end.
    pub fn from_samples(samples: &[u8], threshold: usize) -> Self {
        let bins = parallel::fold_reduce(
            samples,
            threshold,
            || [0u64; LEVELS],
            |mut acc, chunk| {
                for &v in chunk {
                    acc[v as usize] += 1;
                }
                acc
            },
            |mut a, b| {
                for (dst, src) in a.iter_mut().zip(b) {
                    *dst += src;
                }
                a
            },
        );
        Self {
            bins,
            total: samples.len() as u64,
        }
    }

    /// Largest bin count.
    pub fn peak(&self) -> u64 {
        self.bins.iter().copied().max().unwrap_or(0)
    }

    /// Normalize counts by the sample total.
    pub fn pdf(&self) -> Result<Pdf, AgcwdError> {
        if self.total == 0 {
            return Err(AgcwdError::EmptyImage);
        }
        let total = self.total as f64;
        let mut pdf = [0.0_f64; LEVELS];
        for (p, &count) in pdf.iter_mut().zip(&self.bins) {
            *p = count as f64 / total;
        }
        Ok(Pdf(pdf))
    }
}

/// Normalized histogram. Entries are non-negative and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pdf(#[serde(with = "levels")] pub [f64; LEVELS]);

impl Pdf {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(f64::MIN, f64::max)
    }

    pub fn min(&self) -> f64 {
        self.0.iter().copied().fold(f64::MAX, f64::min)
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

/// Probability distribution of a value channel.
///
/// Fails with [`AgcwdError::EmptyImage`] when the channel has no pixels.
pub fn histogram(channel: &ValueChannel, threshold: usize) -> Result<Pdf, AgcwdError> {
    if channel.pixel_count() == 0 {
        return Err(AgcwdError::EmptyImage);
    }
    Histogram::from_samples(channel.data(), threshold).pdf()
}

/// Serde adapter for fixed 256-entry arrays, which serde cannot derive directly.
pub(crate) mod levels {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::LEVELS;

    pub fn serialize<S, T>(values: &[T; LEVELS], s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: serde::Serialize,
    {
        s.collect_seq(values.iter())
    }

    pub fn deserialize<'de, D, T>(d: D) -> Result<[T; LEVELS], D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        let values = Vec::<T>::deserialize(d)?;
        let len = values.len();
        values
            .try_into()
            .map_err(|_| D::Error::invalid_length(len, &"256 intensity levels"))
    }
}
