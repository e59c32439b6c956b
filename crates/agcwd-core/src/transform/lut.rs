//! Cumulative distribution and the adaptive gamma lookup table.
//!
//! Every intensity level gets its own gamma exponent from the weighted mass
//! lying at or below it:
//!
//! ```text
//! cdf(l)  = Σ_{k ≤ l} pdf_w(k) / Σ pdf_w
//! lut(l)  = round(255 × (l / 255)^(1 − cdf(l)))
//! ```
//!
//! Since `l / 255 < 1` and the exponent shrinks as `l` grows, the table is
//! non-decreasing for any CDF. `lut(0) = 0` and `lut(255) = 255` always.

use serde::{Deserialize, Serialize};

use crate::analysis::histogram::{LEVELS, levels};
use crate::analysis::weighting::WeightedPdf;

const MAX_LEVEL: f64 = (LEVELS - 1) as f64;

/// Normalized cumulative distribution, non-decreasing in `[0, 1]` with `cdf[255] == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cdf(#[serde(with = "levels")] pub [f64; LEVELS]);

impl Cdf {
    /// Running sum of `weighted`, divided by its total.
    pub fn from_weighted(weighted: &WeightedPdf) -> Self {
        let mut cdf = [0.0_f64; LEVELS];
        let mut running = 0.0_f64;
        for (dst, &p) in cdf.iter_mut().zip(&weighted.0) {
            running += p;
            *dst = running;
        }

        // The last running value is the total, so the final entry divides to exactly 1.
        let total = running;
        if total > 0.0 {
            for v in &mut cdf {
                *v = (*v / total).min(1.0);
            }
        } else {
            // No weighted mass at all: treat every level as fully accumulated.
            cdf = [1.0; LEVELS];
        }
        Self(cdf)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Gamma exponent for `level`.
    pub fn gamma(&self, level: u8) -> f64 {
        1.0 - self.0[level as usize]
    }
}

/// 256-entry intensity mapping. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GammaLut(#[serde(with = "levels")] [u8; LEVELS]);

impl GammaLut {
    /// Derive the gamma table from a cumulative distribution.
    pub fn from_cdf(cdf: &Cdf) -> Self {
        let mut table = [0u8; LEVELS];
        // Level 0 stays 0; skipping it avoids evaluating 0^0.
        for (level, dst) in table.iter_mut().enumerate().skip(1) {
            let x = level as f64 / MAX_LEVEL;
            let out = MAX_LEVEL * x.powf(cdf.gamma(level as u8));
            *dst = out.round().clamp(0.0, MAX_LEVEL) as u8;
        }
        Self(table)
    }

    /// The identity mapping.
    pub fn identity() -> Self {
        let mut table = [0u8; LEVELS];
        for (level, dst) in table.iter_mut().enumerate() {
            *dst = level as u8;
        }
        Self(table)
    }

    /// Output intensity for `level`.
    #[inline]
    pub fn get(&self, level: u8) -> u8 {
        self.0[level as usize]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Whether `lut[i] <= lut[i + 1]` for every level.
    pub fn is_monotonic(&self) -> bool {
        self.0.windows(2).all(|w| w[0] <= w[1])
    }
}

/// Integrate a weighted PDF and derive its gamma table.
pub fn build_lut(weighted: &WeightedPdf) -> GammaLut {
    GammaLut::from_cdf(&Cdf::from_weighted(weighted))
}
