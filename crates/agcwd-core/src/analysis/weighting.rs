//! Weighting distribution applied to the intensity PDF.
//!
//! Each probability is normalized into `[0, 1]` against the histogram's own
//! extremes, raised to the weight exponent, and rescaled by the peak:
//!
//! ```text
//! pdf_w(l) = pdf_max × ((pdf(l) − pdf_min) / (pdf_max − pdf_min))^w
//! ```
//!
//! With `w < 1` the frequent levels are pulled toward the rare ones, so a few
//! spikes cannot dominate the cumulative distribution built from this.

use serde::{Deserialize, Serialize};

use crate::analysis::histogram::{LEVELS, Pdf, levels};

/// Weighted PDF. Same shape as [`Pdf`] but not normalized to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedPdf(#[serde(with = "levels")] pub [f64; LEVELS]);

impl WeightedPdf {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

/// Outcome of weighting, including whether the flat-histogram fallback ran.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weighting {
    pub pdf: WeightedPdf,
    /// `pdf_max == pdf_min`; the normalized term fell back to an indicator at the peak.
    pub degenerate: bool,
}

/// Reshape `pdf` with exponent `weight`.
///
/// `weight` is expected in `(0, 1]`; callers validate it through
/// [`AgcwdParams::validate`](crate::transform::params::AgcwdParams::validate).
pub fn weight(pdf: &Pdf, weight: f32) -> Weighting {
    let pmax = pdf.max();
    let pmin = pdf.min();
    let range = pmax - pmin;
    let w = weight as f64;

    let mut out = [0.0_f64; LEVELS];
    let degenerate = range <= 0.0;
    if degenerate {
        tracing::trace!(pmax, "flat histogram, weighting falls back to peak indicator");
        for (dst, &p) in out.iter_mut().zip(&pdf.0) {
            *dst = if p == pmax { pmax } else { 0.0 };
        }
    } else {
        tracing::trace!(pmax, pmin, weight, "weighting distribution");
        for (dst, &p) in out.iter_mut().zip(&pdf.0) {
            let normalized = ((p - pmin) / range).clamp(0.0, 1.0);
            *dst = pmax * normalized.powf(w);
        }
    }

    Weighting {
        pdf: WeightedPdf(out),
        degenerate,
    }
}
