//! End-to-end enhancement: extract → histogram → weight → LUT → remap → compose.
//!
//! Every intermediate is built once per call and dropped on return. All
//! validation happens before the output buffer is allocated, so a call either
//! returns a complete image or an error.

use serde::{Deserialize, Serialize};

use crate::analysis::histogram::{self, Pdf};
use crate::analysis::weighting::{self, WeightedPdf};
use crate::color;
use crate::error::AgcwdError;
use crate::image::PixelGrid;
use crate::transform::lut::{Cdf, GammaLut};
use crate::transform::params::AgcwdParams;
use crate::transform::remap::remap;

/// Intermediate distributions from one enhancement, for inspection and plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhanceReport {
    /// Normalized histogram of the value channel.
    pub pdf: Pdf,
    /// PDF after the weighting distribution.
    pub weighted_pdf: WeightedPdf,
    /// Normalized cumulative weighted distribution.
    pub cdf: Cdf,
    /// Intensity mapping applied to every pixel.
    pub lut: GammaLut,
    /// Whether the flat-histogram fallback was used while weighting.
    pub degenerate: bool,
}

/// Enhance `image` with weighting exponent `weight`.
///
/// `weight` must lie in `(0, 1]`; `0.5` is the customary default.
pub fn enhance(image: &PixelGrid, weight: f32) -> Result<PixelGrid, AgcwdError> {
    enhance_with(image, &AgcwdParams::with_weight(weight))
}

/// Enhance `image` with explicit parameters.
pub fn enhance_with(image: &PixelGrid, params: &AgcwdParams) -> Result<PixelGrid, AgcwdError> {
    enhance_with_report(image, params).map(|(out, _)| out)
}

/// Enhance `image` and return the distributions that produced the result.
pub fn enhance_with_report(
    image: &PixelGrid,
    params: &AgcwdParams,
) -> Result<(PixelGrid, EnhanceReport), AgcwdError> {
    params.validate()?;
    if image.is_empty() {
        return Err(AgcwdError::EmptyImage);
    }

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        layout = %image.layout(),
        weight = params.weight,
        "AGCWD enhance"
    );

    let threshold = params.parallel_threshold;
    let value = color::extract(image, threshold);
    let pdf = histogram::histogram(&value, threshold)?;
    let weighting = weighting::weight(&pdf, params.weight);
    let cdf = Cdf::from_weighted(&weighting.pdf);
    let lut = GammaLut::from_cdf(&cdf);

    tracing::trace!(
        pmax = pdf.max(),
        pmin = pdf.min(),
        degenerate = weighting.degenerate,
        monotonic = lut.is_monotonic(),
        "gamma LUT built"
    );

    let enhanced = remap(&value, &lut, threshold);
    let out = color::compose(image, &enhanced, threshold)?;

    tracing::debug!(pixels = out.pixel_count(), "AGCWD enhance complete");

    let report = EnhanceReport {
        pdf,
        weighted_pdf: weighting.pdf,
        cdf,
        lut,
        degenerate: weighting.degenerate,
    };
    Ok((out, report))
}
