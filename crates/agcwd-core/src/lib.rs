//! AGCWD Core — adaptive gamma correction with weighting distribution.
//!
//! Enhances contrast in 8-bit images by deriving a per-level gamma exponent
//! from the image's own brightness distribution. Color images are processed
//! on the HSV value channel; grayscale images are processed directly.
//!
//! # Reference
//! S. Huang, F. Cheng and Y. Chiu, "Efficient Contrast Enhancement Using
//! Adaptive Gamma Correction With Weighting Distribution", IEEE Transactions
//! on Image Processing, vol. 22, no. 3, pp. 1032-1041, 2013.

pub mod analysis;
pub mod color;
pub mod error;
pub mod image;
pub mod interop;
pub mod parallel;
pub mod pipeline;
pub mod transform;

// Re-exports for convenience.
pub use analysis::histogram::{Histogram, Pdf};
pub use analysis::weighting::WeightedPdf;
pub use error::AgcwdError;
pub use crate::image::{PixelGrid, PixelLayout, ValueChannel};
pub use pipeline::{EnhanceReport, enhance, enhance_with, enhance_with_report};
pub use transform::lut::{Cdf, GammaLut};
pub use transform::params::AgcwdParams;
