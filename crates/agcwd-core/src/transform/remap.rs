//! Per-pixel LUT gather over a value channel.

use crate::image::ValueChannel;
use crate::parallel;
use crate::transform::lut::GammaLut;

/// Replace every intensity with `lut[intensity]`.
///
/// The LUT is only read; above `threshold` pixels the gather runs on rayon.
pub fn remap(channel: &ValueChannel, lut: &GammaLut, threshold: usize) -> ValueChannel {
    let data = parallel::map(channel.data(), threshold, |&v| lut.get(v));
    ValueChannel::from_parts(channel.width(), channel.height(), data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_lut_leaves_channel_unchanged() {
        let channel = ValueChannel::new(4, 1, vec![0, 17, 200, 255]).unwrap();
        assert_eq!(remap(&channel, &GammaLut::identity(), usize::MAX), channel);
    }

    #[test]
    fn test_remap_preserves_shape_on_parallel_path() {
        let data: Vec<u8> = (0..64 * 64).map(|i| (i % 256) as u8).collect();
        let channel = ValueChannel::new(64, 64, data).unwrap();
        let out = remap(&channel, &GammaLut::identity(), 0);
        assert_eq!(out.width(), 64);
        assert_eq!(out.height(), 64);
        assert_eq!(out.into_data(), channel.data());
    }
}
