//! HSV value-channel extraction and composition.
//!
//! Color pixels are converted to HSV with `palette`; the value component
//! (the largest of R, G, B) is the channel the gamma curve operates on.
//! Composition swaps in a new value while keeping hue and saturation, then
//! converts back to the grid's channel order. Grayscale grids pass through.

use palette::{Hsv, IntoColor, Srgb};

use crate::error::{AgcwdError, shape_error};
use crate::image::{PixelGrid, ValueChannel};
use crate::parallel;

/// Brightness channel of `image`.
///
/// For grayscale grids this is a copy of the samples. For color grids it is
/// the HSV value scaled back to `0..=255`; alpha is ignored.
pub fn extract(image: &PixelGrid, threshold: usize) -> ValueChannel {
    let layout = image.layout();
    let data = if layout.is_color() {
        let [r, g, b] = layout.rgb_offsets();
        let pixels: Vec<&[u8]> = image.data().chunks_exact(layout.channels()).collect();
        parallel::map(&pixels, threshold, |px| {
            let hsv: Hsv = Srgb::new(px[r], px[g], px[b])
                .into_format::<f32>()
                .into_color();
            to_level(hsv.value)
        })
    } else {
        image.data().to_vec()
    };

    ValueChannel::from_parts(image.width(), image.height(), data)
}

/// Rebuild `original` with `value` as its brightness.
///
/// Fails with [`AgcwdError::InvalidShape`] before allocating any output when
/// the channel does not cover the image exactly. `original` is not modified.
pub fn compose(
    original: &PixelGrid,
    value: &ValueChannel,
    threshold: usize,
) -> Result<PixelGrid, AgcwdError> {
    if !value.matches(original) {
        return Err(shape_error(
            original.describe(),
            format!("{}x{} value channel", value.width(), value.height()),
        ));
    }

    let (width, height, layout) = (original.width(), original.height(), original.layout());
    if !layout.is_color() {
        return PixelGrid::new(width, height, layout, value.data().to_vec());
    }

    let [r, g, b] = layout.rgb_offsets();
    let mut data = original.data().to_vec();
    parallel::zip_chunks_mut(&mut data, layout.channels(), value.data(), threshold, |px, &v| {
        let mut hsv: Hsv = Srgb::new(px[r], px[g], px[b])
            .into_format::<f32>()
            .into_color();
        hsv.value = v as f32 / 255.0;
        let rgb: Srgb<u8> = IntoColor::<Srgb>::into_color(hsv).into_format();
        px[r] = rgb.red;
        px[g] = rgb.green;
        px[b] = rgb.blue;
    });

    PixelGrid::new(width, height, layout, data)
}

/// Scale a unit-range component to an 8-bit level.
fn to_level(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
