//! Conversions between [`PixelGrid`] and the `image` crate's in-memory buffers.
//!
//! Only buffer plumbing lives here; decoding and encoding stay with the host.

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

use crate::error::{AgcwdError, shape_error};
use crate::image::{PixelGrid, PixelLayout};

impl From<&GrayImage> for PixelGrid {
    fn from(img: &GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self::from_parts(width, height, PixelLayout::Gray, img.as_raw().clone())
    }
}

impl From<&RgbImage> for PixelGrid {
    fn from(img: &RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::from_parts(width, height, PixelLayout::Rgb, img.as_raw().clone())
    }
}

impl From<&RgbaImage> for PixelGrid {
    fn from(img: &RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::from_parts(width, height, PixelLayout::Rgba, img.as_raw().clone())
    }
}

impl From<&DynamicImage> for PixelGrid {
    /// 8-bit gray, RGB and RGBA are taken as-is; every other pixel type is
    /// converted to 8-bit RGB, or RGBA when it carries alpha.
    fn from(img: &DynamicImage) -> Self {
        match img {
            DynamicImage::ImageLuma8(buf) => buf.into(),
            DynamicImage::ImageRgb8(buf) => buf.into(),
            DynamicImage::ImageRgba8(buf) => buf.into(),
            other if other.color().has_alpha() => (&other.to_rgba8()).into(),
            other => (&other.to_rgb8()).into(),
        }
    }
}

impl PixelGrid {
    /// Convert into a [`DynamicImage`], reordering BGR(A) samples to RGB(A).
    pub fn into_dynamic(self) -> Result<DynamicImage, AgcwdError> {
        let (width, height, layout) = (self.width(), self.height(), self.layout());
        let expected = self.describe();
        let mut data = self.into_data();

        if matches!(layout, PixelLayout::Bgr | PixelLayout::Bgra) {
            for px in data.chunks_exact_mut(layout.channels()) {
                px.swap(0, 2);
            }
        }

        let dynamic = match layout {
            PixelLayout::Gray => {
                GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8)
            }
            PixelLayout::Bgr | PixelLayout::Rgb => {
                RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8)
            }
            PixelLayout::Bgra | PixelLayout::Rgba => {
                RgbaImage::from_raw(width, height, data).map(DynamicImage::ImageRgba8)
            }
        };
        dynamic.ok_or_else(|| shape_error(expected, "buffer rejected by image"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_image_becomes_gray_grid() {
        let img = GrayImage::from_raw(2, 1, vec![7, 9]).unwrap();
        let grid = PixelGrid::from(&img);
        assert_eq!(grid.layout(), PixelLayout::Gray);
        assert_eq!(grid.data(), &[7, 9]);
    }

    #[test]
    fn test_dynamic_luma16_is_converted_to_rgb() {
        let img = DynamicImage::new_luma16(3, 2);
        let grid = PixelGrid::from(&img);
        assert_eq!(grid.layout(), PixelLayout::Rgb);
        assert_eq!(grid.pixel_count(), 6);
    }

    #[test]
    fn test_bgr_grid_is_reordered_for_image() {
        let grid = PixelGrid::color(1, 1, PixelLayout::Bgr, vec![1, 2, 3]).unwrap();
        let DynamicImage::ImageRgb8(buf) = grid.into_dynamic().unwrap() else {
            panic!("expected an 8-bit RGB image");
        };
        assert_eq!(buf.as_raw(), &vec![3, 2, 1]);
    }

    #[test]
    fn test_rgba_survives_conversion() {
        let img = RgbaImage::from_raw(1, 1, vec![10, 20, 30, 40]).unwrap();
        let grid = PixelGrid::from(&img);
        let DynamicImage::ImageRgba8(back) = grid.into_dynamic().unwrap() else {
            panic!("expected an 8-bit RGBA image");
        };
        assert_eq!(back, img);
    }
}
