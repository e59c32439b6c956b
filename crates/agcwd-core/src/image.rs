//! Pixel grid representation for the enhancement pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AgcwdError, shape_error};

/// Channel layout of an 8-bit pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelLayout {
    /// Single intensity channel.
    Gray,
    /// Blue, green, red (OpenCV order).
    Bgr,
    /// Red, green, blue.
    Rgb,
    /// Blue, green, red, alpha.
    Bgra,
    /// Red, green, blue, alpha.
    Rgba,
}

impl PixelLayout {
    /// Number of interleaved channels per pixel.
    pub const fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Bgr | Self::Rgb => 3,
            Self::Bgra | Self::Rgba => 4,
        }
    }

    /// Whether the layout carries color that must go through the value channel.
    pub const fn is_color(self) -> bool {
        !matches!(self, Self::Gray)
    }

    /// Offsets of the red, green and blue samples within one pixel.
    ///
    /// Gray maps every component to offset 0.
    pub const fn rgb_offsets(self) -> [usize; 3] {
        match self {
            Self::Gray => [0, 0, 0],
            Self::Bgr | Self::Bgra => [2, 1, 0],
            Self::Rgb | Self::Rgba => [0, 1, 2],
        }
    }
}

impl fmt::Display for PixelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gray => write!(f, "gray"),
            Self::Bgr => write!(f, "BGR"),
            Self::Rgb => write!(f, "RGB"),
            Self::Bgra => write!(f, "BGRA"),
            Self::Rgba => write!(f, "RGBA"),
        }
    }
}

/// Rectangular 8-bit image, interleaved and row-major.
///
/// The constructor guarantees `data.len() == width * height * channels`, so
/// every row has the same width for the lifetime of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    layout: PixelLayout,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Wrap an interleaved buffer, checking that its length matches the dimensions.
    pub fn new(
        width: u32,
        height: u32,
        layout: PixelLayout,
        data: Vec<u8>,
    ) -> Result<Self, AgcwdError> {
        let expected = width as usize * height as usize * layout.channels();
        if data.len() != expected {
            return Err(shape_error(
                format!("{expected} samples for {width}x{height} {layout}"),
                format!("{} samples", data.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Wrap a buffer whose length is already known to match, e.g. one from the `image` crate.
    pub(crate) fn from_parts(width: u32, height: u32, layout: PixelLayout, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * layout.channels());
        Self {
            width,
            height,
            layout,
            data,
        }
    }

    /// Single-channel grid.
    pub fn gray(width: u32, height: u32, data: Vec<u8>) -> Result<Self, AgcwdError> {
        Self::new(width, height, PixelLayout::Gray, data)
    }

    /// Three-channel grid in the given color order.
    pub fn color(
        width: u32,
        height: u32,
        layout: PixelLayout,
        data: Vec<u8>,
    ) -> Result<Self, AgcwdError> {
        if !layout.is_color() {
            return Err(shape_error("a color layout", layout));
        }
        Self::new(width, height, layout, data)
    }

    /// Build a grid from nested rows of interleaved samples.
    ///
    /// Rejects ragged rows and rows whose length is not a whole number of pixels.
    pub fn from_rows<R: AsRef<[u8]>>(
        layout: PixelLayout,
        rows: &[R],
    ) -> Result<Self, AgcwdError> {
        let channels = layout.channels();
        let row_len = rows.first().map_or(0, |r| r.as_ref().len());
        if !row_len.is_multiple_of(channels) {
            return Err(shape_error(
                format!("row length divisible by {channels}"),
                format!("row length {row_len}"),
            ));
        }

        let mut data = Vec::with_capacity(row_len * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != row_len {
                return Err(shape_error(
                    format!("row {y} with {row_len} samples"),
                    format!("{} samples", row.len()),
                ));
            }
            data.extend_from_slice(row);
        }

        let width = u32::try_from(row_len / channels)
            .map_err(|_| shape_error("width within u32", row_len))?;
        let height = u32::try_from(rows.len())
            .map_err(|_| shape_error("height within u32", rows.len()))?;
        Self::new(width, height, layout, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Raw interleaved samples.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// Samples of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let channels = self.layout.channels();
        let start = (y as usize * self.width as usize + x as usize) * channels;
        self.data.get(start..start + channels)
    }

    /// Dimension summary used in shape errors and logs.
    pub(crate) fn describe(&self) -> String {
        format!("{}x{} {}", self.width, self.height, self.layout)
    }
}

/// Transient single-channel brightness grid.
///
/// Holds exactly `width * height` intensities, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChannel {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ValueChannel {
    /// Wrap one intensity per pixel, checking that the count matches the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, AgcwdError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(shape_error(
                format!("{expected} samples for {width}x{height} value channel"),
                format!("{} samples", data.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap samples produced from a grid of the same dimensions.
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Intensities, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether this channel can stand in for `image`'s brightness.
    pub fn matches(&self, image: &PixelGrid) -> bool {
        self.width == image.width() && self.height == image.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = PixelGrid::new(2, 2, PixelLayout::Rgb, vec![0; 11]).unwrap_err();
        assert!(matches!(err, AgcwdError::InvalidShape { .. }));
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let rows = vec![vec![1u8, 2, 3], vec![4, 5]];
        let err = PixelGrid::from_rows(PixelLayout::Gray, &rows).unwrap_err();
        assert!(matches!(err, AgcwdError::InvalidShape { .. }));
    }

    #[test]
    fn test_from_rows_rejects_partial_pixels() {
        let rows = vec![vec![1u8, 2, 3, 4], vec![5, 6, 7, 8]];
        let err = PixelGrid::from_rows(PixelLayout::Bgr, &rows).unwrap_err();
        assert!(matches!(err, AgcwdError::InvalidShape { .. }));
    }

    #[test]
    fn test_from_rows_builds_row_major_grid() {
        let rows = [[10u8, 20, 30, 40, 50, 60], [70, 80, 90, 100, 110, 120]];
        let grid = PixelGrid::from_rows(PixelLayout::Rgb, &rows).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.pixel(1, 1), Some(&[100u8, 110, 120][..]));
        assert_eq!(grid.pixel(2, 0), None);
    }

    #[test]
    fn test_value_channel_rejects_short_buffer() {
        let err = ValueChannel::new(2, 2, vec![5]).unwrap_err();
        assert!(matches!(err, AgcwdError::InvalidShape { .. }));
        assert!(ValueChannel::new(2, 2, vec![5; 4]).is_ok());
    }

    #[test]
    fn test_color_rejects_gray_layout() {
        assert!(PixelGrid::color(1, 1, PixelLayout::Gray, vec![0]).is_err());
    }

    #[test]
    fn test_bgr_offsets_point_at_red_last() {
        assert_eq!(PixelLayout::Bgr.rgb_offsets(), [2, 1, 0]);
        assert_eq!(PixelLayout::Rgba.rgb_offsets(), [0, 1, 2]);
        assert_eq!(PixelLayout::Bgra.channels(), 4);
    }
}
