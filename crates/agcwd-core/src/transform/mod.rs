//! Tone transform — parameters, cumulative gamma LUT, and pixel remap.

pub mod lut;
pub mod params;
pub mod remap;
