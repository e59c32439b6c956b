//! Distribution analysis — histogram estimation and weighting.

pub mod histogram;
pub mod weighting;
