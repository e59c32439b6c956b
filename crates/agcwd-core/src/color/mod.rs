//! Color plumbing between pixel grids and the HSV value channel.

pub mod value_channel;

pub use value_channel::{compose, extract};
