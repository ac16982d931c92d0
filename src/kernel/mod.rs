//! Parameter resolution: from a [`crate::BlurConfig`] and a row position to concrete 1-D kernels.

/// Single-scanline kernel resolution.
pub mod resolver;
/// Per-image row tables with shared kernels.
pub mod rows;
