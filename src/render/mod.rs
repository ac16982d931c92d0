//! Convolution engine: execution backends and the top-level blur entry points.

/// Backend trait, kinds and construction.
pub mod backend;
/// Row-parallel CPU backend.
pub mod cpu;
/// Validation, kernel resolution and dispatch.
pub mod pipeline;
