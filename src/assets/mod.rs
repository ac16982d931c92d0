//! Image sources and sinks around the engine.

/// Decoding and PNG encoding.
pub mod decode;
/// Built-in sample image.
pub mod sample;
