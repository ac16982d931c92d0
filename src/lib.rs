//! Progressive blur for RGBA8 images.
//!
//! Blur strength ramps from nothing to a maximum across a vertical band of the image. The band,
//! the ramp curve ([`Ease`]), the kernel shape ([`BlurType`]) and the widest kernel are all
//! described by a [`BlurConfig`].
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: every row's normalized height maps to an odd kernel width and its weights
//!    ([`resolve_kernel`], collected per image in [`RowKernels`]).
//! 2. **Convolve**: a horizontal pass into an f32 intermediate, then a vertical pass into the
//!    final RGBA8 buffer, rows spread over a rayon pool ([`CpuBackend`]).
//! 3. **Deliver**: either synchronously ([`blur`]) or through a background [`BlurWorker`] that
//!    answers tagged requests.
//!
//! The key constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: serial and parallel execution produce identical bytes.
//! - **No partial output**: every call returns a complete image or a [`BlurError`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod config;
mod foundation;
mod kernel;
mod render;
mod session;

pub use animation::ease::{Ease, list_easings};
pub use assets::decode::{decode_image, encode_png, load_image, save_png};
pub use assets::sample::{SAMPLE_HEIGHT, SAMPLE_WIDTH, sample_image};
pub use config::model::{BlurConfig, BlurType, MAX_KERNEL_SIZE, MIN_KERNEL_SIZE};
pub use foundation::core::{CHANNELS, PixelBuffer};
pub use foundation::error::{BlurError, BlurResult};
pub use kernel::resolver::{
    MAX_RADIUS, ScanlineKernel, force_odd, kernel_size_at, radius_for_size, resolve_kernel,
    row_position,
};
pub use kernel::rows::RowKernels;
pub use render::backend::{
    AlphaMode, BackendKind, BackendSettings, BlurBackend, create_backend,
};
pub use render::cpu::CpuBackend;
pub use render::pipeline::{blur, blur_rgba8, blur_with_backend};
pub use session::worker::{
    BlurOutcome, BlurRequestId, BlurResponse, BlurWorker, BlurWorkerOpts,
};
