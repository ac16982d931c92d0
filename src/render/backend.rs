use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{BlurError, BlurResult};
use crate::kernel::rows::RowKernels;

/// How the alpha channel takes part in the blur.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlphaMode {
    /// Color and alpha are averaged independently.
    #[default]
    Straight,
    /// Color is weighted by alpha while averaging and divided back out afterwards.
    Premultiplied,
}

impl AlphaMode {
    /// Mode selected by a config's `premultiply_alpha` flag.
    pub fn from_premultiply(premultiply: bool) -> Self {
        if premultiply {
            Self::Premultiplied
        } else {
            Self::Straight
        }
    }
}

/// An execution substrate for the two separable passes.
///
/// Implementations receive an already validated image and a resolved row table, and must return
/// a fresh buffer of the same size (or the source itself when nothing changes). They never
/// write into `src`.
pub trait BlurBackend: Send {
    /// Which kind of backend this is.
    fn kind(&self) -> BackendKind;

    /// Run the horizontal pass then the vertical pass.
    fn convolve(
        &mut self,
        src: &PixelBuffer,
        kernels: &RowKernels,
        alpha: AlphaMode,
    ) -> BlurResult<PixelBuffer>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// Rows are spread over a dedicated rayon thread pool.
    #[default]
    Cpu,
    /// Rows are processed one after another on the calling thread.
    CpuSerial,
}

/// Backend-agnostic settings.
#[derive(Clone, Debug, Default)]
pub struct BackendSettings {
    /// Worker threads for parallel backends. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Create a blur backend implementation.
///
/// Fails with [`BlurError::UnsupportedBackend`] when the substrate cannot be brought up.
pub fn create_backend(
    kind: BackendKind,
    settings: &BackendSettings,
) -> BlurResult<Box<dyn BlurBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(settings)?)),
        BackendKind::CpuSerial => {
            if let Some(n) = settings.threads
                && n != 1
            {
                return Err(BlurError::invalid_config(format!(
                    "serial backend runs on exactly one thread (got threads = {n})"
                )));
            }
            Ok(Box::new(crate::render::cpu::CpuBackend::serial()))
        }
    }
}
