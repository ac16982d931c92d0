use rayon::prelude::*;

use crate::foundation::core::{CHANNELS, PixelBuffer};
use crate::foundation::error::{BlurError, BlurResult};
use crate::kernel::resolver::ScanlineKernel;
use crate::kernel::rows::RowKernels;
use crate::render::backend::{AlphaMode, BackendKind, BackendSettings, BlurBackend};

/// CPU backend running both passes row by row.
///
/// The horizontal pass writes an f32 intermediate so the image is quantized to u8 only once,
/// after the vertical pass. Each output row depends on nothing written in the same pass, so rows
/// are independent work items.
pub struct CpuBackend {
    exec: Exec,
}

enum Exec {
    Serial,
    Global,
    Pool(rayon::ThreadPool),
}

impl CpuBackend {
    /// Parallel backend with its own thread pool.
    pub fn new(settings: &BackendSettings) -> BlurResult<Self> {
        Ok(Self {
            exec: Exec::Pool(build_thread_pool(settings.threads)?),
        })
    }

    /// Parallel backend on rayon's global pool.
    pub fn global() -> Self {
        Self { exec: Exec::Global }
    }

    /// Backend that runs on the calling thread.
    pub fn serial() -> Self {
        Self { exec: Exec::Serial }
    }

    /// Worker threads used per pass (1 for the serial backend).
    pub fn threads(&self) -> usize {
        match &self.exec {
            Exec::Serial => 1,
            Exec::Global => rayon::current_num_threads(),
            Exec::Pool(pool) => pool.current_num_threads(),
        }
    }
}

impl BlurBackend for CpuBackend {
    fn kind(&self) -> BackendKind {
        match self.exec {
            Exec::Serial => BackendKind::CpuSerial,
            Exec::Global | Exec::Pool(_) => BackendKind::Cpu,
        }
    }

    fn convolve(
        &mut self,
        src: &PixelBuffer,
        kernels: &RowKernels,
        alpha: AlphaMode,
    ) -> BlurResult<PixelBuffer> {
        if kernels.height() != src.height() {
            return Err(BlurError::processing(format!(
                "kernel table covers {} rows, image has {}",
                kernels.height(),
                src.height()
            )));
        }
        if kernels.is_identity() {
            return Ok(src.clone());
        }

        let len = src.data().len();
        let mut tmp = alloc_zeroed::<f32>(len)?;
        let mut out = alloc_zeroed::<u8>(len)?;

        tracing::debug!(
            width = src.width(),
            height = src.height(),
            unique_kernels = kernels.unique_kernels(),
            max_radius = kernels.max_radius(),
            threads = self.threads(),
            "running separable passes"
        );

        match &self.exec {
            Exec::Serial => run_serial(src, kernels, alpha, &mut tmp, &mut out),
            Exec::Global => run_parallel(src, kernels, alpha, &mut tmp, &mut out),
            Exec::Pool(pool) => {
                pool.install(|| run_parallel(src, kernels, alpha, &mut tmp, &mut out));
            }
        }

        PixelBuffer::new(src.width(), src.height(), out)
    }
}

fn run_parallel(
    src: &PixelBuffer,
    kernels: &RowKernels,
    alpha: AlphaMode,
    tmp: &mut [f32],
    out: &mut [u8],
) {
    let stride = src.stride();
    tmp.par_chunks_mut(stride)
        .enumerate()
        .for_each_init(Vec::new, |scratch, (y, row)| {
            let y = y as u32;
            horizontal_row(src.row(y), kernels.row(y), alpha, scratch, row);
        });

    let tmp = &*tmp;
    out.par_chunks_mut(stride)
        .enumerate()
        .for_each_init(Vec::new, |acc, (y, row)| {
            let y = y as u32;
            vertical_row(tmp, y, src.row(y), kernels.row(y), alpha, acc, row);
        });
}

fn run_serial(
    src: &PixelBuffer,
    kernels: &RowKernels,
    alpha: AlphaMode,
    tmp: &mut [f32],
    out: &mut [u8],
) {
    let stride = src.stride();
    let mut scratch = Vec::new();
    for (y, row) in tmp.chunks_mut(stride).enumerate() {
        let y = y as u32;
        horizontal_row(src.row(y), kernels.row(y), alpha, &mut scratch, row);
    }

    let tmp = &*tmp;
    for (y, row) in out.chunks_mut(stride).enumerate() {
        let y = y as u32;
        vertical_row(tmp, y, src.row(y), kernels.row(y), alpha, &mut scratch, row);
    }
}

/// Blur one source row along x into `dst`, clamping taps at the row ends.
fn horizontal_row(
    src: &[u8],
    kernel: &ScanlineKernel,
    alpha: AlphaMode,
    scratch: &mut Vec<f32>,
    dst: &mut [f32],
) {
    scratch.clear();
    scratch.extend(src.chunks_exact(CHANNELS).flat_map(|px| load_px(px, alpha)));

    if kernel.is_identity() {
        dst.copy_from_slice(&scratch[..]);
        return;
    }

    let width = scratch.len() / CHANNELS;
    let last = width as i64 - 1;
    let r = i64::from(kernel.radius());
    for (x, out_px) in dst.chunks_exact_mut(CHANNELS).enumerate() {
        let mut acc = [0.0f32; CHANNELS];
        for (ki, &kw) in kernel.weights().iter().enumerate() {
            let sx = (x as i64 + ki as i64 - r).clamp(0, last) as usize;
            let px = &scratch[sx * CHANNELS..sx * CHANNELS + CHANNELS];
            for c in 0..CHANNELS {
                acc[c] += kw * px[c];
            }
        }
        out_px.copy_from_slice(&acc);
    }
}

/// Blur output row `y` along y from the intermediate buffer, clamping taps at the image edges.
///
/// An identity row has an identity horizontal kernel too, so its source bytes are copied as is.
fn vertical_row(
    tmp: &[f32],
    y: u32,
    src_row: &[u8],
    kernel: &ScanlineKernel,
    alpha: AlphaMode,
    acc: &mut Vec<f32>,
    dst: &mut [u8],
) {
    if kernel.is_identity() {
        dst.copy_from_slice(src_row);
        return;
    }

    let stride = dst.len();
    let last = (tmp.len() / stride) as i64 - 1;
    let r = i64::from(kernel.radius());

    acc.clear();
    acc.resize(stride, 0.0);
    for (ki, &kw) in kernel.weights().iter().enumerate() {
        let sy = (i64::from(y) + ki as i64 - r).clamp(0, last) as usize;
        let src = &tmp[sy * stride..(sy + 1) * stride];
        for (a, &s) in acc.iter_mut().zip(src) {
            *a += kw * s;
        }
    }

    for (out_px, px) in dst.chunks_exact_mut(CHANNELS).zip(acc.chunks_exact(CHANNELS)) {
        store_px(px, alpha, out_px);
    }
}

fn load_px(px: &[u8], alpha: AlphaMode) -> [f32; CHANNELS] {
    let [r, g, b, a] = [px[0], px[1], px[2], px[3]].map(f32::from);
    match alpha {
        AlphaMode::Straight => [r, g, b, a],
        AlphaMode::Premultiplied => {
            let s = a / 255.0;
            [r * s, g * s, b * s, a]
        }
    }
}

fn store_px(px: &[f32], alpha: AlphaMode, out: &mut [u8]) {
    let a = to_u8(px[3]);
    match alpha {
        AlphaMode::Straight => {
            for c in 0..CHANNELS {
                out[c] = to_u8(px[c]);
            }
        }
        AlphaMode::Premultiplied => {
            if a == 0 {
                out.copy_from_slice(&[0, 0, 0, 0]);
                return;
            }
            let s = 255.0 / px[3];
            for c in 0..3 {
                out[c] = to_u8(px[c] * s);
            }
            out[3] = a;
        }
    }
}

fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn alloc_zeroed<T: Copy + Default>(len: usize) -> BlurResult<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|e| {
        BlurError::processing(format!("allocate {len}-element pass buffer: {e}"))
    })?;
    v.resize(len, T::default());
    Ok(v)
}

fn build_thread_pool(threads: Option<usize>) -> BlurResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(BlurError::invalid_config(
            "backend 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("progblur-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        BlurError::unsupported_backend(format!("failed to build rayon thread pool: {e}"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
