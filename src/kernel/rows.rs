use std::collections::HashMap;

use crate::config::model::BlurConfig;
use crate::kernel::resolver::{ScanlineKernel, kernel_size_at, row_position};

/// Kernels for every row of one image.
///
/// Rows that resolve to the same kernel width share one [`ScanlineKernel`], so weights are built
/// once per distinct width rather than once per row or pixel.
#[derive(Clone, Debug)]
pub struct RowKernels {
    unique: Vec<ScanlineKernel>,
    rows: Vec<usize>,
}

impl RowKernels {
    /// Resolve the kernel of each of `height` rows.
    pub fn resolve(height: u32, config: &BlurConfig) -> Self {
        let mut unique = Vec::<ScanlineKernel>::new();
        let mut by_size = HashMap::<u32, usize>::new();
        let mut rows = Vec::with_capacity(height as usize);

        for row in 0..height {
            let size = kernel_size_at(row_position(row, height), config);
            let idx = *by_size.entry(size).or_insert_with(|| {
                unique.push(ScanlineKernel::build(size, config.blur_type));
                unique.len() - 1
            });
            rows.push(idx);
        }

        Self { unique, rows }
    }

    /// Kernel for output row `y`.
    pub fn row(&self, y: u32) -> &ScanlineKernel {
        &self.unique[self.rows[y as usize]]
    }

    /// Number of rows covered.
    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Number of distinct kernels in the table.
    pub fn unique_kernels(&self) -> usize {
        self.unique.len()
    }

    /// Largest radius of any row.
    pub fn max_radius(&self) -> u32 {
        self.unique.iter().map(ScanlineKernel::radius).max().unwrap_or(0)
    }

    /// Whether every row is the identity.
    pub fn is_identity(&self) -> bool {
        self.unique.iter().all(ScanlineKernel::is_identity)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/rows.rs"]
mod tests;
