// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for trellis assembly.

/// Errors returned by the grid partitioner, the scale builder and the trellis assembler.
///
/// All variants are structural input errors: they are detected before any geometry is
/// produced and repeat deterministically for the same input.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum TrellisError {
    /// The grid shape and padding leave no room for panel content.
    ///
    /// `width` and `height` are the computed per-panel content dimensions.
    #[error("invalid layout: panel content would be {width}x{height}")]
    InvalidLayout {
        /// Computed panel content width.
        width: f64,
        /// Computed panel content height.
        height: f64,
    },
    /// The dataset has no points, so its extents are undefined.
    #[error("dataset is empty")]
    EmptyDataset,
    /// There are more categories than grid cells.
    #[error("{categories} categories do not fit in a grid of {capacity} panels")]
    LayoutOverflow {
        /// Number of distinct categories in the dataset.
        categories: usize,
        /// Number of cells in the grid (`rows * cols`).
        capacity: usize,
    },
}
