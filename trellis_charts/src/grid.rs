// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid partitioning for trellis layouts.
//!
//! The surface is split into `rows * cols` equal cells. Each cell reserves [`Padding`]
//! on every side for axes and captions; what remains is the panel's content area, and
//! every panel gets the same content size.
//!
//! Panels are numbered row-major: index `i` sits at row `i / cols`, column `i % cols`.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Affine, Rect, Vec2};

use crate::TrellisError;

/// A width/height pair in surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in surface coordinate units.
    pub width: f64,
    /// Height in surface coordinate units.
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Space reserved around each panel's content area.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    /// Space above the content.
    pub top: f64,
    /// Space right of the content.
    pub right: f64,
    /// Space below the content (x-axis ticks and caption live here).
    pub bottom: f64,
    /// Space left of the content (y-axis ticks and caption live here).
    pub left: f64,
}

impl Padding {
    /// Creates padding from its four sides, in CSS order.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Total horizontal padding (`left + right`).
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total vertical padding (`top + bottom`).
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    fn is_valid(&self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::new(20.0, 20.0, 60.0, 60.0)
    }
}

/// The shape of a trellis grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridShape {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl GridShape {
    /// Largest number of cells a layout accepts.
    pub const MAX_CELLS: usize = 1 << 16;

    /// Creates a new grid shape.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of cells (`rows * cols`), saturating at `usize::MAX`.
    pub const fn capacity(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Returns `(row, col)` for a row-major cell index, or `None` if out of range.
    pub const fn cell(&self, index: usize) -> Option<(usize, usize)> {
        if self.cols == 0 || index >= self.capacity() {
            return None;
        }
        Some((index / self.cols, index % self.cols))
    }
}

impl Default for GridShape {
    fn default() -> Self {
        Self::new(2, 2)
    }
}

/// Placement of one panel's content area on the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelGeometry {
    /// Left edge of the content area.
    pub origin_x: f64,
    /// Top edge of the content area.
    pub origin_y: f64,
    /// Content width.
    pub width: f64,
    /// Content height.
    pub height: f64,
}

impl PanelGeometry {
    /// Content area in surface coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.origin_x,
            self.origin_y,
            self.origin_x + self.width,
            self.origin_y + self.height,
        )
    }

    /// Content area in panel-local coordinates (origin at the top-left corner).
    pub fn local_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Content size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Translation from panel-local to surface coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(Vec2::new(self.origin_x, self.origin_y))
    }

    /// The full grid cell: the content area grown by `padding`.
    pub fn cell_rect(&self, padding: &Padding) -> Rect {
        Rect::new(
            self.origin_x - padding.left,
            self.origin_y - padding.top,
            self.origin_x + self.width + padding.right,
            self.origin_y + self.height + padding.bottom,
        )
    }
}

/// Computes the content size shared by every panel.
///
/// Fails with [`TrellisError::InvalidLayout`] when the shape has no cells or more than
/// [`GridShape::MAX_CELLS`], the inputs are negative or non-finite, or the padding leaves
/// no positive width or height.
pub fn panel_size(
    surface: Size,
    shape: GridShape,
    padding: &Padding,
) -> Result<Size, TrellisError> {
    let cells = shape.rows.checked_mul(shape.cols).unwrap_or(usize::MAX);
    if cells == 0 || cells > GridShape::MAX_CELLS {
        return Err(TrellisError::InvalidLayout {
            width: 0.0,
            height: 0.0,
        });
    }
    let width = surface.width / shape.cols as f64 - padding.horizontal();
    let height = surface.height / shape.rows as f64 - padding.vertical();

    let finite = surface.width.is_finite() && surface.height.is_finite();
    let empty = width.is_nan() || height.is_nan() || width <= 0.0 || height <= 0.0;
    if !finite || !padding.is_valid() || empty {
        return Err(TrellisError::InvalidLayout { width, height });
    }
    Ok(Size::new(width, height))
}

/// Partitions `surface` into `shape.rows * shape.cols` panels, row-major.
///
/// For the cell at `(r, c)`:
/// - `origin_x = c * (width + padding.left + padding.right) + padding.left`
/// - `origin_y = r * (height + padding.top + padding.bottom) + padding.top`
pub fn compute_grid(
    surface: Size,
    shape: GridShape,
    padding: &Padding,
) -> Result<Vec<PanelGeometry>, TrellisError> {
    let size = panel_size(surface, shape, padding)?;
    let step_x = size.width + padding.horizontal();
    let step_y = size.height + padding.vertical();

    let mut out = Vec::with_capacity(shape.capacity());
    for r in 0..shape.rows {
        for c in 0..shape.cols {
            out.push(PanelGeometry {
                origin_x: c as f64 * step_x + padding.left,
                origin_y: r as f64 * step_y + padding.top,
                width: size.width,
                height: size.height,
            });
        }
    }
    Ok(out)
}
