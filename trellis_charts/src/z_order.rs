// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for trellis marks.
//!
//! Every [`Mark`](crate::Mark) carries an explicit `z_index`. The trellis sets z-indexes
//! consistently so renderers can paint in `(z_index, panel, sequence)` order without
//! knowing which guide produced which mark.

/// Panel background fills.
pub const PLOT_BACKGROUND: i32 = -100;
/// Gridlines drawn behind series.
pub const GRID_LINES: i32 = -50;

/// Filled series areas.
pub const SERIES_FILL: i32 = 0;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis captions.
pub const AXIS_TITLES: i32 = 50;

/// Per-panel category labels.
pub const TITLES: i32 = 80;
