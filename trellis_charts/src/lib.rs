// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis (small-multiples) area charts.
//!
//! This crate lays out one area chart per category in a grid of equally sized panels:
//! - **Grid**: the surface is partitioned into padded cells ([`compute_grid`]).
//! - **Scales**: a time scale and a value scale are built from the *whole* dataset and
//!   shared by every panel ([`build_scales`]), so panels are directly comparable.
//! - **Series**: each category's points become a closed area path plus axes, gridlines
//!   and labels in panel-local coordinates ([`map_series`]).
//! - **Assembly**: [`assemble_trellis`] ties these together and [`Trellis::marks`]
//!   flattens the result into renderer-agnostic [`Mark`]s in surface coordinates.
//!
//! Everything here is pure and deterministic. Text is not shaped; text marks store
//! unshaped strings with an anchor and baseline.
//!
//! ```
//! use chrono::NaiveDate;
//! use trellis_charts::{TrellisSpec, assemble_trellis};
//! use trellis_transforms::{DataPoint, Dataset};
//!
//! let day = |m| NaiveDate::from_ymd_opt(2020, m, 1).unwrap();
//! let dataset = Dataset::from_points([
//!     DataPoint::new("AAPL", day(1), 75.0),
//!     DataPoint::new("AAPL", day(2), 68.0),
//!     DataPoint::new("MSFT", day(1), 170.0),
//!     DataPoint::new("MSFT", day(2), 162.0),
//! ])
//! .unwrap();
//!
//! let trellis = assemble_trellis(&dataset, &TrellisSpec::default()).unwrap();
//! assert_eq!(trellis.panels.len(), 2);
//! assert_eq!(trellis.view.panel.width, 320.0);
//! assert!(!trellis.marks().is_empty());
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
mod color;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod grid;
mod mark;
mod scale;
mod series;
mod time;
mod trellis;
#[cfg(test)]
mod trellis_tests;
mod z_order;

pub use axis::{
    AxisOrient, AxisSpec, AxisStyle, AxisTick, AxisTicks, GridStyle, StrokeStyle,
    grid_horizontal, grid_vertical, linear_ticks, time_ticks,
};
pub use color::{ColorAssignment, ColorEncoding, ColorSource, FallbackPolicy};
pub use error::TrellisError;
pub use format::format_tick_with_step;
pub use grid::{GridShape, Padding, PanelGeometry, Size, compute_grid, panel_size};
pub use mark::{Mark, PathMark, RectMark, RuleMark, TextAnchor, TextBaseline, TextMark};
pub use scale::{ScaleLinear, ScaleLinearSpec, ScaleTime, SharedScales, build_scales};
pub use series::{PanelLabels, PanelStyle, SeriesGeometry, map_series};
pub use time::{DateInterval, format_date_tick, nice_date_ticks};
pub use trellis::{PanelRenderSpec, Trellis, TrellisSpec, TrellisView, assemble_trellis};
pub use z_order::*;
