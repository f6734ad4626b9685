// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series mapping: one category's points to panel-local geometry.
//!
//! Everything produced here is in panel-local coordinates (origin at the top-left of the
//! panel's content area). The assembler positions panels on the surface afterwards.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use trellis_transforms::{DataPoint, SortOrder, sort_by_date};

use crate::axis::{
    AxisSpec, AxisTicks, GridStyle, grid_horizontal, grid_vertical, linear_ticks, time_ticks,
};
use crate::mark::{Mark, TextAnchor, TextBaseline, TextMark};
use crate::scale::SharedScales;
use crate::z_order;

/// Styling and guide configuration shared by every panel.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelStyle {
    /// Caption under the x axis.
    pub x_title: String,
    /// Caption left of the y axis (drawn rotated).
    pub y_title: String,
    /// Distance from the panel's bottom edge to the x caption's baseline.
    pub x_title_offset: f64,
    /// Distance from the panel's left edge to the y caption's center line.
    pub y_title_offset: f64,
    /// Font size of both captions.
    pub title_font_size: f64,
    /// Fill paint of both captions.
    pub title_fill: Brush,
    /// Font size of the centered category label.
    pub category_font_size: f64,
    /// Bottom (time) axis.
    pub x_axis: AxisSpec,
    /// Left (value) axis.
    pub y_axis: AxisSpec,
    /// Gridline styling; `None` disables gridlines.
    pub grid: Option<GridStyle>,
    /// Panel background fill; `None` leaves the surface bare.
    pub background: Option<Brush>,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            x_title: "Date (by Month)".into(),
            y_title: "Stock Price (USD)".into(),
            x_title_offset: 34.0,
            y_title_offset: 40.0,
            title_font_size: 12.0,
            title_fill: css::BLACK.into(),
            category_font_size: 16.0,
            x_axis: AxisSpec::bottom(),
            y_axis: AxisSpec::left(),
            grid: Some(GridStyle::default()),
            background: Some(Brush::Solid(peniko::Color::from_rgba8(240, 240, 240, 255))),
        }
    }
}

impl PanelStyle {
    /// Sets the x caption.
    pub fn with_x_title(mut self, title: impl Into<String>) -> Self {
        self.x_title = title.into();
        self
    }

    /// Sets the y caption.
    pub fn with_y_title(mut self, title: impl Into<String>) -> Self {
        self.y_title = title.into();
        self
    }

    /// Sets the gridline style, or disables gridlines with `None`.
    pub fn with_grid(mut self, grid: Option<GridStyle>) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the panel background, or removes it with `None`.
    pub fn with_background(mut self, background: Option<Brush>) -> Self {
        self.background = background;
        self
    }
}

/// The three text labels of a panel.
///
/// The category label's fill is left at its default; the assembler paints it in the
/// series color.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelLabels {
    /// Category name, centered in the panel.
    pub category: TextMark,
    /// X caption, centered below the axis.
    pub x_caption: TextMark,
    /// Y caption, rotated -90 degrees left of the axis.
    pub y_caption: TextMark,
}

/// Panel-local geometry for one series.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesGeometry {
    /// Closed area between the series and the baseline.
    pub area: BezPath,
    /// Top edge of the area, in date order.
    pub outline: Vec<Point>,
    /// Category label and axis captions.
    pub labels: PanelLabels,
    /// Vertical and horizontal gridlines.
    pub grid: Vec<Mark>,
    /// Bottom axis: domain line, ticks and labels.
    pub x_axis: Vec<Mark>,
    /// Left axis: domain line, ticks and labels.
    pub y_axis: Vec<Mark>,
}

/// Maps one category's points into panel-local geometry using the shared scales.
///
/// Points are stable-sorted by date first, so input order does not matter. A single point
/// yields a zero-width sliver and no points yield an empty path; neither is an error.
pub fn map_series(
    category: &str,
    points: &[DataPoint],
    scales: &SharedScales,
    style: &PanelStyle,
) -> SeriesGeometry {
    let sorted = sort_by_date(points, SortOrder::Asc);
    let outline: Vec<Point> = sorted
        .iter()
        .map(|p| Point::new(scales.x.map_date(p.date), scales.y.map(p.value)))
        .collect();
    let area = area_path(&outline, scales.baseline());

    let w = scales.panel.width;
    let h = scales.panel.height;
    let plot = Rect::new(0.0, 0.0, w, h);

    let x_ticks: AxisTicks = time_ticks(&scales.x, style.x_axis.tick_count);
    let y_ticks: AxisTicks = linear_ticks(&scales.y, style.y_axis.tick_count);

    let mut grid = Vec::new();
    if let Some(g) = &style.grid {
        grid.extend(grid_vertical(&x_ticks, plot, g));
        grid.extend(grid_horizontal(&y_ticks, plot, g));
    }

    SeriesGeometry {
        area,
        outline,
        labels: panel_labels(category, w, h, style),
        grid,
        x_axis: style.x_axis.marks(&x_ticks, plot),
        y_axis: style.y_axis.marks(&y_ticks, plot),
    }
}

fn area_path(outline: &[Point], baseline: f64) -> BezPath {
    let mut p = BezPath::new();
    let (Some(first), Some(last)) = (outline.first(), outline.last()) else {
        return p;
    };
    p.move_to((first.x, baseline));
    for pt in outline {
        p.line_to(*pt);
    }
    p.line_to((last.x, baseline));
    p.close_path();
    p
}

fn panel_labels(category: &str, w: f64, h: f64, style: &PanelStyle) -> PanelLabels {
    PanelLabels {
        category: TextMark::new((0.5 * w, 0.5 * h), category)
            .with_font_size(style.category_font_size)
            .with_anchor(TextAnchor::Middle)
            .with_baseline(TextBaseline::Middle)
            .with_z_index(z_order::TITLES),
        x_caption: TextMark::new((0.5 * w, h + style.x_title_offset), style.x_title.clone())
            .with_font_size(style.title_font_size)
            .with_fill(style.title_fill.clone())
            .with_anchor(TextAnchor::Middle)
            .with_z_index(z_order::AXIS_TITLES),
        y_caption: TextMark::new((-style.y_title_offset, 0.5 * h), style.y_title.clone())
            .with_font_size(style.title_font_size)
            .with_fill(style.title_fill.clone())
            .with_anchor(TextAnchor::Middle)
            .with_angle(-90.0)
            .with_z_index(z_order::AXIS_TITLES),
    }
}
