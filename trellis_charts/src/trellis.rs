// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis assembly: dataset + spec to fully positioned panels.
//!
//! [`assemble_trellis`] ties the pieces together:
//! 1. partition the surface ([`compute_grid`]),
//! 2. group the dataset by category and check it fits the grid,
//! 3. build scales shared by every panel ([`build_scales`]),
//! 4. resolve one color per category ([`ColorEncoding::resolve`]),
//! 5. map each category's series into its panel ([`map_series`]).
//!
//! Every error is detected before any geometry is produced.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::{Brush, Color};
use trellis_transforms::{CategoryOrder, Dataset, GroupedSeries};

use crate::TrellisError;
use crate::color::{ColorEncoding, ColorSource};
use crate::grid::{GridShape, Padding, PanelGeometry, Size, compute_grid};
use crate::mark::{Mark, PathMark, RectMark};
use crate::scale::{SharedScales, build_scales};
use crate::series::{PanelStyle, SeriesGeometry, map_series};

/// Everything needed to lay out a trellis, apart from the data.
#[derive(Clone, Debug, PartialEq)]
pub struct TrellisSpec {
    /// Drawing surface size.
    pub surface: Size,
    /// Grid shape; categories fill it row-major.
    pub grid: GridShape,
    /// Space reserved around every panel.
    pub padding: Padding,
    /// Category colors.
    pub colors: ColorEncoding,
    /// Order in which categories are assigned to cells.
    pub category_order: CategoryOrder,
    /// Guide and label styling shared by every panel.
    pub style: PanelStyle,
    /// Extend the value domain to the next tick boundary.
    ///
    /// Off by default, so the tallest point touches the top of its panel.
    pub nice_values: bool,
}

impl Default for TrellisSpec {
    /// The reference chart: 800x600, 2x2, padding `{20, 20, 60, 60}`, stock colors.
    fn default() -> Self {
        Self {
            surface: Size::new(800.0, 600.0),
            grid: GridShape::default(),
            padding: Padding::default(),
            colors: ColorEncoding::stock_default(),
            category_order: CategoryOrder::default(),
            style: PanelStyle::default(),
            nice_values: false,
        }
    }
}

impl TrellisSpec {
    /// Sets the surface size.
    pub fn with_surface(mut self, surface: Size) -> Self {
        self.surface = surface;
        self
    }

    /// Sets the grid shape.
    pub fn with_grid(mut self, grid: GridShape) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the panel padding.
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the color encoding.
    pub fn with_colors(mut self, colors: ColorEncoding) -> Self {
        self.colors = colors;
        self
    }

    /// Sets the category order.
    pub fn with_category_order(mut self, order: CategoryOrder) -> Self {
        self.category_order = order;
        self
    }

    /// Sets the panel style.
    pub fn with_style(mut self, style: PanelStyle) -> Self {
        self.style = style;
        self
    }

    /// Enables or disables the nice value domain.
    pub fn with_nice_values(mut self, nice: bool) -> Self {
        self.nice_values = nice;
        self
    }
}

/// The surface-level layout of a trellis.
#[derive(Clone, Debug, PartialEq)]
pub struct TrellisView {
    /// Drawing surface size.
    pub surface: Size,
    /// Grid shape.
    pub shape: GridShape,
    /// Padding around every panel.
    pub padding: Padding,
    /// Content size shared by every panel.
    pub panel: Size,
    /// Every grid cell's content area, row-major, including cells with no category.
    pub cells: Vec<PanelGeometry>,
    /// Background fill for every cell.
    pub background: Option<Brush>,
}

/// One fully positioned panel.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelRenderSpec {
    /// Row-major cell index.
    pub index: usize,
    /// Grid row.
    pub row: usize,
    /// Grid column.
    pub col: usize,
    /// Category shown in this panel.
    pub category: String,
    /// Placement on the surface.
    pub geometry: PanelGeometry,
    /// Series color.
    pub color: Color,
    /// Whether `color` came from the table or the fallback policy.
    pub color_source: ColorSource,
    /// Background fill.
    pub background: Option<Brush>,
    /// Panel-local series geometry and guides.
    pub series: SeriesGeometry,
}

impl PanelRenderSpec {
    /// Returns this panel's marks in panel-local coordinates, in drawing order.
    pub fn local_marks(&self) -> Vec<Mark> {
        let s = &self.series;
        let mut out = Vec::with_capacity(8 + s.grid.len() + s.x_axis.len() + s.y_axis.len());
        if let Some(bg) = &self.background {
            out.push(RectMark::new(self.geometry.local_rect(), bg.clone()).into());
        }
        out.extend(s.grid.iter().cloned());
        out.push(PathMark::filled(s.area.clone(), self.color).into());
        out.extend(s.x_axis.iter().cloned());
        out.extend(s.y_axis.iter().cloned());
        out.push(s.labels.x_caption.clone().into());
        out.push(s.labels.y_caption.clone().into());
        out.push(s.labels.category.clone().with_fill(self.color).into());
        out
    }
}

/// A laid-out trellis.
#[derive(Clone, Debug, PartialEq)]
pub struct Trellis {
    /// Surface-level layout.
    pub view: TrellisView,
    /// Scales shared by every panel.
    pub scales: SharedScales,
    /// One entry per category, in cell order.
    pub panels: Vec<PanelRenderSpec>,
}

impl Trellis {
    /// Flattens every panel into surface-space marks.
    ///
    /// Marks are ordered by `(z_index, panel, sequence)`: all backgrounds first, then all
    /// gridlines, then areas, and so on. Within one layer, panels paint in cell order and
    /// each panel keeps its own drawing order.
    pub fn marks(&self) -> Vec<Mark> {
        let mut keyed: Vec<(i32, usize, usize, Mark)> = Vec::new();
        for (i, panel) in self.panels.iter().enumerate() {
            let t = panel.geometry.transform();
            for (seq, m) in panel.local_marks().into_iter().enumerate() {
                keyed.push((m.z_index(), i, seq, m.transformed(t)));
            }
        }
        if let Some(bg) = &self.view.background {
            for (i, cell) in self.view.cells.iter().enumerate().skip(self.panels.len()) {
                let m = Mark::from(RectMark::new(cell.rect(), bg.clone()));
                keyed.push((m.z_index(), i, 0, m));
            }
        }
        keyed.sort_by_key(|(z, panel, seq, _)| (*z, *panel, *seq));
        keyed.into_iter().map(|(_, _, _, m)| m).collect()
    }

    /// Returns the panel showing `category`, if any.
    pub fn panel(&self, category: &str) -> Option<&PanelRenderSpec> {
        self.panels.iter().find(|p| p.category == category)
    }
}

/// Lays out `dataset` as a trellis described by `spec`.
///
/// Errors are checked in order: grid ([`TrellisError::InvalidLayout`]), data
/// ([`TrellisError::EmptyDataset`]), then fit ([`TrellisError::LayoutOverflow`]). Identical
/// inputs give equal outputs.
pub fn assemble_trellis(dataset: &Dataset, spec: &TrellisSpec) -> Result<Trellis, TrellisError> {
    let cells = compute_grid(spec.surface, spec.grid, &spec.padding)?;
    let panel = cells.first().map_or(Size::default(), PanelGeometry::size);

    if dataset.is_empty() {
        return Err(TrellisError::EmptyDataset);
    }
    let groups = GroupedSeries::from_dataset(dataset, spec.category_order);
    if groups.len() > spec.grid.capacity() {
        return Err(TrellisError::LayoutOverflow {
            categories: groups.len(),
            capacity: spec.grid.capacity(),
        });
    }

    let mut scales = build_scales(dataset, panel)?;
    if spec.nice_values {
        scales = scales.with_nice_values(spec.style.y_axis.tick_count);
    }
    let colors = spec.colors.resolve(groups.categories());

    let mut panels = Vec::with_capacity(groups.len());
    for (index, ((category, points), assignment)) in groups.iter().zip(colors).enumerate() {
        let (Some((row, col)), Some(&geometry)) = (spec.grid.cell(index), cells.get(index)) else {
            // `cells` has `capacity >= groups.len()` entries.
            break;
        };
        tracing::trace!(
            index,
            row,
            col,
            category,
            fallback = assignment.source == ColorSource::Fallback,
            "placed panel"
        );
        panels.push(PanelRenderSpec {
            index,
            row,
            col,
            category: assignment.category,
            geometry,
            color: assignment.color,
            color_source: assignment.source,
            background: spec.style.background.clone(),
            series: map_series(category, points, &scales, &spec.style),
        });
    }

    tracing::debug!(
        panels = panels.len(),
        capacity = spec.grid.capacity(),
        panel_width = panel.width,
        panel_height = panel.height,
        max_value = scales.y.domain_max(),
        "assembled trellis"
    );

    Ok(Trellis {
        view: TrellisView {
            surface: spec.surface,
            shape: spec.grid,
            padding: spec.padding,
            panel,
            cells,
            background: spec.style.background.clone(),
        },
        scales,
        panels,
    })
}
