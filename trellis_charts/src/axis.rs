// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis and gridline mark generation.
//!
//! Axes follow the D3/Vega shape: a single [`AxisSpec`] with an `orient` of `top`, `bottom`,
//! `left`, or `right`. Tick values are resolved once into [`AxisTick`]s (position plus
//! label); the same ticks drive both the axis and its gridlines, so the two always agree.
//!
//! All geometry is panel-local: the plot rectangle is `(0, 0)..(width, height)`.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Brush;
use peniko::color::palette::css;
use smallvec::SmallVec;

use crate::format::format_tick_with_step;
use crate::mark::{Mark, RuleMark, TextAnchor, TextBaseline, TextMark};
use crate::scale::{ScaleLinear, ScaleTime};
use crate::time::format_date_tick;
use crate::z_order;

/// A paint + width pair for stroked paths (domain lines, ticks, gridlines).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in surface coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            label_fill: rule.brush.clone(),
            rule,
            label_font_size: 10.0,
        }
    }
}

/// Gridline styling.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    /// Stroke style for gridlines.
    pub stroke: StrokeStyle,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            stroke: StrokeStyle {
                brush: Brush::Solid(css::BLACK.with_alpha(40.0 / 255.0)),
                stroke_width: 1.0,
            },
        }
    }
}

/// Axis orientation, matching D3's `axisTop`/`axisBottom`/`axisLeft`/`axisRight`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis along the top edge, ticks pointing up.
    Top,
    /// A horizontal axis along the bottom edge, ticks pointing down.
    Bottom,
    /// A vertical axis along the left edge, ticks pointing left.
    Left,
    /// A vertical axis along the right edge, ticks pointing right.
    Right,
}

impl AxisOrient {
    fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// A resolved tick: its position along the axis and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// Position along the axis, in panel-local coordinates.
    pub position: f64,
    /// Formatted label.
    pub label: String,
}

/// Tick lists are short (about `tick_count`), so they usually live inline.
pub type AxisTicks = SmallVec<[AxisTick; 12]>;

/// Resolves ticks for a time scale, labelled with the multi-scale date format.
pub fn time_ticks(scale: &ScaleTime, count: usize) -> AxisTicks {
    scale
        .ticks(count)
        .into_iter()
        .map(|d| AxisTick {
            position: scale.map_date(d),
            label: format_date_tick(d),
        })
        .collect()
}

/// Resolves ticks for a linear scale, labelled with step-aware precision.
pub fn linear_ticks(scale: &ScaleLinear, count: usize) -> AxisTicks {
    let step = scale.tick_step(count);
    scale
        .ticks(count)
        .into_iter()
        .map(|v| AxisTick {
            position: scale.map(v),
            label: format_tick_with_step(v, step),
        })
        .collect()
}

/// An axis specification.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSpec {
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks.
    pub tick_count: usize,
    /// Tick line length. Ticks always point away from the plot.
    pub tick_size: f64,
    /// Gap between the tick end and the tick label.
    pub tick_padding: f64,
    /// Whether to draw tick marks.
    pub ticks: bool,
    /// Whether to draw tick labels.
    pub labels: bool,
    /// Whether to draw the axis domain line.
    pub show_domain: bool,
    /// Axis styling.
    pub style: AxisStyle,
}

impl AxisSpec {
    /// Creates a new axis specification with D3's defaults.
    ///
    /// The returned axis has `tick_count = 10`, `tick_size = 6`, `tick_padding = 3`, and
    /// draws its domain line, ticks and labels.
    pub fn new(orient: AxisOrient) -> Self {
        Self {
            orient,
            tick_count: 10,
            tick_size: 6.0,
            tick_padding: 3.0,
            ticks: true,
            labels: true,
            show_domain: true,
            style: AxisStyle::default(),
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom() -> Self {
        Self::new(AxisOrient::Bottom)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left() -> Self {
        Self::new(AxisOrient::Left)
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set tick size in surface coordinates.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Set tick padding in surface coordinates.
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    /// Enable or disable tick marks.
    pub fn with_ticks(mut self, ticks: bool) -> Self {
        self.ticks = ticks;
        self
    }

    /// Enable or disable tick labels.
    pub fn with_labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }

    /// Enable or disable the axis domain line.
    pub fn with_domain(mut self, domain: bool) -> Self {
        self.show_domain = domain;
        self
    }

    /// Set the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Generate axis marks for `ticks` along the matching edge of `plot`.
    pub fn marks(&self, ticks: &[AxisTick], plot: Rect) -> Vec<Mark> {
        let tick_size = self.tick_size.abs();
        let tick_extent = if self.ticks { tick_size } else { 0.0 };
        let label_offset = tick_extent + self.tick_padding.max(0.0);

        // `edge` is the axis line coordinate; `sign` points away from the plot.
        let (edge, sign) = match self.orient {
            AxisOrient::Top => (plot.y0, -1.0),
            AxisOrient::Bottom => (plot.y1, 1.0),
            AxisOrient::Left => (plot.x0, -1.0),
            AxisOrient::Right => (plot.x1, 1.0),
        };
        let horizontal = self.orient.is_horizontal();
        let at = |along: f64, across: f64| {
            if horizontal {
                (along, across)
            } else {
                (across, along)
            }
        };

        let mut out = Vec::with_capacity(1 + 2 * ticks.len());

        if self.show_domain {
            let (a0, a1) = if horizontal {
                (plot.x0, plot.x1)
            } else {
                (plot.y0, plot.y1)
            };
            out.push(
                RuleMark::new(at(a0, edge), at(a1, edge), self.style.rule.clone())
                    .with_z_index(z_order::AXIS_RULES)
                    .into(),
            );
        }

        let (anchor, baseline) = match self.orient {
            AxisOrient::Top => (TextAnchor::Middle, TextBaseline::Alphabetic),
            AxisOrient::Bottom => (TextAnchor::Middle, TextBaseline::Hanging),
            AxisOrient::Left => (TextAnchor::End, TextBaseline::Middle),
            AxisOrient::Right => (TextAnchor::Start, TextBaseline::Middle),
        };

        for tick in ticks {
            let p = tick.position;
            if self.ticks {
                out.push(
                    RuleMark::new(
                        at(p, edge),
                        at(p, edge + sign * tick_size),
                        self.style.rule.clone(),
                    )
                    .with_z_index(z_order::AXIS_RULES)
                    .into(),
                );
            }
            if self.labels {
                out.push(
                    TextMark::new(at(p, edge + sign * label_offset), tick.label.clone())
                        .with_font_size(self.style.label_font_size)
                        .with_fill(self.style.label_fill.clone())
                        .with_anchor(anchor)
                        .with_baseline(baseline)
                        .with_z_index(z_order::AXIS_LABELS)
                        .into(),
                );
            }
        }

        out
    }
}

/// Vertical gridlines at each tick, spanning the full height of `plot`.
pub fn grid_vertical(ticks: &[AxisTick], plot: Rect, style: &GridStyle) -> Vec<Mark> {
    ticks
        .iter()
        .map(|t| {
            Mark::from(RuleMark::new(
                (t.position, plot.y0),
                (t.position, plot.y1),
                style.stroke.clone(),
            )
            .with_z_index(z_order::GRID_LINES))
        })
        .collect()
}

/// Horizontal gridlines at each tick, spanning the full width of `plot`.
pub fn grid_horizontal(ticks: &[AxisTick], plot: Rect, style: &GridStyle) -> Vec<Mark> {
    ticks
        .iter()
        .map(|t| {
            Mark::from(RuleMark::new(
                (plot.x0, t.position),
                (plot.x1, t.position),
                style.stroke.clone(),
            )
            .with_z_index(z_order::GRID_LINES))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use chrono::NaiveDate;
    use kurbo::Point;

    use super::*;

    const PLOT: Rect = Rect::new(0.0, 0.0, 320.0, 220.0);

    fn y_scale() -> ScaleLinear {
        ScaleLinear::new((0.0, 480.0), (220.0, 0.0))
    }

    fn rules(marks: &[Mark]) -> Vec<&RuleMark> {
        marks
            .iter()
            .filter_map(|m| match m {
                Mark::Rule(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    fn texts(marks: &[Mark]) -> Vec<&TextMark> {
        marks
            .iter()
            .filter_map(|m| match m {
                Mark::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn linear_ticks_are_positioned_and_labelled() {
        let ticks = linear_ticks(&y_scale(), 10);
        assert_eq!(ticks.len(), 10);
        assert_eq!(ticks[0].position, 220.0);
        assert_eq!(ticks[0].label, "0");
        assert_eq!(ticks[9].label, "450");
    }

    #[test]
    fn time_ticks_use_date_labels() {
        let d0 = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let d1 = NaiveDate::from_ymd_opt(2019, 12, 31).unwrap();
        let ticks = time_ticks(&ScaleTime::new((d0, d1), (0.0, 320.0)), 10);
        assert_eq!(ticks[0].label, "2019");
        assert_eq!(ticks[0].position, 0.0);
        assert_eq!(ticks[1].label, "February");
    }

    #[test]
    fn bottom_axis_ticks_point_down_with_hanging_labels() {
        let ticks = linear_ticks(&ScaleLinear::new((0.0, 10.0), (0.0, 320.0)), 5);
        let marks = AxisSpec::bottom().marks(&ticks, PLOT);

        let rules = rules(&marks);
        // Domain line first, then one tick per value.
        assert_eq!(rules.len(), 1 + ticks.len());
        assert_eq!(rules[0].line.p0, Point::new(0.0, 220.0));
        assert_eq!(rules[0].line.p1, Point::new(320.0, 220.0));
        assert_eq!(rules[1].line.p0, Point::new(0.0, 220.0));
        assert_eq!(rules[1].line.p1, Point::new(0.0, 226.0));

        let labels = texts(&marks);
        assert_eq!(labels[0].pos, Point::new(0.0, 229.0));
        assert_eq!(labels[0].anchor, TextAnchor::Middle);
        assert_eq!(labels[0].baseline, TextBaseline::Hanging);
        assert!(labels.iter().all(|t| t.z_index == z_order::AXIS_LABELS));
    }

    #[test]
    fn left_axis_ticks_point_left_with_end_anchored_labels() {
        let ticks = linear_ticks(&y_scale(), 10);
        let marks = AxisSpec::left().marks(&ticks, PLOT);

        let rules = rules(&marks);
        assert_eq!(rules[0].line.p0, Point::new(0.0, 0.0));
        assert_eq!(rules[0].line.p1, Point::new(0.0, 220.0));
        assert_eq!(rules[1].line.p1, Point::new(-6.0, 220.0));

        let labels = texts(&marks);
        assert_eq!(labels[0].pos, Point::new(-9.0, 220.0));
        assert_eq!(labels[0].anchor, TextAnchor::End);
        assert_eq!(labels[0].baseline, TextBaseline::Middle);
    }

    #[test]
    fn toggles_suppress_parts() {
        let ticks = linear_ticks(&y_scale(), 10);
        let marks = AxisSpec::left()
            .with_domain(false)
            .with_ticks(false)
            .marks(&ticks, PLOT);
        assert!(rules(&marks).is_empty());
        // Labels move in to the tick padding alone.
        assert_eq!(texts(&marks)[0].pos.x, -3.0);

        let none = AxisSpec::left()
            .with_domain(false)
            .with_ticks(false)
            .with_labels(false)
            .marks(&ticks, PLOT);
        assert!(none.is_empty());
    }

    #[test]
    fn gridlines_span_the_plot() {
        let ticks = linear_ticks(&y_scale(), 10);
        let h = grid_horizontal(&ticks, PLOT, &GridStyle::default());
        assert_eq!(h.len(), ticks.len());
        for (m, t) in rules(&h).into_iter().zip(&ticks) {
            assert_eq!(m.line.p0, Point::new(0.0, t.position));
            assert_eq!(m.line.p1, Point::new(320.0, t.position));
            assert_eq!(m.z_index, z_order::GRID_LINES);
        }

        let v = grid_vertical(&ticks[..2], PLOT, &GridStyle::default());
        let v = rules(&v);
        assert_eq!(v[1].line.p0.y, 0.0);
        assert_eq!(v[1].line.p1.y, 220.0);
    }
}
