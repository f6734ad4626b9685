// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderer-agnostic output marks.
//!
//! A trellis is ultimately a flat list of [`Mark`]s: filled rectangles, paths, straight
//! rules and unshaped text. Renderers (SVG, a GPU scene, a test harness) consume them in
//! order; none of them needs to know about scales or panels.

extern crate alloc;

use alloc::string::String;

use kurbo::{Affine, BezPath, Line, Point, Rect};
use peniko::Brush;

use crate::axis::StrokeStyle;
use crate::z_order;

/// Horizontal text anchor, matching SVG's `text-anchor`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// The text starts at the anchor point.
    #[default]
    Start,
    /// The text is centered on the anchor point.
    Middle,
    /// The text ends at the anchor point.
    End,
}

/// Vertical text alignment, matching SVG's `dominant-baseline`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The alphabetic baseline sits on the anchor point.
    #[default]
    Alphabetic,
    /// The text is vertically centered on the anchor point.
    Middle,
    /// The text hangs below the anchor point.
    Hanging,
}

/// A filled axis-aligned rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Rectangle geometry.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl RectMark {
    /// Creates a filled rectangle drawn as a plot background.
    pub fn new(rect: Rect, fill: impl Into<Brush>) -> Self {
        Self {
            rect,
            fill: fill.into(),
            z_index: z_order::PLOT_BACKGROUND,
        }
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }
}

/// A filled path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMark {
    /// Path geometry.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl PathMark {
    /// Creates a filled path on the series layer.
    pub fn filled(path: BezPath, fill: impl Into<Brush>) -> Self {
        Self {
            path,
            fill: fill.into(),
            z_index: z_order::SERIES_FILL,
        }
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }
}

/// A straight stroked line segment (domain lines, ticks, gridlines).
#[derive(Clone, Debug, PartialEq)]
pub struct RuleMark {
    /// Segment geometry.
    pub line: Line,
    /// Stroke style.
    pub stroke: StrokeStyle,
    /// Rendering order hint.
    pub z_index: i32,
}

impl RuleMark {
    /// Creates a rule from `p0` to `p1`.
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>, stroke: StrokeStyle) -> Self {
        Self {
            line: Line::new(p0, p1),
            stroke,
            z_index: z_order::AXIS_RULES,
        }
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }
}

/// A run of unshaped text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in surface coordinates.
    pub font_size: f64,
    /// Rotation around `pos`, in degrees.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl TextMark {
    /// Creates a new text mark with default styling.
    pub fn new(pos: impl Into<Point>, text: impl Into<String>) -> Self {
        Self {
            pos: pos.into(),
            text: text.into(),
            font_size: 12.0,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            fill: Brush::default(),
            z_index: z_order::TITLES,
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the text anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the text baseline.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the text rotation angle (degrees).
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }
}

/// A single drawable primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum Mark {
    /// A filled rectangle.
    Rect(RectMark),
    /// A filled path.
    Path(PathMark),
    /// A stroked line segment.
    Rule(RuleMark),
    /// Unshaped text.
    Text(TextMark),
}

impl Mark {
    /// Rendering order hint; lower values paint first.
    pub fn z_index(&self) -> i32 {
        match self {
            Self::Rect(m) => m.z_index,
            Self::Path(m) => m.z_index,
            Self::Rule(m) => m.z_index,
            Self::Text(m) => m.z_index,
        }
    }

    /// Returns this mark with its geometry mapped through `affine`.
    ///
    /// Text keeps its angle and font size; only its anchor point moves. Rectangles become
    /// the bounding box of the transformed rectangle, so this is exact for translations
    /// and scales, which is all the trellis uses.
    pub fn transformed(&self, affine: Affine) -> Self {
        match self {
            Self::Rect(m) => Self::Rect(RectMark {
                rect: affine.transform_rect_bbox(m.rect),
                ..m.clone()
            }),
            Self::Path(m) => {
                let mut path = m.path.clone();
                path.apply_affine(affine);
                Self::Path(PathMark { path, ..m.clone() })
            }
            Self::Rule(m) => Self::Rule(RuleMark {
                line: Line::new(affine * m.line.p0, affine * m.line.p1),
                ..m.clone()
            }),
            Self::Text(m) => Self::Text(TextMark {
                pos: affine * m.pos,
                ..m.clone()
            }),
        }
    }
}

impl From<RectMark> for Mark {
    fn from(value: RectMark) -> Self {
        Self::Rect(value)
    }
}

impl From<PathMark> for Mark {
    fn from(value: PathMark) -> Self {
        Self::Path(value)
    }
}

impl From<RuleMark> for Mark {
    fn from(value: RuleMark) -> Self {
        Self::Rule(value)
    }
}

impl From<TextMark> for Mark {
    fn from(value: TextMark) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::{Shape, Vec2};
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn translation_moves_every_kind_of_mark() {
        let t = Affine::translate(Vec2::new(60.0, 20.0));

        let rect: Mark = RectMark::new(Rect::new(0.0, 0.0, 320.0, 220.0), css::WHITE).into();
        let Mark::Rect(r) = rect.transformed(t) else {
            panic!("expected a rect");
        };
        assert_eq!(r.rect, Rect::new(60.0, 20.0, 380.0, 240.0));

        let rule: Mark = RuleMark::new((0.0, 220.0), (320.0, 220.0), StrokeStyle::default()).into();
        let Mark::Rule(l) = rule.transformed(t) else {
            panic!("expected a rule");
        };
        assert_eq!(l.line.p0, Point::new(60.0, 240.0));
        assert_eq!(l.line.p1, Point::new(380.0, 240.0));

        let text: Mark = TextMark::new((-40.0, 110.0), "Stock Price (USD)")
            .with_angle(-90.0)
            .into();
        let Mark::Text(tx) = text.transformed(t) else {
            panic!("expected text");
        };
        assert_eq!(tx.pos, Point::new(20.0, 130.0));
        assert_eq!(tx.angle, -90.0);

        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 10.0));
        let p: Mark = PathMark::filled(path, css::RED).into();
        let Mark::Path(pm) = p.transformed(t) else {
            panic!("expected a path");
        };
        assert_eq!(pm.path.bounding_box(), Rect::new(60.0, 20.0, 70.0, 30.0));
    }

    #[test]
    fn constructors_pick_layer_defaults() {
        assert_eq!(
            Mark::from(RectMark::new(Rect::ZERO, css::WHITE)).z_index(),
            z_order::PLOT_BACKGROUND
        );
        assert_eq!(
            Mark::from(PathMark::filled(BezPath::new(), css::RED)).z_index(),
            z_order::SERIES_FILL
        );
        assert_eq!(
            Mark::from(TextMark::new((0.0, 0.0), "x").with_z_index(3)).z_index(),
            3
        );
    }
}
