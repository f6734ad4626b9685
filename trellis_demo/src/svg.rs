// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG serialization for trellis marks.

use kurbo::Rect;
use peniko::Brush;
use trellis_charts::{Mark, Size, StrokeStyle, TextAnchor, TextBaseline, TextMark};

/// Serializes `marks` (already in paint order) into an SVG document of `surface` size.
///
/// The view box grows past the surface when marks (usually axis captions) overhang it.
pub(crate) fn to_svg_string(marks: &[Mark], surface: Size) -> String {
    let surface_rect = Rect::new(0.0, 0.0, surface.width, surface.height);
    let view_box = marks
        .iter()
        .filter_map(mark_bounds)
        .fold(surface_rect, |acc, b| acc.union(b));

    let mut out = String::new();
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    out.push_str(&format!(
        "viewBox=\"{} {} {} {}\" width=\"{}\" height=\"{}\" font-family=\"sans-serif\">\n",
        view_box.x0,
        view_box.y0,
        view_box.width(),
        view_box.height(),
        view_box.width(),
        view_box.height()
    ));

    for mark in marks {
        match mark {
            Mark::Rect(r) => {
                out.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    r.rect.x0,
                    r.rect.y0,
                    r.rect.width(),
                    r.rect.height(),
                ));
                write_paint_attr(&mut out, "fill", &r.fill);
                out.push_str("/>\n");
            }
            Mark::Path(p) => {
                out.push_str(&format!(r#"<path d="{}""#, p.path.to_svg()));
                write_paint_attr(&mut out, "fill", &p.fill);
                out.push_str("/>\n");
            }
            Mark::Rule(l) => {
                out.push_str(&format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                    l.line.p0.x, l.line.p0.y, l.line.p1.x, l.line.p1.y
                ));
                write_stroke_attrs(&mut out, &l.stroke);
                out.push_str("/>\n");
            }
            Mark::Text(t) => {
                let baseline = match t.baseline {
                    TextBaseline::Middle => "middle",
                    TextBaseline::Alphabetic => "alphabetic",
                    TextBaseline::Hanging => "hanging",
                };
                out.push_str(&format!(
                    r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                    t.pos.x, t.pos.y, t.font_size, baseline
                ));
                if t.angle != 0.0 {
                    out.push_str(&format!(
                        r#" transform="rotate({} {} {})""#,
                        t.angle, t.pos.x, t.pos.y
                    ));
                }
                out.push_str(match t.anchor {
                    TextAnchor::Start => r#" text-anchor="start""#,
                    TextAnchor::Middle => r#" text-anchor="middle""#,
                    TextAnchor::End => r#" text-anchor="end""#,
                });
                write_paint_attr(&mut out, "fill", &t.fill);
                out.push('>');
                out.push_str(&escape_xml(&t.text));
                out.push_str("</text>\n");
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

fn mark_bounds(mark: &Mark) -> Option<Rect> {
    match mark {
        Mark::Rect(r) => Some(r.rect),
        Mark::Path(p) => {
            if p.path.elements().is_empty() {
                return None;
            }
            Some(kurbo::Shape::bounding_box(&p.path))
        }
        Mark::Rule(l) => Some(Rect::from_points(l.line.p0, l.line.p1)),
        Mark::Text(t) => Some(estimate_text_bounds(t)),
    }
}

/// Rough text bounds for the view box: ~0.6em per glyph, rotation by quarter turns only.
fn estimate_text_bounds(t: &TextMark) -> Rect {
    let width = 0.6 * t.font_size * t.text.chars().count() as f64;
    let half_height = 0.5 * t.font_size;
    let (x, y) = (t.pos.x, t.pos.y);
    let y_midline = match t.baseline {
        TextBaseline::Middle => y,
        TextBaseline::Alphabetic => y - 0.3 * t.font_size,
        TextBaseline::Hanging => y + 0.3 * t.font_size,
    };
    let (x0, x1) = match t.anchor {
        TextAnchor::Start => (x, x + width),
        TextAnchor::Middle => (x - width / 2.0, x + width / 2.0),
        TextAnchor::End => (x - width, x),
    };
    let r = Rect::new(x0, y_midline - half_height, x1, y_midline + half_height);
    if (t.angle.abs() - 90.0).abs() < 1e-9 {
        // Rotated a quarter turn around the anchor: swap extents around (x, y).
        let dx = (r.y1 - y).abs().max((r.y0 - y).abs());
        let dy = (r.x1 - x).abs().max((r.x0 - x).abs());
        return Rect::new(x - dx, y - dy, x + dx, y + dy);
    }
    r
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn write_stroke_attrs(out: &mut String, stroke: &StrokeStyle) {
    write_paint_attr(out, "stroke", &stroke.brush);
    out.push_str(&format!(r#" stroke-width="{}""#, stroke.stroke_width));
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use kurbo::BezPath;
    use peniko::color::palette::css;
    use trellis_charts::{PathMark, RectMark, RuleMark};

    use super::*;

    #[test]
    fn writes_each_mark_kind() {
        let mut path = BezPath::new();
        path.move_to((0.0, 10.0));
        path.line_to((5.0, 0.0));
        path.close_path();
        let marks = [
            Mark::from(RectMark::new(Rect::new(1.0, 2.0, 11.0, 22.0), css::WHITE)),
            Mark::from(PathMark::filled(path, css::RED)),
            Mark::from(RuleMark::new((0.0, 0.0), (10.0, 0.0), StrokeStyle::default())),
            Mark::from(TextMark::new((50.0, 25.0), "A&B").with_anchor(TextAnchor::Middle)),
        ];
        let svg = to_svg_string(&marks, Size::new(100.0, 50.0));

        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"viewBox="0 0 100 50""#), "{svg}");
        assert!(svg.contains(r##"<rect x="1" y="2" width="10" height="20" fill="#ffffff"/>"##));
        assert!(svg.contains(r##"fill="#ff0000""##));
        assert!(svg.contains(r##"<line x1="0" y1="0" x2="10" y2="0" stroke="#000000""##));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(">A&amp;B</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn overhanging_text_grows_the_view_box() {
        let marks = [Mark::from(
            TextMark::new((-40.0, 25.0), "Stock Price (USD)")
                .with_anchor(TextAnchor::Middle)
                .with_angle(-90.0),
        )];
        let svg = to_svg_string(&marks, Size::new(100.0, 50.0));
        assert!(svg.contains(r#"transform="rotate(-90 -40 25)""#), "{svg}");
        assert!(!svg.contains(r#"viewBox="0 0 100 50""#), "{svg}");
    }

    #[test]
    fn translucent_paint_writes_opacity() {
        let (value, opacity) = svg_paint(&Brush::Solid(css::BLACK.with_alpha(0.5)));
        assert_eq!(value, "#000000");
        assert!(opacity.is_some());
    }
}
