// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::string::String;
use alloc::vec::Vec;

use chrono::NaiveDate;
use kurbo::{Point, Rect, Shape};
use peniko::Brush;
use trellis_transforms::{CategoryOrder, DataPoint, Dataset};

use crate::{
    ColorEncoding, ColorSource, FallbackPolicy, GridShape, Mark, Padding, PanelStyle, Size,
    TrellisError, TrellisSpec, assemble_trellis, z_order,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Two years of month-start prices for the four reference companies.
fn stocks() -> Dataset {
    let mut ds = Dataset::new();
    let companies = [
        ("AAPL", 75.0),
        ("GOOGL", 1400.0),
        ("META", 210.0),
        ("MSFT", 160.0),
    ];
    for (name, base) in companies {
        for i in 0..24_u32 {
            let date = day(2020 + (i / 12) as i32, i % 12 + 1, 1);
            ds.push(DataPoint::new(name, date, base + f64::from(i) * 3.0))
                .unwrap();
        }
    }
    ds
}

fn categories(n: usize) -> Dataset {
    Dataset::from_points((0..n).map(|i| {
        DataPoint::new(
            alloc::format!("C{i}"),
            day(2020, 1, 1 + i as u32),
            10.0 * (i + 1) as f64,
        )
    }))
    .unwrap()
}

#[test]
fn reference_chart_places_four_panels() {
    let trellis = assemble_trellis(&stocks(), &TrellisSpec::default()).unwrap();

    assert_eq!(trellis.view.panel, Size::new(320.0, 220.0));
    let placed: Vec<(&str, usize, usize, f64, f64)> = trellis
        .panels
        .iter()
        .map(|p| {
            (
                p.category.as_str(),
                p.row,
                p.col,
                p.geometry.origin_x,
                p.geometry.origin_y,
            )
        })
        .collect();
    assert_eq!(
        placed,
        [
            ("AAPL", 0, 0, 60.0, 20.0),
            ("GOOGL", 0, 1, 460.0, 20.0),
            ("META", 1, 0, 60.0, 320.0),
            ("MSFT", 1, 1, 460.0, 320.0),
        ]
    );
    assert!(
        trellis
            .panels
            .iter()
            .all(|p| p.color_source == ColorSource::Mapped)
    );
    assert_eq!(
        trellis.panels[3].color.to_rgba8().to_u8_array(),
        [255, 149, 0, 255]
    );
}

#[test]
fn scales_are_shared_across_panels() {
    let trellis = assemble_trellis(&stocks(), &TrellisSpec::default()).unwrap();
    let s = trellis.scales;
    assert_eq!(s.x.domain(), (day(2020, 1, 1), day(2021, 12, 1)));
    assert_eq!(s.y.domain(), (0.0, 1400.0 + 23.0 * 3.0));

    // Every series starts at x = 0 and ends at x = w because all share the date extent.
    for p in &trellis.panels {
        assert_eq!(p.series.outline.first().map(|pt| pt.x), Some(0.0));
        let last = p.series.outline.last().unwrap().x;
        assert!((last - 320.0).abs() < 1e-9);
    }
    // Only the tallest series reaches the top of its panel.
    let tops: Vec<f64> = trellis
        .panels
        .iter()
        .map(|p| p.series.area.bounding_box().y0)
        .collect();
    assert!(tops[1].abs() < 1e-9);
    assert!(tops[0] > 150.0);
}

#[test]
fn five_categories_overflow_a_two_by_two_grid() {
    let err = assemble_trellis(&categories(5), &TrellisSpec::default()).unwrap_err();
    assert_eq!(
        err,
        TrellisError::LayoutOverflow {
            categories: 5,
            capacity: 4
        }
    );

    let wide = TrellisSpec::default().with_grid(GridShape::new(2, 3));
    let trellis = assemble_trellis(&categories(5), &wide).unwrap();
    assert_eq!(trellis.panels.len(), 5);
    assert_eq!(trellis.view.cells.len(), 6);
}

#[test]
fn validation_order_is_grid_then_data_then_fit() {
    let bad_grid = TrellisSpec::default().with_padding(Padding::new(200.0, 0.0, 200.0, 0.0));
    assert!(matches!(
        assemble_trellis(&Dataset::new(), &bad_grid),
        Err(TrellisError::InvalidLayout { .. })
    ));
    assert_eq!(
        assemble_trellis(&Dataset::new(), &TrellisSpec::default()),
        Err(TrellisError::EmptyDataset)
    );
    let huge = TrellisSpec::default()
        .with_grid(GridShape::new(usize::MAX, 2))
        .with_padding(Padding::new(0.0, 0.0, 0.0, 0.0));
    assert!(matches!(
        assemble_trellis(&categories(2), &huge),
        Err(TrellisError::InvalidLayout { .. })
    ));
    let one_cell = TrellisSpec::default().with_grid(GridShape::new(1, 1));
    assert!(matches!(
        assemble_trellis(&categories(2), &one_cell),
        Err(TrellisError::LayoutOverflow { .. })
    ));
}

#[test]
fn assembly_is_idempotent() {
    let spec = TrellisSpec::default();
    let a = assemble_trellis(&stocks(), &spec).unwrap();
    let b = assemble_trellis(&stocks(), &spec).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.marks(), b.marks());
}

#[test]
fn unmapped_category_gets_a_fallback_color() {
    let mut ds = stocks();
    ds.push(DataPoint::new("TSLA", day(2021, 6, 1), 600.0)).unwrap();
    let spec = TrellisSpec::default().with_grid(GridShape::new(2, 3));
    let trellis = assemble_trellis(&ds, &spec).unwrap();
    let tsla = trellis.panel("TSLA").unwrap();
    assert_eq!(tsla.color_source, ColorSource::Fallback);
    assert_eq!(Some(tsla.color), spec.colors.get("AAPL"));

    let gray = peniko::Color::from_rgba8(128, 128, 128, 255);
    let fixed = spec.with_colors(
        ColorEncoding::stock_default().with_fallback(FallbackPolicy::Fixed(gray)),
    );
    let trellis = assemble_trellis(&ds, &fixed).unwrap();
    assert_eq!(trellis.panel("TSLA").unwrap().color, gray);
}

#[test]
fn single_point_category_draws_a_sliver() {
    let mut ds = Dataset::new();
    ds.push(DataPoint::new("AAPL", day(2020, 1, 1), 100.0)).unwrap();
    ds.push(DataPoint::new("AAPL", day(2020, 12, 31), 200.0)).unwrap();
    ds.push(DataPoint::new("TSLA", day(2020, 7, 1), 50.0)).unwrap();
    let trellis = assemble_trellis(&ds, &TrellisSpec::default()).unwrap();
    let tsla = trellis.panel("TSLA").unwrap();
    let bbox = tsla.series.area.bounding_box();
    assert_eq!(bbox.width(), 0.0);
    assert_eq!(bbox.y1, 220.0);
    assert!(!tsla.series.x_axis.is_empty());
}

#[test]
fn unsorted_input_produces_monotonic_area() {
    let ds = Dataset::from_points([
        DataPoint::new("AAPL", day(2020, 5, 1), 3.0),
        DataPoint::new("AAPL", day(2020, 1, 1), 1.0),
        DataPoint::new("AAPL", day(2020, 9, 1), 2.0),
        DataPoint::new("AAPL", day(2020, 3, 1), 5.0),
    ])
    .unwrap();
    let trellis = assemble_trellis(&ds, &TrellisSpec::default()).unwrap();
    let outline = &trellis.panels[0].series.outline;
    assert!(outline.windows(2).all(|w| w[0].x <= w[1].x));
}

#[test]
fn category_order_controls_cell_assignment() {
    let ds = Dataset::from_points([
        DataPoint::new("MSFT", day(2020, 1, 1), 1.0),
        DataPoint::new("AAPL", day(2020, 1, 1), 2.0),
    ])
    .unwrap();
    let first_seen = assemble_trellis(&ds, &TrellisSpec::default()).unwrap();
    assert_eq!(first_seen.panels[0].category, "MSFT");

    let lex = TrellisSpec::default().with_category_order(CategoryOrder::Lexicographic);
    let sorted = assemble_trellis(&ds, &lex).unwrap();
    assert_eq!(sorted.panels[0].category, "AAPL");
    assert_eq!(sorted.panels[0].geometry.origin_x, 60.0);
}

#[test]
fn degenerate_domains_map_to_the_panel_middle() {
    let ds = Dataset::from_points([
        DataPoint::new("AAPL", day(2020, 1, 1), 0.0),
        DataPoint::new("MSFT", day(2020, 1, 1), 0.0),
    ])
    .unwrap();
    let trellis = assemble_trellis(&ds, &TrellisSpec::default()).unwrap();
    let pt = trellis.panels[0].series.outline[0];
    assert_eq!(pt, Point::new(160.0, 110.0));
}

#[test]
fn marks_are_layered_and_in_surface_space() {
    let trellis = assemble_trellis(&stocks(), &TrellisSpec::default()).unwrap();
    let marks = trellis.marks();

    let z: Vec<i32> = marks.iter().map(Mark::z_index).collect();
    assert!(z.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(z.first().copied(), Some(z_order::PLOT_BACKGROUND));

    let backgrounds: Vec<Rect> = marks
        .iter()
        .filter_map(|m| match m {
            Mark::Rect(r) => Some(r.rect),
            _ => None,
        })
        .collect();
    assert_eq!(
        backgrounds,
        [
            Rect::new(60.0, 20.0, 380.0, 240.0),
            Rect::new(460.0, 20.0, 780.0, 240.0),
            Rect::new(60.0, 320.0, 380.0, 540.0),
            Rect::new(460.0, 320.0, 780.0, 540.0),
        ]
    );

    let labels: Vec<(String, Point, Brush)> = marks
        .iter()
        .filter_map(|m| match m {
            Mark::Text(t) if t.z_index == z_order::TITLES => {
                Some((t.text.clone(), t.pos, t.fill.clone()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(labels.len(), 4);
    assert_eq!(labels[0].0, "AAPL");
    assert_eq!(labels[0].1, Point::new(220.0, 130.0));
    assert_eq!(labels[0].2, Brush::Solid(trellis.panels[0].color));
}

#[test]
fn empty_cells_still_get_a_background() {
    let spec = TrellisSpec::default();
    let trellis = assemble_trellis(&categories(3), &spec).unwrap();
    let rects = trellis
        .marks()
        .into_iter()
        .filter(|m| matches!(m, Mark::Rect(_)))
        .count();
    assert_eq!(rects, 4);

    let bare = spec.with_style(PanelStyle::default().with_background(None));
    let trellis = assemble_trellis(&categories(3), &bare).unwrap();
    assert!(!trellis.marks().iter().any(|m| matches!(m, Mark::Rect(_))));
}

#[test]
fn nice_values_extend_the_value_domain() {
    let spec = TrellisSpec::default().with_nice_values(true);
    let trellis = assemble_trellis(&stocks(), &spec).unwrap();
    // Max is 1469; ten ticks step by 200, so the domain rounds up to 1600.
    assert_eq!(trellis.scales.y.domain(), (0.0, 1600.0));
}

#[test]
fn each_panel_fills_one_area_in_its_color() {
    let trellis = assemble_trellis(&stocks(), &TrellisSpec::default()).unwrap();
    for panel in &trellis.panels {
        let paths: Vec<Mark> = panel
            .local_marks()
            .into_iter()
            .filter(|m| matches!(m, Mark::Path(_)))
            .collect();
        assert_eq!(paths.len(), 1);
        let Mark::Path(area) = &paths[0] else {
            unreachable!();
        };
        assert_eq!(area.fill, Brush::Solid(panel.color));
        assert_eq!(area.z_index, z_order::SERIES_FILL);
        assert_eq!(area.path, panel.series.area);
    }
}
