// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiny scale utilities.
//!
//! These types provide the coordinate mapping shared by every panel of a trellis:
//! a time scale for the x axis and a value scale for the y axis. Both are plain `Copy`
//! values; mapping has no side effects.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use chrono::{Datelike, NaiveDate};
use trellis_transforms::Dataset;

use crate::{Size, TrellisError, time};

/// A linear mapping from a continuous domain to a continuous range.
///
/// A degenerate domain (`d0 == d1`) maps every input to the middle of the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return 0.5 * (r0 + r1);
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return 0.5 * (d0 + d1);
        }
        let t = (y - r0) / denom;
        d0 + t * (d1 - d0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }

    /// Returns "nice" tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }

    /// Returns the spacing between the values produced by [`ScaleLinear::ticks`].
    pub fn tick_step(&self, count: usize) -> f64 {
        tick_increment(self.domain.0, self.domain.1, count)
    }
}

/// Specification for a linear scale (domain only, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to extend the domain outward to the nearest tick boundaries.
    pub nice: bool,
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
        }
    }

    /// Enables or disables nice-domain behavior.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Returns the effective domain after applying `nice` (if enabled).
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        if !self.nice {
            return self.domain;
        }
        let (d0, d1) = self.domain;
        let step = tick_increment(d0, d1, tick_count);
        if step == 0.0 || !step.is_finite() {
            return self.domain;
        }
        let lo = (d0.min(d1) / step).floor() * step;
        let hi = (d0.max(d1) / step).ceil() * step;
        if d0 <= d1 { (lo, hi) } else { (hi, lo) }
    }

    /// Instantiates a concrete scale using the `resolved_domain` (respecting `nice`).
    pub fn instantiate(&self, range: (f64, f64), tick_count: usize) -> ScaleLinear {
        ScaleLinear::new(self.resolved_domain(tick_count), range)
    }
}

/// Returns ticks on multiples of a 1/2/5 x 10^k step that lie inside `[min, max]`.
pub(crate) fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let step = tick_increment(min, max, count);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    // Work in integer multiples of the step to avoid accumulating float error.
    // Sub-unit steps are handled through their inverse, which is an exact integer.
    let inverse = step < 1.0;
    let s = if inverse { (1.0 / step).round() } else { step };
    let (start, stop) = if inverse {
        ((min * s).ceil(), (max * s).floor())
    } else {
        ((min / s).ceil(), (max / s).floor())
    };

    let n_f = stop - start;
    if !n_f.is_finite() || n_f < 0.0 {
        return Vec::new();
    }
    let n = {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    };
    (0..=n)
        .map(|i| {
            let k = start + i as f64;
            if inverse { k / s } else { k * s }
        })
        .collect()
}

/// Returns the 1/2/5 x 10^k tick step for roughly `count` ticks over `[min, max]`.
pub(crate) fn tick_increment(min: f64, max: f64, count: usize) -> f64 {
    let span = (max - min).abs();
    nice_step(span / count.max(1) as f64)
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    // sqrt(50), sqrt(10), sqrt(2): round to the nearest step on a log scale.
    const E10: f64 = 7.071_067_811_865_476;
    const E5: f64 = 3.162_277_660_168_379_5;
    const E2: f64 = 1.414_213_562_373_095_1;

    let power = step.log10().floor();
    let base = 10_f64.powi(exponent(power));
    let error = step / base;
    let nice = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    nice * base
}

fn exponent(power: f64) -> i32 {
    let p = power.clamp(-300.0, 300.0);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range")]
    let p = p as i32;
    p
}

/// Converts a date into a day count usable as a continuous domain value.
pub(crate) fn date_to_days(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Converts a (possibly fractional) day count back into the nearest date.
pub(crate) fn days_to_date(days: f64) -> Option<NaiveDate> {
    if !days.is_finite() {
        return None;
    }
    let d = days.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX));
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range")]
    let d = d as i32;
    NaiveDate::from_num_days_from_ce_opt(d)
}

/// A time scale mapping calendar dates linearly (by elapsed days) into a range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    domain: (NaiveDate, NaiveDate),
    inner: ScaleLinear,
}

impl ScaleTime {
    /// Creates a new time scale.
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        Self {
            domain,
            inner: ScaleLinear::new((date_to_days(domain.0), date_to_days(domain.1)), range),
        }
    }

    /// Maps a date into range space.
    pub fn map_date(&self, date: NaiveDate) -> f64 {
        self.inner.map(date_to_days(date))
    }

    /// Maps a day count (as produced for domain values) into range space.
    pub fn map(&self, days: f64) -> f64 {
        self.inner.map(days)
    }

    /// Maps a range value back to the nearest date.
    pub fn invert_date(&self, px: f64) -> Option<NaiveDate> {
        days_to_date(self.inner.invert(px))
    }

    /// Returns the configured date domain.
    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    /// Returns calendar-aligned ticks inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<NaiveDate> {
        time::nice_date_ticks(self.domain.0, self.domain.1, count)
    }
}

/// Scales shared by every panel of a trellis.
///
/// Both scales are built from extents of the *whole* dataset, so all panels show the
/// same date range and the same value range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SharedScales {
    /// Dates onto `[0, panel.width]`.
    pub x: ScaleTime,
    /// Values onto `[panel.height, 0]` (zero at the bottom).
    pub y: ScaleLinear,
    /// Panel content size the scales were built for.
    pub panel: Size,
}

impl SharedScales {
    /// Screen-space y of the area baseline: the bottom edge of the panel.
    ///
    /// This equals `y.map(0.0)` unless the value domain is degenerate.
    pub fn baseline(&self) -> f64 {
        self.panel.height
    }

    /// Extends the value domain outward to tick boundaries for roughly `tick_count` ticks.
    ///
    /// The reference chart leaves the domain at `[0, max]`; this is opt-in.
    pub fn with_nice_values(mut self, tick_count: usize) -> Self {
        self.y = ScaleLinearSpec::new(self.y.domain())
            .with_nice(true)
            .instantiate(self.y.range(), tick_count);
        self
    }
}

/// Builds the shared scales for a dataset and a panel content size.
///
/// - x domain: `[min date, max date]` over all points.
/// - y domain: `[0, max value]` over all points, so areas are anchored at zero.
///
/// Fails with [`TrellisError::EmptyDataset`] if the dataset has no points.
pub fn build_scales(dataset: &Dataset, panel: Size) -> Result<SharedScales, TrellisError> {
    let (d0, d1) = dataset.date_extent().ok_or(TrellisError::EmptyDataset)?;
    let (_, v_max) = dataset.value_extent().ok_or(TrellisError::EmptyDataset)?;
    Ok(SharedScales {
        x: ScaleTime::new((d0, d1), (0.0, panel.width)),
        y: ScaleLinear::new((0.0, v_max), (panel.height, 0.0)),
        panel,
    })
}
