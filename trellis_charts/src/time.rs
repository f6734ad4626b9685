// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar tick generation and formatting helpers.
//!
//! Time is modelled as calendar dates ([`NaiveDate`]). Ticks land on calendar boundaries
//! (days, Sundays, month starts, quarter starts, year starts), chosen so that roughly
//! `count` of them cover the domain.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::scale::tick_increment;

/// A calendar interval used to space date ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DateInterval {
    /// Every `n`-th day of the month, starting at the 1st.
    Day(u32),
    /// Every Sunday.
    Week,
    /// Every `n`-th month, starting at January.
    Month(u32),
    /// Every year divisible by `n`.
    Year(u32),
}

// Nominal durations in days, used only to pick an interval.
const CANDIDATES: &[(DateInterval, f64)] = &[
    (DateInterval::Day(1), 1.0),
    (DateInterval::Day(2), 2.0),
    (DateInterval::Week, 7.0),
    (DateInterval::Month(1), 30.0),
    (DateInterval::Month(3), 90.0),
    (DateInterval::Year(1), 365.0),
];

impl DateInterval {
    /// Picks the interval whose nominal duration is closest to `span_days / count`.
    pub fn for_span(span_days: f64, count: usize) -> Self {
        let target = span_days.abs() / count.max(1) as f64;
        let i = CANDIDATES.partition_point(|&(_, d)| d <= target);
        if i == 0 {
            return Self::Day(1);
        }
        if i == CANDIDATES.len() {
            let years = tick_increment(0.0, span_days.abs() / 365.0, count).max(1.0);
            #[allow(clippy::cast_possible_truncation, reason = "clamped to the u32 range")]
            let years = years.min(f64::from(u32::MAX)) as u32;
            return Self::Year(years);
        }
        let (lo, lo_d) = CANDIDATES[i - 1];
        let (hi, hi_d) = CANDIDATES[i];
        if target / lo_d < hi_d / target { lo } else { hi }
    }

    /// Returns `true` if `date` lies on a boundary of this interval.
    pub fn is_boundary(&self, date: NaiveDate) -> bool {
        match *self {
            Self::Day(n) => (date.day() - 1) % n.max(1) == 0,
            Self::Week => date.weekday() == Weekday::Sun,
            Self::Month(n) => date.day() == 1 && date.month0() % n.max(1) == 0,
            Self::Year(n) => date.ordinal() == 1 && date.year().rem_euclid(n.max(1) as i32) == 0,
        }
    }

    /// Returns the first boundary at or after `date`.
    fn ceil(&self, date: NaiveDate) -> Option<NaiveDate> {
        let mut d = match *self {
            Self::Day(_) | Self::Week => date,
            Self::Month(_) => first_of_month_at_or_after(date)?,
            Self::Year(_) => first_of_year_at_or_after(date)?,
        };
        // Bounded: a boundary is at most a year away for every interval step we walk here.
        for _ in 0..400 {
            if self.is_boundary(d) {
                return Some(d);
            }
            d = match *self {
                Self::Day(_) | Self::Week => d.checked_add_days(Days::new(1))?,
                Self::Month(_) => d.checked_add_months(Months::new(1))?,
                Self::Year(_) => NaiveDate::from_ymd_opt(d.year().checked_add(1)?, 1, 1)?,
            };
        }
        match *self {
            // Multi-year steps can be far apart; jump straight to the next multiple.
            Self::Year(n) => {
                let n = n.max(1) as i32;
                let y = date.year().div_euclid(n).checked_add(1)?.checked_mul(n)?;
                NaiveDate::from_ymd_opt(y, 1, 1)
            }
            _ => None,
        }
    }

    /// Returns the boundary following `date` (which must itself be a boundary).
    fn next(&self, date: NaiveDate) -> Option<NaiveDate> {
        match *self {
            Self::Day(_) => {
                let mut d = date.checked_add_days(Days::new(1))?;
                while !self.is_boundary(d) {
                    d = d.checked_add_days(Days::new(1))?;
                }
                Some(d)
            }
            Self::Week => date.checked_add_days(Days::new(7)),
            Self::Month(n) => date.checked_add_months(Months::new(n.max(1))),
            Self::Year(n) => {
                NaiveDate::from_ymd_opt(date.year().checked_add(n.max(1) as i32)?, 1, 1)
            }
        }
    }
}

fn first_of_month_at_or_after(date: NaiveDate) -> Option<NaiveDate> {
    if date.day() == 1 {
        return Some(date);
    }
    date.with_day(1)?.checked_add_months(Months::new(1))
}

fn first_of_year_at_or_after(date: NaiveDate) -> Option<NaiveDate> {
    if date.ordinal() == 1 {
        return Some(date);
    }
    NaiveDate::from_ymd_opt(date.year().checked_add(1)?, 1, 1)
}

/// Returns calendar-aligned tick dates covering `[min, max]`.
///
/// Only boundaries inside the domain are returned; the endpoints themselves are included
/// only when they fall on a boundary. A degenerate domain yields the single date.
pub fn nice_date_ticks(mut min: NaiveDate, mut max: NaiveDate, count: usize) -> Vec<NaiveDate> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = (max - min).num_days() as f64;
    let interval = DateInterval::for_span(span, count);

    let mut out = Vec::new();
    let mut t = interval.ceil(min);
    while let Some(d) = t {
        if d > max {
            break;
        }
        out.push(d);
        t = interval.next(d);
    }
    out
}

/// Formats a tick date the way multi-scale time axes usually do.
///
/// - January 1st: the year (`2020`)
/// - other month starts: the full month name (`March`)
/// - Sundays: abbreviated month and day (`Mar 08`)
/// - other days: abbreviated weekday and day (`Tue 10`)
pub fn format_date_tick(date: NaiveDate) -> String {
    let fmt = if date.ordinal() == 1 {
        "%Y"
    } else if date.day() == 1 {
        "%B"
    } else if date.weekday() == Weekday::Sun {
        "%b %d"
    } else {
        "%a %d"
    };
    date.format(fmt).to_string()
}
