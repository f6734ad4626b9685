// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned dataset representation consumed by the chart layer.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chrono::NaiveDate;

/// Errors returned when admitting points into a [`Dataset`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    /// A point carried a `NaN` or infinite value.
    #[error("non-finite value {value} for {category} on {date}")]
    NonFiniteValue {
        /// Category of the rejected point.
        category: String,
        /// Date of the rejected point.
        date: NaiveDate,
        /// The offending value.
        value: f64,
    },
}

/// One observation: a category, a calendar date and a value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataPoint {
    /// Series identifier (for stock data, the ticker).
    pub category: String,
    /// Calendar date of the observation.
    pub date: NaiveDate,
    /// Observed value.
    pub value: f64,
}

impl DataPoint {
    /// Creates a new point.
    pub fn new(category: impl Into<String>, date: NaiveDate, value: f64) -> Self {
        Self {
            category: category.into(),
            date,
            value,
        }
    }
}

/// An ordered, validated sequence of [`DataPoint`]s.
///
/// Insertion order is preserved. It does not affect extents or scales, but it is the
/// basis for first-seen category ordering, so it keeps layouts reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    points: Vec<DataPoint>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dataset from points, rejecting the first non-finite value.
    pub fn from_points(points: impl IntoIterator<Item = DataPoint>) -> Result<Self, DatasetError> {
        let mut out = Self::new();
        for p in points {
            out.push(p)?;
        }
        Ok(out)
    }

    /// Appends a point.
    pub fn push(&mut self, point: DataPoint) -> Result<(), DatasetError> {
        if !point.value.is_finite() {
            return Err(DatasetError::NonFiniteValue {
                category: point.category,
                date: point.date,
                value: point.value,
            });
        }
        self.points.push(point);
        Ok(())
    }

    /// Returns the points in insertion order.
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Returns the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the dataset holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `(min, max)` over all dates, or `None` for an empty dataset.
    pub fn date_extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut it = self.points.iter().map(|p| p.date);
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Returns `(min, max)` over all values, or `None` for an empty dataset.
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        let mut it = self.points.iter().map(|p| p.value);
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DataPoint;
    type IntoIter = core::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
