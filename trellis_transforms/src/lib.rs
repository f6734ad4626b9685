// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dataset model and grouping transforms for trellis charts.
//!
//! This crate provides:
//! - a validated, insertion-ordered [`Dataset`] of dated observations, and
//! - the grouping/ordering transforms the chart layer needs to split a dataset into one
//!   series per category.
//!
//! Parsing (CSV, currency strings, date formats) happens upstream; everything here
//! works on already-typed values.

#![no_std]

extern crate alloc;

mod table;
mod transform;

pub use table::{DataPoint, Dataset, DatasetError};
pub use transform::{CategoryOrder, GroupedSeries, SortOrder, sort_by_date};
