// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouping and ordering transforms.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::table::{DataPoint, Dataset};

/// How the distinct categories of a dataset are ordered.
///
/// The order decides which grid cell each category lands in, so it must be
/// deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CategoryOrder {
    /// Order of first appearance in the dataset (what `d3.group` yields).
    #[default]
    FirstSeen,
    /// Byte-wise lexicographic order of the category names.
    Lexicographic,
}

/// Sorting order for [`sort_by_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

/// A dataset partitioned by category.
///
/// Groups iterate in the [`CategoryOrder`] used to build them. Within a group, points
/// keep dataset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedSeries {
    groups: Vec<(String, Vec<DataPoint>)>,
    index: HashMap<String, usize>,
}

impl GroupedSeries {
    /// Groups `dataset` by category.
    pub fn from_dataset(dataset: &Dataset, order: CategoryOrder) -> Self {
        let mut groups: Vec<(String, Vec<DataPoint>)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for p in dataset {
            match index.entry(p.category.clone()) {
                Entry::Occupied(e) => groups[*e.get()].1.push(p.clone()),
                Entry::Vacant(e) => {
                    e.insert(groups.len());
                    groups.push((p.category.clone(), alloc::vec![p.clone()]));
                }
            }
        }

        if order == CategoryOrder::Lexicographic {
            groups.sort_by(|a, b| a.0.cmp(&b.0));
            for (i, (key, _)) in groups.iter().enumerate() {
                index.insert(key.clone(), i);
            }
        }

        Self { groups, index }
    }

    /// Returns the number of distinct categories.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the category names in group order.
    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(|(k, _)| k.as_str())
    }

    /// Returns the points of `category`, if present.
    pub fn get(&self, category: &str) -> Option<&[DataPoint]> {
        let &i = self.index.get(category)?;
        self.groups.get(i).map(|(_, pts)| pts.as_slice())
    }

    /// Returns the position of `category` in group order.
    pub fn position(&self, category: &str) -> Option<usize> {
        self.index.get(category).copied()
    }

    /// Iterates `(category, points)` in group order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DataPoint])> + '_ {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Returns a copy of `points` sorted by date.
///
/// The sort is stable: points sharing a date keep their relative input order.
pub fn sort_by_date(points: &[DataPoint], order: SortOrder) -> Vec<DataPoint> {
    let mut out = points.to_vec();
    match order {
        SortOrder::Asc => out.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::Desc => out.sort_by(|a, b| b.date.cmp(&a.date)),
    }
    out
}
