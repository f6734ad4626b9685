// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Categorical color encoding.
//!
//! A [`ColorEncoding`] is an ordered `category -> color` table. Categories missing from the
//! table are not an error: they get a color from the [`FallbackPolicy`], and the returned
//! [`ColorAssignment`] records that this happened.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use peniko::Color;

/// Tableau 10, used when the table has no entries to cycle through.
const BUILTIN_PALETTE: [Color; 10] = [
    Color::from_rgba8(0x4e, 0x79, 0xa7, 0xff),
    Color::from_rgba8(0xf2, 0x8e, 0x2c, 0xff),
    Color::from_rgba8(0xe1, 0x57, 0x59, 0xff),
    Color::from_rgba8(0x76, 0xb7, 0xb2, 0xff),
    Color::from_rgba8(0x59, 0xa1, 0x4f, 0xff),
    Color::from_rgba8(0xed, 0xc9, 0x49, 0xff),
    Color::from_rgba8(0xaf, 0x7a, 0xa1, 0xff),
    Color::from_rgba8(0xff, 0x9d, 0xa7, 0xff),
    Color::from_rgba8(0x9c, 0x75, 0x5f, 0xff),
    Color::from_rgba8(0xba, 0xb0, 0xab, 0xff),
];

/// What an unmapped category receives.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum FallbackPolicy {
    /// Extend the table implicitly, like an ordinal scale: the `k`-th unmapped category
    /// gets the table color at `(len + k) % len`, so colors cycle from the start.
    #[default]
    Implicit,
    /// Every unmapped category gets the same color.
    Fixed(Color),
}

/// Whether a color came from the table or from the fallback policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorSource {
    /// The category has an entry in the table.
    Mapped,
    /// The category was missing and the fallback policy chose the color.
    Fallback,
}

/// A resolved color for one category.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorAssignment {
    /// Category name.
    pub category: String,
    /// Resolved color.
    pub color: Color,
    /// Where the color came from.
    pub source: ColorSource,
}

/// An ordered `category -> color` table with a fallback policy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorEncoding {
    entries: Vec<(String, Color)>,
    index: HashMap<String, usize>,
    fallback: FallbackPolicy,
}

impl ColorEncoding {
    /// Creates an empty encoding with [`FallbackPolicy::Implicit`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The four-company stock palette.
    pub fn stock_default() -> Self {
        Self::new()
            .with("AAPL", Color::from_rgba8(0, 122, 255, 255))
            .with("GOOGL", Color::from_rgba8(40, 205, 65, 255))
            .with("META", Color::from_rgba8(175, 82, 222, 255))
            .with("MSFT", Color::from_rgba8(255, 149, 0, 255))
    }

    /// Adds or replaces the color for `category`.
    ///
    /// Replacing keeps the category's original position in the table.
    pub fn with(mut self, category: impl Into<String>, color: Color) -> Self {
        self.insert(category, color);
        self
    }

    /// Sets the fallback policy.
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Adds or replaces the color for `category`.
    pub fn insert(&mut self, category: impl Into<String>, color: Color) {
        let category = category.into();
        if let Some(&i) = self.index.get(&category) {
            self.entries[i].1 = color;
            return;
        }
        self.index.insert(category.clone(), self.entries.len());
        self.entries.push((category, color));
    }

    /// Returns the mapped color of `category`, ignoring the fallback policy.
    pub fn get(&self, category: &str) -> Option<Color> {
        self.index.get(category).map(|&i| self.entries[i].1)
    }

    /// Returns the fallback policy.
    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Number of mapped categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no category is mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates mapped `(category, color)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> + '_ {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// Resolves a color for each category, in order.
    ///
    /// Never fails. A category that repeats gets the same assignment each time.
    pub fn resolve<'a>(
        &self,
        categories: impl IntoIterator<Item = &'a str>,
    ) -> Vec<ColorAssignment> {
        let mut unmapped: HashMap<&str, Color> = HashMap::new();
        let mut out = Vec::new();
        for category in categories {
            let (color, source) = match self.get(category) {
                Some(c) => (c, ColorSource::Mapped),
                None => {
                    let k = unmapped.len();
                    let c = *unmapped
                        .entry(category)
                        .or_insert_with(|| self.fallback_color(k));
                    (c, ColorSource::Fallback)
                }
            };
            out.push(ColorAssignment {
                category: category.into(),
                color,
                source,
            });
        }
        out
    }

    fn fallback_color(&self, k: usize) -> Color {
        match self.fallback {
            FallbackPolicy::Fixed(c) => c,
            FallbackPolicy::Implicit if self.entries.is_empty() => {
                BUILTIN_PALETTE[k % BUILTIN_PALETTE.len()]
            }
            FallbackPolicy::Implicit => {
                let n = self.entries.len();
                self.entries[(n + k) % n].1
            }
        }
    }
}
