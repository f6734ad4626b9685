// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric tick label formatting.

extern crate alloc;

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats a linear tick value using the precision implied by the tick `step`.
///
/// The number of decimals is just enough to distinguish adjacent ticks (`step = 50` gives
/// `"150"`, `step = 0.25` gives `"0.25"`), and the integer part is grouped in thousands
/// (`"1,200"`).
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return alloc::format!("{v}");
    }
    let decimals = decimals_for_step(step);
    // Avoid printing "-0" for values that round to zero.
    let v = if v.abs() < 0.5 * 10_f64.powi(-i32::from(decimals)) {
        0.0
    } else {
        v
    };
    let raw = alloc::format!("{:.*}", usize::from(decimals), v.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut out = String::with_capacity(raw.len() + raw.len() / 3 + 1);
    if v < 0.0 {
        out.push('-');
    }
    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

fn decimals_for_step(step: f64) -> u8 {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let e = (-step.log10().floor()).clamp(0.0, 20.0);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to 0..=20")]
    {
        e as u8
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn integer_steps_print_without_decimals() {
        assert_eq!(format_tick_with_step(150.0, 50.0), "150");
        assert_eq!(format_tick_with_step(0.0, 50.0), "0");
    }

    #[test]
    fn fractional_steps_keep_needed_decimals() {
        assert_eq!(format_tick_with_step(0.5, 0.5), "0.5");
        assert_eq!(format_tick_with_step(0.25, 0.05), "0.25");
        assert_eq!(format_tick_with_step(-1.5, 0.5), "-1.5");
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(format_tick_with_step(1200.0, 200.0), "1,200");
        assert_eq!(format_tick_with_step(-1_000_000.0, 500_000.0), "-1,000,000");
    }

    #[test]
    fn tiny_negative_values_do_not_print_negative_zero() {
        assert_eq!(format_tick_with_step(-1e-12, 1.0), "0");
    }
}
