//! Deterministic numeric helpers.

#![forbid(unsafe_code)]

/// Round a floating point value to `decimals` decimal places.
#[must_use]
pub fn round_f64(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Arithmetic mean, or `None` for an empty input.
///
/// Values are summed in iteration order so identical inputs always produce
/// bit-identical results.
#[must_use]
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Product of the values in iteration order; `1.0` for an empty input.
#[must_use]
pub fn product<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().fold(1.0, |acc, v| acc * v)
}

/// Format with a fixed number of decimals, trimming a negative zero.
#[must_use]
pub fn fmt_fixed(value: f64, decimals: usize) -> String {
    let out = format!("{value:.decimals$}");
    if out.starts_with('-') && out[1..].chars().all(|c| c == '0' || c == '.') {
        out[1..].to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_f64_rounds_expected_precision() {
        let value = 12.34567;
        assert_eq!(round_f64(value, 2), 12.35);
        assert_eq!(round_f64(value, 4), 12.3457);
    }

    #[test]
    fn mean_handles_empty_and_values() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean([1.0, 2.0, 3.0]), Some(2.0));
    }

    #[test]
    fn product_of_empty_is_one() {
        assert_eq!(product(std::iter::empty()), 1.0);
        assert_eq!(product([2.0, 0.5, 3.0]), 3.0);
    }

    #[test]
    fn fmt_fixed_pads_and_trims_negative_zero() {
        assert_eq!(fmt_fixed(2.4, 2), "2.40");
        assert_eq!(fmt_fixed(-0.0001, 2), "0.00");
        assert_eq!(fmt_fixed(-1.5, 1), "-1.5");
    }
}
