//! Scalar normalization for scale-ambiguous numeric payloads.
//!
//! Generative sources return numbers in whatever shape the prompt happened
//! to elicit: `21`, `0.21`, `"21%"`, `"$1,234.50"`. These functions turn any
//! of those into a plain `f64`, and put percentage-typed fields on a single
//! 0-100 scale so downstream consumers never have to guess whether `0.21`
//! meant 21% or 0.21%.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a field's cleaned number must be interpreted for scale purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericKind {
    /// No scale inference: prices, ratios (PE, PEG, beta), currency amounts.
    PlainNumber,
    /// Percentage whose natural magnitude is commonly well above 1%
    /// (margins, growth rates, WACC, ROIC, tax rate). Canonical 0-100.
    LargePercentage,
    /// Percentage whose natural magnitude is commonly below ~15%
    /// (risk-free rate, dividend yield, terminal growth). Canonical 0-100.
    SmallPercentage,
}

/// Cutoffs below which a value is read as a fractional (0-1) encoding.
///
/// These are empirical constants tuned to the typical output range of the
/// upstream source, not derived from a model; a dividend yield of exactly
/// 15% would be left as-is. Hosts that see different ranges can override.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScaleThresholds {
    /// `LargePercentage`: |x| <= this (and nonzero) is fractional. 0.21 -> 21.
    pub large_fraction_max: f64,
    /// `SmallPercentage`: |x| < this (and nonzero) is fractional. 0.04 -> 4,
    /// but 0.7 (an already-scaled 0.7% yield) stays 0.7.
    pub small_fraction_max: f64,
}

impl Default for ScaleThresholds {
    fn default() -> Self {
        Self {
            large_fraction_max: 1.0,
            small_fraction_max: 0.15,
        }
    }
}

/// Coerce a raw payload value into a finite number.
///
/// Numbers pass through unchanged (non-finite becomes 0). Strings are
/// stripped of everything that is not a digit, `.`, or `-` (currency
/// symbols, thousands separators, percent signs, whitespace, trailing
/// units) and parsed; anything unparseable yields 0. Null, absence, and
/// structured values yield 0. Total; never panics.
pub fn clean_number(raw: &Value) -> f64 {
    match raw {
        Value::Number(n) => {
            let v = n.as_f64().unwrap_or(0.0);
            if v.is_finite() {
                v
            } else {
                0.0
            }
        }
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            match cleaned.parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => 0.0,
            }
        }
        _ => 0.0,
    }
}

/// Clean a raw value and scale it according to its declared kind.
///
/// Returns the result of [`clean_number`] for `PlainNumber`; for the two
/// percentage kinds, values judged to be fractional encodings (per
/// `thresholds`) are multiplied by 100. Zero is never rescaled, so the
/// neutral default for absent fields survives unchanged.
pub fn clean_percentage(raw: &Value, kind: NumericKind, thresholds: &ScaleThresholds) -> f64 {
    let num = clean_number(raw);
    match kind {
        NumericKind::PlainNumber => num,
        // Inclusive at the cutoff: exactly 1.0 reads as 100%.
        NumericKind::LargePercentage => {
            if num != 0.0 && num.abs() <= thresholds.large_fraction_max {
                num * 100.0
            } else {
                num
            }
        }
        // Strict at the cutoff: exactly 0.15 reads as an already-scaled 0.15%.
        NumericKind::SmallPercentage => {
            if num != 0.0 && num.abs() < thresholds.small_fraction_max {
                num * 100.0
            } else {
                num
            }
        }
    }
}
