//! Tick label formatters: decimal, scientific, and the automatic rule used by
//! default on logarithmic axes.
//!
//! The main entry point is [`TickFormatter`], set on
//! [`TickStyle::formatter`](crate::config::TickStyle::formatter). The default
//! (`Auto`) keeps three significant digits and switches to scientific notation
//! for very small or very large values, which suits log axes spanning several
//! decades.

use serde::{Deserialize, Serialize};

/// Significant digits used by [`TickFormatter::Auto`].
pub const AUTO_SIGNIFICANT_DIGITS: usize = 3;

// ─────────────────────────────────────────────────────────────────────────────
// DecimalFormatter
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed decimal notation: `123.456`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DecimalFormatter {
    /// Fixed number of decimal places.
    pub decimal_places: usize,
    /// Drop trailing zeros (and a dangling decimal point).
    #[serde(default)]
    pub trim_zeros: bool,
    /// Optional unit suffix appended after the number (e.g. `"s"`).
    #[serde(default)]
    pub unit: Option<String>,
}

impl DecimalFormatter {
    pub fn format(&self, value: f64) -> String {
        let mut s = format!("{:.*}", self.decimal_places, value);
        if self.trim_zeros {
            s = trim_fraction(&s);
        }
        with_unit(s, self.unit.as_deref())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ScientificFormatter
// ─────────────────────────────────────────────────────────────────────────────

/// A scientific-notation formatter: renders values as `1.23e4` style.
///
/// Avoids leading `+` signs and zero-padded exponents for compactness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScientificFormatter {
    /// Number of digits after the decimal point in the mantissa.
    pub mantissa_digits: usize,
    /// Optional unit suffix.
    #[serde(default)]
    pub unit: Option<String>,
}

impl Default for ScientificFormatter {
    fn default() -> Self {
        Self {
            mantissa_digits: 2,
            unit: None,
        }
    }
}

impl ScientificFormatter {
    pub fn format(&self, value: f64) -> String {
        with_unit(
            format_scientific(value, self.mantissa_digits),
            self.unit.as_deref(),
        )
    }
}

/// Render `value` as compact scientific notation like `1.23e5` or `-4.00e-2`.
/// Returns `"0"` for zero and handles `NaN` / `±inf` gracefully.
fn format_scientific(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return format!("{}", value);
    }
    let sign = if value < 0.0 { -1.0 } else { 1.0 };
    let abs_val = value.abs();
    let mut exp = abs_val.log10().floor() as i32;
    let mut mantissa = abs_val / 10f64.powi(exp);
    // Rounding the mantissa may carry into the next decade (9.996 -> 10.00).
    let scale = 10f64.powi(digits as i32);
    if (mantissa * scale).round() / scale >= 10.0 {
        mantissa /= 10.0;
        exp += 1;
    }
    let m = format!("{:.*}", digits, sign * mantissa);
    if exp == 0 {
        m
    } else {
        format!("{}e{}", m, exp)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TickFormatter
// ─────────────────────────────────────────────────────────────────────────────

/// Selects how tick values are rendered as label text.
///
/// # Auto rule
/// Three significant digits. Values with `1e-3 <= |v| < 1e6` use plain
/// decimal notation with trailing zeros trimmed (`0.00391`, `1.41`, `64`,
/// `1024`); anything else uses scientific notation with a trimmed mantissa
/// (`2.44e-4`, `1e-4`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickFormatter {
    #[default]
    Auto,
    Decimal(DecimalFormatter),
    Scientific(ScientificFormatter),
}

impl TickFormatter {
    pub fn format(&self, value: f64) -> String {
        match self {
            TickFormatter::Auto => format_auto(value),
            TickFormatter::Decimal(df) => df.format(value),
            TickFormatter::Scientific(sf) => sf.format(value),
        }
    }
}

fn format_auto(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return format!("{}", value);
    }
    let abs_val = value.abs();
    if (1e-3..1e6).contains(&abs_val) {
        let magnitude = abs_val.log10().floor() as i32;
        let places = (AUTO_SIGNIFICANT_DIGITS as i32 - 1 - magnitude).max(0) as usize;
        trim_fraction(&format!("{:.*}", places, value))
    } else {
        let s = format_scientific(value, AUTO_SIGNIFICANT_DIGITS - 1);
        match s.split_once('e') {
            Some((mantissa, exp)) => format!("{}e{}", trim_fraction(mantissa), exp),
            None => trim_fraction(&s),
        }
    }
}

/// `"1.500"` -> `"1.5"`, `"64.0"` -> `"64"`; integers are left alone.
fn trim_fraction(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn with_unit(s: String, unit: Option<&str>) -> String {
    match unit {
        Some(u) => format!("{} {}", s, u),
        None => s,
    }
}

// tests live in `tests/tick_format.rs`
