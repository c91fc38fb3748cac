//! Logarithmic axis scale and "nice" logarithmic tick selection.

use serde::{Deserialize, Serialize};

use crate::error::ScaleError;

/// Closed display interval that a scale maps its domain onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRange {
    pub min: f64,
    pub max: f64,
}

impl DisplayRange {
    pub fn new(min: f64, max: f64) -> Result<Self, ScaleError> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ScaleError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn mid(&self) -> f64 {
        0.5 * (self.min + self.max)
    }
}

impl Default for DisplayRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10.0,
        }
    }
}

impl From<DisplayRange> for [f64; 2] {
    fn from(r: DisplayRange) -> Self {
        [r.min, r.max]
    }
}

/// Monotonic logarithmic map from a positive real domain onto a display range.
///
/// The base does not change the mapping itself (the log ratio is base
/// independent); it determines where ticks land.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    base: f64,
    low: f64,
    high: f64,
    range: DisplayRange,
    ln_low: f64,
    ln_span: f64,
}

/// Relative tolerance used when filtering tick candidates against the domain.
const DOMAIN_TOLERANCE: f64 = 1e-9;
/// Widest exponent span whose exponents are all visited by the tick search.
const MAX_EXPONENT_SPAN: i64 = 512;
/// Largest integer base that contributes sub-multiple ticks.
const MAX_SUB_MULTIPLE_BASE: f64 = 32.0;
/// Significant digits kept when snapping tick candidates.
const SNAP_DIGITS: i32 = 12;

impl LogScale {
    pub fn new(base: f64, domain: [f64; 2], range: DisplayRange) -> Result<Self, ScaleError> {
        if !base.is_finite() || base <= 0.0 || base == 1.0 {
            return Err(ScaleError::InvalidBase(base));
        }
        let [low, high] = domain;
        if !(low.is_finite() && high.is_finite()) || low <= 0.0 || high <= 0.0 {
            return Err(ScaleError::NonPositiveDomain { low, high });
        }
        if low >= high {
            return Err(ScaleError::EmptyDomain { low, high });
        }
        // Re-validate in case the range was built without `DisplayRange::new`.
        let range = DisplayRange::new(range.min, range.max)?;
        let ln_low = low.ln();
        Ok(Self {
            base,
            low,
            high,
            range,
            ln_low,
            ln_span: high.ln() - ln_low,
        })
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn domain(&self) -> [f64; 2] {
        [self.low, self.high]
    }

    pub fn range(&self) -> DisplayRange {
        self.range
    }

    /// Map a real-unit value to its display position.
    pub fn apply(&self, value: f64) -> Result<f64, ScaleError> {
        if !value.is_finite() {
            return Err(ScaleError::NonFinite(value));
        }
        if value <= 0.0 {
            return Err(ScaleError::NonPositiveValue(value));
        }
        let t = (value.ln() - self.ln_low) / self.ln_span;
        Ok(self.range.min + t * self.range.span())
    }

    /// Map a display position back to real units.
    pub fn invert(&self, position: f64) -> f64 {
        let t = (position - self.range.min) / self.range.span();
        (self.ln_low + t * self.ln_span).exp()
    }

    fn log_base(&self, v: f64) -> f64 {
        v.ln() / self.base.ln()
    }

    /// Tick values inside the domain, ascending, aiming for at most `count`.
    ///
    /// Integer bases up to 32 contribute sub-multiples `k * base^e`
    /// (k = 1..base-1); other bases only their powers. When the candidate
    /// list exceeds `count`, sub-multiples are dropped first (or thinned, if
    /// no power lies inside the domain), then exponents are thinned to
    /// multiples of a common stride. A domain holding no candidate at all
    /// yields its own bounds.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let count = count.max(1);
        let a = self.log_base(self.low);
        let b = self.log_base(self.high);
        // Bases below 1 reverse the exponent order.
        let first = a.min(b).floor() as i64;
        let last = a.max(b).ceil() as i64;
        let span = last.saturating_sub(first).max(1);

        // Wide spans (bases close to 1) only visit every `unit`-th exponent.
        let unit = if span > MAX_EXPONENT_SPAN {
            let slots = (count as i64).clamp(1, MAX_EXPONENT_SPAN);
            span.saturating_add(slots - 1) / slots
        } else {
            1
        };
        let multiples = if unit == 1
            && self.base.fract() == 0.0
            && (2.0..=MAX_SUB_MULTIPLE_BASE).contains(&self.base)
        {
            self.base as i64
        } else {
            2
        };

        // (exponent / unit, k, value)
        let mut candidates: Vec<(i64, i64, f64)> = Vec::new();
        let mut e = first.div_euclid(unit).saturating_mul(unit);
        while e <= last {
            let power = self.power(e);
            for k in 1..multiples {
                let v = snap(power * k as f64);
                if self.in_domain(v) {
                    candidates.push((e / unit, k, v));
                }
            }
            match e.checked_add(unit) {
                Some(next) => e = next,
                None => break,
            }
        }
        candidates.sort_by(|x, y| x.2.total_cmp(&y.2));

        if candidates.len() > count {
            if candidates.iter().any(|&(_, k, _)| k == 1) {
                candidates.retain(|&(_, k, _)| k == 1);
            } else {
                // The domain sits between two powers: keep evenly spaced sub-multiples.
                let stride = candidates.len().div_ceil(count);
                candidates = candidates.into_iter().step_by(stride).collect();
            }
        }
        if candidates.len() > count {
            let stride = candidates.len().div_ceil(count) as i64;
            candidates.retain(|&(u, _, _)| u.rem_euclid(stride) == 0);
        }
        if candidates.is_empty() {
            let mut bounds = vec![self.low, self.high];
            bounds.truncate(count);
            return bounds;
        }
        candidates.into_iter().map(|(_, _, v)| v).collect()
    }

    fn power(&self, e: i64) -> f64 {
        match i32::try_from(e) {
            Ok(e) if e.unsigned_abs() <= 1024 => self.base.powi(e),
            _ => self.base.powf(e as f64),
        }
    }

    fn in_domain(&self, v: f64) -> bool {
        v >= self.low * (1.0 - DOMAIN_TOLERANCE) && v <= self.high * (1.0 + DOMAIN_TOLERANCE)
    }
}

/// Round to 12 significant digits so that e.g. `sqrt(2)^6` lands on `8`.
/// Values too close to the ends of the `f64` range are returned unchanged.
fn snap(v: f64) -> f64 {
    if v == 0.0 || !v.is_finite() {
        return v;
    }
    let magnitude = v.abs().log10().ceil() as i32;
    let factor = 10f64.powi(SNAP_DIGITS.saturating_sub(magnitude));
    let scaled = v * factor;
    if !factor.is_finite() || factor == 0.0 || !scaled.is_finite() {
        return v;
    }
    let snapped = scaled.round() / factor;
    if snapped.is_finite() && snapped != 0.0 {
        snapped
    } else {
        v
    }
}
