//! Configuration types for the scatter plot and its viewer.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::data::rows::Field;
use crate::data::scale::DisplayRange;
use crate::data::tick_format::TickFormatter;
use crate::error::ConfigError;
use crate::scene::{AxisAngle, Easing, Viewpoint};

// ─────────────────────────────────────────────────────────────────────────────
// Axes
// ─────────────────────────────────────────────────────────────────────────────

/// Semantic definition of one axis: what it shows and in which units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Text of the axis end label.
    pub label: String,
    /// Row field plotted along this axis.
    pub field: Field,
    /// `[low, high]` in real units. Both strictly positive.
    pub domain: [f64; 2],
    /// Logarithm base; decides where ticks land.
    pub base: f64,
}

impl AxisConfig {
    pub fn new(label: impl Into<String>, field: Field, domain: [f64; 2], base: f64) -> Self {
        Self {
            label: label.into(),
            field,
            domain,
            base,
        }
    }

    /// Exposure time in seconds, base-2 stops.
    pub fn exposure() -> Self {
        Self::new("exposure", Field::X, [0.0001, 1.0], 2.0)
    }

    /// ISO sensitivity, base-2 stops.
    pub fn iso() -> Self {
        Self::new("iso", Field::Y, [50.0, 1600.0], 2.0)
    }

    /// Aperture f-number, full stops are powers of sqrt(2).
    pub fn aperture() -> Self {
        Self::new("aperture", Field::Z, [0.8, 8.0], std::f64::consts::SQRT_2)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Camera
// ─────────────────────────────────────────────────────────────────────────────

/// Default orthographic viewpoint looking at the plot cube from the front right.
pub fn default_viewpoint() -> Viewpoint {
    Viewpoint {
        center_of_rotation: DVec3::new(5.0, 5.0, 5.0),
        field_of_view: [-5.0, -5.0, 15.0, 15.0],
        orientation: AxisAngle::new(
            DVec3::new(-0.5, 1.0, 0.2),
            1.12 * std::f64::consts::FRAC_PI_4,
        ),
        position: DVec3::new(8.0, 4.0, 15.0),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Styling
// ─────────────────────────────────────────────────────────────────────────────

/// Tick markers and their labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickStyle {
    /// Target number of ticks per axis.
    pub count: usize,
    /// Edge length of the tick box.
    pub size: f64,
    pub font_size: f64,
    pub formatter: TickFormatter,
}

impl Default for TickStyle {
    fn default() -> Self {
        Self {
            count: 8,
            size: 0.1,
            font_size: 0.5,
            formatter: TickFormatter::Auto,
        }
    }
}

/// Axis end labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub font_size: f64,
    /// Label position as a fraction of the display range, measured from `min`.
    pub offset: f64,
    pub family: String,
    pub justify: String,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: 0.6,
            offset: 1.1,
            family: "SANS".to_string(),
            justify: "END MIDDLE".to_string(),
        }
    }
}

/// Data point spheres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub radius: f64,
    pub color: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 0.1,
            color: "steelblue".to_string(),
        }
    }
}

/// Named colors (CSS/X3D color names) for the static geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub axis_line: String,
    pub grid: String,
    /// Tick boxes and all text.
    pub solid: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            axis_line: "lightgray".to_string(),
            grid: "gray".to_string(),
            solid: "black".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Timing
// ─────────────────────────────────────────────────────────────────────────────

/// Transition durations (seconds) and easing curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Duration used when an axis is first configured.
    pub initial_duration: f64,
    /// Duration used by data refreshes and the animation step.
    pub default_duration: f64,
    pub marker_easing: Easing,
    pub axis_easing: Easing,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            initial_duration: 0.0,
            default_duration: 1.0,
            marker_easing: Easing::Linear,
            axis_easing: Easing::CubicInOut,
        }
    }
}

/// Periodic animation of the vertical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Run the animation step on a timer in the viewer. Off by default.
    pub enabled: bool,
    pub interval_secs: f64,
    /// Driver time increment per step.
    pub time_step: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: 1.0,
            time_step: std::f64::consts::PI / 8.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ScatterPlotConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration for the scatter plot.
///
/// Organised into sub-configs:
///
/// | Field        | Purpose |
/// |--------------|---------|
/// | `axes`       | Label, field, domain and log base per axis |
/// | `camera`     | Orthographic viewpoint |
/// | `ticks`      | Tick count, size and label format |
/// | `axis_label` | Axis end label font and placement |
/// | `marker`     | Data point radius and color |
/// | `colors`     | Axis line, grid and text colors |
/// | `timing`     | Transition durations and easing |
/// | `animation`  | Optional periodic animation step |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterPlotConfig {
    /// Native window title.
    pub title: String,
    /// Initial native window size in logical pixels.
    pub window_size: [f32; 2],
    /// Display range shared by all three axes.
    pub display_range: DisplayRange,
    /// Axis definitions, indexed by `AxisIndex`.
    pub axes: [AxisConfig; 3],
    pub camera: Viewpoint,
    pub ticks: TickStyle,
    pub axis_label: LabelStyle,
    pub marker: MarkerStyle,
    pub colors: ColorConfig,
    pub timing: TimingConfig,
    pub animation: AnimationConfig,
}

impl Default for ScatterPlotConfig {
    fn default() -> Self {
        Self {
            title: "3D Scatter Plot".to_string(),
            window_size: [640.0, 480.0],
            display_range: DisplayRange::default(),
            axes: [AxisConfig::exposure(), AxisConfig::iso(), AxisConfig::aperture()],
            camera: default_viewpoint(),
            ticks: TickStyle::default(),
            axis_label: LabelStyle::default(),
            marker: MarkerStyle::default(),
            colors: ColorConfig::default(),
            timing: TimingConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl ScatterPlotConfig {
    /// Check the values serde cannot: positive log domains, usable bases,
    /// non-degenerate ranges and timers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = self.display_range;
        if !(r.min.is_finite() && r.max.is_finite()) || r.min >= r.max {
            return Err(ConfigError::Invalid(format!(
                "display_range [{}, {}] must be finite with min < max",
                r.min, r.max
            )));
        }
        for (i, axis) in self.axes.iter().enumerate() {
            let [low, high] = axis.domain;
            if !(low.is_finite() && high.is_finite()) || low <= 0.0 || low >= high {
                return Err(ConfigError::Invalid(format!(
                    "axes[{i}] ({}): domain [{low}, {high}] must be positive with low < high",
                    axis.label
                )));
            }
            if !axis.base.is_finite() || axis.base <= 0.0 || axis.base == 1.0 {
                return Err(ConfigError::Invalid(format!(
                    "axes[{i}] ({}): base {} must be positive and not 1",
                    axis.label, axis.base
                )));
            }
        }
        if self.ticks.count == 0 {
            return Err(ConfigError::Invalid("ticks.count must be at least 1".into()));
        }
        if !(self.marker.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "marker.radius {} must be positive",
                self.marker.radius
            )));
        }
        if self.animation.enabled && !(self.animation.interval_secs > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "animation.interval_secs {} must be positive",
                self.animation.interval_secs
            )));
        }
        Ok(())
    }
}
