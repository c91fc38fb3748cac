//! scatterplot3d crate root: re-exports and module wiring.
//!
//! A 3D scatter plot with logarithmic axes. The plot is kept as a declarative
//! scene graph in the X3D vocabulary and updated incrementally through keyed
//! enter/update/exit reconciliation with animated transitions:
//! - `data`: rows, log scales, tick label formatting, the sample dataset
//! - `scene`: scene graph, transitions, reconciliation, X3D writer
//! - `plot`: the [`ScatterPlot`] (bootstrap, axes, markers, animation)
//! - `events`: subscribable plot events and diagnostics
//! - `config` / `persistence`: configuration and its JSON/YAML files
//! - `app`: egui/eframe viewer

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod persistence;
pub mod plot;
pub mod scene;

// Public re-exports for a compact external API
pub use app::{run_scatter_plot, ScatterPlotApp};
pub use config::{AxisConfig, ScatterPlotConfig};
pub use data::rows::{Field, Row, RowId, RowSet};
pub use data::scale::{DisplayRange, LogScale};
pub use data::tick_format::TickFormatter;
pub use error::{ConfigError, PlotError, ScaleError};
pub use events::{EventController, EventFilter, EventKind, PlotEvent};
pub use plot::{AnimationOutcome, AxisIndex, ContainerSize, RenderOutcome, ScatterPlot, TickKey};
