//! The scatter plot: bootstrap, axes, data markers and the animation step.
//!
//! [`ScatterPlot`] owns the [`Stage`] (scene graph, transitions, clock), the
//! row set, the per-axis scale cache and the event controller. All updates
//! go through keyed reconciliation, so nodes are patched in place rather than
//! rebuilt on every refresh.

mod animation;
mod axis;
mod markers;

use std::path::Path;

use glam::DVec3;

use crate::config::{AxisConfig, ScatterPlotConfig};
use crate::data::dataset;
use crate::data::rows::{Field, Row, RowId, RowSet};
use crate::data::scale::{DisplayRange, LogScale};
use crate::error::PlotError;
use crate::events::{EventController, EventKind, PlotEvent, ResizeMeta};
use crate::scene::{KeyedNodes, NodeId, NodeKind, ReconcileReport, SceneGraph, Stage};

pub use animation::wave;
pub use axis::TickKey;
pub use markers::DATAPOINT_CLASS;

// ─────────────────────────────────────────────────────────────────────────────
// AxisIndex
// ─────────────────────────────────────────────────────────────────────────────

/// One of the three axis slots. `Y` is the vertical (elevation) axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AxisIndex {
    X = 0,
    Y = 1,
    Z = 2,
}

impl AxisIndex {
    pub const ALL: [AxisIndex; 3] = [AxisIndex::X, AxisIndex::Y, AxisIndex::Z];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Horizontal axes carry grid lines.
    pub const fn is_floor(self) -> bool {
        matches!(self, AxisIndex::X | AxisIndex::Z)
    }

    /// Prefix of the node classes built for this axis (`xTick`, `zGridLine`...).
    pub const fn class_prefix(self) -> &'static str {
        match self {
            AxisIndex::X => "x",
            AxisIndex::Y => "y",
            AxisIndex::Z => "z",
        }
    }

    pub(crate) fn class(self, name: &str) -> String {
        format!("{}{}", self.class_prefix(), name)
    }

    /// Vector that is `value` along this axis and `other` elsewhere.
    pub fn along(self, other: f64, value: f64) -> DVec3 {
        let mut v = DVec3::splat(other);
        v[self.index()] = value;
        v
    }
}

impl TryFrom<usize> for AxisIndex {
    type Error = PlotError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AxisIndex::X),
            1 => Ok(AxisIndex::Y),
            2 => Ok(AxisIndex::Z),
            other => Err(PlotError::AxisIndexOutOfRange(other)),
        }
    }
}

impl std::fmt::Display for AxisIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.class_prefix())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Container / outcomes
// ─────────────────────────────────────────────────────────────────────────────

/// Size of the host container in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

impl ContainerSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Result of [`ScatterPlot::plot_data`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Rendered(ReconcileReport<RowId>),
    /// Nothing to plot; a diagnostic was emitted and the scene left untouched.
    Skipped,
}

/// Result of [`ScatterPlot::update_data`].
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationOutcome {
    Stepped(RenderOutcome),
    /// The renderer was not ready; rows were left untouched.
    NotReady,
}

// ─────────────────────────────────────────────────────────────────────────────
// ScatterPlot
// ─────────────────────────────────────────────────────────────────────────────

pub struct ScatterPlot {
    config: ScatterPlotConfig,
    stage: Stage,
    viewport: NodeId,
    scene: NodeId,
    viewpoint: NodeId,
    axes: [axis::AxisState; 3],
    rows: RowSet,
    markers: KeyedNodes<RowId>,
    /// Phase of the animation sinusoid.
    time: f64,
    renderer_ready: bool,
    events: EventController,
}

impl ScatterPlot {
    /// Create the viewport, scene root and camera for a container.
    ///
    /// This is the only place these three nodes are created. A zero-sized
    /// container yields a degenerate viewport, not an error.
    pub fn new(container: ContainerSize, config: ScatterPlotConfig) -> Result<Self, PlotError> {
        config.validate()?;
        let mut stage = Stage::new();
        let viewport = stage.graph.add_root(NodeKind::X3d {
            width: container.width.max(0.0).floor(),
            height: container.height.max(0.0).floor(),
        });
        let scene = stage.graph.append(viewport, NodeKind::Scene);
        let viewpoint = stage
            .graph
            .append(scene, NodeKind::OrthoViewpoint(config.camera));
        log::info!(
            "scatter plot viewport created ({}x{})",
            container.width,
            container.height
        );

        let axes = AxisIndex::ALL.map(|a| axis::AxisState::new(config.axes[a.index()].field));
        let plot = Self {
            config,
            stage,
            viewport,
            scene,
            viewpoint,
            axes,
            rows: RowSet::new(),
            markers: KeyedNodes::new(),
            time: 0.0,
            renderer_ready: false,
            events: EventController::new(),
        };
        plot.events.emit(PlotEvent::new(EventKind::VIEWPORT_CREATED));
        Ok(plot)
    }

    /// Bootstrap with the embedded sample rows, configure all three axes and
    /// place the markers.
    pub fn with_sample_data(
        container: ContainerSize,
        config: ScatterPlotConfig,
    ) -> Result<Self, PlotError> {
        let mut plot = Self::new(container, config)?;
        plot.set_rows(dataset::sample_rows());
        plot.initialize_plot()?;
        plot.plot_data(plot.config.timing.default_duration)?;
        Ok(plot)
    }

    /// Configure the three axes over the shared display range.
    pub fn initialize_plot(&mut self) -> Result<(), PlotError> {
        let range = self.config.display_range;
        for axis in AxisIndex::ALL {
            self.configure_axis(axis.index(), range)?;
        }
        Ok(())
    }

    pub fn config(&self) -> &ScatterPlotConfig {
        &self.config
    }

    /// Replace the semantic definition of an axis. Takes effect on the next
    /// [`render_axis`](Self::render_axis) or [`configure_axis`](Self::configure_axis).
    pub fn set_axis_config(&mut self, axis: AxisIndex, axis_config: AxisConfig) -> Result<(), PlotError> {
        // Fail early on a domain or base the scale would reject.
        LogScale::new(axis_config.base, axis_config.domain, self.config.display_range)?;
        self.config.axes[axis.index()] = axis_config;
        Ok(())
    }

    // ── Rows ────────────────────────────────────────────────────────────

    pub fn rows(&self) -> &RowSet {
        &self.rows
    }

    /// Mutable access to the rows. Call [`plot_data`](Self::plot_data) to
    /// bring the markers up to date.
    pub fn rows_mut(&mut self) -> &mut RowSet {
        &mut self.rows
    }

    pub fn set_rows(&mut self, rows: RowSet) {
        self.rows = rows;
    }

    pub fn push_row(&mut self, row: Row) -> RowId {
        self.rows.push(row)
    }

    // ── Host / clock ────────────────────────────────────────────────────

    /// Advance the transition clock to `now` (seconds).
    pub fn advance(&mut self, now: f64) {
        self.stage.advance(now);
    }

    pub fn is_animating(&self) -> bool {
        self.stage.is_animating()
    }

    /// Resize the viewport in place.
    pub fn resize(&mut self, container: ContainerSize) {
        let width = container.width.max(0.0).floor();
        let height = container.height.max(0.0).floor();
        if let Some(NodeKind::X3d { width: w, height: h }) = self.stage.graph.get(self.viewport).map(|n| &n.kind) {
            if *w == width && *h == height {
                return;
            }
        }
        if let Some(NodeKind::X3d { width: w, height: h }) = self.stage.graph.kind_mut(self.viewport) {
            *w = width;
            *h = height;
        }
        log::debug!("viewport resized to {width}x{height}");
        let mut evt = PlotEvent::new(EventKind::RESIZE);
        evt.resize = Some(ResizeMeta { width, height });
        self.events.emit(evt);
    }

    /// Mark whether the rendering host has finished initializing. The
    /// animation step is skipped while this is `false`.
    pub fn set_renderer_ready(&mut self, ready: bool) {
        if ready && !self.renderer_ready {
            self.events.emit(PlotEvent::new(EventKind::RENDERER_READY));
        }
        self.renderer_ready = ready;
    }

    pub fn is_renderer_ready(&self) -> bool {
        self.renderer_ready
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// Cached scale of an axis, once it has been rendered.
    pub fn scale(&self, axis: AxisIndex) -> Option<&LogScale> {
        self.axes[axis.index()].scale.as_ref()
    }

    /// Display range recorded by [`configure_axis`](Self::configure_axis).
    pub fn display_range(&self, axis: AxisIndex) -> Option<DisplayRange> {
        self.axes[axis.index()].range
    }

    /// Field currently bound to an axis.
    pub fn axis_field(&self, axis: AxisIndex) -> Field {
        self.axes[axis.index()].field
    }

    /// Tick values currently bound on an axis, ascending.
    pub fn tick_values(&self, axis: AxisIndex) -> Vec<f64> {
        self.axes[axis.index()].ticks.keys().map(|k| k.value()).collect()
    }

    /// Node of the tick marker for `value`, if one is bound.
    pub fn tick_node(&self, axis: AxisIndex, value: f64) -> Option<NodeId> {
        self.axes[axis.index()].ticks.get(&TickKey::from_value(value))
    }

    /// Node of the grid line for `value` (floor axes only).
    pub fn grid_node(&self, axis: AxisIndex, value: f64) -> Option<NodeId> {
        self.axes[axis.index()].grid.get(&TickKey::from_value(value))
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn marker_node(&self, row: RowId) -> Option<NodeId> {
        self.markers.get(&row)
    }

    /// Target (declared) position of a row's marker.
    pub fn marker_position(&self, row: RowId) -> Option<DVec3> {
        let node = self.markers.get(&row)?;
        self.stage.graph.get(node)?.transform()?.translation
    }

    /// Position of a row's marker as currently displayed, mid-transition
    /// values included.
    pub fn displayed_marker_position(&self, row: RowId) -> Option<DVec3> {
        self.stage.displayed_translation(self.markers.get(&row)?)
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.stage.graph
    }

    pub fn viewport_node(&self) -> NodeId {
        self.viewport
    }

    pub fn scene_node(&self) -> NodeId {
        self.scene
    }

    pub fn viewpoint_node(&self) -> NodeId {
        self.viewpoint
    }

    /// Phase of the animation step.
    pub fn animation_time(&self) -> f64 {
        self.time
    }

    /// Handle to the event controller; clone it to subscribe from elsewhere.
    pub fn events(&self) -> &EventController {
        &self.events
    }

    /// Serialize the whole scene as X3D markup.
    pub fn to_x3d(&self) -> String {
        let markup = crate::scene::to_x3d_string(&self.stage.graph);
        self.announce_export(markup.len(), None);
        markup
    }

    /// Write the X3D markup to `path`, returning the number of bytes written.
    pub fn write_x3d(&self, path: &Path) -> Result<usize, PlotError> {
        let markup = crate::scene::to_x3d_string(&self.stage.graph);
        std::fs::write(path, &markup)?;
        self.announce_export(markup.len(), Some(path));
        Ok(markup.len())
    }

    fn announce_export(&self, bytes: usize, path: Option<&Path>) {
        let mut evt = PlotEvent::new(EventKind::EXPORT);
        evt.export = Some(crate::events::ExportMeta {
            format: "x3d".to_string(),
            path: path.map(|p| p.display().to_string()),
            bytes,
        });
        self.events.emit(evt);
    }

    /// Cached scale of a configured axis.
    fn require_scale(&self, axis: AxisIndex) -> Result<LogScale, PlotError> {
        self.axes[axis.index()]
            .scale
            .ok_or(PlotError::AxisNotConfigured(axis))
    }

    fn diagnostic(&self, kinds: EventKind, message: &str) {
        log::warn!("{message}");
        self.events.emit(PlotEvent::diagnostic(kinds, message));
    }
}
