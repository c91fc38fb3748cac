//! Axis manager: log scales, ticks with labels, floor grid lines and the
//! static axis line and end label.

use std::f64::consts::FRAC_PI_2;

use glam::DVec3;

use super::{AxisIndex, ScatterPlot};
use crate::config::ScatterPlotConfig;
use crate::data::rows::Field;
use crate::data::scale::{DisplayRange, LogScale};
use crate::error::PlotError;
use crate::events::{AxisMeta, EventKind, PlotEvent, ReconcileMeta};
use crate::scene::{
    reconcile, AxisAngle, Binding, KeyedNodes, NodeId, NodeKind, ReconcileReport, Stage,
    TransformNode,
};

/// Reconciliation key of a tick: the bit pattern of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickKey(u64);

impl TickKey {
    pub fn from_value(value: f64) -> Self {
        // -0.0 and 0.0 must not become two ticks.
        Self((value + 0.0).to_bits())
    }

    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct AxisState {
    pub(crate) range: Option<DisplayRange>,
    pub(crate) scale: Option<LogScale>,
    pub(crate) field: Field,
    pub(crate) ticks: KeyedNodes<TickKey>,
    pub(crate) grid: KeyedNodes<TickKey>,
    line: Option<NodeId>,
    label: Option<NodeId>,
}

impl AxisState {
    pub(crate) fn new(field: Field) -> Self {
        Self {
            range: None,
            scale: None,
            field,
            ticks: KeyedNodes::new(),
            grid: KeyedNodes::new(),
            line: None,
            label: None,
        }
    }
}

/// Rotation that lays the x-directed axis polyline onto `axis`.
fn axis_line_rotation(axis: AxisIndex) -> AxisAngle {
    match axis {
        AxisIndex::X => AxisAngle::IDENTITY,
        AxisIndex::Y => AxisAngle::new(DVec3::Z, FRAC_PI_2),
        AxisIndex::Z => AxisAngle::new(DVec3::Y, -FRAC_PI_2),
    }
}

/// Grid lines of the X axis run along Z, those of the Z axis along X.
fn grid_rotation(axis: AxisIndex) -> Option<AxisAngle> {
    match axis {
        AxisIndex::X => Some(AxisAngle::new(DVec3::Y, -FRAC_PI_2)),
        _ => None,
    }
}

fn segment(length: f64) -> Vec<[f64; 2]> {
    vec![[0.0, 0.0], [length, 0.0]]
}

/// `shape` with an `appearance`/`material` child; returns the shape.
fn solid_shape(stage: &mut Stage, parent: NodeId, material: NodeKind) -> NodeId {
    let shape = stage.graph.append(parent, NodeKind::Shape);
    let appearance = stage.graph.append(shape, NodeKind::Appearance);
    stage.graph.append(appearance, material);
    shape
}

/// Camera-facing text: `billboard` > `shape` > `text` > `fontstyle`.
/// Returns the text node.
fn billboard_text(
    stage: &mut Stage,
    parent: NodeId,
    color: &str,
    text: NodeKind,
    text_class: Option<String>,
    font: NodeKind,
) -> NodeId {
    let billboard = stage.graph.append(
        parent,
        NodeKind::Billboard {
            axis_of_rotation: DVec3::ZERO,
        },
    );
    let shape = solid_shape(stage, billboard, NodeKind::diffuse(color));
    let text = match text_class {
        Some(class) => stage.graph.append_with_class(shape, text, class),
        None => stage.graph.append(shape, text),
    };
    stage.graph.append(text, font);
    text
}

fn set_text(stage: &mut Stage, text_node: NodeId, value: String) {
    if let Some(NodeKind::Text { string, .. }) = stage.graph.kind_mut(text_node) {
        *string = value;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bindings
// ─────────────────────────────────────────────────────────────────────────────

struct TickBinding<'a> {
    axis: AxisIndex,
    scene: NodeId,
    scale: &'a LogScale,
    config: &'a ScatterPlotConfig,
    duration: f64,
}

impl Binding<f64> for TickBinding<'_> {
    type Key = TickKey;

    fn key(&self, tick: &f64) -> TickKey {
        TickKey::from_value(*tick)
    }

    fn enter(&self, stage: &mut Stage, _tick: &f64) -> NodeId {
        let style = &self.config.ticks;
        let solid = &self.config.colors.solid;
        let node = stage
            .graph
            .append_with_class(self.scene, NodeKind::transform(), self.axis.class("Tick"));
        let shape = solid_shape(stage, node, NodeKind::diffuse(solid.as_str()));
        stage.graph.append(
            shape,
            NodeKind::Box {
                size: DVec3::splat(style.size),
            },
        );
        billboard_text(
            stage,
            node,
            solid,
            NodeKind::Text {
                string: String::new(),
                solid: true,
            },
            None,
            NodeKind::FontStyle {
                size: style.font_size,
                family: self.config.axis_label.family.clone(),
                justify: self.config.axis_label.justify.clone(),
            },
        );
        node
    }

    fn update(&self, stage: &mut Stage, node: NodeId, tick: &f64) {
        // Ticks come from the scale itself, so they are always positive.
        let position = self.scale.apply(*tick).unwrap_or(self.scale.range().min);
        stage.transition_translation(
            node,
            self.axis.along(0.0, position),
            self.duration,
            self.config.timing.axis_easing,
        );
        let text = stage
            .graph
            .find_descendant(node, |k| matches!(k, NodeKind::Text { .. }));
        if let Some(text) = text {
            set_text(stage, text, self.config.ticks.formatter.format(*tick));
        }
    }
}

struct GridBinding<'a> {
    axis: AxisIndex,
    scene: NodeId,
    scale: &'a LogScale,
    config: &'a ScatterPlotConfig,
    duration: f64,
}

impl Binding<f64> for GridBinding<'_> {
    type Key = TickKey;

    fn key(&self, tick: &f64) -> TickKey {
        TickKey::from_value(*tick)
    }

    fn enter(&self, stage: &mut Stage, _tick: &f64) -> NodeId {
        let node = stage.graph.append_with_class(
            self.scene,
            NodeKind::Transform(TransformNode {
                rotation: grid_rotation(self.axis),
                ..TransformNode::default()
            }),
            self.axis.class("GridLine"),
        );
        let shape = solid_shape(stage, node, NodeKind::emissive(self.config.colors.grid.as_str()));
        stage.graph.append(
            shape,
            NodeKind::Polyline2D {
                line_segments: Vec::new(),
            },
        );
        node
    }

    fn update(&self, stage: &mut Stage, node: NodeId, tick: &f64) {
        let range = self.scale.range();
        let line = stage
            .graph
            .find_descendant(node, |k| matches!(k, NodeKind::Polyline2D { .. }));
        if let Some(line) = line {
            if let Some(NodeKind::Polyline2D { line_segments }) = stage.graph.kind_mut(line) {
                *line_segments = segment(range.max);
            }
        }
        let position = self.scale.apply(*tick).unwrap_or(range.min);
        stage.transition_translation(
            node,
            self.axis.along(0.0, position),
            self.duration,
            self.config.timing.axis_easing,
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Axis operations
// ─────────────────────────────────────────────────────────────────────────────

impl ScatterPlot {
    /// Record `range` for an axis, render its ticks with the configured field
    /// and the initial duration, and build the axis line and end label.
    ///
    /// Reconfiguring an axis reuses its line and label nodes.
    pub fn configure_axis(
        &mut self,
        axis_index: usize,
        range: DisplayRange,
    ) -> Result<ReconcileReport<TickKey>, PlotError> {
        let axis = AxisIndex::try_from(axis_index)?;
        let range = DisplayRange::new(range.min, range.max).map_err(|_| {
            PlotError::InvalidDisplayRange {
                min: range.min,
                max: range.max,
            }
        })?;
        self.axes[axis.index()].range = Some(range);

        let field = self.config.axes[axis.index()].field;
        let report = self.render_axis(axis_index, field, self.config.timing.initial_duration)?;
        self.build_axis_line(axis, range);
        self.build_axis_label(axis, range);

        let mut evt = PlotEvent::new(EventKind::AXIS_CONFIGURED);
        evt.axis = Some(self.axis_meta(axis));
        self.events.emit(evt);
        log::info!(
            "configured axis {axis} ({}) over [{}, {}]",
            self.config.axes[axis.index()].label,
            range.min,
            range.max
        );
        Ok(report)
    }

    /// Rebuild the scale of an axis, reconcile its ticks (and grid lines on
    /// floor axes) keyed by tick value, and bind the axis to `field`.
    ///
    /// Retained ticks move to their new position over `duration` seconds.
    pub fn render_axis(
        &mut self,
        axis_index: usize,
        field: Field,
        duration: f64,
    ) -> Result<ReconcileReport<TickKey>, PlotError> {
        let axis = AxisIndex::try_from(axis_index)?;
        let def = &self.config.axes[axis.index()];
        let range = self.axes[axis.index()]
            .range
            .unwrap_or(self.config.display_range);
        let scale = LogScale::new(def.base, def.domain, range)?;
        let ticks = scale.ticks(self.config.ticks.count);

        let state = &mut self.axes[axis.index()];
        let report = reconcile(
            &mut self.stage,
            &mut state.ticks,
            &ticks,
            &TickBinding {
                axis,
                scene: self.scene,
                scale: &scale,
                config: &self.config,
                duration,
            },
        );
        if axis.is_floor() {
            reconcile(
                &mut self.stage,
                &mut state.grid,
                &ticks,
                &GridBinding {
                    axis,
                    scene: self.scene,
                    scale: &scale,
                    config: &self.config,
                    duration,
                },
            );
        }
        state.scale = Some(scale);
        state.field = field;

        let mut evt = PlotEvent::new(EventKind::AXIS_RENDERED);
        evt.axis = Some(self.axis_meta(axis));
        evt.reconcile = Some(ReconcileMeta {
            entered: report.entered.len(),
            updated: report.updated.len(),
            exited: report.exited.len(),
        });
        self.events.emit(evt);
        log::debug!("axis {axis} bound to field {field} with {} ticks", ticks.len());
        Ok(report)
    }

    fn axis_meta(&self, axis: AxisIndex) -> AxisMeta {
        AxisMeta {
            axis,
            field: self.axes[axis.index()].field,
            ticks: self.tick_values(axis),
        }
    }

    fn build_axis_line(&mut self, axis: AxisIndex, range: DisplayRange) {
        let line = match self.axes[axis.index()].line {
            Some(node) if self.stage.graph.contains(node) => node,
            _ => {
                let node = self.stage.graph.append_with_class(
                    self.scene,
                    NodeKind::Transform(TransformNode {
                        rotation: Some(axis_line_rotation(axis)),
                        ..TransformNode::default()
                    }),
                    axis.class("Axis"),
                );
                let shape = solid_shape(
                    &mut self.stage,
                    node,
                    NodeKind::emissive(self.config.colors.axis_line.as_str()),
                );
                self.stage.graph.append(
                    shape,
                    NodeKind::Polyline2D {
                        line_segments: Vec::new(),
                    },
                );
                self.axes[axis.index()].line = Some(node);
                node
            }
        };
        let polyline = self
            .stage
            .graph
            .find_descendant(line, |k| matches!(k, NodeKind::Polyline2D { .. }));
        if let Some(polyline) = polyline {
            if let Some(NodeKind::Polyline2D { line_segments }) = self.stage.graph.kind_mut(polyline)
            {
                *line_segments = segment(range.max);
            }
        }
    }

    fn build_axis_label(&mut self, axis: AxisIndex, range: DisplayRange) {
        let style = &self.config.axis_label;
        let label_text = self.config.axes[axis.index()].label.clone();
        let position = range.min + style.offset * range.span();

        let node = match self.axes[axis.index()].label {
            Some(node) if self.stage.graph.contains(node) => node,
            _ => {
                let node = self.stage.graph.append_with_class(
                    self.scene,
                    NodeKind::transform(),
                    axis.class("AxisLabel"),
                );
                billboard_text(
                    &mut self.stage,
                    node,
                    &self.config.colors.solid,
                    NodeKind::Text {
                        string: String::new(),
                        solid: true,
                    },
                    Some(axis.class("AxisLabelText")),
                    NodeKind::FontStyle {
                        size: style.font_size,
                        family: style.family.clone(),
                        justify: style.justify.clone(),
                    },
                );
                self.axes[axis.index()].label = Some(node);
                node
            }
        };
        if let Some(t) = self.stage.graph.transform_mut(node) {
            t.translation = Some(axis.along(0.0, position));
        }
        let text = self
            .stage
            .graph
            .find_descendant(node, |k| matches!(k, NodeKind::Text { .. }));
        if let Some(text) = text {
            set_text(&mut self.stage, text, label_text);
        }
    }
}
