//! Data renderer: one sphere marker per row, keyed by row identity.

use glam::DVec3;

use super::{AxisIndex, RenderOutcome, ScatterPlot};
use crate::data::rows::RowId;
use crate::error::PlotError;
use crate::events::{EventKind, PlotEvent, ReconcileMeta};
use crate::scene::{reconcile, Binding, Easing, NodeId, NodeKind, Stage, TransformNode};

/// Class shared by all data markers.
pub const DATAPOINT_CLASS: &str = "datapoint";

struct MarkerBinding<'a> {
    scene: NodeId,
    radius: f64,
    color: &'a str,
    duration: f64,
    easing: Easing,
}

impl Binding<(RowId, DVec3)> for MarkerBinding<'_> {
    type Key = RowId;

    fn key(&self, item: &(RowId, DVec3)) -> RowId {
        item.0
    }

    fn enter(&self, stage: &mut Stage, _item: &(RowId, DVec3)) -> NodeId {
        // Unit sphere sized by the transform scale.
        let node = stage.graph.append_with_class(
            self.scene,
            NodeKind::Transform(TransformNode {
                scale: Some(DVec3::splat(self.radius)),
                ..TransformNode::default()
            }),
            DATAPOINT_CLASS,
        );
        let shape = stage.graph.append(node, NodeKind::Shape);
        let appearance = stage.graph.append(shape, NodeKind::Appearance);
        stage.graph.append(
            appearance,
            NodeKind::Material {
                diffuse_color: None,
                emissive_color: None,
            },
        );
        stage.graph.append(shape, NodeKind::Sphere { radius: None });
        node
    }

    fn update(&self, stage: &mut Stage, node: NodeId, item: &(RowId, DVec3)) {
        let material = stage
            .graph
            .find_descendant(node, |k| matches!(k, NodeKind::Material { .. }));
        if let Some(material) = material {
            if let Some(NodeKind::Material { diffuse_color, .. }) = stage.graph.kind_mut(material) {
                *diffuse_color = Some(self.color.to_string());
            }
        }
        stage.transition_translation(node, item.1, self.duration, self.easing);
    }
}

impl ScatterPlot {
    /// Reconcile the data markers with the current rows and move them to
    /// their scaled positions over `duration` seconds.
    ///
    /// With no rows and no markers there is nothing to do: one diagnostic is
    /// emitted and the scene is left untouched. Markers of removed rows are
    /// exited as usual, including when the last row goes away.
    /// Every row value is checked against its scale before anything changes.
    pub fn plot_data(&mut self, duration: f64) -> Result<RenderOutcome, PlotError> {
        let scales = [
            self.require_scale(AxisIndex::X)?,
            self.require_scale(AxisIndex::Y)?,
            self.require_scale(AxisIndex::Z)?,
        ];
        // Rows emptied since the last render still need their markers exited.
        if self.rows.is_empty() && self.markers.is_empty() {
            self.diagnostic(EventKind::NO_ROWS, "no rows to plot");
            return Ok(RenderOutcome::Skipped);
        }

        let fields = AxisIndex::ALL.map(|a| self.axes[a.index()].field);
        let mut targets = Vec::with_capacity(self.rows.len());
        for (id, row) in self.rows.entries() {
            let mut p = DVec3::ZERO;
            for axis in AxisIndex::ALL {
                let field = fields[axis.index()];
                p[axis.index()] = scales[axis.index()]
                    .apply(row.get(field))
                    .map_err(|source| PlotError::InvalidRowValue {
                        row: *id,
                        field,
                        source,
                    })?;
            }
            targets.push((*id, p));
        }

        let binding = MarkerBinding {
            scene: self.scene,
            radius: self.config.marker.radius,
            color: &self.config.marker.color,
            duration,
            easing: self.config.timing.marker_easing,
        };
        let report = reconcile(&mut self.stage, &mut self.markers, &targets, &binding);

        let mut evt = PlotEvent::new(EventKind::DATA_RENDERED);
        evt.reconcile = Some(ReconcileMeta {
            entered: report.entered.len(),
            updated: report.updated.len(),
            exited: report.exited.len(),
        });
        self.events.emit(evt);
        Ok(RenderOutcome::Rendered(report))
    }
}
