use glam::DVec3;
use scatterplot3d::events::EventKind;
use scatterplot3d::plot::DATAPOINT_CLASS;
use scatterplot3d::scene::NodeKind;
use scatterplot3d::{
    AxisIndex, ContainerSize, Field, PlotError, RenderOutcome, Row, ScatterPlot, ScatterPlotConfig,
};

fn configured_plot() -> ScatterPlot {
    let mut plot =
        ScatterPlot::new(ContainerSize::new(640.0, 480.0), ScatterPlotConfig::default()).unwrap();
    plot.initialize_plot().unwrap();
    plot
}

fn expected_position(plot: &ScatterPlot, row: &Row) -> DVec3 {
    let s = |axis: AxisIndex| {
        plot.scale(axis)
            .unwrap()
            .apply(row.get(plot.axis_field(axis)))
            .unwrap()
    };
    DVec3::new(s(AxisIndex::X), s(AxisIndex::Y), s(AxisIndex::Z))
}

#[test]
fn empty_rows_emit_one_diagnostic_and_do_not_mutate() {
    let mut plot = configured_plot();
    let rx = plot.events().subscribe_all();
    let revision = plot.scene().revision();

    let outcome = plot.plot_data(1.0).unwrap();

    assert_eq!(outcome, RenderOutcome::Skipped);
    assert_eq!(plot.scene().revision(), revision);
    assert_eq!(plot.marker_count(), 0);
    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events.len(), 1);
    assert!(events[0].kinds.contains(EventKind::DIAGNOSTIC | EventKind::NO_ROWS));
    assert!(events[0].message.is_some());
}

#[test]
fn rendering_requires_configured_axes() {
    let mut plot =
        ScatterPlot::new(ContainerSize::new(640.0, 480.0), ScatterPlotConfig::default()).unwrap();
    plot.push_row(Row::new(0.05, 80.0, 2.4));
    assert!(matches!(
        plot.plot_data(1.0),
        Err(PlotError::AxisNotConfigured(AxisIndex::X))
    ));
}

#[test]
fn sample_data_yields_one_marker_per_row_at_scaled_positions() {
    let plot =
        ScatterPlot::with_sample_data(ContainerSize::new(640.0, 480.0), ScatterPlotConfig::default())
            .unwrap();
    assert_eq!(plot.rows().len(), 100);
    assert_eq!(plot.marker_count(), 100);
    assert_eq!(plot.scene().select_class(DATAPOINT_CLASS).len(), 100);
    for (id, row) in plot.rows().iter() {
        let p = plot.marker_position(id).unwrap();
        assert!((p - expected_position(&plot, row)).length() < 1e-12, "row {id}");
        // Entering markers are placed immediately.
        assert_eq!(plot.displayed_marker_position(id), Some(p));
    }
}

#[test]
fn single_row_renders_then_disappears() {
    let mut plot = configured_plot();
    let id = plot.push_row(Row::new(0.05, 80.0, 2.4));

    let outcome = plot.plot_data(0.0).unwrap();
    match outcome {
        RenderOutcome::Rendered(report) => assert_eq!(report.entered, vec![id]),
        RenderOutcome::Skipped => panic!("row was not rendered"),
    }
    assert_eq!(plot.marker_count(), 1);

    let p = plot.marker_position(id).unwrap();
    let x = 10.0 * (0.05f64 / 0.0001).ln() / (1.0f64 / 0.0001).ln();
    let y = 10.0 * (80.0f64 / 50.0).ln() / (1600.0f64 / 50.0).ln();
    let z = 10.0 * (2.4f64 / 0.8).ln() / (8.0f64 / 0.8).ln();
    assert!((p - DVec3::new(x, y, z)).length() < 1e-9);

    plot.rows_mut().remove(id);
    let outcome = plot.plot_data(0.0).unwrap();
    match outcome {
        RenderOutcome::Rendered(report) => assert_eq!(report.exited, vec![id]),
        RenderOutcome::Skipped => panic!("stale marker was not removed"),
    }
    assert_eq!(plot.marker_count(), 0);
    assert!(plot.scene().select_class(DATAPOINT_CLASS).is_empty());
}

#[test]
fn marker_nodes_are_scaled_unit_spheres() {
    let mut plot = configured_plot();
    let id = plot.push_row(Row::new(0.01, 200.0, 4.0));
    plot.plot_data(0.0).unwrap();

    let g = plot.scene();
    let node = plot.marker_node(id).unwrap();
    let t = g.get(node).unwrap().transform().unwrap();
    assert_eq!(t.scale, Some(DVec3::splat(0.1)));
    assert_eq!(g.get(node).unwrap().class.as_deref(), Some("datapoint"));

    let sphere = g
        .find_descendant(node, |k| matches!(k, NodeKind::Sphere { .. }))
        .unwrap();
    assert!(matches!(g.get(sphere).unwrap().kind, NodeKind::Sphere { radius: None }));
    let material = g
        .find_descendant(node, |k| matches!(k, NodeKind::Material { .. }))
        .unwrap();
    match &g.get(material).unwrap().kind {
        NodeKind::Material { diffuse_color, .. } => {
            assert_eq!(diffuse_color.as_deref(), Some("steelblue"))
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn markers_are_keyed_by_row_identity() {
    let mut plot = configured_plot();
    let a = plot.push_row(Row::new(0.01, 100.0, 2.0));
    let b = plot.push_row(Row::new(0.02, 200.0, 2.8));
    let c = plot.push_row(Row::new(0.04, 400.0, 4.0));
    plot.plot_data(0.0).unwrap();
    let node_a = plot.marker_node(a).unwrap();
    let node_c = plot.marker_node(c).unwrap();

    plot.rows_mut().remove(b);
    let outcome = plot.plot_data(0.0).unwrap();
    match outcome {
        RenderOutcome::Rendered(report) => {
            assert_eq!(report.exited, vec![b]);
            assert_eq!(report.updated, vec![a, c]);
            assert!(report.entered.is_empty());
        }
        RenderOutcome::Skipped => panic!("expected a render"),
    }
    assert_eq!(plot.marker_node(a), Some(node_a));
    assert_eq!(plot.marker_node(c), Some(node_c));
    assert_eq!(plot.marker_node(b), None);
}

#[test]
fn changed_rows_transition_linearly() {
    let mut plot = configured_plot();
    let id = plot.push_row(Row::new(0.01, 100.0, 2.0));
    plot.plot_data(0.0).unwrap();
    let start = plot.marker_position(id).unwrap();

    plot.rows_mut().get_mut(id).unwrap().set(Field::Y, 1600.0);
    plot.plot_data(1.0).unwrap();
    let target = plot.marker_position(id).unwrap();
    assert!((target.y - 10.0).abs() < 1e-9);
    assert_eq!(plot.displayed_marker_position(id), Some(start));

    plot.advance(0.5);
    let mid = plot.displayed_marker_position(id).unwrap();
    assert!((mid - start.lerp(target, 0.5)).length() < 1e-9);

    plot.advance(1.0);
    assert_eq!(plot.displayed_marker_position(id), Some(target));
    assert!(!plot.is_animating());
}

#[test]
fn invalid_row_values_fail_before_any_mutation() {
    let mut plot = configured_plot();
    plot.push_row(Row::new(0.05, 80.0, 2.4));
    let bad = plot.push_row(Row::new(0.05, -80.0, 2.4));
    let revision = plot.scene().revision();

    let err = plot.plot_data(1.0).unwrap_err();
    match err {
        PlotError::InvalidRowValue { row, field, .. } => {
            assert_eq!(row, bad);
            assert_eq!(field, Field::Y);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(plot.scene().revision(), revision);
    assert_eq!(plot.marker_count(), 0);
}

#[test]
fn data_render_event_reports_counts() {
    let mut plot = configured_plot();
    let rx = plot
        .events()
        .subscribe(scatterplot3d::EventFilter::only(EventKind::DATA_RENDERED));
    plot.push_row(Row::new(0.05, 80.0, 2.4));
    plot.push_row(Row::new(0.5, 800.0, 5.6));
    plot.plot_data(0.0).unwrap();

    let evt = rx.try_recv().unwrap();
    let counts = evt.reconcile.unwrap();
    assert_eq!((counts.entered, counts.updated, counts.exited), (2, 0, 0));
    assert!(rx.try_recv().is_err());
}
