use std::f64::consts::FRAC_PI_2;

use glam::DVec3;
use scatterplot3d::scene::{AxisAngle, NodeId, NodeKind, SceneGraph};
use scatterplot3d::{
    AxisConfig, AxisIndex, ContainerSize, DisplayRange, Field, PlotError, ScaleError, ScatterPlot,
    ScatterPlotConfig,
};

fn configured_plot() -> ScatterPlot {
    let mut plot =
        ScatterPlot::new(ContainerSize::new(640.0, 480.0), ScatterPlotConfig::default()).unwrap();
    plot.initialize_plot().unwrap();
    plot
}

fn text_of(graph: &SceneGraph, node: NodeId) -> String {
    let text = graph
        .find_descendant(node, |k| matches!(k, NodeKind::Text { .. }))
        .expect("node has a text descendant");
    match &graph.get(text).unwrap().kind {
        NodeKind::Text { string, .. } => string.clone(),
        _ => unreachable!(),
    }
}

fn translation(graph: &SceneGraph, node: NodeId) -> Option<DVec3> {
    graph.get(node)?.transform()?.translation
}

#[test]
fn initialize_builds_ticks_grid_lines_and_static_geometry() {
    let plot = configured_plot();
    let g = plot.scene();
    assert_eq!(g.select_class("xTick").len(), 7);
    assert_eq!(g.select_class("yTick").len(), 5);
    assert_eq!(g.select_class("zTick").len(), 7);
    // Only floor axes carry grid lines.
    assert_eq!(g.select_class("xGridLine").len(), 7);
    assert_eq!(g.select_class("zGridLine").len(), 7);
    assert!(g.select_class("yGridLine").is_empty());
    for prefix in ["x", "y", "z"] {
        assert_eq!(g.select_class(&format!("{prefix}Axis")).len(), 1);
        assert_eq!(g.select_class(&format!("{prefix}AxisLabel")).len(), 1);
        assert_eq!(g.select_class(&format!("{prefix}AxisLabelText")).len(), 1);
    }
    assert_eq!(
        plot.tick_values(AxisIndex::Y),
        vec![64.0, 128.0, 256.0, 512.0, 1024.0]
    );
}

#[test]
fn scales_are_cached_per_axis() {
    let plot = configured_plot();
    for axis in AxisIndex::ALL {
        let scale = plot.scale(axis).expect("scale cached");
        let [low, high] = scale.domain();
        assert!((scale.apply(low).unwrap() - 0.0).abs() < 1e-9);
        assert!((scale.apply(high).unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(plot.display_range(axis), Some(DisplayRange::default()));
    }
    assert_eq!(plot.axis_field(AxisIndex::X), Field::X);
    assert_eq!(plot.axis_field(AxisIndex::Z), Field::Z);
}

#[test]
fn ticks_are_placed_along_their_axis_with_labels() {
    let plot = configured_plot();
    let g = plot.scene();
    let y = plot.scale(AxisIndex::Y).unwrap();

    let node = plot.tick_node(AxisIndex::Y, 1024.0).unwrap();
    let expected = DVec3::new(0.0, y.apply(1024.0).unwrap(), 0.0);
    assert_eq!(translation(g, node), Some(expected));
    assert_eq!(text_of(g, node), "1024");

    let x_node = plot.tick_node(AxisIndex::X, 2f64.powi(-12)).unwrap();
    assert_eq!(text_of(g, x_node), "2.44e-4");
    let p = translation(g, x_node).unwrap();
    assert_eq!((p.y, p.z), (0.0, 0.0));

    let z_node = plot.tick_node(AxisIndex::Z, 4.0).unwrap();
    assert_eq!(text_of(g, z_node), "4");
}

#[test]
fn grid_lines_run_across_the_floor() {
    let plot = configured_plot();
    let g = plot.scene();
    let x_grid = plot.grid_node(AxisIndex::X, 1.0).unwrap();
    let z_grid = plot.grid_node(AxisIndex::Z, 8.0).unwrap();

    let x_rot = g.get(x_grid).unwrap().transform().unwrap().rotation;
    assert_eq!(x_rot, Some(AxisAngle::new(DVec3::Y, -FRAC_PI_2)));
    assert_eq!(g.get(z_grid).unwrap().transform().unwrap().rotation, None);

    assert_eq!(translation(g, x_grid), Some(DVec3::new(10.0, 0.0, 0.0)));
    let z_pos = translation(g, z_grid).unwrap();
    assert_eq!((z_pos.x, z_pos.y), (0.0, 0.0));
    assert!((z_pos.z - 10.0).abs() < 1e-9);

    let line = g
        .find_descendant(x_grid, |k| matches!(k, NodeKind::Polyline2D { .. }))
        .unwrap();
    match &g.get(line).unwrap().kind {
        NodeKind::Polyline2D { line_segments } => {
            assert_eq!(line_segments, &vec![[0.0, 0.0], [10.0, 0.0]])
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn axis_lines_and_labels_are_oriented_per_axis() {
    let plot = configured_plot();
    let g = plot.scene();
    let rotation = |class: &str| {
        let node = g.select_class(class)[0];
        g.get(node).unwrap().transform().unwrap().rotation
    };
    assert_eq!(rotation("xAxis"), Some(AxisAngle::IDENTITY));
    assert_eq!(rotation("yAxis"), Some(AxisAngle::new(DVec3::Z, FRAC_PI_2)));
    assert_eq!(rotation("zAxis"), Some(AxisAngle::new(DVec3::Y, -FRAC_PI_2)));

    let label = g.select_class("zAxisLabel")[0];
    let p = translation(g, label).unwrap();
    assert_eq!((p.x, p.y), (0.0, 0.0));
    assert!((p.z - 11.0).abs() < 1e-9);

    let text = g.select_class("yAxisLabelText")[0];
    match &g.get(text).unwrap().kind {
        NodeKind::Text { string, solid } => {
            assert_eq!(string, "iso");
            assert!(*solid);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn render_axis_twice_is_idempotent() {
    let mut plot = configured_plot();
    let before: Vec<_> = plot.tick_values(AxisIndex::X);
    let nodes: Vec<_> = before
        .iter()
        .map(|v| plot.tick_node(AxisIndex::X, *v).unwrap())
        .collect();
    let node_count = plot.scene().len();

    let report = plot.render_axis(0, Field::X, 1.0).unwrap();
    assert!(report.is_stable());
    assert_eq!(report.updated.len(), 7);
    assert_eq!(plot.tick_values(AxisIndex::X), before);
    assert_eq!(plot.scene().len(), node_count);
    for (v, n) in before.iter().zip(&nodes) {
        assert_eq!(plot.tick_node(AxisIndex::X, *v), Some(*n));
    }
    // Same positions, nothing to animate.
    assert!(!plot.is_animating());
}

#[test]
fn reconfiguring_an_axis_reuses_line_and_label() {
    let mut plot = configured_plot();
    let node_count = plot.scene().len();
    plot.configure_axis(1, DisplayRange::default()).unwrap();
    assert_eq!(plot.scene().select_class("yAxis").len(), 1);
    assert_eq!(plot.scene().select_class("yAxisLabel").len(), 1);
    assert_eq!(plot.scene().len(), node_count);
}

#[test]
fn domain_change_adds_and_removes_by_value() {
    let mut plot = configured_plot();
    let kept = plot.tick_node(AxisIndex::Y, 128.0).unwrap();
    let dropped = plot.tick_node(AxisIndex::Y, 64.0).unwrap();
    let old_y = translation(plot.scene(), kept).unwrap().y;

    plot.set_axis_config(
        AxisIndex::Y,
        AxisConfig::new("iso", Field::Y, [100.0, 3200.0], 2.0),
    )
    .unwrap();
    let report = plot.render_axis(1, Field::Y, 1.0).unwrap();

    let values = |keys: &[scatterplot3d::TickKey]| keys.iter().map(|k| k.value()).collect::<Vec<_>>();
    assert_eq!(values(&report.entered), vec![2048.0]);
    assert_eq!(values(&report.exited), vec![64.0]);
    assert_eq!(values(&report.updated), vec![128.0, 256.0, 512.0, 1024.0]);

    // The surviving tick keeps its node and moves; the dropped one is gone.
    assert_eq!(plot.tick_node(AxisIndex::Y, 128.0), Some(kept));
    assert!(!plot.scene().contains(dropped));
    assert_eq!(plot.scene().select_class("yTick").len(), 5);
    let new_y = translation(plot.scene(), kept).unwrap().y;
    assert!(new_y < old_y);
    assert!(plot.is_animating());
    assert_eq!(plot.stage().displayed_translation(kept).unwrap().y, old_y);
}

#[test]
fn axis_with_base_below_one_gets_ticks() {
    let mut plot = configured_plot();
    plot.set_axis_config(AxisIndex::Y, AxisConfig::new("iso", Field::Y, [1.0, 8.0], 0.5))
        .unwrap();
    plot.render_axis(1, Field::Y, 0.0).unwrap();

    let mut values = plot.tick_values(AxisIndex::Y);
    values.sort_by(f64::total_cmp);
    assert_eq!(values, vec![1.0, 2.0, 4.0, 8.0]);
    assert_eq!(plot.scene().select_class("yTick").len(), 4);
}

#[test]
fn render_axis_rebinds_the_field() {
    let mut plot = configured_plot();
    plot.render_axis(2, Field::X, 0.0).unwrap();
    assert_eq!(plot.axis_field(AxisIndex::Z), Field::X);
}

#[test]
fn invalid_axis_arguments_are_errors() {
    let mut plot =
        ScatterPlot::new(ContainerSize::new(640.0, 480.0), ScatterPlotConfig::default()).unwrap();
    assert!(matches!(
        plot.configure_axis(3, DisplayRange::default()),
        Err(PlotError::AxisIndexOutOfRange(3))
    ));
    assert!(matches!(
        plot.configure_axis(0, DisplayRange { min: 5.0, max: 5.0 }),
        Err(PlotError::InvalidDisplayRange { .. })
    ));
    assert!(matches!(
        plot.render_axis(7, Field::X, 0.0),
        Err(PlotError::AxisIndexOutOfRange(7))
    ));
    assert!(matches!(
        plot.set_axis_config(AxisIndex::X, AxisConfig::new("bad", Field::X, [0.0, 1.0], 2.0)),
        Err(PlotError::Scale(ScaleError::NonPositiveDomain { .. }))
    ));
    assert!(matches!(AxisIndex::try_from(2usize), Ok(AxisIndex::Z)));
    assert!(AxisIndex::try_from(3usize).is_err());
}
