use std::path::Path;

use scatterplot3d::config::AxisConfig;
use scatterplot3d::persistence::{config_from_str, load_config, save_config, ConfigFormat};
use scatterplot3d::{
    ConfigError, ContainerSize, Field, PlotError, ScatterPlot, ScatterPlotConfig,
};

#[test]
fn default_config_is_valid_and_describes_camera_axes() {
    let cfg = ScatterPlotConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.axes[0].label, "exposure");
    assert_eq!(cfg.axes[0].domain, [0.0001, 1.0]);
    assert_eq!(cfg.axes[1].label, "iso");
    assert_eq!(cfg.axes[1].domain, [50.0, 1600.0]);
    assert_eq!(cfg.axes[2].label, "aperture");
    assert_eq!(cfg.axes[2].base, std::f64::consts::SQRT_2);
    assert_eq!(cfg.axes.clone().map(|a| a.field), [Field::X, Field::Y, Field::Z]);
    assert_eq!(cfg.ticks.count, 8);
    assert!(!cfg.animation.enabled);
}

#[test]
fn yaml_round_trip_preserves_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plot.yaml");

    let mut cfg = ScatterPlotConfig::default();
    cfg.title = "Camera settings".to_string();
    cfg.marker.color = "#ff8800".to_string();
    cfg.animation.enabled = true;
    cfg.axes[1] = AxisConfig::new("iso", Field::Y, [100.0, 3200.0], 2.0);

    save_config(&cfg, &path).unwrap();
    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded, cfg);
}

#[test]
fn json_round_trip_preserves_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plot.json");

    let mut cfg = ScatterPlotConfig::default();
    cfg.ticks.count = 5;
    cfg.marker.radius = 0.25;
    save_config(&cfg, &path).unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.title, cfg.title);
    assert_eq!(loaded.ticks.count, 5);
    assert_eq!(loaded.marker.radius, 0.25);
    assert_eq!(loaded.axes[0].domain, cfg.axes[0].domain);
    assert!((loaded.animation.time_step - cfg.animation.time_step).abs() < 1e-12);
    assert!((loaded.camera.orientation.angle - cfg.camera.orientation.angle).abs() < 1e-12);
}

#[test]
fn partial_yaml_falls_back_to_defaults() {
    let text = "title: Demo\nmarker:\n  radius: 0.2\nanimation:\n  enabled: true\n";
    let cfg = config_from_str(text, ConfigFormat::Yaml).unwrap();
    let defaults = ScatterPlotConfig::default();
    assert_eq!(cfg.title, "Demo");
    assert_eq!(cfg.marker.radius, 0.2);
    assert_eq!(cfg.marker.color, defaults.marker.color);
    assert!(cfg.animation.enabled);
    assert_eq!(cfg.animation.interval_secs, defaults.animation.interval_secs);
    assert_eq!(cfg.axes, defaults.axes);
}

#[test]
fn invalid_values_are_rejected_on_load() {
    let text = "axes:\n  - {label: a, field: x, domain: [1.0, 10.0], base: 1.0}\n  - {label: b, field: y, domain: [1.0, 10.0], base: 2.0}\n  - {label: c, field: z, domain: [1.0, 10.0], base: 2.0}\n";
    assert!(matches!(
        config_from_str(text, ConfigFormat::Yaml),
        Err(ConfigError::Invalid(_))
    ));

    let mut cfg = ScatterPlotConfig::default();
    cfg.display_range.max = cfg.display_range.min;
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));

    let mut cfg = ScatterPlotConfig::default();
    cfg.animation.enabled = true;
    cfg.animation.interval_secs = 0.0;
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn unknown_extension_is_rejected_before_io() {
    let err = load_config(Path::new("/nonexistent/plot.toml")).unwrap_err();
    match err {
        ConfigError::UnsupportedFormat(ext) => assert_eq!(ext, "toml"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        ConfigFormat::from_path(Path::new("a.YML")).unwrap(),
        ConfigFormat::Yaml
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn plot_construction_validates_config() {
    let mut cfg = ScatterPlotConfig::default();
    cfg.marker.radius = 0.0;
    assert!(matches!(
        ScatterPlot::new(ContainerSize::new(640.0, 480.0), cfg),
        Err(PlotError::Config(ConfigError::Invalid(_)))
    ));
}
