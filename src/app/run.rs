//! Top-level entry point for running the scatter plot as a native window.

use eframe::egui;

use super::ScatterPlotApp;
use crate::config::ScatterPlotConfig;
use crate::plot::{ContainerSize, ScatterPlot};

/// Launch the scatter plot with the embedded sample data in a native window.
///
/// The plot is built inside the app creator, so configuration errors surface
/// as an eframe app-creation error. The call blocks until the window is closed.
pub fn run_scatter_plot(config: ScatterPlotConfig) -> eframe::Result<()> {
    let [width, height] = config.window_size;
    let title = config.title.clone();
    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size(egui::vec2(width, height)),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        opts,
        Box::new(move |_cc| {
            let plot = ScatterPlot::with_sample_data(ContainerSize::new(width, height), config)?;
            Ok(Box::new(ScatterPlotApp::new(plot)))
        }),
    )
}
