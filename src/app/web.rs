//! Browser entry point: mounts the scatter plot into an HTML canvas.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::ScatterPlotApp;
use crate::config::ScatterPlotConfig;
use crate::plot::{ContainerSize, ScatterPlot};

/// Start the viewer in the canvas with id `canvas_id`, using the default
/// configuration and the embedded sample data.
#[wasm_bindgen]
pub fn start_web(canvas_id: &str) -> Result<(), JsValue> {
    let _ = eframe::WebLogger::init(log::LevelFilter::Info);

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id:?}")))?
        .dyn_into::<web_sys::HtmlCanvasElement>()?;

    let config = ScatterPlotConfig::default();
    let container = ContainerSize::new(canvas.client_width() as f32, canvas.client_height() as f32);
    let plot = ScatterPlot::with_sample_data(container, config)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    wasm_bindgen_futures::spawn_local(async move {
        let result = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(move |_cc| Ok(Box::new(ScatterPlotApp::new(plot)))),
            )
            .await;
        if let Err(e) = result {
            log::error!("failed to start scatter plot: {e:?}");
        }
    });
    Ok(())
}
