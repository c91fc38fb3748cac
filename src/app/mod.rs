//! egui/eframe viewer for the scatter plot.
//!
//! | Sub-module     | Responsibility |
//! | -------------- | -------------- |
//! | [`projection`] | Orthographic viewpoint to screen mapping |
//! | [`paint`]      | Scene graph walk and back-to-front painting |
//! | [`run`]        | Native window entry point [`run_scatter_plot()`] |
//! | `web`          | Canvas entry point for wasm32 |
//!
//! The viewer is passive: it displays the plot, advances its transitions
//! and drives the optional animation timer. It handles no user input.

pub mod paint;
pub mod projection;
mod run;
#[cfg(target_arch = "wasm32")]
mod web;

pub use run::run_scatter_plot;
#[cfg(target_arch = "wasm32")]
pub use web::start_web;

use std::time::Duration;

use eframe::egui;

use crate::plot::{ContainerSize, ScatterPlot};
use projection::OrthoProjection;

/// eframe application hosting a [`ScatterPlot`].
pub struct ScatterPlotApp {
    plot: ScatterPlot,
    /// egui time of the last animation step.
    last_step: Option<f64>,
}

impl ScatterPlotApp {
    pub fn new(plot: ScatterPlot) -> Self {
        Self {
            plot,
            last_step: None,
        }
    }

    pub fn plot(&self) -> &ScatterPlot {
        &self.plot
    }

    pub fn plot_mut(&mut self) -> &mut ScatterPlot {
        &mut self.plot
    }

    fn drive_animation(&mut self, now: f64) {
        let animation = &self.plot.config().animation;
        if !animation.enabled {
            return;
        }
        let interval = animation.interval_secs;
        let last = *self.last_step.get_or_insert(now);
        if now - last < interval {
            return;
        }
        self.last_step = Some(now);
        if let Err(e) = self.plot.update_data() {
            log::error!("animation step failed: {e}");
        }
    }
}

impl eframe::App for ScatterPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.plot.advance(now);
        self.drive_animation(now);

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                let size = ui.available_size();
                self.plot
                    .resize(ContainerSize::new(size.x, size.y));
                let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
                let projection = OrthoProjection::new(&self.plot.config().camera, response.rect);
                paint::paint_scene(
                    &painter,
                    self.plot.stage(),
                    self.plot.scene_node(),
                    &projection,
                );
            });

        // The first painted frame is the point where the host is up.
        if !self.plot.is_renderer_ready() {
            self.plot.set_renderer_ready(true);
        }

        if self.plot.is_animating() {
            ctx.request_repaint();
        } else if self.plot.config().animation.enabled {
            ctx.request_repaint_after(Duration::from_secs_f64(
                self.plot.config().animation.interval_secs,
            ));
        }
    }
}
