//! Orthographic projection of scene coordinates onto the egui canvas.

use eframe::egui;
use glam::{DQuat, DVec2, DVec3};

use crate::scene::Viewpoint;

/// Maps world points through an orthographic viewpoint into a screen rect.
///
/// The viewpoint's field of view rectangle is fitted into the rect while
/// preserving its aspect ratio, centered on both axes.
#[derive(Debug, Clone, Copy)]
pub struct OrthoProjection {
    inverse_orientation: DQuat,
    position: DVec3,
    fov_center: DVec2,
    pixels_per_unit: f64,
    screen_center: egui::Pos2,
}

impl OrthoProjection {
    pub fn new(viewpoint: &Viewpoint, rect: egui::Rect) -> Self {
        let [min_x, min_y, max_x, max_y] = viewpoint.field_of_view;
        let fov_w = (max_x - min_x).abs().max(f64::EPSILON);
        let fov_h = (max_y - min_y).abs().max(f64::EPSILON);
        let pixels_per_unit = (rect.width() as f64 / fov_w).min(rect.height() as f64 / fov_h);
        Self {
            inverse_orientation: viewpoint.orientation.to_quat().inverse(),
            position: viewpoint.position,
            fov_center: DVec2::new(0.5 * (min_x + max_x), 0.5 * (min_y + max_y)),
            pixels_per_unit: pixels_per_unit.max(0.0),
            screen_center: rect.center(),
        }
    }

    /// World point in view space. The camera looks down its local -Z.
    pub fn view(&self, world: DVec3) -> DVec3 {
        self.inverse_orientation * (world - self.position)
    }

    /// Screen position and depth (distance in front of the camera).
    pub fn project(&self, world: DVec3) -> (egui::Pos2, f64) {
        let v = self.view(world);
        let x = (v.x - self.fov_center.x) * self.pixels_per_unit;
        let y = (v.y - self.fov_center.y) * self.pixels_per_unit;
        let pos = egui::pos2(
            self.screen_center.x + x as f32,
            self.screen_center.y - y as f32,
        );
        (pos, -v.z)
    }

    /// Screen pixels per world unit.
    pub fn pixels_per_unit(&self) -> f64 {
        self.pixels_per_unit
    }
}
