//! Painter: walks the scene graph and draws its shapes back to front.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Stroke};
use glam::{DMat4, DVec3};

use super::projection::OrthoProjection;
use crate::scene::{NodeId, NodeKind, Stage};

const LINE_WIDTH: f32 = 1.5;
const MIN_FONT_PX: f32 = 6.0;
const FALLBACK_COLOR: Color32 = Color32::GRAY;

/// A projected, screen-space primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        points: Vec<Pos2>,
        color: Color32,
    },
    Square {
        center: Pos2,
        side: f32,
        color: Color32,
    },
    Circle {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
    /// Right-justified, vertically centered text.
    Label {
        anchor: Pos2,
        text: String,
        size: f32,
        color: Color32,
    },
}

/// Primitive together with its view depth.
#[derive(Debug, Clone, PartialEq)]
pub struct Painted {
    pub depth: f64,
    pub primitive: Primitive,
}

/// Parse an X3D color: a CSS color name, `#rrggbb`, or three floats in `[0, 1]`.
pub fn parse_color(value: &str) -> Option<Color32> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return Color32::from_hex(&format!("#{hex}")).ok();
    }
    let rgb: Result<Vec<f32>, _> = value.split_whitespace().map(str::parse::<f32>).collect();
    if let Ok([r, g, b]) = rgb.as_deref() {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        return Some(Color32::from_rgb(c(*r), c(*g), c(*b)));
    }
    named_color(&value.to_ascii_lowercase())
}

fn named_color(name: &str) -> Option<Color32> {
    let (r, g, b) = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "gray" | "grey" => (128, 128, 128),
        "lightgray" | "lightgrey" => (211, 211, 211),
        "darkgray" | "darkgrey" => (169, 169, 169),
        "steelblue" => (70, 130, 180),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "orange" => (255, 165, 0),
        _ => return None,
    };
    Some(Color32::from_rgb(r, g, b))
}

/// Collect every visible primitive below `root`, sorted far to near.
pub fn collect(stage: &Stage, root: NodeId, projection: &OrthoProjection) -> Vec<Painted> {
    let mut out = Vec::new();
    walk(stage, root, DMat4::IDENTITY, projection, &mut out);
    out.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    out
}

/// Draw the scene below `root` with `painter`.
pub fn paint_scene(
    painter: &egui::Painter,
    stage: &Stage,
    root: NodeId,
    projection: &OrthoProjection,
) {
    for item in collect(stage, root, projection) {
        match item.primitive {
            Primitive::Line { points, color } => {
                painter.add(egui::Shape::line(points, Stroke::new(LINE_WIDTH, color)));
            }
            Primitive::Square {
                center,
                side,
                color,
            } => {
                painter.rect_filled(
                    egui::Rect::from_center_size(center, egui::vec2(side, side)),
                    0.0,
                    color,
                );
            }
            Primitive::Circle {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(center, radius, color);
            }
            Primitive::Label {
                anchor,
                text,
                size,
                color,
            } => {
                painter.text(
                    anchor,
                    Align2::RIGHT_CENTER,
                    text,
                    FontId::proportional(size),
                    color,
                );
            }
        }
    }
}

fn walk(stage: &Stage, id: NodeId, parent: DMat4, projection: &OrthoProjection, out: &mut Vec<Painted>) {
    let Some(node) = stage.graph.get(id) else {
        return;
    };
    let world = match &node.kind {
        NodeKind::Transform(t) => {
            let translation = stage.displayed_translation(id).unwrap_or(DVec3::ZERO);
            let rotation = t.rotation.map(|r| r.to_quat()).unwrap_or_default();
            let scale = t.scale.unwrap_or(DVec3::ONE);
            parent * DMat4::from_scale_rotation_translation(scale, rotation, translation)
        }
        NodeKind::Shape => {
            shape_primitives(stage, id, parent, projection, out);
            return;
        }
        _ => parent,
    };
    for child in node.children() {
        walk(stage, *child, world, projection, out);
    }
}

fn shape_primitives(
    stage: &Stage,
    shape: NodeId,
    world: DMat4,
    projection: &OrthoProjection,
    out: &mut Vec<Painted>,
) {
    let Some(node) = stage.graph.get(shape) else {
        return;
    };
    let color = shape_color(stage, node.children()).unwrap_or(FALLBACK_COLOR);
    let (center, depth) = projection.project(world.transform_point3(DVec3::ZERO));
    let unit = world.x_axis.truncate().length() * projection.pixels_per_unit();

    for child in node.children() {
        let Some(geometry) = stage.graph.get(*child) else {
            continue;
        };
        let primitive = match &geometry.kind {
            NodeKind::Polyline2D { line_segments } => {
                if line_segments.len() < 2 {
                    continue;
                }
                let mut depth_sum = 0.0;
                let points = line_segments
                    .iter()
                    .map(|[x, y]| {
                        let (p, d) = projection.project(world.transform_point3(DVec3::new(*x, *y, 0.0)));
                        depth_sum += d;
                        p
                    })
                    .collect();
                out.push(Painted {
                    depth: depth_sum / line_segments.len() as f64,
                    primitive: Primitive::Line { points, color },
                });
                continue;
            }
            NodeKind::Box { size } => Primitive::Square {
                center,
                side: (size.x * unit) as f32,
                color,
            },
            NodeKind::Sphere { radius } => Primitive::Circle {
                center,
                radius: (radius.unwrap_or(1.0) * unit) as f32,
                color,
            },
            NodeKind::Text { string, .. } => {
                let size = geometry
                    .children()
                    .iter()
                    .filter_map(|c| stage.graph.get(*c))
                    .find_map(|n| match &n.kind {
                        NodeKind::FontStyle { size, .. } => Some(*size),
                        _ => None,
                    })
                    .unwrap_or(1.0);
                Primitive::Label {
                    anchor: center,
                    text: string.clone(),
                    size: ((size * unit) as f32).max(MIN_FONT_PX),
                    color,
                }
            }
            _ => continue,
        };
        out.push(Painted { depth, primitive });
    }
}

/// Emissive color wins over diffuse, as an unlit line would show it.
fn shape_color(stage: &Stage, children: &[NodeId]) -> Option<Color32> {
    children
        .iter()
        .filter_map(|c| stage.graph.get(*c))
        .filter(|n| matches!(n.kind, NodeKind::Appearance))
        .flat_map(|appearance| appearance.children().iter())
        .filter_map(|m| stage.graph.get(*m))
        .find_map(|m| match &m.kind {
            NodeKind::Material {
                diffuse_color,
                emissive_color,
            } => emissive_color
                .as_deref()
                .or(diffuse_color.as_deref())
                .and_then(parse_color),
            _ => None,
        })
}
