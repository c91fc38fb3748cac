//! X3D markup writer.
//!
//! Emits the scene graph as lower-case X3D elements, the vocabulary a
//! declarative 3D engine in a web page consumes. Vectors are space separated,
//! children follow insertion order.

use std::fmt::{self, Write};

use glam::DVec3;

use super::graph::{AxisAngle, NodeId, NodeKind, SceneGraph};

/// Serialize every root of `graph`.
pub fn to_x3d_string(graph: &SceneGraph) -> String {
    let mut out = String::new();
    for root in graph.roots() {
        // Writing into a String cannot fail.
        let _ = write_node(graph, *root, 0, &mut out);
    }
    out
}

/// Serialize the subtree rooted at `id` into `out`.
pub fn write_node(graph: &SceneGraph, id: NodeId, depth: usize, out: &mut impl Write) -> fmt::Result {
    let Some(node) = graph.get(id) else {
        return Ok(());
    };
    let indent = "  ".repeat(depth);
    write!(out, "{indent}<{}", node.kind.tag())?;
    if let Some(class) = &node.class {
        write_attr(out, "class", class)?;
    }
    write_attributes(&node.kind, out)?;

    if node.children().is_empty() {
        writeln!(out, "></{}>", node.kind.tag())?;
        return Ok(());
    }
    writeln!(out, ">")?;
    for child in node.children() {
        write_node(graph, *child, depth + 1, out)?;
    }
    writeln!(out, "{indent}</{}>", node.kind.tag())
}

fn write_attributes(kind: &NodeKind, out: &mut impl Write) -> fmt::Result {
    match kind {
        NodeKind::X3d { width, height } => write_attr(
            out,
            "style",
            &format!("width:{}px; height:{}px; border:none", width, height),
        ),
        NodeKind::Scene | NodeKind::Shape | NodeKind::Appearance => Ok(()),
        NodeKind::OrthoViewpoint(vp) => {
            write_attr(out, "centerOfRotation", &vec3(vp.center_of_rotation))?;
            write_attr(out, "fieldOfView", &join(&vp.field_of_view))?;
            write_attr(out, "orientation", &rotation(&vp.orientation))?;
            write_attr(out, "position", &vec3(vp.position))
        }
        NodeKind::Transform(t) => {
            if let Some(r) = &t.rotation {
                write_attr(out, "rotation", &rotation(r))?;
            }
            if let Some(s) = t.scale {
                write_attr(out, "scale", &vec3(s))?;
            }
            if let Some(tr) = t.translation {
                write_attr(out, "translation", &vec3(tr))?;
            }
            Ok(())
        }
        NodeKind::Material {
            diffuse_color,
            emissive_color,
        } => {
            if let Some(c) = diffuse_color {
                write_attr(out, "diffuseColor", c)?;
            }
            if let Some(c) = emissive_color {
                write_attr(out, "emissiveColor", c)?;
            }
            Ok(())
        }
        NodeKind::Polyline2D { line_segments } => {
            let points: Vec<String> = line_segments
                .iter()
                .map(|[x, y]| format!("{} {}", x, y))
                .collect();
            write_attr(out, "lineSegments", &points.join(", "))
        }
        NodeKind::Box { size } => write_attr(out, "size", &vec3(*size)),
        NodeKind::Sphere { radius } => match radius {
            Some(r) => write_attr(out, "radius", &r.to_string()),
            None => Ok(()),
        },
        NodeKind::Billboard { axis_of_rotation } => {
            write_attr(out, "axisOfRotation", &vec3(*axis_of_rotation))
        }
        NodeKind::Text { string, solid } => {
            write_attr(out, "solid", if *solid { "true" } else { "false" })?;
            write_attr(out, "string", string)
        }
        NodeKind::FontStyle {
            size,
            family,
            justify,
        } => {
            write_attr(out, "size", &size.to_string())?;
            write_attr(out, "family", family)?;
            write_attr(out, "justify", justify)
        }
    }
}

fn write_attr(out: &mut impl Write, name: &str, value: &str) -> fmt::Result {
    write!(out, " {}=\"{}\"", name, escape(value))
}

fn vec3(v: DVec3) -> String {
    format!("{} {} {}", v.x, v.y, v.z)
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn rotation(r: &AxisAngle) -> String {
    format!("{} {}", vec3(r.axis), r.angle)
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
