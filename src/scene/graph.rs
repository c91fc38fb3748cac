//! Declarative scene graph in the X3D node vocabulary.
//!
//! Nodes live in an id-keyed arena; each node knows its parent and its
//! ordered children. Attributes hold *declared* (target) values. Animated
//! display values are tracked separately by the
//! [`Animator`](super::transition::Animator).

use std::collections::HashMap;

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Handle to a node in a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node{}", self.0)
    }
}

/// Rotation expressed as an axis and an angle in radians (X3D `SFRotation`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAngle {
    pub axis: DVec3,
    pub angle: f64,
}

impl AxisAngle {
    pub const IDENTITY: Self = Self {
        axis: DVec3::ZERO,
        angle: 0.0,
    };

    pub const fn new(axis: DVec3, angle: f64) -> Self {
        Self { axis, angle }
    }

    /// Quaternion for this rotation. A zero axis means no rotation.
    pub fn to_quat(&self) -> DQuat {
        let len = self.axis.length();
        if len == 0.0 || self.angle == 0.0 {
            DQuat::IDENTITY
        } else {
            DQuat::from_axis_angle(self.axis / len, self.angle)
        }
    }
}

/// The single camera of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewpoint {
    pub center_of_rotation: DVec3,
    /// `[min_x, min_y, max_x, max_y]` of the visible view-plane rectangle.
    pub field_of_view: [f64; 4],
    pub orientation: AxisAngle,
    pub position: DVec3,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformNode {
    pub translation: Option<DVec3>,
    pub rotation: Option<AxisAngle>,
    pub scale: Option<DVec3>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Root viewport sized to the host container, in pixels.
    X3d { width: f32, height: f32 },
    Scene,
    OrthoViewpoint(Viewpoint),
    Transform(TransformNode),
    Shape,
    Appearance,
    Material {
        diffuse_color: Option<String>,
        emissive_color: Option<String>,
    },
    Polyline2D { line_segments: Vec<[f64; 2]> },
    Box { size: DVec3 },
    /// A sphere; `None` leaves the radius at the renderer default of 1.
    Sphere { radius: Option<f64> },
    /// Rotates its children to face the viewer; a zero axis means free rotation.
    Billboard { axis_of_rotation: DVec3 },
    Text { string: String, solid: bool },
    FontStyle {
        size: f64,
        family: String,
        justify: String,
    },
}

impl NodeKind {
    /// Element name used in X3D markup.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::X3d { .. } => "x3d",
            NodeKind::Scene => "scene",
            NodeKind::OrthoViewpoint(_) => "orthoviewpoint",
            NodeKind::Transform(_) => "transform",
            NodeKind::Shape => "shape",
            NodeKind::Appearance => "appearance",
            NodeKind::Material { .. } => "material",
            NodeKind::Polyline2D { .. } => "polyline2d",
            NodeKind::Box { .. } => "box",
            NodeKind::Sphere { .. } => "sphere",
            NodeKind::Billboard { .. } => "billboard",
            NodeKind::Text { .. } => "text",
            NodeKind::FontStyle { .. } => "fontstyle",
        }
    }

    pub fn transform() -> Self {
        NodeKind::Transform(TransformNode::default())
    }

    pub fn diffuse(color: impl Into<String>) -> Self {
        NodeKind::Material {
            diffuse_color: Some(color.into()),
            emissive_color: None,
        }
    }

    pub fn emissive(color: impl Into<String>) -> Self {
        NodeKind::Material {
            diffuse_color: None,
            emissive_color: Some(color.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Selection class (the `class` attribute), e.g. `xTick` or `datapoint`.
    pub class: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn transform(&self) -> Option<&TransformNode> {
        match &self.kind {
            NodeKind::Transform(t) => Some(t),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: HashMap<NodeId, Node>,
    roots: Vec<NodeId>,
    next_id: u64,
    revision: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonic counter bumped by every structural or attribute mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn alloc(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                kind,
                class: None,
                parent,
                children: Vec::new(),
            },
        );
        self.revision += 1;
        id
    }

    pub fn add_root(&mut self, kind: NodeKind) -> NodeId {
        let id = self.alloc(kind, None);
        self.roots.push(id);
        id
    }

    /// Append a new child node. Appending to a missing parent creates a root.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        if !self.nodes.contains_key(&parent) {
            log::debug!("append to missing parent {parent}; creating a root node");
            return self.add_root(kind);
        }
        let id = self.alloc(kind, Some(parent));
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        id
    }

    pub fn append_with_class(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        class: impl Into<String>,
    ) -> NodeId {
        let id = self.append(parent, kind);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.class = Some(class.into());
        }
        id
    }

    /// Mutable access to a node's kind. Counts as a mutation.
    pub fn kind_mut(&mut self, id: NodeId) -> Option<&mut NodeKind> {
        let node = self.nodes.get_mut(&id)?;
        self.revision += 1;
        Some(&mut node.kind)
    }

    /// Mutable access to a transform node's attributes. Counts as a mutation.
    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut TransformNode> {
        match self.kind_mut(id)? {
            NodeKind::Transform(t) => Some(t),
            _ => None,
        }
    }

    /// Detach `id` from its parent and dispose of it and all descendants.
    /// Returns the number of nodes removed.
    pub fn remove_subtree(&mut self, id: NodeId) -> usize {
        let Some(node) = self.nodes.get(&id) else {
            return 0;
        };
        match node.parent {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(&parent) {
                    p.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }
        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        self.revision += 1;
        removed
    }

    /// Depth-first pre-order walk below (and including) `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.get(&next) {
                out.push(next);
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }

    /// First descendant of `id` (pre-order, excluding `id`) matching `pred`.
    pub fn find_descendant(
        &self,
        id: NodeId,
        pred: impl Fn(&NodeKind) -> bool,
    ) -> Option<NodeId> {
        self.descendants(id)
            .into_iter()
            .skip(1)
            .find(|n| self.nodes.get(n).is_some_and(|node| pred(&node.kind)))
    }

    /// All nodes carrying `class`, in document order.
    pub fn select_class(&self, class: &str) -> Vec<NodeId> {
        self.roots
            .iter()
            .flat_map(|r| self.descendants(*r))
            .filter(|id| {
                self.nodes
                    .get(id)
                    .and_then(|n| n.class.as_deref())
                    .is_some_and(|c| c == class)
            })
            .collect()
    }

    pub fn count_where(&self, pred: impl Fn(&Node) -> bool) -> usize {
        self.nodes.values().filter(|n| pred(n)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_subtree_detaches_and_disposes() {
        let mut g = SceneGraph::new();
        let root = g.add_root(NodeKind::Scene);
        let t = g.append_with_class(root, NodeKind::transform(), "xTick");
        let shape = g.append(t, NodeKind::Shape);
        g.append(shape, NodeKind::Box { size: DVec3::splat(0.1) });
        assert_eq!(g.len(), 4);

        assert_eq!(g.remove_subtree(t), 3);
        assert_eq!(g.len(), 1);
        assert!(g.get(root).unwrap().children().is_empty());
        assert!(g.select_class("xTick").is_empty());
    }

    #[test]
    fn revision_tracks_mutations_only() {
        let mut g = SceneGraph::new();
        let root = g.add_root(NodeKind::Scene);
        let rev = g.revision();
        let _ = g.select_class("datapoint");
        let _ = g.descendants(root);
        assert_eq!(g.revision(), rev);
        g.append(root, NodeKind::Shape);
        assert!(g.revision() > rev);
    }

    #[test]
    fn zero_axis_rotation_is_identity() {
        assert_eq!(AxisAngle::IDENTITY.to_quat(), DQuat::IDENTITY);
    }
}
