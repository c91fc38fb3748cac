//! Renderer-independent scene core: node graph, transitions, keyed
//! reconciliation and X3D serialization.

pub mod graph;
pub mod reconcile;
pub mod stage;
pub mod transition;
pub mod x3d;

pub use graph::{AxisAngle, Node, NodeId, NodeKind, SceneGraph, TransformNode, Viewpoint};
pub use reconcile::{reconcile, Binding, KeyedNodes, ReconcileReport};
pub use stage::Stage;
pub use transition::{Animator, Easing, Tween};
pub use x3d::to_x3d_string;
