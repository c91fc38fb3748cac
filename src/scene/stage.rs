//! `Stage`: the scene graph together with its transition animator and clock.

use glam::DVec3;

use super::graph::{NodeId, SceneGraph};
use super::transition::{Animator, Easing, Tween};

#[derive(Debug, Clone, Default)]
pub struct Stage {
    pub graph: SceneGraph,
    animator: Animator,
    clock: f64,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in seconds, as last set by [`advance`](Self::advance).
    pub fn now(&self) -> f64 {
        self.clock
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Move the clock forward and retire finished transitions.
    /// A clock that goes backwards is ignored.
    pub fn advance(&mut self, now: f64) {
        if now > self.clock {
            self.clock = now;
        }
        let retired = self.animator.retire_finished(self.clock);
        if retired > 0 {
            log::trace!("retired {retired} transitions at t={:.3}", self.clock);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Translation as currently displayed: mid-transition value when a tween
    /// is running, the declared value otherwise.
    pub fn displayed_translation(&self, node: NodeId) -> Option<DVec3> {
        if let Some(v) = self.animator.sample(node, self.clock) {
            return Some(v);
        }
        self.graph
            .get(node)
            .and_then(|n| n.transform())
            .map(|t| t.translation.unwrap_or(DVec3::ZERO))
    }

    /// Declare a new translation for `node`, transitioning to it over
    /// `duration` seconds. Nodes without a previous translation (fresh
    /// enters) and non-positive durations are placed immediately.
    pub fn transition_translation(
        &mut self,
        node: NodeId,
        target: DVec3,
        duration: f64,
        easing: Easing,
    ) {
        let had_translation = self
            .graph
            .get(node)
            .and_then(|n| n.transform())
            .is_some_and(|t| t.translation.is_some());
        let from = self.displayed_translation(node);
        let Some(t) = self.graph.transform_mut(node) else {
            log::debug!("transition on non-transform {node} ignored");
            return;
        };
        t.translation = Some(target);

        match from {
            Some(from) if had_translation && duration > 0.0 && from != target => {
                self.animator.start(
                    node,
                    Tween {
                        from,
                        to: target,
                        start: self.clock,
                        duration,
                        easing,
                    },
                );
            }
            _ => self.animator.cancel(node),
        }
    }

    /// Remove a node subtree and any transitions attached to it.
    pub fn remove(&mut self, node: NodeId) -> usize {
        for id in self.graph.descendants(node) {
            self.animator.cancel(id);
        }
        self.graph.remove_subtree(node)
    }
}
