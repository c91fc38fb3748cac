//! Timed interpolation of node translations.
//!
//! The animator never owns attribute values: the scene graph holds the
//! declared target, the animator only knows how to get there from where the
//! node was displayed when the transition started.

use std::collections::HashMap;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::graph::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// Symmetric cubic ease, slow at both ends.
    CubicInOut,
}

impl Easing {
    /// Map normalized time `t` in `[0, 1]` to eased progress.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: DVec3,
    pub to: DVec3,
    pub start: f64,
    pub duration: f64,
    pub easing: Easing,
}

impl Tween {
    pub fn sample(&self, now: f64) -> DVec3 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = (now - self.start) / self.duration;
        self.from.lerp(self.to, self.easing.apply(t))
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.start + self.duration
    }
}

/// Active translation tweens keyed by node.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    tweens: HashMap<NodeId, Tween>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or retarget) the tween of `node`.
    pub fn start(&mut self, node: NodeId, tween: Tween) {
        self.tweens.insert(node, tween);
    }

    pub fn cancel(&mut self, node: NodeId) {
        self.tweens.remove(&node);
    }

    pub fn sample(&self, node: NodeId, now: f64) -> Option<DVec3> {
        self.tweens.get(&node).map(|t| t.sample(now))
    }

    pub fn get(&self, node: NodeId) -> Option<&Tween> {
        self.tweens.get(&node)
    }

    /// Drop tweens that reached their end. Returns how many were retired.
    pub fn retire_finished(&mut self, now: f64) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|_, t| !t.is_finished(now));
        before - self.tweens.len()
    }

    pub fn active(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_animating(&self) -> bool {
        !self.tweens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_in_out_is_symmetric() {
        let e = Easing::CubicInOut;
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(1.0), 1.0);
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn tween_clamps_past_end() {
        let tw = Tween {
            from: DVec3::ZERO,
            to: DVec3::X,
            start: 1.0,
            duration: 2.0,
            easing: Easing::Linear,
        };
        assert_eq!(tw.sample(0.0), DVec3::ZERO);
        assert_eq!(tw.sample(2.0), DVec3::new(0.5, 0.0, 0.0));
        assert_eq!(tw.sample(10.0), DVec3::X);
        assert!(tw.is_finished(3.0));
    }
}
