//! Animation driver: a single step that rewrites the vertical field of every
//! row from the two floor fields and a running phase.

use super::{AnimationOutcome, AxisIndex, ScatterPlot};
use crate::error::PlotError;
use crate::events::{AnimationMeta, EventKind, PlotEvent};

/// Normalized wave in `[-1, 1]` for the floor values `a`, `c` at phase `t`.
pub fn wave(a: f64, c: f64, t: f64) -> f64 {
    (0.5 * a + t).sin() * (0.25 * c + t).cos()
}

impl ScatterPlot {
    /// Advance the phase by one time step and, if the renderer is ready,
    /// recompute the field bound to the vertical axis for every row, then
    /// re-plot with the default duration.
    ///
    /// The wave is applied in display space (`mid + half * s` of the Y range)
    /// and inverted through the Y scale, so rewritten values stay positive.
    pub fn update_data(&mut self) -> Result<AnimationOutcome, PlotError> {
        if !self.renderer_ready {
            self.time += self.config.animation.time_step;
            self.diagnostic(EventKind::RENDERER_NOT_READY, "renderer not ready; animation step skipped");
            return Ok(AnimationOutcome::NotReady);
        }

        // A failed step leaves the phase where it was.
        let y_scale = self.require_scale(AxisIndex::Y)?;
        self.time += self.config.animation.time_step;
        let fx = self.axes[AxisIndex::X.index()].field;
        let fy = self.axes[AxisIndex::Y.index()].field;
        let fz = self.axes[AxisIndex::Z.index()].field;
        let range = y_scale.range();
        let (mid, half) = (range.mid(), 0.5 * range.span());
        let t = self.time;

        for (_, row) in self.rows.iter_mut() {
            let s = wave(row.get(fx), row.get(fz), t);
            row.set(fy, y_scale.invert(mid + half * s));
        }

        let mut evt = PlotEvent::new(EventKind::ROWS_ANIMATED);
        evt.animation = Some(AnimationMeta {
            phase: t,
            rows: self.rows.len(),
        });
        self.events.emit(evt);

        let outcome = self.plot_data(self.config.timing.default_duration)?;
        Ok(AnimationOutcome::Stepped(outcome))
    }
}
