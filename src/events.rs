//! Event system for the scatter plot.
//!
//! Callers can subscribe to plot lifecycle events and diagnostics via
//! [`EventController`].  Each event carries a set of [`EventKind`] flags
//! (bitflags-style) so that a single occurrence can match multiple
//! categories (e.g. an empty-data skip is both `DIAGNOSTIC` and `NO_ROWS`).
//!
//! The caller specifies an [`EventFilter`] to receive only the events they
//! care about.  The filter is a simple OR mask: an event is delivered when
//! `(event.kinds & filter) != 0`.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::data::rows::Field;
use crate::plot::AxisIndex;

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the *categories* an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u64);

impl EventKind {
    // ── Viewport ────────────────────────────────────────────────────────
    /// The viewport, scene root and viewpoint were created.
    pub const VIEWPORT_CREATED: Self = Self(1 << 0);
    /// The viewport was resized to a new container size.
    pub const RESIZE: Self = Self(1 << 1);
    /// The renderer reported that it finished initializing.
    pub const RENDERER_READY: Self = Self(1 << 2);

    // ── Axes ────────────────────────────────────────────────────────────
    /// An axis was configured (scale, ticks and static geometry built).
    pub const AXIS_CONFIGURED: Self = Self(1 << 3);
    /// An axis' scale was rebuilt and its ticks reconciled.
    pub const AXIS_RENDERED: Self = Self(1 << 4);

    // ── Data ────────────────────────────────────────────────────────────
    /// Data markers were reconciled against the row set.
    pub const DATA_RENDERED: Self = Self(1 << 5);
    /// The animation step rewrote row values.
    pub const ROWS_ANIMATED: Self = Self(1 << 6);

    // ── Diagnostics ─────────────────────────────────────────────────────
    /// A non-fatal condition caused an operation to be skipped.
    pub const DIAGNOSTIC: Self = Self(1 << 7);
    /// Rendering was skipped because there were no rows.
    pub const NO_ROWS: Self = Self(1 << 8);
    /// An animation tick was skipped because the renderer was not ready.
    pub const RENDERER_NOT_READY: Self = Self(1 << 9);

    // ── Export ──────────────────────────────────────────────────────────
    /// The scene was serialized to X3D markup.
    pub const EXPORT: Self = Self(1 << 10);

    /// Wildcard: matches *every* event kind.
    pub const ALL: Self = Self(u64::MAX);

    /// Combine two event kinds (bitwise OR).
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether `self` contains all bits in `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether `self` intersects with `other` (at least one bit in common).
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Returns `true` if no bits are set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EventKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for EventKind {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// String conversions
// ─────────────────────────────────────────────────────────────────────────────

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        if *self == EventKind::ALL {
            return write!(f, "ALL");
        }

        let pairs: &[(EventKind, &str)] = &[
            (EventKind::VIEWPORT_CREATED, "VIEWPORT_CREATED"),
            (EventKind::RESIZE, "RESIZE"),
            (EventKind::RENDERER_READY, "RENDERER_READY"),
            (EventKind::AXIS_CONFIGURED, "AXIS_CONFIGURED"),
            (EventKind::AXIS_RENDERED, "AXIS_RENDERED"),
            (EventKind::DATA_RENDERED, "DATA_RENDERED"),
            (EventKind::ROWS_ANIMATED, "ROWS_ANIMATED"),
            (EventKind::DIAGNOSTIC, "DIAGNOSTIC"),
            (EventKind::NO_ROWS, "NO_ROWS"),
            (EventKind::RENDERER_NOT_READY, "RENDERER_NOT_READY"),
            (EventKind::EXPORT, "EXPORT"),
        ];

        let mut names = Vec::new();
        let mut known_bits: u64 = 0;
        for (kind, name) in pairs {
            known_bits |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }

        let extra = self.0 & !known_bits;
        if extra != 0 {
            names.push(format!("0x{:x}", extra));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Metadata – per-event-type payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Metadata for axis events.
#[derive(Debug, Clone)]
pub struct AxisMeta {
    pub axis: AxisIndex,
    /// Field currently bound to the axis.
    pub field: Field,
    /// Tick values after the render, ascending.
    pub ticks: Vec<f64>,
}

/// Counts from a keyed reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileMeta {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// Metadata for resize events.
#[derive(Debug, Clone, Copy)]
pub struct ResizeMeta {
    /// New size in logical pixels.
    pub width: f32,
    pub height: f32,
}

/// Metadata for animation steps.
#[derive(Debug, Clone, Copy)]
pub struct AnimationMeta {
    /// Driver time after the step, in radians of the sinusoid phase.
    pub phase: f64,
    pub rows: usize,
}

/// Metadata for export events.
#[derive(Debug, Clone)]
pub struct ExportMeta {
    pub format: String,
    pub path: Option<String>,
    pub bytes: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// PlotEvent – the top-level event type
// ─────────────────────────────────────────────────────────────────────────────

/// An event emitted by a [`ScatterPlot`](crate::plot::ScatterPlot).
///
/// `kinds` is a bitflag set of [`EventKind`] categories.  The various
/// `Option<…Meta>` fields carry metadata relevant to the kinds that are set.
#[derive(Debug, Clone)]
pub struct PlotEvent {
    /// Bitflag set of categories this event belongs to.
    pub kinds: EventKind,
    /// Monotonic timestamp (seconds since the controller was created).
    pub timestamp: f64,
    /// Human-readable diagnostic text, set for `DIAGNOSTIC` events.
    pub message: Option<String>,

    // ── Optional metadata ────────────────────────────────────────────────
    pub axis: Option<AxisMeta>,
    pub reconcile: Option<ReconcileMeta>,
    pub resize: Option<ResizeMeta>,
    pub animation: Option<AnimationMeta>,
    pub export: Option<ExportMeta>,
}

impl PlotEvent {
    /// Create a new event with the given kinds; the timestamp is set on emit.
    pub fn new(kinds: EventKind) -> Self {
        Self {
            kinds,
            timestamp: 0.0,
            message: None,
            axis: None,
            reconcile: None,
            resize: None,
            animation: None,
            export: None,
        }
    }

    /// A `DIAGNOSTIC` event with the given extra kinds and message.
    pub fn diagnostic(kinds: EventKind, message: impl Into<String>) -> Self {
        let mut evt = Self::new(EventKind::DIAGNOSTIC | kinds);
        evt.message = Some(message.into());
        evt
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter
// ─────────────────────────────────────────────────────────────────────────────

/// A filter that selects which event categories a subscriber receives.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: EventKind,
}

impl EventFilter {
    /// Accept all events.
    pub const fn all() -> Self {
        Self {
            mask: EventKind::ALL,
        }
    }

    /// Accept only the specified event kinds.
    pub const fn only(mask: EventKind) -> Self {
        Self { mask }
    }

    /// Check whether an event passes this filter.
    #[inline]
    pub fn matches(&self, event: &PlotEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventController
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) struct Subscriber {
    filter: EventFilter,
    sender: Sender<PlotEvent>,
}

/// Controller that distributes plot events to subscribers.
///
/// Every [`ScatterPlot`](crate::plot::ScatterPlot) owns one; clone the handle
/// via [`ScatterPlot::events`](crate::plot::ScatterPlot::events) and call
/// [`subscribe`](Self::subscribe) to receive events on an `mpsc` channel.
#[derive(Clone)]
pub struct EventController {
    pub(crate) inner: Arc<Mutex<EventCtrlInner>>,
}

pub(crate) struct EventCtrlInner {
    pub(crate) subscribers: Vec<Subscriber>,
    pub(crate) start_instant: web_time::Instant,
}

impl EventController {
    /// Create a new event controller.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EventCtrlInner {
                subscribers: Vec::new(),
                start_instant: web_time::Instant::now(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EventCtrlInner> {
        // A panicked subscriber cannot leave the list half-updated.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Subscribe to events matching the given filter.
    pub fn subscribe(&self, filter: EventFilter) -> Receiver<PlotEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.lock().subscribers.push(Subscriber { filter, sender: tx });
        rx
    }

    /// Subscribe to *all* events (no filtering).
    pub fn subscribe_all(&self) -> Receiver<PlotEvent> {
        self.subscribe(EventFilter::all())
    }

    /// Emit an event to all matching subscribers. Subscribers whose receiver
    /// was dropped are removed the next time an event matches them.
    pub fn emit(&self, mut event: PlotEvent) {
        let mut inner = self.lock();
        event.timestamp = inner.start_instant.elapsed().as_secs_f64();
        inner.subscribers.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

impl Default for EventController {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_carries_both_kinds() {
        let evt = PlotEvent::diagnostic(EventKind::NO_ROWS, "no rows to plot");
        assert!(evt.kinds.contains(EventKind::DIAGNOSTIC));
        assert!(evt.kinds.contains(EventKind::NO_ROWS));
        assert!(!evt.kinds.intersects(EventKind::RENDERER_NOT_READY));
    }

    #[test]
    fn event_filter_matches() {
        let filter = EventFilter::only(EventKind::DIAGNOSTIC);
        assert!(filter.matches(&PlotEvent::diagnostic(EventKind::NO_ROWS, "x")));
        assert!(!filter.matches(&PlotEvent::new(EventKind::DATA_RENDERED)));
    }

    #[test]
    fn display_joins_names() {
        let k = EventKind::DIAGNOSTIC | EventKind::NO_ROWS;
        assert_eq!(k.to_string(), "DIAGNOSTIC|NO_ROWS");
        assert_eq!(EventKind(0).to_string(), "EMPTY");
        assert_eq!(EventKind::ALL.to_string(), "ALL");
    }

    #[test]
    fn dropped_subscriber_is_pruned() {
        let ctrl = EventController::new();
        let rx = ctrl.subscribe_all();
        let _keep = ctrl.subscribe(EventFilter::only(EventKind::EXPORT));
        drop(rx);
        ctrl.emit(PlotEvent::new(EventKind::DATA_RENDERED));
        assert_eq!(ctrl.subscriber_count(), 1);
    }
}
