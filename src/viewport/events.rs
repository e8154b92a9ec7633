use std::collections::VecDeque;

/// Window-level input that affects the backdrop.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewportEvent {
    /// The document scrolled to `offset` pixels from the top.
    Scroll {
        /// New vertical scroll position.
        offset: f64,
    },
    /// The viewport was resized.
    Resize {
        /// New width in pixels.
        width: f64,
        /// New height in pixels.
        height: f64,
    },
}

/// Source of viewport events, e.g. a windowing backend or a scripted test sequence.
pub trait EventSource {
    /// Next pending event, or `None` once the source is drained.
    fn next_event(&mut self) -> Option<ViewportEvent>;
}

/// Upper bound on the events one [`ScriptedEvents::scroll_sweep`] may build.
pub const MAX_SWEEP_EVENTS: usize = 100_000;

/// In-memory FIFO of events.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEvents {
    queue: VecDeque<ViewportEvent>,
}

impl ScriptedEvents {
    /// Create a source that yields `events` in order.
    pub fn new(events: impl IntoIterator<Item = ViewportEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }

    /// Append an event.
    pub fn push(&mut self, event: ViewportEvent) {
        self.queue.push_back(event);
    }

    /// Events not yet consumed.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Return `true` when no events are pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Scroll from `from` to `to` (inclusive) in `step`-sized increments.
    ///
    /// Fails for non-finite bounds, a non-positive step, or a sweep longer than
    /// [`MAX_SWEEP_EVENTS`] events.
    pub fn scroll_sweep(from: f64, to: f64, step: f64) -> crate::RetrospectResult<Self> {
        if !(step.is_finite() && step > 0.0) || !from.is_finite() || !to.is_finite() {
            return Err(crate::RetrospectError::validation(format!(
                "scroll sweep needs finite bounds and a positive step, got {from}..{to} by {step}"
            )));
        }
        let steps = ((to - from).abs() / step).ceil();
        if !(steps < MAX_SWEEP_EVENTS as f64) {
            return Err(crate::RetrospectError::validation(format!(
                "scroll sweep {from}..{to} by {step} exceeds {MAX_SWEEP_EVENTS} events"
            )));
        }
        let dir = if to >= from { 1.0 } else { -1.0 };
        let mut out = Self::new((0..steps as usize).map(|k| ViewportEvent::Scroll {
            offset: from + dir * step * k as f64,
        }));
        out.push(ViewportEvent::Scroll { offset: to });
        Ok(out)
    }

    /// Parse a JSON array of events.
    pub fn from_json_str(s: &str) -> crate::RetrospectResult<Self> {
        let events: Vec<ViewportEvent> = serde_json::from_str(s)
            .map_err(|e| crate::RetrospectError::serde(format!("parse viewport events: {e}")))?;
        Ok(Self::new(events))
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> Option<ViewportEvent> {
        self.queue.pop_front()
    }
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn next_event(&mut self) -> Option<ViewportEvent> {
        (**self).next_event()
    }
}
