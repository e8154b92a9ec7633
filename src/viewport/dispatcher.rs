use crate::field::renderer::{RadialFieldRenderer, RedrawOutcome};
use crate::foundation::core::ViewportState;
use crate::foundation::error::RetrospectResult;
use crate::render::backend::Surface;
use crate::viewport::events::{EventSource, ViewportEvent};

/// Counters collected by a [`FrameDispatcher`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Events processed.
    pub events: u64,
    /// Redraws that produced a frame.
    pub drawn: u64,
    /// Redraws skipped because the viewport was unmeasured.
    pub skipped: u64,
}

impl DispatchStats {
    /// Total redraw attempts, including ones not triggered by an event.
    pub fn redraws(&self) -> u64 {
        self.drawn + self.skipped
    }
}

/// Owns the latest [`ViewportState`] and redraws the backdrop once per event.
///
/// Every event is folded into the state first, then exactly one redraw runs against a copy of the
/// updated state. `&mut self` on every entry point keeps redraws strictly sequential.
#[derive(Debug)]
pub struct FrameDispatcher<S: Surface> {
    state: ViewportState,
    renderer: RadialFieldRenderer,
    surface: S,
    stats: DispatchStats,
}

impl<S: Surface> FrameDispatcher<S> {
    /// Create a dispatcher; `surface` is resized to `initial` right away.
    pub fn new(
        renderer: RadialFieldRenderer,
        mut surface: S,
        initial: ViewportState,
    ) -> RetrospectResult<Self> {
        let (w, h) = initial.pixel_size();
        if surface.size() != (w, h) {
            surface.resize(w, h)?;
        }
        Ok(Self {
            state: initial,
            renderer,
            surface,
            stats: DispatchStats::default(),
        })
    }

    /// Latest viewport snapshot.
    pub fn state(&self) -> ViewportState {
        self.state
    }

    /// Counters so far.
    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// The drawing target.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the drawing target.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Give the drawing target back.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Draw the current state without applying an event.
    pub fn redraw(&mut self) -> RedrawOutcome {
        let snapshot = self.state;
        let outcome = self.renderer.redraw(&snapshot, &mut self.surface);
        match outcome {
            RedrawOutcome::Skipped => self.stats.skipped += 1,
            RedrawOutcome::Drawn { .. } => self.stats.drawn += 1,
        }
        outcome
    }

    /// Apply `event` and redraw exactly once.
    pub fn dispatch(&mut self, event: ViewportEvent) -> RetrospectResult<RedrawOutcome> {
        let next = match event {
            ViewportEvent::Scroll { offset } => self.state.with_scroll(offset),
            ViewportEvent::Resize { width, height } => self.state.with_size(width, height),
        };
        self.apply(next)
    }

    /// Replace the whole snapshot and redraw exactly once.
    ///
    /// Used when one input event changes both size and scroll position.
    pub fn apply(&mut self, next: ViewportState) -> RetrospectResult<RedrawOutcome> {
        let size = next.pixel_size();
        if size != self.state.pixel_size() || size != self.surface.size() {
            self.surface.resize(size.0, size.1)?;
        }
        self.state = next;
        self.stats.events += 1;
        Ok(self.redraw())
    }

    /// Drain `source` in order, one redraw per event.
    pub fn run(&mut self, mut source: impl EventSource) -> RetrospectResult<DispatchStats> {
        while let Some(event) = source.next_event() {
            self.dispatch(event)?;
        }
        tracing::debug!(stats = ?self.stats, "event source drained");
        Ok(self.stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/dispatcher.rs"]
mod tests;
