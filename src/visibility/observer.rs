use std::cell::Cell;
use std::rc::Rc;

use crate::visibility::dom::{Document, ElementId};
use crate::visibility::intersection::{IntersectionEntry, IntersectionSource, WatchId};
use crate::visibility::selector::Selector;

/// Lifecycle of an observed container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObservedPhase {
    /// No container attached, or torn down.
    Unwatched,
    /// Watching; no observation delivered yet.
    Watching,
    /// Last observation: the container overlaps the viewport.
    Intersecting,
    /// Last observation: the container is outside the viewport.
    NonIntersecting,
}

/// Toggles a marker class on the first descendant matching a selector while the observed
/// container intersects the viewport.
///
/// An observer holds at most one watch at a time. Changing the class or selector, re-attaching,
/// detaching or dropping the owning page all stop the previous watch before anything new starts.
#[derive(Debug)]
pub struct VisibilityObserver {
    marker_class: String,
    selector: String,
    container: Option<ElementId>,
    watch: Option<WatchId>,
    last_seen: Rc<Cell<Option<bool>>>,
}

impl VisibilityObserver {
    /// Create a detached observer.
    pub fn new(marker_class: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            marker_class: marker_class.into(),
            selector: selector.into(),
            container: None,
            watch: None,
            last_seen: Rc::new(Cell::new(None)),
        }
    }

    /// Class toggled on the matched descendant.
    pub fn marker_class(&self) -> &str {
        &self.marker_class
    }

    /// Selector used to find the descendant.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Attached container, if any.
    pub fn container(&self) -> Option<ElementId> {
        self.container
    }

    /// Return `true` while a watch is active.
    pub fn is_watching(&self) -> bool {
        self.watch.is_some()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> ObservedPhase {
        match (self.watch, self.last_seen.get()) {
            (None, _) => ObservedPhase::Unwatched,
            (Some(_), None) => ObservedPhase::Watching,
            (Some(_), Some(true)) => ObservedPhase::Intersecting,
            (Some(_), Some(false)) => ObservedPhase::NonIntersecting,
        }
    }

    /// Assign the attachment point and start watching it.
    ///
    /// Returns `false` without watching when `container` is already watched by someone else.
    pub fn attach<S: IntersectionSource + ?Sized>(
        &mut self,
        source: &mut S,
        container: ElementId,
    ) -> bool {
        self.teardown(source);
        if source.is_watched(container) {
            tracing::warn!(?container, "container already observed; refusing to share it");
            return false;
        }
        self.container = Some(container);
        self.subscribe(source);
        true
    }

    /// Stop watching and forget the attachment point.
    pub fn detach<S: IntersectionSource + ?Sized>(&mut self, source: &mut S) {
        self.teardown(source);
        self.container = None;
    }

    /// Replace the marker class and selector.
    ///
    /// If either changed while attached, the current watch is stopped before a new one starts.
    pub fn configure<S: IntersectionSource + ?Sized>(
        &mut self,
        source: &mut S,
        marker_class: impl Into<String>,
        selector: impl Into<String>,
    ) {
        let marker_class = marker_class.into();
        let selector = selector.into();
        if marker_class == self.marker_class && selector == self.selector {
            return;
        }
        self.teardown(source);
        self.marker_class = marker_class;
        self.selector = selector;
        if self.container.is_some() {
            self.subscribe(source);
        }
    }

    fn teardown<S: IntersectionSource + ?Sized>(&mut self, source: &mut S) {
        if let Some(watch) = self.watch.take() {
            source.unsubscribe(watch);
        }
        self.last_seen.set(None);
    }

    fn subscribe<S: IntersectionSource + ?Sized>(&mut self, source: &mut S) {
        let Some(container) = self.container else {
            return;
        };
        debug_assert!(self.watch.is_none());

        // One cell per watch; the previous watch's cell is dropped with its listener.
        let seen = Rc::new(Cell::new(None));
        self.last_seen = Rc::clone(&seen);
        let marker_class = self.marker_class.clone();
        let selector = self.selector.parse::<Selector>().ok();
        if selector.is_none() {
            tracing::debug!(
                selector = %self.selector,
                "selector is malformed; observer will never match"
            );
        }

        let watch = source.subscribe(
            container,
            Box::new(move |doc, entry| {
                seen.set(Some(entry.is_intersecting));
                apply_entry(doc, entry, selector.as_ref(), &marker_class);
            }),
        );
        self.watch = Some(watch);
    }
}

/// Apply one observation: toggle `marker_class` on the first descendant matching `selector`.
///
/// Returns the descendant that was considered, `None` when nothing matched.
pub fn apply_entry(
    doc: &mut Document,
    entry: &IntersectionEntry,
    selector: Option<&Selector>,
    marker_class: &str,
) -> Option<ElementId> {
    let child = doc.query_parsed(entry.target, selector?)?;
    if entry.is_intersecting {
        doc.add_class(child, marker_class);
    } else {
        doc.remove_class(child, marker_class);
    }
    Some(child)
}

#[cfg(test)]
#[path = "../../tests/unit/visibility/observer.rs"]
mod tests;
