use std::collections::BTreeMap;

use crate::foundation::core::Rect;
use crate::visibility::dom::{Document, ElementId};

/// One viewport-intersection observation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    /// Observed element.
    pub target: ElementId,
    /// Whether any part of the target overlaps the viewport.
    pub is_intersecting: bool,
    /// Visible fraction of the target's area, in `[0, 1]`.
    pub ratio: f64,
}

/// Handle returned by [`IntersectionSource::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WatchId(u64);

/// Callback invoked on every intersection transition of a watched element.
pub type IntersectionListener = Box<dyn FnMut(&mut Document, &IntersectionEntry)>;

/// A viewport-visibility primitive.
pub trait IntersectionSource {
    /// Start watching `target`; `listener` fires on each intersection transition.
    fn subscribe(&mut self, target: ElementId, listener: IntersectionListener) -> WatchId;

    /// Stop a watch. Returns `false` if it was not active.
    fn unsubscribe(&mut self, watch: WatchId) -> bool;

    /// Return `true` when some active watch targets `target`.
    fn is_watched(&self, target: ElementId) -> bool;

    /// Number of active watches.
    fn active_watches(&self) -> usize;
}

struct Watch {
    target: ElementId,
    last: Option<bool>,
    listener: IntersectionListener,
}

/// Intersection source that compares element rects against a viewport rect on [`poll`].
///
/// A watch reports its first observation unconditionally and afterwards only transitions between
/// intersecting and not intersecting.
///
/// [`poll`]: BoundingBoxWatcher::poll
#[derive(Default)]
pub struct BoundingBoxWatcher {
    next_id: u64,
    watches: BTreeMap<WatchId, Watch>,
}

impl std::fmt::Debug for BoundingBoxWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundingBoxWatcher")
            .field("next_id", &self.next_id)
            .field("watches", &self.watches.len())
            .finish()
    }
}

impl BoundingBoxWatcher {
    /// Create a watcher with no subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare every watched element with `viewport` and notify transitions.
    ///
    /// Returns the number of listener invocations.
    pub fn poll(&mut self, doc: &mut Document, viewport: Rect) -> usize {
        let mut fired = 0;
        for watch in self.watches.values_mut() {
            let Some(rect) = doc.rect(watch.target) else {
                continue;
            };
            let ratio = intersection_ratio(rect, viewport);
            let is_intersecting = ratio > 0.0;
            if watch.last == Some(is_intersecting) {
                continue;
            }
            watch.last = Some(is_intersecting);
            let entry = IntersectionEntry {
                target: watch.target,
                is_intersecting,
                ratio,
            };
            (watch.listener)(doc, &entry);
            fired += 1;
        }
        fired
    }

    /// Deliver `entry` to every active watch on `entry.target`, bypassing geometry.
    ///
    /// Returns the number of listener invocations.
    pub fn dispatch(&mut self, doc: &mut Document, entry: IntersectionEntry) -> usize {
        let mut fired = 0;
        for watch in self
            .watches
            .values_mut()
            .filter(|w| w.target == entry.target)
        {
            watch.last = Some(entry.is_intersecting);
            (watch.listener)(doc, &entry);
            fired += 1;
        }
        fired
    }
}

impl IntersectionSource for BoundingBoxWatcher {
    fn subscribe(&mut self, target: ElementId, listener: IntersectionListener) -> WatchId {
        let id = WatchId(self.next_id);
        self.next_id += 1;
        self.watches.insert(
            id,
            Watch {
                target,
                last: None,
                listener,
            },
        );
        tracing::debug!(?id, ?target, "intersection watch started");
        id
    }

    fn unsubscribe(&mut self, watch: WatchId) -> bool {
        let removed = self.watches.remove(&watch).is_some();
        if removed {
            tracing::debug!(id = ?watch, "intersection watch stopped");
        }
        removed
    }

    fn is_watched(&self, target: ElementId) -> bool {
        self.watches.values().any(|w| w.target == target)
    }

    fn active_watches(&self) -> usize {
        self.watches.len()
    }
}

/// Fraction of `target`'s area inside `viewport`; `0.0` for empty targets or no overlap.
pub fn intersection_ratio(target: Rect, viewport: Rect) -> f64 {
    let target = target.abs();
    let area = target.area();
    if !(area > 0.0) {
        return 0.0;
    }
    let overlap = target.intersect(viewport.abs());
    (overlap.area() / area).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/visibility/intersection.rs"]
mod tests;
