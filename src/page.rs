//! The landing page: a fixed radial backdrop behind stacked, full-viewport sections whose
//! content pops in while each section is on screen.

use crate::config::SiteConfig;
use crate::field::renderer::{RadialFieldRenderer, RedrawOutcome};
use crate::foundation::core::{Rect, ViewportState};
use crate::foundation::error::{RetrospectError, RetrospectResult};
use crate::render::backend::Surface;
use crate::viewport::dispatcher::{DispatchStats, FrameDispatcher};
use crate::viewport::events::{EventSource, ViewportEvent};
use crate::visibility::dom::{Document, ElementId};
use crate::visibility::intersection::{BoundingBoxWatcher, IntersectionEntry};
use crate::visibility::observer::{ObservedPhase, VisibilityObserver};

/// One observed section of the page.
#[derive(Debug)]
pub struct Section {
    name: String,
    container: ElementId,
    content: ElementId,
    observer: VisibilityObserver,
}

impl Section {
    /// Section name from the config.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The observed container element.
    pub fn container(&self) -> ElementId {
        self.container
    }

    /// The content element that receives the marker class.
    pub fn content(&self) -> ElementId {
        self.content
    }

    /// Observer lifecycle phase.
    pub fn phase(&self) -> ObservedPhase {
        self.observer.phase()
    }
}

/// Snapshot of what the page currently shows.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageSnapshot {
    /// Viewport state used for the last redraw.
    pub viewport: ViewportState,
    /// Whether the "Scroll down" hint is shown.
    pub scroll_hint: bool,
    /// `(section name, content marked)` in page order.
    pub sections: Vec<(String, bool)>,
}

/// Composition root for the backdrop renderer and the section observers.
#[derive(Debug)]
pub struct LandingPage<S: Surface> {
    marker_class: String,
    section_height_vh: f64,
    scroll_hint_fraction: f64,
    document: Document,
    root: ElementId,
    watcher: BoundingBoxWatcher,
    sections: Vec<Section>,
    dispatcher: FrameDispatcher<S>,
}

impl<S: Surface> LandingPage<S> {
    /// Build the page for `config`, draw the first frame and apply initial visibility.
    pub fn new(config: &SiteConfig, surface: S) -> RetrospectResult<Self> {
        config.validate()?;
        let renderer = RadialFieldRenderer::new(config.field)?;
        let dispatcher = FrameDispatcher::new(renderer, surface, config.viewport.state())?;

        let mut document = Document::new();
        let root = document.create_element("main", &[]);
        let mut watcher = BoundingBoxWatcher::new();
        let mut sections = Vec::with_capacity(config.sections.len());

        for (i, sc) in config.sections.iter().enumerate() {
            let container = document.create_element("div", &[]);
            let content_class = format!("child-{}", i + 1);
            let content = document.create_element("div", &["h-full", content_class.as_str()]);
            document.append_child(root, container);
            document.append_child(container, content);

            let mut observer = VisibilityObserver::new(&config.marker_class, &sc.selector);
            if !observer.attach(&mut watcher, container) {
                return Err(RetrospectError::validation(format!(
                    "section '{}' could not be observed",
                    sc.name
                )));
            }
            sections.push(Section {
                name: sc.name.clone(),
                container,
                content,
                observer,
            });
        }

        let mut page = Self {
            marker_class: config.marker_class.clone(),
            section_height_vh: config.section_height_vh,
            scroll_hint_fraction: config.scroll_hint_fraction,
            document,
            root,
            watcher,
            sections,
            dispatcher,
        };
        page.layout();
        page.dispatcher.redraw();
        page.refresh_visibility();
        tracing::info!(
            sections = page.sections.len(),
            viewport = ?page.viewport(),
            "landing page mounted"
        );
        Ok(page)
    }

    /// Latest viewport state.
    pub fn viewport(&self) -> ViewportState {
        self.dispatcher.state()
    }

    /// Redraw counters.
    pub fn stats(&self) -> DispatchStats {
        self.dispatcher.stats()
    }

    /// The backdrop drawing target.
    pub fn surface(&self) -> &S {
        self.dispatcher.surface()
    }

    /// The element tree.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable element tree, e.g. for injecting extra content.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The intersection source shared by all sections.
    pub fn watcher(&self) -> &BoundingBoxWatcher {
        &self.watcher
    }

    /// Deliver a synthetic intersection observation to whatever still watches its target.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch_intersection(&mut self, entry: IntersectionEntry) -> usize {
        self.watcher.dispatch(&mut self.document, entry)
    }

    /// Root `main` element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Sections in page order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Section by name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Return `true` while the named section's content carries the marker class.
    pub fn is_popped_out(&self, name: &str) -> bool {
        self.section(name)
            .is_some_and(|s| self.document.has_class(s.content, &self.marker_class))
    }

    /// Height of one section in pixels.
    pub fn section_height(&self) -> f64 {
        self.viewport().height * self.section_height_vh
    }

    /// Total scrollable document height.
    pub fn scroll_height(&self) -> f64 {
        self.section_height() * self.sections.len() as f64
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height() - self.viewport().height).max(0.0)
    }

    /// Whether the "Scroll down" hint is visible.
    pub fn scroll_hint_visible(&self) -> bool {
        let v = self.viewport();
        v.scroll_offset < v.height * self.scroll_hint_fraction
    }

    /// Current page snapshot.
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            viewport: self.viewport(),
            scroll_hint: self.scroll_hint_visible(),
            sections: self
                .sections
                .iter()
                .map(|s| (s.name.clone(), self.is_popped_out(&s.name)))
                .collect(),
        }
    }

    /// Apply one viewport event: redraw the backdrop once, then update section visibility.
    ///
    /// Scroll offsets are clamped to the scrollable range; a resize that shrinks the document
    /// clamps the current offset in the same redraw.
    pub fn handle(&mut self, event: ViewportEvent) -> RetrospectResult<RedrawOutcome> {
        let current = self.viewport();
        let next = match event {
            ViewportEvent::Scroll { offset } => current.with_scroll(offset),
            ViewportEvent::Resize { width, height } => current.with_size(width, height),
        };
        let next = next.with_scroll(self.clamp_scroll_for(&next));
        let outcome = self.dispatcher.apply(next)?;
        if let ViewportEvent::Resize { .. } = event {
            self.layout();
        }
        self.refresh_visibility();
        Ok(outcome)
    }

    /// Drain `source` through [`LandingPage::handle`].
    pub fn run(&mut self, mut source: impl EventSource) -> RetrospectResult<DispatchStats> {
        while let Some(event) = source.next_event() {
            self.handle(event)?;
        }
        Ok(self.stats())
    }

    /// Stop observing the named section. Returns `false` if no such section is watching.
    pub fn unmount_section(&mut self, name: &str) -> bool {
        let Some(section) = self.sections.iter_mut().find(|s| s.name == name) else {
            return false;
        };
        if !section.observer.is_watching() {
            return false;
        }
        section.observer.detach(&mut self.watcher);
        tracing::debug!(section = name, "section unmounted");
        true
    }

    /// Stop observing every section.
    pub fn unmount(&mut self) {
        for section in &mut self.sections {
            section.observer.detach(&mut self.watcher);
        }
    }

    fn clamp_scroll_for(&self, state: &ViewportState) -> f64 {
        let scroll_height = state.height * self.section_height_vh * self.sections.len() as f64;
        let max = (scroll_height - state.height).max(0.0);
        state.scroll_offset.clamp(0.0, max)
    }

    fn layout(&mut self) {
        let width = self.viewport().width;
        let h = self.section_height();
        for (i, s) in self.sections.iter().enumerate() {
            let top = h * i as f64;
            let rect = Rect::new(0.0, top, width, top + h);
            self.document.set_rect(s.container, rect);
            self.document.set_rect(s.content, rect);
        }
        self.document
            .set_rect(self.root, Rect::new(0.0, 0.0, width, self.scroll_height()));
    }

    fn refresh_visibility(&mut self) {
        let visible = self.viewport().visible_rect();
        self.watcher.poll(&mut self.document, visible);
    }
}

impl<S: Surface> Drop for LandingPage<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "../tests/unit/page/page.rs"]
mod tests;
