use super::*;
use crate::render::recording::RecordingSurface;
use crate::viewport::events::ScriptedEvents;
use crate::visibility::intersection::IntersectionSource;

fn page() -> LandingPage<RecordingSurface> {
    LandingPage::new(&SiteConfig::default(), RecordingSurface::default()).unwrap()
}

#[test]
fn mount_draws_once_and_pops_first_section() {
    let p = page();
    assert_eq!(p.stats().drawn, 1);
    assert_eq!(p.surface().stroke_count(), 72);
    assert!(p.is_popped_out("first"));
    assert!(!p.is_popped_out("second"));
    assert!(p.scroll_hint_visible());
    assert_eq!(p.section("first").unwrap().phase(), ObservedPhase::Intersecting);
    assert_eq!(p.section("second").unwrap().phase(), ObservedPhase::NonIntersecting);
}

#[test]
fn layout_stacks_sections_at_section_height() {
    let p = page();
    assert_eq!(p.section_height(), 960.0);
    assert_eq!(p.scroll_height(), 1920.0);
    assert_eq!(p.max_scroll(), 1120.0);
    let second = p.section("second").unwrap();
    assert_eq!(
        p.document().rect(second.container()),
        Some(Rect::new(0.0, 960.0, 1280.0, 1920.0))
    );
}

#[test]
fn scrolling_moves_the_marker_between_sections() {
    let mut p = page();
    p.handle(ViewportEvent::Scroll { offset: 400.0 }).unwrap();
    assert!(p.is_popped_out("first"));
    assert!(p.is_popped_out("second"));
    assert!(!p.scroll_hint_visible());

    p.handle(ViewportEvent::Scroll { offset: 1120.0 }).unwrap();
    assert!(!p.is_popped_out("first"));
    assert!(p.is_popped_out("second"));

    p.handle(ViewportEvent::Scroll { offset: 0.0 }).unwrap();
    assert!(p.is_popped_out("first"));
    assert!(!p.is_popped_out("second"));
    assert!(p.scroll_hint_visible());
}

#[test]
fn scroll_is_clamped_to_document() {
    let mut p = page();
    p.handle(ViewportEvent::Scroll { offset: 5000.0 }).unwrap();
    assert_eq!(p.viewport().scroll_offset, 1120.0);
    p.handle(ViewportEvent::Scroll { offset: -30.0 }).unwrap();
    assert_eq!(p.viewport().scroll_offset, 0.0);
}

#[test]
fn shrinking_resize_clamps_scroll_in_a_single_redraw() {
    let mut p = page();
    p.handle(ViewportEvent::Scroll { offset: 1120.0 }).unwrap();
    let before = p.stats();
    p.handle(ViewportEvent::Resize {
        width: 1280.0,
        height: 400.0,
    })
    .unwrap();
    assert_eq!(p.stats().events, before.events + 1);
    assert_eq!(p.stats().redraws(), before.redraws() + 1);
    assert_eq!(p.viewport(), ViewportState::new(1280.0, 400.0, 560.0));
    assert!(!p.is_popped_out("first"));
    assert!(p.is_popped_out("second"));
}

#[test]
fn run_processes_every_event() {
    let mut p = page();
    let stats = p.run(ScriptedEvents::scroll_sweep(0.0, 1120.0, 100.0).unwrap()).unwrap();
    assert_eq!(stats.events, 13);
    assert_eq!(stats.drawn, 14);
    assert!(p.is_popped_out("second"));
}

#[test]
fn unmounted_section_ignores_synthetic_events() {
    let mut p = page();
    assert!(p.unmount_section("first"));
    assert!(!p.unmount_section("first"));
    assert_eq!(p.section("first").unwrap().phase(), ObservedPhase::Unwatched);

    let container = p.section("first").unwrap().container();
    let before = p.document().class_mutations();
    let fired = p.dispatch_intersection(IntersectionEntry {
        target: container,
        is_intersecting: false,
        ratio: 0.0,
    });
    assert_eq!(fired, 0);
    p.handle(ViewportEvent::Scroll { offset: 1120.0 }).unwrap();
    assert!(p.is_popped_out("first"));
    assert_eq!(
        p.document().class_mutations(),
        before + 1,
        "only the second section may change"
    );
}

#[test]
fn unmount_stops_every_watch() {
    let mut p = page();
    p.unmount();
    assert_eq!(p.watcher().active_watches(), 0);
}

#[test]
fn unmeasured_viewport_draws_nothing_and_pops_nothing() {
    let mut cfg = SiteConfig::default();
    cfg.viewport.width = 0.0;
    cfg.viewport.height = 0.0;
    let mut p = LandingPage::new(&cfg, RecordingSurface::default()).unwrap();
    assert_eq!(p.surface().stroke_count(), 0);
    assert_eq!(p.stats().skipped, 1);
    assert!(!p.is_popped_out("first"));

    p.handle(ViewportEvent::Resize {
        width: 800.0,
        height: 600.0,
    })
    .unwrap();
    assert!(p.is_popped_out("first"));
    assert_eq!(p.surface().stroke_count(), 72);
}

#[test]
fn snapshot_lists_sections_in_order() {
    let p = page();
    let snap = p.snapshot();
    assert!(snap.scroll_hint);
    assert_eq!(
        snap.sections,
        vec![("first".to_string(), true), ("second".to_string(), false)]
    );
}
