use super::*;
use crate::field::renderer::FieldStyle;
use crate::render::recording::{RecordingSurface, SurfaceOp};
use crate::viewport::events::{MAX_SWEEP_EVENTS, ScriptedEvents};

fn dispatcher(initial: ViewportState) -> FrameDispatcher<RecordingSurface> {
    let renderer = RadialFieldRenderer::new(FieldStyle::default()).unwrap();
    FrameDispatcher::new(renderer, RecordingSurface::default(), initial).unwrap()
}

#[test]
fn new_sizes_surface_to_initial_viewport() {
    let d = dispatcher(ViewportState::new(640.5, 480.0, 0.0));
    assert_eq!(d.surface().size(), (641, 480));
}

#[test]
fn each_event_triggers_exactly_one_redraw() {
    let mut d = dispatcher(ViewportState::new(800.0, 600.0, 0.0));
    d.surface_mut().reset();
    let events = ScriptedEvents::new([
        ViewportEvent::Scroll { offset: 10.0 },
        ViewportEvent::Resize {
            width: 1024.0,
            height: 768.0,
        },
        ViewportEvent::Scroll { offset: 20.0 },
    ]);
    let stats = d.run(events).unwrap();
    assert_eq!(stats.events, 3);
    assert_eq!(stats.drawn, 3);
    assert_eq!(stats.redraws(), 3);
    let presents = d
        .surface()
        .ops()
        .iter()
        .filter(|op| matches!(op, SurfaceOp::Present))
        .count();
    assert_eq!(presents, 3);
}

#[test]
fn resize_applies_before_redraw_and_keeps_scroll() {
    let mut d = dispatcher(ViewportState::new(800.0, 600.0, 0.0));
    d.dispatch(ViewportEvent::Scroll { offset: 250.0 }).unwrap();
    d.surface_mut().reset();
    d.dispatch(ViewportEvent::Resize {
        width: 400.0,
        height: 300.0,
    })
    .unwrap();

    assert_eq!(d.state(), ViewportState::new(400.0, 300.0, 250.0));
    assert_eq!(
        d.surface().ops()[0],
        SurfaceOp::Resize {
            width: 400,
            height: 300
        }
    );

    let mut expected = RecordingSurface::new(400, 300);
    RadialFieldRenderer::default()
        .redraw(&ViewportState::new(400.0, 300.0, 250.0), &mut expected);
    assert_eq!(d.surface().visible_strokes(), expected.visible_strokes());
}

#[test]
fn unmeasured_start_skips_until_first_resize() {
    let mut d = dispatcher(ViewportState::unmeasured());
    assert_eq!(
        d.dispatch(ViewportEvent::Scroll { offset: 40.0 }).unwrap(),
        RedrawOutcome::Skipped
    );
    assert_eq!(d.surface().stroke_count(), 0);
    let outcome = d
        .dispatch(ViewportEvent::Resize {
            width: 300.0,
            height: 200.0,
        })
        .unwrap();
    assert_eq!(outcome.stroke_count(), 72);
    assert_eq!(d.stats().skipped, 1);
    assert_eq!(d.stats().drawn, 1);
}

#[test]
fn scroll_sweep_ends_exactly_at_target() {
    let mut events = ScriptedEvents::scroll_sweep(0.0, 25.0, 10.0).unwrap();
    let mut offsets = Vec::new();
    while let Some(ViewportEvent::Scroll { offset }) = events.next_event() {
        offsets.push(offset);
    }
    assert_eq!(offsets, vec![0.0, 10.0, 20.0, 25.0]);
}

#[test]
fn scroll_sweep_runs_backwards_and_handles_empty_span() {
    let mut events = ScriptedEvents::scroll_sweep(30.0, 0.0, 20.0).unwrap();
    let mut offsets = Vec::new();
    while let Some(ViewportEvent::Scroll { offset }) = events.next_event() {
        offsets.push(offset);
    }
    assert_eq!(offsets, vec![30.0, 10.0, 0.0]);
    assert_eq!(ScriptedEvents::scroll_sweep(5.0, 5.0, 1.0).unwrap().len(), 1);
}

#[test]
fn scroll_sweep_rejects_degenerate_steps() {
    assert!(ScriptedEvents::scroll_sweep(0.0, 10.0, 0.0).is_err());
    assert!(ScriptedEvents::scroll_sweep(0.0, 10.0, -1.0).is_err());
    assert!(ScriptedEvents::scroll_sweep(0.0, f64::INFINITY, 1.0).is_err());
    // Below float resolution at 1000.0 the offset would never advance.
    let err = ScriptedEvents::scroll_sweep(1000.0, 1120.0, 1e-13).unwrap_err();
    assert!(matches!(err, crate::RetrospectError::Validation(_)));
}

#[test]
fn scroll_sweep_at_the_cap() {
    let events = ScriptedEvents::scroll_sweep(0.0, (MAX_SWEEP_EVENTS - 1) as f64, 1.0).unwrap();
    assert_eq!(events.len(), MAX_SWEEP_EVENTS);
    assert!(ScriptedEvents::scroll_sweep(0.0, MAX_SWEEP_EVENTS as f64, 1.0).is_err());
}

#[test]
fn events_parse_from_json() {
    let events = ScriptedEvents::from_json_str(
        r#"[{"kind":"resize","width":10,"height":20},{"kind":"scroll","offset":5}]"#,
    )
    .unwrap();
    assert_eq!(events.len(), 2);
    assert!(ScriptedEvents::from_json_str("{").is_err());
}
