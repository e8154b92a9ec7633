use super::*;
use crate::render::recording::{RecordingSurface, SurfaceOp};

fn renderer() -> RadialFieldRenderer {
    RadialFieldRenderer::new(FieldStyle::default()).unwrap()
}

#[test]
fn default_style_is_valid() {
    FieldStyle::default().validate().unwrap();
}

#[test]
fn style_rejects_accent_not_above_spoke_alpha() {
    let style = FieldStyle {
        accent_alpha: 0.3,
        ..FieldStyle::default()
    };
    assert!(RadialFieldRenderer::new(style).is_err());
}

#[test]
fn style_rejects_bad_width_and_alpha_range() {
    let style = FieldStyle {
        stroke_width: f64::NAN,
        ..FieldStyle::default()
    };
    assert!(style.validate().is_err());
    let style = FieldStyle {
        accent_alpha: 1.5,
        ..FieldStyle::default()
    };
    assert!(style.validate().is_err());
}

#[test]
fn redraw_clears_strokes_then_presents() {
    let mut surface = RecordingSurface::new(800, 600);
    let outcome = renderer().redraw(&ViewportState::new(800.0, 600.0, 0.0), &mut surface);
    assert_eq!(
        outcome,
        RedrawOutcome::Drawn {
            spokes: 60,
            accents: 12
        }
    );
    let ops = surface.ops();
    assert_eq!(ops.first(), Some(&SurfaceOp::Clear));
    assert_eq!(ops.last(), Some(&SurfaceOp::Present));
    assert_eq!(surface.stroke_count(), 72);
    assert_eq!(outcome.stroke_count(), 72);
}

#[test]
fn accent_strokes_use_higher_alpha() {
    let mut surface = RecordingSurface::new(800, 600);
    renderer().redraw(&ViewportState::new(800.0, 600.0, 0.0), &mut surface);
    let strokes = surface.visible_strokes();
    let spoke_alpha = strokes[0].1.color.a;
    let accent_alpha = strokes[1].1.color.a;
    assert!(accent_alpha > spoke_alpha);
    let accent_count = strokes.iter().filter(|(_, s)| s.color.a == accent_alpha).count();
    assert_eq!(accent_count, 12);
}

#[test]
fn redraw_is_idempotent_for_identical_inputs() {
    let state = ViewportState::new(1024.0, 768.0, 500.0);
    let mut surface = RecordingSurface::new(1024, 768);
    let r = renderer();
    r.redraw(&state, &mut surface);
    let first = surface.visible_strokes();
    r.redraw(&state, &mut surface);
    assert_eq!(surface.visible_strokes(), first);
}

#[test]
fn unmeasured_viewport_issues_zero_calls() {
    let mut surface = RecordingSurface::new(0, 0);
    let r = renderer();
    assert_eq!(
        r.redraw(&ViewportState::unmeasured(), &mut surface),
        RedrawOutcome::Skipped
    );
    assert_eq!(
        r.redraw(&ViewportState::new(f64::NAN, f64::NAN, 3.0), &mut surface),
        RedrawOutcome::Skipped
    );
    assert!(surface.ops().is_empty());
}
