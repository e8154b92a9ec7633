use super::*;

fn state(w: f64, h: f64, scroll: f64) -> ViewportState {
    ViewportState::new(w, h, scroll)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn angles_are_evenly_spaced_and_rotate_with_scroll() {
    assert!(close(spoke_angle(0, 0.0), 0.0));
    assert!(close(spoke_angle(15, 0.0), PI / 2.0));
    assert!(close(spoke_angle(1, 0.0), PI / 30.0));
    let shift = 1234.0 / (500.0 * PI);
    for i in [0, 7, 59] {
        assert!(close(spoke_angle(i, 1234.0) - spoke_angle(i, 0.0), shift));
    }
}

#[test]
fn radius_matches_closed_form_for_every_spoke() {
    let s = state(1280.0, 720.0, 321.0);
    let e = FieldEllipse::inscribed(&s).unwrap();
    let (a, b) = (1280.0 / 2.0 * 0.95, 720.0 / 2.0 * 0.95);
    let spokes = layout_spokes(&s).unwrap();
    assert_eq!(spokes.len(), SPOKE_COUNT);
    for spoke in &spokes {
        let t = spoke_angle(spoke.index, 321.0);
        let expected = (a * b) / (a * a * t.sin().powi(2) + b * b * t.cos().powi(2)).sqrt();
        assert!(close(spoke.radius, expected));
        assert!(close(e.radius_at(t), expected));
        assert!(spoke.radius > 0.0);
    }
}

#[test]
fn radius_hits_semi_axes_on_the_axes() {
    let e = FieldEllipse::inscribed(&state(200.0, 100.0, 0.0)).unwrap();
    assert!(close(e.radius_at(0.0), 95.0));
    assert!(close(e.radius_at(PI / 2.0), 47.5));
    assert!(close(e.radius_at(PI), 95.0));
}

#[test]
fn points_on_scaled_radius_lie_inside_the_ellipse() {
    let s = state(900.0, 500.0, 77.0);
    let e = FieldEllipse::inscribed(&s).unwrap();
    for spoke in layout_spokes(&s).unwrap() {
        let p = spoke.body.p1 - e.center;
        let v = (p.x / e.semi_x).powi(2) + (p.y / e.semi_y).powi(2);
        assert!(close(v.sqrt(), SPOKE_REACH));
    }
}

#[test]
fn body_starts_outside_the_viewport() {
    let s = state(640.0, 480.0, 0.0);
    for spoke in layout_spokes(&s).unwrap() {
        let outer = spoke.body.p0;
        let off = outer.x < 0.0 || outer.x > 640.0 || outer.y < 0.0 || outer.y > 480.0;
        assert!(off, "spoke {} starts on screen at {outer:?}", spoke.index);
        assert!(close(
            (outer - s.center()).hypot(),
            640.0 + 480.0
        ));
    }
}

#[test]
fn exactly_every_fifth_spoke_is_accented() {
    let spokes = layout_spokes(&state(800.0, 600.0, 10.0)).unwrap();
    let accented: Vec<usize> = spokes
        .iter()
        .filter(|s| s.accent.is_some())
        .map(|s| s.index)
        .collect();
    assert_eq!(accented, (0..60).step_by(5).collect::<Vec<_>>());
    assert_eq!(accented.len(), 12);
}

#[test]
fn accent_runs_inward_from_body_end() {
    let s = state(800.0, 600.0, 0.0);
    let e = FieldEllipse::inscribed(&s).unwrap();
    for spoke in layout_spokes(&s).unwrap() {
        let Some(accent) = spoke.accent else { continue };
        assert_eq!(accent.p0, spoke.body.p1);
        assert!(close(
            (accent.p1 - e.center).hypot(),
            spoke.radius * ACCENT_REACH
        ));
    }
}

#[test]
fn unmeasured_viewport_has_no_geometry() {
    assert!(layout_spokes(&ViewportState::unmeasured()).is_none());
    assert!(layout_spokes(&state(0.0, 600.0, 0.0)).is_none());
    assert!(FieldEllipse::inscribed(&state(800.0, 0.0, 0.0)).is_none());
}
