use super::*;

#[test]
fn unmeasured_state_is_not_measured() {
    assert!(!ViewportState::unmeasured().is_measured());
    assert!(!ViewportState::new(1280.0, 0.0, 0.0).is_measured());
    assert!(ViewportState::new(1280.0, 800.0, 0.0).is_measured());
}

#[test]
fn new_sanitizes_non_finite_inputs() {
    let s = ViewportState::new(f64::NAN, -4.0, f64::INFINITY);
    assert_eq!(s.width, 0.0);
    assert_eq!(s.height, 0.0);
    assert_eq!(s.scroll_offset, 0.0);
}

#[test]
fn with_size_keeps_scroll_offset() {
    let s = ViewportState::new(100.0, 50.0, 12.5).with_size(200.0, 80.0);
    assert_eq!(s, ViewportState::new(200.0, 80.0, 12.5));
}

#[test]
fn visible_rect_follows_scroll() {
    let s = ViewportState::new(100.0, 50.0, 30.0);
    assert_eq!(s.visible_rect(), Rect::new(0.0, 30.0, 100.0, 80.0));
    assert_eq!(s.center(), Point::new(50.0, 25.0));
}

#[test]
fn pixel_size_rounds_up() {
    assert_eq!(ViewportState::new(99.2, 50.0, 0.0).pixel_size(), (100, 50));
    assert_eq!(ViewportState::unmeasured().pixel_size(), (0, 0));
}

#[test]
fn rgba_alpha_quantizes_and_clamps() {
    assert_eq!(Rgba::WHITE.with_alpha(0.3).to_rgba8(), [255, 255, 255, 77]);
    assert_eq!(Rgba::WHITE.with_alpha(2.0).alpha_u8(), 255);
    assert_eq!(Rgba::WHITE.with_alpha(-1.0).alpha_u8(), 0);
}
