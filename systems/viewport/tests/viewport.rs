use battery_grid_core::Vec2;
use battery_grid_system_viewport::{Viewport, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

const MAP: Vec2 = Vec2::new(1600.0, 900.0);
const VIEW: Vec2 = Vec2::new(800.0, 600.0);

fn assert_covers_view(viewport: &Viewport) {
    let pan = viewport.pan();
    let extent = viewport.map_extent();
    let view = viewport.view_size();

    if extent.x() >= view.x() {
        assert!(pan.x() <= 0.0, "left edge exposed: pan.x = {}", pan.x());
        assert!(
            pan.x() + extent.x() >= view.x(),
            "right edge exposed: pan.x = {}",
            pan.x(),
        );
    }
    if extent.y() >= view.y() {
        assert!(pan.y() <= 0.0, "top edge exposed: pan.y = {}", pan.y());
        assert!(
            pan.y() + extent.y() >= view.y(),
            "bottom edge exposed: pan.y = {}",
            pan.y(),
        );
    }
}

fn is_step_multiple(zoom: f32) -> bool {
    (zoom / ZOOM_STEP).round() * ZOOM_STEP == zoom
}

#[test]
fn no_settable_pan_reveals_area_outside_the_map() {
    let mut viewport = Viewport::new(MAP, VIEW);
    let candidates = [
        Vec2::new(0.0, 0.0),
        Vec2::new(-100.0, -50.0),
        Vec2::new(-10_000.0, -10_000.0),
        Vec2::new(10_000.0, 10_000.0),
        Vec2::new(37.5, -901.25),
    ];

    for candidate in candidates {
        viewport.set_pan(candidate);
        assert_covers_view(&viewport);
    }
}

#[test]
fn zoom_stays_bounded_and_quantised_for_any_wheel_sequence() {
    let mut viewport = Viewport::new(MAP, VIEW);
    let deltas = [
        -1.0, 0.0, -120.0, 3.0, -0.5, 0.0, 7.0, 7.0, 7.0, -2.0, -2.0, -2.0, -2.0, -2.0, -2.0,
        -2.0, -2.0, -2.0, -2.0, -2.0, -2.0, -2.0, -2.0, -2.0, -2.0, -2.0, -2.0, 1.0,
    ];

    for delta in deltas {
        viewport.set_zoom(delta, Vec2::new(400.0, 300.0));
        let zoom = viewport.zoom();
        assert!((ZOOM_MIN..=ZOOM_MAX).contains(&zoom), "zoom = {zoom}");
        assert!(is_step_multiple(zoom), "zoom {zoom} is not a step multiple");
        assert_covers_view(&viewport);
    }

    // A zero wheel delta steps nowhere and leaves the level untouched.
    let settled = viewport.zoom();
    viewport.set_zoom(0.0, Vec2::new(400.0, 300.0));
    assert_eq!(viewport.zoom(), settled);
    assert_covers_view(&viewport);
}

#[test]
fn zoom_out_at_native_size_is_absorbed() {
    let mut viewport = Viewport::new(MAP, VIEW);
    viewport.set_zoom(1.0, Vec2::new(400.0, 300.0));
    assert_eq!(viewport.zoom(), ZOOM_MIN);
}

#[test]
fn repeated_zoom_in_caps_at_maximum() {
    let mut viewport = Viewport::new(MAP, VIEW);
    for _ in 0..24 {
        viewport.set_zoom(-1.0, Vec2::new(400.0, 300.0));
    }
    assert_eq!(viewport.zoom(), ZOOM_MAX);
}

#[test]
fn zoom_keeps_the_world_point_under_the_anchor() {
    let mut viewport = Viewport::new(MAP, VIEW);
    let anchor = Vec2::new(400.0, 300.0);

    for delta in [-1.0, -1.0, -1.0, 1.0, -1.0] {
        let before = viewport.screen_to_world(anchor);
        viewport.set_zoom(delta, anchor);
        let after = viewport.screen_to_world(anchor);

        assert!(
            before.distance_to(after) < 1e-3,
            "anchor drifted from {before:?} to {after:?}",
        );
    }
}

#[test]
fn screen_to_world_inverts_pan_then_zoom() {
    let mut viewport = Viewport::new(MAP, VIEW);
    viewport.set_zoom(-1.0, Vec2::new(0.0, 0.0));
    viewport.set_pan(Vec2::new(-100.0, -50.0));

    let world = viewport.screen_to_world(Vec2::new(150.0, 75.0));
    assert_eq!(world, Vec2::new(200.0, 100.0));
}

#[test]
fn drag_moves_pan_by_cursor_travel() {
    let mut viewport = Viewport::new(MAP, VIEW);
    viewport.set_pan(Vec2::new(-400.0, -200.0));

    viewport.begin_drag(Vec2::new(500.0, 400.0));
    assert!(viewport.is_dragging());
    viewport.update_drag(Vec2::new(530.0, 390.0));

    assert_eq!(viewport.pan(), Vec2::new(-370.0, -210.0));
    assert_covers_view(&viewport);

    viewport.end_drag();
    assert!(!viewport.is_dragging());
}

#[test]
fn drag_updates_after_end_are_ignored() {
    let mut viewport = Viewport::new(MAP, VIEW);
    viewport.set_pan(Vec2::new(-400.0, -200.0));

    viewport.begin_drag(Vec2::new(500.0, 400.0));
    viewport.end_drag();
    viewport.update_drag(Vec2::new(900.0, 900.0));

    assert_eq!(viewport.pan(), Vec2::new(-400.0, -200.0));
}

#[test]
fn zoom_requests_are_suppressed_while_dragging() {
    let mut viewport = Viewport::new(MAP, VIEW);

    viewport.begin_drag(Vec2::new(500.0, 400.0));
    viewport.set_zoom(-1.0, Vec2::new(400.0, 300.0));

    assert_eq!(viewport.zoom(), ZOOM_MIN);
}

#[test]
fn dragged_pan_is_still_clamped() {
    let mut viewport = Viewport::new(MAP, VIEW);

    viewport.begin_drag(Vec2::new(0.0, 0.0));
    viewport.update_drag(Vec2::new(5000.0, 5000.0));

    assert_covers_view(&viewport);
    assert_eq!(viewport.pan(), Vec2::new(0.0, 0.0));
}
