#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure view-transform system that maps screen input to world space.
//!
//! The viewport owns the zoom level, the pan offset, and the drag gesture
//! state. Requested values are never rejected: out-of-range zoom and pan are
//! silently clamped so the scaled map always covers (or exactly fills) the
//! visible area.

use battery_grid_core::Vec2;

/// Lowest permitted zoom level: the map is never shown below native size.
pub const ZOOM_MIN: f32 = 1.0;

/// Highest permitted zoom level.
pub const ZOOM_MAX: f32 = 5.0;

/// Discrete increment applied per zoom request.
pub const ZOOM_STEP: f32 = 0.25;

/// View transform for one map on one screen.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    map_size: Vec2,
    view_size: Vec2,
    zoom: f32,
    pan: Vec2,
    drag: Option<Vec2>,
}

impl Viewport {
    /// Creates a viewport at native zoom with the map centered whenever it is
    /// smaller than the visible area.
    #[must_use]
    pub fn new(map_size: Vec2, view_size: Vec2) -> Self {
        let mut viewport = Self {
            map_size,
            view_size,
            zoom: ZOOM_MIN,
            pan: Vec2::new(0.0, 0.0),
            drag: None,
        };
        let centered = view_size.subtract(viewport.map_extent()).divide(2.0);
        viewport.pan = viewport.clamp_pan(centered);
        viewport
    }

    /// Active zoom level, always within [`ZOOM_MIN`]..=[`ZOOM_MAX`] and a
    /// multiple of [`ZOOM_STEP`].
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Active pan offset in screen units.
    #[must_use]
    pub const fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Extent of the map in native world units.
    #[must_use]
    pub const fn map_size(&self) -> Vec2 {
        self.map_size
    }

    /// Extent of the visible area in screen units.
    #[must_use]
    pub const fn view_size(&self) -> Vec2 {
        self.view_size
    }

    /// Extent of the map after zoom scaling.
    #[must_use]
    pub fn map_extent(&self) -> Vec2 {
        self.map_size.scaled_by_zoom(self.zoom)
    }

    /// Converts a screen-space point into world-space map coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen.subtract(self.pan).divide(self.zoom)
    }

    /// Steps the zoom level against the sign of `delta` and re-derives the pan
    /// so the world point under `anchor` stays under it.
    ///
    /// A positive `delta` (wheel scrolled down) zooms out, a negative one
    /// zooms in. Ignored while a drag gesture is active: no competing
    /// gestures.
    pub fn set_zoom(&mut self, delta: f32, anchor: Vec2) {
        if self.drag.is_some() {
            return;
        }

        let direction = if delta > 0.0 {
            1.0
        } else if delta < 0.0 {
            -1.0
        } else {
            0.0
        };
        let old_zoom = self.zoom;
        let stepped = self.zoom - direction * ZOOM_STEP;
        self.zoom = ((stepped * 4.0).round() / 4.0).clamp(ZOOM_MIN, ZOOM_MAX);

        let kept = anchor.subtract(self.pan).divide(old_zoom).multiply(self.zoom);
        self.set_pan(anchor.subtract(kept));
    }

    /// Requests a new pan offset. The value is clamped per axis so the map
    /// can never be dragged to reveal area outside its bounds.
    pub fn set_pan(&mut self, pan: Vec2) {
        self.pan = self.clamp_pan(pan);
    }

    /// Starts a drag gesture anchored at the provided screen point.
    pub fn begin_drag(&mut self, screen: Vec2) {
        self.drag = Some(screen.subtract(self.pan));
    }

    /// Moves an active drag gesture to the provided screen point.
    pub fn update_drag(&mut self, screen: Vec2) {
        if let Some(anchor) = self.drag {
            self.set_pan(screen.subtract(anchor));
        }
    }

    /// Ends the active drag gesture, if any.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Reports whether a drag gesture is currently active.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn clamp_pan(&self, pan: Vec2) -> Vec2 {
        let extent = self.map_extent();
        Vec2::new(
            clamp_axis(pan.x(), self.view_size.x(), extent.x()),
            clamp_axis(pan.y(), self.view_size.y(), extent.y()),
        )
    }
}

fn clamp_axis(value: f32, view: f32, extent: f32) -> f32 {
    let slack = view - extent;
    value.clamp(slack.min(0.0), slack.max(0.0))
}
