//! User-driven pan/zoom of the scene.
//!
//! The viewport owns a scale+translate transform applied to the scene's
//! coordinate group. Gestures are anchored: zooming keeps the scene point
//! under the cursor (or pinch midpoint) fixed. Scale is constrained to
//! [0.5, 2.0] and translation to the scene bounds plus a padding band, so
//! the square can never be panned out of reach.

use crate::config;

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 2.0;
/// Extra pan range beyond the scene bounds, in scene pixels.
const PAN_PADDING: f64 = 240.0;
/// Wheel sensitivity: scale multiplies by `exp(-delta_y * this)`.
const WHEEL_ZOOM_RATE: f64 = 0.001;

/// Visible region of the scene, in scene coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// SVG `viewBox` attribute value.
    pub fn attr(&self) -> String {
        format!(
            "{:.1} {:.1} {:.1} {:.1}",
            self.min_x, self.min_y, self.width, self.height
        )
    }

    /// Map a point from element-relative client pixels into scene
    /// coordinates, given the element's bounding rect size.
    pub fn client_to_scene(&self, rect_w: f64, rect_h: f64, x: f64, y: f64) -> (f64, f64) {
        if rect_w <= 0.0 || rect_h <= 0.0 {
            return (self.min_x, self.min_y);
        }
        (
            self.min_x + x / rect_w * self.width,
            self.min_y + y / rect_h * self.height,
        )
    }
}

/// Visible-area computation for a window size.
///
/// Desktop fits the window aspect ratio exactly; the tablet breakpoint
/// (<=768px) widens the visible area ~10% and mobile (<=480px) ~30% so
/// the outlying buildings are not clipped on narrow screens.
pub fn view_box_for(window_w: f64, window_h: f64) -> ViewBox {
    let bounds = *config::SCENE_BOUNDS;
    let widen = if window_w <= 480.0 {
        1.3
    } else if window_w <= 768.0 {
        1.1
    } else {
        1.0
    };
    let width = bounds.width() * widen;
    let aspect = if window_w > 0.0 {
        window_h / window_w
    } else {
        0.75
    };
    let height = width * aspect;
    let (cx, cy) = bounds.center();
    ViewBox {
        min_x: cx - width / 2.0,
        min_y: cy - height / 2.0,
        width,
        height,
    }
}

/// Pan/zoom state for the scene group. Mutated only by gesture handlers
/// and programmatic reset; the navigation transition disables it while it
/// drives the scene transform itself.
#[derive(Clone, Debug)]
pub struct Viewport {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub enabled: bool,
    pub panning: bool,
    last_x: f64,
    last_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            enabled: true,
            panning: false,
            last_x: 0.0,
            last_y: 0.0,
        }
    }
}

impl Viewport {
    /// SVG `transform` attribute for the scene group.
    pub fn transform_attr(&self) -> String {
        format!(
            "translate({:.3} {:.3}) scale({:.4})",
            self.translate_x, self.translate_y, self.scale
        )
    }

    pub fn is_identity(&self) -> bool {
        (self.scale - 1.0).abs() < 1e-9
            && self.translate_x.abs() < 1e-9
            && self.translate_y.abs() < 1e-9
    }

    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.translate_x = 0.0;
        self.translate_y = 0.0;
        self.panning = false;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.panning = false;
        }
    }

    pub fn begin_pan(&mut self, x: f64, y: f64) {
        if !self.enabled {
            return;
        }
        self.panning = true;
        self.last_x = x;
        self.last_y = y;
    }

    /// Continue a drag: apply the delta since the last pointer sample.
    pub fn pan_to(&mut self, x: f64, y: f64) {
        if !self.enabled || !self.panning {
            return;
        }
        self.translate_x += x - self.last_x;
        self.translate_y += y - self.last_y;
        self.last_x = x;
        self.last_y = y;
        self.clamp_translation();
    }

    pub fn end_pan(&mut self) {
        self.panning = false;
    }

    /// Multiply scale by `factor`, keeping the scene point under the
    /// anchor (in scene coordinates) fixed on screen.
    pub fn zoom_about(&mut self, factor: f64, anchor_x: f64, anchor_y: f64) {
        if !self.enabled {
            return;
        }
        let world_x = (anchor_x - self.translate_x) / self.scale;
        let world_y = (anchor_y - self.translate_y) / self.scale;
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        self.translate_x = anchor_x - world_x * self.scale;
        self.translate_y = anchor_y - world_y * self.scale;
        self.clamp_translation();
    }

    pub fn wheel_zoom(&mut self, delta_y: f64, anchor_x: f64, anchor_y: f64) {
        self.zoom_about((-delta_y * WHEEL_ZOOM_RATE).exp(), anchor_x, anchor_y);
    }

    /// Apply an in-flight pinch: absolute scale from the gesture start,
    /// repositioned so the pinched world point tracks the finger midpoint.
    pub fn apply_pinch(
        &mut self,
        start_scale: f64,
        dist_ratio: f64,
        mid_x: f64,
        mid_y: f64,
        world_x: f64,
        world_y: f64,
    ) {
        if !self.enabled {
            return;
        }
        self.scale = (start_scale * dist_ratio).clamp(MIN_SCALE, MAX_SCALE);
        self.translate_x = mid_x - world_x * self.scale;
        self.translate_y = mid_y - world_y * self.scale;
        self.clamp_translation();
    }

    /// Scene point currently mapped to the given scene-space anchor.
    pub fn to_world(&self, anchor_x: f64, anchor_y: f64) -> (f64, f64) {
        (
            (anchor_x - self.translate_x) / self.scale,
            (anchor_y - self.translate_y) / self.scale,
        )
    }

    fn clamp_translation(&mut self) {
        let bounds = *config::SCENE_BOUNDS;
        let limit_x = bounds.width() / 2.0 * self.scale + PAN_PADDING;
        let limit_y = bounds.height() / 2.0 * self.scale + PAN_PADDING;
        self.translate_x = self.translate_x.clamp(-limit_x, limit_x);
        self.translate_y = self.translate_y.clamp(-limit_y, limit_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_zoom_respects_scale_clamp() {
        let mut vp = Viewport::default();
        for _ in 0..100 {
            vp.wheel_zoom(-500.0, 0.0, 0.0);
        }
        assert_eq!(vp.scale, MAX_SCALE);
        for _ in 0..200 {
            vp.wheel_zoom(500.0, 0.0, 0.0);
        }
        assert_eq!(vp.scale, MIN_SCALE);
    }

    #[test]
    fn zoom_keeps_anchor_point_fixed() {
        let mut vp = Viewport::default();
        let (anchor_x, anchor_y) = (150.0, -80.0);
        let before = vp.to_world(anchor_x, anchor_y);
        vp.zoom_about(1.5, anchor_x, anchor_y);
        let after = vp.to_world(anchor_x, anchor_y);
        assert!((before.0 - after.0).abs() < 1e-9);
        assert!((before.1 - after.1).abs() < 1e-9);
    }

    #[test]
    fn pan_applies_pointer_deltas_and_clamps() {
        let mut vp = Viewport::default();
        vp.begin_pan(10.0, 10.0);
        vp.pan_to(40.0, -20.0);
        assert_eq!(vp.translate_x, 30.0);
        assert_eq!(vp.translate_y, -30.0);

        // A drag of absurd length pins to the padded scene bounds.
        vp.pan_to(1e6, 1e6);
        let bounds = *crate::config::SCENE_BOUNDS;
        assert!(vp.translate_x <= bounds.width() / 2.0 + 240.0);
        assert!(vp.translate_y <= bounds.height() / 2.0 + 240.0);
    }

    #[test]
    fn disabled_viewport_ignores_gestures() {
        let mut vp = Viewport::default();
        vp.set_enabled(false);
        vp.begin_pan(0.0, 0.0);
        vp.pan_to(100.0, 100.0);
        vp.wheel_zoom(-300.0, 0.0, 0.0);
        assert!(vp.is_identity());
        // Re-enabling leaves the transform where it was.
        vp.set_enabled(true);
        assert!(vp.is_identity());
    }

    #[test]
    fn reset_returns_to_identity() {
        let mut vp = Viewport::default();
        vp.zoom_about(1.8, 40.0, 40.0);
        vp.begin_pan(0.0, 0.0);
        vp.pan_to(25.0, 12.0);
        assert!(!vp.is_identity());
        vp.reset();
        assert!(vp.is_identity());
        assert!(!vp.panning);
    }

    #[test]
    fn view_box_breakpoints_widen_visible_area() {
        let desktop = view_box_for(1600.0, 900.0);
        let tablet = view_box_for(768.0, 1024.0);
        let mobile = view_box_for(400.0, 800.0);

        // Desktop matches the window aspect ratio exactly.
        assert!((desktop.height / desktop.width - 900.0 / 1600.0).abs() < 1e-9);
        // Narrower devices see proportionally more of the scene.
        assert!((tablet.width / desktop.width - 1.1).abs() < 1e-9);
        assert!((mobile.width / desktop.width - 1.3).abs() < 1e-9);
    }

    #[test]
    fn client_points_map_into_the_view_box() {
        let vb = ViewBox {
            min_x: -100.0,
            min_y: -50.0,
            width: 200.0,
            height: 100.0,
        };
        assert_eq!(vb.client_to_scene(400.0, 200.0, 0.0, 0.0), (-100.0, -50.0));
        assert_eq!(vb.client_to_scene(400.0, 200.0, 200.0, 100.0), (0.0, 0.0));
        assert_eq!(vb.client_to_scene(400.0, 200.0, 400.0, 200.0), (100.0, 50.0));
    }
}
