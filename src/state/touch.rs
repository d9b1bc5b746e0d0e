// Touch gesture bookkeeping: single-finger drag and two-finger pinch.
#[derive(Default, Debug, Clone)]
pub struct TouchState {
    pub single_active: bool,
    pub pinch: bool,
    /// Finger distance when the pinch started.
    pub start_dist: f64,
    /// Viewport scale when the pinch started.
    pub start_scale: f64,
    /// Scene point under the pinch midpoint at gesture start.
    pub world_x: f64,
    pub world_y: f64,
    pub last_x: f64,
    pub last_y: f64,
}

impl TouchState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
