pub mod nav;
pub mod touch;
pub mod viewport;

pub use touch::TouchState;
pub use viewport::{ViewBox, Viewport, view_box_for};
