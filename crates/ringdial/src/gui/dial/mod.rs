use std::f64::consts::PI;

pub mod model;
pub mod view;

pub use model::State;
pub use view::draw;

pub const RING_ROTATION: f64 = -PI / 2.0;
pub const TICK_FONT_SIZE: f64 = 16.0;
pub const DURATION_FONT_SIZE: f64 = 24.0;
pub const HANDLE_RING_INSET: f64 = 6.0;
pub const SELECTION_DASH: [f64; 2] = [8.0, 2.0];
pub const FONT_FAMILY: &str = "Sans";
