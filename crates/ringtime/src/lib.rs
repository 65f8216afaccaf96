pub mod control;
pub mod display;
pub mod geometry;
pub mod interaction;
pub mod resolver;
pub mod svg;
pub mod time;

pub use control::{DialConfig, DialControl};
pub use interaction::{Handle, PointerEvent, PointerSample};
pub use resolver::{Decision, Range, RangeChangeRequest};
