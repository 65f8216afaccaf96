use crate::config::Config;
use ringtime::display::{DialFrame, range_label};
use ringtime::geometry::Point;
use ringtime::interaction::DragState;
use ringtime::resolver::{self, Range, RangeChangeRequest};
use ringtime::{DialControl, PointerSample};

/// Owner of the selected range. Applies whatever the control requests.
pub struct State {
    pub control: DialControl,
    pub range: Range,
}

impl State {
    pub fn new(control: DialControl, range: Range) -> Self {
        Self { control, range }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(DialControl::new(config.dial()), config.initial_range())
    }

    pub fn width(&self) -> f64 {
        self.control.config().width
    }

    pub fn summary(&self) -> String {
        range_label(self.range)
    }

    pub fn frame(&self) -> DialFrame {
        self.control.frame(self.range)
    }

    pub fn is_dragging(&self) -> bool {
        self.control.drag_state() != DragState::Idle
    }

    /// Returns whether the range changed.
    pub fn press(&mut self, sample: &PointerSample) -> bool {
        let request = self.control.press(sample, Point::default(), self.range);
        self.commit(request)
    }

    pub fn drag(&mut self, sample: &PointerSample) -> bool {
        let request = self.control.drag(sample, Point::default(), self.range);
        self.commit(request)
    }

    pub fn release(&mut self) {
        self.control.release();
    }

    /// Swaps in a new configuration. The current range survives if it is still selectable.
    pub fn reconfigure(&mut self, config: &Config) {
        let dial = config.dial();
        if !resolver::is_selectable(self.range, &dial.window, &dial.unavailable) {
            log::info!(
                "Range {} no longer fits, resetting to {}",
                range_label(self.range),
                range_label(config.initial_range())
            );
            self.range = config.initial_range();
        }
        self.control = DialControl::new(dial);
    }

    fn commit(&mut self, request: Option<RangeChangeRequest>) -> bool {
        match request {
            Some(r) if Range::from(r) != self.range => {
                self.range.apply(r);
                true
            }
            _ => false,
        }
    }
}
