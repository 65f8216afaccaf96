use crate::display::{self, CENTER, DialFrame};
use crate::geometry::{Point, angle_to_value, biased_pointer_angle};
use crate::interaction::{DragSession, DragState, PointerEvent, PointerSample, Viewport};
use crate::resolver::{self, Range, RangeChangeRequest};
use crate::time::{Interval, OpenCloseWindow};
use serde::Deserialize;

/// Construction-time configuration of a dial. Fixed for the lifetime of a control.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DialConfig {
    pub width: f64,
    #[serde(flatten)]
    pub window: OpenCloseWindow,
    #[serde(default)]
    pub unavailable: Vec<Interval>,
}

impl DialConfig {
    pub fn new(width: f64, window: OpenCloseWindow, unavailable: Vec<Interval>) -> Self {
        Self {
            width,
            window,
            unavailable,
        }
    }
}

/// The interactive dial: drag tracking plus constraint resolution.
///
/// The control never holds the selected range. Callers pass the current range in with every
/// event and apply the returned [`RangeChangeRequest`] themselves before the next event.
#[derive(Debug, Clone)]
pub struct DialControl {
    config: DialConfig,
    session: DragSession,
}

impl DialControl {
    pub fn new(config: DialConfig) -> Self {
        Self {
            config,
            session: DragSession::new(),
        }
    }

    pub fn config(&self) -> &DialConfig {
        &self.config
    }

    pub fn drag_state(&self) -> DragState {
        self.session.state()
    }

    pub fn viewport(&self, origin: Point) -> Viewport {
        Viewport::new(origin, self.config.width)
    }

    /// Pointer pressed at `sample`. Only a press on one of the handles starts a drag.
    pub fn press(
        &mut self,
        sample: &PointerSample,
        origin: Point,
        range: Range,
    ) -> Option<RangeChangeRequest> {
        let pos = self.viewport(origin).normalize(sample)?;
        let handle = display::hit_test(pos, range)?;
        self.dispatch(PointerEvent::Down(handle, pos), range)
    }

    pub fn drag(
        &mut self,
        sample: &PointerSample,
        origin: Point,
        range: Range,
    ) -> Option<RangeChangeRequest> {
        let pos = self.viewport(origin).normalize(sample)?;
        self.dispatch(PointerEvent::Move(pos), range)
    }

    pub fn release(&mut self) {
        self.session.handle(PointerEvent::Up);
    }

    /// Runs one event through the drag session and, if a handle is active, the resolver.
    pub fn dispatch(&mut self, event: PointerEvent, range: Range) -> Option<RangeChangeRequest> {
        let (handle, pos) = self.session.handle(event)?;
        let value = angle_to_value(biased_pointer_angle(CENTER, pos));
        log::trace!("{} handle at ({:.1}, {:.1}) -> step {}", handle, pos.x, pos.y, value);

        let decision = resolver::resolve(
            handle,
            value,
            range,
            &self.config.window,
            &self.config.unavailable,
        );
        let request = decision.request(handle, range);
        match request {
            Some(r) => log::debug!("{:?} for {} handle: {}..{}", decision, handle, r.start, r.end),
            None => log::trace!("{:?} for {} handle", decision, handle),
        }
        request
    }

    pub fn frame(&self, range: Range) -> DialFrame {
        DialFrame::build(range, &self.config.window, &self.config.unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{handle_position, to_screen};
    use crate::geometry::polar_to_point;
    use crate::interaction::{Handle, INTERNAL_SIZE};
    use crate::time::Step;

    fn control() -> DialControl {
        DialControl::new(DialConfig::new(
            INTERNAL_SIZE,
            OpenCloseWindow::parse("08:00", "23:00").unwrap(),
            vec![Interval::new(34, 40).unwrap()],
        ))
    }

    /// Screen point on the ring for `value`, zero at the top.
    fn ring_point(value: Step) -> Point {
        polar_to_point(CENTER, 176.0, f64::from(value) * 7.5 - 90.0)
    }

    fn mouse(p: Point) -> PointerSample {
        PointerSample::Mouse { client: p }
    }

    #[test]
    fn test_config_deserialization() {
        let json = r#"{"width": 300, "open": "08:00", "close": "23:00", "unavailable": [[34, 40]]}"#;
        let config: DialConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.width, 300.0);
        assert_eq!(config.window.close_val(), 46);
        assert_eq!(config.unavailable, vec![Interval::new(34, 40).unwrap()]);
    }

    #[test]
    fn test_press_on_handle_starts_drag() {
        let mut control = control();
        let range = Range::new(20, 30);
        let on_start = to_screen(handle_position(Handle::Start, range));
        let request = control.press(&mouse(on_start), Point::default(), range);
        assert_eq!(control.drag_state(), DragState::DraggingStart);
        // pressing exactly on the handle re-commits the same value
        assert_eq!(request, Some(RangeChangeRequest { start: 20, end: 30 }));
    }

    #[test]
    fn test_press_off_handle_does_nothing() {
        let mut control = control();
        let range = Range::new(20, 30);
        assert_eq!(control.press(&mouse(CENTER), Point::default(), range), None);
        assert_eq!(control.drag_state(), DragState::Idle);
        assert_eq!(control.drag(&mouse(ring_point(25)), Point::default(), range), None);
    }

    #[test]
    fn test_drag_end_handle() {
        let mut control = control();
        let mut range = Range::new(20, 30);
        let on_end = to_screen(handle_position(Handle::End, range));
        control.press(&mouse(on_end), Point::default(), range);

        for value in [31, 32, 33] {
            if let Some(r) = control.drag(&mouse(ring_point(value)), Point::default(), range) {
                range.apply(r);
            }
        }
        assert_eq!(range, Range::new(20, 33));

        // dragging past the blocked interval jumps the selection behind it
        if let Some(r) = control.drag(&mouse(ring_point(45)), Point::default(), range) {
            range.apply(r);
        }
        assert_eq!(range, Range::new(40, 45));

        control.release();
        assert_eq!(control.drag_state(), DragState::Idle);
        assert_eq!(control.drag(&mouse(ring_point(42)), Point::default(), range), None);
    }

    #[test]
    fn test_drag_start_past_interval_snaps() {
        let mut control = control();
        let range = Range::new(36, 45);
        let on_start = to_screen(handle_position(Handle::Start, range));
        control.press(&mouse(on_start), Point::default(), range);
        let request = control.drag(&mouse(ring_point(20)), Point::default(), range);
        assert_eq!(request, Some(RangeChangeRequest { start: 33, end: 34 }));
    }

    #[test]
    fn test_rejected_moves_commit_nothing() {
        let mut control = control();
        let range = Range::new(20, 30);
        let on_start = to_screen(handle_position(Handle::Start, range));
        control.press(&mouse(on_start), Point::default(), range);
        // past the end handle
        assert_eq!(control.drag(&mouse(ring_point(32)), Point::default(), range), None);
        // before opening time
        assert_eq!(control.drag(&mouse(ring_point(10)), Point::default(), range), None);
    }

    #[test]
    fn test_scaled_touch_drag() {
        let mut control = DialControl::new(DialConfig::new(
            200.0,
            OpenCloseWindow::parse("08:00", "23:00").unwrap(),
            vec![],
        ));
        let range = Range::new(20, 30);
        let origin = Point::new(10.0, 10.0);
        let half = |p: Point| Point::new(origin.x + p.x / 2.0, origin.y + p.y / 2.0);
        let touch = |p: Point| PointerSample::Touch { touches: vec![half(p)] };

        let on_end = to_screen(handle_position(Handle::End, range));
        control.press(&touch(on_end), origin, range);
        assert_eq!(control.drag_state(), DragState::DraggingEnd);
        assert_eq!(
            control.drag(&touch(ring_point(36)), origin, range),
            Some(RangeChangeRequest { start: 20, end: 36 })
        );
    }
}
