use crate::geometry::Point;
use strum::{Display as StrumDisplay, EnumIter};

/// Side length of the fixed internal coordinate space.
pub const INTERNAL_SIZE: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Handle {
    Start,
    End,
}

impl Handle {
    /// Element id the handle is exposed under for inspection.
    pub fn element_id(&self) -> &'static str {
        match self {
            Self::Start => "handle-start",
            Self::End => "handle-end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingStart,
    DraggingEnd,
}

impl DragState {
    pub fn active_handle(&self) -> Option<Handle> {
        match self {
            Self::Idle => None,
            Self::DraggingStart => Some(Handle::Start),
            Self::DraggingEnd => Some(Handle::End),
        }
    }

    fn dragging(handle: Handle) -> Self {
        match handle {
            Handle::Start => Self::DraggingStart,
            Handle::End => Self::DraggingEnd,
        }
    }
}

/// Toolkit-independent pointer events, positions already in internal coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Handle, Point),
    Move(Point),
    Up,
}

/// Tracks which handle owns the pointer between press and release.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Applies `event` and returns the handle and position that need a resolve pass, if any.
    pub fn handle(&mut self, event: PointerEvent) -> Option<(Handle, Point)> {
        match (self.state, event) {
            (DragState::Idle, PointerEvent::Down(handle, pos)) => {
                self.state = DragState::dragging(handle);
                log::debug!("Drag started on {} handle", handle);
                Some((handle, pos))
            }
            // already dragging: a second press is ignored
            (_, PointerEvent::Down(handle, _)) => {
                log::trace!("Ignoring press on {} handle during drag", handle);
                None
            }
            (state, PointerEvent::Move(pos)) => state.active_handle().map(|h| (h, pos)),
            (state, PointerEvent::Up) => {
                if state != DragState::Idle {
                    log::debug!("Drag released");
                }
                self.state = DragState::Idle;
                None
            }
        }
    }
}

/// Raw pointer payload as delivered by the host toolkit.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerSample {
    Mouse { client: Point },
    Touch { touches: Vec<Point> },
}

impl PointerSample {
    pub fn client_position(&self) -> Option<Point> {
        match self {
            Self::Mouse { client } => Some(*client),
            Self::Touch { touches } => touches.first().copied(),
        }
    }

    /// Mouse input suppresses the host's default action; touch keeps it so scrolling still works.
    pub fn suppresses_default(&self) -> bool {
        matches!(self, Self::Mouse { .. })
    }
}

/// Where the control sits on screen and how large it is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin: Point,
    pub width: f64,
}

impl Viewport {
    pub fn new(origin: Point, width: f64) -> Self {
        Self { origin, width }
    }

    pub fn scale_constant(&self) -> f64 {
        (INTERNAL_SIZE - self.width) / self.width
    }

    pub fn to_internal(&self, client: Point) -> Point {
        let (dx, dy) = (client.x - self.origin.x, client.y - self.origin.y);
        let k = self.scale_constant();
        Point::new(dx + dx * k, dy + dy * k)
    }

    pub fn normalize(&self, sample: &PointerSample) -> Option<Point> {
        sample.client_position().map(|p| self.to_internal(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_down_activates_and_resolves() {
        let mut session = DragSession::new();
        let pos = Point::new(10.0, 20.0);
        assert_eq!(
            session.handle(PointerEvent::Down(Handle::Start, pos)),
            Some((Handle::Start, pos))
        );
        assert_eq!(session.state(), DragState::DraggingStart);
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut session = DragSession::new();
        assert_eq!(session.handle(PointerEvent::Move(Point::default())), None);
        assert_eq!(session.state(), DragState::Idle);
    }

    #[test]
    fn test_move_while_dragging_resolves_active_handle() {
        let mut session = DragSession::new();
        session.handle(PointerEvent::Down(Handle::End, Point::default()));
        let pos = Point::new(300.0, 200.0);
        assert_eq!(
            session.handle(PointerEvent::Move(pos)),
            Some((Handle::End, pos))
        );
    }

    #[test]
    fn test_reentrant_down_is_noop() {
        let mut session = DragSession::new();
        session.handle(PointerEvent::Down(Handle::Start, Point::default()));
        assert_eq!(
            session.handle(PointerEvent::Down(Handle::Start, Point::default())),
            None
        );
        assert_eq!(
            session.handle(PointerEvent::Down(Handle::End, Point::default())),
            None
        );
        assert_eq!(session.state(), DragState::DraggingStart);
    }

    #[test]
    fn test_up_always_returns_to_idle() {
        for handle in Handle::iter() {
            let mut session = DragSession::new();
            session.handle(PointerEvent::Down(handle, Point::default()));
            assert_ne!(session.state(), DragState::Idle);
            session.handle(PointerEvent::Up);
            assert_eq!(session.state(), DragState::Idle);
            assert_eq!(session.handle(PointerEvent::Move(Point::default())), None);
        }
    }

    #[test]
    fn test_viewport_scaling() {
        let viewport = Viewport::new(Point::new(50.0, 10.0), 300.0);
        let p = viewport.to_internal(Point::new(200.0, 160.0));
        assert!((p.x - 200.0).abs() < 1e-9);
        assert!((p.y - 200.0).abs() < 1e-9);

        let identity = Viewport::new(Point::default(), INTERNAL_SIZE);
        assert_eq!(identity.to_internal(Point::new(12.0, 34.0)), Point::new(12.0, 34.0));
    }

    #[test]
    fn test_touch_uses_first_point() {
        let viewport = Viewport::new(Point::default(), INTERNAL_SIZE);
        let touch = PointerSample::Touch {
            touches: vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)],
        };
        assert_eq!(viewport.normalize(&touch), Some(Point::new(1.0, 2.0)));
        assert!(!touch.suppresses_default());

        let empty = PointerSample::Touch { touches: vec![] };
        assert_eq!(viewport.normalize(&empty), None);

        let mouse = PointerSample::Mouse {
            client: Point::new(5.0, 6.0),
        };
        assert!(mouse.suppresses_default());
    }

    #[test]
    fn test_handle_ids() {
        assert_eq!(Handle::Start.element_id(), "handle-start");
        assert_eq!(Handle::End.to_string(), "end");
    }
}
