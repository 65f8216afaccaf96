//! Everything the renderers draw, derived from the current range and dial configuration.

use crate::geometry::{
    ArcPath, Point, angle_to_handle_center, describe_arc, polar_to_point, value_to_degrees,
};
use crate::interaction::Handle;
use crate::resolver::Range;
use crate::time::{Interval, MAX_VAL, OpenCloseWindow, STEP_MINUTES, Step, step_count};
use strum::IntoEnumIterator;

pub const CENTER: Point = Point { x: 200.0, y: 200.0 };
pub const RADIUS: f64 = 176.0;
pub const OUTER_RING_WIDTH: f64 = 46.0;
pub const INNER_RING_WIDTH: f64 = 30.0;
pub const HANDLE_RADIUS: f64 = INNER_RING_WIDTH / 2.0;
/// Transparent stroke around each handle that widens its hit area.
pub const HANDLE_HIT_STROKE: f64 = 20.0;
pub const TICK_INNER_RADIUS: f64 = RADIUS - INNER_RING_WIDTH - 4.0;
pub const TICK_LENGTH: f64 = 8.0;
pub const LABEL_RADIUS: f64 = RADIUS - 48.0;
pub const LABEL_EVERY: Step = 4;

/// Duration of a range as shown in the middle of the dial.
pub fn duration_text(range: Range) -> String {
    let steps = if range.end >= range.start {
        range.end - range.start
    } else {
        // wrapped range, only reachable from an externally supplied initial state
        MAX_VAL - range.start + range.end
    };
    let minutes = steps * STEP_MINUTES;
    match minutes % 60 {
        0 => format!("{} h", minutes / 60),
        rest => format!("{} h {} min", minutes / 60, rest),
    }
}

/// Short textual form of a range, e.g. `10:00 – 15:00`.
pub fn range_label(range: Range) -> String {
    format!(
        "{} \u{2013} {}",
        crate::time::step_to_time(range.start),
        crate::time::step_to_time(range.end)
    )
}

pub fn selection_arc(range: Range) -> ArcPath {
    describe_arc(
        CENTER,
        RADIUS,
        value_to_degrees(range.start),
        value_to_degrees(range.end),
    )
}

/// Handle centre in the unrotated frame.
pub fn handle_center(value: Step) -> Point {
    angle_to_handle_center(CENTER, value_to_degrees(value).to_radians(), RADIUS)
}

pub fn handle_position(handle: Handle, range: Range) -> Point {
    match handle {
        Handle::Start => handle_center(range.start),
        Handle::End => handle_center(range.end),
    }
}

/// Rotates an unrotated-frame point into screen space (the ring is drawn turned -90°).
pub fn to_screen(p: Point) -> Point {
    let (dx, dy) = (p.x - CENTER.x, p.y - CENTER.y);
    Point::new(CENTER.x + dy, CENTER.y - dx)
}

/// Finds the handle under `pos` (internal screen coordinates). The end handle is drawn last
/// and wins when both overlap.
pub fn hit_test(pos: Point, range: Range) -> Option<Handle> {
    let reach = HANDLE_RADIUS + HANDLE_HIT_STROKE / 2.0;
    Handle::iter()
        .rev()
        .find(|&h| to_screen(handle_position(h, range)).distance(pos) <= reach)
}

/// Arcs for the closed part of the day followed by each unavailable interval.
///
/// Arcs are drawn with round caps, so each one is shortened by a step on both sides unless it
/// touches its neighbour, in which case the caps are allowed to overlap.
pub fn unavailable_arcs(window: &OpenCloseWindow, unavailable: &[Interval]) -> Vec<ArcPath> {
    let closed = (window.close_val(), window.open_val());
    let mut prev_end = -1;

    std::iter::once(closed)
        .chain(unavailable.iter().map(|i| (i.start(), i.end())))
        .filter(|(start, end)| start != end)
        .map(|(start, end)| {
            let start = if start != prev_end { start + 1 } else { start };
            prev_end = end;
            let end = if end != window.close_val() { end - 1 } else { end };
            describe_arc(
                CENTER,
                RADIUS,
                value_to_degrees(start),
                value_to_degrees(end),
            )
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub index: Step,
    pub inner: Point,
    pub outer: Point,
    pub stroke_width: f64,
    pub label: Option<TickLabel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    pub text: String,
    pub position: Point,
}

/// One tick per step in screen space, zero at the top, clockwise. Every fourth carries the hour.
pub fn ticks() -> Vec<Tick> {
    (0..step_count())
        .map(|index| {
            // screen angle measured from +x, so the top of the dial is -90°
            let deg = f64::from(index) * 360.0 / f64::from(step_count()) - 90.0;
            let label = (index % LABEL_EVERY == 0).then(|| TickLabel {
                text: (index / 2).to_string(),
                position: polar_to_point(CENTER, LABEL_RADIUS, deg),
            });
            Tick {
                index,
                inner: polar_to_point(CENTER, TICK_INNER_RADIUS, deg),
                outer: polar_to_point(CENTER, TICK_INNER_RADIUS + TICK_LENGTH, deg),
                stroke_width: if index % 2 == 1 { 1.0 } else { 2.0 },
                label,
            }
        })
        .collect()
}

/// Snapshot of everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct DialFrame {
    pub selection: ArcPath,
    pub start_handle: Point,
    pub end_handle: Point,
    pub unavailable: Vec<ArcPath>,
    pub ticks: Vec<Tick>,
    pub duration: String,
}

impl DialFrame {
    pub fn build(range: Range, window: &OpenCloseWindow, unavailable: &[Interval]) -> Self {
        Self {
            selection: selection_arc(range),
            start_handle: handle_position(Handle::Start, range),
            end_handle: handle_position(Handle::End, range),
            unavailable: unavailable_arcs(window, unavailable),
            ticks: ticks(),
            duration: duration_text(range),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> OpenCloseWindow {
        OpenCloseWindow::parse("08:00", "23:00").unwrap()
    }

    #[test]
    fn test_duration_text() {
        assert_eq!(duration_text(Range::new(20, 30)), "5 h");
        assert_eq!(duration_text(Range::new(20, 31)), "5 h 30 min");
        assert_eq!(duration_text(Range::new(20, 21)), "0 h 30 min");
        assert_eq!(duration_text(Range::new(20, 20)), "0 h");
    }

    #[test]
    fn test_duration_text_wrapped() {
        assert_eq!(duration_text(Range::new(44, 4)), "4 h");
        assert_eq!(duration_text(Range::new(45, 4)), "3 h 30 min");
    }

    #[test]
    fn test_range_label() {
        assert_eq!(range_label(Range::new(20, 31)), "10:00 \u{2013} 15:30");
    }

    #[test]
    fn test_selection_arc_uses_floored_angles() {
        let arc = selection_arc(Range::new(20, 31));
        assert_eq!(arc.start_deg, 150.0);
        assert_eq!(arc.end_deg, 232.0);
        assert!(!arc.large_arc);
    }

    #[test]
    fn test_ticks() {
        let ticks = ticks();
        assert_eq!(ticks.len(), 48);
        assert_eq!(ticks.iter().filter(|t| t.label.is_some()).count(), 12);
        assert_eq!(ticks[1].stroke_width, 1.0);
        assert_eq!(ticks[2].stroke_width, 2.0);

        let noon = ticks[24].label.as_ref().unwrap();
        assert_eq!(noon.text, "12");
        assert!((noon.position.x - 200.0).abs() < 1e-9);
        assert!((noon.position.y - (200.0 + LABEL_RADIUS)).abs() < 1e-9);

        let midnight = ticks[0].label.as_ref().unwrap();
        assert!((midnight.position.y - (200.0 - LABEL_RADIUS)).abs() < 1e-9);
    }

    #[test]
    fn test_unavailable_arcs() {
        let intervals = vec![Interval::new(34, 40).unwrap()];
        let arcs = unavailable_arcs(&window(), &intervals);
        assert_eq!(arcs.len(), 2);
        // closed part of the day, 23:30 round to 07:30
        assert_eq!(arcs[0].start_deg, value_to_degrees(47));
        assert_eq!(arcs[0].end_deg, value_to_degrees(15));
        assert_eq!(arcs[1].start_deg, value_to_degrees(35));
        assert_eq!(arcs[1].end_deg, value_to_degrees(39));
    }

    #[test]
    fn test_unavailable_arcs_back_to_back() {
        let intervals = vec![
            Interval::new(30, 34).unwrap(),
            Interval::new(34, 46).unwrap(),
        ];
        let arcs = unavailable_arcs(&window(), &intervals);
        assert_eq!(arcs.len(), 3);
        // touching the previous interval keeps its start
        assert_eq!(arcs[2].start_deg, value_to_degrees(34));
        // touching the close time keeps its end
        assert_eq!(arcs[2].end_deg, value_to_degrees(46));
    }

    #[test]
    fn test_full_day_window_has_no_closed_arc() {
        let window = OpenCloseWindow::parse("00:00", "00:00").unwrap();
        assert!(unavailable_arcs(&window, &[]).is_empty());
    }

    #[test]
    fn test_hit_test() {
        let range = Range::new(12, 24);
        // 6:00 sits at the right, 12:00 at the bottom
        assert_eq!(hit_test(Point::new(376.0, 200.0), range), Some(Handle::Start));
        assert_eq!(hit_test(Point::new(200.0, 370.0), range), Some(Handle::End));
        assert_eq!(hit_test(Point::new(200.0, 200.0), range), None);
        assert_eq!(hit_test(Point::new(376.0, 230.0), range), None);
    }

    #[test]
    fn test_frame() {
        let frame = DialFrame::build(Range::new(20, 30), &window(), &[]);
        assert_eq!(frame.duration, "5 h");
        assert_eq!(frame.ticks.len(), 48);
        assert_eq!(frame.unavailable.len(), 1);
    }
}
