use crate::time::{MIN_VAL, Step, step_count};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;

/// Bias applied to pointer angles so a value never lands exactly on a step boundary.
pub const ANGLE_BIAS: f64 = 0.999;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

pub fn polar_to_point(center: Point, radius: f64, angle_deg: f64) -> Point {
    let angle = angle_deg.to_radians();
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// A circular arc traversed from `end_deg` back to `start_deg` (decreasing angle).
#[derive(Debug, Clone, PartialEq)]
pub struct ArcPath {
    pub center: Point,
    pub radius: f64,
    pub start_deg: f64,
    pub end_deg: f64,
    pub large_arc: bool,
    pub closed: bool,
}

impl ArcPath {
    /// Where the path begins, i.e. the point at `end_deg`.
    pub fn from_point(&self) -> Point {
        polar_to_point(self.center, self.radius, self.end_deg)
    }

    pub fn to_point(&self) -> Point {
        polar_to_point(self.center, self.radius, self.start_deg)
    }

    pub fn is_degenerate(&self) -> bool {
        self.from_point().distance(self.to_point()) < f64::EPSILON && !self.closed
    }
}

impl fmt::Display for ArcPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (from, to) = (self.from_point(), self.to_point());
        write!(
            f,
            "M {} {} A {} {} 0 {} 0 {} {}",
            from.x,
            from.y,
            self.radius,
            self.radius,
            u8::from(self.large_arc),
            to.x,
            to.y
        )?;
        if self.closed {
            write!(f, " z")?;
        }
        Ok(())
    }
}

pub fn describe_arc(center: Point, radius: f64, start_deg: f64, end_deg: f64) -> ArcPath {
    let full_circle = end_deg - start_deg == 360.0;
    // a 360 degree arc has identical endpoints and would draw nothing
    let end_deg = if full_circle { 359.0 } else { end_deg };

    let span = end_deg - start_deg;
    let large_arc = if end_deg > start_deg {
        span > 180.0
    } else {
        span.abs() <= 180.0
    };

    ArcPath {
        center,
        radius,
        start_deg,
        end_deg,
        large_arc,
        closed: full_circle,
    }
}

/// Handle dot position for an angle in radians, 0 rad on the +x axis of the unrotated frame.
pub fn angle_to_handle_center(center: Point, angle: f64, radius: f64) -> Point {
    Point::new(
        center.x + angle.cos() * radius,
        center.y + angle.sin() * radius,
    )
}

/// Maps a pointer position to a dial angle in `[0, 2π)`, zero at the top, growing clockwise.
pub fn pointer_to_angle(center: Point, pointer: Point) -> f64 {
    let raw = (pointer.y - center.y).atan2(pointer.x - center.x);
    if raw < -FRAC_PI_2 {
        raw + TAU * 1.25
    } else {
        raw + TAU * 0.25
    }
}

/// Pointer angle with the seam bias applied, ready for [`angle_to_value`].
pub fn biased_pointer_angle(center: Point, pointer: Point) -> f64 {
    pointer_to_angle(center, pointer) * ANGLE_BIAS
}

pub fn angle_to_value(angle: f64) -> Step {
    let steps = (angle / TAU * f64::from(step_count())).round() as Step;
    MIN_VAL + steps.rem_euclid(step_count())
}

pub fn value_to_angle(value: Step) -> f64 {
    f64::from(value - MIN_VAL) / f64::from(step_count()) * TAU
}

/// Whole-degree angle used for drawing a value.
pub fn value_to_degrees(value: Step) -> f64 {
    (f64::from(value - MIN_VAL) / f64::from(step_count()) * 360.0).floor()
}
