//! Static SVG rendering of a dial, for previews and snapshot tests.

use crate::display::{
    CENTER, DialFrame, HANDLE_HIT_STROKE, HANDLE_RADIUS, INNER_RING_WIDTH, OUTER_RING_WIDTH,
    RADIUS,
};
use crate::geometry::Point;
use crate::interaction::{Handle, INTERNAL_SIZE};
use std::fmt::Write;

const FONT_FAMILY: &str = "Segoe UI, Roboto, sans-serif";

pub const OUTER_RING_COLOR: &str = "#e1e8f5";
pub const INNER_RING_COLOR: &str = "#5d8ff5";
pub const UNAVAILABLE_COLOR: &str = "#abb0ba";
pub const SELECTION_COLOR: &str = "#8cde12";
pub const TICK_COLOR: &str = "#888";

pub fn render(frame: &DialFrame, width: f64) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = write_document(&mut out, frame, width);
    out
}

fn write_document(out: &mut String, frame: &DialFrame, width: f64) -> std::fmt::Result {
    writeln!(
        out,
        r#"<svg id="time-range-selector" version="1.1" baseProfile="full" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {s} {s}" width="{width}" height="{width}">"#,
        s = INTERNAL_SIZE,
    )?;
    writeln!(
        out,
        r#"<g transform="rotate(-90, {}, {})">"#,
        CENTER.x, CENTER.y
    )?;
    write_ring(out, OUTER_RING_WIDTH, OUTER_RING_COLOR)?;
    write_ring(out, INNER_RING_WIDTH, INNER_RING_COLOR)?;

    for arc in &frame.unavailable {
        writeln!(
            out,
            r#"<path d="{arc}" stroke="{UNAVAILABLE_COLOR}" stroke-width="{INNER_RING_WIDTH}" stroke-linecap="round" fill="none"/>"#
        )?;
    }

    writeln!(
        out,
        r#"<path d="{}" stroke-dasharray="8 2" stroke="{SELECTION_COLOR}" stroke-width="{INNER_RING_WIDTH}" fill="none"/>"#,
        frame.selection
    )?;
    write_handle(out, Handle::Start, frame.start_handle)?;
    write_handle(out, Handle::End, frame.end_handle)?;
    writeln!(out, "</g>")?;

    for tick in &frame.ticks {
        writeln!(
            out,
            r#"<path d="M {} {} L {} {}" stroke-width="{}" stroke="{TICK_COLOR}"/>"#,
            tick.inner.x, tick.inner.y, tick.outer.x, tick.outer.y, tick.stroke_width
        )?;
        if let Some(label) = &tick.label {
            writeln!(
                out,
                r#"<text x="{}" y="{}" font-size="16" font-family="{FONT_FAMILY}" fill="{TICK_COLOR}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                label.position.x, label.position.y, label.text
            )?;
        }
    }

    writeln!(
        out,
        r#"<text x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="24" font-weight="600" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
        CENTER.x, CENTER.y, frame.duration
    )?;
    writeln!(out, "</svg>")
}

fn write_ring(out: &mut String, stroke_width: f64, color: &str) -> std::fmt::Result {
    writeln!(
        out,
        r#"<circle cx="{}" cy="{}" r="{RADIUS}" stroke-width="{stroke_width}" stroke="{color}" fill="none"/>"#,
        CENTER.x, CENTER.y
    )
}

fn write_handle(out: &mut String, handle: Handle, center: Point) -> std::fmt::Result {
    writeln!(
        out,
        r#"<circle id="{}" cx="{}" cy="{}" r="{HANDLE_RADIUS}" stroke-width="{HANDLE_HIT_STROKE}" stroke="transparent" fill="{SELECTION_COLOR}"/>"#,
        handle.element_id(),
        center.x,
        center.y
    )?;
    writeln!(
        out,
        r##"<circle cx="{}" cy="{}" r="{}" stroke="#fff" stroke-width="1" fill="none" pointer-events="none"/>"##,
        center.x,
        center.y,
        HANDLE_RADIUS - 6.0
    )
}
