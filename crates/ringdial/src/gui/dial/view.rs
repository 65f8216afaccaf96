use super::{
    DURATION_FONT_SIZE, FONT_FAMILY, HANDLE_RING_INSET, RING_ROTATION, SELECTION_DASH,
    TICK_FONT_SIZE,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use ringtime::display::{
    CENTER, DialFrame, HANDLE_RADIUS, INNER_RING_WIDTH, OUTER_RING_WIDTH, RADIUS, Tick,
};
use ringtime::geometry::{ArcPath, Point};
use ringtime::interaction::INTERNAL_SIZE;
use std::f64::consts::PI;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Replays an [`ArcPath`]: from its end angle back to its start angle, decreasing.
fn stroke_arc(cr: &Context, arc: &ArcPath) -> Result<(), cairo::Error> {
    let from = arc.from_point();
    cr.new_path();
    cr.move_to(from.x, from.y);
    cr.arc_negative(
        arc.center.x,
        arc.center.y,
        arc.radius,
        arc.end_deg.to_radians(),
        arc.start_deg.to_radians(),
    );
    if arc.closed {
        cr.close_path();
    }
    cr.stroke()
}

fn draw_ring(cr: &Context, width: f64, color: Srgba<f64>) -> Result<(), cairo::Error> {
    set_color(cr, color);
    cr.set_line_width(width);
    cr.new_path();
    cr.arc(CENTER.x, CENTER.y, RADIUS, 0.0, 2.0 * PI);
    cr.stroke()
}

fn draw_handle(cr: &Context, center: Point, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.selection);
    cr.new_path();
    cr.arc(center.x, center.y, HANDLE_RADIUS, 0.0, 2.0 * PI);
    cr.fill()?;

    set_color(cr, colors.handle_ring);
    cr.set_line_width(1.0);
    cr.new_path();
    cr.arc(
        center.x,
        center.y,
        HANDLE_RADIUS - HANDLE_RING_INSET,
        0.0,
        2.0 * PI,
    );
    cr.stroke()
}

/// Rings, blocked arcs, selection and handles, drawn in the frame rotated so zero is at the top.
fn draw_ring_group(cr: &Context, frame: &DialFrame, colors: &ThemeColors) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.translate(CENTER.x, CENTER.y);
    cr.rotate(RING_ROTATION);
    cr.translate(-CENTER.x, -CENTER.y);

    draw_ring(cr, OUTER_RING_WIDTH, colors.outer_ring)?;
    draw_ring(cr, INNER_RING_WIDTH, colors.inner_ring)?;

    set_color(cr, colors.unavailable);
    cr.set_line_width(INNER_RING_WIDTH);
    cr.set_line_cap(cairo::LineCap::Round);
    for arc in &frame.unavailable {
        stroke_arc(cr, arc)?;
    }
    cr.set_line_cap(cairo::LineCap::Butt);

    set_color(cr, colors.selection);
    cr.set_dash(&SELECTION_DASH, 0.0);
    stroke_arc(cr, &frame.selection)?;
    cr.set_dash(&[], 0.0);

    draw_handle(cr, frame.start_handle, colors)?;
    draw_handle(cr, frame.end_handle, colors)?;

    cr.restore()
}

fn draw_centered_text(cr: &Context, text: &str, at: Point) -> Result<(), cairo::Error> {
    let ext = cr.text_extents(text)?;
    cr.move_to(
        at.x - ext.width() / 2.0 - ext.x_bearing(),
        at.y - ext.height() / 2.0 - ext.y_bearing(),
    );
    cr.show_text(text)
}

fn draw_tick(cr: &Context, tick: &Tick, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.tick);
    cr.set_line_width(tick.stroke_width);
    cr.new_path();
    cr.move_to(tick.inner.x, tick.inner.y);
    cr.line_to(tick.outer.x, tick.outer.y);
    cr.stroke()?;

    if let Some(label) = &tick.label {
        cr.select_font_face(FONT_FAMILY, cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(TICK_FONT_SIZE);
        draw_centered_text(cr, &label.text, label.position)?;
    }
    Ok(())
}

/// Draws the whole dial into a square of side `width`.
pub fn draw(
    cr: &Context,
    frame: &DialFrame,
    width: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    cr.save()?;
    let scale = width / INTERNAL_SIZE;
    cr.scale(scale, scale);

    draw_ring_group(cr, frame, colors)?;

    for tick in &frame.ticks {
        draw_tick(cr, tick, colors)?;
    }

    set_color(cr, colors.text);
    cr.select_font_face(FONT_FAMILY, cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(DURATION_FONT_SIZE);
    draw_centered_text(cr, &frame.duration, CENTER)?;

    cr.restore()
}
