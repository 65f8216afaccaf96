use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::{Srgb, Srgba, WithAlpha};
use ringtime::svg;
use std::str::FromStr;

pub struct ThemeColors {
    pub outer_ring: Srgba<f64>,
    pub inner_ring: Srgba<f64>,
    pub unavailable: Srgba<f64>,
    pub selection: Srgba<f64>,
    pub handle_ring: Srgba<f64>,
    pub tick: Srgba<f64>,
    pub text: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.0, 0.0, 0.0, 1.0),
                None,
            ),
            ..Self::default()
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            outer_ring: hex(svg::OUTER_RING_COLOR),
            inner_ring: hex(svg::INNER_RING_COLOR),
            unavailable: hex(svg::UNAVAILABLE_COLOR),
            selection: hex(svg::SELECTION_COLOR),
            handle_ring: Srgba::new(1.0, 1.0, 1.0, 1.0),
            tick: hex(svg::TICK_COLOR),
            text: Srgba::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

/// Parses `#rgb` / `#rrggbb`, falling back to opaque grey.
fn hex(code: &str) -> Srgba<f64> {
    Srgb::<u8>::from_str(code)
        .map(|c| c.into_format::<f64>().with_alpha(1.0))
        .unwrap_or_else(|e| {
            log::warn!("Bad colour '{}': {}", code, e);
            Srgba::new(0.5, 0.5, 0.5, 1.0)
        })
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.ringdial-summary {
    font-size: 18px;
    font-weight: 600;
}
.ringdial-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colours() {
        let selection = hex("#8cde12");
        assert!((selection.red - 140.0 / 255.0).abs() < 1e-9);
        assert!((selection.alpha - 1.0).abs() < 1e-9);

        let tick = hex("#888");
        assert!((tick.green - 136.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_bad_hex_falls_back() {
        let c = hex("not a colour");
        assert_eq!(c, Srgba::new(0.5, 0.5, 0.5, 1.0));
    }
}
