use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Moves each channel toward white by `perc` of its distance; negative values darken.
pub fn adjust(color: Srgba<f64>, perc: f64) -> Srgba<f64> {
    let shift = |c: f64| (c + (1.0 - c) * perc).clamp(0.0, 1.0);
    Srgba::new(
        shift(color.red),
        shift(color.green),
        shift(color.blue),
        color.alpha,
    )
}

pub fn with_alpha(color: Srgba<f64>, alpha: f64) -> Srgba<f64> {
    Srgba::new(color.red, color.green, color.blue, alpha)
}

pub struct WheelColors {
    pub box_bg: Srgba<f64>,
    pub box_hovered: Srgba<f64>,
    pub title_bg: Srgba<f64>,
    pub title_hovered: Srgba<f64>,
    pub button_hovered: Srgba<f64>,
    pub separator: Srgba<f64>,
    pub text: Srgba<f64>,
    pub hint_bg: Srgba<f64>,
    pub wheel: Srgba<f64>,
    pub accent: Srgba<f64>,
}

impl WheelColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let base = Self::lookup_color(
            context,
            "theme_bg_color",
            Srgba::new(0.16, 0.16, 0.16, 0.95),
            Some(0.95),
        );
        let text = Self::lookup_color(
            context,
            "theme_fg_color",
            Srgba::new(0.9, 0.9, 0.9, 1.0),
            None,
        );
        let accent = Self::lookup_color(
            context,
            "theme_selected_bg_color",
            Srgba::new(0.28, 0.45, 0.7, 1.0),
            Some(1.0),
        );
        let borders = Self::lookup_color(
            context,
            "borders",
            Srgba::new(0.1, 0.1, 0.1, 1.0),
            Some(1.0),
        );

        Self {
            box_bg: adjust(base, -0.03),
            box_hovered: adjust(base, 0.04),
            title_bg: adjust(base, -0.1),
            title_hovered: adjust(base, -0.2),
            button_hovered: with_alpha(accent, 0.6),
            separator: adjust(borders, -0.03),
            text,
            hint_bg: with_alpha(adjust(base, 0.25), 0.98),
            wheel: with_alpha(adjust(base, 0.07), 0.9),
            accent,
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

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.gpwheel-window, .gpwheel-drawing-area {
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
