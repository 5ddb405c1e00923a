use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub label: Srgba<f64>,
    pub label_stroke: Srgba<f64>,
    pub glow: Srgba<f64>,
    pub rim: Srgba<f64>,
    pub aura: [Srgba<f64>; 3],
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            background: Self::lookup_color(
                context,
                "chakra_background",
                Srgba::new(0.0, 0.0, 9.0 / 255.0, 1.0),
                Some(1.0),
            ),
            label: Self::lookup_color(
                context,
                "chakra_label",
                Srgba::new(1.0, 215.0 / 255.0, 0.0, 1.0),
                None,
            ),
            label_stroke: Self::lookup_color(
                context,
                "chakra_label_stroke",
                Srgba::new(0.2, 0.133, 0.0, 1.0),
                None,
            ),
            glow: Self::lookup_color(
                context,
                "chakra_glow",
                Srgba::new(0.0, 234.0 / 255.0, 1.0, 0.85),
                Some(0.85),
            ),
            rim: Self::lookup_color(
                context,
                "chakra_rim",
                Srgba::new(1.0, 224.0 / 255.0, 0.4, 0.9),
                None,
            ),
            aura: [
                Self::lookup_color(
                    context,
                    "chakra_label",
                    Srgba::new(1.0, 215.0 / 255.0, 0.0, 0.18),
                    Some(0.18),
                ),
                Srgba::new(1.0, 248.0 / 255.0, 176.0 / 255.0, 0.11),
                Srgba::new(1.0, 224.0 / 255.0, 0.4, 0.07),
            ],
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
@define-color chakra_background #000009;
@define-color chakra_label #ffd700;
@define-color chakra_label_stroke #332200;
@define-color chakra_glow #00eaff;
@define-color chakra_rim #ffe066;

.chakra-window, .chakra-scene {
    background-color: @chakra_background;
}

.chakra-splash {
    color: @chakra_label;
    padding: 32px;
}

.chakra-splash .title {
    font-size: 3rem;
    font-weight: bold;
}

.chakra-splash button, .chakra-back {
    color: @chakra_label;
    background: rgba(20, 20, 40, 0.85);
    border: 1px solid alpha(@chakra_label, 0.33);
    border-radius: 8px;
    padding: 8px 20px;
}

.chakra-controls {
    color: #ffe066;
    background: rgba(20, 20, 40, 0.85);
    border: 1px solid alpha(@chakra_label, 0.33);
    border-radius: 10px;
    padding: 14px 22px;
    transition: border-color 200ms, box-shadow 200ms;
}

.chakra-controls label.lit {
    color: @chakra_label;
    text-shadow: 0 0 12px @chakra_label;
}

.chakra-detail {
    background-color: rgba(10, 10, 30, 0.97);
}

.chakra-detail-card {
    color: @chakra_label;
    padding: 32px 32px 64px 32px;
}

.chakra-detail-card .title {
    font-size: 2rem;
    font-weight: bold;
}

.chakra-detail-card .description {
    color: #fff8b0;
    font-size: 1.1rem;
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
