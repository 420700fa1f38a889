use egui::{Context, Visuals, Style, Color32, Rounding, Stroke, FontId, FontFamily, TextStyle};
use std::collections::BTreeMap;

/// Theme configuration
pub struct Theme {
    pub dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            dark_mode: true,
        }
    }
}

/// Apply the application theme
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    let mut style = Style::default();
    let mut visuals = if theme.dark_mode { Visuals::dark() } else { Visuals::light() };

    let panel_bg = Color32::from_rgb(28, 28, 32);
    let widget_bg = Color32::from_rgb(44, 44, 50);
    let hover_color = Color32::from_rgb(58, 58, 66);
    let text_color = Color32::from_rgb(225, 225, 225);

    if theme.dark_mode {
        visuals.window_fill = panel_bg;
        visuals.panel_fill = panel_bg;
        visuals.faint_bg_color = widget_bg;

        visuals.widgets.inactive.bg_fill = widget_bg;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_color);
        visuals.widgets.hovered.bg_fill = hover_color;
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text_color);
    }

    visuals.widgets.inactive.rounding = Rounding::same(6.0);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);
    visuals.widgets.active.rounding = Rounding::same(6.0);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent_color());
    visuals.selection.bg_fill = accent_color().linear_multiply(0.3);
    visuals.hyperlink_color = accent_color();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);

    // Font sizes
    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(15.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(15.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(28.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace));

    style.text_styles = font_sizes;

    ctx.set_style(style);
    ctx.set_visuals(visuals);
}

/// Background colour for an entry, derived from its primary category.
///
/// Pure: the panel passes the result to its own frame instead of writing
/// any shared style state.
pub fn category_color(category: Option<&str>) -> Color32 {
    match category.map(str::to_ascii_lowercase).as_deref() {
        Some("normal") => Color32::from_rgb(168, 167, 122),
        Some("fire") => Color32::from_rgb(238, 129, 48),
        Some("water") => Color32::from_rgb(99, 144, 240),
        Some("electric") => Color32::from_rgb(247, 208, 44),
        Some("grass") => Color32::from_rgb(122, 199, 76),
        Some("ice") => Color32::from_rgb(150, 217, 214),
        Some("fighting") => Color32::from_rgb(194, 46, 40),
        Some("poison") => Color32::from_rgb(163, 62, 161),
        Some("ground") => Color32::from_rgb(226, 191, 101),
        Some("flying") => Color32::from_rgb(169, 143, 243),
        Some("psychic") => Color32::from_rgb(249, 85, 135),
        Some("bug") => Color32::from_rgb(166, 185, 26),
        Some("rock") => Color32::from_rgb(182, 161, 54),
        Some("ghost") => Color32::from_rgb(115, 87, 151),
        Some("dragon") => Color32::from_rgb(111, 53, 252),
        Some("dark") => Color32::from_rgb(112, 87, 70),
        Some("steel") => Color32::from_rgb(183, 183, 206),
        Some("fairy") => Color32::from_rgb(214, 133, 173),
        _ => Color32::from_rgb(60, 60, 68),
    }
}

/// Category colour darkened enough to sit behind light text
pub fn entry_background(category: Option<&str>) -> Color32 {
    let base = category_color(category);
    let scale = |c: u8| (f32::from(c) * 0.45) as u8;
    Color32::from_rgb(scale(base.r()), scale(base.g()), scale(base.b()))
}

/// Get the accent color for the theme
pub fn accent_color() -> Color32 {
    Color32::from_rgb(100, 150, 250)
}

/// Get the error color for the theme
pub fn error_color() -> Color32 {
    Color32::from_rgb(230, 80, 80)
}

/// Text colour for secondary labels
pub fn muted_text_color() -> Color32 {
    Color32::from_rgb(160, 160, 160)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_color_is_case_insensitive() {
        assert_eq!(category_color(Some("Grass")), category_color(Some("grass")));
        assert_ne!(category_color(Some("fire")), category_color(Some("water")));
    }

    #[test]
    fn test_unknown_category_uses_neutral() {
        assert_eq!(category_color(Some("shadow")), category_color(None));
    }

    #[test]
    fn test_entry_background_is_darker() {
        let base = category_color(Some("electric"));
        let bg = entry_background(Some("electric"));
        assert!(bg.r() < base.r() && bg.g() < base.g());
    }
}
