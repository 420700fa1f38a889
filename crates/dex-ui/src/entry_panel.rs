//! Entry panel: navigation arrows, number lookup, animated name and description

use std::sync::Arc;
use std::time::Duration;

use dex_core::{
    AnimatedContentController, ContentSlot, EntryDetails, NavigationDirection, NavigationStep,
    SlotView,
};
use egui::{Align2, Color32, FontId, Key, RichText, Sense, Ui, Vec2};
use tracing::debug;

use crate::assets::{artwork_url, padded_number};
use crate::theme::{accent_color, category_color, entry_background, error_color, muted_text_color};

/// Panel configuration
#[derive(Debug, Clone)]
pub struct EntryPanelConfig {
    /// Horizontal distance the name slides in from
    pub slide_distance: f32,
    /// Upper bound used to scale stat bars
    pub max_stat: u32,
    pub show_details: bool,
    /// Repaint cadence while a slot is animating
    pub repaint_interval: Duration,
}

impl Default for EntryPanelConfig {
    fn default() -> Self {
        Self {
            slide_distance: 60.0,
            max_stat: 255,
            show_details: true,
            repaint_interval: Duration::from_millis(16),
        }
    }
}

/// Renders the controller's observable state and forwards user input to it
pub struct EntryPanel {
    controller: Arc<AnimatedContentController>,
    config: EntryPanelConfig,
    lookup_input: String,
    lookup_error: Option<String>,
    /// Index and start time of the slide in progress
    slide: Option<(u32, NavigationDirection, f64)>,
}

impl EntryPanel {
    pub fn new(controller: Arc<AnimatedContentController>) -> Self {
        Self {
            controller,
            config: EntryPanelConfig::default(),
            lookup_input: String::new(),
            lookup_error: None,
            slide: None,
        }
    }

    /// Show the panel
    pub fn show(&mut self, ui: &mut Ui) {
        let navigation = self.controller.navigation_view();
        let name = self.controller.slot_view(ContentSlot::Name);
        let description = self.controller.slot_view(ContentSlot::Description);
        let details = self.controller.details_view();

        let now = ui.input(|i| i.time);
        self.track_slide(navigation.index, navigation.direction, now);

        let background = entry_background(details.as_ref().and_then(|d| d.primary_category()));

        egui::Frame::none()
            .fill(background)
            .rounding(10.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                self.show_header(ui, navigation.index, navigation.catalog_size);
                ui.add_space(8.0);
                self.show_name(ui, &name, now);
                ui.add_space(4.0);
                show_description(ui, &description);

                if self.config.show_details {
                    if let Some(details) = details.as_ref().filter(|d| d.key == name.key) {
                        ui.add_space(8.0);
                        self.show_details(ui, details);
                    }
                }
            });

        ui.add_space(8.0);
        self.show_lookup(ui);

        if name.is_busy() || description.is_busy() || self.slide.is_some() {
            ui.ctx().request_repaint_after(self.config.repaint_interval);
        }
    }

    fn show_header(&mut self, ui: &mut Ui, index: u32, catalog_size: u32) {
        ui.horizontal(|ui| {
            let back = ui
                .add_sized([36.0, 28.0], egui::Button::new("◀"))
                .on_hover_text("Previous entry (←)");
            if back.clicked() {
                self.controller.on_navigate(NavigationStep::Backward);
            }

            ui.label(
                RichText::new(format!("#{}", padded_number(index)))
                    .monospace()
                    .size(18.0)
                    .color(Color32::WHITE),
            );
            ui.label(RichText::new(format!("of {}", catalog_size)).small().color(muted_text_color()));

            let forward = ui
                .add_sized([36.0, 28.0], egui::Button::new("▶"))
                .on_hover_text("Next entry (→)");
            if forward.clicked() {
                self.controller.on_navigate(NavigationStep::Forward);
            }
        });
    }

    fn show_name(&self, ui: &mut Ui, view: &SlotView, now: f64) {
        let font = FontId::proportional(28.0);
        let (rect, _) = ui.allocate_exact_size(Vec2::new(ui.available_width(), 36.0), Sense::hover());

        let offset = match self.slide {
            Some((_, direction, started)) => {
                let progress = ((now - started) / self.transition_secs()) as f32;
                slide_offset(direction, progress, self.config.slide_distance)
            }
            None => 0.0,
        };

        let color = if view.is_fallback() { error_color() } else { Color32::WHITE };
        ui.painter_at(rect).text(
            rect.left_center() + Vec2::new(offset, 0.0),
            Align2::LEFT_CENTER,
            &view.text,
            font,
            color,
        );
    }

    fn show_details(&self, ui: &mut Ui, details: &EntryDetails) {
        ui.horizontal(|ui| {
            for category in &details.categories {
                egui::Frame::none()
                    .fill(category_color(Some(category)))
                    .rounding(8.0)
                    .inner_margin(Vec2::new(8.0, 2.0))
                    .show(ui, |ui| {
                        ui.label(RichText::new(category.to_uppercase()).small().color(Color32::WHITE));
                    });
            }
        });

        ui.label(
            RichText::new(format!("{:.1} m  ·  {:.1} kg", details.height_m(), details.weight_kg()))
                .color(muted_text_color()),
        );

        egui::Grid::new(("entry_stats", details.key))
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                for stat in &details.stats {
                    ui.label(RichText::new(&stat.name).small());
                    let fraction = stat.value as f32 / self.config.max_stat.max(1) as f32;
                    ui.add(
                        egui::ProgressBar::new(fraction.min(1.0))
                            .desired_width(180.0)
                            .fill(accent_color())
                            .text(stat.value.to_string()),
                    );
                    ui.end_row();
                }
            });
        ui.label(RichText::new(format!("Total {}", details.stat_total())).small());

        ui.hyperlink_to("Artwork", artwork_url(details.key));
    }

    fn show_lookup(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Go to #");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.lookup_input)
                    .desired_width(80.0)
                    .hint_text("1"),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

            if ui.button("Go").clicked() || submitted {
                self.submit_lookup();
            }
        });

        if let Some(error) = &self.lookup_error {
            ui.label(RichText::new(error).small().color(error_color()));
        }
    }

    fn submit_lookup(&mut self) {
        let Some(value) = parse_lookup(&self.lookup_input) else {
            self.lookup_error = Some(format!("'{}' is not a number", self.lookup_input.trim()));
            return;
        };

        match self.controller.on_jump_to(value) {
            Ok(index) => {
                debug!(index, "Lookup submitted");
                self.lookup_error = None;
                self.lookup_input.clear();
            }
            Err(err) => self.lookup_error = Some(err.to_string()),
        }
    }

    fn track_slide(&mut self, index: u32, direction: NavigationDirection, now: f64) {
        match self.slide {
            Some((slide_index, _, started)) if slide_index == index => {
                if now - started >= self.transition_secs() {
                    self.slide = None;
                }
            }
            _ if direction != NavigationDirection::None => {
                self.slide = Some((index, direction, now));
            }
            _ => self.slide = None,
        }
    }

    fn transition_secs(&self) -> f64 {
        self.controller.settings().transition.as_secs_f64().max(f64::EPSILON)
    }
}

fn show_description(ui: &mut Ui, view: &SlotView) {
    let color = if view.is_fallback() { muted_text_color() } else { Color32::from_gray(230) };
    ui.label(RichText::new(&view.text).size(16.0).color(color));

    if let Some(failure) = &view.failure {
        if failure.is_user_visible() {
            ui.label(RichText::new(failure.to_string()).small().color(error_color()));
        }
    }

    if view.is_busy() && view.text.is_empty() {
        ui.spinner();
    }
}

/// Horizontal offset of the name during a slide.
///
/// Forward moves enter from the right, backward moves from the left. `progress`
/// runs from 0 to 1 over the transition window.
pub fn slide_offset(direction: NavigationDirection, progress: f32, distance: f32) -> f32 {
    let remaining = 1.0 - progress.clamp(0.0, 1.0);
    let eased = remaining * remaining;
    match direction {
        NavigationDirection::Forward => distance * eased,
        NavigationDirection::Backward => -distance * eased,
        NavigationDirection::None => 0.0,
    }
}

/// Arrow keys map to relative navigation
pub fn navigation_from_keys(input: &egui::InputState) -> Option<NavigationStep> {
    if input.key_pressed(Key::ArrowRight) {
        Some(NavigationStep::Forward)
    } else if input.key_pressed(Key::ArrowLeft) {
        Some(NavigationStep::Backward)
    } else {
        None
    }
}

/// Parse the lookup field; accepts an optional leading '#'
pub fn parse_lookup(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    trimmed.strip_prefix('#').unwrap_or(trimmed).trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_offset() {
        assert_eq!(slide_offset(NavigationDirection::Forward, 0.0, 60.0), 60.0);
        assert_eq!(slide_offset(NavigationDirection::Backward, 0.0, 60.0), -60.0);
        assert_eq!(slide_offset(NavigationDirection::Forward, 1.0, 60.0), 0.0);
        assert_eq!(slide_offset(NavigationDirection::None, 0.3, 60.0), 0.0);

        let halfway = slide_offset(NavigationDirection::Forward, 0.5, 60.0);
        assert!(halfway > 0.0 && halfway < 30.0);
        assert_eq!(slide_offset(NavigationDirection::Forward, 2.0, 60.0), 0.0);
    }

    #[test]
    fn test_parse_lookup() {
        assert_eq!(parse_lookup("25"), Some(25));
        assert_eq!(parse_lookup(" #007 "), Some(7));
        assert_eq!(parse_lookup("-3"), Some(-3));
        assert_eq!(parse_lookup("pikachu"), None);
        assert_eq!(parse_lookup(""), None);
    }

    #[test]
    fn test_navigation_from_keys() {
        let ctx = egui::Context::default();
        let key_event = |key| egui::Event::Key {
            key,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        };

        let raw = egui::RawInput {
            events: vec![key_event(Key::ArrowRight)],
            ..Default::default()
        };
        ctx.begin_frame(raw);
        assert_eq!(ctx.input(navigation_from_keys), Some(NavigationStep::Forward));
        let _ = ctx.end_frame();

        let raw = egui::RawInput {
            events: vec![key_event(Key::ArrowLeft)],
            ..Default::default()
        };
        ctx.begin_frame(raw);
        assert_eq!(ctx.input(navigation_from_keys), Some(NavigationStep::Backward));
        let _ = ctx.end_frame();

        ctx.begin_frame(egui::RawInput::default());
        assert_eq!(ctx.input(navigation_from_keys), None);
        let _ = ctx.end_frame();
    }
}
