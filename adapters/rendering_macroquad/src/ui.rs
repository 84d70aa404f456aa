//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types. Stage content arrives as a
//! [`StageView`] and interactions leave as [`Action`]s and text edits.

use drawing_buddy_system_stage_view::{Action, Element, InputField, StageView};
use macroquad::{
    color::Color,
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};

const TEXT_COLOR: Color = Color::new(0.29, 0.18, 0.42, 1.0);
const MUTED_TEXT_COLOR: Color = Color::new(0.55, 0.5, 0.62, 1.0);

/// Outcome of rendering the stage panel during the current frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct StagePanelUiResult {
    /// Buttons and options pressed during this frame.
    pub actions: Vec<Action>,
    /// Inputs whose contents changed during this frame.
    pub edits: Vec<(InputField, String)>,
}

/// Snapshot of the panel's layout for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct StagePanelUiContext {
    /// Top-left corner of the panel body in screen coordinates.
    pub origin: Vec2,
    /// Panel body dimensions in screen space.
    pub size: Vec2,
    /// Background colour of the panel body.
    pub background: Color,
    /// Accent colour used for buttons.
    pub accent: Color,
    /// Accent shade under the cursor.
    pub accent_hovered: Color,
    /// Accent shade of buttons that cannot be pressed.
    pub accent_inactive: Color,
}

/// Renders the interactive body of the stage card.
pub(crate) fn draw_stage_panel_ui(
    ui: &mut Ui,
    context: StagePanelUiContext,
    view: &StageView,
) -> StagePanelUiResult {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .color_selected(context.background)
        .color_selected_hovered(context.background)
        .color_inactive(context.background)
        .text_color(TEXT_COLOR)
        .margin(RectOffset::new(24.0, 24.0, 16.0, 16.0))
        .build();
    skin.window_style = window_style;

    let label_style = ui
        .style_builder()
        .text_color(TEXT_COLOR)
        .text_color_hovered(TEXT_COLOR)
        .text_color_clicked(TEXT_COLOR)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 4.0))
        .build();
    skin.label_style = label_style;

    let accent = context.accent;
    let button_style = ui
        .style_builder()
        .text_color(Color::new(1.0, 1.0, 1.0, 1.0))
        .text_color_hovered(Color::new(1.0, 1.0, 1.0, 1.0))
        .text_color_clicked(Color::new(1.0, 1.0, 1.0, 1.0))
        .color(accent)
        .color_hovered(context.accent_hovered)
        .color_clicked(accent)
        .color_inactive(context.accent_inactive)
        .margin(RectOffset::new(12.0, 12.0, 8.0, 8.0))
        .build();
    skin.button_style = button_style;

    ui.push_skin(&skin);

    let mut result = StagePanelUiResult::default();
    let _ = ui.window(hash!("stage_panel"), context.origin, context.size, |ui| {
        for (index, element) in view.elements.iter().enumerate() {
            draw_element(ui, index, element, &mut result);
        }
    });

    ui.pop_skin();

    result
}

fn draw_element(ui: &mut Ui, index: usize, element: &Element, result: &mut StagePanelUiResult) {
    match element {
        Element::Text(text) => ui.label(None, text),
        Element::TextInput {
            field,
            placeholder,
            value,
        } => {
            if value.is_empty() {
                let skin = muted_label_skin(ui);
                ui.push_skin(&skin);
                ui.label(None, placeholder);
                ui.pop_skin();
            }
            let mut buffer = value.clone();
            ui.input_text(hash!("stage_input", index), "", &mut buffer);
            if buffer != *value {
                result.edits.push((*field, buffer));
            }
        }
        Element::Button {
            label,
            action,
            enabled,
        } => {
            if *enabled {
                if ui.button(None, *label) {
                    result.actions.push(*action);
                }
            } else {
                let skin = muted_label_skin(ui);
                ui.push_skin(&skin);
                ui.label(None, label);
                ui.pop_skin();
            }
        }
        Element::Choice {
            label,
            detail,
            action,
        } => {
            if ui.button(None, label.as_str()) {
                result.actions.push(*action);
            }
            if let Some(detail) = detail {
                ui.label(None, detail);
            }
        }
        Element::Image { source, caption } => {
            ui.label(None, &format!("[{caption}] {source}"));
        }
        Element::GallerySlot {
            index: slot,
            source,
            delete,
        } => {
            ui.label(None, &format!("Drawing {}: {source}", slot + 1));
            if ui.button(None, "Delete") {
                result.actions.push(*delete);
            }
        }
    }
}

fn muted_label_skin(ui: &Ui) -> macroquad::ui::Skin {
    let mut skin = ui.default_skin();
    skin.label_style = ui
        .style_builder()
        .text_color(MUTED_TEXT_COLOR)
        .text_color_hovered(MUTED_TEXT_COLOR)
        .text_color_clicked(MUTED_TEXT_COLOR)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 4.0))
        .build();
    skin
}
