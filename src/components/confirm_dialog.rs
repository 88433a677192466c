use iocraft::prelude::*;

use crate::color::{Color as AppColor, ColorDepth};
use crate::gate::{ButtonOrder, GateButton};

// ---------------------------------------------------------------------------
// Confirmation dialog
// ---------------------------------------------------------------------------

pub struct DialogButton {
    pub label: String,
    pub is_focused: bool,
}

/// Pre-rendered dialog data (owned, 'static-safe).
pub struct RenderedConfirmDialog {
    pub title: String,
    pub message: String,
    /// e.g. `"2/3"`; empty for single-step dialogs.
    pub progress: String,
    pub buttons: Vec<DialogButton>,
    pub hint: String,
    pub title_fg: Color,
    pub message_fg: Color,
    pub button_fg: Color,
    pub focus_fg: Color,
    pub focus_bg: Color,
    pub border_fg: Color,
    pub hint_fg: Color,
}

/// Configuration for building a confirmation dialog.
pub struct ConfirmDialogBuildConfig {
    pub title: String,
    pub message: String,
    pub progress: Option<(usize, usize)>,
    pub buttons: Vec<DialogButton>,
    pub hint: String,
    pub depth: ColorDepth,
    pub title_color: Option<AppColor>,
    pub message_color: Option<AppColor>,
    pub focus_color: Option<AppColor>,
    pub selected_bg: Option<AppColor>,
    pub border_color: Option<AppColor>,
    pub hint_color: Option<AppColor>,
}

/// Buttons laid out in `order`, with `focus` highlighted.
pub fn gate_buttons(order: ButtonOrder, focus: GateButton) -> Vec<DialogButton> {
    order
        .as_array()
        .into_iter()
        .map(|b| DialogButton {
            label: b.label().to_owned(),
            is_focused: b == focus,
        })
        .collect()
}

impl RenderedConfirmDialog {
    pub fn build(cfg: ConfirmDialogBuildConfig) -> Self {
        let depth = cfg.depth;
        Self {
            title: cfg.title,
            message: cfg.message,
            progress: cfg
                .progress
                .map(|(step, total)| format!("{step}/{total}"))
                .unwrap_or_default(),
            buttons: cfg.buttons,
            hint: cfg.hint,
            title_fg: cfg
                .title_color
                .map_or(Color::White, |c| c.to_crossterm_color(depth)),
            message_fg: cfg
                .message_color
                .map_or(Color::Grey, |c| c.to_crossterm_color(depth)),
            button_fg: Color::Grey,
            focus_fg: cfg
                .focus_color
                .map_or(Color::White, |c| c.to_crossterm_color(depth)),
            focus_bg: cfg
                .selected_bg
                .map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth)),
            border_fg: cfg
                .border_color
                .map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth)),
            hint_fg: cfg
                .hint_color
                .map_or(Color::Grey, |c| c.to_crossterm_color(depth)),
        }
    }
}

#[derive(Default, Props)]
pub struct ConfirmDialogProps {
    pub dialog: Option<RenderedConfirmDialog>,
    pub width: u16,
    pub height: u16,
}

#[component]
pub fn ConfirmDialog(props: &mut ConfirmDialogProps) -> impl Into<AnyElement<'static>> {
    let Some(dialog) = props.dialog.take() else {
        return element! { View }.into_any();
    };

    let width = u32::from(props.width);
    let height = u32::from(props.height);

    // Centered, ~50% width; height fits title, message, buttons and hint.
    let dialog_width = (width / 2).max(40).min(width.saturating_sub(4));
    let dialog_height = 9u32.min(height.saturating_sub(2));
    let pad_left = (width.saturating_sub(dialog_width)) / 2;
    let pad_top = (height.saturating_sub(dialog_height)) / 2;

    element! {
        View(
            width,
            height,
            position: Position::Absolute,
        ) {
            View(
                margin_left: pad_left,
                margin_top: pad_top,
                width: dialog_width,
                height: dialog_height,
                flex_direction: FlexDirection::Column,
                border_style: BorderStyle::Round,
                border_color: dialog.border_fg,
                background_color: Color::Reset,
                overflow: Overflow::Hidden,
            ) {
                // Title row
                View(
                    border_style: BorderStyle::Single,
                    border_edges: Edges::Bottom,
                    border_color: dialog.border_fg,
                    padding_left: 1,
                    padding_right: 1,
                ) {
                    Text(
                        content: dialog.title,
                        color: dialog.title_fg,
                        weight: Weight::Bold,
                        wrap: TextWrap::NoWrap,
                    )
                    View(flex_grow: 1.0)
                    Text(
                        content: dialog.progress,
                        color: dialog.hint_fg,
                        wrap: TextWrap::NoWrap,
                    )
                }

                // Message
                View(flex_grow: 1.0, padding_left: 1, padding_right: 1) {
                    Text(content: dialog.message, color: dialog.message_fg)
                }

                // Buttons, in display order
                View(justify_content: JustifyContent::Center, padding_bottom: 1) {
                    #(dialog.buttons.into_iter().enumerate().map(|(i, button)| {
                        let (fg, bg, weight) = if button.is_focused {
                            (dialog.focus_fg, dialog.focus_bg, Weight::Bold)
                        } else {
                            (dialog.button_fg, Color::Reset, Weight::Normal)
                        };
                        element! {
                            View(key: i, margin_left: 2, margin_right: 2, background_color: bg) {
                                Text(
                                    content: format!("[ {} ]", button.label),
                                    color: fg,
                                    weight,
                                    wrap: TextWrap::NoWrap,
                                )
                            }
                        }
                    }))
                }

                View(padding_left: 1) {
                    Text(content: dialog.hint, color: dialog.hint_fg, wrap: TextWrap::NoWrap)
                }
            }
        }
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_follow_order_and_focus() {
        let order = ButtonOrder::from_draw(0.9);
        let buttons = gate_buttons(order, GateButton::Confirm);
        let labels: Vec<&str> = buttons.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Cancel", "Confirm"]);
        assert!(!buttons[0].is_focused);
        assert!(buttons[1].is_focused);
    }

    #[test]
    fn progress_is_rendered_one_based() {
        let dialog = RenderedConfirmDialog::build(ConfirmDialogBuildConfig {
            title: "Level 1: Just Checking".to_owned(),
            message: "Sure?".to_owned(),
            progress: Some((1, 3)),
            buttons: gate_buttons(ButtonOrder::default(), GateButton::Confirm),
            hint: String::new(),
            depth: ColorDepth::TrueColor,
            title_color: None,
            message_color: None,
            focus_color: None,
            selected_bg: None,
            border_color: None,
            hint_color: None,
        });
        assert_eq!(dialog.progress, "1/3");
        assert_eq!(dialog.buttons[0].label, "Confirm");
    }
}
