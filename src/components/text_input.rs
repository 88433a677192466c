use iocraft::prelude::*;

use crate::color::{Color as AppColor, ColorDepth};

// ---------------------------------------------------------------------------
// Pre-rendered text input
// ---------------------------------------------------------------------------

pub struct RenderedTextInput {
    pub prompt: String,
    pub text: String,
    pub text_fg: Color,
    pub prompt_fg: Color,
    pub border_fg: Color,
    /// Line shown under the input (live hint or validation message).
    pub hint: Option<RenderedHint>,
}

pub struct RenderedHint {
    pub text: String,
    pub fg: Color,
}

impl RenderedTextInput {
    pub fn build(
        prompt: &str,
        text: &str,
        depth: ColorDepth,
        text_color: Option<AppColor>,
        prompt_color: Option<AppColor>,
        border_color: Option<AppColor>,
    ) -> Self {
        let text_fg = text_color.map_or(Color::White, |c| c.to_crossterm_color(depth));
        let prompt_fg = prompt_color.map_or(Color::Cyan, |c| c.to_crossterm_color(depth));
        let border_fg = border_color.map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth));

        Self {
            prompt: prompt.to_owned(),
            text: format!("{text}\u{2588}"), // append full block cursor
            text_fg,
            prompt_fg,
            border_fg,
            hint: None,
        }
    }

    pub fn with_hint(mut self, text: &str, color: AppColor, depth: ColorDepth) -> Self {
        self.hint = Some(RenderedHint {
            text: text.to_owned(),
            fg: color.to_crossterm_color(depth),
        });
        self
    }
}

// ---------------------------------------------------------------------------
// TextInput component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct TextInputProps {
    pub input: Option<RenderedTextInput>,
}

#[component]
pub fn TextInput(props: &mut TextInputProps) -> impl Into<AnyElement<'static>> {
    let Some(input) = props.input.take() else {
        return element! { View }.into_any();
    };

    element! {
        View(
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Single,
            border_edges: Edges::Top,
            border_color: input.border_fg,
            padding_left: 1,
            padding_right: 1,
        ) {
            View(flex_direction: FlexDirection::Row) {
                Text(content: input.prompt, color: input.prompt_fg, wrap: TextWrap::NoWrap)
                Text(content: " ", color: input.text_fg)
                Text(content: input.text, color: input.text_fg, wrap: TextWrap::NoWrap)
            }
            #(input.hint.map(|hint| element! {
                Text(content: hint.text, color: hint.fg, wrap: TextWrap::NoWrap)
            }))
        }
    }
    .into_any()
}
