use iocraft::prelude::*;

use crate::color::{Color as AppColor, ColorDepth};
use crate::util::truncate_to_width;

/// Long settings URLs are cut to this many columns.
const MAX_LOCATION_WIDTH: usize = 48;

// ---------------------------------------------------------------------------
// Footer component: status bar
// ---------------------------------------------------------------------------

pub struct RenderedFooter {
    pub page_text: String,
    pub status_text: String,
    pub status_fg: Color,
    pub location_text: String,
    pub synced_text: String,
    pub help_hint: String,
    pub text_fg: Color,
    pub border_fg: Color,
}

/// Configuration for building the footer.
pub struct FooterBuildConfig {
    pub page_text: String,
    /// Status line and whether it reports an error.
    pub status: Option<(String, bool)>,
    pub location_text: String,
    pub synced_text: String,
    pub help_hint: String,
    pub depth: ColorDepth,
    pub text_color: Option<AppColor>,
    pub error_color: Option<AppColor>,
    pub border_color: Option<AppColor>,
}

impl RenderedFooter {
    pub fn build(cfg: FooterBuildConfig) -> Self {
        let depth = cfg.depth;
        let text_fg = cfg
            .text_color
            .map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth));
        let error_fg = cfg
            .error_color
            .map_or(Color::Red, |c| c.to_crossterm_color(depth));
        let border_fg = cfg
            .border_color
            .map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth));
        let (status_text, status_fg) = match cfg.status {
            Some((text, true)) => (text, error_fg),
            Some((text, false)) => (text, text_fg),
            None => (String::new(), text_fg),
        };

        Self {
            page_text: cfg.page_text,
            status_text,
            status_fg,
            location_text: truncate_to_width(&cfg.location_text, MAX_LOCATION_WIDTH),
            synced_text: cfg.synced_text,
            help_hint: cfg.help_hint,
            text_fg,
            border_fg,
        }
    }
}

#[derive(Default, Props)]
pub struct FooterProps {
    pub footer: Option<RenderedFooter>,
}

#[component]
pub fn Footer(props: &mut FooterProps) -> impl Into<AnyElement<'static>> {
    let Some(f) = props.footer.take() else {
        return element! { View }.into_any();
    };

    let separator = "  \u{2022}  ";
    let mut context_contents = Vec::new();
    if !f.status_text.is_empty() {
        context_contents.push(MixedTextContent::new(&f.status_text).color(f.status_fg));
    }
    for part in [&f.location_text, &f.synced_text] {
        if part.is_empty() {
            continue;
        }
        if !context_contents.is_empty() {
            context_contents.push(MixedTextContent::new(separator).color(f.text_fg));
        }
        context_contents.push(MixedTextContent::new(part).color(f.text_fg));
    }

    element! {
        View(
            border_style: BorderStyle::Single,
            border_edges: Edges::Top,
            border_color: f.border_fg,
            padding_left: 1,
            padding_right: 1,
        ) {
            // Left: page indicator
            Text(content: f.page_text.clone(), color: f.text_fg, wrap: TextWrap::NoWrap)
            Text(content: " \u{2502} ", color: f.text_fg, wrap: TextWrap::NoWrap)
            // Middle: status, location, sync time
            View(flex_grow: 1.0) {
                MixedText(contents: context_contents, wrap: TextWrap::NoWrap)
            }
            Text(content: " \u{2502} ", color: f.text_fg, wrap: TextWrap::NoWrap)
            // Right: key hint
            Text(content: f.help_hint.clone(), color: f.text_fg, wrap: TextWrap::NoWrap)
        }
    }
    .into_any()
}
