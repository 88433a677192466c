use iocraft::prelude::*;

use crate::color::{Color as AppColor, ColorDepth};

// ---------------------------------------------------------------------------
// Section tabs
// ---------------------------------------------------------------------------

/// One settings section as shown in the tab strip.
#[derive(Debug, Clone)]
pub struct Tab {
    pub title: String,
    /// Number of rows the section holds, once loaded.
    pub count: Option<usize>,
}

pub struct RenderedTabBar {
    pub tabs: Vec<RenderedTab>,
    /// Shown at the right end of the strip (e.g. while a snapshot loads).
    pub activity: Option<String>,
    pub active_fg: Color,
    pub inactive_fg: Color,
    pub border_fg: Color,
}

pub struct RenderedTab {
    /// Digit key that jumps to this section.
    pub shortcut: String,
    pub label: String,
    pub is_active: bool,
}

/// Colours of the tab strip, resolved from the theme.
pub struct TabBarColors {
    pub active: Option<AppColor>,
    pub inactive: Option<AppColor>,
    pub border: Option<AppColor>,
}

impl RenderedTabBar {
    pub fn build(
        tabs: &[Tab],
        active: usize,
        activity: Option<&str>,
        depth: ColorDepth,
        colors: &TabBarColors,
    ) -> Self {
        let resolve = |c: Option<AppColor>, fallback: Color| {
            c.map_or(fallback, |c| c.to_crossterm_color(depth))
        };

        Self {
            tabs: tabs
                .iter()
                .enumerate()
                .map(|(i, tab)| RenderedTab {
                    shortcut: format!("{}", i + 1),
                    label: tab_label(tab),
                    is_active: i == active,
                })
                .collect(),
            activity: activity.map(str::to_owned),
            active_fg: resolve(colors.active, Color::Cyan),
            inactive_fg: resolve(colors.inactive, Color::DarkGrey),
            border_fg: resolve(colors.border, Color::DarkGrey),
        }
    }
}

fn tab_label(tab: &Tab) -> String {
    match tab.count {
        Some(count) => format!("{} ({count})", tab.title),
        None => tab.title.clone(),
    }
}

#[derive(Default, Props)]
pub struct TabBarProps {
    pub tab_bar: Option<RenderedTabBar>,
}

#[component]
pub fn TabBar(props: &mut TabBarProps) -> impl Into<AnyElement<'static>> {
    let Some(bar) = props.tab_bar.take() else {
        return element! { View }.into_any();
    };

    let active_fg = bar.active_fg;
    let inactive_fg = bar.inactive_fg;
    let activity = bar.activity.unwrap_or_default();

    element! {
        View(
            border_style: BorderStyle::Single,
            border_edges: Edges::Bottom,
            border_color: bar.border_fg,
            padding_left: 1,
            padding_right: 1,
            justify_content: JustifyContent::SpaceBetween,
        ) {
            View {
                #(bar.tabs.into_iter().enumerate().map(|(i, tab)| {
                    let label_fg = if tab.is_active { Color::White } else { inactive_fg };
                    let bg = if tab.is_active { active_fg } else { Color::Reset };
                    element! {
                        View(key: i, margin_right: 1, background_color: bg) {
                            Text(content: format!(" {} ", tab.shortcut), color: inactive_fg)
                            Text(
                                content: format!("{} ", tab.label),
                                color: label_fg,
                                weight: if tab.is_active { Weight::Bold } else { Weight::Normal },
                                wrap: TextWrap::NoWrap,
                            )
                        }
                    }
                }))
            }
            Text(content: activity, color: inactive_fg, wrap: TextWrap::NoWrap)
        }
    }
    .into_any()
}
