pub mod classifications;
pub mod time_limits;

use iocraft::prelude::Color;

use crate::color::ColorDepth;
use crate::components::table::RenderedTable;
use crate::navigation::SectionId;
use crate::settings::SettingsController;
use crate::theme::ResolvedTheme;

/// A line of text shown above a section's table.
pub struct HeaderLine {
    pub text: String,
    pub fg: Color,
    pub bold: bool,
}

/// Everything the active section renders, pre-built and owned.
pub struct SectionContent {
    pub header: Vec<HeaderLine>,
    pub table: RenderedTable,
    pub key_hint: &'static str,
}

/// Build the content of the active section.
pub fn build_section(
    settings: &SettingsController,
    theme: &ResolvedTheme,
    depth: ColorDepth,
    width: u16,
) -> SectionContent {
    match settings.active_section() {
        SectionId::Classifications => classifications::build(settings, theme, depth, width),
        SectionId::TimeLimits => time_limits::build(settings, theme, depth, width),
    }
}

/// Fallback theme when none is provided via props.
pub(crate) fn default_theme() -> ResolvedTheme {
    use crate::config::types::Theme;
    use crate::theme::Background;
    ResolvedTheme::resolve(&Theme::default(), Background::Dark)
}

/// Message for an empty table page.
fn empty_message(settings: &SettingsController, what: &str) -> String {
    if settings.is_loading() {
        "Loading\u{2026}".to_owned()
    } else if settings.search_query().is_empty() {
        format!("No {what} yet")
    } else {
        format!("No {what} match \"{}\"", settings.search_query())
    }
}
