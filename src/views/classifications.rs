use std::collections::HashMap;

use crate::color::ColorDepth;
use crate::components::table::{Cell, Column, RenderedTable, Row, TableBuildConfig};
use crate::settings::SettingsController;
use crate::theme::ResolvedTheme;
use crate::types::AppEntry;

use super::{HeaderLine, SectionContent, empty_message};

const KEY_HINT: &str = "space toggle game  / search  [ ] page";

fn app_columns() -> Vec<Column> {
    vec![
        Column::new("app", "Application", 0.55),
        Column::new("game", "Game", 0.20),
        Column::new("source", "Classified by", 0.25),
    ]
}

fn app_to_row(app: &AppEntry, is_game: bool, theme: &ResolvedTheme) -> Row {
    let mut row = HashMap::new();
    row.insert("app".to_owned(), Cell::colored(&app.name, theme.text_primary));

    let toggle = if is_game {
        Cell::colored("\u{25cf} Game", theme.text_success)
    } else {
        Cell::colored("\u{25cb} Not a game", theme.text_faint)
    };
    row.insert("game".to_owned(), toggle);

    let source = if app.user_marked { "you" } else { "classifier" };
    row.insert(
        "source".to_owned(),
        Cell::colored(source, theme.text_secondary),
    );
    row
}

pub(super) fn build(
    settings: &SettingsController,
    theme: &ResolvedTheme,
    depth: ColorDepth,
    width: u16,
) -> SectionContent {
    let table = settings.apps();
    let rows: Vec<Row> = table
        .page_rows()
        .into_iter()
        .map(|app| app_to_row(app, settings.is_game(&app.name), theme))
        .collect();
    let columns = app_columns();
    let empty = empty_message(settings, "applications");

    let games = table.rows().iter().filter(|a| settings.is_game(&a.name)).count();
    let header = vec![HeaderLine {
        text: format!(
            "{} applications, {games} marked as games",
            table.rows().len()
        ),
        fg: theme.text_secondary.to_crossterm_color(depth),
        bold: false,
    }];

    SectionContent {
        header,
        table: RenderedTable::build(&TableBuildConfig {
            columns: &columns,
            rows: &rows,
            cursor: settings.cursor(),
            total_width: width.saturating_sub(2),
            depth,
            selected_bg: Some(theme.bg_selected),
            header_color: Some(theme.text_secondary),
            border_color: Some(theme.border),
            faint_color: Some(theme.text_faint),
            empty_message: Some(&empty),
        }),
        key_hint: KEY_HINT,
    }
}
