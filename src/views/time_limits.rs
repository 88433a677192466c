use std::collections::HashMap;

use crate::color::ColorDepth;
use crate::components::table::{Cell, Column, RenderedTable, Row, TableBuildConfig};
use crate::settings::{Notice, SettingsController};
use crate::theme::ResolvedTheme;
use crate::types::TimeLimitEntry;
use crate::util::format_minutes;

use super::{HeaderLine, SectionContent, empty_message};

const KEY_HINT: &str = "e edit limit  g global limit  r refresh  / search  [ ] page";

fn limit_columns() -> Vec<Column> {
    vec![
        Column::new("app", "Application", 0.30),
        Column::new("limit", "Daily limit", 0.15).right_aligned(),
        Column::new("notify", "Notify at", 0.15).right_aligned(),
        Column::new("message", "", 0.40),
    ]
}

fn notice_cell(notice: &Notice, theme: &ResolvedTheme) -> Cell {
    let color = if notice.is_error {
        theme.text_error
    } else {
        theme.text_success
    };
    Cell::colored(format!("  {}", notice.text), color)
}

fn limit_to_row(
    entry: &TimeLimitEntry,
    current: u32,
    notice: Option<&Notice>,
    theme: &ResolvedTheme,
) -> Row {
    let mut row = HashMap::new();
    row.insert(
        "app".to_owned(),
        Cell::colored(&entry.exe_name, theme.text_primary),
    );
    row.insert("limit".to_owned(), Cell::bold(format_minutes(current)));
    let notify = entry
        .notify_limit
        .map_or_else(|| "\u{2014}".to_owned(), format_minutes);
    row.insert("notify".to_owned(), Cell::colored(notify, theme.text_faint));
    if let Some(notice) = notice {
        row.insert("message".to_owned(), notice_cell(notice, theme));
    }
    row
}

pub(super) fn build(
    settings: &SettingsController,
    theme: &ResolvedTheme,
    depth: ColorDepth,
    width: u16,
) -> SectionContent {
    let table = settings.limits();
    let rows: Vec<Row> = table
        .page_rows()
        .into_iter()
        .map(|entry| {
            let current = settings
                .current_limit(&entry.exe_name)
                .unwrap_or(entry.max_time);
            limit_to_row(entry, current, settings.limit_message(&entry.exe_name), theme)
        })
        .collect();
    let columns = limit_columns();
    let empty = empty_message(settings, "time limits");

    let mut header = vec![HeaderLine {
        text: format!(
            "Global daily limit: {}",
            format_minutes(settings.global_limit())
        ),
        fg: theme.text_primary.to_crossterm_color(depth),
        bold: true,
    }];
    if let Some(notice) = settings.global_message() {
        let color = if notice.is_error {
            theme.text_error
        } else {
            theme.text_warning
        };
        header.push(HeaderLine {
            text: notice.text.clone(),
            fg: color.to_crossterm_color(depth),
            bold: false,
        });
    }

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
