use std::collections::HashMap;

use iocraft::prelude::*;

use crate::color::{Color as AppColor, ColorDepth};

// ---------------------------------------------------------------------------
// Column definition
// ---------------------------------------------------------------------------

/// Defines a column in the table.
#[derive(Debug, Clone)]
pub struct Column {
    /// Unique identifier (e.g., "app", "game", "limit").
    pub id: String,
    /// Display header text.
    pub header: String,
    /// Default width as a fraction of total width (0.0..1.0).
    pub default_width_pct: f32,
    /// Text alignment for this column.
    pub align: TextAlign,
}

impl Column {
    pub fn new(id: &str, header: &str, default_width_pct: f32) -> Self {
        Self {
            id: id.to_owned(),
            header: header.to_owned(),
            default_width_pct,
            align: TextAlign::Left,
        }
    }

    pub fn right_aligned(mut self) -> Self {
        self.align = TextAlign::Right;
        self
    }
}

/// A single cell value to display.
#[derive(Debug, Clone)]
pub struct Cell {
    pub text: String,
    pub color: Option<AppColor>,
    pub bold: bool,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            bold: false,
        }
    }

    pub fn colored(text: impl Into<String>, color: AppColor) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            bold: true,
        }
    }
}

/// A complete row of cells indexed by column id.
pub type Row = HashMap<String, Cell>;

// ---------------------------------------------------------------------------
// Pre-rendered table data (all owned)
// ---------------------------------------------------------------------------

/// Pre-render table data into fully owned structures that can be passed
/// into the `element!` macro without lifetime issues.
pub struct RenderedTable {
    pub header_cells: Vec<HeaderCell>,
    pub body_rows: Vec<RenderedRow>,
    pub total_width: u32,
    pub header_fg: Color,
    pub border_fg: Color,
    pub faint_fg: Color,
    /// Message to display when there are no rows.
    pub empty_message: Option<String>,
}

pub struct HeaderCell {
    pub text: String,
    pub width: u32,
    pub align: TextAlign,
}

pub struct RenderedRow {
    pub key: usize,
    pub bg: Option<Color>,
    pub cells: Vec<RenderedCell>,
}

pub struct RenderedCell {
    pub text: String,
    pub fg: Color,
    pub weight: Weight,
    pub width: u32,
    pub align: TextAlign,
}

/// Configuration for building a `RenderedTable`.
///
/// `rows` holds only the rows of the visible page; `cursor` indexes into it.
pub struct TableBuildConfig<'a> {
    pub columns: &'a [Column],
    pub rows: &'a [Row],
    pub cursor: usize,
    pub total_width: u16,
    pub depth: ColorDepth,
    pub selected_bg: Option<AppColor>,
    pub header_color: Option<AppColor>,
    pub border_color: Option<AppColor>,
    pub faint_color: Option<AppColor>,
    /// Message to show when rows are empty.
    pub empty_message: Option<&'a str>,
}

impl RenderedTable {
    pub fn build(cfg: &TableBuildConfig<'_>) -> Self {
        let depth = cfg.depth;
        let col_widths = compute_column_widths(cfg.columns, cfg.total_width);

        let header_fg = cfg
            .header_color
            .map_or(Color::White, |c| c.to_crossterm_color(depth));
        let border_fg = cfg
            .border_color
            .map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth));
        let faint_fg = cfg
            .faint_color
            .map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth));
        let selected_bg_color = cfg.selected_bg.map(|c| c.to_crossterm_color(depth));

        let header_cells = cfg
            .columns
            .iter()
            .zip(col_widths.iter())
            .map(|(col, &w)| HeaderCell {
                text: col.header.clone(),
                width: u32::from(w),
                align: col.align,
            })
            .collect();

        let body_rows = cfg
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let bg = if i == cfg.cursor {
                    selected_bg_color
                } else {
                    None
                };
                let cells = cfg
                    .columns
                    .iter()
                    .zip(col_widths.iter())
                    .map(|(col, &w)| {
                        let cell = row.get(&col.id);
                        RenderedCell {
                            text: cell.map_or_else(String::new, |c| c.text.clone()),
                            fg: cell
                                .and_then(|c| c.color)
                                .map_or(Color::Reset, |c| c.to_crossterm_color(depth)),
                            weight: if cell.is_some_and(|c| c.bold) {
                                Weight::Bold
                            } else {
                                Weight::Normal
                            },
                            width: u32::from(w),
                            align: col.align,
                        }
                    })
                    .collect();
                RenderedRow { key: i, bg, cells }
            })
            .collect();

        let empty_message = if cfg.rows.is_empty() {
            cfg.empty_message.map(String::from)
        } else {
            None
        };

        Self {
            header_cells,
            body_rows,
            total_width: u32::from(cfg.total_width),
            header_fg,
            border_fg,
            faint_fg,
            empty_message,
        }
    }
}

// ---------------------------------------------------------------------------
// PagedTable component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct PagedTableProps {
    /// Pre-rendered table data.
    pub table: Option<RenderedTable>,
}

#[component]
pub fn PagedTable(props: &mut PagedTableProps) -> impl Into<AnyElement<'static>> {
    let Some(table) = props.table.take() else {
        return element! { View }.into_any();
    };

    element! {
        View(flex_direction: FlexDirection::Column, width: table.total_width) {
            // Header row
            View(
                border_style: BorderStyle::Single,
                border_edges: Edges::Bottom,
                border_color: table.border_fg,
            ) {
                #(table.header_cells.into_iter().enumerate().map(|(i, hc)| {
                    element! {
                        View(key: i, width: hc.width) {
                            Text(
                                content: hc.text,
                                weight: Weight::Bold,
                                color: table.header_fg,
                                wrap: TextWrap::NoWrap,
                                align: hc.align,
                            )
                        }
                    }
                }))
            }

            // Empty-state message or body rows
            #(table.empty_message.into_iter().map(|msg| {
                element! {
                    View(padding_top: 1, padding_left: 2) {
                        Text(content: msg, color: table.faint_fg)
                    }
                }
            }))
            #(table.body_rows.into_iter().map(|row| {
                element! {
                    View(key: row.key, background_color: row.bg) {
                        #(row.cells.into_iter().enumerate().map(|(ci, cell)| {
                            element! {
                                View(key: ci, width: cell.width) {
                                    Text(
                                        content: cell.text,
                                        color: cell.fg,
                                        weight: cell.weight,
                                        wrap: TextWrap::NoWrap,
                                        align: cell.align,
                                    )
                                }
                            }
                        }))
                    }
                }
            }))
        }
    }
    .into_any()
}

// ---------------------------------------------------------------------------
// Column width computation
// ---------------------------------------------------------------------------

fn compute_column_widths(columns: &[Column], total: u16) -> Vec<u16> {
    let pct_sum: f32 = columns.iter().map(|c| c.default_width_pct).sum();
    columns
        .iter()
        .map(|col| {
            let ratio = if pct_sum > 0.0 {
                col.default_width_pct / pct_sum
            } else {
                #[allow(clippy::cast_precision_loss)]
                {
                    1.0 / columns.len() as f32
                }
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let w = (f32::from(total) * ratio).round() as u16;
            w.max(1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_columns() -> Vec<Column> {
        vec![
            Column::new("app", "Application", 0.6),
            Column::new("game", "Game", 0.2),
            Column::new("source", "Source", 0.2).right_aligned(),
        ]
    }

    fn make_row(name: &str) -> Row {
        [
            ("app".to_owned(), Cell::plain(name)),
            ("game".to_owned(), Cell::bold("yes")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn column_widths_fill_total() {
        let widths = compute_column_widths(&make_columns(), 100);
        assert_eq!(widths, vec![60, 20, 20]);
    }

    #[test]
    fn column_widths_without_percentages_split_evenly() {
        let cols = vec![Column::new("a", "A", 0.0), Column::new("b", "B", 0.0)];
        assert_eq!(compute_column_widths(&cols, 40), vec![20, 20]);
    }

    #[test]
    fn cursor_row_gets_selected_background() {
        let cols = make_columns();
        let rows = vec![make_row("steam.exe"), make_row("notepad.exe")];
        let table = RenderedTable::build(&TableBuildConfig {
            columns: &cols,
            rows: &rows,
            cursor: 1,
            total_width: 80,
            depth: ColorDepth::Color256,
            selected_bg: Some(AppColor::Ansi256(237)),
            header_color: None,
            border_color: None,
            faint_color: None,
            empty_message: Some("nothing"),
        });
        assert_eq!(table.body_rows.len(), 2);
        assert!(table.body_rows[0].bg.is_none());
        assert_eq!(table.body_rows[1].bg, Some(Color::AnsiValue(237)));
        assert_eq!(table.body_rows[1].cells[0].text, "notepad.exe");
        assert!(matches!(table.body_rows[1].cells[1].weight, Weight::Bold));
        // Missing cells render empty.
        assert_eq!(table.body_rows[1].cells[2].text, "");
        assert!(table.empty_message.is_none());
    }

    #[test]
    fn empty_rows_show_message() {
        let cols = make_columns();
        let table = RenderedTable::build(&TableBuildConfig {
            columns: &cols,
            rows: &[],
            cursor: 0,
            total_width: 80,
            depth: ColorDepth::TrueColor,
            selected_bg: None,
            header_color: None,
            border_color: None,
            faint_color: None,
            empty_message: Some("No applications match"),
        });
        assert_eq!(table.empty_message.as_deref(), Some("No applications match"));
        assert_eq!(table.header_cells.len(), 3);
    }
}
