use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Cell, Clear, Paragraph, Row as UiRow, Table},
};

use crate::app::{App, Modus};
use crate::model::{HeaderView, PaginationStrip, TableView};

pub const COLUMN_WIDTH_MARGIN: usize = 2;
pub const MAX_COLUMN_WIDTH: usize = 40;
const ASCENDING_GLYPH: &str = "▲";
const DESCENDING_GLYPH: &str = "▼";
const UNSORTED_GLYPH: &str = "↕";
// Page links shown on each side of the active one.
const LINK_RADIUS: usize = 4;

pub struct TableUI;

impl TableUI {
    pub fn draw(app: &App, frame: &mut Frame) {
        let [title_area, table_area, strip_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        match app.current_table() {
            Some(table) => {
                let view = table.render();
                frame.render_widget(Self::title(app, &view), title_area);
                Self::draw_table(frame, table_area, &view, app.selected_column());
                if let Some(strip) = view.pagination.as_ref().filter(|s| s.visible) {
                    frame.render_widget(Self::strip(strip), strip_area);
                }
            }
            None => {
                frame.render_widget(Paragraph::new("No table to show").centered(), table_area);
            }
        }
        frame.render_widget(Self::status_line(app), status_area);

        if app.modus() == Modus::Help {
            Self::draw_help(frame, app.help_text());
        }
    }

    fn title(app: &App, view: &TableView) -> Line<'static> {
        let mut spans = vec![Span::from(format!(" {} ", view.name)).bold()];
        if app.table_count() > 1 {
            spans.push(
                format!("[{}/{}] ", app.current_table_index() + 1, app.table_count()).dark_gray(),
            );
        }
        let rows = if view.rows.is_empty() {
            format!("0 of {} rows", view.total_rows)
        } else {
            format!(
                "rows {}-{} of {}",
                view.first_row + 1,
                view.first_row + view.rows.len(),
                view.total_rows
            )
        };
        spans.push(rows.into());
        if let Some(toggle) = view.toggle {
            let (label, color) = if toggle.disabled {
                ("  pagination off", Color::DarkGray)
            } else {
                ("  pagination on", Color::Blue)
            };
            spans.push(Span::styled(label, Style::default().fg(color)));
        }
        Line::from(spans)
    }

    fn draw_table(frame: &mut Frame, area: Rect, view: &TableView, selected_column: usize) {
        // Rows past the bottom border are never drawn.
        let shown = &view.rows[..view.rows.len().min(area.height as usize)];
        let widths: Vec<Constraint> = view
            .headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let widest = shown
                    .iter()
                    .map(|r| r.cell(idx).chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(header.label.chars().count() + 2);
                Constraint::Length((widest + COLUMN_WIDTH_MARGIN).min(MAX_COLUMN_WIDTH) as u16)
            })
            .collect();

        let header = UiRow::new(
            view.headers
                .iter()
                .enumerate()
                .map(|(idx, h)| Self::header_cell(h, idx == selected_column)),
        )
        .height(1);

        let rows = shown.iter().map(|row| {
            UiRow::new(
                (0..view.headers.len()).map(|idx| Cell::from(row.cell(idx).to_string())),
            )
        });

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::bordered().border_set(border::PLAIN));
        frame.render_widget(table, area);
    }

    fn header_cell(header: &HeaderView, selected: bool) -> Cell<'static> {
        let glyph = if header.ascending_marker {
            ASCENDING_GLYPH
        } else if header.descending_marker {
            DESCENDING_GLYPH
        } else if header.sortable {
            UNSORTED_GLYPH
        } else {
            " "
        };
        let mut style = Style::default().add_modifier(Modifier::BOLD);
        if header.class.is_some() {
            style = style.fg(Color::Yellow);
        }
        if selected {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Cell::from(format!("{} {}", header.label, glyph)).style(style)
    }

    fn strip(strip: &PaginationStrip) -> Line<'static> {
        let active = strip
            .links
            .iter()
            .position(|l| l.active)
            .unwrap_or(0);
        let first = active.saturating_sub(LINK_RADIUS);
        let last = (active + LINK_RADIUS + 1).min(strip.links.len());

        let mut spans = vec![Span::from(" Pages: ")];
        if first > 0 {
            spans.push("… ".dark_gray());
        }
        for link in &strip.links[first..last] {
            let label = format!(" {} ", link.label());
            if link.active {
                spans.push(label.black().on_blue().bold());
            } else {
                spans.push(label.into());
            }
        }
        if last < strip.links.len() {
            spans.push(format!(" … {}", strip.links.len()).dark_gray());
        }
        Line::from(spans)
    }

    fn status_line(app: &App) -> Line<'static> {
        if app.modus() == Modus::PageInput {
            return Line::from(vec![
                "Go to page: ".bold(),
                Span::from(app.page_input().input.clone()),
                "█".slow_blink(),
            ]);
        }
        Line::from(vec![
            Span::from(format!(" {} ", app.visible_status_message(Instant::now()))),
            "  <?> help  <q> quit".dark_gray(),
        ])
    }

    fn draw_help(frame: &mut Frame, text: &str) {
        let height = text.lines().count() as u16 + 2;
        let width = text.lines().map(|l| l.chars().count()).max().unwrap_or(0) as u16 + 4;
        let area = frame.area();
        let popup = Rect {
            x: area.width.saturating_sub(width) / 2,
            y: area.height.saturating_sub(height) / 2,
            width: width.min(area.width),
            height: height.min(area.height),
        };
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(text.to_string()).block(
                Block::bordered()
                    .title(Line::from(" Help ".bold()).centered())
                    .border_set(border::THICK),
            ),
            popup,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageLink;
    use pretty_assertions::assert_eq;

    fn strip_with(pages: usize, active: usize) -> PaginationStrip {
        PaginationStrip {
            visible: true,
            links: (1..=pages)
                .map(|page| PageLink {
                    page,
                    active: page == active,
                })
                .collect(),
        }
    }

    fn contents(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn strip_shows_window_around_active_page() {
        let line = TableUI::strip(&strip_with(20, 10));
        let mut expected = vec![" Pages: ".to_string(), "… ".to_string()];
        expected.extend((6..=14).map(|p| format!(" {p} ")));
        expected.push(" … 20".to_string());
        assert_eq!(contents(&line), expected);
        let active = Style::default()
            .fg(Color::Black)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD);
        assert_eq!(line.spans[6].style, active);
    }

    #[test]
    fn short_strip_has_no_ellipsis() {
        let line = TableUI::strip(&strip_with(3, 1));
        assert_eq!(contents(&line), vec![" Pages: ", " 1 ", " 2 ", " 3 "]);
    }
}
