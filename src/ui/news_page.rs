//! News page rendering
//!
//! Renders the single newsdesk screen: a dated header, the audio summary
//! panel and the headline grid. Rendering reads `App` only; drawing the same
//! state twice produces the same buffer.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, GRID_COLUMNS};
use crate::data::{NewsLink, NewsSnapshot};

/// Rows occupied by one headline cell (title, link, spacer)
const CELL_HEIGHT: u16 = 3;

/// Header date in long US style, e.g. "January 1, 2024"
pub fn format_page_date(date: chrono::NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Renders the whole screen for the current state
pub fn render(frame: &mut Frame, app: &App) {
    if app.news.is_loading() {
        render_loading(frame);
        return;
    }

    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Audio summary
            Constraint::Min(3),    // Headlines
            Constraint::Length(1), // Help text
        ])
        .split(area);

    let snapshot = app.snapshot();
    render_header(frame, app, chunks[0]);
    render_audio(frame, snapshot, chunks[1]);
    render_headlines(frame, snapshot, app.selected_index, chunks[2]);
    render_help(frame, chunks[3]);
}

/// Renders a loading message while the news is being fetched
fn render_loading(frame: &mut Frame) {
    let area = frame.area();

    // Center the loading message vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new("Loading news...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let separator = "━".repeat(area.width as usize);
    let lines = vec![
        Line::from(Span::styled(
            "Latest News",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format_page_date(app.today),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(separator, Style::default().fg(Color::White))),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_audio(frame: &mut Frame, snapshot: Option<&NewsSnapshot>, area: Rect) {
    let block = Block::default()
        .title(" Latest Audio Summary ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let source = snapshot
        .map(|s| s.audio_url.as_str())
        .filter(|url| !url.is_empty());

    let lines = match source {
        Some(url) => vec![
            Line::from(vec![
                Span::styled("\u{266A} ", Style::default().fg(Color::Cyan)),
                Span::styled(url.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(Span::styled(
                "Press a to play",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        None => vec![Line::from(Span::styled(
            "\u{266A} --",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_headlines(
    frame: &mut Frame,
    snapshot: Option<&NewsSnapshot>,
    selected_index: usize,
    area: Rect,
) {
    let block = Block::default()
        .title(" Latest Headlines ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let headlines = snapshot.map(|s| s.news_links.as_slice()).unwrap_or(&[]);
    if headlines.is_empty() {
        let empty = Paragraph::new("No headlines available")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let visible_rows = ((inner.height / CELL_HEIGHT) as usize).max(1);
    let selected_row = selected_index / GRID_COLUMNS;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CELL_HEIGHT); visible_rows])
        .split(inner);

    let rows = headlines.chunks(GRID_COLUMNS).enumerate().skip(first_row);
    for ((row, cells), row_area) in rows.zip(row_areas.iter()) {
        let column_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, GRID_COLUMNS as u32);
                GRID_COLUMNS
            ])
            .split(*row_area);

        for (column, (headline, cell_area)) in cells.iter().zip(column_areas.iter()).enumerate() {
            let index = row * GRID_COLUMNS + column;
            render_cell(frame, headline, index == selected_index, *cell_area);
        }
    }
}

fn render_cell(frame: &mut Frame, headline: &NewsLink, selected: bool, area: Rect) {
    let (cursor, title_style) = if selected {
        (
            "\u{25B8} ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "  ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
            Span::styled(headline.title.clone(), title_style),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(headline.link.clone(), Style::default().fg(Color::DarkGray)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new("←↓↑→/hjkl: Move  Enter: Open  a: Audio  ?: Help  q: Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadState;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn scenario_snapshot() -> NewsSnapshot {
        NewsSnapshot {
            audio_url: "a.mp3".to_string(),
            created_at: "2024-01-01".to_string(),
            date: "Jan 1".to_string(),
            filename: "f".to_string(),
            news_links: vec![NewsLink {
                date: "Jan 1".to_string(),
                link: "https://x".to_string(),
                title: "X marks the spot".to_string(),
            }],
        }
    }

    fn test_app(state: LoadState) -> App {
        let mut app = App::with_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        app.apply_load(state);
        app
    }

    fn draw(app: &App, width: u16, height: u16) -> Buffer {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_format_page_date() {
        assert_eq!(
            format_page_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            "January 1, 2024"
        );
        assert_eq!(
            format_page_date(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()),
            "October 16, 2026"
        );
    }

    #[test]
    fn test_loading_screen() {
        let app = App::with_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let content = buffer_text(&draw(&app, 80, 24));

        assert!(content.contains("Loading news..."));
        assert!(!content.contains("Latest Headlines"));
    }

    #[test]
    fn test_ready_screen_shows_audio_and_headline() {
        let app = test_app(LoadState::Ready(scenario_snapshot()));

        let content = buffer_text(&draw(&app, 80, 24));

        assert!(content.contains("Latest News"));
        assert!(content.contains("January 1, 2024"));
        assert!(content.contains("Latest Audio Summary"));
        assert!(content.contains("a.mp3"));
        assert!(content.contains("Latest Headlines"));
        assert!(content.contains("X marks the spot"));
        assert!(content.contains("https://x"));
        assert!(content.contains("\u{25B8}"), "Selected headline has a cursor");
    }

    #[test]
    fn test_failed_screen_renders_empty_controls() {
        let app = test_app(LoadState::Failed("Backend returned HTTP 500".to_string()));

        let content = buffer_text(&draw(&app, 80, 24));

        assert!(content.contains("Latest Audio Summary"));
        assert!(content.contains("No headlines available"));
        assert!(!content.contains("500"), "Failure reason is not shown to the user");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let app = test_app(LoadState::Ready(scenario_snapshot()));

        let first = draw(&app, 80, 24);
        let second = draw(&app, 80, 24);

        assert_eq!(first, second);
    }

    #[test]
    fn test_grid_places_headlines_in_two_columns() {
        let mut snapshot = scenario_snapshot();
        snapshot.news_links = vec![
            NewsLink {
                date: "d".to_string(),
                link: "https://left".to_string(),
                title: "Left".to_string(),
            },
            NewsLink {
                date: "d".to_string(),
                link: "https://right".to_string(),
                title: "Right".to_string(),
            },
        ];
        let app = test_app(LoadState::Ready(snapshot));

        let buffer = draw(&app, 80, 24);
        let rows: Vec<String> = buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect();

        let row = rows
            .iter()
            .find(|line| line.contains("Left"))
            .expect("Left headline should be rendered");
        assert!(row.contains("Right"), "Both headlines share a row");
        assert!(row.find("Left") < row.find("Right"));
    }

    #[test]
    fn test_selection_scrolls_into_view() {
        let mut snapshot = scenario_snapshot();
        snapshot.news_links = (0..20)
            .map(|i| NewsLink {
                date: "d".to_string(),
                link: format!("https://n/{}", i),
                title: format!("Story{:02}", i),
            })
            .collect();
        let mut app = test_app(LoadState::Ready(snapshot));
        app.selected_index = 19;

        let content = buffer_text(&draw(&app, 80, 24));

        assert!(content.contains("Story19"));
        assert!(!content.contains("Story00"));
    }
}
