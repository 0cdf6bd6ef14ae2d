//! Frame rendering for the terminal surface. Pure functions of their inputs.

use super::theme::Theme;
use crate::ui::{DialogChoice, MenuItem};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Scrollback state of the reply viewer.
#[derive(Debug, Default)]
pub struct ViewerState {
    pub text: String,
    /// Lines scrolled up from the bottom; 0 follows new output.
    pub scroll_back: u16,
}

fn block<'a>(theme: &Theme, title: &'a str) -> Block<'a> {
    titled_block(theme, title, theme.accent)
}

fn titled_block<'a>(theme: &Theme, title: &'a str, title_color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(title_color).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.bg).fg(theme.fg))
}

fn hint<'a>(theme: &Theme, text: &'a str) -> Paragraph<'a> {
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.inactive).bg(theme.bg))
}

/// Split `area` into a body and a one-line hint bar.
fn with_hint_bar(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn menu(frame: &mut Frame, theme: &Theme, header: &str, items: &[MenuItem], selected: usize) {
    let area = centered_rect(50, 50, frame.area());
    frame.render_widget(Clear, area);
    let (body, bar) = with_hint_bar(area);

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| ListItem::new(format!("{}) {}", item.value, item.label)))
        .collect();
    let list = List::new(list_items)
        .block(block(theme, header))
        .highlight_style(
            Style::default()
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, body, &mut state);
    frame.render_widget(hint(theme, "Enter: select  Esc: back"), bar);
}

pub fn prompt(frame: &mut Frame, theme: &Theme, header: &str, input: &str, max_len: usize) {
    let area = centered_rect(60, 20, frame.area());
    frame.render_widget(Clear, area);
    let (body, bar) = with_hint_bar(area);

    let count = input.chars().count();
    let line = Line::from(vec![
        Span::raw(input),
        Span::styled("_", Style::default().fg(theme.accent)),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(block(theme, header)),
        body,
    );
    let status = format!("Enter: confirm  Esc: cancel  {count}/{max_len}");
    frame.render_widget(
        Paragraph::new(status)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.inactive).bg(theme.bg)),
        bar,
    );
}

pub fn dialog(frame: &mut Frame, theme: &Theme, header: &str, text: &str, choice: DialogChoice) {
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);

    let button = |label: &'static str, focused: bool| {
        let style = if focused {
            Style::default()
                .fg(theme.bg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.inactive)
        };
        Span::styled(label, style)
    };

    let title_color = if header == "Error" {
        theme.error_color
    } else {
        theme.accent
    };
    let lines = vec![
        Line::from(text.to_string()),
        Line::from(""),
        Line::from(vec![
            button("[  OK  ]", choice == DialogChoice::Ok),
            Span::raw("   "),
            button("[Cancel]", choice == DialogChoice::Cancel),
        ])
        .alignment(Alignment::Center),
    ];

    let frame_block = titled_block(theme, header, title_color);
    frame.render_widget(
        Paragraph::new(lines)
            .block(frame_block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

pub fn viewer(frame: &mut Frame, theme: &Theme, state: &ViewerState) {
    let (body, bar) = with_hint_bar(frame.area());
    let text = state.text.replace('\r', "");

    let inner_width = body.width.saturating_sub(2).max(1);
    let inner_height = body.height.saturating_sub(2);
    let total = wrapped_height(&text, inner_width);
    let bottom = total.saturating_sub(inner_height);
    let offset = bottom.saturating_sub(state.scroll_back);

    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(theme.rx_color).bg(theme.bg))
            .block(block(theme, "Output"))
            .wrap(Wrap { trim: false })
            .scroll((offset, 0)),
        body,
    );
    frame.render_widget(hint(theme, "Up/Down: scroll  Esc/Enter/q: close"), bar);
}

/// Rows `text` takes when wrapped at `width` columns.
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = text
        .split('\n')
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Helper function to create a centered rect.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height("", 10), 1);
        assert_eq!(wrapped_height("abc\ndef", 10), 2);
        assert_eq!(wrapped_height("abcdefghijk", 5), 3);
    }

    #[test]
    fn test_menu_renders_labels() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let items = vec![MenuItem::new("Set your name", 0), MenuItem::new("Help", 3)];
        terminal
            .draw(|f| menu(f, &Theme::dark(), "Ollama IA", &items, 1))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(screen.contains("Ollama IA"));
        assert!(screen.contains("3) Help"));
    }

    #[test]
    fn test_viewer_follows_tail() {
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        let state = ViewerState {
            text: (1..=20).map(|i| format!("line{i}\n")).collect(),
            scroll_back: 0,
        };
        terminal
            .draw(|f| viewer(f, &Theme::dark(), &state))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(screen.contains("line20"));
        assert!(!screen.contains("line1 "));
    }
}
