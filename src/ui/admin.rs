use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::admin::AdminConsole;

pub fn render(frame: &mut Frame, area: Rect, console: &AdminConsole) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .split(area);

    let title = Paragraph::new("NEON QUIZ · ADMIN CONSOLE")
        .alignment(Alignment::Center)
        .fg(Color::Cyan)
        .bold();
    frame.render_widget(title, chunks[0]);

    render_history(frame, chunks[1], console);
    render_command_line(frame, chunks[2], console);

    let controls = Paragraph::new("enter run command  ·  'help' for commands  ·  esc quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[3]);
}

fn render_history(frame: &mut Frame, area: Rect, console: &AdminConsole) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = console.command_history.len().saturating_sub(visible);

    let lines: Vec<Line> = console
        .command_history
        .iter()
        .skip(skip)
        .map(|entry| {
            let color = if entry.starts_with('>') {
                Color::Cyan
            } else if entry.starts_with("error:") {
                Color::Red
            } else {
                Color::Gray
            };
            Line::from(Span::styled(entry.as_str(), Style::default().fg(color)))
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_command_line(frame: &mut Frame, area: Rect, console: &AdminConsole) {
    let line = Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::styled(console.command_input.as_str(), Style::default().fg(Color::White)),
        Span::styled("_", Style::default().fg(Color::DarkGray)),
    ]);

    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}
