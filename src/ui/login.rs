use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, LoginField};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(12),
        Constraint::Fill(1),
    ])
    .split(area);

    let id_style = field_style(app.login_field == LoginField::UserId);
    let name_style = field_style(app.login_field == LoginField::Name);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "NEON QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("User ID: ", id_style),
            Span::styled(pad_input(&app.id_input, 10), id_style),
        ]),
        Line::from(vec![
            Span::styled("   Name: ", name_style),
            Span::styled(pad_input(&app.name_input, 24), name_style),
        ]),
        Line::from(""),
    ];

    if let Some(error) = &app.login_error {
        content.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )));
    } else {
        content.push(Line::from("10-digit ID and your display name".fg(Color::DarkGray)));
    }
    content.push(Line::from(""));
    content.push(Line::from(
        "tab switch field  ·  enter continue  ·  esc quit".fg(Color::DarkGray),
    ));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);
}

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn pad_input(input: &str, width: usize) -> String {
    format!("{}{}", input, "_".repeat(width.saturating_sub(input.len())))
}
