use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Fill(1),
    ])
    .split(area);

    let (title, title_color) = if app.result_success {
        ("QUIZ COMPLETED!", Color::Green)
    } else {
        ("QUIZ ENDED", Color::Red)
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            title,
            Style::default().fg(title_color).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Your final score: {} points ({})",
                app.result_score, app.result_category
            ),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(""),
        Line::from(""),
        Line::from("enter pick another category  ·  q quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);
}
