use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::app::{App, QuestionView};
use crate::session::{timer_fraction, timer_seconds_label};

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Category picker shown after login.
pub fn render_picker(frame: &mut Frame, area: Rect, app: &App) {
    let categories = app.categories();
    let height = (categories.len() as u16 + 9).max(12);
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "PICK A CATEGORY",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(format!("playing as {}", app.display_name()).fg(Color::DarkGray)),
        Line::from(""),
    ];

    for (index, category) in categories.iter().enumerate() {
        let is_selected = index == app.picker_selected;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };
        content.push(Line::from(Span::styled(
            format!("{} {}", marker, category),
            style,
        )));
    }

    content.push(Line::from(""));
    if let Some(message) = &app.picker_message {
        content.push(Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red),
        )));
    }
    content.push(Line::from(
        "j/k select  ·  enter start  ·  q quit".fg(Color::DarkGray),
    ));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);
}

/// The live quiz screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = &app.question else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Length(1), // timer
        Constraint::Length(1),
        Constraint::Length(3), // question
        Constraint::Fill(1),   // options
        Constraint::Length(1), // hint
        Constraint::Length(1), // lifelines
        Constraint::Length(1), // controls
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], app, question);
    render_timer(frame, chunks[1], app);
    render_question_text(frame, chunks[3], &question.text);
    render_options(frame, chunks[4], app, question);
    render_hint(frame, chunks[5], app);
    render_lifelines(frame, chunks[6], app);
    render_controls(frame, chunks[7]);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, question: &QuestionView) {
    let chunks = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let progress = format!("Q {}/{}", question.index + 1, question.total);
    frame.render_widget(Paragraph::new(progress).fg(Color::DarkGray), chunks[0]);

    let lives = "♥".repeat(app.lives as usize);
    let widget = Paragraph::new(lives)
        .alignment(Alignment::Center)
        .fg(Color::Red);
    frame.render_widget(widget, chunks[1]);

    let score = format!("score {}", app.score);
    let widget = Paragraph::new(score)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, chunks[2]);
}

fn render_timer(frame: &mut Frame, area: Rect, app: &App) {
    let fraction = timer_fraction(app.time_left, crate::session::QUESTION_TIME);
    let color = if fraction > 0.5 {
        Color::Green
    } else if fraction > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    };

    let widget = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(fraction)
        .label(format!("{}s", timer_seconds_label(app.time_left)));
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, app: &App, question: &QuestionView) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        if app.hidden[index] {
            lines.push(Line::from(Span::styled(
                "   —",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
            continue;
        }

        let is_selected = index == app.selected_option;
        let style = option_style(app, index, is_selected);
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// The feedback pause paints the correct option green and a wrong pick red.
fn option_style(app: &App, index: usize, is_selected: bool) -> Style {
    if let Some(feedback) = app.feedback {
        if index == feedback.correct_index {
            return Style::default().fg(Color::Green).bold();
        }
        if feedback.selected == Some(index) {
            return Style::default().fg(Color::Red).bold();
        }
        return Style::default().fg(Color::DarkGray);
    }

    if is_selected {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn render_hint(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(hint) = &app.hint {
        let widget = Paragraph::new(format!("hint: {}", hint)).fg(Color::Yellow);
        frame.render_widget(widget, area);
    }
}

fn render_lifelines(frame: &mut Frame, area: Rect, app: &App) {
    let lifelines = app.lifelines;
    let spans: Vec<Span> = [
        (format!("50/50 ({})", lifelines.fifty_fifty), lifelines.fifty_fifty, "1"),
        (format!("Hint ({})", lifelines.hint), lifelines.hint, "2"),
        (format!("Skip ({})", lifelines.skip), lifelines.skip, "3"),
    ]
    .into_iter()
    .flat_map(|(label, remaining, key)| {
        let style = if remaining > 0 {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        vec![
            Span::styled(format!("[{}] ", key), Style::default().fg(Color::DarkGray)),
            Span::styled(label, style),
            Span::raw("   "),
        ]
    })
    .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k navigate  ·  enter answer  ·  1/2/3 lifelines  ·  e end  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
