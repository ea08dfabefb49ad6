mod admin;
mod login;
mod quiz;
mod result;

use ratatui::{prelude::*, widgets::Block};

use crate::admin::AdminConsole;
use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.screen {
        Screen::Login => login::render(frame, area, app),
        Screen::Picker => quiz::render_picker(frame, area, app),
        Screen::Quiz => quiz::render(frame, area, app),
        Screen::Result => result::render(frame, area, app),
    }
}

pub fn render_admin(frame: &mut Frame, console: &AdminConsole) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);
    admin::render(frame, area, console);
}
