//! Pure view functions.
//!
//! `render` only reads `AppState` and draws; it never mutates state or
//! returns effects.

use ratatui::Frame;

use crate::features::{boot, connecting, lightning, menu, rain};
use crate::state::{AppState, Screen};

pub fn render(app: &AppState, frame: &mut Frame) {
    match &app.screen {
        Screen::Menu => {
            rain::render(&app.rain, frame);
            menu::render(app, frame);
        }
        Screen::Boot(state) => boot::render(state, frame),
        Screen::Connecting(state) => connecting::render(state, app.frame_count, frame),
    }
    lightning::render(&app.lightning, frame);
}
