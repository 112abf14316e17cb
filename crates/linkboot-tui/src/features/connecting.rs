//! "CONNECTING..." screen shown while the redirect is pending.

use linkboot_core::script::{CONNECTING_SUBTITLE, CONNECTING_TITLE};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::common::text::truncate_with_ellipsis;
use crate::state::ConnectingState;

const DOTS: &[&str] = &["", ".", "..", "..."];

/// `frame_count` animates the trailing dots under the URL.
pub fn render(connecting: &ConnectingState, frame_count: usize, frame: &mut Frame) {
    let [area] = Layout::vertical([Constraint::Length(4)])
        .flex(Flex::Center)
        .areas(frame.area());
    let width = usize::from(area.width);
    let dots = DOTS[(frame_count / 20) % DOTS.len()];

    let lines = vec![
        Line::styled(
            CONNECTING_TITLE,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::styled(CONNECTING_SUBTITLE, Style::default().fg(Color::Gray)),
        Line::default(),
        Line::styled(
            truncate_with_ellipsis(&format!("{}{dots}", connecting.destination.url), width),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    frame.render_widget(Paragraph::new(lines).centered(), area);
}
