//! Destination menu.
//!
//! Entries are grouped by section. The selection cursor walks the catalog
//! in display order; number keys and mouse clicks pick an entry directly.

use linkboot_core::{Catalog, Section};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::common::text::truncate_with_ellipsis;
use crate::state::AppState;

pub const TITLE: &str = "tcp.dns";
pub const SUBTITLE: &str = "TERMINAL INTERFACE v2.52";
pub const PROMPT: &str = "root@tcp.dns:~$ ./select_destination.sh";
pub const INFO: &str = "Available destinations detected...";
pub const IDLE_PROMPT: &str = "root@tcp.dns:~$ _";
const HINT: &str = "Up/Down select   Enter boot   1-9 jump   q quit";
const MAX_WIDTH: u16 = 64;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MenuState {
    /// Position in `Catalog::display_order`.
    pub cursor: usize,
    /// One-line message shown under the menu (e.g. a failed boot).
    pub status: Option<String>,
}

impl MenuState {
    pub fn move_cursor(&mut self, catalog: &Catalog, delta: isize) {
        let len = catalog.len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor as isize + delta).rem_euclid(len as isize) as usize;
    }

    /// Catalog index under the cursor.
    pub fn selected(&self, catalog: &Catalog) -> Option<usize> {
        catalog.display_order().get(self.cursor).copied()
    }

    /// Moves the cursor onto a catalog index.
    pub fn select(&mut self, catalog: &Catalog, index: usize) {
        if let Some(pos) = catalog.display_order().iter().position(|&i| i == index) {
            self.cursor = pos;
        }
    }
}

/// One row of the menu box, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRow {
    Title,
    Subtitle,
    Prompt,
    Info,
    Blank,
    Tag(Section),
    Description(Section),
    Item(usize),
    IdlePrompt,
}

pub fn rows(catalog: &Catalog) -> Vec<MenuRow> {
    let mut rows = vec![
        MenuRow::Title,
        MenuRow::Subtitle,
        MenuRow::Blank,
        MenuRow::Prompt,
        MenuRow::Info,
    ];
    for &section in Section::all() {
        let mut entries = catalog.section(section).peekable();
        if entries.peek().is_none() {
            continue;
        }
        rows.push(MenuRow::Blank);
        rows.push(MenuRow::Tag(section));
        rows.push(MenuRow::Description(section));
        rows.extend(entries.map(|(index, _)| MenuRow::Item(index)));
    }
    rows.push(MenuRow::Blank);
    rows.push(MenuRow::IdlePrompt);
    rows
}

/// Bordered box the menu is drawn in, centred in `area`.
pub fn menu_box(area: Rect, row_count: usize) -> Rect {
    // Borders plus the hint and status lines.
    let height = u16::try_from(row_count).unwrap_or(u16::MAX).saturating_add(5);
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [boxed] = Layout::horizontal([Constraint::Length(MAX_WIDTH)])
        .flex(Flex::Center)
        .areas(row);
    boxed
}

/// Catalog index of the entry drawn at (`column`, `row`), if any.
pub fn hit_test(catalog: &Catalog, area: Rect, column: u16, row: u16) -> Option<usize> {
    let rows = rows(catalog);
    let boxed = menu_box(area, rows.len());
    let inner = Block::default().borders(Borders::ALL).inner(boxed);
    if column < inner.x || column >= inner.right() || row < inner.y {
        return None;
    }
    match rows.get(usize::from(row - inner.y)) {
        Some(MenuRow::Item(index)) => Some(*index),
        _ => None,
    }
}

fn item_line(app: &AppState, index: usize, selected: bool, width: usize) -> Line<'static> {
    let Some(destination) = app.catalog.get(index) else {
        return Line::default();
    };
    let number = format!(" {}. ", index + 1);
    let label = truncate_with_ellipsis(&destination.label, width.saturating_sub(number.len() + 4));
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(vec![
        Span::styled(number, Style::default().fg(Color::DarkGray)),
        Span::styled(format!("[ {label} ]"), style),
    ])
}

pub fn render(app: &AppState, frame: &mut Frame) {
    let rows = rows(&app.catalog);
    let boxed = menu_box(frame.area(), rows.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(boxed);
    let width = usize::from(inner.width);
    let selected = app.menu.selected(&app.catalog);

    let mut lines: Vec<Line> = rows
        .iter()
        .map(|row| match *row {
            MenuRow::Title => Line::styled(
                TITLE,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )
            .centered(),
            MenuRow::Subtitle => {
                Line::styled(SUBTITLE, Style::default().fg(Color::DarkGray)).centered()
            }
            MenuRow::Info => Line::from(vec![
                Span::styled("[INFO] ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    truncate_with_ellipsis(INFO, width.saturating_sub(7)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            MenuRow::IdlePrompt => Line::styled(IDLE_PROMPT, Style::default().fg(Color::Green)),
            MenuRow::Prompt => Line::styled(
                truncate_with_ellipsis(PROMPT, width),
                Style::default().fg(Color::Green),
            ),
            MenuRow::Blank => Line::default(),
            MenuRow::Tag(section) => Line::styled(
                section.tag(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            MenuRow::Description(section) => Line::styled(
                section.description(),
                Style::default().fg(Color::DarkGray),
            ),
            MenuRow::Item(index) => item_line(app, index, selected == Some(index), width),
        })
        .collect();

    lines.push(Line::default());
    lines.push(Line::styled(
        truncate_with_ellipsis(HINT, width),
        Style::default().fg(Color::DarkGray),
    ));
    if let Some(status) = &app.menu.status {
        lines.push(Line::styled(
            truncate_with_ellipsis(status, width),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Clear, boxed);
    frame.render_widget(Paragraph::new(lines).block(block), boxed);
}
