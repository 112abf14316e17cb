//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use tracing::debug;

use crate::common::SessionId;
use crate::effects::UiEffect;
use crate::events::{PlaybackUiEvent, UiEvent};
use crate::features::boot::BootState;
use crate::features::menu;
use crate::state::{AppState, ConnectingState, Screen};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            handle_tick(app, Instant::now());
            vec![]
        }
        UiEvent::Frame { width, height } => {
            if app.viewport != (width, height) {
                app.viewport = (width, height);
                app.rain.resize(width, height, &mut app.rng);
            }
            vec![]
        }
        UiEvent::Terminal(event) => handle_terminal_event(app, event),
        UiEvent::Playback { session, event } => handle_playback(app, session, event),
        UiEvent::Lightning => {
            app.lightning.strike(&mut app.rng, Instant::now());
            vec![]
        }
        UiEvent::RedirectDue { session } => handle_redirect(app, session),
    }
}

fn handle_tick(app: &mut AppState, now: Instant) {
    app.frame_count = app.frame_count.wrapping_add(1);
    app.lightning.on_tick(&mut app.rng, now);
    if matches!(app.screen, Screen::Menu) {
        app.rain.on_tick(&mut app.rng, now);
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return quit(app);
    }

    if matches!(app.screen, Screen::Menu) {
        handle_menu_key(app, key.code)
    } else if key.code == KeyCode::Esc {
        back_to_menu(app)
    } else {
        vec![]
    }
}

fn handle_menu_key(app: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.menu.move_cursor(&app.catalog, -1);
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
            app.menu.move_cursor(&app.catalog, 1);
            vec![]
        }
        KeyCode::Enter | KeyCode::Char(' ') => match app.menu.selected(&app.catalog) {
            Some(index) => activate(app, index),
            None => vec![],
        },
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            if app.catalog.get(index).is_some() {
                activate(app, index)
            } else {
                vec![]
            }
        }
        KeyCode::Char('q') | KeyCode::Esc => quit(app),
        _ => vec![],
    }
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    if !matches!(app.screen, Screen::Menu) {
        return vec![];
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let (width, height) = app.viewport;
            let area = Rect::new(0, 0, width, height);
            match menu::hit_test(&app.catalog, area, mouse.column, mouse.row) {
                Some(index) => activate(app, index),
                None => vec![],
            }
        }
        MouseEventKind::ScrollUp => {
            app.menu.move_cursor(&app.catalog, -1);
            vec![]
        }
        MouseEventKind::ScrollDown => {
            app.menu.move_cursor(&app.catalog, 1);
            vec![]
        }
        _ => vec![],
    }
}

/// Starts a boot session for the catalog entry at `index`.
fn activate(app: &mut AppState, index: usize) -> Vec<UiEffect> {
    let Some(destination) = app.catalog.get(index).cloned() else {
        return vec![];
    };
    app.menu.select(&app.catalog, index);
    app.menu.status = None;
    app.lightning.strike(&mut app.rng, Instant::now());

    let session = app.session_seq.next_id();
    debug!(session = session.0, destination = %destination.label, "boot selected");
    app.screen = Screen::Boot(BootState::new(
        session,
        destination.clone(),
        app.config.boot.progress_ceiling,
    ));
    vec![UiEffect::StartBoot {
        session,
        destination,
    }]
}

fn back_to_menu(app: &mut AppState) -> Vec<UiEffect> {
    let was_booting = app.is_booting();
    app.screen = Screen::Menu;
    if was_booting {
        vec![UiEffect::CancelBoot]
    } else {
        vec![]
    }
}

fn quit(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = back_to_menu(app);
    effects.push(UiEffect::Quit);
    effects
}

fn handle_playback(app: &mut AppState, session: SessionId, event: PlaybackUiEvent) -> Vec<UiEffect> {
    let Screen::Boot(boot) = &mut app.screen else {
        return vec![];
    };
    if boot.session != session {
        debug!(session = session.0, "dropping event from stale session");
        return vec![];
    }

    match event {
        PlaybackUiEvent::Tick { revealed, progress } => {
            boot.on_tick(revealed, progress);
            vec![]
        }
        PlaybackUiEvent::Draining => {
            boot.draining = true;
            vec![]
        }
        PlaybackUiEvent::Completed => {
            let destination = boot.destination.clone();
            app.screen = Screen::Connecting(ConnectingState {
                session,
                destination,
            });
            vec![UiEffect::ScheduleRedirect {
                session,
                delay: app.config.connect.delay(),
            }]
        }
        PlaybackUiEvent::Failed(message) => {
            app.screen = Screen::Menu;
            app.menu.status = Some(format!("Boot failed: {message}"));
            vec![]
        }
    }
}

fn handle_redirect(app: &mut AppState, session: SessionId) -> Vec<UiEffect> {
    let Screen::Connecting(connecting) = &app.screen else {
        return vec![];
    };
    if connecting.session != session {
        return vec![];
    }

    let url = connecting.destination.url.clone();
    app.redirected = Some(url.clone());
    let mut effects = Vec::with_capacity(2);
    if app.config.connect.open_browser {
        effects.push(UiEffect::OpenDestination { url });
    }
    effects.push(UiEffect::Quit);
    effects
}
