use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::app::App;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
            app.request_quit();
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('c') => app.navigate("/cluster"),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter | KeyCode::Char('l') => app.drill_down(),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => app.go_up(),
        _ => {}
    }
}
