//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::dashboard::Dashboard;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Visible state changed, repaint.
    Redraw,
}

/// Handles key input and updates state.
pub fn handle_key(dashboard: &mut Dashboard, key: KeyEvent) -> KeyAction {
    let page = dashboard.apps.page_size();
    let table = &mut dashboard.apps.table;

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::F(10) => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        // Table navigation
        KeyCode::Up | KeyCode::Char('k') => {
            table.select_up();
            scrolled(dashboard)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            table.select_down();
            scrolled(dashboard)
        }
        KeyCode::PageUp => {
            table.page_up(page);
            scrolled(dashboard)
        }
        KeyCode::PageDown => {
            table.page_down(page);
            scrolled(dashboard)
        }
        KeyCode::Home => {
            table.select_first();
            scrolled(dashboard)
        }
        KeyCode::End => {
            table.select_last();
            scrolled(dashboard)
        }

        // Poll interval
        KeyCode::Char('+') => {
            dashboard.slower();
            KeyAction::Redraw
        }
        KeyCode::Char('-') => {
            dashboard.faster();
            KeyAction::Redraw
        }

        _ => KeyAction::None,
    }
}

fn scrolled(dashboard: &mut Dashboard) -> KeyAction {
    dashboard.apps.touch();
    KeyAction::Redraw
}
