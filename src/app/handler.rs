//! Input handling — maps key/mouse events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let step = i64::from(state.config.scroll_step);
    let page = i64::from(state.layout.viewport_height.saturating_sub(1).max(1));

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        KeyCode::Char('d') => state.show_debug = !state.show_debug,
        KeyCode::Up | KeyCode::Char('k') => {
            state.scroll_by(-step);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.scroll_by(step);
        }
        KeyCode::PageUp => {
            state.scroll_by(-page);
        }
        KeyCode::PageDown | KeyCode::Char(' ') => {
            state.scroll_by(page);
        }
        KeyCode::Home | KeyCode::Char('g') => {
            state.scroll_to(0);
        }
        KeyCode::End | KeyCode::Char('G') => {
            state.scroll_to(state.layout.max_scroll());
        }
        _ => {}
    }
}

/// Process a mouse event.  Only the wheel matters.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let step = i64::from(state.config.scroll_step);
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            state.scroll_by(-step);
        }
        MouseEventKind::ScrollDown => {
            state.scroll_by(step);
        }
        _ => {}
    }
}

/// Build the status-bar hint string.
pub fn status_bar_hint(state: &AppState) -> String {
    format!(
        " ↑/↓ j/k: scroll | PgUp/PgDn: page | d: debug | q: quit    row {}/{}",
        state.scroll_y,
        state.layout.max_scroll(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::page::LOREM;
    use crate::app::state::BlockSpec;
    use crate::config::AppConfig;
    use crate::core::progress::AnimationConfig;
    use crate::ui::theme::Palette;

    fn state() -> AppState {
        let spec = BlockSpec {
            text: LOREM.to_string(),
            animation: AnimationConfig::default(),
            palette: Palette::BLUE,
        };
        AppState::new(AppConfig::default(), vec![spec], 84, 20)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keys_scroll_and_request_recompute() {
        let mut state = state();
        state.on_frame(std::time::Duration::ZERO);

        handle_key(&mut state, press(KeyCode::Char('j')));
        assert_eq!(state.scroll_y, 1);
        assert!(state.blocks[0].animation.borrow().needs_frame());

        handle_key(&mut state, press(KeyCode::End));
        assert_eq!(state.scroll_y, state.layout.max_scroll());
        handle_key(&mut state, press(KeyCode::Home));
        assert_eq!(state.scroll_y, 0);
    }

    #[test]
    fn quit_and_debug_toggle() {
        let mut state = state();
        handle_key(&mut state, press(KeyCode::Char('d')));
        assert!(!state.show_debug);
        handle_key(&mut state, press(KeyCode::Char('q')));
        assert!(state.should_quit);
    }
}
