use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use crate::app::{App, DashboardFocus, InputMode, MentorFocus, Tab};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::Advice(text) => app.settle_advice(text),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_query_editing(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            app.select_tab(app.tab.next());
            return;
        }
        KeyCode::BackTab => {
            app.select_tab(app.tab.prev());
            return;
        }
        KeyCode::Char(c @ '1'..='7') => {
            let idx = c as usize - '1' as usize;
            if let Some(tab) = Tab::from_index(idx) {
                app.select_tab(tab);
            }
            return;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.nav_down();
            return;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.nav_up();
            return;
        }
        KeyCode::Char('h') | KeyCode::Char('l') | KeyCode::Left | KeyCode::Right => {
            app.toggle_focus();
            return;
        }
        _ => {}
    }

    match app.tab {
        Tab::Dashboard => handle_dashboard_normal(app, key),
        Tab::Mentor => handle_mentor_normal(app, key),
        _ => {}
    }
}

fn handle_dashboard_normal(app: &mut App, key: KeyEvent) {
    match (app.dashboard_focus, key.code) {
        (DashboardFocus::Alerts, KeyCode::Char('t') | KeyCode::Enter) => {
            app.troubleshoot_selected_alert();
        }
        (DashboardFocus::Checklist, KeyCode::Char(' ') | KeyCode::Enter) => {
            app.toggle_selected_checklist();
        }
        _ => {}
    }
}

fn handle_mentor_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('i') | KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
            app.query_cursor = app.query_input.chars().count();
        }
        KeyCode::Enter if app.mentor_focus == MentorFocus::Guides => {
            app.ask_selected_guide();
        }
        KeyCode::PageDown => app.scroll_advice_down(10),
        KeyCode::PageUp => app.scroll_advice_up(10),
        KeyCode::Char('g') => app.advice_scroll = 0,
        _ => {}
    }
}

fn handle_query_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            app.submit_query();
        }
        KeyCode::Backspace => {
            if app.query_cursor > 0 {
                app.query_cursor -= 1;
                let byte_pos = char_to_byte_index(&app.query_input, app.query_cursor);
                app.query_input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.query_input.chars().count();
            if app.query_cursor < char_count {
                let byte_pos = char_to_byte_index(&app.query_input, app.query_cursor);
                app.query_input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.query_cursor = app.query_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.query_input.chars().count();
            if app.query_cursor < char_count {
                app.query_cursor += 1;
            }
        }
        KeyCode::Home => {
            app.query_cursor = 0;
        }
        KeyCode::End => {
            app.query_cursor = app.query_input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.query_input, app.query_cursor);
            app.query_input.insert(byte_pos, c);
            app.query_cursor += 1;
        }
        _ => {}
    }
}

fn is_inside(area: Option<Rect>, column: u16, row: u16) -> bool {
    area.is_some_and(|a| {
        column >= a.x && column < a.x + a.width && row >= a.y && row < a.y + a.height
    })
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(area) = app.sidebar_area {
                if is_inside(Some(area), mouse.column, mouse.row) {
                    // Sidebar rows start below the border, brand lines and a gap
                    let first_row = area.y + 4;
                    if mouse.row >= first_row {
                        if let Some(tab) = Tab::from_index((mouse.row - first_row) as usize) {
                            app.select_tab(tab);
                        }
                    }
                }
            }
        }
        MouseEventKind::ScrollDown if is_inside(app.advice_area, mouse.column, mouse.row) => {
            app.scroll_advice_down(3);
        }
        MouseEventKind::ScrollUp if is_inside(app.advice_area, mouse.column, mouse.row) => {
            app.scroll_advice_up(3);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use cloudops_core::AdviceState;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_event(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_char_to_byte_index_multibyte() {
        assert_eq!(char_to_byte_index("héllo", 2), 3);
        assert_eq!(char_to_byte_index("abc", 10), 3);
    }

    #[test]
    fn test_number_keys_select_tabs() {
        let (mut app, _rx) = test_app();
        handle_event(&mut app, key(KeyCode::Char('7')));
        assert_eq!(app.tab, Tab::Mentor);
        handle_event(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.tab, Tab::Resources);
        handle_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.tab, Tab::Monitoring);
    }

    #[test]
    fn test_editing_with_cursor() {
        let (mut app, _rx) = test_app();
        app.select_tab(Tab::Mentor);
        handle_event(&mut app, key(KeyCode::Char('i')));
        assert_eq!(app.input_mode, InputMode::Editing);

        type_text(&mut app, "dsk");
        handle_event(&mut app, key(KeyCode::Left));
        handle_event(&mut app, key(KeyCode::Left));
        type_text(&mut app, "i");
        assert_eq!(app.query_input, "disk");

        handle_event(&mut app, key(KeyCode::End));
        handle_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.query_input, "dis");

        handle_event(&mut app, key(KeyCode::Home));
        handle_event(&mut app, key(KeyCode::Delete));
        assert_eq!(app.query_input, "is");
    }

    #[test]
    fn test_q_while_editing_is_text() {
        let (mut app, _rx) = test_app();
        app.select_tab(Tab::Mentor);
        app.input_mode = InputMode::Editing;
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.query_input, "q");
    }

    #[test]
    fn test_enter_on_empty_input_does_nothing() {
        let (mut app, _rx) = test_app();
        app.select_tab(Tab::Mentor);
        app.input_mode = InputMode::Editing;
        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.advice, AdviceState::Idle);
        assert_eq!(app.input_mode, InputMode::Editing);
    }

    #[tokio::test]
    async fn test_enter_submits_and_advice_event_settles() {
        let (mut app, mut rx) = test_app();
        app.select_tab(Tab::Mentor);
        app.input_mode = InputMode::Editing;
        type_text(&mut app, "VM CPU at 95%");
        handle_event(&mut app, key(KeyCode::Enter));
        assert!(app.advice.is_pending());
        assert_eq!(app.input_mode, InputMode::Normal);

        let event = rx.recv().await.expect("advice event");
        assert!(matches!(event, AppEvent::Advice(_)));
        handle_event(&mut app, event);
        assert!(app.advice.text().is_some());
    }

    #[test]
    fn test_space_toggles_checklist() {
        let (mut app, _rx) = test_app();
        handle_event(&mut app, key(KeyCode::Right));
        assert_eq!(app.dashboard_focus, DashboardFocus::Checklist);

        let before = app.inventory.completed_checklist_count();
        handle_event(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(app.inventory.completed_checklist_count(), before - 1);
    }

    #[test]
    fn test_advice_event_from_any_tab_switches_to_mentor() {
        let (mut app, _rx) = test_app();
        app.select_tab(Tab::Pipelines);
        handle_event(&mut app, AppEvent::Advice("T".to_string()));
        assert_eq!(app.tab, Tab::Mentor);
        assert_eq!(app.advice.text(), Some("T"));
    }

    #[test]
    fn test_advice_arriving_mid_typing_keeps_the_input() {
        let (mut app, _rx) = test_app();
        app.select_tab(Tab::Mentor);
        handle_event(&mut app, key(KeyCode::Char('i')));
        type_text(&mut app, "how");

        handle_event(&mut app, AppEvent::Advice("advice".to_string()));
        type_text(&mut app, " to fix quota");

        assert!(!app.should_quit);
        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.query_input, "how to fix quota");
        assert_eq!(app.tab, Tab::Mentor);
        assert_eq!(app.advice.text(), Some("advice"));
    }

    #[test]
    fn test_resize_only_redraws() {
        let (mut app, _rx) = test_app();
        app.select_tab(Tab::Mentor);
        app.input_mode = InputMode::Editing;
        handle_event(&mut app, AppEvent::Resize);
        assert_eq!(app.tab, Tab::Mentor);
        assert_eq!(app.input_mode, InputMode::Editing);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_tick_only_animates_while_pending() {
        let (mut app, _rx) = test_app();
        handle_event(&mut app, AppEvent::Tick);
        assert_eq!(app.animation_frame, 0);
        app.advice.begin();
        handle_event(&mut app, AppEvent::Tick);
        assert_eq!(app.animation_frame, 1);
    }
}
