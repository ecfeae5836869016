use crate::app::state::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false
            }
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('+') | KeyCode::Char('=') => self.speed_up(),
            KeyCode::Char('-') | KeyCode::Char('_') => self.slow_down(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_and_pause_keys() {
        let mut app = App::new(Duration::from_millis(150), 0.3);
        app.handle_key(press(KeyCode::Char(' ')));
        assert!(app.paused);
        app.handle_key(press(KeyCode::Char(' ')));
        assert!(!app.paused);

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_speed_keys() {
        let mut app = App::new(Duration::from_millis(160), 0.3);
        app.handle_key(press(KeyCode::Char('+')));
        assert_eq!(app.tick_pacing, Duration::from_millis(80));
        app.handle_key(press(KeyCode::Char('-')));
        app.handle_key(press(KeyCode::Char('-')));
        assert_eq!(app.tick_pacing, Duration::from_millis(320));
    }
}
