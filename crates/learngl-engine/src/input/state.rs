use std::collections::HashSet;

use super::types::{ButtonState, InputEvent, Key, MouseButton};

/// Input snapshot for the single application window.
///
/// Held keys and buttons persist until released (or focus is lost). The scroll
/// value is a one-frame latch: the last scroll event overwrites it and
/// [`reset_state`](Self::reset_state) zeroes it.
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<Key>,
    buttons_down: HashSet<MouseButton>,
    cursor: (f64, f64),
    cursor_positioned: bool,
    scroll: f64,
    focused: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes an event to the matching mutator.
    pub fn apply_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { key, state, .. } => match state {
                ButtonState::Pressed => self.press_key(key),
                ButtonState::Released => self.release_key(key),
            },

            InputEvent::MouseButton { button, state } => match state {
                ButtonState::Pressed => self.press_button(button),
                ButtonState::Released => self.release_button(button),
            },

            InputEvent::CursorMoved { x, y } => self.set_cursor_position(x, y),

            InputEvent::CursorDelta { dx, dy } => {
                self.cursor.0 += dx;
                self.cursor.1 += dy;
            }

            InputEvent::Scroll(value) => self.scroll(value),

            InputEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    // Releases are not delivered to an unfocused window.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }
        }
    }

    pub fn press_key(&mut self, key: Key) {
        self.keys_down.insert(key);
    }

    pub fn release_key(&mut self, key: Key) {
        self.keys_down.remove(&key);
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn press_button(&mut self, button: MouseButton) {
        self.buttons_down.insert(button);
    }

    pub fn release_button(&mut self, button: MouseButton) {
        self.buttons_down.remove(&button);
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Replaces the scroll value; deltas within a frame do not accumulate.
    pub fn scroll(&mut self, value: f64) {
        self.scroll = value;
    }

    pub fn scroll_value(&self) -> f64 {
        self.scroll
    }

    pub fn set_cursor_position(&mut self, x: f64, y: f64) {
        self.cursor = (x, y);
        self.cursor_positioned = true;
    }

    /// Whether an absolute cursor position has been reported. Relative
    /// motion alone does not count.
    pub fn cursor_positioned(&self) -> bool {
        self.cursor_positioned
    }

    pub fn cursor_position(&self) -> (f64, f64) {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// End-of-frame reset. Only the scroll value is cleared.
    pub fn reset_state(&mut self) {
        self.scroll = 0.0;
    }
}
