//! Input handling
//!
//! Translates GLFW window events into the few actions the demo reacts to.

use glfw::{Action, Key, WindowEvent};

/// Action requested by a window event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Stop the render loop and shut down
    RequestClose,
}

impl InputAction {
    /// Map a window event to an action, if it triggers one
    ///
    /// Escape closes on press only; repeats and releases are ignored.
    pub fn from_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::Key(Key::Escape, _, Action::Press, _) | WindowEvent::Close => {
                Some(Self::RequestClose)
            }
            _ => None,
        }
    }
}

/// Close flag accumulated across polled events
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    close_requested: bool,
}

impl InputState {
    /// Fresh state with no close request
    pub const fn new() -> Self {
        Self {
            close_requested: false,
        }
    }

    /// Fold one event into the state, returning the action it triggered
    pub fn apply(&mut self, event: &WindowEvent) -> Option<InputAction> {
        let action = InputAction::from_event(event);
        if action == Some(InputAction::RequestClose) {
            log::info!("Close requested by {:?}", event);
            self.close_requested = true;
        }
        action
    }

    /// Whether a close signal has been observed
    pub const fn close_requested(&self) -> bool {
        self.close_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glfw::Modifiers;

    fn key(key: Key, action: Action) -> WindowEvent {
        WindowEvent::Key(key, 0, action, Modifiers::empty())
    }

    #[test]
    fn test_escape_press_requests_close() {
        let mut state = InputState::new();
        assert!(!state.close_requested());

        let action = state.apply(&key(Key::Escape, Action::Press));
        assert_eq!(action, Some(InputAction::RequestClose));
        assert!(state.close_requested());
    }

    #[test]
    fn test_escape_release_and_repeat_ignored() {
        let mut state = InputState::new();
        assert_eq!(state.apply(&key(Key::Escape, Action::Release)), None);
        assert_eq!(state.apply(&key(Key::Escape, Action::Repeat)), None);
        assert!(!state.close_requested());
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut state = InputState::new();
        assert_eq!(state.apply(&key(Key::Space, Action::Press)), None);
        assert_eq!(
            state.apply(&WindowEvent::Key(Key::Q, 0, Action::Press, Modifiers::Control)),
            None
        );
        assert!(!state.close_requested());
    }

    #[test]
    fn test_window_close_event() {
        assert_eq!(
            InputAction::from_event(&WindowEvent::Close),
            Some(InputAction::RequestClose)
        );
    }

    #[test]
    fn test_close_flag_is_sticky() {
        let mut state = InputState::new();
        state.apply(&key(Key::Escape, Action::Press));
        state.apply(&key(Key::A, Action::Press));
        state.apply(&WindowEvent::Focus(true));
        assert!(state.close_requested());
    }
}
