//! Keyboard input: key mapping, queued events and the per-frame snapshot

/// Logical actions the player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Fire,
}

impl Action {
    /// Map a `KeyboardEvent.key` value to an action
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "j" | "J" | "a" | "A" | "ArrowLeft" => Some(Action::Left),
            "l" | "L" | "d" | "D" | "ArrowRight" => Some(Action::Right),
            " " | "Spacebar" => Some(Action::Fire),
            _ => None,
        }
    }
}

/// A key transition, queued until the start of the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Action),
    Released(Action),
}

impl InputEvent {
    pub fn key_down(key: &str) -> Option<Self> {
        Action::from_key(key).map(InputEvent::Pressed)
    }

    pub fn key_up(key: &str) -> Option<Self> {
        Action::from_key(key).map(InputEvent::Released)
    }
}

/// Which actions are held during this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl InputState {
    pub fn apply(&mut self, event: InputEvent) {
        let (action, held) = match event {
            InputEvent::Pressed(action) => (action, true),
            InputEvent::Released(action) => (action, false),
        };
        match action {
            Action::Left => self.left = held,
            Action::Right => self.right = held,
            Action::Fire => self.fire = held,
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        match action {
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Fire => self.fire,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from_key("ArrowLeft"), Some(Action::Left));
        assert_eq!(Action::from_key("a"), Some(Action::Left));
        assert_eq!(Action::from_key("j"), Some(Action::Left));
        assert_eq!(Action::from_key("ArrowRight"), Some(Action::Right));
        assert_eq!(Action::from_key("d"), Some(Action::Right));
        assert_eq!(Action::from_key("l"), Some(Action::Right));
        assert_eq!(Action::from_key(" "), Some(Action::Fire));
        assert_eq!(Action::from_key("q"), None);
        assert_eq!(InputEvent::key_up("Escape"), None);
    }

    #[test]
    fn test_apply_press_and_release() {
        let mut state = InputState::default();
        state.apply(InputEvent::Pressed(Action::Fire));
        state.apply(InputEvent::Pressed(Action::Left));
        assert!(state.is_held(Action::Fire));
        assert!(state.left);
        assert!(!state.right);

        state.apply(InputEvent::Released(Action::Left));
        assert!(!state.left);
        assert!(state.fire);
    }
}
