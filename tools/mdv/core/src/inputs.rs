use genesis::Buttons;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ControllerButton {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    C,
    Start,
}

impl ControllerButton {
    pub const fn buttons(self) -> Buttons {
        match self {
            ControllerButton::Up => Buttons::UP,
            ControllerButton::Down => Buttons::DOWN,
            ControllerButton::Left => Buttons::LEFT,
            ControllerButton::Right => Buttons::RIGHT,
            ControllerButton::A => Buttons::A,
            ControllerButton::B => Buttons::B,
            ControllerButton::C => Buttons::C,
            ControllerButton::Start => Buttons::START,
        }
    }
}

/// Anything a frontend can bind a key to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InputCommand {
    Controller1(ControllerButton),
    Controller2(ControllerButton),
    PlayPause,
    Reset,
}

/// Edge-aware key state. Frontends feed raw up/down with
/// [`update_state`](KeyState::update_state); the emulator ages the edges with
/// [`update`](KeyState::update) once they've been seen.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyState {
    JustPressed,
    Held,
    JustReleased,
    Released,
}

impl KeyState {
    pub fn new(pressed: bool) -> Self {
        if pressed {
            KeyState::JustPressed
        } else {
            KeyState::JustReleased
        }
    }

    /// Age one step: edges settle into their steady states.
    pub fn update(self) -> Self {
        match self {
            KeyState::JustPressed => KeyState::Held,
            KeyState::JustReleased => KeyState::Released,
            steady => steady,
        }
    }

    /// Apply a raw key report. Repeats of the current level keep the state.
    pub fn update_state(self, pressed: bool) -> Self {
        match (self.is_pressed(), pressed) {
            (false, true) => KeyState::JustPressed,
            (true, false) => KeyState::JustReleased,
            _ => self,
        }
    }

    pub fn is_pressed(self) -> bool {
        matches!(self, KeyState::JustPressed | KeyState::Held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_settle() {
        let ks = KeyState::new(true);
        assert_eq!(ks, KeyState::JustPressed);
        assert_eq!(ks.update(), KeyState::Held);
        assert_eq!(ks.update().update(), KeyState::Held);
        assert_eq!(KeyState::new(false).update(), KeyState::Released);
    }

    #[test]
    fn key_repeat_does_not_retrigger() {
        let held = KeyState::Held;
        assert_eq!(held.update_state(true), KeyState::Held);
        assert_eq!(held.update_state(false), KeyState::JustReleased);
        assert_eq!(KeyState::Released.update_state(true), KeyState::JustPressed);
        assert!(KeyState::JustPressed.is_pressed());
        assert!(!KeyState::JustReleased.is_pressed());
    }
}
