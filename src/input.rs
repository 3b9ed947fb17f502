use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{Key, NamedKey},
};

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    KeyboardInput { key: Key, pressed: bool },
}

impl InputEvent {
    pub fn keyboard_input(event: &KeyEvent) -> InputEvent {
        InputEvent::KeyboardInput {
            key: event.logical_key.clone(),
            pressed: event.state == ElementState::Pressed,
        }
    }

    pub fn is_escape_press(&self) -> bool {
        matches!(
            self,
            InputEvent::KeyboardInput {
                key: Key::Named(NamedKey::Escape),
                pressed: true,
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pressing_escape_counts() {
        let press = InputEvent::KeyboardInput {
            key: Key::Named(NamedKey::Escape),
            pressed: true,
        };
        let release = InputEvent::KeyboardInput {
            key: Key::Named(NamedKey::Escape),
            pressed: false,
        };
        let other = InputEvent::KeyboardInput {
            key: Key::Character("q".into()),
            pressed: true,
        };

        assert!(press.is_escape_press());
        assert!(!release.is_escape_press());
        assert!(!other.is_escape_press());
    }
}
