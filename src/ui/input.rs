use crate::scene::state::Control;
use log::trace;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window};

/// Maps a key to the blimp command it triggers, if any.
pub fn control_for_key(key: Key) -> Option<Control> {
    match key {
        Key::W => Some(Control::Forward),
        Key::Left => Some(Control::TurnLeft),
        Key::Right => Some(Control::TurnRight),
        Key::Up => Some(Control::Ascend),
        Key::Down => Some(Control::Descend),
        _ => None,
    }
}

/// Last observed mouse button and cursor position. Recorded for diagnostics only.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    pub button: Option<MouseButton>,
    pub position: Option<(f32, f32)>,
}

impl MouseState {
    /// Returns true if anything changed since the last call.
    pub fn record(&mut self, button: Option<MouseButton>, position: Option<(f32, f32)>) -> bool {
        let next = MouseState {
            button: button.or(self.button),
            position: if button.is_some() { position } else { self.position },
        };
        let changed = next != *self;
        if changed {
            trace!("Mouse: button={:?} position={:?}", next.button, next.position);
        }
        *self = next;
        changed
    }
}

/// Collects this frame's commands from the window.
#[derive(Debug, Default)]
pub struct InputController {
    pub mouse: MouseState,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys pressed since the last update, auto-repeat included, in the order minifb reports them.
    pub fn poll(&mut self, window: &Window) -> Vec<Control> {
        let pressed = window.get_keys_pressed(KeyRepeat::Yes);

        let button = [MouseButton::Left, MouseButton::Middle, MouseButton::Right]
            .into_iter()
            .find(|b| window.get_mouse_down(*b));
        self.mouse
            .record(button, window.get_mouse_pos(MouseMode::Pass));

        pressed.into_iter().filter_map(control_for_key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_keys_map_to_commands() {
        assert_eq!(control_for_key(Key::W), Some(Control::Forward));
        assert_eq!(control_for_key(Key::Left), Some(Control::TurnLeft));
        assert_eq!(control_for_key(Key::Right), Some(Control::TurnRight));
        assert_eq!(control_for_key(Key::Up), Some(Control::Ascend));
        assert_eq!(control_for_key(Key::Down), Some(Control::Descend));
        assert_eq!(control_for_key(Key::S), None);
        assert_eq!(control_for_key(Key::Escape), None);
    }

    #[test]
    fn mouse_keeps_last_button_and_drag_position() {
        let mut mouse = MouseState::default();
        assert!(mouse.record(Some(MouseButton::Left), Some((10.0, 20.0))));
        // Motion without a held button is not tracked.
        assert!(!mouse.record(None, Some((50.0, 50.0))));
        assert_eq!(mouse.button, Some(MouseButton::Left));
        assert_eq!(mouse.position, Some((10.0, 20.0)));
    }
}
