//! Keyboard input adapter
//!
//! Maps key codes to controller state. Axis keys add their modifier on press
//! and subtract it on release, so opposing keys held together cancel out.
//! Button keys set their flag on press and clear it on release.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use crate::sim::InputState;

/// Key code reported by hosts while an IME is composing
pub const IME_PROCESS_KEY: u32 = 229;

/// Raw key event from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyEvent {
    pub code: u32,
    /// Auto-repeat from a held key
    pub repeat: bool,
    pub is_composing: bool,
}

impl KeyEvent {
    pub fn new(code: u32) -> Self {
        Self {
            code,
            ..Default::default()
        }
    }

    pub fn repeated(code: u32) -> Self {
        Self {
            code,
            repeat: true,
            ..Default::default()
        }
    }
}

/// Controller axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    MoveX,
    MoveY,
}

/// Axis key: which axis and which direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisBinding {
    pub key: String,
    pub axis: Axis,
    pub modifier: i8,
}

impl AxisBinding {
    pub fn new(key: &str, axis: Axis, modifier: i8) -> Self {
        Self {
            key: key.to_string(),
            axis,
            modifier,
        }
    }
}

/// Button key target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    Action1,
}

/// Key code -> controller mappings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub buttons: BTreeMap<u32, ButtonAction>,
    pub axes: BTreeMap<u32, AxisBinding>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let buttons = BTreeMap::from([(32, ButtonAction::Action1)]);
        let axes = BTreeMap::from([
            (68, AxisBinding::new("right", Axis::MoveX, 1)),
            (65, AxisBinding::new("left", Axis::MoveX, -1)),
            (87, AxisBinding::new("up", Axis::MoveY, -1)),
            (83, AxisBinding::new("down", Axis::MoveY, 1)),
        ]);
        Self { buttons, axes }
    }
}

/// Applies key events to an [`InputState`]
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    /// Returns true if the key was bound
    pub fn key_down(&self, state: &mut InputState, event: &KeyEvent) -> bool {
        // Holding a key must not count twice
        if event.repeat || event.is_composing || event.code == IME_PROCESS_KEY {
            return false;
        }
        self.apply(state, event.code, true)
    }

    /// Returns true if the key was bound
    pub fn key_up(&self, state: &mut InputState, event: &KeyEvent) -> bool {
        if event.is_composing || event.code == IME_PROCESS_KEY {
            return false;
        }
        self.apply(state, event.code, false)
    }

    fn apply(&self, state: &mut InputState, code: u32, pressed: bool) -> bool {
        let mut handled = false;

        if let Some(binding) = self.bindings.axes.get(&code) {
            let delta = if pressed {
                binding.modifier
            } else {
                -binding.modifier
            };
            let (name, value) = match binding.axis {
                Axis::MoveX => {
                    state.move_x = state.move_x.saturating_add(delta);
                    ("move_x", state.move_x)
                }
                Axis::MoveY => {
                    state.move_y = state.move_y.saturating_add(delta);
                    ("move_y", state.move_y)
                }
            };
            log::debug!("input_handler[axis:{} state:{}]", name, value);
            handled = true;
        }

        if let Some(ButtonAction::Action1) = self.bindings.buttons.get(&code) {
            state.action_1 = pressed;
            log::debug!("input_handler[button:action_1 state:{}]", state.action_1);
            handled = true;
        }

        handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPACE: u32 = 32;
    const RIGHT: u32 = 68;
    const LEFT: u32 = 65;
    const UP: u32 = 87;
    const DOWN: u32 = 83;

    #[test]
    fn test_axis_press_release() {
        let handler = InputHandler::default();
        let mut state = InputState::default();
        assert!(handler.key_down(&mut state, &KeyEvent::new(RIGHT)));
        assert_eq!(state.move_x, 1);
        assert!(handler.key_up(&mut state, &KeyEvent::new(RIGHT)));
        assert_eq!(state.move_x, 0);

        handler.key_down(&mut state, &KeyEvent::new(UP));
        assert_eq!(state.move_y, -1);
        handler.key_up(&mut state, &KeyEvent::new(UP));
        handler.key_down(&mut state, &KeyEvent::new(DOWN));
        assert_eq!(state.move_y, 1);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let handler = InputHandler::default();
        let mut state = InputState::default();
        handler.key_down(&mut state, &KeyEvent::new(RIGHT));
        handler.key_down(&mut state, &KeyEvent::new(LEFT));
        assert_eq!(state.move_x, 0);
        handler.key_up(&mut state, &KeyEvent::new(RIGHT));
        assert_eq!(state.move_x, -1);
    }

    #[test]
    fn test_repeat_ignored_on_key_down() {
        let handler = InputHandler::default();
        let mut state = InputState::default();
        handler.key_down(&mut state, &KeyEvent::new(RIGHT));
        assert!(!handler.key_down(&mut state, &KeyEvent::repeated(RIGHT)));
        assert!(!handler.key_down(&mut state, &KeyEvent::repeated(RIGHT)));
        assert_eq!(state.move_x, 1);
        // Release still applies even if flagged as repeat
        assert!(handler.key_up(&mut state, &KeyEvent::repeated(RIGHT)));
        assert_eq!(state.move_x, 0);
    }

    #[test]
    fn test_composition_ignored() {
        let handler = InputHandler::default();
        let mut state = InputState::default();
        let composing = KeyEvent {
            code: RIGHT,
            is_composing: true,
            ..Default::default()
        };
        assert!(!handler.key_down(&mut state, &composing));
        assert!(!handler.key_up(&mut state, &composing));
        assert!(!handler.key_down(&mut state, &KeyEvent::new(IME_PROCESS_KEY)));
        assert_eq!(state, InputState::default());
    }

    #[test]
    fn test_button_set_clear() {
        let handler = InputHandler::default();
        let mut state = InputState::default();
        handler.key_down(&mut state, &KeyEvent::new(SPACE));
        assert!(state.action_1);
        handler.key_up(&mut state, &KeyEvent::new(SPACE));
        assert!(!state.action_1);
    }

    #[test]
    fn test_unknown_key_ignored() {
        let handler = InputHandler::default();
        let mut state = InputState::default();
        assert!(!handler.key_down(&mut state, &KeyEvent::new(13)));
        assert!(!handler.key_up(&mut state, &KeyEvent::new(13)));
        assert_eq!(state, InputState::default());
    }

    #[test]
    fn test_custom_bindings() {
        let mut bindings = KeyBindings::default();
        bindings
            .axes
            .insert(39, AxisBinding::new("arrow_right", Axis::MoveX, 1));
        let handler = InputHandler::new(bindings);
        let mut state = InputState::default();
        handler.key_down(&mut state, &KeyEvent::new(39));
        assert_eq!(state.move_x, 1);
    }
}
