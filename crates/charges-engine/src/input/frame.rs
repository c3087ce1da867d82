use std::collections::{HashMap, HashSet};

use super::types::{InputEvent, Key, MouseButton, TouchId};

/// Per-frame input transitions.
///
/// `InputState` answers "what is down right now"; `InputFrame` answers "what
/// changed since the last frame". The runtime clears it after every frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys pressed this frame (auto-repeat excluded).
    pub keys_pressed: HashSet<Key>,

    /// Keys released this frame.
    pub keys_released: HashSet<Key>,

    /// Mouse buttons pressed this frame.
    pub buttons_pressed: HashSet<MouseButton>,

    /// Mouse buttons released this frame.
    pub buttons_released: HashSet<MouseButton>,

    /// Touches that started this frame, in arrival order.
    pub touches_started: Vec<TouchId>,

    /// Touches that ended or were cancelled this frame, with their final
    /// position in logical pixels.
    pub touches_ended: HashMap<TouchId, (f32, f32)>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.touches_started.clear();
        self.touches_ended.clear();
    }

    #[inline]
    pub fn key_just_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    #[inline]
    pub fn button_just_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    #[inline]
    pub fn button_just_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    #[inline]
    pub fn touch_just_released(&self, id: TouchId) -> bool {
        self.touches_ended.contains_key(&id)
    }
}
