use std::collections::{HashMap, HashSet};

use super::frame::InputFrame;
use super::types::{
    ButtonState, InputEvent, Key, MouseButton, PointerButtonEvent, TouchEvent, TouchId, TouchPhase,
};

/// Current input state for a single window.
///
/// Holds "is down" information plus pointer and touch positions. Transitions
/// are written to the `InputFrame` passed to [`InputState::apply_event`].
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,

    pub buttons_down: HashSet<MouseButton>,

    /// Active touches and their latest position in logical pixels.
    pub touches: HashMap<TouchId, (f32, f32)>,
}

impl InputState {
    /// Applies a platform-agnostic event and records transitions in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    self.release_all(frame);
                }
            }

            InputEvent::PointerMoved { x, y } => self.pointer_pos = Some((*x, *y)),

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { key, state, repeat } => match state {
                ButtonState::Pressed => {
                    if self.keys_down.insert(*key) && !*repeat {
                        frame.keys_pressed.insert(*key);
                    }
                }
                ButtonState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },

            InputEvent::PointerButton(PointerButtonEvent { button, state, pos }) => {
                if pos.is_some() {
                    self.pointer_pos = *pos;
                }
                match state {
                    ButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    ButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }

            InputEvent::Touch(TouchEvent { id, phase, x, y }) => match phase {
                TouchPhase::Started => {
                    if self.touches.insert(*id, (*x, *y)).is_none() {
                        frame.touches_started.push(*id);
                    }
                }
                TouchPhase::Moved => {
                    if let Some(pos) = self.touches.get_mut(id) {
                        *pos = (*x, *y);
                    }
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {
                    if self.touches.remove(id).is_some() {
                        frame.touches_ended.insert(*id, (*x, *y));
                    }
                }
            },
        }

        frame.events.push(ev);
    }

    /// Releases every held key, button and touch.
    ///
    /// Used on focus loss: the matching release events never arrive, and
    /// anything waiting on a release would otherwise wait forever.
    fn release_all(&mut self, frame: &mut InputFrame) {
        frame.keys_released.extend(self.keys_down.drain());
        frame.buttons_released.extend(self.buttons_down.drain());
        frame.touches_ended.extend(self.touches.drain());
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    #[inline]
    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    #[inline]
    pub fn touch_position(&self, id: TouchId) -> Option<(f32, f32)> {
        self.touches.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(id: TouchId, phase: TouchPhase, x: f32, y: f32) -> InputEvent {
        InputEvent::Touch(TouchEvent { id, phase, x, y })
    }

    fn button(state: ButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            pos: Some((x, y)),
        })
    }

    #[test]
    fn key_press_is_recorded_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let press = |repeat| InputEvent::Key { key: Key::A, state: ButtonState::Pressed, repeat };

        state.apply_event(&mut frame, press(false));
        assert!(frame.key_just_pressed(Key::A));

        frame.clear();
        state.apply_event(&mut frame, press(true));
        assert!(!frame.key_just_pressed(Key::A));
        assert!(state.key_down(Key::A));
    }

    #[test]
    fn button_transitions_track_pointer() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, button(ButtonState::Pressed, 3.0, 4.0));
        assert!(frame.button_just_pressed(MouseButton::Left));
        assert_eq!(state.pointer_pos, Some((3.0, 4.0)));

        frame.clear();
        state.apply_event(&mut frame, button(ButtonState::Released, 5.0, 6.0));
        assert!(frame.button_just_released(MouseButton::Left));
        assert!(!state.button_down(MouseButton::Left));
    }

    #[test]
    fn button_without_position_keeps_last_pointer() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let unplaced = |state| {
            InputEvent::PointerButton(PointerButtonEvent { button: MouseButton::Left, state, pos: None })
        };

        state.apply_event(&mut frame, unplaced(ButtonState::Pressed));
        assert!(state.button_down(MouseButton::Left));
        assert_eq!(state.pointer_pos, None);

        state.apply_event(&mut frame, InputEvent::PointerMoved { x: 2.0, y: 3.0 });
        state.apply_event(&mut frame, unplaced(ButtonState::Released));
        assert_eq!(state.pointer_pos, Some((2.0, 3.0)));
    }

    #[test]
    fn touch_lifecycle() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, touch(7, TouchPhase::Started, 1.0, 1.0));
        assert_eq!(frame.touches_started, vec![7]);

        frame.clear();
        state.apply_event(&mut frame, touch(7, TouchPhase::Moved, 9.0, 2.0));
        assert_eq!(state.touch_position(7), Some((9.0, 2.0)));
        assert!(frame.touches_started.is_empty());

        state.apply_event(&mut frame, touch(7, TouchPhase::Ended, 10.0, 3.0));
        assert!(frame.touch_just_released(7));
        assert_eq!(frame.touches_ended.get(&7), Some(&(10.0, 3.0)));
        assert_eq!(state.touch_position(7), None);
    }

    #[test]
    fn moves_for_unknown_touches_are_ignored() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, touch(1, TouchPhase::Moved, 1.0, 1.0));
        state.apply_event(&mut frame, touch(1, TouchPhase::Ended, 1.0, 1.0));
        assert!(state.touches.is_empty());
        assert!(frame.touches_ended.is_empty());
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, button(ButtonState::Pressed, 0.0, 0.0));
        state.apply_event(&mut frame, touch(2, TouchPhase::Started, 5.0, 5.0));
        frame.clear();

        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(frame.button_just_released(MouseButton::Left));
        assert!(frame.touch_just_released(2));
        assert!(state.buttons_down.is_empty());
        assert!(state.touches.is_empty());
    }
}
