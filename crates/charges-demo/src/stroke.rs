//! Drag gestures.
//!
//! A [`Stroke`] follows one pointer from press to release: where it started,
//! where it is now, whether it has been released and which sprite it carries.
//! Devices plug in through [`StrokeSource`].

use std::fmt;

use charges_engine::input::{InputFrame, InputState, MouseButton, TouchId};

use crate::sprite::SpriteId;

/// Input snapshot for one frame, mapped to canvas pixels.
#[derive(Clone, Copy)]
pub struct PointerInput<'a> {
    pub state: &'a InputState,
    pub frame: &'a InputFrame,
    /// Window logical pixels per canvas pixel.
    pub zoom: f32,
}

impl PointerInput<'_> {
    pub fn to_canvas(&self, (x, y): (f32, f32)) -> (i32, i32) {
        ((x / self.zoom).floor() as i32, (y / self.zoom).floor() as i32)
    }
}

/// An input device that can drive a stroke.
pub trait StrokeSource: fmt::Debug {
    /// Current position in canvas pixels, if the device has one.
    fn position(&self, input: &PointerInput<'_>) -> Option<(i32, i32)>;

    /// Whether the device was released during this frame.
    fn is_just_released(&self, input: &PointerInput<'_>) -> bool;

    /// Whether the device is still down once this frame's events are applied.
    fn is_held(&self, input: &PointerInput<'_>) -> bool;
}

/// The left mouse button.
#[derive(Debug, Default, Clone, Copy)]
pub struct MouseStrokeSource;

impl StrokeSource for MouseStrokeSource {
    fn position(&self, input: &PointerInput<'_>) -> Option<(i32, i32)> {
        input.state.pointer_pos.map(|p| input.to_canvas(p))
    }

    fn is_just_released(&self, input: &PointerInput<'_>) -> bool {
        input.frame.button_just_released(MouseButton::Left)
    }

    fn is_held(&self, input: &PointerInput<'_>) -> bool {
        input.state.button_down(MouseButton::Left)
    }
}

/// One touch point.
#[derive(Debug, Clone, Copy)]
pub struct TouchStrokeSource {
    pub id: TouchId,
}

impl StrokeSource for TouchStrokeSource {
    fn position(&self, input: &PointerInput<'_>) -> Option<(i32, i32)> {
        input
            .state
            .touch_position(self.id)
            .or_else(|| input.frame.touches_ended.get(&self.id).copied())
            .map(|p| input.to_canvas(p))
    }

    /// A touch the platform no longer knows about counts as released, so a
    /// stroke whose end event was lost still finishes.
    fn is_just_released(&self, input: &PointerInput<'_>) -> bool {
        input.frame.touch_just_released(self.id) || !self.is_held(input)
    }

    fn is_held(&self, input: &PointerInput<'_>) -> bool {
        input.state.touch_position(self.id).is_some()
    }
}

/// One drag gesture.
#[derive(Debug)]
pub struct Stroke {
    source: Box<dyn StrokeSource>,
    origin: (i32, i32),
    current: (i32, i32),
    released: bool,
    dragging: Option<SpriteId>,
}

impl Stroke {
    /// Starts a stroke at the source's current position, or returns `None`
    /// when the source has no position yet.
    ///
    /// Call this in the frame the press arrived. Releases in that frame only
    /// count if they came after the press, which is the case exactly when the
    /// device is no longer held. Do not [`update`](Self::update) the stroke
    /// again in the same frame.
    pub fn new(source: Box<dyn StrokeSource>, input: &PointerInput<'_>) -> Option<Self> {
        let start = source.position(input)?;
        let released = !source.is_held(input);
        Some(Self {
            source,
            origin: start,
            current: start,
            released,
            dragging: None,
        })
    }

    /// Samples the source. Once released the stroke is frozen at the last
    /// sampled position.
    pub fn update(&mut self, input: &PointerInput<'_>) {
        if self.released {
            return;
        }
        if self.source.is_just_released(input) {
            self.released = true;
            return;
        }
        if let Some(pos) = self.source.position(input) {
            self.current = pos;
        }
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn position(&self) -> (i32, i32) {
        self.current
    }

    /// Current position minus origin.
    pub fn position_diff(&self) -> (i32, i32) {
        (self.current.0 - self.origin.0, self.current.1 - self.origin.1)
    }

    pub fn dragging_object(&self) -> Option<SpriteId> {
        self.dragging
    }

    pub fn set_dragging_object(&mut self, sprite: Option<SpriteId>) {
        self.dragging = sprite;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charges_engine::input::{
        ButtonState, InputEvent, PointerButtonEvent, TouchEvent, TouchPhase,
    };

    #[derive(Default)]
    struct Inputs {
        state: InputState,
        frame: InputFrame,
    }

    impl Inputs {
        fn apply(&mut self, ev: InputEvent) {
            self.state.apply_event(&mut self.frame, ev);
        }

        fn view(&self) -> PointerInput<'_> {
            PointerInput { state: &self.state, frame: &self.frame, zoom: 2.0 }
        }

        fn next_frame(&mut self) {
            self.frame.clear();
        }
    }

    fn mouse(state: ButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            pos: Some((x, y)),
        })
    }

    fn touch(id: TouchId, phase: TouchPhase, x: f32, y: f32) -> InputEvent {
        InputEvent::Touch(TouchEvent { id, phase, x, y })
    }

    #[test]
    fn diff_tracks_current_minus_origin() {
        let mut inputs = Inputs::default();
        inputs.apply(mouse(ButtonState::Pressed, 20.0, 40.0));
        let mut stroke = Stroke::new(Box::new(MouseStrokeSource), &inputs.view()).unwrap();
        assert_eq!(stroke.position(), (10, 20));
        assert_eq!(stroke.position_diff(), (0, 0));

        for (i, (x, y)) in [(30.0, 40.0), (31.0, 10.0), (0.0, 0.0)].into_iter().enumerate() {
            inputs.next_frame();
            inputs.apply(InputEvent::PointerMoved { x, y });
            stroke.update(&inputs.view());
            let (cx, cy) = stroke.position();
            assert_eq!(stroke.position_diff(), (cx - 10, cy - 20), "frame {i}");
        }
        assert_eq!(stroke.position_diff(), (-10, -20));
    }

    #[test]
    fn release_freezes_last_sampled_position() {
        let mut inputs = Inputs::default();
        inputs.apply(mouse(ButtonState::Pressed, 0.0, 0.0));
        let mut stroke = Stroke::new(Box::new(MouseStrokeSource), &inputs.view()).unwrap();

        inputs.next_frame();
        inputs.apply(InputEvent::PointerMoved { x: 10.0, y: 10.0 });
        stroke.update(&inputs.view());

        inputs.next_frame();
        inputs.apply(mouse(ButtonState::Released, 50.0, 50.0));
        stroke.update(&inputs.view());
        assert!(stroke.is_released());
        assert_eq!(stroke.position(), (5, 5));

        inputs.next_frame();
        inputs.apply(InputEvent::PointerMoved { x: 90.0, y: 90.0 });
        stroke.update(&inputs.view());
        assert_eq!(stroke.position(), (5, 5));
    }

    #[test]
    fn touch_stroke_follows_its_own_id() {
        let mut inputs = Inputs::default();
        inputs.apply(touch(1, TouchPhase::Started, 4.0, 4.0));
        inputs.apply(touch(2, TouchPhase::Started, 100.0, 100.0));
        let mut stroke = Stroke::new(Box::new(TouchStrokeSource { id: 1 }), &inputs.view()).unwrap();

        inputs.next_frame();
        inputs.apply(touch(2, TouchPhase::Moved, 0.0, 0.0));
        inputs.apply(touch(1, TouchPhase::Moved, 24.0, 8.0));
        stroke.update(&inputs.view());
        assert_eq!(stroke.position_diff(), (10, 2));

        inputs.next_frame();
        inputs.apply(touch(2, TouchPhase::Ended, 0.0, 0.0));
        stroke.update(&inputs.view());
        assert!(!stroke.is_released());

        inputs.next_frame();
        inputs.apply(touch(1, TouchPhase::Cancelled, 24.0, 8.0));
        stroke.update(&inputs.view());
        assert!(stroke.is_released());
    }

    #[test]
    fn vanished_touch_counts_as_released() {
        let mut inputs = Inputs::default();
        inputs.apply(touch(9, TouchPhase::Started, 6.0, 6.0));
        let mut stroke = Stroke::new(Box::new(TouchStrokeSource { id: 9 }), &inputs.view()).unwrap();
        assert!(!stroke.is_released());

        inputs.next_frame();
        inputs.state.touches.remove(&9);
        stroke.update(&inputs.view());
        assert!(stroke.is_released());
        assert_eq!(stroke.position(), (3, 3));
    }

    #[test]
    fn no_stroke_without_a_position() {
        let inputs = Inputs::default();
        assert!(Stroke::new(Box::new(MouseStrokeSource), &inputs.view()).is_none());
        assert!(Stroke::new(Box::new(TouchStrokeSource { id: 9 }), &inputs.view()).is_none());
    }

    #[test]
    fn press_frame_release_counts_only_after_the_press() {
        let mut inputs = Inputs::default();
        inputs.apply(mouse(ButtonState::Pressed, 0.0, 0.0));
        inputs.next_frame();

        // Release of the previous click, then a new press.
        inputs.apply(mouse(ButtonState::Released, 0.0, 0.0));
        inputs.apply(mouse(ButtonState::Pressed, 8.0, 8.0));
        let stroke = Stroke::new(Box::new(MouseStrokeSource), &inputs.view()).unwrap();
        assert!(!stroke.is_released());

        inputs.next_frame();
        inputs.apply(mouse(ButtonState::Pressed, 8.0, 8.0));
        inputs.apply(mouse(ButtonState::Released, 8.0, 8.0));
        let stroke = Stroke::new(Box::new(MouseStrokeSource), &inputs.view()).unwrap();
        assert!(stroke.is_released());
    }

    #[test]
    fn dragging_object_round_trips() {
        let inputs = Inputs::default();
        let mut stroke = Stroke::new(Box::new(MouseStrokeSource), &inputs.view()).unwrap();
        assert_eq!(stroke.dragging_object(), None);
        stroke.set_dragging_object(Some(SpriteId(3)));
        assert_eq!(stroke.dragging_object(), Some(SpriteId(3)));
    }
}
