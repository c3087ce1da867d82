//! Per-frame game state: sprites in render order plus active strokes.

use std::collections::HashMap;

use charges_engine::image::{Bitmap, ImageStore};
use charges_engine::input::{Key, MouseButton};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::DemoConfig;
use crate::sprite::{ChargeImages, Sprite, SpriteId};
use crate::stroke::{MouseStrokeSource, PointerInput, Stroke, StrokeSource, TouchStrokeSource};

/// Charge added or removed per key press, in µC.
pub const CHARGE_STEP: f32 = 0.1;

/// Key bindings.
pub const ADD_KEY: Key = Key::A;
pub const CHARGE_UP_KEY: Key = Key::Digit0;
pub const CHARGE_DOWN_KEY: Key = Key::Digit9;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct StrokeId(u64);

pub struct Game {
    /// Back to front.
    sprites: Vec<Sprite>,
    strokes: HashMap<StrokeId, Stroke>,
    chosen: Option<SpriteId>,
    images: ImageStore,
    charge_images: ChargeImages,
    play_area: (i32, i32),
    rng: StdRng,
    next_sprite: u32,
    next_stroke: u64,
}

impl Game {
    /// Creates the game with `config.initial_sprites` randomly placed sprites
    /// carrying a random charge in `[0, 1)`.
    pub fn new(config: &DemoConfig, images: ImageStore, charge_images: ChargeImages) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut game = Self {
            sprites: Vec::with_capacity(config.initial_sprites),
            strokes: HashMap::new(),
            chosen: None,
            images,
            charge_images,
            play_area: config.play_area(),
            rng,
            next_sprite: 1,
            next_stroke: 0,
        };

        for _ in 0..config.initial_sprites {
            let charge = game.rng.random::<f32>();
            game.spawn(charge);
        }
        game
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.values()
    }

    pub fn chosen(&self) -> Option<&Sprite> {
        self.chosen.and_then(|id| self.sprite(id))
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.id == id)
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn play_area(&self) -> (i32, i32) {
        self.play_area
    }

    /// Bitmap currently shown for `sprite`.
    pub fn bitmap(&self, sprite: &Sprite) -> Option<&Bitmap> {
        self.images.get(sprite.image)
    }

    fn bitmap_size(&self, sprite: &Sprite) -> (i32, i32) {
        self.bitmap(sprite).map_or((0, 0), Bitmap::size_i32)
    }

    /// Runs one frame of input handling.
    pub fn update(&mut self, input: &PointerInput<'_>) {
        let mut started = Vec::new();
        if input.frame.button_just_pressed(MouseButton::Left) {
            started.extend(self.begin_stroke(Box::new(MouseStrokeSource), input));
        }
        for &id in &input.frame.touches_started {
            started.extend(self.begin_stroke(Box::new(TouchStrokeSource { id }), input));
        }

        if input.frame.key_just_pressed(ADD_KEY) {
            self.add_sprite();
        }
        if input.frame.key_just_pressed(CHARGE_UP_KEY) {
            self.adjust_charge(CHARGE_STEP);
        }
        if input.frame.key_just_pressed(CHARGE_DOWN_KEY) {
            self.adjust_charge(-CHARGE_STEP);
        }

        let (w, h) = self.play_area;
        let nudges = [
            (Key::ArrowUp, 0, -h / 10),
            (Key::ArrowDown, 0, h / 10),
            (Key::ArrowLeft, -w / 10, 0),
            (Key::ArrowRight, w / 10, 0),
        ];
        for (key, dx, dy) in nudges {
            if input.frame.key_just_pressed(key) {
                self.nudge_chosen(dx, dy);
            }
        }

        self.update_strokes(input, &started);

        for s in &mut self.sprites {
            s.image = self.charge_images.for_charge(s.charge);
        }
    }

    /// Topmost sprite with a visible pixel at `(x, y)`.
    pub fn sprite_at(&self, x: i32, y: i32) -> Option<SpriteId> {
        self.sprites
            .iter()
            .rev()
            .find(|s| self.bitmap(s).is_some_and(|bmp| s.contains(bmp, x, y)))
            .map(|s| s.id)
    }

    /// Appends a neutral sprite at a random spot in the play area.
    pub fn add_sprite(&mut self) -> SpriteId {
        let id = self.spawn(0.0);
        log::debug!("added sprite {id}, {} total", self.sprites.len());
        id
    }

    /// Adds `delta` to the charge of every chosen sprite.
    pub fn adjust_charge(&mut self, delta: f32) {
        for s in self.sprites.iter_mut().filter(|s| s.chosen) {
            s.charge += delta;
            log::debug!("{} charge now {:.1} µC", s.name, s.charge);
        }
    }

    /// Shifts chosen sprites without clamping them to the play area.
    pub fn nudge_chosen(&mut self, dx: i32, dy: i32) {
        for s in self.sprites.iter_mut().filter(|s| s.chosen) {
            s.x += dx;
            s.y += dy;
        }
    }

    fn spawn(&mut self, charge: f32) -> SpriteId {
        let image = self.charge_images.for_charge(charge);
        let (w, h) = self.images.get(image).map_or((0, 0), Bitmap::size_i32);
        let x = self.rng.random_range(0..(self.play_area.0 - w).max(1));
        let y = self.rng.random_range(0..(self.play_area.1 - h).max(1));

        let id = SpriteId(self.next_sprite);
        self.next_sprite += 1;
        self.sprites.push(Sprite {
            id,
            name: format!("Q{}", self.sprites.len() + 1),
            image,
            x,
            y,
            charge,
            chosen: false,
        });
        id
    }

    fn begin_stroke(
        &mut self,
        source: Box<dyn StrokeSource>,
        input: &PointerInput<'_>,
    ) -> Option<StrokeId> {
        let Some(mut stroke) = Stroke::new(source, input) else {
            log::debug!("press without a pointer position ignored");
            return None;
        };
        let (x, y) = stroke.position();
        let picked = self.sprite_at(x, y);
        stroke.set_dragging_object(picked);

        let id = StrokeId(self.next_stroke);
        self.next_stroke += 1;
        self.strokes.insert(id, stroke);

        for s in &mut self.sprites {
            s.chosen = Some(s.id) == picked;
        }
        self.chosen = picked;
        Some(id)
    }

    /// Samples every stroke except those `started` this frame, then commits
    /// the released ones.
    fn update_strokes(&mut self, input: &PointerInput<'_>, started: &[StrokeId]) {
        let mut released = Vec::new();
        for (id, stroke) in &mut self.strokes {
            if !started.contains(id) {
                stroke.update(input);
            }
            if stroke.is_released() {
                released.push(*id);
            }
        }

        for id in released {
            let Some(stroke) = self.strokes.remove(&id) else { continue };
            if let Some(sprite) = stroke.dragging_object() {
                self.commit_drag(sprite, stroke.position_diff());
            }
        }
    }

    /// Applies a finished drag and moves the sprite to the front.
    fn commit_drag(&mut self, id: SpriteId, (dx, dy): (i32, i32)) {
        let Some(index) = self.sprites.iter().position(|s| s.id == id) else {
            return;
        };
        let mut sprite = self.sprites.remove(index);
        let size = self.bitmap_size(&sprite);
        sprite.move_by(dx, dy, size, self.play_area);
        log::debug!("dropped {} at ({}, {})", sprite.name, sprite.x, sprite.y);
        self.sprites.push(sprite);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charges_engine::input::{
        ButtonState, InputEvent, InputFrame, InputState, PointerButtonEvent, TouchEvent, TouchPhase,
    };

    const ZOOM: f32 = 2.0;

    struct Harness {
        game: Game,
        state: InputState,
        frame: InputFrame,
    }

    impl Harness {
        /// Two 10x10 fully opaque sprites: Q1 at (0, 0), Q2 at (100, 100).
        fn new() -> Self {
            let config = DemoConfig { initial_sprites: 0, seed: Some(7), ..DemoConfig::default() };
            let mut images = ImageStore::new();
            let mut solid = || images.insert(Bitmap::from_rgba(10, 10, vec![255; 400]).unwrap());
            let charge_images = ChargeImages { negative: solid(), neutral: solid(), positive: solid() };

            let mut game = Game::new(&config, images, charge_images);
            for (x, y) in [(0, 0), (100, 100)] {
                let id = game.add_sprite();
                let s = game.sprites.iter_mut().find(|s| s.id == id).unwrap();
                s.x = x;
                s.y = y;
            }
            Self { game, state: InputState::default(), frame: InputFrame::default() }
        }

        fn frame(&mut self, events: impl IntoIterator<Item = InputEvent>) {
            self.frame.clear();
            for ev in events {
                self.state.apply_event(&mut self.frame, ev);
            }
            let input = PointerInput { state: &self.state, frame: &self.frame, zoom: ZOOM };
            self.game.update(&input);
        }

        fn names(&self) -> Vec<&str> {
            self.game.sprites().iter().map(|s| s.name.as_str()).collect()
        }

        fn by_name(&self, name: &str) -> &Sprite {
            self.game.sprites().iter().find(|s| s.name == name).unwrap()
        }
    }

    /// Canvas coordinates to window coordinates.
    fn win(x: i32, y: i32) -> (f32, f32) {
        (x as f32 * ZOOM, y as f32 * ZOOM)
    }

    fn mouse(state: ButtonState, (x, y): (i32, i32)) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            pos: Some(win(x, y)),
        })
    }

    fn moved((x, y): (i32, i32)) -> InputEvent {
        let (x, y) = win(x, y);
        InputEvent::PointerMoved { x, y }
    }

    fn touch(id: u64, phase: TouchPhase, (x, y): (i32, i32)) -> InputEvent {
        let (x, y) = win(x, y);
        InputEvent::Touch(TouchEvent { id, phase, x, y })
    }

    fn key(key: Key) -> [InputEvent; 2] {
        [
            InputEvent::Key { key, state: ButtonState::Pressed, repeat: false },
            InputEvent::Key { key, state: ButtonState::Released, repeat: false },
        ]
    }

    #[test]
    fn initial_sprites_are_inside_play_area_with_unit_charge() {
        let config = DemoConfig { initial_sprites: 20, seed: Some(1), ..DemoConfig::default() };
        let mut images = ImageStore::new();
        let mut solid = || images.insert(Bitmap::from_rgba(32, 32, vec![255; 32 * 32 * 4]).unwrap());
        let charge_images = ChargeImages { negative: solid(), neutral: solid(), positive: solid() };
        let game = Game::new(&config, images, charge_images);

        assert_eq!(game.sprites().len(), 20);
        assert_eq!(game.sprites()[0].name, "Q1");
        for s in game.sprites() {
            assert!((0.0..1.0).contains(&s.charge));
            assert!(s.x >= 0 && s.x <= 400 - 32);
            assert!(s.y >= 0 && s.y <= 270 - 32);
        }
    }

    #[test]
    fn picking_prefers_front_and_misses_empty_space() {
        let mut h = Harness::new();
        assert_eq!(h.game.sprite_at(50, 50), None);
        assert_eq!(h.game.sprite_at(10, 10), None);

        let q1 = h.by_name("Q1").id;
        assert_eq!(h.game.sprite_at(5, 5), Some(q1));

        // Overlap Q2 on Q1; Q2 is later in render order.
        let q2 = h.by_name("Q2").id;
        h.game.sprites.iter_mut().find(|s| s.id == q2).unwrap().x = 3;
        h.game.sprites.iter_mut().find(|s| s.id == q2).unwrap().y = 3;
        assert_eq!(h.game.sprite_at(5, 5), Some(q2));
        assert_eq!(h.game.sprite_at(1, 1), Some(q1));
    }

    #[test]
    fn picking_ignores_transparent_pixels() {
        let mut h = Harness::new();
        let mut rgba = vec![0u8; 400];
        rgba[3] = 255;
        let sparse = h.game.images.insert(Bitmap::from_rgba(10, 10, rgba).unwrap());
        h.game.charge_images = ChargeImages { negative: sparse, neutral: sparse, positive: sparse };
        h.frame(Vec::<InputEvent>::new());

        assert!(h.game.sprite_at(0, 0).is_some());
        assert_eq!(h.game.sprite_at(5, 5), None);
    }

    #[test]
    fn press_chooses_exactly_one_sprite() {
        let mut h = Harness::new();
        h.frame([mouse(ButtonState::Pressed, (105, 105))]);
        assert_eq!(h.game.chosen().map(|s| s.name.as_str()), Some("Q2"));
        assert_eq!(h.game.sprites().iter().filter(|s| s.chosen).count(), 1);

        h.frame([mouse(ButtonState::Released, (105, 105)), mouse(ButtonState::Pressed, (5, 5))]);
        assert_eq!(h.game.chosen().map(|s| s.name.as_str()), Some("Q1"));
        assert_eq!(h.game.sprites().iter().filter(|s| s.chosen).count(), 1);

        h.frame([mouse(ButtonState::Released, (5, 5)), mouse(ButtonState::Pressed, (300, 5))]);
        assert!(h.game.chosen().is_none());
        assert!(h.game.sprites().iter().all(|s| !s.chosen));
    }

    #[test]
    fn release_commits_one_move_and_promotes() {
        let mut h = Harness::new();
        h.frame([mouse(ButtonState::Pressed, (2, 2))]);
        h.frame([moved((22, 12))]);

        // Live drag does not move the sprite.
        assert_eq!((h.by_name("Q1").x, h.by_name("Q1").y), (0, 0));
        let stroke = h.game.strokes().next().unwrap();
        assert_eq!(stroke.position_diff(), (20, 10));

        h.frame([mouse(ButtonState::Released, (22, 12))]);
        assert_eq!(h.game.strokes().count(), 0);
        assert_eq!((h.by_name("Q1").x, h.by_name("Q1").y), (20, 10));
        assert_eq!(h.names(), ["Q2", "Q1"]);
        assert_eq!((h.by_name("Q2").x, h.by_name("Q2").y), (100, 100));

        // Further frames do not move it again.
        h.frame([moved((200, 200))]);
        assert_eq!((h.by_name("Q1").x, h.by_name("Q1").y), (20, 10));
    }

    #[test]
    fn release_and_new_press_in_one_frame_keeps_the_new_drag() {
        let mut h = Harness::new();
        h.frame([mouse(ButtonState::Pressed, (105, 105))]);
        h.frame([mouse(ButtonState::Released, (105, 105)), mouse(ButtonState::Pressed, (2, 2))]);
        assert!(h.state.button_down(MouseButton::Left));
        assert_eq!(h.game.strokes().count(), 1);
        assert_eq!(h.game.chosen().map(|s| s.name.as_str()), Some("Q1"));

        h.frame([moved((32, 32))]);
        assert_eq!(h.game.strokes().next().unwrap().position_diff(), (30, 30));

        h.frame([mouse(ButtonState::Released, (32, 32))]);
        assert_eq!(h.game.strokes().count(), 0);
        assert_eq!((h.by_name("Q1").x, h.by_name("Q1").y), (30, 30));
        assert_eq!(h.names(), ["Q2", "Q1"]);
    }

    #[test]
    fn click_within_one_frame_commits_in_place() {
        let mut h = Harness::new();
        h.frame([mouse(ButtonState::Pressed, (5, 5)), mouse(ButtonState::Released, (5, 5))]);
        assert_eq!(h.game.strokes().count(), 0);
        assert_eq!(h.game.chosen().map(|s| s.name.as_str()), Some("Q1"));
        assert_eq!((h.by_name("Q1").x, h.by_name("Q1").y), (0, 0));
        assert_eq!(h.names(), ["Q2", "Q1"]);
    }

    #[test]
    fn press_before_any_pointer_position_is_ignored() {
        let mut h = Harness::new();
        h.frame([InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: ButtonState::Pressed,
            pos: None,
        })]);
        assert_eq!(h.game.strokes().count(), 0);
        assert!(h.game.chosen().is_none());
    }

    #[test]
    fn drop_is_clamped_to_play_area() {
        let mut h = Harness::new();
        h.frame([mouse(ButtonState::Pressed, (105, 105))]);
        h.frame([moved((399, 299))]);
        h.frame([mouse(ButtonState::Released, (399, 299))]);
        assert_eq!((h.by_name("Q2").x, h.by_name("Q2").y), (390, 260));
    }

    #[test]
    fn empty_press_moves_nothing() {
        let mut h = Harness::new();
        h.frame([mouse(ButtonState::Pressed, (50, 50))]);
        h.frame([moved((60, 60))]);
        h.frame([mouse(ButtonState::Released, (60, 60))]);
        assert_eq!(h.names(), ["Q1", "Q2"]);
        assert_eq!((h.by_name("Q1").x, h.by_name("Q1").y), (0, 0));
        assert_eq!(h.game.strokes().count(), 0);
    }

    #[test]
    fn mouse_and_touch_strokes_coexist() {
        let mut h = Harness::new();
        h.frame([
            mouse(ButtonState::Pressed, (5, 5)),
            touch(4, TouchPhase::Started, (105, 105)),
        ]);
        assert_eq!(h.game.strokes().count(), 2);
        // The later press wins the chosen flag.
        assert_eq!(h.game.chosen().map(|s| s.name.as_str()), Some("Q2"));

        h.frame([moved((15, 5)), touch(4, TouchPhase::Moved, (105, 125))]);
        h.frame([touch(4, TouchPhase::Ended, (105, 125))]);
        assert_eq!(h.game.strokes().count(), 1);
        assert_eq!((h.by_name("Q2").x, h.by_name("Q2").y), (100, 120));

        h.frame([mouse(ButtonState::Released, (15, 5))]);
        assert_eq!(h.game.strokes().count(), 0);
        assert_eq!((h.by_name("Q1").x, h.by_name("Q1").y), (10, 0));
        assert_eq!(h.names(), ["Q2", "Q1"]);
    }

    #[test]
    fn charge_keys_only_touch_chosen_sprite() {
        let mut h = Harness::new();
        h.frame(key(CHARGE_UP_KEY));
        assert!(h.game.sprites().iter().all(|s| s.charge == 0.0));

        h.frame([mouse(ButtonState::Pressed, (5, 5)), mouse(ButtonState::Released, (5, 5))]);
        h.frame(key(CHARGE_UP_KEY));
        h.frame(key(CHARGE_UP_KEY));
        h.frame(key(CHARGE_DOWN_KEY));
        assert!((h.by_name("Q1").charge - 0.1).abs() < 1e-6);
        assert_eq!(h.by_name("Q2").charge, 0.0);
        assert_eq!(h.by_name("Q1").image, h.game.charge_images.positive);
        assert_eq!(h.by_name("Q2").image, h.game.charge_images.neutral);
    }

    #[test]
    fn add_key_appends_neutral_sprite() {
        let mut h = Harness::new();
        h.frame(key(ADD_KEY));
        assert_eq!(h.names(), ["Q1", "Q2", "Q3"]);
        let q3 = h.by_name("Q3");
        assert_eq!(q3.charge, 0.0);
        assert!(!q3.chosen);
        assert!(q3.x >= 0 && q3.x <= 390 && q3.y >= 0 && q3.y <= 260);
    }

    #[test]
    fn arrows_nudge_chosen_without_clamping() {
        let mut h = Harness::new();
        h.frame([mouse(ButtonState::Pressed, (5, 5)), mouse(ButtonState::Released, (5, 5))]);
        h.frame(key(Key::ArrowLeft));
        h.frame(key(Key::ArrowUp));
        assert_eq!((h.by_name("Q1").x, h.by_name("Q1").y), (-40, -27));
        h.frame(key(Key::ArrowRight));
        h.frame(key(Key::ArrowDown));
        assert_eq!((h.by_name("Q1").x, h.by_name("Q1").y), (0, 0));
        assert_eq!((h.by_name("Q2").x, h.by_name("Q2").y), (100, 100));
    }
}
