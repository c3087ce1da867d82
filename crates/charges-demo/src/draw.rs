//! Scene construction.
//!
//! The frame is split in two lists: `main` holds the help bar, resting
//! sprites and every text overlay; `previews` holds only the translucent
//! bitmaps of dragged sprites and is rendered last so they float above the
//! labels.

use std::collections::HashSet;

use charges_engine::coords::{Rect, Vec2};
use charges_engine::paint::Color;
use charges_engine::scene::shapes::text::TextFormat;
use charges_engine::scene::{DrawList, ZIndex};
use charges_engine::text::{FontId, FontSystem};

use crate::game::Game;
use crate::physics;
use crate::sprite::{Sprite, SpriteId};

const HELP: ZIndex = ZIndex(0);
const SPRITES: ZIndex = ZIndex(1);
const LABELS: ZIndex = ZIndex(2);

const HELP_SIZE: f32 = 9.0;
const LABEL_SIZE: f32 = 8.0;
const STATS_SIZE: f32 = 10.0;

const CHOSEN_BRIGHTNESS: f32 = 2.0;
const PREVIEW_ALPHA: f32 = 0.5;

/// Gap between connector dots, canvas pixels.
const DOT_SPACING: f32 = 6.0;
const DOT_SIZE: f32 = 2.0;

pub const HELP_LINES: [&str; 2] = [
    "LMB to select charge, drag to move, '0' to increase charge,",
    "'9' to decrease charge, 'A' to add a new charge.",
];

fn red() -> Color {
    Color::from_rgba_u8(0xff, 0x00, 0x00, 0xff)
}

#[derive(Default)]
pub struct SceneLists {
    pub main: DrawList,
    pub previews: DrawList,
}

impl SceneLists {
    pub fn clear(&mut self) {
        self.main.clear();
        self.previews.clear();
    }
}

/// Text layout inputs.
pub struct Fonts<'a> {
    pub system: &'a FontSystem,
    pub font: FontId,
}

impl Fonts<'_> {
    /// Top-left origin for text whose baseline starts at `(x, baseline)`.
    fn at_baseline(&self, x: f32, baseline: f32, size: f32) -> Vec2 {
        Vec2::new(x, baseline - self.system.ascent(self.font, size))
    }

    fn text(&self, list: &mut DrawList, text: impl Into<String>, size: f32, color: Color, origin: Vec2) {
        list.push_text(LABELS, text, TextFormat::new(self.font, size, color), origin);
    }
}

/// Records the whole frame into `lists`, which are cleared first.
pub fn build_scene(game: &Game, fonts: &Fonts<'_>, canvas: (i32, i32), lists: &mut SceneLists) {
    lists.clear();

    draw_help(fonts, canvas, game.play_area(), &mut lists.main);

    let dragging: HashSet<SpriteId> = game.strokes().filter_map(|s| s.dragging_object()).collect();
    let chosen = game.chosen().filter(|c| !dragging.contains(&c.id));

    for sprite in game.sprites() {
        if !dragging.contains(&sprite.id) {
            draw_bitmap(sprite, sprite.origin(), 1.0, &mut lists.main);
        }
        draw_label(fonts, sprite, &mut lists.main);
    }

    if let Some(chosen) = chosen {
        draw_statistics(fonts, chosen, game.play_area(), &mut lists.main);
        for other in game.sprites() {
            if other.id != chosen.id && !dragging.contains(&other.id) {
                draw_relation(game, fonts, chosen, other, &mut lists.main);
            }
        }
    }

    for stroke in game.strokes() {
        let Some(sprite) = stroke.dragging_object().and_then(|id| game.sprite(id)) else {
            continue;
        };
        let (dx, dy) = stroke.position_diff();
        let origin = Vec2::from_i32(sprite.x + dx, sprite.y + dy);
        draw_bitmap(sprite, origin, PREVIEW_ALPHA, &mut lists.previews);
    }
}

fn draw_help(fonts: &Fonts<'_>, canvas: (i32, i32), play_area: (i32, i32), list: &mut DrawList) {
    let (w, h) = (canvas.0 as f32, canvas.1 as f32);
    let bar_top = play_area.1 as f32 + h * 0.01;
    list.push_solid_rect(
        HELP,
        Rect::new(0.0, bar_top, w, play_area.1 as f32 / 10.0),
        Color::WHITE,
    );

    let baselines = [h - h * 0.05, h - h * 0.01];
    for (line, baseline) in HELP_LINES.iter().zip(baselines) {
        fonts.text(list, *line, HELP_SIZE, red(), fonts.at_baseline(0.0, baseline, HELP_SIZE));
    }
}

/// Chosen sprites are drawn brightened.
fn draw_bitmap(sprite: &Sprite, origin: Vec2, alpha: f32, list: &mut DrawList) {
    let k = if sprite.chosen { CHOSEN_BRIGHTNESS } else { 1.0 };
    list.push_sprite(SPRITES, sprite.image, origin, [k, k, k, alpha]);
}

/// Name label on the resting position, also while the sprite is dragged.
fn draw_label(fonts: &Fonts<'_>, sprite: &Sprite, list: &mut DrawList) {
    let origin = sprite.origin();
    fonts.text(
        list,
        sprite.name.clone(),
        LABEL_SIZE,
        Color::WHITE,
        fonts.at_baseline(origin.x, origin.y, LABEL_SIZE),
    );
}

fn draw_statistics(fonts: &Fonts<'_>, sprite: &Sprite, play_area: (i32, i32), list: &mut DrawList) {
    let x = play_area.0 as f32 * 0.1;
    let baseline = play_area.1 as f32 * 0.1;
    fonts.text(
        list,
        format!("{} Charge : {:.6} µC", sprite.name, sprite.charge),
        STATS_SIZE,
        Color::WHITE,
        fonts.at_baseline(x, baseline, STATS_SIZE),
    );
}

/// Dotted connector from `chosen` to `other` with the force, field, distance
/// and bearing between them printed at the midpoint.
fn draw_relation(game: &Game, fonts: &Fonts<'_>, chosen: &Sprite, other: &Sprite, list: &mut DrawList) {
    let size_of = |s: &Sprite| game.bitmap(s).map_or((0, 0), |b| b.size_i32());
    let a = chosen.center(size_of(chosen));
    let b = other.center(size_of(other));

    let length = (b - a).length();
    let steps = (length / DOT_SPACING).floor() as u32;
    for i in 1..steps {
        let p = a.lerp(b, i as f32 * DOT_SPACING / length);
        list.push_solid_rect(
            LABELS,
            Rect::centered_square(p, DOT_SIZE),
            red(),
        );
    }

    let d = physics::distance(a, b);
    let lines = [
        format!("F = {:.3e} N", physics::coulomb_force(chosen.charge, other.charge, d)),
        format!("E = {:.3e} N/C", physics::field_strength(chosen.charge, d)),
        format!("d = {:.2} m  {:.0}°", d, physics::bearing(a, b)),
    ];

    let mid = physics::midpoint(a, b);
    let line_height = fonts.system.line_height(fonts.font, LABEL_SIZE);
    for (i, line) in lines.into_iter().enumerate() {
        let origin = Vec2::new(mid.x + 4.0, mid.y + i as f32 * line_height);
        fonts.text(list, line, LABEL_SIZE, Color::WHITE, origin);
    }
}
