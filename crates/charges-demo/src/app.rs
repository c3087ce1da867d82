use charges_engine::core::{App, AppControl, FrameCtx};
use charges_engine::input::Key;
use charges_engine::paint::Color;
use charges_engine::render::shapes::rect::RectRenderer;
use charges_engine::render::shapes::sprite::SpriteRenderer;
use charges_engine::render::shapes::text::TextRenderer;
use charges_engine::text::{FontId, FontSystem};

use crate::assets::Assets;
use crate::config::DemoConfig;
use crate::draw::{build_scene, Fonts, SceneLists};
use crate::game::Game;
use crate::stroke::PointerInput;

/// Drives [`Game`] from the engine's frame loop and renders it.
pub struct DemoApp {
    game: Game,
    fonts: FontSystem,
    font: FontId,
    canvas: (i32, i32),
    zoom: f32,
    lists: SceneLists,

    rects: RectRenderer,
    sprites: SpriteRenderer,
    // Separate instance: a renderer's instance buffer is rewritten on every
    // call, and both passes land in the same submission.
    previews: SpriteRenderer,
    text: TextRenderer,
}

impl DemoApp {
    pub fn new(config: &DemoConfig, assets: Assets) -> Self {
        let Assets { images, charge_images, fonts, font } = assets;
        let game = Game::new(config, images, charge_images);
        log::info!("starting with {} sprites", game.sprites().len());

        Self {
            game,
            fonts,
            font,
            canvas: (config.canvas_width, config.canvas_height),
            zoom: config.zoom,
            lists: SceneLists::default(),
            rects: RectRenderer::new(),
            sprites: SpriteRenderer::new(),
            previews: SpriteRenderer::new(),
            text: TextRenderer::new(),
        }
    }
}

impl App for DemoApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_just_pressed(Key::Escape) {
            return AppControl::Exit;
        }

        let input = PointerInput { state: ctx.input, frame: ctx.input_frame, zoom: self.zoom };
        self.game.update(&input);

        let fonts = Fonts { system: &self.fonts, font: self.font };
        build_scene(&self.game, &fonts, self.canvas, &mut self.lists);

        let zoom = self.zoom;
        let Self { game, fonts, lists, rects, sprites, previews, text, .. } = self;
        ctx.render_scaled(zoom, Color::BLACK, |rctx, target| {
            rects.render(rctx, target, &mut lists.main);
            sprites.render(rctx, target, &mut lists.main, game.images());
            text.render(rctx, target, &mut lists.main, fonts);
            previews.render(rctx, target, &mut lists.previews, game.images());
        })
    }
}
