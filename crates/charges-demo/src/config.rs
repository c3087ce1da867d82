/// Demo configuration.
///
/// Geometry is in canvas pixels: the window shows the canvas scaled by
/// `zoom`, and the play area is the top `play_fraction` of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub zoom: f32,
    pub play_fraction: f32,
    pub initial_sprites: usize,
    /// RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400,
            canvas_height: 300,
            zoom: 2.0,
            play_fraction: 0.9,
            initial_sprites: 2,
            seed: None,
        }
    }
}

pub const SEED_VAR: &str = "CHARGES_SEED";
pub const SPRITES_VAR: &str = "CHARGES_SPRITES";

impl DemoConfig {
    /// Defaults overridden by `CHARGES_SEED` and `CHARGES_SPRITES`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`DemoConfig::from_env`], reading variables through `lookup`.
    /// Values that do not parse are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(seed) = parse_var(&lookup, SEED_VAR) {
            config.seed = Some(seed);
        }
        if let Some(count) = parse_var(&lookup, SPRITES_VAR) {
            config.initial_sprites = count;
        }
        config
    }

    /// Play area size in canvas pixels, `(width, height)`.
    pub fn play_area(&self) -> (i32, i32) {
        let height = (self.canvas_height as f32 * self.play_fraction) as i32;
        (self.canvas_width, height)
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring {name}={raw:?}: not a valid value");
            None
        }
    }
}
