//! Drag & drop electric charges.
//!
//! Sprites carrying a charge can be picked and dragged with the mouse or by
//! touch. The most recently picked sprite is "chosen": keys edit its charge
//! and nudge it, and the overlay shows the Coulomb force, field strength,
//! distance and bearing between it and every other sprite.

pub mod app;
pub mod assets;
pub mod config;
pub mod draw;
pub mod game;
pub mod physics;
pub mod sprite;
pub mod stroke;
