//! Electrostatics shown in the overlay.
//!
//! Nothing here feeds back into motion. Zero distances are not guarded: they
//! yield infinities or NaN and are displayed as such.

use charges_engine::coords::Vec2;

/// Coulomb constant, N·m²/C².
pub const K: f64 = 8.987_551_792_3e9;

/// Canvas pixels per meter of simulated distance.
pub const PIXELS_PER_METER: f64 = 100.0;

/// Coulombs per unit of sprite charge (sprite charges are in µC).
pub const CHARGE_UNIT: f64 = 1e-6;

/// Distance in meters between two canvas points.
pub fn distance(a: Vec2, b: Vec2) -> f64 {
    f64::from((b - a).length()) / PIXELS_PER_METER
}

/// Signed Coulomb force in newtons; positive means repulsion.
pub fn coulomb_force(q1: f32, q2: f32, d: f64) -> f64 {
    K * coulombs(q1) * coulombs(q2) / (d * d)
}

/// Field magnitude in N/C produced by charge `q` at distance `d`.
pub fn field_strength(q: f32, d: f64) -> f64 {
    K * coulombs(q).abs() / (d * d)
}

/// Angle in degrees of the vector `from -> to`, with +Y pointing down.
///
/// 0° points right and angles grow clockwise on screen.
pub fn bearing(from: Vec2, to: Vec2) -> f64 {
    let d = to - from;
    f64::from(d.y).atan2(f64::from(d.x)).to_degrees()
}

pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    a.lerp(b, 0.5)
}

fn coulombs(q: f32) -> f64 {
    f64::from(q) * CHARGE_UNIT
}
