//! Tidepool - simulation core of a 2D water platformer
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (player, fish, walls, level)
//! - `config`: Serializable level definitions and tuning presets
//! - `levels`: The built-in campaign
//! - `session`: Level progression (retry on death, advance on clear)

pub mod config;
pub mod error;
pub mod levels;
pub mod session;
pub mod sim;

pub use config::{LevelDef, PlayerProfile};
pub use error::ConfigError;
pub use session::{Progress, Session};

use glam::{Vec2, Vec4};

/// Game configuration constants
pub mod consts {
    /// Frame rate the velocity units are expressed in (px per frame at 60 Hz)
    pub const FPS: f32 = 60.0;

    /// Immersion above which the player swims (water lift, swim controls, water drag)
    pub const SWIM_IMMERSION: f32 = 0.4;
    /// Immersion above which the player's head is under and oxygen drains
    pub const DROWN_IMMERSION: f32 = 0.9;
    /// Player regenerates oxygen this many times faster than it drains
    pub const PLAYER_O2_REGEN: f32 = 4.0;
    /// Fish regenerate oxygen this many times faster than they drain
    pub const FISH_O2_REGEN: f32 = 2.0;

    /// Ray is extended this many times the center-to-cursor offset
    pub const RAY_REACH: f32 = 50.0;

    /// Fish flee/chase ranges as multiples of their width at spawn
    pub const SMALL_RANGE_WIDTHS: f32 = 3.0;
    pub const BIG_RANGE_WIDTHS: f32 = 6.0;
    /// Fish speed multipliers
    pub const FAST_SPEED: f32 = 3.0;
    pub const RUSH_SPEED: f32 = 6.0;

    /// Very big fish: approach speed when closing on the player
    pub const APPROACH_SPEED: f32 = 2.0;
    /// Very big fish: lunge starts within this many widths of the player
    pub const LUNGE_DISTANCE_WIDTHS: f32 = 2.0;
    /// Very big fish: burst speed multiplier
    pub const LUNGE_SPEED: f32 = 8.0;
    /// Very big fish: creep speed multiplier while telegraphing
    pub const TELEGRAPH_CREEP: f32 = 0.01;
    /// Lunge fires once the timer decays to this value
    pub const LUNGE_TRIGGER: f32 = 0.1;

    /// Shrink thresholds (width in px)
    pub const VERY_BIG_MIN_WIDTH: f32 = 50.0;
    pub const BIG_MIN_WIDTH: f32 = 30.0;
    pub const MIN_FISH_WIDTH: f32 = 5.0;
    /// A successor fish swims this many times faster than its predecessor
    pub const SUCCESSOR_SPEEDUP: f32 = 2.0;

    /// Creature facing flips only past this horizontal speed
    pub const FACING_DEADZONE: f32 = 0.5;
}

/// Build an opaque RGB color (channels 0-255)
#[inline]
pub const fn rgb(r: f32, g: f32, b: f32) -> Vec4 {
    Vec4::new(r, g, b, 255.0)
}

/// Fully transparent color for invisible hitboxes
pub const INVISIBLE: Vec4 = Vec4::new(255.0, 255.0, 255.0, 0.0);

/// Fraction (0-1) of a body's height below the water line
///
/// Larger y is further down the screen, so anything with y > `water_line` is
/// underwater.
#[inline]
pub fn immersion(top_left: Vec2, height: f32, water_line: f32) -> f32 {
    let bottom = top_left.y + height;
    if bottom > water_line && height > 0.0 {
        ((bottom - water_line) / height).min(1.0)
    } else {
        0.0
    }
}

/// Unit vector from `from` toward `to`, zero when they coincide
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immersion_fractions() {
        let pos = Vec2::new(0.0, 80.0);
        // Bottom at 120, water at 100 -> half of 40 px submerged
        assert!((immersion(pos, 40.0, 100.0) - 0.5).abs() < 1e-6);
        // Fully above water
        assert_eq!(immersion(Vec2::new(0.0, 0.0), 40.0, 100.0), 0.0);
        // Deep underwater clamps to 1
        assert_eq!(immersion(Vec2::new(0.0, 500.0), 40.0, 100.0), 1.0);
    }

    #[test]
    fn test_heading_degenerate() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(heading(p, p), Vec2::ZERO);
        let h = heading(Vec2::ZERO, p);
        assert!((h.length() - 1.0).abs() < 1e-6);
    }
}
