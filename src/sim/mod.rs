//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied `dt` only, no clocks
//! - Seeded RNG only, re-seeded on reset
//! - Stable iteration order (object list order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod creature;
pub mod level;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Contacts, bounce, creature_wall_contacts, player_wall_contacts};
pub use creature::{FishView, Surroundings, shrink, think};
pub use level::{DeathCause, Level, LevelCommand, LevelStatus};
pub use player::Player;
pub use rect::Rect;
pub use state::{Body, Button, Facing, Fish, Gun, Lunge, Object, Tier, TierKind, Wall};
pub use tick::{TickInput, tick};
