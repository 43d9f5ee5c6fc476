//! Collision detection against static walls
//!
//! Axis-separated sweeps: each body is tested at its next position with only
//! the X component of its velocity, only the Y component, and (for the
//! player) both at once. The caller decides how to respond.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::FPS;

/// Which sides of a body are blocked this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contacts {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Contacts {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }

    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }

    pub fn vertical(&self) -> bool {
        self.up || self.down
    }

    /// Side hit by the X sweep
    fn blocked_x(&mut self, pos: Vec2, vel: Vec2) {
        if pos.x <= 0.0 || vel.x < 0.0 {
            self.left = true;
        } else {
            self.right = true;
        }
    }

    /// Side hit by the Y sweep
    fn blocked_y(&mut self, pos: Vec2, height: f32, vel: Vec2) {
        if pos.y - height <= 0.0 || vel.y < 0.0 {
            self.up = true;
        } else {
            self.down = true;
        }
    }
}

/// Find the player's wall contacts for a move of `vel`
///
/// If neither single-axis sweep hits but the diagonal does, the body is about
/// to clip a corner: both sides facing the velocity are reported blocked so
/// it cannot slip through between the two axis checks.
pub fn player_wall_contacts(body: Rect, vel: Vec2, walls: &[Rect]) -> Contacts {
    let mut contacts = Contacts::default();

    let hit_x = body.translated(Vec2::new(vel.x, 0.0)).collides_any(walls);
    let hit_y = body.translated(Vec2::new(0.0, vel.y)).collides_any(walls);

    if hit_x || hit_y {
        if hit_x {
            contacts.blocked_x(body.pos, vel);
        }
        if hit_y {
            contacts.blocked_y(body.pos, body.size.y, vel);
        }
    } else if body.translated(vel).collides_any(walls) {
        if vel.x <= 0.0 {
            contacts.left = true;
        } else {
            contacts.right = true;
        }
        if vel.y <= 0.0 {
            contacts.up = true;
        } else {
            contacts.down = true;
        }
    }

    contacts
}

/// Find a creature's wall contacts, probing with `vel * 60 * dt`
pub fn creature_wall_contacts(body: Rect, vel: Vec2, dt: f32, walls: &[Rect]) -> Contacts {
    let mut contacts = Contacts::default();
    let step = vel * FPS * dt;

    if body.translated(Vec2::new(step.x, 0.0)).collides_any(walls) {
        contacts.blocked_x(body.pos, vel);
    }
    if body.translated(Vec2::new(0.0, step.y)).collides_any(walls) {
        contacts.blocked_y(body.pos, body.size.y, vel);
    }

    contacts
}

/// Bounce a velocity off the blocked axes
#[inline]
pub fn bounce(vel: Vec2, contacts: Contacts) -> Vec2 {
    Vec2::new(
        if contacts.horizontal() { -vel.x } else { vel.x },
        if contacts.vertical() { -vel.y } else { vel.y },
    )
}
