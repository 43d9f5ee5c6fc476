//! Player controller
//!
//! Input-driven kinematics: gravity, jumping, swimming, drag, oxygen and the
//! shrink ray. Velocity is in px per frame and is added to the position once
//! per tick when the level commits movement.

use glam::{Vec2, Vec4};

use super::collision::Contacts;
use super::rect::Rect;
use super::state::Facing;
use super::tick::TickInput;
use crate::config::PlayerProfile;
use crate::consts::*;
use crate::immersion;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: Vec4,
    pub sprite: Option<String>,
    pub vel: Vec2,
    pub oxygen: f32,
    pub alive: bool,
    pub has_gun: bool,
    pub can_jump: bool,
    /// Jump cooldown remaining (seconds)
    pub jump_timer: f32,
    pub ray_start: Option<Vec2>,
    pub ray_end: Option<Vec2>,
    pub facing: Facing,
    pub profile: PlayerProfile,
    start_pos: Vec2,
}

impl Player {
    pub fn new(
        pos: Vec2,
        width: f32,
        height: f32,
        color: Vec4,
        profile: PlayerProfile,
        sprite: Option<String>,
    ) -> Self {
        Self {
            pos,
            width,
            height,
            color,
            sprite,
            vel: Vec2::ZERO,
            oxygen: profile.max_oxygen,
            alive: true,
            has_gun: profile.gun,
            can_jump: false,
            jump_timer: 0.0,
            ray_start: None,
            ray_end: None,
            facing: Facing::Left,
            profile,
            start_pos: pos,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) / 2.0
    }

    /// Fraction of the player's height under the water line
    pub fn immersion(&self, water_line: f32) -> f32 {
        immersion(self.pos, self.height, water_line)
    }

    /// Apply one tick of input and physics to the velocity and oxygen
    ///
    /// The swim branch and the air branch are separate checks and both can
    /// touch the velocity in the same tick. The air branch runs whenever the
    /// oxygen branch does not (head under, or oxygen already full).
    pub fn integrate(&mut self, input: &TickInput, water_line: f32, dt: f32) {
        let p = &self.profile;
        let submerged = self.immersion(water_line);

        // Jump is edge-triggered and resolved before gravity
        if submerged < 1.0 && input.jump_pressed && self.can_jump {
            self.can_jump = false;
            self.jump_timer = p.jump_cooldown;
            self.vel.y = -p.jump;
        }

        self.vel.y += p.gravity * dt;

        if self.jump_timer > 0.0 {
            self.jump_timer -= dt;
        }

        if submerged > SWIM_IMMERSION {
            if submerged > DROWN_IMMERSION {
                self.oxygen -= p.o2_loss * dt;
            }
            if self.jump_timer <= 0.0 {
                self.can_jump = true;
            }

            self.vel.y -= p.water_lift * submerged * dt;

            if input.left {
                self.vel.x -= p.swim_speed * dt;
            }
            if input.right {
                self.vel.x += p.swim_speed * dt;
            }
            if input.up || input.jump_held {
                self.vel.y -= p.swim_speed * dt;
            }
            if input.down {
                self.vel.y += p.swim_speed * dt;
            }

            self.vel *= 1.0 - p.water_drag * dt;
            self.vel = self.vel.clamp(
                Vec2::splat(-p.swim_terminal),
                Vec2::splat(p.swim_terminal),
            );
        }

        if submerged < DROWN_IMMERSION && self.oxygen != p.max_oxygen {
            self.oxygen += p.o2_loss * PLAYER_O2_REGEN * dt;
        } else {
            if input.left {
                self.vel.x -= p.speed * dt;
            }
            if input.right {
                self.vel.x += p.speed * dt;
            }

            self.vel *= 1.0 - p.air_drag * dt;
            self.vel = self
                .vel
                .clamp(Vec2::splat(-p.terminal), Vec2::splat(p.terminal));
        }

        self.oxygen = self.oxygen.clamp(0.0, p.max_oxygen);
    }

    /// Update the shrink ray from the mouse state
    ///
    /// `obstacles` is every wall plus every live fish; the ray stops at the
    /// closest clipped point among them.
    pub fn aim(&mut self, input: &TickInput, obstacles: &[Rect]) {
        match input.cursor {
            Some(cursor) if input.fire => self.shoot(cursor, obstacles),
            _ => {
                self.ray_start = None;
                self.ray_end = None;
            }
        }
    }

    fn shoot(&mut self, cursor: Vec2, obstacles: &[Rect]) {
        if !self.has_gun {
            return;
        }
        let start = self.center();
        let mut end = start + (cursor - start) * RAY_REACH;
        let mut best = start.distance_squared(end);

        for rect in obstacles {
            if let Some((a, b)) = rect.clip_line(start, end) {
                for hit in [a, b] {
                    let d = start.distance_squared(hit);
                    if d < best {
                        best = d;
                        end = hit;
                    }
                }
            }
        }

        self.ray_start = Some(start);
        self.ray_end = Some(end);
    }

    /// Respond to wall contacts found for this tick's velocity
    pub fn apply_contacts(&mut self, contacts: Contacts, dt: f32) {
        let drag = self.profile.ground_drag;
        if contacts.left {
            self.vel.y *= 1.0 - drag * dt;
            self.vel.x = self.vel.x.max(0.0);
        }
        if contacts.right {
            self.vel.y *= 1.0 - drag * dt;
            self.vel.x = self.vel.x.min(0.0);
        }
        if contacts.up {
            self.vel.x *= 1.0 - drag * dt;
            self.vel.y = self.vel.y.max(0.0);
        }
        if contacts.down {
            self.vel.x *= 1.0 - drag * 2.0 * dt;
            self.vel.y = self.vel.y.min(0.0);
            // Landing re-arms the jump
            if self.jump_timer <= 0.0 {
                self.can_jump = true;
            }
        }
    }

    /// Move by the current velocity
    pub fn commit(&mut self) {
        self.pos += self.vel;
        self.facing = if self.vel.x <= 0.0 {
            Facing::Left
        } else {
            Facing::Right
        };
    }

    pub fn reset(&mut self) {
        self.pos = self.start_pos;
        self.vel = Vec2::ZERO;
        self.oxygen = self.profile.max_oxygen;
        self.alive = true;
        self.can_jump = false;
        self.jump_timer = 0.0;
        self.has_gun = self.profile.gun;
        self.ray_start = None;
        self.ray_end = None;
        self.facing = Facing::Left;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rgb;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn player_at(y: f32, profile: PlayerProfile) -> Player {
        Player::new(
            Vec2::new(100.0, y),
            20.0,
            20.0,
            rgb(255.0, 0.0, 0.0),
            profile,
            None,
        )
    }

    #[test]
    fn test_gravity_in_air() {
        let mut p = player_at(0.0, PlayerProfile::standard());
        p.integrate(&TickInput::default(), 500.0, DT);
        assert!(p.vel.y > 0.0);
        assert_eq!(p.oxygen, p.profile.max_oxygen);
    }

    #[test]
    fn test_jump_needs_arming() {
        let mut p = player_at(0.0, PlayerProfile::standard());
        let jump = TickInput {
            jump_pressed: true,
            ..Default::default()
        };
        p.integrate(&jump, 500.0, DT);
        assert!(p.vel.y > 0.0, "jump should not fire before landing");

        p.vel = Vec2::ZERO;
        p.apply_contacts(
            Contacts {
                down: true,
                ..Default::default()
            },
            DT,
        );
        assert!(p.can_jump);
        p.integrate(&jump, 500.0, DT);
        assert!(p.vel.y < 0.0);
        assert!(!p.can_jump);
        assert!(p.jump_timer > 0.0);
    }

    #[test]
    fn test_no_jump_when_fully_submerged() {
        let mut p = player_at(500.0, PlayerProfile::standard());
        p.can_jump = true;
        let jump = TickInput {
            jump_pressed: true,
            ..Default::default()
        };
        p.integrate(&jump, 100.0, DT);
        // Gravity and full water lift cancel, no impulse applied
        assert!(p.vel.y.abs() < 1e-4);
        assert!(p.can_jump);
        assert_eq!(p.jump_timer, 0.0);
    }

    #[test]
    fn test_swimming_rearms_jump_after_cooldown() {
        // Half submerged
        let mut p = player_at(90.0, PlayerProfile::standard());
        p.jump_timer = 0.05;
        p.integrate(&TickInput::default(), 100.0, 0.1);
        assert!(p.can_jump);
    }

    #[test]
    fn test_swim_velocity_clamped() {
        let mut p = player_at(500.0, PlayerProfile::standard());
        p.vel = Vec2::new(1000.0, -1000.0);
        p.integrate(&TickInput::default(), 100.0, DT);
        let cap = p.profile.swim_terminal;
        assert!(p.vel.x.abs() <= cap + 1e-3);
        assert!(p.vel.y.abs() <= cap + 1e-3);
    }

    #[test]
    fn test_drowning_drains_to_exact_zero() {
        let mut p = player_at(500.0, PlayerProfile::standard());
        let seconds = p.profile.max_oxygen / p.profile.o2_loss;
        let dt = 0.5;
        let ticks = (seconds / dt) as usize;
        for i in 0..ticks {
            assert!(p.oxygen > 0.0, "oxygen ran out early at tick {i}");
            p.integrate(&TickInput::default(), 100.0, dt);
        }
        assert_eq!(p.oxygen, 0.0);
        // Further drain stays clamped
        p.integrate(&TickInput::default(), 100.0, dt);
        assert_eq!(p.oxygen, 0.0);
    }

    #[test]
    fn test_oxygen_regenerates_above_water() {
        let mut p = player_at(0.0, PlayerProfile::standard());
        p.oxygen = 100.0;
        p.integrate(&TickInput::default(), 500.0, 0.5);
        assert_eq!(p.oxygen, 100.0 + 100.0 * 4.0 * 0.5);
        p.oxygen = 999.0;
        p.integrate(&TickInput::default(), 500.0, 0.5);
        assert_eq!(p.oxygen, p.profile.max_oxygen);
    }

    #[test]
    fn test_ray_needs_gun() {
        let mut p = player_at(0.0, PlayerProfile::standard());
        let fire = TickInput {
            fire: true,
            cursor: Some(Vec2::new(200.0, 10.0)),
            ..Default::default()
        };
        p.aim(&fire, &[]);
        assert!(p.ray_start.is_none());
        assert!(p.ray_end.is_none());
    }

    #[test]
    fn test_ray_stops_at_first_obstacle() {
        let mut p = player_at(0.0, PlayerProfile::armed());
        let center = p.center();
        let near = Rect::new(Vec2::new(150.0, 0.0), 10.0, 20.0);
        let far = Rect::new(Vec2::new(300.0, 0.0), 10.0, 20.0);
        let fire = TickInput {
            fire: true,
            cursor: Some(center + Vec2::new(10.0, 0.0)),
            ..Default::default()
        };
        p.aim(&fire, &[far, near]);
        assert_eq!(p.ray_start, Some(center));
        let end = p.ray_end.unwrap();
        assert!((end.x - 150.0).abs() < 1e-3);
        assert!((end.y - center.y).abs() < 1e-3);

        // Releasing clears the ray
        p.aim(&TickInput::default(), &[far, near]);
        assert!(p.ray_end.is_none());
    }

    #[test]
    fn test_unobstructed_ray_reaches_far() {
        let mut p = player_at(0.0, PlayerProfile::armed());
        let center = p.center();
        let fire = TickInput {
            fire: true,
            cursor: Some(center + Vec2::new(0.0, 2.0)),
            ..Default::default()
        };
        p.aim(&fire, &[]);
        assert_eq!(p.ray_end, Some(center + Vec2::new(0.0, 100.0)));
    }

    #[test]
    fn test_contacts_clamp_velocity() {
        let mut p = player_at(0.0, PlayerProfile::standard());
        p.vel = Vec2::new(5.0, 5.0);
        p.apply_contacts(
            Contacts {
                right: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(p.vel.x, 0.0);
        assert!(p.vel.y < 5.0 && p.vel.y > 0.0);

        p.vel = Vec2::new(-3.0, -4.0);
        p.apply_contacts(
            Contacts {
                left: true,
                up: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(p.vel.x, 0.0);
        assert_eq!(p.vel.y, 0.0);
    }

    proptest! {
        #[test]
        fn prop_oxygen_stays_in_range(
            ys in proptest::collection::vec(-200.0f32..800.0, 1..40),
            dt in 0.001f32..0.5,
        ) {
            let mut p = player_at(0.0, PlayerProfile::standard());
            for y in ys {
                p.pos.y = y;
                p.integrate(&TickInput::default(), 300.0, dt);
                prop_assert!(p.oxygen >= 0.0);
                prop_assert!(p.oxygen <= p.profile.max_oxygen);
            }
        }
    }

    #[test]
    fn test_reset_restores_profile_state() {
        let mut p = player_at(40.0, PlayerProfile::standard());
        let fresh = p.clone();
        p.pos = Vec2::new(1.0, 2.0);
        p.vel = Vec2::new(3.0, 4.0);
        p.oxygen = 10.0;
        p.alive = false;
        p.has_gun = true;
        p.can_jump = true;
        p.ray_end = Some(Vec2::ONE);
        p.reset();
        assert_eq!(p, fresh);
        p.reset();
        assert_eq!(p, fresh);
    }
}
