//! Fish behaviour
//!
//! Every tick each fish re-evaluates a priority chain picked by its tier:
//! surface exposure first, then tier-specific fleeing/hunting/stalking, and
//! finally a random wander. Nothing here touches the level directly; fish see
//! a read-only [`Surroundings`] and report kills back to the caller.

use std::cmp::Ordering;

use glam::{Vec2, Vec4};
use rand::Rng;

use super::state::{Body, Fish, SPRITE_ATTACK, SPRITE_NORMAL, Tier, TierKind};
use crate::consts::*;
use crate::heading;

/// Color a very big fish turns toward while winding up a lunge
pub const ALERT_COLOR: Vec4 = Vec4::new(200.0, 20.0, 0.0, 255.0);
/// Snap to the alert color once red passes this
const ALERT_RED_LIMIT: f32 = 230.0;
/// Snap to the alert color once green drops below this
const ALERT_GREEN_LIMIT: f32 = 10.0;
/// Slack on the lunge trigger so f32 drift from repeated `dt` subtraction
/// does not delay the burst by a tick
const TIMER_SLACK: f32 = 1e-4;

/// What a fish can see of another fish
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FishView {
    /// Index of the fish in the level's object list
    pub slot: usize,
    pub kind: TierKind,
    pub pos: Vec2,
    pub width: f32,
    pub alive: bool,
}

impl FishView {
    pub fn of(slot: usize, fish: &Fish) -> Self {
        Self {
            slot,
            kind: fish.kind(),
            pos: fish.body.pos,
            width: fish.body.width,
            alive: fish.alive,
        }
    }
}

/// Read-only level state a fish decides from
#[derive(Debug, Clone, Copy)]
pub struct Surroundings<'a> {
    pub water_line: f32,
    pub player_pos: Vec2,
    pub player_immersion: f32,
    pub fish: &'a [FishView],
}

/// Run one tick of behaviour for `fish`
///
/// Updates the fish's own velocity, oxygen, sprite and lunge state. Returns
/// the slot of a fish it just ate, which the caller must kill.
pub fn think<R: Rng>(
    fish: &mut Fish,
    world: &Surroundings<'_>,
    rng: &mut R,
    dt: f32,
) -> Option<usize> {
    fish.sprite_index = SPRITE_NORMAL;

    if !fish.alive {
        return None;
    }

    if fish.body.pos.y <= world.water_line {
        surface(fish, dt);
        return None;
    }

    if fish.oxygen < fish.tuning.max_oxygen {
        fish.oxygen =
            (fish.oxygen + fish.tuning.o2_loss * FISH_O2_REGEN * dt).min(fish.tuning.max_oxygen);
    }

    match fish.kind() {
        TierKind::Small => {
            flee(fish, world, rng, dt);
            None
        }
        TierKind::Big => hunt(fish, world, rng, dt),
        TierKind::VeryBig => stalk(fish, world, rng, dt),
    }
}

/// Out of the water: fall, drag on the way up, suffocate
fn surface(fish: &mut Fish, dt: f32) {
    let t = fish.tuning;
    fish.vel.y += t.gravity * dt;
    if fish.vel.y < 0.0 {
        fish.vel *= 1.0 - t.air_drag * dt;
    }
    fish.oxygen = (fish.oxygen - t.o2_loss * dt).max(0.0);
    if fish.oxygen <= 0.0 {
        fish.alive = false;
        log::debug!("{:?} fish suffocated at {:?}", fish.kind(), fish.body.pos);
    }
}

/// Random drift at constant speed
pub fn wander<R: Rng>(fish: &mut Fish, rng: &mut R, dt: f32) {
    let jitter = Vec2::new(rng.random::<f32>(), rng.random::<f32>()) * (fish.speed / 2.0)
        - Vec2::splat(fish.speed / 4.0);
    fish.vel += jitter * FPS * dt;
    if fish.vel.length_squared() != 0.0 {
        fish.vel = fish.vel.normalize() * fish.speed;
    }
}

fn flee<R: Rng>(fish: &mut Fish, world: &Surroundings<'_>, rng: &mut R, dt: f32) {
    let pos = fish.body.pos;
    let dist = pos.distance(world.player_pos);
    let away = heading(world.player_pos, pos);

    if dist < fish.small_range {
        fish.vel = away * fish.speed * RUSH_SPEED;
    } else if dist < fish.big_range {
        fish.vel = away * fish.speed * FAST_SPEED;
    } else {
        wander(fish, rng, dt);
    }
}

fn hunt<R: Rng>(
    fish: &mut Fish,
    world: &Surroundings<'_>,
    rng: &mut R,
    dt: f32,
) -> Option<usize> {
    if let Some((prey, dist)) = nearest(fish.body.pos, world.fish, |k| k == TierKind::Small) {
        if dist < fish.body.width / 2.0 + prey.width / 2.0 {
            log::debug!("Big fish ate small fish in slot {}", prey.slot);
            return Some(prey.slot);
        } else if dist < fish.small_range {
            fish.sprite_index = SPRITE_ATTACK;
            fish.vel = heading(fish.body.pos, prey.pos) * fish.speed * RUSH_SPEED;
            return None;
        } else if dist < fish.big_range {
            fish.vel = heading(fish.body.pos, prey.pos) * fish.speed * FAST_SPEED;
            return None;
        }
    }

    wander(fish, rng, dt);
    None
}

fn stalk<R: Rng>(
    fish: &mut Fish,
    world: &Surroundings<'_>,
    rng: &mut R,
    dt: f32,
) -> Option<usize> {
    let dist = fish.body.pos.distance(world.player_pos);

    if world.player_immersion > 0.0 && dist < fish.big_range {
        let Tier::VeryBig(lunge) = &mut fish.tier else {
            return None;
        };
        if dist > lunge.distance {
            lunge.timer = lunge.tuning.telegraph;
            fish.sprite_index = SPRITE_NORMAL;
            fish.body.color = fish.body.start_color();
            fish.vel = heading(fish.body.pos, world.player_pos) * fish.speed * APPROACH_SPEED;
        } else {
            fish.sprite_index = SPRITE_ATTACK;
            lunge_at(fish, world.player_pos, dt);
        }
        return None;
    }

    let mut eaten = None;
    let prey_kind = |k: TierKind| matches!(k, TierKind::Small | TierKind::Big);
    if let Some((prey, dist)) = nearest(fish.body.pos, world.fish, prey_kind) {
        if dist < fish.body.width / 2.0 + prey.width / 2.0 {
            // Eating does not end the tick for the biggest fish
            log::debug!("Very big fish ate {:?} fish in slot {}", prey.kind, prey.slot);
            eaten = Some(prey.slot);
        } else if dist < fish.small_range {
            fish.sprite_index = SPRITE_ATTACK;
            fish.vel = heading(fish.body.pos, prey.pos) * fish.speed * RUSH_SPEED;
            return None;
        } else if dist < fish.big_range {
            fish.vel = heading(fish.body.pos, prey.pos) * fish.speed * FAST_SPEED;
            return None;
        }
    }

    wander(fish, rng, dt);
    eaten
}

/// Telegraph, then burst toward `target`
fn lunge_at(fish: &mut Fish, target: Vec2, dt: f32) {
    let Tier::VeryBig(lunge) = &mut fish.tier else {
        return;
    };
    let dir = heading(fish.body.pos, target);
    let start_color = fish.body.start_color();

    if lunge.timer <= LUNGE_TRIGGER + TIMER_SLACK {
        fish.sprite_index = SPRITE_ATTACK;
        lunge.timer = lunge.tuning.telegraph + lunge.tuning.duration;
        fish.body.color = start_color;
        fish.vel = dir * fish.speed * LUNGE_SPEED;
        log::debug!("Very big fish lunged toward {target:?}");
    } else if lunge.timer <= lunge.tuning.telegraph {
        fish.sprite_index = SPRITE_NORMAL;
        fish.vel = dir * fish.speed * TELEGRAPH_CREEP;
    }

    lunge.timer -= dt;

    let mut drift = (ALERT_COLOR - start_color) * (dt / lunge.tuning.telegraph);
    drift.w = 0.0;
    fish.body.color += drift;
    if fish.body.color.x > ALERT_RED_LIMIT || fish.body.color.y < ALERT_GREEN_LIMIT {
        fish.body.color = ALERT_COLOR.truncate().extend(fish.body.color.w);
    }
}

/// Closest live fish accepted by `prey`, with its distance
fn nearest(
    from: Vec2,
    fish: &[FishView],
    prey: impl Fn(TierKind) -> bool,
) -> Option<(FishView, f32)> {
    fish.iter()
        .filter(|f| f.alive && prey(f.kind))
        .map(|f| (*f, from.distance(f.pos)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
}

/// Shrink a fish by `factor` of its current size
///
/// Crossing a size threshold kills the fish; very big and big fish leave a
/// smaller, faster successor in their place, which the caller adds to the
/// level. Below the minimum width a fish simply vanishes.
pub fn shrink(fish: &mut Fish, factor: f32) -> Option<Fish> {
    let keep = (1.0 - factor).max(0.0);
    fish.body.resize(fish.body.width * keep, fish.body.height * keep);
    let width = fish.body.width;

    if width < MIN_FISH_WIDTH {
        fish.alive = false;
        log::debug!("{:?} fish shrank away", fish.kind());
        return None;
    }

    let next = match fish.kind() {
        TierKind::VeryBig if width < VERY_BIG_MIN_WIDTH => Tier::Big,
        TierKind::Big if width < BIG_MIN_WIDTH => Tier::Small,
        _ => return None,
    };

    fish.alive = false;
    let body = Body::new(
        fish.body.pos,
        fish.body.width,
        fish.body.height,
        fish.body.color,
        Some(next.kind().default_sprite().to_string()),
    );
    let mut successor = Fish::new(body, next, fish.speed * SUCCESSOR_SPEEDUP, fish.tuning);
    successor.spawned = true;
    log::debug!(
        "{:?} fish shrank into a {:?} fish at {:?}",
        fish.kind(),
        next.kind(),
        fish.body.pos
    );
    Some(successor)
}
