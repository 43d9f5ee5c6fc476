//! Per-frame simulation tick
//!
//! Advances one level by one frame. The order of the steps matters: later
//! steps read what earlier ones wrote.

use glam::Vec2;

use super::collision::{bounce, creature_wall_contacts, player_wall_contacts};
use super::creature::{self, FishView, Surroundings};
use super::level::{DeathCause, Level, LevelCommand};
use super::rect::Rect;
use super::state::{Object, TierKind};

/// Decoded input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Jump key held (also swims upward)
    pub jump_held: bool,
    /// Jump key went down this frame
    pub jump_pressed: bool,
    /// Primary mouse button held
    pub fire: bool,
    /// Cursor in level coordinates
    pub cursor: Option<Vec2>,
    /// Host asked to quit
    pub quit: bool,
}

/// Advance the level by one frame of `dt` seconds
pub fn tick(level: &mut Level, input: &TickInput, dt: f32) {
    // Nothing moves once the attempt is over; the host resets or advances
    if level.cleared || !level.player.alive {
        return;
    }
    level.time_ticks += 1;

    // 1. Player input and integration, then aim the ray
    level.player.integrate(input, level.water_line, dt);
    let obstacles = ray_obstacles(level);
    level.player.aim(input, &obstacles);

    // 2. Shrink whatever the ray is touching
    apply_ray(level, dt);

    // 3. Player against walls
    let contacts = player_wall_contacts(level.player.rect(), level.player.vel, &level.wall_rects);
    level.player.apply_contacts(contacts, dt);

    // 4. Creature behaviour and gun animation
    run_objects(level, dt);

    // 5. Creatures bounce off walls
    for obj in &mut level.objects {
        if let Object::Fish(fish) = obj {
            let contacts = creature_wall_contacts(fish.body.rect(), fish.vel, dt, &level.wall_rects);
            fish.vel = bounce(fish.vel, contacts);
        }
    }

    // 6. Pickups, buttons, lethal contact
    interact(level);

    // 7. Out of air
    if level.player.oxygen <= 0.0 && level.player.alive {
        level.kill_player(DeathCause::Drowned);
    }

    // 8. Commit movement
    level.player.commit();
    for obj in &mut level.objects {
        if let Object::Fish(fish) = obj {
            fish.commit();
        }
    }

    // 9. Clear / fall checks
    if !level.player.alive {
        return;
    }
    if level.player.rect().right() > level.screen.x {
        level.cleared = true;
        log::info!(
            "Level {} cleared after {} ticks",
            level.id,
            level.time_ticks
        );
    } else if level.player.pos.y > level.screen.y {
        level.kill_player(DeathCause::Fell);
    }
}

/// Walls plus every live fish
fn ray_obstacles(level: &Level) -> Vec<Rect> {
    let fish = level
        .objects
        .iter()
        .filter_map(Object::as_fish)
        .filter(|f| f.alive)
        .map(|f| f.body.rect());
    level.wall_rects.iter().copied().chain(fish).collect()
}

fn apply_ray(level: &mut Level, dt: f32) {
    if !level.player.has_gun {
        return;
    }
    let Some(end) = level.player.ray_end else {
        return;
    };
    let factor = level.player.profile.gun_strength * dt;

    let mut successors = Vec::new();
    for obj in &mut level.objects {
        if let Object::Fish(fish) = obj {
            if fish.alive && fish.body.rect().contains_point(end) {
                successors.extend(creature::shrink(fish, factor));
            }
        }
    }
    level.objects.extend(successors.into_iter().map(Object::Fish));
}

fn run_objects(level: &mut Level, dt: f32) {
    let mut views: Vec<FishView> = level
        .objects
        .iter()
        .enumerate()
        .filter_map(|(slot, obj)| obj.as_fish().map(|f| FishView::of(slot, f)))
        .collect();
    let player_pos = level.player.pos;
    let player_immersion = level.player.immersion(level.water_line);

    for slot in 0..level.objects.len() {
        let eaten = match &mut level.objects[slot] {
            Object::Fish(fish) => {
                let world = Surroundings {
                    water_line: level.water_line,
                    player_pos,
                    player_immersion,
                    fish: &views,
                };
                let eaten = creature::think(fish, &world, &mut level.rng, dt);
                let alive = fish.alive;
                if let Some(view) = views.iter_mut().find(|v| v.slot == slot) {
                    view.alive = alive;
                }
                eaten
            }
            Object::Gun(gun) => {
                gun.animate(dt);
                None
            }
            Object::Button(_) => None,
        };

        if let Some(victim) = eaten {
            if let Some(prey) = level.objects.get_mut(victim).and_then(Object::as_fish_mut) {
                prey.vel = Vec2::ZERO;
                prey.alive = false;
            }
            if let Some(view) = views.iter_mut().find(|v| v.slot == victim) {
                view.alive = false;
            }
        }
    }
}

fn interact(level: &mut Level) {
    let player_rect = level.player.rect();
    let mut commands = Vec::new();
    let mut eaten = false;

    for obj in &mut level.objects {
        if !player_rect.overlaps(&obj.body().rect()) {
            continue;
        }
        match obj {
            Object::Fish(fish) if fish.alive && fish.kind() == TierKind::VeryBig => {
                eaten = true;
            }
            Object::Gun(gun) if !gun.picked => {
                gun.picked = true;
                level.player.has_gun = true;
                log::debug!("Picked up the shrink ray in {}", level.id);
            }
            Object::Button(button) => {
                if let Some(action) = button.press() {
                    log::debug!("Button pressed in {}: {:?}", level.id, action);
                    commands.push(LevelCommand::from(action));
                }
            }
            _ => {}
        }
    }

    for command in commands {
        level.apply(command);
    }
    if eaten && level.player.alive {
        level.kill_player(DeathCause::Eaten);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FishTuning, LungeTuning, PlayerProfile};
    use crate::rgb;
    use crate::sim::state::{Body, Fish};
    use crate::sim::test_support::{open_level, walled_level};

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_player_stops_at_wall() {
        // Wall directly to the right of a mid-air player
        let mut level = walled_level(vec![(Vec2::new(50.0, 0.0), 20.0, 100_000.0)]);
        level.player.pos = Vec2::new(25.0, 100.0);
        level.player.vel = Vec2::new(20.0, 0.0);
        tick(&mut level, &TickInput::default(), DT);
        assert!(level.player.vel.x <= 0.0);
        assert!(level.player.rect().right() <= 50.0);

        // Holding right never pushes through
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut level, &right, DT);
            assert!(level.player.rect().right() <= 50.0 + 1e-3);
        }
    }

    #[test]
    fn test_player_lands_on_floor() {
        let mut level = walled_level(vec![(Vec2::new(0.0, 300.0), 500.0, 20.0)]);
        level.player.pos = Vec2::new(100.0, 250.0);
        for _ in 0..240 {
            tick(&mut level, &TickInput::default(), DT);
        }
        assert!(level.player.alive);
        assert!(level.player.rect().bottom() <= 300.0 + 1e-3);
        assert!(level.player.can_jump);
    }

    #[test]
    fn test_ray_shrinks_fish_over_time() {
        let mut level = open_level();
        level.player.profile = PlayerProfile::armed();
        level.player.reset();
        level.player.pos = Vec2::new(100.0, 300.0);
        let fish = Fish::small(
            Body::new(Vec2::new(200.0, 295.0), 30.0, 30.0, rgb(0.0, 255.0, 0.0), None),
            0.0,
            FishTuning::default(),
        );
        level.objects.push(Object::Fish(fish));
        let aim = TickInput {
            fire: true,
            cursor: Some(Vec2::new(220.0, 310.0)),
            ..Default::default()
        };
        tick(&mut level, &aim, 0.1);
        let fish = level.objects[0].as_fish().unwrap();
        assert!((fish.body.width - 30.0 * 0.95).abs() < 1e-4);
        assert!(level.player.ray_end.is_some());
    }

    #[test]
    fn test_ray_shrinks_fish_from_any_subpixel_position() {
        let mut template = open_level();
        template.player.profile = PlayerProfile::armed();
        template.player.reset();
        let fish = Fish::small(
            Body::new(Vec2::new(233.3, 287.1), 30.0, 30.0, rgb(0.0, 255.0, 0.0), None),
            0.0,
            FishTuning::default(),
        );
        let target = fish.body.rect().center();
        template.objects.push(Object::Fish(fish));

        let mut missed = Vec::new();
        for i in 0..40 {
            for j in 0..40 {
                let mut level = template.clone();
                level.player.pos = Vec2::new(100.0 + i as f32 * 0.025, 300.0 + j as f32 * 0.025);
                let aim = TickInput {
                    fire: true,
                    cursor: Some(target),
                    ..Default::default()
                };
                tick(&mut level, &aim, 0.1);
                let fish = level.objects[0].as_fish().unwrap();
                if fish.body.width >= 30.0 {
                    missed.push((level.player.pos, level.player.ray_end));
                }
            }
        }
        assert!(missed.is_empty(), "{} shots missed, e.g. {:?}", missed.len(), missed.first());
    }

    #[test]
    fn test_ray_turns_very_big_fish_into_big_fish() {
        let mut level = open_level();
        level.player.profile = PlayerProfile::armed();
        level.player.reset();
        level.player.pos = Vec2::new(100.0, 2000.0);
        let fish = Fish::very_big(
            Body::new(Vec2::new(1000.0, 1990.0), 51.0, 51.0, rgb(130.0, 50.0, 0.0), None),
            0.0,
            FishTuning::default(),
            LungeTuning::default(),
        );
        level.objects.push(Object::Fish(fish));
        let aim = TickInput {
            fire: true,
            cursor: Some(Vec2::new(1010.0, 2010.0)),
            ..Default::default()
        };
        tick(&mut level, &aim, 0.1);
        assert_eq!(level.objects.len(), 2);
        assert!(!level.objects[0].as_fish().unwrap().alive);
        let successor = level.objects[1].as_fish().unwrap();
        assert_eq!(successor.kind(), TierKind::Big);
        assert!(successor.alive);
        assert!(successor.spawned);
    }

    #[test]
    fn test_big_fish_eats_small_fish() {
        let mut level = open_level();
        level.player.pos = Vec2::new(2000.0, 2000.0);
        level.objects.push(Object::Fish(Fish::big(
            Body::new(Vec2::new(300.0, 300.0), 40.0, 40.0, rgb(200.0, 155.0, 0.0), None),
            0.6,
            FishTuning::default(),
        )));
        level.objects.push(Object::Fish(Fish::small(
            Body::new(Vec2::new(310.0, 300.0), 10.0, 10.0, rgb(0.0, 255.0, 0.0), None),
            1.5,
            FishTuning::default(),
        )));
        tick(&mut level, &TickInput::default(), DT);
        let small = level.objects[1].as_fish().unwrap();
        assert!(!small.alive);
        assert_eq!(small.vel, Vec2::ZERO);
    }

    #[test]
    fn test_very_big_fish_contact_kills_player() {
        let mut level = open_level();
        level.player.pos = Vec2::new(300.0, 300.0);
        level.objects.push(Object::Fish(Fish::very_big(
            Body::new(Vec2::new(290.0, 290.0), 60.0, 60.0, rgb(130.0, 50.0, 0.0), None),
            0.5,
            FishTuning::default(),
            LungeTuning::default(),
        )));
        tick(&mut level, &TickInput::default(), DT);
        assert!(!level.player.alive);
        assert_eq!(level.death, Some(DeathCause::Eaten));

        // A dead level no longer advances
        let frozen = level.player.pos;
        tick(&mut level, &TickInput::default(), DT);
        assert_eq!(level.player.pos, frozen);
    }

    #[test]
    fn test_walking_off_right_edge_clears() {
        let mut level = open_level();
        level.player.pos = Vec2::new(level.screen.x - 20.5, 0.0);
        level.player.vel = Vec2::new(5.0, 0.0);
        tick(&mut level, &TickInput::default(), DT);
        assert!(level.cleared);
        assert!(level.player.alive);
    }

    #[test]
    fn test_falling_off_bottom_kills() {
        let mut level = open_level();
        level.water_line = 100_000.0;
        level.player.pos = Vec2::new(100.0, level.screen.y - 1.0);
        level.player.vel = Vec2::new(0.0, 5.0);
        tick(&mut level, &TickInput::default(), DT);
        assert!(!level.player.alive);
        assert_eq!(level.death, Some(DeathCause::Fell));
    }

    #[test]
    fn test_drowning_kills_on_the_empty_tick() {
        let mut level = open_level();
        level.water_line = 0.0;
        level.player.pos = Vec2::new(100.0, 500.0);
        let seconds = level.player.profile.max_oxygen / level.player.profile.o2_loss;
        let dt = 0.25;
        let ticks = (seconds / dt) as usize;
        for _ in 0..ticks - 1 {
            tick(&mut level, &TickInput::default(), dt);
            assert!(level.player.alive);
        }
        tick(&mut level, &TickInput::default(), dt);
        assert_eq!(level.player.oxygen, 0.0);
        assert!(!level.player.alive);
        assert_eq!(level.death, Some(DeathCause::Drowned));
    }
}
