//! A single playable stage
//!
//! Owns the player, walls, objects and water line for one level, plus a
//! snapshot of its starting layout so a failed attempt can be replayed
//! exactly.

use glam::{Vec2, Vec4};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::player::Player;
use super::rect::Rect;
use super::state::{Body, Button, Fish, Gun, Object, TierKind, Wall};
use super::tick::{TickInput, tick};
use crate::config::{ButtonAction, LevelDef, ObjectDef, WallSelector};
use crate::error::ConfigError;

/// Mutation requested by a button press
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelCommand {
    SetWaterLine(f32),
    RemoveWall(WallSelector),
}

impl From<ButtonAction> for LevelCommand {
    fn from(action: ButtonAction) -> Self {
        match action {
            ButtonAction::RaiseWater { to } | ButtonAction::LowerWater { to } => {
                LevelCommand::SetWaterLine(to)
            }
            ButtonAction::RemoveWall { target } => LevelCommand::RemoveWall(target),
        }
    }
}

/// Why the player's attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Drowned,
    Eaten,
    Fell,
}

/// Where the current attempt stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStatus {
    Playing,
    Cleared,
    Dead(DeathCause),
}

#[derive(Debug, Clone)]
pub struct Level {
    pub id: String,
    pub screen: Vec2,
    pub caption: Option<String>,
    pub caption_pos: Vec2,
    pub player: Player,
    pub objects: Vec<Object>,
    /// Everything with y greater than this is underwater
    pub water_line: f32,
    pub cleared: bool,
    pub death: Option<DeathCause>,
    /// Ticks since the last reset
    pub time_ticks: u64,
    pub(super) walls: Vec<Wall>,
    /// Wall rects, kept in step with `walls`
    pub(super) wall_rects: Vec<Rect>,
    pub(super) rng: Pcg32,
    seed: u64,
    initial_walls: Vec<Wall>,
    initial_water_line: f32,
}

impl Level {
    pub fn new(def: &LevelDef) -> Result<Self, ConfigError> {
        def.validate()?;

        let p = &def.player;
        let player = Player::new(
            p.pos,
            p.width,
            p.height,
            p.color,
            p.profile.clone(),
            p.sprite.clone(),
        );
        let walls: Vec<Wall> = def
            .walls
            .iter()
            .map(|w| Wall::new(w.pos, w.width, w.height, w.color))
            .collect();
        let objects = def.objects.iter().map(spawn).collect();

        let mut level = Self {
            id: def.id.clone(),
            screen: Vec2::new(def.screen_width, def.screen_height),
            caption: def.caption.clone(),
            caption_pos: def.caption_pos,
            player,
            objects,
            water_line: def.water_line,
            cleared: false,
            death: None,
            time_ticks: 0,
            walls: walls.clone(),
            wall_rects: Vec::new(),
            rng: Pcg32::seed_from_u64(def.seed),
            seed: def.seed,
            initial_walls: walls,
            initial_water_line: def.water_line,
        };
        level.sync_wall_rects();
        log::debug!(
            "Built level {} with {} walls and {} objects",
            level.id,
            level.walls.len(),
            level.objects.len()
        );
        Ok(level)
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn wall_rects(&self) -> &[Rect] {
        &self.wall_rects
    }

    pub fn fish(&self) -> impl Iterator<Item = &Fish> {
        self.objects.iter().filter_map(Object::as_fish)
    }

    pub fn status(&self) -> LevelStatus {
        match self.death {
            Some(cause) => LevelStatus::Dead(cause),
            None if self.cleared => LevelStatus::Cleared,
            None => LevelStatus::Playing,
        }
    }

    /// Advance one frame
    pub fn update(&mut self, input: &TickInput, dt: f32) -> LevelStatus {
        tick(self, input, dt);
        self.status()
    }

    /// Apply a button command
    ///
    /// Out-of-range wall indices and removals from an empty wall list are
    /// ignored.
    pub fn apply(&mut self, command: LevelCommand) {
        match command {
            LevelCommand::SetWaterLine(y) => {
                log::debug!("{}: water line {} -> {}", self.id, self.water_line, y);
                self.water_line = y;
            }
            LevelCommand::RemoveWall(target) => {
                let removed = match target {
                    WallSelector::Index(i) if i < self.walls.len() => {
                        self.walls.remove(i);
                        1
                    }
                    WallSelector::Index(_) => 0,
                    WallSelector::Last => usize::from(self.walls.pop().is_some()),
                    WallSelector::All => {
                        let n = self.walls.len();
                        self.walls.clear();
                        n
                    }
                };
                if removed == 0 {
                    log::debug!("{}: no wall matches {:?}", self.id, target);
                }
                self.sync_wall_rects();
            }
        }
    }

    pub(super) fn kill_player(&mut self, cause: DeathCause) {
        self.player.alive = false;
        self.death = Some(cause);
        log::info!(
            "Player died in {} ({:?}) after {} ticks",
            self.id,
            cause,
            self.time_ticks
        );
    }

    /// Put the level back exactly as it was built
    pub fn reset(&mut self) {
        self.player.reset();
        self.objects.retain(Object::is_original);
        for obj in &mut self.objects {
            obj.reset();
        }
        self.walls = self.initial_walls.clone();
        self.sync_wall_rects();
        self.water_line = self.initial_water_line;
        self.cleared = false;
        self.death = None;
        self.time_ticks = 0;
        self.rng = Pcg32::seed_from_u64(self.seed);
        log::info!("Reset level {}", self.id);
    }

    fn sync_wall_rects(&mut self) {
        self.wall_rects = self.walls.iter().map(|w| w.rect).collect();
    }
}

fn fish_body(pos: Vec2, width: f32, height: f32, color: Vec4, kind: TierKind) -> Body {
    Body::new(pos, width, height, color, Some(kind.default_sprite().to_string()))
}

fn spawn(def: &ObjectDef) -> Object {
    match def.clone() {
        ObjectDef::Gun {
            pos,
            width,
            height,
            color,
            sprite,
            tuning,
        } => Object::Gun(Gun::new(Body::new(pos, width, height, color, sprite), tuning)),
        ObjectDef::Button {
            pos,
            width,
            height,
            color,
            action,
        } => Object::Button(Button::new(Body::new(pos, width, height, color, None), action)),
        ObjectDef::SmallFish {
            pos,
            width,
            height,
            color,
            speed,
            tuning,
        } => Object::Fish(Fish::small(fish_body(pos, width, height, color, TierKind::Small), speed, tuning)),
        ObjectDef::BigFish {
            pos,
            width,
            height,
            color,
            speed,
            tuning,
        } => Object::Fish(Fish::big(fish_body(pos, width, height, color, TierKind::Big), speed, tuning)),
        ObjectDef::VeryBigFish {
            pos,
            width,
            height,
            color,
            speed,
            tuning,
            lunge,
        } => Object::Fish(Fish::very_big(
            fish_body(pos, width, height, color, TierKind::VeryBig),
            speed,
            tuning,
            lunge,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FishTuning, PlayerDef, PlayerProfile, WallDef};
    use crate::rgb;
    use crate::sim::test_support::{open_level, walled_level};

    const DT: f32 = 1.0 / 60.0;

    fn three_walls() -> Level {
        walled_level(vec![
            (Vec2::new(1000.0, 0.0), 10.0, 10.0),
            (Vec2::new(1100.0, 0.0), 10.0, 10.0),
            (Vec2::new(1200.0, 0.0), 10.0, 10.0),
        ])
    }

    #[test]
    fn test_remove_wall_out_of_range_is_noop() {
        let mut level = three_walls();
        level.apply(LevelCommand::RemoveWall(WallSelector::Index(10)));
        assert_eq!(level.walls().len(), 3);
        assert_eq!(level.wall_rects().len(), 3);
    }

    #[test]
    fn test_remove_wall_variants() {
        let mut level = three_walls();
        level.apply(LevelCommand::RemoveWall(WallSelector::Index(0)));
        assert_eq!(level.walls().len(), 2);
        assert_eq!(level.wall_rects()[0].pos.x, 1100.0);

        level.apply(LevelCommand::RemoveWall(WallSelector::Last));
        assert_eq!(level.wall_rects(), &[Rect::new(Vec2::new(1100.0, 0.0), 10.0, 10.0)]);

        level.apply(LevelCommand::RemoveWall(WallSelector::All));
        assert!(level.walls().is_empty());
        // Nothing left to pop
        level.apply(LevelCommand::RemoveWall(WallSelector::Last));
        assert!(level.wall_rects().is_empty());
    }

    #[test]
    fn test_button_fires_once_and_rearms_on_reset() {
        let mut level = open_level();
        level.water_line = 5000.0;
        level.player.pos = Vec2::new(100.0, 100.0);
        level.objects.push(Object::Button(Button::new(
            Body::new(Vec2::new(95.0, 95.0), 30.0, 30.0, rgb(255.0, 0.0, 0.0), None),
            ButtonAction::RaiseWater { to: 200.0 },
        )));
        level.update(&TickInput::default(), DT);
        assert_eq!(level.water_line, 200.0);

        // Still standing on it: no second fire
        level.water_line = 300.0;
        level.update(&TickInput::default(), DT);
        assert_eq!(level.water_line, 300.0);

        level.reset();
        let Object::Button(button) = &level.objects[0] else {
            panic!("expected button");
        };
        assert!(!button.pressed);
    }

    #[test]
    fn test_button_removes_wall() {
        let mut level = three_walls();
        level.player.pos = Vec2::new(100.0, 100.0);
        level.objects.push(Object::Button(Button::new(
            Body::new(Vec2::new(100.0, 100.0), 20.0, 20.0, rgb(255.0, 0.0, 0.0), None),
            ButtonAction::RemoveWall {
                target: WallSelector::Index(1),
            },
        )));
        level.update(&TickInput::default(), DT);
        assert_eq!(level.walls().len(), 2);
        assert_eq!(level.wall_rects()[1].pos.x, 1200.0);
    }

    #[test]
    fn test_gun_pickup() {
        let mut level = open_level();
        level.player.pos = Vec2::new(100.0, 100.0);
        level.objects.push(Object::Gun(Gun::new(
            Body::new(Vec2::new(105.0, 105.0), 10.0, 10.0, rgb(0.0, 0.0, 255.0), None),
            Default::default(),
        )));
        assert!(!level.player.has_gun);
        level.update(&TickInput::default(), DT);
        assert!(level.player.has_gun);
        let Object::Gun(gun) = &level.objects[0] else {
            panic!("expected gun");
        };
        assert!(gun.picked);

        level.reset();
        assert!(!level.player.has_gun);
    }

    #[test]
    fn test_status_reports_outcome() {
        let mut level = open_level();
        assert_eq!(level.status(), LevelStatus::Playing);
        level.player.pos = Vec2::new(level.screen.x, 100.0);
        assert_eq!(
            level.update(&TickInput::default(), DT),
            LevelStatus::Cleared
        );
        level.reset();
        assert_eq!(level.status(), LevelStatus::Playing);
    }

    #[test]
    fn test_reset_removes_spawned_fish() {
        let mut level = open_level();
        level.objects.push(Object::Fish(Fish::big(
            Body::new(Vec2::new(500.0, 500.0), 31.0, 31.0, rgb(200.0, 155.0, 0.0), None),
            0.6,
            FishTuning::default(),
        )));
        let fish = level.objects[0].as_fish_mut().unwrap();
        let successor = crate::sim::creature::shrink(fish, 0.1).unwrap();
        assert_eq!(successor.kind(), TierKind::Small);
        level.objects.push(Object::Fish(successor));
        assert_eq!(level.objects.len(), 2);

        level.reset();
        assert_eq!(level.objects.len(), 1);
        let fish = level.objects[0].as_fish().unwrap();
        assert!(fish.alive);
        assert_eq!(fish.body.width, 31.0);
        assert_eq!(fish.kind(), TierKind::Big);
    }

    fn busy_def() -> LevelDef {
        LevelDef {
            id: "busy".into(),
            screen_width: 800.0,
            screen_height: 600.0,
            water_line: 200.0,
            caption: Some("Level 0: Busy".into()),
            caption_pos: Vec2::new(10.0, 10.0),
            seed: 11,
            player: PlayerDef {
                pos: Vec2::new(20.0, 150.0),
                width: 20.0,
                height: 20.0,
                color: rgb(255.0, 0.0, 0.0),
                profile: PlayerProfile::armed(),
                sprite: None,
            },
            walls: vec![
                WallDef {
                    pos: Vec2::new(0.0, 500.0),
                    width: 800.0,
                    height: 100.0,
                    color: rgb(0.0, 0.0, 0.0),
                },
                WallDef {
                    pos: Vec2::new(400.0, 300.0),
                    width: 20.0,
                    height: 200.0,
                    color: rgb(0.0, 0.0, 0.0),
                },
            ],
            objects: vec![
                ObjectDef::SmallFish {
                    pos: Vec2::new(300.0, 350.0),
                    width: 10.0,
                    height: 10.0,
                    color: rgb(0.0, 255.0, 0.0),
                    speed: 1.5,
                    tuning: FishTuning::default(),
                },
                ObjectDef::BigFish {
                    pos: Vec2::new(600.0, 400.0),
                    width: 40.0,
                    height: 40.0,
                    color: rgb(200.0, 155.0, 0.0),
                    speed: 0.6,
                    tuning: FishTuning::default(),
                },
                ObjectDef::Button {
                    pos: Vec2::new(60.0, 150.0),
                    width: 20.0,
                    height: 20.0,
                    color: rgb(255.0, 0.0, 0.0),
                    action: ButtonAction::RemoveWall {
                        target: WallSelector::Last,
                    },
                },
            ],
        }
    }

    fn play(level: &mut Level, ticks: usize) {
        let input = TickInput {
            right: true,
            fire: true,
            cursor: Some(Vec2::new(620.0, 420.0)),
            ..Default::default()
        };
        for _ in 0..ticks {
            level.update(&input, DT);
        }
    }

    #[test]
    fn test_reset_is_idempotent_and_replays_exactly() {
        let def = busy_def();
        let fresh = Level::new(&def).unwrap();
        let mut level = fresh.clone();

        play(&mut level, 120);
        let first_run = (level.player.clone(), level.objects.clone(), level.walls.clone());

        level.reset();
        level.reset();
        assert_eq!(level.player, fresh.player);
        assert_eq!(level.objects, fresh.objects);
        assert_eq!(level.walls, fresh.walls);
        assert_eq!(level.wall_rects, fresh.wall_rects);
        assert_eq!(level.water_line, fresh.water_line);

        // Same seed, same inputs, same result
        play(&mut level, 120);
        assert_eq!(
            (level.player.clone(), level.objects.clone(), level.walls.clone()),
            first_run
        );
    }

    #[test]
    fn test_new_rejects_invalid_def() {
        let mut def = busy_def();
        def.walls[0].width = -1.0;
        assert!(matches!(
            Level::new(&def),
            Err(ConfigError::NegativeSize { .. })
        ));
    }
}
