//! Level definitions and tuning presets
//!
//! Levels are plain data built once at startup, either from the built-in
//! campaign or from a JSON array of [`LevelDef`].

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::consts::FPS;
use crate::error::ConfigError;
use crate::rgb;

/// Player movement constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub gravity: f32,
    pub water_lift: f32,
    /// Upward velocity set by a jump
    pub jump: f32,
    /// Seconds before a landed/submerged player may jump again
    pub jump_cooldown: f32,
    pub speed: f32,
    pub terminal: f32,
    pub swim_speed: f32,
    pub swim_terminal: f32,
    pub air_drag: f32,
    pub water_drag: f32,
    pub ground_drag: f32,
    pub max_oxygen: f32,
    pub o2_loss: f32,
    /// Whether the player starts the level holding the shrink ray
    pub gun: bool,
    /// Fraction of size removed per second of ray exposure
    pub gun_strength: f32,
}

impl PlayerProfile {
    /// Profile for the levels before the shrink ray is introduced
    pub fn standard() -> Self {
        Self {
            gravity: 100.0,
            water_lift: 100.0,
            jump: 15.0,
            jump_cooldown: 0.32,
            speed: 50.0,
            terminal: 200.0,
            swim_speed: 30.0,
            swim_terminal: 150.0,
            air_drag: 0.02 * FPS,
            water_drag: 0.04 * FPS,
            ground_drag: 0.07 * FPS,
            max_oxygen: 1000.0,
            o2_loss: 100.0,
            gun: false,
            gun_strength: 0.5,
        }
    }

    /// Same movement, spawns with the shrink ray
    pub fn armed() -> Self {
        Self {
            gun: true,
            ..Self::standard()
        }
    }
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self::standard()
    }
}

/// Surface-exposure constants shared by every fish
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FishTuning {
    pub gravity: f32,
    pub air_drag: f32,
    pub max_oxygen: f32,
    pub o2_loss: f32,
}

impl Default for FishTuning {
    fn default() -> Self {
        Self {
            gravity: 50.0,
            air_drag: 0.4 * FPS,
            max_oxygen: 300.0,
            o2_loss: 100.0,
        }
    }
}

/// Very big fish lunge timing (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LungeTuning {
    pub telegraph: f32,
    pub duration: f32,
}

impl Default for LungeTuning {
    fn default() -> Self {
        Self {
            telegraph: 1.0,
            duration: 2.0,
        }
    }
}

/// Idle bobbing of an unpicked gun
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GunTuning {
    pub anim_freq: f32,
    /// Pixels moved per tick at the peak of the bob
    pub anim_range: f32,
}

impl Default for GunTuning {
    fn default() -> Self {
        Self {
            anim_freq: 2.0,
            anim_range: 1.0,
        }
    }
}

/// Which wall a remove-wall button takes out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallSelector {
    Index(usize),
    Last,
    All,
}

/// What a button does the first time the player touches it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ButtonAction {
    RaiseWater { to: f32 },
    LowerWater { to: f32 },
    RemoveWall { target: WallSelector },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDef {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: Vec4,
    #[serde(default)]
    pub profile: PlayerProfile,
    #[serde(default)]
    pub sprite: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallDef {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    #[serde(default = "wall_color")]
    pub color: Vec4,
}

fn wall_color() -> Vec4 {
    rgb(0.0, 0.0, 0.0)
}

/// Placed interactable objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectDef {
    Gun {
        pos: Vec2,
        width: f32,
        height: f32,
        color: Vec4,
        #[serde(default)]
        sprite: Option<String>,
        #[serde(default)]
        tuning: GunTuning,
    },
    Button {
        pos: Vec2,
        width: f32,
        height: f32,
        color: Vec4,
        action: ButtonAction,
    },
    SmallFish {
        pos: Vec2,
        width: f32,
        height: f32,
        color: Vec4,
        speed: f32,
        #[serde(default)]
        tuning: FishTuning,
    },
    BigFish {
        pos: Vec2,
        width: f32,
        height: f32,
        color: Vec4,
        speed: f32,
        #[serde(default)]
        tuning: FishTuning,
    },
    VeryBigFish {
        pos: Vec2,
        width: f32,
        height: f32,
        color: Vec4,
        speed: f32,
        #[serde(default)]
        tuning: FishTuning,
        #[serde(default)]
        lunge: LungeTuning,
    },
}

impl ObjectDef {
    pub fn size(&self) -> (f32, f32) {
        match self {
            ObjectDef::Gun { width, height, .. }
            | ObjectDef::Button { width, height, .. }
            | ObjectDef::SmallFish { width, height, .. }
            | ObjectDef::BigFish { width, height, .. }
            | ObjectDef::VeryBigFish { width, height, .. } => (*width, *height),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ObjectDef::Gun { .. } => "gun",
            ObjectDef::Button { .. } => "button",
            ObjectDef::SmallFish { .. } => "small fish",
            ObjectDef::BigFish { .. } => "big fish",
            ObjectDef::VeryBigFish { .. } => "very big fish",
        }
    }
}

/// Complete description of one stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    pub id: String,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Everything with y greater than this is underwater
    pub water_line: f32,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub caption_pos: Vec2,
    /// Seed for fish wander noise
    #[serde(default)]
    pub seed: u64,
    pub player: PlayerDef,
    pub walls: Vec<WallDef>,
    #[serde(default)]
    pub objects: Vec<ObjectDef>,
}

impl LevelDef {
    /// Reject definitions the simulation cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(ConfigError::BadScreen {
                level: self.id.clone(),
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        check_size(&self.id, "player", self.player.width, self.player.height)?;
        if self.player.height <= 0.0 {
            return Err(ConfigError::FlatPlayer {
                level: self.id.clone(),
                height: self.player.height,
            });
        }
        for (i, wall) in self.walls.iter().enumerate() {
            check_size(&self.id, &format!("wall {i}"), wall.width, wall.height)?;
        }
        for (i, obj) in self.objects.iter().enumerate() {
            let (w, h) = obj.size();
            check_size(&self.id, &format!("{} {i}", obj.label()), w, h)?;
            if let ObjectDef::VeryBigFish { lunge, .. } = obj {
                if lunge.telegraph <= 0.0 {
                    return Err(ConfigError::BadTelegraph {
                        level: self.id.clone(),
                        telegraph: lunge.telegraph,
                    });
                }
            }
        }
        Ok(())
    }
}

fn check_size(level: &str, what: &str, width: f32, height: f32) -> Result<(), ConfigError> {
    if width < 0.0 || height < 0.0 {
        return Err(ConfigError::NegativeSize {
            level: level.to_string(),
            what: what.to_string(),
            width,
            height,
        });
    }
    Ok(())
}

/// Parse a campaign (JSON array of level definitions)
pub fn load_campaign(json: &str) -> Result<Vec<LevelDef>, ConfigError> {
    let defs: Vec<LevelDef> = serde_json::from_str(json)?;
    if defs.is_empty() {
        return Err(ConfigError::EmptyCampaign);
    }
    for def in &defs {
        def.validate()?;
    }
    log::info!("Loaded campaign with {} levels", defs.len());
    Ok(defs)
}
