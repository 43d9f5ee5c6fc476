//! Entities placed in a level
//!
//! Everything here is plain state. Behaviour lives in `player`, `creature`
//! and `level`.

use glam::{Vec2, Vec4};

use super::rect::Rect;
use crate::config::{ButtonAction, FishTuning, GunTuning, LungeTuning};
use crate::consts::*;

/// Horizontal facing, read by the renderer to pick a flipped sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Static obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    pub rect: Rect,
    pub color: Vec4,
}

impl Wall {
    pub fn new(pos: Vec2, width: f32, height: f32, color: Vec4) -> Self {
        Self {
            rect: Rect::new(pos, width, height),
            color,
        }
    }
}

/// Position, size and color shared by every placed object, with the values
/// it was spawned with so it can be put back
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: Vec4,
    /// Opaque sprite handle, passed through to the renderer
    pub sprite: Option<String>,
    start_pos: Vec2,
    start_width: f32,
    start_height: f32,
    start_color: Vec4,
}

impl Body {
    pub fn new(pos: Vec2, width: f32, height: f32, color: Vec4, sprite: Option<String>) -> Self {
        Self {
            pos,
            width,
            height,
            color,
            sprite,
            start_pos: pos,
            start_width: width,
            start_height: height,
            start_color: color,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.width, self.height)
    }

    pub fn start_color(&self) -> Vec4 {
        self.start_color
    }

    pub fn move_to(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    /// Resize in place, never below zero
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn reset(&mut self) {
        self.pos = self.start_pos;
        self.width = self.start_width;
        self.height = self.start_height;
        self.color = self.start_color;
    }
}

/// Shrink ray lying in the level, waiting to be picked up
#[derive(Debug, Clone, PartialEq)]
pub struct Gun {
    pub body: Body,
    pub picked: bool,
    pub tuning: GunTuning,
    /// Bob phase in seconds, wraps at 1
    pub anim_timer: f32,
}

impl Gun {
    pub fn new(body: Body, tuning: GunTuning) -> Self {
        Self {
            body,
            picked: false,
            tuning,
            anim_timer: 0.0,
        }
    }

    /// Bob up and down while nobody has taken it
    pub fn animate(&mut self, dt: f32) {
        if self.picked {
            return;
        }
        if self.anim_timer >= 1.0 {
            self.anim_timer = 0.0;
        }
        let phase = std::f32::consts::PI * self.anim_timer * self.tuning.anim_freq;
        let bob = Vec2::new(0.0, phase.sin() * self.tuning.anim_range);
        self.body.move_to(self.body.pos + bob);
        self.anim_timer += dt;
    }

    pub fn reset(&mut self) {
        self.picked = false;
        self.anim_timer = 0.0;
        self.body.reset();
    }
}

/// Pressure button, fires its action once per attempt
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub body: Body,
    pub pressed: bool,
    pub action: ButtonAction,
}

impl Button {
    pub fn new(body: Body, action: ButtonAction) -> Self {
        Self {
            body,
            pressed: false,
            action,
        }
    }

    /// Latch the button; yields its action only the first time
    pub fn press(&mut self) -> Option<ButtonAction> {
        if self.pressed {
            return None;
        }
        self.pressed = true;
        Some(self.action)
    }

    pub fn reset(&mut self) {
        self.pressed = false;
        self.body.reset();
    }
}

/// Very big fish lunge bookkeeping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lunge {
    pub tuning: LungeTuning,
    /// Counts down through the telegraph window
    pub timer: f32,
    /// Lunges start within this distance of the player
    pub distance: f32,
}

impl Lunge {
    pub fn new(tuning: LungeTuning, width: f32) -> Self {
        Self {
            tuning,
            timer: tuning.telegraph,
            distance: width * LUNGE_DISTANCE_WIDTHS,
        }
    }
}

/// Behavioural class of a fish
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tier {
    Small,
    Big,
    VeryBig(Lunge),
}

/// Tag-only view of [`Tier`], for target filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierKind {
    Small,
    Big,
    VeryBig,
}

impl Tier {
    pub fn kind(&self) -> TierKind {
        match self {
            Tier::Small => TierKind::Small,
            Tier::Big => TierKind::Big,
            Tier::VeryBig(_) => TierKind::VeryBig,
        }
    }
}

impl TierKind {
    /// Sprite handle given to fish born from shrinking
    pub fn default_sprite(self) -> &'static str {
        match self {
            TierKind::Small => "smallfish.png",
            TierKind::Big => "bigfish.png",
            TierKind::VeryBig => "verybigfish.png",
        }
    }
}

/// Sprite variant index: 0 is the idle sprite
pub const SPRITE_NORMAL: usize = 0;
/// Rush sprite for big fish, lunge sprite for very big fish
pub const SPRITE_ATTACK: usize = 1;

/// A creature of any tier
#[derive(Debug, Clone, PartialEq)]
pub struct Fish {
    pub body: Body,
    pub tier: Tier,
    pub vel: Vec2,
    pub oxygen: f32,
    pub alive: bool,
    /// Base cruising speed (px per frame)
    pub speed: f32,
    pub tuning: FishTuning,
    /// Flee/rush threshold, fixed at spawn
    pub small_range: f32,
    /// Flee/chase threshold, fixed at spawn
    pub big_range: f32,
    pub sprite_index: usize,
    pub facing: Facing,
    /// Born from a shrink this attempt, removed on reset
    pub spawned: bool,
}

impl Fish {
    pub fn new(body: Body, tier: Tier, speed: f32, tuning: FishTuning) -> Self {
        let width = body.width;
        Self {
            body,
            tier,
            vel: Vec2::ZERO,
            oxygen: tuning.max_oxygen,
            alive: true,
            speed,
            tuning,
            small_range: width * SMALL_RANGE_WIDTHS,
            big_range: width * BIG_RANGE_WIDTHS,
            sprite_index: SPRITE_NORMAL,
            facing: Facing::default(),
            spawned: false,
        }
    }

    pub fn small(body: Body, speed: f32, tuning: FishTuning) -> Self {
        Self::new(body, Tier::Small, speed, tuning)
    }

    pub fn big(body: Body, speed: f32, tuning: FishTuning) -> Self {
        Self::new(body, Tier::Big, speed, tuning)
    }

    pub fn very_big(body: Body, speed: f32, tuning: FishTuning, lunge: LungeTuning) -> Self {
        let width = body.width;
        Self::new(body, Tier::VeryBig(Lunge::new(lunge, width)), speed, tuning)
    }

    pub fn kind(&self) -> TierKind {
        self.tier.kind()
    }

    /// Advance position by the current velocity and update facing
    pub fn commit(&mut self) {
        self.body.move_to(self.body.pos + self.vel);
        if self.vel.x < -FACING_DEADZONE {
            self.facing = Facing::Left;
        } else if self.vel.x > FACING_DEADZONE {
            self.facing = Facing::Right;
        }
    }

    pub fn reset(&mut self) {
        self.vel = Vec2::ZERO;
        self.alive = true;
        self.oxygen = self.tuning.max_oxygen;
        self.sprite_index = SPRITE_NORMAL;
        self.facing = Facing::default();
        if let Tier::VeryBig(lunge) = &mut self.tier {
            lunge.timer = lunge.tuning.telegraph;
        }
        self.body.reset();
    }
}

/// Any non-wall object in a level
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Gun(Gun),
    Button(Button),
    Fish(Fish),
}

impl Object {
    pub fn body(&self) -> &Body {
        match self {
            Object::Gun(g) => &g.body,
            Object::Button(b) => &b.body,
            Object::Fish(f) => &f.body,
        }
    }

    pub fn as_fish(&self) -> Option<&Fish> {
        match self {
            Object::Fish(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_fish_mut(&mut self) -> Option<&mut Fish> {
        match self {
            Object::Fish(f) => Some(f),
            _ => None,
        }
    }

    /// Whether the object belongs to the level's starting layout
    pub fn is_original(&self) -> bool {
        !matches!(self, Object::Fish(f) if f.spawned)
    }

    pub fn reset(&mut self) {
        match self {
            Object::Gun(g) => g.reset(),
            Object::Button(b) => b.reset(),
            Object::Fish(f) => f.reset(),
        }
    }
}
