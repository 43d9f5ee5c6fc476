//! Built-in campaign
//!
//! Eighteen hand-made stages, from learning to swim through to the shrink
//! ray. The same data can be dumped to JSON and loaded back with
//! [`crate::config::load_campaign`].

use glam::{Vec2, Vec4};

use crate::config::{
    ButtonAction, FishTuning, GunTuning, LevelDef, LungeTuning, ObjectDef, PlayerDef,
    PlayerProfile, WallDef, WallSelector,
};
use crate::{INVISIBLE, rgb};

const PLAYER_SPRITE: &str = "char.png";
const GUN_SPRITE: &str = "gun.png";

fn wall(x: f32, y: f32, width: f32, height: f32) -> WallDef {
    WallDef {
        pos: Vec2::new(x, y),
        width,
        height,
        color: rgb(0.0, 0.0, 0.0),
    }
}

fn player(x: f32, y: f32, size: f32, profile: PlayerProfile) -> PlayerDef {
    PlayerDef {
        pos: Vec2::new(x, y),
        width: size,
        height: size,
        color: rgb(255.0, 0.0, 0.0),
        profile,
        sprite: Some(PLAYER_SPRITE.to_string()),
    }
}

fn small(x: f32, y: f32, size: f32, color: Vec4, speed: f32) -> ObjectDef {
    ObjectDef::SmallFish {
        pos: Vec2::new(x, y),
        width: size,
        height: size,
        color,
        speed,
        tuning: FishTuning::default(),
    }
}

fn big(x: f32, y: f32, size: f32, color: Vec4, speed: f32) -> ObjectDef {
    ObjectDef::BigFish {
        pos: Vec2::new(x, y),
        width: size,
        height: size,
        color,
        speed,
        tuning: FishTuning::default(),
    }
}

fn very_big(x: f32, y: f32, width: f32, height: f32, color: Vec4, speed: f32) -> ObjectDef {
    ObjectDef::VeryBigFish {
        pos: Vec2::new(x, y),
        width,
        height,
        color,
        speed,
        tuning: FishTuning::default(),
        lunge: LungeTuning::default(),
    }
}

fn button(x: f32, y: f32, size: f32, color: Vec4, action: ButtonAction) -> ObjectDef {
    ObjectDef::Button {
        pos: Vec2::new(x, y),
        width: size,
        height: size,
        color,
        action,
    }
}

fn remove_wall(index: usize) -> ButtonAction {
    ButtonAction::RemoveWall {
        target: WallSelector::Index(index),
    }
}

struct Stage {
    id: &'static str,
    caption: &'static str,
    caption_pos: Vec2,
    screen: f32,
    water_line: f32,
    player: PlayerDef,
    walls: Vec<WallDef>,
    objects: Vec<ObjectDef>,
}

impl Stage {
    fn into_def(self, index: usize) -> LevelDef {
        LevelDef {
            id: self.id.to_string(),
            screen_width: self.screen,
            screen_height: self.screen,
            water_line: self.water_line,
            caption: Some(format!("Level {}: {}", index + 1, self.caption)),
            caption_pos: self.caption_pos,
            seed: index as u64,
            player: self.player,
            walls: self.walls,
            objects: self.objects,
        }
    }
}

/// Pool room shared by the first seven stages
fn pool(size: f32, left_height: f32, post_height: f32) -> Vec<WallDef> {
    vec![
        wall(0.0, 90.0, 65.0, left_height),
        wall(size - 65.0, 88.0, 65.0, size - 88.0),
        wall(0.0, size - 50.0, size, 50.0),
        wall(0.0, 0.0, 1.0, post_height),
    ]
}

/// Deep tank shared by the 900 px stages
fn tank() -> Vec<WallDef> {
    vec![
        wall(0.0, 90.0, 65.0, 810.0),
        wall(835.0, 88.0, 65.0, 812.0),
        wall(0.0, 850.0, 900.0, 50.0),
        wall(0.0, 0.0, 1.0, 200.0),
    ]
}

/// Flooded corridor shared by the last three stages
fn corridor() -> Vec<WallDef> {
    vec![
        wall(0.0, 0.0, 1.0, 300.0),
        wall(0.0, 0.0, 900.0, 300.0),
        wall(0.0, 500.0, 900.0, 400.0),
    ]
}

fn stages() -> Vec<Stage> {
    let green = rgb(0.0, 255.0, 0.0);
    let blue = rgb(0.0, 0.0, 255.0);
    let purple = rgb(60.0, 0.0, 60.0);
    let white = rgb(240.0, 240.0, 240.0);
    let top = Vec2::ZERO;
    let standard = PlayerProfile::standard;
    let armed = PlayerProfile::armed;

    let mut one_wall = pool(500.0, 500.0, 100.0);
    one_wall.push(wall(230.0, 0.0, 40.0, 350.0));

    let mut three_walls = pool(500.0, 500.0, 100.0);
    three_walls.extend([
        wall(120.0, 0.0, 40.0, 350.0),
        wall(350.0, 0.0, 40.0, 350.0),
        wall(230.0, 90.0, 40.0, 410.0),
    ]);

    let mut cage = tank();
    cage.extend([
        wall(150.0, 150.0, 450.0, 10.0),
        wall(150.0, 150.0, 10.0, 450.0),
        wall(600.0, 150.0, 10.0, 450.0),
        wall(150.0, 600.0, 460.0, 10.0),
    ]);

    let mut broken_cage = tank();
    broken_cage.extend([
        wall(150.0, 150.0, 450.0, 10.0),
        wall(150.0, 150.0, 10.0, 450.0),
        wall(600.0, 150.0, 10.0, 100.0),
        wall(600.0, 500.0, 10.0, 100.0),
        wall(150.0, 600.0, 460.0, 10.0),
        wall(600.0, 250.0, 20.0, 10.0),
        wall(600.0, 500.0, 20.0, 10.0),
    ]);

    let ledges = [
        wall(100.0, 70.0, 50.0, 10.0),
        wall(250.0, 70.0, 50.0, 10.0),
        wall(400.0, 70.0, 50.0, 10.0),
    ];

    let mut parkour = tank();
    parkour.extend(ledges.iter().cloned());
    parkour.extend([wall(550.0, 70.0, 50.0, 10.0), wall(700.0, 70.0, 50.0, 10.0)]);

    let mut fish_die = tank();
    fish_die.extend(ledges.iter().cloned());
    fish_die.extend([
        wall(0.0, 850.0, 900.0, 50.0),
        wall(65.0, 205.0, 50.0, 10.0),
        wall(65.0, 150.0, 50.0, 10.0),
    ]);

    let mut blocked = tank();
    blocked.extend(ledges.iter().cloned());
    blocked.extend([
        wall(0.0, 850.0, 900.0, 50.0),
        wall(830.0, 20.0, 8.0, 100.0),
        wall(823.0, 20.0, 8.0, 100.0),
        wall(815.0, 20.0, 8.0, 100.0),
    ]);

    let three_vb = || {
        vec![
            very_big(350.0, 440.0, 190.0, 190.0, rgb(200.0, 105.0, 0.0), 0.8),
            very_big(650.0, 380.0, 125.0, 125.0, rgb(200.0, 155.0, 0.0), 0.8),
            very_big(500.0, 400.0, 100.0, 100.0, rgb(200.0, 205.0, 0.0), 0.8),
        ]
    };

    let mut fish_die_objects = three_vb();
    fish_die_objects.extend([
        button(65.0, 190.0, 15.0, white, ButtonAction::LowerWater { to: 900.0 }),
        button(800.0, 834.0, 15.0, rgb(20.0, 20.0, 240.0), ButtonAction::RaiseWater { to: 90.0 }),
    ]);

    let mut blocked_objects = three_vb();
    blocked_objects.extend([
        button(65.0, 490.0, 25.0, purple, remove_wall(10)),
        button(450.0, 824.0, 25.0, purple, remove_wall(9)),
        button(810.0, 490.0, 25.0, purple, remove_wall(8)),
    ]);

    let schooling = |speed: f32| vec![small(400.0, 400.0, 20.0, blue, speed)];

    vec![
        Stage {
            id: "0_base",
            caption: "Learn to swim!",
            caption_pos: top,
            screen: 500.0,
            water_line: 100.0,
            player: player(5.0, 5.0, 40.0, standard()),
            walls: pool(500.0, 500.0, 100.0),
            objects: vec![],
        },
        Stage {
            id: "1_onewall",
            caption: "Learn to dive!",
            caption_pos: top,
            screen: 500.0,
            water_line: 100.0,
            player: player(5.0, 5.0, 40.0, standard()),
            walls: one_wall,
            objects: vec![],
        },
        Stage {
            id: "2_threewalls",
            caption: "Learn to navigate!",
            caption_pos: top,
            screen: 500.0,
            water_line: 100.0,
            player: player(5.0, 5.0, 40.0, standard()),
            walls: three_walls,
            objects: vec![],
        },
        Stage {
            id: "3_onesmallfish",
            caption: "Observe cute little fish!",
            caption_pos: top,
            screen: 500.0,
            water_line: 100.0,
            player: player(5.0, 5.0, 40.0, standard()),
            walls: pool(500.0, 500.0, 100.0),
            objects: vec![small(240.0, 240.0, 15.0, green, 1.5)],
        },
        Stage {
            id: "4_threesmallfish",
            caption: "Observe many cute little fishes!",
            caption_pos: top,
            screen: 500.0,
            water_line: 100.0,
            player: player(5.0, 5.0, 40.0, standard()),
            walls: pool(500.0, 500.0, 100.0),
            objects: vec![
                small(240.0, 240.0, 15.0, green, 1.5),
                small(130.0, 200.0, 25.0, rgb(20.0, 225.0, 0.0), 1.3),
                small(340.0, 350.0, 22.0, rgb(30.0, 205.0, 20.0), 1.4),
            ],
        },
        Stage {
            id: "5_bigfish_smallfish",
            caption: "Learn a valuable life lesson!",
            caption_pos: top,
            screen: 500.0,
            water_line: 100.0,
            player: player(5.0, 5.0, 40.0, standard()),
            walls: pool(500.0, 500.0, 100.0),
            objects: vec![
                small(240.0, 240.0, 15.0, green, 1.5),
                big(75.0, 130.0, 50.0, rgb(200.0, 155.0, 0.0), 0.6),
            ],
        },
        Stage {
            id: "6_feeding",
            caption: "Learn many valuable life lessons!",
            caption_pos: top,
            screen: 600.0,
            water_line: 100.0,
            player: player(5.0, 5.0, 40.0, standard()),
            walls: pool(600.0, 510.0, 200.0),
            objects: vec![
                big(300.0, 300.0, 40.0, rgb(200.0, 155.0, 0.0), 0.6),
                small(240.0, 240.0, 10.0, green, 1.5),
                small(120.0, 240.0, 10.0, green, 1.5),
                small(130.0, 100.0, 15.0, rgb(20.0, 150.0, 50.0), 1.5),
                small(340.0, 350.0, 12.0, rgb(40.0, 200.0, 10.0), 1.5),
                small(500.0, 400.0, 10.0, green, 1.5),
            ],
        },
        Stage {
            id: "7_cage",
            caption: "Appreciate the value of cages!",
            caption_pos: top,
            screen: 900.0,
            water_line: 100.0,
            player: player(5.0, 5.0, 30.0, standard()),
            walls: cage,
            objects: vec![
                very_big(450.0, 450.0, 120.0, 90.0, rgb(130.0, 50.0, 0.0), 0.8),
                big(350.0, 300.0, 40.0, rgb(150.0, 155.0, 0.0), 1.0),
                small(240.0, 240.0, 10.0, green, 1.5),
                small(220.0, 370.0, 10.0, rgb(0.0, 210.0, 30.0), 1.5),
                small(305.0, 820.0, 10.0, green, 1.5),
            ],
        },
        Stage {
            id: "8_brokencage",
            caption: "Appreciate the value of cages more!",
            caption_pos: top,
            screen: 900.0,
            water_line: 100.0,
            player: player(5.0, 5.0, 20.0, standard()),
            walls: broken_cage,
            objects: vec![
                very_big(380.0, 350.0, 120.0, 90.0, rgb(130.0, 50.0, 0.0), 0.5),
                small(700.0, 350.0, 10.0, green, 1.5),
                small(600.0, 300.0, 10.0, green, 2.0),
                small(650.0, 330.0, 10.0, green, 2.0),
                small(680.0, 430.0, 10.0, green, 2.0),
                big(500.0, 400.0, 30.0, rgb(150.0, 205.0, 0.0), 1.0),
                small(450.0, 450.0, 12.0, rgb(40.0, 220.0, 10.0), 1.5),
                small(500.0, 400.0, 10.0, green, 1.5),
            ],
        },
        Stage {
            id: "9_parkour",
            caption: "Hone your platforming skills!",
            caption_pos: top,
            screen: 900.0,
            water_line: 150.0,
            player: player(5.0, 5.0, 20.0, standard()),
            walls: parkour,
            objects: vec![
                very_big(150.0, 250.0, 90.0, 90.0, rgb(140.0, 155.0, 0.0), 0.5),
                very_big(350.0, 440.0, 230.0, 190.0, rgb(200.0, 105.0, 0.0), 0.6),
                very_big(650.0, 380.0, 160.0, 125.0, rgb(200.0, 155.0, 0.0), 0.5),
                very_big(500.0, 400.0, 130.0, 100.0, rgb(200.0, 205.0, 0.0), 0.4),
            ],
        },
        Stage {
            id: "10_fishdie",
            caption: "Buttons 101!",
            caption_pos: top,
            screen: 900.0,
            water_line: 150.0,
            player: player(5.0, 5.0, 20.0, standard()),
            walls: fish_die,
            objects: fish_die_objects,
        },
        Stage {
            id: "11_blocked",
            caption: "Buttons 102!",
            caption_pos: top,
            screen: 900.0,
            water_line: 110.0,
            player: player(5.0, 5.0, 20.0, standard()),
            walls: blocked,
            objects: blocked_objects,
        },
        Stage {
            id: "12_gun_pickup",
            caption: "Shrink Ray 101!     Hold left click to shoot",
            caption_pos: top,
            screen: 900.0,
            water_line: 110.0,
            player: player(5.0, 5.0, 20.0, standard()),
            walls: vec![
                wall(0.0, 90.0, 65.0, 810.0),
                wall(835.0, 0.0, 65.0, 300.0),
                wall(835.0, 500.0, 65.0, 400.0),
                wall(0.0, 850.0, 900.0, 50.0),
                wall(0.0, 0.0, 1.0, 200.0),
                wall(100.0, 70.0, 50.0, 10.0),
                wall(270.0, 70.0, 50.0, 10.0),
                wall(430.0, 80.0, 70.0, 10.0),
                wall(0.0, 850.0, 900.0, 50.0),
                wall(815.0, 300.0, 8.0, 200.0),
            ],
            objects: vec![
                very_big(200.0, 150.0, 190.0, 190.0, rgb(200.0, 105.0, 0.0), 0.8),
                ObjectDef::Gun {
                    pos: Vec2::new(450.0, 30.0),
                    width: 30.0,
                    height: 30.0,
                    color: rgb(100.0, 100.0, 100.0),
                    sprite: Some(GUN_SPRITE.to_string()),
                    tuning: GunTuning::default(),
                },
                // Hidden triggers either side of the gun
                button(390.0, 30.0, 50.0, INVISIBLE, remove_wall(8)),
                button(490.0, 30.0, 50.0, INVISIBLE, remove_wall(8)),
            ],
        },
        Stage {
            id: "13_gun",
            caption: "Shrink Ray 102!",
            caption_pos: top,
            screen: 900.0,
            water_line: 0.0,
            player: player(5.0, 330.0, 20.0, armed()),
            walls: vec![
                wall(0.0, 250.0, 1.0, 300.0),
                wall(0.0, 0.0, 360.0, 300.0),
                wall(0.0, 375.0, 360.0, 600.0),
                wall(320.0, 500.0, 600.0, 500.0),
                wall(0.0, 0.0, 1.0, 200.0),
                wall(631.0, 375.0, 300.0, 300.0),
                wall(357.0, 165.0, 90.0, 30.0),
                wall(557.0, 165.0, 90.0, 30.0),
                wall(633.0, 0.0, 300.0, 300.0),
            ],
            objects: vec![
                very_big(400.0, 220.0, 200.0, 200.0, rgb(200.0, 105.0, 0.0), 0.3),
                small(400.0, 30.0, 20.0, blue, 1.5),
                small(450.0, 40.0, 20.0, blue, 1.5),
                small(500.0, 50.0, 20.0, blue, 1.5),
                small(550.0, 60.0, 20.0, blue, 1.5),
            ],
        },
        Stage {
            id: "14_whichbutton",
            caption: "Buttons final exam, hope you paid attention in 101!",
            caption_pos: top,
            screen: 900.0,
            water_line: 0.0,
            player: player(5.0, 330.0, 20.0, armed()),
            walls: vec![
                wall(0.0, 250.0, 1.0, 300.0),
                wall(0.0, 0.0, 360.0, 300.0),
                wall(0.0, 375.0, 360.0, 600.0),
                wall(0.0, 0.0, 1.0, 200.0),
                wall(631.0, 375.0, 300.0, 600.0),
                wall(633.0, 0.0, 300.0, 300.0),
                wall(815.0, 300.0, 8.0, 200.0),
            ],
            objects: vec![
                very_big(400.0, -50.0, 200.0, 200.0, rgb(200.0, 105.0, 0.0), 0.3),
                small(400.0, 0.0, 20.0, blue, 1.0),
                button(359.0, 400.0, 50.0, white, ButtonAction::LowerWater { to: 900.0 }),
                button(582.0, 400.0, 50.0, purple, remove_wall(6)),
            ],
        },
        Stage {
            id: "15_bruh",
            caption: "Realise the game jam ends in 9th of august not 10",
            caption_pos: Vec2::new(0.0, 300.0),
            screen: 900.0,
            water_line: 400.0,
            player: player(5.0, 350.0, 20.0, armed()),
            walls: corridor(),
            objects: schooling(1.0),
        },
        Stage {
            id: "16_bruh2",
            caption: "Realise the game jam ends in 40 minutes holy shit",
            caption_pos: Vec2::new(0.0, 300.0),
            screen: 900.0,
            water_line: 400.0,
            player: player(5.0, 350.0, 20.0, armed()),
            walls: corridor(),
            objects: schooling(1.0),
        },
        Stage {
            id: "17_bruh3",
            caption: "Realise theres no way to finish this game, add 3 levels explaining your situation and submit",
            caption_pos: Vec2::new(0.0, 300.0),
            screen: 900.0,
            water_line: 400.0,
            player: player(5.0, 350.0, 20.0, armed()),
            walls: corridor(),
            objects: schooling(1.0),
        },
    ]
}

/// The built-in campaign, in play order
pub fn campaign() -> Vec<LevelDef> {
    stages()
        .into_iter()
        .enumerate()
        .map(|(i, stage)| stage.into_def(i))
        .collect()
}
