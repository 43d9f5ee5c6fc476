//! Tidepool headless host
//!
//! Runs a campaign without a window: every level is driven by a simple
//! autopilot for a bounded number of frames and the outcome is logged.
//!
//! Usage:
//!   tidepool              run the built-in campaign
//!   tidepool <file.json>  run a campaign loaded from JSON
//!   tidepool dump         print the built-in campaign as JSON

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::process::ExitCode;

    use tidepool::config::load_campaign;
    use tidepool::consts::FPS;
    use tidepool::levels::campaign;
    use tidepool::sim::{Level, TickInput};
    use tidepool::{ConfigError, LevelDef, Progress, Session};

    const DT: f32 = 1.0 / FPS;
    /// Ninety seconds of play per level before giving up on it
    const FRAME_BUDGET: u32 = 90 * FPS as u32;
    /// Surface for air below this fraction of the tank
    const LOW_AIR: f32 = 0.3;

    #[derive(Debug)]
    enum Outcome {
        Cleared,
        TimedOut,
        Quit,
    }

    #[derive(Debug)]
    struct Report {
        id: String,
        outcome: Outcome,
        frames: u32,
        deaths: u32,
    }

    /// Push right, hop whenever possible, come up for air, shoot the nearest fish
    fn autopilot(level: &Level) -> TickInput {
        let p = &level.player;
        let low_air = p.oxygen < p.profile.max_oxygen * LOW_AIR;
        let center = p.center();
        let target = level
            .fish()
            .filter(|f| f.alive)
            .map(|f| f.body.rect().center())
            .min_by(|a, b| a.distance_squared(center).total_cmp(&b.distance_squared(center)));

        TickInput {
            right: true,
            up: low_air,
            jump_held: low_air,
            jump_pressed: p.can_jump,
            fire: p.has_gun && target.is_some(),
            cursor: target,
            ..Default::default()
        }
    }

    fn play_level(session: &mut Session) -> Report {
        let id = session.current().id.clone();
        let deaths_before = session.deaths;
        let mut frames = 0;

        let outcome = loop {
            if frames >= FRAME_BUDGET {
                break Outcome::TimedOut;
            }
            let input = autopilot(session.current());
            frames += 1;
            match session.step(&input, DT) {
                Progress::Playing | Progress::Died(_) => {}
                Progress::Cleared | Progress::Finished => break Outcome::Cleared,
                Progress::Quit => break Outcome::Quit,
            }
        };

        Report {
            id,
            outcome,
            frames,
            deaths: session.deaths - deaths_before,
        }
    }

    fn run(defs: &[LevelDef]) -> Result<Vec<Report>, ConfigError> {
        let mut session = Session::new(defs)?;
        let mut reports = Vec::with_capacity(session.level_count());

        loop {
            let report = play_level(&mut session);
            log::info!(
                "{}: {:?} after {} frames, {} deaths",
                report.id,
                report.outcome,
                report.frames,
                report.deaths
            );
            let quit = matches!(report.outcome, Outcome::Quit);
            reports.push(report);
            // Timed-out levels are skipped so the whole campaign gets exercised
            if quit || session.advance() == Progress::Finished {
                break;
            }
        }
        Ok(reports)
    }

    fn load(arg: Option<&str>) -> Result<Vec<LevelDef>, ConfigError> {
        match arg {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_string(),
                    source,
                })?;
                load_campaign(&json)
            }
            None => Ok(campaign()),
        }
    }

    pub fn main() -> ExitCode {
        env_logger::init();
        let arg = std::env::args().nth(1);

        if arg.as_deref() == Some("dump") {
            return match serde_json::to_string_pretty(&campaign()) {
                Ok(json) => {
                    println!("{json}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    log::error!("Failed to serialize campaign: {e}");
                    ExitCode::FAILURE
                }
            };
        }

        log::info!("Tidepool (headless) starting...");
        let reports = match load(arg.as_deref()).and_then(|defs| run(&defs)) {
            Ok(reports) => reports,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        };

        let cleared = reports
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Cleared))
            .count();
        println!("{:<24} {:<9} {:>7} {:>6}", "level", "outcome", "frames", "deaths");
        for r in &reports {
            println!(
                "{:<24} {:<9} {:>7} {:>6}",
                r.id,
                format!("{:?}", r.outcome),
                r.frames,
                r.deaths
            );
        }
        println!("Autopilot cleared {cleared}/{} levels", reports.len());
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    host::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is embedded by a web host; there is nothing to run here
}
