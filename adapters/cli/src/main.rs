#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line adapter that plays Hero Defence waves to completion.

mod hero_spec;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use hero_defence_catalog::Catalog;
use hero_defence_core::{Command, Event};
use hero_defence_world::{apply, query, Config, World};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hero_spec::HeroSpec;

const FRAME: Duration = Duration::from_millis(50);

/// Command-line arguments accepted by the simulation runner.
#[derive(Debug, Parser)]
#[command(name = "hero-defence", about = "Runs Hero Defence waves headlessly")]
struct Args {
    /// Seed of the random source; overrides the configuration file.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of waves to play.
    #[arg(long, default_value_t = 3)]
    waves: u32,
    /// Game speed multiplier.
    #[arg(long, default_value_t = 1.0)]
    speed: f32,
    /// TOML file overriding the built-in catalog tables.
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// TOML file holding the world configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Hero to place before the first wave, written `class@column,row`.
    #[arg(long = "hero", value_name = "CLASS@COL,ROW")]
    heroes: Vec<HeroSpec>,
    /// Upper bound of simulated seconds per wave.
    #[arg(long, default_value_t = 600)]
    max_seconds: u64,
    /// Log filter directive, for example `debug` or `hero_defence_world=trace`.
    #[arg(long)]
    log: Option<String>,
}

/// Totals gathered while a wave is played.
#[derive(Debug, Default)]
struct WaveReport {
    defeated: usize,
    escaped: usize,
    completed: bool,
    game_over: bool,
}

impl WaveReport {
    fn outcome(&self) -> &'static str {
        if self.completed {
            "cleared"
        } else if self.game_over {
            "lost"
        } else {
            "unfinished"
        }
    }

    fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::EnemyDefeated { .. } => self.defeated += 1,
                Event::EnemyEscaped { .. } => self.escaped += 1,
                Event::WaveCompleted { .. } => self.completed = true,
                Event::GameOver { .. } => self.game_over = true,
                _ => {}
            }
        }
    }
}

/// Entry point for the Hero Defence command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log.as_deref())?;

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog overrides from {}", path.display()))?,
        None => Catalog::standard(),
    };
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if !args.speed.is_finite() || args.speed <= 0.0 {
        bail!("game speed must be a positive number, got {}", args.speed);
    }

    let mut world = World::with_catalog(config, catalog);
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::SetGameSpeed {
            multiplier: args.speed,
        },
        &mut events,
    );
    for spec in &args.heroes {
        events.clear();
        apply(
            &mut world,
            Command::PlaceHero {
                class: spec.class,
                cell: spec.cell,
            },
            &mut events,
        );
        for event in &events {
            if let Event::HeroPlacementRejected { reason, .. } = event {
                warn!(class = spec.class.key(), cell = ?spec.cell, %reason, "hero not placed");
            }
        }
    }

    let limit = Duration::from_secs(args.max_seconds);
    for _ in 0..args.waves {
        let wave = query::snapshot(&world).wave;
        let report = play_wave(&mut world, limit)?;
        let snapshot = query::snapshot(&world);
        println!(
            "wave {wave} {}: {} defeated, {} escaped, gold {}, lives {}",
            report.outcome(),
            report.defeated,
            report.escaped,
            snapshot.gold,
            snapshot.lives,
        );
        if report.game_over {
            break;
        }
        if !report.completed {
            warn!(wave, "stopping after an unfinished wave");
            break;
        }
    }

    let snapshot = query::snapshot(&world);
    println!(
        "final: wave {}, gold {}, lives {}, heroes {}",
        snapshot.wave,
        snapshot.gold,
        snapshot.lives,
        snapshot.heroes.len()
    );
    for hero in &snapshot.heroes {
        println!(
            "  {} #{} at ({}, {}): level {}, experience {}",
            hero.class.key(),
            hero.id.get(),
            hero.cell.column(),
            hero.cell.row(),
            hero.level,
            hero.experience
        );
    }
    Ok(())
}

fn init_tracing(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter '{directive}'"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration at {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse configuration at {}", path.display()))
}

fn play_wave(world: &mut World, limit: Duration) -> Result<WaveReport> {
    let mut report = WaveReport::default();
    let mut events = Vec::new();
    apply(world, Command::StartNextWave, &mut events);
    if let Some(Event::WaveStartRejected { reason }) = events.first() {
        bail!("wave could not start: {reason}");
    }

    let mut elapsed = Duration::ZERO;
    while elapsed < limit {
        events.clear();
        apply(world, Command::Tick { dt: FRAME }, &mut events);
        report.record(&events);
        if report.completed || report.game_over {
            return Ok(report);
        }
        elapsed += FRAME;
    }

    info!(seconds = limit.as_secs(), "wave did not finish in time");
    Ok(report)
}
