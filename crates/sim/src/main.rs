//! Headless Ironwood combat runner.
//!
//! Loads a content directory, enters one map and lets the autopilot fight
//! whatever spawns there for a fixed number of frames.
//!
//! ```bash
//! ironwood-sim --map quarry_boss_room --ticks 900 --seed 7
//! RUST_LOG=ironwood_runtime=debug ironwood-sim --log-file run.log
//! ```

mod autopilot;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use ironwood_content::ContentFactory;
use ironwood_core::{CombatEvent, Position};
use ironwood_runtime::Simulation;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use autopilot::Autopilot;

/// Run a scripted encounter against authored content
#[derive(Parser, Debug)]
#[command(name = "ironwood-sim")]
#[command(about = "Headless combat simulation for Ironwood content", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory holding archetypes.ron, spawns.ron, quests.ron and maps/
    #[arg(long, env = "CONTENT_DATA_DIR", default_value = "crates/game/content/data")]
    content: PathBuf,

    /// Map to enter
    #[arg(long, default_value = "quarry_boss_room")]
    map: String,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 900)]
    ticks: u32,

    /// Frame length in milliseconds
    #[arg(long, default_value_t = 16)]
    dt: u32,

    /// Random seed; omit for an entropy-seeded run
    #[arg(long)]
    seed: Option<u64>,

    /// Player entry tile as `x,y`; defaults to the map's first exit pad
    #[arg(long, value_parser = parse_position)]
    entry: Option<Position>,

    /// Also write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Write the final session snapshot as JSON
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = setup_logging(cli.log_file.as_deref())?;

    let content = ContentFactory::new(&cli.content).load_bundle()?;
    let mut builder = Simulation::builder().content(content);
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    let mut sim = builder.build()?;

    let entry = match cli.entry {
        Some(entry) => entry,
        None => sim
            .map(&cli.map)
            .and_then(|map| map.exits().first().copied())
            .unwrap_or(Position::new(1, 1)),
    };
    sim.enter_map(&cli.map, entry)?;
    tracing::info!(map = cli.map.as_str(), x = entry.x, y = entry.y, "encounter started");

    let summary = run(&mut sim, cli.ticks, cli.dt)?;
    print_summary(&sim, &summary);

    if let Some(path) = &cli.save {
        std::fs::write(path, sim.export_json()?)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        tracing::info!("Snapshot written to {}", path.display());
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Summary {
    frames: u32,
    kills: Vec<String>,
    knocked_out: bool,
}

fn run(sim: &mut Simulation, ticks: u32, dt_ms: u32) -> Result<Summary> {
    let mut pilot = Autopilot::new();
    let mut summary = Summary::default();

    for _ in 0..ticks {
        let input = pilot.next_input(sim, dt_ms);
        let report = sim.update(dt_ms, input)?;
        summary.frames += 1;

        for event in &report.events {
            if let CombatEvent::ActorKilled { archetype, .. } = event {
                summary.kills.push(archetype.clone());
            }
        }
        if report.knocked_out() {
            summary.knocked_out = true;
            tracing::warn!(frame = summary.frames, "player knocked out, stopping");
            break;
        }

        let cleared = sim
            .active_session()
            .is_some_and(|session| session.actors.live_count() == 0);
        if cleared {
            // Collect whatever fell before leaving.
            sweep_ground_items(sim)?;
            tracing::info!(frame = summary.frames, "map cleared");
            break;
        }
    }
    Ok(summary)
}

fn sweep_ground_items(sim: &mut Simulation) -> Result<()> {
    let tiles: Vec<Position> = sim
        .active_session()
        .map(|session| session.ground_items.iter().map(|item| item.position).collect())
        .unwrap_or_default();

    for tile in tiles {
        sim.player_mut().position = tile;
        sim.pickup()?;
    }
    Ok(())
}

fn print_summary(sim: &Simulation, summary: &Summary) {
    let player = sim.player();
    println!("frames:      {}", summary.frames);
    println!("kills:       {}", summary.kills.join(", "));
    println!(
        "player:      {}/{} hp{}",
        player.hp,
        player.max_hp,
        if summary.knocked_out { " (knocked out)" } else { "" }
    );

    let items: Vec<String> = sim
        .inventory()
        .iter()
        .map(|(item, count)| format!("{item} x{count}"))
        .collect();
    println!("inventory:   {}", items.join(", "));

    let flags: Vec<&str> = sim.progress().flags().collect();
    println!("flags:       {}", flags.join(", "));
}

/// Setup logging to stderr and, if requested, to a file.
///
/// The returned guard flushes the file writer on drop.
fn setup_logging(
    log_file: Option<&Path>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("Log path {} has no file name", path.display()))?;
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}", path.display());
    Ok(Some(guard))
}

fn parse_position(raw: &str) -> Result<Position, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{raw}'"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok(Position::new(x, y))
}
