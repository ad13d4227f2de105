mod app;
mod config;
mod driver;
mod event;
mod gamestate;
mod interact;
mod npc;
mod player;
mod raycast;
mod worldgen;

#[cfg(test)]
mod scenario_tests;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, channel};

use clap::Parser;
use voxelcraft_world::WorldGenMode;
use voxelcraft_world::worldgen::load_params_from_path;

use app::Simulation;
use config::{SimConfig, SizeSetting, load_config_or_default};
use driver::ScriptedDriver;

#[derive(Parser, Debug)]
#[command(name = "voxelcraft", about = "Headless voxel world simulation")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// World side length (16..=1024)
    #[arg(long)]
    size: Option<String>,
    /// terrain | flat
    #[arg(long, value_parser = parse_mode)]
    mode: Option<WorldGenMode>,
    /// TOML file with terrain height parameters
    #[arg(long)]
    terrain: Option<PathBuf>,
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    #[arg(long)]
    seed: Option<u64>,
    /// Also write the log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Reset the world whenever the config file changes
    #[arg(long, default_value_t = false)]
    watch: bool,
}

fn parse_mode(s: &str) -> Result<WorldGenMode, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "terrain" => Ok(WorldGenMode::Terrain),
        "flat" => Ok(WorldGenMode::Flat),
        other => Err(format!("unknown world mode '{other}' (terrain|flat)")),
    }
}

fn init_logging(log_file: Option<&Path>) {
    if let Some(path) = log_file {
        use simplelog::{
            ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger,
        };
        match File::create(path) {
            Ok(file) => {
                let res = CombinedLogger::init(vec![
                    TermLogger::new(
                        LevelFilter::Info,
                        Config::default(),
                        TerminalMode::Mixed,
                        ColorChoice::Auto,
                    ),
                    WriteLogger::new(LevelFilter::Trace, Config::default(), file),
                ]);
                if res.is_ok() {
                    log::info!("logging to {}", path.display());
                    return;
                }
            }
            Err(e) => eprintln!("cannot open log file {}: {}", path.display(), e),
        }
    }
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Applies CLI overrides on top of the file config.
fn effective_config(args: &Args) -> SimConfig {
    let mut cfg = match &args.config {
        Some(p) => load_config_or_default(p),
        None => SimConfig::default(),
    };
    if let Some(s) = &args.size {
        cfg.world.size = SizeSetting::Text(s.clone());
    }
    if let Some(m) = args.mode {
        cfg.world.mode = m;
    }
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if let Some(p) = &args.terrain {
        match load_params_from_path(p) {
            Ok(params) => cfg.terrain = params,
            Err(e) => log::warn!("terrain params {} unusable ({}); keeping current", p.display(), e),
        }
    }
    cfg
}

/// Spawns a thread that signals on `rx` whenever `path` changes.
fn watch_config(path: PathBuf) -> Receiver<()> {
    let (tx, rx) = channel::<()>();
    std::thread::spawn(move || {
        use notify::{EventKind, RecursiveMode, Watcher};
        match notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                match event.kind {
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any => {
                        let _ = tx.send(());
                    }
                    _ => {}
                }
            }
        }) {
            Ok(mut watcher) => {
                if let Err(e) = watcher.watch(&path, RecursiveMode::NonRecursive) {
                    log::warn!("cannot watch {}: {}", path.display(), e);
                    return;
                }
                loop {
                    std::thread::sleep(std::time::Duration::from_secs(3600));
                }
            }
            Err(e) => log::warn!("config watcher unavailable: {}", e),
        }
    });
    rx
}

fn main() {
    let args = Args::parse();
    init_logging(args.log_file.as_deref());

    let mut sim = Simulation::new(effective_config(&args));
    let reload = match (&args.config, args.watch) {
        (Some(p), true) => Some(watch_config(p.clone())),
        _ => None,
    };

    let mut driver = ScriptedDriver::new();
    let mut edits = 0usize;
    let mut mined = 0usize;
    for _ in 0..args.ticks {
        if let Some(rx) = &reload {
            if rx.try_iter().count() > 0 {
                log::info!("config changed; resetting world");
                sim.reconfigure(effective_config(&args));
            }
        }
        let frame = driver.next_frame();
        let r = sim.step(&frame, args.dt);
        edits += [r.place, r.remove]
            .into_iter()
            .flatten()
            .filter_map(|e| e.applied())
            .count();
        mined += r.npc_mined;
        let t = &sim.telemetry;
        if t.tick % 60 == 0 {
            log::info!(
                "tick {} pos=({:.2},{:.2},{:.2}) grounded={} fps={:.0} chunks={} edits={} npcs={} block={}",
                t.tick,
                t.position.x,
                t.position.y,
                t.position.z,
                t.grounded,
                t.fps,
                t.live_chunks,
                t.edit_count,
                t.npc_count,
                t.selected
            );
        }
    }
    let stats = sim.state.chunks.stats();
    log::info!(
        "done: {} ticks in {}; player edits={} npc mined={} chunk builds={} disposals={} released={}B",
        sim.telemetry.tick,
        sim.telemetry.world,
        edits,
        mined,
        stats.builds,
        stats.disposals,
        stats.bytes_released
    );
}
