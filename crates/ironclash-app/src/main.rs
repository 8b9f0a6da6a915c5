//! Headless IRONCLASH arena run.
//!
//! Populates the demo arena, lets the player tank fire while the frame loop
//! advances and draws, then prints the last frame report as JSON.

use std::path::{Path, PathBuf};

use clap::Parser;
use env_logger::{Builder, Env};
use log::{info, warn, LevelFilter};

use ironclash_app::frame_loop::{spawn_frame_loop, FrameLoopConfig};
use ironclash_app::state::{shared_report, FrameLoopCommand};
use ironclash_core::commands::PlayerCommand;
use ironclash_core::config::ConfigRegistry;
use ironclash_render::RenderSettings;
use ironclash_sim::SimConfig;

/// IRONCLASH headless arena
#[derive(Parser)]
#[command(version, about = "Runs the arena headless and reports the last frame")]
struct Cli {
    /// Number of frames to run.
    #[arg(long, default_value_t = 300)]
    frames: u64,

    /// RNG seed. Same seed = same arena.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Render settings JSON.
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Extra tank classes JSON (class id -> configuration).
    #[arg(long, value_name = "PATH")]
    classes: Option<PathBuf>,

    /// Class of the player tank.
    #[arg(long, default_value = "basic")]
    class: String,

    /// Run frames back to back instead of at the tick rate.
    #[arg(long)]
    fast: bool,

    /// Log debug messages.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = Builder::from_env(Env::default().default_filter_or(level.to_string())).try_init();
}

fn load_settings(path: Option<&Path>) -> RenderSettings {
    let Some(path) = path else {
        return RenderSettings::default();
    };
    match RenderSettings::load(path) {
        Ok(settings) => settings,
        Err(err) => {
            warn!("{}: {err}, using default render settings", path.display());
            RenderSettings::default()
        }
    }
}

fn load_classes(path: Option<&Path>) -> Option<ConfigRegistry> {
    let path = path?;
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!("cannot read {}: {err}", path.display());
            return None;
        }
    };
    match ConfigRegistry::from_text(&text) {
        Ok(classes) => {
            info!("loaded {} classes from {}", classes.len(), path.display());
            Some(classes)
        }
        Err(err) => {
            warn!("{}: {err}", path.display());
            None
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = FrameLoopConfig {
        sim: SimConfig {
            seed: cli.seed,
            ..Default::default()
        },
        settings: load_settings(cli.settings.as_deref()),
        player_class: cli.class.clone(),
        classes: load_classes(cli.classes.as_deref()),
        max_frames: Some(cli.frames),
        paced: !cli.fast,
        ..Default::default()
    };

    let (cmd_tx, handle) = spawn_frame_loop(config, shared_report());
    for command in [
        PlayerCommand::Aim { rotation: 0.0 },
        PlayerCommand::SetFiring { held: true },
    ] {
        if cmd_tx.send(FrameLoopCommand::Player(command)).is_err() {
            warn!("frame loop exited before accepting commands");
            break;
        }
    }

    match handle.join() {
        Ok(Some(report)) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => warn!("cannot encode frame report: {err}"),
        },
        Ok(None) => {
            warn!("no frame was drawn");
            std::process::exit(1);
        }
        Err(_) => {
            warn!("frame loop panicked");
            std::process::exit(2);
        }
    }
}
