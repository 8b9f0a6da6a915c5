//! Frame loop thread: advance the arena, then draw it, once per frame.
//!
//! The engine and renderer are created inside the thread since the
//! renderer's caches are not `Send`. Commands arrive via an `mpsc` channel
//! and are drained at the frame boundary. The latest [`FrameReport`] is
//! stored in shared state for polling.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use glam::DVec2;
use log::{info, warn};

use ironclash_core::config::{ConfigError, ConfigRegistry};
use ironclash_core::constants::TICK_RATE;
use ironclash_core::presets::DEFAULT_CLASS;
use ironclash_core::state::FrameSnapshot;
use ironclash_core::types::Camera;
use ironclash_render::{RecordingContext, RenderSettings, Renderer};
use ironclash_sim::{ArenaEngine, SimConfig};

use crate::state::{FrameLoopCommand, FrameReport, SharedReport};

/// Nominal duration of one frame at 1x speed.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Everything needed to start a frame loop.
#[derive(Debug, Clone)]
pub struct FrameLoopConfig {
    pub sim: SimConfig,
    pub settings: RenderSettings,
    pub viewport: DVec2,
    pub player_class: String,
    /// Extra classes registered on top of the built-in ones.
    pub classes: Option<ConfigRegistry>,
    /// Stop after this many frames; `None` runs until shutdown.
    pub max_frames: Option<u64>,
    /// Sleep to hold the frame rate. Off for tests and batch runs.
    pub paced: bool,
}

impl Default for FrameLoopConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            settings: RenderSettings::default(),
            viewport: DVec2::new(1280.0, 720.0),
            player_class: DEFAULT_CLASS.to_string(),
            classes: None,
            max_frames: None,
            paced: true,
        }
    }
}

/// Camera following the player, zoomed out by its field of view.
pub fn follow_camera(snapshot: &FrameSnapshot, fallback: DVec2) -> Camera {
    let position = snapshot
        .player()
        .map(|p| p.transform.position)
        .unwrap_or(fallback);
    let fov = snapshot.player_state.fov;
    let zoom = if fov.is_finite() && fov > 0.0 { 1.0 / fov } else { 1.0 };
    Camera::looking_at(position, zoom)
}

/// One arena plus the renderer drawing it.
pub struct FrameLoop {
    engine: ArenaEngine,
    renderer: Renderer<RecordingContext>,
    settings: RenderSettings,
    frame: u64,
}

impl FrameLoop {
    pub fn new(config: &FrameLoopConfig) -> Result<Self, ConfigError> {
        let mut engine = ArenaEngine::new(config.sim.clone());
        if let Some(classes) = &config.classes {
            engine.register_classes(classes.clone());
        }
        engine.populate_arena(&config.player_class)?;
        let mut renderer = Renderer::new(RecordingContext::new(config.viewport.x, config.viewport.y));
        renderer.set_world_size(engine.world_size());
        Ok(Self {
            engine,
            renderer,
            settings: config.settings.sanitized(),
            frame: 0,
        })
    }

    /// Apply a command. Returns `false` when the loop should stop.
    pub fn handle(&mut self, command: FrameLoopCommand) -> bool {
        match command {
            FrameLoopCommand::Player(command) => self.engine.queue_command(command),
            FrameLoopCommand::Settings(settings) => self.settings = settings.sanitized(),
            FrameLoopCommand::Shutdown => return false,
        }
        true
    }

    /// Advance one tick, then draw the result.
    pub fn frame(&mut self) -> FrameReport {
        let snapshot = self.engine.tick();
        let center = DVec2::splat(self.engine.world_size() * 0.5);
        let camera = follow_camera(&snapshot, center);
        self.renderer.draw(
            &snapshot.entities,
            snapshot.player,
            &snapshot.player_state,
            &camera,
            &self.settings,
            self.engine.registry(),
        );
        let draw_commands = self.renderer.context_mut().take_commands().len();
        let stats = self.renderer.frame_stats();
        self.frame += 1;
        FrameReport {
            frame: self.frame,
            tick: snapshot.time.tick,
            elapsed_secs: snapshot.time.elapsed_secs,
            entities: snapshot.entities.len(),
            drawn: stats.drawn,
            culled: stats.culled,
            draw_commands,
            score: snapshot.player_state.score,
            alive: snapshot.player_state.alive,
        }
    }

    pub fn engine(&self) -> &ArenaEngine {
        &self.engine
    }
}

/// Spawns the frame loop in a new thread.
///
/// Returns the command sender and the handle yielding the last report.
pub fn spawn_frame_loop(
    config: FrameLoopConfig,
    latest: SharedReport,
) -> (mpsc::Sender<FrameLoopCommand>, JoinHandle<Option<FrameReport>>) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<FrameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("ironclash-frame-loop".into())
        .spawn(move || run_frame_loop(&config, cmd_rx, &latest))
        .expect("failed to spawn frame loop thread");

    (cmd_tx, handle)
}

/// Runs until `Shutdown`, channel disconnect or the frame limit.
fn run_frame_loop(
    config: &FrameLoopConfig,
    cmd_rx: mpsc::Receiver<FrameLoopCommand>,
    latest: &SharedReport,
) -> Option<FrameReport> {
    let mut frame_loop = match FrameLoop::new(config) {
        Ok(frame_loop) => frame_loop,
        Err(err) => {
            warn!("cannot start frame loop: {err}");
            return None;
        }
    };
    info!(
        "frame loop started (class `{}`, seed {})",
        config.player_class, config.sim.seed
    );
    let mut last = None;
    let mut next_frame_time = Instant::now();

    'frames: loop {
        if config.max_frames.is_some_and(|max| frame_loop.frame >= max) {
            break;
        }

        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(command) => {
                    if !frame_loop.handle(command) {
                        break 'frames;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break 'frames,
            }
        }

        // 2. Advance, then draw
        let report = frame_loop.frame();
        if let Ok(mut lock) = latest.lock() {
            *lock = Some(report);
        }
        last = Some(report);

        if !config.paced {
            continue;
        }

        // 3. Sleep until the next frame, adjusting for time scale
        let time_scale = frame_loop.engine().time_scale();
        let effective_frame_duration = if time_scale > 0.001 {
            FRAME_DURATION.div_f64(time_scale)
        } else {
            FRAME_DURATION
        };
        next_frame_time += effective_frame_duration;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > effective_frame_duration * 2 {
            // Too far behind; reset instead of catching up
            next_frame_time = now;
        }
    }

    info!("frame loop stopped after {} frames", frame_loop.frame);
    last
}
