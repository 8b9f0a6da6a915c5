//! State shared between the frame loop thread and its owner.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use ironclash_core::commands::PlayerCommand;
use ironclash_render::RenderSettings;

/// Commands sent to the frame loop thread.
#[derive(Debug)]
pub enum FrameLoopCommand {
    /// A player command to forward to the arena engine.
    Player(PlayerCommand),
    /// Swap render settings from the next frame on.
    Settings(RenderSettings),
    /// Shut down the frame loop thread gracefully.
    Shutdown,
}

/// What one frame produced. Stored after every frame for polling and
/// returned by the thread when the loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    pub tick: u64,
    pub elapsed_secs: f64,
    pub entities: usize,
    pub drawn: usize,
    pub culled: usize,
    pub draw_commands: usize,
    pub score: f64,
    pub alive: bool,
}

/// Latest report, shared with the frame loop thread.
pub type SharedReport = Arc<Mutex<Option<FrameReport>>>;

pub fn shared_report() -> SharedReport {
    Arc::new(Mutex::new(None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_report_starts_empty() {
        let report = shared_report();
        assert!(report.lock().unwrap().is_none());
    }

    #[test]
    fn test_report_serializes_flat() {
        let report = FrameReport {
            frame: 3,
            alive: true,
            ..Default::default()
        };
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["frame"], 3);
        assert_eq!(json["alive"], true);
    }
}
