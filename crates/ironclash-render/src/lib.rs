//! Drawing for the IRONCLASH arena.
//!
//! Renderers never touch a concrete graphics API. Everything draws through
//! the [`DrawContext`] capability trait, so the same code targets the
//! command recorder (tests, headless runs) and the software raster surface.
//! The [`Renderer`] composes the per-role renderers into a layered frame.

pub mod boss;
pub mod context;
pub mod effects;
pub mod overlay;
pub mod path;
pub mod pattern;
pub mod post;
pub mod raster;
pub mod recording;
pub mod renderer;
pub mod settings;
pub mod shape;
pub mod style;
pub mod tank;
pub mod world;

pub use context::{CompositeMode, DrawContext, Paint, TextStyle};
pub use path::Path;
pub use raster::RasterSurface;
pub use recording::RecordingContext;
pub use renderer::{Layer, Renderer};
pub use settings::{RenderSettings, SettingsError};

#[cfg(test)]
mod tests;
