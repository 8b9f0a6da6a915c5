//! Backend that records draw calls instead of producing pixels.
//!
//! Used by headless runs and by tests that check draw order, composite
//! modes and dispatch without caring about rasterization.

use glam::{DAffine2, DVec2};

use ironclash_core::types::Color;

use crate::context::{CompositeMode, DrawContext, Paint, TextStyle};
use crate::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Fill {
        path: Path,
        paint: Paint,
        transform: DAffine2,
        alpha: f64,
        composite: CompositeMode,
    },
    Stroke {
        path: Path,
        paint: Paint,
        width: f64,
        transform: DAffine2,
        alpha: f64,
        composite: CompositeMode,
    },
    Text {
        text: String,
        anchor: DVec2,
        style: TextStyle,
        transform: DAffine2,
        alpha: f64,
    },
    BeginGroup(String),
    EndGroup,
}

impl DrawCommand {
    pub fn composite(&self) -> Option<CompositeMode> {
        match self {
            DrawCommand::Fill { composite, .. } | DrawCommand::Stroke { composite, .. } => {
                Some(*composite)
            }
            _ => None,
        }
    }

    pub fn is_paint(&self) -> bool {
        matches!(
            self,
            DrawCommand::Fill { .. } | DrawCommand::Stroke { .. } | DrawCommand::Text { .. }
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct State {
    transform: DAffine2,
    alpha: f64,
    composite: CompositeMode,
}

impl Default for State {
    fn default() -> Self {
        Self {
            transform: DAffine2::IDENTITY,
            alpha: 1.0,
            composite: CompositeMode::SourceOver,
        }
    }
}

pub struct RecordingContext {
    size: DVec2,
    state: State,
    stack: Vec<State>,
    commands: Vec<DrawCommand>,
}

impl RecordingContext {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: DVec2::new(width, height),
            state: State::default(),
            stack: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands, keeping the state stack.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Labels of every group in the order they were opened.
    pub fn groups(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::BeginGroup(label) => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Commands between the opening of `label` and its matching close.
    pub fn group(&self, label: &str) -> &[DrawCommand] {
        let Some(start) = self
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::BeginGroup(l) if l == label))
        else {
            return &[];
        };
        let mut depth = 0usize;
        for (offset, command) in self.commands[start + 1..].iter().enumerate() {
            match command {
                DrawCommand::BeginGroup(_) => depth += 1,
                DrawCommand::EndGroup if depth == 0 => {
                    return &self.commands[start + 1..start + 1 + offset];
                }
                DrawCommand::EndGroup => depth -= 1,
                _ => {}
            }
        }
        &self.commands[start + 1..]
    }

    /// Depth of the save stack; 0 when every save was restored.
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }
}

impl DrawContext for RecordingContext {
    fn size(&self) -> DVec2 {
        self.size
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn transform(&mut self, transform: DAffine2) {
        self.state.transform = self.state.transform * transform;
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.state.composite = mode;
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            paint: paint.clone(),
            transform: self.state.transform,
            alpha: self.state.alpha,
            composite: self.state.composite,
        });
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint, width: f64) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            paint: paint.clone(),
            width,
            transform: self.state.transform,
            alpha: self.state.alpha,
            composite: self.state.composite,
        });
    }

    fn fill_text(&mut self, text: &str, anchor: DVec2, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            anchor,
            style: *style,
            transform: self.state.transform,
            alpha: self.state.alpha,
        });
    }

    fn begin_group(&mut self, label: &str) {
        self.commands.push(DrawCommand::BeginGroup(label.to_string()));
    }

    fn end_group(&mut self) {
        self.commands.push(DrawCommand::EndGroup);
    }
}
