//! Surface that records draw calls instead of drawing

use glam::Vec2;

use super::DrawSurface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Resize { width: u32, height: u32 },
    Clear,
    FillCircle { center: Vec2, radius: f32 },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: (u32, u32),
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Everything recorded so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands from the most recent clear onwards
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Clear)
            .unwrap_or(self.commands.len());
        &self.commands[start..]
    }

    /// Circles drawn since the most recent clear
    pub fn last_frame_circles(&self) -> Vec<(Vec2, f32)> {
        self.last_frame()
            .iter()
            .filter_map(|c| match *c {
                DrawCommand::FillCircle { center, radius } => Some((center, radius)),
                _ => None,
            })
            .collect()
    }

    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| **c == DrawCommand::Clear)
            .count()
    }

    /// Forget recorded commands (keeps the size)
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::FillCircle { center, radius });
    }
}
