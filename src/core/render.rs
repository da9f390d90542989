//=========================================================================
// Draw List
//=========================================================================
//
// Per-frame command buffer. Scenes record what to draw; a renderer
// consumes the list after the tick and the list is cleared before the
// next frame.
//
// Architecture:
//   Scene::draw() → DrawList::push(..) → renderer (external) → clear()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use image::RgbaImage;

//=== Internal Dependencies ===============================================

use super::geometry::{Point, Rect};

//=== Color ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BACKGROUND: Color = Color::rgb(220, 235, 245);
    pub const PLAYER: Color = Color::rgb(40, 120, 220);
    pub const HIGHLIGHT: Color = Color::rgb(30, 160, 60);
    pub const WARNING: Color = Color::rgb(200, 40, 40);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

//=== DrawCommand =========================================================

#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Fill the whole viewport.
    Clear(Color),
    Rect { rect: Rect, color: Color },
    Text { text: String, position: Point, size: f32, color: Color },
    Image { image: Arc<RgbaImage>, rect: Rect },
}

//=== DrawList ============================================================

#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_screen(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    pub fn rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    pub fn text(&mut self, text: impl Into<String>, position: Point, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            position,
            size,
            color,
        });
    }

    pub fn image(&mut self, image: Arc<RgbaImage>, rect: Rect) {
        self.commands.push(DrawCommand::Image { image, rect });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Hands the recorded frame to a renderer, leaving the list empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// `true` if any text command contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.commands.iter().any(|command| {
            matches!(command, DrawCommand::Text { text, .. } if text.contains(needle))
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
