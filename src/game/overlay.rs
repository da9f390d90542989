//=========================================================================
// Terminal Overlays
//=========================================================================
//
// Game-over and victory panels shown above the last scene. Both display
// the run total and the high score and offer Restart and Main Menu.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Point, Rect, Size};
use crate::core::render::Color;
use crate::core::ui::{Element, ElementId, UiLayer};

//=== Constants ===========================================================

const PANEL_SIZE: Size = Size::new(440.0, 300.0);
const BUTTON_SIZE: Size = Size::new(160.0, 48.0);

//=== Kinds & Actions =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    GameOver,
    Victory,
}

impl OverlayKind {
    fn title(self) -> &'static str {
        match self {
            Self::GameOver => "Game Over!",
            Self::Victory => "Congratulations!",
        }
    }

    fn score_line(self, total: u32) -> String {
        match self {
            Self::GameOver => format!("Final score: {}", total),
            Self::Victory => format!("Total score: {}", total),
        }
    }

    fn accent(self) -> Color {
        match self {
            Self::GameOver => Color::WARNING,
            Self::Victory => Color::rgb(255, 200, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    Restart,
    MainMenu,
}

//=== TerminalOverlay =====================================================

#[derive(Debug, Clone)]
pub struct TerminalOverlay {
    kind: OverlayKind,
    panel: ElementId,
    labels: Vec<ElementId>,
    restart: ElementId,
    menu: ElementId,
}

impl TerminalOverlay {
    /// Builds the overlay in `ui`, centred in `viewport`.
    pub fn show(kind: OverlayKind, total: u32, high: u32, ui: &mut UiLayer, viewport: Size) -> Self {
        let panel = ui.add(Element::panel(Rect::default(), Color::rgba(0, 0, 0, 200)));

        let mut lines: Vec<(String, f32, Color)> = vec![(kind.title().to_string(), 40.0, kind.accent())];
        if kind == OverlayKind::Victory {
            lines.push(("You completed every phase!".to_string(), 20.0, Color::WHITE));
        }
        lines.push((kind.score_line(total), 24.0, Color::WHITE));
        lines.push((format!("High score: {}", high), 20.0, Color::rgb(200, 200, 200)));

        let labels = lines
            .into_iter()
            .map(|(text, size, color)| {
                ui.add(Element::label(text, Point::default(), size).with_color(color).child_of(panel))
            })
            .collect();

        let restart = ui.add(Element::button("Play Again", Rect::default()).child_of(panel));
        let menu = ui.add(Element::button("Main Menu", Rect::default()).child_of(panel));

        let overlay = Self {
            kind,
            panel,
            labels,
            restart,
            menu,
        };
        overlay.layout(ui, viewport);
        overlay
    }

    pub fn kind(&self) -> OverlayKind {
        self.kind
    }

    pub fn restart_button(&self) -> ElementId {
        self.restart
    }

    pub fn menu_button(&self) -> ElementId {
        self.menu
    }

    /// Which action a clicked element triggers, if it belongs to us.
    pub fn action_for(&self, id: ElementId) -> Option<OverlayAction> {
        if id == self.restart {
            Some(OverlayAction::Restart)
        } else if id == self.menu {
            Some(OverlayAction::MainMenu)
        } else {
            None
        }
    }

    pub fn layout(&self, ui: &mut UiLayer, viewport: Size) {
        let panel = Rect::new(
            (viewport.w - PANEL_SIZE.w) / 2.0,
            (viewport.h - PANEL_SIZE.h) / 2.0,
            PANEL_SIZE.w,
            PANEL_SIZE.h,
        );
        ui.set_rect(self.panel, panel);

        let mut y = panel.y + 24.0;
        for &label in &self.labels {
            ui.set_position(label, Point::new(panel.x + 40.0, y));
            y += 48.0;
        }

        let buttons_y = panel.bottom() - BUTTON_SIZE.h - 24.0;
        ui.set_rect(
            self.restart,
            Rect::new(panel.x + 40.0, buttons_y, BUTTON_SIZE.w, BUTTON_SIZE.h),
        );
        ui.set_rect(
            self.menu,
            Rect::new(panel.right() - 40.0 - BUTTON_SIZE.w, buttons_y, BUTTON_SIZE.w, BUTTON_SIZE.h),
        );
    }

    /// Removes the panel and everything inside it.
    pub fn remove(self, ui: &mut UiLayer) {
        ui.remove(self.panel);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
