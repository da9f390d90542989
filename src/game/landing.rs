//=========================================================================
// Landing Page
//=========================================================================
//
// Start screen. Play (button or Enter) asks the manager to start a run;
// Info toggles an instructions panel.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Point, Rect, Size};
use crate::core::globals::GlobalContext;
use crate::core::input::KeyCode;
use crate::core::render::Color;
use crate::core::scene::{Scene, SceneBase};
use crate::core::ui::{Element, ElementId, UiEvent};

use super::events::MenuCommand;

//=== Constants ===========================================================

const PANEL_SIZE: Size = Size::new(520.0, 360.0);
const INSTRUCTIONS: [&str; 3] = [
    "Type a word and press Start.",
    "Steer with WASD or the arrow keys to the letter shown on top.",
    "Wrong letters cost a life. ESC pauses.",
];

//=== LandingPage =========================================================

#[derive(Debug, Clone, Copy)]
struct Overlay {
    panel: ElementId,
    play: ElementId,
    info: ElementId,
    instructions: ElementId,
}

pub struct LandingPage {
    base: SceneBase,
    overlay: Option<Overlay>,
}

impl LandingPage {
    pub fn new() -> Self {
        Self {
            base: SceneBase::new("LandingPage"),
            overlay: None,
        }
    }

    pub fn play_button(&self) -> Option<ElementId> {
        self.overlay.map(|o| o.play)
    }

    pub fn info_button(&self) -> Option<ElementId> {
        self.overlay.map(|o| o.info)
    }

    pub fn instructions(&self) -> Option<ElementId> {
        self.overlay.map(|o| o.instructions)
    }

    fn panel_rect(viewport: Size) -> Rect {
        Rect::new(
            (viewport.w - PANEL_SIZE.w) / 2.0,
            (viewport.h - PANEL_SIZE.h) / 2.0,
            PANEL_SIZE.w,
            PANEL_SIZE.h,
        )
    }

    /// Lays out every overlay element relative to the panel.
    fn layout(&self, ctx: &mut GlobalContext) {
        let Some(overlay) = self.overlay else {
            return;
        };
        let panel = Self::panel_rect(ctx.viewport);
        let at = |dx: f32, dy: f32| Point::new(panel.x + dx, panel.y + dy);

        ctx.ui.set_rect(overlay.panel, panel);
        ctx.ui.set_rect(overlay.play, Rect::from_parts(at(60.0, 250.0), Size::new(180.0, 50.0)));
        ctx.ui.set_rect(overlay.info, Rect::from_parts(at(280.0, 250.0), Size::new(180.0, 50.0)));
        ctx.ui.set_position(overlay.instructions, at(30.0, 120.0));
    }

    fn set_overlay_visible(&self, ctx: &mut GlobalContext, visible: bool) {
        if let Some(overlay) = self.overlay {
            ctx.ui.set_visible(overlay.panel, visible);
        }
    }

    fn toggle_instructions(&self, ctx: &mut GlobalContext) {
        if let Some(overlay) = self.overlay {
            let shown = ctx
                .ui
                .get(overlay.instructions)
                .is_some_and(|element| element.visible);
            debug!("Instructions {}", if shown { "hidden" } else { "shown" });
            ctx.ui.set_visible(overlay.instructions, !shown);
        }
    }

    fn start_game(&self, ctx: &mut GlobalContext) {
        debug!("Play requested");
        ctx.message_bus.push(MenuCommand::StartGame);
    }
}

impl Default for LandingPage {
    fn default() -> Self {
        Self::new()
    }
}

//=== Scene Implementation ================================================

impl Scene for LandingPage {
    fn base(&self) -> &SceneBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SceneBase {
        &mut self.base
    }

    fn setup(&mut self, ctx: &mut GlobalContext) {
        let panel = ctx.ui.add(
            Element::panel(Self::panel_rect(ctx.viewport), Color::rgba(20, 40, 60, 230)).hidden(),
        );
        let title = ctx.ui.add(
            Element::label("NEUROBEEP", Point::default(), 48.0)
                .with_color(Color::rgb(130, 210, 250))
                .child_of(panel),
        );
        let subtitle = ctx.ui.add(
            Element::label("Catch the right letter!", Point::default(), 20.0)
                .with_color(Color::WHITE)
                .child_of(panel),
        );
        let play = ctx.ui.add(Element::button("Play", Rect::default()).child_of(panel));
        let info = ctx.ui.add(Element::button("Info", Rect::default()).child_of(panel));
        let instructions = ctx.ui.add(
            Element::label(INSTRUCTIONS.join("\n"), Point::default(), 16.0)
                .with_color(Color::WHITE)
                .child_of(panel)
                .hidden(),
        );

        for id in [panel, title, subtitle, play, info, instructions] {
            self.base.own(id);
        }
        self.overlay = Some(Overlay {
            panel,
            play,
            info,
            instructions,
        });

        self.layout(ctx);
        let origin = Self::panel_rect(ctx.viewport).origin();
        ctx.ui.set_position(title, Point::new(origin.x + 120.0, origin.y + 30.0));
        ctx.ui.set_position(subtitle, Point::new(origin.x + 140.0, origin.y + 90.0));
    }

    fn enter(&mut self, ctx: &mut GlobalContext) {
        self.base.set_active(true);
        self.set_overlay_visible(ctx, true);
    }

    fn exit(&mut self, ctx: &mut GlobalContext) {
        self.base.set_active(false);
        self.set_overlay_visible(ctx, false);
    }

    fn cleanup(&mut self, ctx: &mut GlobalContext) {
        self.base.release_elements(&mut ctx.ui);
        self.overlay = None;
    }

    fn draw(&mut self, ctx: &mut GlobalContext) {
        if !self.is_active() {
            return;
        }
        let viewport = ctx.viewport;
        ctx.draw_list.rect(
            Rect::new(0.0, 0.0, viewport.w, viewport.h),
            Color::rgba(46, 153, 191, 25),
        );
    }

    fn handle_resize(&mut self, ctx: &mut GlobalContext) {
        self.layout(ctx);
    }

    fn handle_mouse_pressed(&mut self, ctx: &mut GlobalContext) {
        let Some(overlay) = self.overlay else {
            return;
        };
        let clicks: Vec<UiEvent> = ctx.message_bus.read::<UiEvent>().to_vec();
        for UiEvent::Clicked(id) in clicks {
            if id == overlay.play {
                self.start_game(ctx);
            } else if id == overlay.info {
                self.toggle_instructions(ctx);
            }
        }
    }

    fn handle_key_pressed(&mut self, key: KeyCode, ctx: &mut GlobalContext) {
        if key == KeyCode::Enter && self.is_active() {
            self.start_game(ctx);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::{AssetLoader, MemoryImageSource};

    fn activate() -> (LandingPage, GlobalContext) {
        let mut ctx = GlobalContext::new(
            AssetLoader::inline(MemoryImageSource::new()),
            Size::new(1280.0, 720.0),
        );
        let mut page = LandingPage::new();
        page.setup(&mut ctx);
        page.enter(&mut ctx);
        (page, ctx)
    }

    #[test]
    fn play_click_requests_game_start() {
        let (mut page, mut ctx) = activate();
        ctx.message_bus.push(UiEvent::Clicked(page.play_button().unwrap()));

        page.handle_mouse_pressed(&mut ctx);

        assert_eq!(ctx.message_bus.read::<MenuCommand>(), &[MenuCommand::StartGame]);
    }

    #[test]
    fn enter_requests_game_start() {
        let (mut page, mut ctx) = activate();
        page.handle_key_pressed(KeyCode::Enter, &mut ctx);
        assert_eq!(ctx.message_bus.count::<MenuCommand>(), 1);
    }

    #[test]
    fn info_toggles_instructions() {
        let (mut page, mut ctx) = activate();
        let instructions = page.instructions().unwrap();
        assert!(!ctx.ui.is_visible(instructions));

        ctx.message_bus.push(UiEvent::Clicked(page.info_button().unwrap()));
        page.handle_mouse_pressed(&mut ctx);
        assert!(ctx.ui.is_visible(instructions));

        page.handle_mouse_pressed(&mut ctx);
        assert!(!ctx.ui.is_visible(instructions));
    }

    #[test]
    fn overlay_follows_activation() {
        let (mut page, mut ctx) = activate();
        let play = page.play_button().unwrap();
        assert!(ctx.ui.is_visible(play));

        page.exit(&mut ctx);
        assert!(!ctx.ui.is_visible(play));

        page.cleanup(&mut ctx);
        assert!(ctx.ui.is_empty());
    }

    #[test]
    fn play_button_is_clickable_at_its_position() {
        let (page, mut ctx) = activate();
        let play = page.play_button().unwrap();
        let rect = ctx.ui.get(play).unwrap().rect;

        let hit = ctx.ui.click_at(Point::new(rect.x + 5.0, rect.y + 5.0));

        assert_eq!(hit, Some(play));
    }
}
