//=========================================================================
// Game Manager
//=========================================================================
//
// Owns the scene registry, the shared context and the run totals. Scenes
// report outcomes as typed messages; the manager drains them at the end
// of every tick and applies the resulting transitions.
//
// Tick order:
//   input → asset polling → resize → typed text → keys → mouse
//         → active scene draw → UI draw → event processing → bus clear
//
// Run flow:
//   Landing ──StartGame──→ Phase(1) ──Completed──→ Phase(next) | Victory
//                              └──GameOver──→ Game-over overlay
//   Overlay: Play Again → Phase(1), Main Menu → Landing
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Point, Size};
use crate::core::globals::GlobalContext;
use crate::core::input::{InputEvent, KeyCode, MouseButton};
use crate::core::scene::{Scene, SceneKey, SceneManager};
use crate::core::storage::HighScoreStore;
use crate::core::ui::UiEvent;

use super::events::{MenuCommand, PhaseEvent};
use super::overlay::{OverlayAction, OverlayKind, TerminalOverlay};

//=== SceneId =============================================================

/// Registry keys: the landing page and numbered phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Landing,
    Phase(u32),
}

impl SceneKey for SceneId {}

//=== PhaseProgression ====================================================

/// Where a completed phase leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseProgression {
    /// Every completion returns to phase 1, accumulating the total.
    #[default]
    Loop,
    /// Go to phase `n + 1`; victory once it is not registered.
    Advance,
}

//=== RunState ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct RunState {
    total_score: u32,
    current_phase: u32,
    high_score: u32,
}

//=== FrameInput ==========================================================

/// Everything the host delivers for one tick.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    pub resized: Option<Size>,
    pub dt: Duration,
}

impl FrameInput {
    pub fn new(dt: Duration) -> Self {
        Self {
            dt,
            ..Self::default()
        }
    }

    pub fn with_events(mut self, events: impl IntoIterator<Item = InputEvent>) -> Self {
        self.events.extend(events);
        self
    }

    pub fn with_resize(mut self, size: Size) -> Self {
        self.resized = Some(size);
        self
    }
}

//=== GameManager =========================================================

pub struct GameManager {
    scenes: SceneManager<SceneId>,
    context: GlobalContext,
    store: Box<dyn HighScoreStore>,
    run: RunState,
    progression: PhaseProgression,
    overlay: Option<TerminalOverlay>,
}

impl GameManager {
    //--- Construction -----------------------------------------------------

    /// Creates a manager and reads the stored high score.
    pub fn new(context: GlobalContext, store: impl HighScoreStore + 'static) -> Self {
        let store: Box<dyn HighScoreStore> = Box::new(store);
        let high_score = Self::load_high_score(store.as_ref());
        info!("Game manager ready, high score {}", high_score);

        Self {
            scenes: SceneManager::new(),
            context,
            store,
            run: RunState {
                high_score,
                ..RunState::default()
            },
            progression: PhaseProgression::default(),
            overlay: None,
        }
    }

    pub fn with_progression(mut self, progression: PhaseProgression) -> Self {
        self.progression = progression;
        self
    }

    //--- Registration -----------------------------------------------------

    /// Registers `scene` under `key`, replacing any previous one.
    pub fn add_scene<T>(&mut self, key: SceneId, scene: T)
    where
        T: Scene + 'static,
    {
        self.scenes.register_scene(key, scene, &mut self.context);
    }

    //--- Transitions ------------------------------------------------------

    /// First activation.
    pub fn init(&mut self, start: SceneId) {
        info!("Initializing game at {:?}", start);
        self.switch_to(start);
    }

    /// Activates `key`. Unknown keys are logged and leave the current
    /// scene running.
    pub fn switch_to(&mut self, key: SceneId) -> bool {
        match self.scenes.switch_to(key, &mut self.context) {
            Ok(()) => true,
            Err(err) => {
                error!("Transition aborted: {}", err);
                false
            }
        }
    }

    pub fn start_game(&mut self) {
        info!("Starting a new run");
        self.remove_overlay();
        self.run.total_score = 0;
        self.run.current_phase = 1;
        self.go_to_phase(1);
    }

    /// Switches to `Phase(n)`, or shows the victory overlay when no such
    /// phase exists.
    pub fn go_to_phase(&mut self, phase: u32) {
        if !self.scenes.contains(SceneId::Phase(phase)) {
            info!("No phase {} registered, run complete", phase);
            self.show_victory();
            return;
        }

        self.remove_overlay();
        self.run.current_phase = phase;
        self.switch_to(SceneId::Phase(phase));
    }

    pub fn on_phase_complete(&mut self, phase: u32, score: u32) {
        self.run.total_score = self.run.total_score.saturating_add(score);
        info!(
            "Phase {} complete (+{}), total {}",
            phase, score, self.run.total_score
        );

        let next = match self.progression {
            PhaseProgression::Loop => 1,
            PhaseProgression::Advance => phase.saturating_add(1),
        };
        self.go_to_phase(next);
    }

    pub fn on_game_over(&mut self) {
        info!("Game over with total {}", self.run.total_score);
        if self.run.total_score > self.run.high_score {
            self.run.high_score = self.run.total_score;
            self.save_high_score(self.run.high_score);
        }
        self.show_game_over();
    }

    pub fn show_game_over(&mut self) {
        self.show_overlay(OverlayKind::GameOver);
    }

    pub fn show_victory(&mut self) {
        self.show_overlay(OverlayKind::Victory);
    }

    /// Overlay "Play Again".
    pub fn restart(&mut self) {
        self.remove_overlay();
        self.start_game();
    }

    /// Overlay "Main Menu".
    pub fn go_to_landing(&mut self) {
        self.remove_overlay();
        self.switch_to(SceneId::Landing);
    }

    fn show_overlay(&mut self, kind: OverlayKind) {
        self.remove_overlay();
        debug!("Showing {:?} overlay", kind);
        self.overlay = Some(TerminalOverlay::show(
            kind,
            self.run.total_score,
            self.run.high_score,
            &mut self.context.ui,
            self.context.viewport,
        ));
    }

    fn remove_overlay(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            overlay.remove(&mut self.context.ui);
        }
    }

    //--- High Score -------------------------------------------------------

    fn load_high_score(store: &dyn HighScoreStore) -> u32 {
        match store.load() {
            Ok(score) => score.unwrap_or(0),
            Err(err) => {
                warn!("Could not load high score, starting from 0: {}", err);
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u32) {
        match self.store.save(score) {
            Ok(()) => info!("New high score {} saved", score),
            Err(err) => warn!("Could not save high score {}: {}", score, err),
        }
    }

    //--- Frame Loop -------------------------------------------------------

    /// Runs one logic tick.
    pub fn tick(&mut self, frame: FrameInput) {
        let ctx = &mut self.context;
        ctx.frame_time = frame.dt;
        ctx.draw_list.clear();
        ctx.input.begin_frame();
        ctx.input.process_events(&frame.events);
        ctx.assets.poll();

        if let Some(size) = frame.resized {
            self.handle_resize(size);
        }

        let ctx = &mut self.context;
        let typed = ctx.input.typed_text().to_string();
        ctx.ui.type_text(&typed);

        let pressed = ctx.input.keys_pressed().to_vec();
        for key in pressed {
            if key == KeyCode::Backspace {
                self.context.ui.backspace();
            }
            self.handle_key_pressed(key);
        }

        if self.context.input.is_button_pressed(MouseButton::Left) {
            self.handle_mouse_pressed();
        }

        self.update();
        self.process_events();
        self.context.message_bus.clear_all();
    }

    /// Draws the active scene, then the UI layer on top.
    pub fn update(&mut self) {
        self.scenes.update(&mut self.context);
        self.context.ui.draw(&mut self.context.draw_list);
    }

    pub fn handle_resize(&mut self, size: Size) {
        debug!("Viewport resized to {}x{}", size.w, size.h);
        self.context.viewport = size;
        if let Some(overlay) = &self.overlay {
            overlay.layout(&mut self.context.ui, size);
        }
        self.scenes.handle_resize(&mut self.context);
    }

    /// Hit-tests the UI at the cursor, publishes the click and forwards
    /// the press to the current scene.
    pub fn handle_mouse_pressed(&mut self) {
        let (x, y) = self.context.input.mouse_position();
        if let Some(id) = self.context.ui.click_at(Point::new(x, y)) {
            debug!("Clicked {:?}", id);
            self.context.message_bus.push(UiEvent::Clicked(id));
        }
        self.scenes.handle_mouse_pressed(&mut self.context);
    }

    pub fn handle_key_pressed(&mut self, key: KeyCode) {
        self.scenes.handle_key_pressed(key, &mut self.context);
    }

    /// Applies every pending scene → manager message.
    pub fn process_events(&mut self) {
        let bus = &mut self.context.message_bus;
        let commands = bus.take::<MenuCommand>();
        let phase_events = bus.take::<PhaseEvent>();
        let clicks = bus.take::<UiEvent>();

        for command in commands {
            match command {
                MenuCommand::StartGame => self.start_game(),
            }
        }

        for event in phase_events {
            match event {
                PhaseEvent::Completed { phase, score } => self.on_phase_complete(phase, score),
                PhaseEvent::GameOver { phase } => {
                    debug!("Phase {} reported game over", phase);
                    self.on_game_over();
                }
            }
        }

        for UiEvent::Clicked(id) in clicks {
            let action = self.overlay.as_ref().and_then(|overlay| overlay.action_for(id));
            match action {
                Some(OverlayAction::Restart) => self.restart(),
                Some(OverlayAction::MainMenu) => self.go_to_landing(),
                None => {}
            }
        }
    }

    /// Tears down the current scene and any overlay.
    pub fn shutdown(&mut self) {
        info!("Shutting down game");
        self.remove_overlay();
        self.scenes.shutdown(&mut self.context);
    }

    //--- Accessors --------------------------------------------------------

    pub fn high_score(&self) -> u32 {
        self.run.high_score
    }

    pub fn total_score(&self) -> u32 {
        self.run.total_score
    }

    pub fn current_phase(&self) -> u32 {
        self.run.current_phase
    }

    pub fn progression(&self) -> PhaseProgression {
        self.progression
    }

    pub fn current_scene(&self) -> Option<SceneId> {
        self.scenes.current()
    }

    pub fn scene(&self, key: SceneId) -> Option<&dyn Scene> {
        self.scenes.scene(key)
    }

    pub fn overlay(&self) -> Option<&TerminalOverlay> {
        self.overlay.as_ref()
    }

    pub fn overlay_kind(&self) -> Option<OverlayKind> {
        self.overlay.as_ref().map(TerminalOverlay::kind)
    }

    pub fn context(&self) -> &GlobalContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut GlobalContext {
        &mut self.context
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::{AssetLoader, MemoryImageSource};
    use crate::core::scene::SceneBase;
    use crate::core::storage::{MemoryHighScoreStore, StorageError};
    use crate::game::landing::LandingPage;

    /// Phase stand-in that reports whatever outcome a test asks for.
    struct ScriptedPhase {
        base: SceneBase,
        number: u32,
    }

    impl ScriptedPhase {
        fn new(number: u32) -> Self {
            Self {
                base: SceneBase::new(format!("Scripted {}", number)),
                number,
            }
        }
    }

    impl Scene for ScriptedPhase {
        fn base(&self) -> &SceneBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut SceneBase {
            &mut self.base
        }

        fn handle_key_pressed(&mut self, key: KeyCode, ctx: &mut GlobalContext) {
            match key {
                KeyCode::KeyW => ctx.message_bus.push(PhaseEvent::Completed {
                    phase: self.number,
                    score: 100,
                }),
                KeyCode::KeyL => ctx.message_bus.push(PhaseEvent::GameOver { phase: self.number }),
                _ => {}
            }
        }
    }

    struct FailingStore;

    impl HighScoreStore for FailingStore {
        fn load(&self) -> Result<Option<u32>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn save(&mut self, _score: u32) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    fn context() -> GlobalContext {
        GlobalContext::new(
            AssetLoader::inline(MemoryImageSource::new()),
            Size::new(1280.0, 720.0),
        )
    }

    fn manager(store: MemoryHighScoreStore) -> GameManager {
        let mut manager = GameManager::new(context(), store);
        manager.add_scene(SceneId::Landing, LandingPage::new());
        manager.add_scene(SceneId::Phase(1), ScriptedPhase::new(1));
        manager.init(SceneId::Landing);
        manager
    }

    fn press(manager: &mut GameManager, key: KeyCode) {
        manager.tick(FrameInput::new(Duration::from_millis(16)).with_events([InputEvent::KeyDown(key)]));
        manager.tick(FrameInput::new(Duration::from_millis(16)).with_events([InputEvent::KeyUp(key)]));
    }

    #[test]
    fn loads_high_score_or_defaults() {
        let stored = GameManager::new(context(), MemoryHighScoreStore::with_value(42));
        assert_eq!(stored.high_score(), 42);

        let empty = GameManager::new(context(), MemoryHighScoreStore::new());
        assert_eq!(empty.high_score(), 0);

        let failing = GameManager::new(context(), FailingStore);
        assert_eq!(failing.high_score(), 0);
    }

    #[test]
    fn enter_on_landing_starts_phase_one() {
        let mut manager = manager(MemoryHighScoreStore::new());

        press(&mut manager, KeyCode::Enter);

        assert_eq!(manager.current_scene(), Some(SceneId::Phase(1)));
        assert_eq!(manager.current_phase(), 1);
        assert_eq!(manager.total_score(), 0);
    }

    #[test]
    fn unknown_scene_keeps_current() {
        let mut manager = manager(MemoryHighScoreStore::new());

        assert!(!manager.switch_to(SceneId::Phase(9)));

        assert_eq!(manager.current_scene(), Some(SceneId::Landing));
        assert!(manager.scene(SceneId::Landing).unwrap().is_active());
    }

    #[test]
    fn loop_progression_returns_to_phase_one() {
        let mut manager = manager(MemoryHighScoreStore::new());
        manager.start_game();

        press(&mut manager, KeyCode::KeyW);
        press(&mut manager, KeyCode::KeyW);

        assert_eq!(manager.total_score(), 200);
        assert_eq!(manager.current_scene(), Some(SceneId::Phase(1)));
        assert_eq!(manager.overlay_kind(), None);
    }

    #[test]
    fn advance_progression_ends_in_victory() {
        let mut manager =
            manager(MemoryHighScoreStore::new()).with_progression(PhaseProgression::Advance);
        manager.start_game();

        press(&mut manager, KeyCode::KeyW);

        assert_eq!(manager.overlay_kind(), Some(OverlayKind::Victory));
        assert_eq!(manager.total_score(), 100);
    }

    #[test]
    fn game_over_raises_and_persists_high_score() {
        let store = MemoryHighScoreStore::with_value(150);
        let mut manager = manager(store.clone());
        manager.start_game();

        press(&mut manager, KeyCode::KeyW);
        press(&mut manager, KeyCode::KeyW);
        press(&mut manager, KeyCode::KeyL);

        assert_eq!(manager.overlay_kind(), Some(OverlayKind::GameOver));
        assert_eq!(manager.high_score(), 200);
        assert_eq!(store.get(), Some(200));
    }

    #[test]
    fn lower_total_keeps_high_score() {
        let store = MemoryHighScoreStore::with_value(500);
        let mut manager = manager(store.clone());
        manager.start_game();

        press(&mut manager, KeyCode::KeyL);

        assert_eq!(manager.high_score(), 500);
        assert_eq!(store.get(), Some(500));
    }

    #[test]
    fn failed_save_keeps_in_memory_high_score() {
        let mut manager = GameManager::new(context(), FailingStore);
        manager.add_scene(SceneId::Phase(1), ScriptedPhase::new(1));
        manager.start_game();

        press(&mut manager, KeyCode::KeyW);
        press(&mut manager, KeyCode::KeyL);

        assert_eq!(manager.high_score(), 100);
    }

    #[test]
    fn overlay_main_menu_returns_to_landing() {
        let mut manager = manager(MemoryHighScoreStore::new());
        manager.start_game();
        press(&mut manager, KeyCode::KeyL);

        let menu = manager.overlay().unwrap().menu_button();
        manager.context_mut().message_bus.push(UiEvent::Clicked(menu));
        manager.process_events();

        assert_eq!(manager.current_scene(), Some(SceneId::Landing));
        assert!(manager.overlay().is_none());
    }

    #[test]
    fn overlay_restart_resets_the_run() {
        let mut manager = manager(MemoryHighScoreStore::new());
        manager.start_game();
        press(&mut manager, KeyCode::KeyW);
        press(&mut manager, KeyCode::KeyL);

        let restart = manager.overlay().unwrap().restart_button();
        manager.context_mut().message_bus.push(UiEvent::Clicked(restart));
        manager.process_events();

        assert_eq!(manager.total_score(), 0);
        assert_eq!(manager.current_scene(), Some(SceneId::Phase(1)));
        assert!(manager.overlay().is_none());
    }

    #[test]
    fn missing_first_phase_shows_victory() {
        let mut manager = GameManager::new(context(), MemoryHighScoreStore::new());
        manager.add_scene(SceneId::Landing, LandingPage::new());
        manager.init(SceneId::Landing);

        manager.start_game();

        assert_eq!(manager.overlay_kind(), Some(OverlayKind::Victory));
        assert_eq!(manager.current_scene(), Some(SceneId::Landing));
    }

    #[test]
    fn bus_is_empty_after_tick() {
        let mut manager = manager(MemoryHighScoreStore::new());
        manager.start_game();

        manager.tick(FrameInput::new(Duration::ZERO).with_events([InputEvent::KeyDown(KeyCode::KeyW)]));

        assert!(!manager.context().message_bus.has_messages::<PhaseEvent>());
    }
}
