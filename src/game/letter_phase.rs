//=========================================================================
// Letter Phase
//=========================================================================
//
// Chase-the-letter round: the player types a word, its letters are
// scattered across the field and the avatar must reach the target letter
// while avoiding the others.
//
// Round state machine:
//
//   AwaitingWordInput ──submit──→ LoadingAssets ──sprites + layout──→ Playing
//          ↑                            │                               │
//          └──────── layout failed ─────┘              target hit ──────┤
//                                                                       ↓
//                          GameOver ←── lives == 0 ──── Playing     RoundWon
//                                                                       │
//                                                     win delay ──→ PhaseEvent::Completed
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use image::RgbaImage;
use log::{debug, info, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::assets::{letter_asset_path, AssetBatch, AssetTicket, LoadResult, Sprite};
use crate::core::geometry::{Point, Rect, Size};
use crate::core::globals::GlobalContext;
use crate::core::input::{Action, ActionMapper, KeyCode};
use crate::core::render::Color;
use crate::core::scene::{Scene, SceneBase};
use crate::core::time::DeferredTask;
use crate::core::ui::{Element, ElementId, UiEvent};

use super::config::GameConfig;
use super::gameplay::GameplayState;
use super::layout::{check_collision, fisher_yates_shuffle, layout_letters, select_random};

//=== Constants ===========================================================

pub const PLAYER_ASSET: &str = "player.png";

const FIELD_COLOR: Color = Color::rgb(46, 153, 191);
const BANNER_COLOR: Color = Color::rgb(255, 215, 0);

//=== WordError ===========================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("type a word with at least {min} letters")]
    TooShort { min: usize, len: usize },
}

/// Trims and upper-cases `raw`, rejecting words shorter than `min_len`.
pub fn normalize_word(raw: &str, min_len: usize) -> Result<String, WordError> {
    let word = raw.trim().to_uppercase();
    let len = word.chars().count();
    if len < min_len {
        return Err(WordError::TooShort { min: min_len, len });
    }
    Ok(word)
}

//=== Movement Actions ====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
}

impl Action for Move {}

/// Arrow keys and WASD.
pub fn movement_bindings() -> ActionMapper<Move> {
    ActionMapper::new()
        .with_key(KeyCode::ArrowLeft, Move::Left)
        .with_key(KeyCode::KeyA, Move::Left)
        .with_key(KeyCode::ArrowRight, Move::Right)
        .with_key(KeyCode::KeyD, Move::Right)
        .with_key(KeyCode::ArrowUp, Move::Up)
        .with_key(KeyCode::KeyW, Move::Up)
        .with_key(KeyCode::ArrowDown, Move::Down)
        .with_key(KeyCode::KeyS, Move::Down)
}

//=== Round Data ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    AwaitingWordInput,
    LoadingAssets,
    Playing,
    RoundWon,
    GameOver,
}

/// The word being played and its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub word: String,
    pub letters: Vec<char>,
    /// Indices into `letters`, in display order.
    pub display_order: Vec<usize>,
    /// First index of `target_letter` in `letters`.
    pub target_index: usize,
    pub target_letter: char,
}

impl Round {
    pub fn shuffled_letters(&self) -> Vec<char> {
        self.display_order.iter().map(|&i| self.letters[i]).collect()
    }
}

#[derive(Debug, Clone)]
pub struct LetterCollider {
    pub rect: Rect,
    pub letter: char,
    pub is_target: bool,
    pub sprite: Sprite,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub position: Point,
    pub size: Size,
    pub velocity: Point,
    pub speed: f32,
}

impl Player {
    fn spawn(config: &GameConfig) -> Self {
        Self {
            position: config.player_start,
            size: config.player_size,
            velocity: Point::default(),
            speed: config.player_speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }
}

/// Word entry widgets and prompt labels.
#[derive(Debug, Clone, Copy)]
struct InputControls {
    input: ElementId,
    submit: ElementId,
    warning: ElementId,
}

//=== LetterPhase =========================================================

pub struct LetterPhase {
    base: SceneBase,
    gameplay: GameplayState,
    config: GameConfig,
    controls: ActionMapper<Move>,

    state: RoundState,
    round: Option<Round>,
    colliders: Vec<LetterCollider>,
    player: Player,
    found_letter: Option<char>,

    pending_letters: Option<AssetBatch>,
    player_ticket: Option<AssetTicket>,
    player_image: Option<Arc<RgbaImage>>,
    win_timer: DeferredTask,

    ui: Option<InputControls>,
}

impl LetterPhase {
    pub fn new(phase_number: u32) -> Self {
        Self::with_config(phase_number, GameConfig::default())
    }

    pub fn with_config(phase_number: u32, config: GameConfig) -> Self {
        Self {
            base: SceneBase::new(format!("Phase {}", phase_number)),
            gameplay: GameplayState::new(phase_number, config.starting_lives),
            controls: movement_bindings(),
            state: RoundState::AwaitingWordInput,
            round: None,
            colliders: Vec::new(),
            player: Player::spawn(&config),
            found_letter: None,
            pending_letters: None,
            player_ticket: None,
            player_image: None,
            win_timer: DeferredTask::new(),
            ui: None,
            config,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn colliders(&self) -> &[LetterCollider] {
        &self.colliders
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Handle of the word text field while it exists.
    pub fn word_input(&self) -> Option<ElementId> {
        self.ui.map(|ui| ui.input)
    }

    pub fn submit_button(&self) -> Option<ElementId> {
        self.ui.map(|ui| ui.submit)
    }

    //=====================================================================
    // Word Input
    //=====================================================================

    fn create_input_controls(&mut self, ctx: &mut GlobalContext) {
        let viewport = ctx.viewport;
        let input = ctx.ui.add(Element::text_input(
            "Type a word...",
            Rect::from_parts(self.config.input_anchor(viewport), self.config.input_size),
        ));
        let submit = ctx.ui.add(Element::button(
            "Start",
            Rect::from_parts(self.config.submit_anchor(viewport), self.config.submit_size),
        ));
        let warning_at = self.config.input_anchor(viewport);
        let warning = ctx.ui.add(
            Element::label("", Point::new(warning_at.x, warning_at.y - 36.0), 18.0)
                .with_color(Color::WARNING)
                .hidden(),
        );

        for id in [input, submit, warning] {
            self.base.own(id);
        }
        ctx.ui.focus(input);

        self.ui = Some(InputControls {
            input,
            submit,
            warning,
        });
    }

    fn set_input_visible(&self, ctx: &mut GlobalContext, visible: bool) {
        if let Some(ui) = self.ui {
            ctx.ui.set_visible(ui.input, visible);
            ctx.ui.set_visible(ui.submit, visible);
            if visible {
                ctx.ui.focus(ui.input);
            } else {
                ctx.ui.set_visible(ui.warning, false);
            }
        }
    }

    fn show_warning(&self, ctx: &mut GlobalContext, message: &str) {
        if let Some(ui) = self.ui {
            ctx.ui.set_text(ui.warning, message);
            ctx.ui.set_visible(ui.warning, true);
        }
    }

    /// Reads the text field and starts a round with it.
    ///
    /// Rejected words leave the phase waiting for input and show a
    /// warning. Ignored outside `AwaitingWordInput`.
    pub fn submit_word(&mut self, ctx: &mut GlobalContext) -> Result<(), WordError> {
        if self.state != RoundState::AwaitingWordInput {
            return Ok(());
        }

        let raw = self
            .word_input()
            .and_then(|id| ctx.ui.value(id))
            .unwrap_or_default()
            .to_string();

        match normalize_word(&raw, self.config.min_word_len) {
            Ok(word) => {
                self.begin_round(word, ctx);
                Ok(())
            }
            Err(err) => {
                info!("Word {:?} rejected: {}", raw, err);
                let message = format!("Type a word with at least {} letters!", self.config.min_word_len);
                self.show_warning(ctx, &message);
                Err(err)
            }
        }
    }

    //=====================================================================
    // Round Setup
    //=====================================================================

    fn begin_round(&mut self, word: String, ctx: &mut GlobalContext) {
        let letters: Vec<char> = word.chars().collect();

        let indices: Vec<usize> = (0..letters.len()).collect();
        let display_order = fisher_yates_shuffle(&mut ctx.rng, &indices);

        let Some(&target_letter) = select_random(&mut ctx.rng, &letters) else {
            warn!("Cannot start a round without letters");
            return;
        };
        let target_index = letters
            .iter()
            .position(|&letter| letter == target_letter)
            .unwrap_or(0);

        info!("Word: {}, target: {}", word, target_letter);

        let round = Round {
            word,
            letters,
            display_order,
            target_index,
            target_letter,
        };

        self.pending_letters = Some(AssetBatch::request(
            &mut ctx.assets,
            &round.shuffled_letters(),
            letter_asset_path,
        ));
        self.round = Some(round);
        self.state = RoundState::LoadingAssets;
        if let Some(ui) = self.ui {
            ctx.ui.set_visible(ui.warning, false);
        }
    }

    /// Waits for every letter sprite, then places the colliders.
    fn poll_letters(&mut self, ctx: &mut GlobalContext) {
        let Some(batch) = self.pending_letters.as_mut() else {
            return;
        };
        let Some(sprites) = batch.poll(&mut ctx.assets) else {
            return;
        };
        self.pending_letters = None;

        let Some(round) = self.round.as_ref() else {
            return;
        };

        let field_height = ctx.viewport.h - self.config.bottom_reserve;
        let spawn = Player::spawn(&self.config).rect();
        let placed = layout_letters(
            &mut ctx.rng,
            sprites.len(),
            ctx.viewport.w,
            field_height,
            &self.config.layout,
            &[spawn],
        );

        match placed {
            Ok(positions) => {
                let letter_size = self.config.layout.letter_size;
                self.colliders = round
                    .display_order
                    .iter()
                    .zip(sprites)
                    .zip(positions)
                    .map(|((&source, sprite), position)| LetterCollider {
                        rect: Rect::new(position.x, position.y, letter_size, letter_size),
                        letter: round.letters[source],
                        is_target: source == round.target_index,
                        sprite,
                    })
                    .collect();

                self.player = Player::spawn(&self.config);
                self.set_input_visible(ctx, false);
                self.state = RoundState::Playing;
                debug!("Round ready with {} letters", self.colliders.len());
            }
            Err(err) => {
                warn!("Round setup failed: {}", err);
                self.round = None;
                self.state = RoundState::AwaitingWordInput;
                self.set_input_visible(ctx, true);
                self.show_warning(ctx, "Not enough room for that word, try a shorter one!");
            }
        }
    }

    fn poll_player_sprite(&mut self, ctx: &mut GlobalContext) {
        let Some(ticket) = self.player_ticket else {
            return;
        };
        match ctx.assets.take(ticket) {
            Some(LoadResult::Loaded(image)) => {
                debug!("Player sprite loaded");
                self.player_image = Some(image);
                self.player_ticket = None;
            }
            Some(LoadResult::Failed(err)) => {
                info!("Player sprite unavailable, drawing a rectangle: {}", err);
                self.player_ticket = None;
            }
            None => {}
        }
    }

    //=====================================================================
    // Play Loop
    //=====================================================================

    fn update_game(&mut self, ctx: &mut GlobalContext) {
        let input = &ctx.input;
        let speed = self.player.speed;

        let mut velocity = Point::default();
        if self.controls.is_down(input, Move::Left) {
            velocity.x = -speed;
        }
        if self.controls.is_down(input, Move::Right) {
            velocity.x = speed;
        }
        if self.controls.is_down(input, Move::Up) {
            velocity.y = -speed;
        }
        if self.controls.is_down(input, Move::Down) {
            velocity.y = speed;
        }
        self.player.velocity = velocity;

        let max_x = ctx.viewport.w - self.player.size.w;
        let max_y = ctx.viewport.h - self.player.size.h;
        self.player.position.x = (self.player.position.x + velocity.x).min(max_x).max(0.0);
        self.player.position.y = (self.player.position.y + velocity.y).min(max_y).max(0.0);

        self.check_letter_collisions();
    }

    /// Resolves the first collider the player overlaps, if any.
    fn check_letter_collisions(&mut self) {
        let player = self.player.rect();
        let Some(index) = self
            .colliders
            .iter()
            .position(|collider| check_collision(&player, &collider.rect))
        else {
            return;
        };

        if self.colliders[index].is_target {
            self.win_round(self.colliders[index].letter);
        } else {
            let hit = self.colliders.remove(index);
            debug!("Wrong letter {}", hit.letter);
            self.gameplay.lose_life();
        }
    }

    fn win_round(&mut self, letter: char) {
        info!("Target letter {} found", letter);
        self.state = RoundState::RoundWon;
        self.found_letter = Some(letter);
        self.gameplay.add_score(self.config.points_per_win);
        self.win_timer.schedule(self.config.win_delay);
    }

    //=====================================================================
    // Rendering
    //=====================================================================

    fn draw_input_prompt(&self, ctx: &mut GlobalContext) {
        let w = ctx.viewport.w;
        let h = ctx.viewport.h;
        ctx.draw_list.text("Type a word to start", Point::new(w / 2.0 - 150.0, 100.0), 28.0, Color::WHITE);
        ctx.draw_list.text(
            "Use WASD or the arrow keys to move",
            Point::new(w / 2.0 - 130.0, h - self.config.bottom_reserve),
            16.0,
            Color::rgb(200, 200, 200),
        );
    }

    fn draw_letters(&self, ctx: &mut GlobalContext) {
        for collider in &self.colliders {
            ctx.draw_list.image(Arc::clone(&collider.sprite.image), collider.rect);
            if collider.sprite.placeholder {
                let r = collider.rect;
                ctx.draw_list.text(
                    collider.letter.to_string(),
                    Point::new(r.x + r.w / 3.0, r.y + r.h / 4.0),
                    r.h / 2.0,
                    Color::BLACK,
                );
            }
        }
    }

    fn draw_frozen_field(&self, ctx: &mut GlobalContext) {
        ctx.draw_list.clear_screen(FIELD_COLOR);
        self.draw_letters(ctx);
        self.draw_player(ctx);
    }

    fn draw_player(&self, ctx: &mut GlobalContext) {
        let rect = self.player.rect();
        match &self.player_image {
            Some(image) => ctx.draw_list.image(Arc::clone(image), rect),
            None => {
                ctx.draw_list.rect(rect, Color::PLAYER);
                ctx.draw_list.text(
                    "YOU",
                    Point::new(rect.x + rect.w / 2.0 - 12.0, rect.y - 16.0),
                    12.0,
                    Color::WHITE,
                );
            }
        }
    }

    fn draw_target_banner(&self, ctx: &mut GlobalContext, target: char) {
        let w = ctx.viewport.w;
        ctx.draw_list.rect(Rect::new(w / 2.0 - 225.0, 95.0, 450.0, 70.0), Color::rgba(0, 0, 0, 150));
        ctx.draw_list.text(
            format!("CATCH THE LETTER: \"{}\"", target),
            Point::new(w / 2.0 - 200.0, 105.0),
            32.0,
            BANNER_COLOR,
        );
        ctx.draw_list.text(
            "Use the arrow keys to move",
            Point::new(w / 2.0 - 90.0, 145.0),
            14.0,
            Color::WHITE,
        );
    }

    fn draw_victory(&self, ctx: &mut GlobalContext) {
        let Size { w, h } = ctx.viewport;
        ctx.draw_list.rect(Rect::new(0.0, 0.0, w, h), Color::rgba(0, 0, 0, 200));
        ctx.draw_list.text("VICTORY!", Point::new(w / 2.0 - 110.0, h / 2.0 - 60.0), 48.0, Color::rgb(255, 200, 0));
        if let Some(letter) = self.found_letter {
            ctx.draw_list.text(
                format!("You found the letter \"{}\"!", letter),
                Point::new(w / 2.0 - 160.0, h / 2.0 + 20.0),
                24.0,
                Color::WHITE,
            );
        }
    }
}

//=== Scene Implementation ================================================

impl Scene for LetterPhase {
    fn base(&self) -> &SceneBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SceneBase {
        &mut self.base
    }

    fn setup(&mut self, ctx: &mut GlobalContext) {
        self.gameplay.reset();
        self.gameplay.build_hud(&mut ctx.ui);

        debug!("Initializing phase {}", self.gameplay.phase_number());
        self.state = RoundState::AwaitingWordInput;
        self.round = None;
        self.colliders.clear();
        self.found_letter = None;
        self.player = Player::spawn(&self.config);
        if self.player_image.is_none() && self.player_ticket.is_none() {
            self.player_ticket = Some(ctx.assets.request(PLAYER_ASSET));
        }
        self.create_input_controls(ctx);
    }

    fn cleanup(&mut self, ctx: &mut GlobalContext) {
        self.win_timer.cancel();
        if let Some(mut batch) = self.pending_letters.take() {
            batch.cancel(&mut ctx.assets);
        }
        if let Some(ticket) = self.player_ticket.take() {
            ctx.assets.forget(ticket);
        }

        self.gameplay.release_hud(&mut ctx.ui);
        self.base.release_elements(&mut ctx.ui);
        self.ui = None;
        self.round = None;
        self.colliders.clear();
    }

    fn draw(&mut self, ctx: &mut GlobalContext) {
        if !self.is_active() {
            return;
        }
        if self.gameplay.is_paused() {
            // A lost round stays on screen, frozen, under the overlay.
            if self.state == RoundState::GameOver {
                self.draw_frozen_field(ctx);
            }
            return;
        }

        self.poll_player_sprite(ctx);
        ctx.draw_list.clear_screen(FIELD_COLOR);

        match self.state {
            RoundState::AwaitingWordInput => self.draw_input_prompt(ctx),
            RoundState::LoadingAssets => {
                self.poll_letters(ctx);
                if self.state == RoundState::AwaitingWordInput {
                    self.draw_input_prompt(ctx);
                }
            }
            RoundState::Playing => {
                self.update_game(ctx);
                self.draw_letters(ctx);
                self.draw_player(ctx);
                if let Some(target) = self.round.as_ref().map(|r| r.target_letter) {
                    self.draw_target_banner(ctx, target);
                }
            }
            RoundState::RoundWon => {
                self.draw_victory(ctx);
                if self.win_timer.advance(ctx.frame_time) {
                    self.gameplay.complete(&mut ctx.message_bus);
                }
            }
            RoundState::GameOver => self.draw_frozen_field(ctx),
        }

        self.gameplay.refresh_hud(&mut ctx.ui);
        if self.gameplay.check_game_state(&mut ctx.message_bus) {
            self.state = RoundState::GameOver;
        }
    }

    fn handle_resize(&mut self, ctx: &mut GlobalContext) {
        // Hidden controls move too, so they come back in place if the
        // round returns to word input.
        if let Some(ui) = self.ui {
            let viewport = ctx.viewport;
            let input_at = self.config.input_anchor(viewport);
            ctx.ui.set_position(ui.input, input_at);
            ctx.ui.set_position(ui.submit, self.config.submit_anchor(viewport));
            ctx.ui.set_position(ui.warning, Point::new(input_at.x, input_at.y - 36.0));
        }
    }

    fn handle_mouse_pressed(&mut self, ctx: &mut GlobalContext) {
        let Some(submit) = self.submit_button() else {
            return;
        };
        let clicked = ctx
            .message_bus
            .read::<UiEvent>()
            .contains(&UiEvent::Clicked(submit));
        if clicked {
            let _ = self.submit_word(ctx);
        }
    }

    fn handle_key_pressed(&mut self, key: KeyCode, ctx: &mut GlobalContext) {
        match key {
            KeyCode::Escape => {
                if !matches!(self.state, RoundState::RoundWon | RoundState::GameOver) {
                    self.gameplay.toggle_pause();
                }
            }
            KeyCode::Enter if self.state == RoundState::AwaitingWordInput => {
                let has_text = self
                    .word_input()
                    .and_then(|id| ctx.ui.value(id))
                    .is_some_and(|value| !value.trim().is_empty());
                if has_text {
                    let _ = self.submit_word(ctx);
                }
            }
            _ => {}
        }
    }

    fn gameplay(&self) -> Option<&GameplayState> {
        Some(&self.gameplay)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::{AssetLoader, MemoryImageSource};
    use crate::core::input::InputEvent;
    use crate::game::events::PhaseEvent;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    const TICK: Duration = Duration::from_secs(1);

    fn context(seed: u64) -> GlobalContext {
        let mut ctx = GlobalContext::with_rng(
            AssetLoader::inline(MemoryImageSource::new()),
            Size::new(1280.0, 720.0),
            StdRng::seed_from_u64(seed),
        );
        ctx.frame_time = TICK;
        ctx
    }

    fn activate(seed: u64) -> (LetterPhase, GlobalContext) {
        let mut ctx = context(seed);
        let mut phase = LetterPhase::new(1);
        phase.setup(&mut ctx);
        phase.enter(&mut ctx);
        (phase, ctx)
    }

    fn start_round(phase: &mut LetterPhase, ctx: &mut GlobalContext, word: &str) {
        let input = phase.word_input().expect("input field");
        ctx.ui.set_text(input, word);
        phase.submit_word(ctx).expect("word accepted");
        phase.draw(ctx);
        assert_eq!(phase.state(), RoundState::Playing);
    }

    fn step_onto(phase: &mut LetterPhase, ctx: &mut GlobalContext, rect: Rect) {
        phase.player.position = rect.origin();
        phase.draw(ctx);
    }

    fn target_rect(phase: &LetterPhase) -> Rect {
        phase
            .colliders()
            .iter()
            .find(|c| c.is_target)
            .map(|c| c.rect)
            .expect("target collider")
    }

    //--- Word Input -------------------------------------------------------

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(normalize_word("  cat ", 2), Ok("CAT".to_string()));
        assert_eq!(
            normalize_word(" a ", 2),
            Err(WordError::TooShort { min: 2, len: 1 })
        );
    }

    #[test]
    fn short_word_is_rejected_without_round() {
        let (mut phase, mut ctx) = activate(1);
        ctx.ui.set_text(phase.word_input().unwrap(), "A");

        let result = phase.submit_word(&mut ctx);

        assert!(matches!(result, Err(WordError::TooShort { .. })));
        assert_eq!(phase.state(), RoundState::AwaitingWordInput);
        assert!(phase.round().is_none());
        assert!(phase.colliders().is_empty());
    }

    #[test]
    fn enter_submits_typed_word() {
        let (mut phase, mut ctx) = activate(2);
        ctx.ui.set_text(phase.word_input().unwrap(), "dog");

        phase.handle_key_pressed(KeyCode::Enter, &mut ctx);

        assert_eq!(phase.state(), RoundState::LoadingAssets);
        assert_eq!(phase.round().unwrap().word, "DOG");
    }

    #[test]
    fn clicking_start_submits_word() {
        let (mut phase, mut ctx) = activate(2);
        ctx.ui.set_text(phase.word_input().unwrap(), "sun");
        ctx.message_bus
            .push(UiEvent::Clicked(phase.submit_button().unwrap()));

        phase.handle_mouse_pressed(&mut ctx);

        assert_eq!(phase.state(), RoundState::LoadingAssets);
    }

    //--- Round Setup ------------------------------------------------------

    #[test]
    fn round_has_exactly_one_target() {
        for (seed, word) in [(3, "CAT"), (4, "BANANA"), (5, "AA")] {
            let (mut phase, mut ctx) = activate(seed);
            start_round(&mut phase, &mut ctx, word);

            let round = phase.round().unwrap();
            assert_eq!(round.letters[round.target_index], round.target_letter);
            assert_eq!(
                round.letters.iter().position(|&l| l == round.target_letter),
                Some(round.target_index)
            );
            assert_eq!(phase.colliders().len(), word.len());
            assert_eq!(phase.colliders().iter().filter(|c| c.is_target).count(), 1);
        }
    }

    #[test]
    fn missing_letter_assets_become_placeholders() {
        let (mut phase, mut ctx) = activate(6);
        start_round(&mut phase, &mut ctx, "CAT");

        assert!(phase.colliders().iter().all(|c| c.sprite.placeholder));
    }

    #[test]
    fn input_controls_hide_while_playing() {
        let (mut phase, mut ctx) = activate(7);
        start_round(&mut phase, &mut ctx, "CAT");

        assert!(!ctx.ui.is_visible(phase.word_input().unwrap()));
        assert!(!ctx.ui.is_visible(phase.submit_button().unwrap()));
    }

    #[test]
    fn cramped_field_returns_to_word_input() {
        let mut ctx = context(8);
        ctx.viewport = Size::new(400.0, 400.0);
        let mut phase = LetterPhase::new(1);
        phase.setup(&mut ctx);
        phase.enter(&mut ctx);
        ctx.ui.set_text(phase.word_input().unwrap(), "CAT");
        phase.submit_word(&mut ctx).unwrap();

        phase.draw(&mut ctx);

        assert_eq!(phase.state(), RoundState::AwaitingWordInput);
        assert!(phase.round().is_none());
        assert!(ctx.ui.is_visible(phase.word_input().unwrap()));
    }

    //--- Play Loop --------------------------------------------------------

    #[test]
    fn win_path_scores_and_completes_once() {
        let (mut phase, mut ctx) = activate(9);
        start_round(&mut phase, &mut ctx, "CAT");

        let target = target_rect(&phase);
        step_onto(&mut phase, &mut ctx, target);

        assert_eq!(phase.state(), RoundState::RoundWon);
        assert_eq!(phase.gameplay().unwrap().score(), 100);
        assert!(!ctx.message_bus.has_messages::<PhaseEvent>());

        phase.draw(&mut ctx);
        phase.draw(&mut ctx);
        assert!(!ctx.message_bus.has_messages::<PhaseEvent>());

        phase.draw(&mut ctx);
        for _ in 0..5 {
            phase.draw(&mut ctx);
        }
        assert_eq!(
            ctx.message_bus.read::<PhaseEvent>(),
            &[PhaseEvent::Completed { phase: 1, score: 100 }]
        );
    }

    #[test]
    fn lose_path_ends_after_three_wrong_letters() {
        let (mut phase, mut ctx) = activate(10);
        start_round(&mut phase, &mut ctx, "DOGS");

        for expected_lives in [2, 1, 0] {
            let wrong = phase
                .colliders()
                .iter()
                .find(|c| !c.is_target)
                .map(|c| c.rect)
                .expect("wrong letter left");
            step_onto(&mut phase, &mut ctx, wrong);
            assert_eq!(phase.gameplay().unwrap().lives(), expected_lives);
        }

        assert_eq!(phase.state(), RoundState::GameOver);
        assert!(phase.gameplay().unwrap().is_paused());
        assert_eq!(
            ctx.message_bus.read::<PhaseEvent>(),
            &[PhaseEvent::GameOver { phase: 1 }]
        );

        // Frozen: touching the target now changes nothing.
        let target = target_rect(&phase);
        step_onto(&mut phase, &mut ctx, target);
        assert_eq!(phase.state(), RoundState::GameOver);
        assert_eq!(phase.gameplay().unwrap().score(), 0);
        assert_eq!(ctx.message_bus.count::<PhaseEvent>(), 1);
    }

    #[test]
    fn round_never_resolves_without_input() {
        for seed in 0..200 {
            let (mut phase, mut ctx) = activate(seed);
            start_round(&mut phase, &mut ctx, "ELEPHANTS");
            let spawn = Player::spawn(&phase.config).rect();

            assert!(
                phase.colliders().iter().all(|c| !check_collision(&c.rect, &spawn)),
                "seed {}: letter under the player spawn",
                seed
            );

            phase.draw(&mut ctx);
            assert_eq!(phase.state(), RoundState::Playing, "seed {}", seed);
            assert_eq!(phase.gameplay().unwrap().lives(), 3, "seed {}", seed);
            assert_eq!(phase.colliders().len(), 9, "seed {}", seed);
        }
    }

    #[test]
    fn lost_round_stays_drawn_while_frozen() {
        let (mut phase, mut ctx) = activate(18);
        start_round(&mut phase, &mut ctx, "DOGS");
        while phase.state() != RoundState::GameOver {
            let wrong = phase
                .colliders()
                .iter()
                .find(|c| !c.is_target)
                .map(|c| c.rect)
                .expect("wrong letter left");
            step_onto(&mut phase, &mut ctx, wrong);
        }
        let remaining: Vec<String> = phase.colliders().iter().map(|c| c.letter.to_string()).collect();

        ctx.draw_list.clear();
        phase.draw(&mut ctx);

        assert!(ctx.draw_list.contains_text("YOU"));
        for letter in &remaining {
            assert!(ctx.draw_list.contains_text(letter), "letter {} not drawn", letter);
        }
    }

    #[test]
    fn wrong_letter_is_removed_after_hit() {
        let (mut phase, mut ctx) = activate(11);
        start_round(&mut phase, &mut ctx, "CAT");
        let wrong = phase.colliders().iter().find(|c| !c.is_target).unwrap().rect;

        step_onto(&mut phase, &mut ctx, wrong);

        assert_eq!(phase.colliders().len(), 2);
        assert_eq!(phase.state(), RoundState::Playing);
    }

    #[test]
    fn movement_keys_move_and_clamp_player() {
        let (mut phase, mut ctx) = activate(12);
        start_round(&mut phase, &mut ctx, "CAT");
        // Park the player in the top-left corner, away from the letters.
        phase.player.position = Point::new(0.0, 0.0);

        ctx.input.begin_frame();
        ctx.input.process_events(&[
            InputEvent::KeyDown(KeyCode::KeyD),
            InputEvent::KeyDown(KeyCode::ArrowUp),
        ]);
        phase.draw(&mut ctx);

        assert_eq!(phase.player().position, Point::new(5.0, 0.0));
        assert_eq!(phase.player().velocity, Point::new(5.0, -5.0));
    }

    #[test]
    fn escape_pauses_and_freezes_play() {
        let (mut phase, mut ctx) = activate(13);
        start_round(&mut phase, &mut ctx, "CAT");

        phase.handle_key_pressed(KeyCode::Escape, &mut ctx);
        let target = target_rect(&phase);
        step_onto(&mut phase, &mut ctx, target);
        assert_eq!(phase.state(), RoundState::Playing);

        phase.handle_key_pressed(KeyCode::Escape, &mut ctx);
        phase.draw(&mut ctx);
        assert_eq!(phase.state(), RoundState::RoundWon);
    }

    //--- Lifecycle --------------------------------------------------------

    #[test]
    fn cleanup_cancels_pending_win() {
        let (mut phase, mut ctx) = activate(14);
        start_round(&mut phase, &mut ctx, "CAT");
        let target = target_rect(&phase);
        step_onto(&mut phase, &mut ctx, target);

        phase.exit(&mut ctx);
        phase.cleanup(&mut ctx);
        phase.setup(&mut ctx);
        phase.enter(&mut ctx);
        for _ in 0..5 {
            phase.draw(&mut ctx);
        }

        assert!(!ctx.message_bus.has_messages::<PhaseEvent>());
        assert_eq!(phase.state(), RoundState::AwaitingWordInput);
    }

    #[test]
    fn setup_resets_score_and_lives() {
        let (mut phase, mut ctx) = activate(15);
        start_round(&mut phase, &mut ctx, "CAT");
        let wrong = phase.colliders().iter().find(|c| !c.is_target).unwrap().rect;
        step_onto(&mut phase, &mut ctx, wrong);
        let target = target_rect(&phase);
        step_onto(&mut phase, &mut ctx, target);

        phase.exit(&mut ctx);
        phase.cleanup(&mut ctx);
        phase.setup(&mut ctx);

        let gameplay = phase.gameplay().unwrap();
        assert_eq!((gameplay.score(), gameplay.lives()), (0, 3));
    }

    #[test]
    fn cleanup_releases_all_ui() {
        let (mut phase, mut ctx) = activate(16);
        assert!(!ctx.ui.is_empty());

        phase.exit(&mut ctx);
        phase.cleanup(&mut ctx);

        assert!(ctx.ui.is_empty());
        assert!(phase.word_input().is_none());
    }

    #[test]
    fn resize_reanchors_input_controls() {
        let (mut phase, mut ctx) = activate(17);
        ctx.viewport = Size::new(1000.0, 800.0);

        phase.handle_resize(&mut ctx);

        let input = ctx.ui.get(phase.word_input().unwrap()).unwrap();
        let submit = ctx.ui.get(phase.submit_button().unwrap()).unwrap();
        assert_eq!(input.rect.origin(), Point::new(375.0, 650.0));
        assert_eq!(submit.rect.origin(), Point::new(635.0, 650.0));
    }

    #[test]
    fn resize_while_loading_reanchors_input_controls() {
        let (mut phase, mut ctx) = activate(19);
        ctx.ui.set_text(phase.word_input().unwrap(), "CAT");
        phase.submit_word(&mut ctx).unwrap();
        assert_eq!(phase.state(), RoundState::LoadingAssets);
        assert!(ctx.ui.is_visible(phase.word_input().unwrap()));

        ctx.viewport = Size::new(1000.0, 800.0);
        phase.handle_resize(&mut ctx);

        let input = ctx.ui.get(phase.word_input().unwrap()).unwrap();
        let submit = ctx.ui.get(phase.submit_button().unwrap()).unwrap();
        assert_eq!(input.rect.origin(), Point::new(375.0, 650.0));
        assert_eq!(submit.rect.origin(), Point::new(635.0, 650.0));
    }
}
