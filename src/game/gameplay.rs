//=========================================================================
// Gameplay State
//=========================================================================
//
// Score, lives and pause state shared by every gameplay phase, plus the
// HUD readout that displays them. Phases hold one of these and expose it
// through `Scene::gameplay`.
//
// States:
//   Setup → Active → {Paused ⇄ Active} → GameOver | PhaseComplete
//
// The two terminal states are latched: each outcome is reported at most
// once per activation, and pause toggling is ignored afterwards.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::geometry::Point;
use crate::core::message_bus::MessageBus;
use crate::core::render::Color;
use crate::core::ui::{Element, ElementId, UiLayer};

use super::events::PhaseEvent;

//=== Constants ===========================================================

const HUD_TEXT_SIZE: f32 = 22.0;
const HUD_Y: f32 = 16.0;

//=== PhaseOutcome ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOutcome {
    Complete,
    GameOver,
}

//=== Hud =================================================================

#[derive(Debug, Clone, Copy)]
struct Hud {
    score: ElementId,
    phase: ElementId,
    lives: ElementId,
}

//=== GameplayState =======================================================

#[derive(Debug, Clone)]
pub struct GameplayState {
    phase_number: u32,
    starting_lives: u32,
    score: u32,
    lives: u32,
    paused: bool,
    outcome: Option<PhaseOutcome>,
    hud: Option<Hud>,
}

impl GameplayState {
    pub fn new(phase_number: u32, starting_lives: u32) -> Self {
        Self {
            phase_number,
            starting_lives,
            score: 0,
            lives: starting_lives,
            paused: false,
            outcome: None,
            hud: None,
        }
    }

    /// Fresh score and lives for a new activation.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.starting_lives;
        self.paused = false;
        self.outcome = None;
    }

    //--- Accessors --------------------------------------------------------

    pub fn phase_number(&self) -> u32 {
        self.phase_number
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn outcome(&self) -> Option<PhaseOutcome> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    //--- Mutators ---------------------------------------------------------

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Removes one life, never going below zero. Returns the lives left.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        info!("Life lost, {} remaining", self.lives);
        self.lives
    }

    pub fn pause(&mut self) {
        self.paused = true;
        debug!("Phase {} paused", self.phase_number);
    }

    pub fn resume(&mut self) {
        self.paused = false;
        debug!("Phase {} resumed", self.phase_number);
    }

    /// ESC behaviour: flips pause unless the phase already ended.
    pub fn toggle_pause(&mut self) {
        if self.is_terminal() {
            return;
        }
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    //--- Outcomes ---------------------------------------------------------

    /// Reports game over once lives hit zero. Returns `true` on the call
    /// that ends the phase.
    pub fn check_game_state(&mut self, bus: &mut MessageBus) -> bool {
        if self.lives > 0 || self.is_terminal() {
            return false;
        }

        info!("Game over in phase {}", self.phase_number);
        self.pause();
        self.outcome = Some(PhaseOutcome::GameOver);
        bus.push(PhaseEvent::GameOver {
            phase: self.phase_number,
        });
        true
    }

    /// Reports the phase as complete with its accumulated score.
    pub fn complete(&mut self, bus: &mut MessageBus) -> bool {
        if self.is_terminal() {
            return false;
        }

        info!("Phase {} complete with {} points", self.phase_number, self.score);
        self.outcome = Some(PhaseOutcome::Complete);
        bus.push(PhaseEvent::Completed {
            phase: self.phase_number,
            score: self.score,
        });
        true
    }

    //--- HUD --------------------------------------------------------------

    /// Creates the score / phase / lives labels.
    pub fn build_hud(&mut self, ui: &mut UiLayer) {
        self.release_hud(ui);

        let label = |ui: &mut UiLayer, x: f32, text: String| {
            ui.add(Element::label(text, Point::new(x, HUD_Y), HUD_TEXT_SIZE).with_color(Color::WHITE))
        };

        self.hud = Some(Hud {
            score: label(ui, 20.0, self.score_text()),
            phase: label(ui, 240.0, self.phase_text()),
            lives: label(ui, 420.0, self.lives_text()),
        });
    }

    pub fn refresh_hud(&self, ui: &mut UiLayer) {
        if let Some(hud) = self.hud {
            ui.set_text(hud.score, self.score_text());
            ui.set_text(hud.phase, self.phase_text());
            ui.set_text(hud.lives, self.lives_text());
        }
    }

    pub fn release_hud(&mut self, ui: &mut UiLayer) {
        if let Some(hud) = self.hud.take() {
            ui.remove(hud.score);
            ui.remove(hud.phase);
            ui.remove(hud.lives);
        }
    }

    pub fn has_hud(&self) -> bool {
        self.hud.is_some()
    }

    fn score_text(&self) -> String {
        format!("SCORE: {}", self.score)
    }

    fn phase_text(&self) -> String {
        format!("PHASE: {}", self.phase_number)
    }

    fn lives_text(&self) -> String {
        format!("LIVES: {}", self.lives)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
