//=========================================================================
// Game Configuration
//=========================================================================
//
// Tunables for a letter-chase round. `Default` holds the shipped values.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Point, Size};

use super::layout::LayoutParams;

//=== GameConfig ==========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    //--- Rules ------------------------------------------------------------
    pub starting_lives: u32,
    pub points_per_win: u32,
    /// Pause between catching the target and completing the phase.
    pub win_delay: Duration,
    pub min_word_len: usize,

    //--- Player -----------------------------------------------------------
    pub player_start: Point,
    pub player_size: Size,
    /// Pixels per tick while a direction is held.
    pub player_speed: f32,

    //--- Letter Layout ----------------------------------------------------
    pub layout: LayoutParams,
    /// Strip at the bottom of the window kept free for the input controls.
    pub bottom_reserve: f32,

    //--- Word Input Controls ----------------------------------------------
    /// Input anchor relative to the viewport centre / bottom edge.
    pub input_offset: Point,
    pub input_size: Size,
    pub submit_offset: Point,
    pub submit_size: Size,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            points_per_win: 100,
            win_delay: Duration::from_secs(3),
            min_word_len: 2,

            player_start: Point::new(50.0, 50.0),
            player_size: Size::new(80.0, 80.0),
            player_speed: 5.0,

            layout: LayoutParams::default(),
            bottom_reserve: 200.0,

            input_offset: Point::new(-125.0, -150.0),
            input_size: Size::new(250.0, 40.0),
            submit_offset: Point::new(135.0, -150.0),
            submit_size: Size::new(110.0, 40.0),
        }
    }
}

impl GameConfig {
    /// Top-left of the word input for a viewport.
    pub fn input_anchor(&self, viewport: Size) -> Point {
        Point::new(
            viewport.w / 2.0 + self.input_offset.x,
            viewport.h + self.input_offset.y,
        )
    }

    /// Top-left of the submit button for a viewport.
    pub fn submit_anchor(&self, viewport: Size) -> Point {
        Point::new(
            viewport.w / 2.0 + self.submit_offset.x,
            viewport.h + self.submit_offset.y,
        )
    }
}
