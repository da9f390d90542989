//=========================================================================
// Input System
//=========================================================================
//
// Platform-neutral input handling for scenes.
//
// Components:
// - `event`: InputEvent, KeyCode, MouseButton
// - `state_tracker`: held keys, per-frame presses, typed text, cursor
// - `action` / `action_mapper`: game-defined actions bound to keys
//
//=========================================================================

//=== Module Declarations =================================================

mod action;
mod action_mapper;
pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use action::Action;
pub use action_mapper::ActionMapper;
pub use event::{InputEvent, KeyCode, MouseButton};
pub use state_tracker::StateTracker;
