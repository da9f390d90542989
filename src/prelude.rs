//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use neurobeep::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};

// Context and geometry
pub use crate::core::geometry::{Point, Rect, Size};
pub use crate::core::globals::GlobalContext;

// Input
pub use crate::core::input::{Action, ActionMapper, InputEvent, KeyCode, MouseButton};

// Scenes
pub use crate::core::scene::{Scene, SceneBase, SceneKey};

// UI and rendering
pub use crate::core::render::{Color, DrawList};
pub use crate::core::ui::{Element, ElementId, UiEvent};

// Game
pub use crate::game::{
    FrameInput, GameManager, GameplayState, LandingPage, LetterPhase, PhaseEvent,
    PhaseProgression, SceneId,
};
