//=========================================================================
// Game Layer
//=========================================================================
//
// The letter-chase game built on the core scene system.
//
// Components:
// - `layout`: shuffling, selection, collision and letter placement
// - `gameplay`: score / lives / pause capability shared by phases
// - `letter_phase`: the chase-the-letter round
// - `landing`: start screen
// - `overlay`: game-over and victory panels
// - `manager`: transitions, run totals and the high score
//
//=========================================================================

//=== Module Declarations =================================================

pub mod config;
pub mod events;
pub mod gameplay;
pub mod landing;
pub mod layout;
pub mod letter_phase;
pub mod manager;
pub mod overlay;

//=== Public API ==========================================================

pub use config::GameConfig;
pub use events::{MenuCommand, PhaseEvent};
pub use gameplay::{GameplayState, PhaseOutcome};
pub use landing::LandingPage;
pub use letter_phase::{LetterPhase, RoundState, WordError};
pub use manager::{FrameInput, GameManager, PhaseProgression, SceneId};
pub use overlay::{OverlayAction, OverlayKind, TerminalOverlay};
