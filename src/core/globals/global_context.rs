//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container handed to every scene hook.
//
// Contains:
// - input: per-frame keyboard/mouse state
// - message_bus: typed events scenes publish for the manager
// - ui: retained overlay widgets
// - draw_list: this frame's draw commands
// - assets: image loader polled each tick
// - viewport / frame_time / rng
//
// The context is owned by the GameManager and lives on the logic thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use crate::core::assets::AssetLoader;
use crate::core::geometry::Size;
use crate::core::input::StateTracker;
use crate::core::message_bus::MessageBus;
use crate::core::render::DrawList;
use crate::core::ui::UiLayer;

//=== GlobalContext =======================================================

/// Everything a scene may read or write during a hook.
pub struct GlobalContext {
    /// Held keys, this frame's presses and typed text, cursor position.
    pub input: StateTracker,

    /// Scene → manager events (`PhaseEvent`, `MenuCommand`, `UiEvent`).
    /// Cleared at the end of every tick.
    pub message_bus: MessageBus,

    pub ui: UiLayer,

    pub draw_list: DrawList,

    pub assets: AssetLoader,

    /// Current window size in pixels.
    pub viewport: Size,

    /// Time covered by the current tick.
    pub frame_time: Duration,

    /// Randomness for shuffles and layout. Seed it for reproducible runs.
    pub rng: StdRng,
}

impl GlobalContext {
    pub fn new(assets: AssetLoader, viewport: Size) -> Self {
        Self::with_rng(assets, viewport, StdRng::from_entropy())
    }

    pub fn with_rng(assets: AssetLoader, viewport: Size, rng: StdRng) -> Self {
        Self {
            input: StateTracker::new(),
            message_bus: MessageBus::new(),
            ui: UiLayer::new(),
            draw_list: DrawList::new(),
            assets,
            viewport,
            frame_time: Duration::ZERO,
            rng,
        }
    }
}
