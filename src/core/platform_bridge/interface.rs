//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types (events, window settings, errors).
//
// Defines the contract for communication between platform and core threads.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from platform to core over the bounded channel.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlatformEvent {
    /// Batched input events for a frame.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Window inner size changed (also sent once after creation).
    Resized { width: f32, height: f32 },

    /// Window close requested.
    WindowClosed,
}

//=== WindowSettings ======================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub(crate) enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(String),

    /// Event loop execution error.
    #[error("Event loop error: {0}")]
    EventLoopExecution(String),
}
