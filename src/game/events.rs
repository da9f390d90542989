//=========================================================================
// Game Events
//=========================================================================
//
// Typed messages scenes publish on the message bus for the GameManager.
// Scenes never hold a reference back to the manager.
//
//=========================================================================

/// Outcome of a gameplay phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// The round was won; `score` is what the phase accumulated.
    Completed { phase: u32, score: u32 },
    /// Lives ran out.
    GameOver { phase: u32 },
}

/// Requests from menu scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    StartGame,
}
