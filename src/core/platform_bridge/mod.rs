//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the winit platform layer and the logic thread.
//
// Components:
// - `interface`: event, window and error types shared by both sides
// - `event_collector`: logic-side draining of the channel into frames
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{PlatformError, PlatformEvent, WindowSettings};
