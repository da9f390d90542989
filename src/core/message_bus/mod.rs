//=========================================================================
// Message Bus
//=========================================================================
//
// Typed per-frame event queues shared between scenes and the manager.
//
// Scenes never call back into the GameManager. They push typed events
// (phase outcomes, menu commands, widget clicks) and the manager reads
// them once the active scene has been ticked.
//
//=========================================================================

//=== Module Declarations =================================================

mod message_bus;
mod message_queue;

//=== Public API ==========================================================

pub use message_bus::{Message, MessageBus};
