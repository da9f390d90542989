//=========================================================================
// Global Game State
//=========================================================================
//
// GlobalContext: the explicit context object passed to scene hooks.
// It replaces any ambient singleton; whoever owns the frame loop owns it.
//
//=========================================================================

//=== Module Declarations =================================================

mod global_context;

//=== Public API ==========================================================

pub use global_context::GlobalContext;
