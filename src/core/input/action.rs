//=========================================================================
// Action Trait
//=========================================================================
//
// Game-defined action identifiers. The input layer routes them without
// interpreting them; scenes decide what `MoveLeft` or `Pause` means.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Action Trait ========================================================

/// Marker trait for game-defined action enums.
///
/// ```
/// use neurobeep::core::input::Action;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum MenuAction { Confirm, Back }
///
/// impl Action for MenuAction {}
/// ```
pub trait Action: 'static + Send + Copy + Eq + Hash + Debug {}
