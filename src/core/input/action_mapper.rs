//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps physical keys to game actions.
//
// Architecture:
//   KeyCode → HashMap → Action
//   (several keys may share one action, e.g. ArrowLeft and KeyA)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{Action, KeyCode, StateTracker};

//=== ActionMapper ========================================================

/// Key → action table queried against a [`StateTracker`].
pub struct ActionMapper<A: Action> {
    key_bindings: HashMap<KeyCode, A>,
}

impl<A: Action> ActionMapper<A> {
    /// Creates a mapper with no bindings.
    pub fn new() -> Self {
        Self {
            key_bindings: HashMap::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds `key` to `action`, replacing any previous binding of `key`.
    pub fn bind_key(&mut self, key: KeyCode, action: A) {
        self.key_bindings.insert(key, action);
    }

    /// Builder-style variant of [`bind_key`](Self::bind_key).
    pub fn with_key(mut self, key: KeyCode, action: A) -> Self {
        self.bind_key(key, action);
        self
    }

    //--- Queries ----------------------------------------------------------

    pub fn map_key(&self, key: KeyCode) -> Option<A> {
        self.key_bindings.get(&key).copied()
    }

    /// `true` while any key bound to `action` is held.
    pub fn is_down(&self, input: &StateTracker, action: A) -> bool {
        self.key_bindings
            .iter()
            .any(|(key, bound)| *bound == action && input.is_key_down(*key))
    }

    /// `true` on the frame any key bound to `action` went down.
    pub fn is_pressed(&self, input: &StateTracker, action: A) -> bool {
        input
            .keys_pressed()
            .iter()
            .any(|key| self.map_key(*key) == Some(action))
    }
}

impl<A: Action> Default for ActionMapper<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
