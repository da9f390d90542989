//=========================================================================
// Input Event Types
//
// Platform-neutral representation of the inputs the game reacts to.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (held keys, per-frame presses, typed text)
//         ↓
//    ActionMapper / UiLayer / Scene hooks
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Side, thumb and macro buttons.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Covers letters (word entry, WASD movement), digits, arrows and the
/// handful of editing/control keys the scenes use. Text content is not
/// derived from key codes; typed characters arrive as [`InputEvent::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    /// Toggles pause during a phase.
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Keys the platform layer could not map.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level input event delivered by the platform layer.
///
/// # Equality & Hashing
///
/// Events compare by kind and payload, except `MouseMoved`, which
/// compares equal regardless of coordinates so the platform buffer can
/// coalesce cursor motion (last position wins).
#[derive(Debug, Clone)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    MouseButtonDown(MouseButton),
    MouseButtonUp(MouseButton),

    /// Cursor position in window pixels, top-left origin.
    MouseMoved { x: f32, y: f32 },

    /// A character produced by the keyboard layout (already shifted,
    /// composed, etc.). Routed to the focused text input.
    Text(char),

    /// Ignored by the input system.
    Unidentified,
}

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown(a), KeyDown(b)) | (KeyUp(a), KeyUp(b)) => a == b,
            (MouseButtonDown(a), MouseButtonDown(b)) | (MouseButtonUp(a), MouseButtonUp(b)) => {
                a == b
            }
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (Text(a), Text(b)) => a == b,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Consistent with `PartialEq`: cursor coordinates are not hashed.
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => key.hash(state),
            Self::MouseButtonDown(button) | Self::MouseButtonUp(button) => button.hash(state),
            Self::Text(c) => c.hash(state),
            Self::MouseMoved { .. } | Self::Unidentified => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn key_events_compare_by_kind_and_key() {
        assert_eq!(InputEvent::KeyDown(KeyCode::KeyW), InputEvent::KeyDown(KeyCode::KeyW));
        assert_ne!(InputEvent::KeyDown(KeyCode::KeyW), InputEvent::KeyUp(KeyCode::KeyW));
        assert_ne!(InputEvent::KeyDown(KeyCode::KeyW), InputEvent::KeyDown(KeyCode::KeyS));
    }

    #[test]
    fn mouse_moved_ignores_coordinates() {
        let a = InputEvent::MouseMoved { x: 1.0, y: 2.0 };
        let b = InputEvent::MouseMoved { x: 300.0, y: 40.0 };
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn text_events_keep_their_character() {
        assert_eq!(InputEvent::Text('c'), InputEvent::Text('c'));
        assert_ne!(InputEvent::Text('c'), InputEvent::Text('a'));
        assert_ne!(hash_of(&InputEvent::Text('c')), hash_of(&InputEvent::Text('a')));
    }

    #[test]
    fn hashset_coalesces_cursor_motion() {
        let mut set = HashSet::new();
        set.replace(InputEvent::MouseMoved { x: 1.0, y: 1.0 });
        set.replace(InputEvent::MouseMoved { x: 5.0, y: 9.0 });

        assert_eq!(set.len(), 1);
        match set.iter().next() {
            Some(InputEvent::MouseMoved { x, y }) => assert_eq!((*x, *y), (5.0, 9.0)),
            other => panic!("expected MouseMoved, got {:?}", other),
        }
    }
}
