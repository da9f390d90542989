//=========================================================================
// State Tracker
//=========================================================================
//
// Held-key state plus per-frame deltas.
//
// Architecture:
//   InputEvent → process_events() → held sets + frame deltas → query
//
// Frame lifecycle: begin_frame() → process_events() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, MouseButton};

//=== StateTracker ========================================================

/// Tracks what is held (persists across frames) and what changed this
/// frame (pressed/released keys, typed characters).
pub struct StateTracker {
    //--- Persistent State -------------------------------------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),

    //--- Frame Deltas (reset by begin_frame) ------------------------------
    /// Press order matters for scene key hooks, hence a Vec.
    keys_pressed: Vec<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    typed_text: String,
}

impl StateTracker {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            buttons_down: HashSet::new(),
            mouse_position: (0.0, 0.0),
            keys_pressed: Vec::new(),
            keys_released: HashSet::new(),
            buttons_pressed: HashSet::new(),
            typed_text: String::new(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears last frame's deltas. Held keys and cursor position survive.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.typed_text.clear();
    }

    /// Applies a batch of events to the current frame.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                // Auto-repeat does not count as a new press.
                if self.keys_down.insert(*key) {
                    self.keys_pressed.push(*key);
                }
            }
            InputEvent::KeyUp(key) => {
                if self.keys_down.remove(key) {
                    self.keys_released.insert(*key);
                }
            }
            InputEvent::MouseButtonDown(button) => {
                if self.buttons_down.insert(*button) {
                    self.buttons_pressed.insert(*button);
                }
            }
            InputEvent::MouseButtonUp(button) => {
                self.buttons_down.remove(button);
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (*x, *y);
            }
            InputEvent::Text(c) => {
                if !c.is_control() {
                    self.typed_text.push(*c);
                }
            }
            InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// `true` only on the frame the key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Keys that went down this frame, in arrival order.
    pub fn keys_pressed(&self) -> &[KeyCode] {
        &self.keys_pressed
    }

    /// Printable characters typed this frame.
    pub fn typed_text(&self) -> &str {
        &self.typed_text
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    /// Cursor position in window pixels.
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
