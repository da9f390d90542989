//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit events into engine InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent (engine type) → InputBuffer
//
// A key press may yield two events: the physical key transition and the
// text it produced under the active layout. Unmapped keys (F-keys,
// numpad, media keys) only contribute their text, if any.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::ElementState,
    event::{KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, MouseButton};

//=== InputProcessor ======================================================

/// Stateless translator from winit to engine input.
pub(crate) struct InputProcessor;

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self
    }

    //--- Event Processing -------------------------------------------------

    /// Key transition plus any printable text it produced, in that order.
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Vec<InputEvent> {
        let key = match key_event.physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => KeyCode::Unidentified,
        };

        let mut events = Vec::with_capacity(2);
        if key != KeyCode::Unidentified {
            events.push(Self::key_transition(key, key_event.state));
        }
        if key_event.state == ElementState::Pressed {
            if let Some(text) = &key_event.text {
                events.extend(Self::text_events(text));
            }
        }
        events
    }

    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> InputEvent {
        let button = MouseButton::from(button);
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown(button),
            ElementState::Released => InputEvent::MouseButtonUp(button),
        }
    }

    /// Cursor position in physical window pixels.
    pub(crate) fn process_mouse_move(&self, x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    //--- Internal Helpers -------------------------------------------------

    fn key_transition(key: KeyCode, state: ElementState) -> InputEvent {
        match state {
            ElementState::Pressed => InputEvent::KeyDown(key),
            ElementState::Released => InputEvent::KeyUp(key),
        }
    }

    /// Printable characters only; Enter, Backspace and friends arrive as
    /// control characters and are handled through their key codes.
    fn text_events(text: &str) -> impl Iterator<Item = InputEvent> + '_ {
        text.chars()
            .filter(|c| !c.is_control())
            .map(InputEvent::Text)
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Maps letters, digits, arrows and the editing keys the game uses.
/// Everything else becomes `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------
            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------
            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------
            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Editing & Control --------------------------------------------
            Space => KeyCode::Space,
            Enter | NumpadEnter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,

            _ => KeyCode::Unidentified,
        }
    }
}

/// Back/Forward and extra buttons collapse to `Other`.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
