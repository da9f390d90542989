//=========================================================================
// Input Buffer
//
// Per-frame staging area between winit callbacks and the channel to the
// logic thread. Splits input into two streams:
//
// - `discrete`: key/button transitions and typed characters, in order
// - `continuous`: cursor motion, coalesced to the latest position
//
// Drained once per redraw; an empty buffer produces nothing to send.
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== Internal Modules ====================================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Continuous Events ------------------------------------------------

    /// Keeps only the latest event of each continuous kind.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    //--- Discrete Events --------------------------------------------------

    /// Appends a transition. A key or button event identical to the one
    /// before it (OS auto-repeat) is dropped; typed characters never are,
    /// so "ll" survives.
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        let repeated = !matches!(event, InputEvent::Text(_))
            && self.discrete.last() == Some(&event);
        if !repeated {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Takes `(discrete, continuous)` for this frame, `None` if nothing
    /// was buffered.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }
        let discrete = std::mem::take(&mut self.discrete);
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;

    fn mouse_move(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    #[test]
    fn repeated_key_down_is_dropped() {
        let mut buffer = InputBuffer::new();

        buffer.push_discrete(InputEvent::KeyDown(KeyCode::KeyA));
        buffer.push_discrete(InputEvent::KeyDown(KeyCode::KeyA));
        buffer.push_discrete(InputEvent::KeyDown(KeyCode::KeyB));

        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn repeated_text_is_kept() {
        let mut buffer = InputBuffer::new();

        buffer.push_discrete(InputEvent::Text('l'));
        buffer.push_discrete(InputEvent::Text('l'));

        let (discrete, _) = buffer.drain().unwrap();
        assert_eq!(discrete, vec![InputEvent::Text('l'), InputEvent::Text('l')]);
    }

    #[test]
    fn cursor_motion_keeps_latest_position() {
        let mut buffer = InputBuffer::new();
        buffer.push_continuous(mouse_move(10.0, 10.0));
        buffer.push_continuous(mouse_move(20.0, 30.0));

        let (_, continuous) = buffer.drain().unwrap();

        assert_eq!(continuous.len(), 1);
        match continuous[0] {
            InputEvent::MouseMoved { x, y } => assert_eq!((x, y), (20.0, 30.0)),
            ref other => panic!("expected MouseMoved, found {:?}", other),
        }
    }

    #[test]
    fn drain_empties_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(InputEvent::KeyDown(KeyCode::KeyA));
        buffer.push_continuous(mouse_move(5.0, 5.0));

        assert!(buffer.drain().is_some());
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none());
    }
}
