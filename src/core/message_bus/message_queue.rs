//=========================================================================
// Message Queue Trait
//=========================================================================
//
// Type-erased view over a `Vec<M>` so the bus can keep one queue per
// message type in a single map.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::Message;

//=========================================================================

/// Type-erased queue storage.
///
/// Clearing and counting work without knowing `M`; typed access goes
/// through the `Any` downcasts.
pub(super) trait MessageQueue: Send {
    /// Clears all messages while keeping the allocation.
    fn clear_queue(&mut self);

    /// Number of queued messages.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<M: Message> MessageQueue for Vec<M> {
    fn clear_queue(&mut self) {
        self.clear();
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Tests
//=========================================================================
