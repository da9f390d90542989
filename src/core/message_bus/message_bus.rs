//=========================================================================
// Message Bus
//=========================================================================
//
// One queue per message type, keyed by `TypeId`.
//
// Architecture:
//   Scene::draw() ──push<M>()──→ HashMap<TypeId, Vec<M>>
//                                      ↓
//   GameManager ──read<M>() / take<M>()──┘
//                                      ↓
//   GameManager ──clear_all()──→ end of tick
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

use log::error;

//=== Internal Dependencies ===============================================

use super::message_queue::MessageQueue;

//=== Public API ==========================================================

/// Marker trait for types that can travel over the [`MessageBus`].
///
/// Blanket-implemented for every `Send + 'static` type.
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=========================================================================

/// Typed per-frame event queues.
///
/// Messages stay queued until they are taken or the bus is cleared at
/// the tick boundary, so several readers can observe the same frame.
pub struct MessageBus {
    queues: HashMap<TypeId, Box<dyn MessageQueue>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }

    //--- Message Operations -----------------------------------------------

    /// Queues a message under its type.
    pub fn push<M: Message>(&mut self, msg: M) {
        let queue = self
            .queues
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()));

        match queue.as_any_mut().downcast_mut::<Vec<M>>() {
            Some(queue) => queue.push(msg),
            None => error!(
                "Message queue for {} holds a different type",
                std::any::type_name::<M>()
            ),
        }
    }

    /// Returns every queued message of type `M` without consuming them.
    pub fn read<M: Message>(&self) -> &[M] {
        self.typed::<M>().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes and returns every queued message of type `M`.
    ///
    /// Used when handling a message needs mutable access to state that
    /// also owns the bus.
    pub fn take<M: Message>(&mut self) -> Vec<M> {
        self.queues
            .get_mut(&TypeId::of::<M>())
            .and_then(|q| q.as_any_mut().downcast_mut::<Vec<M>>())
            .map(std::mem::take)
            .unwrap_or_default()
    }

    //--- Query API --------------------------------------------------------

    pub fn has_messages<M: Message>(&self) -> bool {
        self.count::<M>() > 0
    }

    pub fn count<M: Message>(&self) -> usize {
        self.typed::<M>().map(Vec::len).unwrap_or(0)
    }

    //--- Clearing ---------------------------------------------------------

    /// Clears messages of type `M`, keeping the allocation.
    pub fn clear<M: Message>(&mut self) {
        if let Some(queue) = self.queues.get_mut(&TypeId::of::<M>()) {
            queue.clear_queue();
        }
    }

    /// Clears every queue. Called once per tick after the manager has
    /// consumed the frame's events.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear_queue();
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn typed<M: Message>(&self) -> Option<&Vec<M>> {
        self.queues
            .get(&TypeId::of::<M>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<M>>())
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
