//=========================================================================
// Event Collector
//=========================================================================
//
// Logic-side channel reader with bounded draining and shutdown detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → events + resize → TickControl
//
// Waits up to one frame budget for the first event, then drains what is
// already queued without blocking. Draining is bounded so a flood of
// input cannot starve the tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::geometry::Size;
use crate::core::input::InputEvent;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    events: Vec<InputEvent>,
    resized: Option<Size>,
}

impl EventCollector {
    const MAX_EVENTS_PER_FRAME: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            events: Vec::with_capacity(32),
            resized: None,
        }
    }

    /// Gathers this frame's platform events, waiting at most `budget`
    /// for the first one.
    pub(crate) fn collect_frame(&mut self, budget: Duration) -> TickControl {
        self.events.clear();
        self.resized = None;

        match self.receiver.recv_timeout(budget) {
            Ok(event) => {
                if self.handle_event(event) == TickControl::Exit {
                    return TickControl::Exit;
                }
            }
            Err(RecvTimeoutError::Disconnected) => return TickControl::Exit,
            Err(RecvTimeoutError::Timeout) => return TickControl::Continue,
        }

        let mut drained = 1;
        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!("Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Input collected by the last `collect_frame`, in arrival order.
    #[cfg(test)]
    pub(crate) fn events(&self) -> &[InputEvent] {
        &self.events
    }

    pub(crate) fn take_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Latest size reported this frame.
    pub(crate) fn resized(&self) -> Option<Size> {
        self.resized
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs { discrete, continuous } => {
                // Cursor first so a click in this batch hit-tests where
                // the pointer ended up.
                self.events.extend(continuous);
                self.events.extend(discrete);
                TickControl::Continue
            }
            PlatformEvent::Resized { width, height } => {
                debug!("Resize to {}x{} received", width, height);
                self.resized = Some(Size::new(width, height));
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, MouseButton};
    use crossbeam_channel::unbounded;

    const BUDGET: Duration = Duration::from_millis(1);

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.collect_frame(BUDGET), TickControl::Continue);
        assert!(collector.events().is_empty());
        assert_eq!(collector.resized(), None);
    }

    #[test]
    fn collect_puts_cursor_before_buttons() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs {
            discrete: vec![InputEvent::MouseButtonDown(MouseButton::Left)],
            continuous: vec![InputEvent::MouseMoved { x: 10.0, y: 20.0 }],
        })
        .unwrap();
        tx.send(PlatformEvent::Inputs {
            discrete: vec![InputEvent::KeyDown(KeyCode::KeyA)],
            continuous: vec![],
        })
        .unwrap();

        assert_eq!(collector.collect_frame(BUDGET), TickControl::Continue);
        assert_eq!(
            collector.take_events(),
            vec![
                InputEvent::MouseMoved { x: 10.0, y: 20.0 },
                InputEvent::MouseButtonDown(MouseButton::Left),
                InputEvent::KeyDown(KeyCode::KeyA),
            ]
        );
    }

    #[test]
    fn collect_keeps_latest_resize() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Resized { width: 800.0, height: 600.0 }).unwrap();
        tx.send(PlatformEvent::Resized { width: 1024.0, height: 768.0 }).unwrap();

        collector.collect_frame(BUDGET);

        assert_eq!(collector.resized(), Some(Size::new(1024.0, 768.0)));
    }

    #[test]
    fn collect_clears_previous_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs {
            discrete: vec![InputEvent::KeyDown(KeyCode::Space)],
            continuous: vec![],
        })
        .unwrap();
        tx.send(PlatformEvent::Resized { width: 1.0, height: 1.0 }).unwrap();
        collector.collect_frame(BUDGET);
        assert_eq!(collector.events().len(), 1);

        collector.collect_frame(BUDGET);
        assert!(collector.events().is_empty());
        assert_eq!(collector.resized(), None);
    }

    #[test]
    fn collect_returns_exit_on_window_closed() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(collector.collect_frame(BUDGET), TickControl::Exit);
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        drop(tx);

        assert_eq!(collector.collect_frame(BUDGET), TickControl::Exit);
    }
}
