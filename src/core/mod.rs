//=========================================================================
// Core Systems
//
// Engine-level services the game is built on, plus the orchestrator that
// drives the GameManager on the logic (non-platform) thread.
//
// Responsibilities:
// - Receive platform events over the bounded channel
// - Turn them into one FrameInput per tick
// - Tick the GameManager at a fixed rate (TPS)
// - Shut the game down cleanly when the window closes
//
// Notes:
// The orchestrator owns the GameManager outright and never shares it;
// the only link to the platform thread is the channel.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod assets;
pub mod geometry;
pub mod globals;
pub mod input;
pub mod message_bus;
pub(crate) mod platform_bridge;
pub mod render;
pub mod scene;
pub mod storage;
pub mod time;
pub mod ui;

//=== Standard Library Imports ============================================

use std::io;
use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Internal Modules ====================================================

use crate::game::{FrameInput, GameManager};
use platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== CoreSystemsOrchestrator =============================================

/// Runs the game loop on its own thread.
pub(crate) struct CoreSystemsOrchestrator {
    manager: GameManager,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(manager: GameManager) -> Self {
        Self { manager }
    }

    /// Registration and first activation before the thread starts.
    pub(crate) fn init_manager<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GameManager),
    {
        init_fn(&mut self.manager);
    }

    #[cfg(test)]
    pub(crate) fn manager(&self) -> &GameManager {
        &self.manager
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Collects platform events (waiting at most one frame)
    //  2. Ticks the GameManager with the measured frame time
    //  3. Sleeps out the rest of the frame
    //  4. Exits when the window closes or the channel disconnects
    //
    pub(crate) fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> io::Result<thread::JoinHandle<()>> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::Builder::new()
            .name("core-logic".into())
            .spawn(move || {
                let mut manager = self.manager;
                let mut collector = EventCollector::new(receiver);
                let mut last_tick = Instant::now();

                loop {
                    let frame_start = Instant::now();

                    //--- Step 1: Gather platform events --------------------
                    if collector.collect_frame(frame_duration) == TickControl::Exit {
                        info!("Core thread exiting.");
                        break;
                    }

                    //--- Step 2: Tick the game -----------------------------
                    let now = Instant::now();
                    let frame = Self::frame_input(&mut collector, now - last_tick);
                    last_tick = now;
                    manager.tick(frame);

                    //--- Step 3: Maintain fixed pacing ---------------------
                    let elapsed = frame_start.elapsed();
                    if elapsed < frame_duration {
                        thread::sleep(frame_duration - elapsed);
                    }
                }

                manager.shutdown();
                debug!("Game manager shut down");
            })
    }

    fn frame_input(collector: &mut EventCollector, dt: Duration) -> FrameInput {
        let mut frame = FrameInput::new(dt).with_events(collector.take_events());
        frame.resized = collector.resized();
        frame
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
