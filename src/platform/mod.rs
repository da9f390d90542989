//=========================================================================
// Platform Subsystem
//
// Bridges winit (OS-level events) with the logic thread over a bounded
// crossbeam channel.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  EventCollector  │
//  │   ↓                      │    │  ↓               │
//  │  InputProcessor          │    │  GameManager     │
//  │   ├─ key transitions     │    │   ├─ UI layer    │
//  │   └─ typed text          │    │   └─ scenes      │
//  │   ↓                      │    │                  │
//  │  InputBuffer             │    └──────────────────┘
//  │   ├─ discrete: Vec<>     │             ↑
//  │   └─ continuous: Set<>   │             │
//  │   ↓                      │             │
//  │  RedrawRequested (flush) │             │
//  │   ↓                      │             │
//  │  Channel ────────────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
// ```
//
// RedrawRequested is the frame boundary: all buffered input is sent as
// one batch. Resizes are forwarded immediately. If the logic thread is
// gone, events are dropped with a warning so the window can still close.
//
// Runs on the thread that called `Engine::run()` (winit requires the
// main thread on macOS/iOS).
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::{Sender, TrySendError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent, WindowSettings};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Window owner and input aggregator.
///
/// Not `Send`: it stays on the main thread and talks to the logic thread
/// only through `event_sender`.
pub(crate) struct Platform {
    /// Created lazily in `resumed()`.
    window: Option<Window>,
    settings: WindowSettings,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(event_sender: Sender<PlatformEvent>, settings: WindowSettings) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            settings,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// exits with an error.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered input as one `Inputs` batch. Nothing is sent for an
    /// empty frame.
    fn flush_input_buffer(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return;
        };
        let total = discrete.len() + continuous.len();

        trace!(
            target: "platform::input",
            "Flushing {} discrete + {} continuous events",
            discrete.len(),
            continuous.len()
        );

        self.send(PlatformEvent::Inputs { discrete, continuous }, total);
    }

    fn send_resize(&mut self, size: PhysicalSize<u32>) {
        self.send(
            PlatformEvent::Resized {
                width: size.width as f32,
                height: size.height as f32,
            },
            1,
        );
    }

    /// Non-blocking send. A full channel means the logic thread is behind,
    /// a disconnected one that it has stopped; either way the events are
    /// dropped rather than stalling the window.
    fn send(&self, event: PlatformEvent, count: usize) {
        match self.event_sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(target: "platform::input", "Channel full, dropping {} events", count);
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "platform::input", "Channel disconnected, dropping {} events", count);
            }
        }
    }

    fn close(&self, event_loop: &ActiveEventLoop) {
        let _ = self.event_sender.send(PlatformEvent::WindowClosed);
        event_loop.exit();
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.send_resize(size);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.close(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.close(event_loop);
            }

            WindowEvent::Resized(size) => {
                debug!(target: "platform", "Window resized to {}x{}", size.width, size.height);
                self.send_resize(*size);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self
                    .input_processor
                    .process_mouse_move(position.x as f32, position.y as f32);
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let events = self.input_processor.process_key_event(key_event);
                if events.is_empty() {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
                for event in events {
                    self.buffer.push_discrete(event);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}
