//=========================================================================
// Engine
//
// Entry point that wires the game to a window.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              ├─ init(|manager| ...)
//         ├─ with_window_size()      └─ run(): spawns the logic thread,
//         ├─ with_asset_dir()                  runs the platform loop,
//         └─ with_high_score_path()            joins on exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::assets::{AssetLoader, FsImageSource};
use crate::core::geometry::Size;
use crate::core::globals::GlobalContext;
use crate::core::platform_bridge::{PlatformEvent, WindowSettings};
use crate::core::storage::{FileHighScoreStore, HIGH_SCORE_KEY};
use crate::core::CoreSystemsOrchestrator;
use crate::game::{GameManager, PhaseProgression};
use crate::platform::Platform;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 events
/// - **Window**: "Neurobeep", 1280×720
/// - **Assets**: `assets/`
/// - **High score file**: `neurobeep_highscore` in the working directory
/// - **Progression**: [`PhaseProgression::Loop`]
///
/// # Examples
///
/// ```no_run
/// use neurobeep::EngineBuilder;
/// use neurobeep::game::{LandingPage, LetterPhase, SceneId};
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_window_size(1024, 768)
///     .build()
///     .init(|manager| {
///         manager.add_scene(SceneId::Landing, LandingPage::new());
///         manager.add_scene(SceneId::Phase(1), LetterPhase::new(1));
///         manager.init(SceneId::Landing);
///     })
///     .run();
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    title: String,
    window_size: (u32, u32),
    asset_dir: PathBuf,
    high_score_path: PathBuf,
    progression: PhaseProgression,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            title: "Neurobeep".to_string(),
            window_size: (1280, 720),
            asset_dir: PathBuf::from("assets"),
            high_score_path: PathBuf::from(HIGH_SCORE_KEY),
            progression: PhaseProgression::default(),
        }
    }

    /// Sets the target ticks per second for the logic thread. Player
    /// speed is per tick, so this also scales movement speed.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    /// Batches beyond it are dropped by the platform with a warning.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.window_size = (width, height);
        self
    }

    /// # Panics
    ///
    /// Panics if `title` is blank.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        assert!(!title.trim().is_empty(), "Window title must not be empty");
        self.title = title;
        self
    }

    /// Directory holding `player.png` and the `{C}_letter.png` sprites.
    ///
    /// # Panics
    ///
    /// Panics if `dir` is empty.
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        assert!(!dir.as_os_str().is_empty(), "Asset directory must not be empty");
        self.asset_dir = dir;
        self
    }

    /// File the high score is read from and written to.
    ///
    /// # Panics
    ///
    /// Panics if `path` is empty.
    pub fn with_high_score_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        assert!(!path.as_os_str().is_empty(), "High score path must not be empty");
        self.high_score_path = path;
        self
    }

    pub fn with_progression(mut self, progression: PhaseProgression) -> Self {
        self.progression = progression;
        self
    }

    /// Creates the game manager (starting the asset worker and reading
    /// the high score) and wraps it in an [`Engine`].
    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, channel: {}, window: {}x{})",
            self.tps, self.channel_capacity, self.window_size.0, self.window_size.1
        );

        let (width, height) = self.window_size;
        let context = GlobalContext::new(
            AssetLoader::threaded(FsImageSource::new(self.asset_dir)),
            Size::new(width as f32, height as f32),
        );
        let manager = GameManager::new(context, FileHighScoreStore::new(self.high_score_path))
            .with_progression(self.progression);

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(manager),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: WindowSettings {
                title: self.title,
                width,
                height,
            },
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Game runtime.
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► GameManager → scenes, UI, assets
///   │
///   └─► Platform (winit event loop)
///         └─► Window, input batching
///
/// Communication: bounded crossbeam channel (PlatformEvent)
/// ```
pub struct Engine {
    orchestrator: CoreSystemsOrchestrator,
    tps: f64,
    channel_capacity: usize,
    window: WindowSettings,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Registers scenes and picks the first one before the engine runs.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GameManager),
    {
        info!("Initializing game");
        self.orchestrator.init_manager(init_fn);
        info!("Game initialization complete");
        self
    }

    //--- Execution --------------------------------------------------------

    /// Runs until the window closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded platform → core channel
    /// 2. Spawns the logic thread at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. Joins the logic thread
    pub fn run(self) {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = match self.orchestrator.spawn_core_thread(rx, self.tps) {
            Ok(handle) => handle,
            Err(e) => {
                error!("Failed to spawn core thread: {}", e);
                return;
            }
        };
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, self.window);
        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        //--- 4. Wait for the logic thread --------------------------------
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
