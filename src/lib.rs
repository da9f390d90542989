//=========================================================================
// Neurobeep — Library Root
//
// A letter-chase word game: type a word, then steer onto the target
// letter while dodging the others.
//
// Layout:
// - `core`: scene system, input, UI layer, assets, storage, message bus
// - `game`: the landing page, the letter phase and the GameManager
// - `engine`: builder-configured runtime (logic thread + window)
// - `platform`: winit glue, private
//
// Typical usage:
// ```no_run
// use neurobeep::prelude::*;
//
// EngineBuilder::new()
//     .build()
//     .init(|manager| {
//         manager.add_scene(SceneId::Landing, LandingPage::new());
//         manager.add_scene(SceneId::Phase(1), LetterPhase::new(1));
//         manager.init(SceneId::Landing);
//     })
//     .run();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------

pub mod core;
pub mod game;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------

mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
