//=========================================================================
// Neurobeep binary
//
// Installs the logger (honours RUST_LOG, defaults to info), registers
// the landing page and the letter phase, and runs the window.
//
//=========================================================================

use log::info;
use neurobeep::game::{LandingPage, LetterPhase, SceneId};
use neurobeep::EngineBuilder;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting neurobeep");

    EngineBuilder::new()
        .with_title("Neurobeep")
        .build()
        .init(|manager| {
            manager.add_scene(SceneId::Landing, LandingPage::new());
            manager.add_scene(SceneId::Phase(1), LetterPhase::new(1));
            manager.init(SceneId::Landing);
        })
        .run();
}
