//=========================================================================
// Scene Manager
//=========================================================================
//
// Manages scene registration, the single active scene, and the ordered
// switch protocol.
//
// Scenes are stored in a HashMap by key and are constructed once; the
// manager only tracks which key is current.
//
// Switch order:
//   current.exit() → current.cleanup() → target.setup() → target.enter()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, info, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::globals::GlobalContext;
use crate::core::input::KeyCode;

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Scene keys uniquely identify scenes in the SceneManager's HashMap.
/// Typically implemented by game-specific enums.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Errors ==============================================================

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("scene {0} not found")]
    NotFound(String),
}

//=== Scene Manager =======================================================

/// Keyed scene registry with at most one active scene.
pub struct SceneManager<S: SceneKey> {
    scenes: HashMap<S, Box<dyn Scene>>,
    current: Option<S>,
}

impl<S: SceneKey> SceneManager<S> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            current: None,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene under `key`.
    ///
    /// An existing registration is replaced with a warning. If the
    /// replaced scene is the current one it is torn down and the new scene
    /// is activated in its place, so the current key never points at a
    /// scene that missed `setup`.
    pub fn register_scene<T>(&mut self, key: S, scene: T, context: &mut GlobalContext)
    where
        T: Scene + 'static,
    {
        self.register_boxed(key, Box::new(scene), context);
    }

    fn register_boxed(&mut self, key: S, scene: Box<dyn Scene>, context: &mut GlobalContext) {
        let Some(mut replaced) = self.scenes.insert(key, scene) else {
            debug!("Registered scene {:?}", key);
            return;
        };

        warn!("Scene {:?} was already registered and has been replaced", key);

        if self.current == Some(key) {
            replaced.exit(context);
            replaced.cleanup(context);
            if let Some(scene) = self.scenes.get_mut(&key) {
                scene.setup(context);
                scene.enter(context);
            }
        }
    }

    pub fn contains(&self, key: S) -> bool {
        self.scenes.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    //--- Queries ----------------------------------------------------------

    /// Key of the current scene, `None` before the first switch.
    pub fn current(&self) -> Option<S> {
        self.current
    }

    pub fn current_scene(&self) -> Option<&dyn Scene> {
        self.current.and_then(|key| self.scene(key))
    }

    pub fn scene(&self, key: S) -> Option<&dyn Scene> {
        self.scenes.get(&key).map(|scene| scene.as_ref())
    }

    //--- Transitions ------------------------------------------------------

    /// Makes `key` the active scene.
    ///
    /// An unknown key leaves the current scene untouched. Switching to the
    /// current key restarts it through the full exit/cleanup/setup/enter
    /// cycle.
    pub fn switch_to(&mut self, key: S, context: &mut GlobalContext) -> Result<(), SceneError> {
        if !self.scenes.contains_key(&key) {
            return Err(SceneError::NotFound(format!("{:?}", key)));
        }

        self.deactivate_current(context);

        info!("Switching to scene {:?}", key);
        if let Some(scene) = self.scenes.get_mut(&key) {
            scene.setup(context);
            scene.enter(context);
        }
        self.current = Some(key);

        Ok(())
    }

    /// Exits and cleans up the current scene, leaving none active.
    pub fn shutdown(&mut self, context: &mut GlobalContext) {
        self.deactivate_current(context);
    }

    fn deactivate_current(&mut self, context: &mut GlobalContext) {
        let Some(previous) = self.current.take() else {
            return;
        };

        debug!("Leaving scene {:?}", previous);
        if let Some(scene) = self.scenes.get_mut(&previous) {
            scene.exit(context);
            scene.cleanup(context);
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Draws the current scene if it is active.
    pub fn update(&mut self, context: &mut GlobalContext) {
        if let Some(scene) = self.current_scene_mut() {
            if scene.is_active() {
                scene.draw(context);
            }
        }
    }

    //--- Input Forwarding -------------------------------------------------
    //
    // Forwarded to the current scene unconditionally; the scene decides
    // whether to act.

    pub fn handle_resize(&mut self, context: &mut GlobalContext) {
        if let Some(scene) = self.current_scene_mut() {
            scene.handle_resize(context);
        }
    }

    pub fn handle_mouse_pressed(&mut self, context: &mut GlobalContext) {
        if let Some(scene) = self.current_scene_mut() {
            scene.handle_mouse_pressed(context);
        }
    }

    pub fn handle_key_pressed(&mut self, key: KeyCode, context: &mut GlobalContext) {
        if let Some(scene) = self.current_scene_mut() {
            scene.handle_key_pressed(key, context);
        }
    }

    fn current_scene_mut(&mut self) -> Option<&mut Box<dyn Scene>> {
        let key = self.current?;
        self.scenes.get_mut(&key)
    }
}

impl<S: SceneKey> Default for SceneManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::{AssetLoader, MemoryImageSource};
    use crate::core::geometry::{Point, Size};
    use crate::core::scene::SceneBase;
    use crate::core::ui::Element;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        A,
        B,
        Missing,
    }

    impl SceneKey for TestScene {}

    type Journal = Arc<Mutex<Vec<String>>>;

    /// Records every hook call as "<name>.<hook>".
    struct Recording {
        base: SceneBase,
        journal: Journal,
    }

    impl Recording {
        fn new(name: &str, journal: &Journal) -> Self {
            Self {
                base: SceneBase::new(name),
                journal: Arc::clone(journal),
            }
        }

        fn log(&self, hook: &str) {
            self.journal
                .lock()
                .unwrap()
                .push(format!("{}.{}", self.base.name(), hook));
        }
    }

    impl Scene for Recording {
        fn base(&self) -> &SceneBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut SceneBase {
            &mut self.base
        }

        fn setup(&mut self, ctx: &mut GlobalContext) {
            self.log("setup");
            let id = ctx.ui.add(Element::label(self.base.name().to_string(), Point::default(), 10.0));
            self.base.own(id);
        }

        fn enter(&mut self, _ctx: &mut GlobalContext) {
            self.log("enter");
            self.base.set_active(true);
        }

        fn exit(&mut self, _ctx: &mut GlobalContext) {
            self.log("exit");
            self.base.set_active(false);
        }

        fn cleanup(&mut self, ctx: &mut GlobalContext) {
            self.log("cleanup");
            self.base.release_elements(&mut ctx.ui);
        }

        fn draw(&mut self, _ctx: &mut GlobalContext) {
            self.log("draw");
        }

        fn handle_key_pressed(&mut self, key: KeyCode, _ctx: &mut GlobalContext) {
            self.log(&format!("key:{:?}", key));
        }
    }

    fn context() -> GlobalContext {
        GlobalContext::new(
            AssetLoader::inline(MemoryImageSource::new()),
            Size::new(800.0, 600.0),
        )
    }

    fn setup() -> (SceneManager<TestScene>, GlobalContext, Journal) {
        let journal = Journal::default();
        let mut ctx = context();
        let mut manager = SceneManager::new();
        manager.register_scene(TestScene::A, Recording::new("a", &journal), &mut ctx);
        manager.register_scene(TestScene::B, Recording::new("b", &journal), &mut ctx);
        (manager, ctx, journal)
    }

    fn entries(journal: &Journal) -> Vec<String> {
        std::mem::take(&mut *journal.lock().unwrap())
    }

    #[test]
    fn first_switch_runs_setup_then_enter() {
        let (mut manager, mut ctx, journal) = setup();

        manager.switch_to(TestScene::A, &mut ctx).unwrap();

        assert_eq!(entries(&journal), vec!["a.setup", "a.enter"]);
        assert_eq!(manager.current(), Some(TestScene::A));
    }

    #[test]
    fn switch_tears_down_before_activating() {
        let (mut manager, mut ctx, journal) = setup();
        manager.switch_to(TestScene::A, &mut ctx).unwrap();
        entries(&journal);

        manager.switch_to(TestScene::B, &mut ctx).unwrap();

        assert_eq!(
            entries(&journal),
            vec!["a.exit", "a.cleanup", "b.setup", "b.enter"]
        );
        assert!(!manager.scene(TestScene::A).unwrap().is_active());
        assert!(manager.scene(TestScene::B).unwrap().is_active());
        // Only B's label survives.
        assert_eq!(ctx.ui.len(), 1);
    }

    #[test]
    fn unknown_key_leaves_current_scene() {
        let (mut manager, mut ctx, journal) = setup();
        manager.switch_to(TestScene::A, &mut ctx).unwrap();
        entries(&journal);

        let result = manager.switch_to(TestScene::Missing, &mut ctx);

        assert_eq!(result, Err(SceneError::NotFound("Missing".into())));
        assert_eq!(manager.current(), Some(TestScene::A));
        assert!(manager.current_scene().unwrap().is_active());
        assert!(entries(&journal).is_empty());
    }

    #[test]
    fn at_most_one_scene_is_active() {
        let (mut manager, mut ctx, _journal) = setup();
        for key in [TestScene::A, TestScene::B, TestScene::A, TestScene::A] {
            manager.switch_to(key, &mut ctx).unwrap();
            let active = [TestScene::A, TestScene::B]
                .iter()
                .filter(|k| manager.scene(**k).unwrap().is_active())
                .count();
            assert_eq!(active, 1);
        }
    }

    #[test]
    fn update_draws_only_active_scene() {
        let (mut manager, mut ctx, journal) = setup();

        manager.update(&mut ctx);
        assert!(entries(&journal).is_empty());

        manager.switch_to(TestScene::A, &mut ctx).unwrap();
        entries(&journal);
        manager.update(&mut ctx);
        assert_eq!(entries(&journal), vec!["a.draw"]);
    }

    #[test]
    fn key_presses_are_forwarded_to_current_scene() {
        let (mut manager, mut ctx, journal) = setup();
        manager.switch_to(TestScene::B, &mut ctx).unwrap();
        entries(&journal);

        manager.handle_key_pressed(KeyCode::Escape, &mut ctx);

        assert_eq!(entries(&journal), vec!["b.key:Escape"]);
    }

    #[test]
    fn replacing_current_scene_reactivates_replacement() {
        let (mut manager, mut ctx, journal) = setup();
        manager.switch_to(TestScene::A, &mut ctx).unwrap();
        entries(&journal);

        manager.register_scene(TestScene::A, Recording::new("a2", &journal), &mut ctx);

        assert_eq!(
            entries(&journal),
            vec!["a.exit", "a.cleanup", "a2.setup", "a2.enter"]
        );
        assert_eq!(manager.current_scene().unwrap().name(), "a2");
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn shutdown_leaves_no_current_scene() {
        let (mut manager, mut ctx, journal) = setup();
        manager.switch_to(TestScene::A, &mut ctx).unwrap();
        entries(&journal);

        manager.shutdown(&mut ctx);

        assert_eq!(entries(&journal), vec!["a.exit", "a.cleanup"]);
        assert_eq!(manager.current(), None);
        assert!(ctx.ui.is_empty());
    }
}
