//=========================================================================
// Scene System
//=========================================================================
//
// Scene lifecycle contract and single-active-scene switching.
//
// Architecture:
//   SceneManager
//     ├─ scenes: HashMap<S, Box<dyn Scene>>
//     └─ current: Option<S>
//
// Lifecycle:
//   setup() → enter() → draw()* → exit() → cleanup()
//   (a scene may run this cycle any number of times; setup rebuilds its
//    UI each time rather than resuming the previous one)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::input::KeyCode;
use crate::core::ui::{ElementId, UiLayer};
use crate::game::GameplayState;

//=== Module Declarations =================================================

mod scene_manager;

//=== Public API ==========================================================

pub use scene_manager::{SceneError, SceneKey, SceneManager};

//=== SceneBase ===========================================================

/// State every scene carries: identity, activity and the UI elements it
/// created and must release.
#[derive(Debug, Clone, Default)]
pub struct SceneBase {
    name: String,
    active: bool,
    elements: Vec<ElementId>,
}

impl SceneBase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: false,
            elements: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Records `id` as owned by this scene and hands it back.
    pub fn own(&mut self, id: ElementId) -> ElementId {
        self.elements.push(id);
        id
    }

    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    /// Removes every owned element. Elements already removed elsewhere
    /// are skipped.
    pub fn release_elements(&mut self, ui: &mut UiLayer) {
        for id in self.elements.drain(..) {
            ui.remove(id);
        }
    }
}

//=== Scene Trait =========================================================

/// A self-contained screen with a standard activation lifecycle.
///
/// Only `base`/`base_mut` are required. Callers must run `setup` before
/// the first `enter`, and `exit` then `cleanup` before the scene is
/// reused, so UI from a previous activation never leaks.
///
/// ```
/// # use neurobeep::prelude::*;
/// struct Credits {
///     base: SceneBase,
/// }
///
/// impl Scene for Credits {
///     fn base(&self) -> &SceneBase { &self.base }
///     fn base_mut(&mut self) -> &mut SceneBase { &mut self.base }
///
///     fn setup(&mut self, ctx: &mut GlobalContext) {
///         let label = ctx.ui.add(Element::label("Thanks!", Point::new(10.0, 10.0), 24.0));
///         self.base.own(label);
///     }
/// }
/// ```
pub trait Scene: Send {
    fn base(&self) -> &SceneBase;

    fn base_mut(&mut self) -> &mut SceneBase;

    fn name(&self) -> &str {
        self.base().name()
    }

    fn is_active(&self) -> bool {
        self.base().is_active()
    }

    //--- Lifecycle --------------------------------------------------------

    /// Builds the scene's UI. Called before every `enter`.
    fn setup(&mut self, _ctx: &mut GlobalContext) {}

    fn enter(&mut self, _ctx: &mut GlobalContext) {
        self.base_mut().set_active(true);
    }

    fn exit(&mut self, _ctx: &mut GlobalContext) {
        self.base_mut().set_active(false);
    }

    /// Releases everything `setup` created.
    fn cleanup(&mut self, ctx: &mut GlobalContext) {
        self.base_mut().release_elements(&mut ctx.ui);
    }

    //--- Per-frame & Input ------------------------------------------------

    /// Called once per tick while the scene is active.
    fn draw(&mut self, _ctx: &mut GlobalContext) {}

    fn handle_resize(&mut self, _ctx: &mut GlobalContext) {}

    fn handle_mouse_pressed(&mut self, _ctx: &mut GlobalContext) {}

    fn handle_key_pressed(&mut self, _key: KeyCode, _ctx: &mut GlobalContext) {}

    //--- Capabilities -----------------------------------------------------

    /// Score/lives/pause state, for scenes that are gameplay phases.
    fn gameplay(&self) -> Option<&GameplayState> {
        None
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
