//=========================================================================
// UI Layer
//=========================================================================
//
// Retained widget store for overlays: panels, labels, text inputs and
// buttons addressed by `ElementId` handles.
//
// Architecture:
//   Scene::setup() → UiLayer::add(..) → ElementId (owned by the scene)
//   click_at(point) → topmost visible button → UiEvent::Clicked (bus)
//   draw(&mut DrawList) → one command group per visible element
//
// Elements form a shallow tree through `parent`; hiding or removing a
// parent affects its children.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

use log::trace;

//=== Internal Dependencies ===============================================

use super::geometry::{Point, Rect};
use super::render::{Color, DrawList};

//=== ElementId ===========================================================

/// Handle to a UI element. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

//=== UiEvent =============================================================

/// Widget interaction published on the message bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Clicked(ElementId),
}

//=== Element =============================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Panel { color: Color },
    Label { text: String, size: f32, color: Color },
    TextInput { value: String, placeholder: String },
    Button { label: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub rect: Rect,
    pub visible: bool,
    pub parent: Option<ElementId>,
}

impl Element {
    pub fn panel(rect: Rect, color: Color) -> Self {
        Self::new(ElementKind::Panel { color }, rect)
    }

    pub fn label(text: impl Into<String>, position: Point, size: f32) -> Self {
        let text = text.into();
        let width = text.chars().count() as f32 * size * 0.6;
        Self::new(
            ElementKind::Label {
                text,
                size,
                color: Color::BLACK,
            },
            Rect::new(position.x, position.y, width, size),
        )
    }

    pub fn text_input(placeholder: impl Into<String>, rect: Rect) -> Self {
        Self::new(
            ElementKind::TextInput {
                value: String::new(),
                placeholder: placeholder.into(),
            },
            rect,
        )
    }

    pub fn button(label: impl Into<String>, rect: Rect) -> Self {
        Self::new(ElementKind::Button { label: label.into() }, rect)
    }

    fn new(kind: ElementKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            visible: true,
            parent: None,
        }
    }

    //--- Builder Modifiers ------------------------------------------------

    pub fn child_of(mut self, parent: ElementId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_color(mut self, new_color: Color) -> Self {
        match &mut self.kind {
            ElementKind::Panel { color } | ElementKind::Label { color, .. } => *color = new_color,
            _ => {}
        }
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

//=== UiLayer =============================================================

#[derive(Debug, Default)]
pub struct UiLayer {
    next_id: u64,
    /// Keyed by id, so iteration order is creation order (back to front).
    elements: BTreeMap<ElementId, Element>,
    focused: Option<ElementId>,
}

impl UiLayer {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Creation & Removal -----------------------------------------------

    pub fn add(&mut self, element: Element) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        trace!("ui: add {:?} {:?}", id, element.kind);
        self.elements.insert(id, element);
        id
    }

    /// Removes an element and all its descendants.
    ///
    /// Returns `false` if `id` was already gone; removing twice is harmless.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if self.elements.remove(&id).is_none() {
            return false;
        }

        let children: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|(_, element)| element.parent == Some(id))
            .map(|(child, _)| *child)
            .collect();
        for child in children {
            self.remove(child);
        }

        if self.focused == Some(id) {
            self.focused = None;
        }
        true
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    //--- Mutation ---------------------------------------------------------

    pub fn set_position(&mut self, id: ElementId, position: Point) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.rect.x = position.x;
            element.rect.y = position.y;
        }
    }

    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.rect = rect;
        }
    }

    pub fn set_visible(&mut self, id: ElementId, visible: bool) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.visible = visible;
        }
        if !visible && self.focused == Some(id) {
            self.focused = None;
        }
    }

    /// Replaces a label's text, a button's caption or an input's value.
    pub fn set_text(&mut self, id: ElementId, new_text: impl Into<String>) {
        let Some(element) = self.elements.get_mut(&id) else {
            return;
        };
        let new_text = new_text.into();
        match &mut element.kind {
            ElementKind::Label { text, .. } => *text = new_text,
            ElementKind::Button { label } => *label = new_text,
            ElementKind::TextInput { value, .. } => *value = new_text,
            ElementKind::Panel { .. } => {}
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Current text of a text input.
    pub fn value(&self, id: ElementId) -> Option<&str> {
        match &self.elements.get(&id)?.kind {
            ElementKind::TextInput { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Text of a label or caption of a button.
    pub fn text(&self, id: ElementId) -> Option<&str> {
        match &self.elements.get(&id)?.kind {
            ElementKind::Label { text, .. } => Some(text),
            ElementKind::Button { label } => Some(label),
            ElementKind::TextInput { value, .. } => Some(value),
            ElementKind::Panel { .. } => None,
        }
    }

    /// Visible itself and through every ancestor.
    pub fn is_visible(&self, id: ElementId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.elements.get(&current) {
                Some(element) if element.visible => cursor = element.parent,
                _ => return false,
            }
        }
        true
    }

    /// First button whose caption matches, in creation order.
    pub fn find_button(&self, caption: &str) -> Option<ElementId> {
        self.elements.iter().find_map(|(id, element)| match &element.kind {
            ElementKind::Button { label } if label == caption => Some(*id),
            _ => None,
        })
    }

    //--- Interaction ------------------------------------------------------

    /// Resolves a click against the topmost visible panel, button or text
    /// input under `point`. Text inputs take focus; buttons are returned
    /// so the caller can publish `UiEvent::Clicked`. A panel swallows the
    /// click so widgets beneath it stay untouched. Clicking a panel or empty
    /// space drops focus.
    pub fn click_at(&mut self, point: Point) -> Option<ElementId> {
        let hit = self
            .elements
            .iter()
            .rev()
            .find(|(id, element)| {
                matches!(
                    element.kind,
                    ElementKind::Panel { .. } | ElementKind::Button { .. } | ElementKind::TextInput { .. }
                ) && element.rect.contains(point)
                    && self.is_visible(**id)
            })
            .map(|(id, element)| (*id, &element.kind));

        match hit {
            Some((id, ElementKind::Button { .. })) => Some(id),
            Some((id, ElementKind::TextInput { .. })) => {
                self.focused = Some(id);
                None
            }
            _ => {
                self.focused = None;
                None
            }
        }
    }

    pub fn focus(&mut self, id: ElementId) {
        if matches!(
            self.elements.get(&id).map(|e| &e.kind),
            Some(ElementKind::TextInput { .. })
        ) {
            self.focused = Some(id);
        }
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Appends typed characters to the focused input.
    pub fn type_text(&mut self, typed: &str) {
        if typed.is_empty() {
            return;
        }
        if let Some(ElementKind::TextInput { value, .. }) = self
            .focused
            .and_then(|id| self.elements.get_mut(&id))
            .map(|element| &mut element.kind)
        {
            value.push_str(typed);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(ElementKind::TextInput { value, .. }) = self
            .focused
            .and_then(|id| self.elements.get_mut(&id))
            .map(|element| &mut element.kind)
        {
            value.pop();
        }
    }

    //--- Rendering --------------------------------------------------------

    pub fn draw(&self, list: &mut DrawList) {
        for (id, element) in &self.elements {
            if !self.is_visible(*id) {
                continue;
            }
            let rect = element.rect;
            match &element.kind {
                ElementKind::Panel { color } => list.rect(rect, *color),
                ElementKind::Label { text, size, color } => {
                    list.text(text.clone(), rect.origin(), *size, *color)
                }
                ElementKind::TextInput { value, placeholder } => {
                    list.rect(rect, Color::WHITE);
                    let (shown, color) = if value.is_empty() {
                        (placeholder, Color::rgb(150, 150, 150))
                    } else {
                        (value, Color::BLACK)
                    };
                    list.text(shown.clone(), Point::new(rect.x + 8.0, rect.y + 8.0), 20.0, color);
                }
                ElementKind::Button { label } => {
                    list.rect(rect, Color::HIGHLIGHT);
                    list.text(label.clone(), Point::new(rect.x + 10.0, rect.y + 10.0), 20.0, Color::WHITE);
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
