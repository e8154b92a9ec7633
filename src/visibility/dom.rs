//! Minimal element tree: just enough structure for selector lookups, class toggling and
//! bounding-box intersection.

use crate::foundation::core::Rect;
use crate::visibility::selector::Selector;

/// Handle to an element inside a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

/// One element node.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    rect: Rect,
}

impl Element {
    /// Lowercase tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The `id` attribute, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Class list in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Return `true` when the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Parent element, `None` for roots and detached nodes.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Border box in document coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

/// Arena of elements.
///
/// Elements are never freed; ids stay valid for the lifetime of the document.
#[derive(Clone, Debug, Default)]
pub struct Document {
    elements: Vec<Element>,
    class_mutations: u64,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element with the given tag and classes.
    pub fn create_element(&mut self, tag: &str, classes: &[&str]) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        let mut class_list: Vec<String> = Vec::with_capacity(classes.len());
        for c in classes {
            if !c.is_empty() && !class_list.iter().any(|x| x == c) {
                class_list.push((*c).to_string());
            }
        }
        self.elements.push(Element {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: class_list,
            parent: None,
            children: Vec::new(),
            rect: Rect::ZERO,
        });
        id
    }

    /// Set the `id` attribute.
    pub fn set_id_attr(&mut self, el: ElementId, id: &str) {
        if let Some(e) = self.get_mut(el) {
            e.id = Some(id.to_string());
        }
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    ///
    /// Returns `false` if either id is unknown or the append would create a cycle.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return false;
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return false;
        }
        if let Some(old) = self.elements[child.0 as usize].parent {
            self.elements[old.0 as usize].children.retain(|c| *c != child);
        }
        self.elements[child.0 as usize].parent = Some(parent);
        self.elements[parent.0 as usize].children.push(child);
        true
    }

    /// Look up an element.
    pub fn get(&self, el: ElementId) -> Option<&Element> {
        self.elements.get(el.0 as usize)
    }

    fn get_mut(&mut self, el: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(el.0 as usize)
    }

    /// Number of elements ever created.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Return `true` when no element exists.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Set the border box of `el` in document coordinates.
    pub fn set_rect(&mut self, el: ElementId, rect: Rect) {
        if let Some(e) = self.get_mut(el) {
            e.rect = rect;
        }
    }

    /// Border box of `el`, `None` if unknown.
    pub fn rect(&self, el: ElementId) -> Option<Rect> {
        self.get(el).map(|e| e.rect)
    }

    /// Return `true` when `el` exists and has `class`.
    pub fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.get(el).is_some_and(|e| e.has_class(class))
    }

    /// Add `class` to `el`. Returns `true` if the class list changed.
    pub fn add_class(&mut self, el: ElementId, class: &str) -> bool {
        let Some(e) = self.get_mut(el) else {
            return false;
        };
        if class.is_empty() || e.has_class(class) {
            return false;
        }
        e.classes.push(class.to_string());
        self.class_mutations += 1;
        true
    }

    /// Remove `class` from `el`. Returns `true` if the class list changed.
    pub fn remove_class(&mut self, el: ElementId, class: &str) -> bool {
        let Some(e) = self.get_mut(el) else {
            return false;
        };
        let before = e.classes.len();
        e.classes.retain(|c| c != class);
        if e.classes.len() == before {
            return false;
        }
        self.class_mutations += 1;
        true
    }

    /// Number of class-list changes applied so far.
    pub fn class_mutations(&self) -> u64 {
        self.class_mutations
    }

    /// Ancestors of `el`, nearest first.
    pub fn ancestors(&self, el: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.get(el).and_then(|e| e.parent), move |p| {
            self.get(*p).and_then(|e| e.parent)
        })
    }

    /// Descendants of `el` in pre-order, excluding `el` itself.
    pub fn descendants(&self, el: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let Some(root) = self.get(el) else {
            return out;
        };
        let mut stack: Vec<ElementId> = root.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(e) = self.get(id) {
                stack.extend(e.children.iter().rev().copied());
            }
        }
        out
    }

    /// First descendant of `scope` matching `selector`.
    ///
    /// Malformed selectors match nothing.
    pub fn query_selector(&self, scope: ElementId, selector: &str) -> Option<ElementId> {
        let selector = selector.parse::<Selector>().ok()?;
        self.query_parsed(scope, &selector)
    }

    /// Like [`Document::query_selector`] with a pre-parsed selector.
    pub fn query_parsed(&self, scope: ElementId, selector: &Selector) -> Option<ElementId> {
        self.descendants(scope)
            .into_iter()
            .find(|&id| selector.matches(self, id))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visibility/dom.rs"]
mod tests;
