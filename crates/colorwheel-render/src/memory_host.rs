//! In-memory element host.

use crate::PixmapSurface;
use colorwheel_core::host::MARKER_CLASS;
use colorwheel_core::{ElementHost, ElementRef, PickerError, PickerResult, Rgb};
use kurbo::{Point, Rect};

/// Handle to an element owned by a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryElement(usize);

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    /// Layout box in client coordinates.
    bounds: Rect,
    background: Option<Rgb>,
    surfaces: usize,
    attached: bool,
}

/// A flat element tree kept in memory.
///
/// Selectors are a small subset of CSS: `#id`,
/// `.class` or a bare tag name. The first matching element wins.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    nodes: Vec<Node>,
}

impl MemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element with the given tag, optional id and layout box.
    pub fn add_element(&mut self, tag: &str, id: Option<&str>, bounds: Rect) -> MemoryElement {
        self.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            id: id.map(str::to_string),
            classes: Vec::new(),
            bounds,
            background: None,
            surfaces: 0,
            attached: true,
        });
        MemoryElement(self.nodes.len() - 1)
    }

    /// Add a `div` with an id.
    pub fn add_div(&mut self, id: &str, bounds: Rect) -> MemoryElement {
        self.add_element("div", Some(id), bounds)
    }

    /// Add a class to an element.
    pub fn add_class(&mut self, element: MemoryElement, class: &str) {
        if let Some(node) = self.nodes.get_mut(element.0) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    /// Remove a class from an element.
    pub fn remove_class(&mut self, element: MemoryElement, class: &str) {
        if let Some(node) = self.nodes.get_mut(element.0) {
            node.classes.retain(|c| c != class);
        }
    }

    /// Detach an element; it no longer resolves.
    pub fn detach(&mut self, element: MemoryElement) {
        if let Some(node) = self.nodes.get_mut(element.0) {
            node.attached = false;
        }
    }

    pub fn has_class(&self, element: MemoryElement, class: &str) -> bool {
        self.nodes
            .get(element.0)
            .is_some_and(|node| node.classes.iter().any(|c| c == class))
    }

    /// Background color last applied to an element.
    pub fn background(&self, element: MemoryElement) -> Option<Rgb> {
        self.nodes.get(element.0).and_then(|node| node.background)
    }

    /// Number of wheel surfaces currently attached to an element.
    pub fn attached_surfaces(&self, element: MemoryElement) -> usize {
        self.nodes.get(element.0).map_or(0, |node| node.surfaces)
    }

    /// Layout box of an element.
    pub fn bounds(&self, element: MemoryElement) -> Option<Rect> {
        self.nodes.get(element.0).map(|node| node.bounds)
    }

    /// Find an element by selector.
    pub fn query_selector(&self, selector: &str) -> Option<MemoryElement> {
        let selector = selector.trim();
        let matches = |node: &Node| {
            if let Some(id) = selector.strip_prefix('#') {
                node.id.as_deref() == Some(id)
            } else if let Some(class) = selector.strip_prefix('.') {
                node.classes.iter().any(|c| c == class)
            } else {
                node.tag.eq_ignore_ascii_case(selector)
            }
        };

        self.nodes
            .iter()
            .position(|node| node.attached && matches(node))
            .map(MemoryElement)
    }

    fn node_mut(&mut self, element: &MemoryElement) -> Option<&mut Node> {
        self.nodes.get_mut(element.0)
    }
}

impl ElementHost for MemoryHost {
    type Element = MemoryElement;
    type Surface = PixmapSurface;

    fn resolve(&self, element: &ElementRef<MemoryElement>) -> Option<MemoryElement> {
        match element {
            ElementRef::Selector(selector) => self.query_selector(selector),
            ElementRef::Handle(handle) => self
                .nodes
                .get(handle.0)
                .filter(|node| node.attached)
                .map(|_| *handle),
        }
    }

    fn create_surface(&mut self, parent: &MemoryElement, size: u32) -> PickerResult<PixmapSurface> {
        let node = self
            .node_mut(parent)
            .ok_or_else(|| PickerError::Surface(format!("Unknown parent element {:?}", parent)))?;

        // Centered over the parent, horizontally and vertically by its width.
        let offset = node.bounds.width() / 2.0 - f64::from(size) / 2.0;
        let origin = Point::new(node.bounds.x0 + offset, node.bounds.y0 + offset);
        let surface = PixmapSurface::new(size).map_err(|e| PickerError::Surface(e.to_string()))?;
        node.surfaces += 1;

        Ok(surface.with_origin(origin))
    }

    fn set_marker(&mut self, parent: &MemoryElement, present: bool) {
        if present {
            self.add_class(*parent, MARKER_CLASS);
        } else {
            self.remove_class(*parent, MARKER_CLASS);
        }
    }

    fn set_background(&mut self, target: &MemoryElement, color: Rgb) {
        if let Some(node) = self.node_mut(target) {
            node.background = Some(color);
        }
    }

    fn detach_surface(&mut self, parent: &MemoryElement, _surface: PixmapSurface) {
        if let Some(node) = self.node_mut(parent) {
            node.surfaces = node.surfaces.saturating_sub(1);
        }
    }
}
