//! DOM element host.

use crate::canvas::CanvasSurface;
use colorwheel_core::host::MARKER_CLASS;
use colorwheel_core::{ElementHost, ElementRef, PickerError, PickerResult, Rgb};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

/// Resolves elements in the page document and applies picker side effects.
#[derive(Debug, Clone)]
pub struct DomHost {
    document: Document,
}

impl DomHost {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Host for the current window's document.
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self::new(document))
    }

    fn create_canvas(&self, size: u32) -> PickerResult<(HtmlCanvasElement, CanvasRenderingContext2d)> {
        let canvas: HtmlCanvasElement = self
            .document
            .create_element("canvas")
            .map_err(|e| PickerError::Surface(format!("Failed to create canvas: {:?}", e)))?
            .dyn_into()
            .map_err(|_| PickerError::Surface("Created element is not a canvas".to_string()))?;
        canvas.set_width(size);
        canvas.set_height(size);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| PickerError::Surface(format!("Failed to get 2d context: {:?}", e)))?
            .ok_or_else(|| PickerError::Surface("2d context unavailable".to_string()))?
            .dyn_into()
            .map_err(|_| PickerError::Surface("Unexpected context type".to_string()))?;

        Ok((canvas, ctx))
    }
}

fn style_error(e: wasm_bindgen::JsValue) -> PickerError {
    PickerError::Surface(format!("Failed to style canvas: {:?}", e))
}

impl ElementHost for DomHost {
    type Element = HtmlElement;
    type Surface = CanvasSurface;

    fn resolve(&self, element: &ElementRef<HtmlElement>) -> Option<HtmlElement> {
        match element {
            ElementRef::Selector(selector) => self
                .document
                .query_selector(selector)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
            ElementRef::Handle(handle) => handle.is_connected().then(|| handle.clone()),
        }
    }

    fn create_surface(&mut self, parent: &HtmlElement, size: u32) -> PickerResult<CanvasSurface> {
        let (canvas, ctx) = self.create_canvas(size)?;

        // Centered over the parent; both offsets follow the parent's width.
        let offset = f64::from(parent.client_width()) / 2.0 - f64::from(size) / 2.0;
        let style = canvas.style();
        style.set_property("display", "none").map_err(style_error)?;
        style.set_property("position", "absolute").map_err(style_error)?;
        style.set_property("top", &format!("{}px", offset)).map_err(style_error)?;
        style.set_property("left", &format!("{}px", offset)).map_err(style_error)?;

        parent.style().set_property("position", "relative").map_err(style_error)?;
        parent
            .append_child(&canvas)
            .map_err(|e| PickerError::Surface(format!("Failed to attach canvas: {:?}", e)))?;

        Ok(CanvasSurface::new(canvas, ctx))
    }

    fn set_marker(&mut self, parent: &HtmlElement, present: bool) {
        let classes = parent.class_list();
        let result = if present {
            classes.add_1(MARKER_CLASS)
        } else {
            classes.remove_1(MARKER_CLASS)
        };
        if let Err(e) = result {
            log::warn!("Failed to update '{}' class: {:?}", MARKER_CLASS, e);
        }
    }

    fn set_background(&mut self, target: &HtmlElement, color: Rgb) {
        if let Err(e) = target.style().set_property("background-color", &color.to_string()) {
            log::warn!("Failed to set background color: {:?}", e);
        }
    }

    fn detach_surface(&mut self, _parent: &HtmlElement, surface: CanvasSurface) {
        surface.canvas().remove();
    }
}
