//! Selection snapshot handed to `onSelect` callbacks.

use colorwheel_core::{ColorWheelPicker, ElementHost, Rgb};
use serde::Serialize;

/// What JavaScript sees when a color is picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// `rgb(r,g,b)`
    pub rgb: String,
    /// `#rrggbb`
    pub hex: String,
    pub color: Rgb,
}

impl Selection {
    pub fn new(color: Rgb) -> Self {
        Self {
            rgb: color.to_string(),
            hex: color.to_hex(),
            color,
        }
    }

    /// Snapshot the picker's current color, if any.
    pub fn of<H: ElementHost>(picker: &ColorWheelPicker<H>) -> Option<Self> {
        picker.color().map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorwheel_core::{ClickOutcome, PickerOptions, PointerClick, RasterSurface};
    use colorwheel_render::MemoryHost;
    use kurbo::Rect;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_selection_fields() {
        let selection = Selection::new(Rgb::new(3, 145, 206));
        assert_eq!(selection.rgb, "rgb(3,145,206)");
        assert_eq!(selection.hex, "#0391ce");
    }

    #[test]
    fn test_selection_serializes_for_js() {
        let json = serde_json::to_string(&Selection::new(Rgb::new(1, 2, 3))).unwrap();
        assert_eq!(json, r##"{"rgb":"rgb(1,2,3)","hex":"#010203","color":[1,2,3]}"##);
    }

    #[test]
    fn test_snapshot_taken_before_wheel_hides() {
        let mut host = MemoryHost::new();
        host.add_div("swatch", Rect::new(100.0, 100.0, 130.0, 130.0));
        let preview = host.add_div("preview", Rect::new(0.0, 0.0, 50.0, 50.0));

        let seen: Rc<RefCell<Vec<(Option<Selection>, bool, Option<Rgb>)>>> = Rc::default();
        let seen_cb = seen.clone();
        let options = PickerOptions::new("#swatch", "#preview").on_select(move |picker: &ColorWheelPicker<MemoryHost>| {
            let visible = picker.surface().is_some_and(|s| s.is_visible());
            let background = picker.host().background(preview);
            seen_cb.borrow_mut().push((Selection::of(picker), visible, background));
        });
        let mut picker = ColorWheelPicker::new(host, options).unwrap();
        picker.handle_click(&PointerClick::on_container(110.0, 110.0));
        picker.flush_draws();

        // The wheel sits at (40, 40); (120, 65) is inside the first wedge.
        let ClickOutcome::Picked(color) = picker.handle_click(&PointerClick::on_surface(120.0, 65.0)) else {
            panic!("expected a pick");
        };

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        let (selection, visible, background) = &seen[0];
        assert_eq!(selection.as_ref(), Some(&Selection::new(color)));
        assert!(*visible, "callback ran after the wheel was hidden");
        assert_eq!(*background, Some(color));
        assert!(!picker.surface().unwrap().is_visible());
    }
}
