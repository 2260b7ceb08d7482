//! Host capabilities the picker relies on.
//!
//! The picker never touches a UI toolkit directly. A host resolves element
//! references, creates the raster surface and applies the visible side
//! effects (background color, the `has-picker` marker class).

use crate::color::Rgb;
use crate::config::ElementRef;
use crate::error::PickerResult;
use crate::surface::RasterSurface;
use std::fmt::Debug;

/// Marker class added to the container while it owns a wheel.
pub const MARKER_CLASS: &str = "has-picker";

/// Element model and side effects of a UI platform.
pub trait ElementHost {
    /// Handle to an element in the host's tree.
    type Element: Clone + PartialEq + Debug;
    /// Raster surface created for the wheel.
    type Surface: RasterSurface;

    /// Resolve a selector or handle to an attached element.
    fn resolve(&self, element: &ElementRef<Self::Element>) -> Option<Self::Element>;

    /// Create a hidden `size`×`size` surface, positioned over `parent` and attached to it.
    fn create_surface(&mut self, parent: &Self::Element, size: u32) -> PickerResult<Self::Surface>;

    /// Add or remove the [`MARKER_CLASS`] styling hook on the container.
    fn set_marker(&mut self, parent: &Self::Element, present: bool);

    /// Set an element's background color.
    fn set_background(&mut self, target: &Self::Element, color: Rgb);

    /// Detach and release a surface.
    fn detach_surface(&mut self, parent: &Self::Element, surface: Self::Surface);
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-crate host used by unit tests.

    use super::*;
    use crate::error::PickerError;
    use crate::surface::ArcStroke;
    use kurbo::{Point, Rect};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Surface that answers pixel reads from the strokes it has seen.
    #[derive(Debug, Default)]
    pub struct TestSurface {
        pub size: u32,
        pub origin: Point,
        pub strokes: Vec<ArcStroke>,
        pub visible: bool,
    }

    impl RasterSurface for TestSurface {
        fn size(&self) -> u32 {
            self.size
        }

        fn stroke_arc(&mut self, arc: &ArcStroke) {
            self.strokes.push(*arc);
        }

        fn read_pixel(&self, x: i32, y: i32) -> [u8; 4] {
            let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            self.strokes
                .iter()
                .rev()
                .find(|arc| arc.contains(center))
                .map(|arc| [arc.color.r, arc.color.g, arc.color.b, 255])
                .unwrap_or([0, 0, 0, 0])
        }

        fn bounds(&self) -> Rect {
            let side = f64::from(self.size);
            Rect::from_origin_size(self.origin, (side, side))
        }

        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }

        fn is_visible(&self) -> bool {
            self.visible
        }
    }

    /// Records what the picker did to the element tree.
    #[derive(Debug, Default)]
    pub struct HostLog {
        pub backgrounds: HashMap<String, Rgb>,
        pub markers: HashMap<String, bool>,
        pub surfaces_created: usize,
        pub surfaces_detached: usize,
    }

    /// Knows `#swatch` and `#preview`; elements are their selectors.
    #[derive(Debug, Clone)]
    pub struct TestHost {
        pub known: Vec<String>,
        pub log: Rc<RefCell<HostLog>>,
        pub fail_surface: bool,
    }

    impl TestHost {
        pub fn new() -> Self {
            Self {
                known: vec!["#swatch".to_string(), "#preview".to_string()],
                log: Rc::default(),
                fail_surface: false,
            }
        }
    }

    impl ElementHost for TestHost {
        type Element = String;
        type Surface = TestSurface;

        fn resolve(&self, element: &ElementRef<String>) -> Option<String> {
            let name = match element {
                ElementRef::Selector(s) | ElementRef::Handle(s) => s,
            };
            self.known.iter().find(|k| *k == name).cloned()
        }

        fn create_surface(&mut self, _parent: &String, size: u32) -> PickerResult<TestSurface> {
            if self.fail_surface {
                return Err(PickerError::Surface("no 2d context".to_string()));
            }
            self.log.borrow_mut().surfaces_created += 1;
            Ok(TestSurface { size, origin: Point::new(100.0, 200.0), ..Default::default() })
        }

        fn set_marker(&mut self, parent: &String, present: bool) {
            self.log.borrow_mut().markers.insert(parent.clone(), present);
        }

        fn set_background(&mut self, target: &String, color: Rgb) {
            self.log.borrow_mut().backgrounds.insert(target.clone(), color);
        }

        fn detach_surface(&mut self, _parent: &String, _surface: TestSurface) {
            self.log.borrow_mut().surfaces_detached += 1;
        }
    }
}
