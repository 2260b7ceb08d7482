//! Color Wheel Web Binding
//!
//! Exposes the color wheel picker to JavaScript: the DOM is the element
//! host, a `<canvas>` is the raster surface and `setTimeout` drives the
//! staggered wedge drawing.

mod selection;

pub use selection::Selection;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod picker;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
#[cfg(target_arch = "wasm32")]
pub use dom::DomHost;
#[cfg(target_arch = "wasm32")]
pub use picker::ColorPicker;

/// Install the panic hook and console logger when the module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"colorwheel: logger already initialized".into());
    }
    log::debug!("colorwheel-web loaded");
}
