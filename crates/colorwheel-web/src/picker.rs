//! The `ColorPicker` class exported to JavaScript.

use crate::dom::DomHost;
use crate::selection::Selection;
use colorwheel_core::color::DEFAULT_RANGE_STEP;
use colorwheel_core::{
    ClickOutcome, ClickTarget, ColorWheelPicker, ElementRef, PickerOptions, PointerClick, Rgb, ScheduledDraw,
    TaskId, Visibility, color_range, hex_to_rgb, parse_rgb, rgb_to_hex,
};
use js_sys::{Function, Reflect};
use kurbo::Point;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, HtmlElement, MouseEvent};

/// A staggered draw waiting on `setTimeout`.
struct Timer {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

/// State shared between the class, its click listener and its timers.
struct Shared {
    picker: ColorWheelPicker<DomHost>,
    timers: HashMap<TaskId, Timer>,
}

impl Shared {
    fn teardown(&mut self) {
        let cancelled = self.picker.destroy();
        self.cancel_timers(&cancelled);
    }

    /// Drop closures of timers that already fired.
    fn sweep_timers(&mut self) {
        let picker = &self.picker;
        self.timers.retain(|id, _| picker.is_pending(*id));
    }

    fn cancel_timers(&mut self, ids: &[TaskId]) {
        let window = web_sys::window();
        for id in ids {
            if let Some(timer) = self.timers.remove(id) {
                if let Some(window) = &window {
                    window.clear_timeout_with_handle(timer.handle);
                }
            }
        }
        // Anything left has fired already; its callback is no longer running.
        self.timers.clear();
    }
}

/// Color wheel picker attached to a container element.
///
/// While `onSelect` runs the picker is mid-click: getters answer from the
/// last selection, `toggle` does nothing and `destroy` is finished by the
/// click handler once the callback returns.
#[wasm_bindgen]
pub struct ColorPicker {
    shared: Rc<RefCell<Shared>>,
    last: Rc<RefCell<Option<Selection>>>,
    destroy_requested: Rc<Cell<bool>>,
    parent: HtmlElement,
    on_click: Option<Closure<dyn FnMut(MouseEvent)>>,
}

#[wasm_bindgen]
impl ColorPicker {
    /// `new ColorPicker({ parent, target, size?, sections?, onSelect? })`
    ///
    /// `parent` and `target` are selectors or elements. Throws a `TypeError`
    /// naming the missing element.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<ColorPicker, JsValue> {
        let host = DomHost::from_window().ok_or_else(|| type_error("No document available"))?;

        let last: Rc<RefCell<Option<Selection>>> = Rc::default();
        let on_select = get(&options, "onSelect")?.dyn_into::<Function>().ok();
        let last_cb = last.clone();
        let picker_options = read_options(&options)?.on_select(move |picker: &ColorWheelPicker<DomHost>| {
            let selection = Selection::of(picker);
            *last_cb.borrow_mut() = selection.clone();
            if let (Some(callback), Some(selection)) = (&on_select, selection) {
                if let Err(e) = callback.call1(&JsValue::NULL, &to_js(Some(selection))) {
                    log::error!("onSelect callback threw: {:?}", e);
                }
            }
        });

        let picker = ColorWheelPicker::new(host, picker_options).map_err(|e| type_error(&e.to_string()))?;
        let parent = picker
            .config()
            .map(|config| config.parent.clone())
            .ok_or_else(|| type_error("Picker has no container"))?;

        let shared = Rc::new(RefCell::new(Shared { picker, timers: HashMap::new() }));
        let destroy_requested = Rc::new(Cell::new(false));
        let on_click = click_listener(Rc::downgrade(&shared), last.clone(), destroy_requested.clone());
        parent.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

        Ok(ColorPicker {
            shared,
            last,
            destroy_requested,
            parent,
            on_click: Some(on_click),
        })
    }

    /// Picked color as `rgb(r,g,b)`, or an empty string.
    #[wasm_bindgen(getter)]
    pub fn rgb(&self) -> String {
        self.selection().map(|s| s.rgb).unwrap_or_default()
    }

    /// Picked color as `#rrggbb`, or an empty string.
    #[wasm_bindgen(getter)]
    pub fn hex(&self) -> String {
        self.selection().map(|s| s.hex).unwrap_or_default()
    }

    /// Picked color as `[r, g, b]`, or `null`.
    #[wasm_bindgen(getter)]
    pub fn color(&self) -> JsValue {
        to_js(self.selection().map(|s| s.color))
    }

    /// Show or hide the wheel. Returns the new CSS display value, or
    /// `undefined` before the wheel has been opened.
    pub fn toggle(&self) -> Option<String> {
        let Ok(mut shared) = self.shared.try_borrow_mut() else {
            log::warn!("toggle() ignored while onSelect is running");
            return None;
        };
        let visibility = shared.picker.toggle_visible()?;
        Some(match visibility {
            Visibility::Shown => "block".to_string(),
            Visibility::Hidden => "none".to_string(),
        })
    }

    /// Shades of the picked color, dark to light, or `null`.
    pub fn range(&self, step: Option<f64>) -> JsValue {
        let step = step.unwrap_or(DEFAULT_RANGE_STEP);
        to_js(self.selection().and_then(|s| color_range(&s.hex, step)))
    }

    /// Remove the click listener, cancel pending draws and drop the wheel.
    pub fn destroy(&mut self) {
        self.remove_listener();

        let Ok(mut shared) = self.shared.try_borrow_mut() else {
            // Called from onSelect; the listener closure is still running.
            self.destroy_requested.set(true);
            return;
        };
        shared.teardown();
        drop(shared);

        *self.last.borrow_mut() = None;
        self.on_click = None;
    }

    /// `[r, g, b]` or an RGB string to `#rrggbb`; `null` if it does not parse.
    #[wasm_bindgen(js_name = rgbToHex)]
    pub fn rgb_to_hex(rgb: JsValue) -> Option<String> {
        let color = match rgb.as_string() {
            Some(s) => parse_rgb(&s),
            None => serde_wasm_bindgen::from_value::<Rgb>(rgb).ok(),
        };
        color.map(rgb_to_hex)
    }

    /// `#rgb` / `#rrggbb` to `[r, g, b]`, or `null`.
    #[wasm_bindgen(js_name = hexToRgb)]
    pub fn hex_to_rgb(hex: &str) -> JsValue {
        to_js(hex_to_rgb(hex))
    }

    /// Shades of an RGB or HEX color, dark to light, or `null`.
    #[wasm_bindgen(js_name = colorRange)]
    pub fn color_range(color: &str, step: Option<f64>) -> JsValue {
        to_js(color_range(color, step.unwrap_or(DEFAULT_RANGE_STEP)))
    }
}

impl ColorPicker {
    fn selection(&self) -> Option<Selection> {
        match self.shared.try_borrow() {
            Ok(shared) => Selection::of(&shared.picker),
            Err(_) => self.last.borrow().clone(),
        }
    }

    fn remove_listener(&self) {
        if let Some(on_click) = &self.on_click {
            if let Err(e) = self
                .parent
                .remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            {
                log::warn!("Failed to remove click listener: {:?}", e);
            }
        }
    }
}

impl Drop for ColorPicker {
    fn drop(&mut self) {
        self.destroy();
        // Freed from inside its own click handler: the closure must outlive this call.
        if let Some(on_click) = self.on_click.take() {
            on_click.forget();
        }
    }
}

fn type_error(message: &str) -> JsValue {
    js_sys::TypeError::new(message).into()
}

fn to_js<T: serde::Serialize>(value: Option<T>) -> JsValue {
    match value {
        Some(value) => serde_wasm_bindgen::to_value(&value).unwrap_or(JsValue::NULL),
        None => JsValue::NULL,
    }
}

fn get(options: &JsValue, key: &str) -> Result<JsValue, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(JsValue::UNDEFINED);
    }
    Reflect::get(options, &JsValue::from_str(key))
}

fn element_ref(value: JsValue) -> Option<ElementRef<HtmlElement>> {
    if let Some(selector) = value.as_string() {
        return Some(ElementRef::Selector(selector));
    }
    value.dyn_into::<HtmlElement>().ok().map(ElementRef::Handle)
}

fn read_options(options: &JsValue) -> Result<PickerOptions<DomHost>, JsValue> {
    let mut picker_options = PickerOptions::<DomHost>::default();
    picker_options.parent = element_ref(get(options, "parent")?);
    picker_options.target = element_ref(get(options, "target")?);

    let size = get(options, "size")?;
    if !size.is_undefined() && !size.is_null() {
        let size = serde_wasm_bindgen::from_value::<u32>(size)
            .map_err(|e| type_error(&format!("Invalid 'options.size': {}", e)))?;
        picker_options.size = Some(size);
    }

    let mut sections = get(options, "sections")?;
    if sections.is_undefined() {
        sections = get(options, "colors")?;
    }
    if !sections.is_undefined() && !sections.is_null() {
        let sections = serde_wasm_bindgen::from_value::<Vec<String>>(sections)
            .map_err(|e| type_error(&format!("Invalid 'options.sections': {}", e)))?;
        picker_options.sections = Some(sections);
    }

    Ok(picker_options)
}

fn click_listener(
    shared: Weak<RefCell<Shared>>,
    last: Rc<RefCell<Option<Selection>>>,
    destroy_requested: Rc<Cell<bool>>,
) -> Closure<dyn FnMut(MouseEvent)> {
    Closure::wrap(Box::new(move |event: MouseEvent| {
        let Some(strong) = shared.upgrade() else {
            return;
        };

        let outcome = {
            let mut state = strong.borrow_mut();
            let on_surface = match (event.target(), state.picker.surface()) {
                (Some(target), Some(surface)) => {
                    let canvas: &EventTarget = surface.canvas().as_ref();
                    *canvas == target
                }
                _ => false,
            };
            let click = PointerClick {
                target: if on_surface { ClickTarget::Surface } else { ClickTarget::Container },
                position: Point::new(f64::from(event.client_x()), f64::from(event.client_y())),
            };
            state.sweep_timers();
            state.picker.handle_click(&click)
        };

        if destroy_requested.get() {
            strong.borrow_mut().teardown();
            *last.borrow_mut() = None;
            return;
        }

        if let ClickOutcome::Opened(draws) = outcome {
            arm_timers(&shared, draws);
        }
    }) as Box<dyn FnMut(MouseEvent)>)
}

fn arm_timers(shared: &Weak<RefCell<Shared>>, draws: Vec<ScheduledDraw>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(strong) = shared.upgrade() else {
        return;
    };
    let mut state = strong.borrow_mut();

    for draw in draws {
        let id = draw.id;
        let weak = shared.clone();
        let callback = Closure::wrap(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.borrow_mut().picker.run_draw(id);
            }
        }) as Box<dyn FnMut()>);

        let delay = i32::try_from(draw.delay.as_millis()).unwrap_or(i32::MAX);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), delay) {
            Ok(handle) => {
                state.timers.insert(id, Timer { handle, _callback: callback });
            }
            Err(e) => {
                log::warn!("setTimeout failed, drawing wedge immediately: {:?}", e);
                state.picker.run_draw(id);
            }
        }
    }
}
