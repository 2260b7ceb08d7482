//! Color Wheel Core Library
//!
//! Platform-agnostic color model and interaction logic for the color wheel picker.
//! The element model, raster surface and timers are injected by a host.

pub mod color;
pub mod config;
pub mod error;
pub mod host;
pub mod picker;
pub mod schedule;
pub mod surface;
pub mod wheel;

pub use color::{DEFAULT_SECTIONS, Rgb, color_range, hex_to_rgb, parse_color, parse_rgb, rgb_to_hex};
pub use config::{DEFAULT_SIZE, ElementRef, MAX_SIZE, PickerConfig, PickerOptions, SelectorOptions};
pub use error::{ElementField, PickerError, PickerResult};
pub use host::ElementHost;
pub use picker::{ClickOutcome, ClickTarget, ColorWheelPicker, PickerState, PointerClick, SelectCallback, Visibility};
pub use schedule::{DrawSchedule, ScheduledDraw, TaskId};
pub use surface::{ArcStroke, RasterSurface};
pub use wheel::{SEGMENT_DEPTH, STAGGER, START_ANGLE_DEG, WHEEL_RADIUS, wedge_at, wedge_layout};
