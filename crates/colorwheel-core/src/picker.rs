//! The color wheel picker and its interaction state machine.
//!
//! ```text
//! Closed (no surface) --click--> Open          create surface, schedule wedges
//! Open --click on surface------> Closed        sample pixel, recolor target, callback
//! Open --click elsewhere-------> Closed        hide
//! Closed (surface) --click-----> Open          show
//! any --destroy----------------> Destroyed     cancel draws, detach, forget
//! ```

use crate::color::Rgb;
use crate::config::{PickerConfig, PickerOptions};
use crate::error::PickerResult;
use crate::host::ElementHost;
use crate::schedule::{DrawSchedule, ScheduledDraw, TaskId};
use crate::surface::RasterSurface;
use crate::wheel::wedge_layout;
use kurbo::Point;
use std::fmt;
use std::time::Duration;

/// Callback invoked with the picker after a color has been picked.
pub type SelectCallback<H> = Box<dyn FnMut(&ColorWheelPicker<H>)>;

/// Lifecycle of a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerState {
    /// Wheel hidden (or not created yet).
    #[default]
    Closed,
    /// Wheel shown and waiting for a pick.
    Open,
    /// Torn down; every operation is inert.
    Destroyed,
}

/// Display state of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Shown,
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The wheel surface.
    Surface,
    /// Anywhere else inside the container.
    Container,
}

/// A click inside the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerClick {
    pub target: ClickTarget,
    /// Pointer position in client coordinates.
    pub position: Point,
}

impl PointerClick {
    pub fn on_surface(x: f64, y: f64) -> Self {
        Self { target: ClickTarget::Surface, position: Point::new(x, y) }
    }

    pub fn on_container(x: f64, y: f64) -> Self {
        Self { target: ClickTarget::Container, position: Point::new(x, y) }
    }
}

/// Result of handling a click.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The surface was created and shown; these draws are pending.
    Opened(Vec<ScheduledDraw>),
    /// An existing surface was shown again.
    Reopened,
    /// The surface was hidden without picking.
    Closed,
    /// A color was sampled and applied.
    Picked(Rgb),
    /// The surface could not be created.
    Failed,
    /// The picker is destroyed.
    Ignored,
}

/// A color wheel attached to a container element.
pub struct ColorWheelPicker<H: ElementHost> {
    host: H,
    config: Option<PickerConfig<H::Element>>,
    surface: Option<H::Surface>,
    color: Option<Rgb>,
    state: PickerState,
    schedule: DrawSchedule,
    on_select: Option<SelectCallback<H>>,
}

impl<H: ElementHost> ColorWheelPicker<H> {
    /// Resolve and validate `options`. The surface is created on first click.
    pub fn new(host: H, options: PickerOptions<H>) -> PickerResult<Self> {
        let (config, on_select) = options.resolve(&host)?;
        log::debug!(
            "Color picker attached to {:?} ({} sections, {}px)",
            config.parent,
            config.sections.len(),
            config.size
        );

        Ok(Self {
            host,
            config: Some(config),
            surface: None,
            color: None,
            state: PickerState::Closed,
            schedule: DrawSchedule::new(),
            on_select,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == PickerState::Open
    }

    /// Resolved configuration, `None` once destroyed.
    pub fn config(&self) -> Option<&PickerConfig<H::Element>> {
        self.config.as_ref()
    }

    /// The wheel surface, once created.
    pub fn surface(&self) -> Option<&H::Surface> {
        self.surface.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The last picked color.
    pub fn color(&self) -> Option<Rgb> {
        self.color
    }

    /// The last picked color as `rgb(r,g,b)`.
    pub fn rgb(&self) -> Option<String> {
        self.color.map(|c| c.to_string())
    }

    /// The last picked color as `#rrggbb`.
    pub fn hex(&self) -> Option<String> {
        self.color.map(Rgb::to_hex)
    }

    /// Shades of the picked color, dark to light.
    pub fn range(&self, step: f64) -> Option<Vec<String>> {
        if !(step.is_finite() && step > 0.0) {
            return None;
        }
        self.color.map(|c| c.range(step))
    }

    /// Number of wedge draws still pending.
    pub fn pending_draws(&self) -> usize {
        self.schedule.pending()
    }

    /// Whether a scheduled draw has yet to run.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.schedule.contains(id)
    }

    /// Flip the surface between shown and hidden.
    ///
    /// Returns the new visibility, or `None` when there is no surface yet
    /// (or the picker is destroyed), in which case nothing happens.
    pub fn toggle_visible(&mut self) -> Option<Visibility> {
        if self.state == PickerState::Destroyed {
            return None;
        }
        let Some(surface) = self.surface.as_mut() else {
            log::debug!("Toggle ignored: wheel not created yet");
            return None;
        };

        let show = !surface.is_visible();
        surface.set_visible(show);
        if show {
            self.state = PickerState::Open;
            Some(Visibility::Shown)
        } else {
            self.state = PickerState::Closed;
            Some(Visibility::Hidden)
        }
    }

    /// Route a click on the container.
    pub fn handle_click(&mut self, click: &PointerClick) -> ClickOutcome {
        match self.state {
            PickerState::Destroyed => ClickOutcome::Ignored,
            PickerState::Closed if self.surface.is_none() => self.open(),
            PickerState::Open if click.target == ClickTarget::Surface => self.pick(click.position),
            _ => match self.toggle_visible() {
                Some(Visibility::Shown) => ClickOutcome::Reopened,
                Some(Visibility::Hidden) => ClickOutcome::Closed,
                None => ClickOutcome::Ignored,
            },
        }
    }

    /// Draw the wedge of a fired timer. Returns whether anything was drawn.
    pub fn run_draw(&mut self, id: TaskId) -> bool {
        if self.state == PickerState::Destroyed {
            return false;
        }
        match (self.schedule.take(id), self.surface.as_mut()) {
            (Some(arc), Some(surface)) => {
                surface.stroke_arc(&arc);
                true
            }
            _ => false,
        }
    }

    /// Advance the stagger clock and draw every wedge now due.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let due = self.schedule.take_due(elapsed);
        self.stroke_all(due)
    }

    /// Draw every pending wedge immediately.
    pub fn flush_draws(&mut self) -> usize {
        let all = self.schedule.take_all();
        self.stroke_all(all)
    }

    /// Tear the picker down.
    ///
    /// Pending draws are cancelled and their ids returned so the platform can
    /// clear its timers. Calling it again does nothing.
    pub fn destroy(&mut self) -> Vec<TaskId> {
        if self.state == PickerState::Destroyed {
            return Vec::new();
        }

        let cancelled = self.schedule.cancel_all();
        if let Some(config) = self.config.take() {
            self.host.set_marker(&config.parent, false);
            if let Some(surface) = self.surface.take() {
                self.host.detach_surface(&config.parent, surface);
            }
        }
        self.surface = None;
        self.color = None;
        self.on_select = None;
        self.state = PickerState::Destroyed;

        log::debug!("Color picker destroyed ({} pending draws cancelled)", cancelled.len());
        cancelled
    }

    fn open(&mut self) -> ClickOutcome {
        let Some(config) = self.config.as_ref() else {
            return ClickOutcome::Ignored;
        };

        let mut surface = match self.host.create_surface(&config.parent, config.size) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create color wheel surface: {}", e);
                return ClickOutcome::Failed;
            }
        };
        self.host.set_marker(&config.parent, true);

        let draws = self.schedule.schedule(wedge_layout(config.size, &config.sections));
        surface.set_visible(true);
        self.surface = Some(surface);
        self.state = PickerState::Open;

        log::debug!("Color wheel opened, {} wedges scheduled", draws.len());
        ClickOutcome::Opened(draws)
    }

    fn pick(&mut self, position: Point) -> ClickOutcome {
        let (Some(config), Some(surface)) = (self.config.as_ref(), self.surface.as_ref()) else {
            return ClickOutcome::Ignored;
        };

        let offset = position - surface.bounds().origin();
        let pixel = surface.read_pixel(offset.x.floor() as i32, offset.y.floor() as i32);
        let color = Rgb::from_rgba(pixel);

        self.color = Some(color);
        self.host.set_background(&config.target, color);
        log::debug!("Picked {} at ({}, {})", color, offset.x, offset.y);

        if let Some(mut callback) = self.on_select.take() {
            callback(&*self);
            self.on_select = Some(callback);
        }

        if let Some(surface) = self.surface.as_mut() {
            surface.set_visible(false);
        }
        self.state = PickerState::Closed;
        ClickOutcome::Picked(color)
    }

    fn stroke_all(&mut self, arcs: Vec<crate::surface::ArcStroke>) -> usize {
        if self.state == PickerState::Destroyed {
            return 0;
        }
        let Some(surface) = self.surface.as_mut() else {
            return 0;
        };
        for arc in &arcs {
            surface.stroke_arc(arc);
        }
        arcs.len()
    }
}

impl<H: ElementHost> fmt::Debug for ColorWheelPicker<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorWheelPicker")
            .field("config", &self.config)
            .field("color", &self.color)
            .field("state", &self.state)
            .field("pending_draws", &self.schedule.pending())
            .finish_non_exhaustive()
    }
}
