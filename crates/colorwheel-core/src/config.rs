//! Picker configuration.
//!
//! Callers hand a [`PickerOptions`] to the picker; it is resolved against the
//! host and merged over the defaults into an immutable [`PickerConfig`].

use crate::color::{DEFAULT_SECTIONS, Rgb, parse_color};
use crate::error::{ElementField, PickerError, PickerResult};
use crate::host::ElementHost;
use crate::picker::{ColorWheelPicker, SelectCallback};
use serde::{Deserialize, Serialize};

/// Default wheel size in pixels.
pub const DEFAULT_SIZE: u32 = 150;

/// Largest accepted wheel size in pixels.
pub const MAX_SIZE: u32 = 4096;

/// An element given either by selector or by handle.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementRef<E> {
    Selector(String),
    Handle(E),
}

impl<E> ElementRef<E> {
    pub fn selector(selector: impl Into<String>) -> Self {
        Self::Selector(selector.into())
    }
}

impl<E> From<&str> for ElementRef<E> {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl<E> From<String> for ElementRef<E> {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

/// Resolved, validated configuration. Immutable once the picker is built.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerConfig<E> {
    /// Container the wheel is attached to and that receives clicks.
    pub parent: E,
    /// Element whose background is set to the picked color.
    pub target: E,
    /// Surface side length in pixels.
    pub size: u32,
    /// Wedge colors, clockwise from 12 o'clock.
    pub sections: Vec<Rgb>,
}

/// User-supplied options. Unset fields fall back to the defaults.
pub struct PickerOptions<H: ElementHost> {
    pub parent: Option<ElementRef<H::Element>>,
    pub target: Option<ElementRef<H::Element>>,
    pub size: Option<u32>,
    /// Section colors as HEX or RGB strings.
    pub sections: Option<Vec<String>>,
    pub on_select: Option<SelectCallback<H>>,
}

impl<H: ElementHost> Default for PickerOptions<H> {
    fn default() -> Self {
        Self {
            parent: None,
            target: None,
            size: None,
            sections: None,
            on_select: None,
        }
    }
}

impl<H: ElementHost> PickerOptions<H> {
    /// Options with the two required elements set.
    pub fn new(parent: impl Into<ElementRef<H::Element>>, target: impl Into<ElementRef<H::Element>>) -> Self {
        Self {
            parent: Some(parent.into()),
            target: Some(target.into()),
            ..Self::default()
        }
    }

    /// Set the surface size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the section colors (HEX or RGB strings).
    pub fn with_sections<S: Into<String>>(mut self, sections: impl IntoIterator<Item = S>) -> Self {
        self.sections = Some(sections.into_iter().map(Into::into).collect());
        self
    }

    /// Called after a color is picked, with the picker itself.
    pub fn on_select(mut self, callback: impl FnMut(&ColorWheelPicker<H>) + 'static) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    /// Resolve elements against the host and merge over the defaults.
    pub fn resolve(self, host: &H) -> PickerResult<(PickerConfig<H::Element>, Option<SelectCallback<H>>)> {
        let parent = resolve_element(host, self.parent, ElementField::Parent)?;
        let target = resolve_element(host, self.target, ElementField::Target)?;

        let size = self.size.unwrap_or(DEFAULT_SIZE);
        if size == 0 || size > MAX_SIZE {
            return Err(PickerError::InvalidSize(size));
        }

        let sections = match self.sections {
            Some(sections) => sections
                .iter()
                .map(|s| parse_color(s).ok_or_else(|| PickerError::InvalidSection(s.clone())))
                .collect::<PickerResult<Vec<_>>>()?,
            None => DEFAULT_SECTIONS
                .iter()
                .map(|s| parse_color(s).ok_or_else(|| PickerError::InvalidSection(s.to_string())))
                .collect::<PickerResult<Vec<_>>>()?,
        };
        if sections.is_empty() {
            return Err(PickerError::EmptySections);
        }

        Ok((PickerConfig { parent, target, size, sections }, self.on_select))
    }
}

fn resolve_element<H: ElementHost>(
    host: &H,
    element: Option<ElementRef<H::Element>>,
    field: ElementField,
) -> PickerResult<H::Element> {
    let element = match element {
        Some(ElementRef::Selector(s)) if s.trim().is_empty() => None,
        Some(element) => host.resolve(&element),
        None => None,
    };
    element.ok_or(PickerError::MissingElement(field))
}

/// Options given entirely as data, e.g. from JSON or a JS object.
///
/// `colors` is accepted as an alias for `sections`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorOptions {
    pub parent: Option<String>,
    pub target: Option<String>,
    pub size: Option<u32>,
    #[serde(alias = "colors")]
    pub sections: Option<Vec<String>>,
}

impl SelectorOptions {
    /// Parse from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Convert into picker options with selector references.
    pub fn into_options<H: ElementHost>(self) -> PickerOptions<H> {
        PickerOptions {
            parent: self.parent.map(ElementRef::Selector),
            target: self.target.map(ElementRef::Selector),
            size: self.size,
            sections: self.sections,
            on_select: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::TestHost;

    #[test]
    fn test_defaults_are_merged() {
        let host = TestHost::new();
        let (config, callback) = PickerOptions::<TestHost>::new("#swatch", "#preview")
            .resolve(&host)
            .unwrap();
        assert_eq!(config.size, DEFAULT_SIZE);
        assert_eq!(config.sections.len(), 12);
        assert_eq!(config.parent, "#swatch");
        assert!(callback.is_none());
    }

    #[test]
    fn test_missing_parent_is_reported_first() {
        let host = TestHost::new();
        let err = PickerOptions::<TestHost>::default().resolve(&host).err().unwrap();
        assert_eq!(err, PickerError::MissingElement(ElementField::Parent));
        assert!(err.to_string().contains("'options.parent'"));
    }

    #[test]
    fn test_unresolvable_selectors() {
        let host = TestHost::new();
        let err = PickerOptions::<TestHost>::new("#nowhere", "#preview").resolve(&host).err().unwrap();
        assert_eq!(err, PickerError::MissingElement(ElementField::Parent));

        let err = PickerOptions::<TestHost>::new("#swatch", "#nowhere").resolve(&host).err().unwrap();
        assert_eq!(err, PickerError::MissingElement(ElementField::Target));
        assert!(err.to_string().contains("'options.target'"));

        let err = PickerOptions::<TestHost>::new("", "#preview").resolve(&host).err().unwrap();
        assert_eq!(err, PickerError::MissingElement(ElementField::Parent));
    }

    #[test]
    fn test_handles_resolve_directly() {
        let host = TestHost::new();
        let options = PickerOptions::<TestHost>::new(
            ElementRef::Handle("#swatch".to_string()),
            ElementRef::Handle("#preview".to_string()),
        );
        assert!(options.resolve(&host).is_ok());
    }

    #[test]
    fn test_invalid_sections() {
        let host = TestHost::new();
        let empty: Vec<String> = Vec::new();
        let err = PickerOptions::<TestHost>::new("#swatch", "#preview")
            .with_sections(empty)
            .resolve(&host)
            .err()
            .unwrap();
        assert_eq!(err, PickerError::EmptySections);

        let err = PickerOptions::<TestHost>::new("#swatch", "#preview")
            .with_sections(["#fff", "chartreuse"])
            .resolve(&host)
            .err()
            .unwrap();
        assert_eq!(err, PickerError::InvalidSection("chartreuse".to_string()));
    }

    #[test]
    fn test_zero_size_rejected() {
        let host = TestHost::new();
        let err = PickerOptions::<TestHost>::new("#swatch", "#preview")
            .with_size(0)
            .resolve(&host)
            .err()
            .unwrap();
        assert_eq!(err, PickerError::InvalidSize(0));
    }

    #[test]
    fn test_oversized_rejected() {
        let host = TestHost::new();
        for size in [MAX_SIZE + 1, 70_000, u32::MAX] {
            let err = PickerOptions::<TestHost>::new("#swatch", "#preview")
                .with_size(size)
                .resolve(&host)
                .err()
                .unwrap();
            assert_eq!(err, PickerError::InvalidSize(size));
        }

        let (config, _) = PickerOptions::<TestHost>::new("#swatch", "#preview")
            .with_size(MAX_SIZE)
            .resolve(&host)
            .unwrap();
        assert_eq!(config.size, MAX_SIZE);
    }

    #[test]
    fn test_sections_accept_both_notations() {
        let host = TestHost::new();
        let (config, _) = PickerOptions::<TestHost>::new("#swatch", "#preview")
            .with_sections(["#f00", "0, 255, 0"])
            .resolve(&host)
            .unwrap();
        assert_eq!(config.sections, vec![Rgb::new(255, 0, 0), Rgb::new(0, 255, 0)]);
    }

    #[test]
    fn test_selector_options_from_json() {
        let options = SelectorOptions::from_json(
            r##"{"parent":"#swatch","target":"#preview","size":200,"colors":["#000","#fff"]}"##,
        )
        .unwrap();
        assert_eq!(options.size, Some(200));
        assert_eq!(options.sections.as_ref().map(Vec::len), Some(2));

        let host = TestHost::new();
        let (config, _) = options.into_options::<TestHost>().resolve(&host).unwrap();
        assert_eq!(config.size, 200);
        assert_eq!(config.sections[1], Rgb::WHITE);
    }

    #[test]
    fn test_selector_options_partial_json() {
        let options = SelectorOptions::from_json(r##"{"parent":"#swatch"}"##).unwrap();
        assert_eq!(options.target, None);
        assert_eq!(options.sections, None);
    }
}
