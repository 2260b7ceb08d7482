//! Picker errors.

use std::fmt;
use thiserror::Error;

/// Which required element could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementField {
    /// The container the picker attaches to.
    Parent,
    /// The element whose background receives the picked color.
    Target,
}

impl ElementField {
    pub fn name(self) -> &'static str {
        match self {
            ElementField::Parent => "parent",
            ElementField::Target => "target",
        }
    }
}

impl fmt::Display for ElementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Picker errors.
#[derive(Debug, Error, PartialEq)]
pub enum PickerError {
    #[error("Provide a 'options.{0}' element to append the color picker to.")]
    MissingElement(ElementField),
    #[error("At least one wheel section color is required")]
    EmptySections,
    #[error("Invalid wheel size: {0}")]
    InvalidSize(u32),
    #[error("Invalid section color: {0}")]
    InvalidSection(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for picker operations.
pub type PickerResult<T> = Result<T, PickerError>;
