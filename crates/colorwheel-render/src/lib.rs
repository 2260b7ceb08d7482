//! Color Wheel Render Library
//!
//! A software raster surface and an in-memory element host, so the picker can
//! run headless: natively, in snapshots and in tests.

mod memory_host;
mod pixmap;

pub use memory_host::{MemoryElement, MemoryHost};
pub use pixmap::PixmapSurface;

use thiserror::Error;

/// Render errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG encoding failed: {0}")]
    Png(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Surface size out of range: {0}px")]
    Size(u32),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
