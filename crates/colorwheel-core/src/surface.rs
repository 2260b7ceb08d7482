//! Raster surface abstraction.

use crate::color::Rgb;
use kurbo::{Point, Rect};

/// A thick circular arc stroke with butt caps.
///
/// Angles are in radians, measured from the positive x axis and increasing
/// clockwise on screen (y points down), as on an HTML canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcStroke {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Stroke width, centered on the radius.
    pub width: f64,
    pub color: Rgb,
}

impl ArcStroke {
    /// Angular extent in radians.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Inner and outer radius of the stroked ring.
    pub fn ring(&self) -> (f64, f64) {
        let half = self.width / 2.0;
        ((self.radius - half).max(0.0), self.radius + half)
    }

    /// Whether `point` lies inside the stroked region.
    pub fn contains(&self, point: Point) -> bool {
        let offset = point - self.center;
        let distance = offset.hypot();
        let (inner, outer) = self.ring();
        if distance < inner || distance > outer {
            return false;
        }

        let sweep = self.sweep();
        if sweep >= std::f64::consts::TAU {
            return true;
        }
        let angle = offset.y.atan2(offset.x);
        let delta = (angle - self.start_angle).rem_euclid(std::f64::consts::TAU);
        delta <= sweep
    }
}

/// A 2D drawing target the wheel is painted onto.
///
/// Implementations wrap a canvas, a software pixmap or anything else that can
/// stroke arcs and read pixels back.
pub trait RasterSurface {
    /// Side length in pixels (the surface is square).
    fn size(&self) -> u32;

    /// Stroke an arc.
    fn stroke_arc(&mut self, arc: &ArcStroke);

    /// Read back one RGBA pixel. Out of range reads are transparent black.
    fn read_pixel(&self, x: i32, y: i32) -> [u8; 4];

    /// On-screen bounding box, in the same coordinates as pointer events.
    fn bounds(&self) -> Rect;

    /// Show or hide the surface.
    fn set_visible(&mut self, visible: bool);

    /// Whether the surface is currently shown.
    fn is_visible(&self) -> bool;
}
