//! Software raster surface.

use crate::{RenderError, RenderResult};
use colorwheel_core::{ArcStroke, MAX_SIZE, RasterSurface};
use kurbo::{Point, Rect};
use peniko::Color;
use std::fs;
use std::path::Path;

/// A square RGBA8 pixmap, initially transparent.
///
/// Arcs are rasterised without anti-aliasing: a pixel takes the stroke color
/// when its center lies inside the stroked ring segment.
#[derive(Debug, Clone)]
pub struct PixmapSurface {
    size: u32,
    data: Vec<u8>,
    /// Top-left corner on screen.
    origin: Point,
    visible: bool,
}

impl PixmapSurface {
    /// Create a hidden, transparent surface at the screen origin.
    ///
    /// Fails for sizes above [`MAX_SIZE`].
    pub fn new(size: u32) -> RenderResult<Self> {
        let len = (size <= MAX_SIZE)
            .then(|| (size as usize).checked_mul(size as usize)?.checked_mul(4))
            .flatten()
            .ok_or(RenderError::Size(size))?;
        Ok(Self {
            size,
            data: vec![0; len],
            origin: Point::ZERO,
            visible: false,
        })
    }

    /// Place the surface at `origin` on screen.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[rgba.r, rgba.g, rgba.b, rgba.a]);
        }
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|&x| x < self.size)?;
        let y = u32::try_from(y).ok().filter(|&y| y < self.size)?;
        Some((y as usize * self.size as usize + x as usize) * 4)
    }

    /// Encode the surface as PNG.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, self.size, self.size);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder
                .write_header()
                .map_err(|e| RenderError::Png(e.to_string()))?;
            writer
                .write_image_data(&self.data)
                .map_err(|e| RenderError::Png(e.to_string()))?;
        }
        Ok(png_data)
    }

    /// Write the surface to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        let bytes = self.encode_png()?;
        fs::write(path, bytes)
            .map_err(|e| RenderError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}

impl RasterSurface for PixmapSurface {
    fn size(&self) -> u32 {
        self.size
    }

    fn stroke_arc(&mut self, arc: &ArcStroke) {
        let (_, outer) = arc.ring();
        let side = f64::from(self.size);
        let area = Rect::from_center_size(arc.center, (outer * 2.0, outer * 2.0))
            .intersect(Rect::new(0.0, 0.0, side, side));
        if area.is_zero_area() {
            return;
        }

        let rgba = [arc.color.r, arc.color.g, arc.color.b, 255];
        let (x0, y0) = (area.x0.floor() as i32, area.y0.floor() as i32);
        let (x1, y1) = (area.x1.ceil() as i32, area.y1.ceil() as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if !arc.contains(center) {
                    continue;
                }
                if let Some(i) = self.index(x, y) {
                    self.data[i..i + 4].copy_from_slice(&rgba);
                }
            }
        }
    }

    fn read_pixel(&self, x: i32, y: i32) -> [u8; 4] {
        match self.index(x, y) {
            Some(i) => [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]],
            None => [0, 0, 0, 0],
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use colorwheel_core::{Rgb, wedge_layout};
    use colorwheel_core::color::default_sections;

    fn wheel() -> PixmapSurface {
        let mut surface = PixmapSurface::new(150).unwrap();
        for arc in wedge_layout(150, &default_sections()) {
            surface.stroke_arc(&arc);
        }
        surface
    }

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = PixmapSurface::new(4).unwrap();
        assert_eq!(surface.pixels().len(), 64);
        assert!(surface.pixels().iter().all(|&b| b == 0));
        assert!(!surface.is_visible());
    }

    #[test]
    fn test_wedge_pixels() {
        let surface = wheel();
        let sections = default_sections();
        // Just clockwise of 12 o'clock.
        assert_eq!(surface.read_pixel(80, 25), [sections[0].r, sections[0].g, sections[0].b, 255]);
        // 3 o'clock, just below the horizontal: fourth wedge.
        assert_eq!(Rgb::from_rgba(surface.read_pixel(125, 78)), sections[3]);
        // Center hole and corners stay transparent.
        assert_eq!(surface.read_pixel(75, 75), [0, 0, 0, 0]);
        assert_eq!(surface.read_pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_ring_width() {
        let surface = wheel();
        // Ring spans radius 35..65 from the center (75, 75).
        assert_eq!(surface.read_pixel(75, 75 - 34)[3], 0);
        assert_eq!(surface.read_pixel(75, 75 - 36)[3], 255);
        assert_eq!(surface.read_pixel(75, 75 - 64)[3], 255);
        assert_eq!(surface.read_pixel(75, 75 - 66)[3], 0);
    }

    #[test]
    fn test_out_of_range_reads_transparent() {
        let surface = wheel();
        assert_eq!(surface.read_pixel(-1, 10), [0, 0, 0, 0]);
        assert_eq!(surface.read_pixel(10, 150), [0, 0, 0, 0]);
    }

    #[test]
    fn test_small_surface_clips() {
        // Radius is fixed at 50, so a 60px surface only shows part of the ring.
        let mut surface = PixmapSurface::new(60).unwrap();
        for arc in wedge_layout(60, &default_sections()) {
            surface.stroke_arc(&arc);
        }
        assert_eq!(surface.read_pixel(30, 30)[3], 0);
        assert_eq!(surface.read_pixel(59, 30)[3], 0);
        assert_eq!(surface.read_pixel(59, 59)[3], 255);
    }

    #[test]
    fn test_oversized_surface_is_an_error() {
        assert!(matches!(PixmapSurface::new(MAX_SIZE + 1), Err(RenderError::Size(_))));
        assert!(matches!(PixmapSurface::new(u32::MAX), Err(RenderError::Size(u32::MAX))));
        assert_eq!(PixmapSurface::new(1).unwrap().pixels().len(), 4);
    }

    #[test]
    fn test_bounds_follow_origin() {
        let surface = PixmapSurface::new(150).unwrap().with_origin(Point::new(10.0, 20.0));
        assert_eq!(surface.bounds(), Rect::new(10.0, 20.0, 160.0, 170.0));
    }

    #[test]
    fn test_clear() {
        let mut surface = PixmapSurface::new(2).unwrap();
        surface.clear(Color::from_rgba8(1, 2, 3, 4));
        assert_eq!(surface.read_pixel(1, 1), [1, 2, 3, 4]);
    }

    #[test]
    fn test_encode_png_signature() {
        let bytes = wheel().encode_png().unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wheel.png");
        wheel().save_png(&path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 8);
    }

    #[test]
    fn test_save_png_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("wheel.png");
        assert!(matches!(wheel().save_png(&path), Err(RenderError::Io(_))));
    }
}
