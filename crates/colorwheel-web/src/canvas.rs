//! Canvas 2D raster surface.

use colorwheel_core::{ArcStroke, RasterSurface};
use kurbo::Rect;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A `<canvas>` element and its 2D context.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl RasterSurface for CanvasSurface {
    fn size(&self) -> u32 {
        self.canvas.width()
    }

    fn stroke_arc(&mut self, arc: &ArcStroke) {
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(arc.center.x, arc.center.y, arc.radius, arc.start_angle, arc.end_angle) {
            log::warn!("Canvas arc failed: {:?}", e);
            return;
        }
        self.ctx.set_line_width(arc.width);
        self.ctx.set_stroke_style_str(&arc.color.to_hex());
        self.ctx.stroke();
    }

    fn read_pixel(&self, x: i32, y: i32) -> [u8; 4] {
        match self.ctx.get_image_data(f64::from(x), f64::from(y), 1.0, 1.0) {
            Ok(image) => {
                let data = image.data();
                match data.0.as_slice() {
                    [r, g, b, a, ..] => [*r, *g, *b, *a],
                    _ => [0, 0, 0, 0],
                }
            }
            Err(e) => {
                log::warn!("Canvas read-back failed: {:?}", e);
                [0, 0, 0, 0]
            }
        }
    }

    fn bounds(&self) -> Rect {
        let rect = self.canvas.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom())
    }

    fn set_visible(&mut self, visible: bool) {
        let display = if visible { "block" } else { "none" };
        if let Err(e) = self.canvas.style().set_property("display", display) {
            log::warn!("Failed to set canvas display: {:?}", e);
        }
    }

    fn is_visible(&self) -> bool {
        self.canvas
            .style()
            .get_property_value("display")
            .map(|display| display != "none")
            .unwrap_or(false)
    }
}
