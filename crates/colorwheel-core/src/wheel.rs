//! Wedge layout for the color wheel.

use crate::color::Rgb;
use crate::surface::ArcStroke;
use kurbo::Point;
use std::time::Duration;

/// Stroke width of every wedge, in pixels.
pub const SEGMENT_DEPTH: f64 = 30.0;

/// Radius the wedges are stroked along. Fixed regardless of surface size.
pub const WHEEL_RADIUS: f64 = 50.0;

/// Where the first wedge starts: 12 o'clock.
pub const START_ANGLE_DEG: f64 = 270.0;

/// Delay between consecutive wedge draws.
pub const STAGGER: Duration = Duration::from_millis(30);

/// Arc strokes for a wheel of `size` pixels, one per section, in section order.
///
/// Wedge `i` spans `[270 + i * 360/N, 270 + (i + 1) * 360/N]` degrees.
pub fn wedge_layout(size: u32, sections: &[Rgb]) -> Vec<ArcStroke> {
    if sections.is_empty() {
        return Vec::new();
    }

    let center = f64::from(size) / 2.0;
    let segment = 360.0 / sections.len() as f64;

    sections
        .iter()
        .enumerate()
        .map(|(i, &color)| {
            let start = START_ANGLE_DEG + segment * i as f64;
            ArcStroke {
                center: Point::new(center, center),
                radius: WHEEL_RADIUS,
                start_angle: start.to_radians(),
                end_angle: (start + segment).to_radians(),
                width: SEGMENT_DEPTH,
                color,
            }
        })
        .collect()
}

/// Delay before wedge `index` is drawn.
pub fn wedge_delay(index: usize) -> Duration {
    STAGGER * index as u32
}

/// Which wedge slot of a `count`-section wheel contains `point`, if any.
pub fn wedge_at(size: u32, count: usize, point: Point) -> Option<usize> {
    let placeholder = vec![Rgb::BLACK; count];
    wedge_layout(size, &placeholder)
        .iter()
        .position(|arc| arc.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::default_sections;
    use std::f64::consts::PI;

    #[test]
    fn test_layout_one_wedge_per_section() {
        let sections = default_sections();
        let wedges = wedge_layout(150, &sections);
        assert_eq!(wedges.len(), 12);
        for (wedge, color) in wedges.iter().zip(&sections) {
            assert_eq!(wedge.color, *color);
            assert_eq!(wedge.center, Point::new(75.0, 75.0));
            assert_eq!(wedge.radius, WHEEL_RADIUS);
            assert_eq!(wedge.width, SEGMENT_DEPTH);
        }
    }

    #[test]
    fn test_layout_starts_at_top() {
        let wedges = wedge_layout(150, &default_sections());
        assert!((wedges[0].start_angle - 1.5 * PI).abs() < 1e-9);
        assert!((wedges[0].sweep() - PI / 6.0).abs() < 1e-9);
        assert!((wedges[11].end_angle - 3.5 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_radius_does_not_scale_with_size() {
        let wedges = wedge_layout(400, &[Rgb::WHITE]);
        assert_eq!(wedges[0].radius, WHEEL_RADIUS);
        assert_eq!(wedges[0].center, Point::new(200.0, 200.0));
    }

    #[test]
    fn test_empty_sections() {
        assert!(wedge_layout(150, &[]).is_empty());
        assert_eq!(wedge_at(150, 0, Point::new(75.0, 30.0)), None);
    }

    #[test]
    fn test_wedge_delay() {
        assert_eq!(wedge_delay(0), Duration::ZERO);
        assert_eq!(wedge_delay(4), Duration::from_millis(120));
    }

    #[test]
    fn test_wedge_at() {
        // Just right of 12 o'clock is the first wedge.
        assert_eq!(wedge_at(150, 12, Point::new(80.0, 25.0)), Some(0));
        // Just left of 12 o'clock is the last wedge.
        assert_eq!(wedge_at(150, 12, Point::new(70.0, 25.0)), Some(11));
        // Just past 6 o'clock going clockwise: half-way round.
        assert_eq!(wedge_at(150, 12, Point::new(70.0, 125.0)), Some(6));
        assert_eq!(wedge_at(150, 12, Point::new(75.0, 75.0)), None);
    }
}
