//! Low-level drawing primitives shared by the paint passes.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_antialiased_line_segment_mut, draw_filled_circle_mut};
use imageproc::pixelops::interpolate;

/// A point in canvas space.
pub(crate) type Point = (f32, f32);

/// Segments used to approximate one arc.
const ARC_STEPS: u32 = 50;

/// Strokes a straight segment with round caps.
///
/// Widths at or below one pixel fall back to a single antialiased line;
/// wider strokes step a filled disc along the segment, which also rounds the
/// joints of a polyline drawn segment by segment. A zero-length segment
/// leaves a single disc.
pub(crate) fn stroke_segment(
    img: &mut RgbImage,
    from: Point,
    to: Point,
    width: f32,
    color: Rgb<u8>,
) {
    if width <= 1.0 {
        thin_segment(img, from, to, color);
        return;
    }

    let radius = (width / 2.0).round().max(1.0) as i32;
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let steps = dx.hypot(dy).ceil().max(1.0) as u32;
    for step in 0..=steps {
        let t = step as f32 / steps as f32;
        let cx = (from.0 + dx * t).round() as i32;
        let cy = (from.1 + dy * t).round() as i32;
        draw_filled_circle_mut(img, (cx, cy), radius, color);
    }
}

fn thin_segment(img: &mut RgbImage, from: Point, to: Point, color: Rgb<u8>) {
    let start = (from.0.round() as i32, from.1.round() as i32);
    let end = (to.0.round() as i32, to.1.round() as i32);
    if start.0 >= 0 && start.1 >= 0 && end.0 >= 0 && end.1 >= 0 {
        draw_antialiased_line_segment_mut(img, start, end, color, interpolate);
    }
}

/// Strokes a partial circle clockwise from angle zero through `sweep`
/// radians, approximated with fixed-step segments.
pub(crate) fn stroke_arc(
    img: &mut RgbImage,
    center: Point,
    radius: f32,
    sweep: f32,
    width: f32,
    color: Rgb<u8>,
) {
    let mut prev = (center.0 + radius, center.1);
    for step in 1..=ARC_STEPS {
        let angle = sweep * step as f32 / ARC_STEPS as f32;
        let next = (
            center.0 + radius * angle.cos(),
            center.1 + radius * angle.sin(),
        );
        stroke_segment(img, prev, next, width, color);
        prev = next;
    }
}

/// One stop of a linear gradient.
pub(crate) struct GradientStop {
    pub(crate) position: f32,
    pub(crate) color: Rgb<u8>,
}

/// Samples a stop list at `t`: clamped to the first/last stop outside the
/// covered range, linearly interpolated between adjacent stops inside it.
/// Stops must be ordered by position.
pub(crate) fn sample_gradient(stops: &[GradientStop], t: f32) -> Rgb<u8> {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Rgb([0, 0, 0]);
    };
    if t <= first.position {
        return first.color;
    }
    for pair in stops.windows(2) {
        if t <= pair[1].position {
            let span = pair[1].position - pair[0].position;
            if span <= f32::EPSILON {
                return pair[1].color;
            }
            let k = (t - pair[0].position) / span;
            return interpolate(pair[0].color, pair[1].color, 1.0 - k);
        }
    }
    last.color
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops() -> Vec<GradientStop> {
        vec![
            GradientStop {
                position: 0.2,
                color: Rgb([0, 0, 0]),
            },
            GradientStop {
                position: 0.8,
                color: Rgb([240, 240, 240]),
            },
        ]
    }

    #[test]
    fn gradient_clamps_outside_the_stop_range() {
        assert_eq!(sample_gradient(&stops(), 0.0), Rgb([0, 0, 0]));
        assert_eq!(sample_gradient(&stops(), 1.0), Rgb([240, 240, 240]));
    }

    #[test]
    fn gradient_interpolates_between_stops() {
        let Rgb([r, g, b]) = sample_gradient(&stops(), 0.5);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert!((115..=125).contains(&r), "midpoint channel was {r}");
    }

    #[test]
    fn empty_gradient_is_black() {
        assert_eq!(sample_gradient(&[], 0.5), Rgb([0, 0, 0]));
    }

    #[test]
    fn thick_stroke_marks_pixels_along_the_segment() {
        let mut img = RgbImage::new(30, 10);
        stroke_segment(&mut img, (2.0, 5.0), (27.0, 5.0), 4.0, Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(15, 5), Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(15, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn zero_length_stroke_leaves_a_dot() {
        let mut img = RgbImage::new(10, 10);
        stroke_segment(&mut img, (5.0, 5.0), (5.0, 5.0), 4.0, Rgb([0, 255, 0]));
        assert_eq!(*img.get_pixel(5, 5), Rgb([0, 255, 0]));
    }

    #[test]
    fn off_canvas_strokes_are_clipped_without_panic() {
        let mut img = RgbImage::new(20, 20);
        stroke_segment(&mut img, (-30.0, -30.0), (50.0, 50.0), 4.0, Rgb([1, 2, 3]));
        stroke_arc(&mut img, (19.0, 19.0), 15.0, std::f32::consts::TAU, 3.0, Rgb([9, 9, 9]));
    }

    #[test]
    fn arc_touches_its_starting_point() {
        let mut img = RgbImage::new(40, 40);
        stroke_arc(
            &mut img,
            (20.0, 20.0),
            10.0,
            std::f32::consts::PI,
            2.0,
            Rgb([200, 200, 200]),
        );
        // Clockwise from angle zero: the first segment starts at (30, 20).
        assert_ne!(*img.get_pixel(30, 20), Rgb([0, 0, 0]));
    }
}
