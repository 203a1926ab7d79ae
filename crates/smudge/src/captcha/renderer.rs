//! Sequential paint passes over the owned drawing surface.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use rand::Rng;
use std::io::Cursor;

use super::draw::{GradientStop, sample_gradient, stroke_arc, stroke_segment};
use crate::error::CaptchaError;
use crate::options::{BackgroundColor, ResolvedOptions};
use crate::palette::{random_dark_color, random_light_color};

const FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSerif.ttf");

const DARK_FILL: Rgb<u8> = Rgb([0x35, 0x35, 0x35]);
const WHITE_FILL: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);

/// Color stops on a gradient background.
const GRADIENT_STOPS: usize = 10;
/// Width of the polyline connecting the glyphs, in pixels.
const STROKE_WIDTH: f32 = 4.0;
/// Channel spread for glyph fills and the connecting stroke.
const TEXT_SPREAD: u8 = 10;
/// Channel spread for gradient stops and noise arcs.
const NOISE_SPREAD: u8 = 5;

/// The embedded glyph face.
///
/// # Panics
///
/// Panics if the embedded font data is invalid, which would be a packaging
/// defect rather than a runtime condition.
pub(crate) fn embedded_font() -> FontRef<'static> {
    FontRef::try_from_slice(FONT_BYTES).expect("embedded font data is valid")
}

/// Background pass: solid fill or diagonal gradient, by palette strategy.
pub(crate) fn fill_background(img: &mut RgbImage, opts: &ResolvedOptions, rng: &mut impl Rng) {
    match opts.color {
        BackgroundColor::Black => fill_solid(img, DARK_FILL),
        BackgroundColor::White => fill_solid(img, WHITE_FILL),
        BackgroundColor::Random => fill_gradient(img, rng),
    }
}

fn fill_solid(img: &mut RgbImage, color: Rgb<u8>) {
    for pixel in img.pixels_mut() {
        *pixel = color;
    }
}

/// Light linear gradient along the top-left to bottom-right diagonal, with
/// one jittered stop per tenth of the run.
fn fill_gradient(img: &mut RgbImage, rng: &mut impl Rng) {
    let stops: Vec<GradientStop> = (0..GRADIENT_STOPS)
        .map(|i| GradientStop {
            position: i as f32 * 0.1 + rng.random_range(0.0..0.1),
            color: random_light_color(rng, NOISE_SPREAD),
        })
        .collect();

    let (width, height) = img.dimensions();
    let (dx, dy) = (width as f32, height as f32);
    let denom = dx * dx + dy * dy;
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        // Projection of the pixel onto the diagonal, 0 at the top-left
        // corner and 1 at the bottom-right.
        let t = (x as f32 * dx + y as f32 * dy) / denom;
        *pixel = sample_gradient(&stops, t);
    }
}

/// Anchor and measured box of one placed glyph, kept for the stroke pass.
struct GlyphAnchor {
    x: f32,
    y: f32,
    advance: f32,
    font_size: f32,
}

/// Text pass: one glyph per slot with randomized size, color, and vertical
/// jitter, followed by the connecting polyline.
pub(crate) fn print_text(
    img: &mut RgbImage,
    opts: &ResolvedOptions,
    value: &str,
    font: &FontRef<'_>,
    rng: &mut impl Rng,
) {
    let slot = (opts.width as f32 - 10.0) / opts.length as f32;
    let height = opts.height as f32;

    let mut anchors = Vec::with_capacity(opts.length);
    for (i, ch) in value.chars().enumerate() {
        let font_size = rng.random_range(24.0..64.0_f32);
        let fill = match opts.color {
            BackgroundColor::Black => random_light_color(rng, TEXT_SPREAD),
            _ => random_dark_color(rng, TEXT_SPREAD),
        };

        // Jitter shrinks as the glyph grows, keeping it clear of the bottom
        // edge.
        let jitter = (height - font_size) * rng.random_range(0.0..1.0) / 2.5;
        let x = 5.0 + slot * i as f32;
        let y = height / 3.0 + font_size - 10.0 + jitter;

        let scale = PxScale::from(font_size);
        let scaled = font.as_scaled(scale);
        let advance = scaled.h_advance(font.glyph_id(ch));

        // `y` is the baseline; the raster call wants the glyph top edge.
        let top = y - scaled.ascent();
        draw_text_mut(
            img,
            fill,
            x.round() as i32,
            top.round() as i32,
            scale,
            font,
            &ch.to_string(),
        );

        anchors.push(GlyphAnchor {
            x,
            y,
            advance,
            font_size,
        });
    }

    stroke_anchors(img, &anchors, rng);
}

/// Connects the glyph anchors left to right with one continuous 4 px
/// polyline. The final anchor links to itself, leaving a zero-length
/// terminal segment rendered as a round-cap dot.
fn stroke_anchors(img: &mut RgbImage, anchors: &[GlyphAnchor], rng: &mut impl Rng) {
    let Some(first) = anchors.first() else {
        return;
    };
    let stroke = random_dark_color(rng, TEXT_SPREAD);

    let mut last = first;
    for (i, current) in anchors.iter().enumerate() {
        let next = anchors.get(i + 1).unwrap_or(current);
        stroke_segment(img, top_midpoint(last), top_midpoint(next), STROKE_WIDTH, stroke);
        last = next;
    }
}

/// Horizontal center of the glyph box, a quarter of the box above the
/// baseline.
fn top_midpoint(anchor: &GlyphAnchor) -> (f32, f32) {
    (
        anchor.x + anchor.advance / 2.0,
        anchor.y - anchor.font_size / 4.0,
    )
}

/// Noise pass: half the resolved count as faint dark arcs, half as light
/// ones. A pass whose palette would blend into the background keeps looping
/// but draws nothing.
pub(crate) fn add_circles(img: &mut RgbImage, opts: &ResolvedOptions, rng: &mut impl Rng) {
    let per_pass = opts.circle_count / 2;
    let (width, height) = (opts.width as f32, opts.height as f32);

    for _ in 0..per_pass {
        if opts.color == BackgroundColor::Black {
            continue;
        }
        let radius = rng.random_range(5.0..15.0_f32);
        let center = (rng.random_range(0.0..width), rng.random_range(0.0..height));
        let color = random_dark_color(rng, NOISE_SPREAD);
        let stroke = rng.random_range(0.0..0.5_f32);
        let sweep = std::f32::consts::PI * (1.5 + rng.random_range(0.0..0.5_f32));
        stroke_arc(img, center, radius, sweep, stroke, color);
    }

    for _ in 0..per_pass {
        if opts.color == BackgroundColor::White {
            continue;
        }
        let color = random_light_color(rng, NOISE_SPREAD);
        let stroke = rng.random_range(0.0..4.0_f32);
        let radius = rng.random_range(5.0..15.0_f32);
        let center = (rng.random_range(0.0..width), rng.random_range(0.0..height));
        let sweep = std::f32::consts::PI * (1.0 + rng.random_range(0.0..1.0_f32));
        stroke_arc(img, center, radius, sweep, stroke, color);
    }
}

/// Encode pass: lossy JPEG at the resolved quality, mapped to the encoder's
/// 1-100 scale.
pub(crate) fn encode_jpeg(img: &RgbImage, quality: f32) -> Result<Vec<u8>, CaptchaError> {
    let mut bytes = Vec::new();
    let mut cursor = Cursor::new(&mut bytes);
    let encoder = JpegEncoder::new_with_quality(
        &mut cursor,
        (quality * 100.0).round() as u8,
    );
    img.write_with_encoder(encoder)?;
    Ok(bytes)
}
