//! Captcha construction: options resolution, value generation, and the
//! background, text, noise, and encode passes over one owned surface.

mod draw;
mod renderer;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::RgbImage;
use rand::Rng;

use crate::error::CaptchaError;
use crate::options::{BackgroundColor, CaptchaOptions};

/// A rendered captcha: the plaintext value plus the encoded image.
///
/// Rendering happens exactly once, during construction. Afterwards the
/// object is immutable and every accessor is a pure read; the drawing
/// surface itself is released as soon as encoding completes.
#[derive(Clone)]
pub struct Captcha {
    value: String,
    width: u32,
    height: u32,
    circle_count: u32,
    color: BackgroundColor,
    image: String,
    buffer: Vec<u8>,
}

impl Captcha {
    /// Renders a captcha from `options` using the thread-local RNG.
    pub fn new(options: CaptchaOptions) -> Result<Self, CaptchaError> {
        Self::with_rng(options, &mut rand::rng())
    }

    /// Renders a captcha drawing every random decision from `rng`.
    ///
    /// Seeding `rng` makes the construction fully deterministic: equal
    /// options and seeds produce the same value and the same image bytes.
    pub fn with_rng(options: CaptchaOptions, rng: &mut impl Rng) -> Result<Self, CaptchaError> {
        let mut resolved = options.resolve(rng)?;

        let value = match resolved.value.take() {
            Some(value) => value,
            None => generate_value(&resolved.charset, resolved.length, rng),
        };

        let mut surface = RgbImage::new(resolved.width, resolved.height);
        renderer::fill_background(&mut surface, &resolved, rng);
        let font = renderer::embedded_font();
        renderer::print_text(&mut surface, &resolved, &value, &font, rng);
        renderer::add_circles(&mut surface, &resolved, rng);
        let buffer = renderer::encode_jpeg(&surface, resolved.quality)?;

        let image = format!("data:image/jpeg;base64,{}", STANDARD.encode(&buffer));

        tracing::debug!(
            length = resolved.length,
            width = resolved.width,
            height = resolved.height,
            circles = resolved.circle_count,
            color = ?resolved.color,
            bytes = buffer.len(),
            "rendered captcha"
        );

        Ok(Self {
            value,
            width: resolved.width,
            height: resolved.height,
            circle_count: resolved.circle_count,
            color: resolved.color,
            image,
            buffer,
        })
    }

    /// The plaintext the image encodes.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The resolved noise circle count.
    pub fn circle_count(&self) -> u32 {
        self.circle_count
    }

    /// The resolved background palette.
    pub fn color(&self) -> BackgroundColor {
        self.color
    }

    /// `data:image/jpeg;base64,` data URI of the rendered image.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Raw JPEG bytes; the decoded payload of [`Captcha::image`].
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }
}

impl std::fmt::Debug for Captcha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Captcha")
            .field("value", &self.value)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("circle_count", &self.circle_count)
            .field("color", &self.color)
            .field("buffer_len", &self.buffer.len())
            .finish()
    }
}

/// Samples one charset entry per position, uniformly and with replacement.
fn generate_value(charset: &[char], length: usize, rng: &mut impl Rng) -> String {
    (0..length)
        .map(|_| charset[rng.random_range(0..charset.len())])
        .collect()
}
