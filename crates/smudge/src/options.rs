//! Captcha options and their resolution into concrete rendering parameters.

use rand::Rng;
use serde::Deserialize;

use crate::error::CaptchaError;

/// Minimum canvas width per character, in pixels.
pub const PER_CHAR_WIDTH: u32 = 40;
/// Minimum canvas height, in pixels.
pub const MIN_HEIGHT: u32 = 50;
/// Canvas height used when none is given.
pub const DEFAULT_HEIGHT: u32 = 100;
/// Cap on the derived default width; shorter texts get `length * PER_CHAR_WIDTH`.
pub const DEFAULT_WIDTH: u32 = 200;
/// Character count used when neither `length` nor `value` is given.
pub const DEFAULT_LENGTH: usize = 6;
/// Low end (inclusive) of the default noise circle range.
pub const MIN_CIRCLES: u32 = 10;
/// High end (exclusive) of the default noise circle range.
pub const MAX_CIRCLES: u32 = 25;
/// JPEG quality used when none is given.
pub const DEFAULT_QUALITY: f32 = 0.7;
/// Characters sampled when no charset is given.
pub const DEFAULT_CHARSET: &str = "1234567890abcdefghijklmnoprstuvyzABCDEFGHIJKLMN@#";

/// Character pool, given either as one string to split or as explicit
/// characters.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Charset {
    /// A single string; each of its characters becomes one pool entry.
    Joined(String),
    /// Explicit pool entries.
    Chars(Vec<char>),
}

impl Charset {
    fn into_chars(self) -> Vec<char> {
        match self {
            Self::Joined(s) => s.chars().collect(),
            Self::Chars(chars) => chars,
        }
    }
}

impl From<&str> for Charset {
    fn from(s: &str) -> Self {
        Self::Joined(s.to_string())
    }
}

impl From<String> for Charset {
    fn from(s: String) -> Self {
        Self::Joined(s)
    }
}

impl From<Vec<char>> for Charset {
    fn from(chars: Vec<char>) -> Self {
        Self::Chars(chars)
    }
}

/// Palette strategy for the canvas background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundColor {
    /// Solid dark gray fill; glyphs and noise are drawn light.
    Black,
    /// Solid white fill; glyphs and noise are drawn dark.
    White,
    /// Diagonal light gradient fill; glyphs are drawn dark.
    Random,
}

impl BackgroundColor {
    const ALL: [Self; 3] = [Self::Black, Self::White, Self::Random];

    fn sample(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Caller-facing captcha options.
///
/// Every field is optional; unset fields resolve to the documented defaults
/// during construction. Deserializable so an outer configuration layer can
/// embed it directly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CaptchaOptions {
    /// Pool of candidate characters.
    pub charset: Option<Charset>,
    /// Number of characters to render.
    pub length: Option<usize>,
    /// Explicit plaintext instead of a generated one.
    pub value: Option<String>,
    /// Canvas width in pixels.
    pub width: Option<u32>,
    /// Canvas height in pixels.
    pub height: Option<u32>,
    /// Number of noise circles scattered over the canvas.
    pub circle_count: Option<u32>,
    /// JPEG quality in `[0.5, 1.0]`.
    pub quality: Option<f32>,
    /// Background palette strategy.
    pub color: Option<BackgroundColor>,
}

/// Fully-resolved rendering parameters, produced once per construction.
#[derive(Debug)]
pub(crate) struct ResolvedOptions {
    pub(crate) charset: Vec<char>,
    pub(crate) length: usize,
    pub(crate) value: Option<String>,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) circle_count: u32,
    pub(crate) quality: f32,
    pub(crate) color: BackgroundColor,
}

impl CaptchaOptions {
    /// Validates the options and fills in defaults, drawing any sampled
    /// defaults (circle count, background color) from `rng`.
    pub(crate) fn resolve(self, rng: &mut impl Rng) -> Result<ResolvedOptions, CaptchaError> {
        let charset = match self.charset {
            Some(charset) => {
                let chars = charset.into_chars();
                // An explicitly empty pool is treated as unset.
                if chars.is_empty() { default_charset() } else { chars }
            }
            None => default_charset(),
        };

        if let (Some(length), Some(value)) = (self.length, self.value.as_deref()) {
            let value_len = value.chars().count();
            if value_len != length {
                return Err(CaptchaError::InconsistentLength { length, value_len });
            }
        }

        let length = self
            .length
            .or_else(|| self.value.as_deref().map(|v| v.chars().count()))
            .unwrap_or(DEFAULT_LENGTH);
        if length < 1 {
            return Err(CaptchaError::InvalidLength);
        }

        let min_width = (length as u32).saturating_mul(PER_CHAR_WIDTH);
        let width = match self.width {
            Some(width) if width < min_width => {
                return Err(CaptchaError::InvalidWidth {
                    min: min_width,
                    length,
                });
            }
            Some(width) => width,
            None => DEFAULT_WIDTH.min(min_width),
        };

        let height = match self.height {
            Some(height) if height < MIN_HEIGHT => {
                return Err(CaptchaError::InvalidHeight { min: MIN_HEIGHT });
            }
            Some(height) => height,
            None => DEFAULT_HEIGHT,
        };

        let circle_count = self
            .circle_count
            .unwrap_or_else(|| rng.random_range(MIN_CIRCLES..MAX_CIRCLES));

        if let Some(quality) = self.quality {
            if !(0.5..=1.0).contains(&quality) {
                return Err(CaptchaError::InvalidQuality { quality });
            }
        }
        let quality = self.quality.unwrap_or(DEFAULT_QUALITY);

        let color = self.color.unwrap_or_else(|| BackgroundColor::sample(rng));

        Ok(ResolvedOptions {
            charset,
            length,
            value: self.value,
            width,
            height,
            circle_count,
            quality,
            color,
        })
    }
}

fn default_charset() -> Vec<char> {
    DEFAULT_CHARSET.chars().collect()
}
