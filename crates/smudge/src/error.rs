//! Error types for captcha construction.

use thiserror::Error;

/// Errors raised while resolving captcha options.
///
/// Every variant is produced eagerly, before any drawing work starts; a
/// failed construction never yields a partial captcha.
#[derive(Debug, Error)]
pub enum CaptchaError {
    /// `length` and `value` were both given and disagree in character count.
    #[error("length {length} and value of {value_len} characters are inconsistent")]
    InconsistentLength { length: usize, value_len: usize },

    /// The requested length is less than 1.
    #[error("length must be at least 1")]
    InvalidLength,

    /// The explicit width cannot fit the requested character count.
    #[error("width must be at least {min} for {length} characters")]
    InvalidWidth { min: u32, length: usize },

    /// The explicit height is below the minimum floor.
    #[error("height must be at least {min}")]
    InvalidHeight { min: u32 },

    /// The quality lies outside the supported range.
    #[error("quality {quality} is outside the supported range [0.5, 1.0]")]
    InvalidQuality { quality: f32 },

    /// JPEG encoding failed. Encoding an in-memory surface does not fail
    /// under normal operation; the underlying error passes through as-is.
    #[error(transparent)]
    Encode(#[from] image::ImageError),
}
