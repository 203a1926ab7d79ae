//! # Smudge
//!
//! Distorted-text captcha rendering. A [`Captcha`] is built from
//! [`CaptchaOptions`] in one synchronous pass: the options are validated
//! and resolved, a plaintext value is generated (or accepted), and the
//! value is painted onto an owned drawing surface (background, randomized
//! glyphs, a connecting stroke, noise arcs) before being encoded as a
//! JPEG data URI.
//!
//! Verification policy is the caller's responsibility: compare a submitted
//! guess against [`Captcha::value`] however your application requires.
//!
//! ## Modules
//! - `captcha` - the output object and paint pipeline
//! - `options` - caller-facing options and their resolution
//! - `palette` - light/dark color sampling helpers
//! - `error` - the validation error taxonomy
//!
//! ```no_run
//! use smudge::{Captcha, CaptchaOptions};
//!
//! let captcha = Captcha::new(CaptchaOptions {
//!     length: Some(8),
//!     ..CaptchaOptions::default()
//! })?;
//! assert_eq!(captcha.value().chars().count(), 8);
//! assert!(captcha.image().starts_with("data:image/jpeg;base64,"));
//! # Ok::<(), smudge::CaptchaError>(())
//! ```

pub mod captcha;
pub mod error;
pub mod options;
pub mod palette;

pub use captcha::Captcha;
pub use error::CaptchaError;
pub use options::{BackgroundColor, CaptchaOptions, Charset};
