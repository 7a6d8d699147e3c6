//! Drawing context configuration.
//!
//! `DrwConfig` carries the few knobs of a [`Drw`](crate::Drw) that used to be
//! compile-time constants: the truncation buffer capacity, the fallback font
//! and the ellipsis length.
//!
//! # Examples
//!
//! ```rust
//! use drw::DrwConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = DrwConfig::builder()
//!     .text_buffer_capacity(512)
//!     .fallback_font("monospace")
//!     .build()?;
//! assert_eq!(cfg.text_buffer_capacity, 512);
//! assert_eq!(cfg.ellipsis_len, 3);
//! # Ok(()) }
//! ```
//!
//! # Fields
//! - `text_buffer_capacity`: Maximum number of UTF-8 bytes of a string that are measured
//!   and drawn (default: 256).
//! - `fallback_font`: Font opened when the requested one cannot be (default: `"fixed"`).
//! - `ellipsis_len`: Number of trailing characters replaced by `.` on truncation (default: 3).
//! - `line_width`: Line width of the graphics context (default: 1).

use std::fmt;

pub const DEFAULT_TEXT_BUFFER_CAPACITY: usize = 256;
pub const DEFAULT_FALLBACK_FONT: &str = "fixed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrwConfig {
    pub text_buffer_capacity: usize,
    pub fallback_font: String,
    pub ellipsis_len: usize,
    pub line_width: u32,
}

impl Default for DrwConfig {
    fn default() -> Self {
        Self {
            text_buffer_capacity: DEFAULT_TEXT_BUFFER_CAPACITY,
            fallback_font: DEFAULT_FALLBACK_FONT.to_string(),
            ellipsis_len: 3,
            line_width: 1,
        }
    }
}

impl DrwConfig {
    pub fn builder() -> DrwConfigBuilder {
        DrwConfigBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrwConfigBuilder {
    inner: DrwConfig,
}

impl DrwConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut DrwConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn text_buffer_capacity(self, n: usize) -> Self { self.map(|c| c.text_buffer_capacity = n) }
    pub fn fallback_font<S: Into<String>>(self, name: S) -> Self { self.map(|c| c.fallback_font = name.into()) }
    pub fn ellipsis_len(self, n: usize) -> Self { self.map(|c| c.ellipsis_len = n) }
    pub fn line_width(self, px: u32) -> Self { self.map(|c| c.line_width = px) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<DrwConfig, DrwConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrwConfigError {
    ZeroCapacity,
    EmptyFallbackFont,
    EllipsisTooLong { ellipsis: usize, capacity: usize },
}

impl fmt::Display for DrwConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrwConfigError::ZeroCapacity =>
                write!(f, "text_buffer_capacity must be at least 1"),
            DrwConfigError::EmptyFallbackFont =>
                write!(f, "fallback_font must not be empty"),
            DrwConfigError::EllipsisTooLong { ellipsis, capacity } =>
                write!(f, "ellipsis_len ({ellipsis}) > text_buffer_capacity ({capacity})"),
        }
    }
}
impl std::error::Error for DrwConfigError {}

fn validate(c: &DrwConfig) -> Result<(), DrwConfigError> {
    if c.text_buffer_capacity == 0 {
        return Err(DrwConfigError::ZeroCapacity);
    }
    if c.fallback_font.is_empty() {
        return Err(DrwConfigError::EmptyFallbackFont);
    }
    if c.ellipsis_len > c.text_buffer_capacity {
        return Err(DrwConfigError::EllipsisTooLong {
            ellipsis: c.ellipsis_len,
            capacity: c.text_buffer_capacity,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_bar() {
        let cfg = DrwConfig::default();
        assert_eq!(cfg.text_buffer_capacity, 256);
        assert_eq!(cfg.fallback_font, "fixed");
        assert_eq!(cfg.ellipsis_len, 3);
        assert_eq!(cfg.line_width, 1);
        assert_eq!(DrwConfig::builder().build(), Ok(cfg));
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = DrwConfig::builder().text_buffer_capacity(0).build().unwrap_err();
        assert_eq!(err, DrwConfigError::ZeroCapacity);
    }

    #[test]
    fn rejects_empty_fallback() {
        let err = DrwConfig::builder().fallback_font("").build().unwrap_err();
        assert_eq!(err, DrwConfigError::EmptyFallbackFont);
    }

    #[test]
    fn rejects_ellipsis_longer_than_buffer() {
        let err = DrwConfig::builder()
            .text_buffer_capacity(2)
            .build()
            .unwrap_err();
        assert_eq!(err, DrwConfigError::EllipsisTooLong { ellipsis: 3, capacity: 2 });
        assert_eq!(err.to_string(), "ellipsis_len (3) > text_buffer_capacity (2)");
    }
}
