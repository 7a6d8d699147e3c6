use crate::config::DEFAULT_FALLBACK_FONT;
use crate::errors::DrwError;
use crate::render::backend::{Backend, Extnts};
use std::fmt;
use std::rc::Rc;

/// An opened font with its cached vertical metrics. The underlying font is closed when
/// the `Fnt` is freed or dropped.
pub struct Fnt<B: Backend> {
    backend: Rc<B>,
    xfont: B::Font,
    name: String,
    ascent: i32,
    descent: i32,
    h: i32,
}

impl<B: Backend> Fnt<B> {
    /// Opens `name`, falling back to the `"fixed"` font.
    pub fn create(backend: Rc<B>, screen: i32, name: &str) -> Result<Self, DrwError> {
        Self::create_with_fallback(backend, screen, name, DEFAULT_FALLBACK_FONT)
    }

    /// Opens `name`, or `fallback` when `name` cannot be opened. Failing both is a
    /// [`DrwError::FontLoad`], which is fatal by policy.
    pub fn create_with_fallback(
        backend: Rc<B>,
        screen: i32,
        name: &str,
        fallback: &str,
    ) -> Result<Self, DrwError> {
        let (xfont, opened) = match backend.open_font(screen, name) {
            Some(f) => (f, name),
            None => {
                log::warn!("cannot open font '{}', falling back to '{}'", name, fallback);
                match backend.open_font(screen, fallback) {
                    Some(f) => (f, fallback),
                    None => {
                        return Err(DrwError::FontLoad {
                            name: name.to_string(),
                            fallback: fallback.to_string(),
                        })
                    }
                }
            }
        };

        let metrics = backend.font_metrics(&xfont);
        log::debug!(
            "{}: opened font '{}' (ascent {}, descent {})",
            backend.name(),
            opened,
            metrics.ascent,
            metrics.descent
        );

        Ok(Self {
            backend,
            xfont,
            name: opened.to_string(),
            ascent: metrics.ascent,
            descent: metrics.descent,
            h: metrics.ascent + metrics.descent,
        })
    }

    /// Name the font was actually opened with, which is the fallback after a fallback.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ascent(&self) -> i32 {
        self.ascent
    }

    pub fn descent(&self) -> i32 {
        self.descent
    }

    /// Height of a line: ascent plus descent.
    pub fn h(&self) -> i32 {
        self.h
    }

    pub fn handle(&self) -> &B::Font {
        &self.xfont
    }

    /// Measures the advance of `text`.
    pub fn extents(&self, text: &str) -> Extnts {
        self.backend.text_extents(&self.xfont, text)
    }

    /// Closes the font now.
    pub fn free(self) {}
}

impl<B: Backend> Drop for Fnt<B> {
    fn drop(&mut self) {
        log::debug!("{}: closing font '{}'", self.backend.name(), self.name);
        self.backend.close_font(&self.xfont);
    }
}

impl<B: Backend> fmt::Debug for Fnt<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fnt")
            .field("name", &self.name)
            .field("ascent", &self.ascent)
            .field("descent", &self.descent)
            .field("h", &self.h)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backends::recording::RecordingBackend;

    #[test]
    fn caches_metrics() {
        let backend = Rc::new(RecordingBackend::new().with_font("mono:size=10", 11, 3, 8));
        let font = Fnt::create(backend.clone(), 0, "mono:size=10").unwrap();

        assert_eq!(font.name(), "mono:size=10");
        assert_eq!(font.ascent(), 11);
        assert_eq!(font.descent(), 3);
        assert_eq!(font.h(), 14);
        assert_eq!(font.extents("abc"), Extnts { w: 24, h: 0 });
    }

    #[test]
    fn falls_back_to_fixed() {
        let backend = Rc::new(RecordingBackend::new());
        let font = Fnt::create(backend.clone(), 0, "no-such-font").unwrap();
        assert_eq!(font.name(), "fixed");
        assert_eq!(font.h(), 14);
    }

    #[test]
    fn custom_fallback_is_used() {
        let backend = Rc::new(RecordingBackend::new().with_font("terminus", 12, 4, 8));
        let font = Fnt::create_with_fallback(backend, 0, "no-such-font", "terminus").unwrap();
        assert_eq!(font.name(), "terminus");
        assert_eq!(font.h(), 16);
    }

    #[test]
    fn missing_fallback_is_a_fatal_error() {
        let backend = Rc::new(RecordingBackend::new().without_font("fixed"));
        let err = Fnt::create(backend.clone(), 0, "no-such-font").unwrap_err();

        assert!(err.is_fatal());
        match err {
            DrwError::FontLoad { name, fallback } => {
                assert_eq!(name, "no-such-font");
                assert_eq!(fallback, "fixed");
            }
            other => panic!("expected FontLoad, got {:?}", other),
        }
        assert_eq!(backend.live_fonts(), 0);
    }

    #[test]
    fn free_and_drop_close_the_font() {
        let backend = Rc::new(RecordingBackend::new());
        let a = Fnt::create(backend.clone(), 0, "fixed").unwrap();
        let b = Fnt::create(backend.clone(), 0, "fixed").unwrap();
        assert_eq!(backend.live_fonts(), 2);

        a.free();
        assert_eq!(backend.live_fonts(), 1);

        drop(b);
        assert_eq!(backend.live_fonts(), 0);
    }
}
