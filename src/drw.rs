//! The drawing context.
//!
//! A [`Drw`] owns an off-screen pixmap the size of the bar and a graphics context. Drawing
//! calls paint into the pixmap using the currently selected [`Fnt`] and [`ClrScheme`];
//! [`Drw::map`] then copies a region of the pixmap onto a window.
//!
//! Drawing never fails. A call made before a font or scheme is selected, or after the
//! pixmap could not be recreated, draws nothing.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use drw::{ClrScheme, Drw, Fnt};
//! use drw::render::backends::recording::RecordingBackend;
//!
//! # fn main() -> Result<(), drw::DrwError> {
//! let backend = Rc::new(RecordingBackend::new());
//! let root = backend.create_window();
//! let mut drw = Drw::create(backend.clone(), 0, root, 800, 20)?;
//!
//! drw.set_font(Rc::new(Fnt::create(backend.clone(), 0, "fixed")?));
//! drw.set_scheme(Rc::new(ClrScheme::create(&drw, "#bbbbbb", "#222222", "#444444")?));
//! drw.text(0, 0, 120, 20, Some("[]="));
//! drw.map(root, 0, 0, 800, 20);
//! # Ok(()) }
//! ```

use crate::color::ClrScheme;
use crate::config::DrwConfig;
use crate::errors::DrwError;
use crate::font::Fnt;
use crate::render::backend::{Backend, Extnts, LineStyle, SurfaceSize};
use std::fmt;
use std::rc::Rc;

/// Width reported by [`font_getexts_width`] when there is nothing to measure with.
pub const EXTENTS_NONE: u32 = u32::MAX;

/// Narrows a coordinate computed in `i64` back to the X coordinate range.
fn clamp_coord(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

pub struct Drw<B: Backend> {
    backend: Rc<B>,
    screen: i32,
    root: B::Window,
    w: u32,
    h: u32,
    /// `None` only after a failed resize.
    drawable: Option<B::Pixmap>,
    gc: B::Gc,
    font: Option<Rc<Fnt<B>>>,
    scheme: Option<Rc<ClrScheme<B>>>,
    config: DrwConfig,
}

impl<B: Backend> Drw<B> {
    /// Creates a context with a `w` by `h` pixmap on `root`'s screen.
    pub fn create(backend: Rc<B>, screen: i32, root: B::Window, w: u32, h: u32) -> Result<Self, DrwError> {
        Self::with_config(backend, screen, root, w, h, DrwConfig::default())
    }

    pub fn with_config(
        backend: Rc<B>,
        screen: i32,
        root: B::Window,
        w: u32,
        h: u32,
        config: DrwConfig,
    ) -> Result<Self, DrwError> {
        let drawable = backend
            .create_pixmap(screen, root, SurfaceSize { width: w, height: h })
            .ok_or(DrwError::PixmapAlloc { width: w, height: h })?;

        let Some(gc) = backend.create_gc(root, LineStyle { width: config.line_width }) else {
            backend.free_pixmap(drawable);
            return Err(DrwError::GcAlloc);
        };

        log::debug!("{}: created {}x{} drawing context on screen {}", backend.name(), w, h, screen);
        Ok(Self {
            backend,
            screen,
            root,
            w,
            h,
            drawable: Some(drawable),
            gc,
            font: None,
            scheme: None,
            config,
        })
    }

    /// Recreates the pixmap at the new size. The old pixmap is released first; if the new
    /// one cannot be created the context keeps the new size but draws nothing until the
    /// next successful resize.
    pub fn resize(&mut self, w: u32, h: u32) -> Result<(), DrwError> {
        self.w = w;
        self.h = h;
        if let Some(old) = self.drawable.take() {
            self.backend.free_pixmap(old);
        }

        let drawable = self
            .backend
            .create_pixmap(self.screen, self.root, SurfaceSize { width: w, height: h })
            .ok_or(DrwError::PixmapAlloc { width: w, height: h })?;
        self.drawable = Some(drawable);

        log::debug!("{}: resized drawing context to {}x{}", self.backend.name(), w, h);
        Ok(())
    }

    /// Releases the pixmap and graphics context now.
    pub fn free(self) {}

    /// Opens a font on this context's screen, falling back to the configured fallback font.
    pub fn font_create(&self, name: &str) -> Result<Fnt<B>, DrwError> {
        Fnt::create_with_fallback(self.backend.clone(), self.screen, name, &self.config.fallback_font)
    }

    pub fn set_font(&mut self, font: Rc<Fnt<B>>) {
        self.font = Some(font);
    }

    pub fn set_scheme(&mut self, scheme: Rc<ClrScheme<B>>) {
        self.scheme = Some(scheme);
    }

    pub fn font(&self) -> Option<&Rc<Fnt<B>>> {
        self.font.as_ref()
    }

    pub fn scheme(&self) -> Option<&Rc<ClrScheme<B>>> {
        self.scheme.as_ref()
    }

    pub fn backend(&self) -> &Rc<B> {
        &self.backend
    }

    pub fn screen(&self) -> i32 {
        self.screen
    }

    pub fn root(&self) -> B::Window {
        self.root
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize { width: self.w, height: self.h }
    }

    pub fn drawable(&self) -> Option<B::Pixmap> {
        self.drawable
    }

    pub fn config(&self) -> &DrwConfig {
        &self.config
    }

    /// Draws a small indicator square in the top-left corner of `(x, y, w, h)`.
    ///
    /// The square's side is a quarter of the font height, whatever `w` and `h` are. It is
    /// filled when `filled`, outlined when `empty`, and drawn in the background color when
    /// `invert` (foreground otherwise).
    #[allow(clippy::too_many_arguments)]
    pub fn rect(&mut self, x: i32, y: i32, _w: u32, _h: u32, filled: bool, empty: bool, invert: bool) {
        let (Some(font), Some(scheme), Some(drawable)) = (&self.font, &self.scheme, self.drawable) else {
            return;
        };

        let pixel = if invert { scheme.bg.pixel() } else { scheme.fg.pixel() };
        self.backend.set_foreground(&self.gc, pixel);
        let dx = ((font.h() + 2) / 4).max(0) as u32;
        let (x, y) = (x.saturating_add(1), y.saturating_add(1));
        if filled {
            self.backend.fill_rectangle(drawable, &self.gc, x, y, dx + 1, dx + 1);
        } else if empty {
            self.backend.draw_rectangle(drawable, &self.gc, x, y, dx, dx);
        }
    }

    /// Draws a bar along the bottom of `(x, y, w, h)`, an eighth of the font height thick,
    /// in the border color when `active` (foreground otherwise).
    pub fn underbar(&mut self, x: i32, y: i32, w: u32, h: u32, active: bool) {
        let (Some(font), Some(scheme), Some(drawable)) = (&self.font, &self.scheme, self.drawable) else {
            return;
        };

        let pixel = if active { scheme.border.pixel() } else { scheme.fg.pixel() };
        self.backend.set_foreground(&self.gc, pixel);
        let dy = ((font.h() + 2) / 8).max(0);
        let by = clamp_coord(y as i64 + h as i64 - dy as i64);
        self.backend.fill_rectangle(drawable, &self.gc, x, by, w, dy as u32);
    }

    /// Clears `(x, y, w, h)` to the background color and draws `text` centred in it.
    ///
    /// Text wider than the box minus one font height of margin is shortened and ends in
    /// dots; if no prefix fits, only the cleared box remains. Without a font, or with no
    /// text, the box is just cleared.
    pub fn text(&mut self, x: i32, y: i32, w: u32, h: u32, text: Option<&str>) {
        let (Some(scheme), Some(drawable)) = (&self.scheme, self.drawable) else {
            return;
        };

        self.backend.set_foreground(&self.gc, scheme.bg.pixel());
        self.backend.fill_rectangle(drawable, &self.gc, x, y, w, h);

        let (Some(text), Some(font)) = (text, &self.font) else {
            return;
        };

        let fit = crate::text::truncate(
            text,
            w,
            font.h().max(0) as u32,
            self.config.text_buffer_capacity,
            self.config.ellipsis_len,
            |s| self.backend.text_extents(font.handle(), s).w,
        );
        let Some(fit) = fit else {
            log::trace!("text: {:?} does not fit in {}px", text, w);
            return;
        };

        let th = font.h() as i64;
        let ty = clamp_coord(y as i64 + (h / 2) as i64 - th / 2 + font.ascent() as i64);
        let tx = clamp_coord(x as i64 + (w / 2) as i64 - (fit.width / 2) as i64);
        self.backend.draw_text(drawable, self.screen, scheme.fg.handle(), font.handle(), tx, ty, &fit.text);
    }

    /// Copies `(x, y, w, h)` of the pixmap onto `win` at the same position and waits for
    /// the server to process it.
    pub fn map(&self, win: B::Window, x: i32, y: i32, w: u32, h: u32) {
        let Some(drawable) = self.drawable else {
            return;
        };
        self.backend.copy_area(drawable, win, &self.gc, x, y, w, h);
        self.backend.sync();
    }

    /// Measures the first `len` bytes of `text` with the current font into `tex`.
    ///
    /// `len` is clamped to the string and rounded down to a char boundary. Without a font
    /// `tex` is left untouched.
    pub fn font_getexts(&self, text: &str, len: usize, tex: &mut Extnts) {
        let Some(font) = &self.font else {
            return;
        };
        let len = crate::text::floor_char_boundary(text, len);
        *tex = self.backend.text_extents(font.handle(), &text[..len]);
    }

    /// Width of the first `len` bytes of `text`, or `None` without a font.
    pub fn font_getexts_width(&self, text: &str, len: usize) -> Option<u32> {
        self.font.as_ref()?;
        let mut tex = Extnts::default();
        self.font_getexts(text, len, &mut tex);
        Some(tex.w)
    }
}

/// Width of the first `len` bytes of `text`, or [`EXTENTS_NONE`] when there is no context
/// or the context has no font.
pub fn font_getexts_width<B: Backend>(drw: Option<&Drw<B>>, text: &str, len: usize) -> u32 {
    drw.and_then(|d| d.font_getexts_width(text, len)).unwrap_or(EXTENTS_NONE)
}

impl<B: Backend> Drop for Drw<B> {
    fn drop(&mut self) {
        log::debug!("{}: freeing {}x{} drawing context", self.backend.name(), self.w, self.h);
        if let Some(drawable) = self.drawable.take() {
            self.backend.free_pixmap(drawable);
        }
        self.backend.free_gc(&self.gc);
    }
}

impl<B: Backend> fmt::Debug for Drw<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drw")
            .field("backend", &self.backend.name())
            .field("screen", &self.screen)
            .field("root", &self.root)
            .field("w", &self.w)
            .field("h", &self.h)
            .field("drawable", &self.drawable)
            .field("font", &self.font.as_ref().map(|f| f.name()))
            .finish()
    }
}
