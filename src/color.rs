use crate::drw::Drw;
use crate::errors::DrwError;
use crate::render::backend::Backend;
use std::fmt;
use std::rc::Rc;

/// A color allocated in the screen's default colormap, released on free or drop.
pub struct Clr<B: Backend> {
    backend: Rc<B>,
    screen: i32,
    xftc: B::Color,
    name: String,
    pixel: u64,
}

impl<B: Backend> Clr<B> {
    /// Allocates the named color on the context's screen. Failure is a
    /// [`DrwError::ColorAlloc`], which is fatal by policy.
    pub fn create(drw: &Drw<B>, name: &str) -> Result<Self, DrwError> {
        let backend = drw.backend().clone();
        let screen = drw.screen();
        let xftc = backend
            .alloc_color(screen, name)
            .ok_or_else(|| DrwError::ColorAlloc { name: name.to_string() })?;
        let pixel = backend.color_pixel(&xftc);
        log::debug!("{}: allocated color '{}' as pixel {:#08x}", backend.name(), name, pixel);

        Ok(Self { backend, screen, xftc, name: name.to_string(), pixel })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pixel value to use as a foreground.
    pub fn pixel(&self) -> u64 {
        self.pixel
    }

    pub fn handle(&self) -> &B::Color {
        &self.xftc
    }

    /// Releases the color now.
    pub fn free(self) {}
}

impl<B: Backend> Drop for Clr<B> {
    fn drop(&mut self) {
        log::debug!("{}: freeing color '{}'", self.backend.name(), self.name);
        self.backend.free_color(self.screen, &self.xftc);
    }
}

impl<B: Backend> fmt::Debug for Clr<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clr")
            .field("name", &self.name)
            .field("pixel", &format_args!("{:#08x}", self.pixel))
            .finish()
    }
}

/// Colors applied together to a drawing operation. Colors are shared, so several
/// schemes can point at the same allocation.
pub struct ClrScheme<B: Backend> {
    pub fg: Rc<Clr<B>>,
    pub bg: Rc<Clr<B>>,
    pub border: Rc<Clr<B>>,
}

impl<B: Backend> ClrScheme<B> {
    pub fn new(fg: Rc<Clr<B>>, bg: Rc<Clr<B>>, border: Rc<Clr<B>>) -> Self {
        Self { fg, bg, border }
    }

    /// Allocates the three named colors of a scheme in `fg, bg, border` order.
    pub fn create(drw: &Drw<B>, fg: &str, bg: &str, border: &str) -> Result<Self, DrwError> {
        Ok(Self::new(
            Rc::new(Clr::create(drw, fg)?),
            Rc::new(Clr::create(drw, bg)?),
            Rc::new(Clr::create(drw, border)?),
        ))
    }
}

impl<B: Backend> fmt::Debug for ClrScheme<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClrScheme")
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("border", &self.border)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backends::recording::RecordingBackend;

    fn drw() -> (Rc<RecordingBackend>, Drw<RecordingBackend>) {
        let backend = Rc::new(RecordingBackend::new());
        let root = backend.create_window();
        let drw = Drw::create(backend.clone(), 0, root, 100, 20).unwrap();
        (backend, drw)
    }

    #[test]
    fn allocates_named_colors() {
        let (backend, drw) = drw();
        let clr = Clr::create(&drw, "#005577").unwrap();
        assert_eq!(clr.pixel(), 0x005577);
        assert_eq!(clr.name(), "#005577");
        assert_eq!(backend.live_colors(), 1);

        clr.free();
        assert_eq!(backend.live_colors(), 0);
    }

    #[test]
    fn unknown_color_is_a_fatal_error() {
        let (backend, drw) = drw();
        let err = Clr::create(&drw, "#nothex").unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, DrwError::ColorAlloc { ref name } if name == "#nothex"));
        assert_eq!(backend.live_colors(), 0);
    }

    #[test]
    fn scheme_failure_releases_what_was_allocated() {
        let (backend, drw) = drw();
        let err = ClrScheme::create(&drw, "#bbbbbb", "#222222", "bogus").unwrap_err();
        assert!(matches!(err, DrwError::ColorAlloc { .. }));
        assert_eq!(backend.live_colors(), 0);
    }

    #[test]
    fn schemes_share_colors() {
        let (backend, drw) = drw();
        let black = Rc::new(Clr::create(&drw, "black").unwrap());
        let white = Rc::new(Clr::create(&drw, "white").unwrap());

        let norm = ClrScheme::new(white.clone(), black.clone(), black.clone());
        let sel = ClrScheme::new(black.clone(), white.clone(), white.clone());
        drop(black);
        drop(white);
        assert_eq!(backend.live_colors(), 2);

        drop(norm);
        assert_eq!(backend.live_colors(), 2);
        drop(sel);
        assert_eq!(backend.live_colors(), 0);
    }
}
