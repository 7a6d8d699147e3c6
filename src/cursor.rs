use crate::drw::Drw;
use crate::errors::DrwError;
use crate::render::backend::Backend;
use std::fmt;
use std::rc::Rc;

/// Shapes of the standard cursor font.
pub mod shape {
    pub const LEFT_PTR: u32 = 68;
    pub const SIZING: u32 = 120;
    pub const FLEUR: u32 = 52;
}

/// A cursor from the standard cursor font, released on free or drop.
pub struct Cur<B: Backend> {
    backend: Rc<B>,
    cursor: B::Cursor,
    shape: u32,
}

impl<B: Backend> Cur<B> {
    pub fn create(drw: &Drw<B>, shape: u32) -> Result<Self, DrwError> {
        let backend = drw.backend().clone();
        let cursor = backend
            .create_cursor(shape)
            .ok_or(DrwError::CursorAlloc { shape })?;
        log::debug!("{}: created cursor with shape {}", backend.name(), shape);
        Ok(Self { backend, cursor, shape })
    }

    pub fn shape(&self) -> u32 {
        self.shape
    }

    pub fn handle(&self) -> &B::Cursor {
        &self.cursor
    }

    /// Releases the cursor now.
    pub fn free(self) {}
}

impl<B: Backend> Drop for Cur<B> {
    fn drop(&mut self) {
        log::debug!("{}: freeing cursor with shape {}", self.backend.name(), self.shape);
        self.backend.free_cursor(&self.cursor);
    }
}

impl<B: Backend> fmt::Debug for Cur<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cur").field("shape", &self.shape).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backends::recording::RecordingBackend;

    #[test]
    fn create_and_free() {
        let backend = Rc::new(RecordingBackend::new());
        let root = backend.create_window();
        let drw = Drw::create(backend.clone(), 0, root, 10, 10).unwrap();

        let normal = Cur::create(&drw, shape::LEFT_PTR).unwrap();
        let moving = Cur::create(&drw, shape::FLEUR).unwrap();
        assert_eq!(normal.shape(), 68);
        assert_eq!(moving.handle().shape(), 52);
        assert_eq!(backend.live_cursors(), 2);

        normal.free();
        drop(moving);
        assert_eq!(backend.live_cursors(), 0);
    }

    #[test]
    fn bad_shape_is_recoverable() {
        let backend = Rc::new(RecordingBackend::new());
        let root = backend.create_window();
        let drw = Drw::create(backend, 0, root, 10, 10).unwrap();

        let err = Cur::create(&drw, 1000).unwrap_err();
        assert!(!err.is_fatal());
        assert!(matches!(err, DrwError::CursorAlloc { shape: 1000 }));
    }

    #[test]
    fn create_and_drop_with_debug_logging() {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .try_init();

        let backend = Rc::new(RecordingBackend::new());
        let root = backend.create_window();
        let drw = Drw::create(backend.clone(), 0, root, 10, 10).unwrap();

        let cur = Cur::create(&drw, shape::SIZING).unwrap();
        let clr = crate::color::Clr::create(&drw, "#222222").unwrap();
        assert_eq!(backend.live_cursors(), 1);
        assert_eq!(backend.live_colors(), 1);

        drop(cur);
        drop(clr);
        assert_eq!(backend.live_cursors(), 0);
        assert_eq!(backend.live_colors(), 0);
    }
}
