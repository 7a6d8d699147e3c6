use std::process;

#[derive(Debug, thiserror::Error)]
pub enum DrwError {
    #[error("cannot create {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },

    #[error("cannot create graphics context")]
    GcAlloc,

    #[error("cannot create cursor with shape {shape}")]
    CursorAlloc { shape: u32 },

    #[error("cannot load font: '{name}' (fallback '{fallback}' failed too)")]
    FontLoad { name: String, fallback: String },

    #[error("cannot allocate color '{name}'")]
    ColorAlloc { name: String },

    #[error("Backend error: {0}")]
    Backend(String),
}

impl DrwError {
    /// Font and color failures leave nothing to render with. Callers that cannot
    /// degrade treat them as unrecoverable, see [`Fatal::or_die`].
    pub fn is_fatal(&self) -> bool {
        matches!(self, DrwError::FontLoad { .. } | DrwError::ColorAlloc { .. })
    }
}

/// Fail-fast handling for results whose error leaves the UI unrenderable.
pub trait Fatal<T> {
    /// Returns the value, or logs the error, prints it to stderr and exits with status 1.
    fn or_die(self) -> T;
}

impl<T> Fatal<T> for Result<T, DrwError> {
    fn or_die(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => die(&e),
        }
    }
}

/// Terminates the process with a diagnostic.
pub fn die(err: &DrwError) -> ! {
    log::error!("{}", err);
    eprintln!("drw: {}", err);
    process::exit(1);
}
