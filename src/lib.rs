//! A small drawing layer for status bars and window managers.
//!
//! [`Drw`] paints into an off-screen pixmap with a selected [`Fnt`] and [`ClrScheme`],
//! and copies the result onto a window with [`Drw::map`]. The windowing system is reached
//! through the [`Backend`](render::Backend) trait: the `xlib` feature provides Xlib + Xft,
//! and [`RecordingBackend`](render::backends::recording::RecordingBackend) records calls
//! in memory.

pub mod color;
pub mod config;
pub mod cursor;
pub mod drw;
pub mod errors;
pub mod font;
pub mod render;
pub mod text;

pub use color::{Clr, ClrScheme};
pub use config::{DrwConfig, DrwConfigError};
pub use cursor::Cur;
pub use drw::{font_getexts_width, Drw, EXTENTS_NONE};
pub use errors::{DrwError, Fatal};
pub use font::Fnt;
pub use render::Extnts;
