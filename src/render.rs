pub mod backend;

/// Windowing backends a [`Drw`](crate::Drw) can draw through.
pub mod backends {
    /// In-memory backend that records drawing calls
    pub mod recording;
    /// Xlib + Xft backend
    #[cfg(feature = "xlib")]
    pub mod xlib;
}

pub mod draw_list;

pub use backend::{Backend, Extnts, FontMetrics, LineStyle, SurfaceSize};
