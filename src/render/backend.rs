use std::fmt::Debug;

/// Size of a surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSize { pub width: u32, pub height: u32 }

/// Vertical metrics of an opened font, as reported by the font library.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontMetrics {
    pub ascent: i32,
    pub descent: i32,
}

/// Advance of a rendered string. `w` is the horizontal advance, `h` the vertical one
/// (zero for horizontal scripts).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Extnts {
    pub w: u32,
    pub h: u32,
}

/// Line parameters applied to a freshly created graphics context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineStyle {
    pub width: u32,
}

/// Core windowing interface. A backend owns the connection to the windowing system and the
/// font library; every handle it returns stays valid until passed to the matching
/// `free_*`/`close_*` call, after which it must not be used again. Calls occur on the
/// thread that owns the backend.
pub trait Backend {
    type Window: Copy + Debug;
    type Pixmap: Copy + Debug;
    type Gc: Debug;
    type Font: Debug;
    type Color: Debug;
    type Cursor: Debug;

    /// Human-readable backend name, used in log lines.
    fn name(&self) -> &str;

    /// Creates an off-screen pixmap of the screen's default depth.
    fn create_pixmap(&self, screen: i32, root: Self::Window, size: SurfaceSize) -> Option<Self::Pixmap>;
    fn free_pixmap(&self, pixmap: Self::Pixmap);

    fn create_gc(&self, root: Self::Window, line: LineStyle) -> Option<Self::Gc>;
    fn free_gc(&self, gc: &Self::Gc);

    /// Opens a font by name. Returns `None` when the font library cannot resolve the name.
    fn open_font(&self, screen: i32, name: &str) -> Option<Self::Font>;
    fn font_metrics(&self, font: &Self::Font) -> FontMetrics;
    fn close_font(&self, font: &Self::Font);

    /// Allocates a named color in the screen's default colormap. `None` on failure.
    fn alloc_color(&self, screen: i32, name: &str) -> Option<Self::Color>;
    /// Pixel value usable as a graphics context foreground.
    fn color_pixel(&self, color: &Self::Color) -> u64;
    fn free_color(&self, screen: i32, color: &Self::Color);

    fn create_cursor(&self, shape: u32) -> Option<Self::Cursor>;
    fn free_cursor(&self, cursor: &Self::Cursor);

    fn set_foreground(&self, gc: &Self::Gc, pixel: u64);
    fn fill_rectangle(&self, pixmap: Self::Pixmap, gc: &Self::Gc, x: i32, y: i32, w: u32, h: u32);
    /// Outlines a rectangle. Like the X protocol, the outline covers `w + 1` by `h + 1` pixels.
    fn draw_rectangle(&self, pixmap: Self::Pixmap, gc: &Self::Gc, x: i32, y: i32, w: u32, h: u32);

    /// Measures the advance of `text` under `font`.
    fn text_extents(&self, font: &Self::Font, text: &str) -> Extnts;
    /// Renders `text` with its baseline at `(x, y)`.
    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &self,
        pixmap: Self::Pixmap,
        screen: i32,
        color: &Self::Color,
        font: &Self::Font,
        x: i32,
        y: i32,
        text: &str,
    );

    /// Copies a region of `src` onto `dst` at the same coordinates.
    #[allow(clippy::too_many_arguments)]
    fn copy_area(&self, src: Self::Pixmap, dst: Self::Window, gc: &Self::Gc, x: i32, y: i32, w: u32, h: u32);

    /// Blocks until the windowing server has processed every request issued so far.
    fn sync(&self);
}
