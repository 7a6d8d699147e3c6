use crate::render::backend::{Backend, Extnts, FontMetrics, LineStyle, SurfaceSize};
use crate::render::draw_list::{DrawCommand, DrawList};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Number of glyphs in the standard cursor font; valid shapes are below it.
const CURSOR_GLYPHS: u32 = 154;

/// Well-known X11 color names understood besides `#rgb` and `#rrggbb`.
const NAMED_COLORS: &[(&str, u64)] = &[
    ("black", 0x000000),
    ("white", 0xffffff),
    ("red", 0xff0000),
    ("green", 0x00ff00),
    ("blue", 0x0000ff),
    ("yellow", 0xffff00),
    ("gray", 0xbebebe),
    ("grey", 0xbebebe),
];

/// Window handle handed out by the recording backend.
pub type RecWindow = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecPixmap(pub u64);

#[derive(Debug)]
pub struct RecGc {
    id: u64,
    line: LineStyle,
}

impl RecGc {
    pub fn line(&self) -> LineStyle {
        self.line
    }
}

#[derive(Debug)]
pub struct RecFont {
    id: u64,
    name: String,
    spec: FontSpec,
}

impl RecFont {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug)]
pub struct RecColor {
    id: u64,
    pixel: u64,
}

#[derive(Debug)]
pub struct RecCursor {
    id: u64,
    shape: u32,
}

impl RecCursor {
    pub fn shape(&self) -> u32 {
        self.shape
    }
}

/// Metrics of a font known to the recording backend. Every character advances by `advance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontSpec {
    pub ascent: i32,
    pub descent: i32,
    pub advance: u32,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    list: DrawList,
    fonts_known: HashMap<String, FontSpec>,
    pixmaps: BTreeMap<RecPixmap, SurfaceSize>,
    gcs: BTreeSet<u64>,
    fonts: BTreeSet<u64>,
    colors: BTreeSet<u64>,
    cursors: BTreeSet<u64>,
    fail_pixmaps: bool,
    fail_gcs: bool,
}

impl State {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory backend that records every drawing call instead of rasterizing it.
///
/// Resources are tracked by id so leaks and double releases can be asserted on, and text
/// is measured with a fixed advance per character, which keeps truncation deterministic.
/// The font `"fixed"` (ascent 11, descent 3, advance 6) is always registered.
#[derive(Debug)]
pub struct RecordingBackend {
    state: RefCell<State>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingBackend {
    pub fn new() -> Self {
        let mut state = State::default();
        state.fonts_known.insert(
            "fixed".to_string(),
            FontSpec { ascent: 11, descent: 3, advance: 6 },
        );
        Self { state: RefCell::new(state) }
    }

    /// Registers a font name that `open_font` will resolve.
    pub fn with_font(self, name: &str, ascent: i32, descent: i32, advance: u32) -> Self {
        self.state
            .borrow_mut()
            .fonts_known
            .insert(name.to_string(), FontSpec { ascent, descent, advance });
        self
    }

    /// Forgets a registered font, including the default `"fixed"`.
    pub fn without_font(self, name: &str) -> Self {
        self.state.borrow_mut().fonts_known.remove(name);
        self
    }

    /// Makes subsequent pixmap allocations fail.
    pub fn set_fail_pixmaps(&self, fail: bool) {
        self.state.borrow_mut().fail_pixmaps = fail;
    }

    /// Makes subsequent graphics context allocations fail.
    pub fn set_fail_gcs(&self, fail: bool) {
        self.state.borrow_mut().fail_gcs = fail;
    }

    /// Snapshot of everything recorded so far.
    pub fn draw_list(&self) -> DrawList {
        self.state.borrow().list.clone()
    }

    /// Returns the recorded commands and starts a fresh list.
    pub fn take_draw_list(&self) -> DrawList {
        std::mem::take(&mut self.state.borrow_mut().list)
    }

    /// Live pixmaps with their sizes, in creation order.
    pub fn live_pixmaps(&self) -> Vec<(RecPixmap, SurfaceSize)> {
        self.state.borrow().pixmaps.iter().map(|(p, s)| (*p, *s)).collect()
    }

    pub fn pixmap_size(&self, pixmap: RecPixmap) -> Option<SurfaceSize> {
        self.state.borrow().pixmaps.get(&pixmap).copied()
    }

    pub fn live_gcs(&self) -> usize {
        self.state.borrow().gcs.len()
    }

    pub fn live_fonts(&self) -> usize {
        self.state.borrow().fonts.len()
    }

    pub fn live_colors(&self) -> usize {
        self.state.borrow().colors.len()
    }

    pub fn live_cursors(&self) -> usize {
        self.state.borrow().cursors.len()
    }

    /// Hands out a window id, standing in for a window created by the caller.
    pub fn create_window(&self) -> RecWindow {
        self.state.borrow_mut().next_id()
    }

    fn record(&self, command: DrawCommand) {
        self.state.borrow_mut().list.add_command(command);
    }
}

/// Resolves `#rgb`, `#rrggbb` and the names in [`NAMED_COLORS`] to a 24-bit pixel.
fn parse_color(name: &str) -> Option<u64> {
    if let Some(hex) = name.strip_prefix('#') {
        let value = u64::from_str_radix(hex, 16).ok()?;
        return match hex.len() {
            3 => {
                let (r, g, b) = ((value >> 8) & 0xf, (value >> 4) & 0xf, value & 0xf);
                Some((r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11)
            }
            6 => Some(value),
            _ => None,
        };
    }

    NAMED_COLORS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, pixel)| *pixel)
}

impl Backend for RecordingBackend {
    type Window = RecWindow;
    type Pixmap = RecPixmap;
    type Gc = RecGc;
    type Font = RecFont;
    type Color = RecColor;
    type Cursor = RecCursor;

    fn name(&self) -> &str {
        "RecordingBackend"
    }

    fn create_pixmap(&self, _screen: i32, _root: RecWindow, size: SurfaceSize) -> Option<RecPixmap> {
        let mut state = self.state.borrow_mut();
        if state.fail_pixmaps {
            return None;
        }
        let pixmap = RecPixmap(state.next_id());
        state.pixmaps.insert(pixmap, size);
        Some(pixmap)
    }

    fn free_pixmap(&self, pixmap: RecPixmap) {
        let removed = self.state.borrow_mut().pixmaps.remove(&pixmap);
        assert!(removed.is_some(), "pixmap {:?} freed twice or never created", pixmap);
    }

    fn create_gc(&self, _root: RecWindow, line: LineStyle) -> Option<RecGc> {
        let mut state = self.state.borrow_mut();
        if state.fail_gcs {
            return None;
        }
        let id = state.next_id();
        state.gcs.insert(id);
        Some(RecGc { id, line })
    }

    fn free_gc(&self, gc: &RecGc) {
        let removed = self.state.borrow_mut().gcs.remove(&gc.id);
        assert!(removed, "gc {} freed twice", gc.id);
    }

    fn open_font(&self, _screen: i32, name: &str) -> Option<RecFont> {
        let mut state = self.state.borrow_mut();
        let spec = *state.fonts_known.get(name)?;
        let id = state.next_id();
        state.fonts.insert(id);
        Some(RecFont { id, name: name.to_string(), spec })
    }

    fn font_metrics(&self, font: &RecFont) -> FontMetrics {
        FontMetrics { ascent: font.spec.ascent, descent: font.spec.descent }
    }

    fn close_font(&self, font: &RecFont) {
        let removed = self.state.borrow_mut().fonts.remove(&font.id);
        assert!(removed, "font {} closed twice", font.name);
    }

    fn alloc_color(&self, _screen: i32, name: &str) -> Option<RecColor> {
        let pixel = parse_color(name)?;
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.colors.insert(id);
        Some(RecColor { id, pixel })
    }

    fn color_pixel(&self, color: &RecColor) -> u64 {
        color.pixel
    }

    fn free_color(&self, _screen: i32, color: &RecColor) {
        let removed = self.state.borrow_mut().colors.remove(&color.id);
        assert!(removed, "color {} freed twice", color.id);
    }

    fn create_cursor(&self, shape: u32) -> Option<RecCursor> {
        if shape >= CURSOR_GLYPHS {
            return None;
        }
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.cursors.insert(id);
        Some(RecCursor { id, shape })
    }

    fn free_cursor(&self, cursor: &RecCursor) {
        let removed = self.state.borrow_mut().cursors.remove(&cursor.id);
        assert!(removed, "cursor {} freed twice", cursor.id);
    }

    fn set_foreground(&self, _gc: &RecGc, pixel: u64) {
        self.record(DrawCommand::SetForeground { pixel });
    }

    fn fill_rectangle(&self, pixmap: RecPixmap, _gc: &RecGc, x: i32, y: i32, w: u32, h: u32) {
        self.record(DrawCommand::FillRect { pixmap: pixmap.0, x, y, w, h });
    }

    fn draw_rectangle(&self, pixmap: RecPixmap, _gc: &RecGc, x: i32, y: i32, w: u32, h: u32) {
        self.record(DrawCommand::DrawRect { pixmap: pixmap.0, x, y, w, h });
    }

    fn text_extents(&self, font: &RecFont, text: &str) -> Extnts {
        Extnts { w: text.chars().count() as u32 * font.spec.advance, h: 0 }
    }

    fn draw_text(
        &self,
        pixmap: RecPixmap,
        _screen: i32,
        color: &RecColor,
        font: &RecFont,
        x: i32,
        y: i32,
        text: &str,
    ) {
        self.record(DrawCommand::Text {
            pixmap: pixmap.0,
            x,
            y,
            pixel: color.pixel,
            font: font.name.clone(),
            text: text.to_string(),
        });
    }

    fn copy_area(&self, src: RecPixmap, dst: RecWindow, _gc: &RecGc, x: i32, y: i32, w: u32, h: u32) {
        self.record(DrawCommand::CopyArea { pixmap: src.0, window: dst, x, y, w, h });
    }

    fn sync(&self) {
        self.record(DrawCommand::Sync);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!(parse_color("#222222"), Some(0x222222));
        assert_eq!(parse_color("#fff"), Some(0xffffff));
        assert_eq!(parse_color("#1a2"), Some(0x11aa22));
        assert_eq!(parse_color("Black"), Some(0x000000));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
        assert_eq!(parse_color("chartreuse-ish"), None);
    }

    #[test]
    fn fixed_is_registered_by_default() {
        let backend = RecordingBackend::new();
        let font = backend.open_font(0, "fixed").expect("fixed font");
        assert_eq!(backend.font_metrics(&font), FontMetrics { ascent: 11, descent: 3 });
        assert_eq!(backend.live_fonts(), 1);

        backend.close_font(&font);
        assert_eq!(backend.live_fonts(), 0);
    }

    #[test]
    fn unknown_fonts_do_not_open() {
        let backend = RecordingBackend::new().without_font("fixed");
        assert!(backend.open_font(0, "fixed").is_none());
        assert!(backend.open_font(0, "monospace:size=10").is_none());
    }

    #[test]
    fn extents_count_characters_not_bytes() {
        let backend = RecordingBackend::new().with_font("mono", 10, 4, 7);
        let font = backend.open_font(0, "mono").unwrap();
        assert_eq!(backend.text_extents(&font, "abc").w, 21);
        assert_eq!(backend.text_extents(&font, "äöü").w, 21);
        assert_eq!(backend.text_extents(&font, "").w, 0);
        backend.close_font(&font);
    }

    #[test]
    fn pixmaps_are_tracked_with_their_size() {
        let backend = RecordingBackend::new();
        let size = SurfaceSize { width: 800, height: 20 };
        let p = backend.create_pixmap(0, 1, size).unwrap();
        assert_eq!(backend.pixmap_size(p), Some(size));

        backend.set_fail_pixmaps(true);
        assert!(backend.create_pixmap(0, 1, size).is_none());

        backend.free_pixmap(p);
        assert!(backend.live_pixmaps().is_empty());
    }

    #[test]
    fn cursor_shapes_outside_the_font_are_rejected() {
        let backend = RecordingBackend::new();
        assert!(backend.create_cursor(CURSOR_GLYPHS).is_none());
        let cursor = backend.create_cursor(68).unwrap();
        assert_eq!(cursor.shape(), 68);
        backend.free_cursor(&cursor);
        assert_eq!(backend.live_cursors(), 0);
    }
}
