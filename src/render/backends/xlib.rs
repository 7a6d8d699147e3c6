use crate::render::backend::{Backend, Extnts, FontMetrics, LineStyle, SurfaceSize};
use anyhow::{anyhow, Result};
use std::ffi::CString;
use std::fmt;
use std::mem::MaybeUninit;
use std::os::raw::{c_int, c_uint};
use std::ptr;
use x11::{xft, xlib, xrender};

/// Xlib + Xft backend. Owns the display connection and closes it on drop.
pub struct XlibBackend {
    display: *mut xlib::Display,
}

/// Opened Xft font.
#[derive(Debug)]
pub struct XftFontHandle(*mut xft::XftFont);

/// Graphics context created on the root window.
#[derive(Debug)]
pub struct XGc(xlib::GC);

/// Color allocated in the default colormap through Xft.
pub struct XftColorHandle(xft::XftColor);

impl fmt::Debug for XftColorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XftColorHandle").field("pixel", &self.0.pixel).finish()
    }
}

impl XlibBackend {
    /// Connects to the X server named by `display_name`, or `$DISPLAY` when `None`.
    pub fn open(display_name: Option<&str>) -> Result<Self> {
        let name = display_name
            .map(CString::new)
            .transpose()
            .map_err(|_| anyhow!("display name contains a NUL byte"))?;

        let display = unsafe { xlib::XOpenDisplay(name.as_ref().map_or(ptr::null(), |n| n.as_ptr())) };
        if display.is_null() {
            return Err(anyhow!("cannot open display {:?}", display_name.unwrap_or("$DISPLAY")));
        }

        log::debug!("XlibBackend: connected to display {:?}", display_name);
        Ok(Self { display })
    }

    /// Raw connection pointer, for callers issuing their own Xlib requests.
    pub fn display(&self) -> *mut xlib::Display {
        self.display
    }

    pub fn default_screen(&self) -> i32 {
        unsafe { xlib::XDefaultScreen(self.display) }
    }

    pub fn root_window(&self, screen: i32) -> xlib::Window {
        unsafe { xlib::XRootWindow(self.display, screen) }
    }

    pub fn display_width(&self, screen: i32) -> u32 {
        unsafe { xlib::XDisplayWidth(self.display, screen) as u32 }
    }

    /// Creates and maps a plain override-redirect window, as a status bar would use.
    pub fn create_bar_window(&self, screen: i32, x: i32, y: i32, w: u32, h: u32) -> xlib::Window {
        unsafe {
            let root = xlib::XRootWindow(self.display, screen);
            let mut attrs: xlib::XSetWindowAttributes = MaybeUninit::zeroed().assume_init();
            attrs.override_redirect = xlib::True;
            attrs.background_pixmap = xlib::ParentRelative as xlib::Pixmap;
            attrs.event_mask = xlib::ExposureMask;

            let win = xlib::XCreateWindow(
                self.display,
                root,
                x,
                y,
                w,
                h,
                0,
                xlib::XDefaultDepth(self.display, screen),
                xlib::CopyFromParent as c_uint,
                xlib::XDefaultVisual(self.display, screen),
                xlib::CWOverrideRedirect | xlib::CWBackPixmap | xlib::CWEventMask,
                &mut attrs,
            );
            xlib::XMapRaised(self.display, win);
            win
        }
    }

    pub fn destroy_window(&self, win: xlib::Window) {
        unsafe {
            xlib::XDestroyWindow(self.display, win);
        }
    }

    fn visual(&self, screen: i32) -> *mut xlib::Visual {
        unsafe { xlib::XDefaultVisual(self.display, screen) }
    }

    fn colormap(&self, screen: i32) -> xlib::Colormap {
        unsafe { xlib::XDefaultColormap(self.display, screen) }
    }
}

impl Drop for XlibBackend {
    fn drop(&mut self) {
        log::debug!("XlibBackend: closing display");
        unsafe {
            xlib::XCloseDisplay(self.display);
        }
    }
}

impl Backend for XlibBackend {
    type Window = xlib::Window;
    type Pixmap = xlib::Pixmap;
    type Gc = XGc;
    type Font = XftFontHandle;
    type Color = XftColorHandle;
    type Cursor = xlib::Cursor;

    fn name(&self) -> &str {
        "XlibBackend"
    }

    fn create_pixmap(&self, screen: i32, root: xlib::Window, size: SurfaceSize) -> Option<xlib::Pixmap> {
        let pixmap = unsafe {
            let depth = xlib::XDefaultDepth(self.display, screen) as c_uint;
            xlib::XCreatePixmap(self.display, root, size.width, size.height, depth)
        };
        (pixmap != 0).then_some(pixmap)
    }

    fn free_pixmap(&self, pixmap: xlib::Pixmap) {
        unsafe {
            xlib::XFreePixmap(self.display, pixmap);
        }
    }

    fn create_gc(&self, root: xlib::Window, line: LineStyle) -> Option<XGc> {
        unsafe {
            let gc = xlib::XCreateGC(self.display, root, 0, ptr::null_mut());
            if gc.is_null() {
                return None;
            }
            xlib::XSetLineAttributes(self.display, gc, line.width, xlib::LineSolid, xlib::CapButt, xlib::JoinMiter);
            Some(XGc(gc))
        }
    }

    fn free_gc(&self, gc: &XGc) {
        unsafe {
            xlib::XFreeGC(self.display, gc.0);
        }
    }

    fn open_font(&self, screen: i32, name: &str) -> Option<XftFontHandle> {
        let cname = CString::new(name).ok()?;
        let font = unsafe { xft::XftFontOpenName(self.display, screen, cname.as_ptr()) };
        (!font.is_null()).then_some(XftFontHandle(font))
    }

    fn font_metrics(&self, font: &XftFontHandle) -> FontMetrics {
        // SAFETY: handles only come from a non-null XftFontOpenName result, and the owning
        // Fnt never uses its handle after close_font.
        let xfont = unsafe { &*font.0 };
        FontMetrics { ascent: xfont.ascent, descent: xfont.descent }
    }

    fn close_font(&self, font: &XftFontHandle) {
        unsafe {
            xft::XftFontClose(self.display, font.0);
        }
    }

    fn alloc_color(&self, screen: i32, name: &str) -> Option<XftColorHandle> {
        let cname = CString::new(name).ok()?;
        let mut color = MaybeUninit::<xft::XftColor>::uninit();
        let ok = unsafe {
            xft::XftColorAllocName(
                self.display,
                self.visual(screen),
                self.colormap(screen),
                cname.as_ptr(),
                color.as_mut_ptr(),
            )
        };
        if ok == 0 {
            return None;
        }
        Some(XftColorHandle(unsafe { color.assume_init() }))
    }

    fn color_pixel(&self, color: &XftColorHandle) -> u64 {
        color.0.pixel as u64
    }

    fn free_color(&self, screen: i32, color: &XftColorHandle) {
        // XftColorFree only reads the pixel out of the color it is given.
        let color = &color.0 as *const xft::XftColor as *mut xft::XftColor;
        unsafe {
            xft::XftColorFree(self.display, self.visual(screen), self.colormap(screen), color);
        }
    }

    fn create_cursor(&self, shape: u32) -> Option<xlib::Cursor> {
        let cursor = unsafe { xlib::XCreateFontCursor(self.display, shape) };
        (cursor != 0).then_some(cursor)
    }

    fn free_cursor(&self, cursor: &xlib::Cursor) {
        unsafe {
            xlib::XFreeCursor(self.display, *cursor);
        }
    }

    fn set_foreground(&self, gc: &XGc, pixel: u64) {
        unsafe {
            xlib::XSetForeground(self.display, gc.0, pixel as _);
        }
    }

    fn fill_rectangle(&self, pixmap: xlib::Pixmap, gc: &XGc, x: i32, y: i32, w: u32, h: u32) {
        unsafe {
            xlib::XFillRectangle(self.display, pixmap, gc.0, x, y, w, h);
        }
    }

    fn draw_rectangle(&self, pixmap: xlib::Pixmap, gc: &XGc, x: i32, y: i32, w: u32, h: u32) {
        unsafe {
            xlib::XDrawRectangle(self.display, pixmap, gc.0, x, y, w, h);
        }
    }

    fn text_extents(&self, font: &XftFontHandle, text: &str) -> Extnts {
        let mut ext = MaybeUninit::<xrender::XGlyphInfo>::zeroed();
        let ext = unsafe {
            xft::XftTextExtentsUtf8(self.display, font.0, text.as_ptr(), text.len() as c_int, ext.as_mut_ptr());
            ext.assume_init()
        };
        Extnts { w: ext.xOff.max(0) as u32, h: ext.yOff.max(0) as u32 }
    }

    fn draw_text(
        &self,
        pixmap: xlib::Pixmap,
        screen: i32,
        color: &XftColorHandle,
        font: &XftFontHandle,
        x: i32,
        y: i32,
        text: &str,
    ) {
        unsafe {
            let d = xft::XftDrawCreate(self.display, pixmap, self.visual(screen), self.colormap(screen));
            if d.is_null() {
                log::warn!("XlibBackend: XftDrawCreate failed, text not drawn");
                return;
            }
            xft::XftDrawStringUtf8(d, &color.0, font.0, x, y, text.as_ptr(), text.len() as c_int);
            xft::XftDrawDestroy(d);
        }
    }

    fn copy_area(&self, src: xlib::Pixmap, dst: xlib::Window, gc: &XGc, x: i32, y: i32, w: u32, h: u32) {
        unsafe {
            xlib::XCopyArea(self.display, src, dst, gc.0, x, y, w, h, x, y);
        }
    }

    fn sync(&self) {
        unsafe {
            xlib::XSync(self.display, xlib::False);
        }
    }
}
