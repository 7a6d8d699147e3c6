//! Fitting a string into a box of fixed width.
//!
//! Lengths are UTF-8 byte counts. Only the first `capacity` bytes of a string are ever
//! measured, and cuts always land on a char boundary so the result stays valid UTF-8.

use std::borrow::Cow;

/// A string shortened to fit a box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Truncated<'a> {
    /// Text to draw, with trailing dots when `truncated` is set.
    pub text: Cow<'a, str>,
    /// Measured advance of the kept prefix, before the dots were put in.
    pub width: u32,
    /// Whether anything was cut from the original string.
    pub truncated: bool,
}

/// Largest char boundary of `s` at or below `idx`.
pub fn floor_char_boundary(s: &str, idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    let mut i = idx;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn prev_char_boundary(s: &str, idx: usize) -> usize {
    floor_char_boundary(s, idx.saturating_sub(1))
}

/// Shortens `text` until its measured width fits `avail_w` minus a margin of `font_h`.
///
/// The search starts at the shorter of the string length and `capacity`. Returns `None`
/// when no non-empty prefix fits, including every case where `avail_w < font_h`.
/// When the result is shorter than `text`, its last `ellipsis_len` characters (or all
/// of them, if fewer) are replaced by `.`.
pub fn truncate<'a>(
    text: &'a str,
    avail_w: u32,
    font_h: u32,
    capacity: usize,
    ellipsis_len: usize,
    mut measure: impl FnMut(&str) -> u32,
) -> Option<Truncated<'a>> {
    let fits = |w: u32| avail_w >= font_h && w <= avail_w - font_h;

    let mut len = floor_char_boundary(text, text.len().min(capacity));
    let mut width = if len > 0 { measure(&text[..len]) } else { 0 };
    while len > 0 && !fits(width) {
        len = prev_char_boundary(text, len);
        if len > 0 {
            width = measure(&text[..len]);
        }
    }
    if len == 0 {
        return None;
    }

    if len == text.len() {
        return Some(Truncated { text: Cow::Borrowed(text), width, truncated: false });
    }

    let kept = &text[..len];
    let chars = kept.chars().count();
    let dots = ellipsis_len.min(chars);
    let mut out: String = kept.chars().take(chars - dots).collect();
    out.extend(std::iter::repeat('.').take(dots));

    log::trace!("truncate: {} -> {} bytes ({:?})", text.len(), len, out);
    Some(Truncated { text: Cow::Owned(out), width, truncated: true })
}
