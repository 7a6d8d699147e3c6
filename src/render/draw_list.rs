//! Draw list and draw commands.
//!
//! This module defines a flat, immediate-style log of [`DrawCommand`]s.
//! The [`RecordingBackend`](crate::render::backends::recording::RecordingBackend)
//! appends one command per surface call, which makes every drawing
//! decision of a [`Drw`](crate::Drw) observable without a windowing server.
//!
//! # Example
//!
//! ```rust
//! use drw::render::draw_list::{DrawCommand, DrawList};
//!
//! let mut list = DrawList::new();
//! list.add_command(DrawCommand::SetForeground { pixel: 0x222222 });
//! list.add_command(DrawCommand::FillRect { pixmap: 1, x: 0, y: 0, w: 10, h: 10 });
//!
//! assert_eq!(list.len(), 2);
//! assert_eq!(list.surface_mutations().count(), 1);
//! ```

/// A single recorded drawing command.
///
/// Pixmap and window references are the numeric ids handed out by the
/// recording backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    /// Change the graphics context foreground.
    SetForeground {
        pixel: u64,
    },

    /// Fill a solid rectangle at `(x, y)` of `w` by `h` pixels.
    FillRect {
        pixmap: u64,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
    },

    /// Outline a rectangle; the outline covers `w + 1` by `h + 1` pixels.
    DrawRect {
        pixmap: u64,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
    },

    /// Render a run of text with its baseline at `(x, y)`.
    Text {
        pixmap: u64,
        x: i32,
        y: i32,
        /// Pixel of the color the text is drawn with.
        pixel: u64,
        /// Name the font was opened with.
        font: String,
        text: String,
    },

    /// Copy a region of a pixmap onto a window at the same coordinates.
    CopyArea {
        pixmap: u64,
        window: u64,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
    },

    /// Round trip to the server.
    Sync,
}

impl DrawCommand {
    /// Returns true if the command changes the pixels of a pixmap.
    pub fn mutates_surface(&self) -> bool {
        matches!(
            self,
            DrawCommand::FillRect { .. } | DrawCommand::DrawRect { .. } | DrawCommand::Text { .. }
        )
    }
}

/// A list of recorded draw commands, in issue order.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub items: Vec<DrawCommand>,
}

impl DrawList {
    /// Creates a new, empty draw list.
    pub fn new() -> Self {
        DrawList { items: Vec::new() }
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.items.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.items
    }

    /// Commands that changed pixels, skipping state changes and synchronisation.
    pub fn surface_mutations(&self) -> impl Iterator<Item = &DrawCommand> {
        self.items.iter().filter(|c| c.mutates_surface())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clears all recorded commands.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
