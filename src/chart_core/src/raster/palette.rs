//! Concrete colour encoding for [`Direction`] tags.
//!
//! The rasterizer only knows up/down; the escape sequences live here so a
//! caller can swap them (or drop colour entirely) without touching the
//! algorithm.

use crate::models::bar::Direction;

const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_RED: &str = "\x1b[31m";
const ANSI_RESET: &str = "\x1b[0m";

/// Prefix/suffix pairs wrapped around each marked glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    up: &'static str,
    down: &'static str,
    reset: &'static str,
}

impl Palette {
    /// Green for up, red for down, ANSI reset after each glyph.
    pub const fn ansi() -> Self {
        Self {
            up: ANSI_GREEN,
            down: ANSI_RED,
            reset: ANSI_RESET,
        }
    }

    /// Glyphs only.
    pub const fn plain() -> Self {
        Self {
            up: "",
            down: "",
            reset: "",
        }
    }

    /// Appends `glyph` to `out`, wrapped in the colour for `direction`.
    ///
    /// Untagged glyphs are written as-is.
    pub fn paint(&self, out: &mut String, glyph: char, direction: Option<Direction>) {
        let prefix = match direction {
            Some(Direction::Up) => self.up,
            Some(Direction::Down) => self.down,
            None => {
                out.push(glyph);
                return;
            }
        };
        out.push_str(prefix);
        out.push(glyph);
        out.push_str(self.reset);
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ansi()
    }
}
