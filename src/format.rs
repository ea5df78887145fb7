//! Text sanitizing and the shared rendering constants
//!
//! Both containers render with the same line terminator. The tree
//! additionally draws its branches with the glyphs defined here.

use std::fmt;

use unicode_general_category::{get_general_category, GeneralCategory};

/// Line terminator used by every rendering, independent of the host platform.
pub const NEW_LINE: &str = "\n\r";

/// Three-column runs used to draw tree branches and indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Branch to a child that has siblings after it
    Branch,
    /// Branch to the last child of its parent
    LastBranch,
    /// Blank run
    Space,
    /// Vertical bar connecting siblings below
    Pipe,
}

impl Glyph {
    pub const fn as_str(self) -> &'static str {
        match self {
            Glyph::Branch => "├─ ",
            Glyph::LastBranch => "└─ ",
            Glyph::Space => "   ",
            Glyph::Pipe => "│  ",
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Letters, marks, numbers, punctuation and symbols.
fn is_visible(c: char) -> bool {
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}

/// Printable characters: letters, marks, numbers, punctuation, symbols and
/// the ASCII space. Other spacing characters are not printable.
pub fn is_printable(c: char) -> bool {
    c == ' ' || is_visible(c)
}

/// Graphic characters: the printable categories plus every space separator.
pub fn is_graphic(c: char) -> bool {
    is_visible(c) || matches!(get_general_category(c), GeneralCategory::SpaceSeparator)
}

/// Removes every character that is not both graphic and printable, then trims
/// surrounding whitespace.
///
/// Stripping runs before trimming, so `clean(clean(s)) == clean(s)`.
pub fn clean(s: &str) -> String {
    let kept: String = s
        .chars()
        .filter(|&c| is_graphic(c) && is_printable(c))
        .collect();
    kept.trim().to_string()
}
