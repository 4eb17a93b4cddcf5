//! Terminal appearance defaults.
//!
//! Inert data consumed by the renderer and escape-sequence interpreter:
//! the color-name table, default color indices, cursor and geometry
//! defaults. Nothing in this crate interprets these values; they are
//! carried here so every collaborator reads one set of documented
//! defaults, overridable from a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ErrLoadingConfig(String),
    PathNotFound,
}

/// Default shape of the text cursor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorShape {
    #[default]
    Block,
    Underline,
    Beam,
}

/// The color table and the default indices into it.
///
/// Entries 0-15 are the ANSI colors addressable from escape sequences.
/// Indices 16-255 are the computed 256-color cube and grayscale ramp,
/// owned by the renderer; the extended entries here sit above them,
/// starting at index 256.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colors {
    /// The 16 ANSI color names, normal then bright.
    #[serde(default = "default_ansi_colors")]
    pub ansi: Vec<String>,
    /// Named entries appended after the color cube, from index 256 up.
    #[serde(default = "default_extended_colors")]
    pub extended: Vec<String>,
    /// Default foreground color index.
    #[serde(default = "default_foreground")]
    pub foreground: usize,
    /// Default background color index.
    #[serde(default = "default_background")]
    pub background: usize,
    /// Cursor color index.
    #[serde(default = "default_cursor_color")]
    pub cursor: usize,
    /// Reverse-video cursor color index.
    #[serde(default = "default_reverse_cursor_color")]
    pub reverse_cursor: usize,
}

impl Default for Colors {
    fn default() -> Colors {
        Colors {
            ansi: default_ansi_colors(),
            extended: default_extended_colors(),
            foreground: default_foreground(),
            background: default_background(),
            cursor: default_cursor_color(),
            reverse_cursor: default_reverse_cursor_color(),
        }
    }
}

impl Colors {
    /// Resolves a named table entry. Indices 16-255 belong to the computed
    /// cube and have no name here.
    pub fn name_of(&self, index: usize) -> Option<&str> {
        match index {
            0..=15 => self.ansi.get(index).map(String::as_str),
            16..=255 => None,
            _ => self.extended.get(index - 256).map(String::as_str),
        }
    }
}

/// Appearance defaults for a terminal window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    /// Fontconfig pattern for the terminal font.
    #[serde(default = "default_font")]
    pub font: String,
    /// Window border width in pixels.
    #[serde(default = "default_border_px", rename = "border-px")]
    pub border_px: u32,
    /// Initial grid width in cells.
    #[serde(default = "default_columns")]
    pub columns: u16,
    /// Initial grid height in cells.
    #[serde(default = "default_lines")]
    pub lines: u16,
    #[serde(default, rename = "cursor-shape")]
    pub cursor_shape: CursorShape,
    /// Mouse cursor foreground color index.
    #[serde(default = "default_mouse_foreground", rename = "mouse-foreground")]
    pub mouse_foreground: usize,
    /// Mouse cursor background color index.
    #[serde(default = "default_mouse_background", rename = "mouse-background")]
    pub mouse_background: usize,
    #[serde(default)]
    pub colors: Colors,
}

impl Default for Appearance {
    fn default() -> Appearance {
        Appearance {
            font: default_font(),
            border_px: default_border_px(),
            columns: default_columns(),
            lines: default_lines(),
            cursor_shape: CursorShape::default(),
            mouse_foreground: default_mouse_foreground(),
            mouse_background: default_mouse_background(),
            colors: Colors::default(),
        }
    }
}

impl Appearance {
    /// Loads appearance settings from a TOML file. Missing keys fall back
    /// to their defaults.
    pub fn load(path: &Path) -> Result<Appearance, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::PathNotFound)?;
        toml::from_str(&content)
            .map_err(|err| ConfigError::ErrLoadingConfig(err.to_string()))
    }

    /// Like [`Appearance::load`], but falls back to the defaults and warns
    /// instead of failing.
    pub fn try_load(path: &Path) -> Appearance {
        match Appearance::load(path) {
            Ok(appearance) => appearance,
            Err(err) => {
                warn!(?err, path = %path.display(), "using default appearance");
                Appearance::default()
            }
        }
    }
}

#[inline]
fn default_font() -> String {
    String::from("Liberation Mono:pixelsize=12")
}

#[inline]
fn default_border_px() -> u32 {
    2
}

#[inline]
fn default_columns() -> u16 {
    80
}

#[inline]
fn default_lines() -> u16 {
    24
}

#[inline]
fn default_mouse_foreground() -> usize {
    7
}

#[inline]
fn default_mouse_background() -> usize {
    0
}

#[inline]
fn default_ansi_colors() -> Vec<String> {
    [
        // 8 normal colors
        "black", "red3", "green3", "yellow3", "blue2", "magenta3", "cyan3", "gray90",
        // 8 bright colors
        "gray50", "red", "green", "yellow", "#5c5cff", "magenta", "cyan", "white",
    ]
    .map(String::from)
    .to_vec()
}

#[inline]
fn default_extended_colors() -> Vec<String> {
    ["#cccccc", "#555555", "gray90", "black"]
        .map(String::from)
        .to_vec()
}

#[inline]
fn default_foreground() -> usize {
    258
}

#[inline]
fn default_background() -> usize {
    259
}

#[inline]
fn default_cursor_color() -> usize {
    256
}

#[inline]
fn default_reverse_cursor_color() -> usize {
    257
}
