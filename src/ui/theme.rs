//! Dropdown colour schemes and ANSI escape sequence generation.
//!
//! Built-in themes ship as TOML files compiled into the binary; custom themes
//! use the same format:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! border = "#45475a"
//! primary_fg = "#cdd6f4"
//! secondary_fg = "#a6adc8"
//! index_fg = "#f5c2e7"
//! loading_fg = "#f9e2af"
//! empty_fg = "#6c7086"
//! ```

use crate::domain::{MapCompleteError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Colour scheme for the terminal dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Palette.
    pub colors: ThemeColors,
}

/// Colours as `#rrggbb` hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Dropdown frame.
    pub border: String,
    /// Street line.
    pub primary_fg: String,
    /// Locality line.
    pub secondary_fg: String,
    /// Row number in front of each row.
    pub index_fg: String,
    /// Loading indicator.
    pub loading_fg: String,
    /// "No matches" placeholder.
    pub empty_fg: String,
}

impl Theme {
    /// Loads a built-in theme: `catppuccin-mocha` or `catppuccin-latte`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`MapCompleteError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| MapCompleteError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| MapCompleteError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Resolves the theme for a configuration: file first, then name, then
    /// the default. Failures fall back to the default and are logged.
    #[must_use]
    pub fn resolve(theme_file: Option<&str>, theme_name: Option<&str>) -> Self {
        if let Some(file) = theme_file {
            match Self::from_file(file) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::debug!(theme_file = %file, error = %e, "failed to load theme from file, using default");
                }
            }
        }

        theme_name
            .and_then(|name| {
                Self::from_name(name).or_else(|| {
                    tracing::debug!(theme_name = %name, "unknown theme, using default");
                    None
                })
            })
            .unwrap_or_default()
    }

    /// `#rrggbb` to an RGB tuple; white when malformed.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}
