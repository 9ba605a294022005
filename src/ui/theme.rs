//! Color themes and ANSI escape sequence generation.
//!
//! Two built-in palettes ship with the binary (`catppuccin-mocha`, the default,
//! and `catppuccin-latte`), plus `plain`, which emits no escape sequences at
//! all. Custom palettes load from TOML:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! rank_fg = "#f9e2af"
//! score_fg = "#a6e3a1"
//! webtoon_fg = "#89dceb"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! notice_fg = "#fab387"
//! error_fg = "#f38ba8"
//! ```

use crate::domain::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A named color palette.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    /// When false, every styling helper returns an empty string.
    #[serde(default = "ansi_default")]
    pub ansi: bool,
    pub colors: ThemeColors,
}

const fn ansi_default() -> bool {
    true
}

/// Hex colors (`"#rrggbb"`) for each UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,
    pub text_normal: String,
    pub text_dim: String,
    pub border: String,
    pub rank_fg: String,
    pub score_fg: String,
    pub webtoon_fg: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,
    pub empty_state_fg: String,
    /// Validation and success notifications.
    pub notice_fg: String,
    pub error_fg: String,
}

impl Theme {
    /// Looks up a built-in theme.
    ///
    /// ```
    /// use manhwadex::ui::Theme;
    ///
    /// assert_eq!(Theme::from_name("catppuccin-latte").unwrap().name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "catppuccin-mocha" => Some(Self::mocha()),
            "catppuccin-latte" => Some(Self::latte()),
            "plain" => Some(Self::plain()),
            _ => None,
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Config` if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| CatalogError::Config(format!("failed to read theme file {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| CatalogError::Config(format!("failed to parse theme {}: {e}", path.display())))
    }

    /// Resolves a theme setting: a built-in name, or otherwise a TOML path.
    ///
    /// # Errors
    ///
    /// Returns an error if `name_or_path` names neither a built-in theme nor a
    /// readable theme file.
    pub fn resolve(name_or_path: &str) -> Result<Self> {
        Self::from_name(name_or_path).map_or_else(|| Self::from_file(name_or_path), Ok)
    }

    fn palette(name: &str, colors: [&str; 12]) -> Self {
        let [header_fg, text_normal, text_dim, border, rank_fg, score_fg, webtoon_fg, match_highlight_fg, match_highlight_bg, empty_state_fg, notice_fg, error_fg] =
            colors.map(String::from);
        Self {
            name: name.to_string(),
            ansi: true,
            colors: ThemeColors {
                header_fg,
                header_bg: None,
                text_normal,
                text_dim,
                border,
                rank_fg,
                score_fg,
                webtoon_fg,
                match_highlight_fg,
                match_highlight_bg,
                empty_state_fg,
                notice_fg,
                error_fg,
            },
        }
    }

    fn mocha() -> Self {
        Self::palette(
            "catppuccin-mocha",
            [
                "#cdd6f4", "#cdd6f4", "#6c7086", "#45475a", "#f9e2af", "#a6e3a1", "#89dceb", "#1e1e2e", "#f9e2af",
                "#89b4fa", "#fab387", "#f38ba8",
            ],
        )
    }

    fn latte() -> Self {
        Self::palette(
            "catppuccin-latte",
            [
                "#4c4f69", "#4c4f69", "#9ca0b0", "#bcc0cc", "#df8e1d", "#40a02b", "#04a5e5", "#eff1f5", "#df8e1d",
                "#1e66f5", "#fe640b", "#d20f39",
            ],
        )
    }

    /// A theme that produces no escape sequences.
    #[must_use]
    pub fn plain() -> Self {
        let mut theme = Self::palette("plain", [""; 12]);
        theme.ansi = false;
        theme
    }

    /// Returns `(255, 255, 255)` on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape for `hex`.
    #[must_use]
    pub fn fg(&self, hex: &str) -> String {
        if !self.ansi || hex.is_empty() {
            return String::new();
        }
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for `hex`.
    #[must_use]
    pub fn bg(&self, hex: &str) -> String {
        if !self.ansi || hex.is_empty() {
            return String::new();
        }
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold(&self) -> &'static str {
        if self.ansi {
            "\u{001b}[1m"
        } else {
            ""
        }
    }

    #[must_use]
    pub const fn dim(&self) -> &'static str {
        if self.ansi {
            "\u{001b}[2m"
        } else {
            ""
        }
    }

    #[must_use]
    pub const fn reset(&self) -> &'static str {
        if self.ansi {
            "\u{001b}[0m"
        } else {
            ""
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}
