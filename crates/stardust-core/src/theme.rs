//! Page theme flag.

use serde::{Deserialize, Serialize};

use crate::Rgba;

/// Theme of the page hosting the background.
///
/// Only the name `"dark"` selects [`Theme::Dark`]; every other name is
/// treated as [`Theme::Light`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Parse a theme name.
    pub fn from_name(name: &str) -> Self {
        if name == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Canonical name of the theme.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Toggle between dark and light.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Solid fill painted behind everything else on each frame.
    pub fn background(self) -> Rgba {
        match self {
            Theme::Dark => Rgba::rgb(4, 6, 22),
            Theme::Light => Rgba::rgb(8, 10, 40),
        }
    }
}

impl From<String> for Theme {
    fn from(name: String) -> Self {
        Theme::from_name(&name)
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.name().to_string()
    }
}
