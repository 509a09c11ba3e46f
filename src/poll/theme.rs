//! Named display colors. Purely cosmetic; nothing in the poll reads them.

use super::color::Rgb;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    #[serde(default = "default_background")]
    pub background: Rgb,
    #[serde(default = "default_text")]
    pub text: Rgb,
    #[serde(default = "default_primary")]
    pub primary: Rgb,
    #[serde(default = "default_accent")]
    pub accent: Rgb,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: default_background(),
            text: default_text(),
            primary: default_primary(),
            accent: default_accent(),
        }
    }
}

/// Which theme color a settings row edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSlot {
    Background,
    Text,
    Primary,
    Accent,
}

impl ThemeSlot {
    pub const ALL: [ThemeSlot; 4] = [
        ThemeSlot::Background,
        ThemeSlot::Text,
        ThemeSlot::Primary,
        ThemeSlot::Accent,
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemePatch {
    pub background: Option<Rgb>,
    pub text: Option<Rgb>,
    pub primary: Option<Rgb>,
    pub accent: Option<Rgb>,
}

impl ThemePatch {
    pub fn slot(slot: ThemeSlot, color: Rgb) -> Self {
        let mut patch = Self::default();
        match slot {
            ThemeSlot::Background => patch.background = Some(color),
            ThemeSlot::Text => patch.text = Some(color),
            ThemeSlot::Primary => patch.primary = Some(color),
            ThemeSlot::Accent => patch.accent = Some(color),
        }
        patch
    }
}

impl ThemeColors {
    pub fn get(&self, slot: ThemeSlot) -> Rgb {
        match slot {
            ThemeSlot::Background => self.background,
            ThemeSlot::Text => self.text,
            ThemeSlot::Primary => self.primary,
            ThemeSlot::Accent => self.accent,
        }
    }

    pub fn merge(self, patch: ThemePatch) -> Self {
        Self {
            background: patch.background.unwrap_or(self.background),
            text: patch.text.unwrap_or(self.text),
            primary: patch.primary.unwrap_or(self.primary),
            accent: patch.accent.unwrap_or(self.accent),
        }
    }
}

fn default_background() -> Rgb {
    Rgb::from_hex(0x2B2D42)
}
fn default_text() -> Rgb {
    Rgb::from_hex(0xEDF2F4)
}
fn default_primary() -> Rgb {
    Rgb::from_hex(0x6D6875)
}
fn default_accent() -> Rgb {
    Rgb::from_hex(0xB5838D)
}
