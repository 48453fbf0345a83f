//! Terminal color theme system
//!
//! Provides adaptive color palettes for dark and light terminal backgrounds.
//! Auto-detects via COLORFGBG env var, or manual override with --light flag
//! or LUM_LIGHT_BG=1 environment variable.

use ratatui::style::Color;
use strum::{Display, EnumIter};

/// Brightness bucket a cell's light value falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum LightBand {
    /// Nothing drawn
    Dark,
    Faint,
    Dim,
    Lit,
    Bright,
}

impl LightBand {
    /// Bucket a light value in [0, 1]
    pub fn from_light(light: f32) -> Self {
        if light >= 0.7 {
            LightBand::Bright
        } else if light >= 0.5 {
            LightBand::Lit
        } else if light >= 0.3 {
            LightBand::Dim
        } else if light >= 0.1 {
            LightBand::Faint
        } else {
            LightBand::Dark
        }
    }

    pub fn is_visible(self) -> bool {
        self != LightBand::Dark
    }
}

/// Color theme for terminal UI.
/// All UI code should use theme colors instead of hardcoded Color:: values.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    // General UI text
    /// Primary foreground text
    pub text: Color,
    /// Secondary/hint text (footers, instructions)
    pub text_dim: Color,

    // Borders
    pub border: Color,
    /// Informational border (help)
    pub border_accent: Color,
    /// Win overlay border
    pub border_win: Color,

    // Semantic colors
    pub accent: Color,
    pub good: Color,
    pub bad: Color,

    // Map
    pub map_player: Color,
    pub map_start: Color,
    pub map_exit: Color,
    pub map_item: Color,
    pub map_flash: Color,
    /// Walls by band, faint to bright
    pub map_wall: [Color; 4],
    /// Floor by band, faint to bright
    pub map_floor: [Color; 4],
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::White,
            border_accent: Color::Cyan,
            border_win: Color::Yellow,
            accent: Color::Cyan,
            good: Color::Green,
            bad: Color::Red,
            map_player: Color::LightGreen,
            map_start: Color::Magenta,
            map_exit: Color::LightCyan,
            map_item: Color::Yellow,
            map_flash: Color::LightYellow,
            map_wall: [Color::Black, Color::DarkGray, Color::Gray, Color::White],
            map_floor: [Color::Black, Color::DarkGray, Color::DarkGray, Color::Gray],
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            border: Color::DarkGray,
            border_accent: Color::Blue,
            border_win: Color::Magenta,
            accent: Color::Blue,
            good: Color::Green,
            bad: Color::Red,
            map_player: Color::Green,
            map_start: Color::Magenta,
            map_exit: Color::Blue,
            map_item: Color::Yellow,
            map_flash: Color::Red,
            map_wall: [Color::White, Color::Gray, Color::DarkGray, Color::Black],
            map_floor: [Color::White, Color::Gray, Color::Gray, Color::DarkGray],
        }
    }

    /// Auto-detect terminal background and return appropriate theme.
    /// Checks COLORFGBG env var and LUM_LIGHT_BG override.
    pub fn detect() -> Self {
        if Self::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Wall color for a band; `None` when the cell should not be drawn
    pub fn wall(&self, band: LightBand) -> Option<Color> {
        Self::band_color(&self.map_wall, band)
    }

    /// Floor color for a band; `None` when the cell should not be drawn
    pub fn floor(&self, band: LightBand) -> Option<Color> {
        Self::band_color(&self.map_floor, band)
    }

    fn band_color(colors: &[Color; 4], band: LightBand) -> Option<Color> {
        match band {
            LightBand::Dark => None,
            LightBand::Faint => Some(colors[0]),
            LightBand::Dim => Some(colors[1]),
            LightBand::Lit => Some(colors[2]),
            LightBand::Bright => Some(colors[3]),
        }
    }

    fn is_light_background() -> bool {
        if let Ok(val) = std::env::var("LUM_LIGHT_BG") {
            return val == "1" || val.eq_ignore_ascii_case("true");
        }

        // COLORFGBG is "fg;bg" with color indices (0-15); bright backgrounds
        // are 7 and 9..=15
        if let Ok(colorfgbg) = std::env::var("COLORFGBG")
            && let Some(bg_str) = colorfgbg.rsplit(';').next()
            && let Ok(bg_idx) = bg_str.parse::<u8>()
        {
            return matches!(bg_idx, 7 | 9..=15);
        }

        false
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
