//! Glyph system for TUI rendering
//!
//! Provides support for both classic ASCII and fancy Unicode glyphs.

use lum_core::CellKind;
use strum::{Display, EnumString, VariantNames};

/// Available graphics modes for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames, Default)]
#[strum(serialize_all = "lowercase")]
pub enum GraphicsMode {
    /// Classic ASCII characters.
    Classic,
    /// Unicode block and shape characters.
    Fancy,
    /// Automatically detect support.
    #[default]
    Auto,
}

/// Set of glyphs used for rendering the maze.
pub trait GlyphSet: Send + Sync {
    /// Character for a maze cell.
    fn cell_char(&self, kind: CellKind) -> char;

    /// Character for the player.
    fn player_char(&self) -> char {
        '@'
    }

    /// Character drawn where an item was just picked up.
    fn flash_char(&self) -> char;
}

/// Plain ASCII glyph set.
pub struct ClassicGlyphs;

impl GlyphSet for ClassicGlyphs {
    fn cell_char(&self, kind: CellKind) -> char {
        kind.symbol()
    }

    fn flash_char(&self) -> char {
        '+'
    }
}

/// Unicode glyph set.
pub struct FancyGlyphs;

impl GlyphSet for FancyGlyphs {
    fn cell_char(&self, kind: CellKind) -> char {
        match kind {
            CellKind::Wall => '█',
            CellKind::Path => '·',
            CellKind::Start => '◇',
            CellKind::Exit => '▣',
            CellKind::Item => '◆',
        }
    }

    fn player_char(&self) -> char {
        '☺'
    }

    fn flash_char(&self) -> char {
        '✦'
    }
}

/// Detect if the terminal supports Unicode/UTF-8.
pub fn supports_unicode() -> bool {
    for var in ["LC_ALL", "LC_CTYPE", "LANG"] {
        if let Ok(val) = std::env::var(var) {
            let val = val.to_uppercase();
            if val.contains("UTF-8") || val.contains("UTF8") {
                return true;
            }
        }
    }

    if let Ok(term) = std::env::var("TERM") {
        return matches!(
            term.as_str(),
            "xterm-256color" | "alacritty" | "xterm-kitty" | "wezterm"
        );
    }

    false
}

/// Returns the best available glyph set for the current environment.
pub fn detect_glyph_set(mode: GraphicsMode) -> Box<dyn GlyphSet> {
    match mode {
        GraphicsMode::Classic => Box::new(ClassicGlyphs),
        GraphicsMode::Fancy => Box::new(FancyGlyphs),
        GraphicsMode::Auto => {
            if supports_unicode() {
                Box::new(FancyGlyphs)
            } else {
                Box::new(ClassicGlyphs)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_graphics_mode_parse() {
        assert_eq!(GraphicsMode::from_str("fancy"), Ok(GraphicsMode::Fancy));
        assert_eq!(GraphicsMode::from_str("classic"), Ok(GraphicsMode::Classic));
        assert!(GraphicsMode::from_str("sparkly").is_err());
        assert_eq!(GraphicsMode::VARIANTS, &["classic", "fancy", "auto"]);
    }

    #[test]
    fn test_classic_matches_ascii_dump() {
        for kind in CellKind::iter() {
            assert_eq!(ClassicGlyphs.cell_char(kind), kind.symbol());
        }
        assert_eq!(ClassicGlyphs.player_char(), '@');
    }

    #[test]
    fn test_fancy_glyphs_are_distinct() {
        let mut chars: Vec<char> = CellKind::iter().map(|k| FancyGlyphs.cell_char(k)).collect();
        chars.push(FancyGlyphs.player_char());
        let total = chars.len();
        chars.sort_unstable();
        chars.dedup();
        assert_eq!(chars.len(), total);
    }

    #[test]
    fn test_forced_modes() {
        assert_eq!(detect_glyph_set(GraphicsMode::Classic).cell_char(CellKind::Wall), '#');
        assert_eq!(detect_glyph_set(GraphicsMode::Fancy).cell_char(CellKind::Wall), '█');
    }
}
