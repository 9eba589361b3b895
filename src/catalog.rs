use std::collections::HashMap;

use iced::Color;

use crate::expand::ViewMode;

/// Which alphabet a symbol belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolCategory {
    /// Behavioral actions (post, reply, retweet...).
    Action,
    /// Syntactic content categories within a post.
    Content,
    /// Inter-action time-gap buckets.
    Pause,
}

/// Cells whose symbol is filtered out (or unknown) are painted with this.
pub const DISABLED_COLOR: Color = Color::WHITE;

const ACTION_PALETTE: &[(char, u32)] = &[
    ('p', 0x5fcecf),
    ('r', 0xea3323),
    ('T', 0x48752c),
    ('π', 0xea33f7),
    ('ρ', 0xf9da78),
];

const CONTENT_PALETTE: &[(char, u32)] = &[
    ('E', 0x5fcecf),
    ('H', 0xea3323),
    ('m', 0x84f460),
    ('U', 0xea33f7),
    ('t', 0xf9da78),
    ('q', 0x48752c),
];

// Blue-grey ramp, shortest gap lightest.
const PAUSE_PALETTE: &[(char, u32)] = &[
    ('□', 0xcbcadd),
    ('⚀', 0xa8a8bc),
    ('⚁', 0x87879b),
    ('⚂', 0x67687c),
    ('⚃', 0x484a5f),
    ('⚄', 0x2b2e42),
    ('⚅', 0x101528),
];

fn hex(rgb: u32) -> Color {
    Color::from_rgb8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Display color and category for one symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolStyle {
    pub symbol: char,
    pub color: Color,
    pub category: SymbolCategory,
}

/// Immutable symbol lookup built once at startup and passed around by reference.
///
/// Holds the static palette plus the human-readable definitions supplied by
/// the symbol-catalog collaborator.
#[derive(Debug, Clone)]
pub struct SymbolCatalog {
    styles: Vec<SymbolStyle>,
    definitions: HashMap<char, String>,
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SymbolCatalog {
    /// The built-in palette with no definitions attached.
    pub fn builtin() -> Self {
        let tables = [
            (SymbolCategory::Action, ACTION_PALETTE),
            (SymbolCategory::Content, CONTENT_PALETTE),
            (SymbolCategory::Pause, PAUSE_PALETTE),
        ];
        let styles = tables
            .iter()
            .flat_map(|&(category, table)| {
                table.iter().map(move |&(symbol, rgb)| SymbolStyle {
                    symbol,
                    color: hex(rgb),
                    category,
                })
            })
            .collect();
        Self {
            styles,
            definitions: HashMap::new(),
        }
    }

    pub fn with_definitions(mut self, definitions: HashMap<char, String>) -> Self {
        self.definitions = definitions;
        self
    }

    pub fn style(&self, symbol: char) -> Option<&SymbolStyle> {
        self.styles.iter().find(|s| s.symbol == symbol)
    }

    pub fn knows(&self, symbol: char) -> bool {
        self.style(symbol).is_some()
    }

    pub fn color(&self, symbol: char) -> Option<Color> {
        self.style(symbol).map(|s| s.color)
    }

    pub fn category(&self, symbol: char) -> Option<SymbolCategory> {
        self.style(symbol).map(|s| s.category)
    }

    pub fn is_pause(&self, symbol: char) -> bool {
        self.category(symbol) == Some(SymbolCategory::Pause)
    }

    /// Legend rows for a view mode: the mode's own alphabet in palette order,
    /// followed by the pauses.
    pub fn legend(&self, mode: ViewMode) -> impl Iterator<Item = &SymbolStyle> {
        let own = mode.category();
        self.styles
            .iter()
            .filter(move |s| s.category == own)
            .chain(
                self.styles
                    .iter()
                    .filter(|s| s.category == SymbolCategory::Pause),
            )
    }

    /// Every known symbol, in palette order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.styles.iter().map(|s| s.symbol)
    }

    /// Definition for a single symbol; empty when the catalog has none.
    pub fn definition(&self, symbol: char) -> &str {
        self.definitions
            .get(&symbol)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Definition for a run of symbols, one definition per character.
    pub fn describe_bloc(&self, bloc: &str) -> String {
        bloc.chars()
            .map(|c| self.definition(c))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_defs() -> SymbolCatalog {
        SymbolCatalog::builtin().with_definitions(HashMap::from([
            ('p', "post".to_string()),
            ('r', "reply".to_string()),
            ('□', "< 1 minute".to_string()),
        ]))
    }

    #[test]
    fn builtin_covers_every_palette() {
        let catalog = SymbolCatalog::builtin();
        assert_eq!(
            catalog.symbols().count(),
            ACTION_PALETTE.len() + CONTENT_PALETTE.len() + PAUSE_PALETTE.len()
        );
        assert_eq!(catalog.category('π'), Some(SymbolCategory::Action));
        assert_eq!(catalog.category('H'), Some(SymbolCategory::Content));
        assert_eq!(catalog.category('⚅'), Some(SymbolCategory::Pause));
        assert_eq!(catalog.category('Z'), None);
    }

    #[test]
    fn hex_colors_decode() {
        let catalog = SymbolCatalog::builtin();
        assert_eq!(catalog.color('r'), Some(Color::from_rgb8(0xea, 0x33, 0x23)));
        assert_eq!(catalog.color('⚅'), Some(Color::from_rgb8(0x10, 0x15, 0x28)));
    }

    #[test]
    fn legend_lists_mode_alphabet_then_pauses() {
        let catalog = SymbolCatalog::builtin();
        let action: String = catalog.legend(ViewMode::Action).map(|s| s.symbol).collect();
        assert_eq!(action, "prTπρ□⚀⚁⚂⚃⚄⚅");
        let content: String = catalog.legend(ViewMode::Content).map(|s| s.symbol).collect();
        assert_eq!(content, "EHmUtq□⚀⚁⚂⚃⚄⚅");
    }

    #[test]
    fn pause_detection() {
        let catalog = SymbolCatalog::builtin();
        assert!(catalog.is_pause('□'));
        assert!(!catalog.is_pause('p'));
        assert!(!catalog.is_pause('?'));
    }

    #[test]
    fn missing_definition_is_empty() {
        let catalog = with_defs();
        assert_eq!(catalog.definition('p'), "post");
        assert_eq!(catalog.definition('T'), "");
    }

    #[test]
    fn describe_bloc_joins_per_character() {
        let catalog = with_defs();
        assert_eq!(catalog.describe_bloc("pr"), "post, reply");
        assert_eq!(catalog.describe_bloc("pT"), "post, ");
        assert_eq!(catalog.describe_bloc(""), "");
    }
}
