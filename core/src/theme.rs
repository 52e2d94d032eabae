use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::*;

/// Ordered symbol set a renderer draws from. The engine stores only indices
/// into it, so the same session can be skinned by any theme of equal size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    id: String,
    symbols: Vec<String>,
}

impl Theme {
    pub fn new(
        id: impl Into<String>,
        symbols: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn symbol(&self, symbol: SymbolId) -> Option<&str> {
        self.symbols.get(usize::from(symbol)).map(String::as_str)
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }
}

/// Explicit mapping from theme id to symbol set, passed into session
/// creation. There is deliberately no ambient global table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeRegistry {
    themes: HashMap<String, Theme>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the stock client themes, 8 symbols each.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Theme::new(
            "hearts",
            ["💘", "💝", "💖", "💗", "💓", "💞", "💕", "❣️"],
        ));
        registry.register(Theme::new(
            "flowers",
            ["🌷", "🌹", "🌻", "🌸", "🌺", "🌼", "💐", "🍀"],
        ));
        registry.register(Theme::new(
            "sweets",
            ["🍩", "🍪", "🧁", "🍬", "🍭", "🍫", "🍰", "🍓"],
        ));
        registry
    }

    pub fn register(&mut self, theme: Theme) {
        self.themes.insert(theme.id.clone(), theme);
    }

    pub fn get(&self, id: &str) -> Option<&Theme> {
        self.themes.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_themes_cover_the_largest_alphabet() {
        let registry = ThemeRegistry::builtin();

        for id in ["hearts", "flowers", "sweets"] {
            let theme = registry.get(id).unwrap();
            assert!(theme.symbol_count() >= usize::from(MAX_ALPHABET_SIZE));
        }
    }

    #[test]
    fn unknown_theme_is_none() {
        assert!(ThemeRegistry::builtin().get("barbed-wire").is_none());
    }

    #[test]
    fn symbols_are_indexed_in_order() {
        let theme = Theme::new("test", ["a", "b", "c"]);

        assert_eq!(theme.symbol(0), Some("a"));
        assert_eq!(theme.symbol(2), Some("c"));
        assert_eq!(theme.symbol(3), None);
    }

    #[test]
    fn registered_theme_replaces_same_id() {
        let mut registry = ThemeRegistry::new();
        registry.register(Theme::new("custom", ["x", "y", "z"]));
        registry.register(Theme::new("custom", ["q", "r", "s"]));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("custom").unwrap().symbol(0), Some("q"));
    }

    #[test]
    fn settings_validation_consults_the_registry() {
        let registry = ThemeRegistry::builtin();

        assert!(GameSettings::new(8, 5, "hearts").validate(&registry).is_ok());
        assert_eq!(
            GameSettings::new(8, 5, "nope").validate(&registry).unwrap_err(),
            GameError::UnknownTheme
        );
        assert_eq!(
            GameSettings::new(5, 5, "hearts")
                .validate(&registry)
                .unwrap_err(),
            GameError::GridSizeOutOfRange
        );
        assert_eq!(
            GameSettings::new(8, 2, "hearts")
                .validate(&registry)
                .unwrap_err(),
            GameError::AlphabetOutOfRange
        );

        let mut tiny = ThemeRegistry::new();
        tiny.register(Theme::new("trio", ["a", "b", "c"]));
        assert_eq!(
            GameSettings::new(8, 4, "trio").validate(&tiny).unwrap_err(),
            GameError::ThemeTooSmall
        );
        assert!(GameSettings::new(8, 3, "trio").validate(&tiny).is_ok());
    }
}
