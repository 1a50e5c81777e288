//! Light/dark theme preference.

use contable_core::KeyValueStore;

/// Storage key of the theme preference.
pub const THEME_KEY: &str = "theme";

/// Colour scheme of the console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Returns the persisted name of the theme.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a persisted value. Anything but `dark` is light.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == "dark" { Self::Dark } else { Self::Light }
    }

    /// Returns the other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Reads the saved preference, defaulting to light.
    pub fn load(storage: &dyn KeyValueStore) -> Self {
        match storage.get(THEME_KEY) {
            Ok(value) => value.as_deref().map(Self::parse).unwrap_or_default(),
            Err(e) => {
                tracing::debug!(error = %e, "failed to read theme preference");
                Self::default()
            }
        }
    }

    /// Saves the preference.
    pub fn save(self, storage: &dyn KeyValueStore) {
        if let Err(e) = storage.set(THEME_KEY, self.as_str()) {
            tracing::warn!(error = %e, theme = self.as_str(), "failed to save theme preference");
        }
    }

    /// Applies the theme to the document root: `dark` class and
    /// `data-theme` attribute.
    pub fn apply(self) {
        #[cfg(feature = "hydrate")]
        {
            let Some(root) = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.document_element())
            else {
                return;
            };
            let _ = root
                .class_list()
                .toggle_with_force("dark", self == Self::Dark);
            let _ = root.set_attribute("data-theme", self.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contable_core::MemoryStore;

    #[test]
    fn parse_and_toggle() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("light"), Theme::Light);
        assert_eq!(Theme::parse("sepia"), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().as_str(), "light");
    }

    #[test]
    fn preference_persists() {
        let storage = MemoryStore::new();
        assert_eq!(Theme::load(&storage), Theme::Light);

        Theme::Dark.save(&storage);
        assert_eq!(storage.get(THEME_KEY).expect("read").as_deref(), Some("dark"));
        assert_eq!(Theme::load(&storage), Theme::Dark);
    }
}
