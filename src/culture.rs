//! Response culture derived from a negotiated language.

use crate::Language;

/// Default regional culture for neutral language names.
const SPECIFIC_CULTURES: &[(&str, &str)] = &[
    ("ar", "ar-SA"),
    ("cs", "cs-CZ"),
    ("da", "da-DK"),
    ("de", "de-DE"),
    ("el", "el-GR"),
    ("en", "en-US"),
    ("es", "es-ES"),
    ("fi", "fi-FI"),
    ("fr", "fr-FR"),
    ("he", "he-IL"),
    ("hu", "hu-HU"),
    ("it", "it-IT"),
    ("ja", "ja-JP"),
    ("ko", "ko-KR"),
    ("nb", "nb-NO"),
    ("nl", "nl-NL"),
    ("pl", "pl-PL"),
    ("pt", "pt-BR"),
    ("ru", "ru-RU"),
    ("sv", "sv-SE"),
    ("tr", "tr-TR"),
    ("uk", "uk-UA"),
    ("zh", "zh-CN"),
];

/// Formatting and UI culture applied to a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Culture {
    /// Culture used to pick UI resources; the language name as negotiated.
    pub ui: String,
    /// Regional culture used for number and date formatting.
    pub specific: String,
}

impl Culture {
    /// Derives the culture pair for `language`.
    ///
    /// A name that already has a region (`fr-CA`) is its own specific
    /// culture. A neutral name (`fr`) maps to its default region, or stays
    /// neutral when no default is known.
    ///
    /// ```
    /// use splash_router::{Culture, Language};
    ///
    /// let culture = Culture::for_language(&Language::new("fr"));
    /// assert_eq!(culture.ui, "fr");
    /// assert_eq!(culture.specific, "fr-FR");
    /// ```
    pub fn for_language(language: &Language) -> Self {
        let name = language.name();
        let specific = if name.contains(['-', '_']) {
            name.replace('_', "-")
        } else {
            SPECIFIC_CULTURES
                .iter()
                .find(|(neutral, _)| neutral.eq_ignore_ascii_case(name))
                .map_or_else(|| name.to_string(), |(_, specific)| specific.to_string())
        };
        Self {
            ui: name.to_string(),
            specific,
        }
    }
}
