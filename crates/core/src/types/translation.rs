//! Bilingual content values and locale fallback.
//!
//! Catalog content (product names, blog titles, promo copy) is stored either
//! as a legacy plain string or as an object with an English value and an
//! optional Indonesian one:
//!
//! ```json
//! "Aviator Classic"
//! { "en": "Aviator Classic", "id": "Aviator Klasik" }
//! ```
//!
//! Resolution never fails. A missing or blank Indonesian value falls back to
//! English, and absent content resolves to the empty string. Stored objects
//! missing `en` are still read so their Indonesian text is not lost;
//! [`is_valid_translation`] is the strict shape check.

use serde::{Deserialize, Serialize};

use super::locale::Locale;

/// A display string that may carry translations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Translation {
    /// Single-language value from before content was localized.
    Legacy(String),
    /// Bilingual value.
    Localized(LocalizedText),
}

/// The object form of a [`Translation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct LocalizedText {
    /// English text (base language). Well-formed values always carry it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    /// Indonesian text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl LocalizedText {
    fn get(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::En => self.en.as_deref(),
            Locale::Id => self.id.as_deref(),
        }
    }
}

impl Translation {
    /// Resolve this value for `locale`. See [`resolve`].
    #[must_use]
    pub fn resolve(&self, locale: Locale) -> &str {
        resolve(Some(self), locale)
    }
}

impl From<&str> for Translation {
    fn from(text: &str) -> Self {
        Self::Legacy(text.to_owned())
    }
}

impl From<LocalizedText> for Translation {
    fn from(text: LocalizedText) -> Self {
        Self::Localized(text)
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Resolve the display string for `locale`.
///
/// - `None` resolves to `""`.
/// - Legacy strings are returned unchanged for every locale.
/// - Bilingual values return the Indonesian text when `locale` is
///   [`Locale::Id`] and that text is present and not blank; otherwise the
///   English text, or `""` when there is none.
#[must_use]
pub fn resolve(content: Option<&Translation>, locale: Locale) -> &str {
    match content {
        None => "",
        Some(Translation::Legacy(text)) => text.as_str(),
        Some(Translation::Localized(text)) => match (locale, text.id.as_deref()) {
            (Locale::Id, Some(id)) if !is_blank(id) => id,
            _ => text.en.as_deref().unwrap_or_default(),
        },
    }
}

/// Whether a non-blank value exists for `locale`.
///
/// Legacy strings only count as English content.
#[must_use]
pub fn has_translation(content: Option<&Translation>, locale: Locale) -> bool {
    match content {
        None => false,
        Some(Translation::Legacy(text)) => locale == Locale::En && !is_blank(text),
        Some(Translation::Localized(text)) => text.get(locale).is_some_and(|value| !is_blank(value)),
    }
}

/// Build a bilingual value from English `text`, keeping the Indonesian text
/// of `existing` when it has one.
///
/// Used to normalize legacy input into the object form before persisting.
#[must_use]
pub fn to_translation(text: Option<&str>, existing: Option<&Translation>) -> Translation {
    let id = match existing {
        Some(Translation::Localized(existing)) => existing.id.clone().unwrap_or_default(),
        Some(Translation::Legacy(_)) | None => String::new(),
    };

    Translation::Localized(LocalizedText {
        en: Some(text.unwrap_or_default().to_owned()),
        id: Some(id),
    })
}

/// Whether an untrusted JSON value has the bilingual object shape.
///
/// True iff `value` is an object whose `en` is a string and whose `id`, when
/// present, is also a string.
#[must_use]
pub fn is_valid_translation(value: &serde_json::Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };

    let en_ok = object.get("en").is_some_and(serde_json::Value::is_string);
    let id_ok = object.get("id").is_none_or(serde_json::Value::is_string);

    en_ok && id_ok
}
