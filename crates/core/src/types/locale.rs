//! Supported storefront locales.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// A UI locale.
///
/// English is the base language: every bilingual value carries an `en`
/// string, and Indonesian falls back to it when missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Id,
}

impl Locale {
    /// All supported locales, base language first.
    pub const ALL: [Self; 2] = [Self::En, Self::Id];

    /// The BCP 47 language tag for this locale.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Id => "id",
        }
    }

    /// Parse a locale tag, falling back to the base language.
    ///
    /// Region subtags are ignored (`id-ID` is Indonesian).
    #[must_use]
    pub fn parse_or_default(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let language = s.trim().split(['-', '_']).next().unwrap_or_default();
        match language.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "id" => Ok(Self::Id),
            _ => Err(format!("unsupported locale: {s}")),
        }
    }
}
