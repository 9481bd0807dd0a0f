//! Supported catalog locales.

use super::ParseLocaleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Locale a catalog can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// English.
    En,
    /// Turkish.
    Tr,
    /// Arabic.
    Ar,
    /// German.
    De,
}

/// Writing direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextDirection {
    /// Left to right.
    Ltr,
    /// Right to left.
    Rtl,
}

impl Locale {
    /// Every locale the engine can serve.
    pub const SUPPORTED: [Self; 4] = [Self::En, Self::Tr, Self::Ar, Self::De];

    /// Locales offered in language pickers.
    pub const VISIBLE: [Self; 3] = [Self::En, Self::Tr, Self::Ar];

    /// Returns the canonical locale code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Tr => "tr",
            Self::Ar => "ar",
            Self::De => "de",
        }
    }

    /// Returns the writing direction of the locale.
    #[must_use]
    pub const fn direction(self) -> TextDirection {
        match self {
            Self::Ar => TextDirection::Rtl,
            Self::En | Self::Tr | Self::De => TextDirection::Ltr,
        }
    }

    /// Returns whether the locale is offered in language pickers.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::De)
    }

    /// Maps a loosely formatted locale tag onto a supported locale.
    ///
    /// Region suffixes and three-letter codes are accepted (`tr-TR`, `tur`,
    /// `ger`). Absent or unrecognised input falls back to English.
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(value) = raw else {
            return Self::En;
        };
        let lowered = value.trim().to_ascii_lowercase();
        let language = lowered.split(['-', '_']).next().unwrap_or_default();
        match language {
            "tr" | "tur" => Self::Tr,
            "ar" | "ara" => Self::Ar,
            "de" | "deu" | "ger" => Self::De,
            _ => Self::En,
        }
    }
}

impl TryFrom<&str> for Locale {
    type Error = ParseLocaleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "tr" => Ok(Self::Tr),
            "ar" => Ok(Self::Ar),
            "de" => Ok(Self::De),
            _ => Err(ParseLocaleError(value.to_owned())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
