//! Plural form selection for numerus messages.

use crate::input::language::{
    normalize_language_code,
    primary_subtag,
};

/// How a language picks between the plural forms of a numerus message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PluralRule {
    /// No grammatical number (Japanese, Chinese, ...).
    Single,
    /// `1` vs everything else.
    #[default]
    OneOther,
    /// `0` and `1` vs everything else (French, Brazilian Portuguese).
    ZeroOneOther,
    /// Russian, Ukrainian, Belarusian, Serbian, Croatian, Bosnian.
    EastSlavic,
    /// Czech and Slovak.
    CzechSlovak,
    Polish,
}

impl PluralRule {
    /// Returns the rule of a language code; unknown languages use [`PluralRule::OneOther`].
    #[must_use]
    pub fn for_language(code: &str) -> Self {
        if normalize_language_code(code) == "pt_BR" {
            return Self::ZeroOneOther;
        }

        match primary_subtag(code).to_lowercase().as_str() {
            "ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" => Self::Single,
            "fr" => Self::ZeroOneOther,
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => Self::EastSlavic,
            "cs" | "sk" => Self::CzechSlovak,
            "pl" => Self::Polish,
            _ => Self::OneOther,
        }
    }

    /// Number of plural forms a numerus translation should carry.
    #[must_use]
    pub const fn form_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::OneOther | Self::ZeroOneOther => 2,
            Self::EastSlavic | Self::CzechSlovak | Self::Polish => 3,
        }
    }

    /// Index of the form to use for `n`. The sign of `n` is ignored.
    #[must_use]
    pub const fn form_index(self, n: i64) -> usize {
        let n = n.unsigned_abs();
        let (last, last_two) = (n % 10, n % 100);
        let teen = last_two >= 12 && last_two <= 14;

        match self {
            Self::Single => 0,
            Self::OneOther => {
                if n == 1 { 0 } else { 1 }
            }
            Self::ZeroOneOther => {
                if n > 1 { 1 } else { 0 }
            }
            Self::EastSlavic => {
                if last == 1 && last_two != 11 {
                    0
                } else if last >= 2 && last <= 4 && !teen {
                    1
                } else {
                    2
                }
            }
            Self::CzechSlovak => {
                if n == 1 {
                    0
                } else if n >= 2 && n <= 4 {
                    1
                } else {
                    2
                }
            }
            Self::Polish => {
                if n == 1 {
                    0
                } else if last >= 2 && last <= 4 && !teen {
                    1
                } else {
                    2
                }
            }
        }
    }
}
