// SPDX-License-Identifier: PMPL-1.0-or-later

//! Plural-form selection for numerus messages.
//!
//! Each language family maps a count to the index of the `<numerusform>`
//! to show. The families follow the rules Qt Linguist applies when it
//! creates plural slots for a language.

/// How a language picks a plural form for a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralRule {
    /// One form for every count (Japanese, Chinese, Korean, …).
    Single,
    /// Singular only for exactly one (English, European Portuguese, …).
    NotOne,
    /// Singular for zero and one (French, Brazilian Portuguese).
    OverOne,
    /// One / few / many by the last digits (Russian, Ukrainian, …).
    EastSlavic,
    /// Like `EastSlavic` but singular only for exactly one.
    Polish,
    /// One / 2–4 / other (Czech, Slovak).
    Czech,
}

impl PluralRule {
    /// Rule for a language code such as `pt_PT`, `pt-BR` or `ru`.
    ///
    /// Unknown languages use [`PluralRule::NotOne`].
    pub fn for_language(code: &str) -> Self {
        let mut parts = code.split(|c| c == '_' || c == '-');
        let language = parts.next().unwrap_or("").to_ascii_lowercase();
        let territory = parts.next().map(str::to_ascii_uppercase);

        match (language.as_str(), territory.as_deref()) {
            ("pt", Some("BR")) | ("fr", _) => PluralRule::OverOne,
            ("ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms", _) => PluralRule::Single,
            ("ru" | "uk" | "be" | "sr" | "hr" | "bs", _) => PluralRule::EastSlavic,
            ("pl", _) => PluralRule::Polish,
            ("cs" | "sk", _) => PluralRule::Czech,
            _ => PluralRule::NotOne,
        }
    }

    /// Number of plural forms a complete translation carries.
    pub fn form_count(&self) -> usize {
        match self {
            PluralRule::Single => 1,
            PluralRule::NotOne | PluralRule::OverOne => 2,
            PluralRule::EastSlavic | PluralRule::Polish | PluralRule::Czech => 3,
        }
    }

    /// Index of the plural form for `n`.
    pub fn form_index(&self, n: i64) -> usize {
        let n = n.unsigned_abs();
        let (last, last_two) = (n % 10, n % 100);
        let few = (2..=4).contains(&last) && !(12..=14).contains(&last_two);
        match self {
            PluralRule::Single => 0,
            PluralRule::NotOne => usize::from(n != 1),
            PluralRule::OverOne => usize::from(n > 1),
            PluralRule::EastSlavic => {
                if last == 1 && last_two != 11 {
                    0
                } else if few {
                    1
                } else {
                    2
                }
            }
            PluralRule::Polish => {
                if n == 1 {
                    0
                } else if few {
                    1
                } else {
                    2
                }
            }
            PluralRule::Czech => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn european_and_brazilian_portuguese_differ() {
        let pt = PluralRule::for_language("pt_PT");
        let br = PluralRule::for_language("pt-BR");
        assert_eq!(pt, PluralRule::NotOne);
        assert_eq!(br, PluralRule::OverOne);
        assert_eq!(pt.form_index(0), 1);
        assert_eq!(br.form_index(0), 0);
        assert_eq!(pt.form_index(1), 0);
        assert_eq!(br.form_index(2), 1);
    }

    #[test]
    fn east_slavic_forms() {
        let ru = PluralRule::for_language("ru");
        assert_eq!(ru.form_index(1), 0);
        assert_eq!(ru.form_index(21), 0);
        assert_eq!(ru.form_index(11), 2);
        assert_eq!(ru.form_index(3), 1);
        assert_eq!(ru.form_index(13), 2);
        assert_eq!(ru.form_index(25), 2);
    }

    #[test]
    fn polish_and_czech() {
        let pl = PluralRule::for_language("pl");
        assert_eq!(pl.form_index(1), 0);
        assert_eq!(pl.form_index(21), 2);
        assert_eq!(pl.form_index(22), 1);
        let cs = PluralRule::for_language("cs_CZ");
        assert_eq!(cs.form_index(4), 1);
        assert_eq!(cs.form_index(22), 2);
    }

    #[test]
    fn single_form_languages() {
        let ja = PluralRule::for_language("ja");
        assert_eq!(ja.form_count(), 1);
        assert_eq!(ja.form_index(100), 0);
    }

    #[test]
    fn unknown_language_defaults() {
        assert_eq!(PluralRule::for_language(""), PluralRule::NotOne);
        assert_eq!(PluralRule::for_language("xx"), PluralRule::NotOne);
    }

    #[test]
    fn negative_counts_use_magnitude() {
        assert_eq!(PluralRule::NotOne.form_index(-1), 0);
    }
}
