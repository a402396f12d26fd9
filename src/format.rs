// SPDX-License-Identifier: PMPL-1.0-or-later

//! Positional placeholder substitution (`%1`, `%2`, … `%99`).
//!
//! `%L1` (locale-aware number) is accepted as a spelling of `%1`. A
//! placeholder without a matching argument stays in the output verbatim, so
//! a short argument list degrades the text instead of failing.

use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"%(L?)([1-9][0-9]?)").expect("placeholder pattern compiles"))
}

fn placeholder_number(caps: &Captures<'_>) -> usize {
    // At most two ASCII digits, so parsing cannot overflow.
    caps[2].parse().unwrap_or(0)
}

/// Substitute `%N` with `args[N - 1]`.
///
/// Substitution is a single pass: an argument that itself contains `%2` is
/// inserted literally.
///
/// ```
/// use tscat::format::format;
/// assert_eq!(format("Versão %1", &["2.0"]), "Versão 2.0");
/// assert_eq!(format::<&str>("Erro: %1", &[]), "Erro: %1");
/// ```
pub fn format<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &Captures<'_>| {
            match placeholder_number(caps)
                .checked_sub(1)
                .and_then(|index| args.get(index))
            {
                Some(arg) => arg.as_ref().to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Placeholder numbers referenced by `text`, ignoring `%n`.
pub fn placeholders(text: &str) -> BTreeSet<usize> {
    placeholder_pattern()
        .captures_iter(text)
        .map(|caps| placeholder_number(&caps))
        .collect()
}

/// Replace the plural count marker `%n` (or `%Ln`) with `n`.
pub fn substitute_count(text: &str, n: i64) -> String {
    let count = n.to_string();
    text.replace("%Ln", &count).replace("%n", &count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_in_order() {
        assert_eq!(format("Versão %1", &["2.0"]), "Versão 2.0");
        assert_eq!(
            format("Erro de rede: %1 para %2", &["timeout", "video.mp4"]),
            "Erro de rede: timeout para video.mp4"
        );
    }

    #[test]
    fn missing_argument_leaves_placeholder() {
        assert_eq!(format::<&str>("Erro: %1", &[]), "Erro: %1");
        assert_eq!(format("%1 and %2", &["a"]), "a and %2");
    }

    #[test]
    fn placeholders_may_repeat_and_reorder() {
        assert_eq!(format("%2 before %1, again %2", &["x", "y"]), "y before x, again y");
    }

    #[test]
    fn argument_text_is_not_reexpanded() {
        assert_eq!(format("%1 %2", &["%2", "b"]), "%2 b");
    }

    #[test]
    fn localized_number_marker() {
        assert_eq!(format("%L1 items", &["1,000"]), "1,000 items");
    }

    #[test]
    fn non_placeholders_are_untouched() {
        assert_eq!(format("100% sure, %0 and %n", &["x"]), "100% sure, %0 and %n");
    }

    #[test]
    fn two_digit_placeholders() {
        let args: Vec<String> = (1..=10).map(|i| format!("a{}", i)).collect();
        assert_eq!(format("%10 %1", &args), "a10 a1");
    }

    #[test]
    fn owned_arguments_work() {
        let args = vec![String::from("Minitube")];
        assert_eq!(format("Sobre o %1", &args), "Sobre o Minitube");
    }

    #[test]
    fn collects_placeholder_numbers() {
        let found = placeholders("&lt;a href='%1'&gt;%2&lt;/a&gt; %1 %n");
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn count_substitution() {
        assert_eq!(substitute_count("%n vídeos", 3), "3 vídeos");
        assert_eq!(substitute_count("%Ln files", 2), "2 files");
    }
}
