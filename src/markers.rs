//! Markers embedded in UI strings.
//!
//! - `%1`..`%99` place markers filled by arguments, `%L1` is the localized variant
//! - `%n` (or `%Ln`) count marker of numerus messages
//! - `&` accelerators (`&&` is a literal ampersand)
//! - ending punctuation and surrounding whitespace

use std::collections::BTreeSet;
use std::fmt::Write;

/// A piece of a UI string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    /// Plain text between markers.
    Literal(&'a str),
    /// A numbered place marker and its raw text.
    Numbered(u8, &'a str),
    /// The count marker and its raw text.
    Count(&'a str),
}

/// Splits `text` into literals and `%` markers.
fn tokenize(text: &str) -> Vec<Token<'_>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes.get(i) != Some(&b'%') {
            i += 1;
            continue;
        }

        let mut body = i + 1;
        if bytes.get(body) == Some(&b'L') {
            body += 1;
        }

        let marker = if bytes.get(body) == Some(&b'n') {
            Some((None, body + 1))
        } else {
            let digits = bytes
                .get(body..)
                .unwrap_or_default()
                .iter()
                .take(2)
                .take_while(|b| b.is_ascii_digit())
                .count();
            text.get(body..body + digits)
                .and_then(|d| d.parse::<u8>().ok())
                .filter(|number| *number > 0)
                .map(|number| (Some(number), body + digits))
        };

        let Some((number, end)) = marker else {
            i += 1;
            continue;
        };

        if literal_start < i
            && let Some(literal) = text.get(literal_start..i)
        {
            tokens.push(Token::Literal(literal));
        }
        let raw = text.get(i..end).unwrap_or_default();
        tokens.push(number.map_or(Token::Count(raw), |n| Token::Numbered(n, raw)));
        literal_start = end;
        i = end;
    }

    if literal_start < text.len()
        && let Some(literal) = text.get(literal_start..)
    {
        tokens.push(Token::Literal(literal));
    }

    tokens
}

/// Place markers used by a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceMarkers {
    pub numbered: BTreeSet<u8>,
    pub has_count: bool,
}

#[must_use]
pub fn place_markers(text: &str) -> PlaceMarkers {
    let mut markers = PlaceMarkers::default();
    for token in tokenize(text) {
        match token {
            Token::Numbered(number, _) => {
                markers.numbered.insert(number);
            }
            Token::Count(_) => markers.has_count = true,
            Token::Literal(_) => {}
        }
    }
    markers
}

/// Replaces `%k` with the k-th argument (1-based). Markers without an argument are kept.
///
/// ```
/// use tr_catalog::markers::substitute;
///
/// assert_eq!(substitute("Export %1 to %2", &["song", "wav"]), "Export song to wav");
/// assert_eq!(substitute("%1 of %3", &["one"]), "one of %3");
/// ```
#[must_use]
pub fn substitute<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    let mut result = String::with_capacity(template.len());
    for token in tokenize(template) {
        match token {
            Token::Literal(text) | Token::Count(text) => result.push_str(text),
            Token::Numbered(number, raw) => {
                match args.get(usize::from(number) - 1) {
                    Some(arg) => result.push_str(arg.as_ref()),
                    None => result.push_str(raw),
                }
            }
        }
    }
    result
}

/// Replaces every count marker with `n`.
#[must_use]
pub fn replace_count(template: &str, n: i64) -> String {
    let mut result = String::with_capacity(template.len());
    for token in tokenize(template) {
        match token {
            Token::Literal(text) | Token::Numbered(_, text) => result.push_str(text),
            Token::Count(_) => {
                let _ = write!(result, "{n}");
            }
        }
    }
    result
}

/// Returns the accelerator character of a label (`&Open` → `O`).
#[must_use]
pub fn accelerator(text: &str) -> Option<char> {
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '&' {
            continue;
        }
        match chars.next() {
            Some('&') | None => {}
            Some(next) if next.is_whitespace() => {}
            Some(next) => return Some(next),
        }
    }
    None
}

/// Class of the punctuation ending a string. Full-width forms are equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punctuation {
    Period,
    Exclamation,
    Question,
    Colon,
    Ellipsis,
}

#[must_use]
pub fn ending_punctuation(text: &str) -> Option<Punctuation> {
    let trimmed = text.trim_end();
    if trimmed.ends_with("...") || trimmed.ends_with('…') {
        return Some(Punctuation::Ellipsis);
    }
    match trimmed.chars().next_back()? {
        '.' | '。' | '．' => Some(Punctuation::Period),
        '!' | '！' => Some(Punctuation::Exclamation),
        '?' | '？' => Some(Punctuation::Question),
        ':' | '：' => Some(Punctuation::Colon),
        _ => None,
    }
}

/// Returns the leading and trailing whitespace of a string.
#[must_use]
pub fn surrounding_whitespace(text: &str) -> (&str, &str) {
    let trimmed_start = text.trim_start();
    let leading = text.get(..text.len() - trimmed_start.len()).unwrap_or_default();
    if trimmed_start.is_empty() {
        return (leading, "");
    }
    let trailing = trimmed_start.get(trimmed_start.trim_end().len()..).unwrap_or_default();
    (leading, trailing)
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[googletest::test]
    fn test_place_markers() {
        let markers = place_markers("Loading %1 of %2 (%Ln files), %3%");

        expect_that!(markers.numbered.iter().copied().collect::<Vec<_>>(), eq(&vec![1_u8, 2, 3]));
        expect_that!(markers.has_count, eq(true));
    }

    #[rstest]
    #[case::percent_sign("100%", &[])]
    #[case::zero("%0", &[])]
    #[case::two_digits("%12", &[12])]
    #[case::three_digits_stop_after_two("%123", &[12])]
    #[case::localized("%L1", &[1])]
    #[case::adjacent("%1%2", &[1, 2])]
    fn test_place_markers_numbered(#[case] text: &str, #[case] expected: &[u8]) {
        let markers = place_markers(text);

        assert_that!(markers.numbered.iter().copied().collect::<Vec<_>>(), eq(expected));
    }

    #[rstest]
    #[case("Export %1 to %2", "Export song to wav")]
    #[case("%2 / %1", "wav / song")]
    #[case("%1 at 100%", "song at 100%")]
    #[case("%3 missing", "%3 missing")]
    #[case("%n item(s)", "%n item(s)")]
    fn test_substitute(#[case] template: &str, #[case] expected: &str) {
        assert_that!(substitute(template, &["song", "wav"]), eq(expected));
    }

    #[rstest]
    #[case("%n pattern(s)", 3, "3 pattern(s)")]
    #[case("%Ln notes, %n selected", 12, "12 notes, 12 selected")]
    #[case("%1 (%n)", -1, "%1 (-1)")]
    #[case("no count", 2, "no count")]
    fn test_replace_count(#[case] template: &str, #[case] n: i64, #[case] expected: &str) {
        assert_that!(replace_count(template, n), eq(expected));
    }

    #[rstest]
    #[case("&Open", Some('O'))]
    #[case("Sa&ve as...", Some('v'))]
    #[case("Rock && Roll", None)]
    #[case("Drag & drop", None)]
    #[case("Trailing &", None)]
    #[case("&&Literal &then", Some('t'))]
    #[case("Plain", None)]
    fn test_accelerator(#[case] text: &str, #[case] expected: Option<char>) {
        assert_that!(accelerator(text), eq(expected));
    }

    #[rstest]
    #[case("Save as...", Some(Punctuation::Ellipsis))]
    #[case("Зберегти як…", Some(Punctuation::Ellipsis))]
    #[case("Done.", Some(Punctuation::Period))]
    #[case("完了。", Some(Punctuation::Period))]
    #[case("Really quit? ", Some(Punctuation::Question))]
    #[case("Name：", Some(Punctuation::Colon))]
    #[case("Stop!", Some(Punctuation::Exclamation))]
    #[case("Mixer", None)]
    #[case("", None)]
    fn test_ending_punctuation(#[case] text: &str, #[case] expected: Option<Punctuation>) {
        assert_that!(ending_punctuation(text), eq(expected));
    }

    #[rstest]
    #[case("  Volume ", "  ", " ")]
    #[case("Volume", "", "")]
    #[case("\tPan\n", "\t", "\n")]
    #[case("   ", "   ", "")]
    fn test_surrounding_whitespace(
        #[case] text: &str,
        #[case] leading: &str,
        #[case] trailing: &str,
    ) {
        assert_that!(surrounding_whitespace(text), eq((leading, trailing)));
    }
}
