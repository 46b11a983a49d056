//! Language code handling for catalog files.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

/// ISO 639-1 primary language subtags.
const PRIMARY_SUBTAGS: &str = "\
    aa ab af ak am an ar as av ay az ba be bg bi bm bn bo br bs ca ce ch co cr cs cu cv cy \
    da de dv dz ee el en eo es et eu fa ff fi fj fo fr fy ga gd gl gn gu gv ha he hi ho hr \
    ht hu hy hz ia id ie ig ii ik io is it iu ja jv ka kg ki kj kk kl km kn ko kr ks ku kv \
    kw ky la lb lg li ln lo lt lu lv mg mh mi mk ml mn mr ms mt my na nb nd ne ng nl nn no \
    nr nv ny oc oj om or os pa pi pl ps pt qu rm rn ro ru rw sa sc sd se sg si sk sl sm sn \
    so sq sr ss st su sv sw ta te tg th ti tk tl tn to tr ts tt tw ty ug uk ur uz ve vi vo \
    wa wo xh yi yo za zh zu";

/// Lookup set over [`PRIMARY_SUBTAGS`].
static LANGUAGE_SUBTAGS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| PRIMARY_SUBTAGS.split_whitespace().collect());

/// Normalize language code (`pt-br` and `pt_BR` both become `pt_BR`).
#[must_use]
pub fn normalize_language_code(code: &str) -> String {
    let mut parts = code.split(['-', '_']);
    let primary = parts.next().unwrap_or_default().to_lowercase();
    let rest: Vec<String> = parts
        .map(|part| if part.len() == 2 { part.to_uppercase() } else { part.to_string() })
        .collect();

    if rest.is_empty() { primary } else { format!("{primary}_{}", rest.join("_")) }
}

/// Returns the primary subtag (`uk_UA` → `uk`).
#[must_use]
pub fn primary_subtag(code: &str) -> &str {
    code.split(['-', '_']).next().unwrap_or(code)
}

/// Returns true if `code` looks like `ll`, `ll_RR` or `ll-RR` with a known primary subtag.
#[must_use]
pub fn is_language_code(code: &str) -> bool {
    let mut parts = code.split(['-', '_']);
    let Some(primary) = parts.next() else {
        return false;
    };
    if primary.len() != 2 || !LANGUAGE_SUBTAGS.contains(primary.to_lowercase().as_str()) {
        return false;
    }

    match (parts.next(), parts.next()) {
        (None, _) => true,
        (Some(region), None) => {
            (region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()))
                || (region.len() == 3 && region.chars().all(|c| c.is_ascii_digit()))
        }
        _ => false,
    }
}

/// Candidate language codes inside one path component.
///
/// `hydrogen_pt_BR` yields `hydrogen_pt_BR`, `pt_BR`, `BR`.
fn candidates(part: &str) -> Vec<&str> {
    let mut result = vec![part];
    let separators: Vec<usize> =
        part.char_indices().filter(|(_, c)| *c == '_' || *c == '-').map(|(i, _)| i).collect();
    for window in separators.iter().rev().take(2).rev() {
        if let Some(tail) = part.get(window + 1..) {
            result.push(tail);
        }
    }
    result
}

/// Detect language from file path heuristically.
///
/// Splits the path by '/' and '.', then searches backwards for a part
/// that is, or ends with, a language code.
///
/// # Examples
/// - `i18n/uk.json` → `uk`
/// - `i18n/hydrogen_pt_BR.json` → `pt_BR`
/// - `translations/de_DE/app.json` → `de_DE`
///
/// # Returns
/// Detected language code or "unknown"
#[must_use]
pub fn detect_language_from_path(file_path: &Path) -> String {
    let path_str = file_path.to_string_lossy();
    let parts: Vec<&str> = path_str.split(['/', '\\', '.']).collect();

    for part in parts.iter().rev() {
        if let Some(code) = candidates(part).into_iter().find(|c| is_language_code(c)) {
            return code.to_string();
        }
    }

    "unknown".to_string()
}
