//! Label normalisation used by the resolver.

use std::sync::OnceLock;

use regex::Regex;

fn non_alnum_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap())
}

fn word_separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[_\-\s]+").unwrap())
}

/// Alias-table form of a label: trimmed, lowercased, every run of characters
/// outside `[a-z0-9]` collapsed to one `_`, no leading or trailing `_`.
///
/// `"  Black-Sigatoka!! "` → `"black_sigatoka"`
pub fn alias_key(label: &str) -> String {
    let lowered = label.trim().to_lowercase();
    non_alnum_runs()
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

/// Rebuild a label as space-separated title-cased words.
///
/// Empty tokens from leading or trailing separators are dropped, so
/// `"-banana leaf spot-"` becomes `"Banana Leaf Spot"` with no padding
/// spaces. The mobile client kept those spaces and missed such labels.
///
/// `"fusarium_WILT"` → `"Fusarium Wilt"`
pub fn title_case(label: &str) -> String {
    word_separators()
        .split(label)
        .filter(|w| !w.is_empty())
        .map(capitalise)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
