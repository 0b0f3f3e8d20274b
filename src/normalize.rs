use std::borrow::Borrow;
use std::fmt;

/// Canonical form of a unit or category name, used only as a lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NormalizedKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<NormalizedKey> for String {
    fn from(key: NormalizedKey) -> Self {
        key.0
    }
}

/// Trim, collapse internal whitespace runs to a single space, and lower-case
/// the ASCII range. Non-ASCII characters pass through untouched.
pub fn normalize(raw: &str) -> NormalizedKey {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out.make_ascii_lowercase();
    NormalizedKey(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_string() {
        let key = normalize("UGly  string WITH odd capitalIZATION");
        assert_eq!(key.as_str(), "ugly string with odd capitalization");
    }

    #[test]
    fn test_trims_and_collapses() {
        assert_eq!(normalize("  Square \t  Meter\n").as_str(), "square meter");
        assert_eq!(normalize("m^2").as_str(), "m^2");
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(normalize("").is_empty());
        assert!(normalize(" \t\n ").is_empty());
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "   ",
            "Nautical   Mile",
            "specific gravity (15°C)",
            "ÄRGER  Über",
            "gallon (UK)",
            "\u{00a0}nbsp\u{00a0}",
        ];
        for s in samples {
            let once = normalize(s);
            let twice = normalize(once.as_str());
            assert_eq!(once, twice, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_non_ascii_left_alone() {
        // only the ASCII range is folded
        assert_eq!(normalize("ÄB").as_str(), "Äb");
    }
}
