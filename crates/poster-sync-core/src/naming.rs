/// Canonicalize a display name for matching.
///
/// Matching is case-insensitive: the name is lowercased and surrounding
/// whitespace is dropped. With `hyphens_as_spaces` set, any run of spaces
/// and/or hyphens collapses to a single space, so `"Foo-Bar"` and
/// `"foo   bar"` compare equal. Otherwise runs of whitespace collapse to one
/// space and runs of hyphens to one hyphen, independently, and the two stay
/// distinct.
///
/// The same function is applied to remote collection titles and to derived
/// file names, so matching is symmetric. Idempotent.
pub fn normalize_name(name: &str, hyphens_as_spaces: bool) -> String {
    let lowered = name.to_lowercase();
    let mut out = String::with_capacity(lowered.len());

    if hyphens_as_spaces {
        let mut in_separator = false;
        for ch in lowered.chars() {
            if ch.is_whitespace() || ch == '-' {
                if !in_separator {
                    out.push(' ');
                }
                in_separator = true;
            } else {
                out.push(ch);
                in_separator = false;
            }
        }
    } else {
        let mut previous: Option<char> = None;
        for ch in lowered.chars() {
            if ch.is_whitespace() {
                if previous != Some(' ') {
                    out.push(' ');
                }
                previous = Some(' ');
            } else if ch == '-' {
                if previous != Some('-') {
                    out.push('-');
                }
                previous = Some('-');
            } else {
                out.push(ch);
                previous = None;
            }
        }
    }

    // Trim after collapsing so a trailing separator cannot leave a dangling
    // space, keeping normalization idempotent.
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_with_hyphens_as_spaces() {
        assert_eq!(normalize_name("Foo-Bar", true), "foo bar");
        assert_eq!(normalize_name("Foo Bar", true), "foo bar");
        assert_eq!(normalize_name("foo   bar", true), "foo bar");
        assert_eq!(normalize_name("Foo - Bar", true), "foo bar");
        assert_eq!(normalize_name("  Foo--Bar  ", true), "foo bar");
    }

    #[test]
    fn test_normalization_without_hyphens_as_spaces() {
        assert_eq!(normalize_name("Foo-Bar", false), "foo-bar");
        assert_eq!(normalize_name("Foo  Bar", false), "foo bar");
        assert_eq!(normalize_name("Foo--Bar", false), "foo-bar");
        assert_ne!(
            normalize_name("Foo-Bar", false),
            normalize_name("Foo Bar", false)
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for raw in ["Foo-Bar", "  Mixed -  Separators--here ", "plain", "foo-"] {
            for hyphens in [true, false] {
                let once = normalize_name(raw, hyphens);
                let twice = normalize_name(&once, hyphens);
                assert_eq!(once, twice, "not idempotent for {raw:?}");
            }
        }
    }

    #[test]
    fn test_normalization_handles_empty_and_separator_only_input() {
        assert_eq!(normalize_name("", true), "");
        assert_eq!(normalize_name("   ", true), "");
        assert_eq!(normalize_name("---", true), "");
    }
}
