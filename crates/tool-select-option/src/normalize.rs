use unicode_normalization::UnicodeNormalization;

/// Comparison form of option labels and clipboard input: compatibility
/// composed, lower-cased, whitespace runs (NBSP included) collapsed to one
/// space and trimmed.
///
/// Compatibility folding runs both before and after lower-casing so the
/// result is a fixed point: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    let folded: String = raw.nfkc().collect::<String>().to_lowercase().nfkc().collect();
    let mut out = String::with_capacity(folded.len());
    for word in folded.split(is_space).filter(|word| !word.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

fn is_space(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{feff}'
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn collapses_whitespace_and_nbsp() {
        assert_eq!(normalize("  New\u{a0}\u{a0}York \t"), "new york");
        assert_eq!(normalize("a\u{3000}b"), "a b");
    }

    #[test]
    fn folds_width_and_case() {
        assert_eq!(normalize("ＡＢＣ１２３"), "abc123");
        assert_eq!(normalize("ｶﾀｶﾅ"), "カタカナ");
        assert_eq!(normalize("Ⅻ"), "xii");
    }

    #[test]
    fn blank_input_normalizes_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \u{a0} "), "");
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(raw in "[a-zA-Z0-9 \t\u{a0}\u{3000}ＡＢｶﾀ①Ⅻé\u{301}]{0,24}") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
