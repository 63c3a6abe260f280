//! Project name canonicalization.
//!
//! Memory items are partitioned by project, and clients send project labels
//! as free text ("My-Project_1", "my project 1", "MYPROJECT1" should all be
//! the same partition). [`normalize_project_name`] derives the comparable
//! key: lower-case, whitespace/hyphen/underscore runs removed, everything
//! outside `[a-z0-9]` stripped. An input that normalizes to nothing means
//! "no project" and comes back as `None`, never as an empty string.

/// Canonicalize a free-form project label into a partition key.
///
/// Deterministic, pure, and idempotent: feeding a normalized name back in
/// yields the same value. Two labels with equal normal forms MUST be treated
/// as the same partition by every caller.
///
/// ```
/// use namespace::normalize_project_name;
///
/// assert_eq!(
///     normalize_project_name(Some(" My-Project_1! ")),
///     Some("myproject1".to_string())
/// );
/// assert_eq!(normalize_project_name(Some("---")), None);
/// assert_eq!(normalize_project_name(None), None);
/// ```
pub fn normalize_project_name(input: Option<&str>) -> Option<String> {
    let raw = input?;

    // Lower-casing first so uppercase ASCII survives the `[a-z0-9]` filter.
    // Separator characters (whitespace, '-', '_') and any other symbol are
    // dropped outright, which collapses separator runs as a side effect.
    let normalized: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();

    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Whether two free-form labels land in the same partition.
pub fn same_partition(a: Option<&str>, b: Option<&str>) -> bool {
    normalize_project_name(a) == normalize_project_name(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_separators_and_punctuation() {
        assert_eq!(
            normalize_project_name(Some(" My-Project_1! ")),
            Some("myproject1".to_string())
        );
    }

    #[test]
    fn separator_only_input_is_absent() {
        assert_eq!(normalize_project_name(Some("---")), None);
        assert_eq!(normalize_project_name(Some("  \t ")), None);
        assert_eq!(normalize_project_name(Some("_-_ -")), None);
    }

    #[test]
    fn missing_input_is_absent() {
        assert_eq!(normalize_project_name(None), None);
        assert_eq!(normalize_project_name(Some("")), None);
    }

    #[test]
    fn idempotent_for_arbitrary_inputs() {
        let inputs = [
            "Hello World",
            "already-normal",
            "MiXeD_CaSe-42",
            "日本語 project",
            "  --spaced--  ",
            "a",
            "!!!",
        ];
        for input in inputs {
            let once = normalize_project_name(Some(input));
            let twice = normalize_project_name(once.as_deref());
            assert_eq!(once, twice, "normalization must be idempotent: {input:?}");
        }
    }

    #[test]
    fn never_yields_empty_string() {
        let inputs = ["", " ", "---", "___", "!@#$%", "é ü ß"];
        for input in inputs {
            match normalize_project_name(Some(input)) {
                None => {}
                Some(s) => {
                    assert!(!s.is_empty(), "{input:?} produced an empty partition key");
                    assert!(s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
                }
            }
        }
    }

    #[test]
    fn non_ascii_letters_are_stripped() {
        // Accented characters lower-case to non-ASCII and are removed rather
        // than transliterated.
        assert_eq!(normalize_project_name(Some("Café")), Some("caf".to_string()));
        assert_eq!(normalize_project_name(Some("日本語")), None);
    }

    #[test]
    fn partition_equality_ignores_formatting() {
        assert!(same_partition(Some("My Project 1"), Some("my-project_1")));
        assert!(same_partition(None, Some("  ")));
        assert!(!same_partition(Some("alpha"), Some("beta")));
    }
}
