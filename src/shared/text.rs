//! Utterance normalization and keyword containment. Everything routing needs from a string.

/// Case-fold an utterance. No trimming, no stemming.
pub fn normalize(utterance: &str) -> String {
    utterance.to_lowercase()
}

/// True if any keyword occurs as a substring of `text`.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Text following the first whole-word occurrence of any `phrase`, trimmed.
/// `None` if no phrase occurs. "add task" does not match inside "add tasks".
pub fn after_any<'a>(text: &'a str, phrases: &[&str]) -> Option<&'a str> {
    phrases.iter().find_map(|p| {
        text.match_indices(p)
            .find(|(i, _)| {
                let before = text[..*i].chars().next_back();
                let after = text[i + p.len()..].chars().next();
                !before.is_some_and(char::is_alphanumeric)
                    && !after.is_some_and(char::is_alphanumeric)
            })
            .map(|(i, _)| text[i + p.len()..].trim())
    })
}

/// First whitespace-separated token that parses as an unsigned integer.
pub fn first_number(text: &str) -> Option<u32> {
    text.split_whitespace().find_map(|t| {
        t.trim_start_matches('#')
            .trim_end_matches(|c: char| !c.is_ascii_digit())
            .parse()
            .ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_only_case_folds() {
        assert_eq!(normalize("  What IS Algebra "), "  what is algebra ");
    }

    #[test]
    fn substring_not_word_match() {
        assert!(contains_any("homeworkers unite", &["homework"]));
        assert!(contains_any("i feel stressed", &["relax", "stress"]));
        assert!(!contains_any("hello", &["stop", "quit"]));
    }

    #[test]
    fn after_phrase() {
        assert_eq!(after_any("please add task  buy milk ", &["add task"]), Some("buy milk"));
        assert_eq!(after_any("add task", &["add task"]), Some(""));
        assert_eq!(after_any("list tasks", &["add task", "new task"]), None);
    }

    #[test]
    fn after_phrase_respects_word_boundaries() {
        assert_eq!(after_any("add tasks buy milk", &["add task"]), None);
        assert_eq!(after_any("readd task x", &["add task"]), None);
        assert_eq!(
            after_any("add tasks add task: call mom", &["add task"]),
            Some(": call mom")
        );
        assert_eq!(after_any("log meal: toast", &["log meal"]), Some(": toast"));
    }

    #[test]
    fn numbers_in_text() {
        assert_eq!(first_number("complete task 2"), Some(2));
        assert_eq!(first_number("complete task #3."), Some(3));
        assert_eq!(first_number("complete task"), None);
    }
}
