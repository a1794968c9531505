//! Normalization of externally supplied strings.
//!
//! Every free-form string coming off the wire (nicknames, message text, room
//! and circle identifiers) passes through here before it reaches any other
//! component.

/// Maximum length, in characters, of any user-supplied field.
pub const MAX_FIELD_CHARS: usize = 200;

/// Trim surrounding whitespace and truncate to [`MAX_FIELD_CHARS`] characters.
///
/// Truncation can expose new trailing whitespace, so the result is trimmed
/// again on the right; the function is a fixed point of itself.
pub fn sanitize(input: &str) -> String {
    let truncated: String = input.trim().chars().take(MAX_FIELD_CHARS).collect();
    truncated.trim_end().to_string()
}

/// Sanitize a nickname, falling back to `"anon"` when nothing usable remains.
pub fn nick_or_anon(input: &str) -> String {
    let nick = sanitize(input);
    if nick.is_empty() { "anon".to_string() } else { nick }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_trims_surrounding_whitespace() {
        // given (precondition):
        let input = "   hello   ";

        // when (operation):
        let result = sanitize(input);

        // then (expected result):
        assert_eq!(result, "hello");
    }

    #[test]
    fn test_sanitize_truncates_to_field_limit() {
        // given (precondition):
        let input = "x".repeat(500);

        // when (operation):
        let result = sanitize(&input);

        // then (expected result):
        assert_eq!(result.chars().count(), MAX_FIELD_CHARS);
    }

    #[test]
    fn test_sanitize_counts_characters_not_bytes() {
        // given (precondition):
        let input = "ä".repeat(300);

        // when (operation):
        let result = sanitize(&input);

        // then (expected result):
        assert_eq!(result.chars().count(), MAX_FIELD_CHARS);
    }

    #[test]
    fn test_sanitize_empty_input_stays_empty() {
        // given (precondition):
        let input = "   \t\n  ";

        // when (operation):
        let result = sanitize(input);

        // then (expected result):
        assert_eq!(result, "");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        // given (precondition):
        // The third input places whitespace right at the truncation
        // boundary, where a plain trim-then-cut would stop being a fixed
        // point.
        let inputs = [
            "  plain  ".to_string(),
            "unchanged".to_string(),
            format!("{} {}", "a".repeat(199), "b".repeat(50)),
        ];

        for input in inputs {
            // when (operation):
            let once = sanitize(&input);
            let twice = sanitize(&once);

            // then (expected result):
            assert_eq!(once, twice, "not idempotent for {input:?}");
            assert!(once.chars().count() <= MAX_FIELD_CHARS);
        }
    }

    #[test]
    fn test_nick_or_anon_defaults_blank_nicknames() {
        // given (precondition):
        let blank = "   ";

        // when (operation):
        let result = nick_or_anon(blank);

        // then (expected result):
        assert_eq!(result, "anon");
    }

    #[test]
    fn test_nick_or_anon_keeps_usable_nicknames() {
        // given (precondition):
        let nick = "  alice  ";

        // when (operation):
        let result = nick_or_anon(nick);

        // then (expected result):
        assert_eq!(result, "alice");
    }
}
