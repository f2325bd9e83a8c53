/// Approximate tokens produced per whitespace-separated word.
pub const TOKENS_PER_WORD: f64 = 1.3;

/// Approximate token count of a free-form prompt.
///
/// An empty prompt yields 0. Any other prompt yields at least 1, including one
/// made only of whitespace.
pub fn estimate_tokens(prompt: &str) -> u64 {
    if prompt.is_empty() {
        return 0;
    }
    let words = prompt.split_whitespace().count();
    let tokens = (words as f64 * TOKENS_PER_WORD).floor() as u64;
    tokens.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prompt_has_no_tokens() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn short_prompts_round_up_to_one() {
        assert_eq!(estimate_tokens("hello"), 1);
        assert_eq!(estimate_tokens("   "), 1);
    }

    #[test]
    fn word_count_is_scaled_and_floored() {
        assert_eq!(estimate_tokens("write a poem about rust"), 6);
        assert_eq!(estimate_tokens("one two\nthree\tfour five six seven eight nine ten"), 13);
    }
}
