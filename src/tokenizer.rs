use std::collections::BTreeSet;

/// Minimum token length, in chars
pub const MIN_TOKEN_LEN: usize = 2;

/// Deduplicated, ordered set of normalized tokens
pub type TokenSet = BTreeSet<String>;

#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Split text into maximal runs of chars accepted by `keep`, dropping short runs
    fn runs(&self, text: &str, keep: fn(char) -> bool, out: &mut TokenSet) {
        let mut current = String::new();
        let mut len = 0;

        for c in text.chars().chain(std::iter::once('\0')) {
            if keep(c) {
                current.push(c);
                len += 1;
                continue;
            }
            if len >= MIN_TOKEN_LEN {
                out.insert(std::mem::take(&mut current));
            } else {
                current.clear();
            }
            len = 0;
        }
    }

    /// Full analysis pipeline: lowercase, then union of the Hangul, Latin
    /// and alphanumeric runs
    pub fn tokenize(&self, text: &str) -> TokenSet {
        let mut tokens = TokenSet::new();
        if text.is_empty() {
            return tokens;
        }

        let normalized = text.to_lowercase();
        self.runs(&normalized, is_hangul_syllable, &mut tokens);
        self.runs(&normalized, |c| c.is_ascii_lowercase(), &mut tokens);
        self.runs(
            &normalized,
            |c| c.is_ascii_lowercase() || c.is_ascii_digit(),
            &mut tokens,
        );
        tokens
    }
}

/// Precomposed Hangul syllables (가..힣)
pub fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tokens: &[&str]) -> TokenSet {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(Tokenizer::new().tokenize("").is_empty());
        assert!(Tokenizer::new().tokenize("a 1 가 !").is_empty());
    }

    #[test]
    fn test_tokenize_mixed_scripts() {
        let tokens = Tokenizer::new().tokenize("전기 자동차 Battery-Pack");
        assert_eq!(tokens, set(&["battery", "pack", "자동차", "전기"]));
    }

    #[test]
    fn test_alphanumeric_runs() {
        let tokens = Tokenizer::new().tokenize("LiFePO4 cell 18650");
        // "lifepo" from the letter class, "lifepo4" and "18650" from the alphanumeric class
        assert_eq!(tokens, set(&["18650", "cell", "lifepo", "lifepo4"]));
    }

    #[test]
    fn test_hangul_adjacent_to_latin() {
        let tokens = Tokenizer::new().tokenize("리튬ion전지");
        assert_eq!(tokens, set(&["ion", "리튬", "전지"]));
    }

    #[test]
    fn test_duplicates_collapse() {
        let tokens = Tokenizer::new().tokenize("Motor motor MOTOR");
        assert_eq!(tokens, set(&["motor"]));
    }
}
