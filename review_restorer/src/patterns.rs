//! Surface features of an input text, reported to the LLM alongside it.

use crate::mapping::tokens;
use serde::Serialize;

const PLAIN_PUNCTUATION: [char; 5] = [' ', '.', ',', '!', '?'];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatternReport {
    pub special_chars: Vec<char>,
    pub repeated_chars: Vec<String>,
    pub word_endings: Vec<String>,
}

impl PatternReport {
    /// JSON with non-ASCII characters kept literal.
    pub fn to_json(&self) -> String {
        // Serializing plain vectors of strings cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

pub fn analyze_patterns(text: &str) -> PatternReport {
    let special_chars = text
        .chars()
        .filter(|c| !c.is_alphanumeric() && !PLAIN_PUNCTUATION.contains(c))
        .collect();

    let mut repeated_chars = Vec::new();
    let mut word_endings = Vec::new();
    for word in tokens(text) {
        let chars: Vec<char> = word.chars().collect();
        for pair in chars.windows(2) {
            if pair[0] == pair[1] {
                repeated_chars.push(pair.iter().collect());
            }
        }
        if chars.len() > 2 {
            word_endings.push(chars[chars.len() - 2..].iter().collect());
        }
    }

    PatternReport {
        special_chars,
        repeated_chars,
        word_endings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hangul_is_not_special() {
        let report = analyze_patterns("안녕하세요 좋아요!");
        assert!(report.special_chars.is_empty());
    }

    #[test]
    fn collects_special_chars_in_order() {
        let report = analyze_patterns("별로~ ㅠㅠ (진짜)");
        assert_eq!(report.special_chars, vec!['~', '(', ')']);
    }

    #[test]
    fn finds_repeated_pairs_per_word() {
        let report = analyze_patterns("ㅋㅋㅋ 좋아");
        assert_eq!(report.repeated_chars, vec!["ㅋㅋ", "ㅋㅋ"]);
    }

    #[test]
    fn word_endings_skip_short_words() {
        let report = analyze_patterns("맛있어요 좋아 굿");
        assert_eq!(report.word_endings, vec!["어요"]);
    }

    #[test]
    fn json_keeps_hangul_literal() {
        let report = analyze_patterns("맛있어요");
        let json = report.to_json();
        assert!(json.contains("어요"));
        assert!(json.contains("\"special_chars\":[]"));
    }
}
