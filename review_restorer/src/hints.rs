//! Fixed syllable and suffix rewrites observed in the obfuscated reviews.
//!
//! These are coarse: they fire regardless of context and are only used as an
//! opt-in fallback for tokens the word mapping has never seen.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static SYLLABLE_TABLE: Lazy<HashMap<char, char>> = Lazy::new(|| {
    [
        ('깥', '같'),
        ('맒', '말'),
        ('섧', '설'),
        ('멍', '명'),
        ('탯', '댓'),
        ('녀', '너'),
        ('퀼', '길'),
        ('윌', '일'),
        ('귑', '기'),
        ('낙', '나'),
        ('콧', '곳'),
        ('잚', '잠'),
        ('갉', '갈'),
        ('잇', '있'),
        ('앎', '알'),
        ('톨', '돌'),
        ('깸', '캠'),
        ('읊', '을'),
        ('앝', '아'),
    ]
    .into_iter()
    .collect()
});

struct SuffixRule {
    pattern: Regex,
    replacement: &'static str,
}

static SUFFIX_RULES: Lazy<Vec<SuffixRule>> = Lazy::new(|| {
    [
        (r"좋[꾜앝]", "좋아"),
        (r"([가-힣])씁니다", "${1}습니다"),
        (r"([가-힣])엇([어요])", "${1}었${2}"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| SuffixRule {
        pattern: Regex::new(pattern).expect("suffix rule must compile"),
        replacement,
    })
    .collect()
});

/// Applies the suffix rules, then the per-syllable table.
pub fn apply_hints(text: &str) -> String {
    let mut current = text.to_string();
    for rule in SUFFIX_RULES.iter() {
        current = rule
            .pattern
            .replace_all(&current, rule.replacement)
            .into_owned();
    }
    current
        .chars()
        .map(|c| SYLLABLE_TABLE.get(&c).copied().unwrap_or(c))
        .collect()
}

/// Number of compiled suffix rules.
pub fn rule_count() -> usize {
    SUFFIX_RULES.len()
}
