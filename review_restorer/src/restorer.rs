use crate::hints::apply_hints;
use crate::mapping::{tokens, WordMapping};
use std::borrow::Cow;

/// Per-text substitution counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreStats {
    pub substituted: usize,
    pub passed_through: usize,
}

impl RestoreStats {
    pub fn merge(&mut self, other: RestoreStats) {
        self.substituted += other.substituted;
        self.passed_through += other.passed_through;
    }
}

/// Restores `text` token by token and joins the result with single spaces.
///
/// Tokens missing from `mapping` are emitted unchanged.
pub fn restore_text(text: &str, mapping: &WordMapping) -> String {
    restore_with_stats(text, mapping).0
}

pub fn restore_with_stats(text: &str, mapping: &WordMapping) -> (String, RestoreStats) {
    restore_tokens(text, |token| mapping.get(token).map(Cow::Borrowed))
}

fn restore_tokens<'a, F>(text: &'a str, mut lookup: F) -> (String, RestoreStats)
where
    F: FnMut(&'a str) -> Option<Cow<'a, str>>,
{
    let mut stats = RestoreStats::default();
    let restored: Vec<Cow<'a, str>> = tokens(text)
        .map(|token| match lookup(token) {
            Some(replacement) => {
                stats.substituted += 1;
                replacement
            }
            None => {
                stats.passed_through += 1;
                Cow::Borrowed(token)
            }
        })
        .collect();
    (restored.join(" "), stats)
}

/// Lexical restorer owning its mapping, with an optional hint fallback for
/// tokens the mapping has never seen.
#[derive(Debug, Clone)]
pub struct LexicalRestorer {
    mapping: WordMapping,
    hint_fallback: bool,
}

impl LexicalRestorer {
    pub fn new(mapping: WordMapping) -> Self {
        Self {
            mapping,
            hint_fallback: false,
        }
    }

    pub fn with_hint_fallback(mut self, enabled: bool) -> Self {
        self.hint_fallback = enabled;
        self
    }

    pub fn mapping(&self) -> &WordMapping {
        &self.mapping
    }

    pub fn restore(&self, text: &str) -> (String, RestoreStats) {
        if !self.hint_fallback {
            return restore_with_stats(text, &self.mapping);
        }
        restore_tokens(text, |token| match self.mapping.get(token) {
            Some(restored) => Some(Cow::Borrowed(restored)),
            None => {
                let hinted = apply_hints(token);
                if hinted == token {
                    None
                } else {
                    Some(Cow::Owned(hinted))
                }
            }
        })
    }
}
