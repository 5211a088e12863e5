//! Few-shot prompt construction for the LLM providers.

use crate::config::Provider;
use crate::mapping::TrainingPair;
use crate::patterns::analyze_patterns;

const CHAT_SYSTEM_PREAMBLE: &str = "당신은 난독화된 한국어 텍스트를 원문으로 복원하는 전문가입니다. \
다음의 규칙과 패턴을 참고하여 텍스트를 복원하세요:\n\n\
1. 자음/모음 대체 패턴:\n\
- ㅏ→ㅑ, ㅓ→ㅕ 등의 변환이 자주 발생\n\
- 받침의 경우 ㄱ→ㄲ, ㄹ→ㄷ 등으로 변환\n\n\
2. 단어 구조:\n\
- 기본 형태는 유지되나 자음/모음이 변형됨\n\
- 띄어쓰기는 대체로 원문과 유사하게 유지됨\n\n\
3. 문맥 고려사항:\n\
- 리뷰 텍스트의 특성을 반영 (숙소, 음식점 등)\n\
- 감정 표현과 평가 내용의 일관성 유지\n\n\
예시:\n";

const CHAT_USER_REMINDERS: &str = "복원 시 다음을 주의하세요:\n\
1. 띄어쓰기는 원문의 패턴을 최대한 유지\n\
2. 특수문자와 문장 부호는 자연스럽게 변환\n\
3. 존댓말/반말 등의 말투는 문맥에 맞게 유지";

const FLAT_PREAMBLE: &str = "You are a helpful assistant specializing in restoring obfuscated Korean reviews. \
Your task is to transform the given obfuscated Korean review into a clear, correct, \
and natural-sounding Korean review that reflects its original meaning. \
Below are examples of obfuscated Korean reviews and their restored forms:\n\n";

const FLAT_RULES: &str = "Spacing and word length in the output must be restored to the same as in the input. \
Do not provide any description. Print only in Korean.";

/// A rendered prompt. Chat prompts carry a system/user split; flat prompts
/// are a single block of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Chat { system: String, user: String },
    Flat(String),
}

impl Prompt {
    /// Collapses a chat prompt into one block, for providers without roles.
    pub fn into_flat(self) -> String {
        match self {
            Prompt::Chat { system, user } => format!("{system}\n\n{user}"),
            Prompt::Flat(text) => text,
        }
    }

    /// Role-tagged messages for chat endpoints. A flat prompt becomes a
    /// single user message.
    pub fn into_messages(self) -> Vec<(&'static str, String)> {
        match self {
            Prompt::Chat { system, user } => vec![("system", system), ("user", user)],
            Prompt::Flat(text) => vec![("user", text)],
        }
    }
}

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    examples: Vec<TrainingPair>,
}

impl PromptBuilder {
    /// Keeps at most `limit` examples, taken from the front of `examples`.
    pub fn new(examples: &[TrainingPair], limit: usize) -> Self {
        Self {
            examples: examples.iter().take(limit).cloned().collect(),
        }
    }

    pub fn examples(&self) -> &[TrainingPair] {
        &self.examples
    }

    pub fn build(&self, provider: Provider, text: &str) -> Prompt {
        match provider {
            Provider::OpenAi => self.chat(text),
            Provider::Gemini => Prompt::Flat(self.flat(text)),
        }
    }

    fn chat(&self, text: &str) -> Prompt {
        let mut system = String::from(CHAT_SYSTEM_PREAMBLE);
        for pair in &self.examples {
            system.push_str(&format!(
                "입력: {}\n출력: {}\n\n",
                pair.obfuscated, pair.original
            ));
        }

        let report = analyze_patterns(text);
        let user = format!(
            "다음 텍스트를 복원하세요. 분석된 패턴 정보도 참고하세요:\n\
             입력 텍스트: {text}\n\
             발견된 패턴: {}\n\
             {CHAT_USER_REMINDERS}",
            report.to_json()
        );
        Prompt::Chat { system, user }
    }

    fn flat(&self, text: &str) -> String {
        let examples = self
            .examples
            .iter()
            .map(|pair| format!("input: {}\noutput: {}", pair.obfuscated, pair.original))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("{FLAT_PREAMBLE}{examples}\n\n{FLAT_RULES}\n\ninput: {text}\noutput:")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn examples() -> Vec<TrainingPair> {
        (0..8)
            .map(|i| TrainingPair::new(format!("난독{i}"), format!("원문{i}")))
            .collect()
    }

    #[test]
    fn limits_examples() {
        let builder = PromptBuilder::new(&examples(), 5);
        assert_eq!(builder.examples().len(), 5);
        assert_eq!(builder.examples()[0].obfuscated, "난독0");
    }

    #[test]
    fn chat_prompt_lists_examples_and_input() {
        let builder = PromptBuilder::new(&examples(), 2);
        match builder.build(Provider::OpenAi, "맛잇어요") {
            Prompt::Chat { system, user } => {
                assert!(system.contains("입력: 난독0\n출력: 원문0\n\n"));
                assert!(system.contains("입력: 난독1\n출력: 원문1\n\n"));
                assert!(!system.contains("난독2"));
                assert!(user.contains("입력 텍스트: 맛잇어요"));
                assert!(user.contains("\"word_endings\":[\"어요\"]"));
            }
            other => panic!("expected chat prompt, got {other:?}"),
        }
    }

    #[test]
    fn flat_prompt_ends_with_query() {
        let builder = PromptBuilder::new(&examples(), 3);
        let prompt = builder.build(Provider::Gemini, "맛잇어요").into_flat();
        assert!(prompt.contains("input: 난독2\noutput: 원문2"));
        assert!(!prompt.contains("난독3"));
        assert!(prompt.ends_with("input: 맛잇어요\noutput:"));
    }

    #[test]
    fn chat_collapses_to_flat() {
        let prompt = Prompt::Chat {
            system: "s".into(),
            user: "u".into(),
        };
        assert_eq!(prompt.into_flat(), "s\n\nu");
    }

    #[test]
    fn messages_keep_roles() {
        let chat = Prompt::Chat {
            system: "s".into(),
            user: "u".into(),
        };
        assert_eq!(
            chat.into_messages(),
            vec![("system", "s".to_string()), ("user", "u".to_string())]
        );
        assert_eq!(
            Prompt::Flat("f".into()).into_messages(),
            vec![("user", "f".to_string())]
        );
    }
}
