use review_restorer::mapping::{TrainingPair, WordMapping};

#[test]
fn builds_mapping_from_aligned_pair() {
    let pairs = vec![TrainingPair::new("안뇽 세상", "안녕 세상")];
    let mapping = WordMapping::build(&pairs);
    assert_eq!(mapping.get("안뇽"), Some("안녕"));
    // aligned identical tokens become identity entries
    assert_eq!(mapping.get("세상"), Some("세상"));
    assert_eq!(mapping.len(), 2);
}

#[test]
fn last_pair_wins_on_conflict() {
    let pairs = vec![TrainingPair::new("가 나", "A B"), TrainingPair::new("가 다", "C D")];
    let mapping = WordMapping::build(&pairs);
    assert_eq!(mapping.get("가"), Some("C"));
    assert_eq!(mapping.get("나"), Some("B"));
    assert_eq!(mapping.get("다"), Some("D"));
}

#[test]
fn mismatched_lengths_align_only_the_shorter_prefix() {
    let pairs = vec![TrainingPair::new("한 단어", "하나의 원래 단어")];
    let mapping = WordMapping::build(&pairs);
    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping.get("한"), Some("하나의"));
    assert_eq!(mapping.get("단어"), Some("원래"));
    assert!(mapping.iter().all(|(_, v)| v != "단어"));
}

#[test]
fn longer_obfuscated_side_is_truncated_too() {
    let pairs = vec![TrainingPair::new("a b c", "x")];
    let mapping = WordMapping::build(&pairs);
    assert_eq!(mapping.len(), 1);
    assert!(!mapping.contains("b"));
}

#[test]
fn building_twice_gives_equal_mappings() {
    let pairs = vec![
        TrainingPair::new("맛잇어요 쩡말", "맛있어요 정말"),
        TrainingPair::new("쩡말 좋꾜", "정말 좋아"),
    ];
    assert_eq!(WordMapping::build(&pairs), WordMapping::build(&pairs));
}

#[test]
fn collects_from_entries() {
    let mapping: WordMapping = vec![("a".to_string(), "b".to_string())].into_iter().collect();
    assert_eq!(mapping.get("a"), Some("b"));
    assert_eq!(mapping.get("b"), None);
}
