use tokenlens::prelude::*;

const MIXED: &str = "今天天气很好，let's go hiking! 明天 maybe 下雨。Café 123";

#[test]
fn test_mixed_text_pipeline() {
    let engine = EngineKind::UnicodeWord.build(&SessionConfig::default());
    let tokens = engine.tokenize(MIXED);

    for (i, token) in tokens.iter().enumerate() {
        assert_eq!(token.position, i);
        assert!(!token.text.is_empty());
        assert_eq!(token.text.trim(), token.text);
        assert_eq!(&MIXED[token.start_offset..token.end_offset], token.text);
    }

    assert_eq!(tokens[0].text, "今天天气很好");
    assert_eq!(tokens[0].token_type, TokenType::Cjk);
    assert!(tokens.texts().any(|t| t == "，"));
    assert!(tokens.texts().any(|t| t == "let's"));

    let frequencies = FrequencyIndexer::index(tokens.texts());
    assert_eq!(frequencies.total(), tokens.len());
    assert_eq!(
        frequencies.iter().map(|(_, count)| count).sum::<usize>(),
        tokens.len()
    );
}

#[test]
fn test_character_segmentation_splits_ideographs() {
    let config = SessionConfig::default().cjk(CjkSegmentation::Character);
    let engine = EngineKind::UnicodeWord.build(&config);
    let tokens = engine.tokenize("明天下雨");
    assert_eq!(tokens.surface_forms(), vec!["明", "天", "下", "雨"]);
}

#[test]
fn test_parallel_and_sequential_search_agree() {
    let text = "Résumé resume RESUME other ".repeat(500);
    let tokens = UnicodeWordEngine::new().tokenize(&text);
    assert_eq!(tokens.len(), 2_000);

    let sequential = SearchMatcher::new().find(tokens.as_slice(), "résumé");
    let parallel = SearchMatcher::new()
        .with_parallel_threshold(16)
        .find(tokens.as_slice(), "résumé");

    assert_eq!(sequential, parallel);
    assert_eq!(sequential.len(), 1_500);
    assert!(!sequential.contains(3));
    assert!(sequential.contains(4));
}

#[test]
fn test_whitespace_engine_keeps_punctuation_attached() {
    let tokens = WhitespaceEngine::new().tokenize("  hello,\tworld!\n你好  ");
    assert_eq!(tokens.surface_forms(), vec!["hello,", "world!", "你好"]);
}

#[test]
fn test_empty_input() {
    for kind in EngineKind::ALL {
        let engine = kind.build(&SessionConfig::default());
        assert!(engine.tokenize("").is_empty());
        assert!(engine.tokenize(" \n\t ").is_empty());
    }
    let frequencies = FrequencyIndexer::index(Vec::<String>::new());
    assert!(frequencies.is_empty());
}
