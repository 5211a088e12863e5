use mockito::Server;
use prometheus::Registry;
use review_restorer::config::{LlmSettings, Provider};
use review_restorer::evaluation::evaluate_llm;
use review_restorer::llm_client::{LlmClient, LlmError};
use review_restorer::llm_restorer::{LlmRestorer, Restoration};
use review_restorer::mapping::TrainingPair;
use review_restorer::metrics::Metrics;

fn restorer(endpoint: String, metrics: Metrics) -> LlmRestorer {
    let settings = LlmSettings {
        provider: Provider::OpenAi,
        endpoint,
        api_key: "test-key".into(),
        model: "gpt-4o".into(),
        temperature: 0.1,
        top_p: 0.8,
        few_shot_examples: 5,
    };
    let examples = vec![TrainingPair::new("안뇽 세상", "안녕 세상")];
    LlmRestorer::new(LlmClient::new(settings), &examples, metrics)
}

#[tokio::test]
async fn cleans_successful_completion() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(r#"{ "choices": [ { "message": { "content": "  \"복원 결과: 안녕 친구\"  " } } ] }"#)
        .create_async()
        .await;

    let registry = Registry::new();
    let metrics = Metrics::new(&registry).unwrap();
    let outcome = restorer(server.url(), metrics.clone()).restore("안뇽 친구").await;

    assert!(outcome.is_restored());
    assert_eq!(outcome.text(), "안녕 친구");
    assert_eq!(metrics.llm_requests.get(), 1);
    assert_eq!(metrics.llm_fallbacks.get(), 0);
}

#[tokio::test]
async fn failure_falls_back_to_input() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/")
        .with_status(503)
        .create_async()
        .await;

    let metrics = Metrics::unregistered().unwrap();
    let outcome = restorer(server.url(), metrics.clone()).restore("안뇽 친구").await;

    match outcome {
        Restoration::FellBack { ref original, ref error } => {
            assert_eq!(original, "안뇽 친구");
            assert!(matches!(error, LlmError::Http(_)));
        }
        Restoration::Restored(text) => panic!("expected fallback, got {text}"),
    }
    assert_eq!(metrics.llm_fallbacks.get(), 1);
}

#[tokio::test]
async fn evaluates_sampled_rows() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(r#"{ "choices": [ { "message": { "content": "안녕 세상" } } ] }"#)
        .expect(2)
        .create_async()
        .await;

    let pairs = vec![
        TrainingPair::new("안뇽 세상", "안녕 세상"),
        TrainingPair::new("안뇽 세상 ", "안녕 세상 "),
    ];
    let restorer = restorer(server.url(), Metrics::unregistered().unwrap());
    let report = evaluate_llm(&pairs, &restorer, 5, Some(1)).await;

    assert_eq!(report.samples.len(), 2);
    assert_eq!(report.accuracy(), 100.0);
    _m.assert_async().await;
}
