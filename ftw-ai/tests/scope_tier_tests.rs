mod common;

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ftw_ai::config::ScopingConfig;
use ftw_ai::embeddings::EmbeddingProvider;
use ftw_ai::error::FtwError;
use ftw_ai::llm::ChatProvider;
use ftw_ai::models::JobRequest;
use ftw_ai::rag::RagContextBuilder;
use ftw_ai::routing::JobClassifier;
use ftw_ai::scoping::{ScopeGenerator, CHEAP_MODEL};

use common::{
    cache_config, chat_config, completion_body, embed_config_without_key, messages_body,
    scoping_config, scoping_config_without_key, vector_config_unconfigured,
};

/// Generator with routing and RAG fully degraded: classification comes from
/// the keyword rules, context is empty. Scope calls go to the given
/// scoping config and chat fallback.
fn generator(scoping: &ScopingConfig, fallback: ChatProvider) -> ScopeGenerator {
    let classifier = JobClassifier::new(ChatProvider::disabled("routing off"), false, &cache_config());
    let rag = RagContextBuilder::new(
        EmbeddingProvider::new(&embed_config_without_key(), false, &cache_config()),
        &vector_config_unconfigured(),
        false,
    );
    ScopeGenerator::new(classifier, rag, scoping, fallback)
}

fn simple_job() -> JobRequest {
    JobRequest {
        title: "Dripping faucet".to_string(),
        description: "Faucet drips at the base of the spout".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_simple_job_uses_cheap_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(body_partial_json(serde_json::json!({"model": CHEAP_MODEL})))
        .respond_with(ResponseTemplate::new(200).set_body_json(messages_body(
            "SCOPE: Replace the cartridge and O-rings.\nPRICE: 120-220\nMATERIALS: cartridge kit\nTIME: 2 hours",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let generator = generator(&scoping_config(&server.uri()), ChatProvider::disabled("none"));

    let result = generator.job_scope(&simple_job()).await.unwrap();

    assert_eq!(result.model, CHEAP_MODEL);
    assert_eq!((result.price_low, result.price_high), (120, 220));
    assert_eq!(result.materials, vec!["cartridge kit"]);
    assert_eq!(result.time, "2 hours");
}

#[tokio::test]
async fn test_unconfigured_scoping_falls_back_to_chat_model() {
    let chat_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "SCOPE: Replace washer.\nPRICE: 90-150\nMATERIALS: none\nTIME: 1 hour",
        )))
        .expect(1)
        .mount(&chat_server)
        .await;

    let generator = generator(
        &scoping_config_without_key(),
        ChatProvider::new(&chat_config(&chat_server.uri())),
    );

    let result = generator.job_scope(&simple_job()).await.unwrap();

    assert_eq!(result.model, "gpt-4o-mini");
    assert_eq!((result.price_low, result.price_high), (90, 150));
    assert!(result.materials.is_empty(), "a \"none\" list parses as empty");
}

#[tokio::test]
async fn test_emergency_forces_expensive_tier_despite_short_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(body_partial_json(
            serde_json::json!({"model": "claude-3-5-sonnet-20241022"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(messages_body(
            r#"{"scope": "Shut off gas at the meter, locate and repair the leak, pressure-test.",
                "price_low": 350, "price_high": 900,
                "materials": ["pipe sealant"], "time": "same day"}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let generator = generator(&scoping_config(&server.uri()), ChatProvider::disabled("none"));

    let job = JobRequest {
        title: "Gas leak".to_string(),
        description: "URGENT gas leak in kitchen".to_string(),
        ..Default::default()
    };

    let result = generator.job_scope(&job).await.unwrap();

    assert_eq!(result.model, "claude-3-5-sonnet-20241022");
    assert!(result.scope.contains("Shut off gas"));
    assert_eq!((result.price_low, result.price_high), (350, 900));
}

#[tokio::test]
async fn test_detailed_parse_failure_keeps_raw_text_with_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(messages_body(
            "This job needs a licensed gas fitter on site immediately.",
        )))
        .mount(&server)
        .await;

    let generator = generator(&scoping_config(&server.uri()), ChatProvider::disabled("none"));

    let job = JobRequest {
        description: "URGENT gas leak in kitchen".to_string(),
        ..Default::default()
    };

    let result = generator.job_scope(&job).await.unwrap();
    assert!(result.scope.contains("licensed gas fitter"));
    assert_eq!((result.price_low, result.price_high), (200, 800));
    assert_eq!(result.time, "1-3 days");
}

#[tokio::test]
async fn test_no_provider_at_all_is_a_hard_error() {
    let generator = generator(&scoping_config_without_key(), ChatProvider::disabled("none"));

    let err = generator.job_scope(&simple_job()).await.unwrap_err();
    assert!(matches!(err, FtwError::AiUnavailable));
}

#[tokio::test]
async fn test_scoping_server_error_falls_back_then_hard_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(529))
        .expect(1)
        .mount(&server)
        .await;

    let generator = generator(&scoping_config(&server.uri()), ChatProvider::disabled("none"));

    let err = generator.job_scope(&simple_job()).await.unwrap_err();
    assert!(matches!(err, FtwError::AiUnavailable));
}
