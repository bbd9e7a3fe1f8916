mod common;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ftw_ai::config::MatchWeights;
use ftw_ai::embeddings::EmbeddingProvider;
use ftw_ai::matching::ContractorMatcher;
use ftw_ai::models::JobRequest;

use common::{
    cache_config, embed_config, embed_config_without_key, embeddings_body, matches_body,
    vector_config, vector_config_unconfigured,
};

fn job() -> JobRequest {
    JobRequest {
        title: "Panel upgrade".to_string(),
        description: "Upgrade 100A panel to 200A".to_string(),
        trades: vec!["electrical".to_string()],
        zip: Some("55401".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_matches_are_scored_and_sorted_descending() {
    let embed_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(embeddings_body(&[0.2, 0.8])))
        .mount(&embed_server)
        .await;

    let vector_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexes/contractors/query"))
        .and(body_partial_json(json!({
            "topK": 20,
            "filter": {"active": true, "zip": "55401"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(matches_body(json!([
            {
                "id": "c-middling",
                "score": 0.60,
                "metadata": {
                    "rating": 3.5, "completion_rate": 0.7,
                    "response_time_hours": 12.0, "availability": 0.4,
                    "specialties": ["roofing"]
                }
            },
            {
                "id": "c-strong",
                "score": 0.85,
                "metadata": {
                    "rating": 4.9, "completion_rate": 0.98,
                    "response_time_hours": 1.0, "availability": 0.9,
                    "specialties": ["electrical"]
                }
            }
        ]))))
        .expect(1)
        .mount(&vector_server)
        .await;

    let matcher = ContractorMatcher::new(
        EmbeddingProvider::new(&embed_config(&embed_server.uri()), true, &cache_config()),
        &vector_config(&vector_server.uri()),
        MatchWeights::default(),
        true,
        true,
    );

    let matches = matcher.find_best(&job()).await.unwrap();

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].contractor_id, "c-strong");
    assert_eq!(matches[1].contractor_id, "c-middling");
    assert!(matches[0].score > matches[1].score);
    assert_eq!(matches[0].specialty_match, 1.0);
    assert_eq!(matches[1].specialty_match, 0.3);

    for matched in &matches {
        assert!((0.0..=1.0).contains(&matched.score));
    }
}

#[tokio::test]
async fn test_disabled_matching_switch_returns_empty() {
    let matcher = ContractorMatcher::new(
        EmbeddingProvider::new(&embed_config_without_key(), true, &cache_config()),
        &vector_config("http://127.0.0.1:9"),
        MatchWeights::default(),
        false,
        true,
    );
    assert!(matcher.find_best(&job()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_disabled_rag_switch_returns_empty() {
    let matcher = ContractorMatcher::new(
        EmbeddingProvider::new(&embed_config_without_key(), true, &cache_config()),
        &vector_config("http://127.0.0.1:9"),
        MatchWeights::default(),
        true,
        false,
    );
    assert!(matcher.find_best(&job()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unconfigured_vector_provider_returns_empty() {
    let matcher = ContractorMatcher::new(
        EmbeddingProvider::new(&embed_config_without_key(), true, &cache_config()),
        &vector_config_unconfigured(),
        MatchWeights::default(),
        true,
        true,
    );
    assert!(matcher.find_best(&job()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_embedding_returns_empty_without_vector_query() {
    let vector_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(matches_body(json!([]))))
        .expect(0)
        .mount(&vector_server)
        .await;

    // Embeddings disabled: the query embedding comes back empty.
    let matcher = ContractorMatcher::new(
        EmbeddingProvider::new(&embed_config_without_key(), false, &cache_config()),
        &vector_config(&vector_server.uri()),
        MatchWeights::default(),
        true,
        true,
    );
    assert!(matcher.find_best(&job()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_vector_query_failure_degrades_to_empty() {
    let embed_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(embeddings_body(&[0.3])))
        .mount(&embed_server)
        .await;

    let vector_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexes/contractors/query"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&vector_server)
        .await;

    let matcher = ContractorMatcher::new(
        EmbeddingProvider::new(&embed_config(&embed_server.uri()), true, &cache_config()),
        &vector_config(&vector_server.uri()),
        MatchWeights::default(),
        true,
        true,
    );
    assert!(matcher.find_best(&job()).await.unwrap().is_empty());
}
