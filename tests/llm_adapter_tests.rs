//! LLM adapter integration tests
//!
//! Exercises adapters, the factory and the model chain without live
//! network calls. Provider payloads come from fixtures.

use marketlens::llm::adapters::gemini::{parse_generate_content, GeminiAdapter, GEMINI_BASE_URL};
use marketlens::llm::adapters::openai::OpenAiAdapter;
use marketlens::llm::adapters::openai_parse::parse_chat_completion;
use marketlens::llm::adapters::stub::StubAdapter;
use marketlens::llm::adapters::transport::{FakeTransport, Transport};
use marketlens::llm::adapters::{
    create_adapter_from_config_str, create_report_chain, Adapter, AdapterError, Diagnosis,
    LlmAdapter,
};
use marketlens::llm::contracts::{parse_correction, parse_validation};
use marketlens::llm::ModelChain;
use marketlens::Config;
use std::path::PathBuf;

// Test helpers
fn load_fixture(name: &str) -> String {
    let path = PathBuf::from("tests/fixtures").join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", path.display()))
}

fn gemini(model: &str, fake: FakeTransport) -> GeminiAdapter {
    GeminiAdapter::with_transport(
        GEMINI_BASE_URL.to_string(),
        model.to_string(),
        "AIzaSyTestKey000000000000000000000000".to_string(),
        0.15,
        Transport::Fake(fake),
    )
}

// =============================================================================
// TEST A: Factory selection from config
// =============================================================================

#[test]
fn test_a_factory_selects_provider_from_config() {
    let adapter = create_adapter_from_config_str(
        r#"
[llm]
provider = "openai"
base_url = "http://localhost:8080/v1"
api_key = "sk-local"
classifier_model = "local-classifier"
"#,
    )
    .unwrap();
    assert!(matches!(adapter, Adapter::OpenAi(_)));
    assert_eq!(adapter.provider_name(), "openai");
    assert_eq!(adapter.model(), "local-classifier");

    let adapter = create_adapter_from_config_str("[llm]\nprovider = \"stub\"\n").unwrap();
    assert!(matches!(adapter, Adapter::Stub(_)));
}

#[test]
fn test_a_factory_default_is_gemini() {
    let adapter = create_adapter_from_config_str("").unwrap();
    assert!(matches!(adapter, Adapter::Gemini(_)));
    assert_eq!(adapter.model(), "gemma-3-27b-it");
}

#[test]
fn test_a_report_chain_keeps_model_order() {
    let config = Config::from_toml_str(
        r#"
[llm]
provider = "stub"
report_models = ["primary-model", "fallback-model", "last-resort"]
"#,
    )
    .unwrap();
    let chain = create_report_chain(&config.llm).unwrap();
    assert_eq!(
        chain.models(),
        vec!["primary-model", "fallback-model", "last-resort"]
    );
}

#[test]
fn test_a_report_chain_requires_a_model() {
    let config = Config::from_toml_str("[llm]\nprovider = \"stub\"\nreport_models = []\n").unwrap();
    let err = create_report_chain(&config.llm).unwrap_err();
    assert!(matches!(err, AdapterError::Configuration(_)));
}

// =============================================================================
// TEST B: Provider payload parsing from fixtures
// =============================================================================

#[test]
fn test_b_gemini_fixture_joins_parts() {
    let text = parse_generate_content(&load_fixture("gemini_generate_content.json")).unwrap();
    let correction = parse_correction(&text).unwrap();
    assert!(correction.has_issues);
    assert_eq!(correction.corrected_text, "Artificial Intelligence");
}

#[test]
fn test_b_gemini_error_body_is_invalid_key() {
    let err = parse_generate_content(&load_fixture("gemini_error_invalid_key.json")).unwrap_err();
    assert!(matches!(err, AdapterError::Authentication(_)));
    assert_eq!(err.diagnosis(), Diagnosis::InvalidKey);
}

#[test]
fn test_b_openai_fixture_content() {
    let text = parse_chat_completion(&load_fixture("openai_chat_completion.json")).unwrap();
    let validation = parse_validation(&text).unwrap();
    assert!(!validation.is_valid);
    assert_eq!(validation.suggestions, vec!["Retail", "E-commerce", "Logistics"]);
}

// =============================================================================
// TEST C: Adapters over the fake transport
// =============================================================================

#[test]
fn test_c_gemini_request_shape() {
    let fake = FakeTransport::new(&load_fixture("gemini_generate_content.json"));
    let log = fake.request_log();
    let adapter = gemini("gemma-3-27b-it", fake);

    let text = adapter.generate("correct this: ai").unwrap();
    assert!(text.contains("Artificial Intelligence"));

    let requests = log.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(
        request.url,
        "https://generativelanguage.googleapis.com/v1beta/models/gemma-3-27b-it:generateContent"
    );
    assert!(!request.url.contains("key="), "key must not travel in the URL");
    assert_eq!(
        request.header_value("x-goog-api-key"),
        Some("AIzaSyTestKey000000000000000000000000")
    );

    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], "correct this: ai");
    assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.15).abs() < 1e-6);
}

#[test]
fn test_c_openai_request_shape() {
    let fake = FakeTransport::new(&load_fixture("openai_chat_completion.json"));
    let log = fake.request_log();
    let adapter = OpenAiAdapter::with_transport(
        "http://localhost:8080/v1/".to_string(),
        "gpt-4o-mini".to_string(),
        "sk-test".to_string(),
        0.2,
        Transport::Fake(fake),
    );

    let text = adapter.generate("validate: shopping stuff").unwrap();
    assert!(text.contains("is_valid"));

    let request = &log.requests()[0];
    assert_eq!(request.url, "http://localhost:8080/v1/chat/completions");
    assert_eq!(request.header_value("authorization"), Some("Bearer sk-test"));
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["messages"][0]["content"], "validate: shopping stuff");
}

#[test]
fn test_c_transport_error_surfaces() {
    let adapter = gemini("gemma-3-27b-it", FakeTransport::with_error("connection refused"));
    let err = adapter.generate("hello").unwrap_err();
    assert!(err.to_string().contains("connection refused"));
    assert_eq!(err.diagnosis(), Diagnosis::Generic);
}

// =============================================================================
// TEST D: Model chain fallback
// =============================================================================

#[test]
fn test_d_chain_falls_back_in_order() {
    let fake = FakeTransport::scripted(vec![Err(AdapterError::RateLimited {
        message: "Resource has been exhausted (e.g. check quota).".to_string(),
    })]);
    let primary = gemini("gemini-2.5-flash-lite", fake);
    let fallback = StubAdapter::with_response("fallback text".to_string()).named("fallback-model");
    let chain = ModelChain::new(vec![Adapter::Gemini(primary), Adapter::from(fallback)]);

    let reply = chain.invoke("synthesize", "write a report").unwrap();
    assert_eq!(reply.text, "fallback text");
    assert_eq!(reply.model, "fallback-model");
    assert_eq!(reply.attempts.len(), 2);
    assert!(!reply.attempts[0].succeeded());
    assert_eq!(reply.attempts[0].model, "gemini-2.5-flash-lite");
    assert_eq!(reply.attempts[0].stage, "synthesize");
    assert!(reply.attempts[1].succeeded());
}

#[test]
fn test_d_chain_failure_keeps_last_error() {
    let chain = ModelChain::new(vec![
        Adapter::from(StubAdapter::failing("timeout").named("a")),
        Adapter::from(StubAdapter::scripted(vec![Err(AdapterError::Authentication(
            "API key not valid".to_string(),
        ))])
        .named("b")),
    ]);

    let failure = chain.invoke("synthesize", "prompt").unwrap_err();
    assert_eq!(failure.attempts.len(), 2);
    assert_eq!(failure.diagnosis(), Diagnosis::InvalidKey);
    assert!(failure.to_string().contains("all 2 model attempt(s) failed"));
}

#[test]
fn test_d_stub_records_calls() {
    let stub = StubAdapter::scripted(vec![Ok("one".to_string()), Ok("two".to_string())]);
    let log = stub.call_log();
    assert_eq!(stub.generate("first prompt").unwrap(), "one");
    assert_eq!(stub.generate("second prompt").unwrap(), "two");
    assert!(stub.generate("third prompt").is_err());
    assert_eq!(log.len(), 3);
    assert_eq!(log.count_containing("prompt"), 3);
}
