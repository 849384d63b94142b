//! End-to-end pipeline tests against a stubbed OpenAI-compatible endpoint.

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use springforge::catalog;
use springforge::{
    AiConfig, ApiClient, ForgeError, GenerationSession, ProjectGenerator, ProjectMetadata,
    SchemaInput,
};

fn test_config(endpoint: &str) -> AiConfig {
    AiConfig {
        provider: "groq".to_string(),
        model: "llama-3.3-70b-versatile".to_string(),
        vision_model: "meta-llama/llama-4-maverick-17b-128e-instruct".to_string(),
        api_url: endpoint.to_string(),
        api_key: "test-key".to_string(),
    }
}

fn generator_for(server: &MockServer) -> ProjectGenerator {
    let client = ApiClient::from_config(&test_config(&server.uri())).unwrap();
    ProjectGenerator::new(client)
}

fn chat_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [
            {
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    }))
}

fn files_array_json() -> String {
    json!([
        {
            "fileName": "src/main/java/com/example/demo/model/User.java",
            "code": "package com.example.demo.model;\npublic class User {\n}"
        },
        {
            "fileName": "src/main/java/com/example/demo/controller/UserController.java",
            "code": "package com.example.demo.controller;\npublic class UserController {\n}"
        }
    ])
    .to_string()
}

fn default_deps() -> Vec<&'static catalog::Dependency> {
    catalog::resolve(&["web".to_string(), "data-jpa".to_string()])
}

const SQL: &str = "CREATE TABLE users (id BIGINT PRIMARY KEY, name VARCHAR(255));";

#[tokio::test]
async fn sql_input_is_normalized_before_generation() {
    let server = MockServer::start().await;

    // Pre-pass: the parse-only prompt gets a structured entity object back.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("database schema analysis tool"))
        .respond_with(chat_reply(
            r#"{"entities":[{"name":"User","fields":["private String name;"],"relations":[]}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    // Main call: the prompt must now describe a pre-processed JSON schema,
    // not raw SQL.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("expert Spring Boot developer"))
        .and(body_string_contains("pre-processed from SQL"))
        .respond_with(chat_reply(&files_array_json()))
        .expect(1)
        .mount(&server)
        .await;

    let generator = generator_for(&server);
    let files = generator
        .generate(
            &SchemaInput::Sql(SQL.to_string()),
            &ProjectMetadata::default(),
            &default_deps(),
        )
        .await
        .unwrap();

    assert_eq!(files.len(), 2);
    assert_eq!(files[0].path, "src/main/java/com/example/demo/model/User.java");
}

#[tokio::test]
async fn failed_normalization_falls_back_to_raw_sql() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("database schema analysis tool"))
        .respond_with(chat_reply("sorry, I cannot parse that"))
        .expect(1)
        .mount(&server)
        .await;

    // The generation prompt must carry the original fenced SQL.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("expert Spring Boot developer"))
        .and(body_string_contains("the following SQL schema"))
        .and(body_string_contains("CREATE TABLE users"))
        .respond_with(chat_reply(&files_array_json()))
        .expect(1)
        .mount(&server)
        .await;

    let generator = generator_for(&server);
    let files = generator
        .generate(
            &SchemaInput::Sql(SQL.to_string()),
            &ProjectMetadata::default(),
            &default_deps(),
        )
        .await
        .unwrap();

    assert_eq!(files.len(), 2);
}

#[tokio::test]
async fn empty_entity_list_from_pre_pass_falls_back_to_raw_sql() {
    let server = MockServer::start().await;

    // Structurally valid JSON, but an empty entity list is a failed pass.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("database schema analysis tool"))
        .respond_with(chat_reply(r#"{"entities":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("the following SQL schema"))
        .respond_with(chat_reply(&files_array_json()))
        .expect(1)
        .mount(&server)
        .await;

    let generator = generator_for(&server);
    let files = generator
        .generate(
            &SchemaInput::Sql(SQL.to_string()),
            &ProjectMetadata::default(),
            &default_deps(),
        )
        .await
        .unwrap();
    assert_eq!(files.len(), 2);
}

#[tokio::test]
async fn image_input_uses_the_vision_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("llama-4-maverick"))
        .and(body_string_contains("image_url"))
        .and(body_string_contains("an uploaded ER diagram image"))
        .respond_with(chat_reply(&files_array_json()))
        .expect(1)
        .mount(&server)
        .await;

    let generator = generator_for(&server);
    let files = generator
        .generate(
            &SchemaInput::DiagramImage(springforge::ImagePayload {
                data: vec![0x89, 0x50, 0x4e, 0x47],
                media_type: "image/png".to_string(),
            }),
            &ProjectMetadata::default(),
            &default_deps(),
        )
        .await
        .unwrap();
    assert_eq!(files.len(), 2);
}

#[tokio::test]
async fn free_text_input_skips_the_pre_pass() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("a natural language description"))
        .respond_with(chat_reply(&files_array_json()))
        .expect(1)
        .mount(&server)
        .await;

    let generator = generator_for(&server);
    let files = generator
        .generate(
            &SchemaInput::FreeText("a blog with users and posts".to_string()),
            &ProjectMetadata::default(),
            &default_deps(),
        )
        .await
        .unwrap();

    assert_eq!(files.len(), 2);
}

#[tokio::test]
async fn generation_is_idempotent_for_identical_inputs() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(chat_reply(&files_array_json()))
        .mount(&server)
        .await;

    let generator = generator_for(&server);
    let input = SchemaInput::FreeText("a blog".to_string());
    let meta = ProjectMetadata::default();
    let deps = default_deps();

    let first = generator.generate(&input, &meta, &deps).await.unwrap();
    let second = generator.generate(&input, &meta, &deps).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn prose_wrapped_response_is_recovered() {
    let server = MockServer::start().await;

    let wrapped = format!("Here is the code:\n{}\nHope this helps!", files_array_json());
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(chat_reply(&wrapped))
        .mount(&server)
        .await;

    let generator = generator_for(&server);
    let files = generator
        .generate(
            &SchemaInput::FreeText("a blog".to_string()),
            &ProjectMetadata::default(),
            &default_deps(),
        )
        .await
        .unwrap();
    assert_eq!(files.len(), 2);
}

#[tokio::test]
async fn empty_array_response_is_a_parse_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(chat_reply("[]"))
        .mount(&server)
        .await;

    let generator = generator_for(&server);
    let result = generator
        .generate(
            &SchemaInput::FreeText("a blog".to_string()),
            &ProjectMetadata::default(),
            &default_deps(),
        )
        .await;

    assert!(matches!(result, Err(ForgeError::ParseFailed { .. })));
}

#[tokio::test]
async fn provider_failure_surfaces_and_previous_batch_survives() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let mut session = GenerationSession::new();
    let first = session.begin_request();
    session.complete(
        first,
        vec![springforge::GeneratedFile {
            path: "kept.java".to_string(),
            content: "previous".to_string(),
        }],
    );

    let generator = generator_for(&server);
    let token = session.begin_request();
    let result = generator
        .generate(
            &SchemaInput::FreeText("a blog".to_string()),
            &ProjectMetadata::default(),
            &default_deps(),
        )
        .await;

    match result {
        Err(ForgeError::Provider(message)) => assert!(message.contains("429")),
        other => panic!("expected Provider error, got {other:?}"),
    }
    // The failed request installs nothing; the prior batch is untouched.
    let _ = token;
    assert_eq!(session.files().unwrap()[0].content, "previous");
}

#[tokio::test]
async fn missing_credential_is_rejected_before_any_request() {
    let mut config = test_config("http://127.0.0.1:1");
    config.api_key = String::new();
    config.provider = "unconfigured".to_string();
    assert!(matches!(
        ApiClient::from_config(&config),
        Err(ForgeError::MissingCredential)
    ));
}
