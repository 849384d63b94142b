//! LLM provider client. One logical contract (`complete`) with two wire
//! backends selected by configuration: Gemini's generateContent API and
//! Groq's OpenAI-compatible chat completions API.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::AiConfig;
use crate::error::{ForgeError, ForgeResult};
use crate::schema::ImagePayload;

/// Near-deterministic sampling so the model favors format compliance over
/// creative variation.
const TEMPERATURE: f64 = 0.1;

/// Which response shape to ask the provider to constrain itself to, when it
/// supports constrained output at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// The normalization pre-pass expects `{"entities": [...]}`.
    SchemaObject,
    /// The generation call expects `[{"fileName", "code"}, ...]`.
    FileArray,
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub image: Option<ImagePayload>,
    pub response_shape: Option<ResponseShape>,
}

#[async_trait]
pub trait ProviderBackend: Send + Sync {
    fn name(&self) -> &'static str;
    async fn complete(&self, request: &CompletionRequest) -> ForgeResult<String>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

fn build_http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(60))
        .user_agent("springforge/0.1")
        .build()
        .expect("Failed to create HTTP client")
}

/// OpenAI-compatible backend (Groq). Vision requests switch to the
/// configured multimodal model; images ride along as a data URL part.
pub struct GroqBackend {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    vision_model: String,
}

impl GroqBackend {
    pub fn new(endpoint: String, api_key: String, model: String, vision_model: String) -> Self {
        Self {
            client: build_http_client(),
            endpoint,
            api_key,
            model,
            vision_model,
        }
    }

    fn model_for(&self, request: &CompletionRequest) -> &str {
        if request.image.is_some() {
            &self.vision_model
        } else {
            &self.model
        }
    }

    fn message_content(request: &CompletionRequest) -> Value {
        match &request.image {
            Some(image) => json!([
                { "type": "text", "text": request.prompt },
                {
                    "type": "image_url",
                    "image_url": {
                        "url": format!(
                            "data:{};base64,{}",
                            image.media_type,
                            BASE64.encode(&image.data)
                        )
                    }
                }
            ]),
            None => json!(request.prompt),
        }
    }
}

#[async_trait]
impl ProviderBackend for GroqBackend {
    fn name(&self) -> &'static str {
        "Groq"
    }

    async fn complete(&self, request: &CompletionRequest) -> ForgeResult<String> {
        let mut body = json!({
            "model": self.model_for(request),
            "messages": [
                { "role": "user", "content": Self::message_content(request) }
            ],
            "temperature": TEMPERATURE,
        });

        // JSON mode is only reliable for object-shaped output here; array
        // responses go unconstrained and lean on the recovery parser.
        if request.response_shape == Some(ResponseShape::SchemaObject) {
            body["response_format"] = json!({ "type": "json_object" });
        }

        let response = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ForgeError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ForgeError::Provider(format!(
                "Groq API request failed ({status}): {error_text}"
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ForgeError::Provider(e.to_string()))?;
        match chat.choices.first() {
            Some(choice) => Ok(choice.message.content.clone()),
            None => Err(ForgeError::Provider("No choices in response".to_string())),
        }
    }
}

/// Gemini generateContent backend. The same model handles text and vision;
/// images travel as an inline_data part and both response shapes can be
/// constrained through generationConfig.
pub struct GeminiBackend {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl GeminiBackend {
    pub fn new(endpoint: String, api_key: String, model: String) -> Self {
        Self {
            client: build_http_client(),
            endpoint,
            api_key,
            model,
        }
    }

    fn generation_config(shape: Option<ResponseShape>) -> Value {
        let mut config = json!({ "temperature": TEMPERATURE });
        if let Some(shape) = shape {
            config["responseMimeType"] = json!("application/json");
            config["responseSchema"] = match shape {
                ResponseShape::SchemaObject => json!({
                    "type": "OBJECT",
                    "properties": {
                        "entities": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "name": { "type": "STRING" },
                                    "fields": { "type": "ARRAY", "items": { "type": "STRING" } },
                                    "relations": { "type": "ARRAY", "items": { "type": "STRING" } }
                                },
                                "required": ["name", "fields", "relations"]
                            }
                        }
                    },
                    "required": ["entities"]
                }),
                ResponseShape::FileArray => json!({
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "fileName": { "type": "STRING" },
                            "code": { "type": "STRING" }
                        },
                        "required": ["fileName", "code"]
                    }
                }),
            };
        }
        config
    }
}

#[async_trait]
impl ProviderBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn complete(&self, request: &CompletionRequest) -> ForgeResult<String> {
        let mut parts = vec![json!({ "text": request.prompt })];
        if let Some(image) = &request.image {
            parts.push(json!({
                "inline_data": {
                    "mime_type": image.media_type,
                    "data": BASE64.encode(&image.data)
                }
            }));
        }

        let body = json!({
            "contents": [ { "parts": parts } ],
            "generationConfig": Self::generation_config(request.response_shape),
        });

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ForgeError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ForgeError::Provider(format!(
                "Gemini API request failed ({status}): {error_text}"
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ForgeError::Provider(e.to_string()))?;
        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ForgeError::Provider("Could not parse Gemini response".to_string()))
    }
}

/// Provider-agnostic client the pipeline talks to.
pub struct ApiClient {
    backend: Box<dyn ProviderBackend>,
}

impl ApiClient {
    /// Build a client from configuration. The credential is a hard
    /// precondition; no request is attempted without one.
    pub fn from_config(config: &AiConfig) -> ForgeResult<Self> {
        let api_key = config.resolved_api_key().ok_or(ForgeError::MissingCredential)?;
        let backend: Box<dyn ProviderBackend> = match config.provider.to_lowercase().as_str() {
            "gemini" | "google" => Box::new(GeminiBackend::new(
                config.api_url.trim_end_matches('/').to_string(),
                api_key,
                config.model.clone(),
            )),
            // Anything else is treated as OpenAI-compatible, which is what
            // Groq speaks.
            _ => Box::new(GroqBackend::new(
                config.api_url.trim_end_matches('/').to_string(),
                api_key,
                config.model.clone(),
                config.vision_model.clone(),
            )),
        };
        Ok(Self { backend })
    }

    pub fn with_backend(backend: Box<dyn ProviderBackend>) -> Self {
        Self { backend }
    }

    pub fn provider_name(&self) -> &'static str {
        self.backend.name()
    }

    pub async fn complete(&self, request: &CompletionRequest) -> ForgeResult<String> {
        self.backend.complete(request).await
    }
}
