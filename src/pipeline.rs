//! Orchestration of one generation request: optional SQL normalization with
//! silent fallback, prompt composition, the provider round-trip, and
//! recovery parsing. Also owns the single "current result" slot with
//! last-request-wins semantics.

use crate::api::{ApiClient, CompletionRequest, ResponseShape};
use crate::catalog::Dependency;
use crate::error::ForgeResult;
use crate::normalizer::normalize_sql;
use crate::project::ProjectMetadata;
use crate::prompt::{generation_prompt, PromptPayload};
use crate::recovery::{recover_file_batch, GeneratedFile};
use crate::schema::SchemaInput;

pub struct ProjectGenerator {
    client: ApiClient,
    debug: bool,
}

impl ProjectGenerator {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Run the full pipeline for one request. On success the returned batch
    /// is complete and validated; on failure no partial batch is ever
    /// produced.
    pub async fn generate(
        &self,
        input: &SchemaInput,
        meta: &ProjectMetadata,
        dependencies: &[&Dependency],
    ) -> ForgeResult<Vec<GeneratedFile>> {
        // Stage 1: SQL inputs get a parse-only pre-pass. Any failure here
        // degrades to raw-SQL generation, it never aborts the request.
        let normalized = match input {
            SchemaInput::Sql(sql) if !sql.trim().is_empty() => {
                match normalize_sql(&self.client, sql).await {
                    Ok(schema) => Some(schema.to_pretty_json()),
                    Err(err) => {
                        if self.debug {
                            eprintln!("SQL pre-parsing failed, falling back to direct generation: {err}");
                        }
                        None
                    }
                }
            }
            _ => None,
        };

        let payload = match (&normalized, input) {
            (Some(json), _) => PromptPayload::Json {
                text: json.as_str(),
                from_sql: true,
            },
            (None, SchemaInput::FreeText(text)) => PromptPayload::FreeText(text.as_str()),
            (None, SchemaInput::Sql(sql)) => PromptPayload::Sql(sql.as_str()),
            (None, SchemaInput::Json(json)) => PromptPayload::Json {
                text: json.as_str(),
                from_sql: false,
            },
            (None, SchemaInput::DiagramImage(_)) => PromptPayload::Image,
        };

        // Stage 2: the generation round-trip proper.
        let request = CompletionRequest {
            prompt: generation_prompt(&payload, meta, dependencies),
            image: match input {
                SchemaInput::DiagramImage(image) => Some(image.clone()),
                _ => None,
            },
            response_shape: Some(ResponseShape::FileArray),
        };
        let raw = self.client.complete(&request).await?;
        recover_file_batch(&raw)
    }
}

/// Token identifying one generation request within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Holds the current file batch for one session. Requests may overlap;
/// only the result of the most recently initiated request is kept, and a
/// failed request leaves the previous batch untouched.
#[derive(Debug, Default)]
pub struct GenerationSession {
    counter: u64,
    latest: u64,
    files: Option<Vec<GeneratedFile>>,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a new request as initiated and get its token.
    pub fn begin_request(&mut self) -> RequestToken {
        self.counter += 1;
        self.latest = self.counter;
        RequestToken(self.counter)
    }

    /// Install a successful batch. Returns false (and discards the batch)
    /// when a newer request was initiated in the meantime.
    pub fn complete(&mut self, token: RequestToken, batch: Vec<GeneratedFile>) -> bool {
        if token.0 != self.latest {
            return false;
        }
        self.files = Some(batch);
        true
    }

    pub fn files(&self) -> Option<&[GeneratedFile]> {
        self.files.as_deref()
    }
}
