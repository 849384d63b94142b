//! SQL pre-pass: ask the model to parse DDL into a structured entity list
//! before the main generation call. Failures here are recoverable; the
//! pipeline falls back to feeding the raw SQL to the generation prompt.

use crate::api::{ApiClient, CompletionRequest, ResponseShape};
use crate::error::{ForgeError, ForgeResult};
use crate::prompt::sql_parser_prompt;
use crate::schema::IntermediateSchema;

pub async fn normalize_sql(client: &ApiClient, sql: &str) -> ForgeResult<IntermediateSchema> {
    let request = CompletionRequest {
        prompt: sql_parser_prompt(sql),
        image: None,
        response_shape: Some(ResponseShape::SchemaObject),
    };
    let raw = client.complete(&request).await?;

    let schema: IntermediateSchema = serde_json::from_str(raw.trim())
        .map_err(|e| ForgeError::NormalizationFailed(format!("unparseable response: {e}")))?;
    if !schema.is_usable() {
        return Err(ForgeError::NormalizationFailed(
            "response contained no entities".to_string(),
        ));
    }
    Ok(schema)
}
