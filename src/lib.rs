// Library exports for the springforge pipeline and its CLI.

pub mod api;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod highlight;
pub mod normalizer;
pub mod output;
pub mod pipeline;
pub mod project;
pub mod prompt;
pub mod recovery;
pub mod schema;

// Re-export the types most callers need.
pub use api::{ApiClient, CompletionRequest, ProviderBackend, ResponseShape};
pub use config::{AiConfig, Config};
pub use error::{ForgeError, ForgeResult};
pub use output::OutputHandler;
pub use pipeline::{GenerationSession, ProjectGenerator, RequestToken};
pub use project::{BuildTool, ProjectMetadata};
pub use recovery::GeneratedFile;
pub use schema::{ImagePayload, IntermediateSchema, SchemaInput};
