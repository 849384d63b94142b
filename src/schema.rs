use serde::{Deserialize, Serialize};

/// One logical record type extracted from the input schema. Fields and
/// relations are literal Java declaration strings and are passed through to
/// the generation prompt verbatim, never re-parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub name: String,
    pub fields: Vec<String>,
    pub relations: Vec<String>,
}

/// Structured schema produced by the SQL pre-pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntermediateSchema {
    pub entities: Vec<EntityDescriptor>,
}

impl IntermediateSchema {
    /// An empty entity list means the pre-pass produced nothing worth
    /// feeding to the generator; callers treat that as a failed pass.
    pub fn is_usable(&self) -> bool {
        !self.entities.is_empty() && self.entities.iter().all(|e| !e.name.trim().is_empty())
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Binary image payload with its declared media type; the bytes travel on a
/// separate channel from the prompt text.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub data: Vec<u8>,
    pub media_type: String,
}

/// The schema description supplied by the caller. Exactly one variant is
/// populated per generation request.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaInput {
    FreeText(String),
    Sql(String),
    Json(String),
    DiagramImage(ImagePayload),
}

impl SchemaInput {
    pub fn is_empty(&self) -> bool {
        match self {
            SchemaInput::FreeText(text) | SchemaInput::Sql(text) | SchemaInput::Json(text) => {
                text.trim().is_empty()
            }
            SchemaInput::DiagramImage(image) => image.data.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_entity_list_is_unusable() {
        assert!(!IntermediateSchema::default().is_usable());
    }

    #[test]
    fn blank_entity_name_is_unusable() {
        let schema = IntermediateSchema {
            entities: vec![EntityDescriptor {
                name: "  ".to_string(),
                fields: vec![],
                relations: vec![],
            }],
        };
        assert!(!schema.is_usable());
    }

    #[test]
    fn parses_normalizer_output_shape() {
        let raw = r#"{"entities":[{"name":"User","fields":["private String name;"],"relations":[]}]}"#;
        let schema: IntermediateSchema = serde_json::from_str(raw).unwrap();
        assert!(schema.is_usable());
        assert_eq!(schema.entities[0].name, "User");
        assert_eq!(schema.entities[0].fields, vec!["private String name;"]);
    }

    #[test]
    fn blank_text_input_is_empty() {
        assert!(SchemaInput::Sql("   \n".to_string()).is_empty());
        assert!(!SchemaInput::FreeText("a blog".to_string()).is_empty());
    }
}
