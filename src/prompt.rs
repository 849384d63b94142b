//! Prompt composition for the two LLM calls: the parse-only SQL pre-pass
//! and the main file-generation request. Pure string building; every call
//! with the same inputs produces byte-identical text.

use std::fmt::Write;

use crate::catalog::Dependency;
use crate::project::ProjectMetadata;

/// The input payload as the generation prompt describes it. The image bytes
/// travel on a separate channel, so the image variant carries no data here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PromptPayload<'a> {
    FreeText(&'a str),
    Sql(&'a str),
    Json { text: &'a str, from_sql: bool },
    Image,
}

impl PromptPayload<'_> {
    fn describe(&self) -> String {
        match self {
            PromptPayload::FreeText(text) => {
                format!("a natural language description: \"{text}\"")
            }
            PromptPayload::Sql(sql) => {
                format!("the following SQL schema:\n```sql\n{sql}\n```")
            }
            PromptPayload::Json { text, from_sql: true } => format!(
                "a structured schema representation (pre-processed from SQL):\n```json\n{text}\n```"
            ),
            PromptPayload::Json { text, from_sql: false } => {
                format!("the following ERD JSON:\n```json\n{text}\n```")
            }
            PromptPayload::Image => "an uploaded ER diagram image.".to_string(),
        }
    }
}

/// Parse-only instruction for the SQL pre-pass. The model must answer with
/// exactly one JSON object holding the entity list.
pub fn sql_parser_prompt(sql: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "You are a database schema analysis tool. Your sole purpose is to parse a given SQL schema \
         and convert it into a structured JSON format representing entities, fields, and relationships.\n\n",
    );
    let _ = write!(prompt, "**Input SQL Schema:**\n```sql\n{sql}\n```\n\n");
    prompt.push_str(
        "**Instructions:**\n\
         1.  Identify all tables and treat them as entities.\n\
         2.  For each table, identify its columns. Determine an appropriate Java type for each column \
         (e.g., VARCHAR -> String, INT/BIGINT -> Long, DATE/DATETIME -> LocalDateTime, BOOLEAN -> boolean).\n\
         3.  Identify primary keys.\n\
         4.  Identify foreign key constraints to determine relationships (@ManyToOne, @OneToMany).\n\
         5.  Do not generate any code, explanations, or text.\n\
         6.  Your output MUST be ONLY the JSON object.\n\n",
    );
    prompt.push_str(
        "**Output JSON Format:**\n\
         Provide a single JSON object with one key, \"entities\", which is an array of entity objects. \
         Each entity object should have:\n\
         -   \"name\": The name of the entity (e.g., \"User\").\n\
         -   \"fields\": An array of strings describing each field (e.g., \"private String username;\").\n\
         -   \"relations\": An array of strings describing each relationship \
         (e.g., \"@OneToMany(mappedBy = \\\"user\\\") private Set<Post> posts;\").\n\n",
    );
    prompt.push_str(
        "**Example:**\n\
         For SQL:\n\
         ```sql\n\
         CREATE TABLE users (id BIGINT PRIMARY KEY, name VARCHAR(255));\n\
         CREATE TABLE posts (id BIGINT PRIMARY KEY, title VARCHAR(255), user_id BIGINT, FOREIGN KEY (user_id) REFERENCES users(id));\n\
         ```\n\n\
         Your output should be:\n\
         {\n\
           \"entities\": [\n\
             {\n\
               \"name\": \"User\",\n\
               \"fields\": [\"private String name;\"],\n\
               \"relations\": [\"@OneToMany(mappedBy = \\\"user\\\") private Set<Post> posts;\"]\n\
             },\n\
             {\n\
               \"name\": \"Post\",\n\
               \"fields\": [\"private String title;\"],\n\
               \"relations\": [\"@ManyToOne @JoinColumn(name = \\\"user_id\\\") private User user;\"]\n\
             }\n\
           ]\n\
         }\n\n\
         Respond ONLY with valid JSON. No additional text or explanation.\n",
    );
    prompt
}

/// The main generation instruction: project coordinates, the input payload,
/// the formatting rulebook, the four-file-per-entity contract, and the JSON
/// output contract.
pub fn generation_prompt(
    payload: &PromptPayload<'_>,
    meta: &ProjectMetadata,
    dependencies: &[&Dependency],
) -> String {
    let dep_names = dependencies
        .iter()
        .map(|dep| dep.name)
        .collect::<Vec<_>>()
        .join(", ");

    let lombok_instruction = if meta.use_lombok {
        "If Lombok is a dependency, use `@Data`, `@NoArgsConstructor`, and `@AllArgsConstructor`. \
         Ensure `@Data` is used, as it is crucial."
    } else {
        "Generate standard getters, setters, a no-arg constructor, an all-args constructor, \
         `equals()`, `hashCode()`, and `toString()` methods manually. DO NOT use Lombok annotations."
    };

    let mut prompt = String::new();
    prompt.push_str(
        "You are an expert Spring Boot developer specializing in creating well-structured, layered \
         applications with JPA/Hibernate.\n\
         Your task is to generate a complete set of Java files for a new Spring Boot project based on \
         the provided database schema description.\n\
         Generate the code as quickly as possible.\n\n",
    );

    let _ = write!(
        prompt,
        "**Project Configuration:**\n\
         - Group ID: {}\n\
         - Artifact ID: {}\n\
         - Base Package: {}\n\
         - Java Version: {}\n\
         - Dependencies: {}\n\
         - Use Lombok: {}\n\n",
        meta.group, meta.artifact, meta.package_name, meta.java_version, dep_names, meta.use_lombok
    );

    let _ = write!(
        prompt,
        "**Input Schema:**\n\
         The database schema is provided as {}\n\n",
        payload.describe()
    );

    prompt.push_str(
        "**Code Formatting Rules (Follow these VERY strictly):**\n\
         1.  **Annotations:** Place each annotation on its own line, followed by a blank line before \
         the next annotation or the declaration itself.\n\
         2.  **Declarations:** Each field and method declaration must start on a new line.\n\
         3.  **Spacing:**\n\
         \x20   -   Use a single blank line to separate methods.\n\
         \x20   -   Use standard Java spacing around operators (e.g., `x = y`, not `x=y`).\n\
         4.  **Indentation:** Use 4 spaces for indentation.\n\
         5.  **Structure:** Follow the standard Java class structure: fields, then constructors, then methods.\n\n",
    );

    prompt.push_str(
        "**Your Instructions:**\n\
         For EACH entity identified in the schema, you MUST generate FOUR files: a Controller, a \
         Service, a Repository, and a Model (Entity).\n\
         Strictly enforce separation of concerns: Controllers for API, Services for business logic, \
         and Entities for data state only.\n\n",
    );

    let _ = write!(
        prompt,
        "**1. Model (Entity) Class:**\n\
         \x20   -   Package: `{package}.model`\n\
         \x20   -   This class is a pure data object (POJO/Entity). **It MUST NOT contain any business logic.**\n\
         \x20   -   Specifically, do not add helper methods for managing relationships (e.g., `addPost(Post p)`). \
         All relationship management logic belongs in the Service layer.\n\
         \x20   -   Annotations: `@Entity`, `@Table`.\n\
         \x20   -   Primary Key: Add an `@Id` field named `id` of type `Long`, with \
         `@GeneratedValue(strategy = GenerationType.IDENTITY)`.\n\
         \x20   -   Relationships (`@OneToMany`, `@ManyToOne`, etc.):\n\
         \x20       -   Default to `fetch = FetchType.LAZY`.\n\
         \x20       -   For `@OneToMany`, use `mappedBy` and a `Set<T>` collection.\n\
         \x20       -   Use `@JoinColumn` on the owning side of `@ManyToOne` relationships.\n\
         \x20   -   Lombok/Getters/Setters: {lombok}\n\n",
        package = meta.package_name,
        lombok = lombok_instruction
    );

    let _ = write!(
        prompt,
        "**2. Repository Interface:**\n\
         \x20   -   Package: `{package}.repository`\n\
         \x20   -   Name: `${{EntityName}}Repository`\n\
         \x20   -   Extend `JpaRepository<${{EntityName}}, Long>`.\n\
         \x20   -   Annotate with `@Repository`.\n\n",
        package = meta.package_name
    );

    let _ = write!(
        prompt,
        "**3. Service Class:**\n\
         \x20   -   Package: `{package}.service`\n\
         \x20   -   Name: `${{EntityName}}Service`\n\
         \x20   -   Annotate with `@Service`.\n\
         \x20   -   **Use constructor injection** to inject the `${{EntityName}}Repository`.\n\
         \x20   -   Implement full CRUD logic. This is the layer responsible for **all business logic**, \
         including managing entity relationships.\n\
         \x20       -   `getAll()`: Return `List<${{EntityName}}>`.\n\
         \x20       -   `getById(Long id)`: Return `Optional<${{EntityName}}>`.\n\
         \x20       -   `create(${{EntityName}} entity)`: Save and return the new entity.\n\
         \x20       -   `update(Long id, ${{EntityName}} details)`: Find the existing entity by ID. If found, \
         update its fields from 'details', save, and return the updated entity. If not found, return \
         `Optional.empty()`.\n\
         \x20       -   `delete(Long id)`: Check if exists, then delete. Return `boolean` (true if deleted, \
         false if not found).\n\n",
        package = meta.package_name
    );

    let _ = write!(
        prompt,
        "**4. Controller Class:**\n\
         \x20   -   Package: `{package}.controller`\n\
         \x20   -   Name: `${{EntityName}}Controller`\n\
         \x20   -   Annotations: `@RestController`, `@RequestMapping(\"/api/v1/${{entity_name_plural_lowercase}}\")`.\n\
         \x20   -   **Use constructor injection** to inject the `${{EntityName}}Service`.\n\
         \x20   -   Implement REST endpoints for all CRUD operations, returning `ResponseEntity`:\n\
         \x20       -   `GET /`: Calls `service.getAll()`. Returns `200 OK` with the list.\n\
         \x20       -   `GET /{{id}}`: Calls `service.getById()`. Returns `200 OK` with the entity or `404 Not Found`.\n\
         \x20       -   `POST /`: Calls `service.create()`. Returns `201 Created` with the new entity.\n\
         \x20       -   `PUT /{{id}}`: Calls `service.update()`. Returns `200 OK` with the updated entity or \
         `404 Not Found`.\n\
         \x20       -   `DELETE /{{id}}`: Calls `service.delete()`. Returns `204 No Content` on success or \
         `404 Not Found`.\n\n",
        package = meta.package_name
    );

    prompt.push_str(
        "**Output Format (CRITICAL):**\n\
         You MUST respond with a valid JSON array starting with [ and ending with ].\n\
         The array must contain objects, where each object represents ONE file with this EXACT structure:\n\
         `{ \"fileName\": \"src/main/java/com/example/demo/model/User.java\", \"code\": \"package com.example.demo...\" }`\n\n\
         **CRITICAL RULES:**\n\
         1. Start with opening bracket [ and end with closing bracket ]\n\
         2. Each object must have ONLY two properties: \"fileName\" and \"code\"\n\
         3. Use '\\n' for all line breaks inside the 'code' property\n\
         4. Do NOT wrap the response in any markdown, comments, or extra text\n\
         5. The response must be valid JSON that can be parsed directly\n\n\
         Your ENTIRE response must be ONLY this JSON array. Nothing before it, nothing after it.\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use pretty_assertions::assert_eq;

    fn sample_deps() -> Vec<&'static Dependency> {
        catalog::resolve(&["web".to_string(), "data-jpa".to_string(), "lombok".to_string()])
    }

    #[test]
    fn generation_prompt_is_deterministic() {
        let meta = ProjectMetadata::default();
        let deps = sample_deps();
        let payload = PromptPayload::FreeText("a blog with users and posts");
        let first = generation_prompt(&payload, &meta, &deps);
        let second = generation_prompt(&payload, &meta, &deps);
        assert_eq!(first, second);
    }

    #[test]
    fn generation_prompt_embeds_metadata_and_dependency_names() {
        let mut meta = ProjectMetadata::default();
        meta.set_group("com.acme");
        meta.set_artifact("shop");
        let deps = sample_deps();
        let prompt = generation_prompt(&PromptPayload::FreeText("a shop"), &meta, &deps);
        assert!(prompt.contains("- Group ID: com.acme"));
        assert!(prompt.contains("- Artifact ID: shop"));
        assert!(prompt.contains("- Base Package: com.acme.shop"));
        assert!(prompt.contains("Spring Web, Spring Data JPA, Lombok"));
        assert!(prompt.contains("`com.acme.shop.model`"));
    }

    #[test]
    fn payload_descriptions_follow_variant() {
        assert!(PromptPayload::FreeText("x").describe().starts_with("a natural language description: \"x\""));
        assert!(PromptPayload::Sql("CREATE TABLE t (id INT);")
            .describe()
            .contains("```sql\nCREATE TABLE t (id INT);\n```"));
        let normalized = PromptPayload::Json { text: "{}", from_sql: true }.describe();
        assert!(normalized.contains("pre-processed from SQL"));
        let direct = PromptPayload::Json { text: "{}", from_sql: false }.describe();
        assert!(direct.contains("ERD JSON"));
        assert_eq!(PromptPayload::Image.describe(), "an uploaded ER diagram image.");
    }

    #[test]
    fn style_directive_branches_on_lombok_flag() {
        let deps = sample_deps();
        let mut meta = ProjectMetadata::default();
        meta.use_lombok = true;
        let with = generation_prompt(&PromptPayload::FreeText("x"), &meta, &deps);
        assert!(with.contains("@Data"));
        assert!(with.contains("@NoArgsConstructor"));
        assert!(with.contains("@AllArgsConstructor"));

        meta.use_lombok = false;
        let without = generation_prompt(&PromptPayload::FreeText("x"), &meta, &deps);
        assert!(without.contains("DO NOT use Lombok annotations"));
        assert!(without.contains("`equals()`"));
    }

    #[test]
    fn sql_parser_prompt_fences_input_and_requests_object() {
        let prompt = sql_parser_prompt("CREATE TABLE users (id BIGINT);");
        assert!(prompt.contains("```sql\nCREATE TABLE users (id BIGINT);\n```"));
        assert!(prompt.contains("\"entities\""));
        assert!(prompt.contains("ONLY the JSON object"));
    }
}
