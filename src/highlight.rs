//! Cosmetic rendering of generated Java source: light structural
//! reformatting, brace-depth re-indentation, and a single-pass greedy
//! tokenizer for colorized display. Token text concatenates back to exactly
//! the reformatted source, so display never corrupts what gets exported.

pub const INDENT: &str = "    ";

const JAVA_KEYWORDS: &[&str] = &[
    "package", "import", "public", "class", "interface", "private", "protected", "static",
    "final", "void", "enum", "extends", "implements", "return", "new", "super", "this", "if",
    "else", "for", "while", "do", "switch", "case", "break", "continue", "throw", "throws",
    "try", "catch", "finally", "true", "false", "null",
];

const JAVA_TYPES: &[&str] = &[
    "String", "Long", "Integer", "List", "Set", "Map", "Boolean", "double", "int", "long",
    "boolean", "char", "byte", "short", "float", "Object", "Date", "LocalDate", "LocalDateTime",
    "UUID", "HashSet", "ArrayList", "HashMap", "GenerationType", "FetchType", "CascadeType",
    "ResponseEntity", "Optional",
];

/// Explanatory note attached to a known annotation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationNote {
    pub annotation: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const ANNOTATION_NOTES: &[AnnotationNote] = &[
    AnnotationNote { annotation: "@Entity", title: "@Entity", description: "Specifies that the class is an entity. This annotation is applied to the entity class." },
    AnnotationNote { annotation: "@Table", title: "@Table", description: "Specifies the primary table for the annotated entity." },
    AnnotationNote { annotation: "@Id", title: "@Id", description: "Specifies the primary key of an entity." },
    AnnotationNote { annotation: "@GeneratedValue", title: "@GeneratedValue", description: "Provides for the specification of generation strategies for the values of primary keys." },
    AnnotationNote { annotation: "@Column", title: "@Column", description: "Specifies the mapped column for a persistent property or field." },
    AnnotationNote { annotation: "@OneToMany", title: "@OneToMany", description: "Defines a many-valued association with one-to-many multiplicity." },
    AnnotationNote { annotation: "@ManyToOne", title: "@ManyToOne", description: "Defines a single-valued association to another entity class that has many-to-one multiplicity." },
    AnnotationNote { annotation: "@ManyToMany", title: "@ManyToMany", description: "Defines a many-valued association with many-to-many multiplicity." },
    AnnotationNote { annotation: "@JoinColumn", title: "@JoinColumn", description: "Specifies a column for joining an entity association or element collection." },
    AnnotationNote { annotation: "@Data", title: "Lombok @Data", description: "A convenient shortcut annotation that bundles the features of @ToString, @EqualsAndHashCode, @Getter, @Setter and @RequiredArgsConstructor together." },
    AnnotationNote { annotation: "@NoArgsConstructor", title: "Lombok @NoArgsConstructor", description: "Generates a constructor with no parameters." },
    AnnotationNote { annotation: "@AllArgsConstructor", title: "Lombok @AllArgsConstructor", description: "Generates a constructor with one parameter for each field in your class." },
    AnnotationNote { annotation: "@Repository", title: "@Repository", description: "Indicates that an annotated class is a \"Repository\", a mechanism for encapsulating storage, retrieval, and search behavior which emulates a collection of objects." },
];

pub fn annotation_note(token: &str) -> Option<&'static AnnotationNote> {
    ANNOTATION_NOTES.iter().find(|note| note.annotation == token)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Comment,
    StringLit,
    Annotation,
    Keyword,
    BuiltinType,
    TypeName,
    Number,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Reformat model output for display: pull `else`/`catch`/`finally`
/// continuations up onto the preceding closing brace, re-indent by brace
/// depth, and give the package line and the leading import block breathing
/// room. Blank lines pass through unindented.
pub fn reformat(code: &str) -> String {
    let collapsed = collapse_continuations(code);
    let mut lines = indent_by_braces(&collapsed);
    space_header_lines(&mut lines);
    lines.join("\n")
}

fn is_continuation_keyword(trimmed: &str) -> bool {
    ["else", "catch", "finally"].iter().any(|kw| {
        trimmed == *kw
            || trimmed
                .strip_prefix(kw)
                .is_some_and(|rest| rest.starts_with(|c: char| !c.is_alphanumeric() && c != '_'))
    })
}

fn collapse_continuations(code: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for line in code.lines() {
        let trimmed = line.trim();
        let joins_previous = is_continuation_keyword(trimmed)
            && out.last().is_some_and(|prev: &String| prev.ends_with('}'));
        if joins_previous {
            let prev = out.last_mut().unwrap();
            prev.push(' ');
            prev.push_str(trimmed);
        } else {
            out.push(line.to_string());
        }
    }
    out.join("\n")
}

fn indent_by_braces(code: &str) -> Vec<String> {
    let mut level: usize = 0;
    let mut out = Vec::new();
    for line in code.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            out.push(String::new());
            continue;
        }
        if trimmed.starts_with('}') {
            level = level.saturating_sub(1);
        }
        out.push(format!("{}{}", INDENT.repeat(level), trimmed));
        if trimmed.ends_with('{') {
            level += 1;
        }
    }
    out
}

/// Blank line after the package declaration and after the last import of
/// the first import block, when not already present.
fn space_header_lines(lines: &mut Vec<String>) {
    if let Some(pos) = lines
        .iter()
        .position(|l| l.starts_with("package ") && l.ends_with(';'))
    {
        if lines.get(pos + 1).is_some_and(|next| !next.is_empty()) {
            lines.insert(pos + 1, String::new());
        }
    }
    if let Some(first_import) = lines.iter().position(|l| l.starts_with("import ")) {
        let mut last_import = first_import;
        while lines
            .get(last_import + 1)
            .is_some_and(|l| l.starts_with("import "))
        {
            last_import += 1;
        }
        if lines.get(last_import + 1).is_some_and(|next| !next.is_empty()) {
            lines.insert(last_import + 1, String::new());
        }
    }
}

fn classify_word(word: &str) -> TokenKind {
    if JAVA_KEYWORDS.contains(&word) {
        TokenKind::Keyword
    } else if JAVA_TYPES.contains(&word) {
        TokenKind::BuiltinType
    } else if word.starts_with(|c: char| c.is_ascii_uppercase()) {
        TokenKind::TypeName
    } else {
        TokenKind::Plain
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Single-pass greedy tokenizer. Every branch consumes at least one
/// character, so the loop always terminates, and token text concatenates
/// back to the input line unchanged.
pub fn tokenize_line(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = line;

    while !rest.is_empty() {
        // Line comment: consumes the remainder.
        if rest.starts_with("//") {
            tokens.push(Token::new(rest, TokenKind::Comment));
            break;
        }

        // String literal: scan to the first unescaped closing quote.
        if rest.starts_with('"') {
            let bytes = rest.as_bytes();
            let mut end = 1;
            while end < bytes.len() && !(bytes[end] == b'"' && bytes[end - 1] != b'\\') {
                end += 1;
            }
            end = (end + 1).min(bytes.len());
            tokens.push(Token::new(&rest[..end], TokenKind::StringLit));
            rest = &rest[end..];
            continue;
        }

        // Annotation: '@' plus identifier characters.
        if rest.starts_with('@') {
            let end = 1 + rest[1..]
                .find(|c: char| !is_word_char(c))
                .unwrap_or(rest.len() - 1);
            tokens.push(Token::new(&rest[..end], TokenKind::Annotation));
            rest = &rest[end..];
            continue;
        }

        let first = rest.chars().next().unwrap();

        // Identifier or keyword.
        if first.is_ascii_alphabetic() || first == '_' {
            let end = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
            let word = &rest[..end];
            tokens.push(Token::new(word, classify_word(word)));
            rest = &rest[end..];
            continue;
        }

        // Integer literal.
        if first.is_ascii_digit() {
            let end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            tokens.push(Token::new(&rest[..end], TokenKind::Number));
            rest = &rest[end..];
            continue;
        }

        // Whitespace run. Kept separate from punctuation so a comment
        // after "; " is still recognized at the next loop iteration.
        if first.is_whitespace() {
            let end = rest
                .find(|c: char| !c.is_whitespace())
                .unwrap_or(rest.len());
            tokens.push(Token::new(&rest[..end], TokenKind::Plain));
            rest = &rest[end..];
            continue;
        }

        // Run of punctuation, operators and anything else non-word.
        let end = rest
            .find(|c: char| c.is_whitespace() || is_word_char(c) || c == '@' || c == '"')
            .unwrap_or(rest.len());
        if end > 0 {
            tokens.push(Token::new(&rest[..end], TokenKind::Plain));
            rest = &rest[end..];
            continue;
        }

        // Failsafe: consume a single character so the loop cannot stall.
        let width = first.len_utf8();
        tokens.push(Token::new(&rest[..width], TokenKind::Plain));
        rest = &rest[width..];
    }

    tokens
}

/// Reformat and tokenize a whole file for display, one token list per line.
pub fn highlight(code: &str) -> Vec<Vec<Token>> {
    reformat(code).lines().map(tokenize_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rejoin(tokens: &[Token]) -> String {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn tokens_are_lossless_over_reformatted_text() {
        let code = "package com.example.demo.model;\nimport jakarta.persistence.*;\npublic class User {\nprivate String name; // display name\nprivate int count = 42;\n}";
        let formatted = reformat(code);
        for line in formatted.lines() {
            assert_eq!(rejoin(&tokenize_line(line)), line);
        }
    }

    #[test]
    fn tokenizer_terminates_on_awkward_input() {
        for line in [
            "",
            "\"unterminated string",
            "@",
            "@@@@",
            "éàü",
            "    \t  ",
            "}}}}{{{{",
            "a//comment",
            "1234567890",
            "\"\"",
        ] {
            let tokens = tokenize_line(line);
            assert_eq!(rejoin(&tokens), line);
        }
    }

    #[test]
    fn comment_consumes_rest_of_line() {
        let tokens = tokenize_line("private int x; // counter {");
        let comment = tokens.last().unwrap();
        assert_eq!(comment.kind, TokenKind::Comment);
        assert_eq!(comment.text, "// counter {");
    }

    #[test]
    fn string_scanning_skips_escaped_quotes() {
        let tokens = tokenize_line(r#"@Table(name = "po\"sts")"#);
        let lit = tokens
            .iter()
            .find(|t| t.kind == TokenKind::StringLit)
            .unwrap();
        assert_eq!(lit.text, r#""po\"sts""#);
    }

    #[test]
    fn word_classification_covers_all_buckets() {
        let tokens = tokenize_line("public String userName = name; Optional<Post> post; 7");
        let kind_of = |text: &str| {
            tokens
                .iter()
                .find(|t| t.text == text)
                .unwrap_or_else(|| panic!("no token {text}"))
                .kind
        };
        assert_eq!(kind_of("public"), TokenKind::Keyword);
        assert_eq!(kind_of("String"), TokenKind::BuiltinType);
        assert_eq!(kind_of("Post"), TokenKind::TypeName);
        assert_eq!(kind_of("userName"), TokenKind::Plain);
        assert_eq!(kind_of("7"), TokenKind::Number);
    }

    #[test]
    fn known_annotations_resolve_notes() {
        let tokens = tokenize_line("@Entity @Custom");
        let annotations: Vec<&Token> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Annotation)
            .collect();
        assert_eq!(annotations.len(), 2);
        assert!(annotation_note(&annotations[0].text).is_some());
        assert!(annotation_note(&annotations[1].text).is_none());
    }

    #[test]
    fn reindents_by_brace_depth() {
        let code = "public class User {\nprivate Long id;\nif (x) {\nreturn;\n}\n}";
        let formatted = reformat(code);
        let lines: Vec<&str> = formatted.lines().collect();
        assert_eq!(lines[0], "public class User {");
        assert_eq!(lines[1], "    private Long id;");
        assert_eq!(lines[2], "    if (x) {");
        assert_eq!(lines[3], "        return;");
        assert_eq!(lines[4], "    }");
        assert_eq!(lines[5], "}");
    }

    #[test]
    fn collapses_else_onto_closing_brace() {
        let code = "if (x) {\na();\n}\nelse {\nb();\n}";
        let formatted = reformat(code);
        assert!(formatted.contains("} else {"));
    }

    #[test]
    fn does_not_collapse_identifiers_starting_with_else() {
        let code = "int x;\n}\nelseWhere();";
        let formatted = reformat(code);
        assert!(!formatted.contains("} elseWhere"));
    }

    #[test]
    fn blank_lines_pass_through_unindented() {
        let code = "class A {\n\nint x;\n}";
        let formatted = reformat(code);
        let lines: Vec<&str> = formatted.lines().collect();
        assert_eq!(lines[1], "");
    }

    #[test]
    fn header_gets_spacing_after_package_and_imports() {
        let code = "package a.b;\nimport x.Y;\nimport x.Z;\npublic class C {\n}";
        let formatted = reformat(code);
        let lines: Vec<&str> = formatted.lines().collect();
        assert_eq!(lines[0], "package a.b;");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "import x.Y;");
        assert_eq!(lines[3], "import x.Z;");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "public class C {");
    }

    #[test]
    fn highlight_splits_into_lines() {
        let lines = highlight("class A {\nint x;\n}");
        assert_eq!(lines.len(), 3);
    }
}
