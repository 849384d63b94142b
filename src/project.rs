use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum BuildTool {
    Maven,
    Gradle,
}

impl std::fmt::Display for BuildTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildTool::Maven => write!(f, "Maven"),
            BuildTool::Gradle => write!(f, "Gradle"),
        }
    }
}

/// Project coordinates and generation options for the target Spring Boot
/// application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub group: String,
    pub artifact: String,
    pub name: String,
    pub description: String,
    pub package_name: String,
    pub build_tool: BuildTool,
    pub java_version: String,
    pub use_lombok: bool,
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self {
            group: "com.example".to_string(),
            artifact: "demo".to_string(),
            name: "demo".to_string(),
            description: "Demo project for Spring Boot".to_string(),
            package_name: "com.example.demo".to_string(),
            build_tool: BuildTool::Maven,
            java_version: "17".to_string(),
            use_lombok: true,
        }
    }
}

impl ProjectMetadata {
    /// Set the group id and refresh the derived package name.
    pub fn set_group(&mut self, group: &str) {
        self.group = group.trim().to_string();
        self.derive_package_name();
    }

    /// Set the artifact id and refresh the derived package name.
    pub fn set_artifact(&mut self, artifact: &str) {
        self.artifact = artifact.trim().to_string();
        self.derive_package_name();
    }

    /// Set the display name; the artifact id follows the name (lowercased,
    /// whitespace runs become hyphens). The package name is left alone so a
    /// caller-chosen package survives a rename.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
        self.artifact = name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
    }

    fn derive_package_name(&mut self) {
        self.package_name = format!("{}.{}", self.group, self.artifact)
            .to_lowercase()
            .replace('-', "");
    }
}
