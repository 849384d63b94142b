//! Groups generated files into display buckets by inspecting their paths.

use crate::recovery::GeneratedFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Controllers,
    Services,
    Repositories,
    Entities,
    Configuration,
}

impl FileCategory {
    /// Fixed display order; categories with no files are omitted entirely.
    pub const DISPLAY_ORDER: [FileCategory; 5] = [
        FileCategory::Controllers,
        FileCategory::Services,
        FileCategory::Repositories,
        FileCategory::Entities,
        FileCategory::Configuration,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FileCategory::Controllers => "Controllers",
            FileCategory::Services => "Services",
            FileCategory::Repositories => "Repositories",
            FileCategory::Entities => "Entities",
            FileCategory::Configuration => "Configuration",
        }
    }

    /// Path-marker classification, first match wins in priority order.
    pub fn of(path: &str) -> FileCategory {
        if path.contains("/controller/") {
            FileCategory::Controllers
        } else if path.contains("/service/") {
            FileCategory::Services
        } else if path.contains("/repository/") {
            FileCategory::Repositories
        } else if path.contains("/model/") {
            FileCategory::Entities
        } else {
            FileCategory::Configuration
        }
    }
}

/// Bucket the batch for display: fixed category order, files sorted
/// lexicographically by path within each category.
pub fn group_files(files: &[GeneratedFile]) -> Vec<(FileCategory, Vec<&GeneratedFile>)> {
    let mut grouped = Vec::new();
    for category in FileCategory::DISPLAY_ORDER {
        let mut bucket: Vec<&GeneratedFile> = files
            .iter()
            .filter(|file| FileCategory::of(&file.path) == category)
            .collect();
        if bucket.is_empty() {
            continue;
        }
        bucket.sort_by(|a, b| a.path.cmp(&b.path));
        grouped.push((category, bucket));
    }
    grouped
}

/// The file to show first: a controller when one exists, else a model, else
/// the first file of the batch.
pub fn default_preview(files: &[GeneratedFile]) -> Option<&GeneratedFile> {
    files
        .iter()
        .find(|file| file.path.contains("/controller/"))
        .or_else(|| files.iter().find(|file| file.path.contains("/model/")))
        .or_else(|| files.first())
}
