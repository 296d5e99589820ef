use glob::Pattern;
use relative_path::{RelativePath, RelativePathBuf};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Metrics artifact file name, under the logs directory.
pub const METRICS_FILE: &str = "tooltip-metrics.json";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid docs directory: {0}")]
    InvalidDocsDir(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write content to a file, creating parent directories as needed
pub fn write_file(relative_path: &RelativePath, root: &Path, content: &str) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Scan for markdown files in the docs directory, skipping any whose path
/// relative to the root matches one of `exclude`. Returned paths are
/// relative and sorted.
pub fn scan_markdown_files(
    docs_root: &Path,
    exclude: &[Pattern],
) -> Result<Vec<RelativePathBuf>, IoError> {
    if !docs_root.exists() {
        return Err(IoError::InvalidDocsDir(
            "docs directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(docs_root, &mut files)?;

    let mut relative: Vec<RelativePathBuf> = files
        .iter()
        .filter_map(|path| path.strip_prefix(docs_root).ok())
        .filter_map(|path| RelativePathBuf::from_path(path).ok())
        .filter(|path| {
            let excluded = exclude.iter().any(|p| p.matches(path.as_str()));
            if excluded {
                log::debug!("scan: excluded {path}");
            }
            !excluded
        })
        .collect();
    relative.sort();
    Ok(relative)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_docs_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidDocsDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

/// Pretty-printed JSON with a trailing newline.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, IoError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// Write the metrics artifact under `logs_dir`, creating it if needed.
/// Returns the path written.
pub fn write_metrics<T: Serialize>(logs_dir: &Path, metrics: &T) -> Result<PathBuf, IoError> {
    let json = to_json(metrics)?;
    write_file(RelativePath::new(METRICS_FILE), logs_dir, &json)?;
    Ok(logs_dir.join(METRICS_FILE))
}

/// Side-car path for a page: `guide/retry.md` → `guide/retry.tooltips.json`.
pub fn sidecar_path(page: &RelativePath) -> RelativePathBuf {
    page.with_extension("tooltips.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_docs_dir, create_test_file};

    #[test]
    fn test_scan_and_load_files() {
        // Given a docs directory with markdown files
        let docs_dir = create_test_docs_dir();
        create_test_file(&docs_dir, "test1.md", "# First");
        create_test_file(&docs_dir, "test2.md", "# Second");

        // When scanning for files
        let files = scan_markdown_files(docs_dir.path(), &[]).unwrap();

        // Then we find the expected files
        assert_eq!(
            files,
            vec![RelativePathBuf::from("test1.md"), RelativePathBuf::from("test2.md")]
        );
    }

    #[test]
    fn test_handle_invalid_docs_directory() {
        let nonexistent_path = PathBuf::from("/this/path/does/not/exist");

        let result = scan_markdown_files(&nonexistent_path, &[]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("docs directory"));
    }

    #[test]
    fn test_scan_nested_directories() {
        let docs_dir = create_test_docs_dir();
        create_test_file(&docs_dir, "root.md", "# Root file");
        create_test_file(&docs_dir, "patterns/nested.md", "# Nested file");

        let files = scan_markdown_files(docs_dir.path(), &[]).unwrap();

        assert_eq!(
            files,
            vec![
                RelativePathBuf::from("patterns/nested.md"),
                RelativePathBuf::from("root.md")
            ]
        );
    }

    #[test]
    fn test_ignore_non_markdown_files() {
        let docs_dir = create_test_docs_dir();
        create_test_file(&docs_dir, "document.md", "# Markdown");
        create_test_file(&docs_dir, "image.png", "fake image data");
        create_test_file(&docs_dir, "config.json", "{}");

        let files = scan_markdown_files(docs_dir.path(), &[]).unwrap();

        assert_eq!(files, vec![RelativePathBuf::from("document.md")]);
    }

    #[test]
    fn test_exclude_patterns() {
        let docs_dir = create_test_docs_dir();
        create_test_file(&docs_dir, "keep.md", "# Keep");
        create_test_file(&docs_dir, "drafts/wip.md", "# Draft");
        create_test_file(&docs_dir, "drafts/deep/older.md", "# Older");

        let exclude = vec![Pattern::new("drafts/**").unwrap()];
        let files = scan_markdown_files(docs_dir.path(), &exclude).unwrap();

        assert_eq!(files, vec![RelativePathBuf::from("keep.md")]);
    }

    #[test]
    fn test_validate_docs_dir() {
        let docs_dir = create_test_docs_dir();
        assert!(validate_docs_dir(docs_dir.path()).is_ok());
        assert!(matches!(
            validate_docs_dir(Path::new("/nonexistent/path")),
            Err(IoError::InvalidDocsDir(_))
        ));
    }

    #[test]
    fn test_write_file_creates_parent_directories() {
        let docs_dir = create_test_docs_dir();
        let relative_path = RelativePath::new("folder/subfolder/new_file.md");

        write_file(relative_path, docs_dir.path(), "# Nested").unwrap();

        let written = fs::read_to_string(relative_path.to_path(docs_dir.path())).unwrap();
        assert_eq!(written, "# Nested");
        assert!(docs_dir.path().join("folder").join("subfolder").is_dir());
    }

    #[test]
    fn test_write_metrics_creates_logs_dir() {
        let root = create_test_docs_dir();
        let logs = root.path().join("logs");

        let path = write_metrics(&logs, &serde_json::json!({ "summary": {} })).unwrap();

        assert_eq!(path, logs.join(METRICS_FILE));
        let written = fs::read_to_string(path).unwrap();
        assert!(written.ends_with("}\n"));
    }

    #[test]
    fn test_sidecar_path() {
        assert_eq!(
            sidecar_path(RelativePath::new("guide/retry.md")),
            RelativePathBuf::from("guide/retry.tooltips.json")
        );
    }
}
