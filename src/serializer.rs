//! Serialization of generated documents to YAML or JSON.

use crate::openapi_builder::ApiDocument;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes a document to YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml(doc: &ApiDocument) -> Result<String> {
    debug!("Serializing document to YAML");
    serde_yaml::to_string(doc).context("Failed to serialize document to YAML")
}

/// Serializes a document to pretty-printed JSON, the format served to the viewer page.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json(doc: &ApiDocument) -> Result<String> {
    debug!("Serializing document to JSON");
    serde_json::to_string_pretty(doc).context("Failed to serialize document to JSON")
}

/// Writes string content to a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directories or the file cannot be written.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi_builder::{generate, GenerateOptions};
    use crate::registry::ModelRegistry;
    use crate::routes::{Handler, HandlerMethod, HttpMethod, Route};
    use tempfile::TempDir;

    fn create_test_document(dialect: &str) -> ApiDocument {
        let route = Route::new(
            r"/users/(?P<user_id>\d+)",
            Handler::new("UserHandler").method(
                HttpMethod::Get,
                HandlerMethod::new()
                    .with_params(["user_id"])
                    .with_docstring("---\ndescription: Get a user\nresponses:\n  200:\n    description: OK\n"),
            ),
        );
        let options = GenerateOptions {
            title: "Test API".to_string(),
            description: "A test API".to_string(),
            api_definition_version: dialect.to_string(),
            ..GenerateOptions::default()
        };
        generate(&[route], &ModelRegistry::new(), &options).unwrap()
    }

    #[test]
    fn test_serialize_yaml() {
        let yaml = serialize_yaml(&create_test_document("swagger:2.0")).unwrap();

        assert!(yaml.contains("swagger: '2.0'") || yaml.contains("swagger: \"2.0\""));
        assert!(yaml.contains("title: Test API"));
        assert!(yaml.contains("description: A test API"));
        assert!(yaml.contains("basePath: /"));
        assert!(yaml.contains("/users/{user_id}"));
        assert!(yaml.contains("get:"));
    }

    #[test]
    fn test_serialize_json() {
        let json = serialize_json(&create_test_document("openapi:3.0")).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["openapi"], "3.0.3");
        assert_eq!(parsed["info"]["title"], "Test API");
        assert_eq!(
            parsed["paths"]["/users/{user_id}"]["get"]["responses"]["200"]["description"],
            "OK"
        );
    }

    #[test]
    fn test_serialize_json_pretty_format() {
        let json = serialize_json(&create_test_document("openapi:3.0")).unwrap();
        assert!(json.contains('\n'));
        assert!(json.lines().count() > 5, "Pretty printed JSON should have multiple lines");
    }

    #[test]
    fn test_json_keeps_top_level_order() {
        let json = serialize_json(&create_test_document("swagger:2.0")).unwrap();
        let swagger = json.find("\"swagger\"").unwrap();
        let info = json.find("\"info\"").unwrap();
        let paths = json.find("\"paths\"").unwrap();
        assert!(swagger < info && info < paths);
    }

    #[test]
    fn test_yaml_reads_back_as_same_document() {
        let doc = create_test_document("openapi:3.0");
        let yaml = serialize_yaml(&doc).unwrap();
        let back: ApiDocument = serde_yaml::from_str(&yaml).unwrap();
        assert!(matches!(back, ApiDocument::OpenApi(_)));
        assert_eq!(back.info().title, "Test API");
        assert_eq!(back.paths().len(), 1);
    }

    #[test]
    fn test_write_to_file_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("subdir").join("nested").join("swagger.json");

        write_to_file("content", &file_path).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "content");
    }

    #[test]
    fn test_write_to_file_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("swagger.yaml");

        write_to_file("initial content", &file_path).unwrap();
        write_to_file("new content", &file_path).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new content");
    }
}
