use crate::dialect::Dialect;
use crate::manifest::Manifest;
use crate::openapi_builder::generate;
use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
use crate::viewer::{render_viewer_page, ViewerUrls, DEFAULT_TEMPLATE};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// Swagger from routes - Generate Swagger 2.0 / OpenAPI 3 documents from a route manifest
#[derive(Parser, Debug)]
#[command(name = "swagger-from-routes")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the route manifest (YAML or JSON)
    #[arg(value_name = "MANIFEST")]
    pub manifest_path: PathBuf,

    /// Output format (yaml or json)
    #[arg(short = 'f', long = "format", value_enum, default_value = "yaml")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Override the dialect declared in the manifest
    #[arg(short = 'd', long = "dialect", value_name = "DIALECT")]
    pub dialect: Option<String>,

    /// Also write the viewer page to this file
    #[arg(long = "viewer", value_name = "FILE")]
    pub viewer_path: Option<PathBuf>,

    /// URL the viewer is served under; the document is fetched from `<URL>/swagger.json`
    #[arg(long = "swagger-url", value_name = "URL", default_value = "/api/doc")]
    pub swagger_url: String,

    /// Collapse the models section of the viewer page
    #[arg(long = "hide-models")]
    pub hide_models: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.manifest_path.exists() {
        anyhow::bail!(
            "Manifest does not exist: {}",
            args.manifest_path.display()
        );
    }

    if !args.manifest_path.is_file() {
        anyhow::bail!(
            "Manifest is not a file: {}",
            args.manifest_path.display()
        );
    }

    if let Some(ref dialect) = args.dialect {
        dialect.parse::<Dialect>()?;
    }

    info!("Manifest: {}", args.manifest_path.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    info!("Loading route manifest...");
    let mut manifest = Manifest::load(&args.manifest_path)?;
    if let Some(dialect) = &args.dialect {
        info!("Using dialect override: {}", dialect);
        manifest.document.api_definition_version = dialect.clone();
    }

    let registry = manifest.registry();
    let routes = manifest.routes()?;
    info!(
        "Loaded {} routes, {} models",
        routes.len(),
        registry.models().count()
    );

    let document = generate(&routes, &registry, &manifest.document)?;

    info!("Serializing to {:?} format...", args.output_format);
    let content = match args.output_format {
        OutputFormat::Yaml => serialize_yaml(&document)?,
        OutputFormat::Json => serialize_json(&document)?,
    };

    if let Some(output_path) = &args.output_path {
        write_to_file(&content, output_path)?;
        info!("Wrote document to {}", output_path.display());
    } else {
        println!("{}", content);
    }

    if let Some(viewer_path) = &args.viewer_path {
        let urls = ViewerUrls::new(&args.swagger_url);
        let page = render_viewer_page(DEFAULT_TEMPLATE, &urls.spec_url, !args.hide_models);
        write_to_file(&page, viewer_path)
            .with_context(|| format!("Failed to write viewer page: {}", viewer_path.display()))?;
        info!("Wrote viewer page to {}", viewer_path.display());
        info!("Serve it at {} and the document at {}", urls.ui_url, urls.spec_url);
    }

    info!("Generation complete!");
    info!("Summary:");
    info!("  - Dialect: {}", manifest.document.api_definition_version);
    info!("  - Routes declared: {}", routes.len());
    info!("  - Paths documented: {}", document.paths().len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
document:
  title: CLI API
routes:
  - pattern: /ping
    handler: PingHandler
    methods:
      get:
        docstring: |
          ---
          description: Ping
"#;

    fn args_for(manifest_path: PathBuf) -> CliArgs {
        CliArgs::parse_from([
            "swagger-from-routes".into(),
            manifest_path.into_os_string(),
        ])
    }

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["swagger-from-routes", "routes.yaml"]);
        assert_eq!(args.output_format, OutputFormat::Yaml);
        assert_eq!(args.swagger_url, "/api/doc");
        assert!(args.output_path.is_none());
        assert!(args.dialect.is_none());
        assert!(!args.hide_models);
    }

    #[test]
    fn test_missing_manifest_is_rejected() {
        let args = CliArgs::parse_from(["swagger-from-routes", "/definitely/not/here.yaml"]);
        assert!(parse_args_from_parsed(args).is_err());
    }

    #[test]
    fn test_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        assert!(parse_args_from_parsed(args_for(temp_dir.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_unknown_dialect_override_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("routes.yaml");
        fs::write(&path, MANIFEST).unwrap();
        let mut args = args_for(path);
        args.dialect = Some("openapi:4".to_string());
        assert!(parse_args_from_parsed(args).is_err());
    }

    #[test]
    fn test_run_writes_document_and_viewer() {
        let temp_dir = TempDir::new().unwrap();
        let manifest_path = temp_dir.path().join("routes.yaml");
        fs::write(&manifest_path, MANIFEST).unwrap();

        let output = temp_dir.path().join("out").join("swagger.json");
        let viewer = temp_dir.path().join("out").join("index.html");
        let mut args = args_for(manifest_path);
        args.output_format = OutputFormat::Json;
        args.output_path = Some(output.clone());
        args.dialect = Some("openapi:3.0".to_string());
        args.viewer_path = Some(viewer.clone());
        args.hide_models = true;

        run(args).unwrap();

        let document: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(document["info"]["title"], "CLI API");
        assert_eq!(document["paths"]["/ping"]["get"]["description"], "Ping");
        assert!(document.get("openapi").is_some());

        let page = fs::read_to_string(&viewer).unwrap();
        assert!(page.contains("/api/doc/swagger.json"));
        assert!(page.contains("-1"));
    }
}
