use crate::dialect::Dialect;
use crate::error::Result;
use crate::model::ParameterLocation;
use crate::processor::RoutesProcessor;
use crate::registry::ModelRegistry;
use crate::routes::Route;
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Path -> method -> operation
pub type Paths = IndexMap<String, IndexMap<String, PathOperation>>;

/// Document metadata and dialect selection for one generation call
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Base path (legacy dialect) or server URL (OpenAPI 3)
    pub api_base_url: String,
    pub description: String,
    pub api_version: String,
    pub title: String,
    /// Contact name; omitted from the document when empty
    pub contact: String,
    pub schemes: Vec<String>,
    pub security_definitions: Option<Value>,
    pub security: Option<Value>,
    /// Dialect identifier, see [`crate::dialect`]
    pub api_definition_version: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            api_base_url: "/".to_string(),
            description: "Swagger API definition".to_string(),
            api_version: "1.0.0".to_string(),
            title: "Swagger API".to_string(),
            contact: String::new(),
            schemes: Vec::new(),
            security_definitions: None,
            security: None,
            api_definition_version: Dialect::Swagger2.identifier().to_string(),
        }
    }
}

/// Info object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub description: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

/// Contact object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
}

/// Server object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
}

/// Components object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Components {
    pub schemas: IndexMap<String, Value>,
    pub parameters: IndexMap<String, Value>,
}

/// Operation built from model declarations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    pub responses: IndexMap<String, Response>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Parameter object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
    pub name: String,
    pub schema: Value,
}

/// RequestBody object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    pub content: IndexMap<String, MediaType>,
    pub required: bool,
}

/// MediaType object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    pub schema: Value,
}

/// Response object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,
    pub content: IndexMap<String, MediaType>,
}

/// An operation in a path item, either loaded from a document or built from models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathOperation {
    Document(Value),
    Declared(Operation),
}

/// Swagger 2.0 document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaggerDocument {
    pub swagger: String,
    pub info: Info,
    #[serde(rename = "basePath")]
    pub base_path: String,
    pub schemes: Vec<String>,
    pub definitions: IndexMap<String, Value>,
    pub parameters: IndexMap<String, Value>,
    pub paths: Paths,
    #[serde(rename = "securityDefinitions", skip_serializing_if = "Option::is_none")]
    pub security_definitions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Value>,
}

/// OpenAPI 3 document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    pub openapi: String,
    pub info: Info,
    pub servers: Vec<Server>,
    pub components: Components,
    pub paths: Paths,
    #[serde(rename = "securityDefinitions", skip_serializing_if = "Option::is_none")]
    pub security_definitions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Value>,
}

/// A generated document in one of the supported shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiDocument {
    Swagger(SwaggerDocument),
    OpenApi(OpenApiDocument),
}

impl ApiDocument {
    pub fn paths(&self) -> &Paths {
        match self {
            ApiDocument::Swagger(doc) => &doc.paths,
            ApiDocument::OpenApi(doc) => &doc.paths,
        }
    }

    pub fn info(&self) -> &Info {
        match self {
            ApiDocument::Swagger(doc) => &doc.info,
            ApiDocument::OpenApi(doc) => &doc.info,
        }
    }
}

/// Signature shared by the dialect builders
pub type DocBuilder = fn(&[Route], &ModelRegistry, &GenerateOptions) -> ApiDocument;

/// Builder for each dialect, looked up by [`Dialect`]
pub const DOC_BUILDERS: [(Dialect, DocBuilder); 3] = [
    (Dialect::Swagger2, build_swagger2),
    (Dialect::OpenApi3, build_openapi3),
    (Dialect::OpenApi3Models, build_openapi3_models),
];

/// Generate a document for `routes` in the dialect named by `options.api_definition_version`.
///
/// # Errors
///
/// Returns [`crate::error::Error::UnknownDialect`] if the identifier is not recognized.
/// Problems with individual routes never fail generation; those routes are skipped.
pub fn generate(
    routes: &[Route],
    registry: &ModelRegistry,
    options: &GenerateOptions,
) -> Result<ApiDocument> {
    let dialect: Dialect = options.api_definition_version.parse()?;
    info!("Generating {} document for {} routes", dialect, routes.len());

    let builder = DOC_BUILDERS
        .iter()
        .find(|(d, _)| *d == dialect)
        .map(|(_, builder)| *builder)
        .ok_or_else(|| {
            crate::error::Error::UnknownDialect(options.api_definition_version.clone())
        })?;

    Ok(builder(routes, registry, options))
}

/// Export the document without setting up any viewer
pub fn export_swagger(
    routes: &[Route],
    registry: &ModelRegistry,
    options: &GenerateOptions,
) -> Result<ApiDocument> {
    generate(routes, registry, options)
}

/// Drop leading newlines, then join the remaining lines with four spaces.
///
/// A description made only of newlines is kept whole, so `"\n\n"` becomes four spaces.
pub fn clean_description(description: &str) -> String {
    let trimmed = description.trim_start_matches('\n');
    let start = if trimmed.is_empty() { description } else { trimmed };
    start
        .lines()
        .collect::<Vec<_>>()
        .join("    ")
}

fn build_info(options: &GenerateOptions) -> Info {
    Info {
        title: options.title.clone(),
        description: clean_description(&options.description),
        version: options.api_version.clone(),
        contact: if options.contact.is_empty() {
            None
        } else {
            Some(Contact {
                name: options.contact.clone(),
            })
        },
    }
}

/// Empty objects and lists count as not supplied
fn non_empty(block: &Option<Value>) -> Option<Value> {
    match block {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) if map.is_empty() => None,
        Some(Value::Array(items)) if items.is_empty() => None,
        Some(value) => Some(value.clone()),
    }
}

/// Legacy dialect: `definitions`, `basePath` and `schemes`
pub fn build_swagger2(
    routes: &[Route],
    registry: &ModelRegistry,
    options: &GenerateOptions,
) -> ApiDocument {
    debug!("Building Swagger 2.0 document");
    let dialect = Dialect::Swagger2;
    let (paths, _) = RoutesProcessor::new(registry, dialect).extract_paths(routes);

    ApiDocument::Swagger(SwaggerDocument {
        swagger: "2.0".to_string(),
        info: build_info(options),
        base_path: options.api_base_url.clone(),
        schemes: options.schemes.clone(),
        definitions: registry.export_models(dialect),
        parameters: registry.export_parameters(dialect),
        paths,
        security_definitions: non_empty(&options.security_definitions),
        security: non_empty(&options.security),
    })
}

/// Reference dialect: `components` filled from the registry
pub fn build_openapi3(
    routes: &[Route],
    registry: &ModelRegistry,
    options: &GenerateOptions,
) -> ApiDocument {
    debug!("Building OpenAPI 3 document");
    let dialect = Dialect::OpenApi3;
    let (paths, _) = RoutesProcessor::new(registry, dialect).extract_paths(routes);

    ApiDocument::OpenApi(OpenApiDocument {
        openapi: "3.0.3".to_string(),
        info: build_info(options),
        servers: vec![Server {
            url: options.api_base_url.clone(),
        }],
        components: Components {
            schemas: registry.export_models(dialect),
            parameters: registry.export_parameters(dialect),
        },
        paths,
        security_definitions: non_empty(&options.security_definitions),
        security: non_empty(&options.security),
    })
}

/// Model-declaration dialect: `components.schemas` holds only the models the handlers reach
pub fn build_openapi3_models(
    routes: &[Route],
    registry: &ModelRegistry,
    options: &GenerateOptions,
) -> ApiDocument {
    debug!("Building OpenAPI 3 document from model declarations");
    let dialect = Dialect::OpenApi3Models;
    let (paths, schemas) = RoutesProcessor::new(registry, dialect).extract_paths(routes);

    ApiDocument::OpenApi(OpenApiDocument {
        openapi: "3.0.3".to_string(),
        info: build_info(options),
        servers: vec![Server {
            url: options.api_base_url.clone(),
        }],
        components: Components {
            schemas,
            parameters: registry.export_parameters(dialect),
        },
        paths,
        security_definitions: non_empty(&options.security_definitions),
        security: non_empty(&options.security),
    })
}
