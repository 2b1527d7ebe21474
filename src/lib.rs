//! Swagger from routes - Swagger 2.0 / OpenAPI 3 documents from a route table.
//!
//! The generator walks a table of URL routes (regex patterns with capture groups bound to
//! handlers), reads each handler method's documentation annotation and emits a
//! specification document in one of three dialects:
//!
//! - `swagger:2.0` - Swagger 2.0 with free-form YAML docstrings
//! - `openapi:3.0` - OpenAPI 3.0 with free-form YAML docstrings
//! - `openapi:3.0:pydantic` - OpenAPI 3.0 built from declared schema models
//!
//! # Architecture
//!
//! 1. [`manifest`] - Loads routes, models and document options from a YAML/JSON file
//! 2. [`routes`] / [`model`] - The route table and schema model descriptions
//! 3. [`registry`] - Named models and reusable parameters, with transitive resolution
//! 4. [`path_formatter`] / [`reflection`] - Turn regex patterns into templated paths
//! 5. [`docstring`] - Extracts and parses the YAML block of a docstring
//! 6. [`processor`] - Produces the path and component maps for a route table
//! 7. [`openapi_builder`] - Assembles the document for the selected dialect
//! 8. [`serializer`] / [`viewer`] - Output as YAML/JSON and the static viewer page
//!
//! # Example Usage
//!
//! ```no_run
//! use swagger_from_routes::{generate, GenerateOptions, Handler, HandlerMethod, HttpMethod};
//! use swagger_from_routes::{ModelRegistry, Route};
//! use swagger_from_routes::serializer::serialize_yaml;
//!
//! let routes = vec![Route::new(
//!     r"/items/(?P<item_id>\d+)",
//!     Handler::new("ItemHandler").method(
//!         HttpMethod::Get,
//!         HandlerMethod::new()
//!             .with_params(["item_id"])
//!             .with_docstring("Get an item\n---\ndescription: Get an item\n"),
//!     ),
//! )];
//!
//! let document = generate(&routes, &ModelRegistry::new(), &GenerateOptions::default()).unwrap();
//! println!("{}", serialize_yaml(&document).unwrap());
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod cli;
pub mod dialect;
pub mod docstring;
pub mod error;
pub mod manifest;
pub mod model;
pub mod openapi_builder;
pub mod parser;
pub mod path_formatter;
pub mod payload;
pub mod processor;
pub mod reflection;
pub mod registry;
pub mod routes;
pub mod schema_generator;
pub mod serializer;
pub mod viewer;

pub use dialect::Dialect;
pub use error::{Error, Result};
pub use manifest::Manifest;
pub use model::{FieldType, ModelField, ParameterLocation, ParameterModel, SchemaModel};
pub use openapi_builder::{export_swagger, generate, ApiDocument, GenerateOptions};
pub use registry::ModelRegistry;
pub use routes::{Handler, HandlerMethod, HttpMethod, Route, SwaggerMethodInfo};
