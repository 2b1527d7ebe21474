//! Route manifest: a YAML or JSON file declaring document options, models and routes.
//!
//! ```yaml
//! document:
//!   title: test API
//!   api_definition_version: "openapi:3.0:pydantic"
//! models:
//!   - name: Item
//!     fields:
//!       - { name: id, type: i32 }
//! routes:
//!   - pattern: /items/(?P<item_id>[0-9]+)
//!     handler: ItemHandler
//!     methods:
//!       get:
//!         signature: "fn get(&self, item_id: i32)"
//!         swagger:
//!           responses:
//!             200: { model: Item }
//! ```

use crate::error::{Error, Result};
use crate::model::{ParameterModel, SchemaModel};
use crate::openapi_builder::GenerateOptions;
use crate::registry::ModelRegistry;
use crate::routes::{Handler, HandlerMethod, HttpMethod, Route, SwaggerMethodInfo};
use indexmap::IndexMap;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Parsed manifest file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub document: GenerateOptions,
    pub models: Vec<SchemaModel>,
    pub parameters: Vec<ParameterModel>,
    pub routes: Vec<RouteSpec>,
}

/// A route entry of the manifest
#[derive(Debug, Clone, Deserialize)]
pub struct RouteSpec {
    pub pattern: String,
    pub handler: String,
    #[serde(default)]
    pub kwargs: Option<Value>,
    #[serde(default)]
    pub methods: IndexMap<HttpMethod, MethodSpec>,
}

/// A handler method entry of the manifest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MethodSpec {
    /// Rust signature the argument names and types are read from
    pub signature: Option<String>,
    /// Argument names, used when no signature is given
    pub params: Vec<String>,
    pub docstring: Option<String>,
    pub document: Option<Value>,
    pub swagger: Option<SwaggerMethodInfo>,
}

impl MethodSpec {
    fn to_handler_method(&self) -> Result<HandlerMethod> {
        let mut method = match &self.signature {
            Some(signature) => HandlerMethod::from_signature(signature)?,
            None => HandlerMethod::new().with_params(self.params.iter().cloned()),
        };

        let sources = [
            self.swagger.is_some(),
            self.document.is_some(),
            self.docstring.is_some(),
        ];
        if sources.iter().filter(|present| **present).count() > 1 {
            warn!("Method declares several annotations; using swagger, then document, then docstring");
        }

        if let Some(info) = &self.swagger {
            method = method.with_models(info.clone());
        } else if let Some(document) = &self.document {
            method = method.with_document(document.clone());
        } else if let Some(doc) = &self.docstring {
            method = method.with_docstring(doc.clone());
        }

        Ok(method)
    }
}

impl Manifest {
    /// Load a manifest from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not describe a manifest.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading manifest: {}", path.display());
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| Error::ParseError {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse a manifest from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content does not describe a manifest.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ParseError {
            file: "<string>".into(),
            message: e.to_string(),
        })
    }

    /// Registry holding the declared models and parameters
    pub fn registry(&self) -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        for model in &self.models {
            registry.register_model(model.clone());
        }
        for parameter in &self.parameters {
            registry.register_parameter(parameter.clone());
        }
        registry
    }

    /// Route table in declaration order.
    ///
    /// # Errors
    ///
    /// Returns an error if a method signature cannot be parsed.
    pub fn routes(&self) -> Result<Vec<Route>> {
        self.routes
            .iter()
            .map(|spec| {
                let mut handler = Handler::new(spec.handler.clone());
                for (method, method_spec) in &spec.methods {
                    handler = handler.method(*method, method_spec.to_handler_method()?);
                }
                let route = Route::new(spec.pattern.clone(), handler);
                Ok(match &spec.kwargs {
                    Some(kwargs) => route.with_kwargs(kwargs.clone()),
                    None => route,
                })
            })
            .collect()
    }
}
