//! Per-route, per-method operation building.
//!
//! The processor walks the route table once, picks the annotation source of every
//! handler method and accumulates the resulting operations by path and method. Schemas
//! referenced by model-based operations are accumulated alongside in a flat, first
//! write wins namespace.

use crate::dialect::Dialect;
use crate::docstring::{build_swagger_docs, has_swagger_block};
use crate::model::ParameterLocation;
use crate::openapi_builder::{
    MediaType, Operation, Parameter, PathOperation, Paths, RequestBody, Response,
};
use crate::path_formatter::{capture_group_count, format_handler_path};
use crate::reflection::{extract_parameter_names, UNKNOWN_PARAMETER};
use crate::registry::{ModelRegistry, ResolvedSchema};
use crate::routes::{Annotation, HandlerMethod, HttpMethod, Route, SwaggerMethodInfo};
use crate::schema_generator::field_type_schema;
use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::{json, Value};

/// Content type of request and response bodies built from models
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Description used for a response declared without one
pub fn default_description(status_code: u16) -> &'static str {
    if status_code < 400 {
        "Successful Response"
    } else if status_code < 500 {
        "Bad request"
    } else {
        "Internal Server Error"
    }
}

/// Builds operations for one generation pass.
pub struct RoutesProcessor<'a> {
    registry: &'a ModelRegistry,
    dialect: Dialect,
    paths: Paths,
    schemas: IndexMap<String, Value>,
}

impl<'a> RoutesProcessor<'a> {
    pub fn new(registry: &'a ModelRegistry, dialect: Dialect) -> Self {
        debug!("Initializing RoutesProcessor for {}", dialect);
        Self {
            registry,
            dialect,
            paths: Paths::new(),
            schemas: IndexMap::new(),
        }
    }

    /// Process every route and return the paths and the accumulated schemas
    pub fn extract_paths(mut self, routes: &[Route]) -> (Paths, IndexMap<String, Value>) {
        for route in routes {
            self.add_route(route);
        }
        (self.paths, self.schemas)
    }

    /// Add the operations of every method `route`'s handler serves
    pub fn add_route(&mut self, route: &Route) {
        let handler = route.handler();
        debug!("Processing route {} ({})", route.pattern(), handler.name);

        for method in HttpMethod::ALL {
            let handler_method = match handler.get_method(method) {
                Some(handler_method) => handler_method,
                None => continue,
            };

            let annotation = match &handler_method.annotation {
                Some(annotation) => annotation,
                None => {
                    debug!("{} {} has no annotation, skipping", method, handler.name);
                    continue;
                }
            };

            if let Annotation::Docstring(doc) = annotation {
                if !has_swagger_block(doc) {
                    debug!("{} {} docstring has no swagger block, skipping", method, handler.name);
                    continue;
                }
            }

            let path = match format_handler_path(route, handler_method) {
                Some(path) => path,
                None => continue,
            };

            let operation = match annotation {
                Annotation::Docstring(doc) => PathOperation::Document(build_swagger_docs(doc)),
                Annotation::Document(document) => PathOperation::Document(document.clone()),
                Annotation::Models(info) => {
                    if self.dialect != Dialect::OpenApi3Models {
                        debug!(
                            "{} {} is declared with models, which {} does not render",
                            method, handler.name, self.dialect
                        );
                        continue;
                    }
                    match self.build_model_operation(route, handler_method, info) {
                        Some(operation) => PathOperation::Declared(operation),
                        None => continue,
                    }
                }
            };

            self.paths
                .entry(path)
                .or_default()
                .insert(method.as_str().to_string(), operation);
        }
    }

    fn resolve(&self, name: &str) -> Option<ResolvedSchema> {
        let resolved = self.registry.resolve_model(name, self.dialect);
        if resolved.is_none() {
            warn!("Unknown model {} referenced by a handler, skipping method", name);
        }
        resolved
    }

    fn build_model_operation(
        &mut self,
        route: &Route,
        method: &HandlerMethod,
        info: &SwaggerMethodInfo,
    ) -> Option<Operation> {
        // Resolve everything first so that a bad reference leaves no partial components
        let request = match &info.request {
            Some(name) => Some(self.resolve(name)?),
            None => None,
        };
        let query = match &info.query {
            Some(name) => Some(self.resolve(name)?),
            None => None,
        };
        let mut responses = Vec::with_capacity(info.responses.len());
        for (status, spec) in &info.responses {
            responses.push((*status, spec, self.resolve(&spec.model)?));
        }

        let mut parameters = self.path_parameters(route, method);
        if let Some(query) = &query {
            parameters.extend(query_parameters(&query.schema));
        }

        let request_body = request.map(|resolved| {
            self.add_definitions(resolved.definitions);
            RequestBody {
                content: json_content(resolved.schema),
                required: true,
            }
        });

        let mut operation_responses = IndexMap::new();
        for (status, spec, resolved) in responses {
            let description = spec
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| default_description(status).to_string());

            self.add_component(&spec.model, resolved.schema);
            self.add_definitions(resolved.definitions);

            operation_responses.insert(
                status.to_string(),
                Response {
                    description,
                    content: json_content(json!({"$ref": self.dialect.ref_to(&spec.model)})),
                },
            );
        }

        Some(Operation {
            parameters,
            request_body,
            responses: operation_responses,
            tags: info.tags.clone(),
        })
    }

    fn path_parameters(&self, route: &Route, method: &HandlerMethod) -> Vec<Parameter> {
        let groups = capture_group_count(route.pattern()).unwrap_or(0);

        extract_parameter_names(method, groups)
            .into_iter()
            .filter(|name| name != UNKNOWN_PARAMETER)
            .map(|name| {
                let schema = method
                    .args
                    .iter()
                    .find(|arg| arg.name == name)
                    .and_then(|arg| arg.ty.as_ref())
                    .map(|ty| field_type_schema(ty, self.dialect))
                    .unwrap_or_else(|| json!({"type": "string"}));
                Parameter {
                    location: ParameterLocation::Path,
                    required: true,
                    name,
                    schema,
                }
            })
            .collect()
    }

    fn add_component(&mut self, name: &str, schema: Value) {
        if self.schemas.contains_key(name) {
            debug!("Schema {} already present, keeping the first one", name);
            return;
        }
        self.schemas.insert(name.to_string(), schema);
    }

    fn add_definitions(&mut self, definitions: IndexMap<String, Value>) {
        for (name, schema) in definitions {
            self.add_component(&name, schema);
        }
    }
}

fn json_content(schema: Value) -> IndexMap<String, MediaType> {
    let mut content = IndexMap::new();
    content.insert(JSON_CONTENT_TYPE.to_string(), MediaType { schema });
    content
}

/// One `query` parameter per property of the query model
fn query_parameters(query_schema: &Value) -> Vec<Parameter> {
    let required: Vec<&str> = query_schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    query_schema
        .get("properties")
        .and_then(Value::as_object)
        .map(|properties| {
            properties
                .iter()
                .map(|(name, schema)| Parameter {
                    location: ParameterLocation::Query,
                    required: required.contains(&name.as_str()),
                    name: name.clone(),
                    schema: schema.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}
