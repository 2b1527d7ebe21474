//! Registry of declared schema models and named parameter models.
//!
//! Models are registered once at startup and looked up by name during generation.
//! Names form a single flat namespace: when two models are registered under the same
//! name the first one is kept and the later one is ignored with a warning.

use crate::dialect::Dialect;
use crate::model::{ParameterModel, SchemaModel};
use crate::schema_generator::{model_schema, parameter_schema};
use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use serde_json::Value;

/// A model fragment together with the fragments of every model it references.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchema {
    pub schema: Value,
    /// Transitively referenced models, keyed by name, in discovery order
    pub definitions: IndexMap<String, Value>,
}

/// Registry of declared models and parameters.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: IndexMap<String, SchemaModel>,
    parameters: IndexMap<String, ParameterModel>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model. Returns `false` if the name was already taken.
    pub fn register_model(&mut self, model: SchemaModel) -> bool {
        if self.models.contains_key(&model.name) {
            warn!(
                "Model {} is already registered, keeping the first declaration",
                model.name
            );
            return false;
        }
        debug!("Registering model: {}", model.name);
        self.models.insert(model.name.clone(), model);
        true
    }

    /// Register a named parameter. Returns `false` if the key was already taken.
    pub fn register_parameter(&mut self, parameter: ParameterModel) -> bool {
        if self.parameters.contains_key(&parameter.key) {
            warn!(
                "Parameter {} is already registered, keeping the first declaration",
                parameter.key
            );
            return false;
        }
        debug!("Registering parameter: {}", parameter.key);
        self.parameters.insert(parameter.key.clone(), parameter);
        true
    }

    pub fn model(&self, name: &str) -> Option<&SchemaModel> {
        self.models.get(name)
    }

    pub fn parameter(&self, key: &str) -> Option<&ParameterModel> {
        self.parameters.get(key)
    }

    pub fn models(&self) -> impl Iterator<Item = &SchemaModel> {
        self.models.values()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.parameters.is_empty()
    }

    /// Export all models as fragments keyed by name
    pub fn export_models(&self, dialect: Dialect) -> IndexMap<String, Value> {
        self.models
            .iter()
            .map(|(name, model)| (name.clone(), model_schema(model, dialect)))
            .collect()
    }

    /// Export all named parameters as fragments keyed by their key
    pub fn export_parameters(&self, dialect: Dialect) -> IndexMap<String, Value> {
        self.parameters
            .iter()
            .map(|(key, param)| (key.clone(), parameter_schema(param, dialect)))
            .collect()
    }

    /// Render a model and collect every model it references, directly or not.
    ///
    /// Returns `None` if `name` is not registered. References to unregistered models are
    /// left dangling and reported with a warning.
    pub fn resolve_model(&self, name: &str, dialect: Dialect) -> Option<ResolvedSchema> {
        let model = self.models.get(name)?;
        let schema = model_schema(model, dialect);

        let mut visited: IndexSet<&str> = IndexSet::new();
        visited.insert(model.name.as_str());
        let mut definitions = IndexMap::new();
        let mut pending: Vec<&str> = model.referenced_models();
        pending.reverse();

        while let Some(next) = pending.pop() {
            if !visited.insert(next) {
                continue;
            }
            match self.models.get(next) {
                Some(nested) => {
                    definitions.insert(nested.name.clone(), model_schema(nested, dialect));
                    let mut refs = nested.referenced_models();
                    refs.reverse();
                    pending.extend(refs);
                }
                None => warn!("Model {} references unknown model {}", name, next),
            }
        }

        Some(ResolvedSchema { schema, definitions })
    }
}
