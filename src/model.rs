//! Declared schema models and named parameter models.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::TryFrom;

/// Primitive types supported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    String,
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F32,
    F64,
    Bool,
    Char,
}

impl PrimitiveType {
    /// Map a Rust primitive type name
    pub fn from_name(name: &str) -> Option<Self> {
        let prim = match name {
            "String" | "str" => PrimitiveType::String,
            "i8" => PrimitiveType::I8,
            "i16" => PrimitiveType::I16,
            "i32" | "isize" => PrimitiveType::I32,
            "i64" => PrimitiveType::I64,
            "i128" => PrimitiveType::I128,
            "u8" => PrimitiveType::U8,
            "u16" => PrimitiveType::U16,
            "u32" | "usize" => PrimitiveType::U32,
            "u64" => PrimitiveType::U64,
            "u128" => PrimitiveType::U128,
            "f32" => PrimitiveType::F32,
            "f64" => PrimitiveType::F64,
            "bool" => PrimitiveType::Bool,
            "char" => PrimitiveType::Char,
            _ => return None,
        };
        Some(prim)
    }
}

/// Type of a model field, path argument or parameter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum FieldType {
    Primitive(PrimitiveType),
    /// Binary data, `Vec<u8>`
    Bytes,
    /// Free-form object (maps, `serde_json::Value`)
    Object,
    Array(Box<FieldType>),
    Optional(Box<FieldType>),
    /// Reference to another registered model by name
    Model(String),
}

impl FieldType {
    pub fn string() -> Self {
        FieldType::Primitive(PrimitiveType::String)
    }

    pub fn integer() -> Self {
        FieldType::Primitive(PrimitiveType::I32)
    }

    pub fn boolean() -> Self {
        FieldType::Primitive(PrimitiveType::Bool)
    }

    pub fn array(inner: FieldType) -> Self {
        FieldType::Array(Box::new(inner))
    }

    pub fn optional(inner: FieldType) -> Self {
        FieldType::Optional(Box::new(inner))
    }

    pub fn model(name: impl Into<String>) -> Self {
        FieldType::Model(name.into())
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, FieldType::Optional(_))
    }

    /// Strip any `Optional` wrappers
    pub fn inner(&self) -> &FieldType {
        match self {
            FieldType::Optional(inner) => inner.inner(),
            other => other,
        }
    }
}

impl TryFrom<String> for FieldType {
    type Error = crate::error::Error;

    fn try_from(expr: String) -> Result<Self, Self::Error> {
        crate::parser::parse_type(&expr)
    }
}

/// A field of an object model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub example: Option<Value>,
    #[serde(default)]
    pub default: Option<Value>,
}

impl ModelField {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            description: None,
            example: None,
            default: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    pub fn default_value(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// A field is required unless it is optional or has a default
    pub fn is_required(&self) -> bool {
        !self.ty.is_optional() && self.default.is_none()
    }
}

/// The body of a model declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelShape {
    /// Object with typed fields
    Fields(Vec<ModelField>),
    /// String enumeration
    Enum(Vec<String>),
    /// Schema fragment written out by hand
    Schema(Value),
}

/// A named data-shape declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SchemaModel {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub shape: ModelShape,
}

impl SchemaModel {
    pub fn object(name: impl Into<String>, fields: Vec<ModelField>) -> Self {
        Self {
            name: name.into(),
            description: None,
            shape: ModelShape::Fields(fields),
        }
    }

    pub fn enumeration<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: None,
            shape: ModelShape::Enum(variants.into_iter().map(Into::into).collect()),
        }
    }

    pub fn document(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            description: None,
            shape: ModelShape::Schema(schema),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Names of models this one references directly
    pub fn referenced_models(&self) -> Vec<&str> {
        fn collect<'a>(ty: &'a FieldType, out: &mut Vec<&'a str>) {
            match ty {
                FieldType::Model(name) => out.push(name),
                FieldType::Array(inner) | FieldType::Optional(inner) => collect(inner, out),
                _ => {}
            }
        }

        let mut out = Vec::new();
        if let ModelShape::Fields(fields) = &self.shape {
            for field in fields {
                collect(&field.ty, &mut out);
            }
        }
        out
    }
}

/// Where a parameter is read from in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

/// A reusable, named parameter declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterModel {
    /// Key under which the parameter is exported
    pub key: String,
    /// Parameter name as sent by clients
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: FieldType,
}

impl ParameterModel {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        location: ParameterLocation,
        ty: FieldType,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            location,
            required: location == ParameterLocation::Path,
            description: None,
            ty,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
