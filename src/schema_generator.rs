//! Rendering of declared models into schema fragments.
//!
//! Fragments follow the conventions of the model-declaration library the documents are
//! read with: object models carry a `title`, property titles are derived from field
//! names, and nested models are referenced through `$ref` instead of being inlined.

use crate::dialect::Dialect;
use crate::model::{FieldType, ModelField, ModelShape, ParameterModel, PrimitiveType, SchemaModel};
use log::debug;
use serde_json::{json, Map, Value};

/// Description given to enumerations declared without one
pub const DEFAULT_ENUM_DESCRIPTION: &str = "An enumeration.";

/// Convert a primitive type to a schema fragment
pub fn primitive_to_schema(primitive: PrimitiveType) -> Value {
    let (schema_type, format) = match primitive {
        PrimitiveType::String | PrimitiveType::Char => ("string", None),
        PrimitiveType::I8 | PrimitiveType::I16 | PrimitiveType::I32 => ("integer", Some("int32")),
        PrimitiveType::U8 | PrimitiveType::U16 | PrimitiveType::U32 => ("integer", Some("int32")),
        PrimitiveType::I64 | PrimitiveType::I128 => ("integer", Some("int64")),
        PrimitiveType::U64 | PrimitiveType::U128 => ("integer", Some("int64")),
        PrimitiveType::F32 => ("number", Some("float")),
        PrimitiveType::F64 => ("number", Some("double")),
        PrimitiveType::Bool => ("boolean", None),
    };

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!(schema_type));
    if let Some(format) = format {
        schema.insert("format".to_string(), json!(format));
    }
    Value::Object(schema)
}

/// Schema fragment for a type, without title or description
pub fn field_type_schema(ty: &FieldType, dialect: Dialect) -> Value {
    match ty {
        FieldType::Primitive(prim) => primitive_to_schema(*prim),
        FieldType::Bytes => json!({"type": "string", "format": "byte"}),
        FieldType::Object => json!({"type": "object"}),
        FieldType::Array(inner) => json!({
            "type": "array",
            "items": field_type_schema(inner, dialect),
        }),
        FieldType::Optional(inner) => field_type_schema(inner, dialect),
        FieldType::Model(name) => json!({"$ref": dialect.ref_to(name)}),
    }
}

/// Turns a field name into a property title: `you_are_cool` -> `You Are Cool`
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_cased = false;

    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(if c == '_' { ' ' } else { c });
            prev_cased = false;
        }
    }

    out
}

fn property_schema(field: &ModelField, dialect: Dialect) -> Value {
    let mut schema = Map::new();

    // A bare nested model is a plain reference; with a description it has to be wrapped
    if let FieldType::Model(name) = field.ty.inner() {
        let reference = json!({"$ref": dialect.ref_to(name)});
        if field.description.is_none() && field.default.is_none() && field.example.is_none() {
            return reference;
        }
        schema.insert("title".to_string(), json!(title_case(&field.name)));
        if let Some(description) = &field.description {
            schema.insert("description".to_string(), json!(description));
        }
        if let Some(default) = &field.default {
            schema.insert("default".to_string(), default.clone());
        }
        if let Some(example) = &field.example {
            schema.insert("example".to_string(), example.clone());
        }
        schema.insert("allOf".to_string(), json!([reference]));
        return Value::Object(schema);
    }

    schema.insert("title".to_string(), json!(title_case(&field.name)));
    if let Some(description) = &field.description {
        schema.insert("description".to_string(), json!(description));
    }
    if let Some(default) = &field.default {
        schema.insert("default".to_string(), default.clone());
    }
    if let Some(example) = &field.example {
        schema.insert("example".to_string(), example.clone());
    }
    if let Value::Object(type_schema) = field_type_schema(&field.ty, dialect) {
        schema.extend(type_schema);
    }
    Value::Object(schema)
}

/// Render a model as a standalone schema fragment
pub fn model_schema(model: &SchemaModel, dialect: Dialect) -> Value {
    debug!("Rendering schema for model: {}", model.name);

    match &model.shape {
        ModelShape::Fields(fields) => {
            let mut schema = Map::new();
            schema.insert("title".to_string(), json!(model.name));
            if let Some(description) = &model.description {
                schema.insert("description".to_string(), json!(description));
            }
            schema.insert("type".to_string(), json!("object"));

            let mut properties = Map::new();
            let mut required = Vec::new();
            for field in fields {
                properties.insert(field.name.clone(), property_schema(field, dialect));
                if field.is_required() {
                    required.push(json!(field.name));
                }
            }
            schema.insert("properties".to_string(), Value::Object(properties));
            if !required.is_empty() {
                schema.insert("required".to_string(), Value::Array(required));
            }
            Value::Object(schema)
        }
        ModelShape::Enum(variants) => json!({
            "title": model.name,
            "description": model.description.as_deref().unwrap_or(DEFAULT_ENUM_DESCRIPTION),
            "enum": variants,
            "type": "string",
        }),
        ModelShape::Schema(schema) => schema.clone(),
    }
}

/// Render a named parameter; OpenAPI 3 nests the type under `schema`
pub fn parameter_schema(param: &ParameterModel, dialect: Dialect) -> Value {
    let mut schema = Map::new();
    schema.insert("in".to_string(), json!(param.location));
    schema.insert("name".to_string(), json!(param.name));
    schema.insert("required".to_string(), json!(param.required));
    if let Some(description) = &param.description {
        schema.insert("description".to_string(), json!(description));
    }

    let type_schema = field_type_schema(&param.ty, dialect);
    if dialect.nests_parameter_schema() {
        schema.insert("schema".to_string(), type_schema);
    } else if let Value::Object(inline) = type_schema {
        schema.extend(inline);
    }
    Value::Object(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParameterLocation;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_primitive_schemas() {
        assert_eq!(primitive_to_schema(PrimitiveType::String), json!({"type": "string"}));
        assert_eq!(
            primitive_to_schema(PrimitiveType::I32),
            json!({"type": "integer", "format": "int32"})
        );
        assert_eq!(
            primitive_to_schema(PrimitiveType::U64),
            json!({"type": "integer", "format": "int64"})
        );
        assert_eq!(
            primitive_to_schema(PrimitiveType::F32),
            json!({"type": "number", "format": "float"})
        );
        assert_eq!(primitive_to_schema(PrimitiveType::Bool), json!({"type": "boolean"}));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("you_are_cool"), "You Are Cool");
        assert_eq!(title_case("tier2_nested_item"), "Tier2 Nested Item");
        assert_eq!(title_case("result"), "Result");
    }

    #[test]
    fn test_object_model_schema() {
        let model = SchemaModel::object(
            "CalculusResponse",
            vec![
                ModelField::new("result", FieldType::integer())
                    .example(json!(42))
                    .description("This is result"),
                ModelField::new("you_are_cool", FieldType::optional(FieldType::boolean()))
                    .description("Whether you're cool"),
            ],
        );

        let schema = model_schema(&model, Dialect::OpenApi3Models);
        assert_eq!(
            schema,
            json!({
                "title": "CalculusResponse",
                "type": "object",
                "properties": {
                    "result": {
                        "title": "Result",
                        "description": "This is result",
                        "example": 42,
                        "type": "integer",
                        "format": "int32",
                    },
                    "you_are_cool": {
                        "title": "You Are Cool",
                        "description": "Whether you're cool",
                        "type": "boolean",
                    },
                },
                "required": ["result"],
            })
        );
    }

    #[test]
    fn test_nested_references_use_dialect_prefix() {
        let model = SchemaModel::object(
            "NestedResponse",
            vec![
                ModelField::new("items", FieldType::array(FieldType::model("NestedItem"))),
                ModelField::new("operation", FieldType::model("CalculusOperation"))
                    .description("Operation"),
                ModelField::new("tier2", FieldType::optional(FieldType::model("Tier2"))),
            ],
        );

        let schema = model_schema(&model, Dialect::Swagger2);
        assert_eq!(
            schema["properties"]["items"],
            json!({"title": "Items", "type": "array", "items": {"$ref": "#/definitions/NestedItem"}})
        );
        assert_eq!(
            schema["properties"]["operation"],
            json!({
                "title": "Operation",
                "description": "Operation",
                "allOf": [{"$ref": "#/definitions/CalculusOperation"}],
            })
        );
        assert_eq!(schema["properties"]["tier2"], json!({"$ref": "#/definitions/Tier2"}));
        assert_eq!(schema["required"], json!(["items", "operation"]));
    }

    #[test]
    fn test_enum_model_schema() {
        let model = SchemaModel::enumeration("CalculusOperation", ["sum", "subtract"]);
        assert_eq!(
            model_schema(&model, Dialect::OpenApi3),
            json!({
                "title": "CalculusOperation",
                "description": "An enumeration.",
                "enum": ["sum", "subtract"],
                "type": "string",
            })
        );
    }

    #[test]
    fn test_document_model_is_passed_through() {
        let raw = json!({"type": "object", "properties": {"id": {"type": "integer"}}});
        let model = SchemaModel::document("Pet", raw.clone());
        assert_eq!(model_schema(&model, Dialect::Swagger2), raw);
    }

    #[test]
    fn test_parameter_schema_per_dialect() {
        let param = ParameterModel::new("LimitParam", "limit", ParameterLocation::Query, FieldType::integer())
            .description("Page size");

        assert_eq!(
            parameter_schema(&param, Dialect::Swagger2),
            json!({
                "in": "query",
                "name": "limit",
                "required": false,
                "description": "Page size",
                "type": "integer",
                "format": "int32",
            })
        );
        assert_eq!(
            parameter_schema(&param, Dialect::OpenApi3),
            json!({
                "in": "query",
                "name": "limit",
                "required": false,
                "description": "Page size",
                "schema": {"type": "integer", "format": "int32"},
            })
        );
    }
}
