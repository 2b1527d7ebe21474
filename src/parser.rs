//! Parsing of Rust signatures and type expressions with `syn`.
//!
//! Handler methods declare their arguments as a Rust signature string, for example
//! `fn post(&self, term_one: i32, term_two: i32)`. Model fields declare their type as a
//! Rust type expression such as `Option<Vec<NestedItem>>`. Both are parsed here into the
//! crate's own [`HandlerArg`] and [`FieldType`] values.

use crate::error::{Error, Result};
use crate::model::{FieldType, PrimitiveType};
use crate::routes::HandlerArg;
use log::debug;
use syn::{FnArg, GenericArgument, Pat, PathArguments, Type};

/// Parses a handler signature into its declared arguments, receiver excluded.
///
/// Wildcard patterns (`_`) are kept as unnamed positional arguments so that argument
/// positions still line up with the route's capture groups.
///
/// # Errors
///
/// Returns an error if the string is not a valid Rust function signature or if an
/// argument has an unsupported type.
pub fn parse_signature(signature: &str) -> Result<Vec<HandlerArg>> {
    debug!("Parsing handler signature: {}", signature);

    let sig: syn::Signature = syn::parse_str(signature.trim().trim_end_matches(';'))?;
    let mut args = Vec::new();

    for input in &sig.inputs {
        let pat_type = match input {
            FnArg::Receiver(_) => continue,
            FnArg::Typed(pat_type) => pat_type,
        };

        let name = match pat_type.pat.as_ref() {
            Pat::Ident(ident) => ident.ident.to_string(),
            Pat::Wild(_) => "_".to_string(),
            other => {
                debug!("Unsupported argument pattern {:?}, treating as unnamed", other);
                "_".to_string()
            }
        };

        let ty = field_type_from_syn(&pat_type.ty, signature)?;
        args.push(HandlerArg::typed(name, ty));
    }

    Ok(args)
}

/// Parses a Rust type expression into a [`FieldType`].
///
/// # Errors
///
/// Returns [`Error::InvalidType`] if the expression does not parse or names a type that
/// cannot be described as a schema.
pub fn parse_type(expr: &str) -> Result<FieldType> {
    let ty: Type = syn::parse_str(expr.trim()).map_err(|e| Error::InvalidType {
        expr: expr.to_string(),
        message: e.to_string(),
    })?;
    field_type_from_syn(&ty, expr)
}

fn field_type_from_syn(ty: &Type, expr: &str) -> Result<FieldType> {
    match ty {
        Type::Reference(reference) => field_type_from_syn(&reference.elem, expr),
        Type::Paren(paren) => field_type_from_syn(&paren.elem, expr),
        Type::Group(group) => field_type_from_syn(&group.elem, expr),
        Type::Slice(slice) => Ok(sequence_of(field_type_from_syn(&slice.elem, expr)?)),
        Type::Array(array) => Ok(sequence_of(field_type_from_syn(&array.elem, expr)?)),
        Type::Path(type_path) => {
            let segment = type_path.path.segments.last().ok_or_else(|| Error::InvalidType {
                expr: expr.to_string(),
                message: "empty type path".to_string(),
            })?;
            let ident = segment.ident.to_string();

            match ident.as_str() {
                "Option" => Ok(FieldType::optional(first_generic(&segment.arguments, expr)?)),
                "Vec" | "VecDeque" | "HashSet" | "BTreeSet" => {
                    Ok(sequence_of(first_generic(&segment.arguments, expr)?))
                }
                "Box" | "Arc" | "Rc" => first_generic(&segment.arguments, expr),
                "HashMap" | "BTreeMap" | "IndexMap" | "Value" | "Map" => Ok(FieldType::Object),
                _ => Ok(PrimitiveType::from_name(&ident)
                    .map(FieldType::Primitive)
                    .unwrap_or(FieldType::Model(ident))),
            }
        }
        _ => Err(Error::InvalidType {
            expr: expr.to_string(),
            message: "unsupported type".to_string(),
        }),
    }
}

/// `Vec<u8>` and `[u8]` describe bytes rather than arrays of integers
fn sequence_of(inner: FieldType) -> FieldType {
    match inner {
        FieldType::Primitive(PrimitiveType::U8) => FieldType::Bytes,
        other => FieldType::array(other),
    }
}

fn first_generic(arguments: &PathArguments, expr: &str) -> Result<FieldType> {
    if let PathArguments::AngleBracketed(args) = arguments {
        for arg in &args.args {
            if let GenericArgument::Type(ty) = arg {
                return field_type_from_syn(ty, expr);
            }
        }
    }
    Err(Error::InvalidType {
        expr: expr.to_string(),
        message: "missing generic argument".to_string(),
    })
}
