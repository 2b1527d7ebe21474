//! Route table types handed to the generator.
//!
//! A [`Route`] pairs a regex path pattern with a [`Handler`]. The handler declares one
//! [`HandlerMethod`] per HTTP verb it serves, and each method may carry an [`Annotation`]
//! telling the generator where its documentation comes from.

use crate::model::FieldType;
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// HTTP methods a handler can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// HTTP GET method
    Get,
    /// HTTP HEAD method
    Head,
    /// HTTP POST method
    Post,
    /// HTTP DELETE method
    Delete,
    /// HTTP PATCH method
    Patch,
    /// HTTP PUT method
    Put,
    /// HTTP OPTIONS method
    Options,
}

impl HttpMethod {
    /// Methods in the order operations are emitted for a handler
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Put,
        HttpMethod::Options,
    ];

    /// Lowercase name, as used for keys in a path item
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Head => "head",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Put => "put",
            HttpMethod::Options => "options",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// One declared argument of a handler method, receiver excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerArg {
    /// Argument name; all-underscore names mark unnamed positional arguments
    pub name: String,
    /// Declared type, when known
    pub ty: Option<FieldType>,
}

impl HandlerArg {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
        }
    }

    pub fn typed(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
        }
    }

    /// True when the name consists only of `_` characters
    pub fn is_unnamed(&self) -> bool {
        !self.name.is_empty() && self.name.chars().all(|c| c == '_')
    }
}

/// A response entry of [`SwaggerMethodInfo`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseSpec {
    /// Name of the registered model describing the response body
    pub model: String,
    /// Response description; synthesized from the status code when absent
    #[serde(default)]
    pub description: Option<String>,
}

impl ResponseSpec {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Model-based metadata attached to a handler method.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SwaggerMethodInfo {
    /// Status code -> response model
    #[serde(deserialize_with = "deserialize_status_codes")]
    pub responses: IndexMap<u16, ResponseSpec>,
    /// Request body model name
    #[serde(default)]
    pub request: Option<String>,
    /// Query string model name
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A status code key as written in YAML (`200`) or JSON (`"200"`)
#[derive(Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
enum StatusKey {
    Code(u64),
    Text(String),
}

fn deserialize_status_codes<'de, D>(deserializer: D) -> Result<IndexMap<u16, ResponseSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: IndexMap<StatusKey, ResponseSpec> = IndexMap::deserialize(deserializer)?;
    let mut responses = IndexMap::with_capacity(raw.len());

    for (key, response) in raw {
        let status = match &key {
            StatusKey::Code(code) => u16::try_from(*code).ok(),
            StatusKey::Text(text) => text.trim().parse::<u16>().ok(),
        };
        match status {
            Some(status) => {
                responses.insert(status, response);
            }
            None => {
                return Err(D::Error::custom(format!("invalid status code: {:?}", key)));
            }
        }
    }

    Ok(responses)
}

impl SwaggerMethodInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn response(mut self, status: u16, response: ResponseSpec) -> Self {
        self.responses.insert(status, response);
        self
    }

    pub fn request(mut self, model: impl Into<String>) -> Self {
        self.request = Some(model.into());
        self
    }

    pub fn query(mut self, model: impl Into<String>) -> Self {
        self.query = Some(model.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Where a handler method's documentation comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Free text; the part after a `---` line is read as a YAML operation
    Docstring(String),
    /// An operation fragment supplied as structured data
    Document(Value),
    /// References to registered schema models
    Models(SwaggerMethodInfo),
}

/// A handler method: its declared arguments and optional annotation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandlerMethod {
    pub args: Vec<HandlerArg>,
    pub annotation: Option<Annotation>,
}

impl HandlerMethod {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare untyped arguments by name
    pub fn with_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = names.into_iter().map(HandlerArg::new).collect();
        self
    }

    /// Declare arguments from a Rust signature such as `fn get(&self, id: i32)`
    pub fn from_signature(signature: &str) -> crate::error::Result<Self> {
        Ok(Self {
            args: crate::parser::parse_signature(signature)?,
            annotation: None,
        })
    }

    pub fn with_args(mut self, args: Vec<HandlerArg>) -> Self {
        self.args = args;
        self
    }

    pub fn with_docstring(mut self, doc: impl Into<String>) -> Self {
        self.annotation = Some(Annotation::Docstring(doc.into()));
        self
    }

    pub fn with_document(mut self, document: Value) -> Self {
        self.annotation = Some(Annotation::Document(document));
        self
    }

    pub fn with_models(mut self, info: SwaggerMethodInfo) -> Self {
        self.annotation = Some(Annotation::Models(info));
        self
    }
}

/// A request handler exposing one declared method per supported verb.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Handler {
    pub name: String,
    pub methods: IndexMap<HttpMethod, HandlerMethod>,
}

impl Handler {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: IndexMap::new(),
        }
    }

    pub fn method(mut self, method: HttpMethod, handler_method: HandlerMethod) -> Self {
        self.methods.insert(method, handler_method);
        self
    }

    pub fn get_method(&self, method: HttpMethod) -> Option<&HandlerMethod> {
        self.methods.get(&method)
    }
}

/// A registered route: regex pattern, handler and optional handler kwargs.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pattern: String,
    handler: Handler,
    kwargs: Option<Value>,
}

impl Route {
    /// Build a route, anchoring the pattern with `$` if it is not already
    pub fn new(pattern: impl Into<String>, handler: Handler) -> Self {
        let mut pattern = pattern.into();
        if !pattern.ends_with('$') {
            pattern.push('$');
        }
        Self {
            pattern,
            handler,
            kwargs: None,
        }
    }

    pub fn with_kwargs(mut self, kwargs: Value) -> Self {
        self.kwargs = Some(kwargs);
        self
    }

    /// The anchored regex pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn kwargs(&self) -> Option<&Value> {
        self.kwargs.as_ref()
    }
}
