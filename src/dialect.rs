//! Supported API description dialects and their identifiers.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Identifier of the Swagger 2.0 dialect
pub const API_SWAGGER_2: &str = "swagger:2.0";
/// Identifier of the OpenAPI 3 dialect fed by docstrings and registered models
pub const API_OPENAPI_3: &str = "openapi:3.0";
/// Identifier of the OpenAPI 3 dialect fed by per-method model declarations
pub const API_OPENAPI_3_PYDANTIC: &str = "openapi:3.0:pydantic";

/// One of the three document shapes the generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Legacy two-column shape: `definitions` + `basePath` + `schemes`
    Swagger2,
    /// Reference-based shape: `components` + `servers`
    OpenApi3,
    /// Reference-based shape built from model declarations
    OpenApi3Models,
}

impl Dialect {
    /// All dialects, in lookup order
    pub const ALL: [Dialect; 3] = [Dialect::Swagger2, Dialect::OpenApi3, Dialect::OpenApi3Models];

    /// The identifier used to select this dialect
    pub fn identifier(self) -> &'static str {
        match self {
            Dialect::Swagger2 => API_SWAGGER_2,
            Dialect::OpenApi3 => API_OPENAPI_3,
            Dialect::OpenApi3Models => API_OPENAPI_3_PYDANTIC,
        }
    }

    /// Prefix for `$ref` values pointing at a named schema
    pub fn ref_prefix(self) -> &'static str {
        match self {
            Dialect::Swagger2 => "#/definitions/",
            Dialect::OpenApi3 | Dialect::OpenApi3Models => "#/components/schemas/",
        }
    }

    /// Whether schema fragments nest `type`/`format` under `schema` for parameters
    pub fn nests_parameter_schema(self) -> bool {
        !matches!(self, Dialect::Swagger2)
    }

    pub fn ref_to(self, model_name: &str) -> String {
        format!("{}{}", self.ref_prefix(), model_name)
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Dialect::ALL
            .into_iter()
            .find(|d| d.identifier() == s)
            .ok_or_else(|| Error::UnknownDialect(s.to_string()))
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_identifiers() {
        assert_eq!("swagger:2.0".parse::<Dialect>().unwrap(), Dialect::Swagger2);
        assert_eq!("openapi:3.0".parse::<Dialect>().unwrap(), Dialect::OpenApi3);
        assert_eq!(
            "openapi:3.0:pydantic".parse::<Dialect>().unwrap(),
            Dialect::OpenApi3Models
        );
    }

    #[test]
    fn test_parse_unknown_identifier() {
        let err = "not-a-real-dialect".parse::<Dialect>().unwrap_err();
        assert!(matches!(err, Error::UnknownDialect(ref id) if id == "not-a-real-dialect"));
    }

    #[test]
    fn test_ref_prefix() {
        assert_eq!(Dialect::Swagger2.ref_to("Pet"), "#/definitions/Pet");
        assert_eq!(Dialect::OpenApi3Models.ref_to("Pet"), "#/components/schemas/Pet");
    }
}
