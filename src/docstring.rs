//! Operation documents embedded in handler docstrings.
//!
//! Everything after the first line containing [`SWAGGER_DOC_SEPARATOR`] is read as a YAML
//! mapping describing the operation.

use log::debug;
use serde_json::{json, Value};

/// Marker line separating prose from the operation document
pub const SWAGGER_DOC_SEPARATOR: &str = "---";

/// Description of the fragment used when the block cannot be loaded
pub const INVALID_SWAGGER_DESCRIPTION: &str = "Swagger document could not be loaded from docstring";

/// Tag of the fragment used when the block cannot be loaded
pub const INVALID_SWAGGER_TAG: &str = "Invalid Swagger";

/// Whether the docstring contains an operation block at all
pub fn has_swagger_block(doc: &str) -> bool {
    doc.contains(SWAGGER_DOC_SEPARATOR)
}

/// Returns the lines after the first separator line, or `None` without a separator
pub fn extract_swagger_definition(doc: &str) -> Option<String> {
    let mut lines = doc.lines();
    lines.by_ref().find(|line| line.contains(SWAGGER_DOC_SEPARATOR))?;
    Some(lines.collect::<Vec<_>>().join("\n"))
}

/// Fragment substituted for blocks that are missing or not a mapping
pub fn invalid_swagger_fragment() -> Value {
    json!({
        "description": INVALID_SWAGGER_DESCRIPTION,
        "tags": [INVALID_SWAGGER_TAG],
    })
}

/// Load the operation document embedded in a docstring.
///
/// Tabs are expanded to four spaces before parsing. Anything that does not load as a
/// mapping yields [`invalid_swagger_fragment`].
pub fn build_swagger_docs(doc: &str) -> Value {
    let block = match extract_swagger_definition(doc) {
        Some(block) => block.replace('\t', "    "),
        None => {
            debug!("Docstring has no {} separator", SWAGGER_DOC_SEPARATOR);
            return invalid_swagger_fragment();
        }
    };

    let yaml: serde_yaml::Value = match serde_yaml::from_str(&block) {
        Ok(yaml) => yaml,
        Err(e) => {
            debug!("Docstring block is not valid YAML: {}", e);
            return invalid_swagger_fragment();
        }
    };

    if !yaml.is_mapping() {
        debug!("Docstring block is not a mapping");
        return invalid_swagger_fragment();
    }

    // Going through the serializer turns numeric keys such as `200:` into strings
    match serde_json::to_value(&yaml) {
        Ok(value) => value,
        Err(e) => {
            debug!("Docstring block cannot be represented as JSON: {}", e);
            invalid_swagger_fragment()
        }
    }
}
