//! Conversion of regex route patterns into templated document paths.

use crate::error::{Error, Result};
use crate::reflection::extract_parameter_names;
use crate::routes::{HandlerMethod, Route};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

static BRACKETS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(.*?\)").expect("bracket regex should be valid"));

/// Number of capture groups in a route pattern.
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`] if the pattern is not a valid regex.
pub fn capture_group_count(pattern: &str) -> Result<usize> {
    let regex = Regex::new(pattern).map_err(|e| Error::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;
    Ok(regex.captures_len() - 1)
}

/// Build the templated path for `method` served by `route`.
///
/// Each bracketed group of the pattern is replaced, left to right, with `{name}` where
/// `name` comes from the method's arguments, then the trailing `$` anchor is dropped.
/// Returns `None`, after logging a warning, when the pattern is not a valid regex or its
/// bracket segments do not line up with its capture groups.
pub fn format_handler_path(route: &Route, method: &HandlerMethod) -> Option<String> {
    let pattern = route.pattern();

    let groups = match capture_group_count(pattern) {
        Ok(groups) => groups,
        Err(e) => {
            warn!("Illegal route. {}", e);
            return None;
        }
    };

    let parameters = extract_parameter_names(method, groups);
    let brackets: Vec<&str> = BRACKETS.find_iter(pattern).map(|m| m.as_str()).collect();

    if brackets.len() != parameters.len() {
        warn!(
            "Illegal route. Capture groups do not match all parameters. Route = {} ({} brackets, {} parameters)",
            pattern,
            brackets.len(),
            parameters.len()
        );
        return None;
    }

    let mut path = pattern.to_string();
    for (bracket, name) in brackets.iter().zip(&parameters) {
        path = path.replacen(bracket, &format!("{{{}}}", name), 1);
    }
    path.pop();

    Some(path)
}
