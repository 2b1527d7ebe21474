//! Recovery of path parameter names from a handler method's declared arguments.

use crate::routes::HandlerMethod;

/// Name used for a path parameter whose argument is unnamed or missing
pub const UNKNOWN_PARAMETER: &str = "{?}";

/// Returns exactly `count` parameter names for a method serving a route with `count`
/// capture groups.
///
/// Argument *i* names slot *i*. Slots without an argument, or whose argument name is
/// made only of underscores, keep [`UNKNOWN_PARAMETER`].
pub fn extract_parameter_names(method: &HandlerMethod, count: usize) -> Vec<String> {
    let mut parameters = vec![UNKNOWN_PARAMETER.to_string(); count];

    for (slot, arg) in parameters.iter_mut().zip(&method.args) {
        if !arg.is_unnamed() {
            *slot = arg.name.clone();
        }
    }

    parameters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_groups() {
        let method = HandlerMethod::new().with_params(["item_id"]);
        assert!(extract_parameter_names(&method, 0).is_empty());
    }

    #[test]
    fn test_names_in_order() {
        let method = HandlerMethod::new().with_params(["term_one", "term_two"]);
        assert_eq!(extract_parameter_names(&method, 2), vec!["term_one", "term_two"]);
    }

    #[test]
    fn test_underscore_keeps_placeholder() {
        let method = HandlerMethod::new().with_params(["_", "name", "__"]);
        assert_eq!(extract_parameter_names(&method, 3), vec!["{?}", "name", "{?}"]);
    }

    #[test]
    fn test_missing_arguments_are_padded() {
        let method = HandlerMethod::new().with_params(["only"]);
        assert_eq!(extract_parameter_names(&method, 3), vec!["only", "{?}", "{?}"]);
    }

    #[test]
    fn test_extra_arguments_are_ignored() {
        let method = HandlerMethod::new().with_params(["path", "include_body"]);
        assert_eq!(extract_parameter_names(&method, 1), vec!["path"]);
    }

    #[test]
    fn test_deterministic() {
        let method = HandlerMethod::from_signature("fn get(&self, a: i32, _: i32)").unwrap();
        assert_eq!(
            extract_parameter_names(&method, 2),
            extract_parameter_names(&method, 2)
        );
    }
}
