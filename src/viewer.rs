//! Static viewer page setup.
//!
//! The viewer is a single HTML page that fetches the generated document from the
//! document-retrieval URL and renders it client-side. This module only computes the URLs
//! and fills in the page template; serving both is left to the application.

use log::debug;

/// Bundled viewer page
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/ui.html");

/// Placeholder replaced with the document-retrieval URL
pub const SWAGGER_URL_PLACEHOLDER: &str = "{{ SWAGGER_URL }}";

/// Placeholder replaced with the model display depth
pub const DISPLAY_MODELS_PLACEHOLDER: &str = "{{ DISPLAY_MODELS }}";

/// URLs under which the viewer and the document are served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerUrls {
    /// Viewer page URL, always starting with `/`
    pub ui_url: String,
    /// Viewer page URL without a trailing `/`
    pub base_ui_url: String,
    /// Document-retrieval URL
    pub spec_url: String,
}

impl ViewerUrls {
    pub fn new(swagger_url: &str) -> Self {
        let ui_url = if swagger_url.starts_with('/') {
            swagger_url.to_string()
        } else {
            format!("/{}", swagger_url)
        };
        let base_ui_url = ui_url.trim_end_matches('/').to_string();
        let spec_url = format!("{}/swagger.json", ui_url);

        debug!("Viewer at {}, document at {}", ui_url, spec_url);
        Self {
            ui_url,
            base_ui_url,
            spec_url,
        }
    }

    /// Routes the application should mount: the viewer with and without a trailing
    /// slash, then the document
    pub fn routes(&self) -> [String; 3] {
        [
            self.ui_url.clone(),
            format!("{}/", self.base_ui_url),
            self.spec_url.clone(),
        ]
    }
}

impl Default for ViewerUrls {
    fn default() -> Self {
        Self::new("/api/doc")
    }
}

/// Fill in the viewer template. Hidden models use a display depth of `-1`.
pub fn render_viewer_page(template: &str, spec_url: &str, display_models: bool) -> String {
    let depth = if display_models { "1" } else { "-1" };
    template
        .replace(SWAGGER_URL_PLACEHOLDER, spec_url)
        .replace(DISPLAY_MODELS_PLACEHOLDER, depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_from_absolute_path() {
        let urls = ViewerUrls::new("/api/doc");
        assert_eq!(urls.ui_url, "/api/doc");
        assert_eq!(urls.base_ui_url, "/api/doc");
        assert_eq!(urls.spec_url, "/api/doc/swagger.json");
        assert_eq!(urls.routes(), ["/api/doc", "/api/doc/", "/api/doc/swagger.json"]);
    }

    #[test]
    fn test_urls_from_relative_path_with_trailing_slash() {
        let urls = ViewerUrls::new("doc/");
        assert_eq!(urls.ui_url, "/doc/");
        assert_eq!(urls.base_ui_url, "/doc");
        assert_eq!(urls.spec_url, "/doc//swagger.json");
    }

    #[test]
    fn test_render_substitutes_both_points() {
        let template = "url={{ SWAGGER_URL }} depth={{ DISPLAY_MODELS }}";
        assert_eq!(
            render_viewer_page(template, "/doc/swagger.json", true),
            "url=/doc/swagger.json depth=1"
        );
        assert_eq!(
            render_viewer_page(template, "/doc/swagger.json", false),
            "url=/doc/swagger.json depth=-1"
        );
    }

    #[test]
    fn test_default_template_has_placeholders() {
        assert!(DEFAULT_TEMPLATE.contains(SWAGGER_URL_PLACEHOLDER));
        assert!(DEFAULT_TEMPLATE.contains(DISPLAY_MODELS_PLACEHOLDER));
        let page = render_viewer_page(DEFAULT_TEMPLATE, "/api/doc/swagger.json", true);
        assert!(page.contains("/api/doc/swagger.json"));
        assert!(!page.contains("{{"));
    }
}
