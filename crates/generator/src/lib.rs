// Page generation with Leptos SSR (no hydration)

pub mod components;
pub mod level;
pub mod linkify;
pub mod page;

use landing_core::{DEFAULT_BACKGROUND, SiteConfig};

pub use level::HeadingLevel;
pub use page::render_page;

/// Settings that influence rendering but are not part of the content document
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Backgrounds containing this name do not make a section full height
    pub default_background: String,
    /// Analytics measurement id; the loader snippet is omitted when unset
    pub measurement_id: Option<String>,
    pub lang: String,
}

impl RenderOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            default_background: config.site.default_background.clone(),
            measurement_id: config.analytics.measurement_id.clone(),
            lang: config.site.lang.clone(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            default_background: DEFAULT_BACKGROUND.to_string(),
            measurement_id: None,
            lang: "en".to_string(),
        }
    }
}
