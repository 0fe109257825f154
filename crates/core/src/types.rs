use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

/// Complete content document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteContent {
    pub metadata: PageMetadata,
    /// The section stored under `section-1` at the top of the document
    pub root: Section,
}

/// Page-level metadata used for `<title>` and the description meta tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
}

/// A node of the nested content tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Bullet points in document order. `Some(vec![])` still renders an empty list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet_points: Option<Vec<BulletPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Child sections in document order
    pub children: Vec<Section>,
}

impl Section {
    /// A bare section with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            background: None,
            bullet_points: None,
            href: None,
            children: Vec::new(),
        }
    }

    /// True when the section sets a background other than the placeholder image.
    pub fn has_custom_background(&self, default_background: &str) -> bool {
        non_empty(self.background.as_deref()).is_some_and(|bg| !bg.contains(default_background))
    }

    /// Number of levels in this subtree, counting this section as 1
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Section::depth)
            .max()
            .unwrap_or(0)
    }

    /// Total number of sections in this subtree, including this one
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Section::count).sum::<usize>()
    }
}

/// Optional text fields render only when set to a non-empty string
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// A list item within a section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletPoint {
    /// Key the point was stored under in the document
    pub key: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Complete site configuration (site.toml plus environment overrides)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteConfig {
    pub site: SiteSettings,
    pub analytics: AnalyticsSettings,
    pub server: ServerSettings,
}

/// Content and asset locations, relative to the site directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSettings {
    pub content: PathBuf,
    pub public_dir: PathBuf,
    /// Background that does not switch a section to full height
    pub default_background: String,
    pub lang: String,
}

/// Analytics proxy settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_id: Option<String>,
    pub upstream_url: String,
}

/// Local server settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
}

pub const DEFAULT_CONTENT_FILE: &str = "content.json";
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_BACKGROUND: &str = "background.webp";
pub const DEFAULT_UPSTREAM_URL: &str = "https://www.googletagmanager.com/gtag/js";
pub const DEFAULT_PORT: u16 = 3000;

/// Deepest heading level a section can render with (h6)
pub const MAX_HEADING_LEVEL: u8 = 6;

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteSettings {
                content: PathBuf::from(DEFAULT_CONTENT_FILE),
                public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
                default_background: DEFAULT_BACKGROUND.to_string(),
                lang: "en".to_string(),
            },
            analytics: AnalyticsSettings {
                measurement_id: None,
                upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            },
            server: ServerSettings {
                host: IpAddr::V4(Ipv4Addr::LOCALHOST),
                port: DEFAULT_PORT,
            },
        }
    }
}
