use crate::error::{Error, Result};
use crate::types::*;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Key of the root section at the top of the document
pub const ROOT_SECTION_KEY: &str = "section-1";

/// Keys starting with this prefix hold child sections
pub const CHILD_SECTION_PREFIX: &str = "section-";

/// Raw JSON document structure
/// This matches content.json exactly; children are still untyped here
#[derive(Debug, Deserialize)]
struct RawContent {
    metadata: PageMetadata,
    #[serde(rename = "section-1")]
    root: RawSection,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    title: String,
    description: Option<String>,
    background: Option<String>,
    #[serde(rename = "bullet-points")]
    bullet_points: Option<Map<String, Value>>,
    href: Option<String>,
    /// Everything else, in document order (serde_json `preserve_order`)
    #[serde(flatten)]
    rest: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawBulletPoint {
    text: String,
    href: Option<String>,
}

/// Parse content.json from a file path
pub fn parse_content<P: AsRef<Path>>(path: P) -> Result<SiteContent> {
    let content = fs::read_to_string(path)?;
    parse_content_str(&content)
}

/// Parse content.json from a string (useful for testing)
pub fn parse_content_str(content: &str) -> Result<SiteContent> {
    let raw: RawContent = serde_json::from_str(content)?;
    let root = convert_section(raw.root, ROOT_SECTION_KEY)?;

    Ok(SiteContent {
        metadata: raw.metadata,
        root,
    })
}

/// Convert a raw section into the typed tree.
///
/// `path` is the dotted key path of the section (e.g. `section-1.section-2`)
/// and only feeds error messages.
fn convert_section(raw: RawSection, path: &str) -> Result<Section> {
    let bullet_points = raw
        .bullet_points
        .map(|points| {
            points
                .into_iter()
                .map(|(key, value)| {
                    let point: RawBulletPoint = serde_json::from_value(value).map_err(|e| {
                        Error::ContentParse(format!(
                            "Invalid bullet point '{}' in {}: {}",
                            key, path, e
                        ))
                    })?;
                    Ok(BulletPoint {
                        key,
                        text: point.text,
                        href: point.href,
                    })
                })
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;

    let mut children = Vec::new();
    for (key, value) in raw.rest {
        if !key.starts_with(CHILD_SECTION_PREFIX) {
            continue;
        }

        let child_path = format!("{}.{}", path, key);
        if !value.is_object() {
            return Err(Error::InvalidData(format!(
                "'{}' must be a section object",
                child_path
            )));
        }

        let raw_child: RawSection = serde_json::from_value(value)
            .map_err(|e| Error::ContentParse(format!("Invalid section {}: {}", child_path, e)))?;
        children.push(convert_section(raw_child, &child_path)?);
    }

    Ok(Section {
        title: raw.title,
        description: raw.description,
        background: raw.background,
        bullet_points,
        href: raw.href,
        children,
    })
}
