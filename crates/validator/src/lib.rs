// Content and configuration checks run by `landing validate`

use landing_core::{MAX_HEADING_LEVEL, Section, SiteConfig, SiteContent};
use std::collections::BTreeSet;
use std::path::{Component, Path};

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check a loaded site for problems the JSON schema alone does not catch.
pub fn validate_site(site_dir: &Path, config: &SiteConfig, content: &SiteContent) -> ValidationReport {
    let mut report = ValidationReport::default();

    if content.metadata.title.trim().is_empty() {
        report.warnings.push("metadata.title is empty".to_string());
    }
    if content.metadata.description.trim().is_empty() {
        report.warnings.push("metadata.description is empty".to_string());
    }

    let mut backgrounds = BTreeSet::new();
    check_section(&content.root, "section-1", &mut report, &mut backgrounds);

    let public_dir = site_dir.join(&config.site.public_dir);
    for background in &backgrounds {
        check_background(background, &public_dir, &mut report);
    }

    let depth = content.root.depth();
    report.info.push(format!(
        "{} sections, max depth {}",
        content.root.count(),
        depth
    ));
    if depth > usize::from(MAX_HEADING_LEVEL) {
        report.info.push(format!(
            "Sections deeper than {} levels render as h{}",
            MAX_HEADING_LEVEL, MAX_HEADING_LEVEL
        ));
    }

    if config.analytics.measurement_id.is_none() {
        report.warnings.push(
            "No analytics measurement id (set analytics.measurement_id or GOOGLE_ANALYTICS_ID)"
                .to_string(),
        );
    }

    report
}

fn check_section(
    section: &Section,
    path: &str,
    report: &mut ValidationReport,
    backgrounds: &mut BTreeSet<String>,
) {
    if section.title.trim().is_empty() {
        report.errors.push(format!("{}: title is empty", path));
    }

    if section.href.as_deref().is_some_and(|href| href.trim().is_empty()) {
        report.warnings.push(format!("{}: href is empty", path));
    }

    if let Some(points) = &section.bullet_points {
        for point in points {
            if point.text.trim().is_empty() {
                report
                    .errors
                    .push(format!("{}: bullet point '{}' has no text", path, point.key));
            }
            if point.href.as_deref().is_some_and(|href| href.trim().is_empty()) {
                report
                    .warnings
                    .push(format!("{}: bullet point '{}' has an empty href", path, point.key));
            }
        }
    }

    if let Some(background) = &section.background {
        backgrounds.insert(background.clone());
    }

    for (i, child) in section.children.iter().enumerate() {
        check_section(child, &format!("{} > child {}", path, i + 1), report, backgrounds);
    }
}

/// Local backgrounds (`/...`) must exist in the public directory and decode as images
fn check_background(background: &str, public_dir: &Path, report: &mut ValidationReport) {
    // `//host/...` is protocol-relative, not a local path
    let local = background
        .strip_prefix('/')
        .filter(|rest| !rest.starts_with('/'));
    let Some(relative) = local else {
        report
            .info
            .push(format!("Background '{}' is not local, skipped", background));
        return;
    };

    let relative = Path::new(relative);
    let contained = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !contained {
        report.warnings.push(format!(
            "Background '{}' points outside the public directory",
            background
        ));
        return;
    }

    let path = public_dir.join(relative);
    if !path.is_file() {
        report.warnings.push(format!(
            "Background '{}' not found at {}",
            background,
            path.display()
        ));
        return;
    }

    match image::image_dimensions(&path) {
        Ok((width, height)) => report
            .info
            .push(format!("Background '{}': {}x{}", background, width, height)),
        Err(e) => report.warnings.push(format!(
            "Background '{}' could not be decoded: {}",
            background, e
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_core::{BulletPoint, PageMetadata};
    use std::fs;

    fn site(root: Section) -> SiteContent {
        SiteContent {
            metadata: PageMetadata {
                title: "Acme".to_string(),
                description: "Robots".to_string(),
            },
            root,
        }
    }

    fn configured() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.analytics.measurement_id = Some("G-TEST".to_string());
        config
    }

    #[test]
    fn test_clean_site_has_no_errors_or_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let report = validate_site(dir.path(), &configured(), &site(Section::new("Welcome")));
        assert!(report.is_ok());
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert!(report.info.iter().any(|i| i.contains("1 sections, max depth 1")));
    }

    #[test]
    fn test_blank_titles_and_bullets_are_errors() {
        let mut root = Section::new("Root");
        let mut child = Section::new("  ");
        child.bullet_points = Some(vec![BulletPoint {
            key: "first".to_string(),
            text: String::new(),
            href: Some(String::new()),
        }]);
        root.children.push(child);

        let dir = tempfile::tempdir().unwrap();
        let report = validate_site(dir.path(), &configured(), &site(root));
        assert!(!report.is_ok());
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].contains("section-1 > child 1: title is empty"));
        assert!(report.errors[1].contains("'first' has no text"));
        assert!(report.warnings.iter().any(|w| w.contains("empty href")));
    }

    #[test]
    fn test_missing_measurement_id_warns() {
        let dir = tempfile::tempdir().unwrap();
        let report = validate_site(dir.path(), &SiteConfig::default(), &site(Section::new("W")));
        assert!(report.is_ok());
        assert!(report.warnings.iter().any(|w| w.contains("GOOGLE_ANALYTICS_ID")));
    }

    #[test]
    fn test_deep_tree_notes_heading_clamp() {
        fn chain(depth: usize) -> Section {
            let mut section = Section::new(depth.to_string());
            if depth > 1 {
                section.children.push(chain(depth - 1));
            }
            section
        }
        let root = chain(8);

        let dir = tempfile::tempdir().unwrap();
        let report = validate_site(dir.path(), &configured(), &site(root));
        assert!(report.info.iter().any(|i| i.contains("max depth 8")));
        assert!(report.info.iter().any(|i| i.contains("render as h6")));
    }

    #[test]
    fn test_missing_background_warns() {
        let mut root = Section::new("Hero");
        root.background = Some("/hero.jpg".to_string());

        let dir = tempfile::tempdir().unwrap();
        let report = validate_site(dir.path(), &configured(), &site(root));
        assert!(report.warnings.iter().any(|w| w.contains("'/hero.jpg' not found")));
    }

    #[test]
    fn test_background_dimensions_reported() {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("public");
        fs::create_dir_all(&public).unwrap();
        image::RgbImage::new(4, 3).save(public.join("hero.png")).unwrap();
        fs::write(public.join("broken.png"), b"not an image").unwrap();

        let mut root = Section::new("Hero");
        root.background = Some("/hero.png".to_string());
        let mut child = Section::new("Broken");
        child.background = Some("/broken.png".to_string());
        root.children.push(child);

        let report = validate_site(dir.path(), &configured(), &site(root));
        assert!(report.info.iter().any(|i| i.contains("'/hero.png': 4x3")));
        assert!(report.warnings.iter().any(|w| w.contains("'/broken.png' could not be decoded")));
    }

    #[test]
    fn test_background_outside_public_dir_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("public");
        fs::create_dir_all(&public).unwrap();
        image::RgbImage::new(2, 2).save(dir.path().join("secret.png")).unwrap();

        let mut root = Section::new("Hero");
        root.background = Some("/../secret.png".to_string());
        let report = validate_site(dir.path(), &configured(), &site(root));

        assert!(report.warnings.iter().any(|w| w.contains("outside the public directory")));
        assert!(!report.info.iter().any(|i| i.contains("2x2")));
    }

    #[test]
    fn test_protocol_relative_background_skipped() {
        let mut root = Section::new("Hero");
        root.background = Some("//etc/passwd".to_string());

        let dir = tempfile::tempdir().unwrap();
        let report = validate_site(dir.path(), &configured(), &site(root));
        assert!(report.warnings.is_empty());
        assert!(report.info.iter().any(|i| i.contains("not local")));
    }

    #[test]
    fn test_remote_background_skipped() {
        let mut root = Section::new("Hero");
        root.background = Some("https://cdn.example/hero.jpg".to_string());

        let dir = tempfile::tempdir().unwrap();
        let report = validate_site(dir.path(), &configured(), &site(root));
        assert!(report.warnings.is_empty());
        assert!(report.info.iter().any(|i| i.contains("not local")));
    }
}
