use crate::RenderOptions;
use crate::components::page_body;
use landing_core::SiteContent;
use leptos::prelude::*;

/// Route the analytics loader is served from (see the proxy crate)
const ANALYTICS_SCRIPT_PATH: &str = "/gtag/js";

/// HTML-escape a string for text and double-quoted attributes
///
/// Escapes: & < > " '
fn html_escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#x27;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Placeholder comment Leptos emits for empty options and list ends
const HYDRATION_MARKER: &str = "<!>";

/// Generate the complete HTML document for the content page
///
/// The body is rendered with Leptos; the document shell (doctype, head,
/// stylesheet, analytics loader) is assembled here.
pub fn render_page(content: &SiteContent, options: &RenderOptions) -> String {
    let body = static_html(page_body(content, options).to_html());
    let analytics = options
        .measurement_id
        .as_deref()
        .map(analytics_snippet)
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="{}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <meta name="description" content="{}">
    <style>{}</style>
{}</head>
<body>
{}
</body>
</html>
"#,
        html_escape(&options.lang),
        html_escape(&content.metadata.title),
        html_escape(&content.metadata.description),
        STYLES,
        analytics,
        body
    )
}

/// Drop hydration markers; the page is never hydrated.
///
/// Leptos escapes `<` in text and attribute values, so a literal `<!>`
/// in its output is always a marker.
fn static_html(html: String) -> String {
    html.replace(HYDRATION_MARKER, "")
}

/// Loader for the proxied analytics script.
///
/// Measurement ids are restricted to ASCII alphanumerics and '-' by the
/// config loader; anything else is dropped here as well.
fn analytics_snippet(id: &str) -> String {
    let id: String = id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();

    format!(
        r#"    <script async src="{path}?id={id}"></script>
    <script>
        window.dataLayer = window.dataLayer || [];
        function gtag() {{ dataLayer.push(arguments); }}
        gtag('js', new Date());
        gtag('config', '{id}');
    </script>
"#,
        path = ANALYTICS_SCRIPT_PATH,
        id = id
    )
}

/// Utility classes used by the components
const STYLES: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        html { scroll-behavior: smooth; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
        }
        a { color: inherit; text-decoration: none; }
        ul { list-style: disc; padding-left: 1.5rem; }
        .block { display: block; }
        .fixed { position: fixed; }
        .bottom-8 { bottom: 2rem; }
        .right-8 { right: 2rem; }
        .z-50 { z-index: 50; }
        .min-h-screen { min-height: 100vh; }
        .max-w-prose { max-width: 65ch; }
        .p-3 { padding: 0.75rem; }
        .p-6 { padding: 1.5rem; }
        .mt-12 { margin-top: 3rem; }
        .mb-6 { margin-bottom: 1.5rem; }
        .mb-8 { margin-bottom: 2rem; }
        .space-y-4 > * + * { margin-top: 1rem; }
        .bg-black { background-color: #000; }
        .bg-blue-600 { background-color: #2563eb; }
        .bg-cover { background-size: cover; }
        .bg-center { background-position: center; }
        .rounded-full { border-radius: 9999px; }
        .text-white { color: #fff; }
        .text-blue-600 { color: #2563eb; }
        .hover\:text-blue-800:hover { color: #1e40af; }
        .underline { text-decoration: underline; }
        .font-bold { font-weight: 700; }
        .text-lg { font-size: 1.125rem; line-height: 1.75rem; }
        .text-4xl { font-size: 2.25rem; line-height: 2.5rem; }
        .transition-opacity { transition: opacity 150ms ease-in-out; }
        .hover\:opacity-90:hover { opacity: 0.9; }
        @media (min-width: 768px) {
            .md\:text-xl { font-size: 1.25rem; line-height: 1.75rem; }
            .md\:text-5xl { font-size: 3rem; line-height: 1; }
        }
    "#;

#[cfg(test)]
mod tests {
    use super::*;
    use landing_core::{PageMetadata, Section};

    fn content() -> SiteContent {
        let mut root = Section::new("Welcome");
        root.description = Some("Hello from https://acme.example".to_string());
        root.children.push(Section::new("Products"));
        SiteContent {
            metadata: PageMetadata {
                title: "Acme & Co".to_string(),
                description: "Robots \"for\" everyone".to_string(),
            },
            root,
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#x27;y&#x27;&lt;/b&gt;");
    }

    #[test]
    fn test_render_page_document_shell() {
        let html = render_page(&content(), &RenderOptions::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="en">"#));
        assert!(html.contains("<title>Acme &amp; Co</title>"));
        assert!(html.contains(r#"content="Robots &quot;for&quot; everyone""#));
        assert!(html.contains("scroll-behavior: smooth"));
        assert!(html.contains("Welcome"));
        assert!(html.contains("Products"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_render_page_without_analytics() {
        let html = render_page(&content(), &RenderOptions::default());
        assert!(!html.contains("/gtag/js"));
        assert!(!html.contains("dataLayer"));
    }

    #[test]
    fn test_render_page_with_analytics() {
        let options = RenderOptions {
            measurement_id: Some("G-ABC123".to_string()),
            ..RenderOptions::default()
        };
        let html = render_page(&content(), &options);
        assert!(html.contains(r#"<script async src="/gtag/js?id=G-ABC123"></script>"#));
        assert!(html.contains("gtag('config', 'G-ABC123');"));
    }

    #[test]
    fn test_analytics_snippet_strips_unsafe_characters() {
        let snippet = analytics_snippet("G-1'</script>");
        assert!(snippet.contains("id=G-1script"));
        assert!(!snippet.contains("</script>'"));
    }

    #[test]
    fn test_render_page_has_no_hydration_markers() {
        let mut content = content();
        content.root.children[0].bullet_points = Some(vec![]);
        let html = render_page(&content, &RenderOptions::default());
        assert!(!html.contains(HYDRATION_MARKER));
        assert!(html.contains("Products"));
    }

    #[test]
    fn test_static_html_keeps_escaped_text() {
        assert_eq!(static_html("<p>&lt;!&gt;<!></p><!>".to_string()), "<p>&lt;!&gt;</p>");
    }

    #[test]
    fn test_empty_fields_render_as_absent() {
        let content = landing_core::content::parse_content_str(
            r#"{
                "metadata": { "title": "t", "description": "d" },
                "section-1": {
                    "title": "Root",
                    "description": "",
                    "background": "",
                    "section-2": { "title": "Kid", "href": "" },
                    "bullet-points": { "a": { "text": "x", "href": "" } }
                }
            }"#,
        )
        .unwrap();
        let html = render_page(&content, &RenderOptions::default());

        assert!(!html.contains("bg-center min-h-screen"));
        assert!(!html.contains("url("));
        assert!(!html.contains("href=\"\""));
        assert!(!html.contains("text-lg md:text-xl mb-8"));
        assert!(html.contains("Kid"));
        assert!(html.contains("<li"));
    }

    #[test]
    fn test_from_config() {
        let mut config = landing_core::SiteConfig::default();
        config.analytics.measurement_id = Some("G-XYZ".to_string());
        config.site.default_background = "placeholder.png".to_string();
        let options = RenderOptions::from_config(&config);
        assert_eq!(options.measurement_id.as_deref(), Some("G-XYZ"));
        assert_eq!(options.default_background, "placeholder.png");
        assert_eq!(options.lang, "en");
    }
}
