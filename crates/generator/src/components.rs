use crate::RenderOptions;
use crate::level::HeadingLevel;
use crate::linkify::{self, Segment};
use landing_core::{BulletPoint, Section, SiteContent, non_empty};
use leptos::prelude::*;

const HEADING_CLASS: &str = "text-4xl md:text-5xl font-bold mb-6";
const LINK_CLASS: &str = "text-blue-600 hover:text-blue-800 underline";
const SECTION_LINK_CLASS: &str = "block hover:opacity-90 transition-opacity";

/// Whole page body: the section tree plus the back-to-top control
pub fn page_body(content: &SiteContent, options: &RenderOptions) -> AnyView {
    let tree = section_tree(&content.root, HeadingLevel::ROOT, false, options);

    view! {
        <main id="top" class="min-h-screen bg-black text-white">
            {tree}
        </main>
        <BackToTopButton/>
    }
    .into_any()
}

/// Render a section followed by its children, recursively.
///
/// Children are rendered one level deeper (capped at h6). Children of the
/// top-level section get extra top margin; a child with a non-empty `href`
/// is wrapped in a block link.
pub fn section_tree(
    section: &Section,
    level: HeadingLevel,
    nested: bool,
    options: &RenderOptions,
) -> AnyView {
    let wrapper_class = if nested { "" } else { "mt-12" };

    let children = section
        .children
        .iter()
        .map(|child| {
            let subtree = section_tree(child, level.child(), true, options);
            let inner = match non_empty(child.href.as_deref()) {
                Some(href) => view! {
                    <a href=href.to_string() class=SECTION_LINK_CLASS>
                        {subtree}
                    </a>
                }
                .into_any(),
                None => subtree,
            };
            view! { <div class=wrapper_class>{inner}</div> }
        })
        .collect_view();

    (section_content(section, level, options), children).into_any()
}

/// Heading, description and bullet points of one section.
///
/// Empty `description` and `background` strings count as absent.
fn section_content(section: &Section, level: HeadingLevel, options: &RenderOptions) -> AnyView {
    let class = if section.has_custom_background(&options.default_background) {
        "p-6 bg-cover bg-center min-h-screen"
    } else {
        "p-6 bg-cover bg-center"
    };

    let heading = heading(level, section.title.clone());

    let description = non_empty(section.description.as_deref()).map(|text| {
        view! {
            <p class="text-lg md:text-xl mb-8 max-w-prose">
                <span><TextWithLinks text=text.to_string()/></span>
            </p>
        }
    });

    let bullets = section
        .bullet_points
        .clone()
        .map(|points| view! { <BulletList points=points/> });

    match non_empty(section.background.as_deref()) {
        Some(background) => {
            let style = format!("background-image: url(\"{}\")", css_escape(background));
            view! {
                <div class=class style=style>
                    {heading}
                    {description}
                    {bullets}
                </div>
            }
            .into_any()
        }
        None => view! {
            <div class=class>
                {heading}
                {description}
                {bullets}
            </div>
        }
        .into_any(),
    }
}

fn heading(level: HeadingLevel, title: String) -> AnyView {
    match level.get() {
        1 => view! { <h1 class=HEADING_CLASS>{title}</h1> }.into_any(),
        2 => view! { <h2 class=HEADING_CLASS>{title}</h2> }.into_any(),
        3 => view! { <h3 class=HEADING_CLASS>{title}</h3> }.into_any(),
        4 => view! { <h4 class=HEADING_CLASS>{title}</h4> }.into_any(),
        5 => view! { <h5 class=HEADING_CLASS>{title}</h5> }.into_any(),
        _ => view! { <h6 class=HEADING_CLASS>{title}</h6> }.into_any(),
    }
}

/// Escape a value for a double-quoted CSS string
fn css_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Description text with bare URLs turned into links
#[component]
pub fn TextWithLinks(text: String) -> impl IntoView {
    let parts = linkify::segments(&text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Url(url) => {
                let href = url.to_string();
                view! { <a href=href class=LINK_CLASS>{url.to_string()}</a> }.into_any()
            }
            Segment::Text(plain) => view! { <span>{plain.to_string()}</span> }.into_any(),
        })
        .collect_view();
    parts
}

#[component]
pub fn BulletList(points: Vec<BulletPoint>) -> impl IntoView {
    let items = points
        .into_iter()
        .map(|point| {
            let link = non_empty(point.href.as_deref()).map(|href| {
                let label = href.to_string();
                view! { <a href=href.to_string() class=LINK_CLASS>{label}</a> }
            });
            view! {
                <li class="text-lg">
                    <span>{format!("{} ", point.text)}</span>
                    {link}
                </li>
            }
        })
        .collect_view();

    view! { <ul class="space-y-4 max-w-prose">{items}</ul> }
}

/// Fixed control that scrolls back to the top of the page
#[component]
pub fn BackToTopButton() -> impl IntoView {
    view! {
        <a
            href="#top"
            class="fixed bottom-8 right-8 bg-blue-600 text-white p-3 rounded-full z-50"
            aria-label="Scroll to top"
        >
            "↑"
        </a>
    }
}
