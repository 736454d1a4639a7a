// Card rendering.
// Turns a repository record into a self-contained project card, plus a plain-text summary form.

use crate::document::Element;
use crate::github::Repository;

/// Shown when a repository has no description.
pub const NO_DESCRIPTION: &str = "No description provided.";

/// Shown in text output when a repository has no topics.
pub const NO_TOPICS: &str = "\u{2014}";

const EXTERNAL_LINK_ARROW: &str = "\u{2197}";

/// Build the card for one repository.
///
/// The link opens in a new browsing context without sending a referrer.
/// Only http(s) URLs are linked; anything else becomes `#`.
/// Topic slugs are shown with hyphens turned into spaces. A repository without
/// topics gets an empty stack rather than failing.
pub fn project_card(repo: &Repository) -> Element {
    let link = Element::new("a")
        .with_attr("href", safe_href(&repo.html_url))
        .with_attr("target", "_blank")
        .with_attr("rel", "noreferrer")
        .with_child(Element::new("span").with_class("prompt").with_text("#"))
        .with_child(
            Element::new("h3")
                .with_class("project__name")
                .with_text(repo.name.as_str()),
        )
        .with_child(
            Element::new("span")
                .with_class("arrow")
                .with_text(EXTERNAL_LINK_ARROW),
        );

    let description = Element::new("p")
        .with_class("project__desc")
        .with_text(description_or_placeholder(repo));

    let stack = repo.topics.iter().fold(
        Element::new("div").with_class("project__stack"),
        |stack, topic| {
            stack.with_child(
                Element::new("p")
                    .with_class("topic")
                    .with_text(topic_label(topic)),
            )
        },
    );

    Element::new("article")
        .with_class("project")
        .with_child(
            Element::new("div")
                .with_class("project__head")
                .with_child(link),
        )
        .with_child(description)
        .with_child(stack)
}

/// Topics as one line: `"web dev · rust"`, or an em dash when there are none.
pub fn format_topics(topics: &[String]) -> String {
    if topics.is_empty() {
        return NO_TOPICS.to_string();
    }

    topics
        .iter()
        .map(|t| topic_label(t))
        .collect::<Vec<_>>()
        .join(" \u{00b7} ")
}

/// One-line text rendering used by the `list` command.
pub fn summary_line(repo: &Repository) -> String {
    format!(
        "{}  {}  [{}]  {}",
        repo.name,
        description_or_placeholder(repo),
        format_topics(&repo.topics),
        repo.html_url
    )
}

fn description_or_placeholder(repo: &Repository) -> &str {
    repo.description.as_deref().unwrap_or(NO_DESCRIPTION)
}

fn safe_href(url: &str) -> &str {
    if url.starts_with("https://") || url.starts_with("http://") {
        url
    } else {
        "#"
    }
}

fn topic_label(topic: &str) -> String {
    topic.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(description: Option<&str>, topics: &[&str]) -> Repository {
        Repository {
            name: "portfolio".to_string(),
            html_url: "https://github.com/mstanimirovic/portfolio".to_string(),
            description: description.map(str::to_string),
            topics: topics.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_card_structure() {
        let card = project_card(&repo(Some("My site"), &["static-site", "rust"]));

        assert_eq!(card.tag(), "article");
        assert!(card.has_class("project"));

        let head = card.find_by_class("project__head")[0];
        let link = head.child_elements().next().unwrap();
        assert_eq!(link.tag(), "a");
        assert_eq!(link.attr("href"), Some("https://github.com/mstanimirovic/portfolio"));
        assert_eq!(link.attr("target"), Some("_blank"));
        assert_eq!(link.attr("rel"), Some("noreferrer"));

        assert_eq!(card.find_by_class("prompt")[0].text_content(), "#");
        assert_eq!(card.find_by_class("project__name")[0].text_content(), "portfolio");
        assert_eq!(card.find_by_class("arrow")[0].text_content(), "\u{2197}");
        assert_eq!(card.find_by_class("project__desc")[0].text_content(), "My site");

        let topics: Vec<String> = card
            .find_by_class("topic")
            .iter()
            .map(|t| t.text_content())
            .collect();
        assert_eq!(topics, vec!["static site", "rust"]);
    }

    #[test]
    fn test_null_description_uses_placeholder() {
        let card = project_card(&repo(None, &[]));
        let desc = card.find_by_class("project__desc")[0].text_content();

        assert_eq!(desc, "No description provided.");
        assert!(!card.to_html().contains("null"));
    }

    #[test]
    fn test_empty_topics_render_empty_stack() {
        let card = project_card(&repo(Some("x"), &[]));

        let stack = card.find_by_class("project__stack")[0];
        assert_eq!(stack.child_elements().count(), 0);
    }

    #[test]
    fn test_all_hyphens_replaced() {
        let card = project_card(&repo(None, &["a-b-c"]));
        assert_eq!(card.find_by_class("topic")[0].text_content(), "a b c");
    }

    #[test]
    fn test_card_html_escapes_content() {
        let mut r = repo(Some("<b>bold</b>"), &[]);
        r.name = "a&b".to_string();
        let html = project_card(&r).to_html();

        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("a&amp;b"));
    }

    #[test]
    fn test_non_http_url_not_linked() {
        let mut r = repo(None, &[]);
        r.html_url = "javascript:alert(1)".to_string();
        let card = project_card(&r);

        let link = card.find_by_class("project__head")[0]
            .child_elements()
            .next()
            .unwrap();
        assert_eq!(link.attr("href"), Some("#"));
        assert!(!card.to_html().contains("javascript:"));
    }

    #[test]
    fn test_format_topics() {
        assert_eq!(format_topics(&[]), "\u{2014}");
        assert_eq!(
            format_topics(&["web-dev".to_string(), "rust".to_string()]),
            "web dev \u{00b7} rust"
        );
    }

    #[test]
    fn test_summary_line() {
        let line = summary_line(&repo(None, &["cli-tool"]));
        assert_eq!(
            line,
            "portfolio  No description provided.  [cli tool]  https://github.com/mstanimirovic/portfolio"
        );
    }
}
