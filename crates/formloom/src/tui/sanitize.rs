//! Acceptance-content sanitizer.
//!
//! Acceptance fields carry raw HTML that is never trusted as stored: the
//! content passes through [`sanitize`] before every render, and the terminal
//! shows the plain-text form via [`strip_tags`].

/// Tags that survive sanitization. No attribute survives on any tag.
const ALLOWED_TAGS: [&str; 12] = [
    "p", "strong", "b", "em", "i", "u", "a", "br", "ul", "ol", "li", "span",
];

/// Tags whose inner text is dropped along with the tag itself.
const ELIDED_TAGS: [&str; 2] = ["script", "style"];

/// Reduce HTML to the allowlisted tags, attribute-free.
///
/// Disallowed tags are removed while their text content is kept, except for
/// script and style elements whose content is elided. An unterminated tag at
/// the end of input is dropped rather than echoed back.
pub fn sanitize(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;
    let mut tag_buffer = String::new();
    // Name of the open elided element, until its closing tag.
    let mut eliding: Option<String> = None;

    for c in html.chars() {
        if c == '<' {
            in_tag = true;
            tag_buffer.clear();
        } else if c == '>' && in_tag {
            in_tag = false;
            let tag = tag_buffer.trim().to_lowercase();
            let is_closing = tag.starts_with('/');
            let is_self_closing = tag.ends_with('/');
            let name = tag
                .trim_start_matches('/')
                .trim_end_matches('/')
                .split_whitespace()
                .next()
                .unwrap_or("")
                .to_string();

            if let Some(open) = &eliding {
                if is_closing && name == *open {
                    eliding = None;
                }
                continue;
            }

            if ALLOWED_TAGS.contains(&name.as_str()) {
                if is_closing {
                    result.push_str(&format!("</{}>", name));
                } else if is_self_closing {
                    result.push_str(&format!("<{}/>", name));
                } else {
                    result.push_str(&format!("<{}>", name));
                }
            } else if ELIDED_TAGS.contains(&name.as_str()) && !is_closing && !is_self_closing {
                eliding = Some(name);
            }
        } else if in_tag {
            tag_buffer.push(c);
        } else if eliding.is_none() {
            result.push(c);
        }
    }

    result
}

/// Drop every tag and unescape the common entities, for terminal display.
///
/// Tag boundaries become spaces so words in adjacent elements stay separate.
pub fn strip_tags(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        if c == '<' {
            in_tag = true;
            result.push(' ');
        } else if c == '>' {
            in_tag = false;
        } else if !in_tag {
            result.push(c);
        }
    }

    unescape(&result)
}

/// Sanitized plain text of a content string, collapsed to single spaces.
pub fn display_text(html: &str) -> String {
    strip_tags(&sanitize(html))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn unescape(s: &str) -> String {
    let mut result = s.to_string();
    // &amp; goes last so escaped entities do not unescape twice.
    let replacements = [
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
        ("&apos;", "'"),
        ("&nbsp;", " "),
        ("&amp;", "&"),
    ];
    for (from, to) in replacements {
        result = result.replace(from, to);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_tags_survive_without_attributes() {
        let out = sanitize(r#"<p class="big"><strong>Hi</strong></p>"#);
        assert_eq!(out, "<p><strong>Hi</strong></p>");
    }

    #[test]
    fn test_img_onerror_payload_is_dropped() {
        let out = sanitize("<img src=x onerror=alert(1)>");
        assert!(!out.contains("onerror"));
        assert!(!out.contains("img"));
        assert_eq!(display_text("<img src=x onerror=alert(1)>"), "");
    }

    #[test]
    fn test_script_content_is_elided() {
        let out = sanitize("before<script>alert(1)</script>after");
        assert_eq!(out, "beforeafter");
    }

    #[test]
    fn test_unknown_tags_keep_their_text() {
        assert_eq!(sanitize("<div>hello</div>"), "hello");
    }

    #[test]
    fn test_closing_and_self_closing_forms() {
        assert_eq!(sanitize("a<br/>b"), "a<br/>b");
        assert_eq!(sanitize("<p>x</p>"), "<p>x</p>");
    }

    #[test]
    fn test_link_keeps_text_but_loses_href() {
        let out = sanitize(r#"<a href="https://example.com" target="_blank">terms</a>"#);
        assert_eq!(out, "<a>terms</a>");
    }

    #[test]
    fn test_unterminated_tag_is_dropped() {
        assert_eq!(sanitize("fine <img src=x onerror="), "fine ");
    }

    #[test]
    fn test_strip_tags_unescapes_entities() {
        let out = strip_tags("<p>Tom &amp; Jerry &lt;3</p>");
        assert!(out.contains("Tom & Jerry <3"));
    }

    #[test]
    fn test_double_escaped_entities_unescape_once() {
        assert_eq!(strip_tags("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_display_text_of_default_acceptance_content() {
        let out = display_text("<p><strong>I agree to the terms</strong></p>");
        assert_eq!(out, "I agree to the terms");
    }
}
