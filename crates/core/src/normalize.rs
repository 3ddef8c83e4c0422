//! Markup normalization.
//!
//! Turns content markup into the plain text the lexical stages (statistics,
//! readability, keyword density) work on, while keeping the untouched markup
//! around for the structural scans.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment pattern"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
static BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid blank line pattern"));
static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,6});").expect("valid entity pattern"));

/// Output of [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedContent {
    /// Tag-free text with whitespace collapsed to single spaces and trimmed.
    pub plain_text: String,
    /// The input markup, unchanged.
    pub raw_markup: String,
}

/// Normalizes content markup into plain text.
///
/// Never fails: empty or malformed markup yields an empty (or partial) plain text.
///
/// # Example
///
/// ```rust
/// use lexiscore_core::normalize;
///
/// let content = normalize("<h1>Hello</h1>\n<p>world &amp; <b>friends</b></p>");
/// assert_eq!(content.plain_text, "Hello world & friends");
/// ```
pub fn normalize(markup: &str) -> NormalizedContent {
    let plain_text = collapse_whitespace(&strip_tags(markup));
    NormalizedContent { plain_text, raw_markup: markup.to_string() }
}

/// Strips markup while keeping the original line structure.
///
/// Bodies of `script`, `style`, `noscript`, `template` and `title` elements are dropped,
/// comments are removed, every remaining tag becomes a single space, and common
/// character references are decoded. Whitespace is not collapsed.
pub fn strip_tags(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }

    let without_code = remove_non_content(markup);
    let without_comments = COMMENT.replace_all(&without_code, " ");
    let text = TAG.replace_all(&without_comments, " ");
    decode_entities(&text)
}

/// Collapses whitespace runs to single spaces and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Splits markup into blank-line separated text blocks.
///
/// Tags are stripped first; each block is whitespace-collapsed and empty
/// blocks are dropped.
pub fn text_blocks(markup: &str) -> Vec<String> {
    BLANK_LINE
        .split(&strip_tags(markup))
        .map(collapse_whitespace)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Remove elements whose text is never shown to a reader.
///
/// Falls back to the raw markup if the rewriter rejects the input.
fn remove_non_content(markup: &str) -> String {
    let mut output = Vec::with_capacity(markup.len());
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![
                lol_html::element!("script", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("style", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("noscript", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("template", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("title", |el| {
                    el.remove();
                    Ok(())
                }),
            ],
            ..Default::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    if rewriter.write(markup.as_bytes()).is_err() {
        return markup.to_string();
    }
    if rewriter.end().is_err() {
        return markup.to_string();
    }

    String::from_utf8_lossy(&output).into_owned()
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures<'_>| {
            let body = &caps[1];
            let decoded = match body {
                "nbsp" => Some(' '),
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ if body.starts_with("#x") || body.starts_with("#X") => {
                    u32::from_str_radix(&body[2..], 16).ok().and_then(char::from_u32)
                }
                _ if body.starts_with('#') => body[1..].parse::<u32>().ok().and_then(char::from_u32),
                _ => None,
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_tags_and_collapses() {
        let content = normalize("<article>\n  <h1>Title</h1>\n\n  <p>First   line</p>\n</article>");
        assert_eq!(content.plain_text, "Title First line");
    }

    #[test]
    fn test_raw_markup_passes_through() {
        let markup = "<p>Keep <em>me</em></p>";
        assert_eq!(normalize(markup).raw_markup, markup);
    }

    #[test]
    fn test_adjacent_blocks_do_not_fuse() {
        assert_eq!(normalize("<p>one</p><p>two</p>").plain_text, "one two");
    }

    #[test]
    fn test_scripts_styles_and_comments_are_dropped() {
        let markup = r#"<style>p { color: red; }</style><p>Visible</p><!-- hidden > note --><script>var x = "<p>";</script><noscript>Enable JS</noscript>"#;
        assert_eq!(normalize(markup).plain_text, "Visible");
    }

    #[test]
    fn test_page_title_is_not_body_text() {
        let markup = "<html><head><title>Title words here</title></head><body><p>Body.</p></body></html>";
        assert_eq!(normalize(markup).plain_text, "Body.");
    }

    #[test]
    fn test_entities_are_decoded() {
        let text = normalize("Fish&nbsp;&amp;&nbsp;chips &lt;3 &#233;t&#xE9; &copy;").plain_text;
        assert_eq!(text, "Fish & chips <3 été &copy;");
    }

    #[test]
    fn test_empty_and_malformed_input() {
        assert_eq!(normalize("").plain_text, "");
        assert_eq!(normalize("   \n\t ").plain_text, "");
        assert_eq!(normalize("<div><p>unclosed <b>bold").plain_text, "unclosed bold");
    }

    #[test]
    fn test_text_blocks() {
        let blocks = text_blocks("Intro line\nstill intro\n \n\n<p>Body</p> text\n\n");
        assert_eq!(blocks, vec!["Intro line still intro", "Body text"]);
        assert!(text_blocks("").is_empty());
    }

    #[test]
    fn test_strip_tags_keeps_line_structure() {
        let text = strip_tags("First block\n\nSecond <b>block</b>");
        assert!(text.contains("\n\n"));
        assert!(text.contains("Second  block "));
    }
}
