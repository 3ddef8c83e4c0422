//! Markup parsing and element queries.
//!
//! This module wraps `scraper` in the small [`Document`] and [`Element`] types
//! the structural analyzer and the page-meta extraction work against. Parsing
//! is forgiving: unbalanced or truncated markup is repaired by the HTML5 tree
//! builder rather than rejected, so queries undercount instead of failing.
//!
//! # Example
//!
//! ```rust
//! use lexiscore_core::parse::Document;
//!
//! let doc = Document::parse(r#"<h1>Title</h1><p class="lead">Paragraph</p>"#);
//! let lead = doc.select("p.lead").unwrap();
//! assert_eq!(lead[0].text(), "Paragraph");
//! ```

use scraper::{Html, Selector};

use crate::{LexiscoreError, Result};

/// A parsed HTML document or content fragment.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses markup into a document.
    ///
    /// Fragments (a blog post body, say) are accepted as-is and end up inside
    /// an implied `<body>`. Parsing never fails.
    pub fn parse(markup: &str) -> Self {
        Self { html: Html::parse_document(markup) }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`LexiscoreError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Counts the elements matching a selector; an invalid selector counts zero.
    pub fn count(&self, selector: &str) -> usize {
        compile(selector)
            .map(|sel| self.html.select(&sel).count())
            .unwrap_or(0)
    }

    /// Gets the content of the `<title>` element, trimmed, if present and non-empty.
    pub fn title(&self) -> Option<String> {
        self.select("title")
            .ok()?
            .first()
            .map(|el| el.text().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Looks up a `<meta>` tag by `name`, then by `property`, and returns its content.
    pub fn meta_content(&self, key: &str) -> Option<String> {
        for attr in ["name", "property"] {
            let selector = format!("meta[{}=\"{}\"]", attr, key);
            if let Ok(elements) = self.select(&selector)
                && let Some(content) = elements.first().and_then(|el| el.attr("content"))
            {
                let content = content.trim();
                if !content.is_empty() {
                    return Some(content.to_string());
                }
            }
        }
        None
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| LexiscoreError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// A single element in a parsed [`Document`].
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute, or `None` if absent.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the value of the first of `names` that is present and non-blank.
    pub fn first_filled_attr(&self, names: &[&str]) -> Option<&'a str> {
        names
            .iter()
            .filter_map(|name| self.attr(name))
            .find(|value| !value.trim().is_empty())
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`LexiscoreError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile(selector)?;
        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }
}
