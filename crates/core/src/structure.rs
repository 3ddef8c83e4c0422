//! Structural analysis of content markup.
//!
//! Counts headings, classifies links as internal or external relative to a
//! base domain, and inventories images and videos together with their
//! descriptive-text coverage. Malformed markup is repaired by the parser, so
//! the scans undercount rather than fail.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::normalize::{collapse_whitespace, text_blocks};
use crate::parse::Document;

/// Heading counts for levels 1–4.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeadingCounts {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub h4: usize,
}

/// Link counts by class.
///
/// `internal` and `external` count every occurrence; the `unique_*` lists hold
/// each distinct target once, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkStats {
    pub internal: usize,
    pub external: usize,
    pub unique_internal: Vec<String>,
    pub unique_external: Vec<String>,
}

/// Image and video inventory.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaStats {
    pub image_count: usize,
    pub images_with_alt: usize,
    pub images_with_keyword_in_alt: usize,
    pub video_count: usize,
    pub videos_with_alt: usize,
}

/// Structure group of the content statistics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructureStats {
    pub headings: HeadingCounts,
    pub links: LinkStats,
    pub media: MediaStats,
}

/// Text landmarks the keyword placement rules look at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outline {
    /// Collapsed text of every `h1`, in document order.
    pub h1: Vec<String>,
    /// Collapsed text of the first non-empty paragraph.
    pub first_paragraph: Option<String>,
}

/// Which side of the base domain a link points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Internal,
    External,
}

/// Reduces a domain or URL to a lowercase host.
///
/// Accepts `example.com`, `Example.com/`, or `https://example.com/path`.
/// Returns `None` for blank input.
pub fn normalize_domain(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(input)
        && let Some(host) = url.host_str()
    {
        return Some(host.to_lowercase());
    }

    let host = input.split(['/', '?', '#']).next().unwrap_or(input);
    let host = host.rsplit_once('@').map_or(host, |(_, h)| h);
    let host = host.split(':').next().unwrap_or(host);
    Some(host.trim_end_matches('.').to_lowercase()).filter(|h| !h.is_empty())
}

/// Classifies a link target relative to `base_domain`.
///
/// Without a base domain, and for anything that does not parse as an absolute
/// URL, the link is internal. Absolute URLs are internal when their host is the
/// base domain or one of its subdomains; URLs without a host (`mailto:`) are
/// external. Protocol-relative targets (`//cdn.example.com`) are treated as
/// absolute.
pub fn classify_link(href: &str, base_domain: Option<&str>) -> LinkKind {
    let Some(base) = base_domain.and_then(normalize_domain) else {
        return LinkKind::Internal;
    };

    let href = href.trim();
    let parsed = if href.starts_with("//") { Url::parse(&format!("https:{}", href)) } else { Url::parse(href) };
    let Ok(url) = parsed else {
        return LinkKind::Internal;
    };

    match url.host_str().map(str::to_lowercase) {
        Some(host) if host == base || host.ends_with(&format!(".{}", base)) => LinkKind::Internal,
        _ => LinkKind::External,
    }
}

/// Analyzes heading, link and media structure.
///
/// `main_keyword` drives [`MediaStats::images_with_keyword_in_alt`].
///
/// # Example
///
/// ```rust
/// use lexiscore_core::analyze_structure;
///
/// let markup = r#"<h1>Guide</h1>
///     <a href="https://example.com/page">a</a>
///     <a href="/local">b</a>
///     <a href="https://other.org">c</a>"#;
/// let stats = analyze_structure(markup, Some("example.com"), None);
/// assert_eq!(stats.headings.h1, 1);
/// assert_eq!(stats.links.internal, 2);
/// assert_eq!(stats.links.external, 1);
/// ```
pub fn analyze_structure(raw_markup: &str, base_domain: Option<&str>, main_keyword: Option<&str>) -> StructureStats {
    analyze_document(&Document::parse(raw_markup), base_domain, main_keyword)
}

/// Same as [`analyze_structure`], on an already parsed document.
pub fn analyze_document(doc: &Document, base_domain: Option<&str>, main_keyword: Option<&str>) -> StructureStats {
    StructureStats {
        headings: count_headings(doc),
        links: collect_links(doc, base_domain),
        media: inventory_media(doc, main_keyword),
    }
}

fn count_headings(doc: &Document) -> HeadingCounts {
    HeadingCounts { h1: doc.count("h1"), h2: doc.count("h2"), h3: doc.count("h3"), h4: doc.count("h4") }
}

fn collect_links(doc: &Document, base_domain: Option<&str>) -> LinkStats {
    let mut stats = LinkStats::default();

    for anchor in doc.select("a[href]").unwrap_or_default() {
        let Some(href) = anchor.attr("href").map(str::trim) else {
            continue;
        };
        if href.starts_with('#') {
            continue;
        }

        let (count, unique) = match classify_link(href, base_domain) {
            LinkKind::Internal => (&mut stats.internal, &mut stats.unique_internal),
            LinkKind::External => (&mut stats.external, &mut stats.unique_external),
        };
        *count += 1;
        if !unique.iter().any(|seen| seen == href) {
            unique.push(href.to_string());
        }
    }

    stats
}

fn inventory_media(doc: &Document, main_keyword: Option<&str>) -> MediaStats {
    let mut media = MediaStats::default();
    let keyword = main_keyword
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty());

    for image in doc.select("img[src]").unwrap_or_default() {
        media.image_count += 1;
        let Some(alt) = image.attr("alt").map(str::trim).filter(|a| !a.is_empty()) else {
            continue;
        };
        media.images_with_alt += 1;
        if let Some(keyword) = &keyword
            && alt.to_lowercase().contains(keyword.as_str())
        {
            media.images_with_keyword_in_alt += 1;
        }
    }

    for video in doc.select("video").unwrap_or_default() {
        let has_source = video.attr("src").is_some_and(|s| !s.trim().is_empty())
            || !video.select("source[src]").unwrap_or_default().is_empty();
        if !has_source {
            continue;
        }
        media.video_count += 1;
        if video.first_filled_attr(&["alt", "aria-label", "title"]).is_some() {
            media.videos_with_alt += 1;
        }
    }

    media
}

/// Captures the H1 texts and the first paragraph of the content.
pub fn outline(raw_markup: &str) -> Outline {
    outline_document(&Document::parse(raw_markup), raw_markup)
}

/// Same as [`outline`], on an already parsed document.
///
/// When the markup has no non-empty `<p>`, the first blank-line separated
/// block of text stands in for the first paragraph.
pub fn outline_document(doc: &Document, raw_markup: &str) -> Outline {
    let h1 = doc
        .select("h1")
        .unwrap_or_default()
        .iter()
        .map(|el| collapse_whitespace(&el.text()))
        .collect();

    let first_paragraph = doc
        .select("p")
        .unwrap_or_default()
        .iter()
        .map(|el| collapse_whitespace(&el.text()))
        .find(|text| !text.is_empty())
        .or_else(|| text_blocks(raw_markup).into_iter().next());

    Outline { h1, first_paragraph }
}
