use serde::{Deserialize, Serialize};

use crate::parse::Document;

/// Page meta fields evaluated alongside the content.
///
/// Either field may be empty; empty fields produce "missing" findings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaFields {
    pub title: String,
    pub description: String,
}

impl MetaFields {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into() }
    }

    /// Length of the trimmed title in characters.
    pub fn title_len(&self) -> usize {
        self.title.trim().chars().count()
    }

    /// Length of the trimmed description in characters.
    pub fn description_len(&self) -> usize {
        self.description.trim().chars().count()
    }

    /// Fills empty fields from `other`, keeping fields that are already set.
    pub fn or(self, other: MetaFields) -> MetaFields {
        let pick = |mine: String, theirs: String| if mine.trim().is_empty() { theirs } else { mine };
        MetaFields { title: pick(self.title, other.title), description: pick(self.description, other.description) }
    }
}

impl Document {
    /// Extract the meta title with priority fallback:
    /// 1. `<title>` element
    /// 2. Open Graph `og:title`
    /// 3. Twitter `twitter:title`
    pub fn extract_meta_title(&self) -> Option<String> {
        self.title()
            .or_else(|| self.meta_content("og:title"))
            .or_else(|| self.meta_content("twitter:title"))
    }

    /// Extract the meta description with priority fallback:
    /// 1. Meta `description`
    /// 2. Open Graph `og:description`
    /// 3. Twitter `twitter:description`
    pub fn extract_meta_description(&self) -> Option<String> {
        self.meta_content("description")
            .or_else(|| self.meta_content("og:description"))
            .or_else(|| self.meta_content("twitter:description"))
    }
}

/// Reads title and description out of a full HTML page.
///
/// Missing values come back as empty strings. Content fragments without a
/// `<head>` simply yield empty fields.
pub fn extract_meta_fields(markup: &str) -> MetaFields {
    let doc = Document::parse(markup);
    MetaFields {
        title: doc.extract_meta_title().unwrap_or_default(),
        description: doc.extract_meta_description().unwrap_or_default(),
    }
}
