//! Rule catalogue and evaluation.
//!
//! Every check is a [`Rule`] record: a stable id, the category and priority it
//! reports under, whether it needs readable text, and a pure check function.
//! [`evaluate`] runs the whole [`RULES`] catalogue through one generic runner,
//! stamps each [`Verdict`] with its rule's identity, and sorts the resulting
//! findings into display order.
//!
//! When the content has no readable text, rules flagged `needs_text` are
//! skipped; the `content-empty` rule reports the situation once, and meta and
//! structure rules still run.

use std::collections::HashSet;

use tracing::trace;

use crate::finding::{Category, Finding, Priority, Status, sort_findings};
use crate::keywords::{KeywordSet, contains_term};
use crate::metadata::MetaFields;
use crate::statistics::ContentStatistics;
use crate::structure::Outline;

/// Optimal meta title length, in characters.
pub const TITLE_RANGE: (usize, usize) = (30, 60);
/// Optimal meta description length, in characters.
pub const DESCRIPTION_RANGE: (usize, usize) = (70, 160);
/// Main keyword density band considered healthy, in percent.
pub const MAIN_DENSITY_RANGE: (f64, f64) = (0.5, 2.5);
/// Minimum density for each secondary keyword, in percent.
pub const SECONDARY_MIN_DENSITY: f64 = 0.3;
/// Links, images: this many or more is good.
pub const GOOD_COUNT: usize = 3;
/// Word count from which the text should be broken up by H2 subheadings.
pub const SUBHEADING_MIN_WORDS: usize = 300;

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub plain_text: &'a str,
    pub outline: &'a Outline,
    pub keywords: &'a KeywordSet,
    pub meta: &'a MetaFields,
    pub stats: &'a ContentStatistics,
}

impl RuleContext<'_> {
    /// True when the content has at least one word of readable text.
    pub fn has_text(&self) -> bool {
        self.stats.length.words > 0
    }

    fn main_keyword(&self) -> Option<&str> {
        self.keywords.main_term()
    }
}

/// Outcome of a single check, before rule identity is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub status: Status,
    pub score: u8,
    pub title: String,
    pub description: String,
    pub suggestions: Vec<String>,
}

impl Verdict {
    /// A verdict scored by its status (good 10, improvement 5, problem 0).
    pub fn new(status: Status, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::scored(status, status.default_score(), title, description)
    }

    /// A verdict with an explicit 0–10 score.
    pub fn scored(status: Status, score: u8, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { status, score: score.min(10), title: title.into(), description: description.into(), suggestions: Vec::new() }
    }

    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

/// How a rule inspects its context.
#[derive(Clone, Copy)]
pub enum Check {
    /// Emits zero or one finding.
    Single(fn(&RuleContext<'_>) -> Option<Verdict>),
    /// Runs once per secondary keyword; the finding id gets the keyword's slug.
    PerSecondaryKeyword(fn(&RuleContext<'_>, &str) -> Option<Verdict>),
}

/// A declarative rule record.
#[derive(Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub category: Category,
    pub priority: Priority,
    /// Skip the rule when the content has no readable text.
    pub needs_text: bool,
    pub check: Check,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("priority", &self.priority)
            .field("needs_text", &self.needs_text)
            .finish()
    }
}

const fn rule(id: &'static str, category: Category, priority: Priority, needs_text: bool, check: Check) -> Rule {
    Rule { id, category, priority, needs_text, check }
}

/// The fixed rule catalogue, in evaluation order.
pub const RULES: &[Rule] = &[
    rule("content-empty", Category::Structure, Priority::High, false, Check::Single(content_empty)),
    rule("main-keyword-defined", Category::Keywords, Priority::High, false, Check::Single(main_keyword_defined)),
    rule("main-keyword-density", Category::Keywords, Priority::High, true, Check::Single(main_keyword_density)),
    rule(
        "main-keyword-first-paragraph",
        Category::Keywords,
        Priority::Medium,
        true,
        Check::Single(main_keyword_first_paragraph),
    ),
    rule("main-keyword-h1", Category::Keywords, Priority::High, false, Check::Single(main_keyword_h1)),
    rule("secondary-keywords", Category::Keywords, Priority::Medium, true, Check::Single(secondary_keywords)),
    rule(
        "secondary-keyword-density",
        Category::Keywords,
        Priority::Low,
        true,
        Check::PerSecondaryKeyword(secondary_keyword_density),
    ),
    rule("long-tail-keywords", Category::Keywords, Priority::Low, true, Check::Single(long_tail_keywords)),
    rule("meta-title-length", Category::Meta, Priority::High, false, Check::Single(meta_title_length)),
    rule("meta-title-keyword", Category::Meta, Priority::High, false, Check::Single(meta_title_keyword)),
    rule("meta-description-length", Category::Meta, Priority::Medium, false, Check::Single(meta_description_length)),
    rule("meta-description-keyword", Category::Meta, Priority::Medium, false, Check::Single(meta_description_keyword)),
    rule("h1-count", Category::Structure, Priority::High, false, Check::Single(h1_count)),
    rule("subheadings", Category::Structure, Priority::Medium, true, Check::Single(subheadings)),
    rule("readability", Category::Readability, Priority::High, true, Check::Single(readability)),
    rule("images-count", Category::Images, Priority::Medium, false, Check::Single(images_count)),
    rule("images-alt", Category::Images, Priority::High, false, Check::Single(images_alt)),
    rule("images-keyword-alt", Category::Images, Priority::Low, false, Check::Single(images_keyword_alt)),
    rule("video-presence", Category::Images, Priority::Low, true, Check::Single(video_presence)),
    rule("videos-alt", Category::Images, Priority::Low, false, Check::Single(videos_alt)),
    rule("internal-links", Category::Links, Priority::Medium, false, Check::Single(internal_links)),
    rule("external-links", Category::Links, Priority::Low, false, Check::Single(external_links)),
];

/// Runs the full catalogue and returns findings in display order.
pub fn evaluate(ctx: &RuleContext<'_>) -> Vec<Finding> {
    evaluate_rules(RULES, ctx)
}

/// Runs `rules` against the context and returns findings in display order.
pub fn evaluate_rules(rules: &[Rule], ctx: &RuleContext<'_>) -> Vec<Finding> {
    let has_text = ctx.has_text();
    let mut used_ids = HashSet::new();
    let mut findings = Vec::new();

    for rule in rules {
        if rule.needs_text && !has_text {
            trace!(rule = rule.id, "skipped: no readable text");
            continue;
        }

        match rule.check {
            Check::Single(check) => {
                if let Some(verdict) = check(ctx) {
                    let id = unique_id(rule.id.to_string(), &mut used_ids);
                    findings.push(stamp(rule, id, verdict));
                }
            }
            Check::PerSecondaryKeyword(check) => {
                for term in ctx.keywords.secondary_terms() {
                    if let Some(verdict) = check(ctx, term) {
                        let id = unique_id(format!("{}-{}", rule.id, slugify(term)), &mut used_ids);
                        findings.push(stamp(rule, id, verdict));
                    }
                }
            }
        }
    }

    sort_findings(&mut findings);
    findings
}

fn stamp(rule: &Rule, id: String, verdict: Verdict) -> Finding {
    trace!(rule = %id, status = %verdict.status, score = verdict.score, "rule evaluated");
    Finding {
        id,
        title: verdict.title,
        description: verdict.description,
        status: verdict.status,
        score: verdict.score,
        priority: rule.priority,
        category: rule.category,
        suggestions: verdict.suggestions,
    }
}

fn unique_id(id: String, used: &mut HashSet<String>) -> String {
    if used.insert(id.clone()) {
        return id;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", id, n);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Lowercase, dash-separated form of a keyword for use in finding ids.
pub fn slugify(term: &str) -> String {
    let mut slug = String::with_capacity(term.len());
    for c in term.trim().chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() { "term".to_string() } else { slug.to_string() }
}

/// ≥3 good, 1–2 improvement, 0 problem.
fn count_band(count: usize) -> Status {
    match count {
        0 => Status::Problem,
        n if n < GOOD_COUNT => Status::Improvement,
        _ => Status::Good,
    }
}

fn content_empty(ctx: &RuleContext<'_>) -> Option<Verdict> {
    if ctx.has_text() {
        return None;
    }
    Some(
        Verdict::new(
            Status::Problem,
            "Content is empty",
            "The content has no readable text, so keyword and readability checks were skipped.",
        )
        .suggest("Write the body of the page before optimizing it."),
    )
}

fn main_keyword_defined(ctx: &RuleContext<'_>) -> Option<Verdict> {
    if ctx.main_keyword().is_some() {
        return None;
    }
    Some(
        Verdict::new(
            Status::Problem,
            "No main keyword",
            "Without a main keyword, placement and density cannot be evaluated.",
        )
        .suggest("Choose the one search term this page should rank for."),
    )
}

fn main_keyword_density(ctx: &RuleContext<'_>) -> Option<Verdict> {
    let keyword = ctx.main_keyword()?;
    let density = ctx.stats.keyword_density.main;
    let (low, high) = MAIN_DENSITY_RANGE;

    let verdict = if density < low {
        Verdict::new(
            Status::Problem,
            "Main keyword density too low",
            format!("\"{}\" makes up {:.2}% of the text (target {}–{}%).", keyword, density, low, high),
        )
        .suggest(format!("Use \"{}\" more often in the body text.", keyword))
    } else if density <= high {
        Verdict::new(
            Status::Good,
            "Main keyword density",
            format!("\"{}\" makes up {:.2}% of the text.", keyword, density),
        )
    } else {
        Verdict::new(
            Status::Improvement,
            "Main keyword density too high",
            format!("\"{}\" makes up {:.2}% of the text, above {}%.", keyword, density, high),
        )
        .suggest("Replace some occurrences with synonyms to avoid keyword stuffing.")
    };
    Some(verdict)
}

fn main_keyword_first_paragraph(ctx: &RuleContext<'_>) -> Option<Verdict> {
    let keyword = ctx.main_keyword()?;
    let found = ctx
        .outline
        .first_paragraph
        .as_deref()
        .is_some_and(|p| contains_term(p, keyword));

    let verdict = if found {
        Verdict::new(
            Status::Good,
            "Main keyword in introduction",
            format!("\"{}\" appears in the first paragraph.", keyword),
        )
    } else {
        Verdict::scored(
            Status::Improvement,
            4,
            "Main keyword missing from introduction",
            format!("\"{}\" does not appear in the first paragraph.", keyword),
        )
        .suggest(format!("Mention \"{}\" early in the opening paragraph.", keyword))
    };
    Some(verdict)
}

fn main_keyword_h1(ctx: &RuleContext<'_>) -> Option<Verdict> {
    let keyword = ctx.main_keyword()?;
    if ctx.outline.h1.is_empty() {
        return Some(
            Verdict::new(
                Status::Problem,
                "Main keyword not in H1",
                "There is no H1 heading to carry the main keyword.",
            )
            .suggest(format!("Add an H1 heading that contains \"{}\".", keyword)),
        );
    }

    let verdict = if ctx.outline.h1.iter().any(|h| contains_term(h, keyword)) {
        Verdict::new(Status::Good, "Main keyword in H1", format!("The H1 heading contains \"{}\".", keyword))
    } else {
        Verdict::new(
            Status::Problem,
            "Main keyword not in H1",
            format!("The H1 heading does not contain \"{}\".", keyword),
        )
        .suggest(format!("Rework the H1 heading to include \"{}\".", keyword))
    };
    Some(verdict)
}

fn secondary_keywords(ctx: &RuleContext<'_>) -> Option<Verdict> {
    let terms: Vec<&str> = ctx.keywords.secondary_terms().collect();
    if terms.is_empty() {
        return Some(
            Verdict::new(
                Status::Improvement,
                "No secondary keywords",
                "Secondary keywords help the page rank for related searches.",
            )
            .suggest("Add a few secondary keywords related to the main topic."),
        );
    }

    let missing: Vec<&str> = terms
        .iter()
        .copied()
        .filter(|term| ctx.stats.keyword_density.secondary_density(term) <= 0.0)
        .collect();

    let status = match missing.len() {
        0 => Status::Good,
        n if n == terms.len() => Status::Problem,
        _ => Status::Improvement,
    };
    let description = if missing.is_empty() {
        format!("All {} secondary keywords appear in the text.", terms.len())
    } else {
        format!("{} of {} secondary keywords do not appear in the text.", missing.len(), terms.len())
    };

    let mut verdict = Verdict::new(status, "Secondary keywords", description);
    for term in missing {
        verdict = verdict.suggest(format!("Work \"{}\" into the text.", term));
    }
    Some(verdict)
}

fn secondary_keyword_density(ctx: &RuleContext<'_>, term: &str) -> Option<Verdict> {
    let density = ctx.stats.keyword_density.secondary_density(term);
    let title = format!("Density of \"{}\"", term);

    let verdict = if density >= SECONDARY_MIN_DENSITY {
        Verdict::new(Status::Good, title, format!("\"{}\" makes up {:.2}% of the text.", term, density))
    } else if density > 0.0 {
        Verdict::new(
            Status::Improvement,
            title,
            format!("\"{}\" makes up {:.2}% of the text, below {}%.", term, density, SECONDARY_MIN_DENSITY),
        )
        .suggest(format!("Use \"{}\" a few more times.", term))
    } else {
        Verdict::new(Status::Problem, title, format!("\"{}\" does not appear in the text.", term))
            .suggest(format!("Work \"{}\" into the text.", term))
    };
    Some(verdict)
}

fn long_tail_keywords(ctx: &RuleContext<'_>) -> Option<Verdict> {
    let phrases: Vec<&str> = ctx.keywords.long_tail_phrases().collect();
    if phrases.is_empty() {
        return None;
    }

    let long_tail = &ctx.stats.keyword_density.long_tail;
    let missing: Vec<&str> = phrases
        .iter()
        .copied()
        .filter(|phrase| long_tail.get(*phrase).copied().unwrap_or(0.0) <= 0.0)
        .collect();

    let status = match missing.len() {
        0 => Status::Good,
        n if n == phrases.len() => Status::Problem,
        _ => Status::Improvement,
    };
    let description = format!(
        "{} of {} long-tail phrases appear in the text.",
        phrases.len() - missing.len(),
        phrases.len()
    );

    let mut verdict = Verdict::new(status, "Long-tail phrases", description);
    for phrase in missing {
        verdict = verdict.suggest(format!("Include the phrase \"{}\", for example in a subheading.", phrase));
    }
    Some(verdict)
}

fn length_band(len: usize, (min, max): (usize, usize)) -> Status {
    if len == 0 {
        Status::Problem
    } else if len < min || len > max {
        Status::Improvement
    } else {
        Status::Good
    }
}

fn meta_title_length(ctx: &RuleContext<'_>) -> Option<Verdict> {
    let len = ctx.meta.title_len();
    let (min, max) = TITLE_RANGE;

    let verdict = match length_band(len, TITLE_RANGE) {
        Status::Problem => Verdict::new(Status::Problem, "Meta title missing", "The page has no meta title.")
            .suggest(format!("Write a title of {}–{} characters.", min, max)),
        Status::Good => Verdict::new(Status::Good, "Meta title length", format!("The title is {} characters long.", len)),
        Status::Improvement if len < min => Verdict::new(
            Status::Improvement,
            "Meta title too short",
            format!("The title is {} characters long (optimal {}–{}).", len, min, max),
        )
        .suggest("Lengthen the title with a descriptive qualifier."),
        Status::Improvement => Verdict::new(
            Status::Improvement,
            "Meta title too long",
            format!("The title is {} characters long and may be truncated after {}.", len, max),
        )
        .suggest(format!("Shorten the title to {} characters or fewer.", max)),
    };
    Some(verdict)
}

fn meta_title_keyword(ctx: &RuleContext<'_>) -> Option<Verdict> {
    let keyword = ctx.main_keyword()?;
    let verdict = if contains_term(&ctx.meta.title, keyword) {
        Verdict::new(Status::Good, "Main keyword in title", format!("The title contains \"{}\".", keyword))
    } else {
        Verdict::new(
            Status::Problem,
            "Main keyword not in title",
            format!("The title does not contain \"{}\".", keyword),
        )
        .suggest(format!("Put \"{}\" in the title, ideally near the start.", keyword))
    };
    Some(verdict)
}

fn meta_description_length(ctx: &RuleContext<'_>) -> Option<Verdict> {
    let len = ctx.meta.description_len();
    let (min, max) = DESCRIPTION_RANGE;

    let verdict = match length_band(len, DESCRIPTION_RANGE) {
        Status::Problem => {
            Verdict::new(Status::Problem, "Meta description missing", "The page has no meta description.")
                .suggest(format!("Write a description of {}–{} characters.", min, max))
        }
        Status::Good => Verdict::new(
            Status::Good,
            "Meta description length",
            format!("The description is {} characters long.", len),
        ),
        Status::Improvement if len < min => Verdict::new(
            Status::Improvement,
            "Meta description too short",
            format!("The description is {} characters long (optimal {}–{}).", len, min, max),
        )
        .suggest("Expand the description with what the reader will get from the page."),
        Status::Improvement => Verdict::new(
            Status::Improvement,
            "Meta description too long",
            format!("The description is {} characters long and may be truncated after {}.", len, max),
        )
        .suggest(format!("Trim the description to {} characters or fewer.", max)),
    };
    Some(verdict)
}

fn meta_description_keyword(ctx: &RuleContext<'_>) -> Option<Verdict> {
    let keyword = ctx.main_keyword()?;
    let verdict = if contains_term(&ctx.meta.description, keyword) {
        Verdict::new(
            Status::Good,
            "Main keyword in description",
            format!("The description contains \"{}\".", keyword),
        )
    } else {
        Verdict::scored(
            Status::Improvement,
            3,
            "Main keyword not in description",
            format!("The description does not contain \"{}\".", keyword),
        )
        .suggest(format!("Mention \"{}\" in the meta description.", keyword))
    };
    Some(verdict)
}

fn h1_count(ctx: &RuleContext<'_>) -> Option<Verdict> {
    let h1 = ctx.stats.structure.headings.h1;
    let verdict = match h1 {
        0 => Verdict::new(Status::Problem, "H1 heading missing", "The content has no H1 heading.")
            .suggest("Add exactly one H1 heading that states the topic."),
        1 => Verdict::new(Status::Good, "Single H1 heading", "The content has exactly one H1 heading."),
        n => Verdict::new(Status::Improvement, "Multiple H1 headings", format!("The content has {} H1 headings.", n))
            .suggest("Keep one H1 and demote the others to H2."),
    };
    Some(verdict)
}

fn subheadings(ctx: &RuleContext<'_>) -> Option<Verdict> {
    let headings = &ctx.stats.structure.headings;
    let words = ctx.stats.length.words;

    let verdict = if headings.h2 == 0 && headings.h3 > 0 {
        Verdict::new(
            Status::Improvement,
            "Heading levels skipped",
            "H3 headings are used without any H2 above them.",
        )
        .suggest("Use H2 for the main sections and H3 only inside them.")
    } else if headings.h2 == 0 && words >= SUBHEADING_MIN_WORDS {
        Verdict::new(
            Status::Improvement,
            "No subheadings",
            format!("{} words of text are not broken up by any H2 heading.", words),
        )
        .suggest("Split the text into sections with descriptive H2 headings.")
    } else {
        Verdict::new(
            Status::Good,
            "Subheadings",
            format!("{} H2 and {} H3 headings structure the text.", headings.h2, headings.h3),
        )
    };
    Some(verdict)
}

fn readability(ctx: &RuleContext<'_>) -> Option<Verdict> {
    let words = ctx.stats.length.words;
    let r = &ctx.stats.readability;
    let flesch = r.clamped_flesch();

    let mut status = Status::Good;
    let mut suggestions = Vec::new();

    let word_status = match words {
        0..400 => Status::Problem,
        400..800 => Status::Improvement,
        800..=1500 => Status::Good,
        _ => Status::Improvement,
    };
    if word_status != Status::Good {
        suggestions.push(if words > 1500 {
            format!("At {} words the text is long; consider splitting it into several pages.", words)
        } else {
            format!("At {} words the text is short; aim for 800–1500 words.", words)
        });
    }
    status = status.worst(word_status);

    let flesch_status = if flesch >= 60.0 {
        Status::Good
    } else if flesch >= 30.0 {
        Status::Improvement
    } else {
        Status::Problem
    };
    if flesch_status != Status::Good {
        suggestions.push(format!(
            "Reading ease is {:.0}/100; use simpler words and shorter sentences.",
            flesch
        ));
    }
    status = status.worst(flesch_status);

    let sentence_status = if r.avg_sentence_length <= 15.0 {
        Status::Good
    } else if r.avg_sentence_length <= 25.0 {
        Status::Improvement
    } else {
        Status::Problem
    };
    if sentence_status != Status::Good {
        suggestions.push(format!(
            "Sentences average {:.1} words; keep them to 15 or fewer.",
            r.avg_sentence_length
        ));
    }
    status = status.worst(sentence_status);

    let complex_status = if r.complex_word_percentage <= 10.0 {
        Status::Good
    } else if r.complex_word_percentage <= 20.0 {
        Status::Improvement
    } else {
        Status::Problem
    };
    if complex_status != Status::Good {
        suggestions.push(format!(
            "{:.1}% of words are long (8+ characters); prefer shorter alternatives.",
            r.complex_word_percentage
        ));
    }
    status = status.worst(complex_status);

    let title = match status {
        Status::Good => "Readability and length",
        Status::Improvement => "Readability and length could improve",
        Status::Problem => "Readability or length problem",
    };
    let description = format!(
        "{} words, reading ease {:.0}/100, {:.1} words per sentence, {:.1}% long words.",
        words, flesch, r.avg_sentence_length, r.complex_word_percentage
    );

    let mut verdict = Verdict::new(status, title, description);
    verdict.suggestions = suggestions;
    Some(verdict)
}

fn images_count(ctx: &RuleContext<'_>) -> Option<Verdict> {
    let count = ctx.stats.structure.media.image_count;
    let verdict = match count_band(count) {
        Status::Problem => Verdict::new(Status::Problem, "No images", "The content has no images.")
            .suggest("Add images that illustrate the topic."),
        Status::Improvement => Verdict::new(
            Status::Improvement,
            "Few images",
            format!("The content has {} image(s).", count),
        )
        .suggest(format!("Aim for at least {} images.", GOOD_COUNT)),
        Status::Good => Verdict::new(Status::Good, "Images", format!("The content has {} images.", count)),
    };
    Some(verdict)
}

fn images_alt(ctx: &RuleContext<'_>) -> Option<Verdict> {
    let media = &ctx.stats.structure.media;
    let verdict = if media.image_count == 0 {
        Verdict::scored(
            Status::Improvement,
            0,
            "No image alt text to check",
            "There are no images, so alternative text could not be checked.",
        )
    } else if media.images_with_alt == media.image_count {
        Verdict::new(Status::Good, "Image alt text", "Every image has alternative text.")
    } else {
        let missing = media.image_count - media.images_with_alt;
        Verdict::new(
            Status::Problem,
            "Image alt text missing",
            format!("{} of {} images have no alternative text.", missing, media.image_count),
        )
        .suggest("Describe every image in its alt attribute.")
    };
    Some(verdict)
}

fn images_keyword_alt(ctx: &RuleContext<'_>) -> Option<Verdict> {
    let keyword = ctx.main_keyword()?;
    let media = &ctx.stats.structure.media;
    if media.image_count == 0 {
        return None;
    }

    let verdict = if media.images_with_keyword_in_alt > 0 {
        Verdict::new(
            Status::Good,
            "Main keyword in image alt text",
            format!("{} image(s) mention \"{}\" in their alt text.", media.images_with_keyword_in_alt, keyword),
        )
    } else {
        Verdict::scored(
            Status::Improvement,
            4,
            "Main keyword not in image alt text",
            format!("No image mentions \"{}\" in its alt text.", keyword),
        )
        .suggest(format!("Use \"{}\" in the alt text of a relevant image.", keyword))
    };
    Some(verdict)
}

fn video_presence(ctx: &RuleContext<'_>) -> Option<Verdict> {
    let count = ctx.stats.structure.media.video_count;
    let verdict = if count > 0 {
        Verdict::new(Status::Good, "Video", format!("The content embeds {} video(s).", count))
    } else {
        Verdict::new(Status::Improvement, "No video", "The content has no video.")
            .suggest("A short video can keep readers on the page longer.")
    };
    Some(verdict)
}

fn videos_alt(ctx: &RuleContext<'_>) -> Option<Verdict> {
    let media = &ctx.stats.structure.media;
    if media.video_count == 0 {
        return None;
    }

    let verdict = if media.videos_with_alt == media.video_count {
        Verdict::new(Status::Good, "Video descriptions", "Every video has a descriptive label.")
    } else {
        Verdict::scored(
            Status::Improvement,
            4,
            "Video descriptions missing",
            format!(
                "{} of {} videos have no alt, aria-label or title.",
                media.video_count - media.videos_with_alt,
                media.video_count
            ),
        )
        .suggest("Give every video a title or aria-label describing it.")
    };
    Some(verdict)
}

fn link_verdict(kind: &str, count: usize) -> Verdict {
    match count_band(count) {
        Status::Problem => Verdict::new(Status::Problem, format!("No {} links", kind), format!("The content has no {} links.", kind))
            .suggest(format!("Add at least {} {} links.", GOOD_COUNT, kind)),
        Status::Improvement => Verdict::new(
            Status::Improvement,
            format!("Few {} links", kind),
            format!("The content has {} {} link(s).", count, kind),
        )
        .suggest(format!("Aim for at least {} {} links.", GOOD_COUNT, kind)),
        Status::Good => Verdict::new(
            Status::Good,
            format!("{}{} links", kind[..1].to_uppercase(), &kind[1..]),
            format!("The content has {} {} links.", count, kind),
        ),
    }
}

fn internal_links(ctx: &RuleContext<'_>) -> Option<Verdict> {
    Some(link_verdict("internal", ctx.stats.structure.links.internal))
}

fn external_links(ctx: &RuleContext<'_>) -> Option<Verdict> {
    Some(link_verdict("external", ctx.stats.structure.links.external))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;
    use rstest::rstest;

    struct Fixture {
        prepared: crate::analysis::Prepared,
        keywords: KeywordSet,
        meta: MetaFields,
    }

    impl Fixture {
        fn new(markup: &str, keywords: KeywordSet, meta: MetaFields) -> Self {
            let prepared = Analyzer::new().prepare(markup, &keywords);
            Self { prepared, keywords, meta }
        }

        fn ctx(&self) -> RuleContext<'_> {
            RuleContext {
                plain_text: &self.prepared.content.plain_text,
                outline: &self.prepared.outline,
                keywords: &self.keywords,
                meta: &self.meta,
                stats: &self.prepared.stats,
            }
        }

        fn findings(&self) -> Vec<Finding> {
            evaluate(&self.ctx())
        }

        fn finding(&self, id: &str) -> Option<Finding> {
            self.findings().into_iter().find(|f| f.id == id)
        }
    }

    fn words(n: usize) -> String {
        "word ".repeat(n)
    }

    #[test]
    fn test_catalogue_ids_are_unique() {
        let mut ids = HashSet::new();
        for rule in RULES {
            assert!(ids.insert(rule.id), "duplicate rule id {}", rule.id);
        }
    }

    #[test]
    fn test_empty_content_short_circuits_lexical_rules() {
        let fixture = Fixture::new("", KeywordSet::new("rust"), MetaFields::default());
        let findings = fixture.findings();

        let empty = findings.iter().find(|f| f.id == "content-empty").unwrap();
        assert_eq!(empty.status, Status::Problem);
        assert_eq!(empty.priority, Priority::High);

        for skipped in ["main-keyword-density", "readability", "secondary-keywords", "video-presence"] {
            assert!(findings.iter().all(|f| f.id != skipped), "{skipped} should be skipped");
        }
        for kept in ["meta-title-length", "meta-title-keyword", "h1-count", "main-keyword-h1", "internal-links"] {
            assert!(findings.iter().any(|f| f.id == kept), "{kept} should still run");
        }
    }

    #[test]
    fn test_content_with_text_has_no_empty_finding() {
        let fixture = Fixture::new("<p>Hello there.</p>", KeywordSet::default(), MetaFields::default());
        assert!(fixture.finding("content-empty").is_none());
        assert_eq!(fixture.finding("main-keyword-defined").unwrap().status, Status::Problem);
    }

    #[rstest]
    #[case(0, Status::Problem, 0)]
    #[case(1, Status::Good, 10)]
    #[case(2, Status::Improvement, 5)]
    #[case(3, Status::Improvement, 5)]
    fn test_h1_banding(#[case] h1s: usize, #[case] status: Status, #[case] score: u8) {
        let markup = format!("{}<p>Body text.</p>", "<h1>Heading</h1>".repeat(h1s));
        let finding = Fixture::new(&markup, KeywordSet::default(), MetaFields::default())
            .finding("h1-count")
            .unwrap();
        assert_eq!((finding.status, finding.score), (status, score));
    }

    #[rstest]
    #[case(0, Status::Problem)]
    #[case(29, Status::Improvement)]
    #[case(30, Status::Good)]
    #[case(45, Status::Good)]
    #[case(60, Status::Good)]
    #[case(61, Status::Improvement)]
    fn test_title_length_banding(#[case] len: usize, #[case] status: Status) {
        let meta = MetaFields::new("t".repeat(len), "");
        let finding = Fixture::new("<p>Text.</p>", KeywordSet::default(), meta)
            .finding("meta-title-length")
            .unwrap();
        assert_eq!(finding.status, status);
    }

    #[rstest]
    #[case(0, Status::Problem)]
    #[case(69, Status::Improvement)]
    #[case(70, Status::Good)]
    #[case(160, Status::Good)]
    #[case(161, Status::Improvement)]
    fn test_description_length_banding(#[case] len: usize, #[case] status: Status) {
        let meta = MetaFields::new("", "d".repeat(len));
        let finding = Fixture::new("<p>Text.</p>", KeywordSet::default(), meta)
            .finding("meta-description-length")
            .unwrap();
        assert_eq!(finding.status, status);
    }

    #[test]
    fn test_keyword_in_meta_fields() {
        let meta = MetaFields::new("Learn Rust the practical way", "A guide with no mention of the term.");
        let fixture = Fixture::new("<p>Text.</p>", KeywordSet::new("rust"), meta);
        assert_eq!(fixture.finding("meta-title-keyword").unwrap().status, Status::Good);

        let description = fixture.finding("meta-description-keyword").unwrap();
        assert_eq!(description.status, Status::Improvement);
        assert_eq!(description.score, 3);
    }

    #[rstest]
    #[case(2, Status::Problem)]
    #[case(5, Status::Good)]
    #[case(25, Status::Good)]
    #[case(30, Status::Improvement)]
    fn test_main_density_banding(#[case] hits: usize, #[case] status: Status) {
        // 1000 words total
        let text = format!("<p>{}{}</p>", "rust ".repeat(hits), words(1000 - hits));
        let finding = Fixture::new(&text, KeywordSet::new("rust"), MetaFields::default())
            .finding("main-keyword-density")
            .unwrap();
        assert_eq!(finding.status, status);
    }

    #[test]
    fn test_keyword_placement_rules() {
        let markup = "<h1>Rust for beginners</h1><p>Rust is fast.</p><p>More text.</p>";
        let fixture = Fixture::new(markup, KeywordSet::new("rust"), MetaFields::default());
        assert_eq!(fixture.finding("main-keyword-h1").unwrap().status, Status::Good);
        assert_eq!(fixture.finding("main-keyword-first-paragraph").unwrap().status, Status::Good);

        let markup = "<h1>Beginners guide</h1><p>Intro without it.</p><p>Rust later.</p>";
        let fixture = Fixture::new(markup, KeywordSet::new("rust"), MetaFields::default());
        assert_eq!(fixture.finding("main-keyword-h1").unwrap().status, Status::Problem);
        let intro = fixture.finding("main-keyword-first-paragraph").unwrap();
        assert_eq!((intro.status, intro.score), (Status::Improvement, 4));
    }

    #[test]
    fn test_secondary_keyword_findings() {
        let text = format!("<p>cargo crates {}</p>", words(98));
        let keywords = KeywordSet::new("rust").with_secondary(["cargo", "crates", "clippy lints"]);
        let findings = Fixture::new(&text, keywords, MetaFields::default()).findings();

        let presence = findings.iter().find(|f| f.id == "secondary-keywords").unwrap();
        assert_eq!(presence.status, Status::Improvement);
        assert_eq!(presence.suggestions.len(), 1);
        assert!(presence.suggestions[0].contains("clippy lints"));

        let cargo = findings.iter().find(|f| f.id == "secondary-keyword-density-cargo").unwrap();
        assert_eq!(cargo.status, Status::Good);
        let clippy = findings
            .iter()
            .find(|f| f.id == "secondary-keyword-density-clippy-lints")
            .unwrap();
        assert_eq!(clippy.status, Status::Problem);
    }

    #[test]
    fn test_secondary_density_threshold() {
        // 1 hit in 500 words = 0.2%
        let text = format!("<p>cargo {}</p>", words(499));
        let keywords = KeywordSet::default().with_secondary(["cargo"]);
        let finding = Fixture::new(&text, keywords, MetaFields::default())
            .finding("secondary-keyword-density-cargo")
            .unwrap();
        assert_eq!(finding.status, Status::Improvement);
    }

    #[test]
    fn test_no_secondary_keywords_defined() {
        let finding = Fixture::new("<p>Text.</p>", KeywordSet::default(), MetaFields::default())
            .finding("secondary-keywords")
            .unwrap();
        assert_eq!(finding.status, Status::Improvement);
    }

    #[test]
    fn test_long_tail_presence() {
        let keywords = KeywordSet::default().with_long_tail(["memory safety", "zero-cost abstractions"]);
        let fixture = Fixture::new("<p>Memory safety matters.</p>", keywords, MetaFields::default());
        let finding = fixture.finding("long-tail-keywords").unwrap();
        assert_eq!(finding.status, Status::Improvement);
        assert_eq!(finding.suggestions.len(), 1);

        let none_defined = Fixture::new("<p>Text.</p>", KeywordSet::default(), MetaFields::default());
        assert!(none_defined.finding("long-tail-keywords").is_none());
    }

    #[rstest]
    #[case("", 0, Status::Problem)]
    #[case("<img src='a.png' alt='a'>", 1, Status::Improvement)]
    #[case("<img src='a.png' alt='a'><img src='b.png' alt='b'><img src='c.png' alt='c'>", 3, Status::Good)]
    fn test_images_count_banding(#[case] images: &str, #[case] count: usize, #[case] status: Status) {
        let markup = format!("<p>Text.</p>{}", images);
        let fixture = Fixture::new(&markup, KeywordSet::default(), MetaFields::default());
        assert_eq!(fixture.prepared.stats.structure.media.image_count, count);
        assert_eq!(fixture.finding("images-count").unwrap().status, status);
    }

    #[test]
    fn test_images_alt_coverage() {
        let markup = "<p>Text.</p><img src='a.png' alt='A'><img src='b.png'><img src='c.png' alt='C'>";
        let fixture = Fixture::new(markup, KeywordSet::default(), MetaFields::default());
        assert_eq!(fixture.finding("images-alt").unwrap().status, Status::Problem);

        let none = Fixture::new("<p>Text.</p>", KeywordSet::default(), MetaFields::default());
        let finding = none.finding("images-alt").unwrap();
        assert_eq!((finding.status, finding.score), (Status::Improvement, 0));
    }

    #[test]
    fn test_videos() {
        let markup = "<p>Text.</p><video src='v.mp4'></video>";
        let fixture = Fixture::new(markup, KeywordSet::default(), MetaFields::default());
        assert_eq!(fixture.finding("video-presence").unwrap().status, Status::Good);
        assert_eq!(fixture.finding("videos-alt").unwrap().status, Status::Improvement);

        let fixture = Fixture::new("<p>Text.</p>", KeywordSet::default(), MetaFields::default());
        assert_eq!(fixture.finding("video-presence").unwrap().status, Status::Improvement);
        assert!(fixture.finding("videos-alt").is_none());
    }

    #[test]
    fn test_link_banding() {
        let markup = r#"<p>Text.</p><a href="/a">a</a><a href="/b">b</a><a href="/c">c</a><a href="https://x.org">x</a>"#;
        let fixture = Fixture::new(markup, KeywordSet::default(), MetaFields::default());
        assert_eq!(fixture.finding("internal-links").unwrap().status, Status::Good);
        // no base domain configured: everything is internal
        assert_eq!(fixture.finding("external-links").unwrap().status, Status::Problem);
    }

    #[test]
    fn test_readability_composite_accumulates_suggestions() {
        // 100 words in one sentence, many long words
        let text = format!("<p>{}</p>", "extraordinarily ".repeat(100));
        let finding = Fixture::new(&text, KeywordSet::default(), MetaFields::default())
            .finding("readability")
            .unwrap();
        assert_eq!(finding.status, Status::Problem);
        assert_eq!(finding.score, 0);
        assert_eq!(finding.suggestions.len(), 4);
    }

    #[test]
    fn test_readability_good_text() {
        let sentence = "The cat sat on the mat. ";
        let text = format!("<p>{}</p>", sentence.repeat(150));
        let finding = Fixture::new(&text, KeywordSet::default(), MetaFields::default())
            .finding("readability")
            .unwrap();
        assert_eq!(finding.status, Status::Good);
        assert!(finding.suggestions.is_empty());
    }

    #[test]
    fn test_subheadings() {
        let long = format!("<p>{}</p>", words(400));
        let fixture = Fixture::new(&long, KeywordSet::default(), MetaFields::default());
        assert_eq!(fixture.finding("subheadings").unwrap().status, Status::Improvement);

        let skipped = format!("<h3>Deep</h3><p>{}</p>", words(10));
        let fixture = Fixture::new(&skipped, KeywordSet::default(), MetaFields::default());
        assert_eq!(fixture.finding("subheadings").unwrap().title, "Heading levels skipped");

        let fine = format!("<h2>Section</h2><p>{}</p>", words(400));
        let fixture = Fixture::new(&fine, KeywordSet::default(), MetaFields::default());
        assert_eq!(fixture.finding("subheadings").unwrap().status, Status::Good);
    }

    #[test]
    fn test_findings_are_in_display_order() {
        let fixture = Fixture::new("<p>Some text here.</p>", KeywordSet::new("rust"), MetaFields::default());
        let findings = fixture.findings();
        let mut resorted = findings.clone();
        sort_findings(&mut resorted);
        assert_eq!(findings, resorted);
        assert_eq!(findings[0].category, Category::Keywords);
    }

    #[test]
    fn test_slugify_and_unique_ids() {
        assert_eq!(slugify("Clippy  Lints!"), "clippy-lints");
        assert_eq!(slugify("Café crème"), "café-crème");
        assert_eq!(slugify("***"), "term");

        let keywords = KeywordSet::default().with_secondary(["SEO", "seo"]);
        let findings = Fixture::new("<p>seo text</p>", keywords, MetaFields::default()).findings();
        assert!(findings.iter().any(|f| f.id == "secondary-keyword-density-seo"));
        assert!(findings.iter().any(|f| f.id == "secondary-keyword-density-seo-2"));
    }
}
