use crate::analysis::Analysis;
use crate::finding::{Category, Finding, Status};
use crate::statistics::ContentStatistics;

/// Configuration for plain text reports
#[derive(Debug, Clone, Default)]
pub struct TextConfig {
    /// Append the statistics block
    pub include_stats: bool,

    /// Wrap descriptions and suggestions at this width (0 = no wrapping)
    pub line_width: usize,

    /// Leave out findings with status `good`
    pub problems_only: bool,
}

/// Plain text formatter rendering an analysis as a readable report
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, analysis: &Analysis) -> String {
        convert_to_text(analysis, &self.config)
    }
}

/// Render an analysis as a plain text report
pub fn convert_to_text(analysis: &Analysis, config: &TextConfig) -> String {
    let mut output = String::new();

    output.push_str(&generate_header(analysis));
    output.push('\n');

    for category in Category::ALL {
        let findings: Vec<&Finding> = analysis
            .findings_in(category)
            .filter(|f| !(config.problems_only && f.status == Status::Good))
            .collect();
        if findings.is_empty() {
            continue;
        }

        output.push('\n');
        output.push_str(&underline(category.label(), '-'));
        for finding in findings {
            output.push_str(&render_finding(finding, config.line_width));
        }
    }

    if config.include_stats {
        output.push('\n');
        output.push_str(&render_stats(&analysis.stats));
    }

    output.trim_end().to_string()
}

/// Status marker used in front of each finding
pub fn status_marker(status: Status) -> &'static str {
    match status {
        Status::Good => "[ok]",
        Status::Improvement => "[improve]",
        Status::Problem => "[problem]",
    }
}

fn underline(title: &str, ch: char) -> String {
    format!("{}\n{}\n", title, ch.to_string().repeat(title.chars().count()))
}

fn generate_header(analysis: &Analysis) -> String {
    let score = &analysis.score;
    let mut header = underline(&format!("Score: {}/100 ({})", score.value, score.label), '=');

    let count = |status| analysis.findings.iter().filter(|f| f.status == status).count();
    header.push_str(&format!(
        "{} problem(s) | {} improvement(s) | {} passed\n",
        count(Status::Problem),
        count(Status::Improvement),
        count(Status::Good)
    ));
    header
}

fn render_finding(finding: &Finding, width: usize) -> String {
    let mut out = format!(
        "{} {} ({}, {}/10)\n",
        status_marker(finding.status),
        finding.title,
        finding.priority,
        finding.score
    );
    out.push_str(&indent(&wrap_text(&finding.description, width.saturating_sub(4)), "    "));
    for suggestion in &finding.suggestions {
        out.push_str(&indent(&wrap_text(suggestion, width.saturating_sub(6)), "    - "));
    }
    out
}

fn render_stats(stats: &ContentStatistics) -> String {
    let length = &stats.length;
    let r = &stats.readability;
    let s = &stats.structure;

    let mut lines = vec![
        format!("Words: {}", length.words),
        format!("Characters: {} ({} without spaces)", length.characters, length.characters_no_spaces),
        format!("Paragraphs: {}", length.paragraphs),
        format!("Sentences: {}", length.sentences),
        format!("Reading time: {:.1} min", length.reading_time_minutes),
        format!("Reading ease: {:.1}", r.clamped_flesch()),
        format!("Avg sentence length: {:.1} words", r.avg_sentence_length),
        format!("Avg word length: {:.1} characters", r.avg_word_length),
        format!("Long words: {} ({:.1}%)", r.complex_word_count, r.complex_word_percentage),
        format!(
            "Headings: h1 {} | h2 {} | h3 {} | h4 {}",
            s.headings.h1, s.headings.h2, s.headings.h3, s.headings.h4
        ),
        format!("Links: {} internal | {} external", s.links.internal, s.links.external),
        format!(
            "Images: {} ({} with alt) | Videos: {}",
            s.media.image_count, s.media.images_with_alt, s.media.video_count
        ),
    ];

    let density = &stats.keyword_density;
    if density.main > 0.0 || !density.secondary.is_empty() {
        lines.push(format!("Main keyword density: {:.2}%", density.main));
    }
    for (term, value) in &density.secondary {
        lines.push(format!("Density \"{}\": {:.2}%", term, value));
    }

    let mut out = underline("Statistics", '-');
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Prefix the first line with `first` and align the rest under it
fn indent(text: &str, first: &str) -> String {
    let pad = " ".repeat(first.chars().count());
    let mut out = String::new();
    for (i, line) in text.lines().enumerate() {
        out.push_str(if i == 0 { first } else { pad.as_str() });
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Wrap text to specified line width
fn wrap_text(text: &str, width: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if width == 0 { words.join(" ") } else { wrap_words(&words, width) }
}

/// Wrap a slice of words to specified width
fn wrap_words(words: &[&str], width: usize) -> String {
    let mut lines = Vec::new();
    let mut current_line = Vec::new();
    let mut current_length = 0;

    for &word in words {
        let word_len = word.chars().count();

        if current_length == 0 {
            current_line.push(word);
            current_length = word_len;
        } else if current_length + 1 + word_len <= width {
            current_length += 1 + word_len;
            current_line.push(word);
        } else {
            lines.push(current_line.join(" "));
            current_line = vec![word];
            current_length = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line.join(" "));
    }

    lines.join("\n")
}
