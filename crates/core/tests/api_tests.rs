//! Library API integration tests
use lexiscore_core::*;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

fn article_request() -> AnalysisRequest {
    AnalysisRequest::from_json(&read_fixture("request.json")).expect("fixture request should load")
}

fn status_of(analysis: &Analysis, id: &str) -> Status {
    analysis.finding(id).unwrap_or_else(|| panic!("missing finding {id}")).status
}

#[test]
fn test_analyze_is_deterministic() {
    let html = read_fixture("article.html");
    let request = article_request();
    let meta = extract_meta_fields(&html);

    let first = analyze(&html, &request.keywords, &meta, request.base_domain.as_deref());
    let second = analyze(&html, &request.keywords, &meta, request.base_domain.as_deref());

    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn test_empty_input_is_zero_safe() {
    let keywords = KeywordSet { main: Some(String::new()), ..Default::default() };
    let analysis = analyze("", &keywords, &MetaFields::default(), None);

    assert_eq!(analysis.stats.length.words, 0);
    assert_eq!(analysis.stats.readability.flesch_score, 0.0);
    assert_eq!(analysis.stats.keyword_density.main, 0.0);
    assert_eq!(analysis.score.value, 0);
    assert_eq!(status_of(&analysis, "content-empty"), Status::Problem);
    assert!(analysis.findings.iter().all(|f| f.score == 0));
}

#[test]
fn test_markup_without_text_counts_as_empty() {
    let analysis = analyze(&read_fixture("empty_content.html"), &KeywordSet::default(), &MetaFields::default(), None);
    assert_eq!(analysis.stats.length.words, 0);
    assert!(analysis.finding("content-empty").is_some());
    assert!(analysis.finding("readability").is_none());
}

#[test]
fn test_density_is_monotonic() {
    let keywords = KeywordSet::new("ferris");
    let mut previous = -1.0;
    for hits in 0..=50 {
        let content = format!("<p>{}{}</p>", "ferris ".repeat(hits), "crab ".repeat(200 - hits));
        let analysis = analyze(&content, &keywords, &MetaFields::default(), None);
        assert_eq!(analysis.stats.length.words, 200);
        assert!(analysis.stats.keyword_density.main >= previous);
        previous = analysis.stats.keyword_density.main;
    }
}

#[test]
fn test_h1_banding() {
    let cases = [
        ("<p>No heading here.</p>", Status::Problem, 0),
        ("<h1>One</h1><p>Text.</p>", Status::Good, 10),
        ("<h1>One</h1><h1>Two</h1><p>Text.</p>", Status::Improvement, 5),
    ];
    for (content, status, score) in cases {
        let analysis = analyze(content, &KeywordSet::default(), &MetaFields::default(), None);
        let finding = analysis.finding("h1-count").unwrap();
        assert_eq!((finding.status, finding.score), (status, score), "content: {content}");
    }
}

#[test]
fn test_score_stays_in_bounds() {
    let inputs = [
        String::new(),
        "<p>tiny</p>".to_string(),
        read_fixture("fragment.html"),
        read_fixture("article.html"),
        format!("<h1>x</h1>{}", "<p>x x x x x.</p>".repeat(500)),
    ];
    for content in &inputs {
        let analysis = analyze(content, &KeywordSet::new("x"), &MetaFields::default(), None);
        assert!(analysis.score.value <= 100);
        assert!(!analysis.findings.is_empty());
    }
}

#[test]
fn test_title_of_45_characters_with_keyword() {
    let title = "Ownership in Rust: a guide for new developers";
    assert_eq!(title.chars().count(), 45);

    let meta = MetaFields::new(title, "");
    let analysis = analyze("<p>Some body text.</p>", &KeywordSet::new("ownership"), &meta, None);

    assert_eq!(status_of(&analysis, "meta-title-length"), Status::Good);
    assert_eq!(status_of(&analysis, "meta-title-keyword"), Status::Good);
}

#[test]
fn test_link_classification() {
    let content = r#"<p><a href="https://example.com/page">a</a> <a href="/local">b</a> <a href="https://other.org">c</a></p>"#;
    let analysis = analyze(content, &KeywordSet::default(), &MetaFields::default(), Some("example.com"));

    assert_eq!(analysis.stats.structure.links.internal, 2);
    assert_eq!(analysis.stats.structure.links.external, 1);
}

#[test]
fn test_image_alt_coverage() {
    let content = r#"<p>Gallery.</p><img src="1.png" alt="One"><img src="2.png"><img src="3.png" alt="Three">"#;
    let analysis = analyze(content, &KeywordSet::default(), &MetaFields::default(), None);

    assert_eq!(analysis.stats.structure.media.image_count, 3);
    assert_eq!(analysis.stats.structure.media.images_with_alt, 2);
    assert_eq!(status_of(&analysis, "images-alt"), Status::Problem);
}

#[test]
fn test_low_main_keyword_density() {
    let content = format!("<p>rust rust rust {}</p>", "filler ".repeat(997));
    let analysis = analyze(&content, &KeywordSet::new("rust"), &MetaFields::default(), None);

    assert_eq!(analysis.stats.length.words, 1000);
    assert!((analysis.stats.keyword_density.main - 0.3).abs() < 1e-9);
    assert_eq!(status_of(&analysis, "main-keyword-density"), Status::Problem);
}

#[test]
fn test_article_fixture_end_to_end() {
    let html = read_fixture("article.html");
    let request = article_request();
    let meta = MetaFields::default().or(extract_meta_fields(&html));
    assert_eq!(meta.title, "Rust Ownership Explained for Working Developers");

    let analysis = Analyzer::with_config(AnalyzerConfig::builder().base_domain("example.com").build()).analyze(
        &html,
        &request.keywords,
        &meta,
    );
    let structure = &analysis.stats.structure;

    // script, style and comment bodies do not count as text
    assert!(analysis.stats.keyword_density.main < 2.5);

    assert_eq!(structure.headings, HeadingCounts { h1: 1, h2: 3, h3: 1, h4: 0 });
    assert_eq!(structure.links.internal, 3);
    assert_eq!(structure.links.external, 2);
    assert_eq!(structure.media.image_count, 3);
    assert_eq!(structure.media.images_with_alt, 2);
    assert_eq!(structure.media.images_with_keyword_in_alt, 1);
    assert_eq!(structure.media.video_count, 1);
    assert_eq!(structure.media.videos_with_alt, 1);

    assert_eq!(status_of(&analysis, "main-keyword-density"), Status::Good);
    assert_eq!(status_of(&analysis, "main-keyword-h1"), Status::Good);
    assert_eq!(status_of(&analysis, "main-keyword-first-paragraph"), Status::Good);
    assert_eq!(status_of(&analysis, "meta-title-length"), Status::Good);
    assert_eq!(status_of(&analysis, "meta-description-length"), Status::Good);
    assert_eq!(status_of(&analysis, "secondary-keywords"), Status::Improvement);
    assert_eq!(status_of(&analysis, "secondary-keyword-density-garbage-collection"), Status::Problem);
    assert_eq!(status_of(&analysis, "long-tail-keywords"), Status::Good);
    assert_eq!(status_of(&analysis, "images-count"), Status::Good);
    assert_eq!(status_of(&analysis, "images-alt"), Status::Problem);
    assert_eq!(status_of(&analysis, "external-links"), Status::Improvement);
    assert_eq!(status_of(&analysis, "readability"), Status::Problem);

    assert!(analysis.score.value > 0 && analysis.score.value < 100);
}

#[test]
fn test_findings_are_sorted_for_display() {
    let html = read_fixture("article.html");
    let request = article_request();
    let analysis = request.analyze(&html);

    let keys: Vec<_> = analysis.findings.iter().map(Finding::sort_key).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    let mut resorted = analysis.findings.clone();
    sort_findings(&mut resorted);
    assert_eq!(resorted, analysis.findings);
}

#[test]
fn test_finding_ids_are_unique() {
    let analysis = article_request().analyze(&read_fixture("article.html"));
    let mut ids: Vec<&str> = analysis.findings.iter().map(|f| f.id.as_str()).collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[test]
fn test_component_functions_agree_with_analyze() {
    let html = read_fixture("fragment.html");
    let keywords = KeywordSet::new("coffee");
    let analysis = analyze(&html, &keywords, &MetaFields::default(), None);

    let content = normalize(&html);
    assert_eq!(extract_length(&content.plain_text, &content.raw_markup), analysis.stats.length);
    assert_eq!(compute_density(&content.plain_text, &keywords), analysis.stats.keyword_density);
    assert_eq!(analyze_structure(&html, None, Some("coffee")), analysis.stats.structure);
    assert_eq!(aggregate(&analysis.findings), analysis.score);
}

#[test]
fn test_formatters_render_analysis() {
    let analysis = article_request().analyze(&read_fixture("article.html"));

    let json = convert_to_json(&analysis, &JsonConfig { include_stats: true, pretty: false }).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["score"]["value"], u64::from(analysis.score.value));
    assert_eq!(value["findings"].as_array().map(Vec::len), Some(analysis.findings.len()));

    let text = convert_to_text(&analysis, &TextConfig::default());
    assert!(text.contains(&format!("Score: {}/100", analysis.score.value)));
}
