use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use lexiscore_core::{
    AnalysisRequest, Analyzer, AnalyzerConfig, FetchConfig, JsonConfig, TextConfig, convert_to_json, convert_to_text,
    extract_meta_fields, fetch_file, fetch_stdin,
};
use owo_colors::OwoColorize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the analysis report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Score web content for readability, keyword usage and structure
#[derive(Parser, Debug)]
#[command(name = "lexiscore")]
#[command(author = "Lexiscore Contributors")]
#[command(version)]
#[command(about = "Score web content for readability, keyword usage and structure", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<String>,

    /// Main keyword
    #[arg(short = 'k', long = "keyword", value_name = "TERM")]
    keyword: Option<String>,

    /// Secondary keyword (repeatable or comma separated)
    #[arg(short = 's', long = "secondary", value_name = "TERM", value_delimiter = ',')]
    secondary: Vec<String>,

    /// Long-tail phrase (repeatable)
    #[arg(short = 'l', long = "long-tail", value_name = "PHRASE")]
    long_tail: Vec<String>,

    /// Meta title (default: taken from the page's <title>)
    #[arg(long, value_name = "TEXT")]
    title: Option<String>,

    /// Meta description (default: taken from the page's meta description)
    #[arg(long, value_name = "TEXT")]
    description: Option<String>,

    /// Domain links are classified against (default: host of a fetched URL)
    #[arg(short = 'd', long, value_name = "DOMAIN")]
    base_domain: Option<String>,

    /// JSON file with keywords, meta and base_domain; flags override its values
    #[arg(short, long, value_name = "FILE")]
    request: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Include the statistics snapshot in the output
    #[arg(long)]
    stats: bool,

    /// Only list findings that need attention (text format)
    #[arg(long)]
    problems_only: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,
}

impl Args {
    /// Merges the request file (if any) with the flags given on the command line.
    fn request(&self) -> anyhow::Result<AnalysisRequest> {
        let mut request = match &self.request {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read request file: {}", path.display()))?;
                AnalysisRequest::from_json(&json).context("Failed to load request file")?
            }
            None => AnalysisRequest::default(),
        };

        if let Some(keyword) = &self.keyword {
            request.keywords.main = Some(keyword.clone());
        }
        request.keywords.secondary.extend(self.secondary.iter().cloned());
        request.keywords.long_tail.extend(self.long_tail.iter().cloned());
        if let Some(title) = &self.title {
            request.meta.title = title.clone();
        }
        if let Some(description) = &self.description {
            request.meta.description = description.clone();
        }
        if let Some(domain) = &self.base_domain {
            request.base_domain = Some(domain.clone());
        }

        Ok(request)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "lexiscore_core=debug,lexiscore=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn is_web_url(input: &str) -> bool {
    Url::parse(input).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

fn print_request_details(request: &AnalysisRequest) {
    if !request.meta.title.is_empty() {
        echo::print_detail("Title", &request.meta.title);
    }
    match request.keywords.main_term() {
        Some(keyword) => echo::print_detail("Keyword", keyword),
        None => echo::print_warning("No main keyword given; keyword checks will report problems"),
    }
    if let Some(domain) = &request.base_domain {
        echo::print_detail("Base domain", domain);
    }
    eprintln!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "lexiscore", &mut std::io::stdout());
        return Ok(());
    }
    let Some(input) = args.input.as_deref() else {
        anyhow::bail!("No input given");
    };

    init_tracing(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let mut request = args.request()?;
    let started = Instant::now();

    let mut config = AnalyzerConfig::builder();
    if let Some(domain) = &request.base_domain {
        config = config.base_domain(domain.as_str());
    }
    let analyzer = Analyzer::with_config(config.build());

    let analysis = if is_web_url(input) {
        if args.verbose {
            echo::print_step(1, 3, &format!("Fetching from {}", input.bright_white().underline()));
            print_request_details(&request);
            echo::print_step(2, 3, "Analyzing content");
        }

        debug!(?request, url = input, "fetching input");
        let defaults = FetchConfig::default();
        let fetch_config =
            FetchConfig { timeout: args.timeout, user_agent: args.user_agent.clone().unwrap_or(defaults.user_agent) };
        analyzer
            .fetch_and_analyze(input, &request.keywords, &request.meta, &fetch_config)
            .await
            .context("Failed to fetch URL")?
    } else {
        let html = if input == "-" {
            if args.verbose {
                echo::print_step(1, 3, "Reading from stdin");
            }
            fetch_stdin().context("Failed to read from stdin")?
        } else {
            if args.verbose {
                echo::print_step(1, 3, &format!("Reading from file {}", input.bright_white()));
            }
            fetch_file(input).with_context(|| format!("Failed to read file: {}", input))?
        };

        request.meta = request.meta.or(extract_meta_fields(&html));
        debug!(?request, bytes = html.len(), "input loaded");

        if args.verbose {
            echo::print_detail("Size", &echo::format_size(html.len()));
            print_request_details(&request);
            echo::print_step(2, 3, "Analyzing content");
        }
        analyzer.analyze(&html, &request.keywords, &request.meta)
    };
    let elapsed = started.elapsed();

    if args.verbose {
        echo::print_detail("Words", &analysis.stats.length.words.to_string());
        echo::print_detail("Findings", &analysis.findings.len().to_string());
        echo::print_timing("Input and analysis", elapsed);
        eprintln!();
        echo::print_step(3, 3, "Writing output");
        echo::print_detail("Format", &format!("{:?}", args.format));
        eprintln!();
    }

    let output = match args.format {
        OutputFormat::Text => {
            let config = TextConfig { include_stats: args.stats, line_width: 88, problems_only: args.problems_only };
            convert_to_text(&analysis, &config)
        }
        OutputFormat::Json => {
            let config = JsonConfig { include_stats: args.stats, pretty: true };
            convert_to_json(&analysis, &config).context("Failed to convert to JSON")?
        }
    };

    match args.output {
        Some(path) => {
            fs::write(&path, format!("{}\n", output))
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_score(&analysis);
            echo::print_success(&format!("Report written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", output);
            if args.verbose {
                echo::print_score(&analysis);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("TXT".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("markdown".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_is_web_url() {
        assert!(is_web_url("https://example.com/post"));
        assert!(is_web_url("http://localhost:8080"));
        assert!(!is_web_url("article.html"));
        assert!(!is_web_url("file:///tmp/article.html"));
        assert!(!is_web_url("C:\\docs\\page.html"));
    }

    #[test]
    fn test_flags_override_request_values() {
        let dir = std::env::temp_dir().join(format!("lexiscore-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("request.json");
        fs::write(
            &path,
            r#"{"keywords": {"main": "old", "secondary": ["a"]}, "meta": {"title": "From file"}, "base_domain": "a.com"}"#,
        )
        .unwrap();

        let args = Args::parse_from([
            "lexiscore",
            "page.html",
            "--request",
            path.to_str().unwrap(),
            "-k",
            "rust",
            "-s",
            "b,c",
            "-d",
            "b.com",
        ]);
        let request = args.request().unwrap();
        fs::remove_dir_all(&dir).ok();

        assert_eq!(request.keywords.main_term(), Some("rust"));
        assert_eq!(request.keywords.secondary, vec!["a", "b", "c"]);
        assert_eq!(request.meta.title, "From file");
        assert_eq!(request.base_domain.as_deref(), Some("b.com"));
    }
}
