use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("lexiscore")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Lexiscore Contributors")
        .about("Score web content for readability, keyword usage and structure")
        .arg(clap::arg!([INPUT] "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(clap::arg!(-k --keyword <TERM> "Main keyword"))
        .arg(
            clap::arg!(-s --secondary <TERM> "Secondary keyword (repeatable or comma separated)")
                .action(clap::ArgAction::Append),
        )
        .arg(clap::arg!(-l --"long-tail" <PHRASE> "Long-tail phrase (repeatable)").action(clap::ArgAction::Append))
        .arg(clap::arg!(--title <TEXT> "Meta title (default: taken from the page's <title>)"))
        .arg(clap::arg!(--description <TEXT> "Meta description (default: taken from the page's meta description)"))
        .arg(clap::arg!(-d --"base-domain" <DOMAIN> "Domain links are classified against"))
        .arg(
            clap::arg!(-r --request <FILE> "JSON file with keywords, meta and base_domain")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(clap::arg!(--stats "Include the statistics snapshot in the output"))
        .arg(clap::arg!(--"problems-only" "Only list findings that need attention (text format)"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(
            clap::arg!(--completions <SHELL> "Print a shell completion script and exit")
                .value_parser(["bash", "elvish", "fish", "powershell", "zsh"]),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "lexiscore", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "lexiscore", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "lexiscore", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "lexiscore", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
