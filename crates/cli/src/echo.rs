use owo_colors::OwoColorize;

use lexiscore_core::{Analysis, ScoreColor};

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Lexiscore".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Score content for readability, keywords and structure\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print a labelled detail line under a step
pub fn print_detail(label: &str, value: &str) {
    eprintln!("  {} {}", format!("{}:", label).dimmed(), value.bright_white());
}

/// Print the aggregate score in its band colour
pub fn print_score(analysis: &Analysis) {
    let score = &analysis.score;
    let text = format!("{}/100 {}", score.value, score.label);
    let styled = match score.color {
        ScoreColor::Green => text.bright_green().bold().to_string(),
        ScoreColor::Yellow => text.bright_yellow().bold().to_string(),
        ScoreColor::Orange => text.yellow().to_string(),
        ScoreColor::Red => text.bright_red().bold().to_string(),
    };
    eprintln!("{} {}", "Score:".dimmed(), styled);
}

/// Print timing information with color coding
pub fn print_timing(label: &str, duration: std::time::Duration) {
    let ms = duration.as_secs_f64() * 1000.0;
    let label = format!("{}:", label);

    if ms < 50.0 {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "fast".dimmed());
    } else if ms < 100.0 {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "moderate".bright_yellow());
    } else {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "slow".bright_red());
    }
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
