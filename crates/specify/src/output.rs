//! Terminal output utilities

use console::{measure_text_width, style, Color};

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Print a bordered panel with a title
pub fn panel(title: &str, body: &str, color: Color) {
    println!();
    println!("{}", render_panel(title, body, color));
}

/// Render a rounded box around `body`, padded one line vertically and two
/// columns horizontally
pub fn render_panel(title: &str, body: &str, color: Color) -> String {
    let inner = body
        .lines()
        .map(measure_text_width)
        .max()
        .unwrap_or(0)
        .max(measure_text_width(title) + 2)
        + 4;

    let title_part = format!(" {} ", title);
    let top_fill = inner.saturating_sub(measure_text_width(&title_part) + 1);
    let mut lines = vec![format!(
        "{}{}{}{}",
        style("╭─").fg(color),
        style(&title_part).fg(color).bold(),
        style("─".repeat(top_fill)).fg(color),
        style("╮").fg(color)
    )];

    let side = style("│").fg(color).to_string();
    let blank = format!("{}{}{}", side, " ".repeat(inner), side);
    lines.push(blank.clone());
    for line in body.lines() {
        let pad = inner - 2 - measure_text_width(line);
        lines.push(format!("{}  {}{}{}", side, line, " ".repeat(pad), side));
    }
    lines.push(blank);
    lines.push(format!(
        "{}",
        style(format!("╰{}╯", "─".repeat(inner))).fg(color)
    ));

    lines.join("\n")
}

/// Align `(key, value)` pairs as `key → value` lines
pub fn aligned_pairs(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("{:width$} → {}", k, style(v).black().bright(), width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
