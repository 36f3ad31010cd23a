//! HTML score report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use scalemark_core::report::ScoreReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page from a score report.
pub fn generate_html(report: &ScoreReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>scalemark report — {}</title>\n",
        html_escape(&report.form_name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Score report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Form: <strong>{}</strong> v{} | {} sections | {}</p>\n",
        html_escape(&report.form_name),
        html_escape(&report.form_version),
        report.attempt.sections.len(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Composite headline
    let composite = &report.attempt.composite;
    let band = &report.attempt.band;
    html.push_str("<section class=\"composite\">\n");
    html.push_str("<h2>Composite</h2>\n");
    html.push_str(&format!(
        "<p class=\"total\">{} <span class=\"outof\">/ {}</span></p>\n",
        composite.total, report.attempt.max_composite
    ));
    html.push_str(&format!(
        "<p><span class=\"band\" style=\"background:{}\">{}</span></p>\n",
        html_escape(&band.color),
        html_escape(&band.label)
    ));
    if !band.narrative.is_empty() {
        html.push_str(&format!(
            "<p class=\"narrative\">{}</p>\n",
            html_escape(&band.narrative)
        ));
    }
    html.push_str(&format!(
        "<p class=\"meta\">{} of {} attempted items correct ({}%)</p>\n",
        composite.total_correct, composite.attempted, composite.percent
    ));
    html.push_str(&generate_composite_bar(
        composite.total,
        report.attempt.max_composite,
        &band.color,
    ));
    html.push_str("</section>\n");

    // Section table
    html.push_str("<section class=\"sections\">\n");
    html.push_str("<h2>Sections</h2>\n");
    html.push_str("<table class=\"sections-table\">\n");
    html.push_str("<thead><tr><th>Section</th><th>Raw</th><th>Scaled</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for section in &report.attempt.sections {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(&section.section),
            section.raw,
            section.scaled
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Diagnostics
    if report.attempt.has_diagnostics() {
        html.push_str("<section class=\"diagnostics\">\n");
        html.push_str("<h2>Diagnostics</h2>\n<ul>\n");
        for diagnostic in &report.attempt.diagnostics {
            html.push_str(&format!(
                "<li>{}</li>\n",
                html_escape(&diagnostic.to_string())
            ));
        }
        html.push_str("</ul>\n</section>\n");
    }

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str(&format!(
        "<footer><p class=\"meta\">Report {} | form {}</p></footer>\n",
        report.id,
        html_escape(&report.form_id)
    ));

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &ScoreReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_composite_bar(total: i32, max_composite: i32, color: &str) -> String {
    if max_composite <= 0 {
        return String::new();
    }
    let max_width = 400;
    let bar_height = 30;
    let filled = (i64::from(total.clamp(0, max_composite)) * max_width
        / i64::from(max_composite)) as usize;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        max_width + 60,
        bar_height + 10
    );
    svg.push_str(&format!(
        "  <rect x=\"0\" y=\"5\" width=\"{max_width}\" height=\"{bar_height}\" fill=\"var(--border, #e5e7eb)\" rx=\"4\"/>\n"
    ));
    svg.push_str(&format!(
        "  <rect x=\"0\" y=\"5\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
        filled,
        bar_height,
        html_escape(color)
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
        filled + 8,
        5 + bar_height / 2,
        total
    ));
    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.total { font-size: 3rem; font-weight: bold; margin: 0.5rem 0; }
.outof { font-size: 1.5rem; color: #6b7280; font-weight: normal; }
.band { display: inline-block; padding: 0.25rem 0.75rem; border-radius: 999px; color: #fff; font-weight: bold; }
.narrative { max-width: 40rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
