//! The `scalemark score` command.

use std::path::PathBuf;

use anyhow::Result;

use scalemark_core::model::Attempt;
use scalemark_core::report::ScoreReport;
use scalemark_forms::build_engine;
use scalemark_report::write_html_report;

use super::{load_registry, resolve_form};

pub fn execute(
    form_ref: String,
    raw: Vec<String>,
    attempted: u32,
    forms_dir: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
    html: Option<PathBuf>,
) -> Result<()> {
    let registry = load_registry(forms_dir.as_deref())?;
    let form = resolve_form(&registry, &form_ref)?;

    let engine = match build_engine(&form) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("Form '{}' failed its calibration audit:", form.id);
            for line in err.audit.issue_lines() {
                eprintln!("  {line}");
            }
            anyhow::bail!("refusing to score against invalid calibration data");
        }
    };

    let attempt = parse_attempt(&raw, attempted)?;
    let score = engine.score(&attempt);
    let report = ScoreReport::new(
        form.id.clone(),
        form.name.clone(),
        form.version.clone(),
        score,
    );

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        _ => print_score(&report),
    }

    if let Some(path) = &output {
        report.save_json(path)?;
        eprintln!("Report saved to: {}", path.display());
    }
    if let Some(path) = &html {
        write_html_report(&report, path)?;
        eprintln!("HTML report: {}", path.display());
    }

    Ok(())
}

/// Parses repeated `SECTION=N` pairs into an attempt.
fn parse_attempt(raw: &[String], attempted: u32) -> Result<Attempt> {
    anyhow::ensure!(
        !raw.is_empty(),
        "at least one --raw SECTION=N pair is required"
    );

    let mut sections = Vec::new();
    for pair in raw {
        let (section, count) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("invalid --raw value '{pair}', expected SECTION=N"))?;
        let correct: i32 = count
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid raw count in '{pair}'"))?;
        sections.push((section.trim(), correct));
    }

    Ok(Attempt::new(&sections, attempted))
}

fn print_score(report: &ScoreReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Section", "Raw", "Scaled"]);
    for section in &report.attempt.sections {
        table.add_row(vec![
            Cell::new(&section.section),
            Cell::new(section.raw),
            Cell::new(section.scaled),
        ]);
    }
    println!("{table}");

    let composite = &report.attempt.composite;
    println!(
        "\nTotal: {} / {} ({} of {} attempted correct, {}%)",
        composite.total,
        report.attempt.max_composite,
        composite.total_correct,
        composite.attempted,
        composite.percent
    );
    println!("Band: {}", report.attempt.band.label);
    if !report.attempt.band.narrative.is_empty() {
        println!("  {}", report.attempt.band.narrative);
    }
    for diagnostic in &report.attempt.diagnostics {
        println!("note: {diagnostic}");
    }
}
