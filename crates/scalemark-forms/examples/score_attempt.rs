//! Score attempt example — minimal programmatic usage of scalemark.
//!
//! Builds a scoring engine from the embedded reference form and scores one
//! attempt, without touching the CLI or any files on disk.
//!
//! ```bash
//! cargo run -p scalemark-forms --example score_attempt
//! ```

use scalemark_core::model::Attempt;
use scalemark_forms::{build_engine, reference_form};

fn main() -> anyhow::Result<()> {
    let form = reference_form()?;
    println!(
        "Loaded form: {} v{} ({} sections)",
        form.name,
        form.version,
        form.sections.len()
    );

    let engine = build_engine(&form)?;

    // 75 of 100 listening items correct, 80 of 100 reading items
    let attempt = Attempt::new(&[("listening", 75), ("reading", 80)], 200);
    let score = engine.score(&attempt);

    println!("\nSection scores:");
    for section in &score.sections {
        println!("  {}: raw {} scaled {}", section.section, section.raw, section.scaled);
    }

    println!(
        "\nComposite: {} / {} ({}% of items correct)",
        score.composite.total, score.max_composite, score.composite.percent
    );
    println!("Band: {} ({})", score.band.label, score.band.narrative);

    for diagnostic in &score.diagnostics {
        println!("note: {diagnostic}");
    }

    Ok(())
}
