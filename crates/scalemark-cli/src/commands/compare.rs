//! The `scalemark compare` command.

use std::path::PathBuf;

use anyhow::Result;

use scalemark_forms::{diff_forms, parse_form};

pub fn execute(
    baseline_path: PathBuf,
    updated_path: PathBuf,
    format: String,
    fail_on_change: bool,
) -> Result<()> {
    let baseline = parse_form(&baseline_path)?;
    let updated = parse_form(&updated_path)?;

    let diff = diff_forms(&baseline, &updated);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", diff.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&diff)?);
        }
        _ => {
            // text format
            if diff.is_empty() {
                println!("No calibration changes.");
            } else {
                println!("{} change(s):", diff.change_count());
                for id in &diff.sections_added {
                    println!("  section added: {id}");
                }
                for id in &diff.sections_removed {
                    println!("  section removed: {id}");
                }
                for section in &diff.sections {
                    if section.spec_changed {
                        println!("  [{}] table bounds changed", section.section);
                    }
                    for change in &section.entries {
                        println!(
                            "  [{}] raw {}: {} -> {}",
                            section.section,
                            change.raw,
                            optional(change.baseline),
                            optional(change.updated)
                        );
                    }
                }
                for band in &diff.bands {
                    println!(
                        "  [bands] {}: {} -> {}",
                        band.label,
                        optional(band.baseline),
                        optional(band.updated)
                    );
                }
            }
        }
    }

    if fail_on_change && !diff.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

fn optional(value: Option<i32>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "(none)".to_string(),
    }
}
