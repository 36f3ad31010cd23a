//! The `scalemark init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    std::fs::create_dir_all("forms")?;

    let starter_path = std::path::Path::new("forms/starter.toml");
    if starter_path.exists() {
        println!("forms/starter.toml already exists, skipping.");
    } else {
        std::fs::write(starter_path, STARTER_FORM)?;
        println!("Created forms/starter.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit forms/starter.toml with your calibration data");
    println!("  2. Run: scalemark validate --forms forms/starter.toml");
    println!(
        "  3. Run: scalemark score --form forms/starter.toml \
         --raw listening=8 --raw reading=7 --attempted 20"
    );

    Ok(())
}

const STARTER_FORM: &str = r#"# scalemark calibration form
#
# Each section maps raw scores (items correct) to scaled scores. The table
# must cover every raw value from 0 to max_raw, stay inside
# [min_scaled, max_scaled], and never decrease.

[form]
id = "starter"
name = "Starter Form"
version = "1"

[[sections]]
id = "listening"
name = "Listening"
max_raw = 10
min_scaled = 0
max_scaled = 50
entries = [
    [0, 0], [1, 5], [2, 10], [3, 15], [4, 20], [5, 25],
    [6, 30], [7, 35], [8, 40], [9, 45], [10, 50]
]

[[sections]]
id = "reading"
name = "Reading"
max_raw = 10
min_scaled = 0
max_scaled = 50
entries = [
    [0, 0], [1, 5], [2, 10], [3, 15], [4, 20], [5, 25],
    [6, 30], [7, 35], [8, 40], [9, 45], [10, 50]
]

# Bands are tried top-down; a composite lands on the first threshold it
# reaches. The lowest band must start at 0.

[[bands]]
threshold = 80
label = "Advanced"

[[bands]]
threshold = 50
label = "Intermediate"

[[bands]]
threshold = 0
label = "Beginner"
"#;
