//! scalemark CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "scalemark", version, about = "Standardized test score scaling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an attempt against a calibration form
    Score {
        /// Form id or path to a .toml form file
        #[arg(long, default_value = "standard-2024a")]
        form: String,

        /// Raw section score as SECTION=N (repeatable)
        #[arg(long, value_name = "SECTION=N")]
        raw: Vec<String>,

        /// Total number of scored items presented in the attempt
        #[arg(long)]
        attempted: u32,

        /// Directory of additional form files to register
        #[arg(long)]
        forms_dir: Option<PathBuf>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Save the score report as JSON to this path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write a self-contained HTML report to this path
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Convert one raw score through a section's calibration table
    Convert {
        /// Form id or path to a .toml form file
        #[arg(long, default_value = "standard-2024a")]
        form: String,

        /// Section id within the form
        #[arg(long)]
        section: String,

        /// Raw score to convert
        #[arg(long)]
        raw: i32,

        /// Directory of additional form files to register
        #[arg(long)]
        forms_dir: Option<PathBuf>,
    },

    /// Validate calibration form files
    Validate {
        /// Path to a form file or directory
        #[arg(long)]
        forms: PathBuf,

        /// Write the full audit as JSON to this path
        #[arg(long)]
        audit_json: Option<PathBuf>,
    },

    /// List registered forms
    Forms {
        /// Directory of additional form files to register
        #[arg(long)]
        forms_dir: Option<PathBuf>,
    },

    /// Compare two revisions of a calibration form
    Compare {
        /// Baseline form TOML
        #[arg(long)]
        baseline: PathBuf,

        /// Updated form TOML
        #[arg(long)]
        updated: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Exit code 1 if the calibration changed
        #[arg(long)]
        fail_on_change: bool,
    },

    /// Create a starter calibration form
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("scalemark=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            form,
            raw,
            attempted,
            forms_dir,
            format,
            output,
            html,
        } => commands::score::execute(form, raw, attempted, forms_dir, format, output, html),
        Commands::Convert {
            form,
            section,
            raw,
            forms_dir,
        } => commands::convert::execute(form, section, raw, forms_dir),
        Commands::Validate { forms, audit_json } => commands::validate::execute(forms, audit_json),
        Commands::Forms { forms_dir } => commands::forms::execute(forms_dir),
        Commands::Compare {
            baseline,
            updated,
            format,
            fail_on_change,
        } => commands::compare::execute(baseline, updated, format, fail_on_change),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
