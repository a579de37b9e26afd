//! stepwise CLI — lay out learning paths and grade attempts from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "stepwise",
    version,
    about = "Learning path layout and answer grading"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out the gated learning path
    Path {
        /// Path to a .toml/.json content snapshot or a directory of them
        #[arg(long)]
        content: PathBuf,

        /// Completion records JSON (array of records)
        #[arg(long)]
        progress: Option<PathBuf>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade one lesson or exam attempt
    Grade {
        /// Path to a .toml/.json content snapshot or a directory of them
        #[arg(long)]
        content: PathBuf,

        /// Lesson or exam id
        #[arg(long)]
        subject: String,

        /// Answers JSON object keyed by question id
        #[arg(long)]
        answers: PathBuf,

        /// Override the passing score (0-100)
        #[arg(long)]
        passing_score: Option<f64>,

        /// Grade even if some questions are unanswered
        #[arg(long)]
        allow_incomplete: bool,

        /// Append the completion record to this records JSON file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate content snapshot files
    Validate {
        /// Path to a content file or directory
        #[arg(long)]
        content: PathBuf,
    },

    /// Create a starter config and sample content
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stepwise=info".parse().expect("static directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Path {
            content,
            progress,
            format,
            config,
        } => commands::path::execute(content, progress, format, config),
        Commands::Grade {
            content,
            subject,
            answers,
            passing_score,
            allow_incomplete,
            save,
            format,
            config,
        } => commands::grade::execute(commands::grade::GradeArgs {
            content,
            subject,
            answers,
            passing_score,
            allow_incomplete,
            save,
            format,
            config,
        }),
        Commands::Validate { content } => commands::validate::execute(content),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
