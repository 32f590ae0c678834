//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sfumato - compress, describe and rename product images for SEO
#[derive(Parser, Debug)]
#[command(name = "sfumato")]
#[command(about = "Compress, describe and rename product images for SEO", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered above the user files
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compress, describe and rename a batch of images
    Process {
        /// Images to process, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Keywords, one per line or one per flag; reused for extra images
        #[arg(short, long, conflicts_with = "keywords_file")]
        keywords: Vec<String>,

        /// File with one keyword per line
        #[arg(long)]
        keywords_file: Option<PathBuf>,

        /// Directory to write each processed image into
        #[arg(short, long, required_unless_present = "zip")]
        out: Option<PathBuf>,

        /// Write every processed image into one zip archive
        #[arg(long)]
        zip: Option<PathBuf>,

        /// Write the JSON batch report here
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print the filename a keyword and description would produce
    Name {
        /// Marketing keyword
        #[arg(long)]
        keyword: String,

        /// Content description
        #[arg(long)]
        description: String,

        /// File extension without the dot
        #[arg(long, default_value = "jpg")]
        ext: String,
    },
}
