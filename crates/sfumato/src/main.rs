//! Sfumato CLI binary.
//!
//! This binary provides command-line access to Sfumato's functionality:
//! - Process a batch of images into a directory, a zip archive and a JSON report
//! - Preview the filename a keyword and description produce

use clap::Parser;
use sfumato::{LoggingConfig, SfumatoConfig, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, ProcessTargets, print_name, run_process};

    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut logging = LoggingConfig::new().with_json_logs(cli.json_logs);
    if cli.verbose {
        logging = logging.with_log_level("debug");
    }
    init_logging(&logging)?;

    // Execute the requested command
    match cli.command {
        Commands::Process {
            files,
            keywords,
            keywords_file,
            out,
            zip,
            report,
        } => {
            let config = SfumatoConfig::load_from(cli.config.as_deref())?;
            let targets = ProcessTargets { out, zip, report };
            let success =
                run_process(&config, &files, keywords, keywords_file.as_deref(), targets).await?;
            if !success {
                std::process::exit(2);
            }
        }

        Commands::Name {
            keyword,
            description,
            ext,
        } => {
            print_name(&keyword, &description, &ext);
        }
    }

    Ok(())
}
