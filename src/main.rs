use std::process;

use clap::Parser;
use commit_linter::Cli;

fn main() {
    // Default to "warn" if RUST_LOG is not set; logs go to stderr so they
    // never mix with report output on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.execute() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");

            // Print the full error chain if available
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("  Caused by: {err}");
                source = err.source();
            }

            process::exit(1);
        }
    }
}
