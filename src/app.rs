use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::application::{ContactCleaner, PreviewSink};
use crate::domain::contacts::RunSummary;
use crate::domain::error::Result;
use crate::infrastructure::config::ConfigService;
use crate::infrastructure::csv::CsvWriter;
use crate::infrastructure::storage::write_atomically;
use crate::interfaces::cli::{Cli, OutputTarget};

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match execute(&cli) {
        Ok(summary) => {
            report(&cli, &summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            if cli.summary_json {
                if let Ok(json) = serde_json::to_string(&serde_json::json!({ "error": e })) {
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn execute(cli: &Cli) -> Result<RunSummary> {
    let mut config_service = ConfigService::new();
    if let Some(path) = &cli.config {
        config_service = config_service.with_file(path)?;
    }
    let config = config_service
        .with_env()
        .with_overrides(&cli.overrides())
        .load()?;

    info!(
        "Mode: {}, dedupe by email: {}, invalid email filter: {}",
        config.mode,
        config.dedupe_by_email,
        config
            .active_email_rule()
            .map_or_else(|| "off".to_string(), |rule| rule.to_string())
    );

    let cleaner = ContactCleaner::new(config);
    let preview_limit = cli.preview.unwrap_or(0);

    let (summary, preview) = match cli.output_target() {
        OutputTarget::Stdout => {
            let stdout = io::stdout();
            let mut sink = PreviewSink::new(CsvWriter::new(stdout.lock()), preview_limit);
            let summary = cleaner.clean_file(&cli.input, &mut sink)?;
            (summary, sink.into_parts().1)
        }
        OutputTarget::File(path) => {
            let (summary, preview) = write_atomically(&path, |file| {
                let mut sink = PreviewSink::new(CsvWriter::new(file), preview_limit);
                let summary = cleaner.clean_file(&cli.input, &mut sink)?;
                Ok((summary, sink.into_parts().1))
            })?;
            info!("Cleaned CSV written to {}", path.display());
            (summary, preview)
        }
    };

    for block in preview {
        eprintln!("{}\n", block);
    }

    Ok(summary)
}

fn report(cli: &Cli, summary: &RunSummary) {
    if cli.summary_json {
        match serde_json::to_string_pretty(summary) {
            Ok(json) => eprintln!("{}", json),
            Err(e) => error!("Failed to serialize run summary: {}", e),
        }
    } else {
        eprintln!("{}", summary.summary());
    }
}
