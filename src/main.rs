use clap::{Parser, ValueEnum};
use lease_installments::application::lease_service::LeaseService;
use lease_installments::domain::ports::LeaseRepositoryBox;
use lease_installments::infrastructure::in_memory::InMemoryLeaseRepository;
use lease_installments::interfaces::csv::lease_reader::LeaseReader;
use lease_installments::interfaces::csv::schedule_writer::ScheduleWriter;
use lease_installments::interfaces::json::payload_writer::write_payloads;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One line per installment
    Csv,
    /// Array of lease save payloads
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input lease terms CSV file
    input: PathBuf,

    /// Output format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Log filter (e.g. `debug`). Falls back to RUST_LOG, then `warn`.
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).into_diagnostic()?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    let repository: LeaseRepositoryBox = Box::new(InMemoryLeaseRepository::new());
    let service = LeaseService::new(repository);

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = LeaseReader::new(file);
    for record in reader.leases() {
        match record {
            Ok(record) => {
                let form = record.to_form();
                if let Err(e) = service.submit(&form).await {
                    eprintln!("Error processing lease {}: {}", record.lease_id, e);
                }
            }
            Err(e) => {
                eprintln!("Error reading lease: {}", e);
            }
        }
    }

    let leases = service.into_results().await.into_diagnostic()?;

    let stdout = io::stdout();
    match cli.format {
        OutputFormat::Csv => ScheduleWriter::new(stdout.lock())
            .write_schedules(&leases)
            .into_diagnostic()?,
        OutputFormat::Json => write_payloads(stdout.lock(), &leases).into_diagnostic()?,
    }

    Ok(())
}
