use car_sales_report::config::toml_config::ReportConfig;
use car_sales_report::config::{Command, LogFormat};
use car_sales_report::core::pipeline::parse_sales_csv;
use car_sales_report::core::{ConfigProvider, Storage};
use car_sales_report::driver::Session;
use car_sales_report::utils::error::ErrorSeverity;
use car_sales_report::utils::{logger, validation::Validate};
use car_sales_report::{
    CatalogPipeline, CliConfig, LocalStorage, ReportEngine, ReportError, ReportingCatalog, Result,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }
    tracing::debug!("CLI config: {:?}", config);

    let outcome = match config.command {
        Command::Interactive { seed } => run_interactive(seed).await,
        Command::Report(args) => run_report(args).await,
        Command::ReportFile { config } => match ReportConfig::from_file(&config) {
            Ok(file_config) => {
                tracing::info!("Loaded configuration from {}", config);
                run_report(file_config).await
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = outcome {
        tracing::error!("{} (Severity: {:?})", e, e.severity());
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run_report<C: ConfigProvider + Validate>(config: C) -> Result<()> {
    config.validate()?;

    let pipeline = CatalogPipeline::new(LocalStorage::new("."), config);
    let engine = ReportEngine::new(pipeline);
    let output_path = engine.run().await?;

    println!("✅ Report completed");
    println!("📁 Output saved to: {}", output_path);
    Ok(())
}

async fn run_interactive(seed: Option<String>) -> Result<()> {
    let catalog = match seed {
        Some(path) => {
            let raw = LocalStorage::new(".").read_file(&path).await?;
            let catalog = ReportingCatalog::from_records(parse_sales_csv(&raw)?)?;
            tracing::info!(
                "Seeded catalog from {} with {} manufacturers",
                path,
                catalog.len()
            );
            catalog
        }
        None => ReportingCatalog::new(),
    };

    // stdin is blocking, keep it off the runtime workers.
    tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        let mut session = Session::with_catalog(catalog, stdin.lock(), std::io::stdout());
        session.run()
    })
    .await
    .map_err(|e| ReportError::IoError(std::io::Error::other(e)))?
}
