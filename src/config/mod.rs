pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Parser)]
#[command(name = "car-sales-report", version)]
#[command(about = "In-memory car sales catalog with revenue and pricing reports")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Menu-driven data entry and reporting on stdin/stdout
    Interactive {
        /// Sales CSV to preload into the catalog
        #[arg(long)]
        seed: Option<String>,
    },
    /// Build a report from a sales CSV using command line settings
    Report(ReportArgs),
    /// Build a report from a TOML configuration file
    ReportFile {
        #[arg(short, long, default_value = "report-config.toml")]
        config: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct ReportArgs {
    #[arg(long)]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub price_threshold: f64,

    #[arg(long, help = "Hatchback, Saloon or Estate")]
    pub body_type: Option<String>,

    #[arg(long, value_delimiter = ',', default_value = "csv,tsv,json")]
    pub formats: Vec<String>,

    #[arg(long, help = "Bundle the outputs into a single ZIP archive")]
    pub compress: bool,
}

impl ConfigProvider for ReportArgs {
    fn input_file(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn price_threshold(&self) -> f64 {
        self.price_threshold
    }

    fn body_type(&self) -> Option<&str> {
        self.body_type.as_deref()
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn compress(&self) -> bool {
        self.compress
    }
}

impl Validate for ReportArgs {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_finite("price_threshold", self.price_threshold)?;
        validation::validate_optional_body_type("body_type", self.body_type.as_deref())?;
        validation::validate_output_formats("formats", &self.formats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_subcommand() {
        let config = CliConfig::try_parse_from([
            "car-sales-report",
            "report",
            "--input",
            "sales.csv",
            "--price-threshold",
            "-100",
            "--body-type",
            "saloon",
            "--formats",
            "csv,json",
        ])
        .unwrap();

        match config.command {
            Command::Report(args) => {
                assert_eq!(args.input, "sales.csv");
                assert_eq!(args.output_path, "./output");
                assert_eq!(args.price_threshold, -100.0);
                assert_eq!(args.body_type.as_deref(), Some("saloon"));
                assert_eq!(args.formats, vec!["csv", "json"]);
                assert!(!args.compress);
                assert!(args.validate().is_ok());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_interactive_with_global_flags() {
        let config = CliConfig::try_parse_from([
            "car-sales-report",
            "interactive",
            "--seed",
            "seed.csv",
            "--verbose",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert!(config.verbose);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(matches!(
            config.command,
            Command::Interactive { seed: Some(ref path) } if path == "seed.csv"
        ));
    }

    #[test]
    fn test_report_args_validation_rejects_bad_body_type() {
        let args = ReportArgs {
            input: "sales.csv".to_string(),
            output_path: "./output".to_string(),
            price_threshold: 0.0,
            body_type: Some("SUV".to_string()),
            formats: vec!["csv".to_string()],
            compress: false,
        };
        assert!(args.validate().is_err());
    }
}
