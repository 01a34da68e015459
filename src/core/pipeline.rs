use crate::core::{
    CatalogReport, ConfigProvider, Pipeline, ReportOutput, ReportingCatalog, SalesRecord, Storage,
};
use crate::domain::report::render_listing;
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const CSV_FILENAME: &str = "models.csv";
pub const TSV_FILENAME: &str = "models.tsv";
pub const JSON_FILENAME: &str = "report.json";
pub const ZIP_FILENAME: &str = "sales_report.zip";

/// Parses sales rows from CSV with a header line. Fields are trimmed.
pub fn parse_sales_csv(raw: &[u8]) -> Result<Vec<SalesRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(raw);

    let mut records = Vec::new();
    for row in reader.deserialize::<SalesRecord>() {
        records.push(row?);
    }
    Ok(records)
}

/// Reads a sales CSV, runs every catalog report over it and writes the results.
pub struct CatalogPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CatalogPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file(&self, name: &str) -> String {
        format!("{}/{}", self.config.output_path().trim_end_matches('/'), name)
    }

    fn wants(&self, format: &str) -> bool {
        self.config.output_formats().iter().any(|f| f == format)
    }

    /// (filename, contents) for every configured output format.
    fn rendered_files(&self, result: &ReportOutput) -> Result<Vec<(&'static str, Vec<u8>)>> {
        let mut files = Vec::new();
        if self.wants("csv") {
            files.push((CSV_FILENAME, result.csv_output.as_bytes().to_vec()));
        }
        if self.wants("tsv") {
            files.push((TSV_FILENAME, result.tsv_output.as_bytes().to_vec()));
        }
        if self.wants("json") {
            let json_data = serde_json::to_string_pretty(&result.report)?;
            files.push((JSON_FILENAME, json_data.into_bytes()));
        }
        Ok(files)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CatalogPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<SalesRecord>> {
        tracing::debug!("Reading sales data from: {}", self.config.input_file());
        let raw = self.storage.read_file(self.config.input_file()).await?;
        let records = parse_sales_csv(&raw)?;

        if records.is_empty() {
            tracing::warn!("No sales rows found in {}", self.config.input_file());
        }

        Ok(records)
    }

    async fn transform(&self, data: Vec<SalesRecord>) -> Result<ReportOutput> {
        let catalog = ReportingCatalog::from_records(data)?;
        tracing::debug!(
            "Catalog holds {} manufacturers and {} models",
            catalog.len(),
            catalog.model_count()
        );

        let report = CatalogReport::build(
            &catalog,
            self.config.price_threshold(),
            self.config.body_type(),
        )?;

        if let Some(revenue) = &report.revenue {
            for entry in &revenue.by_manufacturer {
                tracing::debug!(
                    "{} revenue for {}: {}",
                    revenue.body_type,
                    entry.manufacturer,
                    entry.revenue
                );
            }
        }

        Ok(ReportOutput {
            csv_output: render_listing(&catalog, b',')?,
            tsv_output: render_listing(&catalog, b'\t')?,
            report,
        })
    }

    async fn load(&self, result: ReportOutput) -> Result<String> {
        let files = self.rendered_files(&result)?;

        if !self.config.compress() {
            for (name, data) in &files {
                let path = self.output_file(name);
                tracing::debug!("Writing {} ({} bytes)", path, data.len());
                self.storage.write_file(&path, data).await?;
            }
            return Ok(self.config.output_path().to_string());
        }

        tracing::debug!("Creating ZIP file with {} files", files.len());
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
            for (name, data) in &files {
                zip.start_file::<_, ()>(*name, FileOptions::default())?;
                zip.write_all(data)?;
            }
            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        let output_path = self.output_file(ZIP_FILENAME);
        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        self.storage.write_file(&output_path, &zip_data).await?;

        Ok(output_path)
    }
}
