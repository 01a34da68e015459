use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting sales report run");

        let records = self.pipeline.extract().await?;
        tracing::info!("Extracted {} sales rows", records.len());

        let output = self.pipeline.transform(records).await?;
        tracing::info!(
            "Built report over {} manufacturers and {} models",
            output.report.manufacturer_count,
            output.report.model_count
        );

        let output_path = self.pipeline.load(output).await?;
        tracing::info!(
            "Report written to {} in {:?}",
            output_path,
            started.elapsed()
        );

        Ok(output_path)
    }
}
