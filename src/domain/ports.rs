use crate::domain::report::{ReportOutput, SalesRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Sales CSV, relative to the storage root.
    fn input_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn price_threshold(&self) -> f64;
    fn body_type(&self) -> Option<&str>;
    fn output_formats(&self) -> &[String];
    fn compress(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SalesRecord>>;
    async fn transform(&self, data: Vec<SalesRecord>) -> Result<ReportOutput>;
    async fn load(&self, result: ReportOutput) -> Result<String>;
}
