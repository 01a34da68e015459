pub mod engine;
pub mod pipeline;

pub use crate::domain::catalog::ReportingCatalog;
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::domain::report::{CatalogReport, ReportOutput, SalesRecord};
pub use crate::utils::error::Result;
