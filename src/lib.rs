pub mod config;
pub mod core;
pub mod domain;
pub mod driver;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig};
pub use core::{engine::ReportEngine, pipeline::CatalogPipeline};
pub use domain::catalog::ReportingCatalog;
pub use domain::manufacturer::Manufacturer;
pub use domain::model::{BodyType, CarModel};
pub use utils::error::{ReportError, Result};
