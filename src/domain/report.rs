use crate::domain::catalog::ReportingCatalog;
use crate::domain::manufacturer::Manufacturer;
use crate::domain::model::{BodyType, CarModel};
use crate::utils::error::{ReportError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const LISTING_HEADER: [&str; 7] = [
    "manufacturer",
    "model",
    "weight",
    "sales_price",
    "units_sold",
    "body_type",
    "revenue",
];

/// One row of a sales CSV file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub manufacturer: String,
    pub model: String,
    pub weight: f64,
    pub sales_price: f64,
    pub units_sold: u32,
    pub body_type: String,
}

impl SalesRecord {
    pub fn new(
        manufacturer: impl Into<String>,
        model: impl Into<String>,
        weight: f64,
        sales_price: f64,
        units_sold: u32,
        body_type: impl Into<String>,
    ) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            model: model.into(),
            weight,
            sales_price,
            units_sold,
            body_type: body_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelEntry {
    pub manufacturer: String,
    pub model: String,
    pub weight: f64,
    pub sales_price: f64,
    pub units_sold: u32,
    pub body_type: BodyType,
    pub revenue: f64,
}

impl ModelEntry {
    pub fn new(manufacturer: &Manufacturer, model: &CarModel) -> Self {
        Self {
            manufacturer: manufacturer.name().to_string(),
            model: model.name().to_string(),
            weight: model.weight(),
            sales_price: model.sales_price(),
            units_sold: model.units_sold(),
            body_type: model.body_type(),
            revenue: model.revenue(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueEntry {
    pub manufacturer: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueSection {
    pub body_type: BodyType,
    pub by_manufacturer: Vec<RevenueEntry>,
    pub top: Option<RevenueEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceFilterSection {
    pub threshold: f64,
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogReport {
    pub generated_at: DateTime<Utc>,
    pub manufacturer_count: usize,
    pub model_count: usize,
    pub most_expensive: Option<ModelEntry>,
    pub above_price: PriceFilterSection,
    pub revenue: Option<RevenueSection>,
}

impl CatalogReport {
    /// Runs every catalog query once and captures the results as owned data.
    pub fn build(
        catalog: &ReportingCatalog,
        price_threshold: f64,
        body_type: Option<&str>,
    ) -> Result<Self> {
        let most_expensive = catalog
            .most_expensive_model_overall()
            .map(|(manufacturer, model)| ModelEntry::new(manufacturer, model));

        let above_price = PriceFilterSection {
            threshold: price_threshold,
            models: catalog
                .models_above_price_by_manufacturer(price_threshold)
                .into_iter()
                .map(|(manufacturer, model)| ModelEntry::new(manufacturer, model))
                .collect(),
        };

        let revenue = match body_type {
            Some(raw) => Some(RevenueSection {
                body_type: raw.parse()?,
                by_manufacturer: catalog
                    .revenue_by_type(raw)?
                    .into_iter()
                    .map(|(manufacturer, revenue)| RevenueEntry {
                        manufacturer: manufacturer.name().to_string(),
                        revenue,
                    })
                    .collect(),
                top: catalog
                    .top_revenue_manufacturer_by_type(raw)?
                    .map(|(manufacturer, revenue)| RevenueEntry {
                        manufacturer: manufacturer.name().to_string(),
                        revenue,
                    }),
            }),
            None => None,
        };

        Ok(Self {
            generated_at: Utc::now(),
            manufacturer_count: catalog.len(),
            model_count: catalog.model_count(),
            most_expensive,
            above_price,
            revenue,
        })
    }
}

/// Everything the load step needs: the rendered listings and the report.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub csv_output: String,
    pub tsv_output: String,
    pub report: CatalogReport,
}

/// Renders every model of the catalog as delimited text with a header row.
pub fn render_listing(catalog: &ReportingCatalog, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(LISTING_HEADER)?;
    for manufacturer in catalog.manufacturers() {
        for model in manufacturer.car_models() {
            writer.serialize(ModelEntry::new(manufacturer, model))?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> ReportingCatalog {
        ReportingCatalog::from_records(vec![
            SalesRecord::new("Tesla", "Model X", 1800.0, 50000.0, 10000, "Hatchback"),
            SalesRecord::new("Tesla", "Model S", 1600.0, 80000.0, 6000, "Saloon"),
            SalesRecord::new("Ford", "Mustang", 2000.0, 55000.0, 5000, "Saloon"),
            SalesRecord::new("Ford", "Focus", 1400.0, 25000.0, 20000, "Hatchback"),
        ])
        .unwrap()
    }

    #[test]
    fn test_build_report_with_revenue_section() {
        let report = CatalogReport::build(&sample_catalog(), 50000.0, Some("saloon")).unwrap();

        assert_eq!(report.manufacturer_count, 2);
        assert_eq!(report.model_count, 4);

        let most_expensive = report.most_expensive.unwrap();
        assert_eq!(most_expensive.manufacturer, "Tesla");
        assert_eq!(most_expensive.model, "Model S");

        let above: Vec<&str> = report
            .above_price
            .models
            .iter()
            .map(|entry| entry.model.as_str())
            .collect();
        assert_eq!(above, vec!["Model S", "Mustang"]);

        let revenue = report.revenue.unwrap();
        assert_eq!(revenue.body_type, BodyType::Saloon);
        assert_eq!(revenue.by_manufacturer.len(), 2);
        assert_eq!(
            revenue.top,
            Some(RevenueEntry {
                manufacturer: "Tesla".to_string(),
                revenue: 480_000_000.0,
            })
        );
    }

    #[test]
    fn test_build_report_without_body_type() {
        let report = CatalogReport::build(&sample_catalog(), 0.0, None).unwrap();
        assert!(report.revenue.is_none());
        assert_eq!(report.above_price.models.len(), 4);
    }

    #[test]
    fn test_build_report_rejects_unknown_body_type() {
        let err = CatalogReport::build(&sample_catalog(), 0.0, Some("SUV")).unwrap_err();
        assert!(matches!(err, ReportError::InvalidArgument { .. }));
    }

    #[test]
    fn test_render_listing_csv_and_tsv() {
        let catalog = sample_catalog();

        let csv_output = render_listing(&catalog, b',').unwrap();
        let lines: Vec<&str> = csv_output.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[0],
            "manufacturer,model,weight,sales_price,units_sold,body_type,revenue"
        );
        assert!(lines[1].starts_with("Tesla,Model X,"));
        assert!(lines[1].contains(",Hatchback,"));

        let tsv_output = render_listing(&catalog, b'\t').unwrap();
        assert!(tsv_output.starts_with("manufacturer\tmodel\t"));
        assert!(tsv_output.contains("Ford\tFocus\t"));
    }

    #[test]
    fn test_render_listing_empty_catalog_has_header_only() {
        let output = render_listing(&ReportingCatalog::new(), b',').unwrap();
        assert_eq!(output.lines().count(), 1);
    }
}
