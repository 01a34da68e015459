use crate::domain::manufacturer::Manufacturer;
use crate::domain::model::{BodyType, CarModel};
use crate::domain::report::SalesRecord;
use crate::utils::error::{ReportError, Result};

/// Every manufacturer known to a reporting session, in insertion order.
///
/// Report queries never mutate the catalog. There is no internal locking;
/// a host sharing one catalog between callers must wrap it in a single
/// mutex.
#[derive(Debug, Clone, Default)]
pub struct ReportingCatalog {
    manufacturers: Vec<Manufacturer>,
}

impl ReportingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups flat sales rows by manufacturer (case-insensitive, first-seen
    /// order). Fails on the first row carrying an unknown body type.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = SalesRecord>,
    {
        let mut catalog = Self::new();
        for (index, record) in records.into_iter().enumerate() {
            let model = CarModel::new(
                record.model,
                record.weight,
                record.sales_price,
                record.units_sold,
                &record.body_type,
            )
            .map_err(|err| match err {
                ReportError::InvalidArgument { field, value, reason } => {
                    ReportError::InvalidArgument {
                        field: format!("row {} {}", index + 1, field),
                        value,
                        reason,
                    }
                }
                other => other,
            })?;

            match catalog.find_by_name_mut(&record.manufacturer) {
                Some(manufacturer) => manufacturer.add_car_model(model),
                None => {
                    let mut manufacturer = Manufacturer::new(record.manufacturer);
                    manufacturer.add_car_model(model);
                    catalog.add_manufacturer(manufacturer);
                }
            }
        }
        Ok(catalog)
    }

    pub fn add_manufacturer(&mut self, manufacturer: Manufacturer) {
        tracing::debug!(manufacturer = %manufacturer.name(), "adding manufacturer");
        self.manufacturers.push(manufacturer);
    }

    pub fn manufacturers(&self) -> &[Manufacturer] {
        &self.manufacturers
    }

    pub fn manufacturer_names(&self) -> Vec<&str> {
        self.manufacturers.iter().map(Manufacturer::name).collect()
    }

    pub fn len(&self) -> usize {
        self.manufacturers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manufacturers.is_empty()
    }

    pub fn model_count(&self) -> usize {
        self.manufacturers
            .iter()
            .map(|m| m.car_models().len())
            .sum()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Manufacturer> {
        self.manufacturers.get_mut(index)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Manufacturer> {
        self.manufacturers
            .iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Manufacturer> {
        self.manufacturers
            .iter_mut()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// The priciest model across all manufacturers, with its owner.
    ///
    /// Strict comparison: ties go to the earliest manufacturer, then the
    /// earliest model within it.
    pub fn most_expensive_model_overall(&self) -> Option<(&Manufacturer, &CarModel)> {
        let mut best: Option<(&Manufacturer, &CarModel)> = None;
        for manufacturer in &self.manufacturers {
            for model in manufacturer.car_models() {
                let replace = match best {
                    None => true,
                    Some((_, current)) => model.sales_price() > current.sales_price(),
                };
                if replace {
                    best = Some((manufacturer, model));
                }
            }
        }
        best
    }

    pub fn models_above_price(&self, threshold: f64) -> Vec<&CarModel> {
        self.manufacturers
            .iter()
            .flat_map(|m| m.models_above_price(threshold))
            .collect()
    }

    pub fn models_above_price_by_manufacturer(
        &self,
        threshold: f64,
    ) -> Vec<(&Manufacturer, &CarModel)> {
        self.manufacturers
            .iter()
            .flat_map(|m| {
                m.models_above_price(threshold)
                    .into_iter()
                    .map(move |model| (m, model))
            })
            .collect()
    }

    /// Revenue for the body type per manufacturer, in catalog order.
    pub fn revenue_by_type(&self, body_type: &str) -> Result<Vec<(&Manufacturer, f64)>> {
        let body_type: BodyType = body_type.parse()?;
        Ok(self
            .manufacturers
            .iter()
            .map(|m| (m, m.total_revenue_by_type(body_type.as_str())))
            .collect())
    }

    /// The manufacturer earning the most from the body type.
    ///
    /// An unrecognised body type is an `InvalidArgument` error. Ranking
    /// starts from a baseline of 0 with strict comparison, so `Ok(None)` is
    /// returned when no manufacturer earns more than 0; ties keep the first.
    pub fn top_revenue_manufacturer_by_type(
        &self,
        body_type: &str,
    ) -> Result<Option<(&Manufacturer, f64)>> {
        let mut top: Option<(&Manufacturer, f64)> = None;
        let mut highest = 0.0;
        for (manufacturer, revenue) in self.revenue_by_type(body_type)? {
            if revenue > highest {
                highest = revenue;
                top = Some((manufacturer, revenue));
            }
        }
        Ok(top)
    }

    pub fn display_all(&self) -> Vec<String> {
        self.manufacturers
            .iter()
            .flat_map(Manufacturer::display)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(name: &str, price: f64, sold: u32, body_type: &str) -> CarModel {
        CarModel::new(name, 1500.0, price, sold, body_type).unwrap()
    }

    fn tesla_and_ford() -> ReportingCatalog {
        let mut tesla = Manufacturer::new("Tesla");
        tesla.add_car_model(car("Model X", 50000.0, 10000, "Hatchback"));
        tesla.add_car_model(car("Model S", 80000.0, 6000, "Saloon"));

        let mut ford = Manufacturer::new("Ford");
        ford.add_car_model(car("Mustang", 55000.0, 5000, "Saloon"));
        ford.add_car_model(car("Focus", 25000.0, 20000, "Hatchback"));

        let mut catalog = ReportingCatalog::new();
        catalog.add_manufacturer(tesla);
        catalog.add_manufacturer(ford);
        catalog
    }

    #[test]
    fn test_find_by_name_is_case_insensitive_first_match() {
        let mut catalog = tesla_and_ford();
        catalog.add_manufacturer(Manufacturer::new("FORD"));

        let found = catalog.find_by_name("ford").unwrap();
        assert_eq!(found.name(), "Ford");
        assert_eq!(found.car_models().len(), 2);
        assert!(catalog.find_by_name("Toyota").is_none());
    }

    #[test]
    fn test_most_expensive_model_overall() {
        let catalog = tesla_and_ford();
        let (manufacturer, model) = catalog.most_expensive_model_overall().unwrap();
        assert_eq!(manufacturer.name(), "Tesla");
        assert_eq!(model.name(), "Model S");
        assert_eq!(model.sales_price(), 80000.0);
    }

    #[test]
    fn test_most_expensive_model_overall_tie_goes_to_first_manufacturer() {
        let mut a = Manufacturer::new("A");
        a.add_car_model(car("a1", 100.0, 1, "estate"));
        let mut b = Manufacturer::new("B");
        b.add_car_model(car("b1", 100.0, 1, "estate"));

        let mut catalog = ReportingCatalog::new();
        catalog.add_manufacturer(Manufacturer::new("Empty"));
        catalog.add_manufacturer(a);
        catalog.add_manufacturer(b);

        let (manufacturer, model) = catalog.most_expensive_model_overall().unwrap();
        assert_eq!(manufacturer.name(), "A");
        assert_eq!(model.name(), "a1");
    }

    #[test]
    fn test_most_expensive_model_overall_without_models() {
        let mut catalog = ReportingCatalog::new();
        assert!(catalog.most_expensive_model_overall().is_none());
        catalog.add_manufacturer(Manufacturer::new("Empty"));
        assert!(catalog.most_expensive_model_overall().is_none());
    }

    #[test]
    fn test_most_expensive_lookups_agree_on_nan_price() {
        let mut garbled = Manufacturer::new("Garbled");
        garbled.add_car_model(car("priced", 100.0, 1, "saloon"));
        garbled.add_car_model(car("unpriced", f64::NAN, 1, "saloon"));

        let mut catalog = ReportingCatalog::new();
        catalog.add_manufacturer(garbled);

        let (_, overall) = catalog.most_expensive_model_overall().unwrap();
        let local = catalog.manufacturers()[0].most_expensive_model().unwrap();
        assert_eq!(overall.name(), "priced");
        assert_eq!(local.name(), overall.name());
    }

    #[test]
    fn test_padded_body_type_is_invalid_for_ranking() {
        let catalog = tesla_and_ford();
        assert!(catalog.top_revenue_manufacturer_by_type(" saloon ").is_err());
        assert!(catalog.revenue_by_type("saloon\n").is_err());
    }

    #[test]
    fn test_models_above_price_concatenates_in_order() {
        let catalog = tesla_and_ford();
        let names: Vec<&str> = catalog
            .models_above_price(50000.0)
            .into_iter()
            .map(CarModel::name)
            .collect();
        assert_eq!(names, vec!["Model S", "Mustang"]);

        let owners: Vec<&str> = catalog
            .models_above_price_by_manufacturer(1800.0)
            .into_iter()
            .map(|(m, _)| m.name())
            .collect();
        assert_eq!(owners, vec!["Tesla", "Tesla", "Ford", "Ford"]);
    }

    #[test]
    fn test_top_revenue_saloon() {
        let catalog = tesla_and_ford();
        let (manufacturer, revenue) = catalog
            .top_revenue_manufacturer_by_type("Saloon")
            .unwrap()
            .unwrap();
        assert_eq!(manufacturer.name(), "Tesla");
        assert_eq!(revenue, 480_000_000.0);

        let per_manufacturer: Vec<(&str, f64)> = catalog
            .revenue_by_type("saloon")
            .unwrap()
            .into_iter()
            .map(|(m, r)| (m.name(), r))
            .collect();
        assert_eq!(
            per_manufacturer,
            vec![("Tesla", 480_000_000.0), ("Ford", 275_000_000.0)]
        );
    }

    #[test]
    fn test_top_revenue_hatchback_tie_goes_to_first_manufacturer() {
        // Tesla 50000 * 10000 and Ford 25000 * 20000 are both 500M.
        let catalog = tesla_and_ford();
        let (manufacturer, revenue) = catalog
            .top_revenue_manufacturer_by_type("HATCHBACK")
            .unwrap()
            .unwrap();
        assert_eq!(manufacturer.name(), "Tesla");
        assert_eq!(revenue, 500_000_000.0);
    }

    #[test]
    fn test_top_revenue_invalid_type_is_signalled() {
        let catalog = tesla_and_ford();
        let err = catalog.top_revenue_manufacturer_by_type("SUV").unwrap_err();
        assert!(matches!(err, ReportError::InvalidArgument { .. }));

        let empty = ReportingCatalog::new();
        assert!(empty.top_revenue_manufacturer_by_type("SUV").is_err());
    }

    #[test]
    fn test_top_revenue_empty_catalog_or_no_matches() {
        assert!(ReportingCatalog::new()
            .top_revenue_manufacturer_by_type("estate")
            .unwrap()
            .is_none());
        assert!(tesla_and_ford()
            .top_revenue_manufacturer_by_type("estate")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_top_revenue_zero_baseline_never_reports_zero_revenue() {
        let mut free = Manufacturer::new("Free");
        free.add_car_model(car("Giveaway", 0.0, 500, "estate"));
        let mut unsold = Manufacturer::new("Unsold");
        unsold.add_car_model(car("Shelf", 30000.0, 0, "estate"));

        let mut catalog = ReportingCatalog::new();
        catalog.add_manufacturer(free);
        catalog.add_manufacturer(unsold);

        assert!(catalog
            .top_revenue_manufacturer_by_type("estate")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_top_revenue_zero_baseline_never_reports_negative_revenue() {
        let mut rebate = Manufacturer::new("Rebate");
        rebate.add_car_model(car("Refund", -100.0, 10, "saloon"));

        let mut catalog = ReportingCatalog::new();
        catalog.add_manufacturer(rebate);

        assert!(catalog
            .top_revenue_manufacturer_by_type("saloon")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_top_revenue_tie_keeps_first() {
        let mut a = Manufacturer::new("A");
        a.add_car_model(car("a", 10.0, 10, "estate"));
        let mut b = Manufacturer::new("B");
        b.add_car_model(car("b", 10.0, 10, "estate"));

        let mut catalog = ReportingCatalog::new();
        catalog.add_manufacturer(a);
        catalog.add_manufacturer(b);

        let (top, _) = catalog
            .top_revenue_manufacturer_by_type("estate")
            .unwrap()
            .unwrap();
        assert_eq!(top.name(), "A");
    }

    #[test]
    fn test_from_records_groups_by_manufacturer() {
        let records = vec![
            SalesRecord::new("Tesla", "Model X", 1800.0, 50000.0, 10000, "hatchback"),
            SalesRecord::new("Ford", "Focus", 1400.0, 25000.0, 20000, "Hatchback"),
            SalesRecord::new("tesla", "Model S", 1600.0, 80000.0, 6000, "SALOON"),
        ];

        let catalog = ReportingCatalog::from_records(records).unwrap();
        assert_eq!(catalog.manufacturer_names(), vec!["Tesla", "Ford"]);
        assert_eq!(catalog.model_count(), 3);
        assert_eq!(catalog.find_by_name("TESLA").unwrap().car_models().len(), 2);
    }

    #[test]
    fn test_from_records_rejects_unknown_body_type() {
        let records = vec![
            SalesRecord::new("Tesla", "Model X", 1800.0, 50000.0, 10000, "hatchback"),
            SalesRecord::new("Tesla", "Cybertruck", 3000.0, 90000.0, 10, "pickup"),
        ];

        let err = ReportingCatalog::from_records(records).unwrap_err();
        match err {
            ReportError::InvalidArgument { field, value, .. } => {
                assert_eq!(field, "row 2 body_type");
                assert_eq!(value, "pickup");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_display_all() {
        let lines = tesla_and_ford().display_all();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Manufacturer: Tesla");
        assert_eq!(lines[3], "Manufacturer: Ford");
    }
}
