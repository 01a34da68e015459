use crate::domain::model::CarModel;
use serde::Serialize;

/// A manufacturer and the car models it sells, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Manufacturer {
    name: String,
    models: Vec<CarModel>,
}

impl Manufacturer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            models: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn car_models(&self) -> &[CarModel] {
        &self.models
    }

    pub fn add_car_model(&mut self, model: CarModel) {
        tracing::debug!(manufacturer = %self.name, model = %model.name(), "adding car model");
        self.models.push(model);
    }

    /// Sums `sales_price * units_sold` for models of the given body type.
    ///
    /// The body type is matched case-insensitively and is not validated, so
    /// an unrecognised string yields 0.
    pub fn total_revenue_by_type(&self, body_type: &str) -> f64 {
        self.models
            .iter()
            .filter(|model| model.body_type().matches(body_type))
            .map(CarModel::revenue)
            .sum()
    }

    /// The model with the strictly highest price; the first one wins a tie.
    pub fn most_expensive_model(&self) -> Option<&CarModel> {
        let mut best: Option<&CarModel> = None;
        for model in &self.models {
            let replace = match best {
                None => true,
                Some(current) => model.sales_price() > current.sales_price(),
            };
            if replace {
                best = Some(model);
            }
        }
        best
    }

    pub fn models_above_price(&self, threshold: f64) -> Vec<&CarModel> {
        self.models
            .iter()
            .filter(|model| model.sales_price() > threshold)
            .collect()
    }

    pub fn display(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.models.len() + 1);
        lines.push(format!("Manufacturer: {}", self.name));
        for model in &self.models {
            lines.push(format!(
                "  Model: {}, Weight: {} kg, Price: {}, Units Sold: {}, Type: {}",
                model.name(),
                model.weight(),
                model.sales_price(),
                model.units_sold(),
                model.body_type()
            ));
        }
        lines
    }
}
