use crate::utils::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Body style of a car model. Parsed case-insensitively, stored normalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyType {
    Hatchback,
    Saloon,
    Estate,
}

impl BodyType {
    pub const ALL: [BodyType; 3] = [BodyType::Hatchback, BodyType::Saloon, BodyType::Estate];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyType::Hatchback => "Hatchback",
            BodyType::Saloon => "Saloon",
            BodyType::Estate => "Estate",
        }
    }

    /// Case-insensitive comparison against free text. Unknown or padded text
    /// matches nothing; callers trim at the input boundary.
    pub fn matches(&self, raw: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(raw)
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        BodyType::ALL
            .into_iter()
            .find(|body_type| body_type.matches(s))
            .ok_or_else(|| ReportError::invalid_body_type(s))
    }
}

/// A single car model and its sales figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarModel {
    name: String,
    weight: f64,
    sales_price: f64,
    units_sold: u32,
    body_type: BodyType,
}

impl CarModel {
    /// Creates a car model, rejecting any body type other than hatchback,
    /// saloon or estate.
    ///
    /// Weight and price are taken as given; negative values are accepted.
    pub fn new(
        name: impl Into<String>,
        weight: f64,
        sales_price: f64,
        units_sold: u32,
        body_type: &str,
    ) -> Result<Self> {
        let body_type = body_type.parse::<BodyType>()?;
        Ok(Self::with_body_type(
            name,
            weight,
            sales_price,
            units_sold,
            body_type,
        ))
    }

    pub fn with_body_type(
        name: impl Into<String>,
        weight: f64,
        sales_price: f64,
        units_sold: u32,
        body_type: BodyType,
    ) -> Self {
        Self {
            name: name.into(),
            weight,
            sales_price,
            units_sold,
            body_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn sales_price(&self) -> f64 {
        self.sales_price
    }

    pub fn units_sold(&self) -> u32 {
        self.units_sold
    }

    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    pub fn revenue(&self) -> f64 {
        self.sales_price * f64::from(self.units_sold)
    }
}
