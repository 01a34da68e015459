use crate::domain::model::BodyType;
use crate::utils::error::{ReportError, Result};

pub const SUPPORTED_FORMATS: [&str; 3] = ["csv", "tsv", "json"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ReportError::ValidationError {
            field: field_name.to_string(),
            message: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ReportError::ValidationError {
            field: field_name.to_string(),
            message: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReportError::ValidationError {
            field: field_name.to_string(),
            message: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ReportError::ValidationError {
            field: field_name.to_string(),
            message: format!("Value must be a finite number, got {}", value),
        });
    }
    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(ReportError::ValidationError {
            field: field_name.to_string(),
            message: "At least one output format is required".to_string(),
        });
    }

    for format in formats {
        if !SUPPORTED_FORMATS.contains(&format.as_str()) {
            return Err(ReportError::ValidationError {
                field: field_name.to_string(),
                message: format!(
                    "Unsupported format '{}'. Valid formats: {}",
                    format,
                    SUPPORTED_FORMATS.join(", ")
                ),
            });
        }
    }

    Ok(())
}

pub fn validate_optional_body_type(field_name: &str, value: Option<&str>) -> Result<()> {
    if let Some(raw) = value {
        raw.parse::<BodyType>()
            .map_err(|_| ReportError::ValidationError {
                field: field_name.to_string(),
                message: format!("'{}' is not one of Hatchback, Saloon, Estate", raw),
            })?;
    }
    Ok(())
}
