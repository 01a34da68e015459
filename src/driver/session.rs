use crate::domain::catalog::ReportingCatalog;
use crate::domain::manufacturer::Manufacturer;
use crate::domain::model::CarModel;
use crate::utils::error::{ReportError, Result};
use std::io::{BufRead, ErrorKind, Write};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

/// Menu-driven session over an explicit input source and output sink.
///
/// Bad numbers and unknown body types are reported and the menu is shown
/// again; the session ends on the exit entry or when input runs out.
pub struct Session<R, W> {
    input: R,
    output: W,
    catalog: ReportingCatalog,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self::with_catalog(ReportingCatalog::new(), input, output)
    }

    pub fn with_catalog(catalog: ReportingCatalog, input: R, output: W) -> Self {
        Self {
            input,
            output,
            catalog,
        }
    }

    pub fn catalog(&self) -> &ReportingCatalog {
        &self.catalog
    }

    pub fn into_parts(self) -> (ReportingCatalog, W) {
        (self.catalog, self.output)
    }

    pub fn run(&mut self) -> Result<()> {
        tracing::debug!("interactive session started");
        loop {
            self.display_menu()?;
            match self.handle_menu_choice() {
                Ok(Step::Continue) => {}
                Ok(Step::Exit) => break,
                Err(e) if is_end_of_input(&e) => {
                    tracing::debug!("input closed, ending session");
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        writeln!(self.output, "Exiting program")?;
        self.output.flush()?;
        Ok(())
    }

    fn display_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Welcome to the Reporting System")?;
        writeln!(self.output, "1. Enter Manufacturer Data")?;
        writeln!(self.output, "2. Enter Car Model Data")?;
        writeln!(self.output, "3. List All Car Models by Manufacturers")?;
        writeln!(self.output, "4. List Car Models by Manufacturer")?;
        writeln!(self.output, "5. Generate Reports")?;
        writeln!(self.output, "6. Exit Program")?;
        Ok(())
    }

    fn handle_menu_choice(&mut self) -> Result<Step> {
        let choice = self.prompt("Enter choice: ")?;
        match choice.trim() {
            "1" => self.enter_manufacturer()?,
            "2" => self.enter_car_model()?,
            "3" => self.list_all()?,
            "4" => self.list_by_manufacturer()?,
            "5" => self.generate_reports()?,
            "6" => return Ok(Step::Exit),
            other => {
                tracing::debug!(choice = other, "unknown menu choice");
                writeln!(
                    self.output,
                    "Invalid choice. Please enter a number between 1 and 6"
                )?;
            }
        }
        Ok(Step::Continue)
    }

    fn enter_manufacturer(&mut self) -> Result<()> {
        let name = self.prompt("Enter manufacturer name: ")?;
        writeln!(self.output, "Manufacturer '{}' added successfully", name)?;
        self.catalog.add_manufacturer(Manufacturer::new(name));
        Ok(())
    }

    fn enter_car_model(&mut self) -> Result<()> {
        if self.catalog.is_empty() {
            writeln!(
                self.output,
                "No manufacturers available. Please add a manufacturer first."
            )?;
            return Ok(());
        }

        writeln!(self.output, "Available Manufacturers:")?;
        let names: Vec<String> = self
            .catalog
            .manufacturer_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        for (position, name) in names.iter().enumerate() {
            writeln!(self.output, "{}. {}", position + 1, name)?;
        }

        let selection = self.prompt("Select manufacturer: ")?;
        let index = match selection.trim().parse::<usize>() {
            Ok(n) if (1..=names.len()).contains(&n) => n - 1,
            _ => {
                writeln!(self.output, "Invalid manufacturer selection.")?;
                return Ok(());
            }
        };

        match self.read_car_model() {
            Ok(model) => {
                let model_name = model.name().to_string();
                if let Some(manufacturer) = self.catalog.get_mut(index) {
                    manufacturer.add_car_model(model);
                }
                writeln!(self.output, "Car model '{}' added successfully", model_name)?;
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!("rejected car model: {}", e);
                writeln!(self.output, "Error: {}", e)?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn read_car_model(&mut self) -> Result<CarModel> {
        let name = self.prompt("Enter Car Model: ")?;
        let weight: f64 = self.prompt_number("Enter Car Weight (kg): ", "weight")?;
        let price: f64 = self.prompt_number("Enter Sales Price (£): ", "sales price")?;
        let units_sold: u32 = self.prompt_number("Enter Number Sold: ", "units sold")?;
        let body_type = self.prompt("Enter Car Type (Hatchback, Saloon, Estate): ")?;
        CarModel::new(name, weight, price, units_sold, body_type.trim())
    }

    fn list_all(&mut self) -> Result<()> {
        if self.catalog.is_empty() {
            writeln!(self.output, "No manufacturers available.")?;
            return Ok(());
        }
        writeln!(self.output, "List of Manufacturers and Their Cars")?;
        for line in self.catalog.display_all() {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn list_by_manufacturer(&mut self) -> Result<()> {
        if self.catalog.is_empty() {
            writeln!(
                self.output,
                "No manufacturers available. Add a manufacturer first."
            )?;
            return Ok(());
        }

        let name = self.prompt("Enter manufacturer name: ")?;
        let lines = self.catalog.find_by_name(name.trim()).map(Manufacturer::display);
        match lines {
            Some(lines) => {
                for line in lines {
                    writeln!(self.output, "{}", line)?;
                }
            }
            None => writeln!(self.output, "Manufacturer not found")?,
        }
        Ok(())
    }

    fn generate_reports(&mut self) -> Result<()> {
        if self.catalog.is_empty() {
            writeln!(self.output, "No data available.")?;
            return Ok(());
        }

        writeln!(self.output, "Reporting Options")?;
        writeln!(self.output, "1. Manufacturer with largest revenue for a given car type")?;
        writeln!(self.output, "2. Most expensive car model sold")?;
        writeln!(self.output, "3. Car Models above a given price")?;

        let choice = self.prompt("Enter choice: ")?;
        let outcome = match choice.trim() {
            "1" => self.report_top_revenue(),
            "2" => self.report_most_expensive(),
            "3" => self.report_above_price(),
            _ => {
                writeln!(self.output, "Invalid choice.")?;
                Ok(())
            }
        };

        match outcome {
            Err(e) if e.is_recoverable() => {
                writeln!(self.output, "Error: {}", e)?;
                Ok(())
            }
            other => other,
        }
    }

    fn report_top_revenue(&mut self) -> Result<()> {
        let body_type = self.prompt("Enter Car Type (Hatchback, Saloon, Estate): ")?;
        let body_type = body_type.trim();

        let revenues: Vec<(String, f64)> = match self.catalog.revenue_by_type(body_type) {
            Ok(entries) => entries
                .into_iter()
                .map(|(m, revenue)| (m.name().to_string(), revenue))
                .collect(),
            Err(_) => {
                writeln!(
                    self.output,
                    "Invalid car type. Please enter Hatchback, Saloon, or Estate."
                )?;
                return Ok(());
            }
        };

        writeln!(self.output, "Revenue for {} Cars by Manufacturer", body_type)?;
        for (name, revenue) in &revenues {
            writeln!(self.output, "{} Revenue: {}", name, format_money(*revenue))?;
        }

        let top = self
            .catalog
            .top_revenue_manufacturer_by_type(body_type)?
            .map(|(m, revenue)| (m.name().to_string(), revenue));
        match top {
            Some((name, revenue)) => {
                writeln!(
                    self.output,
                    "Manufacturer with the highest revenue for {}: {}",
                    body_type, name
                )?;
                writeln!(self.output, "Total Revenue: {}", format_money(revenue))?;
            }
            None => writeln!(self.output, "Manufacturer not found")?,
        }
        Ok(())
    }

    fn report_most_expensive(&mut self) -> Result<()> {
        let lines = self
            .catalog
            .most_expensive_model_overall()
            .map(|(manufacturer, model)| {
                vec![
                    "Most Expensive Car Model Sold".to_string(),
                    format!("Name: {}", model.name()),
                    format!("Manufacturer: {}", manufacturer.name()),
                    format!("Sales Price: {}", format_money(model.sales_price())),
                    format!("Type: {}", model.body_type()),
                    format!("Units Sold: {}", model.units_sold()),
                ]
            });

        match lines {
            Some(lines) => {
                for line in lines {
                    writeln!(self.output, "{}", line)?;
                }
            }
            None => writeln!(self.output, "No car models available.")?,
        }
        Ok(())
    }

    fn report_above_price(&mut self) -> Result<()> {
        let threshold: f64 = self.prompt_number("Enter minimum price (£): ", "price")?;

        let lines: Vec<String> = self
            .catalog
            .models_above_price_by_manufacturer(threshold)
            .into_iter()
            .map(|(manufacturer, model)| {
                format!(
                    "{} {} ({}) - {}",
                    manufacturer.name(),
                    model.name(),
                    model.body_type(),
                    format_money(model.sales_price())
                )
            })
            .collect();

        if lines.is_empty() {
            writeln!(
                self.output,
                "No car models above {}",
                format_money(threshold)
            )?;
            return Ok(());
        }

        writeln!(self.output, "Car Models above {}", format_money(threshold))?;
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ReportError::IoError(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                "input closed",
            )));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn prompt_number<T: FromStr>(&mut self, text: &str, field: &str) -> Result<T> {
        let raw = self.prompt(text)?;
        raw.trim().parse::<T>().map_err(|_| ReportError::ParseError {
            field: field.to_string(),
            input: raw,
        })
    }
}

pub fn format_money(value: f64) -> String {
    if value < 0.0 {
        format!("-£{:.2}", -value)
    } else {
        format!("£{:.2}", value)
    }
}

fn is_end_of_input(error: &ReportError) -> bool {
    matches!(error, ReportError::IoError(e) if e.kind() == ErrorKind::UnexpectedEof)
}
