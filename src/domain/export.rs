use super::models::Design;

/// Writes a quote recap (the current design list) to a CSV file so the
/// customer can keep a record of what was requested.
pub struct RecapExporter;

impl RecapExporter {
    pub fn export_designs(designs: &[Design], filename: &str) -> Result<String, String> {
        let mut writer = csv::Writer::from_path(filename).map_err(|e| e.to_string())?;

        writer
            .write_record(["design_number", "product_name", "quantity", "size", "items"])
            .map_err(|e| e.to_string())?;

        for design in designs {
            let items = design
                .items
                .iter()
                .map(|i| i.name.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            writer
                .write_record([
                    design.design_number.as_str(),
                    design.product_name.as_str(),
                    &design.quantity.to_string(),
                    design.selected_size.as_str(),
                    items.as_str(),
                ])
                .map_err(|e| e.to_string())?;
        }

        writer.flush().map_err(|e| e.to_string())?;
        Ok(filename.to_string())
    }
}
