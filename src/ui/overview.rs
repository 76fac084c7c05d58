use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::Metrics;
use crate::data::model::{Dataset, Observation};
use crate::ui::charts::format_number;

// ---------------------------------------------------------------------------
// Metrics strip
// ---------------------------------------------------------------------------

pub fn metrics_strip(ui: &mut Ui, metrics: &Metrics) {
    let latest = metrics
        .latest_year
        .map_or_else(|| "—".to_string(), |y| y.to_string());
    let entries = [
        ("Total Quantity", format_number(metrics.total_quantity)),
        ("Number of Commodities", metrics.commodity_count.to_string()),
        ("Most Recent Year", latest),
    ];

    ui.columns(entries.len(), |columns: &mut [Ui]| {
        for (col, (label, value)) in columns.iter_mut().zip(entries) {
            col.label(RichText::new(label).weak());
            col.label(RichText::new(value).size(28.0).strong());
        }
    });
}

// ---------------------------------------------------------------------------
// Raw data table
// ---------------------------------------------------------------------------

/// Collapsible table of the complete, unfiltered dataset.
pub fn raw_data(ui: &mut Ui, dataset: &Dataset) {
    egui::CollapsingHeader::new("View raw data")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            let mut headers = vec!["Commodity", "Year", "Geographic Region", "Quantity", "Note"];
            headers.extend(dataset.extra_columns.iter().map(String::as_str));

            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(320.0)
                .columns(Column::auto().at_least(70.0), headers.len())
                .header(20.0, |mut header| {
                    for name in &headers {
                        header.col(|ui: &mut Ui| {
                            ui.strong(*name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, dataset.len(), |mut row| {
                        let obs = &dataset.observations[row.index()];
                        for cell in row_cells(obs) {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell.as_str());
                            });
                        }
                    });
                });
        });
}

fn row_cells(obs: &Observation) -> Vec<String> {
    let mut cells = vec![
        obs.commodity.clone(),
        obs.year.to_string(),
        obs.region.clone(),
        obs.quantity.to_string(),
        obs.note.clone().unwrap_or_default(),
    ];
    cells.extend(obs.extras.iter().map(|v| v.clone().unwrap_or_default()));
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_align_with_extra_columns() {
        let obs = Observation {
            commodity: "Cobalt".into(),
            year: 2024,
            region: "World".into(),
            note: None,
            quantity: 1.5,
            extras: vec![Some("Production".into()), None],
        };
        assert_eq!(
            row_cells(&obs),
            ["Cobalt", "2024", "World", "1.5", "", "Production", ""]
        );
    }
}
