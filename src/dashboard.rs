use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::charts::ChartSet;
use crate::data::aggregate::{commodity_totals, CommodityTotal, Metrics, Pivot};
use crate::data::filter::{filter, Selection};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Dashboard – everything derived from one selection
// ---------------------------------------------------------------------------

/// Result of one filter → aggregate → chart pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub selection: Selection,
    pub metrics: Metrics,
    pub pivot: Pivot,
    pub totals: Vec<CommodityTotal>,
    pub charts: ChartSet,
}

impl Dashboard {
    pub fn compute(dataset: &Dataset, selection: &Selection) -> Self {
        let filtered = filter(dataset, selection);
        let pivot = Pivot::from_filtered(&filtered);
        let totals = commodity_totals(&filtered);
        let charts = ChartSet::build(&filtered, &pivot, &totals);
        log::debug!(
            "Recomputed dashboard: {} of {} records selected",
            filtered.len(),
            dataset.len()
        );

        Dashboard {
            selection: selection.clone(),
            metrics: Metrics::from_filtered(&filtered),
            pivot,
            totals,
            charts,
        }
    }
}

// ---------------------------------------------------------------------------
// Headless JSON export
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct Report<'a> {
    source: String,
    dataset_records: usize,
    dropped_rows: usize,
    #[serde(flatten)]
    dashboard: &'a Dashboard,
}

/// Write the dashboard as pretty-printed JSON.
pub fn write_report<W: Write>(
    mut writer: W,
    source: &Path,
    dataset: &Dataset,
    dashboard: &Dashboard,
) -> Result<()> {
    let report = Report {
        source: source.display().to_string(),
        dataset_records: dataset.len(),
        dropped_rows: dataset.dropped_rows,
        dashboard,
    };
    serde_json::to_writer_pretty(&mut writer, &report).context("serializing report")?;
    writeln!(writer).context("writing report")?;
    writer.flush().context("flushing report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use serde_json::Value;

    use super::*;
    use crate::data::filter::YearRange;
    use crate::data::model::tests::sample_dataset;

    fn scenario_selection() -> Selection {
        Selection {
            years: YearRange { min: 2020, max: 2021 },
            commodities: BTreeSet::from(["Cobalt".to_string(), "Lithium".to_string()]),
            regions: BTreeSet::from(["World".to_string()]),
            notes: BTreeSet::from(["est".to_string()]),
        }
    }

    #[test]
    fn full_pipeline_scenario() {
        let ds = sample_dataset();
        let dash = Dashboard::compute(&ds, &scenario_selection());

        assert_eq!(dash.metrics.records, 3);
        assert_eq!(dash.metrics.total_quantity, 300.0);
        assert_eq!(dash.metrics.commodity_count, 2);
        assert_eq!(dash.metrics.latest_year, Some(2021));
        assert_eq!(dash.charts.bar.bars.len(), 2);
        assert_eq!(dash.charts.pie.slices.len(), 2);
        assert_eq!(dash.charts.heatmap.y_labels, ["Cobalt", "Lithium"]);
    }

    #[test]
    fn empty_selection_renders_empty_charts() {
        let ds = sample_dataset();
        let selection = Selection {
            commodities: BTreeSet::new(),
            ..scenario_selection()
        };
        let dash = Dashboard::compute(&ds, &selection);

        assert_eq!(dash.metrics.records, 0);
        assert_eq!(dash.metrics.total_quantity, 0.0);
        assert!(dash.charts.bar.bars.is_empty());
        assert!(dash.charts.pie.slices.is_empty());
        assert!(dash.charts.line.series.is_empty());
        assert!(dash.charts.map.frames.is_empty());
    }

    #[test]
    fn compute_is_idempotent() {
        let ds = sample_dataset();
        let selection = scenario_selection();
        assert_eq!(
            Dashboard::compute(&ds, &selection),
            Dashboard::compute(&ds, &selection)
        );
    }

    #[test]
    fn report_contains_metrics_and_charts() {
        let ds = sample_dataset();
        let dash = Dashboard::compute(&ds, &scenario_selection());
        let mut out = Vec::new();
        write_report(&mut out, Path::new("outlook.csv"), &ds, &dash).unwrap();

        let json: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["source"], "outlook.csv");
        assert_eq!(json["dataset_records"], 3);
        assert_eq!(json["metrics"]["total_quantity"], 300.0);
        assert_eq!(json["metrics"]["latest_year"], 2021);
        assert_eq!(json["charts"]["bar"]["bars"][0]["commodity"], "Cobalt");
        assert_eq!(json["charts"]["heatmap"]["color_scale"], "blues");
        assert_eq!(json["metrics"]["records"], 3);
    }
}
