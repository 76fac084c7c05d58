use serde::Serialize;

use crate::color::{generate_palette, Rgb};
use crate::data::filter::FilteredSet;

pub const TITLE: &str = "Quantity Trend Over Time by Commodity";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSpec {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub markers: bool,
    pub series: Vec<LineSeries>,
}

/// One commodity's raw observations as `[year, quantity]` points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub commodity: String,
    pub color: Rgb,
    pub points: Vec<[f64; 2]>,
}

/// Series follow the first appearance of each commodity; points keep the
/// row order and repeated years are not summed.
pub fn build(filtered: &FilteredSet<'_>) -> LineSpec {
    let mut series: Vec<LineSeries> = Vec::new();
    for obs in filtered.iter() {
        let point = [f64::from(obs.year), obs.quantity];
        match series.iter_mut().find(|s| s.commodity == obs.commodity) {
            Some(s) => s.points.push(point),
            None => series.push(LineSeries {
                commodity: obs.commodity.clone(),
                color: Rgb([0, 0, 0]),
                points: vec![point],
            }),
        }
    }

    let palette = generate_palette(series.len());
    for (s, color) in series.iter_mut().zip(palette) {
        s.color = color;
    }

    LineSpec {
        title: TITLE,
        x_label: "Year",
        y_label: "Quantity",
        markers: true,
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, Selection, YearRange};
    use crate::data::model::tests::obs;
    use crate::data::model::Dataset;

    #[test]
    fn plots_raw_rows_per_commodity() {
        let ds = Dataset::from_observations(
            vec![
                obs("Lithium", 2020, "World", Some("est"), 50.0),
                obs("Cobalt", 2020, "World", Some("est"), 100.0),
                obs("Cobalt", 2020, "Chile", Some("est"), 7.0),
                obs("Cobalt", 2021, "World", Some("est"), 150.0),
            ],
            Vec::new(),
            true,
            0,
        );
        let selection = Selection {
            years: YearRange { min: 2020, max: 2021 },
            commodities: ds.commodities.iter().cloned().collect(),
            regions: ds.regions.iter().cloned().collect(),
            notes: ds.notes.iter().cloned().collect(),
        };
        let spec = build(&filter(&ds, &selection));

        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.series[0].commodity, "Lithium");
        assert_eq!(
            spec.series[1].points,
            [[2020.0, 100.0], [2020.0, 7.0], [2021.0, 150.0]]
        );
        assert!(spec.markers);
        assert_ne!(spec.series[0].color, spec.series[1].color);
    }
}
