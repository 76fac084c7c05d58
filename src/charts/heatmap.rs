use serde::Serialize;

use crate::color::{ColorScale, Rgb};
use crate::data::aggregate::Pivot;

pub const TITLE: &str = "Heatmap of Quantities by Commodity and Year";

/// Commodity × year grid coloured by summed quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapSpec {
    pub title: &'static str,
    /// Column labels (years).
    pub x_labels: Vec<String>,
    /// Row labels (commodities) in pivot order.
    pub y_labels: Vec<String>,
    /// `z[row][col]`, aligned with the labels.
    pub z: Vec<Vec<f64>>,
    pub colors: Vec<Vec<Rgb>>,
    pub color_scale: ColorScale,
    pub z_range: [f64; 2],
    /// Row 0 is drawn at the top.
    pub y_reversed: bool,
}

pub fn build(pivot: &Pivot) -> HeatmapSpec {
    let cells = pivot.values.iter().flatten().copied();
    let min = cells.clone().fold(f64::INFINITY, f64::min);
    let max = cells.fold(f64::NEG_INFINITY, f64::max);
    let z_range = if pivot.is_empty() { [0.0, 0.0] } else { [min, max] };

    let color_scale = ColorScale::Blues;
    let colors = pivot
        .values
        .iter()
        .map(|row| {
            row.iter()
                .map(|&v| color_scale.color_for(v, z_range[0], z_range[1]))
                .collect()
        })
        .collect();

    HeatmapSpec {
        title: TITLE,
        x_labels: pivot.years.iter().map(i32::to_string).collect(),
        y_labels: pivot.commodities.clone(),
        z: pivot.values.clone(),
        colors,
        color_scale,
        z_range,
        y_reversed: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pivot() -> Pivot {
        Pivot {
            commodities: vec!["Cobalt".into(), "Nickel".into()],
            years: vec![2020, 2021],
            values: vec![vec![0.0, 40.0], vec![10.0, 20.0]],
        }
    }

    #[test]
    fn mirrors_pivot_axes() {
        let spec = build(&pivot());
        assert_eq!(spec.x_labels, ["2020", "2021"]);
        assert_eq!(spec.y_labels, ["Cobalt", "Nickel"]);
        assert_eq!(spec.z[1][0], 10.0);
        assert!(spec.y_reversed);
    }

    #[test]
    fn colours_run_low_to_high() {
        let spec = build(&pivot());
        assert_eq!(spec.z_range, [0.0, 40.0]);
        assert_eq!(spec.colors[0][0], ColorScale::Blues.sample(0.0));
        assert_eq!(spec.colors[0][1], ColorScale::Blues.sample(1.0));
    }

    #[test]
    fn empty_pivot_gives_empty_grid() {
        let empty = Pivot {
            commodities: Vec::new(),
            years: Vec::new(),
            values: Vec::new(),
        };
        let spec = build(&empty);
        assert!(spec.z.is_empty());
        assert_eq!(spec.z_range, [0.0, 0.0]);
    }
}
