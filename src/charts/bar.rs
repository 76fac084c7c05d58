use serde::Serialize;

use crate::color::{Qualitative, Rgb};
use crate::data::aggregate::CommodityTotal;

pub const TITLE: &str = "Total Quantity by Commodity";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSpec {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub palette: Qualitative,
    /// Largest total first.
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub commodity: String,
    pub quantity: f64,
    pub color: Rgb,
}

pub fn build(totals: &[CommodityTotal]) -> BarSpec {
    let palette = Qualitative::Set2;
    BarSpec {
        title: TITLE,
        x_label: "Commodity",
        y_label: "Total Quantity",
        palette,
        bars: totals
            .iter()
            .enumerate()
            .map(|(i, t)| Bar {
                commodity: t.commodity.clone(),
                quantity: t.quantity,
                color: palette.pick(i),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_bar_per_total_in_order() {
        let totals = [
            CommodityTotal {
                commodity: "Cobalt".into(),
                quantity: 250.0,
            },
            CommodityTotal {
                commodity: "Lithium".into(),
                quantity: 50.0,
            },
        ];
        let spec = build(&totals);
        let names: Vec<&str> = spec.bars.iter().map(|b| b.commodity.as_str()).collect();
        assert_eq!(names, ["Cobalt", "Lithium"]);
        assert_ne!(spec.bars[0].color, spec.bars[1].color);
    }

    #[test]
    fn no_totals_no_bars() {
        assert!(build(&[]).bars.is_empty());
    }
}
