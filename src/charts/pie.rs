use serde::Serialize;

use crate::color::{Qualitative, Rgb};
use crate::data::aggregate::CommodityTotal;

pub const TITLE: &str = "Proportion of Quantity by Commodity";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSpec {
    pub title: &'static str,
    pub palette: Qualitative,
    pub total: f64,
    pub slices: Vec<Slice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub commodity: String,
    pub quantity: f64,
    /// Share of `PieSpec::total`, 0 when the total is 0.
    pub fraction: f64,
    pub color: Rgb,
}

pub fn build(totals: &[CommodityTotal]) -> PieSpec {
    let palette = Qualitative::Set3;
    let total: f64 = totals.iter().map(|t| t.quantity).sum();
    let slices = totals
        .iter()
        .enumerate()
        .map(|(i, t)| Slice {
            commodity: t.commodity.clone(),
            quantity: t.quantity,
            fraction: if total == 0.0 { 0.0 } else { t.quantity / total },
            color: palette.pick(i),
        })
        .collect();

    PieSpec {
        title: TITLE,
        palette,
        total,
        slices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_sum_to_one() {
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
        assert_eq!(spec.total, 300.0);
        let sum: f64 = spec.slices.iter().map(|s| s.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!((spec.slices[1].fraction - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn no_totals_no_slices() {
        let spec = build(&[]);
        assert!(spec.slices.is_empty());
        assert_eq!(spec.total, 0.0);
    }
}
