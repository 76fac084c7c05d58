use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

use super::filter::FilteredSet;

// ---------------------------------------------------------------------------
// Pivot – commodity × year table of summed quantities
// ---------------------------------------------------------------------------

/// Dense commodity × year table. Both axes are sorted ascending and cells
/// without observations hold 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pivot {
    pub commodities: Vec<String>,
    pub years: Vec<i32>,
    /// `values[row][col]` for `commodities[row]` and `years[col]`.
    pub values: Vec<Vec<f64>>,
}

impl Pivot {
    pub fn from_filtered(filtered: &FilteredSet<'_>) -> Self {
        let mut sums: BTreeMap<(&str, i32), f64> = BTreeMap::new();
        let mut years = BTreeSet::new();
        for obs in filtered.iter() {
            *sums.entry((obs.commodity.as_str(), obs.year)).or_default() += obs.quantity;
            years.insert(obs.year);
        }

        let commodities: Vec<String> = sums
            .keys()
            .map(|(c, _)| *c)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        let years: Vec<i32> = years.into_iter().collect();
        let values = commodities
            .iter()
            .map(|c| {
                years
                    .iter()
                    .map(|&y| sums.get(&(c.as_str(), y)).copied().unwrap_or(0.0))
                    .collect()
            })
            .collect();

        Pivot {
            commodities,
            years,
            values,
        }
    }

    /// Cell value, or `None` when the commodity or year is not on an axis.
    #[cfg(test)]
    pub fn get(&self, commodity: &str, year: i32) -> Option<f64> {
        let row = self.commodities.iter().position(|c| c == commodity)?;
        let col = self.years.iter().position(|&y| y == year)?;
        Some(self.values[row][col])
    }

    pub fn is_empty(&self) -> bool {
        self.commodities.is_empty()
    }
}

// ---------------------------------------------------------------------------
// CommodityTotal – per-commodity sums, largest first
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommodityTotal {
    pub commodity: String,
    pub quantity: f64,
}

/// Sum quantity per commodity and order by descending total.
///
/// Groups are formed in ascending commodity order and sorted stably, so
/// equal totals stay alphabetical.
pub fn commodity_totals(filtered: &FilteredSet<'_>) -> Vec<CommodityTotal> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for obs in filtered.iter() {
        *sums.entry(obs.commodity.as_str()).or_default() += obs.quantity;
    }

    let mut totals: Vec<CommodityTotal> = sums
        .into_iter()
        .map(|(commodity, quantity)| CommodityTotal {
            commodity: commodity.to_string(),
            quantity,
        })
        .collect();
    totals.sort_by(|a, b| b.quantity.total_cmp(&a.quantity));
    totals
}

// ---------------------------------------------------------------------------
// Metrics strip
// ---------------------------------------------------------------------------

/// Headline numbers shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub records: usize,
    pub total_quantity: f64,
    pub commodity_count: usize,
    /// `None` when nothing passes the filters.
    pub latest_year: Option<i32>,
}

impl Metrics {
    pub fn from_filtered(filtered: &FilteredSet<'_>) -> Self {
        let commodities: HashSet<&str> = filtered.iter().map(|o| o.commodity.as_str()).collect();
        Metrics {
            records: filtered.len(),
            total_quantity: filtered.iter().map(|o| o.quantity).sum(),
            commodity_count: commodities.len(),
            latest_year: filtered.iter().map(|o| o.year).max(),
        }
    }
}
