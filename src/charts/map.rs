use std::collections::BTreeMap;

use serde::Serialize;

use super::geo::{locate, LonLat};
use crate::color::{ColorScale, Rgb};
use crate::data::filter::FilteredSet;

pub const TITLE: &str = "Global Distribution of Mineral Quantities";

/// Choropleth-style map with one frame per year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSpec {
    pub title: &'static str,
    /// How region names are matched to boundaries.
    pub location_mode: &'static str,
    pub color_scale: ColorScale,
    /// Quantity range shared by every frame so colours are comparable.
    pub quantity_range: [f64; 2],
    /// Frames in ascending year order.
    pub frames: Vec<MapFrame>,
    /// Regions that could not be placed on the map.
    pub unmapped: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFrame {
    pub year: i32,
    pub regions: Vec<MapRegion>,
}

/// One (region, year) entry of the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRegion {
    pub region: String,
    pub position: Option<LonLat>,
    /// Summed quantity of every observation for this region and year.
    pub quantity: f64,
    /// Contributing commodities, for hover text.
    pub commodities: Vec<String>,
    pub color: Rgb,
}

pub fn build(filtered: &FilteredSet<'_>) -> MapSpec {
    let mut by_year: BTreeMap<i32, Vec<MapRegion>> = BTreeMap::new();
    for obs in filtered.iter() {
        let regions = by_year.entry(obs.year).or_default();
        let entry = match regions.iter().position(|r| r.region == obs.region) {
            Some(i) => &mut regions[i],
            None => {
                regions.push(MapRegion {
                    region: obs.region.clone(),
                    position: locate(&obs.region),
                    quantity: 0.0,
                    commodities: Vec::new(),
                    color: Rgb([0, 0, 0]),
                });
                let last = regions.len() - 1;
                &mut regions[last]
            }
        };
        entry.quantity += obs.quantity;
        if !entry.commodities.contains(&obs.commodity) {
            entry.commodities.push(obs.commodity.clone());
        }
    }

    let quantities = by_year.values().flatten().map(|r| r.quantity);
    let min = quantities.clone().fold(f64::INFINITY, f64::min);
    let max = quantities.fold(f64::NEG_INFINITY, f64::max);
    let quantity_range = if filtered.is_empty() { [0.0, 0.0] } else { [min, max] };

    let color_scale = ColorScale::Viridis;
    let mut unmapped: Vec<String> = Vec::new();
    let frames = by_year
        .into_iter()
        .map(|(year, mut regions)| {
            for r in &mut regions {
                r.color = color_scale.color_for(r.quantity, quantity_range[0], quantity_range[1]);
                if r.position.is_none() && !unmapped.contains(&r.region) {
                    unmapped.push(r.region.clone());
                }
            }
            MapFrame { year, regions }
        })
        .collect();

    if !unmapped.is_empty() {
        log::debug!("Regions without map position: {unmapped:?}");
    }

    MapSpec {
        title: TITLE,
        location_mode: "country names",
        color_scale,
        quantity_range,
        frames,
        unmapped,
    }
}
