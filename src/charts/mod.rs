/// Chart builders: pure functions from the filtered rows or their aggregates
/// to serializable chart specifications (data arrays plus encodings).
///
/// The specs know nothing about egui; `ui::charts` draws them and the
/// headless export writes them out as JSON.
pub mod bar;
pub mod geo;
pub mod heatmap;
pub mod line;
pub mod map;
pub mod pie;

use serde::Serialize;

use crate::data::aggregate::{CommodityTotal, Pivot};
use crate::data::filter::FilteredSet;

pub use bar::BarSpec;
pub use heatmap::HeatmapSpec;
pub use line::LineSpec;
pub use map::MapSpec;
pub use pie::PieSpec;

/// The five chart views of one dashboard state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub map: MapSpec,
    pub heatmap: HeatmapSpec,
    pub bar: BarSpec,
    pub pie: PieSpec,
    pub line: LineSpec,
}

impl ChartSet {
    pub fn build(filtered: &FilteredSet<'_>, pivot: &Pivot, totals: &[CommodityTotal]) -> Self {
        ChartSet {
            map: map::build(filtered),
            heatmap: heatmap::build(pivot),
            bar: bar::build(totals),
            pie: pie::build(totals),
            line: line::build(filtered),
        }
    }
}
