use std::collections::HashSet;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Observation – one cleaned row of the source CSV
// ---------------------------------------------------------------------------

/// A single cleaned record: how much of a commodity a region produced (or
/// could produce) in a given year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub commodity: String,
    pub year: i32,
    pub region: String,
    /// Free-text qualifier such as `estimated`; absent in many rows.
    pub note: Option<String>,
    pub quantity: f64,
    /// Remaining non-core columns, aligned with [`Dataset::extra_columns`].
    #[serde(skip)]
    pub extras: Vec<Option<String>>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete cleaned table
// ---------------------------------------------------------------------------

/// The full cleaned dataset with pre-computed value domains.
///
/// Never mutated after construction; shared behind an `Arc` by the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// All observations in source order.
    pub observations: Vec<Observation>,
    /// Names of the non-core columns carried in `Observation::extras`.
    pub extra_columns: Vec<String>,
    /// Whether the source had a `Note` column at all.
    pub has_note_column: bool,
    /// Distinct commodities in order of first appearance.
    pub commodities: Vec<String>,
    /// Distinct regions in order of first appearance.
    pub regions: Vec<String>,
    /// Distinct non-absent notes in order of first appearance.
    pub notes: Vec<String>,
    /// Rows discarded by the cleaner because a required value was missing.
    pub dropped_rows: usize,
}

impl Dataset {
    /// Build the value domains from the cleaned observations.
    pub fn from_observations(
        observations: Vec<Observation>,
        extra_columns: Vec<String>,
        has_note_column: bool,
        dropped_rows: usize,
    ) -> Self {
        let commodities = distinct(observations.iter().map(|o| o.commodity.as_str()));
        let regions = distinct(observations.iter().map(|o| o.region.as_str()));
        let notes = distinct(observations.iter().filter_map(|o| o.note.as_deref()));

        Dataset {
            observations,
            extra_columns,
            has_note_column,
            commodities,
            regions,
            notes,
            dropped_rows,
        }
    }

    /// Smallest and largest year present, or `None` for an empty dataset.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.observations.iter().map(|o| o.year).min()?;
        let max = self.observations.iter().map(|o| o.year).max()?;
        Some((min, max))
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
