use std::collections::BTreeSet;

use serde::Serialize;

use super::model::{Dataset, Observation};

/// Commodity, region and note preselected on first render when present.
pub const DEFAULT_COMMODITY: &str = "Cobalt";
pub const DEFAULT_REGION: &str = "World";
pub const DEFAULT_NOTE: &str = "estimated";

// ---------------------------------------------------------------------------
// Selection – the four filter predicates
// ---------------------------------------------------------------------------

/// Inclusive year interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

/// Current filter selections. An empty set selects nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub years: YearRange,
    pub commodities: BTreeSet<String>,
    pub regions: BTreeSet<String>,
    pub notes: BTreeSet<String>,
}

impl Selection {
    /// Selections shown on first render: full year span, and the preferred
    /// commodity/region/note when present, otherwise every value.
    pub fn defaults(dataset: &Dataset) -> Self {
        let (min, max) = dataset.year_bounds().unwrap_or((0, 0));
        Selection {
            years: YearRange { min, max },
            commodities: preferred_or_all(&dataset.commodities, DEFAULT_COMMODITY),
            regions: preferred_or_all(&dataset.regions, DEFAULT_REGION),
            notes: preferred_or_all(&dataset.notes, DEFAULT_NOTE),
        }
    }

    /// Whether an observation passes every predicate.
    ///
    /// `check_note` is false for datasets without a note column, where the
    /// note predicate does not apply.
    pub fn matches(&self, obs: &Observation, check_note: bool) -> bool {
        self.years.contains(obs.year)
            && self.commodities.contains(&obs.commodity)
            && self.regions.contains(&obs.region)
            && (!check_note
                || obs
                    .note
                    .as_ref()
                    .is_some_and(|note| self.notes.contains(note)))
    }
}

fn preferred_or_all(domain: &[String], preferred: &str) -> BTreeSet<String> {
    if domain.iter().any(|v| v == preferred) {
        BTreeSet::from([preferred.to_string()])
    } else {
        domain.iter().cloned().collect()
    }
}

// ---------------------------------------------------------------------------
// FilteredSet – the matching subsequence
// ---------------------------------------------------------------------------

/// Observations passing a [`Selection`], in source order.
#[derive(Debug, Clone)]
pub struct FilteredSet<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredSet<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Observation> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.observations[i])
    }

    /// Positions of the matching observations within the dataset.
    #[cfg(test)]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Apply all four predicates as one conjunctive filter.
pub fn filter<'a>(dataset: &'a Dataset, selection: &Selection) -> FilteredSet<'a> {
    let indices = dataset
        .observations
        .iter()
        .enumerate()
        .filter(|(_, obs)| selection.matches(obs, dataset.has_note_column))
        .map(|(i, _)| i)
        .collect();
    FilteredSet { dataset, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{obs, sample_dataset};

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn full_selection() -> Selection {
        Selection {
            years: YearRange { min: 2020, max: 2021 },
            commodities: set(&["Cobalt", "Lithium"]),
            regions: set(&["World"]),
            notes: set(&["est"]),
        }
    }

    #[test]
    fn all_rows_pass_matching_selection() {
        let ds = sample_dataset();
        let filtered = filter(&ds, &full_selection());
        assert_eq!(filtered.indices(), [0, 1, 2]);
    }

    #[test]
    fn empty_set_selects_nothing() {
        let ds = sample_dataset();
        let selection = Selection {
            commodities: BTreeSet::new(),
            ..full_selection()
        };
        assert!(filter(&ds, &selection).is_empty());
    }

    #[test]
    fn year_range_is_inclusive_and_order_is_kept() {
        let ds = Dataset::from_observations(
            vec![
                obs("Cobalt", 2021, "World", Some("est"), 1.0),
                obs("Cobalt", 2019, "World", Some("est"), 2.0),
                obs("Cobalt", 2020, "World", Some("est"), 3.0),
                obs("Cobalt", 2022, "World", Some("est"), 4.0),
            ],
            Vec::new(),
            true,
            0,
        );
        let filtered = filter(&ds, &full_selection());
        let years: Vec<i32> = filtered.iter().map(|o| o.year).collect();
        assert_eq!(years, [2021, 2020]);
    }

    #[test]
    fn absent_note_never_matches() {
        let ds = Dataset::from_observations(
            vec![
                obs("Cobalt", 2020, "World", None, 1.0),
                obs("Cobalt", 2020, "World", Some("est"), 2.0),
            ],
            Vec::new(),
            true,
            0,
        );
        assert_eq!(filter(&ds, &full_selection()).indices(), [1]);
    }

    #[test]
    fn note_predicate_is_skipped_without_note_column() {
        let ds = Dataset::from_observations(
            vec![obs("Cobalt", 2020, "World", None, 1.0)],
            Vec::new(),
            false,
            0,
        );
        let selection = Selection::defaults(&ds);
        assert!(selection.notes.is_empty());
        assert_eq!(filter(&ds, &selection).len(), 1);
    }

    #[test]
    fn every_member_satisfies_the_selection() {
        let ds = Dataset::from_observations(
            vec![
                obs("Cobalt", 2020, "World", Some("est"), 1.0),
                obs("Cobalt", 2020, "Chile", Some("est"), 2.0),
                obs("Nickel", 2021, "World", Some("proj"), 3.0),
                obs("Lithium", 2024, "World", Some("est"), 4.0),
            ],
            Vec::new(),
            true,
            0,
        );
        let selection = full_selection();
        let filtered = filter(&ds, &selection);
        assert!(filtered.len() <= ds.len());
        assert_eq!(filtered.len(), 1);
        assert!(filtered.iter().all(|o| selection.matches(o, true)));
    }

    #[test]
    fn defaults_prefer_named_values() {
        let ds = Dataset::from_observations(
            vec![
                obs("Cobalt", 2018, "World", Some("estimated"), 1.0),
                obs("Lithium", 2029, "Chile", Some("projected"), 2.0),
            ],
            Vec::new(),
            true,
            0,
        );
        let selection = Selection::defaults(&ds);
        assert_eq!(selection.years, YearRange { min: 2018, max: 2029 });
        assert_eq!(selection.commodities, set(&["Cobalt"]));
        assert_eq!(selection.regions, set(&["World"]));
        assert_eq!(selection.notes, set(&["estimated"]));
    }

    #[test]
    fn defaults_fall_back_to_every_value() {
        let ds = sample_dataset();
        let selection = Selection::defaults(&ds);
        assert_eq!(selection.commodities, set(&["Cobalt"]));
        assert_eq!(selection.notes, set(&["est"]));

        let ds = Dataset::from_observations(
            vec![
                obs("Nickel", 2020, "Chile", Some("a"), 1.0),
                obs("Lithium", 2021, "Peru", None, 2.0),
            ],
            Vec::new(),
            true,
            0,
        );
        let selection = Selection::defaults(&ds);
        assert_eq!(selection.commodities, set(&["Lithium", "Nickel"]));
        assert_eq!(selection.regions, set(&["Chile", "Peru"]));
        assert_eq!(selection.notes, set(&["a"]));
    }
}
