use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use csv::StringRecord;
use thiserror::Error;

use super::model::{Dataset, Observation};

/// Canonical names of the columns the dashboard needs.
pub const COMMODITY: &str = "Commodity";
pub const YEAR: &str = "Year";
pub const REGION: &str = "Geographic_Region";
pub const QUANTITY: &str = "Quantity";
pub const NOTE: &str = "Note";

/// Source name of the commodity column before it is renamed.
const SOURCE_COMMODITY: &str = "Mineral_Commodity";

/// Columns that carry no data for the dashboard (usage hints, citations).
const EXCLUDED_COLUMNS: [&str; 2] = ["Figure_Use", "Data_Sources"];

/// Prefix given to header-less index columns by spreadsheet exports.
const INDEX_COLUMN_PREFIX: &str = "Unnamed";

/// Cell values read as "no value" in addition to the empty string.
const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed CSV in {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("{} has no '{column}' column (found: {})", path.display(), found.join(", "))]
    MissingColumn {
        path: PathBuf,
        column: &'static str,
        found: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read and clean a CSV file into a [`Dataset`].
///
/// Cleaning steps, in order:
/// 1. empty cells and NA markers become absent
/// 2. index, usage-note and citation columns are discarded
/// 3. names are trimmed and spaces replaced with `_`
/// 4. `Mineral_Commodity` is renamed to `Commodity`
/// 5. `Year` and `Quantity` are coerced to numbers, failures become absent
/// 6. rows missing commodity, year, quantity or region are dropped
pub fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let csv_error = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(BufReader::new(file));
    let headers = reader.headers().map_err(csv_error)?.clone();
    let layout = ColumnLayout::resolve(&headers).map_err(|(column, found)| {
        LoadError::MissingColumn {
            path: path.to_path_buf(),
            column,
            found,
        }
    })?;

    let mut observations = Vec::new();
    let mut dropped_rows = 0;
    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        match layout.clean_row(&record) {
            Some(obs) => observations.push(obs),
            None => dropped_rows += 1,
        }
    }

    if dropped_rows > 0 {
        log::warn!(
            "{}: dropped {dropped_rows} rows with missing or non-numeric values",
            path.display()
        );
    }

    let extra_columns = layout.extras.into_iter().map(|(_, name)| name).collect();
    let dataset = Dataset::from_observations(
        observations,
        extra_columns,
        layout.note.is_some(),
        dropped_rows,
    );
    if dataset.is_empty() {
        log::warn!("{}: no complete rows left after cleaning", path.display());
    }
    log::info!(
        "Loaded {} observations ({} commodities, {} regions) from {}",
        dataset.len(),
        dataset.commodities.len(),
        dataset.regions.len(),
        path.display()
    );
    Ok(dataset)
}

/// Trim a header and replace each space with `_`.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().replace(' ', "_")
}

// ---------------------------------------------------------------------------
// Process-wide dataset cache
// ---------------------------------------------------------------------------

/// Parsed datasets keyed by the path they were loaded from.
///
/// Entries are never replaced or mutated, so a path is read and parsed at
/// most once per cache. Failed loads are not cached.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: Mutex<HashMap<PathBuf, Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it on first use.
    pub fn load(&self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        if let Some(dataset) = self.entries().get(path) {
            log::debug!("Dataset cache hit for {}", path.display());
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(load_csv(path)?);
        let cached = self
            .entries()
            .entry(path.to_path_buf())
            .or_insert(dataset)
            .clone();
        Ok(cached)
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<PathBuf, Arc<Dataset>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Column resolution and row cleaning
// ---------------------------------------------------------------------------

/// Field positions of the canonical columns within a CSV record.
#[derive(Debug)]
struct ColumnLayout {
    commodity: usize,
    year: usize,
    region: usize,
    quantity: usize,
    note: Option<usize>,
    extras: Vec<(usize, String)>,
}

impl ColumnLayout {
    /// Map headers to canonical columns. On failure returns the first missing
    /// column and the normalized names that were found.
    fn resolve(headers: &StringRecord) -> Result<Self, (&'static str, Vec<String>)> {
        let mut kept: Vec<(usize, String)> = Vec::new();
        for (idx, raw) in headers.iter().enumerate() {
            let mut name = normalize_column_name(raw);
            if is_discarded(raw, &name) {
                continue;
            }
            if name == SOURCE_COMMODITY {
                name = COMMODITY.to_string();
            }
            // first occurrence wins on duplicate names
            if kept.iter().any(|(_, n)| *n == name) {
                continue;
            }
            kept.push((idx, name));
        }

        let find = |column: &str| kept.iter().find(|(_, n)| n == column).map(|(i, _)| *i);
        let require = |column: &'static str| {
            find(column).ok_or_else(|| (column, kept.iter().map(|(_, n)| n.clone()).collect()))
        };

        let commodity = require(COMMODITY)?;
        let year = require(YEAR)?;
        let region = require(REGION)?;
        let quantity = require(QUANTITY)?;
        let note = find(NOTE);

        let core = [COMMODITY, YEAR, REGION, QUANTITY, NOTE];
        let extras = kept
            .iter()
            .filter(|(_, n)| !core.contains(&n.as_str()))
            .cloned()
            .collect();

        Ok(ColumnLayout {
            commodity,
            year,
            region,
            quantity,
            note,
            extras,
        })
    }

    /// Turn a record into an observation, or `None` if a required value is
    /// absent or not numeric.
    fn clean_row(&self, record: &StringRecord) -> Option<Observation> {
        let commodity = cell(record, self.commodity)?;
        let region = cell(record, self.region)?;
        let quantity = cell(record, self.quantity).and_then(parse_number)?;
        let year = cell(record, self.year).and_then(parse_year)?;
        let note = self.note.and_then(|idx| cell(record, idx));

        Some(Observation {
            commodity: commodity.to_string(),
            year,
            region: region.to_string(),
            note: note.map(str::to_string),
            quantity,
            extras: self
                .extras
                .iter()
                .map(|(idx, _)| cell(record, *idx).map(str::to_string))
                .collect(),
        })
    }
}

fn is_discarded(raw: &str, normalized: &str) -> bool {
    normalized.is_empty()
        || raw.starts_with(INDEX_COLUMN_PREFIX)
        || normalized.starts_with(INDEX_COLUMN_PREFIX)
        || EXCLUDED_COLUMNS.contains(&normalized)
}

/// A present, non-NA cell value. Short records read as absent.
fn cell(record: &StringRecord, idx: usize) -> Option<&str> {
    record
        .get(idx)
        .filter(|v| !v.is_empty() && !NA_MARKERS.contains(v))
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_year(value: &str) -> Option<i32> {
    let year = parse_number(value)?;
    let in_range = year >= f64::from(i32::MIN) && year <= f64::from(i32::MAX);
    (year.fract() == 0.0 && in_range).then_some(year as i32)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const OUTLOOK: &str = "\
,Mineral Commodity , Year,Geographic Region,Type,Quantity,Note,Figure_Use,Data Sources
0,Cobalt,2020,World,Production,100,estimated,fig 1,USGS
1,Cobalt,2021,World,Production,150,estimated,fig 1,USGS
2,Lithium,2020,Chile,Capacity,N/A,estimated,fig 2,USGS
3,Lithium,2021,Chile,Capacity,abc,,fig 2,USGS
4,Nickel,twenty,Indonesia,Production,80,,fig 3,USGS
5,,2022,World,Production,10,,fig 3,USGS
6,Nickel,2022.0,Indonesia,Production, 90 ,projected,fig 3,USGS
";

    #[test]
    fn cleans_outlook_layout() {
        let file = write_csv(OUTLOOK);
        let ds = load_csv(file.path()).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.dropped_rows, 4);
        assert_eq!(ds.extra_columns, ["Type"]);
        assert!(ds.has_note_column);

        let nickel = &ds.observations[2];
        assert_eq!(nickel.commodity, "Nickel");
        assert_eq!(nickel.year, 2022);
        assert_eq!(nickel.quantity, 90.0);
        assert_eq!(nickel.note.as_deref(), Some("projected"));
        assert_eq!(nickel.extras, [Some("Production".to_string())]);

        assert_eq!(ds.commodities, ["Cobalt", "Nickel"]);
        assert_eq!(ds.notes, ["estimated", "projected"]);
    }

    #[test]
    fn unparseable_quantity_never_survives() {
        let file = write_csv(OUTLOOK);
        let ds = load_csv(file.path()).unwrap();
        assert!(ds.observations.iter().all(|o| o.commodity != "Lithium"));
    }

    #[test]
    fn loading_twice_is_deterministic() {
        let file = write_csv(OUTLOOK);
        assert_eq!(load_csv(file.path()).unwrap(), load_csv(file.path()).unwrap());
    }

    #[test]
    fn note_column_is_optional() {
        let file = write_csv("Commodity,Year,Geographic_Region,Quantity\nCobalt,2020,World,5\n");
        let ds = load_csv(file.path()).unwrap();
        assert!(!ds.has_note_column);
        assert_eq!(ds.observations[0].note, None);
        assert!(ds.notes.is_empty());
    }

    #[test]
    fn drops_unnamed_index_columns() {
        let file = write_csv(
            "Unnamed: 0,Commodity,Year,Geographic_Region,Quantity,Unnamed: 5\n\
             0,Cobalt,2020,World,5,x\n",
        );
        let ds = load_csv(file.path()).unwrap();
        assert!(ds.extra_columns.is_empty());
        assert!(ds.observations[0].extras.is_empty());
        assert_eq!(ds.observations[0].quantity, 5.0);
    }

    #[test]
    fn all_rows_dropped_gives_empty_dataset() {
        let file = write_csv("Commodity,Year,Geographic_Region,Quantity\nCobalt,2020,World,N/A\n");
        let ds = load_csv(file.path()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.dropped_rows, 1);
        assert_eq!(ds.year_bounds(), None);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let file = write_csv("Mineral Commodity,Year,Quantity\nCobalt,2020,5\n");
        match load_csv(file.path()) {
            Err(LoadError::MissingColumn { column, found, .. }) => {
                assert_eq!(column, REGION);
                assert_eq!(found, ["Commodity", "Year", "Quantity"]);
            }
            other => panic!("expected missing column error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("absent.csv"));
    }

    #[test]
    fn cache_reads_each_path_once() {
        let file = write_csv(OUTLOOK);
        let path = file.path().to_path_buf();
        let cache = DatasetCache::new();

        let first = cache.load(&path).unwrap();
        file.close().unwrap();
        let second = cache.load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn cache_does_not_remember_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");
        let cache = DatasetCache::new();

        assert!(cache.load(&path).is_err());
        std::fs::write(&path, "Commodity,Year,Geographic_Region,Quantity\nCobalt,2020,World,5\n")
            .unwrap();
        assert_eq!(cache.load(&path).unwrap().len(), 1);
    }

    #[test]
    fn normalizes_column_names() {
        assert_eq!(normalize_column_name("  Geographic Region "), "Geographic_Region");
        assert_eq!(normalize_column_name("Data Sources"), "Data_Sources");
    }

    #[test]
    fn years_must_be_integral() {
        assert_eq!(parse_year("2020"), Some(2020));
        assert_eq!(parse_year(" 2020.0"), Some(2020));
        assert_eq!(parse_year("2020.5"), None);
        assert_eq!(parse_year("inf"), None);
        assert_eq!(parse_number("NaN"), None);
    }
}
