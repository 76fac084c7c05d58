use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::dashboard::Dashboard;
use crate::data::filter::{Selection, YearRange};
use crate::data::loader::DatasetCache;
use crate::data::model::Dataset;

/// Seconds each map frame stays on screen while playing.
pub const MAP_FRAME_SECONDS: f64 = 1.0;

// ---------------------------------------------------------------------------
// Filter columns and tabs
// ---------------------------------------------------------------------------

/// The three multi-select filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    Commodity,
    Region,
    Note,
}

impl FilterColumn {
    pub const ALL: [FilterColumn; 3] = [FilterColumn::Commodity, FilterColumn::Region, FilterColumn::Note];

    pub fn label(self) -> &'static str {
        match self {
            FilterColumn::Commodity => "Commodity",
            FilterColumn::Region => "Geographic Region",
            FilterColumn::Note => "Note",
        }
    }

    /// Every selectable value, in first-appearance order.
    pub fn domain(self, dataset: &Dataset) -> &[String] {
        match self {
            FilterColumn::Commodity => &dataset.commodities,
            FilterColumn::Region => &dataset.regions,
            FilterColumn::Note => &dataset.notes,
        }
    }

    pub fn selected(self, selection: &Selection) -> &BTreeSet<String> {
        match self {
            FilterColumn::Commodity => &selection.commodities,
            FilterColumn::Region => &selection.regions,
            FilterColumn::Note => &selection.notes,
        }
    }

    fn selected_mut(self, selection: &mut Selection) -> &mut BTreeSet<String> {
        match self {
            FilterColumn::Commodity => &mut selection.commodities,
            FilterColumn::Region => &mut selection.regions,
            FilterColumn::Note => &mut selection.notes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Map,
    Heatmap,
    Charts,
    AllPlots,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Map, Tab::Heatmap, Tab::Charts, Tab::AllPlots];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Map => "Map",
            Tab::Heatmap => "Heatmap",
            Tab::Charts => "Charts",
            Tab::AllPlots => "All Plots",
        }
    }
}

// ---------------------------------------------------------------------------
// Map animation
// ---------------------------------------------------------------------------

/// Which year frame of the map is shown and whether it is animating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapPlayback {
    pub frame: usize,
    pub playing: bool,
    last_step: Option<f64>,
}

impl MapPlayback {
    pub fn toggle(&mut self) {
        self.playing = !self.playing;
        self.last_step = None;
    }

    /// Advance to the next frame (wrapping) once a frame interval has passed
    /// since the last step. Returns whether the frame changed.
    pub fn tick(&mut self, now: f64, frames: usize) -> bool {
        if frames == 0 {
            self.frame = 0;
            return false;
        }
        self.frame = self.frame.min(frames - 1);
        if !self.playing {
            return false;
        }
        match self.last_step {
            Some(t) if now - t < MAP_FRAME_SECONDS => false,
            Some(_) => {
                self.frame = (self.frame + 1) % frames;
                self.last_step = Some(now);
                true
            }
            None => {
                self.last_step = Some(now);
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Session – one loaded file and its current view
// ---------------------------------------------------------------------------

pub struct Session {
    pub source: PathBuf,
    pub dataset: Arc<Dataset>,
    pub selection: Selection,
    /// Derived from `selection`; rebuilt by [`Session::refresh`].
    pub dashboard: Dashboard,
}

impl Session {
    pub fn new(source: PathBuf, dataset: Arc<Dataset>) -> Self {
        let selection = Selection::defaults(&dataset);
        let dashboard = Dashboard::compute(&dataset, &selection);
        Session {
            source,
            dataset,
            selection,
            dashboard,
        }
    }

    /// Re-run the pipeline for the current selection.
    pub fn refresh(&mut self) {
        self.dashboard = Dashboard::compute(&self.dataset, &self.selection);
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    cache: Arc<DatasetCache>,

    /// Loaded file (None until a load succeeds).
    pub session: Option<Session>,

    pub tab: Tab,

    pub map: MapPlayback,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(cache: Arc<DatasetCache>) -> Self {
        Self {
            cache,
            session: None,
            tab: Tab::default(),
            map: MapPlayback::default(),
            status_message: None,
        }
    }

    /// Load `path` through the cache and reset filters to their defaults.
    /// On failure the current session is kept and the error is shown.
    pub fn open(&mut self, path: &Path) -> bool {
        match self.cache.load(path) {
            Ok(dataset) => {
                self.session = Some(Session::new(path.to_path_buf(), dataset));
                self.map = MapPlayback::default();
                self.status_message = None;
                true
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                false
            }
        }
    }

    /// Replace the whole selection and recompute.
    pub fn set_selection(&mut self, selection: Selection) {
        self.update(|s| *s = selection);
    }

    /// Set the year bounds, keeping `min <= max`.
    pub fn set_years(&mut self, min: i32, max: i32) {
        self.update(|s| {
            s.years = YearRange {
                min: min.min(max),
                max: max.max(min),
            }
        });
    }

    /// Toggle a single value in a column's selection.
    pub fn toggle_filter_value(&mut self, column: FilterColumn, value: &str) {
        self.update(|s| {
            let selected = column.selected_mut(s);
            if !selected.remove(value) {
                selected.insert(value.to_string());
            }
        });
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: FilterColumn) {
        let Some(session) = &self.session else {
            return;
        };
        let all: BTreeSet<String> = column.domain(&session.dataset).iter().cloned().collect();
        self.update(|s| *column.selected_mut(s) = all);
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: FilterColumn) {
        self.update(|s| column.selected_mut(s).clear());
    }

    fn update(&mut self, change: impl FnOnce(&mut Selection)) {
        if let Some(session) = &mut self.session {
            change(&mut session.selection);
            session.refresh();
        }
    }
}
