use std::path::PathBuf;

use clap::{Parser, ValueHint};

use crate::data::filter::Selection;

/// Dataset shipped alongside the dashboard.
pub const DEFAULT_CSV: &str = "rare_earths_outlook_to_2029.csv";

#[derive(Parser, Debug)]
#[command(author, version, about = "Mineral commodity outlook dashboard", long_about = None)]
pub struct Cli {
    /// Outlook CSV to load
    #[arg(default_value = DEFAULT_CSV, value_hint = ValueHint::FilePath)]
    pub csv: PathBuf,

    /// Write the dashboard as JSON to this path (`-` for stdout) instead of opening a window
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Overrides for the initial filter selection.
#[derive(clap::Args, Debug, Default)]
pub struct FilterArgs {
    /// First year to include
    #[arg(long)]
    pub year_from: Option<i32>,

    /// Last year to include
    #[arg(long)]
    pub year_to: Option<i32>,

    /// Commodity to include (repeatable)
    #[arg(long = "commodity")]
    pub commodities: Vec<String>,

    /// Geographic region to include (repeatable)
    #[arg(long = "region")]
    pub regions: Vec<String>,

    /// Note to include (repeatable)
    #[arg(long = "note")]
    pub notes: Vec<String>,
}

impl FilterArgs {
    /// Replace the parts of `selection` given on the command line.
    pub fn apply(&self, mut selection: Selection) -> Selection {
        if let Some(min) = self.year_from {
            selection.years.min = min;
        }
        if let Some(max) = self.year_to {
            selection.years.max = max;
        }
        if !self.commodities.is_empty() {
            selection.commodities = self.commodities.iter().cloned().collect();
        }
        if !self.regions.is_empty() {
            selection.regions = self.regions.iter().cloned().collect();
        }
        if !self.notes.is_empty() {
            selection.notes = self.notes.iter().cloned().collect();
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::data::model::tests::sample_dataset;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_bundled_csv() {
        let cli = Cli::parse_from(["mineral-outlook"]);
        assert_eq!(cli.csv, PathBuf::from(DEFAULT_CSV));
        assert!(cli.export.is_none());
    }

    #[test]
    fn overrides_replace_only_given_parts() {
        let cli = Cli::parse_from([
            "mineral-outlook",
            "data.csv",
            "--export",
            "-",
            "--year-to",
            "2020",
            "--commodity",
            "Cobalt",
            "--commodity",
            "Lithium",
        ]);
        let defaults = Selection::defaults(&sample_dataset());
        let selection = cli.filters.apply(defaults.clone());

        assert_eq!(selection.years.min, 2020);
        assert_eq!(selection.years.max, 2020);
        assert_eq!(selection.commodities.len(), 2);
        assert_eq!(selection.regions, defaults.regions);
        assert_eq!(cli.export, Some(PathBuf::from("-")));
    }
}
