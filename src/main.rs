mod app;
mod charts;
mod cli;
mod color;
mod dashboard;
mod data;
mod state;
mod ui;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use app::OutlookApp;
use clap::Parser;
use cli::Cli;
use dashboard::{write_report, Dashboard};
use data::filter::Selection;
use data::loader::DatasetCache;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let cache = Arc::new(DatasetCache::new());

    if let Some(target) = &cli.export {
        return export(&cli, &cache, target);
    }

    let mut state = AppState::new(Arc::clone(&cache));
    if state.open(&cli.csv) {
        if let Some(session) = &state.session {
            let selection = cli.filters.apply(session.selection.clone());
            state.set_selection(selection);
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rare Earth Minerals Outlook Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(OutlookApp::new(state)))),
    )
    .map_err(|e| anyhow!("running dashboard window: {e}"))
}

/// Run the pipeline once and write the JSON report instead of opening a window.
fn export(cli: &Cli, cache: &DatasetCache, target: &Path) -> Result<()> {
    let dataset = cache
        .load(&cli.csv)
        .with_context(|| format!("loading {}", cli.csv.display()))?;
    let selection = cli.filters.apply(Selection::defaults(&dataset));
    let dashboard = Dashboard::compute(&dataset, &selection);

    if target == Path::new("-") {
        write_report(io::stdout().lock(), &cli.csv, &dataset, &dashboard)?;
    } else {
        let file = File::create(target)
            .with_context(|| format!("creating {}", target.display()))?;
        write_report(BufWriter::new(file), &cli.csv, &dataset, &dashboard)?;
        log::info!("Wrote dashboard report to {}", target.display());
    }
    Ok(())
}
