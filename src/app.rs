use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::charts::ChartSet;
use crate::state::{AppState, MapPlayback, Tab};
use crate::ui::{charts, overview, panels};

const TITLE: &str = "Rare Earth Minerals Outlook Dashboard";
const INTRO: &str = "Explore production and capacity trends for critical mineral commodities through 2029.";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct OutlookApp {
    pub state: AppState,
}

impl OutlookApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for OutlookApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, raw data, charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &mut self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading(TITLE);
    ui.label(INTRO);
    ui.add_space(6.0);

    let Some(session) = &state.session else {
        ui.centered_and_justified(|ui: &mut Ui| {
            match &state.status_message {
                Some(msg) => ui.label(RichText::new(msg).heading().color(egui::Color32::RED)),
                None => ui.heading("Open a file to explore the outlook  (File → Open…)"),
            };
        });
        return;
    };

    ui.label(format!(
        "Filtered data contains {} records.",
        session.dashboard.metrics.records
    ));
    ui.add_space(4.0);
    overview::metrics_strip(ui, &session.dashboard.metrics);
    ui.add_space(4.0);
    overview::raw_data(ui, &session.dataset);
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            if ui.selectable_label(state.tab == tab, tab.label()).clicked() {
                state.tab = tab;
            }
        }
    });
    ui.separator();

    let Some(session) = &state.session else {
        return;
    };
    let set = &session.dashboard.charts;
    let playback = &mut state.map;
    match state.tab {
        Tab::Map => {
            ui.heading("Map");
            charts::map_view(ui, "map_tab", &set.map, playback);
        }
        Tab::Heatmap => {
            ui.heading("Heatmap");
            charts::heatmap_view(ui, "heatmap_tab", &set.heatmap);
        }
        Tab::Charts => {
            ui.heading("Charts");
            charts::bar_view(ui, "bar_tab", &set.bar);
            charts::pie_view(ui, "pie_tab", &set.pie);
            charts::line_view(ui, "line_tab", &set.line);
        }
        Tab::AllPlots => all_plots(ui, set, playback),
    }
}

/// Every chart again, one after another.
fn all_plots(ui: &mut Ui, set: &ChartSet, playback: &mut MapPlayback) {
    ui.heading("All Plots");

    ui.label(RichText::new("Global Distribution Map").strong().size(18.0));
    charts::map_view(ui, "map_all", &set.map, playback);
    ui.separator();
    charts::heatmap_view(ui, "heatmap_all", &set.heatmap);
    ui.separator();
    charts::bar_view(ui, "bar_all", &set.bar);
    ui.separator();
    charts::pie_view(ui, "pie_all", &set.pie);
    ui.separator();
    charts::line_view(ui, "line_all", &set.line);
}
