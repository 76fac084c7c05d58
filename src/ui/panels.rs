use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, FilterColumn};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let Some(session) = &state.session else {
        ui.label("No dataset loaded.");
        return;
    };

    // Snapshot what we need so we can mutate state inside the widgets.
    let dataset = Arc::clone(&session.dataset);
    let selection = session.selection.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year range ----
            if let Some((first, last)) = dataset.year_bounds() {
                ui.strong("Year");
                let mut from = selection.years.min;
                let mut to = selection.years.max;
                let from_changed = ui
                    .add(egui::Slider::new(&mut from, first..=last).text("from"))
                    .changed();
                let to_changed = ui
                    .add(egui::Slider::new(&mut to, first..=last).text("to"))
                    .changed();
                if from_changed && from > to {
                    to = from;
                }
                if to_changed && to < from {
                    from = to;
                }
                if from_changed || to_changed {
                    state.set_years(from, to);
                }
                ui.separator();
            }

            // ---- Multi-selects (collapsible) ----
            for column in FilterColumn::ALL {
                if column == FilterColumn::Note && !dataset.has_note_column {
                    continue;
                }
                let all_values = column.domain(&dataset);
                let selected = column.selected(&selection);

                // Show count of selected / total in the header
                let header_text = format!(
                    "{}  ({}/{})",
                    column.label(),
                    selected.len(),
                    all_values.len()
                );

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(column.label())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(column);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(column);
                            }
                        });

                        for value in all_values {
                            let mut checked = selected.contains(value);
                            if ui.checkbox(&mut checked, value.as_str()).changed() {
                                state.toggle_filter_value(column, value);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{} records loaded, {} visible",
                session.dataset.len(),
                session.dashboard.metrics.records
            ));
            ui.label(RichText::new(session.source.display().to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open commodity outlook")
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        if state.open(&path) {
            log::info!("Opened {}", path.display());
        }
    }
}
