use std::f64::consts::{FRAC_PI_2, TAU};
use std::time::Duration;

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};
use num_format::{Locale, ToFormattedString};

use crate::charts::{BarSpec, HeatmapSpec, LineSpec, MapSpec, PieSpec};
use crate::color::ColorScale;
use crate::state::MapPlayback;

const CHART_HEIGHT: f32 = 420.0;

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// Render the map frame selected by `playback`, with year stepping controls.
pub fn map_view(ui: &mut Ui, id: &str, spec: &MapSpec, playback: &mut MapPlayback) {
    ui.strong(spec.title);
    if spec.frames.is_empty() {
        empty_notice(ui);
        return;
    }

    let now = ui.input(|i| i.time);
    playback.tick(now, spec.frames.len());
    if playback.playing {
        ui.ctx().request_repaint_after(Duration::from_millis(100));
    }

    ui.horizontal(|ui: &mut Ui| {
        let label = if playback.playing { "⏸ Pause" } else { "▶ Play" };
        if ui.button(label).clicked() {
            playback.toggle();
        }
        let last = spec.frames.len() - 1;
        ui.add(egui::Slider::new(&mut playback.frame, 0..=last).show_value(false));
        ui.label(format!("Year {}", spec.frames[playback.frame].year));
    });

    let frame = &spec.frames[playback.frame];
    Plot::new(id)
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-60.0)
        .include_y(85.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .show(ui, |plot_ui| {
            for region in &frame.regions {
                let Some(pos) = region.position else {
                    continue;
                };
                let color: Color32 = region.color.into();
                let hover = format!(
                    "{}: {} ({})",
                    region.region,
                    format_number(region.quantity),
                    region.commodities.join(", ")
                );
                plot_ui.points(
                    Points::new(PlotPoints::new(vec![[pos.lon, pos.lat]]))
                        .name(hover)
                        .color(color)
                        .radius(9.0)
                        .shape(MarkerShape::Circle),
                );
                plot_ui.text(Text::new(
                    PlotPoint::new(pos.lon, pos.lat - 6.0),
                    RichText::new(&region.region).small(),
                ));
            }
        });

    color_bar(ui, spec.color_scale, spec.quantity_range[0], spec.quantity_range[1]);
    if !spec.unmapped.is_empty() {
        ui.label(
            RichText::new(format!("Not shown on map: {}", spec.unmapped.join(", ")))
                .italics()
                .weak(),
        );
    }
}

// ---------------------------------------------------------------------------
// Heatmap
// ---------------------------------------------------------------------------

pub fn heatmap_view(ui: &mut Ui, id: &str, spec: &HeatmapSpec) {
    ui.strong(spec.title);
    if spec.z.is_empty() {
        empty_notice(ui);
        return;
    }

    let rows = spec.y_labels.len();
    let row_y = move |row: usize| -> f64 {
        if spec.y_reversed {
            (rows - 1 - row) as f64
        } else {
            row as f64
        }
    };
    let x_labels = spec.x_labels.clone();
    let y_labels = spec.y_labels.clone();
    let hover_x = spec.x_labels.clone();
    let hover_y = spec.y_labels.clone();
    let hover_z = spec.z.clone();
    let reversed = spec.y_reversed;

    Plot::new(id)
        .height(CHART_HEIGHT)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_label("Year")
        .y_axis_label("Commodity")
        .x_axis_formatter(move |mark, _range| label_at(&x_labels, mark.value))
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if idx < 0.0 || idx as usize >= rows {
                return String::new();
            }
            let row = if reversed { rows - 1 - idx as usize } else { idx as usize };
            y_labels[row].clone()
        })
        .label_formatter(move |_name, value| {
            let col = value.x.round();
            let idx = value.y.round();
            if col < 0.0 || idx < 0.0 || idx as usize >= rows || col as usize >= hover_x.len() {
                return String::new();
            }
            let row = if reversed { rows - 1 - idx as usize } else { idx as usize };
            let col = col as usize;
            format!(
                "{} · {}\nQuantity: {}",
                hover_y[row],
                hover_x[col],
                format_number(hover_z[row][col])
            )
        })
        .show(ui, |plot_ui| {
            for (row, cells) in spec.colors.iter().enumerate() {
                let y = row_y(row);
                for (col, color) in cells.iter().enumerate() {
                    let x = col as f64;
                    let fill: Color32 = (*color).into();
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(vec![
                            [x - 0.5, y - 0.5],
                            [x + 0.5, y - 0.5],
                            [x + 0.5, y + 0.5],
                            [x - 0.5, y + 0.5],
                        ]))
                        .fill_color(fill)
                        .stroke(Stroke::new(0.5, Color32::WHITE)),
                    );
                }
            }
        });

    color_bar(ui, spec.color_scale, spec.z_range[0], spec.z_range[1]);
}

// ---------------------------------------------------------------------------
// Bar / Pie / Line
// ---------------------------------------------------------------------------

pub fn bar_view(ui: &mut Ui, id: &str, spec: &BarSpec) {
    ui.strong(spec.title);
    if spec.bars.is_empty() {
        empty_notice(ui);
        return;
    }

    let names: Vec<String> = spec.bars.iter().map(|b| b.commodity.clone()).collect();
    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .include_y(0.0)
        .x_axis_label(spec.x_label)
        .y_axis_label(spec.y_label)
        .x_axis_formatter(move |mark, _range| label_at(&names, mark.value))
        .show(ui, |plot_ui| {
            for (i, bar) in spec.bars.iter().enumerate() {
                let color: Color32 = bar.color.into();
                let chart = BarChart::new(vec![Bar::new(i as f64, bar.quantity)
                    .name(&bar.commodity)
                    .fill(color)
                    .width(0.7)])
                .name(&bar.commodity)
                .color(color);
                plot_ui.bar_chart(chart);
            }
        });
}

pub fn pie_view(ui: &mut Ui, id: &str, spec: &PieSpec) {
    ui.strong(spec.title);
    if spec.slices.is_empty() || spec.total == 0.0 {
        empty_notice(ui);
        return;
    }

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes([false, false])
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            // Slices run clockwise from twelve o'clock.
            let mut start = FRAC_PI_2;
            for slice in &spec.slices {
                let sweep = slice.fraction * TAU;
                let color: Color32 = slice.color.into();
                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(wedge(start, sweep)))
                        .name(format!("{} ({:.1}%)", slice.commodity, slice.fraction * 100.0))
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );
                start -= sweep;
            }
        });
}

pub fn line_view(ui: &mut Ui, id: &str, spec: &LineSpec) {
    ui.strong(spec.title);
    if spec.series.is_empty() {
        empty_notice(ui);
        return;
    }

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(spec.x_label)
        .y_axis_label(spec.y_label)
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for series in &spec.series {
                let color: Color32 = series.color.into();
                plot_ui.line(
                    Line::new(PlotPoints::new(series.points.clone()))
                        .name(&series.commodity)
                        .color(color)
                        .width(2.0),
                );
                if spec.markers {
                    plot_ui.points(
                        Points::new(PlotPoints::new(series.points.clone()))
                            .name(&series.commodity)
                            .color(color)
                            .radius(3.5)
                            .shape(MarkerShape::Circle),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Format a quantity with thousands separators and no decimals.
pub fn format_number(value: f64) -> String {
    (value.round() as i64).to_formatted_string(&Locale::en)
}

/// Category label for an axis tick; blank between categories.
fn label_at(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Outline of a pie wedge starting at angle `start` and sweeping clockwise.
fn wedge(start: f64, sweep: f64) -> Vec<[f64; 2]> {
    let steps = ((sweep / TAU) * 96.0).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let angle = start - sweep * i as f64 / steps as f64;
        points.push([angle.cos(), angle.sin()]);
    }
    points
}

/// Horizontal legend for a continuous colour scale.
fn color_bar(ui: &mut Ui, scale: ColorScale, min: f64, max: f64) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format_number(min));
        let (rect, _) = ui.allocate_exact_size(egui::vec2(240.0, 12.0), egui::Sense::hover());
        let steps = 48;
        let width = rect.width() / steps as f32;
        for i in 0..steps {
            let t = i as f64 / (steps - 1) as f64;
            let x = rect.left() + width * i as f32;
            let cell = egui::Rect::from_min_size(egui::pos2(x, rect.top()), egui::vec2(width + 0.5, rect.height()));
            ui.painter().rect_filled(cell, 0.0, Color32::from(scale.sample(t)));
        }
        ui.label(format_number(max));
        ui.label(RichText::new("Quantity").weak());
    });
}

fn empty_notice(ui: &mut Ui) {
    ui.label(RichText::new("No data for the current filters.").italics().weak());
}
