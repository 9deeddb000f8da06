use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Legend, Plot, Points};

use crate::color::ColorMap;
use crate::data::aggregate::ChartData;
use crate::data::filter::ScatterData;

const PIE_DIAMETER: f32 = 280.0;

// ---------------------------------------------------------------------------
// Pie chart (painter-drawn; egui_plot has no pie)
// ---------------------------------------------------------------------------

/// One slice as (label, start angle, sweep) in radians, clockwise from 12 o'clock.
fn slice_angles(chart: &ChartData) -> Vec<(&str, f32, f32)> {
    let total = chart.total();
    if total == 0 {
        return Vec::new();
    }
    let mut start = -FRAC_PI_2;
    chart
        .slices
        .iter()
        .filter(|&(_, &v)| v > 0)
        .map(|(label, &v)| {
            let sweep = v as f32 / total as f32 * TAU;
            let slice = (label.as_str(), start, sweep);
            start += sweep;
            slice
        })
        .collect()
}

/// Fill a circular sector. Split into quarter turns so each polygon stays convex.
fn sector_shapes(center: Pos2, radius: f32, start: f32, sweep: f32, fill: Color32) -> Vec<Shape> {
    let chunks = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let chunk = sweep / chunks as f32;
    (0..chunks)
        .map(|i| {
            let a0 = start + chunk * i as f32;
            let segments = ((chunk / TAU) * 96.0).ceil().max(2.0) as usize;
            let mut points = Vec::with_capacity(segments + 2);
            points.push(center);
            points.extend((0..=segments).map(|s| {
                let a = a0 + chunk * s as f32 / segments as f32;
                center + radius * egui::vec2(a.cos(), a.sin())
            }));
            Shape::convex_polygon(points, fill, Stroke::NONE)
        })
        .collect()
}

/// Render the success pie chart with a legend of counts and shares.
pub fn pie_chart(ui: &mut Ui, chart: &ChartData, colors: &ColorMap) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(chart.title.as_str());
    });
    ui.add_space(8.0);

    let slices = slice_angles(chart);
    if slices.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No launches for this selection.");
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let diameter = PIE_DIAMETER.min(ui.available_width() * 0.6);
        let (response, painter) = ui.allocate_painter(egui::vec2(diameter, diameter), Sense::hover());
        let center = response.rect.center();
        let radius = diameter * 0.48;

        for &(label, start, sweep) in &slices {
            painter.extend(sector_shapes(center, radius, start, sweep, colors.color_for(label)));
        }
        // Slice separators
        if slices.len() > 1 {
            for &(_, start, _) in &slices {
                let edge = center + radius * egui::vec2(start.cos(), start.sin());
                painter.line_segment([center, edge], Stroke::new(1.5, ui.visuals().panel_fill));
            }
        }

        ui.vertical(|ui: &mut Ui| {
            for (label, &value) in &chart.slices {
                let pct = chart.share(label).unwrap_or(0.0) * 100.0;
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new("■").color(colors.color_for(label)));
                    ui.label(format!("{label}: {value} ({pct:.1}%)"));
                });
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Payload vs. outcome scatter
// ---------------------------------------------------------------------------

/// Render the scatter chart, one point series per booster version category.
pub fn scatter_plot(ui: &mut Ui, scatter: &ScatterData<'_>, colors: &ColorMap) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&scatter.title).strong());
    });

    let mut by_booster: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for r in &scatter.rows {
        by_booster
            .entry(r.booster_version_category.as_str())
            .or_default()
            .push([r.payload_mass_kg, r.outcome_class.as_u64() as f64]);
    }

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(0.0)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (booster, points) in by_booster {
                plot_ui.points(
                    Points::new(points)
                        .name(booster)
                        .color(colors.color_for(booster))
                        .radius(4.0),
                );
            }
        });
}

/// Shown instead of the scatter plot when its inputs are rejected.
pub fn scatter_error(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(RichText::new(message).color(Color32::RED));
    });
}
