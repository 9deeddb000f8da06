use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::LaunchRecord;

const ROW_HEIGHT: f32 = 18.0;

/// List the rows currently feeding the scatter chart.
pub fn launch_rows(ui: &mut Ui, rows: &[&LaunchRecord]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(40.0))
        .column(Column::initial(140.0).at_least(80.0))
        .column(Column::initial(140.0))
        .column(Column::initial(180.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["#", "Launch Site", "Payload Mass (kg)", "Booster Version Category", "class"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let idx = row.index();
                let r = rows[idx];
                row.col(|ui: &mut Ui| {
                    ui.label(idx.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(r.launch_site.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", r.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(r.booster_version_category.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(r.outcome_class.to_string());
                });
            });
        });
}
