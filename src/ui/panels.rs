use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::{PayloadRange, SiteSelection};
use crate::state::{AppState, SLIDER_STEP_KG};

// ---------------------------------------------------------------------------
// Left side panel – site and payload controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Launch Site");
    ui.separator();

    let options = state.site_options();
    let mut picked: Option<SiteSelection> = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(state.site.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &options {
                if ui
                    .selectable_label(state.site == *option, option.label())
                    .clicked()
                {
                    picked = Some(option.clone());
                }
            }
        });
    if let Some(site) = picked {
        state.set_site(site);
    }

    ui.add_space(12.0);
    ui.heading("Payload range (Kg)");
    ui.separator();

    let max = state.slider_max();
    let before = (state.payload_low, state.payload_high);
    ui.add(
        egui::Slider::new(&mut state.payload_low, 0.0..=max)
            .step_by(SLIDER_STEP_KG)
            .text("min"),
    );
    ui.add(
        egui::Slider::new(&mut state.payload_high, 0.0..=max)
            .step_by(SLIDER_STEP_KG)
            .text("max"),
    );
    if before != (state.payload_low, state.payload_high) {
        log::debug!(
            "payload range -> [{}, {}]",
            state.payload_low,
            state.payload_high
        );
    }
    if state.payload_low > state.payload_high {
        ui.label(RichText::new("min is above max: no launches match").color(Color32::YELLOW));
    }

    if ui.small_button("Reset to observed range").clicked() {
        let range = PayloadRange::covering(&state.table);
        state.payload_low = range.low();
        state.payload_high = range.high();
    }

    ui.add_space(12.0);
    ui.separator();
    ui.checkbox(&mut state.show_rows, "Show launch rows");
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar. `in_range` is the row count of this frame's scatter feed.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, in_range: usize) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("SpaceX Launch Records Dashboard");
        ui.separator();

        ui.label(status_line(state.table.len(), in_range));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

fn status_line(loaded: usize, in_range: usize) -> String {
    format!("{loaded} launches loaded, {in_range} in range")
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Replace the loaded table. A failed load keeps the current one.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(table) => state.set_table(table),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_reports_loaded_and_in_range_counts() {
        assert_eq!(status_line(56, 12), "56 launches loaded, 12 in range");
        assert_eq!(status_line(0, 0), "0 launches loaded, 0 in range");
    }
}
