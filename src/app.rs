use eframe::egui;

use crate::data::model::{LaunchTable, SiteSelection};
use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(table: LaunchTable, initial_site: SiteSelection) -> Self {
        let mut state = AppState::new(table);
        state.set_site(initial_site);
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Derive both chart feeds once, from the controls as they stand at frame start.
        // Control edits made below show up on the next frame.
        let controls = self.state.controls();
        let pie = controls.pie();
        let scatter = controls.scatter();
        let in_range = scatter.as_ref().map_or(0, |s| s.rows.len());

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, in_range);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        if !controls.matches(&self.state) {
            ctx.request_repaint();
        }
        let state = &self.state;

        // ---- Bottom panel: rows behind the scatter chart ----
        if let (true, Ok(scatter)) = (state.show_rows, &scatter) {
            egui::TopBottomPanel::bottom("launch_rows")
                .resizable(true)
                .default_height(220.0)
                .show(ctx, |ui| {
                    table::launch_rows(ui, &scatter.rows);
                });
        }

        // ---- Central panel: pie on the left, scatter on the right ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |cols| {
                charts::pie_chart(&mut cols[0], &pie, &state.slice_colors);
                match &scatter {
                    Ok(scatter) => charts::scatter_plot(&mut cols[1], scatter, &state.booster_colors),
                    Err(e) => charts::scatter_error(&mut cols[1], &e.to_string()),
                }
            });
        });
    }
}
