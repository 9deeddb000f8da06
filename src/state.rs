use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::aggregate::{ChartData, pie_chart};
use crate::data::error::Result;
use crate::data::filter::{ScatterData, scatter_chart};
use crate::data::model::{LaunchTable, OutcomeClass, PayloadRange, SiteSelection};

/// Upper end of the payload slider unless the data goes beyond it.
pub const SLIDER_MAX_KG: f64 = 10_000.0;
pub const SLIDER_STEP_KG: f64 = 1_000.0;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Control values plus the loaded table. Chart feeds are derived from a
/// [`Controls`] snapshot each frame; nothing derived is stored.
pub struct AppState {
    /// Loaded launch table, shared read-only.
    pub table: Arc<LaunchTable>,

    /// Site dropdown value.
    pub site: SiteSelection,

    /// Payload slider values in kg.
    pub payload_low: f64,
    pub payload_high: f64,

    /// Whether the row table under the scatter chart is expanded.
    pub show_rows: bool,

    /// Colours for pie slices (site names and outcome classes).
    pub slice_colors: ColorMap,

    /// Colours for scatter points by booster version category.
    pub booster_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(table: LaunchTable) -> Self {
        let mut state = Self {
            table: Arc::new(LaunchTable::default()),
            site: SiteSelection::All,
            payload_low: 0.0,
            payload_high: 0.0,
            show_rows: false,
            slice_colors: ColorMap::default(),
            booster_colors: ColorMap::default(),
            status_message: None,
        };
        state.set_table(table);
        state
    }

    /// Swap in a newly loaded table and reset controls to their defaults.
    pub fn set_table(&mut self, table: LaunchTable) {
        let range = PayloadRange::covering(&table);
        self.payload_low = range.low();
        self.payload_high = range.high();
        self.site = SiteSelection::All;

        let outcome_labels = [OutcomeClass::Failure, OutcomeClass::Success].map(|c| c.to_string());
        self.slice_colors = ColorMap::new(
            table
                .sites()
                .iter()
                .map(String::as_str)
                .chain(outcome_labels.iter().map(String::as_str)),
        );
        self.booster_colors =
            ColorMap::new(table.iter().map(|r| r.booster_version_category.as_str()));

        self.table = Arc::new(table);
        self.status_message = None;
    }

    /// Dropdown entries: "All Sites" followed by every site in the table.
    pub fn site_options(&self) -> Vec<SiteSelection> {
        std::iter::once(SiteSelection::All)
            .chain(self.table.sites().iter().map(|s| SiteSelection::Site(s.clone())))
            .collect()
    }

    pub fn set_site(&mut self, site: SiteSelection) {
        if site != self.site {
            log::debug!("site selection -> {}", site.value());
            self.site = site;
        }
    }

    /// Slider upper limit: the default domain, widened to the heaviest payload.
    pub fn slider_max(&self) -> f64 {
        self.table
            .payload_bounds()
            .map_or(SLIDER_MAX_KG, |(_, hi)| hi.max(SLIDER_MAX_KG))
    }

    /// Snapshot of the current control values. Feeds derived from it borrow
    /// the snapshot, so the state stays free for the panels to mutate.
    pub fn controls(&self) -> Controls {
        Controls {
            table: Arc::clone(&self.table),
            site: self.site.clone(),
            payload_low: self.payload_low,
            payload_high: self.payload_high,
        }
    }
}

/// Control values read at the start of a frame.
#[derive(Debug, Clone)]
pub struct Controls {
    pub table: Arc<LaunchTable>,
    pub site: SiteSelection,
    pub payload_low: f64,
    pub payload_high: f64,
}

impl Controls {
    /// Whether `state` still holds the values this snapshot was taken from.
    pub fn matches(&self, state: &AppState) -> bool {
        Arc::ptr_eq(&self.table, &state.table)
            && self.site == state.site
            && self.payload_low.to_bits() == state.payload_low.to_bits()
            && self.payload_high.to_bits() == state.payload_high.to_bits()
    }

    /// Pie chart feed for the selected site.
    pub fn pie(&self) -> ChartData {
        let chart = pie_chart(&self.table, &self.site);
        log::debug!("pie recomputed: site={} slices={}", self.site.value(), chart.slices.len());
        chart
    }

    /// Scatter chart feed for the selected site and payload bounds.
    pub fn scatter(&self) -> Result<ScatterData<'_>> {
        let scatter = scatter_chart(&self.table, &self.site, self.payload_low, self.payload_high);
        match &scatter {
            Ok(data) => log::debug!(
                "scatter recomputed: site={} range=[{}, {}] rows={}",
                self.site.value(),
                self.payload_low,
                self.payload_high,
                data.rows.len()
            ),
            Err(e) => log::debug!("scatter rejected: {e}"),
        }
        scatter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;
    use crate::data::model::OutcomeClass::{Failure, Success};

    fn state() -> AppState {
        AppState::new(LaunchTable::new(vec![
            LaunchRecord::new("CCAFS LC-40", 500.0, "v1.0", Success),
            LaunchRecord::new("CCAFS LC-40", 6000.0, "FT", Failure),
            LaunchRecord::new("CCAFS LC-40", 9000.0, "B4", Success),
            LaunchRecord::new("KSC LC-39A", 4000.0, "B5", Success),
        ]))
    }

    #[test]
    fn defaults_span_observed_payloads() {
        let s = state();
        assert_eq!(s.site, SiteSelection::All);
        assert_eq!((s.payload_low, s.payload_high), (500.0, 9000.0));
        assert_eq!(s.slider_max(), SLIDER_MAX_KG);
        assert_eq!(s.controls().scatter().unwrap().rows.len(), 4);
    }

    #[test]
    fn site_options_start_with_all() {
        let s = state();
        let labels: Vec<String> = s.site_options().iter().map(|o| o.label().to_string()).collect();
        assert_eq!(labels, ["All Sites", "CCAFS LC-40", "KSC LC-39A"]);
    }

    #[test]
    fn controls_drive_both_feeds() {
        let mut s = state();
        s.set_site(SiteSelection::from_value("CCAFS LC-40"));
        s.payload_low = 0.0;
        s.payload_high = 7000.0;

        let controls = s.controls();
        let pie = controls.pie();
        assert_eq!(pie.title, "Total Launch Outcomes for CCAFS LC-40");
        assert_eq!(pie.slices.get("0"), Some(&1));
        assert_eq!(pie.slices.get("1"), Some(&2));

        let scatter = controls.scatter().unwrap();
        assert_eq!(scatter.rows.len(), 2);
    }

    #[test]
    fn snapshot_is_unaffected_by_later_control_changes() {
        let mut s = state();
        let controls = s.controls();
        let scatter = controls.scatter().unwrap();

        s.set_site(SiteSelection::from_value("KSC LC-39A"));
        s.payload_high = 1000.0;
        s.set_table(LaunchTable::default());

        assert!(!controls.matches(&s));
        assert!(s.controls().matches(&s));
        assert_eq!(scatter.rows.len(), 4);
        assert_eq!(controls.pie().title, "Total Successful Launches By Site");
        assert_eq!(s.controls().scatter().unwrap().rows.len(), 0);
    }

    #[test]
    fn non_finite_slider_value_is_reported() {
        let mut s = state();
        s.payload_high = f64::NAN;
        assert!(s.controls().scatter().is_err());
    }

    #[test]
    fn replacing_table_resets_controls() {
        let mut s = state();
        s.set_site(SiteSelection::from_value("KSC LC-39A"));
        s.set_table(LaunchTable::new(vec![LaunchRecord::new(
            "VAFB SLC-4E",
            12_000.0,
            "FT",
            Success,
        )]));
        assert_eq!(s.site, SiteSelection::All);
        assert_eq!((s.payload_low, s.payload_high), (12_000.0, 12_000.0));
        assert_eq!(s.slider_max(), 12_000.0);
    }
}
