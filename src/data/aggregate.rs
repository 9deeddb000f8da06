use std::collections::BTreeMap;

use super::filter::filter_by_site;
use super::model::{LaunchRecord, LaunchTable, SiteSelection};

// ---------------------------------------------------------------------------
// ChartData – category label → value, rendered as proportions
// ---------------------------------------------------------------------------

/// Pie chart feed. Only categories observed in the input appear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub slices: BTreeMap<String, u64>,
}

impl ChartData {
    pub fn total(&self) -> u64 {
        self.slices.values().sum()
    }

    /// Fraction of the whole held by `label`, `None` if absent or the total is zero.
    pub fn share(&self, label: &str) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        self.slices
            .get(label)
            .map(|&v| v as f64 / total as f64)
    }
}

// ---------------------------------------------------------------------------
// Outcome aggregation
// ---------------------------------------------------------------------------

/// Aggregate a subset for the pie chart.
///
/// The two branches have different semantics and must stay separate:
/// * `All`: successes summed per launch site (sites with none keep a 0 entry).
/// * a specific site: rows counted per outcome class (`"0"` / `"1"`).
pub fn aggregate_outcomes<'a, I>(subset: I, site: &SiteSelection) -> BTreeMap<String, u64>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let mut acc: BTreeMap<String, u64> = BTreeMap::new();
    for r in subset {
        match site {
            SiteSelection::All => {
                *acc.entry(r.launch_site.clone()).or_default() += r.outcome_class.as_u64();
            }
            SiteSelection::Site(_) => {
                *acc.entry(r.outcome_class.to_string()).or_default() += 1;
            }
        }
    }
    acc
}

/// Site filter followed by aggregation, with the chart title.
pub fn pie_chart(table: &LaunchTable, site: &SiteSelection) -> ChartData {
    let subset = filter_by_site(table, site);
    ChartData {
        title: pie_title(site),
        slices: aggregate_outcomes(subset.iter().copied(), site),
    }
}

pub fn pie_title(site: &SiteSelection) -> String {
    match site {
        SiteSelection::All => "Total Successful Launches By Site".to_string(),
        SiteSelection::Site(s) => format!("Total Launch Outcomes for {s}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::OutcomeClass;
    use crate::data::test_support::sample_table;

    #[test]
    fn counts_outcomes_for_one_site() {
        let table = sample_table();
        let site = SiteSelection::from_value("CCAFS LC-40");
        let subset = filter_by_site(&table, &site);
        let counts = aggregate_outcomes(subset.iter().copied(), &site);

        let expected: BTreeMap<String, u64> = [("0".to_string(), 1), ("1".to_string(), 2)].into();
        assert_eq!(counts, expected);
    }

    #[test]
    fn sums_successes_per_site_for_all() {
        let table = sample_table();
        let sums = aggregate_outcomes(&table, &SiteSelection::All);

        assert_eq!(sums.get("CCAFS LC-40"), Some(&2));
        assert_eq!(sums.get("VAFB SLC-4E"), Some(&1));
        assert_eq!(sums.get("KSC LC-39A"), Some(&0));
        assert_eq!(sums.len(), 3);
    }

    #[test]
    fn all_sites_total_equals_success_count() {
        let table = sample_table();
        let chart = pie_chart(&table, &SiteSelection::All);
        let successes = table.iter().filter(|r| r.outcome_class == OutcomeClass::Success).count() as u64;
        assert_eq!(chart.total(), successes);
    }

    #[test]
    fn no_zero_fill_for_absent_outcome() {
        let table = sample_table();
        let chart = pie_chart(&table, &SiteSelection::from_value("VAFB SLC-4E"));
        assert_eq!(chart.slices.len(), 1);
        assert_eq!(chart.slices.get("1"), Some(&1));
        assert_eq!(chart.share("1"), Some(1.0));
        assert_eq!(chart.share("0"), None);
    }

    #[test]
    fn empty_input_gives_empty_chart() {
        let table = LaunchTable::new(Vec::new());
        let all = pie_chart(&table, &SiteSelection::All);
        assert!(all.slices.is_empty());
        assert_eq!(all.total(), 0);
        assert_eq!(all.share("anything"), None);

        let unknown = pie_chart(&sample_table(), &SiteSelection::from_value("Boca Chica"));
        assert!(unknown.slices.is_empty());
    }

    #[test]
    fn titles_follow_selection() {
        assert_eq!(pie_title(&SiteSelection::All), "Total Successful Launches By Site");
        assert_eq!(
            pie_title(&SiteSelection::from_value("KSC LC-39A")),
            "Total Launch Outcomes for KSC LC-39A"
        );
    }

    #[test]
    fn shares_sum_to_one() {
        let table = sample_table();
        let chart = pie_chart(&table, &SiteSelection::from_value("CCAFS LC-40"));
        let sum: f64 = chart.slices.keys().filter_map(|k| chart.share(k)).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}
