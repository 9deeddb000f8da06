use super::error::Result;
use super::model::{LaunchRecord, LaunchTable, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------
//
// Every filter returns a fresh Vec of borrowed rows; the source table is
// never touched. Subsets can be fed back in with `.iter().copied()`.

/// Rows launched from `site`, or every row for [`SiteSelection::All`].
///
/// An unknown site yields an empty subset.
pub fn filter_by_site<'a, I>(rows: I, site: &SiteSelection) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    rows.into_iter().filter(|r| site.matches(r)).collect()
}

/// Rows with `low <= payload_mass_kg <= high`.
///
/// `low > high` matches nothing. Non-finite bounds are rejected.
pub fn filter_by_payload<'a, I>(rows: I, low: f64, high: f64) -> Result<Vec<&'a LaunchRecord>>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let range = PayloadRange::new(low, high)?;
    Ok(filter_by_range(rows, &range))
}

/// Same as [`filter_by_payload`] for an already validated range.
pub fn filter_by_range<'a, I>(rows: I, range: &PayloadRange) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    rows.into_iter()
        .filter(|r| range.contains(r.payload_mass_kg))
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter chart feed
// ---------------------------------------------------------------------------

/// Rows and title for the payload-vs-outcome scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterData<'a> {
    pub title: String,
    pub rows: Vec<&'a LaunchRecord>,
}

/// Conjunction of the site and payload predicates over the whole table.
pub fn scatter_chart<'a>(
    table: &'a LaunchTable,
    site: &SiteSelection,
    low: f64,
    high: f64,
) -> Result<ScatterData<'a>> {
    let by_site = filter_by_site(table, site);
    let rows = filter_by_payload(by_site.iter().copied(), low, high)?;
    Ok(ScatterData {
        title: scatter_title(site, low, high),
        rows,
    })
}

pub fn scatter_title(site: &SiteSelection, low: f64, high: f64) -> String {
    let scope = match site {
        SiteSelection::All => "All Sites",
        SiteSelection::Site(s) => s.as_str(),
    };
    format!(
        "Correlation Between Payload and Success ({scope}) - Payload: {low}kg to {high}kg"
    )
}
